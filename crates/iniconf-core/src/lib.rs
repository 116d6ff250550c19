//! iniconf-core: INI configuration store with interpolation
//!
//! This crate parses INI text into sections of key/value pairs and provides
//! case-insensitive, typed lookups with a default-section fallback and
//! `%(name)s` interpolation.
//!
//! # Example
//!
//! ```rust
//! use iniconf_core::Config;
//!
//! let ini = r#"
//! [default]
//! host = example.com
//!
//! [db]
//! url = postgres://%(host)s:%(port)s/app
//! port = 5432
//! "#;
//!
//! let config = Config::from_ini(ini).unwrap();
//! assert_eq!(
//!     config.get_string("DB", "url").unwrap(),
//!     "postgres://example.com:5432/app"
//! );
//! assert_eq!(config.get_int("db", "port").unwrap(), 5432);
//! ```

pub mod error;
pub mod interpolation;
pub mod loader;
pub mod resolver;
pub mod store;
pub mod writer;

mod config;

pub use config::{Config, ConfigOptions};
pub use error::{Error, ErrorKind, Result};
pub use resolver::{Resolver, BOOL_STRINGS, DEPTH_VALUES};
pub use store::{Store, DEFAULT_SECTION};
