//! iniconf CLI library
//!
//! This module exposes the CLI entry point so other binaries can bundle it.

mod cli;

pub use cli::run;
