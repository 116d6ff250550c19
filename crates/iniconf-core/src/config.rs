//! Main Config type for iniconf
//!
//! Config bundles a parsed [`Store`] with the options used to resolve it,
//! and handles reading and writing INI files.

use std::path::Path;

use crate::error::{Error, Result};
use crate::loader;
use crate::resolver::{Resolver, DEPTH_VALUES};
use crate::store::Store;
use crate::writer;

/// Configuration options for resolving values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOptions {
    /// Maximum number of `%(name)s` substitution passes per value
    pub max_depth: usize,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            max_depth: DEPTH_VALUES,
        }
    }
}

/// The main configuration container
#[derive(Debug, Clone, Default)]
pub struct Config {
    store: Store,
    options: ConfigOptions,
}

impl Config {
    /// Create a Config from an existing store
    pub fn new(store: Store) -> Self {
        Self {
            store,
            options: ConfigOptions::default(),
        }
    }

    /// Create a Config with custom options
    pub fn with_options(store: Store, options: ConfigOptions) -> Self {
        Self { store, options }
    }

    /// Load configuration from an INI string
    pub fn from_ini(text: &str) -> Result<Self> {
        Ok(Self::new(loader::parse(text)?))
    }

    /// Load configuration from an INI file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path.display().to_string(), e))?;

        log::debug!("loading {}", path.display());
        Self::from_ini(&content)
    }

    /// The underlying store
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Mutable access to the underlying store
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// Resolution options
    pub fn options(&self) -> &ConfigOptions {
        &self.options
    }

    /// A resolver over this config's store
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::with_max_depth(&self.store, self.options.max_depth)
    }

    /// Names of all sections
    pub fn sections(&self) -> Vec<String> {
        self.store.sections()
    }

    /// Check if a section exists
    pub fn has_section(&self, section: &str) -> bool {
        self.store.has_section(section)
    }

    /// Option names visible from a section
    pub fn section_options(&self, section: &str) -> Result<Vec<String>> {
        self.store.options(section)
    }

    /// Check if an option is visible from a section
    pub fn has_option(&self, section: &str, option: &str) -> bool {
        self.store.has_option(section, option)
    }

    /// Get a raw (uninterpolated) value
    pub fn get_raw_string(&self, section: &str, option: &str) -> Result<String> {
        self.resolver().get_raw_string(section, option)
    }

    /// Get a value with `%(name)s` references expanded
    pub fn get_string(&self, section: &str, option: &str) -> Result<String> {
        self.resolver().get_string(section, option)
    }

    /// Get a value as an integer
    pub fn get_int(&self, section: &str, option: &str) -> Result<i64> {
        self.resolver().get_int(section, option)
    }

    /// Get a value as a float
    pub fn get_float(&self, section: &str, option: &str) -> Result<f64> {
        self.resolver().get_float(section, option)
    }

    /// Get a value as a boolean
    pub fn get_bool(&self, section: &str, option: &str) -> Result<bool> {
        self.resolver().get_bool(section, option)
    }

    /// Export the configuration as INI text
    pub fn to_ini_string(&self, header: Option<&str>) -> String {
        writer::write(&self.store, header)
    }

    /// Export the raw configuration as JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.store)
            .map_err(|e| Error::io("<json>", e).with_help("Failed to serialize to JSON"))
    }

    /// Export the raw configuration as YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.store)
            .map_err(|e| Error::io("<yaml>", e).with_help("Failed to serialize to YAML"))
    }

    /// Write the configuration to an INI file
    pub fn write_file(&self, path: impl AsRef<Path>, header: Option<&str>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_ini_string(header))
            .map_err(|e| Error::io(path.display().to_string(), e))?;

        log::debug!("wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const SAMPLE: &str = r#"
[default]
host = something.com
url = http://%(host)s/

[service-1]
url = http://%(host)s:%(port)s/
port = 8080
enabled = yes
ratio = 0.5

[service-2]
host = other.com
"#;

    #[test]
    fn test_from_ini() {
        let config = Config::from_ini(SAMPLE).unwrap();

        assert_eq!(
            config.sections(),
            vec!["default", "service-1", "service-2"]
        );
        assert_eq!(
            config.get_string("service-1", "url").unwrap(),
            "http://something.com:8080/"
        );
        assert_eq!(config.get_int("service-1", "port").unwrap(), 8080);
        assert_eq!(config.get_float("service-1", "ratio").unwrap(), 0.5);
        assert!(config.get_bool("service-1", "enabled").unwrap());
    }

    #[test]
    fn test_default_url_is_not_raw_for_other_sections() {
        let config = Config::from_ini(SAMPLE).unwrap();

        // `url` is visible from service-2 but not stored there
        assert!(config.has_option("service-2", "url"));
        let err = config.get_string("service-2", "url").unwrap_err();
        assert_eq!(err.kind, ErrorKind::OptionNotFound);
    }

    #[test]
    fn test_custom_depth() {
        let mut store = Store::new();
        store.add_option("s", "a", "%(b)s");
        store.add_option("s", "b", "%(c)s");
        store.add_option("s", "c", "done");

        let config = Config::with_options(store, ConfigOptions { max_depth: 1 });
        let err = config.get_string("s", "a").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MaxDepthReached);
    }

    #[test]
    fn test_store_mut() {
        let mut config = Config::default();
        config.store_mut().add_option("s", "k", "v");
        assert_eq!(config.get_raw_string("S", "K").unwrap(), "v");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/iniconf/test.ini").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
    }

    #[test]
    fn test_write_and_load_file() {
        let config = Config::from_ini(SAMPLE).unwrap();
        let path = std::env::temp_dir().join(format!("iniconf-test-{}.ini", std::process::id()));

        config.write_file(&path, Some("test output")).unwrap();
        let reloaded = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(reloaded.store(), config.store());
    }

    #[test]
    fn test_to_json() {
        let config = Config::from_ini(SAMPLE).unwrap();
        let json: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();

        assert_eq!(json["service-2"]["host"], "other.com");
        assert_eq!(json["service-1"]["url"], "http://%(host)s:%(port)s/");
    }

    #[test]
    fn test_to_yaml() {
        let config = Config::from_ini(SAMPLE).unwrap();
        let yaml = config.to_yaml().unwrap();

        assert!(yaml.contains("service-2:"));
        assert!(yaml.contains("host: other.com"));
    }
}
