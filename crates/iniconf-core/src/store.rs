//! In-memory section/option storage
//!
//! The store maps normalized section names to normalized option names to raw
//! string values. The default section lives in the same map under
//! [`DEFAULT_SECTION`] and always exists.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Error, Result};

/// Name of the reserved section consulted as a fallback by option lookups
pub const DEFAULT_SECTION: &str = "default";

/// Options of a single section, keyed by lower-cased option name
pub type Options = IndexMap<String, String>;

/// Lower-case a section or option name
pub(crate) fn normalize(name: &str) -> String {
    name.to_lowercase()
}

/// Parsed configuration data: sections of raw key/value pairs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Store {
    sections: IndexMap<String, Options>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Create a store holding only the (empty) default section
    pub fn new() -> Self {
        let mut sections = IndexMap::new();
        sections.insert(DEFAULT_SECTION.to_string(), Options::new());
        Self { sections }
    }

    /// Names of all sections, the default section first
    pub fn sections(&self) -> Vec<String> {
        self.sections.keys().cloned().collect()
    }

    /// Check if the section exists (case-insensitive)
    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(&normalize(section))
    }

    /// Option names visible from a section: default-section options followed
    /// by section-local ones, each name listed once
    pub fn options(&self, section: &str) -> Result<Vec<String>> {
        let section = normalize(section);
        let local = self
            .sections
            .get(&section)
            .ok_or_else(|| Error::section_not_found(&section, ""))?;

        let mut names: Vec<String> = self.defaults().keys().cloned().collect();
        for name in local.keys() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        Ok(names)
    }

    /// Check if an option is visible from a section, either locally or via
    /// the default section. Absent sections never have options.
    pub fn has_option(&self, section: &str, option: &str) -> bool {
        let Some(local) = self.sections.get(&normalize(section)) else {
            return false;
        };
        let option = normalize(option);
        local.contains_key(&option) || self.defaults().contains_key(&option)
    }

    /// Options stored directly in a section, without default-section entries
    pub fn section(&self, section: &str) -> Option<&Options> {
        self.sections.get(&normalize(section))
    }

    /// Options of the default section
    pub fn defaults(&self) -> &Options {
        // Inserted by `new`, refused by `remove_section`
        &self.sections[DEFAULT_SECTION]
    }

    /// Iterate over sections and their local options in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Options)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Add a section. Returns false if it already existed.
    pub fn add_section(&mut self, section: &str) -> bool {
        let section = normalize(section);
        if self.sections.contains_key(&section) {
            return false;
        }
        self.sections.insert(section, Options::new());
        true
    }

    /// Remove a section. The default section can't be removed.
    pub fn remove_section(&mut self, section: &str) -> bool {
        let section = normalize(section);
        if section == DEFAULT_SECTION {
            return false;
        }
        self.sections.shift_remove(&section).is_some()
    }

    /// Set an option, creating the section if needed. Returns true if the
    /// option is new, false if an existing value was replaced.
    pub fn add_option(&mut self, section: &str, option: &str, value: impl Into<String>) -> bool {
        self.sections
            .entry(normalize(section))
            .or_default()
            .insert(normalize(option), value.into())
            .is_none()
    }

    /// Remove an option from a section's local options. Returns false if the
    /// section or the option doesn't exist.
    pub fn remove_option(&mut self, section: &str, option: &str) -> bool {
        match self.sections.get_mut(&normalize(section)) {
            Some(options) => options.shift_remove(&normalize(option)).is_some(),
            None => false,
        }
    }
}
