//! Lookup and interpolation over a [`Store`]
//!
//! The resolver is a read-only view: it borrows the store and never changes
//! it. `%(name)s` references are expanded one token per pass, up to a fixed
//! number of passes. There is no dependency graph, so a long acyclic chain
//! fails the same way a cycle does once it exceeds the bound.

use crate::error::{Error, Result};
use crate::interpolation;
use crate::store::{normalize, Store};

/// Maximum number of substitution passes for a single value
pub const DEPTH_VALUES: usize = 200;

/// Recognized boolean spellings, matched after lower-casing
pub const BOOL_STRINGS: &[(&str, bool)] = &[
    ("1", true),
    ("t", true),
    ("true", true),
    ("y", true),
    ("yes", true),
    ("on", true),
    ("0", false),
    ("f", false),
    ("false", false),
    ("n", false),
    ("no", false),
    ("off", false),
];

/// Look up a boolean spelling in [`BOOL_STRINGS`]
pub fn parse_bool(s: &str) -> Option<bool> {
    let lower = s.to_lowercase();
    BOOL_STRINGS
        .iter()
        .find(|(k, _)| *k == lower)
        .map(|(_, v)| *v)
}

/// Read-only query API over a store
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    store: &'a Store,
    max_depth: usize,
}

impl<'a> Resolver<'a> {
    /// Create a resolver with the default depth bound
    pub fn new(store: &'a Store) -> Self {
        Self::with_max_depth(store, DEPTH_VALUES)
    }

    /// Create a resolver with a custom depth bound
    pub fn with_max_depth(store: &'a Store, max_depth: usize) -> Self {
        Self { store, max_depth }
    }

    /// The store this resolver reads from
    pub fn store(&self) -> &'a Store {
        self.store
    }

    /// Names of all sections
    pub fn sections(&self) -> Vec<String> {
        self.store.sections()
    }

    /// Check if a section exists
    pub fn has_section(&self, section: &str) -> bool {
        self.store.has_section(section)
    }

    /// Option names visible from a section (including default-section ones)
    pub fn options(&self, section: &str) -> Result<Vec<String>> {
        self.store.options(section)
    }

    /// Check if an option is visible from a section
    pub fn has_option(&self, section: &str, option: &str) -> bool {
        self.store.has_option(section, option)
    }

    /// Get the raw value of an option, without interpolation
    ///
    /// Unlike [`has_option`](Self::has_option), this does not fall back to
    /// the default section: the option must be stored in `section` itself.
    pub fn get_raw_string(&self, section: &str, option: &str) -> Result<String> {
        let section = normalize(section);
        let option = normalize(option);

        let Some(options) = self.store.section(&section) else {
            return Err(Error::section_not_found(section, option));
        };
        match options.get(&option) {
            Some(value) => Ok(value.clone()),
            None => Err(Error::option_not_found(section, option)),
        }
    }

    /// Get the value of an option with `%(name)s` references expanded
    ///
    /// Each pass replaces the first reference token, looking the name up in
    /// the default section and preferring the value from `section` when it
    /// has one. Fails with `OptionNotFound` for an unresolvable reference and
    /// with `MaxDepthReached` when references remain after the bound.
    pub fn get_string(&self, section: &str, option: &str) -> Result<String> {
        let mut value = self.get_raw_string(section, option)?;

        let section = normalize(section);
        let option = normalize(option);
        let local = self.store.section(&section);
        let defaults = self.store.defaults();

        for pass in 0..self.max_depth {
            let Some(reference) = interpolation::find_reference(&value) else {
                return Ok(value);
            };

            let name = normalize(reference.name);
            let span = reference.span;
            let replacement = local
                .and_then(|opts| opts.get(&name))
                .or_else(|| defaults.get(&name))
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    Error::option_not_found(&section, &option).with_help(format!(
                        "Referenced option '{}' is not defined in [{}] or the default section",
                        name, section
                    ))
                })?;

            log::trace!(
                "[{}] {}: pass {} expands %({})s",
                section,
                option,
                pass + 1,
                name
            );
            value.replace_range(span, replacement);
        }

        if interpolation::contains_reference(&value) {
            log::debug!(
                "[{}] {}: references remain after {} passes",
                section,
                option,
                self.max_depth
            );
            return Err(Error::max_depth_reached(section, option));
        }

        Ok(value)
    }

    /// Get an option as a base-10 integer
    pub fn get_int(&self, section: &str, option: &str) -> Result<i64> {
        let value = self.get_string(section, option)?;
        value
            .parse()
            .map_err(|_| Error::could_not_parse("int", value, normalize(section), normalize(option)))
    }

    /// Get an option as a floating-point number
    pub fn get_float(&self, section: &str, option: &str) -> Result<f64> {
        let value = self.get_string(section, option)?;
        value.parse().map_err(|_| {
            Error::could_not_parse("float", value, normalize(section), normalize(option))
        })
    }

    /// Get an option as a boolean, using the spellings in [`BOOL_STRINGS`]
    pub fn get_bool(&self, section: &str, option: &str) -> Result<bool> {
        let value = self.get_string(section, option)?;
        match parse_bool(&value) {
            Some(b) => Ok(b),
            None => Err(Error::could_not_parse(
                "bool",
                value,
                normalize(section),
                normalize(option),
            )),
        }
    }
}
