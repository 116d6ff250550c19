//! INI text parsing
//!
//! Accepted syntax:
//! - `[section]` headers (`[default]` addresses the default section)
//! - `key = value` or `key: value`, split at the first `=` or `:`
//! - `#` and `;` comment lines, and `rem` comment lines
//! - continuation lines: an indented line, or a line without a separator,
//!   directly after an option is appended to its value with `\n`
//!
//! Options before the first header belong to the default section.

use crate::error::{Error, Result};
use crate::store::{normalize, Store, DEFAULT_SECTION};

/// Parse INI text into a new store
pub fn parse(text: &str) -> Result<Store> {
    let mut store = Store::new();
    parse_into(&mut store, text)?;
    Ok(store)
}

/// Parse INI text into an existing store, overwriting repeated options
pub fn parse_into(store: &mut Store, text: &str) -> Result<()> {
    let mut section = DEFAULT_SECTION.to_string();
    let mut option: Option<String> = None;

    for (idx, raw) in text.lines().enumerate() {
        let lineno = idx + 1;
        let line = raw.trim();

        if line.is_empty() || is_comment(line) {
            continue;
        }

        let indented = raw.starts_with(char::is_whitespace);
        if indented {
            if let Some(current) = &option {
                append_line(store, &section, current, line);
                continue;
            }
        }

        if line.starts_with('[') {
            let name = line
                .strip_suffix(']')
                .map(|s| s[1..].trim())
                .ok_or_else(|| {
                    Error::syntax(lineno, line)
                        .with_help("Close the section header with ']'")
                })?;
            if name.is_empty() {
                return Err(Error::syntax(lineno, line).with_help("Section names can't be empty"));
            }
            section = normalize(name);
            if !store.add_section(&section) {
                log::debug!("line {}: reopening section [{}]", lineno, section);
            }
            option = None;
            continue;
        }

        match line.find(&['=', ':'][..]) {
            Some(0) => {
                return Err(Error::syntax(lineno, line)
                    .with_section(section)
                    .with_help("Option names can't be empty"));
            }
            Some(i) => {
                let key = normalize(line[..i].trim());
                let value = line[i + 1..].trim();
                if !store.add_option(&section, &key, value) {
                    log::warn!(
                        "line {}: option '{}' in [{}] overrides an earlier value",
                        lineno,
                        key,
                        section
                    );
                }
                option = Some(key);
            }
            None => match &option {
                Some(current) => append_line(store, &section, current, line),
                None => {
                    return Err(Error::syntax(lineno, line)
                        .with_section(section)
                        .with_help("Expected '[section]', 'key = value' or 'key: value'"));
                }
            },
        }
    }

    log::debug!("parsed {} sections", store.sections().len());
    Ok(())
}

fn is_comment(line: &str) -> bool {
    if line.starts_with('#') || line.starts_with(';') {
        return true;
    }
    match line.get(..3) {
        Some(word) if word.eq_ignore_ascii_case("rem") => {
            line[3..].is_empty() || line[3..].starts_with(char::is_whitespace)
        }
        _ => false,
    }
}

fn append_line(store: &mut Store, section: &str, option: &str, line: &str) {
    let mut value = store
        .section(section)
        .and_then(|opts| opts.get(option))
        .cloned()
        .unwrap_or_default();
    value.push('\n');
    value.push_str(line);
    store.add_option(section, option, value);
}
