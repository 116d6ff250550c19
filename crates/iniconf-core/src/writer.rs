//! INI text output
//!
//! Writes the default section first, then the remaining sections in
//! insertion order. Multi-line values are written as indented continuation
//! lines so the loader reads them back unchanged.

use std::fmt::Write as _;

use crate::store::{Options, Store, DEFAULT_SECTION};

const CONTINUATION_INDENT: &str = "  ";

/// Render a store as INI text, with an optional `#` comment header
pub fn write(store: &Store, header: Option<&str>) -> String {
    let mut out = String::new();

    if let Some(header) = header {
        for line in header.lines() {
            if line.is_empty() {
                out.push_str("#\n");
            } else {
                let _ = writeln!(out, "# {}", line);
            }
        }
        out.push('\n');
    }

    let defaults = store.defaults();
    if !defaults.is_empty() {
        write_section(&mut out, DEFAULT_SECTION, defaults);
    }

    for (name, options) in store.iter().filter(|(name, _)| *name != DEFAULT_SECTION) {
        write_section(&mut out, name, options);
    }

    log::debug!("wrote {} bytes of INI", out.len());
    out
}

fn write_section(out: &mut String, name: &str, options: &Options) {
    let _ = writeln!(out, "[{}]", name);
    for (key, value) in options {
        let mut lines = value.split('\n');
        let first = lines.next().unwrap_or_default();
        if first.is_empty() {
            let _ = writeln!(out, "{} =", key);
        } else {
            let _ = writeln!(out, "{} = {}", key, first);
        }
        for line in lines {
            let _ = writeln!(out, "{}{}", CONTINUATION_INDENT, line);
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_layout() {
        let mut store = Store::new();
        store.add_option("web", "port", "80");
        store.add_option(DEFAULT_SECTION, "host", "example.com");
        store.add_option("web", "url", "http://%(host)s:%(port)s/");

        let text = write(&store, Some("generated"));
        assert_eq!(
            text,
            "# generated\n\n[default]\nhost = example.com\n\n[web]\nport = 80\nurl = http://%(host)s:%(port)s/\n\n"
        );
    }

    #[test]
    fn test_empty_default_section_omitted() {
        let mut store = Store::new();
        store.add_section("empty");
        assert_eq!(write(&store, None), "[empty]\n\n");
    }

    #[test]
    fn test_round_trip() {
        let mut store = Store::new();
        store.add_option(DEFAULT_SECTION, "name", "app");
        store.add_option("s", "motd", "first\nsecond\nthird");
        store.add_option("s", "blank", "");
        store.add_option("s", "time", "12:30");
        store.add_section("empty");

        let reparsed = loader::parse(&write(&store, Some("a\n\nb"))).unwrap();
        assert_eq!(reparsed, store);
    }
}
