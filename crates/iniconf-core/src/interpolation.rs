//! Reference token scanning
//!
//! Values may embed `%(name)s` tokens that stand for the value of another
//! option. This module only locates tokens; substitution lives in the
//! resolver.

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

static REFERENCE_RE: OnceLock<Regex> = OnceLock::new();

fn reference_re() -> &'static Regex {
    REFERENCE_RE.get_or_init(|| {
        Regex::new(r"%\(([a-zA-Z0-9_.\-]+)\)s").expect("reference pattern is a valid regex")
    })
}

/// A `%(name)s` token found in a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'a> {
    /// Byte range of the whole token, delimiters included
    pub span: Range<usize>,
    /// The referenced option name as written
    pub name: &'a str,
}

/// Find the first reference token in `value`
pub fn find_reference(value: &str) -> Option<Reference<'_>> {
    let caps = reference_re().captures(value)?;
    let whole = caps.get(0)?;
    let name = caps.get(1)?;
    Some(Reference {
        span: whole.range(),
        name: name.as_str(),
    })
}

/// Check if a value contains any reference token
pub fn contains_reference(value: &str) -> bool {
    reference_re().is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_reference() {
        let r = find_reference("%(host)s/path").unwrap();
        assert_eq!(r.name, "host");
        assert_eq!(r.span, 0..8);
    }

    #[test]
    fn test_find_first_of_many() {
        let value = "http://%(host)s:%(port)s/";
        let r = find_reference(value).unwrap();
        assert_eq!(r.name, "host");
        assert_eq!(&value[r.span], "%(host)s");
    }

    #[test]
    fn test_name_charset() {
        let r = find_reference("x %(My.Opt-1_a)s y").unwrap();
        assert_eq!(r.name, "My.Opt-1_a");
        assert_eq!(r.span, 2..16);
    }

    #[test]
    fn test_no_reference() {
        assert_eq!(find_reference("plain value"), None);
        assert_eq!(find_reference("100%"), None);
        assert_eq!(find_reference("%(unterminated"), None);
        assert_eq!(find_reference("%()s"), None);
        assert_eq!(find_reference("%(has space)s"), None);
        assert_eq!(find_reference("%(name)d"), None);
    }

    #[test]
    fn test_contains_reference() {
        assert!(contains_reference("a %(b)s c"));
        assert!(!contains_reference("a (b) c"));
    }
}
