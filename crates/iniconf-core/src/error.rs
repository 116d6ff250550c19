//! Error types for iniconf
//!
//! Every failure is a plain record: a kind plus a fixed set of context
//! fields, so callers can branch on the kind without downcasting.

use std::fmt;

/// Result type alias for iniconf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for iniconf operations
///
/// `type_hint`, `value`, `section` and `option` are always present. Fields
/// that don't apply to a given kind are empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The kind of error that occurred
    pub kind: ErrorKind,
    /// Expected type for parse failures ("int", "float", "bool")
    pub type_hint: String,
    /// The offending string for parse failures
    pub value: String,
    /// Section name (normalized) the lookup was made against
    pub section: String,
    /// Option name (normalized) the lookup was made for
    pub option: String,
    /// 1-based line number for syntax errors
    pub line: Option<usize>,
    /// Actionable help message
    pub help: Option<String>,
}

/// Categories of errors that can occur
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The requested section does not exist
    SectionNotFound,
    /// The requested option, or an option referenced by `%(name)s`, does not exist
    OptionNotFound,
    /// Interpolation did not settle within the depth bound
    MaxDepthReached,
    /// A resolved value could not be converted to the requested type
    CouldNotParse,
    /// Malformed INI text
    Syntax,
    /// Reading or writing a file failed
    Io,
}

impl ErrorKind {
    /// Short, stable name for the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::SectionNotFound => "section not found",
            ErrorKind::OptionNotFound => "option not found",
            ErrorKind::MaxDepthReached => "max depth reached",
            ErrorKind::CouldNotParse => "could not parse",
            ErrorKind::Syntax => "syntax error",
            ErrorKind::Io => "I/O error",
        }
    }
}

impl Error {
    fn bare(kind: ErrorKind) -> Self {
        Self {
            kind,
            type_hint: String::new(),
            value: String::new(),
            section: String::new(),
            option: String::new(),
            line: None,
            help: None,
        }
    }

    /// Create a section not found error
    pub fn section_not_found(section: impl Into<String>, option: impl Into<String>) -> Self {
        let section = section.into();
        Self {
            help: Some(format!("Add a [{}] section to the configuration", section)),
            section,
            option: option.into(),
            ..Self::bare(ErrorKind::SectionNotFound)
        }
    }

    /// Create an option not found error
    pub fn option_not_found(section: impl Into<String>, option: impl Into<String>) -> Self {
        let section = section.into();
        Self {
            help: Some(format!(
                "Define the option in [{}] or in the default section",
                section
            )),
            section,
            option: option.into(),
            ..Self::bare(ErrorKind::OptionNotFound)
        }
    }

    /// Create a max depth error (interpolation cycle or runaway chain)
    pub fn max_depth_reached(section: impl Into<String>, option: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            option: option.into(),
            help: Some("Check for %(name)s references that refer back to themselves".into()),
            ..Self::bare(ErrorKind::MaxDepthReached)
        }
    }

    /// Create a parse failure for a typed accessor
    pub fn could_not_parse(
        type_hint: impl Into<String>,
        value: impl Into<String>,
        section: impl Into<String>,
        option: impl Into<String>,
    ) -> Self {
        let type_hint = type_hint.into();
        Self {
            help: Some(format!("Ensure the value can be converted to {}", type_hint)),
            type_hint,
            value: value.into(),
            section: section.into(),
            option: option.into(),
            ..Self::bare(ErrorKind::CouldNotParse)
        }
    }

    /// Create a syntax error for malformed INI input
    pub fn syntax(line: usize, text: impl Into<String>) -> Self {
        Self {
            value: text.into(),
            line: Some(line),
            ..Self::bare(ErrorKind::Syntax)
        }
    }

    /// Create an I/O error for the given path
    pub fn io(path: impl Into<String>, cause: impl fmt::Display) -> Self {
        Self {
            value: path.into(),
            help: Some(cause.to_string()),
            ..Self::bare(ErrorKind::Io)
        }
    }

    /// Add the section the error occurred in
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    /// Add help message to the error
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Whether the error means "the value isn't there" (as opposed to a broken config)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::SectionNotFound | ErrorKind::OptionNotFound
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::SectionNotFound => write!(f, "Section not found: {}", self.section)?,
            ErrorKind::OptionNotFound => write!(f, "Option not found: {}", self.option)?,
            ErrorKind::MaxDepthReached => {
                write!(f, "Interpolation depth exceeded: {}", self.option)?
            }
            ErrorKind::CouldNotParse => write!(
                f,
                "Could not parse {:?} as {}",
                self.value, self.type_hint
            )?,
            ErrorKind::Syntax => write!(f, "Syntax error")?,
            ErrorKind::Io => write!(f, "I/O error: {}", self.value)?,
        }

        if !self.section.is_empty() && self.kind != ErrorKind::SectionNotFound {
            write!(f, "\n  Section: {}", self.section)?;
        }

        if !self.option.is_empty()
            && !matches!(
                self.kind,
                ErrorKind::OptionNotFound | ErrorKind::MaxDepthReached
            )
        {
            write!(f, "\n  Option: {}", self.option)?;
        }

        if let Some(line) = self.line {
            write!(f, "\n  Line {}: {}", line, self.value)?;
        }

        if let Some(help) = &self.help {
            write!(f, "\n  Help: {}", help)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}
