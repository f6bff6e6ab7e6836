//! Issue types reported by `paraglot check`.
//!
//! Each issue carries everything the reporter needs to print it: a location,
//! a primary message, and optional details.

use enum_dispatch::enum_dispatch;

use crate::core::data::CatalogLocation;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    UnusedKey,
    UnparseableEntry,
    UnreadableCatalog,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::UnusedKey => write!(f, "unused-key"),
            Rule::UnparseableEntry => write!(f, "unparseable-entry"),
            Rule::UnreadableCatalog => write!(f, "unreadable-catalog"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Base-catalog key with no call site in the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedKeyIssue {
    pub key: String,
    pub location: CatalogLocation,
    /// Display text of the message.
    pub text: String,
}

/// Catalog value that matches no known message shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnparseableEntryIssue {
    pub key: String,
    pub location: CatalogLocation,
}

/// Locale catalog that is missing or is not a JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableCatalogIssue {
    pub locale: String,
    pub file_path: String,
    pub reason: String,
}

/// Source file could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

// ============================================================
// Issue Enum
// ============================================================

/// A problem found by `paraglot check`.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    UnusedKey(UnusedKeyIssue),
    UnparseableEntry(UnparseableEntryIssue),
    UnreadableCatalog(UnreadableCatalogIssue),
    ParseError(ParseErrorIssue),
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A key inside a catalog file.
    Catalog(&'a CatalogLocation),
    /// File-level only, no line context.
    File { path: &'a str },
}

/// Common reporting interface over every issue type.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn severity(&self) -> Severity;

    fn rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Report for UnusedKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Catalog(&self.location)
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn rule(&self) -> Rule {
        Rule::UnusedKey
    }

    fn details(&self) -> Option<String> {
        Some(format!("(\"{}\")", self.text))
    }
}

impl Report for UnparseableEntryIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Catalog(&self.location)
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn rule(&self) -> Rule {
        Rule::UnparseableEntry
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "unsupported message format in locale '{}'",
            self.location.locale
        ))
    }
}

impl Report for UnreadableCatalogIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.reason.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn rule(&self) -> Rule {
        Rule::UnreadableCatalog
    }

    fn details(&self) -> Option<String> {
        Some(format!("locale '{}'", self.locale))
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn rule(&self) -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_key(&self) -> (String, usize) {
        match self.location() {
            ReportLocation::Catalog(loc) => (loc.file_path.display().to_string(), loc.line),
            ReportLocation::File { path } => (path.to_string(), 0),
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
