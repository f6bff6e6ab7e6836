//! Typed outcomes for the catalog and extraction subsystem.
//!
//! Lookups and parsing recover locally and report through the diagnostic sink;
//! these errors are returned only where a caller has to decide what to do.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by configuration, catalog and extraction operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum I18nError {
    /// The inlang settings file is missing or does not have the expected shape.
    #[error("project is not configured for i18n: {reason}")]
    NotConfigured { reason: String },

    /// A locale's catalog file is missing or unreadable.
    #[error("catalog for locale '{locale}' is unreadable ({path}): {reason}")]
    CatalogUnreadable {
        locale: String,
        path: PathBuf,
        reason: String,
    },

    /// A catalog value does not match any known message shape.
    #[error("unsupported message format for key '{key}' in locale '{locale}'")]
    CatalogEntryUnparseable { locale: String, key: String },

    /// A proposed message key is not a valid snake_case identifier.
    #[error("invalid message key '{key}': {reason}")]
    InvalidIdentifier { key: String, reason: String },

    /// Extraction was asked to write a locale it has no translation for.
    #[error("no translation provided for locale '{locale}'")]
    MissingTranslation { locale: String },

    /// The key already exists in a locale's catalog.
    #[error("message key '{key}' already exists in locale '{locale}'")]
    DuplicateKey { key: String, locale: String },

    /// Some locale catalogs were written, others failed.
    #[error(
        "extraction of '{key}' failed for {}: updated {:?}",
        format_failures(.failed),
        .updated
    )]
    PartialExtractionFailure {
        key: String,
        updated: Vec<String>,
        failed: Vec<LocaleFailure>,
    },
}

/// A single locale that could not be written during extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFailure {
    pub locale: String,
    pub reason: String,
}

fn format_failures(failed: &[LocaleFailure]) -> String {
    failed
        .iter()
        .map(|f| format!("'{}' ({})", f.locale, f.reason))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors from rendering a template. Callers that need a string fall back to the key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// No `count` was supplied and the template has no `other` case.
    #[error("pluralized message needs a count and has no 'other' case")]
    MissingPluralCount,

    /// Neither the computed plural label nor `other` exist among the cases.
    #[error("no case for plural label '{label}' and no 'other' case")]
    NoMatchingCase { label: String },
}
