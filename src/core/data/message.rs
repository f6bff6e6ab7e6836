use std::{
    collections::{BTreeMap, HashMap},
    path::PathBuf,
};

use crate::core::{error::I18nError, stamp::FreshnessStamp};

/// Fallback plural case, chosen when the computed label has no case.
pub const OTHER_CASE: &str = "other";

/// A message value from a locale catalog.
///
/// inlang message files encode a message either as a plain string or as a
/// `match` object that selects one variant by plural category:
///
/// ```json
/// {
///   "greet": "Hello {name}",
///   "items": [{
///     "declarations": ["input count", "local countPlural = count: plural"],
///     "selectors": ["countPlural"],
///     "match": { "countPlural=one": "1 item", "countPlural=other": "{count} items" }
///   }]
/// }
/// ```
///
/// Cases hold plain text only, so selection is always a single level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    /// Literal text with `{name}` placeholders.
    Plain(String),

    /// Pluralized message: one case is picked from `cases` at render time.
    Selected {
        /// Selector name from the catalog (`countPlural`); metadata only.
        selector: String,
        /// Case label (`one`, `other`, ...) to plain text.
        cases: BTreeMap<String, String>,
    },
}

impl Template {
    /// Plural template with `one`/`other` cases.
    pub fn plural(selector: impl Into<String>, one: impl Into<String>, other: impl Into<String>) -> Self {
        Template::Selected {
            selector: selector.into(),
            cases: BTreeMap::from([
                ("one".to_string(), one.into()),
                (OTHER_CASE.to_string(), other.into()),
            ]),
        }
    }

    /// Text shown when a single representative string is needed
    /// (the `other` case for plurals, else the first case).
    pub fn display_text(&self) -> &str {
        match self {
            Template::Plain(text) => text,
            Template::Selected { cases, .. } => cases
                .get(OTHER_CASE)
                .or_else(|| cases.values().next())
                .map(String::as_str)
                .unwrap_or_default(),
        }
    }
}

/// Parsed message entries of one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub locale: String,
    pub entries: HashMap<String, Template>,
    /// Stamp of the file this catalog was parsed from; `None` if it did not exist.
    pub stamp: Option<FreshnessStamp>,
    pub file_path: PathBuf,
    /// Monotonic parse counter assigned by the cache; distinguishes re-parses.
    pub generation: u64,
    /// Problems found while loading (unreadable file, unparseable entries).
    pub problems: Vec<I18nError>,
}

impl Catalog {
    pub fn empty(locale: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
        Self {
            locale: locale.into(),
            entries: HashMap::new(),
            stamp: None,
            file_path: file_path.into(),
            generation: 0,
            problems: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Template> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in sorted order.
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Where a key is declared in a locale catalog file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CatalogLocation {
    pub locale: String,
    pub file_path: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
}
