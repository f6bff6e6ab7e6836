//! Human-readable message key generation and validation.

use std::sync::LazyLock;

use rand::{Rng, seq::SliceRandom};
use regex::Regex;
use serde::Deserialize;

use crate::core::{data::Catalog, error::I18nError};

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_][a-z_0-9]*$").expect("Invalid regex pattern"));

static WORDS: LazyLock<WordLists> = LazyLock::new(|| {
    serde_json::from_str(include_str!("words.json")).expect("Invalid embedded word list")
});

/// Tries before falling back to a numeric suffix.
const MAX_ATTEMPTS: usize = 16;

#[derive(Debug, Deserialize)]
struct WordLists {
    adjectives: Vec<String>,
    // Shipped with the word list but not part of the key shape.
    #[allow(dead_code)]
    adverbs: Vec<String>,
    animals: Vec<String>,
    verbs: Vec<String>,
}

/// Check that `key` can be used as a message key (and thus a JS function name).
pub fn validate_identifier(key: &str) -> Result<(), I18nError> {
    let reason = if key.is_empty() {
        "name must not be empty"
    } else if key.starts_with(|c: char| c.is_ascii_digit()) {
        "cannot start with a number"
    } else if !IDENTIFIER_RE.is_match(key) {
        "name must only contain 'a-z', '0-9' and '_' (snake_case)"
    } else {
        return Ok(());
    };
    Err(I18nError::InvalidIdentifier {
        key: key.to_string(),
        reason: reason.to_string(),
    })
}

/// Builds keys such as `brave_misty_otter_hum` from embedded word lists.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentifierGenerator;

impl IdentifierGenerator {
    pub fn new() -> Self {
        Self
    }

    /// `adjective_adjective_animal_verb`, each word drawn independently.
    pub fn generate(&self) -> String {
        self.generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let words = &*WORDS;
        [
            &words.adjectives,
            &words.adjectives,
            &words.animals,
            &words.verbs,
        ]
        .into_iter()
        .map(|list| list.choose(&mut *rng).map(String::as_str).unwrap_or("message"))
        .collect::<Vec<_>>()
        .join("_")
    }

    /// A generated key not present in `catalog`.
    pub fn generate_unique(&self, catalog: &Catalog) -> String {
        self.generate_unique_with(catalog, &mut rand::thread_rng())
    }

    pub fn generate_unique_with<R: Rng + ?Sized>(&self, catalog: &Catalog, rng: &mut R) -> String {
        let mut candidate = String::new();
        for _ in 0..MAX_ATTEMPTS {
            candidate = self.generate_with(rng);
            if !catalog.contains_key(&candidate) {
                return candidate;
            }
        }
        (2..)
            .map(|n| format!("{}_{}", candidate, n))
            .find(|key| !catalog.contains_key(key))
            .unwrap_or(candidate)
    }
}
