//! Moves a selected literal into every locale catalog and produces the call
//! that replaces it.
//!
//! Extraction runs in two phases. The pre-flight phase locates, reads and
//! parses every locale's catalog and builds its new content; an existing key
//! in any locale or any other failure there
//! aborts before a single file is touched. The write phase then stores each
//! catalog atomically and keeps going after a failed locale, so the caller
//! learns exactly which locales were updated.

use std::{
    collections::BTreeMap,
    path::PathBuf,
    sync::Arc,
};

use serde_json::{Value, json};

use crate::core::{
    catalog_cache::CatalogCache,
    catalog_writer::{CatalogDocument, CatalogStore},
    compile::BuildTrigger,
    error::{I18nError, LocaleFailure},
    humanid::validate_identifier,
    render::placeholders,
    scan::Region,
    settings::{ConfigResolver, ProjectI18nConfig},
};
use crate::diagnostics::DiagnosticSink;

/// Selector variable written into pluralized catalog entries.
const PLURAL_SELECTOR: &str = "countPlural";

/// Parameter implied by any pluralized translation.
pub const COUNT_PARAM: &str = "count";

/// One locale's text for a new message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Translation {
    pub singular: String,
    pub plural: String,
    pub plural_enabled: bool,
}

impl Translation {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            singular: text.into(),
            ..Self::default()
        }
    }

    pub fn plural(one: impl Into<String>, other: impl Into<String>) -> Self {
        Self {
            singular: one.into(),
            plural: other.into(),
            plural_enabled: true,
        }
    }

    /// Catalog value: a string, or an inlang match array keyed on `count`.
    pub fn to_value(&self) -> Value {
        if !self.plural_enabled {
            return Value::String(self.singular.clone());
        }
        json!([{
            "declarations": [
                "input count",
                format!("local {} = count: plural", PLURAL_SELECTOR),
            ],
            "selectors": [PLURAL_SELECTOR],
            "match": {
                format!("{}=one", PLURAL_SELECTOR): self.singular,
                format!("{}=other", PLURAL_SELECTOR): self.plural,
            },
        }])
    }

    fn texts(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.singular.as_str())
            .chain(self.plural_enabled.then_some(self.plural.as_str()))
    }
}

/// Translations keyed by locale.
pub type Translations = BTreeMap<String, Translation>;

/// Outcome of a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub key: String,
    /// Source text that replaces the selection.
    pub replacement: String,
    /// Locales whose catalogs were written, in configured order.
    pub updated_locales: Vec<String>,
    /// Whether a message recompile was accepted.
    pub compile_triggered: bool,
}

/// A catalog staged for writing.
struct StagedCatalog {
    locale: String,
    path: PathBuf,
    content: String,
}

pub struct ExtractionEngine {
    resolver: Arc<ConfigResolver>,
    catalogs: Arc<CatalogCache>,
    store: Arc<dyn CatalogStore>,
    build: Option<Arc<dyn BuildTrigger>>,
    qualifier: String,
    sink: Arc<dyn DiagnosticSink>,
}

impl ExtractionEngine {
    pub fn new(
        catalogs: Arc<CatalogCache>,
        store: Arc<dyn CatalogStore>,
        qualifier: impl Into<String>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            resolver: Arc::clone(catalogs.resolver()),
            catalogs,
            store,
            build: None,
            qualifier: qualifier.into(),
            sink,
        }
    }

    /// Recompile messages after every successful extraction.
    pub fn with_build_trigger(mut self, build: Arc<dyn BuildTrigger>) -> Self {
        self.build = Some(build);
        self
    }

    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }

    /// Add `key` to every locale catalog and return the call replacing
    /// `selected_text`.
    ///
    /// `region` is where the selection sits: a `Template` selection gets its
    /// call wrapped in braces.
    pub fn extract(
        &self,
        selected_text: &str,
        key: &str,
        translations: &Translations,
        region: Region,
    ) -> Result<ExtractionResult, I18nError> {
        validate_identifier(key)?;
        let config = self.resolver.resolve()?;

        if let Some(locale) = config
            .locales
            .iter()
            .find(|locale| !translations.contains_key(*locale))
        {
            return Err(I18nError::MissingTranslation {
                locale: locale.clone(),
            });
        }

        let staged = self.stage(key, translations, &config)?;

        let mut updated = Vec::new();
        let mut failed = Vec::new();
        for catalog in &staged {
            match self.store.write(&catalog.path, &catalog.content) {
                Ok(()) => updated.push(catalog.locale.clone()),
                Err(err) => {
                    self.sink.error(&format!(
                        "failed to write catalog for '{}': {:#}",
                        catalog.locale, err
                    ));
                    failed.push(LocaleFailure {
                        locale: catalog.locale.clone(),
                        reason: format!("{:#}", err),
                    });
                }
            }
            self.catalogs.invalidate(Some(&catalog.locale));
        }

        if !failed.is_empty() {
            return Err(I18nError::PartialExtractionFailure {
                key: key.to_string(),
                updated,
                failed,
            });
        }

        let ordered: Vec<&Translation> = config
            .locales
            .iter()
            .filter_map(|locale| translations.get(locale))
            .collect();
        let replacement = self.replacement(key, &ordered, region);

        self.sink.info(&format!(
            "extracted {:?} as '{}' into {} locale(s)",
            selected_text,
            key,
            updated.len()
        ));

        let compile_triggered = self.build.as_ref().is_some_and(|build| build.trigger());

        Ok(ExtractionResult {
            key: key.to_string(),
            replacement,
            updated_locales: updated,
            compile_triggered,
        })
    }

    /// Read, parse and rewrite every catalog in memory.
    fn stage(
        &self,
        key: &str,
        translations: &Translations,
        config: &ProjectI18nConfig,
    ) -> Result<Vec<StagedCatalog>, I18nError> {
        let mut staged = Vec::with_capacity(config.locales.len());
        for locale in &config.locales {
            let Some(translation) = translations.get(locale) else {
                return Err(I18nError::MissingTranslation {
                    locale: locale.clone(),
                });
            };
            let path = self.resolver.catalog_path(config, locale);
            let unreadable = |reason: String| I18nError::CatalogUnreadable {
                locale: locale.clone(),
                path: path.clone(),
                reason,
            };

            let content = match self.store.read(&path) {
                Ok(Some(content)) => content,
                Ok(None) => return Err(unreadable("file does not exist".to_string())),
                Err(err) => return Err(unreadable(format!("{:#}", err))),
            };
            let document =
                CatalogDocument::parse(&path, &content).map_err(|e| unreadable(format!("{:#}", e)))?;

            if document.contains_key(key) {
                return Err(I18nError::DuplicateKey {
                    key: key.to_string(),
                    locale: locale.clone(),
                });
            }

            let content = document
                .with_entry(key, &translation.to_value())
                .map_err(|e| unreadable(format!("{:#}", e)))?;
            staged.push(StagedCatalog {
                locale: locale.clone(),
                path,
                content,
            });
        }
        Ok(staged)
    }

    fn replacement(&self, key: &str, translations: &[&Translation], region: Region) -> String {
        let call = format!(
            "{}.{}({})",
            self.qualifier,
            key,
            call_arguments(&parameter_names(translations))
        );
        match region {
            Region::Code => call,
            Region::Template => format!("{{{}}}", call),
        }
    }
}

/// Placeholder names across all translations in first-seen order, with
/// `count` appended when any translation is pluralized.
pub fn parameter_names(translations: &[&Translation]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in translations
        .iter()
        .flat_map(|t| t.texts())
        .flat_map(placeholders)
    {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    if translations.iter().any(|t| t.plural_enabled) && !names.iter().any(|n| n == COUNT_PARAM) {
        names.push(COUNT_PARAM.to_string());
    }
    names
}

/// Argument object text: `{ name: '', count: 0 }`, or empty for no parameters.
pub fn call_arguments(names: &[String]) -> String {
    if names.is_empty() {
        return String::new();
    }
    let fields = names
        .iter()
        .map(|name| {
            if name == COUNT_PARAM {
                format!("{}: 0", name)
            } else {
                format!("{}: ''", name)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{ {} }}", fields)
}
