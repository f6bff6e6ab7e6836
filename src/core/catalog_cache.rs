//! Per-locale catalog cache gated by freshness stamps.
//!
//! Each locale owns a slot behind its own mutex. A caller that finds the slot
//! stale re-parses while holding that slot's lock, so concurrent callers for
//! the same locale wait for one parse and share its result. Different locales
//! never contend beyond the brief lookup in the slot map.

use std::{
    collections::HashMap,
    fs,
    path::Path,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use crate::core::{
    data::Catalog,
    error::I18nError,
    parsers::json::parse_catalog,
    settings::{ConfigResolver, ProjectI18nConfig},
    stamp::{FreshnessStamp, StampSource},
};
use crate::diagnostics::DiagnosticSink;

type Slot = Arc<Mutex<Option<Arc<Catalog>>>>;

pub struct CatalogCache {
    resolver: Arc<ConfigResolver>,
    stamps: Arc<dyn StampSource>,
    sink: Arc<dyn DiagnosticSink>,
    slots: Mutex<HashMap<String, Slot>>,
    generations: AtomicU64,
}

impl CatalogCache {
    pub fn new(
        resolver: Arc<ConfigResolver>,
        stamps: Arc<dyn StampSource>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            resolver,
            stamps,
            sink,
            slots: Mutex::new(HashMap::new()),
            generations: AtomicU64::new(0),
        }
    }

    pub fn resolver(&self) -> &Arc<ConfigResolver> {
        &self.resolver
    }

    /// Catalog for `locale`, re-parsed only when its file's stamp or path changed.
    ///
    /// Never fails: a missing configuration or unreadable file yields an empty
    /// catalog and a diagnostic.
    pub fn load(&self, locale: &str) -> Arc<Catalog> {
        match self.resolver.resolve() {
            Ok(config) => self.load_with(&config, locale),
            Err(_) => Arc::new(Catalog::empty(locale, "")),
        }
    }

    /// Same as [`load`](Self::load) with an already resolved configuration.
    pub fn load_with(&self, config: &ProjectI18nConfig, locale: &str) -> Arc<Catalog> {
        let path = self.resolver.catalog_path(config, locale);
        let slot = self.slot(locale);
        let mut cached = slot.lock().unwrap_or_else(PoisonError::into_inner);

        let stamp = self.stamps.stamp(&path);
        if let Some(catalog) = cached.as_ref()
            && catalog.file_path == path
            && catalog.stamp == stamp
        {
            return Arc::clone(catalog);
        }

        let catalog = Arc::new(self.parse(locale, &path, stamp));
        *cached = Some(Arc::clone(&catalog));
        catalog
    }

    /// Base-locale catalog, or `None` when the project is not configured.
    pub fn base(&self) -> Option<Arc<Catalog>> {
        let config = self.resolver.resolve().ok()?;
        Some(self.load_with(&config, &config.base_locale))
    }

    /// Catalogs of every configured locale, in locale order.
    pub fn load_all(&self) -> Vec<Arc<Catalog>> {
        let Ok(config) = self.resolver.resolve() else {
            return Vec::new();
        };
        config
            .locales
            .iter()
            .map(|locale| self.load_with(&config, locale))
            .collect()
    }

    /// Force the next `load` of `locale` (or of every locale) to re-parse.
    pub fn invalidate(&self, locale: Option<&str>) {
        let targets: Vec<Slot> = {
            let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            match locale {
                Some(locale) => slots.get(locale).cloned().into_iter().collect(),
                None => slots.values().cloned().collect(),
            }
        };
        for slot in targets {
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        }
    }

    fn slot(&self, locale: &str) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(locale.to_string()).or_default())
    }

    fn parse(&self, locale: &str, path: &Path, stamp: Option<FreshnessStamp>) -> Catalog {
        let mut catalog = Catalog::empty(locale, path);
        catalog.stamp = stamp;
        catalog.generation = self.generations.fetch_add(1, Ordering::Relaxed) + 1;

        let unreadable = |reason: String| I18nError::CatalogUnreadable {
            locale: locale.to_string(),
            path: path.to_path_buf(),
            reason,
        };

        if stamp.is_none() {
            let err = unreadable("file does not exist".to_string());
            self.sink.warn(&err.to_string());
            catalog.problems.push(err);
            return catalog;
        }

        let parsed = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| parse_catalog(&content));
        let parsed = match parsed {
            Ok(parsed) => parsed,
            Err(reason) => {
                let err = unreadable(reason);
                self.sink.warn(&err.to_string());
                catalog.problems.push(err);
                return catalog;
            }
        };

        for key in parsed.unparseable_keys {
            let err = I18nError::CatalogEntryUnparseable {
                locale: locale.to_string(),
                key,
            };
            self.sink.error(&err.to_string());
            catalog.problems.push(err);
        }
        catalog.entries = parsed.entries;
        self.sink.info(&format!(
            "loaded {} message(s) for '{}' from {}",
            catalog.entries.len(),
            locale,
            path.display()
        ));
        catalog
    }
}
