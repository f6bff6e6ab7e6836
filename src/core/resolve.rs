//! Bidirectional key ↔ usage queries over the catalog cache and call-site index.
//!
//! Every query first refreshes the index lazily: files whose freshness stamp
//! is unchanged since their last scan are neither re-read nor re-scanned,
//! files that vanished from the workspace are dropped, and the rest are
//! rescanned in parallel.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use rayon::prelude::*;

use crate::core::{
    catalog_cache::CatalogCache,
    data::{CallSite, CatalogLocation},
    index::CallSiteIndex,
    parsers::json::find_key_line,
    render::render_or_key,
    stamp::{Fingerprint, FreshnessStamp},
    workspace::SourceProvider,
};
use crate::diagnostics::DiagnosticSink;

pub struct ReferenceResolver {
    catalogs: Arc<CatalogCache>,
    index: Arc<CallSiteIndex>,
    sources: Arc<dyn SourceProvider>,
    sink: Arc<dyn DiagnosticSink>,
    /// Source stamp each indexed file had when it was last scanned.
    scanned_stamps: Mutex<HashMap<PathBuf, Option<FreshnessStamp>>>,
}

impl ReferenceResolver {
    pub fn new(
        catalogs: Arc<CatalogCache>,
        index: Arc<CallSiteIndex>,
        sources: Arc<dyn SourceProvider>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            catalogs,
            index,
            sources,
            sink,
            scanned_stamps: Mutex::new(HashMap::new()),
        }
    }

    pub fn index(&self) -> &CallSiteIndex {
        &self.index
    }

    /// Bring the index up to date with the workspace.
    pub fn refresh(&self) {
        let files = self.sources.files();
        let live: HashSet<&Path> = files.iter().map(PathBuf::as_path).collect();

        for stale in self.index.indexed_files() {
            if !live.contains(stale.as_path()) {
                self.index.remove(&stale);
                self.stamps().remove(&stale);
            }
        }

        let generation = self
            .catalogs
            .base()
            .map(|c| c.generation)
            .unwrap_or_default();

        let pending: Vec<(&PathBuf, Option<FreshnessStamp>)> = {
            let known = self.stamps();
            files
                .iter()
                .map(|path| (path, self.sources.stamp(path)))
                .filter(|(path, stamp)| {
                    let unchanged = known.get(*path) == Some(stamp);
                    let current = self
                        .index
                        .entry(path)
                        .is_some_and(|entry| entry.catalog_generation == generation);
                    !(unchanged && current)
                })
                .collect()
        };
        if pending.is_empty() {
            return;
        }

        let scanned: Vec<(PathBuf, Option<FreshnessStamp>)> = pending
            .par_iter()
            .filter_map(|(path, stamp)| match self.sources.read(path) {
                Ok(content) => {
                    self.index.scan(path, &content, Fingerprint::of(&content));
                    Some(((*path).clone(), *stamp))
                }
                Err(err) => {
                    self.sink.warn(&format!("{:#}", err));
                    None
                }
            })
            .collect();

        self.sink
            .info(&format!("rescanned {} source file(s)", scanned.len()));
        self.stamps().extend(scanned);
    }

    /// Push new content for a file, e.g. from an editor buffer or watcher.
    pub fn notify_changed(&self, path: &Path, content: &str) {
        self.index.scan(path, content, Fingerprint::of(content));
        let stamp = self.sources.stamp(path);
        self.stamps().insert(path.to_path_buf(), stamp);
    }

    /// Forget a deleted file.
    pub fn notify_removed(&self, path: &Path) {
        self.index.remove(path);
        self.stamps().remove(path);
    }

    /// Call sites of `key`, excluding files that changed since they were scanned.
    pub fn usages_of(&self, key: &str) -> Vec<CallSite> {
        self.refresh();
        self.fresh_sites(key)
    }

    /// The message key a call site refers to, if the base catalog still has it.
    pub fn key_for(&self, site: &CallSite) -> Option<String> {
        let base = self.catalogs.base()?;
        base.contains_key(&site.function_name)
            .then(|| site.function_name.clone())
    }

    /// The innermost message call covering `offset` in `path`.
    pub fn key_at(&self, path: &Path, offset: usize) -> Option<CallSite> {
        self.refresh();
        let entry = self.index.entry(path)?;
        entry
            .sites
            .iter()
            .filter(|site| site.covers(offset))
            .max_by_key(|site| site.offset)
            .cloned()
    }

    pub fn is_unused(&self, key: &str) -> bool {
        self.usages_of(key).is_empty()
    }

    /// Base-catalog keys with no call site, sorted.
    pub fn unused_keys(&self) -> Vec<String> {
        let Some(base) = self.catalogs.base() else {
            return Vec::new();
        };
        self.refresh();
        base.sorted_keys()
            .into_iter()
            .filter(|key| self.fresh_sites(key).is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Where `key` is declared in each locale catalog that has it.
    pub fn definitions_of(&self, key: &str) -> Vec<CatalogLocation> {
        self.catalogs
            .load_all()
            .iter()
            .filter(|catalog| catalog.contains_key(key))
            .filter_map(|catalog| {
                let content = std::fs::read_to_string(&catalog.file_path).ok()?;
                Some(CatalogLocation {
                    locale: catalog.locale.clone(),
                    file_path: catalog.file_path.clone(),
                    line: find_key_line(&content, key)?,
                })
            })
            .collect()
    }

    /// Rendered text of a call site's message with its literal arguments.
    ///
    /// Uses the base locale when `locale` is `None`.
    pub fn preview(&self, site: &CallSite, locale: Option<&str>) -> Option<String> {
        let catalog = match locale {
            Some(locale) => self.catalogs.load(locale),
            None => self.catalogs.base()?,
        };
        let template = catalog.get(&site.function_name)?;
        let args: HashMap<String, String> = site
            .arguments
            .iter()
            .map(|a| (a.name.clone(), a.value_text.clone()))
            .collect();
        let count = site
            .argument("count")
            .and_then(|value| value.trim().parse::<i64>().ok());
        Some(render_or_key(&site.function_name, template, &args, count))
    }

    fn fresh_sites(&self, key: &str) -> Vec<CallSite> {
        let known = self.stamps();
        self.index
            .call_sites_for(key)
            .into_iter()
            .filter(|site| {
                known
                    .get(&site.file_path)
                    .is_some_and(|stamp| *stamp == self.sources.stamp(&site.file_path))
            })
            .collect()
    }

    fn stamps(&self) -> MutexGuard<'_, HashMap<PathBuf, Option<FreshnessStamp>>> {
        self.scanned_stamps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
