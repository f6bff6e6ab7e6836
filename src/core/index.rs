//! Inverted index from message key to the call sites that reference it.
//!
//! Files are scanned outside any index lock; only the final swap of a file's
//! entry takes the write lock, and it updates `per_file` and `by_key` together
//! so readers never see one without the other.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex, PoisonError, RwLock,
        atomic::{AtomicU64, Ordering},
    },
};

use crate::core::{
    catalog_cache::CatalogCache,
    data::{CallSite, Catalog},
    scan::{ScannedSource, SourceScanner},
    stamp::Fingerprint,
};
use crate::diagnostics::DiagnosticSink;

/// Call sites recognized in one content version of a file.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub fingerprint: Fingerprint,
    /// Generation of the base catalog the sites were recognized against.
    pub catalog_generation: u64,
    pub sites: Vec<CallSite>,
    /// Parse failures met while scanning this version.
    pub errors: Vec<String>,
}

#[derive(Default)]
struct IndexState {
    per_file: HashMap<PathBuf, Arc<FileEntry>>,
    by_key: HashMap<String, HashSet<CallSite>>,
}

impl IndexState {
    fn detach(&mut self, entry: &FileEntry) {
        for site in &entry.sites {
            if let Some(sites) = self.by_key.get_mut(&site.function_name) {
                sites.remove(site);
                if sites.is_empty() {
                    self.by_key.remove(&site.function_name);
                }
            }
        }
    }

    fn attach(&mut self, entry: &FileEntry) {
        for site in &entry.sites {
            self.by_key
                .entry(site.function_name.clone())
                .or_default()
                .insert(site.clone());
        }
    }
}

pub struct CallSiteIndex {
    scanner: Arc<dyn SourceScanner>,
    catalogs: Arc<CatalogCache>,
    out_dir: PathBuf,
    sink: Arc<dyn DiagnosticSink>,
    state: RwLock<IndexState>,
    scan_locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
    version: AtomicU64,
}

impl CallSiteIndex {
    pub fn new(
        scanner: Arc<dyn SourceScanner>,
        catalogs: Arc<CatalogCache>,
        out_dir: impl Into<PathBuf>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            scanner,
            catalogs,
            out_dir: out_dir.into(),
            sink,
            state: RwLock::new(IndexState::default()),
            scan_locks: Mutex::new(HashMap::new()),
            version: AtomicU64::new(0),
        }
    }

    /// Bumped on every change to the index contents.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Replace the call sites of `path` with those found in `content`.
    ///
    /// A no-op when the stored entry already has this fingerprint and was
    /// recognized against the current base catalog. Returns whether the
    /// index changed.
    pub fn scan(&self, path: &Path, content: &str, fingerprint: Fingerprint) -> bool {
        let base = self.catalogs.base();
        let generation = base.as_ref().map(|c| c.generation).unwrap_or_default();

        let file_lock = self.file_lock(path);
        let _guard = file_lock.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(entry) = self.entry(path)
            && entry.fingerprint == fingerprint
            && entry.catalog_generation == generation
        {
            return false;
        }

        let (sites, errors) = match self.scanner.scan(path, content) {
            Ok(scanned) => {
                for error in &scanned.errors {
                    self.sink
                        .warn(&format!("{}: skipped unparseable code: {}", path.display(), error));
                }
                let sites = base
                    .as_deref()
                    .map(|base| self.recognize(path, &scanned, base))
                    .unwrap_or_default();
                (sites, scanned.errors)
            }
            Err(err) => {
                let error = format!("{:#}", err);
                self.sink.warn(&error);
                (Vec::new(), vec![error])
            }
        };

        let entry = Arc::new(FileEntry {
            fingerprint,
            catalog_generation: generation,
            sites,
            errors,
        });

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(old) = state.per_file.remove(path) {
            state.detach(&old);
        }
        state.attach(&entry);
        state.per_file.insert(path.to_path_buf(), entry);
        self.version.fetch_add(1, Ordering::AcqRel);
        true
    }

    /// Forget a deleted or excluded file.
    pub fn remove(&self, path: &Path) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let Some(old) = state.per_file.remove(path) else {
            return false;
        };
        state.detach(&old);
        self.version.fetch_add(1, Ordering::AcqRel);
        drop(state);

        self.scan_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path);
        true
    }

    /// Call sites referencing `function_name`, ordered by file then offset.
    pub fn call_sites_for(&self, function_name: &str) -> Vec<CallSite> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let mut sites: Vec<CallSite> = state
            .by_key
            .get(function_name)
            .map(|sites| sites.iter().cloned().collect())
            .unwrap_or_default();
        sites.sort_by(|a, b| (&a.file_path, a.offset).cmp(&(&b.file_path, b.offset)));
        sites
    }

    pub fn entry(&self, path: &Path) -> Option<Arc<FileEntry>> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .per_file
            .get(path)
            .cloned()
    }

    pub fn indexed_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .per_file
            .keys()
            .cloned()
            .collect();
        files.sort();
        files
    }

    /// A candidate is a message call when its qualifier was imported from the
    /// message module directory and its name is a base-catalog key.
    fn recognize(&self, path: &Path, scanned: &ScannedSource, base: &Catalog) -> Vec<CallSite> {
        scanned
            .calls
            .iter()
            .filter(|call| {
                scanned
                    .resolve_declaration_origin(&call.callee_qualifier)
                    .is_some_and(|origin| origin.starts_with(&self.out_dir))
                    && base.contains_key(&call.callee_name)
            })
            .map(|call| CallSite {
                file_path: path.to_path_buf(),
                function_name: call.callee_name.clone(),
                offset: call.start,
                enclosing_range_end: call.end,
                arguments: call.arguments.clone(),
            })
            .collect()
    }

    fn file_lock(&self, path: &Path) -> Arc<Mutex<()>> {
        let mut locks = self.scan_locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(path.to_path_buf()).or_default())
    }
}
