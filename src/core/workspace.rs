//! Source file access for the call-site index.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::{Context, Result, anyhow};

use crate::config::Config;
use crate::core::{
    file_scanner::scan_files,
    stamp::{FreshnessStamp, FsStamps, StampSource},
};
use crate::diagnostics::DiagnosticSink;

/// Lists and reads the project's source files.
pub trait SourceProvider: Send + Sync {
    /// Every source file currently in scope, sorted.
    fn files(&self) -> Vec<PathBuf>;

    fn stamp(&self, path: &Path) -> Option<FreshnessStamp>;

    fn read(&self, path: &Path) -> Result<String>;
}

/// Sources on disk, selected by the configured includes and ignores.
pub struct FsSources {
    root: PathBuf,
    includes: Vec<String>,
    ignores: Vec<String>,
    excluded_dirs: Vec<PathBuf>,
    sink: Arc<dyn DiagnosticSink>,
}

impl FsSources {
    pub fn new(root: &Path, config: &Config, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            root: root.to_path_buf(),
            includes: config.includes.clone(),
            ignores: config.ignores.clone(),
            excluded_dirs: vec![config.out_dir_path(root)],
            sink,
        }
    }
}

impl SourceProvider for FsSources {
    fn files(&self) -> Vec<PathBuf> {
        let result = scan_files(
            &self.root,
            &self.includes,
            &self.ignores,
            &self.excluded_dirs,
            self.sink.as_ref(),
        );
        if result.skipped_count > 0 {
            self.sink.info(&format!(
                "skipped {} inaccessible path(s)",
                result.skipped_count
            ));
        }
        result.files.into_iter().collect()
    }

    fn stamp(&self, path: &Path) -> Option<FreshnessStamp> {
        FsStamps.stamp(path)
    }

    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// In-memory sources with explicit versions, for editors holding unsaved
/// buffers and for tests.
#[derive(Debug, Default)]
pub struct MemorySources {
    files: Mutex<BTreeMap<PathBuf, (u64, String)>>,
}

impl MemorySources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a file, advancing its version.
    pub fn put(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let mut files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = files.entry(path.into()).or_insert((0, String::new()));
        entry.0 += 1;
        entry.1 = content.into();
    }

    pub fn remove(&self, path: &Path) {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path);
    }
}

impl SourceProvider for MemorySources {
    fn files(&self) -> Vec<PathBuf> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    fn stamp(&self, path: &Path) -> Option<FreshnessStamp> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .map(|(version, _)| FreshnessStamp::from_version(*version))
    }

    fn read(&self, path: &Path) -> Result<String> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| anyhow!("No such source: {}", path.display()))
    }
}
