//! Freshness stamps and content fingerprints.
//!
//! A [`FreshnessStamp`] decides whether a cached parse of a file is still valid;
//! a [`Fingerprint`] identifies one content version of a source file.
//! Stamps come from a [`StampSource`] injected into every cache, so tests can
//! advance versions explicitly instead of depending on mtime resolution.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
    time::UNIX_EPOCH,
};

use sha2::{Digest, Sha256};

/// Opaque version of a file's on-disk state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FreshnessStamp {
    modified_nanos: u128,
    len: u64,
}

impl FreshnessStamp {
    /// Build a stamp from an explicit version number (used by in-memory sources).
    pub fn from_version(version: u64) -> Self {
        Self {
            modified_nanos: u128::from(version),
            len: 0,
        }
    }
}

/// Provides freshness stamps for files. `None` means the file does not exist.
pub trait StampSource: Send + Sync {
    fn stamp(&self, path: &Path) -> Option<FreshnessStamp>;
}

/// Stamps derived from filesystem metadata (modification time and length).
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStamps;

impl StampSource for FsStamps {
    fn stamp(&self, path: &Path) -> Option<FreshnessStamp> {
        let metadata = fs::metadata(path).ok()?;
        if !metadata.is_file() {
            return None;
        }
        let modified_nanos = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        Some(FreshnessStamp {
            modified_nanos,
            len: metadata.len(),
        })
    }
}

/// Stamps set by hand. Unknown paths have no stamp.
#[derive(Debug, Default)]
pub struct ManualStamps {
    versions: Mutex<HashMap<PathBuf, u64>>,
}

impl ManualStamps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, path: impl Into<PathBuf>, version: u64) {
        self.versions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), version);
    }

    /// Advance the version of `path` by one, starting at 1.
    pub fn bump(&self, path: impl Into<PathBuf>) {
        let mut versions = self.versions.lock().unwrap_or_else(PoisonError::into_inner);
        *versions.entry(path.into()).or_insert(0) += 1;
    }

    pub fn remove(&self, path: &Path) {
        self.versions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path);
    }
}

impl StampSource for ManualStamps {
    fn stamp(&self, path: &Path) -> Option<FreshnessStamp> {
        self.versions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .copied()
            .map(FreshnessStamp::from_version)
    }
}

/// SHA-256 of a file's content.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn of(content: &str) -> Self {
        Self(Sha256::digest(content.as_bytes()).into())
    }
}

impl std::fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0[..6] {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
