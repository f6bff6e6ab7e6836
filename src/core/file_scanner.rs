use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::core::scan::SOURCE_EXTENSIONS;
use crate::diagnostics::DiagnosticSink;

/// Directories never worth scanning for message calls.
const SKIPPED_DIR_NAMES: &[&str] = &["node_modules", ".git", ".svelte-kit"];

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    /// Absolute source paths, sorted.
    pub files: BTreeSet<PathBuf>,
    pub skipped_count: usize,
}

/// Walk `includes` under `base_dir` and collect source files.
///
/// `excluded_dirs` are absolute directories skipped entirely (the compiled
/// message module lives there).
pub fn scan_files(
    base_dir: &Path,
    includes: &[String],
    ignore_patterns: &[String],
    excluded_dirs: &[PathBuf],
    sink: &dyn DiagnosticSink,
) -> ScanResult {
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = excluded_dirs.to_vec();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => sink.warn(&format!("Invalid ignore pattern '{}': {}", p, e)),
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    let dirs_to_scan: Vec<PathBuf> = if includes.is_empty() {
        vec![base_dir.to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in includes {
            if is_glob_pattern(inc) {
                let full_pattern = base_dir.join(inc);
                match glob(&full_pattern.to_string_lossy()) {
                    Ok(entries) => {
                        paths.extend(entries.flatten().filter(|entry| entry.is_dir()));
                    }
                    Err(e) => sink.warn(&format!("Invalid glob pattern '{}': {}", inc, e)),
                }
            } else {
                let path = base_dir.join(inc);
                if path.exists() {
                    paths.push(path);
                } else {
                    sink.info(&format!("Include path does not exist: {}", path.display()));
                }
            }
        }
        paths
    };

    for dir in dirs_to_scan {
        let walker = WalkDir::new(dir).into_iter().filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| SKIPPED_DIR_NAMES.contains(&name)))
        });
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    sink.warn(&format!("Cannot access path: {}", e));
                    continue;
                }
            };
            let path = entry.path();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            let path_str = path.to_string_lossy();
            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if entry.file_type().is_file() && is_scannable_file(path) {
                files.insert(path.to_path_buf());
            }
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

pub fn is_scannable_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
        && !path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".d.ts"))
}
