//! Common utility functions shared across the codebase.

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` segments and fold `..` into the parent.
///
/// Does not touch the filesystem, so it works for paths that do not exist yet
/// (e.g. a message module that has not been compiled).
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use paraglot::utils::normalize_path;
///
/// assert_eq!(
///     normalize_path(Path::new("/app/src/routes/../lib/./paraglide")),
///     Path::new("/app/src/lib/paraglide")
/// );
/// ```
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    result.push(component);
                }
            }
            other => result.push(other),
        }
    }
    result
}

/// Join `relative` onto `root`, stripping a leading `./` first.
pub fn resolve_relative(root: &Path, relative: &str) -> PathBuf {
    let path = Path::new(relative);
    if path.is_absolute() {
        return normalize_path(path);
    }
    let rel = relative.strip_prefix("./").unwrap_or(relative);
    normalize_path(&root.join(rel))
}

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// The returned vector contains byte offsets where each line starts.
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
pub fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find line number for a byte offset using binary search.
///
/// Returns 1-based line number.
pub fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}

/// Strip one pair of matching quotes (`"`, `'` or `` ` ``) around a literal.
///
/// Returns the input unchanged when it is not a quoted literal.
pub fn unquote(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.len() < 2 {
        return trimmed;
    }
    for quote in ['"', '\'', '`'] {
        if trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}

/// `path` relative to `root` for display, or as-is when outside it.
pub fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// A position in a source file, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePosition {
    pub file_path: String,
    /// 1-based.
    pub line: usize,
    /// 1-based, in characters.
    pub col: usize,
    pub source_line: String,
}

impl SourcePosition {
    /// Locate byte `offset` in `content`.
    pub fn locate(file_path: impl Into<String>, content: &str, offset: usize) -> Self {
        let line_index = build_line_index(content);
        let offset = offset.min(content.len());
        let line = offset_to_line(&line_index, offset).max(1);
        let line_start = line_index.get(line - 1).copied().unwrap_or_default();
        let source_line = content[line_start..]
            .lines()
            .next()
            .unwrap_or_default()
            .to_string();
        let col = content
            .get(line_start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or_default()
            + 1;
        Self {
            file_path: file_path.into(),
            line,
            col,
            source_line,
        }
    }
}
