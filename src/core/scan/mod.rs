//! Source scanning: candidate message calls and template regions.
//!
//! ## Module Structure
//!
//! - `visitor`: swc visitors collecting `qualifier.name(...)` calls, imports
//!   and JSX text spans
//! - `svelte`: splits `.svelte` files into script blocks and markup tags

mod svelte;
mod visitor;

use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};

use crate::core::data::CallArgument;
use crate::core::parsers::jsx::{allows_jsx, parse_source};
use crate::utils::{normalize_path, resolve_relative};

pub use svelte::{SvelteSegment, split_svelte};

/// Extensions the scanner understands.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs", "mts", "svelte"];

/// A call expression shaped like `qualifier.name(args)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateCall {
    pub callee_qualifier: String,
    pub callee_name: String,
    /// Properties of an object literal passed as the first argument.
    pub arguments: Vec<CallArgument>,
    pub start: usize,
    pub end: usize,
}

/// Everything one scan pass learned about a file.
#[derive(Debug, Default, Clone)]
pub struct ScannedSource {
    pub calls: Vec<CandidateCall>,
    /// Local binding name → module path it was imported from.
    origins: HashMap<String, PathBuf>,
    /// Parse failures of individual segments that did not stop the scan.
    pub errors: Vec<String>,
}

impl ScannedSource {
    /// Path of the module that declares `qualifier`, if it was imported from
    /// a path the scanner could resolve.
    pub fn resolve_declaration_origin(&self, qualifier: &str) -> Option<&Path> {
        self.origins.get(qualifier).map(PathBuf::as_path)
    }
}

/// Where an offset sits relative to the host language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Inside a code expression; a call can be inserted as-is.
    Code,
    /// Inside markup text; a call must be wrapped in `{`…`}`.
    Template,
}

/// Finds candidate message calls in a source file.
pub trait SourceScanner: Send + Sync {
    fn scan(&self, path: &Path, content: &str) -> Result<ScannedSource>;

    fn region_at(&self, path: &Path, content: &str, offset: usize) -> Region;
}

/// swc-backed scanner for JS/TS/JSX files and Svelte components.
#[derive(Debug, Clone, Default)]
pub struct SwcScanner {
    /// Import prefix (`$lib`) → absolute directory, longest prefix first.
    aliases: Vec<(String, PathBuf)>,
}

impl SwcScanner {
    pub fn new(root: &Path, aliases: &BTreeMap<String, String>) -> Self {
        let mut aliases: Vec<(String, PathBuf)> = aliases
            .iter()
            .map(|(prefix, target)| (prefix.clone(), resolve_relative(root, target)))
            .collect();
        aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { aliases }
    }

    /// Resolve an import specifier to a path without touching the filesystem.
    ///
    /// Relative specifiers resolve against the importing file's directory,
    /// aliased ones against the alias target. Bare package names resolve to
    /// `None`.
    pub fn resolve_specifier(&self, importer: &Path, specifier: &str) -> Option<PathBuf> {
        if specifier.starts_with('.') {
            let base_dir = importer.parent()?;
            return Some(normalize_path(&base_dir.join(specifier)));
        }
        self.aliases.iter().find_map(|(prefix, target)| {
            let rest = specifier.strip_prefix(prefix.as_str())?;
            if rest.is_empty() {
                Some(target.clone())
            } else {
                let rest = rest.strip_prefix('/')?;
                Some(normalize_path(&target.join(rest)))
            }
        })
    }

    fn is_svelte(path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some("svelte")
    }

    fn scan_svelte(&self, path: &Path, content: &str) -> ScannedSource {
        let mut scanned = ScannedSource::default();
        for segment in split_svelte(content) {
            let (code, base, tsx) = match &segment {
                SvelteSegment::Script { start, end } => {
                    (content[*start..*end].to_string(), *start, false)
                }
                // Parenthesized so object literals are not read as blocks.
                SvelteSegment::Expression { start, end } => {
                    (format!("({})", &content[*start..*end]), start.saturating_sub(1), false)
                }
            };
            match visitor::collect(code, path, tsx, base, self) {
                Ok(collected) => {
                    scanned.calls.extend(collected.calls);
                    scanned.origins.extend(collected.origins);
                }
                Err(err) => scanned.errors.push(err.to_string()),
            }
        }
        scanned
    }
}

impl SourceScanner for SwcScanner {
    fn scan(&self, path: &Path, content: &str) -> Result<ScannedSource> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        if !SOURCE_EXTENSIONS.contains(&extension) {
            bail!("Unsupported source file: {}", path.display());
        }
        if Self::is_svelte(path) {
            return Ok(self.scan_svelte(path, content));
        }
        let collected = visitor::collect(content.to_string(), path, allows_jsx(path), 0, self)?;
        Ok(ScannedSource {
            calls: collected.calls,
            origins: collected.origins,
            errors: Vec::new(),
        })
    }

    fn region_at(&self, path: &Path, content: &str, offset: usize) -> Region {
        if Self::is_svelte(path) {
            let in_code = split_svelte(content).iter().any(|segment| {
                let (start, end) = segment.range();
                start <= offset && offset <= end
            });
            return if in_code { Region::Code } else { Region::Template };
        }
        if !allows_jsx(path) {
            return Region::Code;
        }
        match parse_source(content.to_string(), path, true) {
            Ok(parsed) => {
                if visitor::template_ranges(&parsed)
                    .iter()
                    .any(|(start, end)| *start <= offset && offset < *end)
                {
                    Region::Template
                } else {
                    Region::Code
                }
            }
            Err(_) => Region::Code,
        }
    }
}
