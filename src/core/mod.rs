//! Message catalog and call-site index engine.
//!
//! ## Module Structure
//!
//! - `settings`: Resolves base locale, locales and catalog paths from the inlang settings
//! - `catalog_cache`: Per-locale catalogs, re-parsed only when their file changes
//! - `render`: Fills placeholders and selects plural cases
//! - `scan`: Finds `m.key(...)` calls and template regions in source files
//! - `index`: Per-file call sites with a key → call-site reverse index
//! - `resolve`: Key ↔ usage queries with lazy workspace refresh
//! - `humanid`: Generated and validated message keys
//! - `extract`: Moves a selection into every locale catalog
//! - `context`: Wires the above together for one project root

pub mod catalog_cache;
pub mod catalog_writer;
pub mod compile;
pub mod context;
pub mod data;
pub mod error;
pub mod extract;
pub mod file_scanner;
pub mod humanid;
pub mod index;
pub mod parsers;
pub mod render;
pub mod resolve;
pub mod scan;
pub mod settings;
pub mod stamp;
pub mod workspace;

pub use context::{ExtractRequest, FileExtraction, ProjectContext};
pub use error::{I18nError, LocaleFailure, RenderError};
