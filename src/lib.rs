//! Paraglot - message catalog and call-site index for Paraglide/inlang projects
//!
//! Paraglot reads an inlang project's per-locale JSON catalogs, indexes every
//! `m.key(...)` call in the project's sources, answers key ↔ usage queries,
//! renders messages and extracts literals into new catalog entries. It ships
//! as a CLI and as an MCP server.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: `.paraglotrc.json` loading
//! - `core`: Catalog cache, call-site index, reference resolver and extraction
//! - `diagnostics`: Sink for recoverable problems
//! - `issues`: Issue types reported by `check`
//! - `mcp`: Model Context Protocol server implementation
//! - `rules`: Checks producing issues
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod diagnostics;
pub mod issues;
pub mod mcp;
pub mod rules;
pub mod utils;
