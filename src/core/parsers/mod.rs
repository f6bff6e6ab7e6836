//! File parsers for source code and message files.
//!
//! This module provides parsers for different file types:
//! - `json`: locale catalog parser (JSON value → `Template`)
//! - `jsx`: JS/TS/JSX source parser (uses swc for AST generation)

pub mod json;
pub mod jsx;
