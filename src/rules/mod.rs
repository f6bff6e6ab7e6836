//! Checks run by `paraglot check`.
//!
//! Each rule has a pure function over the inputs it needs and a
//! `check_*_issues` wrapper that pulls those inputs from a `ProjectContext`.
//!
//! ## Module Structure
//!
//! - `unused`: Base-catalog keys never called from source
//! - `catalog`: Unreadable catalogs and unparseable entries
//! - `parse_error`: Source files the scanner could not parse

pub mod catalog;
pub mod parse_error;
pub mod unused;

use crate::core::ProjectContext;
use crate::issues::Issue;

/// Run every rule and return the issues sorted for display.
pub fn check_all(ctx: &ProjectContext) -> Vec<Issue> {
    let mut issues: Vec<Issue> = Vec::new();
    issues.extend(catalog::check_catalog_issues(ctx));
    issues.extend(
        unused::check_unused_keys_issues(ctx)
            .into_iter()
            .map(Issue::UnusedKey),
    );
    issues.extend(
        parse_error::check_parse_error_issues(ctx)
            .into_iter()
            .map(Issue::ParseError),
    );
    issues.sort();
    issues
}
