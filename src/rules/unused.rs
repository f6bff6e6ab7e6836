//! Unused message key detection rule.
//!
//! Detects keys defined in the base-locale catalog that no recognized call
//! site refers to.

use std::fs;
use std::path::Path;

use crate::{
    core::{
        ProjectContext,
        data::{Catalog, CatalogLocation},
        parsers::json::find_key_line,
    },
    issues::UnusedKeyIssue,
    utils::display_path,
};

pub fn check_unused_keys_issues(ctx: &ProjectContext) -> Vec<UnusedKeyIssue> {
    let Some(base) = ctx.catalogs.base() else {
        return Vec::new();
    };
    let unused = ctx.references.unused_keys();
    let content = fs::read_to_string(&base.file_path).unwrap_or_default();
    check_unused_keys(&unused, &base, &content, &ctx.root)
}

/// Build issues for `unused` keys of `base`, locating each key in the catalog
/// `content`.
pub fn check_unused_keys(
    unused: &[String],
    base: &Catalog,
    content: &str,
    root: &Path,
) -> Vec<UnusedKeyIssue> {
    let file_path = display_path(root, &base.file_path);
    unused
        .iter()
        .filter_map(|key| {
            let template = base.get(key)?;
            Some(UnusedKeyIssue {
                key: key.clone(),
                location: CatalogLocation {
                    locale: base.locale.clone(),
                    file_path: file_path.clone().into(),
                    line: find_key_line(content, key).unwrap_or(1),
                },
                text: template.display_text().to_string(),
            })
        })
        .collect()
}
