//! Catalog health rules: unreadable catalog files and entries whose value
//! matches no message shape.

use std::fs;

use crate::{
    core::{
        I18nError, ProjectContext,
        data::{Catalog, CatalogLocation},
        parsers::json::find_key_line,
    },
    issues::{Issue, UnparseableEntryIssue, UnreadableCatalogIssue},
    utils::display_path,
};

pub fn check_catalog_issues(ctx: &ProjectContext) -> Vec<Issue> {
    ctx.catalogs
        .load_all()
        .iter()
        .flat_map(|catalog| {
            let content = fs::read_to_string(&catalog.file_path).unwrap_or_default();
            let file_path = display_path(&ctx.root, &catalog.file_path);
            check_catalog(catalog, &content, &file_path)
        })
        .collect()
}

/// Issues for the problems recorded while `catalog` was loaded.
pub fn check_catalog(catalog: &Catalog, content: &str, file_path: &str) -> Vec<Issue> {
    catalog
        .problems
        .iter()
        .filter_map(|problem| match problem {
            I18nError::CatalogUnreadable { locale, reason, .. } => {
                Some(Issue::UnreadableCatalog(UnreadableCatalogIssue {
                    locale: locale.clone(),
                    file_path: file_path.to_string(),
                    reason: reason.clone(),
                }))
            }
            I18nError::CatalogEntryUnparseable { locale, key } => {
                Some(Issue::UnparseableEntry(UnparseableEntryIssue {
                    key: key.clone(),
                    location: CatalogLocation {
                        locale: locale.clone(),
                        file_path: file_path.into(),
                        line: find_key_line(content, key).unwrap_or(1),
                    },
                }))
            }
            _ => None,
        })
        .collect()
}
