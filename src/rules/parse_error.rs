//! Source files the scanner could not (fully) parse.

use crate::{core::ProjectContext, issues::ParseErrorIssue, utils::display_path};

pub fn check_parse_error_issues(ctx: &ProjectContext) -> Vec<ParseErrorIssue> {
    ctx.references.refresh();
    let index = ctx.references.index();
    index
        .indexed_files()
        .into_iter()
        .filter_map(|path| index.entry(&path).map(|entry| (path, entry)))
        .flat_map(|(path, entry)| {
            let file_path = display_path(&ctx.root, &path);
            entry
                .errors
                .iter()
                .map(|error| ParseErrorIssue {
                    file_path: file_path.clone(),
                    error: error.clone(),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}
