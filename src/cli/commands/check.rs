use anyhow::Result;

use super::super::{
    args::CheckCommand,
    exit_status::ExitStatus,
    report::{print_success, report},
};
use super::open_project;
use crate::rules::check_all;

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let ctx = open_project(&cmd.common)?;
    let config = ctx.settings.resolve()?;

    let issues = check_all(&ctx);
    if issues.is_empty() {
        print_success(
            ctx.references.index().indexed_files().len(),
            config.locales.len(),
        );
    } else {
        report(&issues);
    }

    Ok(ExitStatus::from_issues(&issues))
}
