use std::{fs, io};

use anyhow::Result;
use colored::Colorize;

use super::super::{
    args::UsagesCommand,
    exit_status::ExitStatus,
    report::{FAILURE_MARK, print_position_to},
};
use super::open_project;
use crate::utils::{SourcePosition, display_path};

pub fn usages(cmd: UsagesCommand) -> Result<ExitStatus> {
    let ctx = open_project(&cmd.common)?;
    let sites = ctx.references.usages_of(&cmd.key);

    if sites.is_empty() {
        println!(
            "{} {}",
            FAILURE_MARK.red(),
            format!("No usages of '{}'", cmd.key).red()
        );
        return Ok(ExitStatus::Failure);
    }

    let mut out = io::stdout().lock();
    for site in &sites {
        let content = fs::read_to_string(&site.file_path).unwrap_or_default();
        let position =
            SourcePosition::locate(display_path(&ctx.root, &site.file_path), &content, site.offset);
        let preview = ctx.references.preview(site, None);
        print_position_to(&position, preview.as_deref(), &mut out);
    }
    println!(
        "\n{} usage(s) of {}",
        sites.len(),
        cmd.key.bold()
    );

    Ok(ExitStatus::Success)
}
