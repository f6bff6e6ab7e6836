use std::{fs, io};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::{
    args::KeyAtCommand,
    exit_status::ExitStatus,
    report::{FAILURE_MARK, print_position_to},
};
use super::open_project;
use crate::utils::{SourcePosition, display_path};

pub fn key_at(cmd: KeyAtCommand) -> Result<ExitStatus> {
    let ctx = open_project(&cmd.common)?;
    let path = ctx.resolve_path(&cmd.file);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    ctx.references.notify_changed(&path, &content);

    let Some(site) = ctx.references.key_at(&path, cmd.offset) else {
        println!(
            "{} {}",
            FAILURE_MARK.red(),
            format!("No message call at offset {}", cmd.offset).red()
        );
        return Ok(ExitStatus::Failure);
    };

    println!("{}", site.function_name.bold());
    let position = SourcePosition::locate(display_path(&ctx.root, &path), &content, site.offset);
    let preview = ctx.references.preview(&site, cmd.locale.as_deref());
    print_position_to(&position, preview.as_deref(), &mut io::stdout().lock());

    for definition in ctx.references.definitions_of(&site.function_name) {
        println!(
            "  {} {}:{} ({})",
            "defined:".bold(),
            display_path(&ctx.root, &definition.file_path),
            definition.line,
            definition.locale
        );
    }

    Ok(ExitStatus::Success)
}
