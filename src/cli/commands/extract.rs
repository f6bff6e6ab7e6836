use anyhow::Result;
use colored::Colorize;

use super::super::{
    args::{ExtractCommand, parse_pairs},
    exit_status::ExitStatus,
    report::SUCCESS_MARK,
};
use super::open_project;
use crate::core::ExtractRequest;
use crate::utils::display_path;

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let ctx = open_project(&cmd.common)?;
    let request = ExtractRequest {
        file: cmd.file,
        start: cmd.start,
        end: cmd.end,
        key: cmd.key,
        texts: parse_pairs(&cmd.texts)?.into_iter().collect(),
        plurals: parse_pairs(&cmd.plurals)?.into_iter().collect(),
        apply: cmd.apply,
    };

    let extraction = ctx.extract_in_file(&request)?;
    let result = &extraction.result;

    println!(
        "{} {} {} ({})",
        SUCCESS_MARK.green(),
        "Added".green().bold(),
        result.key.bold(),
        result.updated_locales.join(", ")
    );
    println!(
        "  {} {}:{}..{}",
        "-->".blue(),
        display_path(&ctx.root, &extraction.file),
        extraction.start,
        extraction.end
    );
    println!("  {} {}", "-".red(), extraction.original.red());
    println!("  {} {}", "+".green(), result.replacement.green());

    if !extraction.applied {
        println!(
            "\n{} source left unchanged (use {} to rewrite it)",
            "note:".bold(),
            "--apply".cyan()
        );
    }

    if result.compile_triggered
        && let Some(compiler) = &ctx.compiler
    {
        compiler.wait();
    }

    Ok(ExitStatus::Success)
}
