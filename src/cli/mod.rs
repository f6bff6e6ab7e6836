//! Command-line interface layer.
//!
//! Parses arguments, builds a `ProjectContext`, dispatches to a command and
//! maps the outcome to an exit status.

use std::process::ExitCode;

use anyhow::Result;

mod args;
mod commands;
mod exit_status;
pub mod report;

pub use args::{Arguments, Command, CommonArgs};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let status = match args.command {
        Some(Command::Check(cmd)) => commands::check::check(cmd)?,
        Some(Command::Usages(cmd)) => commands::usages::usages(cmd)?,
        Some(Command::KeyAt(cmd)) => commands::key_at::key_at(cmd)?,
        Some(Command::Render(cmd)) => commands::render::render(cmd)?,
        Some(Command::Extract(cmd)) => commands::extract::extract(cmd)?,
        Some(Command::Id(cmd)) => commands::id::id(cmd)?,
        Some(Command::Init) => commands::init::init()?,
        Some(Command::Serve) => {
            // Serve command is handled in main.rs before calling run_cli()
            anyhow::bail!("Serve command should be handled before run_cli()")
        }
        None => ExitStatus::Success,
    };
    Ok(status.into())
}
