use std::collections::HashMap;

use anyhow::Result;

use super::super::{
    args::{RenderCommand, parse_pairs},
    exit_status::ExitStatus,
};
use super::open_project;

pub fn render(cmd: RenderCommand) -> Result<ExitStatus> {
    let ctx = open_project(&cmd.common)?;
    let args: HashMap<String, String> = parse_pairs(&cmd.args)?.into_iter().collect();

    let text = ctx.render_key(&cmd.key, cmd.locale.as_deref(), &args, cmd.count)?;
    println!("{}", text);

    Ok(ExitStatus::Success)
}
