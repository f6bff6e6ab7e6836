use std::collections::HashSet;

use anyhow::Result;

use super::super::{args::IdCommand, exit_status::ExitStatus};
use super::open_project;

pub fn id(cmd: IdCommand) -> Result<ExitStatus> {
    let ctx = open_project(&cmd.common)?;

    let mut seen = HashSet::new();
    while seen.len() < cmd.count {
        let key = ctx.generate_key();
        if seen.insert(key.clone()) {
            println!("{}", key);
        }
    }

    Ok(ExitStatus::Success)
}
