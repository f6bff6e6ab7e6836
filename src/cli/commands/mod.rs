pub mod check;
pub mod extract;
pub mod id;
pub mod init;
pub mod key_at;
pub mod render;
pub mod usages;

use std::sync::Arc;

use anyhow::Result;

use super::args::CommonArgs;
use crate::core::ProjectContext;
use crate::diagnostics::StderrSink;

/// Load the project context for a command.
pub fn open_project(common: &CommonArgs) -> Result<ProjectContext> {
    ProjectContext::load(&common.root, Arc::new(StderrSink::new(common.verbose)))
}
