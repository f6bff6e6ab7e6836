//! Helper functions for MCP server operations.

use std::{fs, path::Path, sync::Arc};

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

use crate::core::{ProjectContext, data::CallSite};
use crate::diagnostics::CollectingSink;
use crate::utils::{SourcePosition, display_path};

use super::types::{DefinitionItem, UsageItem};

/// Load the project containing `path`, buffering its diagnostics.
pub fn open_project(path: &str) -> Result<(ProjectContext, Arc<CollectingSink>), McpError> {
    let sink = Arc::new(CollectingSink::new());
    let ctx = ProjectContext::load(Path::new(path), Arc::clone(&sink) as _).map_err(|e| {
        McpError::internal_error(format!("Failed to load project: {:#}", e), None)
    })?;
    Ok((ctx, sink))
}

/// Serialize a tool result as pretty JSON text content.
pub fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

pub fn usage_item(ctx: &ProjectContext, site: &CallSite) -> UsageItem {
    let content = fs::read_to_string(&site.file_path).unwrap_or_default();
    let position =
        SourcePosition::locate(display_path(&ctx.root, &site.file_path), &content, site.offset);
    UsageItem {
        file_path: position.file_path,
        line: position.line,
        col: position.col,
        source_line: position.source_line,
        preview: ctx.references.preview(site, None),
    }
}

pub fn definition_items(ctx: &ProjectContext, key: &str) -> Vec<DefinitionItem> {
    ctx.references
        .definitions_of(key)
        .into_iter()
        .map(|loc| DefinitionItem {
            file_path: display_path(&ctx.root, &loc.file_path),
            locale: loc.locale,
            line: loc.line,
        })
        .collect()
}

/// Clamp `limit`/`offset` parameters to usable values.
pub fn page_bounds(limit: Option<u32>, offset: Option<u32>, default: usize, max: usize) -> (usize, usize) {
    let limit = limit.map(|v| v as usize).unwrap_or(default).clamp(1, max);
    let offset = offset.map(|v| v as usize).unwrap_or(0);
    (limit, offset)
}
