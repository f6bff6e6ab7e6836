use std::{collections::HashSet, fs, path::Path};

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::{
    config::load_config,
    core::{ExtractRequest, parsers::json::find_key_line},
    utils::display_path,
};

use super::helpers::{definition_items, json_result, open_project, page_bounds, usage_item};
use super::types::{
    ConfigDto, ConfigValues, DiagnosticItem, ExtractMessageParams, ExtractResult,
    FindUsagesParams, GenerateKeyParams, GenerateKeyResult, GetConfigParams, GetLocalesParams,
    KeyAtParams, KeyAtResult, ListUnusedParams, LocaleInfo, LocalesResult, Pagination,
    RenderMessageParams, RenderResult, UnusedItem, UnusedResult, UsagesResult,
};

#[derive(Clone)]
pub struct ParaglotMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for ParaglotMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl ParaglotMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Get the current paraglot configuration
    #[tool(description = "Get the current paraglot configuration.")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {:#}", e), None))?;

        json_result(&ConfigDto {
            from_file: result.from_file,
            project_root: result.root.to_string_lossy().to_string(),
            config: ConfigValues::from(result.config),
        })
    }

    /// Get locales, their catalog files and key counts
    #[tool(
        description = "Get the base locale and every configured locale with its catalog file, key count and unreadable entries."
    )]
    pub async fn get_locales(
        &self,
        params: Parameters<GetLocalesParams>,
    ) -> Result<CallToolResult, McpError> {
        let (ctx, _sink) = open_project(&params.0.project_root_path)?;
        let config = ctx
            .settings
            .resolve()
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let locales = config
            .locales
            .iter()
            .map(|locale| {
                let catalog = ctx.catalogs.load_with(&config, locale);
                LocaleInfo {
                    locale: locale.clone(),
                    file_path: display_path(&ctx.root, &catalog.file_path),
                    key_count: catalog.len(),
                    problems: catalog.problems.iter().map(ToString::to_string).collect(),
                }
            })
            .collect();

        json_result(&LocalesResult {
            base_locale: config.base_locale.clone(),
            locales,
        })
    }

    /// Find the call sites of a message key
    #[tool(
        description = "Find every call site of a message key in source files, with a rendered preview, plus where the key is declared in each locale catalog."
    )]
    pub async fn find_usages(
        &self,
        params: Parameters<FindUsagesParams>,
    ) -> Result<CallToolResult, McpError> {
        let (ctx, _sink) = open_project(&params.0.project_root_path)?;
        let key = params.0.key;

        let usages: Vec<_> = ctx
            .references
            .usages_of(&key)
            .iter()
            .map(|site| usage_item(&ctx, site))
            .collect();

        json_result(&UsagesResult {
            total_count: usages.len(),
            usages,
            definitions: definition_items(&ctx, &key),
            key,
        })
    }

    /// Resolve the message call at an offset
    #[tool(
        description = "Resolve the message key called at a byte offset of a source file. Returns key null when no message call covers the offset."
    )]
    pub async fn key_at(&self, params: Parameters<KeyAtParams>) -> Result<CallToolResult, McpError> {
        let (ctx, _sink) = open_project(&params.0.project_root_path)?;
        let path = ctx.resolve_path(Path::new(&params.0.file_path));
        let content = fs::read_to_string(&path).map_err(|e| {
            McpError::internal_error(format!("Failed to read {}: {}", path.display(), e), None)
        })?;
        ctx.references.notify_changed(&path, &content);

        let result = match ctx.references.key_at(&path, params.0.offset) {
            Some(site) => KeyAtResult {
                key: ctx.references.key_for(&site),
                definitions: definition_items(&ctx, &site.function_name),
                usage: Some(usage_item(&ctx, &site)),
            },
            None => KeyAtResult {
                key: None,
                usage: None,
                definitions: Vec::new(),
            },
        };

        json_result(&result)
    }

    /// List base-catalog keys that no source file calls
    #[tool(
        description = "List keys of the base locale catalog that are never called from source files. Returns paginated list."
    )]
    pub async fn list_unused(
        &self,
        params: Parameters<ListUnusedParams>,
    ) -> Result<CallToolResult, McpError> {
        let (ctx, _sink) = open_project(&params.0.project_root_path)?;
        let (limit, offset) = page_bounds(params.0.limit, params.0.offset, 50, 200);

        let unused = ctx.references.unused_keys();
        let total_count = unused.len();

        let items: Vec<UnusedItem> = match ctx.catalogs.base() {
            Some(base) => {
                let content = fs::read_to_string(&base.file_path).unwrap_or_default();
                let file_path = display_path(&ctx.root, &base.file_path);
                unused
                    .iter()
                    .skip(offset)
                    .take(limit)
                    .map(|key| UnusedItem {
                        key: key.clone(),
                        text: base
                            .get(key)
                            .map(|t| t.display_text().to_string())
                            .unwrap_or_default(),
                        file_path: file_path.clone(),
                        line: find_key_line(&content, key),
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        let has_more = offset + items.len() < total_count;
        json_result(&UnusedResult {
            total_count,
            items,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        })
    }

    /// Render a message with arguments
    #[tool(
        description = "Render a message in a locale with placeholder arguments and an optional plural count."
    )]
    pub async fn render_message(
        &self,
        params: Parameters<RenderMessageParams>,
    ) -> Result<CallToolResult, McpError> {
        let (ctx, _sink) = open_project(&params.0.project_root_path)?;
        let config = ctx
            .settings
            .resolve()
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        let locale = params
            .0
            .locale
            .clone()
            .unwrap_or_else(|| config.base_locale.clone());
        let args = params.0.args.clone().unwrap_or_default();

        let text = ctx
            .render_key(&params.0.key, Some(&locale), &args, params.0.count)
            .map_err(|e| McpError::internal_error(format!("{:#}", e), None))?;

        json_result(&RenderResult {
            key: params.0.key,
            locale,
            text,
        })
    }

    /// Generate unused message keys
    #[tool(
        description = "Generate human-readable message keys (adjective_adjective_animal_verb) not present in the base catalog."
    )]
    pub async fn generate_key(
        &self,
        params: Parameters<GenerateKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let (ctx, _sink) = open_project(&params.0.project_root_path)?;
        let count = params.0.count.map(|v| v as usize).unwrap_or(1).clamp(1, 50);

        let mut seen = HashSet::new();
        let mut keys = Vec::with_capacity(count);
        while keys.len() < count {
            let key = ctx.generate_key();
            if seen.insert(key.clone()) {
                keys.push(key);
            }
        }

        json_result(&GenerateKeyResult { keys })
    }

    /// Extract a selected literal into every locale catalog
    #[tool(
        description = "Extract the text between two byte offsets of a source file into a new message in every locale catalog. \
                       Returns the replacement call; the source file is only rewritten when apply is true."
    )]
    pub async fn extract_message(
        &self,
        params: Parameters<ExtractMessageParams>,
    ) -> Result<CallToolResult, McpError> {
        let (ctx, sink) = open_project(&params.0.project_root_path)?;
        let params = params.0;
        let request = ExtractRequest {
            file: params.file_path.into(),
            start: params.start,
            end: params.end,
            key: params.key,
            texts: params.translations.unwrap_or_default(),
            plurals: params.plurals.unwrap_or_default(),
            apply: params.apply.unwrap_or(false),
        };

        let extraction = ctx
            .extract_in_file(&request)
            .map_err(|e| McpError::internal_error(format!("Extraction failed: {:#}", e), None))?;
        let result = extraction.result;

        json_result(&ExtractResult {
            key: result.key,
            replacement: result.replacement,
            original: extraction.original,
            updated_locales: result.updated_locales,
            applied: extraction.applied,
            compile_triggered: result.compile_triggered,
            diagnostics: sink.entries().into_iter().map(DiagnosticItem::from).collect(),
        })
    }
}

#[tool_handler]
impl ServerHandler for ParaglotMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Paraglot MCP helps AI agents work with the message catalogs of Paraglide JS projects.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration\n\
                 2. get_locales - Get locales, catalog files and key counts\n\
                 3. find_usages - Find call sites and declarations of a message key\n\
                 4. key_at - Resolve the message call at a byte offset\n\
                 5. list_unused - List base-catalog keys never called (paginated)\n\
                 6. render_message - Render a message with arguments\n\
                 7. generate_key - Generate fresh message keys\n\
                 8. extract_message - Move a selected literal into every locale catalog\n\n\
                 Recommended Workflow:\n\
                 1. Use get_locales to learn which locales need a translation\n\
                 2. Use generate_key, or pick a key that find_usages shows is free\n\
                 3. Call extract_message with every translation; set apply to rewrite the source\n\n\
                 extract_message always writes the catalogs. If some locale fails, the error names it \
                 and the other locales keep the new key."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = ParaglotMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
