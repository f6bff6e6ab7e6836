use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================
// Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path of the project root (or any directory below it)
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetLocalesParams {
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindUsagesParams {
    pub project_root_path: String,
    /// Message key, e.g. "greeting"
    pub key: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyAtParams {
    pub project_root_path: String,
    /// Source file, relative to the project root or absolute
    pub file_path: String,
    /// Byte offset into the file
    pub offset: usize,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListUnusedParams {
    pub project_root_path: String,
    /// Max items to return (default 50, max 200)
    pub limit: Option<u32>,
    /// Items to skip (default 0)
    pub offset: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenderMessageParams {
    pub project_root_path: String,
    pub key: String,
    /// Locale to render in (default: base locale)
    pub locale: Option<String>,
    /// Placeholder values by name
    pub args: Option<HashMap<String, String>>,
    /// Plural count
    pub count: Option<i64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateKeyParams {
    pub project_root_path: String,
    /// Number of keys to generate (default 1, max 50)
    pub count: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractMessageParams {
    pub project_root_path: String,
    /// Source file containing the selection
    pub file_path: String,
    /// Byte offset where the selection starts
    pub start: usize,
    /// Byte offset where the selection ends (exclusive)
    pub end: usize,
    /// Message key (default: a generated one)
    pub key: Option<String>,
    /// Text per locale; locales left out get the selected text
    pub translations: Option<HashMap<String, String>>,
    /// Plural ("other") form per locale; enables pluralization for that locale
    pub plurals: Option<HashMap<String, String>>,
    /// Rewrite the source file (default false)
    pub apply: Option<bool>,
}

// ============================================================
// Config Types (get_config)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub project_root: String,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub inlang_project: String,
    pub out_dir: String,
    pub message_qualifier: String,
    pub includes: Vec<String>,
    pub ignores: Vec<String>,
    pub compile_after_extract: bool,
}

impl From<crate::config::Config> for ConfigValues {
    fn from(c: crate::config::Config) -> Self {
        Self {
            inlang_project: c.inlang_project,
            out_dir: c.out_dir,
            message_qualifier: c.message_qualifier,
            includes: c.includes,
            ignores: c.ignores,
            compile_after_extract: c.compile_after_extract,
        }
    }
}

// ============================================================
// Locales Types (get_locales)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalesResult {
    pub base_locale: String,
    pub locales: Vec<LocaleInfo>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocaleInfo {
    pub locale: String,
    pub file_path: String,
    pub key_count: usize,
    /// Entries that could not be read
    pub problems: Vec<String>,
}

// ============================================================
// Usage Types (find_usages, key_at)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsagesResult {
    pub key: String,
    pub total_count: usize,
    pub usages: Vec<UsageItem>,
    pub definitions: Vec<DefinitionItem>,
}

/// A single call site
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageItem {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
    pub source_line: String,
    /// Base-locale text rendered with the call's literal arguments
    pub preview: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionItem {
    pub locale: String,
    pub file_path: String,
    pub line: usize,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyAtResult {
    /// None when no message call covers the offset
    pub key: Option<String>,
    pub usage: Option<UsageItem>,
    pub definitions: Vec<DefinitionItem>,
}

// ============================================================
// Unused Types (list_unused)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnusedResult {
    pub total_count: usize,
    pub items: Vec<UnusedItem>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnusedItem {
    pub key: String,
    /// Base-locale display text
    pub text: String,
    pub file_path: String,
    pub line: Option<usize>,
}

// ============================================================
// Render / Generate / Extract Types
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenderResult {
    pub key: String,
    pub locale: String,
    pub text: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateKeyResult {
    pub keys: Vec<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResult {
    pub key: String,
    /// Code that replaces the selection
    pub replacement: String,
    pub original: String,
    pub updated_locales: Vec<String>,
    /// True if the source file was rewritten
    pub applied: bool,
    pub compile_triggered: bool,
    pub diagnostics: Vec<DiagnosticItem>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticItem {
    pub level: String,
    pub text: String,
}

impl From<crate::diagnostics::Diagnostic> for DiagnosticItem {
    fn from(d: crate::diagnostics::Diagnostic) -> Self {
        Self {
            level: d.level.to_string(),
            text: d.text,
        }
    }
}

/// Pagination information
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}
