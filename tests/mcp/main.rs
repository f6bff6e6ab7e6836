use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tempfile::TempDir;

mod tools;

/// Test fixture for MCP integration tests
///
/// Manages a temporary Paraglide project: `.paraglotrc.json`, inlang settings
/// and a `messages/` directory with one catalog per locale.
pub struct McpTestFixture {
    _temp_dir: TempDir,
    project_root: PathBuf,
}

impl McpTestFixture {
    /// Create an empty test project
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_root = temp_dir.path().canonicalize()?;
        fs::create_dir_all(project_root.join("messages"))?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_root,
        })
    }

    /// Create a configured project with locale catalogs; the first locale is
    /// the base locale.
    ///
    /// # Example
    /// ```ignore
    /// let fixture = McpTestFixture::with_messages(vec![
    ///     ("en", json!({"greeting": "Hello"})),
    ///     ("de", json!({"greeting": "Hallo"})),
    /// ])?;
    /// ```
    pub fn with_messages(locales: Vec<(&str, Value)>) -> Result<Self> {
        let fixture = Self::new()?;
        fixture.write_config(&json!({"compileAfterExtract": false}))?;

        let names: Vec<&str> = locales.iter().map(|(locale, _)| *locale).collect();
        fixture.write_file(
            "project.inlang/settings.json",
            &serde_json::to_string_pretty(&json!({
                "baseLocale": names.first().copied().unwrap_or("en"),
                "locales": names,
                "plugin.inlang.messageFormat": {"pathPattern": "./messages/{locale}.json"}
            }))?,
        )?;
        for (locale, content) in locales {
            fixture.write_locale_file(locale, &content)?;
        }
        Ok(fixture)
    }

    /// Write a locale JSON file to messages/<locale>.json
    pub fn write_locale_file(&self, locale: &str, content: &Value) -> Result<()> {
        let json_str = serde_json::to_string_pretty(content)
            .with_context(|| format!("Failed to serialize JSON for locale: {}", locale))?;
        self.write_file(&format!("messages/{}.json", locale), &format!("{}\n", json_str))
    }

    /// Read a locale JSON file from messages/<locale>.json
    pub fn read_locale_file(&self, locale: &str) -> Result<Value> {
        let content = self.read_file(&format!("messages/{}.json", locale))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON for locale: {}", locale))
    }

    /// Write any file below the project root
    pub fn write_file(&self, relative_path: &str, content: &str) -> Result<()> {
        let path = self.project_root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(())
    }

    pub fn read_file(&self, relative_path: &str) -> Result<String> {
        let path = self.project_root.join(relative_path);
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Write a .paraglotrc.json config file
    pub fn write_config(&self, content: &Value) -> Result<()> {
        let json_str = serde_json::to_string_pretty(content)?;
        self.write_file(".paraglotrc.json", &format!("{}\n", json_str))
    }

    /// Get the project root path as a string (for MCP parameters)
    pub fn root(&self) -> String {
        self.project_root.to_string_lossy().to_string()
    }

    /// Get the project root path as a Path reference
    pub fn root_path(&self) -> &Path {
        &self.project_root
    }
}

// ============================================================================
// Fixture Generators
// ============================================================================

pub const APP_TSX: &str = r#"import * as m from '$lib/paraglide/messages';

export const App = () => (
  <main>
    <h1>{m.greeting({ name: 'Ada' })}</h1>
    <p>Pick a color</p>
  </main>
);
"#;

/// English and German catalogs plus one component calling `greeting`
pub fn fixture_app() -> Result<McpTestFixture> {
    let fixture = McpTestFixture::with_messages(vec![
        (
            "en",
            json!({
                "greeting": "Hello {name}",
                "farewell": "Goodbye",
                "thanks": "Thank you"
            }),
        ),
        (
            "de",
            json!({
                "greeting": "Hallo {name}",
                "farewell": "Tschüss"
            }),
        ),
    ])?;
    fixture.write_file("src/App.tsx", APP_TSX)?;
    Ok(fixture)
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert pagination fields in a paginated result
pub fn assert_pagination(
    result: &Value,
    expected_offset: usize,
    expected_limit: usize,
    expected_has_more: bool,
) {
    let pagination = &result["pagination"];
    assert_eq!(
        pagination["offset"].as_u64().unwrap(),
        expected_offset as u64,
        "Pagination offset mismatch"
    );
    assert_eq!(
        pagination["limit"].as_u64().unwrap(),
        expected_limit as u64,
        "Pagination limit mismatch"
    );
    assert_eq!(
        pagination["hasMore"].as_bool().unwrap(),
        expected_has_more,
        "Pagination hasMore mismatch"
    );
}

/// Extract JSON value from a successful CallToolResult
///
/// Panics if the result indicates an error or cannot be parsed
pub fn extract_tool_result_json(result: &rmcp::model::CallToolResult) -> Value {
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    let content_item = &result.content[0];
    let text_content = content_item
        .as_text()
        .expect("Tool result content should be text");

    serde_json::from_str(&text_content.text).expect("Tool result should be valid JSON")
}
