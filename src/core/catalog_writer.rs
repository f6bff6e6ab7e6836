use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::{Map, Value};

/// Read/write access to catalog files.
pub trait CatalogStore: Send + Sync {
    /// File content, or `None` when the file does not exist.
    fn read(&self, path: &Path) -> Result<Option<String>>;

    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

/// Catalog files on disk. Writes go to a sibling temp file that is renamed
/// over the target, so a reader never sees a half-written catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsCatalogStore;

impl CatalogStore for FsCatalogStore {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(path)
            .map(Some)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        let file_name = path
            .file_name()
            .with_context(|| format!("Not a file path: {}", path.display()))?;
        let mut staged_name = file_name.to_os_string();
        staged_name.push(".paraglot-tmp");
        let staged = path.with_file_name(staged_name);

        fs::write(&staged, content)
            .with_context(|| format!("Failed to write file: {}", staged.display()))?;
        if let Err(err) = fs::rename(&staged, path) {
            let _ = fs::remove_file(&staged);
            return Err(err).with_context(|| format!("Failed to replace file: {}", path.display()));
        }
        Ok(())
    }
}

/// A parsed catalog file, edited as text so existing entries keep their
/// formatting and escapes.
pub struct CatalogDocument {
    content: String,
    keys: Map<String, Value>,
}

impl CatalogDocument {
    /// Parse catalog content; empty content is an empty catalog.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let keys = if content.trim().is_empty() {
            Map::new()
        } else {
            let value: Value = serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON: {}", path.display()))?;
            match value {
                Value::Object(map) => map,
                _ => bail!("Root of JSON file must be an object: {}", path.display()),
            }
        };

        Ok(Self {
            content: content.to_string(),
            keys,
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// File content with `"key": value` appended as the root object's last
    /// member, indented like the existing members.
    pub fn with_entry(&self, key: &str, value: &Value) -> Result<String> {
        let name = serde_json::to_string(key).context("Failed to serialize JSON")?;

        let trimmed_len = self.content.trim_end().len();
        if trimmed_len == 0 {
            let value = pretty_value(value, DEFAULT_INDENT)?;
            return Ok(format!("{{\n{}{}: {}\n}}\n", DEFAULT_INDENT, name, value));
        }

        // The root parsed as an object, so its closing brace is the last
        // non-whitespace character.
        let close = trimmed_len - 1;
        let head = self.content[..close].trim_end();
        let tail = &self.content[head.len()..];
        let empty = head.ends_with('{');

        let mut out = String::with_capacity(self.content.len() + name.len() + 32);
        out.push_str(head);
        if self.content[..close].contains('\n') || empty {
            let indent = member_indent(&self.content);
            if !empty {
                out.push(',');
            }
            out.push('\n');
            out.push_str(indent);
            out.push_str(&name);
            out.push_str(": ");
            out.push_str(&pretty_value(value, indent)?);
            if !tail.starts_with('\n') {
                out.push('\n');
            }
        } else {
            out.push_str(", ");
            out.push_str(&name);
            out.push_str(": ");
            out.push_str(&serde_json::to_string(value).context("Failed to serialize JSON")?);
        }
        out.push_str(tail);
        Ok(out)
    }
}

const DEFAULT_INDENT: &str = "  ";

/// Leading whitespace of the first top-level member line.
fn member_indent(content: &str) -> &str {
    content
        .lines()
        .skip(1)
        .find_map(|line| {
            let rest = line.trim_start();
            rest.starts_with('"')
                .then(|| &line[..line.len() - rest.len()])
        })
        .filter(|indent| !indent.is_empty())
        .unwrap_or(DEFAULT_INDENT)
}

/// `value` pretty-printed one level deeper than `indent`, with `indent` as
/// the step.
fn pretty_value(value: &Value, indent: &str) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).context("Failed to serialize JSON")?;
    let text = String::from_utf8(buf).context("Serialized JSON is not UTF-8")?;
    Ok(text.replace('\n', &format!("\n{}", indent)))
}
