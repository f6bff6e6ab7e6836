//! Locale catalog parser.
//!
//! Each top-level value maps to a [`Template`] through exactly one arm of
//! [`parse_template`]; values of any other shape are reported by key and
//! skipped so the rest of the catalog still loads.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

use crate::core::data::{OTHER_CASE, Template};
use crate::utils::{build_line_index, offset_to_line};

/// Label inlang uses for the catch-all variant; normalized to `other`.
const CATCH_ALL_LABEL: &str = "*";

/// Result of parsing one catalog file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedCatalog {
    pub entries: HashMap<String, Template>,
    /// Keys whose values had no recognized message shape, in file order.
    pub unparseable_keys: Vec<String>,
}

/// Parse catalog content. Fails only when the content is not a JSON object.
pub fn parse_catalog(content: &str) -> Result<ParsedCatalog, String> {
    if content.trim().is_empty() {
        return Ok(ParsedCatalog::default());
    }

    let json: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    let Value::Object(root) = json else {
        return Err("top-level value is not a JSON object".to_string());
    };

    let mut parsed = ParsedCatalog::default();
    for (key, value) in &root {
        if is_metadata_key(key) {
            continue;
        }
        match parse_template(value) {
            Some(template) => {
                parsed.entries.insert(key.clone(), template);
            }
            None => parsed.unparseable_keys.push(key.clone()),
        }
    }
    Ok(parsed)
}

/// Keys such as `$schema` describe the file, not a message.
pub fn is_metadata_key(key: &str) -> bool {
    key.starts_with('$')
}

/// Map one catalog value to a template.
///
/// - string → `Plain`
/// - object with a `match` object → `Selected`
/// - non-empty array whose first element has a `match` object → `Selected`
/// - anything else → `None`
pub fn parse_template(value: &Value) -> Option<Template> {
    match value {
        Value::String(text) => Some(Template::Plain(text.clone())),
        Value::Object(variant) => parse_selected(variant),
        Value::Array(items) => match items.first() {
            Some(Value::Object(variant)) => parse_selected(variant),
            _ => None,
        },
        _ => None,
    }
}

fn parse_selected(variant: &Map<String, Value>) -> Option<Template> {
    let Some(Value::Object(matches)) = variant.get("match") else {
        return None;
    };
    if matches.is_empty() {
        return None;
    }

    let mut cases = BTreeMap::new();
    for (selector_key, value) in matches {
        // Only plain text is allowed inside a case; nested matches are rejected.
        let Value::String(text) = value else {
            return None;
        };
        let label = selector_key
            .split_once('=')
            .map(|(_, label)| label)
            .unwrap_or(selector_key)
            .trim();
        let label = if label == CATCH_ALL_LABEL {
            OTHER_CASE
        } else {
            label
        };
        cases.insert(label.to_string(), text.clone());
    }

    Some(Template::Selected {
        selector: selector_name(variant, matches),
        cases,
    })
}

/// Selector from `selectors[0]`, else the prefix of the first match key.
fn selector_name(variant: &Map<String, Value>, matches: &Map<String, Value>) -> String {
    variant
        .get("selectors")
        .and_then(Value::as_array)
        .and_then(|selectors| selectors.first())
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| {
            matches
                .keys()
                .next()
                .and_then(|k| k.split_once('='))
                .map(|(selector, _)| selector.trim().to_string())
        })
        .unwrap_or_default()
}

/// Find the line number where a top-level key is declared.
///
/// Only matches occurrences followed by `:`, so a string value that happens to
/// contain the same text is skipped.
pub fn find_key_line(content: &str, key: &str) -> Option<usize> {
    let pattern = format!("\"{}\"", key);
    let line_index = build_line_index(content);

    let mut pos = 0;
    while let Some(rel_pos) = content[pos..].find(&pattern) {
        let abs_pos = pos + rel_pos;
        let after_pattern = abs_pos + pattern.len();
        if content[after_pattern..].trim_start().starts_with(':') {
            return Some(offset_to_line(&line_index, abs_pos));
        }
        pos = abs_pos + 1;
    }
    None
}
