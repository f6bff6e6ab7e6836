//! Template rendering: placeholder substitution and plural case selection.

use std::{collections::HashMap, sync::LazyLock};

use regex::{Captures, Regex};

use crate::core::{
    data::{OTHER_CASE, Template},
    error::RenderError,
};

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("Invalid regex pattern"));

/// Plural category for `count`: `one` for exactly 1, else `other`.
pub fn plural_label(count: Option<i64>) -> &'static str {
    match count {
        Some(1) => "one",
        _ => OTHER_CASE,
    }
}

/// Render a template against call arguments.
///
/// `{name}` placeholders without a matching argument stay in the output as
/// written. A `count` given separately also fills `{count}` unless `args`
/// already has one.
pub fn render(
    template: &Template,
    args: &HashMap<String, String>,
    count: Option<i64>,
) -> Result<String, RenderError> {
    match template {
        Template::Plain(text) => Ok(substitute(text, args, count)),
        Template::Selected { cases, .. } => {
            let label = plural_label(count);
            let text = cases
                .get(label)
                .or_else(|| cases.get(OTHER_CASE))
                .ok_or_else(|| match count {
                    None => RenderError::MissingPluralCount,
                    Some(_) => RenderError::NoMatchingCase {
                        label: label.to_string(),
                    },
                })?;
            Ok(substitute(text, args, count))
        }
    }
}

/// Like [`render`], but falls back to the message key when rendering fails.
pub fn render_or_key(
    key: &str,
    template: &Template,
    args: &HashMap<String, String>,
    count: Option<i64>,
) -> String {
    render(template, args, count).unwrap_or_else(|_| key.to_string())
}

fn substitute(text: &str, args: &HashMap<String, String>, count: Option<i64>) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            match args.get(name) {
                Some(value) => value.clone(),
                None if name == "count" => count
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| caps[0].to_string()),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Placeholder names in `text`, in order of first appearance.
pub fn placeholders(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_RE.captures_iter(text) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_plain_substitutes_known_placeholders() {
        let template = Template::Plain("Hello {name}".to_string());
        assert_eq!(
            render(&template, &args(&[("name", "Ada")]), None).unwrap(),
            "Hello Ada"
        );
    }

    #[test]
    fn test_plain_without_placeholders_is_unchanged() {
        let template = Template::Plain("Just text, {not a placeholder".to_string());
        assert_eq!(
            render(&template, &args(&[("x", "y")]), Some(3)).unwrap(),
            "Just text, {not a placeholder"
        );
    }

    #[test]
    fn test_unknown_placeholder_stays_literal() {
        let template = Template::Plain("{greeting}, {name}!".to_string());
        assert_eq!(
            render(&template, &args(&[("name", "Bo")]), None).unwrap(),
            "{greeting}, Bo!"
        );
    }

    #[test]
    fn test_selected_picks_case_by_count() {
        let template = Template::plural("count", "1 item", "{count} items");
        assert_eq!(render(&template, &args(&[]), Some(1)).unwrap(), "1 item");
        assert_eq!(render(&template, &args(&[]), Some(5)).unwrap(), "5 items");
        assert_eq!(render(&template, &args(&[]), Some(0)).unwrap(), "0 items");
        assert_eq!(
            render(&template, &args(&[]), None).unwrap(),
            "{count} items"
        );
    }

    #[test]
    fn test_explicit_count_argument_wins() {
        let template = Template::plural("count", "one {count}", "many {count}");
        assert_eq!(
            render(&template, &args(&[("count", "several")]), Some(2)).unwrap(),
            "many several"
        );
    }

    #[test]
    fn test_missing_label_falls_back_to_other() {
        let template = Template::Selected {
            selector: "count".to_string(),
            cases: BTreeMap::from([("other".to_string(), "{count} things".to_string())]),
        };
        assert_eq!(render(&template, &args(&[]), Some(1)).unwrap(), "1 things");
    }

    #[test]
    fn test_degenerate_selected_without_other() {
        let template = Template::Selected {
            selector: "count".to_string(),
            cases: BTreeMap::from([("one".to_string(), "just one".to_string())]),
        };
        assert_eq!(
            render(&template, &args(&[]), None),
            Err(RenderError::MissingPluralCount)
        );
        assert_eq!(
            render(&template, &args(&[]), Some(4)),
            Err(RenderError::NoMatchingCase {
                label: "other".to_string()
            })
        );
        assert_eq!(render(&template, &args(&[]), Some(1)).unwrap(), "just one");
        assert_eq!(
            render_or_key("only_one", &template, &args(&[]), None),
            "only_one"
        );
    }

    #[test]
    fn test_placeholders_in_first_seen_order() {
        assert_eq!(
            placeholders("{b} and {a} then {b} with {count}"),
            vec!["b", "a", "count"]
        );
        assert!(placeholders("no params").is_empty());
    }
}
