//! Splits a Svelte component into the pieces that hold JS/TS code.

/// A byte range of a `.svelte` file that contains code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvelteSegment {
    /// Body of a `<script>` block.
    Script { start: usize, end: usize },
    /// Expression inside a markup tag: `{expr}`, `{#if expr}`, `attr={expr}`.
    Expression { start: usize, end: usize },
}

impl SvelteSegment {
    pub fn range(&self) -> (usize, usize) {
        match *self {
            SvelteSegment::Script { start, end } | SvelteSegment::Expression { start, end } => {
                (start, end)
            }
        }
    }
}

/// Block openers whose remainder is a single expression.
const EXPRESSION_BLOCKS: &[&str] = &[":else if", "#if", "#await", "#key", "@html", "@render"];

/// Code segments of `content`, in document order. `<style>` blocks and HTML
/// comments are skipped.
pub fn split_svelte(content: &str) -> Vec<SvelteSegment> {
    let mut segments = Vec::new();
    let mut pos = 0;

    while pos < content.len() {
        let rest = &content[pos..];

        if rest.starts_with("<!--") {
            pos = rest
                .find("-->")
                .map(|i| pos + i + 3)
                .unwrap_or(content.len());
            continue;
        }

        if let Some(name) = ["script", "style"]
            .into_iter()
            .find(|name| opens_tag(rest, name))
        {
            let Some(open_end) = rest.find('>').map(|i| pos + i + 1) else {
                break;
            };
            let close_tag = format!("</{}", name);
            let close_start = content[open_end..]
                .find(&close_tag)
                .map(|i| open_end + i)
                .unwrap_or(content.len());
            if name == "script" {
                segments.push(SvelteSegment::Script {
                    start: open_end,
                    end: close_start,
                });
            }
            pos = content[close_start..]
                .find('>')
                .map(|i| close_start + i + 1)
                .unwrap_or(content.len());
            continue;
        }

        if rest.starts_with('{') {
            let Some(close) = matching_brace(content, pos) else {
                break;
            };
            if let Some((start, end)) = tag_expression(content, pos + 1, close) {
                segments.push(SvelteSegment::Expression { start, end });
            }
            pos = close + 1;
            continue;
        }

        pos += rest.chars().next().map(char::len_utf8).unwrap_or(1);
    }

    segments
}

fn opens_tag(rest: &str, name: &str) -> bool {
    let Some(after_lt) = rest.strip_prefix('<') else {
        return false;
    };
    if !after_lt
        .get(..name.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(name))
    {
        return false;
    }
    matches!(
        after_lt[name.len()..].chars().next(),
        Some('>' | '/') | Some(' ' | '\t' | '\n' | '\r')
    )
}

/// Index of the `}` closing the `{` at `open`, skipping quoted strings.
fn matching_brace(content: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in content[open..].char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Range of the JS expression inside a markup tag spanning `start..end`.
fn tag_expression(content: &str, start: usize, end: usize) -> Option<(usize, usize)> {
    let inner = &content[start..end];
    let lead = inner.len() - inner.trim_start().len();
    let body = inner.trim_start();

    let (skip, expr) = if let Some(block) = EXPRESSION_BLOCKS
        .iter()
        .find(|block| starts_with_keyword(body, block))
    {
        let expr = &body[block.len()..];
        (block.len(), expr)
    } else if starts_with_keyword(body, "#each") {
        let expr = &body["#each".len()..];
        let expr = expr.find(" as ").map(|i| &expr[..i]).unwrap_or(expr);
        ("#each".len(), expr)
    } else if body.starts_with(['#', ':', '@', '/']) {
        return None;
    } else {
        (0, body)
    };

    let expr_start = start + lead + skip + (expr.len() - expr.trim_start().len());
    let expr_len = expr.trim().len();
    if expr_len == 0 {
        return None;
    }
    Some((expr_start, expr_start + expr_len))
}

fn starts_with_keyword(body: &str, keyword: &str) -> bool {
    body.strip_prefix(keyword)
        .is_some_and(|rest| rest.starts_with(char::is_whitespace))
}
