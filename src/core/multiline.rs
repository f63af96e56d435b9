//! Rewrites top-level `"""` docstrings as `#` comment lines.

use super::classifier::{string_open_after, TRIPLE_QUOTE};
use super::organizer::normalize_newlines;

/// Every `"""` block starting at column 0 becomes `# `-prefixed lines.
/// Empty first and last inner lines are dropped. Unterminated blocks and
/// string literals inside code are left alone.
pub fn convert_multiline(script: &str) -> String {
    let normalized = normalize_newlines(script);
    let lines: Vec<&str> = normalized.lines().collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());

    let mut in_literal = false;
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if in_literal {
            in_literal = string_open_after(line, true);
            out.push(line.to_string());
            i += 1;
            continue;
        }
        if !line.starts_with(TRIPLE_QUOTE) {
            in_literal = string_open_after(line, false);
            out.push(line.to_string());
            i += 1;
            continue;
        }

        let end = if string_open_after(line, false) {
            lines[i + 1..]
                .iter()
                .position(|l| !string_open_after(l, true))
                .map(|n| i + 1 + n)
        } else {
            Some(i)
        };
        match end {
            Some(end) => {
                out.extend(as_comments(&lines[i..=end].join("\n")));
                i = end + 1;
            }
            None => {
                log::warn!("unterminated docstring on line {} left as is", i + 1);
                out.extend(lines[i..].iter().map(|l| l.to_string()));
                break;
            }
        }
    }

    let mut text = out.join("\n");
    if !text.is_empty() && normalized.ends_with('\n') {
        text.push('\n');
    }
    text
}

fn as_comments(unit: &str) -> Vec<String> {
    let body = &unit[TRIPLE_QUOTE.len()..];
    let (inner, tail) = match body.rfind(TRIPLE_QUOTE) {
        Some(close) => (&body[..close], body[close + TRIPLE_QUOTE.len()..].trim()),
        None => (body, ""),
    };

    let mut inner_lines: Vec<&str> = inner.split('\n').collect();
    if inner_lines.len() > 1 && inner_lines.last().is_some_and(|l| l.trim().is_empty()) {
        inner_lines.pop();
    }
    if inner_lines.len() > 1 && inner_lines[0].trim().is_empty() {
        inner_lines.remove(0);
    }

    let mut comments: Vec<String> = inner_lines.iter().map(|l| comment(l)).collect();
    if !tail.is_empty() {
        comments.push(comment(tail));
    }
    comments
}

fn comment(text: &str) -> String {
    let text = text.trim_end();
    if text.is_empty() {
        "#".to_string()
    } else {
        format!("# {text}")
    }
}
