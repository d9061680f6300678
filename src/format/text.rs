//! Description text rendering: cross-references, paragraph reflow, admonitions.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{@link (.+?)\}").unwrap());

static ADMONITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<info>(.+?)</info>|<warn>(.+?)</warn>").unwrap());

const FENCE: &str = "```";

/// Render a description.
///
/// `resolve` maps the path inside `{@link path}` to link text; unresolved
/// paths are left as plain text.
pub fn format_text<F>(text: &str, resolve: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let linked = LINK.replace_all(text, |caps: &Captures<'_>| {
        let path = caps[1].trim();
        resolve(path).unwrap_or_else(|| path.to_string())
    });

    let reflowed = reflow(&linked);

    ADMONITION
        .replace_all(&reflowed, |caps: &Captures<'_>| {
            let body = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            format!("\n**{}**\n", body)
        })
        .into_owned()
}

/// Join soft-wrapped lines with a space.
///
/// Fenced code blocks are copied verbatim. Newlines stay when either adjacent
/// line is list markup or blank, which also keeps fences on their own lines.
fn reflow(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find(FENCE) {
        let after_open = open + FENCE.len();
        let Some(close) = rest[after_open..].find(FENCE) else {
            break;
        };
        let end = after_open + close + FENCE.len();

        reflow_prose(&rest[..open], &mut out);
        out.push_str(&rest[open..end]);
        rest = &rest[end..];
    }

    reflow_prose(rest, &mut out);
    out
}

fn is_list_line(line: &str) -> bool {
    line.starts_with('*') || line.starts_with('-')
}

fn reflow_prose(segment: &str, out: &mut String) {
    let mut lines = segment.split('\n').peekable();

    while let Some(line) = lines.next() {
        out.push_str(line);
        let Some(next) = lines.peek() else {
            break;
        };

        let keep_break = is_list_line(line)
            || is_list_line(next)
            || line.trim().is_empty()
            || next.trim().is_empty();
        out.push(if keep_break { '\n' } else { ' ' });
    }
}
