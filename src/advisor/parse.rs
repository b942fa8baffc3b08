//! Advisor reply cleanup.
//!
//! Reasoning models wrap deliberation in `<think>` blocks and answer in
//! a numbered list; this module strips both down to bare crop names.

/// Split a model reply into clean crop names.
pub fn crop_lines(reply: &str) -> Vec<String> {
    let visible = strip_think_blocks(reply);
    visible
        .lines()
        .map(strip_list_prefix)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Drop `<think>…</think>` spans. An unclosed block swallows the rest.
fn strip_think_blocks(text: &str) -> String {
    let mut visible = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("<think>") {
        visible.push_str(&rest[..start]);
        match rest[start..].find("</think>") {
            Some(close) => rest = &rest[start + close + "</think>".len()..],
            None => return visible,
        }
    }
    visible.push_str(rest);
    visible
}

/// Strip `1.` / `2)` numbering and bullet markers from a list line.
fn strip_list_prefix(line: &str) -> &str {
    let line = line.trim();
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return rest.trim_start();
        }
        // A line that merely starts with a number is not list numbering.
        return line;
    }
    for marker in ["- ", "* ", "• "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return rest.trim_start();
        }
    }
    line
}
