//! Plain-text normalization of definition text.
//!
//! `definicia_clean` is derived from `definicia` by [`normalize`]. The
//! pipeline is idempotent: `normalize(&normalize(x)) == normalize(x)`.

use once_cell::sync::Lazy;
use regex::Regex;

static SUPERSCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<sup\b[^<>]*>.*?</sup\s*>").expect("valid regex"));
static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid regex"));
static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?[A-Za-z][^<>]*>").expect("valid regex"));
static SPACE_BEFORE_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+([,.;:!?])").expect("valid regex"));
static LEADING_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-–•*]|\d+[.)])\s+").expect("valid regex"));

/// Normalize a definition into plain text suitable for search and export.
///
/// The steps run until the text stops changing: collapsing whitespace can
/// assemble markup (`&nbsp ;`) that only a further pass removes.
pub fn normalize(definition: &str) -> String {
    let mut current = normalize_once(definition);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_once(definition: &str) -> String {
    let text = strip_markup(definition);
    let text = collapse_whitespace(&text);
    let text = strip_leading_markers(&text);
    let text = capitalize_first(&text);
    ensure_terminal_period(&text)
}

/// Remove markup until nothing tag-like is left; removing one tag can
/// expose another (`<<b>b>`).
fn strip_markup(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = current.replace("&nbsp;", " ");
        let next = SUPERSCRIPT.replace_all(&next, "");
        let next = LINE_BREAK.replace_all(&next, " ");
        let next = TAG.replace_all(&next, "").into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}

fn collapse_whitespace(text: &str) -> String {
    let joined = text.split_whitespace().collect::<Vec<_>>().join(" ");
    SPACE_BEFORE_PUNCT.replace_all(&joined, "$1").into_owned()
}

fn strip_leading_markers(text: &str) -> String {
    let mut current = text;
    while let Some(m) = LEADING_MARKER.find(current) {
        current = current[m.end()..].trim_start();
    }
    current.to_string()
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn ensure_terminal_period(text: &str) -> String {
    let trimmed = text.trim_end_matches(|c: char| matches!(c, ',' | ';' | ':') || c.is_whitespace());
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.ends_with(['.', '!', '?', '…']) {
        trimmed.to_string()
    } else {
        format!("{}.", trimmed)
    }
}
