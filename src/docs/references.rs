//! Reference discovery
//!
//! Finds the documents a root document links to, in text order.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::docs::MatchMode;

/// Any parenthesized text ending in `.md`, e.g. `(sub/page.md)`.
/// Also matches prose like `(see notes.md)`.
pub static LOOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]*\.md)\)").expect("Invalid LOOSE_RE regex"));

/// Markdown inline link target: `[label](target "optional title")`
pub static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\]\(\s*<?([^)\s>]+)>?(?:\s+"[^"]*")?\s*\)"#).expect("Invalid LINK_RE regex")
});

/// Find referenced documents in `text`, in the order they appear.
///
/// Duplicates are kept; callers decide what a repeated reference means.
pub fn find_references(text: &str, mode: MatchMode) -> Vec<String> {
    match mode {
        MatchMode::Loose => LOOSE_RE
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .collect(),
        MatchMode::Strict => LINK_RE
            .captures_iter(text)
            .filter_map(|caps| strict_target(&caps[1]))
            .collect(),
    }
}

/// Keep local `.md` targets, dropping any `#fragment`
fn strict_target(target: &str) -> Option<String> {
    if target.contains("://") || target.starts_with("mailto:") {
        return None;
    }

    let path = target.split('#').next().unwrap_or(target);
    if path.ends_with(".md") {
        Some(path.to_string())
    } else {
        None
    }
}
