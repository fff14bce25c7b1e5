//! Text rewriting for flattened documents
//!
//! Sibling filenames get the group discriminator as a prefix so the document
//! keeps pointing at its assets after everything lands in one directory.

use once_cell::sync::Lazy;
use regex::{Captures, Regex, RegexBuilder};

use crate::docs::MatchMode;

/// `<img src="X" ...>` with any attributes around `src`
pub static IMG_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<img\s+[^>]*?\bsrc\s*=\s*"([^"]*)"[^>]*>"#).expect("Invalid IMG_TAG_RE regex")
});

/// Link or image target: `](target` up to whitespace, `>` or `)`
static LINK_TARGET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\]\(\s*<?)([^)\s>]+)").expect("Invalid LINK_TARGET_RE regex")
});

/// HTML `src="..."` attribute
static SRC_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(\bsrc\s*=\s*")([^"]*)"#).expect("Invalid SRC_ATTR_RE regex")
});

/// Compiled size allowed for the sibling-name alternation
const PATTERN_SIZE_LIMIT: usize = 32 * (1 << 20);

/// The name a file gets in the flattened directory
pub fn prefixed_name(discriminator: usize, name: &str) -> String {
    format!("{}{}", discriminator, name)
}

/// Prefix occurrences of sibling filenames with `discriminator`.
///
/// Loose mode rewrites every literal occurrence in one pass, longest name
/// first, so a name contained in another sibling's name is never rewritten
/// twice. Strict mode only touches link targets and `src` attributes that
/// name a sibling directly (optionally with a `./` prefix or `#fragment`).
///
/// Fails only when the loose-mode pattern over all sibling names cannot be
/// compiled.
pub fn prefix_siblings(
    text: &str,
    siblings: &[String],
    discriminator: usize,
    mode: MatchMode,
) -> Result<String, regex::Error> {
    if siblings.is_empty() {
        return Ok(text.to_string());
    }

    match mode {
        MatchMode::Loose => prefix_literal(text, siblings, discriminator, PATTERN_SIZE_LIMIT),
        MatchMode::Strict => {
            let replace = |caps: &Captures| {
                format!(
                    "{}{}",
                    &caps[1],
                    prefix_target(&caps[2], siblings, discriminator)
                )
            };
            let text = LINK_TARGET_RE.replace_all(text, replace);
            Ok(SRC_ATTR_RE.replace_all(&text, replace).into_owned())
        }
    }
}

fn prefix_literal(
    text: &str,
    siblings: &[String],
    discriminator: usize,
    size_limit: usize,
) -> Result<String, regex::Error> {
    let mut names: Vec<&str> = siblings
        .iter()
        .map(String::as_str)
        .filter(|n| !n.is_empty())
        .collect();
    if names.is_empty() {
        return Ok(text.to_string());
    }
    names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    names.dedup();

    let pattern = format!(
        "({})",
        names
            .iter()
            .map(|n| regex::escape(n))
            .collect::<Vec<_>>()
            .join("|")
    );
    let re = RegexBuilder::new(&pattern).size_limit(size_limit).build()?;

    Ok(re
        .replace_all(text, |caps: &Captures| prefixed_name(discriminator, &caps[1]))
        .into_owned())
}

fn prefix_target(target: &str, siblings: &[String], discriminator: usize) -> String {
    let (path, fragment) = match target.find('#') {
        Some(idx) => target.split_at(idx),
        None => (target, ""),
    };
    let (lead, name) = match path.strip_prefix("./") {
        Some(rest) => ("./", rest),
        None => ("", path),
    };

    if siblings.iter().any(|s| s == name) {
        format!("{}{}{}", lead, prefixed_name(discriminator, name), fragment)
    } else {
        target.to_string()
    }
}

/// Rewrite `<img src="X" ...>` tags to Markdown `![](X)`
pub fn normalize_img_tags(text: &str) -> String {
    IMG_TAG_RE.replace_all(text, "![](${1})").into_owned()
}
