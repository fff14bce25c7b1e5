//! Documentation module - Flattens a linked Markdown tree for PDF rendering
//!
//! Provides:
//! - references: discovery of linked documents in the root document
//! - rewrite: discriminator prefixing and image tag normalization
//! - scratch: scoped scratch directories
//! - flatten: the flattener itself
//! - manual: rendering the flattened documents into a single manual

use serde::Deserialize;

pub mod flatten;
pub mod manual;
pub mod references;
pub mod rewrite;
pub mod scratch;

/// How permissive reference discovery and filename rewriting are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Any parenthesized path ending in `.md`; any literal sibling filename
    #[default]
    Loose,
    /// Only Markdown link targets and `src="..."` attributes
    Strict,
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "loose" => Ok(MatchMode::Loose),
            "strict" => Ok(MatchMode::Strict),
            _ => Err(format!("Unknown match mode: {} (expected loose or strict)", s)),
        }
    }
}
