//! Error taxonomy
//!
//! Every failure is a hard stop: nothing here is retried or downgraded to a
//! partial result. The CLI layer adds context with anyhow.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::core::model::ItemError;

pub type Result<T, E = DocpackError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DocpackError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reference '{reference}' points to missing file {}", resolved.display())]
    MissingReference { reference: String, resolved: PathBuf },

    #[error("reference '{reference}' resolves outside the documentation tree")]
    ReferenceOutsideTree { reference: String },

    #[error("'{tool}' was not found on PATH")]
    ToolNotFound { tool: String },

    #[error("'{tool}' failed with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("expected output {} was not produced", path.display())]
    MissingArtifact { path: PathBuf },

    #[error(
        "flattened name '{name}' is claimed by both {} and {}",
        first.display(),
        second.display()
    )]
    NameCollision {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("cannot build rename pattern for {}: {source}", document.display())]
    Pattern {
        document: PathBuf,
        #[source]
        source: regex::Error,
    },

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl DocpackError {
    /// Wrap an io::Error with the path it happened at
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocpackError::Io {
            path: path.into(),
            source,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            DocpackError::Io { .. } => "IO_ERROR",
            DocpackError::MissingReference { .. } => "MISSING_REFERENCE",
            DocpackError::ReferenceOutsideTree { .. } => "REFERENCE_OUTSIDE_TREE",
            DocpackError::ToolNotFound { .. } => "TOOL_NOT_FOUND",
            DocpackError::ToolFailed { .. } => "TOOL_FAILED",
            DocpackError::MissingArtifact { .. } => "MISSING_ARTIFACT",
            DocpackError::NameCollision { .. } => "NAME_COLLISION",
            DocpackError::Pattern { .. } => "PATTERN_ERROR",
            DocpackError::Config { .. } => "CONFIG_ERROR",
        }
    }

    pub fn to_item_error(&self) -> ItemError {
        ItemError::new(self.code(), self.to_string())
    }
}

/// Extension for attaching a path to io results
pub trait IoResultExt<T> {
    fn at(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn at(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| DocpackError::io(path, e))
    }
}
