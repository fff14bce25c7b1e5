//! Scoped scratch directories
//!
//! The copied source tree and the flattened output both live in temporary
//! directories that are removed when the owning value is dropped.

use std::path::Path;

use tempfile::{Builder, TempDir};

use crate::core::error::{IoResultExt, Result};

const SOURCE_PREFIX: &str = "docs-src-";
const FLAT_PREFIX: &str = "docs-flat-";

/// The pair of scratch directories used by one flatten run
#[derive(Debug)]
pub struct ScratchSpace {
    source: TempDir,
    flat: TempDir,
}

impl ScratchSpace {
    /// Create both directories, under `parent` if given, else the system temp dir
    pub fn create(parent: Option<&Path>) -> Result<Self> {
        let source = make_dir(SOURCE_PREFIX, parent)?;
        let flat = make_dir(FLAT_PREFIX, parent)?;
        tracing::debug!(
            source = %source.path().display(),
            flat = %flat.path().display(),
            "Created scratch directories"
        );
        Ok(Self { source, flat })
    }

    /// Mutable copy of the source tree
    pub fn source_dir(&self) -> &Path {
        self.source.path()
    }

    /// Flattened output directory
    pub fn flat_dir(&self) -> &Path {
        self.flat.path()
    }
}

fn make_dir(prefix: &str, parent: Option<&Path>) -> Result<TempDir> {
    let mut builder = Builder::new();
    builder.prefix(prefix);
    match parent {
        Some(parent) => builder.tempdir_in(parent).at(parent),
        None => builder.tempdir().at(std::env::temp_dir()),
    }
}
