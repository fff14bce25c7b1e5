//! Project configuration (docpack.toml)
//!
//! All sections are optional. A missing file yields defaults; a malformed
//! file is an error.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{DocpackError, IoResultExt, Result};
use crate::docs::MatchMode;

/// Default config file name, looked up in the project root
pub const CONFIG_FILE: &str = "docpack.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocpackConfig {
    pub docs: DocsConfig,
    pub renderer: RendererConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocsConfig {
    /// Source documentation tree, relative to the project root
    pub dir: PathBuf,
    /// Root document, relative to `dir`
    pub root: PathBuf,
    /// Final manual path, relative to the project root
    pub output: PathBuf,
    pub match_mode: MatchMode,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("Documentation"),
            root: PathBuf::from("Documentation.md"),
            output: PathBuf::from("MANUAL.pdf"),
            match_mode: MatchMode::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererConfig {
    pub program: String,
    /// Extra arguments placed before the input files
    pub args: Vec<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            program: "pandoc".to_string(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Path to the editor executable; there is no sensible default
    pub editor: Option<PathBuf>,
    /// Folder name under `Assets/` inside the exported package
    pub plugin_name: String,
    /// Package file, relative to the project root
    pub package: PathBuf,
    /// Files and directories copied into the package, relative to the project root
    pub assets: Vec<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            editor: None,
            plugin_name: "UnityVolumeRendering".to_string(),
            package: PathBuf::from("UnityVolumeRendering.unitypackage"),
            assets: [
                "Assets",
                "DataFiles",
                "ACKNOWLEDGEMENTS.txt",
                "CREDITS.md",
                "LICENSE",
                "README.md",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
        }
    }
}

impl DocpackConfig {
    /// Parse config from TOML text; `path` is only used in error messages
    pub fn from_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| DocpackError::Config {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Load config from `path`, or defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).at(path)?;
        let config = Self::from_toml(&content, path)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
