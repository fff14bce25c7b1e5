//! Manual assembly
//!
//! Flattens the documentation tree and hands the ordered documents to an
//! external renderer (pandoc by default), then moves the artifact into place.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::error::{DocpackError, Result};
use crate::core::util::{command_exists, move_file};
use crate::docs::flatten::{FlattenedDocs, Flattener};

/// Name of the artifact inside the flattened directory before it is moved
const WORK_ARTIFACT: &str = "MANUAL.pdf";

/// Turns an ordered list of documents into a single output file
pub trait DocumentRenderer {
    /// Tool name for logs and errors
    fn name(&self) -> &str;

    /// Render `inputs` (names relative to `workdir`) into `output`
    fn render(&self, workdir: &Path, inputs: &[String], output: &Path) -> Result<()>;
}

/// Runs `program <args...> <inputs...> -o <output>` in the working directory
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandRenderer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Check if the renderer program is available
    pub fn is_available(&self) -> bool {
        command_exists(&self.program)
    }
}

impl Default for CommandRenderer {
    fn default() -> Self {
        Self::new("pandoc", Vec::new())
    }
}

impl DocumentRenderer for CommandRenderer {
    fn name(&self) -> &str {
        &self.program
    }

    fn render(&self, workdir: &Path, inputs: &[String], output: &Path) -> Result<()> {
        if !self.is_available() {
            return Err(DocpackError::ToolNotFound {
                tool: self.program.clone(),
            });
        }

        let mut cmd = Command::new(&self.program);
        cmd.current_dir(workdir)
            .args(&self.args)
            .args(inputs)
            .arg("-o")
            .arg(output);

        tracing::debug!("Running {:?}", cmd);

        let result = cmd.output().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DocpackError::ToolNotFound {
                tool: self.program.clone(),
            },
            _ => DocpackError::io(&self.program, e),
        })?;

        if !result.status.success() {
            return Err(DocpackError::ToolFailed {
                tool: self.program.clone(),
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

/// Outcome of a manual build
#[derive(Debug, Clone)]
pub struct ManualReport {
    /// Documents in the order they were rendered
    pub documents: Vec<String>,
    /// Final location of the rendered manual
    pub artifact: PathBuf,
}

/// Render an already flattened tree and move the result to `output`
pub fn render_flattened(
    docs: &FlattenedDocs,
    renderer: &dyn DocumentRenderer,
    output: &Path,
) -> Result<PathBuf> {
    let documents = docs.document_names();
    let work_artifact = docs.dir().join(WORK_ARTIFACT);

    tracing::info!(
        "Rendering {} documents with {}",
        documents.len(),
        renderer.name()
    );
    renderer.render(docs.dir(), &documents, &work_artifact)?;

    if !work_artifact.is_file() {
        return Err(DocpackError::MissingArtifact {
            path: work_artifact,
        });
    }

    move_file(&work_artifact, output)?;
    Ok(output.to_path_buf())
}

/// Flatten `root_document` under `source_tree`, render it, and place the
/// manual at `output`. Scratch directories are gone when this returns.
pub fn build_manual(
    flattener: &Flattener,
    renderer: &dyn DocumentRenderer,
    root_document: &Path,
    source_tree: &Path,
    output: &Path,
) -> Result<ManualReport> {
    let docs = flattener.flatten(root_document, source_tree)?;
    let artifact = render_flattened(&docs, renderer, output)?;

    tracing::info!("Manual written to {}", artifact.display());

    Ok(ManualReport {
        documents: docs.document_names(),
        artifact,
    })
}
