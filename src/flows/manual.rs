//! Manual flows - `flatten` and `pdf` commands
//!
//! Steps:
//! 1. Flatten the documentation tree into a scratch directory
//! 2. Either persist the flat directory (`flatten`) or render it (`pdf`)
//! 3. Print the ordered documents as a ResultSet

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::core::model::{Meta, ResultItem, ResultSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::{get_file_size, hash_file};
use crate::docs::flatten::{FlattenedDocs, Flattener};
use crate::docs::manual::{build_manual, DocumentRenderer};
use crate::docs::MatchMode;

/// Where the documentation lives and how to read it
#[derive(Debug, Clone)]
pub struct DocsOptions {
    /// Source documentation tree (absolute)
    pub docs_dir: PathBuf,
    /// Root document, relative to `docs_dir`
    pub root_doc: PathBuf,
    pub mode: MatchMode,
}

impl DocsOptions {
    fn flattener(&self) -> Flattener {
        Flattener::new(self.mode)
    }
}

fn file_meta(path: &Path, group: Option<usize>, source: &str) -> Meta {
    Meta {
        group,
        source: Some(source.to_string()),
        size: get_file_size(path).ok(),
        hash: hash_file(path).ok(),
    }
}

/// Map a flatten run to result items: documents in render order, then assets
pub fn flatten_result_set(docs: &FlattenedDocs) -> ResultSet {
    let mut result_set = ResultSet::new();

    for doc in docs.documents() {
        let path = docs.dir().join(&doc.name);
        result_set.push(
            ResultItem::document(doc.name.clone()).with_meta(file_meta(&path, doc.group, &doc.source)),
        );
    }

    for (group, name, source) in docs.assets() {
        let path = docs.dir().join(&name);
        let meta = if path.is_dir() {
            Meta {
                group: Some(group),
                source: Some(source),
                ..Default::default()
            }
        } else {
            file_meta(&path, Some(group), &source)
        };
        result_set.push(ResultItem::asset(name).with_meta(meta));
    }

    result_set
}

/// Flatten the documentation and copy the flat directory to `out`
pub fn flatten_to(options: &DocsOptions, out: &Path) -> Result<ResultSet> {
    let docs = options
        .flattener()
        .flatten(&options.root_doc, &options.docs_dir)
        .with_context(|| format!("Failed to flatten {}", options.docs_dir.display()))?;

    for group in docs.groups() {
        tracing::debug!(
            "Group {} from '{}': {} entries",
            group.discriminator,
            group.source_dir,
            group.files.len()
        );
    }

    docs.persist_to(out)
        .with_context(|| format!("Failed to write flattened docs to {}", out.display()))?;

    Ok(flatten_result_set(&docs))
}

/// Run the flatten command
pub fn run_flatten(options: &DocsOptions, out: &Path, config: RenderConfig) -> Result<()> {
    let result_set = flatten_to(options, out)?;

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&result_set));

    Ok(())
}

/// Build the manual and describe it as a ResultSet
pub fn build_pdf(
    options: &DocsOptions,
    renderer: &dyn DocumentRenderer,
    output: &Path,
) -> Result<ResultSet> {
    let report = build_manual(
        &options.flattener(),
        renderer,
        &options.root_doc,
        &options.docs_dir,
        output,
    )
    .with_context(|| format!("Failed to build manual {}", output.display()))?;

    let mut result_set: ResultSet = report
        .documents
        .iter()
        .map(|name| ResultItem::document(name.clone()))
        .collect();

    result_set.push(
        ResultItem::artifact(report.artifact.display().to_string()).with_meta(Meta {
            size: get_file_size(&report.artifact).ok(),
            hash: hash_file(&report.artifact).ok(),
            ..Default::default()
        }),
    );

    Ok(result_set)
}

/// Run the pdf command
pub fn run_pdf(
    options: &DocsOptions,
    renderer: &dyn DocumentRenderer,
    output: &Path,
    config: RenderConfig,
) -> Result<()> {
    let result_set = build_pdf(options, renderer, output)?;

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&result_set));

    Ok(())
}
