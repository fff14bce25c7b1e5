//! Package flow - `export` command

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::core::model::{Meta, ResultItem, ResultSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::{get_file_size, hash_file};
use crate::export::{export_package, PackageExporter};

/// What goes into the package and where it ends up
#[derive(Debug, Clone)]
pub struct PackageOptions {
    pub project_root: PathBuf,
    pub assets: Vec<PathBuf>,
    pub plugin_name: String,
    pub package: PathBuf,
}

/// Export the package and describe it as a ResultSet
pub fn build_package(
    options: &PackageOptions,
    exporter: &dyn PackageExporter,
) -> Result<ResultSet> {
    let package = export_package(
        exporter,
        &options.project_root,
        &options.assets,
        &options.plugin_name,
        &options.package,
    )
    .with_context(|| format!("Failed to export {}", options.package.display()))?;

    let mut result_set = ResultSet::new();
    result_set.push(package_item(&package));
    Ok(result_set)
}

fn package_item(package: &Path) -> ResultItem {
    ResultItem::artifact(package.display().to_string()).with_meta(Meta {
        size: get_file_size(package).ok(),
        hash: hash_file(package).ok(),
        ..Default::default()
    })
}

/// Run the export command
pub fn run_export(
    options: &PackageOptions,
    exporter: &dyn PackageExporter,
    config: RenderConfig,
) -> Result<()> {
    let result_set = build_package(options, exporter)?;

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&result_set));

    Ok(())
}
