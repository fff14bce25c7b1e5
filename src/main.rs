//! docpack - Packaging automation for editor plugins
//!
//! docpack provides:
//! - Flattening of a linked Markdown documentation tree into one directory
//! - Rendering of the flattened documents into a single PDF manual
//! - Export of the plugin as an editor package
//! - Unified output format (jsonl/json/md/raw)

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod backends;
mod cli;
mod core;
mod docs;
mod export;
mod flows;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Logs go to stderr; stdout carries the ResultSet
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    cli::run(cli)
}
