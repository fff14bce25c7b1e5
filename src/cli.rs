//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::core::config::{DocpackConfig, CONFIG_FILE};
use crate::core::error::DocpackError;
use crate::core::model::{ResultItem, ResultSet};
use crate::core::paths::resolve_against;
use crate::core::render::{OutputFormat, RenderConfig, Renderer};
use crate::docs::manual::CommandRenderer;
use crate::docs::MatchMode;
use crate::export::UnityExporter;
use crate::flows::manual::DocsOptions;
use crate::flows::package::PackageOptions;

/// docpack - packaging automation for editor plugins.
#[derive(Parser, Debug)]
#[command(name = "docpack")]
#[command(
    author,
    version,
    about,
    long_about = r#"docpack turns a plugin repository into distributable artifacts.

It flattens a multi-file Markdown documentation tree into a single directory
(renaming co-located assets so nothing collides), renders it into one PDF
manual with an external renderer, and exports the plugin as an editor package.

Every command prints a ResultSet in the selected format (default: jsonl).

Settings are read from docpack.toml in ROOT when present; flags override them.

Examples:
    docpack flatten --out build/docs
    docpack pdf -o dist/MANUAL.pdf
    docpack export --editor /opt/Unity/Editor/Unity
    docpack doctor
"#
)]
pub struct Cli {
    /// Project root directory.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Project root directory (defaults to the current directory).\n\n\
Relative paths from flags and docpack.toml are resolved against it."
    )]
    pub root: PathBuf,

    /// Path to the config file (default: ROOT/docpack.toml).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format for ResultSet.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- raw (document names one per line, in render order)"
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Quiet mode (warnings and errors only on stderr).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable debug diagnostics on stderr. RUST_LOG, when set, takes precedence."
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by the documentation commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct DocsArgs {
    /// Documentation source tree (default from config: Documentation).
    #[arg(long, value_name = "DIR")]
    pub docs: Option<PathBuf>,

    /// Root document, relative to the docs tree (default: Documentation.md).
    #[arg(long, value_name = "FILE")]
    pub root_doc: Option<PathBuf>,

    /// How references and filenames are matched (loose/strict).
    #[arg(
        long,
        value_parser = ["loose", "strict"],
        value_name = "MODE",
        long_help = "How references and filenames are matched.\n\n\
- loose (default): any parenthesized path ending in .md is a reference, and\n\
  every literal occurrence of a sibling filename is renamed\n\
- strict: only Markdown link targets are references, and only link targets\n\
  and src attributes are renamed"
    )]
    pub mode: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Flatten the documentation tree into one directory.
    #[command(
        long_about = "Copy the root document and every document it links to into OUT.\n\n\
Files next to each linked document are prefixed with a per-directory number\n\
(0page.md, 0diagram.png, 1image.png, ...) and the documents are rewritten to match.\n\
Documents are listed in render order.\n\n\
Example:\n\
  docpack flatten --out build/docs\n"
    )]
    Flatten {
        #[command(flatten)]
        docs: DocsArgs,

        /// Destination directory for the flattened files.
        #[arg(long, value_name = "DIR")]
        out: PathBuf,
    },

    /// Render the documentation into a single PDF manual.
    #[command(
        long_about = "Flatten the documentation in a scratch directory and run the renderer\n\
over the documents in order:\n\
  <program> <args...> <documents...> -o MANUAL.pdf\n\n\
Scratch directories are removed whether rendering succeeds or fails.\n\n\
Examples:\n\
  docpack pdf\n\
  docpack pdf -o dist/MANUAL.pdf --renderer pandoc\n"
    )]
    Pdf {
        #[command(flatten)]
        docs: DocsArgs,

        /// Output file (default from config: MANUAL.pdf).
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Renderer program (default from config: pandoc).
        #[arg(long, value_name = "PROGRAM")]
        renderer: Option<String>,
    },

    /// Export the plugin as an editor package.
    #[command(
        long_about = "Copy the configured assets into a temporary project under\n\
Assets/<plugin_name>/ and run the editor in batch mode to export it.\n\n\
Example:\n\
  docpack export --editor /opt/Unity/Editor/Unity\n"
    )]
    Export {
        /// Editor executable (default from config).
        #[arg(long, value_name = "PATH")]
        editor: Option<PathBuf>,

        /// Package file to write (default from config).
        #[arg(long, value_name = "FILE")]
        package: Option<PathBuf>,
    },

    /// Check external tools (renderer, editor).
    Doctor,
}

impl Cli {
    /// Default log filter for the verbosity flags
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

fn docs_options(root: &Path, config: &DocpackConfig, args: DocsArgs) -> Result<DocsOptions> {
    let mode = match args.mode {
        Some(mode) => mode.parse::<MatchMode>().map_err(anyhow::Error::msg)?,
        None => config.docs.match_mode,
    };

    Ok(DocsOptions {
        docs_dir: resolve_against(root, &args.docs.unwrap_or_else(|| config.docs.dir.clone())),
        root_doc: args.root_doc.unwrap_or_else(|| config.docs.root.clone()),
        mode,
    })
}

fn dispatch(cli: Cli, render_config: RenderConfig) -> Result<()> {
    let root = cli.root.canonicalize().unwrap_or(cli.root);
    let config_path = cli
        .config
        .map(|p| resolve_against(&root, &p))
        .unwrap_or_else(|| root.join(CONFIG_FILE));
    let config = DocpackConfig::load(&config_path)?;

    match cli.command {
        Commands::Flatten { docs, out } => {
            let options = docs_options(&root, &config, docs)?;
            let out = resolve_against(&root, &out);
            crate::flows::manual::run_flatten(&options, &out, render_config)
        }

        Commands::Pdf {
            docs,
            output,
            renderer,
        } => {
            let options = docs_options(&root, &config, docs)?;
            let output = resolve_against(&root, &output.unwrap_or_else(|| config.docs.output.clone()));
            let renderer = CommandRenderer::new(
                renderer.unwrap_or_else(|| config.renderer.program.clone()),
                config.renderer.args.clone(),
            );
            crate::flows::manual::run_pdf(&options, &renderer, &output, render_config)
        }

        Commands::Export { editor, package } => {
            let editor = editor
                .or_else(|| config.export.editor.clone())
                .context("No editor configured: pass --editor or set [export] editor in docpack.toml")?;
            let options = PackageOptions {
                project_root: root.clone(),
                assets: config.export.assets.clone(),
                plugin_name: config.export.plugin_name.clone(),
                package: package.unwrap_or_else(|| config.export.package.clone()),
            };
            let exporter = UnityExporter::new(resolve_against(&root, &editor));
            crate::flows::package::run_export(&options, &exporter, render_config)
        }

        Commands::Doctor => crate::backends::doctor::run_doctor(&config, render_config),
    }
}

/// Run the CLI with parsed arguments.
///
/// Failures caused by a [`DocpackError`] are also printed as an error result
/// item so machine consumers see them on stdout.
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    let result = dispatch(cli, render_config);

    if let Err(err) = &result {
        if let Some(docpack_err) = err.downcast_ref::<DocpackError>() {
            let result_set: ResultSet =
                std::iter::once(ResultItem::error(docpack_err.to_item_error())).collect();
            println!("{}", Renderer::with_config(render_config).render(&result_set));
        }
    }

    result
}
