//! Renderer module
//!
//! Renders ResultSet to different output formats: jsonl, json, md, raw

use crate::core::model::{Kind, ResultItem, ResultSet};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(result_set),
            OutputFormat::Json => self.render_json(result_set),
            OutputFormat::Markdown => self.render_markdown(result_set),
            OutputFormat::Raw => self.render_raw(result_set),
        }
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, result_set: &ResultSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown
    fn render_markdown(&self, result_set: &ResultSet) -> String {
        let mut output = String::new();

        let errors: Vec<_> = result_set.of_kind(Kind::Error).collect();
        if !errors.is_empty() {
            output.push_str("## Errors\n\n");
            for item in errors {
                for error in &item.errors {
                    output.push_str(&format!("- **{}**: {}\n", error.code, error.message));
                }
            }
            output.push('\n');
        }

        let documents: Vec<_> = result_set.of_kind(Kind::Document).collect();
        if !documents.is_empty() {
            output.push_str("## Documents\n\n");
            for (index, item) in documents.into_iter().enumerate() {
                output.push_str(&format!("{}. ", index + 1));
                self.render_item_md(&mut output, item);
            }
            output.push('\n');
        }

        self.render_section_md(&mut output, "Assets", result_set.of_kind(Kind::Asset));
        self.render_section_md(&mut output, "Artifacts", result_set.of_kind(Kind::Artifact));

        let deps: Vec<_> = result_set.of_kind(Kind::Dependency).collect();
        if !deps.is_empty() {
            output.push_str("## Dependencies\n\n");
            for item in deps {
                if let Some(excerpt) = &item.excerpt {
                    output.push_str(&format!("- {}\n", excerpt));
                }
            }
            output.push('\n');
        }

        output
    }

    fn render_section_md<'a>(
        &self,
        output: &mut String,
        title: &str,
        items: impl Iterator<Item = &'a ResultItem>,
    ) {
        let items: Vec<_> = items.collect();
        if items.is_empty() {
            return;
        }

        output.push_str(&format!("## {}\n\n", title));
        for item in items {
            output.push_str("- ");
            self.render_item_md(output, item);
        }
        output.push('\n');
    }

    fn render_item_md(&self, output: &mut String, item: &ResultItem) {
        if let Some(path) = &item.path {
            output.push_str(&format!("`{}`", path));
        }
        if let Some(source) = &item.meta.source {
            output.push_str(&format!(" (from `{}`)", source));
        }
        if let Some(size) = item.meta.size {
            output.push_str(&format!(" ({} bytes)", size));
        }
        output.push('\n');
    }

    /// Render as raw output: bare document names one per line, in render order
    fn render_raw(&self, result_set: &ResultSet) -> String {
        result_set
            .of_kind(Kind::Document)
            .filter_map(|item| item.path.clone())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
