//! Doctor - Dependency checking

use anyhow::Result;
use serde_json::json;

use crate::core::config::DocpackConfig;
use crate::core::model::{ItemError, ResultItem, ResultSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::docs::manual::CommandRenderer;
use crate::export::UnityExporter;

/// Dependency status
#[derive(Debug, Clone)]
pub struct DependencyStatus {
    pub name: String,
    pub available: bool,
    pub command: Option<String>,
    pub required_by: &'static str,
    pub notes: Option<String>,
}

impl DependencyStatus {
    pub fn to_result_item(&self) -> ResultItem {
        let status = if self.available { "✓" } else { "✗" };

        let mut message = format!(
            "{} (needed by `{}`) - {}",
            status,
            self.required_by,
            self.command
                .as_ref()
                .map(|c| format!("found: {}", c))
                .unwrap_or_else(|| "not found".to_string())
        );
        if let Some(notes) = &self.notes {
            message.push_str(&format!("\n  Note: {}", notes));
        }

        let item = ResultItem::dependency(&self.name, message).with_data(json!({
            "name": self.name,
            "available": self.available,
            "command": self.command,
            "required_by": self.required_by,
        }));

        if self.available {
            item
        } else {
            item.with_error(ItemError::new(
                "MISSING_DEPENDENCY",
                format!("{} is required by `{}` but not found", self.name, self.required_by),
            ))
        }
    }
}

/// Check the configured external tools
pub fn check_dependencies(config: &DocpackConfig) -> Vec<DependencyStatus> {
    let mut deps = Vec::new();

    let renderer = CommandRenderer::new(config.renderer.program.clone(), Vec::new());
    let renderer_available = renderer.is_available();
    deps.push(DependencyStatus {
        name: config.renderer.program.clone(),
        available: renderer_available,
        command: renderer_available.then(|| config.renderer.program.clone()),
        required_by: "pdf",
        notes: Some(
            "Install: https://pandoc.org/installing.html (PDF output also needs a LaTeX engine)"
                .to_string(),
        ),
    });

    match &config.export.editor {
        Some(editor) => {
            let available = UnityExporter::new(editor).is_available();
            deps.push(DependencyStatus {
                name: "editor".to_string(),
                available,
                command: available.then(|| editor.display().to_string()),
                required_by: "export",
                notes: None,
            });
        }
        None => deps.push(DependencyStatus {
            name: "editor".to_string(),
            available: false,
            command: None,
            required_by: "export",
            notes: Some(
                "Set [export] editor in docpack.toml or pass --editor to `docpack export`"
                    .to_string(),
            ),
        }),
    }

    deps
}

/// Run the doctor command
pub fn run_doctor(config: &DocpackConfig, render_config: RenderConfig) -> Result<()> {
    let deps = check_dependencies(config);

    let result_set: ResultSet = deps.iter().map(DependencyStatus::to_result_item).collect();

    let renderer = Renderer::with_config(render_config);
    println!("{}", renderer.render(&result_set));

    if deps.iter().any(|d| !d.available) {
        tracing::warn!("Some external tools are missing");
    }

    Ok(())
}
