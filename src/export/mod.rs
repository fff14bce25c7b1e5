//! Plugin package export
//!
//! Stages the plugin's files into a throwaway editor project laid out as
//! `Assets/<plugin_name>/...` and asks the editor to export that folder as a
//! package. The editor itself is behind [`PackageExporter`].

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::Builder;

use crate::core::error::{DocpackError, IoResultExt, Result};
use crate::core::paths::resolve_against;
use crate::core::util::{command_exists, copy_entry};

/// Folder of the staging project that gets exported
const EXPORT_ROOT: &str = "Assets";

/// Exports a staged project folder into a package file
pub trait PackageExporter {
    /// Tool name for logs and errors
    fn name(&self) -> String;

    /// Export `Assets` of `project` into `package`
    fn export(&self, project: &Path, package: &Path) -> Result<()>;
}

/// Runs the editor in batch mode with `-exportPackage`
#[derive(Debug, Clone)]
pub struct UnityExporter {
    editor: PathBuf,
}

impl UnityExporter {
    pub fn new(editor: impl Into<PathBuf>) -> Self {
        Self {
            editor: editor.into(),
        }
    }

    /// Check if the editor executable is available
    pub fn is_available(&self) -> bool {
        command_exists(&self.editor.to_string_lossy())
    }

    /// Full batch-mode command for exporting `project` into `package`
    pub fn command(&self, project: &Path, package: &Path) -> Command {
        let mut cmd = Command::new(&self.editor);
        cmd.arg("-batchmode")
            .arg("-nographics")
            .arg("-silent-crashes")
            .arg("-projectPath")
            .arg(project)
            .arg("-exportPackage")
            .arg(EXPORT_ROOT)
            .arg(package)
            .arg("-quit");
        cmd
    }
}

impl PackageExporter for UnityExporter {
    fn name(&self) -> String {
        self.editor.display().to_string()
    }

    fn export(&self, project: &Path, package: &Path) -> Result<()> {
        if !self.is_available() {
            return Err(DocpackError::ToolNotFound { tool: self.name() });
        }

        let mut cmd = self.command(project, package);
        tracing::info!("Running {:?}", cmd);

        let output = cmd.output().map_err(|e| DocpackError::io(&self.editor, e))?;
        if !output.status.success() {
            return Err(DocpackError::ToolFailed {
                tool: self.name(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

/// Copy each asset (file or directory, relative to `project_root`) into
/// `<staging>/Assets/<plugin_name>/<asset>`. Absolute assets keep only their
/// file name.
pub fn stage_package(
    project_root: &Path,
    assets: &[PathBuf],
    plugin_name: &str,
    staging: &Path,
) -> Result<PathBuf> {
    let plugin_dir = staging.join(EXPORT_ROOT).join(plugin_name);
    fs::create_dir_all(&plugin_dir).at(&plugin_dir)?;

    for asset in assets {
        let src = resolve_against(project_root, asset);
        let dest = if asset.is_absolute() {
            asset.file_name().map(PathBuf::from).unwrap_or_default()
        } else {
            asset.clone()
        };
        tracing::debug!("Staging {}", src.display());
        copy_entry(&src, &plugin_dir.join(dest))?;
    }

    Ok(plugin_dir)
}

/// Stage the plugin into a scoped temp project and export it to `package`.
///
/// Returns the package path. The temp project is removed on every path out.
pub fn export_package(
    exporter: &dyn PackageExporter,
    project_root: &Path,
    assets: &[PathBuf],
    plugin_name: &str,
    package: &Path,
) -> Result<PathBuf> {
    let staging = Builder::new()
        .prefix("package-export-")
        .tempdir()
        .at(std::env::temp_dir())?;

    stage_package(project_root, assets, plugin_name, staging.path())?;

    let package = resolve_against(project_root, package);
    if let Some(parent) = package.parent() {
        fs::create_dir_all(parent).at(parent)?;
    }

    exporter.export(staging.path(), &package)?;

    if !package.is_file() {
        return Err(DocpackError::MissingArtifact { path: package });
    }

    tracing::info!("Package written to {}", package.display());
    Ok(package)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::tempdir;

    /// Records the staged tree and writes a listing as the "package"
    #[derive(Default)]
    struct ListingExporter {
        staged: RefCell<Vec<String>>,
        project: RefCell<Option<PathBuf>>,
    }

    impl PackageExporter for ListingExporter {
        fn name(&self) -> String {
            "listing".to_string()
        }

        fn export(&self, project: &Path, package: &Path) -> Result<()> {
            let mut entries: Vec<String> = walkdir::WalkDir::new(project.join(EXPORT_ROOT))
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| {
                    e.path()
                        .strip_prefix(project)
                        .unwrap()
                        .to_string_lossy()
                        .replace('\\', "/")
                })
                .collect();
            entries.sort();
            fs::write(package, entries.join("\n")).unwrap();
            *self.staged.borrow_mut() = entries;
            *self.project.borrow_mut() = Some(project.to_path_buf());
            Ok(())
        }
    }

    fn write_project(root: &Path) {
        fs::create_dir_all(root.join("Assets/Scripts")).unwrap();
        fs::write(root.join("Assets/Scripts/Volume.cs"), "class Volume {}").unwrap();
        fs::write(root.join("README.md"), "readme").unwrap();
        fs::write(root.join("LICENSE"), "mit").unwrap();
    }

    #[test]
    fn test_stage_package_layout() {
        let temp = tempdir().unwrap();
        let project = temp.path().join("project");
        write_project(&project);
        let staging = temp.path().join("staging");

        let plugin_dir = stage_package(
            &project,
            &[PathBuf::from("Assets"), PathBuf::from("README.md")],
            "MyPlugin",
            &staging,
        )
        .unwrap();

        assert_eq!(plugin_dir, staging.join("Assets/MyPlugin"));
        assert!(plugin_dir.join("Assets/Scripts/Volume.cs").is_file());
        assert!(plugin_dir.join("README.md").is_file());
        assert!(!plugin_dir.join("LICENSE").exists());
    }

    #[test]
    fn test_stage_package_missing_asset() {
        let temp = tempdir().unwrap();
        let project = temp.path().join("project");
        write_project(&project);

        let err = stage_package(
            &project,
            &[PathBuf::from("DataFiles")],
            "MyPlugin",
            &temp.path().join("staging"),
        )
        .unwrap_err();

        assert_eq!(err.code(), "IO_ERROR");
        assert!(err.to_string().contains("DataFiles"));
    }

    #[test]
    fn test_export_package_with_exporter() {
        let temp = tempdir().unwrap();
        let project = temp.path().join("project");
        write_project(&project);

        let exporter = ListingExporter::default();
        let package = export_package(
            &exporter,
            &project,
            &[
                PathBuf::from("Assets"),
                PathBuf::from("LICENSE"),
                PathBuf::from("README.md"),
            ],
            "MyPlugin",
            Path::new("out/MyPlugin.unitypackage"),
        )
        .unwrap();

        assert_eq!(package, project.join("out/MyPlugin.unitypackage"));
        assert_eq!(
            *exporter.staged.borrow(),
            vec![
                "Assets/MyPlugin/Assets/Scripts/Volume.cs",
                "Assets/MyPlugin/LICENSE",
                "Assets/MyPlugin/README.md",
            ]
        );

        let staged_project = exporter.project.borrow().clone().unwrap();
        assert!(!staged_project.exists());
    }

    #[test]
    fn test_unity_command_line() {
        let exporter = UnityExporter::new("/opt/Unity/Editor/Unity");
        let cmd = exporter.command(Path::new("/tmp/proj"), Path::new("/out/P.unitypackage"));

        assert_eq!(cmd.get_program(), "/opt/Unity/Editor/Unity");
        let args: Vec<_> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "-batchmode",
                "-nographics",
                "-silent-crashes",
                "-projectPath",
                "/tmp/proj",
                "-exportPackage",
                "Assets",
                "/out/P.unitypackage",
                "-quit",
            ]
        );
    }

    #[test]
    fn test_unity_exporter_missing_editor() {
        let temp = tempdir().unwrap();
        let exporter = UnityExporter::new(temp.path().join("Unity"));
        assert!(!exporter.is_available());

        let err = exporter
            .export(temp.path(), &temp.path().join("P.unitypackage"))
            .unwrap_err();
        assert_eq!(err.code(), "TOOL_NOT_FOUND");
    }
}
