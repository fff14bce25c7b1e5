//! Common utilities

use std::fs;
use std::path::Path;

use walkdir::WalkDir;
use xxhash_rust::xxh3::xxh3_64;

use crate::core::error::{DocpackError, IoResultExt, Result};

/// Compute hash of bytes
pub fn hash_bytes(data: &[u8]) -> String {
    format!("{:016x}", xxh3_64(data))
}

/// Compute hash of file content
pub fn hash_file(path: &Path) -> Result<String> {
    let data = fs::read(path).at(path)?;
    Ok(hash_bytes(&data))
}

/// Get file size in bytes
pub fn get_file_size(path: &Path) -> std::io::Result<u64> {
    let metadata = fs::metadata(path)?;
    Ok(metadata.len())
}

/// Check if a command is available in PATH
pub fn command_exists(cmd: &str) -> bool {
    let path = Path::new(cmd);
    if path.components().count() > 1 {
        return path.is_file();
    }

    std::process::Command::new("which")
        .arg(cmd)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Copy a file, or a directory recursively, to `dst`.
///
/// Parent directories of `dst` are created as needed. Existing files are
/// overwritten.
pub fn copy_entry(src: &Path, dst: &Path) -> Result<()> {
    let metadata = fs::metadata(src).at(src)?;

    if !metadata.is_dir() {
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent).at(parent)?;
        }
        fs::copy(src, dst).at(src)?;
        return Ok(());
    }

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            DocpackError::io(path, e.into())
        })?;

        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).at(&target)?;
        } else {
            fs::copy(entry.path(), &target).at(entry.path())?;
        }
    }

    Ok(())
}

/// Move a file, falling back to copy + remove when rename crosses filesystems
pub fn move_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).at(parent)?;
        }
    }

    if fs::rename(src, dst).is_ok() {
        return Ok(());
    }

    fs::copy(src, dst).at(dst)?;
    fs::remove_file(src).at(src)?;
    Ok(())
}
