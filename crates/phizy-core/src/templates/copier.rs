//! Recursive template directory copying

use crate::error::{Result, StackError};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Copy every file and directory under `source` into `destination`
///
/// Intermediate directories are created as needed and existing files are
/// overwritten. Returns the copied file paths relative to `destination`.
pub async fn copy_dir(source: &Path, destination: &Path) -> Result<Vec<PathBuf>> {
    if !source.is_dir() {
        return Err(StackError::fs(
            "Template directory not found",
            source,
            std::io::Error::from(std::io::ErrorKind::NotFound),
        ));
    }

    fs::create_dir_all(destination)
        .await
        .map_err(|e| StackError::fs("Failed to create directory", destination, e))?;

    let mut copied = Vec::new();

    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(source).to_path_buf();
            StackError::fs("Failed to read template directory", path, e.into())
        })?;

        // Entries always live under `source`
        let relative = match entry.path().strip_prefix(source) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => continue,
        };
        let target = destination.join(&relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .await
                .map_err(|e| StackError::fs("Failed to create directory", &target, e))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StackError::fs("Failed to create directory", parent, e))?;
            }
            fs::copy(entry.path(), &target)
                .await
                .map_err(|e| StackError::fs("Failed to copy file", entry.path(), e))?;
            copied.push(relative);
        }
    }

    tracing::debug!(
        "Copied {} files from {} to {}",
        copied.len(),
        source.display(),
        destination.display()
    );

    Ok(copied)
}
