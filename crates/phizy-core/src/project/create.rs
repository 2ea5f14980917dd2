//! Creating a new project from the base template

use super::manifest::ProjectManifest;
use crate::error::{Result, StackError};
use crate::interact::Progress;
use crate::runtime::PackageManager;
use crate::templates::{copy_dir, TemplateDir};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Inputs for [`create_project`]
pub struct CreateOptions<'a> {
    /// Directory the project is created in
    pub parent_dir: &'a Path,
    /// Project name, also used as the directory name
    pub name: &'a str,
    pub templates: &'a TemplateDir,
    pub packages: &'a dyn PackageManager,
    pub progress: &'a dyn Progress,
    /// Skip the final dependency install
    pub skip_install: bool,
}

/// Copy the base template into a fresh directory and register it as a project
///
/// Returns the new project directory.
pub async fn create_project(opts: &CreateOptions<'_>) -> Result<PathBuf> {
    let project_dir = opts.parent_dir.join(opts.name);
    if project_dir.exists() {
        return Err(StackError::ProjectExists(project_dir));
    }

    let package_name = project_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| opts.name.to_string());

    opts.progress.start("Creating new Phizy Stack project...");
    copy_dir(&opts.templates.base(), &project_dir).await?;

    rename_package(&project_dir.join("package.json"), &package_name)?;
    rename_package(&project_dir.join("package-lock.json"), &package_name)?;

    ProjectManifest::default().save(&project_dir)?;
    tracing::debug!("Created project at {}", project_dir.display());

    if !opts.skip_install {
        opts.progress.set_text("Installing dependencies...");
        if let Err(e) = opts.packages.install_all(&project_dir).await {
            opts.progress.fail("Failed to install dependencies.");
            return Err(e);
        }
    }

    opts.progress
        .succeed(&format!("Project {} created successfully.", opts.name));
    Ok(project_dir)
}

/// Set the `name` of a package.json or package-lock.json, if the file exists
fn rename_package(path: &Path, name: &str) -> Result<()> {
    if !path.is_file() {
        return Ok(());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| StackError::fs("Failed to read package file", path, e))?;
    let mut json: Value = serde_json::from_str(&content).map_err(|e| {
        StackError::fs(
            "Invalid package file",
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        )
    })?;

    if let Some(obj) = json.as_object_mut() {
        obj.insert("name".to_string(), Value::String(name.to_string()));
    }
    // Lockfile v2+ repeats the root package name under packages[""]
    if let Some(root) = json
        .get_mut("packages")
        .and_then(|p| p.get_mut(""))
        .and_then(Value::as_object_mut)
    {
        root.insert("name".to_string(), Value::String(name.to_string()));
    }

    let mut out = serde_json::to_string_pretty(&json).map_err(|e| {
        StackError::fs(
            "Failed to serialize package file",
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        )
    })?;
    out.push('\n');
    std::fs::write(path, out).map_err(|e| StackError::fs("Failed to write package file", path, e))
}
