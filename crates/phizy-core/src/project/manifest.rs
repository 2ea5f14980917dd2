//! Project manifest (`.phizy-stack.json`) - the record of installed modules

use crate::error::{Result, StackError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the manifest at the project root
pub const MANIFEST_FILE: &str = ".phizy-stack.json";

/// Installed modules, in install order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectManifest {
    pub modules: Vec<String>,
}

impl ProjectManifest {
    pub fn path(project_root: &Path) -> PathBuf {
        project_root.join(MANIFEST_FILE)
    }

    /// Whether `project_root` looks like a phizy-stack project
    pub fn exists(project_root: &Path) -> bool {
        Self::path(project_root).is_file()
    }

    /// Read and validate the manifest
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = Self::path(project_root);
        let content = std::fs::read(&path)
            .map_err(|e| StackError::fs("Failed to read project manifest", &path, e))?;
        Self::parse(&content).map_err(|source| StackError::ConfigCorrupt { path, source })
    }

    // Invalid UTF-8 comes back as a serde_json error like any other bad content
    fn parse(content: &[u8]) -> std::result::Result<Self, serde_json::Error> {
        let manifest: ProjectManifest = serde_json::from_slice(content)?;

        let mut seen = std::collections::HashSet::new();
        for name in &manifest.modules {
            if !seen.insert(name.as_str()) {
                return Err(serde::de::Error::custom(format!(
                    "module \"{}\" is listed more than once",
                    name
                )));
            }
        }

        Ok(manifest)
    }

    /// Overwrite the manifest file with the current state
    pub fn save(&self, project_root: &Path) -> Result<()> {
        let path = Self::path(project_root);
        let content = serde_json::to_string_pretty(self).map_err(|source| {
            StackError::ConfigCorrupt {
                path: path.clone(),
                source,
            }
        })?;
        std::fs::write(&path, content + "\n")
            .map_err(|e| StackError::fs("Failed to write project manifest", &path, e))?;
        tracing::debug!("Saved manifest: [{}]", self.modules.join(", "));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.iter().any(|m| m == name)
    }

    /// Record a module as installed; already-listed names are left alone
    pub fn insert(&mut self, name: &str) {
        if !self.contains(name) {
            self.modules.push(name.to_string());
        }
    }

    /// Forget a module; returns whether it was listed
    pub fn strike(&mut self, name: &str) -> bool {
        let before = self.modules.len();
        self.modules.retain(|m| m != name);
        self.modules.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_manifest() {
        let dir = TempDir::new().unwrap();
        assert!(!ProjectManifest::exists(dir.path()));
        assert!(matches!(
            ProjectManifest::load(dir.path()),
            Err(StackError::FileSystem { .. })
        ));
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let manifest = ProjectManifest {
            modules: vec!["email".into(), "database".into(), "auth".into()],
        };
        manifest.save(dir.path()).unwrap();

        assert!(ProjectManifest::exists(dir.path()));
        assert_eq!(ProjectManifest::load(dir.path()).unwrap(), manifest);
    }

    #[test]
    fn test_saved_format_is_pretty_json() {
        let dir = TempDir::new().unwrap();
        ProjectManifest {
            modules: vec!["database".into()],
        }
        .save(dir.path())
        .unwrap();

        let raw = std::fs::read_to_string(ProjectManifest::path(dir.path())).unwrap();
        assert_eq!(raw, "{\n  \"modules\": [\n    \"database\"\n  ]\n}\n");
    }

    #[test]
    fn test_corrupt_manifests_rejected() {
        let dir = TempDir::new().unwrap();
        let bad_inputs: [&[u8]; 7] = [
            b"not json",
            b"{}",
            b"{\"modules\": \"auth\"}",
            b"{\"modules\": [1, 2]}",
            b"{\"modules\": [\"auth\", \"auth\"]}",
            b"{\"modules\": [], \"extra\": true}",
            &[0xff, 0xfe, b'{'],
        ];
        for bad in bad_inputs {
            std::fs::write(ProjectManifest::path(dir.path()), bad).unwrap();
            assert!(
                matches!(
                    ProjectManifest::load(dir.path()),
                    Err(StackError::ConfigCorrupt { .. })
                ),
                "expected corrupt error for {:?}",
                String::from_utf8_lossy(bad)
            );
        }
    }

    #[test]
    fn test_insert_and_strike() {
        let mut manifest = ProjectManifest::default();
        manifest.insert("database");
        manifest.insert("database");
        manifest.insert("auth");
        assert_eq!(manifest.modules, vec!["database", "auth"]);

        assert!(manifest.strike("database"));
        assert!(!manifest.strike("database"));
        assert_eq!(manifest.modules, vec!["auth"]);
    }
}
