//! Template location and copying
//!
//! Templates live in a single directory tree:
//! - `base/` - the project skeleton used by `create`
//! - `modules/<name>/` - files layered onto a project when a module is added

pub mod copier;

use std::path::{Path, PathBuf};

pub use copier::copy_dir;

/// Root of the template tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDir {
    root: PathBuf,
}

impl TemplateDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Project skeleton copied by `create`
    pub fn base(&self) -> PathBuf {
        self.root.join("base")
    }

    /// Template tree for a single module
    pub fn module(&self, name: &str) -> PathBuf {
        self.root.join("modules").join(name)
    }

    /// Find a template directory without any explicit configuration
    ///
    /// Looks next to the executable first (release archives ship `templates/`
    /// beside the binary), then in the source tree this crate was built from.
    pub fn locate() -> Option<PathBuf> {
        let mut candidates = Vec::new();

        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                candidates.push(dir.join("templates"));
                candidates.push(dir.join("../share/phizy-stack/templates"));
            }
        }
        candidates.push(Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates"));

        candidates
            .into_iter()
            .find(|candidate| candidate.join("base").is_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_paths() {
        let templates = TemplateDir::new("/srv/templates");
        assert_eq!(templates.base(), PathBuf::from("/srv/templates/base"));
        assert_eq!(
            templates.module("auth"),
            PathBuf::from("/srv/templates/modules/auth")
        );
    }

    #[test]
    fn test_locate_finds_source_tree() {
        // The workspace ships templates/base, so the source-tree fallback resolves
        let located = TemplateDir::locate().expect("templates should be found");
        assert!(located.join("base").is_dir());
    }
}
