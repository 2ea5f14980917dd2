//! Settings resolved from command-line flags, environment variables and detection

use super::package_manager::PackageManagerKind;
use crate::error::{Result, StackError};
use crate::templates::TemplateDir;
use std::path::PathBuf;

/// Environment variable overriding the template directory
pub const TEMPLATE_DIR_ENV: &str = "PHIZY_TEMPLATE_DIR";

/// Environment variable overriding the package manager
pub const PACKAGE_MANAGER_ENV: &str = "PHIZY_PACKAGE_MANAGER";

/// Values given explicitly on the command line; `None` means "not given"
#[derive(Debug, Clone, Default)]
pub struct SettingsArgs {
    pub project_dir: Option<PathBuf>,
    pub template_dir: Option<PathBuf>,
    pub package_manager: Option<PackageManagerKind>,
    pub yes: bool,
}

/// Fully resolved settings for one CLI invocation
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding `.phizy-stack.json` (or where `create` puts new projects)
    pub project_root: PathBuf,
    pub templates: TemplateDir,
    pub package_manager: PackageManagerKind,
    /// Auto-confirm all prompts
    pub assume_yes: bool,
}

impl Settings {
    /// Resolve settings against the process environment
    pub fn resolve(args: SettingsArgs) -> Result<Self> {
        Self::resolve_with(args, |key| std::env::var(key).ok())
    }

    /// Resolve settings with an explicit environment lookup
    ///
    /// Precedence for each value: flag, then environment variable, then detection.
    pub fn resolve_with<F>(args: SettingsArgs, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_root = match args.project_dir {
            Some(dir) => dir,
            None => std::env::current_dir()
                .map_err(|e| StackError::fs("Failed to read current directory", ".", e))?,
        };

        let template_root = args
            .template_dir
            .or_else(|| env(TEMPLATE_DIR_ENV).map(PathBuf::from))
            .or_else(TemplateDir::locate)
            .unwrap_or_else(|| {
                // Copying from here fails later with a clear "not found" error
                tracing::warn!("No template directory found; set {}", TEMPLATE_DIR_ENV);
                project_root.join("templates")
            });

        let package_manager = match args.package_manager {
            Some(kind) => kind,
            None => match env(PACKAGE_MANAGER_ENV) {
                Some(value) => PackageManagerKind::parse(&value).unwrap_or_else(|| {
                    tracing::warn!(
                        "Ignoring unknown {} value '{}'",
                        PACKAGE_MANAGER_ENV,
                        value
                    );
                    PackageManagerKind::detect(&project_root).unwrap_or_default()
                }),
                None => PackageManagerKind::detect(&project_root).unwrap_or_default(),
            },
        };

        Ok(Self {
            project_root,
            templates: TemplateDir::new(template_root),
            package_manager,
            assume_yes: args.yes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(root: &TempDir) -> SettingsArgs {
        SettingsArgs {
            project_dir: Some(root.path().to_path_buf()),
            template_dir: Some(PathBuf::from("/opt/phizy/templates")),
            ..Default::default()
        }
    }

    #[test]
    fn test_flag_wins_over_env() {
        let root = TempDir::new().unwrap();
        let mut a = args(&root);
        a.package_manager = Some(PackageManagerKind::Bun);

        let settings = Settings::resolve_with(a, |key| match key {
            PACKAGE_MANAGER_ENV => Some("pnpm".to_string()),
            TEMPLATE_DIR_ENV => Some("/elsewhere".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(settings.package_manager, PackageManagerKind::Bun);
        assert_eq!(
            settings.templates.root(),
            PathBuf::from("/opt/phizy/templates").as_path()
        );
    }

    #[test]
    fn test_env_used_when_no_flag() {
        let root = TempDir::new().unwrap();
        let mut a = args(&root);
        a.template_dir = None;

        let settings = Settings::resolve_with(a, |key| match key {
            PACKAGE_MANAGER_ENV => Some("yarn".to_string()),
            TEMPLATE_DIR_ENV => Some("/from/env".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(settings.package_manager, PackageManagerKind::Yarn);
        assert_eq!(settings.templates.root(), PathBuf::from("/from/env").as_path());
    }

    #[test]
    fn test_lockfile_detection_and_default() {
        let root = TempDir::new().unwrap();
        let settings = Settings::resolve_with(args(&root), |_| None).unwrap();
        assert_eq!(settings.package_manager, PackageManagerKind::Npm);

        std::fs::write(root.path().join("yarn.lock"), "").unwrap();
        let settings = Settings::resolve_with(args(&root), |_| None).unwrap();
        assert_eq!(settings.package_manager, PackageManagerKind::Yarn);
    }

    #[test]
    fn test_unknown_env_manager_falls_back() {
        let root = TempDir::new().unwrap();
        let settings = Settings::resolve_with(args(&root), |key| {
            (key == PACKAGE_MANAGER_ENV).then(|| "cargo".to_string())
        })
        .unwrap();
        assert_eq!(settings.package_manager, PackageManagerKind::Npm);
    }
}
