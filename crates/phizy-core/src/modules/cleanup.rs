//! Shared removal logic for module `remove` hooks

use super::ModuleContext;
use crate::error::{Result, StackError};
use crate::project::env;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Directories never pruned, even when empty (relative to the project root)
const PROTECTED_DIRS: &[&str] = &["public"];

/// What a module leaves behind and must take away on removal
#[derive(Debug, Clone, Default)]
pub struct CleanupPlan<'a> {
    pub packages: &'a [&'a str],
    /// Files and directories, relative to the project root
    pub paths: &'a [&'a str],
    pub env_keys: &'a [&'a str],
}

/// Show the plan, confirm once, then uninstall, delete, prune and strip env keys
///
/// Declining returns [`StackError::Cancelled`], which aborts the whole remove.
pub async fn cleanup(ctx: &ModuleContext<'_>, plan: &CleanupPlan<'_>) -> Result<()> {
    let progress = ctx.progress;

    progress.info("The following will be removed:");
    if !plan.packages.is_empty() {
        progress.info(&format!("- Packages: {}", plan.packages.join(", ")));
    }
    for path in plan.paths {
        progress.info(&format!("- {}", path));
    }
    if !plan.env_keys.is_empty() {
        progress.info(&format!("- Remove {} from .env", plan.env_keys.join(", ")));
    }

    if !ctx.prompter.confirm("Continue with removal?")? {
        return Err(StackError::Cancelled("Removal cancelled.".to_string()));
    }

    if !plan.packages.is_empty() {
        progress.start("Uninstalling packages...");
        ctx.packages.uninstall(ctx.project_root, plan.packages).await?;
    }

    progress.set_text("Deleting files...");
    let mut candidates: Vec<PathBuf> = Vec::new();
    for relative in plan.paths {
        let path = ctx.path(relative);
        delete_path(&path).await?;
        if let Some(parent) = path.parent() {
            if parent != ctx.project_root && !candidates.iter().any(|c| c == parent) {
                candidates.push(parent.to_path_buf());
            }
        }
    }

    prune_empty_dirs(ctx, candidates).await?;

    if !plan.env_keys.is_empty() {
        env::remove_keys(&ctx.env_path(), plan.env_keys).await?;
    }

    Ok(())
}

/// Delete a file or directory tree; a missing path is fine
async fn delete_path(path: &Path) -> Result<()> {
    let result = match fs::symlink_metadata(path).await {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path).await,
        Ok(_) => fs::remove_file(path).await,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => {
            tracing::debug!("Deleted {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StackError::fs("Failed to delete", path, e)),
    }
}

/// Offer to delete directories left empty, walking upwards from each candidate
///
/// The walk never leaves the project and never touches protected directories.
/// A declined directory ends that branch.
async fn prune_empty_dirs(ctx: &ModuleContext<'_>, candidates: Vec<PathBuf>) -> Result<()> {
    let root = ctx.project_root;
    let protected: Vec<PathBuf> = PROTECTED_DIRS.iter().map(|d| root.join(d)).collect();

    // Reverse so candidates are visited in the order the paths were listed
    let mut worklist: Vec<PathBuf> = candidates.into_iter().rev().collect();

    while let Some(dir) = worklist.pop() {
        if dir == root || !dir.starts_with(root) || protected.contains(&dir) || !dir.is_dir() {
            continue;
        }

        let first_entry = match fs::read_dir(&dir).await {
            Ok(mut entries) => entries.next_entry().await,
            Err(e) => Err(e),
        };
        let is_empty = match first_entry {
            Ok(entry) => entry.is_none(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", dir.display(), e);
                ctx.progress
                    .warn(&format!("Error checking directory {}: {}", dir.display(), e));
                continue;
            }
        };
        if !is_empty {
            continue;
        }

        let display = dir.strip_prefix(root).unwrap_or(&dir).display().to_string();
        let question = format!("Directory \"{}\" is now empty. Remove it?", display);
        if !ctx.prompter.confirm(&question)? {
            continue;
        }

        fs::remove_dir(&dir)
            .await
            .map_err(|e| StackError::fs("Failed to remove directory", &dir, e))?;
        tracing::debug!("Pruned empty directory {}", dir.display());

        if let Some(parent) = dir.parent() {
            worklist.push(parent.to_path_buf());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingPackages, RecordingProgress, ScriptedPrompter};
    use crate::templates::TemplateDir;
    use tempfile::TempDir;

    struct Project {
        dir: TempDir,
        templates: TemplateDir,
        packages: RecordingPackages,
        progress: RecordingProgress,
    }

    impl Project {
        fn new() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
                templates: TemplateDir::new("/unused"),
                packages: RecordingPackages::default(),
                progress: RecordingProgress::default(),
            }
        }

        fn write(&self, relative: &str, content: &str) {
            let path = self.dir.path().join(relative);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }

        fn exists(&self, relative: &str) -> bool {
            self.dir.path().join(relative).exists()
        }

        fn ctx<'a>(&'a self, prompter: &'a ScriptedPrompter) -> ModuleContext<'a> {
            ModuleContext {
                project_root: self.dir.path(),
                templates: &self.templates,
                packages: &self.packages,
                prompter,
                progress: &self.progress,
            }
        }
    }

    const PLAN: CleanupPlan<'static> = CleanupPlan {
        packages: &["resend", "@react-email/components"],
        paths: &["templates/emails", "lib/email.ts"],
        env_keys: &["RESEND_API_KEY"],
    };

    #[tokio::test]
    async fn test_decline_changes_nothing() {
        let p = Project::new();
        p.write("lib/email.ts", "send");
        p.write(".env", "RESEND_API_KEY=\"k\"\n");
        let prompter = ScriptedPrompter::new(&[false]);

        let err = cleanup(&p.ctx(&prompter), &PLAN).await.unwrap_err();

        assert!(err.is_cancelled());
        assert!(p.exists("lib/email.ts"));
        assert!(p.packages.commands().is_empty());
        assert!(p.progress.contains("- Packages: resend, @react-email/components"));
    }

    #[tokio::test]
    async fn test_full_cleanup() {
        let p = Project::new();
        p.write("templates/emails/welcome.tsx", "hi");
        p.write("lib/email.ts", "send");
        p.write("lib/utils.ts", "keep");
        p.write(".env", "# Email\nRESEND_API_KEY=\"k\"\nDATABASE_URL=\"pg\"\n");
        // Only "templates" ends up empty; lib still has utils.ts
        let prompter = ScriptedPrompter::new(&[true, true]);

        cleanup(&p.ctx(&prompter), &PLAN).await.unwrap();

        assert_eq!(
            p.packages.commands(),
            vec!["uninstall resend @react-email/components"]
        );
        assert!(!p.exists("templates/emails"));
        assert!(!p.exists("templates"));
        assert!(!p.exists("lib/email.ts"));
        assert!(p.exists("lib/utils.ts"));
        assert_eq!(
            std::fs::read_to_string(p.dir.path().join(".env")).unwrap(),
            "# Email\nDATABASE_URL=\"pg\"\n"
        );
        assert_eq!(
            prompter.asked(),
            vec![
                "Continue with removal?",
                "Directory \"templates\" is now empty. Remove it?",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_paths_are_tolerated() {
        let p = Project::new();
        let prompter = ScriptedPrompter::new(&[true]);

        cleanup(&p.ctx(&prompter), &PLAN).await.unwrap();

        assert!(!p.exists(".env"));
        assert_eq!(prompter.remaining(), 0);
    }

    #[tokio::test]
    async fn test_prune_walks_upwards_until_declined() {
        let p = Project::new();
        p.write("app/api/auth/route.ts", "handler");
        p.write("app/page.tsx", "page");
        let plan = CleanupPlan {
            paths: &["app/api/auth"],
            ..Default::default()
        };
        // confirm, remove app/api, app is not empty so the walk stops there
        let prompter = ScriptedPrompter::new(&[true, true]);

        cleanup(&p.ctx(&prompter), &plan).await.unwrap();

        assert!(!p.exists("app/api"));
        assert!(p.exists("app/page.tsx"));
        assert_eq!(prompter.remaining(), 0);
    }

    #[tokio::test]
    async fn test_declined_directory_stops_branch() {
        let p = Project::new();
        p.write("components/auth/form.tsx", "form");
        let plan = CleanupPlan {
            paths: &["components/auth"],
            ..Default::default()
        };
        let prompter = ScriptedPrompter::new(&[true, false]);

        cleanup(&p.ctx(&prompter), &plan).await.unwrap();

        assert!(!p.exists("components/auth"));
        assert!(p.exists("components"));
    }

    #[tokio::test]
    async fn test_protected_directory_never_pruned() {
        let p = Project::new();
        p.write("public/github.svg", "<svg/>");
        let plan = CleanupPlan {
            paths: &["public/github.svg"],
            ..Default::default()
        };
        let prompter = ScriptedPrompter::new(&[true]);

        cleanup(&p.ctx(&prompter), &plan).await.unwrap();

        assert!(!p.exists("public/github.svg"));
        assert!(p.exists("public"));
        assert_eq!(prompter.asked().len(), 1);
    }
}
