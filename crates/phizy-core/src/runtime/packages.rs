//! Package manager invocation
//!
//! Commands run in the project root and are awaited to completion. There is
//! no timeout and no retry: a non-zero exit is reported as
//! [`StackError::Command`] with the captured stderr.

use crate::config::PackageManagerKind;
use crate::error::{Result, StackError};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// Installs and removes packages in a project
#[async_trait(?Send)]
pub trait PackageManager {
    /// Add packages to the project's dependencies
    async fn install(&self, project_root: &Path, packages: &[&str]) -> Result<()>;

    /// Remove packages from the project's dependencies
    async fn uninstall(&self, project_root: &Path, packages: &[&str]) -> Result<()>;

    /// Run a package binary, like `npx prisma init`
    async fn exec(&self, project_root: &Path, program: &str, args: &[&str]) -> Result<()>;

    /// Install everything listed in package.json
    async fn install_all(&self, project_root: &Path) -> Result<()>;

    /// Human-readable name of the package manager
    fn name(&self) -> &str;
}

/// Runs npm, pnpm, yarn or bun as a child process
#[derive(Debug, Clone, Copy)]
pub struct NodePackageManager {
    kind: PackageManagerKind,
}

impl NodePackageManager {
    pub fn new(kind: PackageManagerKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> PackageManagerKind {
        self.kind
    }

    async fn run(&self, project_root: &Path, program: &str, args: &[&str]) -> Result<()> {
        let command_line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        tracing::debug!("Running `{}` in {}", command_line, project_root.display());

        let output = TokioCommand::new(program)
            .args(args)
            .current_dir(project_root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                StackError::fs(format!("Failed to run `{}`", command_line), project_root, e)
            })?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            tracing::trace!("{}: {}", program, line);
        }

        if output.status.success() {
            Ok(())
        } else {
            Err(StackError::Command {
                command: command_line,
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}

#[async_trait(?Send)]
impl PackageManager for NodePackageManager {
    async fn install(&self, project_root: &Path, packages: &[&str]) -> Result<()> {
        if packages.is_empty() {
            return Ok(());
        }
        let mut args = vec![self.kind.add_subcommand()];
        args.extend_from_slice(packages);
        self.run(project_root, self.kind.program(), &args).await
    }

    async fn uninstall(&self, project_root: &Path, packages: &[&str]) -> Result<()> {
        if packages.is_empty() {
            return Ok(());
        }
        let mut args = vec![self.kind.remove_subcommand()];
        args.extend_from_slice(packages);
        self.run(project_root, self.kind.program(), &args).await
    }

    async fn exec(&self, project_root: &Path, program: &str, args: &[&str]) -> Result<()> {
        let (runner, prefix) = self.kind.exec_prefix();
        let mut full_args: Vec<&str> = prefix.to_vec();
        full_args.push(program);
        full_args.extend_from_slice(args);
        self.run(project_root, runner, &full_args).await
    }

    async fn install_all(&self, project_root: &Path) -> Result<()> {
        self.run(project_root, self.kind.program(), &["install"]).await
    }

    fn name(&self) -> &str {
        self.kind.program()
    }
}
