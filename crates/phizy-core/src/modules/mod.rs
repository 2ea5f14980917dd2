//! Optional project modules and the engine that installs and removes them
//!
//! - [`Module`] - a named unit with `initialize`/`remove` hooks and a declared
//!   dependency list
//! - [`ModuleRegistry`] - the statically registered set of modules
//! - [`ModuleManager`] - dependency-aware add/remove against a project manifest
//! - [`cleanup`] - shared removal logic used by module `remove` hooks

pub mod builtin;
pub mod cleanup;
pub mod manager;
pub mod registry;

use crate::error::Result;
use crate::interact::{Progress, Prompter};
use crate::project::env::ENV_FILE;
use crate::runtime::PackageManager;
use crate::templates::TemplateDir;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub use cleanup::{cleanup, CleanupPlan};
pub use manager::{AddOutcome, ModuleManager, NextSteps, RemoveOutcome};
pub use registry::{ModuleRegistry, RegistryBuilder};

/// A module that can be layered onto a project
#[async_trait(?Send)]
pub trait Module {
    /// Unique name used on the command line and in the manifest
    fn name(&self) -> &'static str;

    /// One-line summary shown by `phizy-stack modules`
    fn description(&self) -> &'static str;

    /// Modules that must be installed for this one to work
    fn dependencies(&self) -> &'static [&'static str] {
        &[]
    }

    /// Install the module into the project
    ///
    /// Returns follow-up instructions for the user, if any.
    async fn initialize(&self, ctx: &ModuleContext<'_>) -> Result<Option<String>>;

    /// Remove the module from the project
    async fn remove(&self, ctx: &ModuleContext<'_>) -> Result<()>;
}

/// Everything a module hook may touch
#[derive(Clone, Copy)]
pub struct ModuleContext<'a> {
    pub project_root: &'a Path,
    pub templates: &'a TemplateDir,
    pub packages: &'a dyn PackageManager,
    pub prompter: &'a dyn Prompter,
    pub progress: &'a dyn Progress,
}

impl ModuleContext<'_> {
    /// Resolve a project-relative path
    pub fn path(&self, relative: &str) -> PathBuf {
        self.project_root.join(relative)
    }

    pub fn env_path(&self) -> PathBuf {
        self.project_root.join(ENV_FILE)
    }
}
