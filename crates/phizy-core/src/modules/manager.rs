//! Dependency-aware module installation and removal
//!
//! The manager owns the add/remove protocols. It never rolls back: every
//! successful step is written to the project manifest immediately, so an
//! interrupted cascade leaves a manifest that matches what actually happened.

use super::registry::ModuleRegistry;
use super::{Module, ModuleContext};
use crate::error::{HookPhase, Result, StackError};
use crate::interact::show_list;
use crate::project::ProjectManifest;

/// Follow-up instructions returned by one module's `initialize` hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextSteps {
    pub module: String,
    pub text: String,
}

/// Result of a successful add
#[derive(Debug, Default)]
pub struct AddOutcome {
    /// Modules installed by this call, dependencies first
    pub installed: Vec<String>,
    /// Instructions to show the user, in install order
    pub next_steps: Vec<NextSteps>,
}

/// Result of a successful remove
#[derive(Debug, Default)]
pub struct RemoveOutcome {
    /// Modules removed by this call, in removal order (target last)
    pub removed: Vec<String>,
}

/// Installs and removes modules in one project
pub struct ModuleManager<'a> {
    registry: &'a ModuleRegistry,
    ctx: ModuleContext<'a>,
}

impl<'a> ModuleManager<'a> {
    pub fn new(registry: &'a ModuleRegistry, ctx: ModuleContext<'a>) -> Self {
        Self { registry, ctx }
    }

    pub fn registry(&self) -> &ModuleRegistry {
        self.registry
    }

    fn load_manifest(&self) -> Result<ProjectManifest> {
        if !ProjectManifest::exists(self.ctx.project_root) {
            return Err(StackError::NotAProject {
                root: self.ctx.project_root.to_path_buf(),
            });
        }
        ProjectManifest::load(self.ctx.project_root)
    }

    /// Add `name` to the project, installing missing dependencies first
    pub async fn add(&self, name: &str) -> Result<AddOutcome> {
        let module = self.registry.resolve(name)?;
        let mut manifest = self.load_manifest()?;

        if manifest.contains(name) {
            return Err(StackError::AlreadyInstalled(name.to_string()));
        }

        let new_dependencies: Vec<&str> = module
            .dependencies()
            .iter()
            .copied()
            .filter(|dep| !manifest.contains(dep))
            .collect();

        if !new_dependencies.is_empty() {
            show_list(
                self.ctx.progress,
                "The following dependencies will be installed:",
                &new_dependencies,
            );
            if !self
                .ctx
                .prompter
                .confirm("Do you want to proceed with installation?")?
            {
                return Err(StackError::Cancelled(format!(
                    "Installation of \"{}\" cancelled by user.",
                    name
                )));
            }
        }

        let mut outcome = AddOutcome::default();

        for dep in new_dependencies {
            let dep_module = self.registry.resolve(dep)?;
            tracing::debug!("Installing dependency '{}' of '{}'", dep, name);
            self.install_one(dep_module, &mut manifest, &mut outcome)
                .await?;
            self.ctx
                .progress
                .succeed(&format!("Dependency \"{}\" added successfully.", dep));
        }

        self.install_one(module, &mut manifest, &mut outcome).await?;
        self.ctx
            .progress
            .succeed(&format!("Module \"{}\" added successfully.", name));

        Ok(outcome)
    }

    async fn install_one(
        &self,
        module: &dyn Module,
        manifest: &mut ProjectManifest,
        outcome: &mut AddOutcome,
    ) -> Result<()> {
        let name = module.name();
        self.ctx
            .progress
            .start(&format!("Adding module: {}...", name));

        let steps = match module.initialize(&self.ctx).await {
            Ok(steps) => steps,
            Err(e) => return Err(self.hook_failed(name, HookPhase::Initialize, e)),
        };

        manifest.insert(name);
        manifest.save(self.ctx.project_root)?;

        outcome.installed.push(name.to_string());
        if let Some(text) = steps {
            outcome.next_steps.push(NextSteps {
                module: name.to_string(),
                text,
            });
        }
        Ok(())
    }

    /// Remove `name` from the project
    ///
    /// Modules that depend on `name` are offered for removal first, then the
    /// installed dependencies of `name`; each is confirmed individually.
    pub async fn remove(&self, name: &str) -> Result<RemoveOutcome> {
        let module = self.registry.resolve(name)?;
        let mut manifest = self.load_manifest()?;

        if !manifest.contains(name) {
            return Err(StackError::NotInstalled(name.to_string()));
        }

        let mut outcome = RemoveOutcome::default();

        let dependents: Vec<String> = self
            .registry
            .dependents_of(name, &manifest.modules)
            .into_iter()
            .map(str::to_string)
            .collect();

        if !dependents.is_empty() {
            show_list(
                self.ctx.progress,
                "The following modules depend on this module:",
                &dependents,
            );
            for dependent in self.confirm_each(&dependents)? {
                self.remove_one(&dependent, &mut manifest, &mut outcome)
                    .await?;
            }
        }

        let installed_dependencies: Vec<&str> = module
            .dependencies()
            .iter()
            .copied()
            .filter(|dep| manifest.contains(dep))
            .collect();

        if !installed_dependencies.is_empty() {
            let mut removable = Vec::new();
            for dep in installed_dependencies {
                let still_needed_by: Vec<&str> = self
                    .registry
                    .dependents_of(dep, &manifest.modules)
                    .into_iter()
                    .filter(|other| *other != name)
                    .collect();
                if still_needed_by.is_empty() {
                    removable.push(dep.to_string());
                } else {
                    tracing::debug!("Keeping shared dependency '{}'", dep);
                    self.ctx.progress.info(&format!(
                        "Keeping \"{}\": still required by {}",
                        dep,
                        still_needed_by.join(", ")
                    ));
                }
            }

            if !removable.is_empty() {
                show_list(
                    self.ctx.progress,
                    "This module has the following dependencies installed:",
                    &removable,
                );
                for dep in self.confirm_each(&removable)? {
                    self.remove_one(&dep, &mut manifest, &mut outcome).await?;
                }
            }
        }

        self.remove_one(name, &mut manifest, &mut outcome).await?;

        Ok(outcome)
    }

    /// Ask about each candidate before touching anything; returns the accepted ones
    fn confirm_each(&self, candidates: &[String]) -> Result<Vec<String>> {
        let mut accepted = Vec::new();
        for candidate in candidates {
            let question = format!("Do you want to remove \"{}\" as well?", candidate);
            if self.ctx.prompter.confirm(&question)? {
                accepted.push(candidate.clone());
            }
        }
        Ok(accepted)
    }

    /// Remove one module without cascading: run its hook, then forget it
    async fn remove_one(
        &self,
        name: &str,
        manifest: &mut ProjectManifest,
        outcome: &mut RemoveOutcome,
    ) -> Result<()> {
        let module = self.registry.resolve(name)?;
        if !manifest.contains(name) {
            return Err(StackError::NotInstalled(name.to_string()));
        }

        tracing::debug!("Removing module '{}'", name);
        self.ctx
            .progress
            .start(&format!("Removing module: {}...", name));

        if let Err(e) = module.remove(&self.ctx).await {
            return Err(self.hook_failed(name, HookPhase::Remove, e));
        }

        manifest.strike(name);
        manifest.save(self.ctx.project_root)?;
        outcome.removed.push(name.to_string());

        self.ctx
            .progress
            .succeed(&format!("Module \"{}\" removed successfully.", name));
        Ok(())
    }

    fn hook_failed(&self, name: &str, phase: HookPhase, err: StackError) -> StackError {
        if err.is_cancelled() {
            self.ctx.progress.warn(&err.to_string());
        } else {
            self.ctx
                .progress
                .fail(&format!("Failed to {} module \"{}\".", phase, name));
        }
        StackError::hook(name, phase, err)
    }
}
