//! Command runners behind `create`, `add`, `remove` and `modules`

use super::console::Console;
use crate::config::Settings;
use crate::error::{Result, StackError};
use crate::interact::{AutoConfirm, Prompter};
use crate::modules::{ModuleContext, ModuleManager, ModuleRegistry, NextSteps};
use crate::project::{create_project, CreateOptions, ProjectManifest};
use crate::runtime::{NodePackageManager, PackageManager};
use colored::Colorize;

fn intro() -> Result<()> {
    cliclack::intro("phizy-stack".bold().to_string()).map_err(StackError::Prompt)
}

fn outro(message: &str) -> Result<()> {
    cliclack::outro(message).map_err(StackError::Prompt)
}

/// Create a new project directory from the base template
pub async fn run_create(settings: &Settings, name: &str, skip_install: bool) -> Result<()> {
    intro()?;

    let console = Console::new();
    let packages = NodePackageManager::new(settings.package_manager);

    create_project(&CreateOptions {
        parent_dir: &settings.project_root,
        name,
        templates: &settings.templates,
        packages: &packages,
        progress: &console,
        skip_install,
    })
    .await?;

    let pm = packages.name();
    println!();
    println!("  Next steps");
    println!();
    println!("  1.  cd {}", name);
    if skip_install {
        println!("  2.  {} install", pm);
        println!("  3.  {} run dev", pm);
    } else {
        println!("  2.  {} run dev", pm);
    }

    outro("Happy coding!")
}

/// Add a module (and its missing dependencies) to the current project
pub async fn run_add(registry: &ModuleRegistry, settings: &Settings, name: &str) -> Result<()> {
    intro()?;

    let console = Console::new();
    let packages = NodePackageManager::new(settings.package_manager);
    let prompter: &dyn Prompter = if settings.assume_yes {
        &AutoConfirm
    } else {
        &console
    };

    let manager = ModuleManager::new(
        registry,
        ModuleContext {
            project_root: &settings.project_root,
            templates: &settings.templates,
            packages: &packages,
            prompter,
            progress: &console,
        },
    );

    let outcome = manager.add(name).await?;
    print_next_steps(&outcome.next_steps);

    outro(&format!("Added {}", outcome.installed.join(", ")))
}

/// Remove a module from the current project, offering to cascade
pub async fn run_remove(registry: &ModuleRegistry, settings: &Settings, name: &str) -> Result<()> {
    intro()?;

    let console = Console::new();
    let packages = NodePackageManager::new(settings.package_manager);
    let prompter: &dyn Prompter = if settings.assume_yes {
        &AutoConfirm
    } else {
        &console
    };

    let manager = ModuleManager::new(
        registry,
        ModuleContext {
            project_root: &settings.project_root,
            templates: &settings.templates,
            packages: &packages,
            prompter,
            progress: &console,
        },
    );

    let outcome = manager.remove(name).await?;

    outro(&format!("Removed {}", outcome.removed.join(", ")))
}

/// List every registered module, marking the ones installed in the current project
pub fn run_modules(registry: &ModuleRegistry, settings: &Settings) -> Result<()> {
    let installed = if ProjectManifest::exists(&settings.project_root) {
        match ProjectManifest::load(&settings.project_root) {
            Ok(manifest) => manifest.modules,
            Err(e) => {
                tracing::warn!("Ignoring unreadable manifest: {}", e);
                let _ = cliclack::log::warning(format!("{}; installed modules are not marked", e));
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    let names = registry.names();
    if names.is_empty() {
        println!("{}", "No modules are currently available.".cyan());
        return Ok(());
    }

    println!("{}", "Available modules:".cyan().bold());
    for module in registry.iter() {
        let mut line = format!("  - {}", module.name().cyan());
        if !module.dependencies().is_empty() {
            line.push_str(&format!(
                " {}",
                format!("(requires {})", module.dependencies().join(", ")).dimmed()
            ));
        }
        if installed.iter().any(|m| m == module.name()) {
            line.push_str(&format!(" {}", "[installed]".green()));
        }
        println!("{}", line);
        println!("      {}", module.description());
    }

    Ok(())
}

fn print_next_steps(steps: &[NextSteps]) {
    if steps.is_empty() {
        return;
    }

    println!();
    println!("====================");
    println!("Next steps:");
    println!("====================");
    println!();

    for step in steps {
        println!("[{}]", step.module.bold());
        println!("{}", step.text);
        println!();
    }
}

/// Print an error the way the CLI shows it to users
pub fn report_error(err: &StackError) {
    if err.is_cancelled() {
        let _ = cliclack::outro_cancel(err.to_string());
        return;
    }

    let _ = cliclack::log::error(err.to_string());
    if let StackError::NotAProject { .. } = err {
        let _ = cliclack::log::info(
            "This command must be run from within a project created by phizy-stack",
        );
        let _ = cliclack::log::info(format!(
            "To create a new project, run: {}",
            crate::CREATE_HINT.bold()
        ));
    }
    let _ = cliclack::outro_cancel("Failed");
}
