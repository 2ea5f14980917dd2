//! Phizy Core - project scaffolding and module management for phizy-stack
//!
//! A project is created from a base template and then extended with optional
//! modules (auth, database, email). Each module layers template files,
//! packages and `.env` entries onto the project; the set of installed modules
//! is tracked in `.phizy-stack.json` at the project root.
//!
//! # Architecture
//!
//! - **Layer 1: Project state** - [`project`] (manifest, `.env`, source patching,
//!   project creation), [`templates`] (template lookup and copying),
//!   [`runtime`] (package manager processes)
//! - **Layer 2: Module engine** - the [`modules::Module`] trait, the static
//!   [`ModuleRegistry`], and the dependency-aware [`ModuleManager`]
//! - **Layer 3: CLI/TUI Interface** - cliclack console and command runners
//!   (feature-gated)
//!
//! User interaction goes through the [`interact::Prompter`] and
//! [`interact::Progress`] traits so the engine can run without a terminal.
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based console and command runners
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use phizy_core::{ModuleContext, ModuleManager, ModuleRegistry};
//!
//! let registry = ModuleRegistry::builtin()?;
//! let manager = ModuleManager::new(&registry, ctx);
//! let outcome = manager.add("auth").await?;
//! for steps in outcome.next_steps {
//!     println!("[{}]\n{}", steps.module, steps.text);
//! }
//! ```

pub mod config;
pub mod error;
pub mod interact;
pub mod modules;
pub mod project;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use config::{PackageManagerKind, Settings};
pub use error::{Result, StackError};
pub use modules::{Module, ModuleContext, ModuleManager, ModuleRegistry};
pub use project::ProjectManifest;
pub use runtime::{NodePackageManager, PackageManager};
pub use templates::TemplateDir;

/// Command users run to start a new project
pub const CREATE_HINT: &str = "phizy-stack create <project-name>";
