//! CLI prompts and command runners using cliclack (Charm-style inline prompts)
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod commands;
#[cfg(feature = "tui")]
mod console;

#[cfg(feature = "tui")]
pub use commands::{report_error, run_add, run_create, run_modules, run_remove};
#[cfg(feature = "tui")]
pub use console::Console;
