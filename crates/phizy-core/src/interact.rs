//! User interaction seams: yes/no confirmation and progress reporting
//!
//! The engine only talks to these traits. The cliclack console in
//! [`crate::tui`] implements both; tests use scripted doubles.

use crate::error::Result;

/// Asks the user yes/no questions
pub trait Prompter {
    /// Ask `question`; `Ok(false)` means the user declined
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// Spinner-style progress reporting
pub trait Progress {
    fn start(&self, message: &str);
    fn set_text(&self, message: &str);
    fn succeed(&self, message: &str);
    fn fail(&self, message: &str);
    fn warn(&self, message: &str);
    /// Plain informational line, e.g. an item of a plan shown before a prompt
    fn info(&self, message: &str);
}

/// Answers yes to every question, for `--yes`
pub struct AutoConfirm;

impl Prompter for AutoConfirm {
    fn confirm(&self, question: &str) -> Result<bool> {
        tracing::debug!("Auto-confirming: {}", question);
        Ok(true)
    }
}

/// Print a titled bullet list through a progress reporter
pub(crate) fn show_list<S: AsRef<str>>(progress: &dyn Progress, title: &str, items: &[S]) {
    progress.info(title);
    for item in items {
        progress.info(&format!("- {}", item.as_ref()));
    }
}
