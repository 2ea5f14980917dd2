//! cliclack-backed prompter and spinner

use crate::error::{Result, StackError};
use crate::interact::{Progress, Prompter};
use std::cell::RefCell;

/// Terminal front end: one spinner at a time, paused while prompting
#[derive(Default)]
pub struct Console {
    spinner: RefCell<Option<cliclack::ProgressBar>>,
    message: RefCell<String>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the running spinner, if any, so a prompt or log line can be printed
    fn pause(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.stop(self.message.borrow().as_str());
        }
    }

    fn take(&self) -> Option<cliclack::ProgressBar> {
        self.spinner.borrow_mut().take()
    }
}

impl Prompter for Console {
    fn confirm(&self, question: &str) -> Result<bool> {
        self.pause();
        cliclack::confirm(question)
            .initial_value(false)
            .interact()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::Interrupted => {
                    StackError::Cancelled("Operation cancelled.".to_string())
                }
                _ => StackError::Prompt(e),
            })
    }
}

impl Progress for Console {
    fn start(&self, message: &str) {
        self.pause();
        let spinner = cliclack::spinner();
        spinner.start(message);
        *self.message.borrow_mut() = message.to_string();
        *self.spinner.borrow_mut() = Some(spinner);
    }

    fn set_text(&self, message: &str) {
        let active = self.spinner.borrow().is_some();
        if active {
            *self.message.borrow_mut() = message.to_string();
            if let Some(spinner) = self.spinner.borrow().as_ref() {
                spinner.set_message(message);
            }
        } else {
            self.start(message);
        }
    }

    fn succeed(&self, message: &str) {
        match self.take() {
            Some(spinner) => spinner.stop(message),
            None => {
                let _ = cliclack::log::success(message);
            }
        }
    }

    fn fail(&self, message: &str) {
        match self.take() {
            Some(spinner) => spinner.error(message),
            None => {
                let _ = cliclack::log::error(message);
            }
        }
    }

    fn warn(&self, message: &str) {
        match self.take() {
            Some(spinner) => spinner.cancel(message),
            None => {
                let _ = cliclack::log::warning(message);
            }
        }
    }

    fn info(&self, message: &str) {
        self.pause();
        let _ = cliclack::log::info(message);
    }
}
