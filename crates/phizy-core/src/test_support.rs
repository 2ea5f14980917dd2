//! Test doubles for the engine's seams

use crate::error::{Result, StackError};
use crate::interact::{Progress, Prompter};
use crate::modules::{Module, ModuleContext};
use crate::runtime::PackageManager;
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;
use std::rc::Rc;

/// Shared, ordered record of hook calls and commands
pub type CallLog = Rc<RefCell<Vec<String>>>;

/// Module whose hooks only record that they ran
pub struct FakeModule {
    name: &'static str,
    deps: &'static [&'static str],
    next_steps: Option<&'static str>,
    fail_initialize: bool,
    fail_remove: bool,
    cancel_remove: bool,
    log: CallLog,
}

impl FakeModule {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            deps: &[],
            next_steps: None,
            fail_initialize: false,
            fail_remove: false,
            cancel_remove: false,
            log: CallLog::default(),
        }
    }

    pub fn with_deps(mut self, deps: &'static [&'static str]) -> Self {
        self.deps = deps;
        self
    }

    pub fn with_next_steps(mut self, steps: &'static str) -> Self {
        self.next_steps = Some(steps);
        self
    }

    pub fn failing_initialize(mut self) -> Self {
        self.fail_initialize = true;
        self
    }

    pub fn failing_remove(mut self) -> Self {
        self.fail_remove = true;
        self
    }

    /// The remove hook behaves like a declined cleanup confirmation
    pub fn cancelling_remove(mut self) -> Self {
        self.cancel_remove = true;
        self
    }

    pub fn with_log(mut self, log: &CallLog) -> Self {
        self.log = log.clone();
        self
    }
}

#[async_trait(?Send)]
impl Module for FakeModule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        "test module"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        self.deps
    }

    async fn initialize(&self, _ctx: &ModuleContext<'_>) -> Result<Option<String>> {
        self.log.borrow_mut().push(format!("init:{}", self.name));
        if self.fail_initialize {
            return Err(StackError::Command {
                command: format!("install {}", self.name),
                code: 1,
                stderr: String::new(),
            });
        }
        Ok(self.next_steps.map(str::to_string))
    }

    async fn remove(&self, _ctx: &ModuleContext<'_>) -> Result<()> {
        self.log.borrow_mut().push(format!("remove:{}", self.name));
        if self.cancel_remove {
            return Err(StackError::Cancelled("Removal cancelled.".to_string()));
        }
        if self.fail_remove {
            return Err(StackError::Command {
                command: format!("uninstall {}", self.name),
                code: 1,
                stderr: String::new(),
            });
        }
        Ok(())
    }
}

/// Answers questions from a fixed script and records what was asked
///
/// Running out of answers is a test bug and panics.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<bool>>,
    pub asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().copied().collect()),
            asked: RefCell::default(),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, question: &str) -> Result<bool> {
        self.asked.borrow_mut().push(question.to_string());
        let answer = self.answers.borrow_mut().pop_front();
        Ok(answer.unwrap_or_else(|| panic!("unexpected question: {}", question)))
    }
}

/// Progress reporter that keeps every line for assertions
#[derive(Default)]
pub struct RecordingProgress {
    pub lines: RefCell<Vec<String>>,
}

impl RecordingProgress {
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|l| l.contains(needle))
    }
}

impl Progress for RecordingProgress {
    fn start(&self, message: &str) {
        self.lines.borrow_mut().push(format!("start: {}", message));
    }
    fn set_text(&self, message: &str) {
        self.lines.borrow_mut().push(format!("text: {}", message));
    }
    fn succeed(&self, message: &str) {
        self.lines.borrow_mut().push(format!("ok: {}", message));
    }
    fn fail(&self, message: &str) {
        self.lines.borrow_mut().push(format!("fail: {}", message));
    }
    fn warn(&self, message: &str) {
        self.lines.borrow_mut().push(format!("warn: {}", message));
    }
    fn info(&self, message: &str) {
        self.lines.borrow_mut().push(format!("info: {}", message));
    }
}

/// Package manager that records commands instead of running them
#[derive(Default)]
pub struct RecordingPackages {
    pub log: CallLog,
}

impl RecordingPackages {
    pub fn commands(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

#[async_trait(?Send)]
impl PackageManager for RecordingPackages {
    async fn install(&self, _root: &Path, packages: &[&str]) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("install {}", packages.join(" ")));
        Ok(())
    }

    async fn uninstall(&self, _root: &Path, packages: &[&str]) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("uninstall {}", packages.join(" ")));
        Ok(())
    }

    async fn exec(&self, _root: &Path, program: &str, args: &[&str]) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("exec {} {}", program, args.join(" ")));
        Ok(())
    }

    async fn install_all(&self, _root: &Path) -> Result<()> {
        self.log.borrow_mut().push("install-all".to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "npm"
    }
}
