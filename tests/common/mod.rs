//! Shared fakes for launchkit integration tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use launchkit::error::{Error, Result};
use launchkit::install::{InstallOutcome, Installer};
use launchkit::prompt::Prompter;

/// One scripted reply of a [`ScriptedPrompter`].
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Answer {
    /// Typed text; an empty string accepts the default.
    Text(&'static str),
    Confirm(bool),
    /// Index into the offered items.
    Select(usize),
    /// Accept whatever default is offered.
    Default,
}

/// [`Prompter`] replaying a fixed list of answers and recording the questions.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    pub asked: RefCell<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedPrompter {
    pub fn new<I: IntoIterator<Item = Answer>>(answers: I) -> Self {
        Self { answers: RefCell::new(answers.into_iter().collect()), asked: RefCell::default() }
    }

    fn next(&self, prompt: &str) -> Result<Answer> {
        self.asked.borrow_mut().push(prompt.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::ConfigError(format!("no scripted answer for '{prompt}'")))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        match self.next(prompt)? {
            Answer::Text("") | Answer::Default => Ok(default.unwrap_or_default().to_string()),
            Answer::Text(text) => Ok(text.to_string()),
            other => Err(Error::ConfigError(format!("expected text for '{prompt}', got {other:?}"))),
        }
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        match self.next(prompt)? {
            Answer::Confirm(value) => Ok(value),
            Answer::Default => Ok(default),
            other => Err(Error::ConfigError(format!("expected yes/no for '{prompt}', got {other:?}"))),
        }
    }

    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
        match self.next(prompt)? {
            Answer::Select(index) if index < items.len() => Ok(index),
            Answer::Default => Ok(default),
            other => Err(Error::ConfigError(format!("invalid selection for '{prompt}': {other:?}"))),
        }
    }
}

/// [`Installer`] that records the directories it was asked to install into.
#[allow(dead_code)]
#[derive(Debug)]
pub struct RecordingInstaller {
    ok: bool,
    pub calls: RefCell<Vec<PathBuf>>,
}

#[allow(dead_code)]
impl RecordingInstaller {
    pub fn succeeding() -> Self {
        Self { ok: true, calls: RefCell::default() }
    }

    pub fn failing() -> Self {
        Self { ok: false, calls: RefCell::default() }
    }
}

impl Installer for RecordingInstaller {
    fn run(&self, directory: &Path) -> InstallOutcome {
        self.calls.borrow_mut().push(directory.to_path_buf());
        if self.ok {
            InstallOutcome::success("installed")
        } else {
            InstallOutcome::failure("package manager exited with status 1")
        }
    }
}
