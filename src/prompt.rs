//! User input and interaction handling.
//! Collects a [`Configuration`] interactively through a [`Prompter`].

use clap::ValueEnum;
use dialoguer::{Confirm, Input, Select};
use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::cli::ApplyArgs;
use crate::config::{slugify, validate_name, validate_repository, Configuration};
use crate::error::Result;

/// Terminal interaction used while collecting the configuration.
pub trait Prompter {
    /// Asks for a line of text. An empty answer falls back to `default` when one is given.
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String>;
    /// Asks a yes/no question.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
    /// Asks to pick one of `items` and returns its index.
    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize>;
}

/// [`Prompter`] backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new().with_prompt(prompt).default(default).interact()?)
    }

    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
        Ok(Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()?)
    }
}

/// Asks for one variant of a closed provider enum.
fn select_variant<T>(prompter: &dyn Prompter, prompt: &str, default: T) -> Result<T>
where
    T: ValueEnum + Display + Copy + PartialEq,
{
    let variants = T::value_variants();
    let items: Vec<String> = variants.iter().map(ToString::to_string).collect();
    let default_index = variants.iter().position(|v| *v == default).unwrap_or(0);
    let index = prompter.select(prompt, &items, default_index)?;
    Ok(variants.get(index).copied().unwrap_or(default))
}

/// Repeats `ask` until `validate` accepts the answer, reporting each rejection.
fn ask_until_valid<T>(
    mut ask: impl FnMut() -> Result<String>,
    validate: impl Fn(&str) -> Result<T>,
) -> Result<T> {
    loop {
        let answer = ask()?;
        match validate(&answer) {
            Ok(value) => return Ok(value),
            Err(e) => eprintln!("{e}"),
        }
    }
}

/// Prompts for every configuration field.
///
/// Values already present in `defaults` are offered as the default answers.
///
/// # Arguments
/// * `prompter` - Prompt implementation
/// * `defaults` - Flags given alongside the interactive `apply`
/// * `base_dir` - Directory relative target paths are resolved against
///
/// # Returns
/// * `Result<Configuration>` - Validated configuration
pub fn collect_configuration(
    prompter: &dyn Prompter,
    defaults: &ApplyArgs,
    base_dir: &Path,
) -> Result<Configuration> {
    let name = ask_until_valid(|| prompter.input("Project name", None), validate_name)?;

    let default_dir = match &defaults.dir {
        Some(dir) => dir.display().to_string(),
        None => slugify(&name),
    };
    let dir = prompter.input("Target directory", Some(&default_dir))?;
    let dir = PathBuf::from(if dir.trim().is_empty() { default_dir } else { dir.trim().to_string() });

    let repository = ask_until_valid(
        || prompter.input("Git repository URL (leave empty to skip)", defaults.repo.as_deref()),
        |answer| match answer.trim() {
            "" => Ok(None),
            repo => validate_repository(repo).map(Some),
        },
    )?;

    let billing = prompter.confirm("Include Stripe billing?", defaults.billing())?;
    let auth = select_variant(prompter, "Authentication provider", defaults.auth)?;
    let database = select_variant(prompter, "Database", defaults.db)?;
    let deploy = select_variant(prompter, "Deploy target", defaults.deploy)?;
    let package_manager = select_variant(prompter, "Package manager", defaults.package_manager)?;
    let auto_install = prompter.confirm("Install dependencies now?", defaults.install())?;

    let mut config = Configuration::new(&name, Some(dir.as_path()), base_dir, repository.as_deref())?;
    config.billing = billing;
    config.auth = auth;
    config.database = database;
    config.deploy = deploy;
    config.package_manager = package_manager;
    config.auto_install = auto_install;
    Ok(config)
}
