//! Project configuration for launchkit.
//! This module defines the configuration record consumed by the scaffold
//! orchestrator, the values derived from it for template interpolation, and
//! the resolution of that record from flags, a config file or prompts.

use clap::ValueEnum;
use cruet::Inflector;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use url::Url;

use crate::cli::ApplyArgs;
use crate::error::{Error, Result};
use crate::prompt::{collect_configuration, Prompter};

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

/// Authentication provider wired into the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    #[default]
    Supabase,
}

/// Database provider wired into the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseProvider {
    #[default]
    Supabase,
}

/// Hosting platform the generated CI workflow deploys to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployProvider {
    #[default]
    Netlify,
}

/// Package manager used by the install step, the summary and the CI workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Supabase => "supabase",
        }
    }
}

impl DatabaseProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseProvider::Supabase => "supabase",
        }
    }
}

impl DeployProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeployProvider::Netlify => "netlify",
        }
    }
}

impl PackageManager {
    /// Name of the executable.
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Command line that runs a `package.json` script.
    pub fn run_script(&self, script: &str) -> String {
        match self {
            PackageManager::Npm | PackageManager::Bun => format!("{} run {script}", self.as_str()),
            PackageManager::Pnpm | PackageManager::Yarn => format!("{} {script}", self.as_str()),
        }
    }

    /// Reproducible install used in CI.
    pub fn ci_install(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm ci",
            PackageManager::Pnpm => "pnpm install --frozen-lockfile",
            PackageManager::Yarn => "yarn install --frozen-lockfile",
            PackageManager::Bun => "bun install --frozen-lockfile",
        }
    }

    /// Extra workflow step that puts the package manager on the CI runner.
    fn ci_setup_step(&self) -> &'static str {
        match self {
            PackageManager::Npm | PackageManager::Yarn => "",
            PackageManager::Pnpm => "      - uses: pnpm/action-setup@v4\n        with:\n          version: 9\n",
            PackageManager::Bun => "      - uses: oven-sh/setup-bun@v2\n",
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DatabaseProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DeployProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything `apply` needs to know to generate one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub name: String,
    pub target_dir: PathBuf,
    pub repository: Option<String>,
    pub billing: bool,
    pub auth: AuthProvider,
    pub database: DatabaseProvider,
    pub deploy: DeployProvider,
    pub package_manager: PackageManager,
    pub auto_install: bool,
}

impl Configuration {
    /// Builds a validated configuration.
    ///
    /// # Arguments
    /// * `name` - Project name
    /// * `dir` - Target directory; defaults to the slug of `name`. Relative paths are joined to `base_dir`
    /// * `base_dir` - Directory relative paths are resolved against
    ///
    /// # Errors
    /// * `Error::ConfigError` if the name or the repository URL is invalid
    pub fn new(
        name: &str,
        dir: Option<&Path>,
        base_dir: &Path,
        repository: Option<&str>,
    ) -> Result<Self> {
        let name = validate_name(name)?;
        let repository = match repository.map(str::trim).filter(|r| !r.is_empty()) {
            Some(repo) => Some(validate_repository(repo)?),
            None => None,
        };
        let target_dir = resolve_target_dir(&name, dir, base_dir);

        Ok(Self {
            name,
            target_dir,
            repository,
            billing: true,
            auth: AuthProvider::default(),
            database: DatabaseProvider::default(),
            deploy: DeployProvider::default(),
            package_manager: PackageManager::default(),
            auto_install: true,
        })
    }

    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// Base URL the deployed site is expected to be served from.
    pub fn site_url(&self) -> String {
        match self.deploy {
            DeployProvider::Netlify => format!("https://{}.netlify.app", self.slug()),
        }
    }

    /// Builds the variables available to templated catalog entries.
    pub fn template_context(&self) -> serde_json::Value {
        let slug = self.slug();
        let site_url = self.site_url();
        let pm = self.package_manager;

        serde_json::json!({
            "name": self.name,
            "title": slug.to_title_case(),
            "slug": slug,
            "repository": self.repository,
            "site_url": site_url,
            "success_url": format!("{site_url}/dashboard?checkout=success"),
            "cancel_url": format!("{site_url}/pricing?checkout=cancelled"),
            "billing_enabled": self.billing,
            "auth_provider": self.auth.as_str(),
            "database_provider": self.database.as_str(),
            "deploy_provider": self.deploy.as_str(),
            "package_manager": pm.as_str(),
            "install_command": format!("{} install", pm.as_str()),
            "ci_install_command": pm.ci_install(),
            "ci_setup_step": pm.ci_setup_step(),
            "dev_command": pm.run_script("dev"),
            "build_command": pm.run_script("build"),
        })
    }
}

/// Turns a project name into a directory and package name.
///
/// Lowercases the name, collapses every run of characters other than
/// `a-z`/`0-9` into a single `-` and trims leading and trailing `-`.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Trims the name and checks that it yields a non-empty slug.
pub fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::ConfigError("project name must not be empty".to_string()));
    }
    if slugify(name).is_empty() {
        return Err(Error::ConfigError(format!(
            "project name '{name}' must contain at least one letter or digit"
        )));
    }
    Ok(name.to_string())
}

/// Accepts `http(s)://`, `git://` and `ssh://` URLs as well as `git@host:path`.
///
/// The value is inserted verbatim into JSON and Markdown files, so quotes,
/// backslashes, whitespace and control characters are rejected.
pub fn validate_repository(repo: &str) -> Result<String> {
    if repo
        .chars()
        .any(|c| c == '"' || c == '\\' || c.is_whitespace() || c.is_control())
    {
        return Err(Error::ConfigError(format!(
            "{repo:?} is not a valid git repository URL: quotes, backslashes and whitespace are not allowed"
        )));
    }
    if let Some(rest) = repo.strip_prefix("git@") {
        if rest.contains(':') && !rest.starts_with(':') {
            return Ok(repo.to_string());
        }
    } else if let Ok(url) = Url::parse(repo) {
        if matches!(url.scheme(), "https" | "http" | "git" | "ssh") && url.has_host() {
            return Ok(repo.to_string());
        }
    }
    Err(Error::ConfigError(format!("'{repo}' is not a valid git repository URL")))
}

/// Returns the directory a project will be generated into.
pub fn resolve_target_dir(name: &str, dir: Option<&Path>, base_dir: &Path) -> PathBuf {
    match dir {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => base_dir.join(dir),
        None => base_dir.join(slugify(name)),
    }
}

fn default_true() -> bool {
    true
}

/// Configuration file accepted by `apply --config`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub name: String,
    pub dir: Option<PathBuf>,
    pub repo: Option<String>,
    #[serde(default = "default_true")]
    pub stripe: bool,
    #[serde(default)]
    pub auth: AuthProvider,
    #[serde(default)]
    pub db: DatabaseProvider,
    #[serde(default)]
    pub deploy: DeployProvider,
    #[serde(default)]
    pub package_manager: PackageManager,
    #[serde(default = "default_true")]
    pub install: bool,
}

/// Parses the content of a configuration file, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor valid YAML for [`ConfigFile`]
pub fn parse_config_file(content: &str) -> Result<ConfigFile> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(json_err) => serde_yaml::from_str(content).map_err(|yaml_err| {
            debug!("Configuration is not JSON: {json_err}");
            Error::ConfigError(format!("invalid configuration file: {yaml_err}"))
        }),
    }
}

/// Reads and parses a configuration file from disk.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<ConfigFile> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::ConfigError(format!("cannot read '{}': {e}", path.display()))
    })?;
    parse_config_file(&content)
}

impl ConfigFile {
    /// Converts the file into a configuration. `overrides` supplies `--dir` and `--no-install`.
    pub fn into_configuration(self, overrides: &ApplyArgs, base_dir: &Path) -> Result<Configuration> {
        let dir = overrides.dir.as_deref().or(self.dir.as_deref());
        let mut config = Configuration::new(&self.name, dir, base_dir, self.repo.as_deref())?;
        config.billing = self.stripe;
        config.auth = self.auth;
        config.database = self.db;
        config.deploy = self.deploy;
        config.package_manager = self.package_manager;
        config.auto_install = self.install && overrides.install();
        Ok(config)
    }
}

/// Builds the configuration from `--name` and the remaining flags.
pub fn from_flags(name: &str, args: &ApplyArgs, base_dir: &Path) -> Result<Configuration> {
    let mut config = Configuration::new(name, args.dir.as_deref(), base_dir, args.repo.as_deref())?;
    config.billing = args.billing();
    config.auth = args.auth;
    config.database = args.db;
    config.deploy = args.deploy;
    config.package_manager = args.package_manager;
    config.auto_install = args.install();
    Ok(config)
}

/// Resolves the configuration of an `apply` invocation.
///
/// A config file wins over `--name`; without either, the questions are asked
/// through `prompter` with the flag values as defaults.
///
/// # Arguments
/// * `args` - Parsed `apply` arguments
/// * `prompter` - Interactive prompt implementation
/// * `base_dir` - Directory relative target paths are resolved against
pub fn resolve_configuration(
    args: &ApplyArgs,
    prompter: &dyn Prompter,
    base_dir: &Path,
) -> Result<Configuration> {
    let config = if let Some(path) = &args.config {
        let path = if path.is_absolute() { path.clone() } else { base_dir.join(path) };
        load_config_file(path)?.into_configuration(args, base_dir)?
    } else if let Some(name) = &args.name {
        from_flags(name, args, base_dir)?
    } else {
        collect_configuration(prompter, args, base_dir)?
    };
    debug!("Resolved configuration: {config:?}");
    Ok(config)
}
