//! Core scaffold orchestration.
//! Combines the catalog, the interpolator and the path writer to generate the
//! final project tree, then runs the optional install step.

use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::catalog::entries_for;
use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::filesystem::{write_file, FileSystem};
use crate::install::{InstallOutcome, Installer};

/// What a successful scaffold produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub target_dir: PathBuf,
    /// Written files, in write order.
    pub written: Vec<PathBuf>,
    /// `None` when installation was not requested.
    pub install: Option<InstallOutcome>,
}

/// Drives the project catalog through a [`FileSystem`].
pub struct Scaffolder<'a> {
    fs: &'a dyn FileSystem,
    installer: &'a dyn Installer,
}

impl<'a> Scaffolder<'a> {
    pub fn new(fs: &'a dyn FileSystem, installer: &'a dyn Installer) -> Self {
        Self { fs, installer }
    }

    /// Generates the project described by `config` into `target_dir`.
    ///
    /// # Flow
    /// 1. Refuses to run if `target_dir` exists
    /// 2. Creates `target_dir`
    /// 3. Writes every catalog entry that applies to `config`, in definition order
    /// 4. Prints the completion summary
    /// 5. Runs the installer when `config.auto_install` is set; its failure is only logged
    ///
    /// # Errors
    /// * `Error::OutputDirectoryExistsError` if `target_dir` exists; nothing is written
    /// * `Error::WriteError` / `Error::UnsafePathError` if an entry cannot be written;
    ///   the partially written `target_dir` is removed before returning, together
    ///   with any of its ancestors this call created
    pub fn scaffold(&self, target_dir: &Path, config: &Configuration) -> Result<ScaffoldReport> {
        ensure_output_dir(self.fs, target_dir)?;

        let created_root = topmost_missing_ancestor(self.fs, target_dir);

        info!("Creating project '{}' in {}", config.name, target_dir.display());
        if let Err(source) = self.fs.create_dir_all(target_dir) {
            if self.fs.exists(&created_root) {
                self.rollback(&created_root);
            }
            return Err(Error::WriteError { path: target_dir.display().to_string(), source });
        }

        let written = match self.write_tree(target_dir, config) {
            Ok(written) => written,
            Err(err) => {
                self.rollback(&created_root);
                return Err(err);
            }
        };

        println!("{}", summary(config, target_dir));

        let install = if config.auto_install {
            info!("Installing dependencies with {}", config.package_manager);
            let outcome = self.installer.run(target_dir);
            if outcome.ok {
                println!("Dependencies installed.");
            } else {
                warn!("Dependency installation failed: {}", outcome.message);
                warn!(
                    "The project was generated; run '{} install' in {} to retry.",
                    config.package_manager,
                    target_dir.display()
                );
            }
            Some(outcome)
        } else {
            debug!("Skipping dependency installation");
            None
        };

        Ok(ScaffoldReport { target_dir: target_dir.to_path_buf(), written, install })
    }

    fn write_tree(&self, target_dir: &Path, config: &Configuration) -> Result<Vec<PathBuf>> {
        let context = config.template_context();
        let mut written = Vec::new();

        for entry in entries_for(config) {
            let target = entry.target(target_dir)?;
            write_file(self.fs, &target, &entry.render(&context))?;
            println!("Created: '{}'", target.display());
            written.push(target);
        }
        Ok(written)
    }

    fn rollback(&self, created_root: &Path) {
        warn!("Generation failed, removing partially written {}", created_root.display());
        if let Err(e) = self.fs.remove_dir_all(created_root) {
            warn!("Could not remove {}: {}", created_root.display(), e);
        }
    }
}

/// Returns the outermost ancestor of `dir` (or `dir` itself) that does not exist yet.
fn topmost_missing_ancestor(fs: &dyn FileSystem, dir: &Path) -> PathBuf {
    dir.ancestors()
        .take_while(|p| !p.as_os_str().is_empty() && !fs.exists(p))
        .last()
        .unwrap_or(dir)
        .to_path_buf()
}

/// Ensures the output directory does not exist yet.
///
/// # Errors
/// * `Error::OutputDirectoryExistsError` if anything exists at `output_dir`
pub fn ensure_output_dir(fs: &dyn FileSystem, output_dir: &Path) -> Result<()> {
    if fs.exists(output_dir) {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(())
}

/// Builds the message printed after a successful generation.
pub fn summary(config: &Configuration, target_dir: &Path) -> String {
    let pm = config.package_manager;
    let mut steps = vec![
        format!("cd {}", target_dir.display()),
        "cp .env.development.example .env.local  # then fill in the Supabase keys".to_string(),
    ];
    if config.billing {
        steps.push("Add STRIPE_SECRET_KEY, STRIPE_WEBHOOK_SECRET and STRIPE_PRICE_ID to .env.local".to_string());
    }
    if !config.auto_install {
        steps.push(format!("{} install", pm));
    }
    steps.push(pm.run_script("dev"));
    steps.push(
        "Add NETLIFY_AUTH_TOKEN, NETLIFY_SITE_ID, NEXT_PUBLIC_SUPABASE_URL and \
         NEXT_PUBLIC_SUPABASE_ANON_KEY to the GitHub repository secrets"
            .to_string(),
    );

    let mut message = format!(
        "\nProject '{}' generated successfully in {}.\n\nNext steps:\n",
        config.name,
        target_dir.display()
    );
    for (number, step) in steps.iter().enumerate() {
        message.push_str(&format!("  {}. {}\n", number + 1, step));
    }
    message
}
