//! Dependency installation for a freshly generated project.
//! Runs the package manager in the target directory with the terminal's
//! stdio attached. A failed install never fails the scaffold.

use log::debug;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::PackageManager;

/// Result of an install attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub ok: bool,
    pub message: String,
}

impl InstallOutcome {
    pub fn success<S: Into<String>>(message: S) -> Self {
        Self { ok: true, message: message.into() }
    }

    pub fn failure<S: Into<String>>(message: S) -> Self {
        Self { ok: false, message: message.into() }
    }
}

/// Installs the dependencies of a generated project.
pub trait Installer {
    fn run(&self, directory: &Path) -> InstallOutcome;
}

/// [`Installer`] that runs `<package manager> install`.
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    program: String,
    args: Vec<String>,
}

impl CommandInstaller {
    pub fn new(package_manager: PackageManager) -> Self {
        Self::with_command(package_manager.as_str(), ["install"])
    }

    /// Runs an arbitrary program instead of a package manager.
    pub fn with_command<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { program: program.to_string(), args: args.into_iter().map(Into::into).collect() }
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Installer for CommandInstaller {
    fn run(&self, directory: &Path) -> InstallOutcome {
        let command_line = self.command_line();
        debug!("Running '{}' in {}", command_line, directory.display());

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(directory)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();

        match status {
            Ok(status) if status.success() => {
                InstallOutcome::success(format!("'{command_line}' completed"))
            }
            Ok(status) => InstallOutcome::failure(format!("'{command_line}' failed with {status}")),
            Err(e) => InstallOutcome::failure(format!("could not run '{command_line}': {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_line() {
        let installer = CommandInstaller::new(PackageManager::Pnpm);
        assert_eq!(installer.command_line(), "pnpm install");
    }

    #[test]
    fn test_missing_program_is_a_failure() {
        let dir = TempDir::new().unwrap();
        let installer = CommandInstaller::with_command("launchkit-no-such-program", ["install"]);

        let outcome = installer.run(dir.path());

        assert!(!outcome.ok);
        assert!(outcome.message.contains("could not run"));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status() {
        let dir = TempDir::new().unwrap();

        assert!(CommandInstaller::with_command("true", Vec::<String>::new()).run(dir.path()).ok);

        let outcome = CommandInstaller::with_command("false", Vec::<String>::new()).run(dir.path());
        assert!(!outcome.ok);
        assert!(outcome.message.contains("failed"));
    }
}
