//! launchkit's main application entry point.
//! Handles command-line argument parsing and dispatches to the apply and
//! destroy flows.

use std::path::Path;

use launchkit::{
    cli::{get_args, ApplyArgs, Args, Command, DestroyArgs},
    config::resolve_configuration,
    destroy::{destroy, DestroyOutcome},
    error::{default_error_handler, Error, Result},
    filesystem::OsFileSystem,
    git::init_repository,
    install::CommandInstaller,
    prompt::DialoguerPrompter,
    scaffold::Scaffolder,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let base_dir = std::env::current_dir()?;
    match args.command {
        Command::Apply(apply_args) => apply(&apply_args, &base_dir),
        Command::Destroy(destroy_args) => remove(&destroy_args, &base_dir),
    }
}

/// Resolves the configuration, generates the project and initializes git when
/// a repository URL was given.
fn apply(args: &ApplyArgs, base_dir: &Path) -> Result<()> {
    let prompter = DialoguerPrompter::new();
    let config = resolve_configuration(args, &prompter, base_dir)?;

    let fs = OsFileSystem;
    let installer = CommandInstaller::new(config.package_manager);
    Scaffolder::new(&fs, &installer).scaffold(&config.target_dir, &config)?;

    if let Some(repository) = &config.repository {
        match init_repository(&config.target_dir, repository) {
            Ok(()) => println!("Initialized git repository with origin {repository}."),
            Err(e) => log::warn!("Could not initialize git repository: {e}"),
        }
    }
    Ok(())
}

fn remove(args: &DestroyArgs, base_dir: &Path) -> Result<()> {
    let dir = args.dir.as_ref().ok_or_else(|| Error::MissingArgumentError {
        argument: "--dir".to_string(),
    })?;
    let dir = base_dir.join(dir);

    match destroy(&dir)? {
        DestroyOutcome::Removed { files, directories } => println!(
            "Removed '{}' ({files} files, {directories} directories).",
            dir.display()
        ),
        DestroyOutcome::AlreadyAbsent => {
            println!("Directory '{}' does not exist, nothing to remove.", dir.display())
        }
    }
    Ok(())
}
