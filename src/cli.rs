//! Command-line interface implementation for launchkit.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{AuthProvider, DatabaseProvider, DeployProvider, PackageManager};

/// Command-line arguments structure for launchkit.
#[derive(Parser, Debug)]
#[command(author, version, about = "launchkit: generate a ready-to-deploy SaaS starter project", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new project. Prompts interactively unless --name or --config is given
    Apply(ApplyArgs),
    /// Remove a previously generated project directory
    Destroy(DestroyArgs),
}

/// Arguments of the `apply` subcommand.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ApplyArgs {
    /// Project name. Omit it to answer the questions interactively
    #[arg(short, long)]
    pub name: Option<String>,

    /// Directory where the project will be created (defaults to the slugified name)
    #[arg(short, long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Git repository URL. Initializes a git repository with this origin
    #[arg(long, value_name = "URL")]
    pub repo: Option<String>,

    /// Include Stripe billing (default)
    #[arg(long, overrides_with = "no_stripe")]
    pub stripe: bool,

    /// Leave out Stripe billing
    #[arg(long)]
    pub no_stripe: bool,

    /// Authentication provider
    #[arg(long, value_enum, default_value_t = AuthProvider::default())]
    pub auth: AuthProvider,

    /// Database provider
    #[arg(long, value_enum, default_value_t = DatabaseProvider::default())]
    pub db: DatabaseProvider,

    /// Deployment target
    #[arg(long, value_enum, default_value_t = DeployProvider::default())]
    pub deploy: DeployProvider,

    /// Package manager used to install dependencies
    #[arg(long, value_enum, default_value_t = PackageManager::default())]
    pub package_manager: PackageManager,

    /// Skip installing dependencies after generation
    #[arg(long)]
    pub no_install: bool,

    /// Read the project configuration from a JSON or YAML file
    #[arg(short, long, value_name = "FILE", conflicts_with = "name")]
    pub config: Option<PathBuf>,
}

impl ApplyArgs {
    /// Returns whether billing is requested. `--stripe` and `--no-stripe` override each other.
    pub fn billing(&self) -> bool {
        !self.no_stripe
    }

    pub fn install(&self) -> bool {
        !self.no_install
    }
}

/// Arguments of the `destroy` subcommand.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct DestroyArgs {
    /// Directory to remove
    #[arg(short, long, value_name = "PATH")]
    pub dir: Option<PathBuf>,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 if the subcommand is missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                if let Err(e) = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help()
                {
                    eprintln!("Failed to print help: {e}");
                }
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
