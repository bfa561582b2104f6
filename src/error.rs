//! Error handling for the launchkit application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for launchkit operations.
///
/// This enum represents all possible errors that can occur within the application.
/// It implements the standard Error trait through thiserror's derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A single file of the generated tree could not be written
    #[error("Failed to write '{path}': {source}.")]
    WriteError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The target directory of `apply` is already present on disk
    #[error("Directory '{output_dir}' already exists. Choose another --dir or remove it with `launchkit destroy --dir {output_dir}`.")]
    OutputDirectoryExistsError { output_dir: String },

    /// A required command-line argument was omitted
    #[error("Missing required argument: {argument}.")]
    MissingArgumentError { argument: String },

    /// Represents errors that occur during configuration parsing or validation
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// A path would leave the target tree, or cannot be removed safely
    #[error("Unsafe path '{path}': {reason}.")]
    UnsafePathError { path: String, reason: String },

    /// Represents errors that occur while interacting with the terminal
    #[error("Prompt error: {0}.")]
    PromptError(#[from] dialoguer::Error),

    #[error("Git error: {0}.")]
    Git2Error(#[from] git2::Error),
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
