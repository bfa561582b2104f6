//! launchkit generates a ready-to-deploy SaaS starter project.
//! It materializes a fixed catalog of templated files into a new directory,
//! optionally installs dependencies, and can remove a generated tree again.

/// Variable substitution for `{{identifier}}` placeholders
pub mod interpolate;

/// Filesystem abstraction and the path writer
pub mod filesystem;

/// The declarative list of files that make up a generated project
pub mod catalog;

/// Core scaffold orchestration
/// Writes the catalog into the target directory and runs post-generation steps
pub mod scaffold;

/// Recursive, symlink-safe removal of a generated project
pub mod destroy;

/// Project configuration and its resolution from flags, files and prompts
pub mod config;

/// User input and interaction handling
pub mod prompt;

/// Dependency installation through the project's package manager
pub mod install;

/// Git repository initialization for projects with a remote
pub mod git;

/// Command-line interface module for the launchkit application
pub mod cli;

/// Error types and handling for the launchkit application
pub mod error;
