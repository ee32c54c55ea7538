//! next-gen bootstraps a desktop project from a remote template.
//! It downloads the template archive, unpacks it safely into the project
//! directory, and rewrites the project's configuration documents with
//! the metadata the user enters.

/// Command-line interface module for the next-gen application
pub mod cli;

/// Runtime settings and their environment overrides
pub mod config;

/// Common constants: fixed file names, thresholds and the scaffold marker
pub mod constants;

/// Merging the staged template into the project directory
pub mod copier;

/// Classification of the destination directory
pub mod detect;

/// Targeted rewrites of package.json, tauri.conf.json and Cargo.toml
pub mod documents;

/// Error types and handling for the next-gen application
pub mod error;

/// Zip extraction with path traversal protection
pub mod extractor;

/// Template download with size checking and retry
pub mod fetcher;

/// Logger initialization
pub mod logger;

/// Project metadata fields and their validation
pub mod metadata;

/// Colored status lines for the terminal
pub mod output;

/// Ordering of all stages of a run
pub mod pipeline;

/// User input and interaction handling
pub mod prompt;

/// git and package manager invocation
pub mod tools;

/// Startup check for a newer release
pub mod update;
