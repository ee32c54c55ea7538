//! Error handling for the next-gen application.
//! Defines the error type shared by every pipeline stage and the mapping
//! from error category to process exit code.

use std::io;
use thiserror::Error;

use crate::output;

/// Custom error types for next-gen operations.
///
/// This enum represents all possible errors that can occur while fetching,
/// unpacking and customizing a project. It implements the standard Error
/// trait through thiserror's derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A file system operation on a known path failed
    #[error("Failed to access '{path}': {source}.")]
    FileError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The HTTP request itself could not be performed
    #[error("HTTP request to '{url}' failed: {reason}.")]
    RequestError { url: String, reason: String },

    /// The server answered with anything other than 200
    #[error("Template download failed with HTTP status {status}.")]
    BadStatus { status: u16 },

    /// Every attempt returned a suspiciously small payload
    #[error("Failed to download template: archive was smaller than {min_size} bytes after {attempts} attempts.")]
    UndersizedArchive { attempts: u32, min_size: u64 },

    /// The archive file could not be created on disk
    #[error("Error creating file '{path}': {source}.")]
    ArchiveCreateError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The response body could not be streamed into the archive file
    #[error("Error downloading template: {0}.")]
    ArchiveWriteError(#[source] io::Error),

    /// The archive is not a readable zip file
    #[error("Archive error: {0}.")]
    ZipError(#[from] zip::result::ZipError),

    /// An archive entry would land outside of the staging directory
    #[error("Illegal file path in archive: '{entry}'.")]
    IllegalArchivePath { entry: String },

    /// Merging the staged template into the project failed
    #[error("Error copying files: {0}.")]
    CopyError(String),

    /// A configuration document does not have the expected shape
    #[error("Error parsing '{path}': {reason}.")]
    ConfigFormatError { path: String, reason: String },

    /// Represents validation failures in user input
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// The destination is neither empty nor a previous scaffold
    #[error("'{dir}' does not contain a next-gen project. Please create a new folder and run this command again.")]
    NotAProject { dir: String },

    /// Represents errors that occur while reading user input
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// Represents invalid settings overrides
    #[error("Settings error: {0}.")]
    SettingsError(String),
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit code for this error category.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ArchiveCreateError { .. } => 2,
            Error::IllegalArchivePath { .. } => 3,
            Error::ArchiveWriteError(_) => 5,
            _ => 1,
        }
    }
}

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the styled error message and exits with the status code of
/// the error's category.
pub fn default_error_handler(err: Error) -> ! {
    log::debug!("{:?}", err);
    output::error(&err.to_string());
    std::process::exit(err.exit_code());
}
