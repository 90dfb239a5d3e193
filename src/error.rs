//! Error handling for blocksmith.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving a block description.
///
/// Every variant surfaces while a [`crate::definition::BlockDefinition`] is
/// being constructed. A definition that was built successfully never fails later.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A property references a template that none of the search locations provide.
    #[error("Can't find template '{template}'.")]
    TemplateNotFound { template: String },

    /// A structured document exists but could not be parsed.
    #[error("Failed to parse '{}': {source}.", .path.display())]
    DocumentParseError {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The description does not name exactly one block.
    #[error("Invalid block description: {reason}.")]
    InvalidDescription { reason: String },

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: impl std::fmt::Display) {
    eprintln!("{err}");
    std::process::exit(1);
}
