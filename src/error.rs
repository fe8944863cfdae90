//! Error handling for stache.
//! Rendering never fails; errors only come from loading templates and contexts
//! or from building custom parsers.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for stache operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The resolved template file does not exist
    #[error("Missing given template file: '{}'.", path.display())]
    TemplateNotFound { path: PathBuf },

    /// The template file exists but could not be read
    #[error("Could not load template file: '{}': {source}.", path.display())]
    TemplateReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// The binding context document is malformed or not a mapping
    #[error("Context error: {0}.")]
    ContextError(String),

    /// A custom parser pattern failed to compile
    #[error("Pattern error: {0}.")]
    PatternError(#[from] regex::Error),
}

/// Convenience type alias for Results with stache's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
