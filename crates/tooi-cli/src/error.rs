use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that end a CLI invocation with a failure status.
#[derive(Debug, Error)]
pub enum TooiError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The input file could not be read. Already reported as a diagnostic.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Scanning found lexical errors. Already reported as diagnostics.
    #[error("Lexical errors in {path}")]
    Lexical { path: String },
}

impl TooiError {
    /// Returns `true` if the error was already shown to the user through the
    /// diagnostic stream.
    pub fn is_reported(&self) -> bool {
        matches!(self, TooiError::Read { .. } | TooiError::Lexical { .. })
    }
}
