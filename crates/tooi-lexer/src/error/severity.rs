//! Severity levels for diagnostics.
//!
//! Levels are ordered from least to most severe, so callers can compare them
//! directly (`Severity::Fatal > Severity::Error`).

use std::fmt;

/// The severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// An advisory issue. Does not fail the run.
    Warning,

    /// A problem in the user's source that fails the run.
    Error,

    /// A condition that stops the current run entirely.
    Fatal,

    /// An inconsistency in the program itself rather than in user input.
    Internal,
}

impl Severity {
    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }

    /// Returns `true` if a diagnostic of this severity marks the run as failed.
    pub fn sets_error_flag(&self) -> bool {
        !self.is_warning()
    }

    /// The capitalized prefix used in rendered diagnostic headers.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Warning => "Warning",
            Severity::Error => "Error",
            Severity::Fatal => "Fatal Error",
            Severity::Internal => "Internal Error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
            Severity::Internal => write!(f, "internal"),
        }
    }
}
