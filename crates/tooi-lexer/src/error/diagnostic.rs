//! The structured diagnostic record.
//!
//! A [`Diagnostic`] is what the reporter hands to a sink: everything needed to
//! render one reported condition, with no rendering decisions made yet.

use std::fmt;

use super::{ErrorCode, Severity};
use crate::span::Span;

/// Where in the source a diagnostic points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    line: usize,
    column: usize,
    span_len: usize,
    span: Option<Span>,
    source_line: String,
}

impl SourceLocation {
    /// Create a location at 1-based `line` and `column` covering `span_len`
    /// characters of `source_line`.
    pub fn new(line: usize, column: usize, span_len: usize, source_line: impl Into<String>) -> Self {
        Self {
            line,
            column,
            span_len,
            span: None,
            source_line: source_line.into(),
        }
    }

    /// Attach the byte span of the offending text in the full source.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Number of characters to underline.
    pub fn span_len(&self) -> usize {
        self.span_len
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// The full text of the line containing the location, without its newline.
    pub fn source_line(&self) -> &str {
        &self.source_line
    }
}

/// A single reported condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    short_code: Option<&'static str>,
    message: String,
    location: Option<SourceLocation>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            short_code: None,
            message: message.into(),
            location: None,
        }
    }

    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Set the catalog code and its short code.
    pub fn with_code(mut self, code: ErrorCode, short_code: &'static str) -> Self {
        self.code = Some(code);
        self.short_code = Some(short_code);
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn short_code(&self) -> Option<&'static str> {
        self.short_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity.label())?;
        if let Some(location) = &self.location {
            write!(f, " [line {}:{}]", location.line, location.column)?;
        }
        write!(f, ": {}", self.message)
    }
}
