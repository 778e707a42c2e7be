//! Error adapter for rendering Tooi diagnostics and errors with miette.
//!
//! This module provides the bridge between the lexer's diagnostic records,
//! the CLI's [`TooiError`] and miette's rich diagnostic formatting.

use std::{fmt, io::Write};

use log::warn;
use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, GraphicalTheme, LabeledSpan,
    SourceSpan,
};

use tooi_lexer::{Catalog, Diagnostic, DiagnosticSink, Severity};

use crate::TooiError;

/// Adapter for a single lexer diagnostic.
///
/// The snippet shown is the diagnostic's own source line; the catalog
/// description of its code becomes the help text.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
    /// Source line for displaying the snippet
    snippet: &'a str,
    /// Long description from the catalog
    help: Option<&'static str>,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, catalog: &Catalog) -> Self {
        let help = diag
            .code()
            .and_then(|code| catalog.lookup(code).ok())
            .map(|info| info.description);
        let snippet = diag.location().map_or("", |location| location.source_line());
        Self {
            diag,
            snippet,
            help,
        }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .short_code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diag.severity() {
            Severity::Warning => miette::Severity::Warning,
            Severity::Error | Severity::Fatal | Severity::Internal => miette::Severity::Error,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help.map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.diag.location()?;
        Some(&self.snippet as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let location = self.diag.location()?;
        let span = line_span(self.snippet, location.column(), location.span_len());
        let message = Some(format!("line {}, column {}", location.line(), location.column()));

        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(message, span),
        )))
    }
}

/// Convert a 1-based character column and length into a byte span within
/// `line`, clamped to the line.
fn line_span(line: &str, column: usize, len: usize) -> SourceSpan {
    let byte_at = |chars: usize| {
        line.char_indices()
            .nth(chars)
            .map_or(line.len(), |(offset, _)| offset)
    };
    let start = byte_at(column.saturating_sub(1));
    let end = byte_at(column.saturating_sub(1) + len.max(1));
    SourceSpan::new(start.into(), end - start)
}

/// Adapter for [`TooiError`] values that were not reported as diagnostics.
pub struct ErrorAdapter<'a>(pub &'a TooiError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TooiError::Io(_) => "tooi::io",
            TooiError::Config(_) => "tooi::config",
            TooiError::Read { .. } => "tooi::read",
            TooiError::Lexical { .. } => "tooi::lexical",
        };
        Some(Box::new(code))
    }
}

/// A sink that renders each diagnostic as a miette graphical report.
pub struct MietteSink<'c, W> {
    writer: W,
    handler: GraphicalReportHandler,
    catalog: &'c Catalog,
}

impl<'c, W: Write> MietteSink<'c, W> {
    pub fn new(writer: W, catalog: &'c Catalog, color: bool) -> Self {
        let theme = if color {
            GraphicalTheme::unicode()
        } else {
            GraphicalTheme::unicode_nocolor()
        };
        Self {
            writer,
            handler: GraphicalReportHandler::new_themed(theme),
            catalog,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticSink for MietteSink<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let adapter = DiagnosticAdapter::new(diagnostic, self.catalog);
        let mut rendered = String::new();
        if let Err(err) = self.handler.render_report(&mut rendered, &adapter) {
            warn!(err:%; "Failed to render diagnostic");
            return;
        }
        if let Err(err) = self.writer.write_all(rendered.as_bytes()) {
            warn!(err:%; "Failed to write diagnostic");
        }
    }
}

/// Render a [`TooiError`] as a graphical report.
pub fn render_error(err: &TooiError) -> String {
    let mut rendered = String::new();
    let handler = GraphicalReportHandler::new();
    if handler
        .render_report(&mut rendered, &ErrorAdapter(err))
        .is_err()
    {
        return err.to_string();
    }
    rendered
}
