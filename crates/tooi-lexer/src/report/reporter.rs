use std::fmt::Display;

use log::warn;

use super::DiagnosticSink;
use crate::error::{
    Catalog, CatalogError, Diagnostic, ErrorCode, Severity, SourceLocation, TemplateError,
    format_template,
};

/// Builds diagnostics from catalog codes and tracks whether a run failed.
///
/// The "had error" flag is sticky: once set it stays set until [`reset`]
/// is called, which callers do at the start of every run. Warnings never
/// set it.
///
/// Reporting never fails. An unknown code or a template that cannot be
/// formatted degrades to an [`Severity::Internal`] diagnostic describing the
/// failure.
///
/// [`reset`]: Reporter::reset
pub struct Reporter<'c, S> {
    catalog: &'c Catalog,
    sink: S,
    had_error: bool,
}

struct Resolved {
    severity: Severity,
    code: ErrorCode,
    short_code: Option<&'static str>,
    message: String,
}

impl<'c, S: DiagnosticSink> Reporter<'c, S> {
    pub fn new(catalog: &'c Catalog, sink: S) -> Self {
        Self {
            catalog,
            sink,
            had_error: false,
        }
    }

    /// Report `code` at a source location, formatting its template with `args`.
    pub fn report(&mut self, location: SourceLocation, code: ErrorCode, args: &[&dyn Display]) {
        let resolved = self.resolve(code, args);
        self.emit(resolved, Some(location));
    }

    /// Report `code` with no source location.
    pub fn report_general(&mut self, code: ErrorCode, args: &[&dyn Display]) {
        let resolved = self.resolve(code, args);
        self.emit(resolved, None);
    }

    /// Report a literal message, bypassing the catalog.
    pub fn report_message(
        &mut self,
        location: Option<SourceLocation>,
        severity: Severity,
        message: impl Into<String>,
    ) {
        let mut diagnostic = Diagnostic::new(severity, message);
        if let Some(location) = location {
            diagnostic = diagnostic.with_location(location);
        }
        self.dispatch(diagnostic);
    }

    /// Returns `true` if anything at error severity or above was reported
    /// since the last [`reset`](Reporter::reset).
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn reset(&mut self) {
        self.had_error = false;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn resolve(&self, code: ErrorCode, args: &[&dyn Display]) -> Resolved {
        let info = match self.catalog.lookup(code) {
            Ok(info) => info,
            Err(err) => return self.unknown_code(code, &err),
        };

        match format_template(info.message_template, args) {
            Ok(message) => Resolved {
                severity: info.severity,
                code,
                short_code: Some(info.short_code),
                message,
            },
            Err(err) => self.format_failure(code, &err),
        }
    }

    fn unknown_code(&self, code: ErrorCode, err: &CatalogError) -> Resolved {
        warn!(code:% = code, err:%; "Reporting an error code missing from the catalog");
        self.fallback(
            ErrorCode::RegistryUnknownErrorCode,
            &[&code.id()],
            format!(
                "Internal Error: Failed to report error code {} - {err}",
                code.id()
            ),
        )
    }

    fn format_failure(&self, code: ErrorCode, err: &TemplateError) -> Resolved {
        warn!(code:% = code, err:%; "Failed to format diagnostic message");
        self.fallback(
            ErrorCode::RegistryMessageFormatFailure,
            &[&code.id(), err],
            format!(
                "Internal Error: Failed to format message for error code {} - {err}",
                code.id()
            ),
        )
    }

    /// Describe a reporting failure through the registry entry `code`, or
    /// through `literal` if that entry is itself unusable.
    fn fallback(&self, code: ErrorCode, args: &[&dyn Display], literal: String) -> Resolved {
        let entry = self.catalog.lookup(code).ok().and_then(|info| {
            format_template(info.message_template, args)
                .ok()
                .map(|message| (info.short_code, message))
        });
        let (short_code, message) = match entry {
            Some((short_code, message)) => (Some(short_code), message),
            None => (None, literal),
        };

        Resolved {
            severity: Severity::Internal,
            code,
            short_code,
            message,
        }
    }

    fn emit(&mut self, resolved: Resolved, location: Option<SourceLocation>) {
        let mut diagnostic = Diagnostic::new(resolved.severity, resolved.message);
        if let Some(short_code) = resolved.short_code {
            diagnostic = diagnostic.with_code(resolved.code, short_code);
        }
        if let Some(location) = location {
            diagnostic = diagnostic.with_location(location);
        }
        self.dispatch(diagnostic);
    }

    fn dispatch(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().sets_error_flag() {
            self.had_error = true;
        }
        self.sink.emit(&diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorInfo, report::CollectingSink};

    fn location() -> SourceLocation {
        SourceLocation::new(1, 3, 2, "1.2.3")
    }

    #[test]
    fn test_report_formats_template() {
        let catalog = Catalog::standard();
        let mut reporter = Reporter::new(&catalog, CollectingSink::new());

        reporter.report(location(), ErrorCode::ScannerInvalidNumericSuffix, &[&"xyz"]);

        let diag = &reporter.sink().diagnostics()[0];
        assert_eq!(diag.message(), "Invalid numeric suffix: 'xyz'.");
        assert_eq!(diag.code(), Some(ErrorCode::ScannerInvalidNumericSuffix));
        assert_eq!(diag.short_code(), Some("E_SCANNER_INVALID_SUFFIX"));
        assert_eq!(diag.location(), Some(&location()));
        assert!(reporter.had_error());
    }

    #[test]
    fn test_report_general_has_no_location() {
        let catalog = Catalog::standard();
        let mut reporter = Reporter::new(&catalog, CollectingSink::new());

        reporter.report_general(ErrorCode::InterpreterHaltingLexical, &[]);

        let diag = &reporter.sink().diagnostics()[0];
        assert_eq!(diag.severity(), Severity::Fatal);
        assert!(diag.location().is_none());
        assert!(reporter.had_error());
    }

    #[test]
    fn test_reset_clears_flag() {
        let catalog = Catalog::standard();
        let mut reporter = Reporter::new(&catalog, CollectingSink::new());

        reporter.report(location(), ErrorCode::ScannerMultipleDecimals, &[]);
        assert!(reporter.had_error());

        reporter.reset();
        assert!(!reporter.had_error());
        assert_eq!(reporter.sink().len(), 1);
    }

    #[test]
    fn test_warning_does_not_set_flag() {
        let catalog = Catalog::standard();
        let mut reporter = Reporter::new(&catalog, CollectingSink::new());

        reporter.report_message(Some(location()), Severity::Warning, "suspicious");

        assert!(!reporter.had_error());
        assert_eq!(reporter.sink().diagnostics()[0].message(), "suspicious");
        assert_eq!(reporter.sink().diagnostics()[0].code(), None);
    }

    #[test]
    fn test_unknown_code_degrades_to_internal() {
        let catalog = Catalog::from_entries(
            Catalog::standard()
                .iter()
                .filter(|info| info.id != ErrorCode::ScannerUnterminatedString)
                .cloned(),
        );
        let mut reporter = Reporter::new(&catalog, CollectingSink::new());

        reporter.report(location(), ErrorCode::ScannerUnterminatedString, &[]);

        let diag = &reporter.sink().diagnostics()[0];
        assert_eq!(diag.severity(), Severity::Internal);
        assert_eq!(diag.code(), Some(ErrorCode::RegistryUnknownErrorCode));
        assert_eq!(diag.message(), "Unknown internal error code encountered: 101.");
        assert!(diag.location().is_some());
        assert!(reporter.had_error());
    }

    #[test]
    fn test_unknown_code_without_fallback_entry() {
        let catalog = Catalog::from_entries(Vec::<ErrorInfo>::new());
        let mut reporter = Reporter::new(&catalog, CollectingSink::new());

        reporter.report_general(ErrorCode::InterpreterStreamReadError, &[&"eof"]);

        let diag = &reporter.sink().diagnostics()[0];
        assert_eq!(diag.severity(), Severity::Internal);
        assert_eq!(diag.code(), None);
        assert_eq!(
            diag.message(),
            "Internal Error: Failed to report error code 500 - unknown error code requested: 500"
        );
    }

    #[test]
    fn test_format_failure_degrades_to_internal() {
        let catalog = Catalog::standard();
        let mut reporter = Reporter::new(&catalog, CollectingSink::new());

        // The template takes one argument.
        reporter.report(location(), ErrorCode::ScannerInvalidNumericSuffix, &[]);

        let diag = &reporter.sink().diagnostics()[0];
        assert_eq!(diag.severity(), Severity::Internal);
        assert_eq!(diag.code(), Some(ErrorCode::RegistryMessageFormatFailure));
        assert_eq!(
            diag.message(),
            "Failed to format message for error code 112: placeholder 0 has no argument (0 provided)."
        );
        assert!(reporter.had_error());
    }

    #[test]
    fn test_failing_argument_degrades_to_internal() {
        struct Unprintable;

        impl std::fmt::Display for Unprintable {
            fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                Err(std::fmt::Error)
            }
        }

        let catalog = Catalog::standard();
        let mut reporter = Reporter::new(&catalog, CollectingSink::new());

        reporter.report(location(), ErrorCode::ScannerInvalidNumericSuffix, &[&Unprintable]);

        let diag = &reporter.sink().diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::RegistryMessageFormatFailure));
        assert_eq!(
            diag.message(),
            "Failed to format message for error code 112: argument 0 failed to format."
        );
    }
}
