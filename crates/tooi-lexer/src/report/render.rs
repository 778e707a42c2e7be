//! Plain-text rendering of diagnostics.
//!
//! A located diagnostic renders as three lines:
//!
//! ```text
//! Error [line 1:5]: Unterminated string literal.
//!   | let "abc
//!   |     ^
//! ```
//!
//! A diagnostic without a location renders as the header alone.

use crate::error::{Diagnostic, Severity};

const GUTTER: &str = "  | ";
const RESET: &str = "\x1b[0m";

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Warning => "\x1b[33m",
        Severity::Error => "\x1b[31m",
        Severity::Fatal => "\x1b[1;31m",
        Severity::Internal => "\x1b[35m",
    }
}

/// Render `diagnostic` in the plain text format, optionally with ANSI colors.
///
/// Columns and underline lengths below 1 are clamped to 1. Tabs in the source
/// line before the column are reproduced in the padding so the carets line up
/// whatever the terminal's tab width.
pub fn render_plain(diagnostic: &Diagnostic, color: bool) -> String {
    let (paint, reset) = if color {
        (severity_color(diagnostic.severity()), RESET)
    } else {
        ("", "")
    };
    let label = diagnostic.severity().label();

    let Some(location) = diagnostic.location() else {
        return format!("{paint}{label}{reset}: {}\n", diagnostic.message());
    };

    let column = location.column().max(1);
    let span_len = location.span_len().max(1);
    let source_line = location.source_line();

    let mut out = format!(
        "{paint}{label}{reset} [line {}:{column}]: {}\n",
        location.line(),
        diagnostic.message()
    );
    out.push_str(GUTTER);
    out.push_str(source_line);
    out.push('\n');

    out.push_str(GUTTER);
    let mut line_chars = source_line.chars();
    for _ in 1..column {
        match line_chars.next() {
            Some('\t') => out.push('\t'),
            _ => out.push(' '),
        }
    }
    out.push_str(paint);
    out.extend(std::iter::repeat_n('^', span_len));
    out.push_str(reset);
    out.push('\n');

    out
}
