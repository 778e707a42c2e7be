//! # Tooi Lexer
//!
//! The lexical front end of the Tooi language. This crate converts source
//! text into classified [`Token`]s and reports recoverable lexical errors as
//! structured diagnostics.
//!
//! ## Components
//!
//! - [`error`] - error codes, severities and the immutable [`Catalog`]
//! - [`report`] - the [`Reporter`] and the [`DiagnosticSink`]s it writes to
//! - [`token`] - token kinds, literal values and the token record
//! - [`Scanner`] - the scanning state machine
//!
//! ## Usage
//!
//! ```
//! # use tooi_lexer::{Catalog, CollectingSink, Reporter, TokenKind, scan};
//!
//! let catalog = Catalog::standard();
//! let mut reporter = Reporter::new(&catalog, CollectingSink::new());
//!
//! let tokens = scan("let answer = 42u32;", &mut reporter);
//!
//! assert_eq!(tokens[0].kind(), TokenKind::Let);
//! assert_eq!(tokens.last().map(|t| t.kind()), Some(TokenKind::EndOfFile));
//! assert!(!reporter.had_error());
//! ```

pub mod error;
pub mod report;
mod scanner;
mod span;
pub mod token;

pub use error::{Catalog, Diagnostic, ErrorCode, Severity, SourceLocation};
pub use report::{CollectingSink, DiagnosticSink, Reporter, TextSink};
pub use scanner::Scanner;
pub use span::Span;
pub use token::{Literal, Token, TokenKind};

/// Scan `source` into tokens, reporting lexical errors through `reporter`.
///
/// This is the main entry point of the crate. It never fails: lexical errors
/// are reported, marked with [`TokenKind::Error`] tokens, and scanning goes
/// on. Check [`Reporter::had_error`] afterwards to decide whether the run
/// failed.
///
/// The result always ends with exactly one [`TokenKind::EndOfFile`] token.
pub fn scan<'src, S: DiagnosticSink>(
    source: &'src str,
    reporter: &mut Reporter<'_, S>,
) -> Vec<Token<'src>> {
    Scanner::new(source, reporter).scan_tokens()
}
