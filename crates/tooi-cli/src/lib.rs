//! CLI logic for the Tooi interpreter.
//!
//! This module wires configuration, the diagnostic sink and the scanning
//! [`Session`] together, then either scans a file or starts the REPL.

pub mod error_adapter;

mod args;
mod config;
mod error;
mod repl;
mod session;

pub use args::Args;
pub use config::{AppConfig, ColorChoice, ConfigError, DiagnosticFormat, ReplConfig};
pub use error::TooiError;
pub use repl::{BlockBuffer, LineOutcome, Repl};
pub use session::Session;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use tooi_lexer::{Catalog, DiagnosticSink, TextSink};

use error_adapter::MietteSink;

/// Run the Tooi CLI application
///
/// Scans the input file when one is given, otherwise starts the REPL on
/// standard input. Token listings go to standard output and diagnostics to
/// standard error.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TooiError` for:
/// - Configuration loading errors
/// - An unreadable input file
/// - Lexical errors in the input file
/// - I/O errors on the standard streams
pub fn run(args: &Args) -> Result<(), TooiError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    app_config.apply_args(args);

    let catalog = Catalog::global();
    let sink = make_sink(&app_config, catalog);

    let stdout = io::stdout();
    let mut session = Session::new(catalog, sink, stdout.lock())
        .with_show_tokens(app_config.output.show_tokens)
        .with_verbose(args.verbose);

    match &args.input {
        Some(path) => run_file(&mut session, path),
        None => {
            let stdin = io::stdin();
            Repl::new(&app_config.repl).run(&mut session, stdin.lock())?;
            Ok(())
        }
    }
}

/// Scan the file at `path` as a single run.
///
/// # Errors
///
/// Returns [`TooiError::Read`] if the file cannot be read and
/// [`TooiError::Lexical`] if scanning reported errors. Both have already
/// been reported through the session's sink.
pub fn run_file<S, W>(session: &mut Session<'_, S, W>, path: &str) -> Result<(), TooiError>
where
    S: DiagnosticSink,
    W: Write,
{
    info!(path; "Scanning file");

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(source) => {
            session.report_read_error(&source);
            return Err(TooiError::Read {
                path: path.to_string(),
                source,
            });
        }
    };

    if session.run(&source)? {
        info!(path; "File scanned without errors");
        Ok(())
    } else {
        Err(TooiError::Lexical {
            path: path.to_string(),
        })
    }
}

fn make_sink(config: &AppConfig, catalog: &'static Catalog) -> Box<dyn DiagnosticSink> {
    let color = config.diagnostics.color.enabled();
    match config.diagnostics.format {
        DiagnosticFormat::Plain => Box::new(TextSink::stderr().with_color(color)),
        DiagnosticFormat::Fancy => Box::new(MietteSink::new(io::stderr(), catalog, color)),
    }
}

#[cfg(test)]
mod tests {
    use tooi_lexer::{CollectingSink, ErrorCode};

    use super::*;

    #[test]
    fn test_run_file_missing_input_is_reported() {
        let catalog = Catalog::standard();
        let mut session = Session::new(&catalog, CollectingSink::new(), Vec::new());

        let err = run_file(&mut session, "no/such/file.tooi").unwrap_err();

        assert!(matches!(err, TooiError::Read { .. }));
        assert!(err.is_reported());
        assert_eq!(
            session.reporter().sink().diagnostics()[0].code(),
            Some(ErrorCode::InterpreterStreamReadError)
        );
        assert_eq!(session.runs(), 0);
    }
}
