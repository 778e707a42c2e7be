//! A sequence of scanning runs sharing one reporter.

use std::io::{self, Write};

use log::{debug, info};

use tooi_lexer::{Catalog, DiagnosticSink, ErrorCode, Reporter, scan};

/// Owns the long-lived [`Reporter`] and the output stream for token
/// listings. Each call to [`run`](Session::run) is one independent run: the
/// reporter's error flag is reset first.
pub struct Session<'c, S, W> {
    reporter: Reporter<'c, S>,
    out: W,
    show_tokens: bool,
    verbose: bool,
    runs: usize,
}

impl<'c, S: DiagnosticSink, W: Write> Session<'c, S, W> {
    pub fn new(catalog: &'c Catalog, sink: S, out: W) -> Self {
        Self {
            reporter: Reporter::new(catalog, sink),
            out,
            show_tokens: true,
            verbose: false,
            runs: 0,
        }
    }

    pub fn with_show_tokens(mut self, show_tokens: bool) -> Self {
        self.show_tokens = show_tokens;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Scan `source` as one run.
    ///
    /// Returns `Ok(false)` if the run had lexical errors, after reporting
    /// that the run is halting.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing the token listing fails.
    pub fn run(&mut self, source: &str) -> io::Result<bool> {
        self.runs += 1;
        self.reporter.reset();
        info!(run = self.runs, bytes = source.len(); "Starting run");

        if self.verbose {
            writeln!(self.out, "[run #{}] Processing {} bytes...", self.runs, source.len())?;
        }

        let tokens = scan(source, &mut self.reporter);

        if self.show_tokens {
            writeln!(self.out, "  Scanned {} tokens:", tokens.len())?;
            for token in &tokens {
                writeln!(self.out, "    {token}")?;
            }
        }
        self.out.flush()?;

        if self.reporter.had_error() {
            self.reporter
                .report_general(ErrorCode::InterpreterHaltingLexical, &[]);
            debug!(run = self.runs; "Run halted on lexical errors");
            return Ok(false);
        }
        Ok(true)
    }

    /// Report that the input for a run could not be read.
    pub fn report_read_error(&mut self, err: &io::Error) {
        self.reporter
            .report_general(ErrorCode::InterpreterStreamReadError, &[err]);
    }

    /// Number of runs started so far.
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Whether the most recent run had errors.
    pub fn had_error(&self) -> bool {
        self.reporter.had_error()
    }

    pub fn reporter(&self) -> &Reporter<'c, S> {
        &self.reporter
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_parts(self) -> (Reporter<'c, S>, W) {
        (self.reporter, self.out)
    }
}
