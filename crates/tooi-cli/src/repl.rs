//! The interactive read-scan-print loop.
//!
//! Input is accumulated into blocks by [`BlockBuffer`]:
//!
//! - the exit command at the primary prompt leaves the loop
//! - an empty line submits the pending block (and is ignored if none is pending)
//! - a first line ending in `;` is submitted immediately
//! - any other line is appended and the continuation prompt is shown
//!
//! End of input submits whatever is pending and leaves the loop.

use std::io::{self, BufRead, Write};

use log::{debug, info};

use tooi_lexer::DiagnosticSink;

use crate::{config::ReplConfig, session::Session};

/// What a line of input asks the loop to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Leave the loop.
    Exit,
    /// Run this block.
    Submit(String),
    /// Keep reading with the continuation prompt.
    Pending,
    /// Nothing to do.
    Ignored,
}

/// Accumulates input lines into runnable blocks.
#[derive(Debug)]
pub struct BlockBuffer {
    block: String,
    exit_command: String,
}

impl BlockBuffer {
    pub fn new(exit_command: impl Into<String>) -> Self {
        Self {
            block: String::new(),
            exit_command: exit_command.into(),
        }
    }

    /// Returns `true` while a block is pending.
    pub fn is_continuing(&self) -> bool {
        !self.block.is_empty()
    }

    /// Feed one line, without its line terminator.
    pub fn push_line(&mut self, line: &str) -> LineOutcome {
        if !self.is_continuing() && line == self.exit_command {
            return LineOutcome::Exit;
        }

        if line.is_empty() {
            return match self.take() {
                Some(block) => LineOutcome::Submit(block),
                None => LineOutcome::Ignored,
            };
        }

        let first_line = !self.is_continuing();
        self.block.push_str(line);
        self.block.push('\n');

        if first_line && line.trim_end().ends_with(';') {
            return LineOutcome::Submit(std::mem::take(&mut self.block));
        }
        LineOutcome::Pending
    }

    /// Take the pending block at end of input.
    pub fn finish(&mut self) -> Option<String> {
        self.take()
    }

    fn take(&mut self) -> Option<String> {
        if self.block.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.block))
        }
    }
}

/// The interactive loop.
pub struct Repl<'a> {
    config: &'a ReplConfig,
}

impl<'a> Repl<'a> {
    pub fn new(config: &'a ReplConfig) -> Self {
        Self { config }
    }

    /// Read lines from `input` until the exit command or end of input,
    /// running each completed block through `session`. Prompts and banners go
    /// to the session's output.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails. Lexical
    /// errors in a block are reported and the loop continues.
    pub fn run<S, W, R>(&self, session: &mut Session<'_, S, W>, mut input: R) -> io::Result<()>
    where
        S: DiagnosticSink,
        W: Write,
        R: BufRead,
    {
        let mut buffer = BlockBuffer::new(self.config.exit_command.as_str());
        let mut line = String::new();

        writeln!(
            session.output_mut(),
            "Welcome to Tooi REPL! Finish a block with an empty line. \
             End of input or {} quits.",
            self.config.exit_command
        )?;
        info!("REPL started");

        loop {
            let prompt = if buffer.is_continuing() {
                &self.config.continuation_prompt
            } else {
                &self.config.prompt
            };
            write!(session.output_mut(), "{prompt}")?;
            session.output_mut().flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(session.output_mut())?;
                if let Some(block) = buffer.finish() {
                    session.run(&block)?;
                }
                break;
            }

            let text = line.strip_suffix('\n').unwrap_or(&line);
            let text = text.strip_suffix('\r').unwrap_or(text);

            match buffer.push_line(text) {
                LineOutcome::Exit => break,
                LineOutcome::Submit(block) => {
                    debug!(bytes = block.len(); "Submitting block");
                    session.run(&block)?;
                }
                LineOutcome::Pending | LineOutcome::Ignored => {}
            }
        }

        writeln!(session.output_mut(), "Exiting Tooi REPL.")?;
        info!(runs = session.runs(); "REPL finished");
        Ok(())
    }
}
