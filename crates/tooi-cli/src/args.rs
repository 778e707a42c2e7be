//! Command-line argument definitions for the Tooi CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input file (or the REPL), the
//! configuration file, diagnostic rendering and logging verbosity.

use clap::Parser;

use crate::config::{ColorChoice, DiagnosticFormat};

/// Command-line arguments for the Tooi interpreter
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a Tooi source file. Starts the REPL when omitted
    #[arg(help = "Path to the input file (omit to start the REPL)")]
    pub input: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Diagnostic format, overriding the configuration file
    #[arg(long, value_enum)]
    pub format: Option<DiagnosticFormat>,

    /// When to color diagnostics, overriding the configuration file
    #[arg(long, value_enum)]
    pub color: Option<ColorChoice>,

    /// Do not print the token listing
    #[arg(short, long)]
    pub quiet: bool,

    /// Announce every scanning run
    #[arg(short, long)]
    pub verbose: bool,
}
