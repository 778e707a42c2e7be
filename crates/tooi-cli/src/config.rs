//! Configuration file loading for the CLI
//!
//! This module defines the TOML configuration model and handles finding and
//! loading it from various locations (explicit path, local directory, system
//! directory).

use std::{
    fs,
    io::{self, IsTerminal},
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use crate::Args;

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// How diagnostics are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticFormat {
    /// Header, source line and caret underline
    #[default]
    Plain,
    /// Rich graphical report
    Fancy,
}

/// When diagnostics are colored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when standard error is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolve the choice against the current standard error stream.
    pub fn enabled(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stderr().is_terminal(),
        }
    }
}

/// Application configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Diagnostic rendering section
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,

    /// Run output section
    #[serde(default)]
    pub output: OutputConfig,

    /// Interactive prompt section
    #[serde(default)]
    pub repl: ReplConfig,
}

/// Diagnostic rendering section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DiagnosticsConfig {
    #[serde(default)]
    pub format: DiagnosticFormat,

    #[serde(default)]
    pub color: ColorChoice,
}

/// Run output section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print the token listing after every run
    pub show_tokens: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { show_tokens: true }
    }
}

/// Interactive prompt section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Prompt shown when no block is pending
    pub prompt: String,

    /// Prompt shown while a block is being accumulated
    pub continuation_prompt: String,

    /// Line that leaves the REPL when typed at the primary prompt
    pub exit_command: String,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "tooi> ".to_string(),
            continuation_prompt: "  ... ".to_string(),
            exit_command: "@exit;".to_string(),
        }
    }
}

impl AppConfig {
    /// Apply command-line overrides on top of file values.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(format) = args.format {
            self.diagnostics.format = format;
        }
        if let Some(color) = args.color {
            self.diagnostics.color = color;
        }
        if args.quiet {
            self.output.show_tokens = false;
        }
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (tooi/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path to config file
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be read or parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ConfigError> {
    // 1. Try the explicitly provided path first if available
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    // 2. Try the local project directory
    let local_config = Path::new("tooi/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    // 3. Try the platform-specific config directory
    if let Some(proj_dirs) = ProjectDirs::from("dev", "tooi", "tooi") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    // 4. If no config is found, return default config
    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(&content)
}

/// Parse configuration from TOML text.
fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
}
