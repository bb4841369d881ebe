//! CLI module for the Epoch analysis tooling
//!
//! This module provides a command-line host for the analysis core, mainly useful for checking a project from a
//! shell or a CI job and for inspecting what the editor integration would see.
//!
//! ## Commands
//!
//! - `check [path]` - Parse every source file and report syntax errors
//! - `symbols <path> --file F --line L --column C` - List the variables visible at a position
//! - `signatures [path]` - List every function overload in the project
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::config::{AnalysisConfig, DEFAULT_EXTENSION};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Source analysis for the Epoch programming language
#[derive(Parser, Debug)]
#[command(name = "epoch")]
#[command(version = VERSION)]
#[command(about = "Source analysis for the Epoch programming language", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Source file extension to collect (without the dot)
    #[arg(long, global = true, value_name = "EXT", default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    // Debug/development flags
    /// Tokenize only (debug)
    #[arg(long = "lex", value_name = "FILE")]
    pub lex_file: Option<PathBuf>,

    /// Parse only (debug)
    #[arg(long = "parse", value_name = "FILE", conflicts_with = "lex_file")]
    pub parse_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse every source file and report syntax errors
    Check {
        /// Project directory or single source file
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,
    },

    /// List the variables visible at a source position
    Symbols {
        /// Project directory or single source file
        #[arg(value_name = "PATH")]
        path: PathBuf,
        /// File to query
        #[arg(long, value_name = "FILE")]
        file: PathBuf,
        /// 1-based line
        #[arg(long)]
        line: u32,
        /// 1-based column
        #[arg(long)]
        column: u32,
    },

    /// List every function overload in the project
    Signatures {
        /// Project directory or single source file
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,
    },
}

impl Cli {
    fn config(&self) -> AnalysisConfig {
        AnalysisConfig::new().with_extension(self.extension.as_str())
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.config();

    // Handle debug flags first
    if let Some(file) = &cli.lex_file {
        return commands::lex_file(file);
    }
    if let Some(file) = &cli.parse_file {
        return commands::parse_file(file);
    }

    match cli.command {
        Some(Command::Check { path }) => commands::check(&path, config),
        Some(Command::Symbols {
            path,
            file,
            line,
            column,
        }) => commands::symbols(&path, config, &file, line, column),
        Some(Command::Signatures { path }) => commands::signatures(&path, config),
        // No command - show help
        None => Err(CliError::failure("no command given; run `epoch --help` for usage")),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check_defaults_to_current_dir() {
        let cli = Cli::try_parse_from(["epoch", "check"]).unwrap();
        if let Some(Command::Check { path }) = cli.command {
            assert_eq!(path, PathBuf::from("."));
        } else {
            panic!("Expected Check command");
        }
        assert_eq!(cli.extension, "epoch");
    }

    #[test]
    fn test_cli_parse_symbols() {
        let cli = Cli::try_parse_from([
            "epoch", "symbols", "proj", "--file", "proj/main.epoch", "--line", "3", "--column", "7",
        ])
        .unwrap();
        if let Some(Command::Symbols { line, column, file, .. }) = cli.command {
            assert_eq!((line, column), (3, 7));
            assert_eq!(file, PathBuf::from("proj/main.epoch"));
        } else {
            panic!("Expected Symbols command");
        }
    }

    #[test]
    fn test_cli_symbols_requires_position() {
        assert!(Cli::try_parse_from(["epoch", "symbols", "proj", "--file", "a.epoch"]).is_err());
    }

    #[test]
    fn test_cli_global_extension() {
        let cli = Cli::try_parse_from(["epoch", "signatures", "src", "--extension", ".ep"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Signatures { .. })));
        assert_eq!(cli.config().extension, "ep");
    }

    #[test]
    fn test_cli_parse_debug_flags() {
        let cli = Cli::try_parse_from(["epoch", "--lex", "test.epoch"]).unwrap();
        assert!(cli.lex_file.is_some());

        let cli = Cli::try_parse_from(["epoch", "--parse", "test.epoch"]).unwrap();
        assert!(cli.parse_file.is_some());

        assert!(Cli::try_parse_from(["epoch", "--lex", "a.epoch", "--parse", "b.epoch"]).is_err());
    }
}
