//! CLI module for unitgen
//!
//! This module provides the command-line interface over the emitter.
//!
//! ## Commands
//!
//! - `emit <BODY_FILE>` - Render a body template into a compilation unit
//! - `shorten <NAME>...` - Show how each name renders, in claim order
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

use clap::{Args, Parser, Subcommand};
use unitgen_core::QualifiedName;

use crate::emit::FeatureSet;

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
    /// Create a new CLI error with a message and exit code.
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

/// Incremental Java compilation-unit emitter
#[derive(Parser, Debug)]
#[command(name = "unitgen")]
#[command(version = VERSION)]
#[command(about = "Emit Java compilation units with shortened type names", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Construction inputs shared by every command.
#[derive(Args, Debug, Clone)]
pub struct UnitArgs {
    /// Type the unit is generated for (e.g. `com.example.Widget` or `com.example:Widget`)
    #[arg(long, value_name = "NAME")]
    pub target: QualifiedName,

    /// Implicitly generated companion type whose simple name is reserved (repeatable)
    #[arg(long = "companion", value_name = "NAME")]
    pub companions: Vec<QualifiedName>,

    /// Treat `java.lang` types as implicitly visible
    #[arg(long)]
    pub java_lang: bool,

    /// Feature passed through to the unit, as `name=value` (repeatable)
    #[arg(long = "feature", value_name = "NAME=VALUE", value_parser = parse_feature)]
    pub features: Vec<(String, String)>,
}

impl UnitArgs {
    pub fn feature_set(&self) -> FeatureSet {
        self.features
            .iter()
            .fold(FeatureSet::new(), |set, (name, value)| set.with_feature(name, value))
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a body template into a compilation unit
    Emit {
        #[command(flatten)]
        unit: UnitArgs,
        /// Body template; `${name}` marks a type reference, `$$` a literal `$`
        #[arg(value_name = "BODY_FILE")]
        body: PathBuf,
        /// Splice `import` declarations after the package line
        #[arg(long)]
        with_imports: bool,
        /// Print a JSON report (source, scope bindings, imports) instead of the source
        #[arg(long)]
        json: bool,
    },

    /// Show how each name renders, in claim order
    Shorten {
        #[command(flatten)]
        unit: UnitArgs,
        /// Names to shorten, in order
        #[arg(value_name = "NAME", required = true)]
        names: Vec<QualifiedName>,
    },
}

fn parse_feature(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got `{raw}`")),
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
    match cli.command {
        Command::Emit {
            unit,
            body,
            with_imports,
            json,
        } => commands::emit_file(&unit, &body, with_imports, json),
        Command::Shorten { unit, names } => commands::shorten_names(&unit, &names),
    }
}

// ============================================================================
// Tests
// ============================================================================
