// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Command-line interface definitions.
//!
//! This module defines the CLI structure using clap's derive API.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Campus records service.
///
/// A role-gated HTTP API over departments, courses, students, professors,
/// registrations, exams and announcements.
#[derive(Debug, Parser)]
#[command(name = "campus")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(
        short,
        long,
        default_value = "campus.yaml",
        env = "CAMPUS_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    ///
    /// Falls back to `logging.level` from the configuration file.
    #[arg(short, long, env = "CAMPUS_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Log output format.
    ///
    /// Falls back to `logging.format` from the configuration file.
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// JSON format for log aggregation.
    Json,
    /// Compact single-line format.
    Compact,
}

impl From<campus_config::LogFormat> for LogFormat {
    fn from(format: campus_config::LogFormat) -> Self {
        match format {
            campus_config::LogFormat::Text => LogFormat::Text,
            campus_config::LogFormat::Json => LogFormat::Json,
            campus_config::LogFormat::Compact => LogFormat::Compact,
        }
    }
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Start the API server (default).
    Run(RunArgs),

    /// Validate the configuration file.
    Validate(ValidateArgs),

    /// Show version information.
    Version,

    /// Hash a password for `bootstrap.admin.password_hash`.
    HashPassword(HashPasswordArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Populate demo records at startup, overriding `bootstrap.demo_data`.
    #[arg(long)]
    pub demo_data: bool,
}

/// Arguments for the `validate` command.
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Print the parsed configuration with secrets masked.
    #[arg(long)]
    pub show_config: bool,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for the `validate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON.
    Json,
}

/// Arguments for the `hash-password` command.
#[derive(Debug, Clone, Args)]
pub struct HashPasswordArgs {
    /// Password to hash.
    #[arg(required_unless_present = "stdin", conflicts_with = "stdin")]
    pub password: Option<String>,

    /// Read the password from the first line of standard input.
    #[arg(long)]
    pub stdin: bool,
}

// =============================================================================
// CLI Helpers
// =============================================================================

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the command to execute, defaulting to `run`.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Run(RunArgs::default()))
    }

    /// Returns true if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Returns the log level to use.
    ///
    /// `-q` and `-v` win over the explicit level, which wins over `fallback`.
    pub fn effective_log_level(&self, fallback: &str) -> String {
        if self.quiet {
            "warn".to_string()
        } else if self.verbose {
            "debug".to_string()
        } else {
            self.log_level
                .clone()
                .unwrap_or_else(|| fallback.to_string())
        }
    }

    /// Returns the log format to use.
    pub fn effective_log_format(&self, fallback: LogFormat) -> LogFormat {
        self.log_format.unwrap_or(fallback)
    }
}

// =============================================================================
// Tests
// =============================================================================
