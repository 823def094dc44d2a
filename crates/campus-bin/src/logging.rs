// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Logging and tracing initialization.
//!
//! This module provides utilities for setting up structured logging
//! using the `tracing` ecosystem.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::LogFormat;
use crate::error::{BinError, BinResult};

/// Directives appended to every filter to keep dependency noise down.
const QUIET_DEPENDENCIES: &[&str] = &["hyper=warn", "tower=warn", "axum=info", "tokio=info"];

// =============================================================================
// Logging Initialization
// =============================================================================

/// Initializes the logging subsystem.
///
/// `RUST_LOG`, when set, takes precedence over `level`.
///
/// # Example
///
/// ```ignore
/// use campus_bin::cli::LogFormat;
/// use campus_bin::logging::init_logging;
///
/// init_logging("info", LogFormat::Text)?;
/// ```
pub fn init_logging(level: &str, format: LogFormat) -> BinResult<()> {
    let filter = build_filter(level);

    let result = match format {
        LogFormat::Text => {
            let is_terminal = std::io::IsTerminal::is_terminal(&std::io::stdout());
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false)
                        .with_ansi(is_terminal),
                )
                .try_init()
        }
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init(),
        LogFormat::Compact => {
            let is_terminal = std::io::IsTerminal::is_terminal(&std::io::stdout());
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_file(false)
                        .with_line_number(false)
                        .with_ansi(is_terminal),
                )
                .try_init()
        }
    };

    result.map_err(|e| BinError::init(format!("Failed to initialize logging: {}", e)))
}

/// Builds the env filter for `level`.
fn build_filter(level: &str) -> EnvFilter {
    let base = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(parse_level(level).to_string()));

    QUIET_DEPENDENCIES
        .iter()
        .filter_map(|directive| directive.parse().ok())
        .fold(base, |filter, directive| filter.add_directive(directive))
}

// =============================================================================
// Log Level Parsing
// =============================================================================

/// Parses a log level string into a `Level`. Unknown names map to `INFO`.
pub fn parse_level(level: &str) -> Level {
    campus_config::LogLevel::parse(level)
        .map(|level| match level {
            campus_config::LogLevel::Trace => Level::TRACE,
            campus_config::LogLevel::Debug => Level::DEBUG,
            campus_config::LogLevel::Info => Level::INFO,
            campus_config::LogLevel::Warn => Level::WARN,
            campus_config::LogLevel::Error => Level::ERROR,
        })
        .unwrap_or(Level::INFO)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("Info"), Level::INFO);
        assert_eq!(parse_level("warning"), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
        assert_eq!(parse_level("invalid"), Level::INFO);
    }

    #[test]
    fn test_build_filter_accepts_directives() {
        let filter = build_filter("campus_api=debug,info");
        assert!(filter.to_string().contains("hyper=warn"));
    }

    #[test]
    fn test_build_filter_survives_garbage() {
        let _ = build_filter("not a [valid filter");
    }
}
