// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for the campus binary.

use thiserror::Error;

/// Result type alias for campus-bin operations.
pub type BinResult<T> = Result<T, BinError>;

/// Errors that can occur in the campus binary.
#[derive(Debug, Error)]
pub enum BinError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Initialization error.
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// Runtime error.
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// API error.
    #[error("API error: {0}")]
    Api(#[from] campus_api::ApiError),

    /// Config parsing error.
    #[error("Config error: {0}")]
    Config(#[from] campus_config::ConfigError),

    /// Core error.
    #[error("Core error: {0}")]
    Core(#[from] campus_core::CoreError),

    /// Error with added context.
    #[error("{context}: {source}")]
    WithContext {
        /// The context description.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<BinError>,
    },
}

impl BinError {
    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates an initialization error.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Initialization(msg.into())
    }

    /// Creates a runtime error.
    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    /// Adds context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) | Self::Config(_) => 1,
            Self::Initialization(_) => 2,
            Self::Runtime(_) => 3,
            Self::Io(_) => 4,
            Self::Api(_) => 5,
            Self::Core(_) => 6,
            Self::WithContext { source, .. } => source.exit_code(),
        }
    }
}

impl From<std::io::Error> for BinError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// =============================================================================
// Error Reporting
// =============================================================================

/// Writes the error and its cause chain to stderr.
pub fn report_error(error: &BinError) {
    eprintln!("Error: {}", error);

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  Caused by: {}", cause);
        source = cause.source();
    }
}

/// Reports an error and exits with its code.
pub fn report_error_and_exit(error: BinError) -> ! {
    report_error(&error);
    std::process::exit(error.exit_code())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = BinError::config("missing secret");
        assert_eq!(err.to_string(), "Configuration error: missing secret");
    }

    #[test]
    fn test_error_with_context() {
        let err = BinError::init("store").with_context("startup");
        assert_eq!(err.to_string(), "startup: Initialization error: store");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            BinError::config("x").exit_code(),
            BinError::init("x").exit_code(),
            BinError::runtime("x").exit_code(),
            BinError::from(std::io::Error::other("x")).exit_code(),
            BinError::from(campus_api::ApiError::internal("x")).exit_code(),
            BinError::from(campus_core::CoreError::internal("x")).exit_code(),
        ];
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_io_error_conversion() {
        let err = BinError::from(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "stdin closed",
        ));
        assert_eq!(err.to_string(), "I/O error: stdin closed");
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_config_error_maps_to_configuration_code() {
        let err = BinError::from(campus_config::ConfigError::missing_field("auth.jwt_secret"));
        assert_eq!(err.exit_code(), 1);
    }
}
