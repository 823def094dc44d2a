// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Core error type.
//!
//! Every store and credential operation reports failures through
//! [`CoreError`]. The API layer maps each variant onto an HTTP status.
//!
//! # Examples
//!
//! ```
//! use campus_core::error::CoreError;
//!
//! let error = CoreError::not_found("Course", 42);
//! assert!(error.is_not_found());
//! assert_eq!(error.to_string(), "Course 42 not found");
//! ```

use std::fmt;

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// CoreError
// =============================================================================

/// Errors produced by the record store and the credential component.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced record does not exist.
    #[error("{entity} {key} not found")]
    NotFound {
        /// Kind of record that was looked up.
        entity: &'static str,
        /// The key that was looked up (id, username, ...).
        key: String,
    },

    /// A uniqueness or referential constraint would be violated.
    #[error("Conflict: {message}")]
    Conflict {
        /// Error message.
        message: String,
    },

    /// Input rejected before touching the store.
    #[error("Validation failed: {message}")]
    Validation {
        /// Error message.
        message: String,
    },

    /// Password hashing or hash parsing failed.
    #[error("Credential error: {message}")]
    Credential {
        /// Error message.
        message: String,
    },

    /// Unexpected failure inside the store.
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl CoreError {
    /// Creates a not found error.
    pub fn not_found(entity: &'static str, key: impl fmt::Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a credential error.
    pub fn credential(message: impl Into<String>) -> Self {
        Self::Credential {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` for [`CoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for [`CoreError::Conflict`].
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

// =============================================================================
// Tests
// =============================================================================
