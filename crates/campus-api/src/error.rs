// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API error types and handling.
//!
//! Every error renders as `{code, message|error, details?}`. Authentication
//! and authorization failures (401 token errors, 403) carry the text under
//! `message`; everything else uses `error`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use campus_core::CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::TokenError;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// ApiError
// =============================================================================

/// API error type with HTTP status code mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, expired or invalid token (401).
    #[error("{0}")]
    Unauthenticated(#[from] TokenError),

    /// Login failed (401). Unknown user and wrong password are identical.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Authenticated but not permitted (403).
    #[error("{message}")]
    Forbidden {
        /// Error message.
        message: String,
    },

    /// Missing or malformed request fields (400).
    #[error("{message}")]
    Validation {
        /// Error message.
        message: String,
        /// Field-specific errors.
        errors: Option<ValidationErrors>,
    },

    /// Unparseable request (400).
    #[error("{message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Referenced record does not exist (404).
    #[error("{message}")]
    NotFound {
        /// Error message.
        message: String,
    },

    /// Uniqueness or reference conflict (409).
    #[error("{message}")]
    Conflict {
        /// Error message.
        message: String,
    },

    /// Unexpected failure (500).
    #[error("{message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl ApiError {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            errors: None,
        }
    }

    /// Creates a validation error with field errors.
    pub fn validation_with_errors(message: impl Into<String>, errors: ValidationErrors) -> Self {
        Self::Validation {
            message: message.into(),
            errors: Some(errors),
        }
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::Validation { .. } | ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for categorization.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated(_) => "UNAUTHENTICATED",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::Forbidden { .. } => "FORBIDDEN",
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::BadRequest { .. } => "BAD_REQUEST",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Conflict { .. } => "CONFLICT",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Returns `true` if the text goes under `message` rather than `error`.
    pub fn is_access_denial(&self) -> bool {
        matches!(self, ApiError::Unauthenticated(_) | ApiError::Forbidden { .. })
    }

    /// Returns `true` if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        matches!(self, ApiError::Internal { .. })
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Validation {
                errors: Some(errors),
                ..
            } => serde_json::to_value(errors).ok(),
            _ => None,
        }
    }
}

// =============================================================================
// IntoResponse Implementation
// =============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        if self.is_server_error() {
            tracing::error!(
                error = %self,
                error_code = error_code,
                status = %status,
                "Server error occurred"
            );
        } else {
            tracing::debug!(
                error = %self,
                error_code = error_code,
                status = %status,
                "Client error occurred"
            );
        }

        let text = self.to_string();
        let (message, error) = if self.is_access_denial() {
            (Some(text), None)
        } else {
            (None, Some(text))
        };

        let body = ErrorBody {
            code: error_code.to_string(),
            message,
            error,
            details: self.error_details(),
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Error Response Body
// =============================================================================

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error code for programmatic handling.
    pub code: String,
    /// Text for authentication and authorization failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Text for every other failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Additional error details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Collection of field validation errors.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ValidationErrors {
    /// Field-specific errors.
    pub fields: Vec<FieldError>,
}

impl ValidationErrors {
    /// Creates a new validation errors collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field error.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Takes a required value, recording an error if it is absent or blank.
    pub fn require<T: Required>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        match value {
            Some(value) if value.is_present() => Some(value),
            _ => {
                self.add(field, "is required");
                None
            }
        }
    }

    /// Returns `true` if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Converts the collected errors into an [`ApiError`].
    pub fn into_error(self) -> ApiError {
        let names: Vec<&str> = self.fields.iter().map(|f| f.field.as_str()).collect();
        let message = format!("Missing or invalid fields: {}", names.join(", "));
        ApiError::validation_with_errors(message, self)
    }

    /// Converts to an ApiError if there are errors.
    pub fn into_result<T>(self, success: T) -> ApiResult<T> {
        if self.is_empty() {
            Ok(success)
        } else {
            Err(self.into_error())
        }
    }
}

/// A single field validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name.
    pub field: String,
    /// Error message.
    pub message: String,
}

/// Values that can be checked for presence in a request body.
pub trait Required {
    /// Returns `true` if the value counts as supplied.
    fn is_present(&self) -> bool;
}

impl Required for String {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

macro_rules! always_present {
    ($($ty:ty),*) => {
        $(impl Required for $ty {
            fn is_present(&self) -> bool {
                true
            }
        })*
    };
}

always_present!(i32, i64, f64);

// =============================================================================
// From Implementations
// =============================================================================

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { .. } => ApiError::not_found(err.to_string()),
            CoreError::Conflict { message } => ApiError::conflict(message),
            CoreError::Validation { message } => ApiError::validation(message),
            CoreError::Credential { message } | CoreError::Internal { message } => {
                ApiError::internal(message)
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ApiError::Unauthenticated(TokenError::Missing).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::bad_request("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_token_errors_use_message_key() {
        let (status, body) = body_json(TokenError::Missing.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Token is missing");
        assert_eq!(body["code"], "UNAUTHENTICATED");
        assert!(body.get("error").is_none());

        let (_, body) = body_json(TokenError::Expired.into()).await;
        assert_eq!(body["message"], "Token has expired");
    }

    #[tokio::test]
    async fn test_other_errors_use_error_key() {
        let (status, body) = body_json(ApiError::InvalidCredentials).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid username or password");
        assert!(body.get("message").is_none());

        let (_, body) = body_json(ApiError::conflict("taken")).await;
        assert_eq!(body["code"], "CONFLICT");
        assert_eq!(body["error"], "taken");
    }

    #[tokio::test]
    async fn test_validation_details() {
        let mut errors = ValidationErrors::new();
        assert_eq!(errors.require("name", Some("  ".to_string())), None);
        assert_eq!(errors.require("grade", Some(0.0)), Some(0.0));
        assert_eq!(errors.require::<i64>("course_id", None), None);

        let (status, body) = body_json(errors.into_error()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["fields"][0]["field"], "name");
        assert_eq!(body["details"]["fields"][1]["field"], "course_id");
    }

    #[test]
    fn test_from_core_error() {
        let err: ApiError = CoreError::not_found("Course", 7).into();
        assert!(matches!(err, ApiError::NotFound { ref message } if message == "Course 7 not found"));

        let err: ApiError = CoreError::conflict("dup").into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err: ApiError = CoreError::validation("bad role").into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err: ApiError = CoreError::internal("boom").into();
        assert!(err.is_server_error());
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationErrors::new().into_result(5).unwrap(), 5);

        let mut errors = ValidationErrors::new();
        errors.add("x", "bad");
        assert!(errors.into_result(()).is_err());
    }
}
