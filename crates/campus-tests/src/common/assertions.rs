// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Response Assertions
//!
//! A buffered HTTP response with assertion helpers that print the body on
//! failure.

use axum::http::StatusCode;
use campus_core::RecordId;
use serde_json::Value;

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct TestResponse {
    /// Status code.
    pub status: StatusCode,
    /// Raw body text.
    pub text: String,
    /// Parsed JSON body, or `Null` when the body is not JSON.
    pub body: Value,
}

impl TestResponse {
    /// Creates a response from its parts.
    pub fn new(status: StatusCode, text: String) -> Self {
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    /// Asserts the status code.
    #[track_caller]
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status, expected,
            "Expected status {}, got {} with body: {}",
            expected, self.status, self.text
        );
        self
    }

    /// Asserts an error response with the given status and `code`.
    #[track_caller]
    pub fn assert_error(&self, status: StatusCode, code: &str) -> &Self {
        self.assert_status(status);
        assert_eq!(
            self.body["code"], code,
            "Expected error code {}, got body: {}",
            code, self.text
        );
        self
    }

    /// Asserts the human-readable error text, under `message` or `error`.
    #[track_caller]
    pub fn assert_error_text(&self, expected: &str) -> &Self {
        let text = self.body["message"]
            .as_str()
            .or_else(|| self.body["error"].as_str())
            .unwrap_or_default();
        assert_eq!(text, expected, "Unexpected error body: {}", self.text);
        self
    }

    /// Asserts the `message` field of a success response.
    #[track_caller]
    pub fn assert_message(&self, expected: &str) -> &Self {
        assert_eq!(self.body["message"], expected, "Unexpected body: {}", self.text);
        self
    }

    /// Returns a numeric id field.
    #[track_caller]
    pub fn id(&self, field: &str) -> RecordId {
        self.body[field]
            .as_i64()
            .unwrap_or_else(|| panic!("No numeric '{}' in body: {}", field, self.text))
    }

    /// Returns the length of an array field.
    #[track_caller]
    pub fn len_of(&self, field: &str) -> usize {
        self.body[field]
            .as_array()
            .map(Vec::len)
            .unwrap_or_else(|| panic!("No array '{}' in body: {}", field, self.text))
    }
}
