// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use campus_core::{Identity, Professor, RecordId, RoleName, Student, User};
use serde::{Deserialize, Serialize};

// =============================================================================
// Created
// =============================================================================

/// A `201 Created` JSON response.
#[derive(Debug)]
pub struct Created<T>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

/// Builds the `{message, <key>: id}` body returned by record creation.
pub fn created_record(
    message: &str,
    key: &'static str,
    id: RecordId,
) -> Created<serde_json::Value> {
    let mut body = serde_json::Map::new();
    body.insert("message".to_string(), message.into());
    body.insert(key.to_string(), id.into());
    Created(serde_json::Value::Object(body))
}

// =============================================================================
// Typed Responses
// =============================================================================

/// A response carrying only a message.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Version string.
    pub version: String,
}

impl HealthResponse {
    /// Creates a healthy response.
    pub fn healthy() -> Self {
        Self {
            status: "ok".to_string(),
            version: crate::VERSION.to_string(),
        }
    }
}

/// Successful login response.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Always "Login successful".
    pub message: String,
    /// Bearer token.
    pub token: String,
}

/// The caller's identity with its linked record.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// User id.
    pub id: RecordId,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Role id.
    pub role_id: RecordId,
    /// Role name.
    pub role: RoleName,
    /// Linked student record, for Student identities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<Student>,
    /// Linked professor record, for Professor identities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professor: Option<Professor>,
}

impl ProfileResponse {
    /// Creates a profile with no linked record.
    pub fn new(identity: Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username,
            email: identity.email,
            role_id: identity.role_id,
            role: identity.role,
            student: None,
            professor: None,
        }
    }
}

// =============================================================================
// Users
// =============================================================================

/// A user without its password hash.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserSummary {
    /// User id.
    pub id: RecordId,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Role id.
    pub role_id: RecordId,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role_id: user.role_id,
        }
    }
}

/// `GET /api/users` body.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserList {
    /// All users.
    pub users: Vec<UserSummary>,
}

/// `GET /api/users/{user_id}` body.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserDetail {
    /// User id.
    pub id: RecordId,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Role id.
    pub role_id: RecordId,
    /// Role name.
    pub role_name: RoleName,
}

impl From<Identity> for UserDetail {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username,
            email: identity.email,
            role_id: identity.role_id,
            role_name: identity.role,
        }
    }
}

/// `POST /api/users` body.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserCreated {
    /// Always "User created successfully".
    pub message: String,
    /// New user id.
    pub user_id: RecordId,
    /// Username.
    pub username: String,
    /// Role name.
    pub role_name: RoleName,
}

/// `POST /api/students` and `POST /api/professors` body.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountCreated {
    /// Human-readable message.
    pub message: String,
    /// New user id.
    pub user_id: RecordId,
    /// New student record id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<RecordId>,
    /// New professor record id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professor_id: Option<RecordId>,
}

// =============================================================================
// Exam results
// =============================================================================

/// One grade in a student's results.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExamGrade {
    /// Exam id.
    pub exam_id: RecordId,
    /// Grade.
    pub grade: f64,
}

/// `GET /api/exam_results/student/{student_id}` body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExamResultList {
    /// The student's grades.
    pub exam_results: Vec<ExamGrade>,
}

// =============================================================================
// Tests
// =============================================================================
