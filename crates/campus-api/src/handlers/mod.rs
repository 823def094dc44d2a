// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API handlers for all endpoints.
//!
//! Handlers assume the access guard has already run: they never check roles
//! or ownership themselves.
//!
//! - [`health`]: Welcome and health endpoints
//! - [`auth`]: Login and identity endpoints
//! - [`users`], [`departments`], [`courses`], [`students`], [`professors`],
//!   [`registrations`], [`exams`], [`announcements`]: Record endpoints
//! - [`seed`]: Demo data seeding

mod announcements;
mod auth;
mod courses;
mod departments;
mod exams;
mod health;
mod professors;
mod registrations;
mod seed;
mod students;
mod users;

pub use announcements::*;
pub use auth::*;
pub use courses::*;
pub use departments::*;
pub use exams::*;
pub use health::*;
pub use professors::*;
pub use registrations::*;
pub use seed::*;
pub use students::*;
pub use users::*;

use campus_core::PasswordHash;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Hashes a password off the async runtime.
pub(crate) async fn hash_password(state: &AppState, password: String) -> ApiResult<PasswordHash> {
    let credentials = state.credentials.clone();
    tokio::task::spawn_blocking(move || credentials.hash(&password))
        .await
        .map_err(|e| ApiError::internal(format!("Password hashing task failed: {}", e)))?
        .map_err(ApiError::from)
}

/// Verifies a password off the async runtime.
///
/// With no stored hash a dummy verification still runs, so unknown users
/// take as long as wrong passwords.
pub(crate) async fn verify_password(
    state: &AppState,
    hash: Option<PasswordHash>,
    candidate: String,
) -> ApiResult<bool> {
    let credentials = state.credentials.clone();
    tokio::task::spawn_blocking(move || match hash {
        Some(hash) => credentials.verify(&hash, &candidate),
        None => credentials.verify_absent(&candidate),
    })
    .await
    .map_err(|e| ApiError::internal(format!("Password verification task failed: {}", e)))
}

/// Normalizes an optional text field: blank becomes `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
