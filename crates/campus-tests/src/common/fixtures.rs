// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Well-known accounts, configuration and request payloads.

use campus_api::{ApiConfig, TokenConfig};
use campus_core::{HashConfig, RecordId};
use serde_json::{json, Value};

/// Token signing secret used by every test instance.
pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Bootstrap admin username.
pub const ADMIN_USERNAME: &str = "admin_test";

/// Bootstrap admin password.
pub const ADMIN_PASSWORD: &str = "password123";

/// Bootstrap admin email.
pub const ADMIN_EMAIL: &str = "admin_test@campus.test";

/// Password given to every account created through fixtures.
pub const USER_PASSWORD: &str = "user-password-1";

/// Password for accounts created by `POST /api/seed_data`.
pub const DEMO_PASSWORD: &str = "demo-password-1";

/// API configuration with cheap hashing and a fixed secret.
pub fn test_api_config() -> ApiConfig {
    ApiConfig::new()
        .with_token(TokenConfig::new(TEST_JWT_SECRET))
        .with_hash(HashConfig::for_testing())
        .with_demo_password(DEMO_PASSWORD)
}

/// Body for `POST /api/login`.
pub fn login_payload(username: &str, password: &str) -> Value {
    json!({ "username": username, "password": password })
}

/// Body for `POST /api/students`.
pub fn student_payload(username: &str, student_number: &str, department_id: RecordId) -> Value {
    json!({
        "username": username,
        "password": USER_PASSWORD,
        "email": format!("{}@campus.test", username),
        "student_id": student_number,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "department_id": department_id,
    })
}

/// Body for `POST /api/professors`.
pub fn professor_payload(username: &str, department_id: RecordId) -> Value {
    json!({
        "username": username,
        "password": USER_PASSWORD,
        "email": format!("{}@campus.test", username),
        "first_name": "Grace",
        "last_name": "Hopper",
        "title": "Prof.",
        "department_id": department_id,
    })
}

/// Body for `POST /api/courses`.
pub fn course_payload(code: &str, department_id: RecordId, professor_id: Option<RecordId>) -> Value {
    json!({
        "course_code": code,
        "course_name": format!("Course {}", code),
        "credits": 3,
        "department_id": department_id,
        "professor_id": professor_id,
    })
}
