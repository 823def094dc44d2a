// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Campus Integration Tests
//!
//! End-to-end tests that drive the full router (guard, handlers, store)
//! through `tower::ServiceExt::oneshot`, plus configuration loading tests.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p campus-tests
//! cargo test -p campus-tests --test integration_access
//! cargo test -p campus-tests -- --nocapture
//! ```
//!
//! ## Suites
//!
//! - `integration_auth`: login, token failure modes, `/api/me`
//! - `integration_access`: the access guard across roles and ownership
//! - `integration_records`: record operations and their error contracts
//! - `integration_config`: file loading, env overrides, runtime mapping
//!
//! ## Writing New Tests
//!
//! ```rust,ignore
//! use campus_tests::prelude::*;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let app = TestApp::new().await;
//!     let token = app.admin_token().await;
//!     app.get("/api/users", Some(&token)).await.assert_status(StatusCode::OK);
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::assertions::*;
    pub use crate::common::fixtures::*;
    pub use crate::common::harness::*;
    pub use crate::common::init_test_logging;
    pub use axum::http::{Method, StatusCode};
    pub use serde_json::json;
}
