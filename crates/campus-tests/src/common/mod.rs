// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Common Test Utilities
//!
//! - `fixtures`: well-known accounts and request payloads
//! - `harness`: [`harness::TestApp`], an in-process service instance
//! - `assertions`: response assertion helpers

pub mod assertions;
pub mod fixtures;
pub mod harness;

pub use assertions::*;
pub use fixtures::*;
pub use harness::*;

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initializes test logging once per test binary.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("warn,campus_api=debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Creates a temporary directory for test files.
pub fn temp_test_dir(prefix: &str) -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("Failed to create temp directory")
}
