// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # campus-bin
//!
//! Command-line entry point for the campus records service.
//!
//! - CLI argument parsing with clap
//! - Runtime wiring: configuration, store bootstrap, API server
//! - Graceful shutdown on SIGINT/SIGTERM
//! - Logging initialization
//!
//! ## Usage
//!
//! ```bash
//! # Start the server (default command)
//! campus -c /etc/campus/campus.yaml
//!
//! # Start with demo records
//! campus run --demo-data
//!
//! # Validate configuration
//! campus validate --show-config
//!
//! # Hash a password for bootstrap.admin.password_hash
//! echo "s3cret" | campus hash-password --stdin
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod shutdown;

pub use cli::{Cli, Commands};
pub use error::{BinError, BinResult};
pub use logging::init_logging;
pub use runtime::{CampusRuntime, RuntimeBuilder};
pub use shutdown::ShutdownCoordinator;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
