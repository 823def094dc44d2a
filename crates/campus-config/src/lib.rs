// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # campus-config
//!
//! Configuration management for the campus records service.
//!
//! ## Features
//!
//! - **Schema Definition**: Server, auth, bootstrap and logging sections with
//!   defaults and validation
//! - **Multi-Format Support**: YAML, TOML, and JSON configuration files
//! - **Placeholders**: `${VAR}` and `${VAR:default}` resolved before parsing
//! - **Environment Overrides**: `CAMPUS_*` variables override file values
//!
//! ## Quick Start
//!
//! ```no_run
//! use campus_config::loader::load_config;
//!
//! let config = load_config("campus.yaml").unwrap();
//! println!("Listening on {}:{}", config.server.bind_address, config.server.port);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config, load_config_str, ConfigFormat, ConfigLoader};
pub use schema::{
    AdminSecret, AdminSettings, AuthSettings, BootstrapSettings, CampusConfig, LogFormat,
    LogLevel, LoggingSettings, ServerSettings,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
