// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # campus-api
//!
//! HTTP API for the campus records service.
//!
//! This crate provides session tokens, the per-operation access guard, the
//! operation table and its handlers, and the server that composes them.
//!
//! ## Example
//!
//! ```rust,ignore
//! use campus_api::{ApiConfig, ApiServer, TokenConfig};
//!
//! let config = ApiConfig::new().with_token(TokenConfig::new(secret));
//! let server = ApiServer::builder().config(config).store(store).build()?;
//! server.run_with_shutdown(shutdown).await?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use auth::{AuthContext, Claims, Policy, RoleSet, TokenConfig, TokenError, TokenService};
pub use config::{ApiConfig, CorsConfig};
pub use error::{ApiError, ApiResult};
pub use routes::{operations, Operation};
pub use server::{ApiServer, ApiServerBuilder};
pub use state::{AppState, AppStateBuilder};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
