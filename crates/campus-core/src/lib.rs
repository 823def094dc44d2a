// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # campus-core
//!
//! Core abstractions and shared types for the campus records service.
//!
//! This crate provides the foundational pieces used by the API and binary
//! crates:
//!
//! - **Role**: The closed set of roles (`Admin`, `Professor`, `Student`)
//! - **Types**: Record types for users, departments, students, professors,
//!   courses, registrations, exams, exam results and announcements
//! - **Credentials**: Argon2 password hashing and verification
//! - **Store**: The data-access trait and its in-memory implementation
//! - **Seed**: Role seeding, admin bootstrap and demo data
//! - **Error**: Unified core error type
//!
//! ## Example
//!
//! ```rust,ignore
//! use campus_core::{Credentials, HashConfig, MemoryStore, Store};
//! use campus_core::seed;
//!
//! let store = MemoryStore::new();
//! let credentials = Credentials::new(HashConfig::default())?;
//!
//! seed::seed_roles(&store).await?;
//! let hash = credentials.hash("s3cret-password")?;
//! seed::ensure_admin(&store, "admin", "admin@campus.local", hash).await?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod credentials;
pub mod error;
pub mod role;
pub mod seed;
pub mod store;
pub mod types;

pub use credentials::{Credentials, HashConfig, PasswordHash};
pub use error::{CoreError, CoreResult};
pub use role::{Role, RoleName};
pub use store::{MemoryStore, Store};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
