// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication and authorization module.
//!
//! This module provides:
//! - Session token issuance and verification
//! - Role sets and ownership rules
//! - Per-operation access policies
//! - Authentication context

mod claims;
mod context;
mod ownership;
mod policy;
mod roles;
mod token;

pub use claims::Claims;
pub use context::AuthContext;
pub use ownership::{Ownership, OwnershipRule, ProfessorOwner, SelfIdentity, StudentOwner};
pub use policy::{Decision, Policy};
pub use roles::RoleSet;
pub use token::{TokenConfig, TokenError, TokenService, DEFAULT_TOKEN_TTL_SECS};
