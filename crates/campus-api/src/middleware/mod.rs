// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Middleware implementations for the API server.
//!
//! - [`AccessGuardLayer`]: token verification and per-operation policy checks

mod guard;

pub use guard::{AccessGuard, AccessGuardLayer};
