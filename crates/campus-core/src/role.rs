// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Roles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::RecordId;

// =============================================================================
// RoleName
// =============================================================================

/// The closed set of roles an identity can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoleName {
    /// Full administrative access.
    Admin,
    /// Teaching staff.
    Professor,
    /// Enrolled student.
    Student,
}

impl RoleName {
    /// All roles, in seeding order.
    pub const ALL: [RoleName; 3] = [RoleName::Admin, RoleName::Professor, RoleName::Student];

    /// Returns the canonical role name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Admin => "Admin",
            RoleName::Professor => "Professor",
            RoleName::Student => "Student",
        }
    }

    /// Parses a role from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(RoleName::Admin),
            "professor" => Some(RoleName::Professor),
            "student" => Some(RoleName::Student),
            _ => None,
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Role
// =============================================================================

/// A stored role record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role id.
    pub id: RecordId,
    /// Role name.
    pub name: RoleName,
}

// =============================================================================
// Tests
// =============================================================================
