// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Access policies.
//!
//! Every operation declares one [`Policy`]. Policies are plain data, so the
//! full policy table can be enumerated and evaluated without HTTP.

use std::collections::HashMap;
use std::fmt;

use campus_core::{Identity, RecordId, Store};

use super::ownership::Ownership;
use super::roles::RoleSet;
use crate::error::{ApiError, ApiResult};

// =============================================================================
// Policy
// =============================================================================

/// Who may invoke an operation.
#[derive(Debug, Clone)]
pub enum Policy {
    /// No authentication.
    Public,
    /// Any caller with a valid token.
    AnyAuthenticated,
    /// Callers whose role is in the set.
    Roles(RoleSet),
    /// Callers whose role is in the set, or who own the target record.
    SelfOrRoles {
        /// Roles that bypass the ownership check.
        roles: RoleSet,
        /// How to find the target's owner.
        ownership: Ownership,
    },
}

/// Outcome of evaluating a policy for an authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The caller may proceed.
    Allow,
    /// The caller is authenticated but not permitted.
    Deny {
        /// Human-readable reason.
        reason: String,
    },
}

impl Decision {
    /// Returns `true` for [`Decision::Allow`].
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

impl Policy {
    /// Returns `false` only for [`Policy::Public`].
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Policy::Public)
    }

    /// Evaluates the policy for a resolved identity.
    ///
    /// `params` are the matched path parameters. Errors:
    /// - `Validation` when the ownership parameter is missing or not an integer
    /// - `NotFound` when the ownership target does not exist
    pub async fn evaluate(
        &self,
        identity: &Identity,
        params: &HashMap<String, String>,
        store: &dyn Store,
    ) -> ApiResult<Decision> {
        match self {
            Policy::Public | Policy::AnyAuthenticated => Ok(Decision::Allow),
            Policy::Roles(roles) => {
                if roles.contains(identity.role) {
                    Ok(Decision::Allow)
                } else {
                    Ok(Decision::Deny {
                        reason: format!("Access forbidden: requires one of {}", roles),
                    })
                }
            }
            Policy::SelfOrRoles { roles, ownership } => {
                let target = target_id(params, ownership.param)?;
                if roles.contains(identity.role) {
                    return Ok(Decision::Allow);
                }

                match ownership.rule.owner_of(store, target).await? {
                    None => Err(ApiError::not_found(format!(
                        "{} {} not found",
                        ownership.param, target
                    ))),
                    Some(owner) if owner == identity.id => Ok(Decision::Allow),
                    Some(_) => Ok(Decision::Deny {
                        reason: format!(
                            "Access forbidden: requires one of {} or ownership of the record",
                            roles
                        ),
                    }),
                }
            }
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Public => f.write_str("Public"),
            Policy::AnyAuthenticated => f.write_str("AnyAuthenticated"),
            Policy::Roles(roles) => write!(f, "Roles{}", roles),
            Policy::SelfOrRoles { roles, ownership } => {
                write!(f, "SelfOrRoles({}, {})", roles, ownership.rule.name())
            }
        }
    }
}

fn target_id(params: &HashMap<String, String>, param: &str) -> ApiResult<RecordId> {
    let raw = params
        .get(param)
        .ok_or_else(|| ApiError::validation(format!("Missing path parameter '{}'", param)))?;
    raw.parse()
        .map_err(|_| ApiError::validation(format!("Path parameter '{}' must be an integer", param)))
}

// =============================================================================
// Tests
// =============================================================================
