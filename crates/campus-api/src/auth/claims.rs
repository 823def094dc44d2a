// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session token claims.

use campus_core::{Identity, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims embedded in a session token.
///
/// The wire form is exactly `{id, username, role_id, exp}`; other services
/// decode these tokens, so no field may be added or renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub id: RecordId,
    /// Username at issuance.
    pub username: String,
    /// Role id at issuance.
    pub role_id: RecordId,
    /// Expiration time (Unix timestamp, seconds).
    pub exp: i64,
}

impl Claims {
    /// Builds claims for an identity expiring at `exp`.
    pub fn for_identity(identity: &Identity, exp: i64) -> Self {
        Self {
            id: identity.id,
            username: identity.username.clone(),
            role_id: identity.role_id,
            exp,
        }
    }

    /// Returns `true` if the claims are expired at `now`.
    ///
    /// The cutoff is exact: a token is no longer valid at its `exp` second.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    /// Returns the expiration time as a DateTime.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
