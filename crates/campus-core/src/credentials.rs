// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Password hashing and verification.
//!
//! Secrets are stored as Argon2id PHC strings. The plaintext never outlives
//! the call that hashes or verifies it, and [`PasswordHash`] offers no way to
//! recover it.
//!
//! # Example
//!
//! ```
//! use campus_core::credentials::{Credentials, HashConfig};
//!
//! let credentials = Credentials::new(HashConfig::for_testing()).unwrap();
//! let hash = credentials.hash("correct horse").unwrap();
//!
//! assert!(credentials.verify(&hash, "correct horse"));
//! assert!(!credentials.verify(&hash, "battery staple"));
//! ```

use std::fmt;

use argon2::{
    password_hash::{PasswordHash as PhcHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

const DECOY_SECRET: &str = "campus-decoy-secret-that-is-never-assigned";

// =============================================================================
// HashConfig
// =============================================================================

/// Argon2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashConfig {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashConfig {
    /// Minimal cost parameters. Only suitable for tests.
    pub fn for_testing() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }
}

// =============================================================================
// PasswordHash
// =============================================================================

/// An opaque, already-hashed password.
///
/// Deliberately not `Serialize`; `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Accepts an existing PHC string, e.g. one produced by the
    /// `hash-password` command.
    pub fn parse(phc: impl Into<String>) -> CoreResult<Self> {
        let phc = phc.into();
        PhcHash::new(&phc)
            .map_err(|e| CoreError::credential(format!("invalid password hash: {}", e)))?;
        Ok(Self(phc))
    }

    /// Returns the PHC string.
    ///
    /// This is the hash, not the secret.
    pub fn as_phc(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

// =============================================================================
// Credentials
// =============================================================================

/// Hashes and verifies passwords.
#[derive(Debug, Clone)]
pub struct Credentials {
    params: Params,
    decoy: PasswordHash,
}

impl Credentials {
    /// Creates a credential component with the given cost parameters.
    pub fn new(config: HashConfig) -> CoreResult<Self> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| CoreError::credential(format!("invalid argon2 parameters: {}", e)))?;

        let decoy = hash_with(&params, DECOY_SECRET)?;
        Ok(Self { params, decoy })
    }

    /// Hashes a secret with a fresh random salt.
    pub fn hash(&self, secret: &str) -> CoreResult<PasswordHash> {
        if secret.is_empty() {
            return Err(CoreError::validation("password must not be empty"));
        }
        hash_with(&self.params, secret)
    }

    /// Verifies a candidate secret against a stored hash.
    ///
    /// The cost parameters embedded in the stored hash are used, so hashes
    /// created with different settings still verify.
    pub fn verify(&self, hash: &PasswordHash, candidate: &str) -> bool {
        let parsed = match PhcHash::new(&hash.0) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };

        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }

    /// Burns one verification against a decoy hash and returns `false`.
    ///
    /// Used when the username is unknown so both login failure paths cost
    /// the same.
    pub fn verify_absent(&self, candidate: &str) -> bool {
        let _ = self.verify(&self.decoy, candidate);
        false
    }
}

fn hash_with(params: &Params, secret: &str) -> CoreResult<PasswordHash> {
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone());
    let salt = SaltString::generate(&mut OsRng);

    let hash = argon2
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| CoreError::credential(format!("failed to hash password: {}", e)))?;

    Ok(PasswordHash(hash.to_string()))
}

// =============================================================================
// Tests
// =============================================================================
