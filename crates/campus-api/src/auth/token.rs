// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session token issuance and verification.
//!
//! Tokens are stateless HMAC-signed JWTs. Nothing is persisted: validity is
//! a function of the signature, the `exp` claim and the current time. A new
//! key means a new [`TokenService`]; there is no global key.

use std::sync::Arc;
use std::time::Duration;

use campus_core::Identity;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Claims;
use crate::error::{ApiError, ApiResult};

/// Default token lifetime (24 hours).
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 86_400;

// =============================================================================
// TokenError
// =============================================================================

/// Why a token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// No token was supplied.
    #[error("Token is missing")]
    Missing,
    /// The token is well-formed and signed but past `exp`.
    #[error("Token has expired")]
    Expired,
    /// Bad signature, bad structure or missing claims.
    #[error("Token is invalid")]
    Invalid,
}

// =============================================================================
// TokenConfig
// =============================================================================

/// Token configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Secret key for signing tokens.
    #[serde(skip_serializing)]
    pub secret: String,
    /// Token lifetime in seconds.
    pub ttl_secs: u64,
    /// Signing algorithm. Only the HMAC family is accepted.
    pub algorithm: Algorithm,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            algorithm: Algorithm::HS256,
        }
    }
}

impl TokenConfig {
    /// Creates a new configuration with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Sets the token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl_secs = ttl.as_secs();
        self
    }

    /// Sets the signing algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ApiResult<()> {
        if self.secret.is_empty() {
            return Err(ApiError::internal("Token secret is not configured"));
        }
        if self.secret.len() < 32 {
            tracing::warn!("Token secret is shorter than recommended (32 bytes)");
        }
        if !matches!(
            self.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(ApiError::internal(format!(
                "Token algorithm {:?} is not supported; use HS256, HS384 or HS512",
                self.algorithm
            )));
        }
        if self.ttl_secs == 0 {
            return Err(ApiError::internal("Token lifetime must be positive"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[REDACTED]")
            .field("ttl_secs", &self.ttl_secs)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

// =============================================================================
// TokenService
// =============================================================================

/// Issues and verifies session tokens.
#[derive(Clone)]
pub struct TokenService {
    config: Arc<TokenConfig>,
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl TokenService {
    /// Creates a token service from a validated configuration.
    pub fn new(config: TokenConfig) -> ApiResult<Self> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Expiry is checked by `verify_at` with an exact cutoff, so the
        // library only checks signature, structure and claim presence.
        let mut validation = Validation::new(config.algorithm);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            config: Arc::new(config),
            encoding_key: Arc::new(encoding_key),
            decoding_key: Arc::new(decoding_key),
            validation: Arc::new(validation),
        })
    }

    /// Issues a token for the identity, expiring `ttl` from now.
    pub fn issue(&self, identity: &Identity) -> ApiResult<String> {
        self.issue_at(identity, Utc::now().timestamp())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(&self, identity: &Identity, now: i64) -> ApiResult<String> {
        let ttl = i64::try_from(self.config.ttl_secs)
            .map_err(|_| ApiError::internal("Token lifetime is out of range"))?;
        let claims = Claims::for_identity(identity, now.saturating_add(ttl));

        encode(&Header::new(self.config.algorithm), &claims, &self.encoding_key)
            .map_err(|e| ApiError::internal(format!("Failed to create token: {}", e)))
    }

    /// Verifies a token against the current time.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verifies a token as if the current time were `now`.
    ///
    /// The signature is checked first; a forged token is `Invalid` even when
    /// its claimed `exp` is in the past.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::Missing);
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                TokenError::Invalid
            })?;

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    /// Returns the token lifetime in seconds.
    pub fn ttl_secs(&self) -> u64 {
        self.config.ttl_secs
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.config.algorithm)
            .field("ttl_secs", &self.config.ttl_secs)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::RoleName;

    const SECRET: &str = "test-secret-key-that-is-long-enough-for-testing";

    fn service() -> TokenService {
        TokenService::new(TokenConfig::new(SECRET)).unwrap()
    }

    fn identity() -> Identity {
        Identity {
            id: 7,
            username: "admin_test".to_string(),
            email: "admin@campus.test".to_string(),
            role_id: 1,
            role: RoleName::Admin,
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let service = service();
        let now = Utc::now().timestamp();
        let token = service.issue_at(&identity(), now).unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.id, 7);
        assert_eq!(claims.username, "admin_test");
        assert_eq!(claims.role_id, 1);
        assert_eq!(claims.exp, now + 86_400);
    }

    #[test]
    fn test_verify_is_idempotent() {
        let service = service();
        let token = service.issue(&identity()).unwrap();

        let first = service.verify(&token).unwrap();
        let second = service.verify(&token).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_expiry_boundary() {
        let service = service();
        let token = service.issue_at(&identity(), 1_000).unwrap();
        let exp = 1_000 + 86_400;

        assert!(service.verify_at(&token, exp - 1).is_ok());
        assert_eq!(service.verify_at(&token, exp), Err(TokenError::Expired));
        assert_eq!(service.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_signature_is_invalid() {
        let service = service();
        let token = service.issue(&identity()).unwrap();

        let (head, signature) = token.rsplit_once('.').unwrap();
        let mut bytes: Vec<char> = signature.chars().collect();
        bytes[5] = if bytes[5] == 'A' { 'B' } else { 'A' };
        let tampered = format!("{}.{}", head, bytes.into_iter().collect::<String>());

        assert_eq!(service.verify(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let other =
            TokenService::new(TokenConfig::new("another-secret-that-is-long-enough-too")).unwrap();
        let token = other.issue(&identity()).unwrap();

        assert_eq!(service().verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_garbage_and_empty() {
        let service = service();
        assert_eq!(service.verify("invalid.token.here"), Err(TokenError::Invalid));
        assert_eq!(service.verify(""), Err(TokenError::Missing));
    }

    #[test]
    fn test_forged_expired_token_is_invalid() {
        let token = TokenService::new(TokenConfig::new("not-the-real-secret-not-the-real-one"))
            .unwrap()
            .issue_at(&identity(), 0)
            .unwrap();

        assert_eq!(service().verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_config_validation() {
        assert!(TokenService::new(TokenConfig::default()).is_err());
        assert!(TokenService::new(TokenConfig::new(SECRET).with_algorithm(Algorithm::RS256)).is_err());
        assert!(TokenService::new(TokenConfig::new(SECRET).with_algorithm(Algorithm::HS512)).is_ok());
        assert!(
            TokenService::new(TokenConfig::new(SECRET).with_ttl(Duration::from_secs(0))).is_err()
        );
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug = format!("{:?}", TokenConfig::new(SECRET));
        assert!(!debug.contains(SECRET));
    }
}
