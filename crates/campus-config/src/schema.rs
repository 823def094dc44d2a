// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration schema.
//!
//! Every section has serde defaults, so a minimal file only needs
//! `auth.jwt_secret`:
//!
//! ```yaml
//! auth:
//!   jwt_secret: ${CAMPUS_JWT_SECRET}
//! ```

use std::net::{IpAddr, Ipv4Addr};

use campus_core::{HashConfig, PasswordHash};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Constants
// =============================================================================

/// Default API port.
pub const DEFAULT_API_PORT: u16 = 8080;

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default token lifetime in seconds (24 hours).
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 86_400;

/// Secrets shorter than this are accepted with a warning.
pub const RECOMMENDED_SECRET_LEN: usize = 32;

const MASK: &str = "********";

// =============================================================================
// Top-Level Configuration
// =============================================================================

/// The root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CampusConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSettings,

    /// Token and password hashing settings.
    #[serde(default)]
    pub auth: AuthSettings,

    /// Startup seeding.
    #[serde(default)]
    pub bootstrap: BootstrapSettings,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl CampusConfig {
    /// Validates the entire configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.auth.validate()?;
        self.bootstrap.validate()?;
        Ok(())
    }

    /// Returns a copy with every secret replaced by a mask, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.auth.jwt_secret.is_empty() {
            copy.auth.jwt_secret = MASK.to_string();
        }
        if let Some(admin) = copy.bootstrap.admin.as_mut() {
            if admin.password.is_some() {
                admin.password = Some(MASK.to_string());
            }
            if admin.password_hash.is_some() {
                admin.password_hash = Some(MASK.to_string());
            }
        }
        if copy.bootstrap.demo_password.is_some() {
            copy.bootstrap.demo_password = Some(MASK.to_string());
        }
        copy
    }
}

// =============================================================================
// Server
// =============================================================================

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSettings {
    /// Bind address.
    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,

    /// Listen port.
    #[serde(default = "default_api_port")]
    pub port: u16,

    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Allowed CORS origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_bind_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_api_port() -> u16 {
    DEFAULT_API_PORT
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_api_port(),
            request_timeout_secs: default_request_timeout(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerSettings {
    fn validate(&self) -> ConfigResult<()> {
        if self.port == 0 {
            return Err(ConfigError::validation("server.port", "must not be zero"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout_secs",
                "must be positive",
            ));
        }
        for origin in &self.cors_origins {
            if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                return Err(ConfigError::validation(
                    "server.cors_origins",
                    format!("'{}' is not an http(s) origin", origin),
                ));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Auth
// =============================================================================

/// Token signing and password hashing settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthSettings {
    /// HMAC signing secret. Required.
    #[serde(default)]
    pub jwt_secret: String,

    /// Token lifetime in seconds.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,

    /// Argon2 cost parameters for new hashes.
    #[serde(default)]
    pub hash: HashConfig,
}

fn default_token_ttl() -> u64 {
    DEFAULT_TOKEN_TTL_SECS
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: default_token_ttl(),
            hash: HashConfig::default(),
        }
    }
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("hash", &self.hash)
            .finish()
    }
}

impl AuthSettings {
    fn validate(&self) -> ConfigResult<()> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::missing_field("auth.jwt_secret"));
        }
        if self.jwt_secret.len() < RECOMMENDED_SECRET_LEN {
            tracing::warn!(
                length = self.jwt_secret.len(),
                recommended = RECOMMENDED_SECRET_LEN,
                "auth.jwt_secret is shorter than recommended"
            );
        }
        if self.token_ttl_secs == 0 {
            return Err(ConfigError::validation(
                "auth.token_ttl_secs",
                "must be positive",
            ));
        }

        let hash = &self.hash;
        if hash.iterations == 0 {
            return Err(ConfigError::validation(
                "auth.hash.iterations",
                "must be at least 1",
            ));
        }
        if hash.parallelism == 0 {
            return Err(ConfigError::validation(
                "auth.hash.parallelism",
                "must be at least 1",
            ));
        }
        if hash.memory_kib < 8 * hash.parallelism {
            return Err(ConfigError::validation(
                "auth.hash.memory_kib",
                "must be at least 8 KiB per lane of parallelism",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Bootstrap
// =============================================================================

/// Records created at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BootstrapSettings {
    /// Seed the three roles.
    #[serde(default = "default_true")]
    pub seed_roles: bool,

    /// Admin account to create if absent.
    #[serde(default)]
    pub admin: Option<AdminSettings>,

    /// Populate demo records.
    #[serde(default)]
    pub demo_data: bool,

    /// Password for the demo accounts.
    #[serde(default)]
    pub demo_password: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self {
            seed_roles: true,
            admin: None,
            demo_data: false,
            demo_password: None,
        }
    }
}

impl BootstrapSettings {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(admin) = &self.admin {
            admin.validate()?;
        }
        if self.demo_data && self.demo_password.as_deref().unwrap_or("").is_empty() {
            return Err(ConfigError::missing_field("bootstrap.demo_password"));
        }
        Ok(())
    }
}

/// Bootstrap admin account.
///
/// Exactly one of `password` or `password_hash` must be set.
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminSettings {
    /// Login name.
    pub username: String,

    /// Email address.
    pub email: String,

    /// Plaintext password, hashed at startup.
    #[serde(default)]
    pub password: Option<String>,

    /// Pre-computed argon2 PHC string.
    #[serde(default)]
    pub password_hash: Option<String>,
}

impl std::fmt::Debug for AdminSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSettings")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field(
                "password_hash",
                &self.password_hash.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// How the bootstrap admin's password was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminSecret<'a> {
    /// Plaintext to be hashed.
    Plain(&'a str),
    /// Already hashed.
    Hashed(&'a str),
}

impl AdminSettings {
    /// Returns the configured secret.
    pub fn secret(&self) -> ConfigResult<AdminSecret<'_>> {
        match (self.password.as_deref(), self.password_hash.as_deref()) {
            (Some(plain), None) => Ok(AdminSecret::Plain(plain)),
            (None, Some(hash)) => Ok(AdminSecret::Hashed(hash)),
            (Some(_), Some(_)) => Err(ConfigError::validation(
                "bootstrap.admin",
                "set either password or password_hash, not both",
            )),
            (None, None) => Err(ConfigError::missing_field(
                "bootstrap.admin.password or bootstrap.admin.password_hash",
            )),
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::missing_field("bootstrap.admin.username"));
        }
        if self.email.trim().is_empty() {
            return Err(ConfigError::missing_field("bootstrap.admin.email"));
        }
        match self.secret()? {
            AdminSecret::Plain(plain) if plain.is_empty() => Err(ConfigError::validation(
                "bootstrap.admin.password",
                "must not be empty",
            )),
            AdminSecret::Plain(_) => Ok(()),
            AdminSecret::Hashed(hash) => PasswordHash::parse(hash)
                .map(|_| ())
                .map_err(|e| ConfigError::validation("bootstrap.admin.password_hash", e.to_string())),
        }
    }
}

// =============================================================================
// Logging
// =============================================================================

/// Logging settings. The CLI flags take precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSettings {
    /// Log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Log format.
    #[serde(default)]
    pub format: LogFormat,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Returns the filter directive for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Parses a level name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON lines.
    Json,
    /// Compact single-line text.
    Compact,
}

// =============================================================================
// Tests
// =============================================================================
