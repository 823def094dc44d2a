// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration loading.
//!
//! # Loading Pipeline
//!
//! 1. Read the file and pick the format from its extension
//! 2. Resolve `${VAR}` / `${VAR:default}` placeholders in the raw text
//! 3. Parse into [`CampusConfig`]
//! 4. Apply `CAMPUS_*` environment overrides
//! 5. Validate
//!
//! # Environment Variable Override
//!
//! ```text
//! CAMPUS_JWT_SECRET=...
//! CAMPUS_API_PORT=9090
//! CAMPUS_API_BIND=127.0.0.1
//! CAMPUS_TOKEN_TTL_SECS=3600
//! CAMPUS_LOG_LEVEL=debug
//! CAMPUS_ADMIN_PASSWORD=...
//! ```

use std::env;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::schema::{CampusConfig, LogLevel};

/// Default environment variable prefix.
pub const DEFAULT_ENV_PREFIX: &str = "CAMPUS";

// =============================================================================
// ConfigLoader
// =============================================================================

/// Configuration loader.
///
/// # Examples
///
/// ```no_run
/// use campus_config::loader::ConfigLoader;
///
/// let config = ConfigLoader::new().load("campus.yaml").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    env_prefix: String,
    resolve_env_vars: bool,
}

impl ConfigLoader {
    /// Creates a loader with the `CAMPUS` prefix and env resolution on.
    pub fn new() -> Self {
        Self {
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            resolve_env_vars: true,
        }
    }

    /// Sets the environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Enables or disables placeholders and env overrides.
    pub fn with_env_vars(mut self, enabled: bool) -> Self {
        self.resolve_env_vars = enabled;
        self
    }

    /// Loads and validates configuration from a file.
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<CampusConfig> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading configuration");

        let format = ConfigFormat::from_path(path)?;
        let content = read_file(path)?;

        let mut config = self
            .parse_content(&content, format)
            .map_err(|e| match e {
                ConfigError::Serialization { message } => ConfigError::parse(path, message),
                other => other,
            })?;

        self.finish(&mut config)?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Loads and validates configuration from a string.
    pub fn load_from_str(&self, content: &str, format: ConfigFormat) -> ConfigResult<CampusConfig> {
        let mut config = self.parse_content(content, format)?;
        self.finish(&mut config)?;
        Ok(config)
    }

    fn parse_content(&self, content: &str, format: ConfigFormat) -> ConfigResult<CampusConfig> {
        let content = if self.resolve_env_vars {
            self.resolve_env_placeholders(content)
        } else {
            content.to_string()
        };
        parse_str(&content, format)
    }

    fn finish(&self, config: &mut CampusConfig) -> ConfigResult<()> {
        if self.resolve_env_vars {
            self.apply_env_overrides(config)?;
        }
        config.validate()?;
        debug!(
            port = config.server.port,
            admin = config.bootstrap.admin.is_some(),
            demo_data = config.bootstrap.demo_data,
            "Configuration validated"
        );
        Ok(())
    }

    /// Resolves `${VAR}` and `${VAR:default}` placeholders.
    ///
    /// An unset variable without a default is left in place, so the parse or
    /// validation step reports it.
    fn resolve_env_placeholders(&self, content: &str) -> String {
        let mut result = String::with_capacity(content.len());
        let mut chars = content.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' || chars.peek() != Some(&'{') {
                result.push(c);
                continue;
            }
            chars.next();

            let mut inner = String::new();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '}' {
                    closed = true;
                    break;
                }
                inner.push(c);
            }

            if !closed {
                result.push_str("${");
                result.push_str(&inner);
                continue;
            }

            let (name, default) = match inner.split_once(':') {
                Some((name, default)) => (name, Some(default)),
                None => (inner.as_str(), None),
            };

            match (env::var(name), default) {
                (Ok(value), _) => result.push_str(&value),
                (Err(_), Some(default)) => result.push_str(default),
                (Err(_), None) => {
                    warn!(variable = name, "Environment variable not found");
                    result.push_str("${");
                    result.push_str(name);
                    result.push('}');
                }
            }
        }

        result
    }

    fn var_name(&self, suffix: &str) -> String {
        format!("{}_{}", self.env_prefix, suffix)
    }

    /// Applies `<PREFIX>_*` environment overrides.
    fn apply_env_overrides(&self, config: &mut CampusConfig) -> ConfigResult<()> {
        if let Ok(value) = env::var(self.var_name("JWT_SECRET")) {
            config.auth.jwt_secret = value;
        }

        let name = self.var_name("API_PORT");
        if let Ok(value) = env::var(&name) {
            config.server.port = value
                .parse()
                .map_err(|_| ConfigError::invalid_env_var(&name, "expected valid port number"))?;
        }

        let name = self.var_name("API_BIND");
        if let Ok(value) = env::var(&name) {
            config.server.bind_address = value
                .parse()
                .map_err(|_| ConfigError::invalid_env_var(&name, "expected IP address"))?;
        }

        let name = self.var_name("TOKEN_TTL_SECS");
        if let Ok(value) = env::var(&name) {
            config.auth.token_ttl_secs = value
                .parse()
                .map_err(|_| ConfigError::invalid_env_var(&name, "expected number of seconds"))?;
        }

        let name = self.var_name("LOG_LEVEL");
        if let Ok(value) = env::var(&name) {
            config.logging.level = LogLevel::parse(&value)
                .ok_or_else(|| ConfigError::invalid_env_var(&name, "expected log level"))?;
        }

        let name = self.var_name("ADMIN_PASSWORD");
        if let Ok(value) = env::var(&name) {
            let admin = config.bootstrap.admin.as_mut().ok_or_else(|| {
                ConfigError::invalid_env_var(&name, "no bootstrap.admin section to apply it to")
            })?;
            admin.password = Some(value);
            admin.password_hash = None;
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// ConfigFormat
// =============================================================================

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format.
    Yaml,
    /// TOML format.
    Toml,
    /// JSON format.
    Json,
}

impl ConfigFormat {
    /// Determines the format from a file path.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            Some(other) => Err(ConfigError::unsupported_format(other)),
            None => Err(ConfigError::unsupported_format("(no extension)")),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn read_file(path: &Path) -> ConfigResult<String> {
    if !path.exists() {
        return Err(ConfigError::file_not_found(path));
    }
    fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))
}

fn parse_str<T: DeserializeOwned>(content: &str, format: ConfigFormat) -> ConfigResult<T> {
    match format {
        ConfigFormat::Yaml => yaml_parse(content),
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| ConfigError::serialization(e.to_string()))
        }
        ConfigFormat::Json => {
            serde_json::from_str(content).map_err(|e| ConfigError::serialization(e.to_string()))
        }
    }
}

fn yaml_parse<T: DeserializeOwned>(content: &str) -> ConfigResult<T> {
    let config = config::Config::builder()
        .add_source(config::File::from_str(content, config::FileFormat::Yaml))
        .build()
        .map_err(|e| ConfigError::serialization(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ConfigError::serialization(e.to_string()))
}

// =============================================================================
// Convenience Functions
// =============================================================================

/// Loads configuration from a file with default settings.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<CampusConfig> {
    ConfigLoader::new().load(path)
}

/// Loads configuration from a string with the specified format.
pub fn load_config_str(content: &str, format: ConfigFormat) -> ConfigResult<CampusConfig> {
    ConfigLoader::new().load_from_str(content, format)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const YAML: &str = r#"
server:
  port: 9000
  cors_origins:
    - https://campus.example
auth:
  jwt_secret: yaml-secret-yaml-secret-yaml-secret
  token_ttl_secs: 3600
bootstrap:
  admin:
    username: root
    email: root@campus.local
    password: change-me
logging:
  level: debug
  format: json
"#;

    // Each test gets its own prefix so env overrides never leak between
    // tests running in parallel.
    fn isolated(prefix: &str) -> ConfigLoader {
        ConfigLoader::new().with_env_prefix(prefix)
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        file.write_all(YAML.as_bytes()).unwrap();

        let config = isolated("CAMPUS_T_YAML").load(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.auth.token_ttl_secs, 3600);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.bootstrap.admin.unwrap().username, "root");
    }

    #[test]
    fn test_load_toml_and_json() {
        let toml = r#"
[auth]
jwt_secret = "toml-secret"

[server]
port = 7000
"#;
        let config = isolated("CAMPUS_T_TOML")
            .load_from_str(toml, ConfigFormat::Toml)
            .unwrap();
        assert_eq!(config.server.port, 7000);

        let json = r#"{"auth": {"jwt_secret": "json-secret"}}"#;
        let config = isolated("CAMPUS_T_JSON")
            .load_from_str(json, ConfigFormat::Json)
            .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.jwt_secret, "json-secret");
    }

    #[test]
    fn test_config_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("campus.yml")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("campus.TOML")).unwrap(),
            ConfigFormat::Toml
        );
        assert!(matches!(
            ConfigFormat::from_path(Path::new("campus.ini")),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
        assert!(ConfigFormat::from_path(Path::new("campus")).is_err());
    }

    #[test]
    fn test_env_placeholder_with_default() {
        let loader = ConfigLoader::new();
        let resolved =
            loader.resolve_env_placeholders("secret: ${CAMPUS_T_SURELY_UNSET_VAR:fallback}");
        assert_eq!(resolved, "secret: fallback");
    }

    #[test]
    fn test_env_placeholder_set_and_unset() {
        env::set_var("CAMPUS_T_PLACEHOLDER", "from-env");
        let loader = ConfigLoader::new();

        assert_eq!(
            loader.resolve_env_placeholders("a: ${CAMPUS_T_PLACEHOLDER:ignored}"),
            "a: from-env"
        );
        assert_eq!(
            loader.resolve_env_placeholders("b: ${CAMPUS_T_NEVER_SET}"),
            "b: ${CAMPUS_T_NEVER_SET}"
        );
        assert_eq!(loader.resolve_env_placeholders("c: ${open"), "c: ${open");
    }

    #[test]
    fn test_env_overrides() {
        env::set_var("CAMPUS_T_OVR_JWT_SECRET", "env-secret");
        env::set_var("CAMPUS_T_OVR_API_PORT", "9191");
        env::set_var("CAMPUS_T_OVR_API_BIND", "127.0.0.1");
        env::set_var("CAMPUS_T_OVR_LOG_LEVEL", "warn");
        env::set_var("CAMPUS_T_OVR_ADMIN_PASSWORD", "from-env");

        let config = isolated("CAMPUS_T_OVR")
            .load_from_str(YAML, ConfigFormat::Yaml)
            .unwrap();

        assert_eq!(config.auth.jwt_secret, "env-secret");
        assert_eq!(config.server.port, 9191);
        assert_eq!(config.server.bind_address.to_string(), "127.0.0.1");
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(
            config.bootstrap.admin.unwrap().password.as_deref(),
            Some("from-env")
        );
    }

    #[test]
    fn test_invalid_env_override() {
        env::set_var("CAMPUS_T_BAD_API_PORT", "eighty");
        let err = isolated("CAMPUS_T_BAD")
            .load_from_str(YAML, ConfigFormat::Yaml)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { ref name, .. } if name == "CAMPUS_T_BAD_API_PORT"));
    }

    #[test]
    fn test_env_vars_disabled() {
        env::set_var("CAMPUS_T_OFF_API_PORT", "1234");
        let config = isolated("CAMPUS_T_OFF")
            .with_env_vars(false)
            .load_from_str(YAML, ConfigFormat::Yaml)
            .unwrap();
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_file_not_found() {
        let result = ConfigLoader::new().load("/nonexistent/path/campus.yaml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_parse_error_names_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = isolated("CAMPUS_T_PARSE").load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let json = r#"{"auth": {"jwt_secret": "s", "jwt_algo": "none"}}"#;
        assert!(isolated("CAMPUS_T_UNKNOWN")
            .load_from_str(json, ConfigFormat::Json)
            .is_err());
    }

    #[test]
    fn test_missing_secret_is_validation_error() {
        let err = isolated("CAMPUS_T_NOSECRET")
            .load_from_str("{}", ConfigFormat::Json)
            .unwrap_err();
        assert!(err.is_validation());
    }
}
