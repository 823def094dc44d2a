// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Configuration Integration Tests
//!
//! - `test_config_*`: file loading in each format, validation, env handling
//! - `test_runtime_*`: mapping a loaded file into a running service

use std::fs;
use std::path::PathBuf;

use campus_bin::runtime::{api_config, bootstrap};
use campus_config::{ConfigError, ConfigLoader, LogLevel};
use campus_core::{Credentials, HashConfig, MemoryStore, Store};
use campus_tests::prelude::*;
use campus_tests::common::temp_test_dir;

const SECRET: &str = "config-test-secret-0123456789abcdef";

/// Loader that ignores the real `CAMPUS_*` environment.
fn isolated_loader(prefix: &str) -> ConfigLoader {
    ConfigLoader::new().with_env_prefix(prefix)
}

fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write config");
    path
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_config_yaml_full() {
    let dir = temp_test_dir("campus-config");
    let path = write(
        &dir,
        "campus.yaml",
        &format!(
            r#"
server:
  bind_address: "127.0.0.1"
  port: 9100
  request_timeout_secs: 10
  cors_origins: ["https://portal.campus.test"]
auth:
  jwt_secret: "{SECRET}"
  token_ttl_secs: 3600
bootstrap:
  admin:
    username: root
    email: root@campus.test
    password: root-password
  demo_data: true
  demo_password: demo-password
logging:
  level: debug
  format: json
"#
        ),
    );

    let config = isolated_loader("CAMPUS_ITEST_YAML").load(&path).unwrap();
    assert_eq!(config.server.port, 9100);
    assert_eq!(config.server.bind_address.to_string(), "127.0.0.1");
    assert_eq!(config.auth.token_ttl_secs, 3600);
    assert_eq!(config.bootstrap.admin.as_ref().unwrap().username, "root");
    assert!(config.bootstrap.demo_data);
    assert_eq!(config.logging.level, LogLevel::Debug);
}

#[test]
fn test_config_toml_and_json_agree() {
    let dir = temp_test_dir("campus-config");
    let toml = write(
        &dir,
        "campus.toml",
        &format!("[server]\nport = 9200\n\n[auth]\njwt_secret = \"{SECRET}\"\n"),
    );
    let json = write(
        &dir,
        "campus.json",
        &format!(r#"{{"server": {{"port": 9200}}, "auth": {{"jwt_secret": "{SECRET}"}}}}"#),
    );

    let loader = isolated_loader("CAMPUS_ITEST_FORMATS");
    let from_toml = loader.load(&toml).unwrap();
    let from_json = loader.load(&json).unwrap();

    assert_eq!(from_toml.server.port, from_json.server.port);
    assert_eq!(from_toml.auth.jwt_secret, from_json.auth.jwt_secret);
    assert_eq!(from_toml.auth.token_ttl_secs, 86_400);
}

#[test]
fn test_config_missing_secret_is_rejected() {
    let dir = temp_test_dir("campus-config");
    let path = write(&dir, "campus.yaml", "server:\n  port: 8080\n");

    let err = isolated_loader("CAMPUS_ITEST_NOSECRET")
        .load(&path)
        .unwrap_err();
    assert!(matches!(err, ConfigError::MissingField { ref field } if field == "auth.jwt_secret"));
}

#[test]
fn test_config_unknown_extension_and_missing_file() {
    let dir = temp_test_dir("campus-config");
    let path = write(&dir, "campus.ini", "port=1");

    assert!(matches!(
        isolated_loader("CAMPUS_ITEST_EXT").load(&path).unwrap_err(),
        ConfigError::UnsupportedFormat { .. }
    ));
    assert!(isolated_loader("CAMPUS_ITEST_EXT")
        .load(dir.path().join("absent.yaml"))
        .is_err());
}

#[test]
fn test_config_admin_needs_exactly_one_secret() {
    let dir = temp_test_dir("campus-config");
    let path = write(
        &dir,
        "campus.toml",
        &format!(
            "[auth]\njwt_secret = \"{SECRET}\"\n\n[bootstrap.admin]\nusername = \"root\"\nemail = \"root@campus.test\"\n"
        ),
    );

    let err = isolated_loader("CAMPUS_ITEST_ADMIN").load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::MissingField { .. }));
}

// =============================================================================
// Environment
// =============================================================================

#[test]
fn test_config_placeholders_and_overrides() {
    std::env::set_var("CAMPUS_ITEST_PLACEHOLDER_SECRET", SECRET);
    std::env::set_var("CAMPUS_ITEST_ENV_API_PORT", "9300");
    std::env::set_var("CAMPUS_ITEST_ENV_LOG_LEVEL", "warn");

    let dir = temp_test_dir("campus-config");
    let path = write(
        &dir,
        "campus.yaml",
        r#"
server:
  port: ${CAMPUS_ITEST_UNSET_PORT:8181}
auth:
  jwt_secret: "${CAMPUS_ITEST_PLACEHOLDER_SECRET}"
"#,
    );

    let config = isolated_loader("CAMPUS_ITEST_ENV").load(&path).unwrap();
    assert_eq!(config.auth.jwt_secret, SECRET);
    assert_eq!(config.server.port, 9300);
    assert_eq!(config.logging.level, LogLevel::Warn);

    let without_env = ConfigLoader::new()
        .with_env_prefix("CAMPUS_ITEST_ENV")
        .with_env_vars(false)
        .load(&path);
    assert!(without_env.is_err());
}

#[test]
fn test_config_invalid_env_override() {
    std::env::set_var("CAMPUS_ITEST_BADPORT_API_PORT", "not-a-port");

    let dir = temp_test_dir("campus-config");
    let path = write(
        &dir,
        "campus.toml",
        &format!("[auth]\njwt_secret = \"{SECRET}\"\n"),
    );

    let err = isolated_loader("CAMPUS_ITEST_BADPORT")
        .load(&path)
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { .. }));
}

// =============================================================================
// Runtime mapping
// =============================================================================

#[tokio::test]
async fn test_runtime_loaded_config_serves_requests() {
    let dir = temp_test_dir("campus-config");
    let path = write(
        &dir,
        "campus.toml",
        &format!(
            r#"
[auth]
jwt_secret = "{SECRET}"

[auth.hash]
memory_kib = 8
iterations = 1
parallelism = 1

[bootstrap.admin]
username = "root"
email = "root@campus.test"
password = "root-password"
"#
        ),
    );
    let config = isolated_loader("CAMPUS_ITEST_RUNTIME").load(&path).unwrap();
    assert_eq!(config.auth.hash, HashConfig::for_testing());

    let store = MemoryStore::new();
    let credentials = Credentials::new(config.auth.hash).unwrap();
    let report = bootstrap(&config, &store, &credentials, false).await.unwrap();
    assert!(report.admin_created);

    let root = store.find_user_by_username("root").await.unwrap().unwrap();
    assert!(credentials.verify(&root.password, "root-password"));

    let api = api_config(&config);
    assert_eq!(api.token.secret, SECRET);
    assert_eq!(api.port, 8080);

    // The mapped configuration drives a working service.
    let app = TestApp::with_config(api).await;
    app.get("/api/users", Some(&app.admin_token().await))
        .await
        .assert_status(StatusCode::OK);
}
