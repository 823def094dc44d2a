// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `validate` command.

use campus_config::schema::RECOMMENDED_SECRET_LEN;
use campus_config::CampusConfig;

use crate::cli::{Cli, OutputFormat, ValidateArgs};
use crate::error::{BinError, BinResult};

/// Loads and validates the configuration, then prints a summary.
pub fn validate(cli: &Cli, args: ValidateArgs) -> BinResult<()> {
    let config_path = &cli.config;

    let config = campus_config::load_config(config_path)
        .map_err(|e| BinError::from(e).with_context("Configuration validation failed"))?;
    let warnings = collect_warnings(&config);
    let redacted = config.redacted();

    match args.format {
        OutputFormat::Text => {
            println!("✓ Configuration is valid: {}", config_path.display());
            println!();
            println!("Summary:");
            println!(
                "  API:          {}:{}",
                config.server.bind_address, config.server.port
            );
            println!("  Token TTL:    {}s", config.auth.token_ttl_secs);
            println!(
                "  CORS origins: {}",
                if config.server.cors_origins.is_empty() {
                    "any".to_string()
                } else {
                    config.server.cors_origins.join(", ")
                }
            );
            println!(
                "  Admin:        {}",
                config
                    .bootstrap
                    .admin
                    .as_ref()
                    .map(|a| a.username.as_str())
                    .unwrap_or("(none)")
            );
            println!(
                "  Demo data:    {}",
                if config.bootstrap.demo_data { "enabled" } else { "disabled" }
            );
            println!("  Log level:    {}", config.logging.level.as_str());

            if !warnings.is_empty() {
                println!();
                println!("Warnings:");
                for warning in &warnings {
                    println!("  ⚠ {}", warning);
                }
            }

            if args.show_config {
                println!();
                println!("Parsed configuration:");
                println!("{}", to_pretty_json(&redacted)?);
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "valid": true,
                "config_path": config_path.display().to_string(),
                "summary": {
                    "bind_address": config.server.bind_address.to_string(),
                    "port": config.server.port,
                    "token_ttl_secs": config.auth.token_ttl_secs,
                    "cors_origins": config.server.cors_origins,
                    "admin": config.bootstrap.admin.as_ref().map(|a| a.username.clone()),
                    "demo_data": config.bootstrap.demo_data,
                    "log_level": config.logging.level.as_str(),
                },
                "warnings": warnings,
                "config": if args.show_config { Some(&redacted) } else { None },
            });
            println!("{}", to_pretty_json(&output)?);
        }
    }

    Ok(())
}

/// Returns non-fatal findings about a valid configuration.
pub fn collect_warnings(config: &CampusConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.auth.jwt_secret.len() < RECOMMENDED_SECRET_LEN {
        warnings.push(format!(
            "auth.jwt_secret is shorter than {} bytes",
            RECOMMENDED_SECRET_LEN
        ));
    }
    if config.bootstrap.admin.is_none() {
        warnings.push("No bootstrap admin configured; admin-only operations are unreachable".to_string());
    }
    if config.server.cors_origins.is_empty() {
        warnings.push("CORS allows any origin".to_string());
    }
    if !config.bootstrap.seed_roles {
        warnings.push("Role seeding is disabled".to_string());
    }

    warnings
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> BinResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| BinError::runtime(format!("Failed to render configuration: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_config::AdminSettings;

    #[test]
    fn test_warnings_for_minimal_config() {
        let mut config = CampusConfig::default();
        config.auth.jwt_secret = "short".to_string();

        let warnings = collect_warnings(&config);
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("jwt_secret"));
    }

    #[test]
    fn test_no_warnings_for_complete_config() {
        let mut config = CampusConfig::default();
        config.auth.jwt_secret = "0123456789abcdef0123456789abcdef".to_string();
        config.server.cors_origins = vec!["https://campus.test".to_string()];
        config.bootstrap.admin = Some(AdminSettings {
            username: "admin".to_string(),
            email: "admin@campus.test".to_string(),
            password: Some("password123".to_string()),
            password_hash: None,
        });

        assert!(collect_warnings(&config).is_empty());
    }

    #[test]
    fn test_validate_missing_file() {
        let cli = <Cli as clap::Parser>::parse_from([
            "campus",
            "-c",
            "/nonexistent/campus.yaml",
            "validate",
        ]);
        let Some(crate::cli::Commands::Validate(args)) = cli.command.clone() else {
            panic!("expected validate");
        };
        let err = validate(&cli, args).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
