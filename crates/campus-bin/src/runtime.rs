// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Service runtime orchestration.
//!
//! Loads the configuration, prepares the record store (roles, the
//! bootstrap admin, optional demo data) and serves the API until a
//! shutdown signal arrives.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use campus_api::{ApiConfig, ApiServer, CorsConfig, TokenConfig};
use campus_config::{load_config, AdminSecret, CampusConfig};
use campus_core::seed::{self, AdminBootstrap, DemoPasswords, SeedOutcome};
use campus_core::{Credentials, MemoryStore, PasswordHash, Store};
use tracing::{info, warn};

use crate::error::{BinError, BinResult};
use crate::shutdown::ShutdownCoordinator;

// =============================================================================
// Config Mapping
// =============================================================================

/// Derives the API server configuration from the service configuration.
pub fn api_config(config: &CampusConfig) -> ApiConfig {
    let cors = if config.server.cors_origins.is_empty() {
        CorsConfig::default()
    } else {
        CorsConfig::with_origins(config.server.cors_origins.clone())
    };

    let token = TokenConfig::new(config.auth.jwt_secret.clone())
        .with_ttl(Duration::from_secs(config.auth.token_ttl_secs));

    let mut api = ApiConfig::new()
        .with_host(config.server.bind_address)
        .with_port(config.server.port)
        .with_request_timeout(Duration::from_secs(config.server.request_timeout_secs))
        .with_cors(cors)
        .with_token(token)
        .with_hash(config.auth.hash);

    if let Some(password) = config.bootstrap.demo_password.as_deref() {
        if !password.is_empty() {
            api = api.with_demo_password(password);
        }
    }
    api
}

// =============================================================================
// Bootstrap
// =============================================================================

/// What [`bootstrap`] did to the store.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Number of roles present after seeding.
    pub roles: usize,
    /// Whether the admin account was created by this run.
    pub admin_created: bool,
    /// Whether demo records were created by this run.
    pub demo_created: bool,
}

/// Prepares the store for serving.
pub async fn bootstrap(
    config: &CampusConfig,
    store: &dyn Store,
    credentials: &Credentials,
    demo_data: bool,
) -> BinResult<BootstrapReport> {
    let mut report = BootstrapReport::default();

    if config.bootstrap.seed_roles {
        report.roles = seed::seed_roles(store).await?.len();
        info!(roles = report.roles, "Roles seeded");
    }

    if let Some(admin) = &config.bootstrap.admin {
        let password = match admin.secret()? {
            AdminSecret::Plain(plain) => credentials.hash(plain)?,
            AdminSecret::Hashed(phc) => PasswordHash::parse(phc)?,
        };
        let outcome = seed::ensure_admin(store, &admin.username, &admin.email, password).await?;
        report.admin_created = matches!(outcome, AdminBootstrap::Created(_));
    } else if store.list_users().await?.is_empty() {
        warn!("No bootstrap admin configured and the store has no users");
    }

    if demo_data {
        let password = config
            .bootstrap
            .demo_password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| BinError::config("Demo data requires bootstrap.demo_password"))?;

        let passwords = DemoPasswords::hash(credentials, password)?;
        match seed::seed_demo_data(store, passwords).await? {
            SeedOutcome::Created(records) => {
                info!(
                    department_id = records.department.id,
                    student_id = records.student.id,
                    "Demo data created"
                );
                report.demo_created = true;
            }
            SeedOutcome::AlreadyPresent => info!("Demo data already present"),
        }
    }

    Ok(report)
}

// =============================================================================
// CampusRuntime
// =============================================================================

/// The service runtime.
pub struct CampusRuntime {
    config: Arc<CampusConfig>,
    shutdown: ShutdownCoordinator,
    demo_data: bool,
}

impl CampusRuntime {
    /// Creates a runtime for the given configuration.
    pub fn new(config: CampusConfig) -> Self {
        let demo_data = config.bootstrap.demo_data;
        Self {
            config: Arc::new(config),
            shutdown: ShutdownCoordinator::new(),
            demo_data,
        }
    }

    /// Forces demo data seeding on or off.
    pub fn with_demo_data(mut self, enabled: bool) -> Self {
        self.demo_data = enabled;
        self
    }

    /// Returns the shutdown coordinator.
    pub fn shutdown(&self) -> &ShutdownCoordinator {
        &self.shutdown
    }

    /// Runs the service until shutdown is signaled.
    pub async fn run(self) -> BinResult<()> {
        info!("Starting campus records service v{}", campus_api::VERSION);

        let api = api_config(&self.config);
        let credentials = Arc::new(
            Credentials::new(self.config.auth.hash)
                .map_err(|e| BinError::init(e.to_string()).with_context("credentials"))?,
        );
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());

        let report = bootstrap(&self.config, store.as_ref(), &credentials, self.demo_data).await?;
        info!(
            roles = report.roles,
            admin_created = report.admin_created,
            demo_created = report.demo_created,
            "Store ready"
        );

        let server = ApiServer::builder()
            .config(api)
            .store(store)
            .credentials(credentials)
            .build()
            .map_err(|e| BinError::from(e).with_context("api server"))?;

        info!(addr = %server.addr(), "Listening");

        self.shutdown.listen_for_signals();
        server
            .run_with_shutdown(self.shutdown.shutdown_signal())
            .await?;

        info!("Campus records service stopped");
        Ok(())
    }
}

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Builder for [`CampusRuntime`].
#[derive(Debug, Default)]
pub struct RuntimeBuilder {
    config_path: Option<PathBuf>,
    config: Option<CampusConfig>,
    demo_data: bool,
}

impl RuntimeBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from this file.
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Uses an already-loaded configuration.
    pub fn config(mut self, config: CampusConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Seeds demo data even when the configuration does not ask for it.
    pub fn demo_data(mut self, enabled: bool) -> Self {
        self.demo_data = enabled;
        self
    }

    /// Builds the runtime.
    pub fn build(self) -> BinResult<CampusRuntime> {
        let config = match (self.config, self.config_path) {
            (Some(config), _) => {
                config.validate()?;
                config
            }
            (None, Some(path)) => load_config(&path)
                .map_err(|e| BinError::from(e).with_context(path.display().to_string()))?,
            (None, None) => return Err(BinError::config("No configuration provided")),
        };

        let demo_data = self.demo_data || config.bootstrap.demo_data;
        Ok(CampusRuntime::new(config).with_demo_data(demo_data))
    }
}

// =============================================================================
// Tests
// =============================================================================
