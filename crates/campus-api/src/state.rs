// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Application state shared across handlers.

use std::sync::Arc;

use campus_core::{Credentials, MemoryStore, Store};

use crate::auth::TokenService;
use crate::config::ApiConfig;
use crate::error::ApiResult;

// =============================================================================
// AppState
// =============================================================================

/// Application state shared across all handlers.
///
/// This is the central state container that is passed to all handlers via
/// Axum's state extraction mechanism.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Record store.
    pub store: Arc<dyn Store>,
    /// Token issuance and verification.
    pub tokens: Arc<TokenService>,
    /// Password hashing and verification.
    pub credentials: Arc<Credentials>,
}

impl AppState {
    /// Creates a new app state builder.
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }

    /// Returns the record store.
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Returns the token service.
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Returns the credential service.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// AppStateBuilder
// =============================================================================

/// Builder for constructing AppState.
#[derive(Default)]
pub struct AppStateBuilder {
    config: Option<ApiConfig>,
    store: Option<Arc<dyn Store>>,
    tokens: Option<Arc<TokenService>>,
    credentials: Option<Arc<Credentials>>,
}

impl AppStateBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the record store.
    pub fn store(mut self, store: Arc<dyn Store>) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the token service.
    pub fn tokens(mut self, tokens: Arc<TokenService>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Sets the credential service.
    pub fn credentials(mut self, credentials: Arc<Credentials>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Builds the AppState.
    ///
    /// Components not set explicitly are created from the configuration; the
    /// store defaults to an empty [`MemoryStore`].
    pub fn build(self) -> ApiResult<AppState> {
        let config = self.config.unwrap_or_default();

        let tokens = match self.tokens {
            Some(tokens) => tokens,
            None => Arc::new(TokenService::new(config.token.clone())?),
        };

        let credentials = match self.credentials {
            Some(credentials) => credentials,
            None => Arc::new(Credentials::new(config.hash)?),
        };

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()) as Arc<dyn Store>);

        Ok(AppState {
            config: Arc::new(config),
            store,
            tokens,
            credentials,
        })
    }
}

// =============================================================================
// FromRef implementations for extracting parts of state
// =============================================================================

impl axum::extract::FromRef<AppState> for Arc<dyn Store> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<TokenService> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<Credentials> {
    fn from_ref(state: &AppState) -> Self {
        state.credentials.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<ApiConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

// =============================================================================
// Tests
// =============================================================================
