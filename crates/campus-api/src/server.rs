// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API server implementation.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{HeaderName, HeaderValue, Method, StatusCode},
    Router,
};
use campus_core::{Credentials, Store};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::auth::TokenService;
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::routes;
use crate::state::{AppState, AppStateBuilder};

// =============================================================================
// ApiServer
// =============================================================================

/// The API server.
///
/// This is the main entry point for creating and running the HTTP server.
pub struct ApiServer {
    state: AppState,
    config: Arc<ApiConfig>,
}

impl ApiServer {
    /// Creates a new API server with the given state.
    pub fn new(state: AppState) -> Self {
        let config = state.config.clone();
        Self { state, config }
    }

    /// Creates a server builder.
    pub fn builder() -> ApiServerBuilder {
        ApiServerBuilder::new()
    }

    /// Returns the shared application state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Creates the router with all routes and middleware.
    pub fn router(&self) -> Router {
        let cors = create_cors_layer(&self.config);

        let middleware_stack = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                self.config.request_timeout,
            ))
            .layer(cors);

        routes::router(self.state.clone()).layer(middleware_stack)
    }

    /// Runs the server.
    pub async fn run(self) -> ApiResult<()> {
        self.run_with_shutdown(std::future::pending()).await
    }

    /// Runs the server with graceful shutdown.
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> ApiResult<()> {
        let addr = self.config.socket_addr();
        let router = self.router();

        info!("Starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to bind {}: {}", addr, e)))?;

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| ApiError::internal(format!("Server error: {}", e)))?;

        info!("API server shutdown complete");

        Ok(())
    }

    /// Returns the server address.
    pub fn addr(&self) -> SocketAddr {
        self.config.socket_addr()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Creates the CORS layer from configuration.
fn create_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = &config.cors;

    let mut layer = CorsLayer::new().max_age(Duration::from_secs(cors.max_age));

    if cors.allows_any_origin() {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();
        layer = layer.allow_origin(AllowOrigin::list(origins));
    }

    let methods: Vec<Method> = cors
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    layer = layer.allow_methods(methods);

    if cors.allowed_headers.iter().any(|h| h == "*") {
        layer = layer.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = cors
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        layer = layer.allow_headers(headers);
    }

    layer
}

// =============================================================================
// Server Builder
// =============================================================================

/// Builder for creating the API server.
#[derive(Default)]
pub struct ApiServerBuilder {
    state_builder: AppStateBuilder,
}

impl ApiServerBuilder {
    /// Creates a new server builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.state_builder = self.state_builder.config(config);
        self
    }

    /// Sets the record store.
    pub fn store(mut self, store: Arc<dyn Store>) -> Self {
        self.state_builder = self.state_builder.store(store);
        self
    }

    /// Sets the token service.
    pub fn tokens(mut self, tokens: Arc<TokenService>) -> Self {
        self.state_builder = self.state_builder.tokens(tokens);
        self
    }

    /// Sets the credential service.
    pub fn credentials(mut self, credentials: Arc<Credentials>) -> Self {
        self.state_builder = self.state_builder.credentials(credentials);
        self
    }

    /// Builds the server.
    pub fn build(self) -> ApiResult<ApiServer> {
        let state = self.state_builder.build()?;
        Ok(ApiServer::new(state))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenConfig;
    use crate::config::CorsConfig;
    use axum::{body::Body, http::Request};
    use campus_core::HashConfig;
    use tower::ServiceExt;

    fn test_config() -> ApiConfig {
        ApiConfig::default()
            .with_token(TokenConfig::new("test-secret-key-that-is-long-enough"))
            .with_hash(HashConfig::for_testing())
    }

    fn server() -> ApiServer {
        ApiServerBuilder::new().config(test_config()).build().unwrap()
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_server_builder() {
        assert_eq!(server().addr().port(), 8080);
    }

    #[tokio::test]
    async fn test_welcome_and_health() {
        let (status, body) = get(server().router(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Welcome"));

        let (status, body) = get(server().router(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], crate::VERSION);
    }

    #[tokio::test]
    async fn test_public_and_protected_routes() {
        let (status, body) = get(server().router(), "/api/departments").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"departments\":[]"));

        let (status, body) = get(server().router(), "/api/users").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Token is missing"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, _) = get(server().router(), "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_cors_layer_with_origins() {
        let config = test_config().with_cors(CorsConfig::with_origins(vec![
            "https://campus.test".to_string(),
        ]));
        let _layer = create_cors_layer(&config);
    }
}
