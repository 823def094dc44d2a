// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Harness
//!
//! [`TestApp`] is an in-process service: a seeded [`MemoryStore`], the full
//! router with its middleware, and helpers for issuing requests.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use campus_api::{ApiConfig, ApiServer, TokenService};
use campus_core::seed;
use campus_core::{
    Credentials, Department, MemoryStore, NewAccount, NewProfessor, NewStudent, PasswordHash,
    Professor, RecordId, Store, Student, User,
};
use serde_json::Value;
use tower::ServiceExt;

use super::assertions::TestResponse;
use super::fixtures::*;
use super::init_test_logging;

// =============================================================================
// TestApp
// =============================================================================

/// An in-process service instance.
pub struct TestApp {
    /// Backing store, shared with the router.
    pub store: Arc<MemoryStore>,
    /// Credential component used by the router.
    pub credentials: Arc<Credentials>,
    /// Token service used by the router.
    pub tokens: Arc<TokenService>,
    /// The bootstrap admin.
    pub admin: User,
    /// A department created at startup.
    pub department: Department,
    router: Router,
}

impl TestApp {
    /// Creates an instance with [`test_api_config`].
    pub async fn new() -> Self {
        Self::with_config(test_api_config()).await
    }

    /// Creates an instance with the given API configuration.
    pub async fn with_config(config: ApiConfig) -> Self {
        init_test_logging();

        let store = Arc::new(MemoryStore::new());
        let credentials =
            Arc::new(Credentials::new(config.hash).expect("Failed to create credentials"));
        let tokens =
            Arc::new(TokenService::new(config.token.clone()).expect("Failed to create tokens"));

        seed::seed_roles(store.as_ref()).await.expect("Failed to seed roles");
        let admin_hash = credentials.hash(ADMIN_PASSWORD).expect("Failed to hash");
        let admin = match seed::ensure_admin(store.as_ref(), ADMIN_USERNAME, ADMIN_EMAIL, admin_hash)
            .await
            .expect("Failed to create admin")
        {
            seed::AdminBootstrap::Created(user) => user,
            seed::AdminBootstrap::AlreadyPresent => unreachable!("fresh store"),
        };
        let department = store
            .create_department("Computer Science".to_string())
            .await
            .expect("Failed to create department");

        let dyn_store: Arc<dyn Store> = store.clone();
        let server = ApiServer::builder()
            .config(config)
            .store(dyn_store)
            .tokens(tokens.clone())
            .credentials(credentials.clone())
            .build()
            .expect("Failed to build server");

        Self {
            store,
            credentials,
            tokens,
            admin,
            department,
            router: server.router(),
        }
    }

    // -------------------------------------------------------------------------
    // Requests
    // -------------------------------------------------------------------------

    /// Sends a request through the full router.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a prepared request through the full router.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        TestResponse::new(status, String::from_utf8_lossy(&bytes).into_owned())
    }

    /// `GET`.
    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    /// `POST` with a JSON body.
    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    /// `PUT` with a JSON body.
    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    /// `DELETE`.
    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }

    // -------------------------------------------------------------------------
    // Tokens
    // -------------------------------------------------------------------------

    /// Logs in over HTTP and returns the token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/api/login", None, login_payload(username, password))
            .await;
        response.body["token"]
            .as_str()
            .unwrap_or_else(|| panic!("Login failed for {}: {}", username, response.text))
            .to_string()
    }

    /// Logs in as the bootstrap admin.
    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    /// Issues a token for a user directly, skipping the password check.
    pub async fn token_for(&self, user_id: RecordId) -> String {
        let identity = self
            .store
            .find_identity(user_id)
            .await
            .expect("Store failed")
            .expect("No such user");
        self.tokens.issue(&identity).expect("Failed to issue token")
    }

    // -------------------------------------------------------------------------
    // Records
    // -------------------------------------------------------------------------

    fn hash(&self, password: &str) -> PasswordHash {
        self.credentials.hash(password).expect("Failed to hash")
    }

    fn account(&self, username: &str) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            email: format!("{}@campus.test", username),
            password: self.hash(USER_PASSWORD),
        }
    }

    /// Creates a student in the startup department.
    pub async fn create_student(&self, username: &str, student_number: &str) -> (User, Student) {
        self.store
            .create_student(
                self.account(username),
                NewStudent {
                    student_id: student_number.to_string(),
                    first_name: "Ada".to_string(),
                    last_name: "Lovelace".to_string(),
                    department_id: self.department.id,
                },
            )
            .await
            .expect("Failed to create student")
    }

    /// Creates a professor in the startup department.
    pub async fn create_professor(&self, username: &str) -> (User, Professor) {
        self.store
            .create_professor(
                self.account(username),
                NewProfessor {
                    first_name: "Grace".to_string(),
                    last_name: "Hopper".to_string(),
                    title: None,
                    department_id: self.department.id,
                },
            )
            .await
            .expect("Failed to create professor")
    }
}
