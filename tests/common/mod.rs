//! Shared test fixtures
//!
//! Builds the application over the in-memory store so the full HTTP
//! pipeline (layers, middleware, handlers, error translation) is exercised
//! without a database.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use gamefeedback::auth::JwtService;
use gamefeedback::config::{AppConfig, Environment, JwtConfig};
use gamefeedback::server::create_app;
use gamefeedback::store::MemoryUserStore;
use serde_json::{json, Value};

pub fn test_config() -> AppConfig {
    AppConfig {
        port: 0,
        // Test behaves like production for error exposure: internal
        // messages must be suppressed.
        environment: Environment::Test,
        database_url: None,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            issuer: "game-feedback-collector".to_string(),
            audience: "game-feedback-collector-users".to_string(),
            access_lifetime: Duration::from_secs(600),
            refresh_lifetime: Duration::from_secs(3600),
        },
        // Minimum bcrypt cost keeps the suite fast.
        bcrypt_cost: 4,
        cors_origin: "http://localhost:3001".to_string(),
    }
}

/// A fresh server over an empty in-memory store.
pub fn test_server() -> TestServer {
    let config = Arc::new(test_config());
    let app = create_app(config, Arc::new(MemoryUserStore::new()));
    TestServer::new(app).expect("failed to build test server")
}

/// Token service configured identically to the test server, for decoding
/// tokens the server issued.
pub fn jwt_service() -> JwtService {
    JwtService::new(&test_config().jwt)
}

pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("authorization"),
        HeaderValue::from_str(&format!("Bearer {token}")).expect("valid header value"),
    )
}

/// Register an account, asserting success; returns the response body.
pub async fn register_user(
    server: &TestServer,
    username: &str,
    email: &str,
    password: &str,
) -> Value {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": username,
            "email": email,
            "password": password,
            "confirmPassword": password,
        }))
        .await;
    assert_eq!(response.status_code(), 201, "registration should succeed");
    response.json::<Value>()
}

/// Register with an explicit role.
pub async fn register_with_role(
    server: &TestServer,
    username: &str,
    email: &str,
    password: &str,
    role: &str,
) -> Value {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": username,
            "email": email,
            "password": password,
            "confirmPassword": password,
            "role": role,
        }))
        .await;
    assert_eq!(response.status_code(), 201, "registration should succeed");
    response.json::<Value>()
}

/// Log in and return the access token.
pub async fn login_access_token(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": username, "password": password }))
        .await;
    assert_eq!(response.status_code(), 200, "login should succeed");
    let body = response.json::<Value>();
    body["data"]["tokens"]["accessToken"]
        .as_str()
        .expect("access token present")
        .to_string()
}

/// Extract the user id from a register/login response body.
pub fn user_id(body: &Value) -> String {
    body["data"]["user"]["id"]
        .as_str()
        .expect("user id present")
        .to_string()
}
