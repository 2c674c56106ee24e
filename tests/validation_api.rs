//! Validation layer integration tests
//!
//! Schema failures must come back as `VALIDATION_ERROR` with the complete
//! field list, and unknown fields must be silently stripped.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[tokio::test]
async fn register_reports_every_violated_field_at_once() {
    let server = test_server();

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": "a!",
            "email": "not-an-email",
            "password": "short",
            "confirmPassword": "different",
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));

    let errors = body["error"]["details"]["errors"].as_array().unwrap();
    let fields: Vec<&str> = errors
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"username"));
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"password"));
    assert!(fields.contains(&"confirm_password"));
}

#[tokio::test]
async fn password_must_contain_an_allowed_symbol() {
    let server = test_server();

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice1",
            "email": "a@x.com",
            "password": "Abcdefg1",
            "confirmPassword": "Abcdefg1",
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body = response.json::<Value>();
    let errors = body["error"]["details"]["errors"].as_array().unwrap();
    assert!(errors
        .iter()
        .any(|e| e["field"] == json!("password")
            && e["message"].as_str().unwrap().contains("special character")));
}

#[tokio::test]
async fn mismatched_confirmation_is_rejected() {
    let server = test_server();

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice1",
            "email": "a@x.com",
            "password": "Abcdef1!",
            "confirmPassword": "Abcdef2!",
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body = response.json::<Value>();
    let errors = body["error"]["details"]["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e["field"] == json!("confirm_password")));
}

#[tokio::test]
async fn login_needs_email_or_username() {
    let server = test_server();

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "password": "Abcdef1!" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
    assert_eq!(
        body["error"]["message"],
        json!("Either email or username is required")
    );
}

#[tokio::test]
async fn unknown_fields_are_silently_stripped() {
    let server = test_server();

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice1",
            "email": "a@x.com",
            "password": "Abcdef1!",
            "confirmPassword": "Abcdef1!",
            "isAdmin": true,
            "passwordHash": "sneaky",
        }))
        .await;

    // Extra fields are dropped, not an error — and have no effect.
    assert_eq!(response.status_code(), 201);
    let body = response.json::<Value>();
    assert_eq!(body["data"]["user"]["role"], json!("gamer"));
}

#[tokio::test]
async fn malformed_json_body_is_a_validation_error() {
    let server = test_server();

    let response = server
        .post("/api/auth/register")
        .content_type("application/json")
        .text("{not json")
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        json!("VALIDATION_ERROR")
    );
}

#[tokio::test]
async fn profile_update_with_no_fields_is_rejected() {
    let server = test_server();
    register_user(&server, "alice1", "a@x.com", "Abcdef1!").await;
    let token = login_access_token(&server, "alice1", "Abcdef1!").await;

    let (name, value) = bearer(&token);
    let response = server
        .put("/api/auth/profile")
        .add_header(name, value)
        .json(&json!({}))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        json!("At least one field must be provided")
    );
}

#[tokio::test]
async fn list_users_query_bounds_are_enforced() {
    let server = test_server();
    register_with_role(&server, "root1", "root@x.com", "Abcdef1!", "admin").await;
    let token = login_access_token(&server, "root1", "Abcdef1!").await;

    let (name, value) = bearer(&token);
    let response = server
        .get("/api/users?limit=1000")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        json!("VALIDATION_ERROR")
    );
}

#[tokio::test]
async fn invalid_role_value_is_rejected() {
    let server = test_server();

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice1",
            "email": "a@x.com",
            "password": "Abcdef1!",
            "confirmPassword": "Abcdef1!",
            "role": "superuser",
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        json!("VALIDATION_ERROR")
    );
}
