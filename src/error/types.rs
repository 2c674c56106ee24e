//! Error Taxonomy
//!
//! Every failure the request pipeline can produce — validation, credential,
//! token, authorization, storage conflict, or plain internal fault — is
//! classified at its point of origin into one variant of [`ApiError`]. The
//! variants carry everything the HTTP boundary needs (status code, machine
//! code, optional structured details), so no layer ever has to re-wrap or
//! re-classify an error on its way out.
//!
//! # Error Categories
//!
//! - Validation failures (400) with the full per-field violation list
//! - Uniqueness conflicts (409), both pre-checked and store-detected
//! - Credential and token failures (401)
//! - Authorization failures (403)
//! - Missing resources and unknown routes (404)
//! - Unclassified internal faults (500)

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::store::ConflictField;

/// A single field-level validation violation.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The unified application error.
///
/// Handlers, services and middleware all return this type; the translator
/// middleware renders it into the wire envelope exactly once, at the
/// boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request data failed schema validation. Carries every violated field,
    /// not just the first.
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    /// Registration or profile update collided with an existing account
    /// (detected by the pre-insert check).
    #[error("User with this {field} already exists")]
    UserExists { field: ConflictField },

    /// The store's unique index rejected a write that slipped past the
    /// pre-check. Same 409 outcome, different detection point.
    #[error("Duplicate value for field: {field}")]
    Duplicate { field: ConflictField },

    /// Unknown identifier or wrong password. Deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Current password mismatch during a password change.
    #[error("Current password is incorrect")]
    InvalidPassword,

    /// The account exists but has been deactivated.
    #[error("Account is deactivated")]
    AccountDeactivated,

    /// No bearer token on a route that requires one.
    #[error("Access token is required")]
    TokenMissing,

    /// Token failed signature, issuer, audience or structural checks.
    #[error("Invalid token")]
    TokenInvalid,

    /// Token signature is fine but the expiry has passed.
    #[error("Token expired")]
    TokenExpired,

    /// An authorization check ran without an authenticated account bound to
    /// the request.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Authenticated, but the account's role is not in the allowed set.
    #[error("One of these roles required: {}", required.join(", "))]
    RoleRequired { required: Vec<String> },

    /// Authenticated, non-elevated, and not the owner of the resource.
    #[error("Access denied: resource ownership required")]
    OwnershipRequired,

    /// The resource's owner could not be determined from the request.
    #[error("Cannot determine resource ownership")]
    OwnershipUnknown,

    /// A named resource does not exist.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// The account referenced by an id (token subject, path parameter) does
    /// not exist.
    #[error("User not found")]
    UserNotFound,

    /// No route matched the request.
    #[error("Route not found: {method} {path}")]
    RouteNotFound { method: String, path: String },

    /// Anything unclassified: store outages, hashing faults, programming
    /// errors. The message is suppressed outside development.
    #[error("{message}")]
    Internal { message: String },
}

impl ApiError {
    /// Validation failure carrying the collected field violations.
    pub fn validation(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        ApiError::Validation {
            message: message.into(),
            errors,
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        ApiError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal {
            message: message.into(),
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::UserExists { .. } | ApiError::Duplicate { .. } => StatusCode::CONFLICT,
            ApiError::InvalidCredentials
            | ApiError::InvalidPassword
            | ApiError::AccountDeactivated
            | ApiError::TokenMissing
            | ApiError::TokenInvalid
            | ApiError::TokenExpired
            | ApiError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            ApiError::RoleRequired { .. }
            | ApiError::OwnershipRequired
            | ApiError::OwnershipUnknown => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } | ApiError::UserNotFound | ApiError::RouteNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::UserExists { .. } => "USER_EXISTS",
            ApiError::Duplicate { .. } => "DUPLICATE_ERROR",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::InvalidPassword => "INVALID_PASSWORD",
            ApiError::AccountDeactivated => "ACCOUNT_DEACTIVATED",
            ApiError::TokenMissing => "TOKEN_MISSING",
            ApiError::TokenInvalid => "TOKEN_INVALID",
            ApiError::TokenExpired => "TOKEN_EXPIRED",
            ApiError::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            ApiError::RoleRequired { .. } => "ROLE_REQUIRED",
            ApiError::OwnershipRequired => "OWNERSHIP_REQUIRED",
            ApiError::OwnershipUnknown => "OWNERSHIP_UNKNOWN",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::UserNotFound => "USER_NOT_FOUND",
            ApiError::RouteNotFound { .. } => "ROUTE_NOT_FOUND",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Structured details, exposed only for the classified kinds that define
    /// them. Internal errors never carry details.
    pub fn details(&self) -> Option<Value> {
        match self {
            ApiError::Validation { errors, .. } => Some(json!({ "errors": errors })),
            ApiError::UserExists { field } | ApiError::Duplicate { field } => {
                Some(json!({ "field": field.to_string() }))
            }
            ApiError::RoleRequired { required } => Some(json!({ "requiredRoles": required })),
            ApiError::RouteNotFound { method, path } => {
                Some(json!({ "method": method, "path": path }))
            }
            _ => None,
        }
    }
}
