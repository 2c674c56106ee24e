//! Error Conversion
//!
//! Converts [`ApiError`] into an HTTP response and adapts collaborator
//! errors (the store's duplicate-key signal, join errors from the blocking
//! pool) into the taxonomy.
//!
//! The `IntoResponse` implementation renders a self-contained error body and
//! additionally attaches an [`ErrorPayload`] to the response extensions. The
//! translator middleware picks the payload up at the boundary and rebuilds
//! the body with the request context (request id, path, method) that only it
//! knows — see `crate::middleware::errors`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::error::types::ApiError;
use crate::store::StoreError;

/// Snapshot of an error, carried through response extensions to the
/// translator middleware.
#[derive(Debug, Clone)]
pub struct ErrorPayload {
    pub status: StatusCode,
    pub code: &'static str,
    /// The raw classified message. For internal errors this may contain
    /// backend specifics; the translator decides whether to expose it.
    pub message: String,
    pub details: Option<Value>,
}

impl ErrorPayload {
    /// The message that is always safe to send to a client, regardless of
    /// deployment mode.
    pub fn safe_message(&self) -> &str {
        if self.code == "INTERNAL_ERROR" {
            "Something went wrong"
        } else {
            &self.message
        }
    }
}

impl From<&ApiError> for ErrorPayload {
    fn from(error: &ApiError) -> Self {
        ErrorPayload {
            status: error.status_code(),
            code: error.code(),
            message: error.to_string(),
            details: error.details(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = ErrorPayload::from(&self);

        // Minimal envelope; the translator middleware enriches it with
        // request id, path, method and timestamp, and may restore the raw
        // internal message in development.
        let body = json!({
            "success": false,
            "error": {
                "code": payload.code,
                "message": payload.safe_message(),
                "details": payload.details,
            },
        });

        let mut response = (payload.status, Json(body)).into_response();
        response.extensions_mut().insert(payload);
        response
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Duplicate { field } => ApiError::Duplicate { field },
            StoreError::Backend(e) => {
                tracing::error!("store backend failure: {e}");
                ApiError::internal(format!("store backend failure: {e}"))
            }
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(error: tokio::task::JoinError) -> Self {
        ApiError::internal(format!("blocking task failed: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ConflictField;

    #[test]
    fn response_carries_payload_extension() {
        let response = ApiError::TokenExpired.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let payload = response
            .extensions()
            .get::<ErrorPayload>()
            .expect("payload attached");
        assert_eq!(payload.code, "TOKEN_EXPIRED");
        assert_eq!(payload.message, "Token expired");
    }

    #[test]
    fn internal_message_is_masked_by_default() {
        let payload = ErrorPayload::from(&ApiError::internal("pool timed out"));
        assert_eq!(payload.safe_message(), "Something went wrong");
        assert_eq!(payload.message, "pool timed out");
    }

    #[test]
    fn store_duplicate_becomes_conflict() {
        let err: ApiError = StoreError::Duplicate {
            field: ConflictField::Email,
        }
        .into();
        assert_eq!(err.code(), "DUPLICATE_ERROR");
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }
}
