//! Error Translation Boundary
//!
//! The single sink where every classified failure becomes the wire format:
//!
//! ```json
//! {
//!   "success": false,
//!   "error": {
//!     "code": "TOKEN_EXPIRED",
//!     "message": "Token expired",
//!     "details": { },
//!     "requestId": "…",
//!     "timestamp": "…",
//!     "path": "/api/auth/profile",
//!     "method": "GET"
//!   }
//! }
//! ```
//!
//! `ApiError::into_response` attaches an [`ErrorPayload`] to the response;
//! this middleware picks it up, adds the request context only it knows
//! (id, path, method), logs by severity, and — outside development —
//! suppresses the raw message of internal errors. Handler panics are caught
//! below this boundary and demoted to `INTERNAL_ERROR`.

use std::any::Any;

use axum::{
    extract::{Request, State},
    http::{Method, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, ErrorPayload};
use crate::middleware::request_id::REQUEST_ID_HEADER;
use crate::server::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<&'a str>,
    timestamp: String,
    path: &'a str,
    method: &'a str,
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    success: bool,
    error: ErrorBody<'a>,
}

/// Boundary middleware rendering classified errors into the wire envelope.
pub async fn translate_errors(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let mut response = next.run(request).await;

    let Some(payload) = response.extensions_mut().remove::<ErrorPayload>() else {
        return response;
    };

    if payload.status.is_server_error() {
        tracing::error!(
            code = payload.code,
            %method,
            %path,
            request_id = request_id.as_deref().unwrap_or("-"),
            "request failed: {}",
            payload.message
        );
    } else {
        tracing::warn!(
            code = payload.code,
            %method,
            %path,
            request_id = request_id.as_deref().unwrap_or("-"),
            "request rejected: {}",
            payload.message
        );
    }

    // Internal messages stay raw only in development.
    let message = if state.config.environment.is_development() {
        payload.message.as_str()
    } else {
        payload.safe_message()
    };

    let envelope = ErrorEnvelope {
        success: false,
        error: ErrorBody {
            code: payload.code,
            message,
            details: payload.details.as_ref(),
            request_id: request_id.as_deref(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            path: &path,
            method: &method,
        },
    };

    (payload.status, Json(&envelope)).into_response()
}

/// Fallback handler for unmatched routes.
pub async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// Convert a caught handler panic into an unclassified internal error. Runs
/// under the translator, so the detail is suppressed outside development.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!("handler panicked: {detail}");
    ApiError::internal(format!("handler panicked: {detail}")).into_response()
}
