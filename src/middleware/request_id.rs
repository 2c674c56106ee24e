//! Request Id
//!
//! Every request carries an `x-request-id` header (a UUID v4 stamped by
//! `SetRequestIdLayer` at the outermost layer and propagated onto the
//! response). This module provides the extractor that handlers and the
//! error translator use to echo the id into response envelopes.

use axum::{extract::FromRequestParts, http::request::Parts};

/// Header carrying the per-request identifier.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The request's identifier, if the stamping layer ran.
#[derive(Debug, Clone)]
pub struct RequestId(pub Option<String>);

impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        Ok(RequestId(id))
    }
}
