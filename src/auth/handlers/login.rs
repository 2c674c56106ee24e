//! Login Handler
//!
//! `POST /api/auth/login`
//!
//! Authenticates with email or username plus password and returns the
//! account with an access/refresh token pair. `rememberMe` extends both
//! token lifetimes.
//!
//! # Security
//!
//! Unknown identifier and wrong password return byte-identical
//! `INVALID_CREDENTIALS` responses — nothing reveals which one failed.

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::auth::handlers::types::{ApiResponse, LoginRequest};
use crate::auth::service::{AuthService, AuthSession};
use crate::error::ApiError;
use crate::middleware::RequestId;
use crate::validation::ValidatedJson;

pub async fn login(
    State(auth): State<Arc<AuthService>>,
    request_id: RequestId,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthSession>>, ApiError> {
    let session = auth
        .login(
            request.email.as_deref(),
            request.username.as_deref(),
            &request.password,
            request.remember_me,
        )
        .await?;

    Ok(Json(ApiResponse::new(
        session,
        "Login successful",
        &request_id,
    )))
}
