//! Registration Handler
//!
//! `POST /api/auth/register`
//!
//! Validates the payload (username, email, password + matching
//! confirmation), creates the account and returns it together with a fresh
//! token pair — registration doubles as the first login.
//!
//! # Errors
//!
//! * `400 VALIDATION_ERROR` - malformed payload
//! * `409 USER_EXISTS` - username or email already taken (details name the field)
//! * `500 INTERNAL_ERROR` - hashing or storage failure

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};

use crate::auth::handlers::types::{ApiResponse, RegisterRequest};
use crate::auth::service::{AuthService, AuthSession};
use crate::auth::users::UserRole;
use crate::error::ApiError;
use crate::middleware::RequestId;
use crate::validation::ValidatedJson;

pub async fn register(
    State(auth): State<Arc<AuthService>>,
    request_id: RequestId,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthSession>>), ApiError> {
    let session = auth
        .register(
            request.username,
            request.email,
            &request.password,
            request.role.unwrap_or(UserRole::Gamer),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            session,
            "User registered successfully",
            &request_id,
        )),
    ))
}
