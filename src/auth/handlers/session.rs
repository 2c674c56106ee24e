//! Session Handlers
//!
//! The token-lifecycle endpoints:
//!
//! - `POST /api/auth/logout` - stateless logout (tokens carry no revocation
//!   handle; clients drop them, the server just logs the event)
//! - `GET /api/auth/validate` - echoes the authenticated account and the
//!   decoded claims, proving the presented token is currently acceptable
//! - `GET /api/auth/session` - optional-auth endpoint reporting whether the
//!   request resolved to an identity; never rejects on bad credentials
//! - `GET /api/auth/health` - service liveness

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::auth::handlers::types::ApiResponse;
use crate::auth::sessions::Claims;
use crate::auth::users::PublicUser;
use crate::error::ApiError;
use crate::middleware::{CurrentUser, MaybeUser, RequestId};
use crate::server::state::AppState;

pub async fn logout(
    request_id: RequestId,
    current: CurrentUser,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    tracing::info!(user_id = %current.user.id, "user logged out");
    Ok(Json(ApiResponse::message_only(
        "Logged out successfully",
        &request_id,
    )))
}

#[derive(Debug, Serialize)]
pub struct ValidateData {
    pub user: PublicUser,
    pub token: Claims,
}

pub async fn validate_token(
    request_id: RequestId,
    current: CurrentUser,
) -> Result<Json<ApiResponse<ValidateData>>, ApiError> {
    Ok(Json(ApiResponse::new(
        ValidateData {
            user: PublicUser::from(&current.user),
            token: current.claims,
        },
        "Token is valid",
        &request_id,
    )))
}

#[derive(Debug, Serialize)]
pub struct SessionData {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicUser>,
}

pub async fn session(
    request_id: RequestId,
    MaybeUser(current): MaybeUser,
) -> Json<ApiResponse<SessionData>> {
    let data = match current {
        Some(current) => SessionData {
            authenticated: true,
            user: Some(PublicUser::from(&current.user)),
        },
        None => SessionData {
            authenticated: false,
            user: None,
        },
    };
    Json(ApiResponse::new(data, "Session resolved", &request_id))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub service: &'static str,
    pub status: &'static str,
    pub uptime: u64,
}

pub async fn health(
    State(state): State<AppState>,
    request_id: RequestId,
) -> Json<ApiResponse<HealthData>> {
    Json(ApiResponse::new(
        HealthData {
            service: "auth",
            status: "healthy",
            uptime: state.started_at.elapsed().as_secs(),
        },
        "Auth service is healthy",
        &request_id,
    ))
}
