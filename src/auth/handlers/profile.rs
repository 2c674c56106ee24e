//! Profile Handlers
//!
//! `GET /api/auth/profile` and `PUT /api/auth/profile`, both behind the
//! authentication middleware. The update path accepts only username and
//! email — role changes go through the privileged admin route.

use std::sync::Arc;

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::auth::handlers::types::{ApiResponse, UpdateProfileRequest};
use crate::auth::service::AuthService;
use crate::auth::users::PublicUser;
use crate::error::ApiError;
use crate::middleware::{CurrentUser, RequestId};
use crate::validation::ValidatedJson;

#[derive(Debug, Serialize)]
pub struct ProfileData {
    pub user: PublicUser,
}

pub async fn get_profile(
    State(auth): State<Arc<AuthService>>,
    request_id: RequestId,
    current: CurrentUser,
) -> Result<Json<ApiResponse<ProfileData>>, ApiError> {
    let user = auth.get_profile(current.user.id).await?;
    Ok(Json(ApiResponse::new(
        ProfileData { user },
        "Profile retrieved successfully",
        &request_id,
    )))
}

pub async fn update_profile(
    State(auth): State<Arc<AuthService>>,
    request_id: RequestId,
    current: CurrentUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<ProfileData>>, ApiError> {
    let user = auth
        .update_profile(current.user.id, request.username, request.email)
        .await?;
    Ok(Json(ApiResponse::new(
        ProfileData { user },
        "Profile updated successfully",
        &request_id,
    )))
}
