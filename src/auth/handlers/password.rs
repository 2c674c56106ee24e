//! Password Change Handler
//!
//! `PUT /api/auth/change-password`, behind authentication. Verifies the
//! current password before accepting the new one; a wrong current password
//! is `401 INVALID_PASSWORD`, distinct from the login path's
//! `INVALID_CREDENTIALS`.

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::auth::handlers::types::{ApiResponse, ChangePasswordRequest};
use crate::auth::service::AuthService;
use crate::error::ApiError;
use crate::middleware::{CurrentUser, RequestId};
use crate::validation::ValidatedJson;

pub async fn change_password(
    State(auth): State<Arc<AuthService>>,
    request_id: RequestId,
    current: CurrentUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    auth.change_password(
        current.user.id,
        &request.current_password,
        &request.new_password,
    )
    .await?;

    Ok(Json(ApiResponse::message_only(
        "Password changed successfully",
        &request_id,
    )))
}
