//! User Administration Handlers
//!
//! The privileged half of the API:
//!
//! - `GET /api/users` - paginated listing, optionally filtered by role (admin)
//! - `GET /api/users/{id}` - fetch one account (owner or elevated role)
//! - `PUT /api/users/{id}/role` - the only role-mutation path (admin)
//! - `PUT /api/users/{id}/status` - activate/deactivate (admin)
//!
//! Deactivation takes effect on the target's very next authenticated
//! request, regardless of how much lifetime their tokens have left.

use std::sync::Arc;

use axum::{extract::State, response::Json};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::handlers::types::{
    ApiResponse, AssignRoleRequest, ListUsersQuery, SetStatusRequest,
};
use crate::auth::service::{AuthService, UserPage};
use crate::auth::users::PublicUser;
use crate::error::ApiError;
use crate::middleware::RequestId;
use crate::validation::{ValidatedJson, ValidatedPath, ValidatedQuery};

#[derive(Debug, Serialize)]
pub struct UserData {
    pub user: PublicUser,
}

pub async fn list_users(
    State(auth): State<Arc<AuthService>>,
    request_id: RequestId,
    ValidatedQuery(query): ValidatedQuery<ListUsersQuery>,
) -> Result<Json<ApiResponse<UserPage>>, ApiError> {
    let page = auth
        .list_users(query.role, query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::new(
        page,
        "Users retrieved successfully",
        &request_id,
    )))
}

pub async fn get_user(
    State(auth): State<Arc<AuthService>>,
    request_id: RequestId,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<ApiResponse<UserData>>, ApiError> {
    let user = auth.get_user(id).await?;
    Ok(Json(ApiResponse::new(
        UserData { user },
        "User retrieved successfully",
        &request_id,
    )))
}

pub async fn assign_role(
    State(auth): State<Arc<AuthService>>,
    request_id: RequestId,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(request): ValidatedJson<AssignRoleRequest>,
) -> Result<Json<ApiResponse<UserData>>, ApiError> {
    let user = auth.assign_role(id, request.role).await?;
    Ok(Json(ApiResponse::new(
        UserData { user },
        "Role assigned successfully",
        &request_id,
    )))
}

pub async fn set_status(
    State(auth): State<Arc<AuthService>>,
    request_id: RequestId,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(request): ValidatedJson<SetStatusRequest>,
) -> Result<Json<ApiResponse<UserData>>, ApiError> {
    let user = auth.set_active(id, request.is_active).await?;
    let message = if request.is_active {
        "Account activated successfully"
    } else {
        "Account deactivated successfully"
    };
    Ok(Json(ApiResponse::new(
        UserData { user },
        message,
        &request_id,
    )))
}
