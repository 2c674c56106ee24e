//! API Route Configuration
//!
//! Wires every endpoint to its handler and its middleware chain.
//!
//! # Routes
//!
//! ## Public
//! - `POST /api/auth/register` - user registration
//! - `POST /api/auth/login` - user login
//! - `GET /api/auth/health` - service health
//!
//! ## Optional authentication
//! - `GET /api/auth/session` - resolves identity when a valid token is
//!   supplied, anonymous otherwise; never rejects
//!
//! ## Authenticated
//! - `POST /api/auth/logout`
//! - `GET /api/auth/profile` / `PUT /api/auth/profile`
//! - `PUT /api/auth/change-password`
//! - `GET /api/auth/validate`
//!
//! ## Owner or elevated role
//! - `GET /api/users/{id}`
//!
//! ## Admin only
//! - `GET /api/users`
//! - `PUT /api/users/{id}/role`
//! - `PUT /api/users/{id}/status`

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    routing::{get, post, put},
    Router,
};

use crate::auth::handlers::{
    assign_role, change_password, get_profile, get_user, health, list_users, login, logout,
    register, session, set_status, update_profile, validate_token,
};
use crate::auth::users::UserRole;
use crate::middleware::{
    authenticate, authenticate_optional, authorize_ownership, authorize_role, OwnershipPolicy,
    RolePolicy,
};
use crate::server::state::AppState;

const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];

/// Assemble all API routes with their middleware chains.
pub fn configure_api_routes(state: &AppState) -> Router<AppState> {
    let require_auth = middleware::from_fn_with_state::<_, _, (State<AppState>, Request)>(
        state.clone(),
        authenticate,
    );
    let optional_auth = middleware::from_fn_with_state::<_, _, (State<AppState>, Request)>(
        state.clone(),
        authenticate_optional,
    );

    let admin_policy = RolePolicy::allow(ADMIN_ONLY);
    let require_admin = middleware::from_fn(move |req: Request, next: Next| {
        authorize_role(admin_policy.clone(), req, next)
    });

    let owner_policy = OwnershipPolicy::path_param("id");
    let require_owner = middleware::from_fn(move |req: Request, next: Next| {
        authorize_ownership(owner_policy.clone(), req, next)
    });

    let public = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/health", get(health));

    let optional = Router::new()
        .route("/api/auth/session", get(session))
        .route_layer(optional_auth);

    let protected = Router::new()
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/profile", get(get_profile).put(update_profile))
        .route("/api/auth/change-password", put(change_password))
        .route("/api/auth/validate", get(validate_token))
        .route_layer(require_auth.clone());

    // Layers added later run earlier: authentication resolves the identity
    // before the authorization policy reads it.
    let owned = Router::new()
        .route("/api/users/{id}", get(get_user))
        .route_layer(require_owner)
        .route_layer(require_auth.clone());

    let admin = Router::new()
        .route("/api/users", get(list_users))
        .route("/api/users/{id}/role", put(assign_role))
        .route("/api/users/{id}/status", put(set_status))
        .route_layer(require_admin)
        .route_layer(require_auth);

    public
        .merge(optional)
        .merge(protected)
        .merge(owned)
        .merge(admin)
}
