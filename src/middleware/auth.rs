//! Authentication Middleware
//!
//! Resolves a bearer token to a live account record, per request. The
//! middleware runs a fixed sequence:
//!
//! 1. Extract the token from the `Authorization` header
//! 2. Verify signature, expiry, issuer and audience
//! 3. Look the account up in the live store by the token's subject — claims
//!    alone are never trusted for current state
//! 4. Reject deactivated accounts
//! 5. Bind the resolved [`CurrentUser`] to the request extensions
//!
//! [`authenticate`] rejects with the precise failure kind; the optional
//! variant [`authenticate_optional`] never rejects — any credential problem
//! simply continues the request anonymously. That is the one place in the
//! pipeline where errors are intentionally swallowed.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::sessions::{Claims, JwtService};
use crate::auth::users::User;
use crate::error::ApiError;
use crate::server::state::AppState;

/// The authenticated account bound to a request, together with the decoded
/// token claims it arrived with.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub claims: Claims,
}

/// Run the credential-resolution state machine against the live store.
async fn resolve(state: &AppState, headers: &HeaderMap) -> Result<CurrentUser, ApiError> {
    let header = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
    let token = JwtService::extract_from_header(header).ok_or_else(|| {
        tracing::warn!("authentication failed: no token provided");
        ApiError::TokenMissing
    })?;

    let claims = state.jwt.verify(token)?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
        tracing::warn!("authentication failed: malformed subject claim");
        ApiError::TokenInvalid
    })?;

    let user = state
        .store
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(%user_id, "authentication failed: user not found");
            ApiError::UserNotFound
        })?;

    if !user.is_active {
        tracing::warn!(%user_id, "authentication failed: account deactivated");
        return Err(ApiError::AccountDeactivated);
    }

    Ok(CurrentUser { user, claims })
}

/// Mandatory authentication: reject on any credential failure.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let current = resolve(&state, request.headers()).await?;
    request.extensions_mut().insert(current);
    Ok(next.run(request).await)
}

/// Optional authentication: resolve identity when cleanly possible, fail
/// open to anonymous otherwise.
pub async fn authenticate_optional(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Ok(current) = resolve(&state, request.headers()).await {
        request.extensions_mut().insert(current);
    }
    next.run(request).await
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(ApiError::AuthenticationRequired)
    }
}

/// Identity as resolved by [`authenticate_optional`]: present when a valid
/// credential was supplied, `None` for anonymous requests.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<CurrentUser>().cloned()))
    }
}
