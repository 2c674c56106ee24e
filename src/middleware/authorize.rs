//! Authorization Middleware
//!
//! Policy objects evaluated against the already-authenticated request
//! context. Each policy is a small configured value exposing one check;
//! route assembly wraps it in `middleware::from_fn`.
//!
//! Two policies exist:
//!
//! - [`RolePolicy`] — the account's role must be in an allowed set
//! - [`OwnershipPolicy`] — elevated roles (developer, admin) always pass;
//!   everyone else must own the targeted resource
//!
//! The elevated tier is flat: developer and admin pass the same elevated
//! gates, and nothing orders admin above developer here. Admin-only routes
//! use `RolePolicy::allow(&[UserRole::Admin])` instead.

use axum::{
    extract::{RawPathParams, Request},
    middleware::Next,
    response::Response,
    RequestExt,
};
use uuid::Uuid;

use crate::auth::users::UserRole;
use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;

/// Allows a request when the authenticated account holds one of a fixed set
/// of roles.
#[derive(Debug, Clone)]
pub struct RolePolicy {
    allowed: &'static [UserRole],
}

impl RolePolicy {
    pub fn allow(allowed: &'static [UserRole]) -> Self {
        Self { allowed }
    }

    /// Check the policy against the request's authenticated identity.
    pub fn check(&self, current: Option<&CurrentUser>) -> Result<(), ApiError> {
        let current = current.ok_or(ApiError::AuthenticationRequired)?;
        if self.allowed.contains(&current.user.role) {
            Ok(())
        } else {
            tracing::warn!(
                user_id = %current.user.id,
                role = %current.user.role,
                "role-based access denied"
            );
            Err(ApiError::RoleRequired {
                required: self.allowed.iter().map(|r| r.to_string()).collect(),
            })
        }
    }
}

/// Middleware adapter for [`RolePolicy`].
pub async fn authorize_role(
    policy: RolePolicy,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    policy.check(request.extensions().get::<CurrentUser>())?;
    Ok(next.run(request).await)
}

/// Allows a request when the account owns the targeted resource or holds an
/// elevated role.
#[derive(Debug, Clone)]
pub struct OwnershipPolicy {
    param: &'static str,
}

impl OwnershipPolicy {
    /// Owner id is read from the named path parameter.
    pub fn path_param(param: &'static str) -> Self {
        Self { param }
    }

    /// Check ownership given the resolved owner id (if any).
    pub fn check(
        &self,
        current: Option<&CurrentUser>,
        owner: Option<Uuid>,
    ) -> Result<(), ApiError> {
        let current = current.ok_or(ApiError::AuthenticationRequired)?;
        if current.user.role.is_elevated() {
            return Ok(());
        }
        let owner = owner.ok_or_else(|| {
            tracing::warn!(user_id = %current.user.id, "ownership undeterminable");
            ApiError::OwnershipUnknown
        })?;
        if current.user.id == owner {
            Ok(())
        } else {
            tracing::warn!(
                user_id = %current.user.id,
                resource_owner = %owner,
                "ownership access denied"
            );
            Err(ApiError::OwnershipRequired)
        }
    }
}

/// Middleware adapter for [`OwnershipPolicy`].
pub async fn authorize_ownership(
    policy: OwnershipPolicy,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Elevated callers skip owner resolution entirely.
    let elevated = request
        .extensions()
        .get::<CurrentUser>()
        .map(|c| c.user.role.is_elevated());
    let owner = match elevated {
        Some(true) => None,
        _ => {
            let params: RawPathParams = request
                .extract_parts()
                .await
                .map_err(|_| ApiError::OwnershipUnknown)?;
            params
                .iter()
                .find(|(name, _)| *name == policy.param)
                .and_then(|(_, value)| Uuid::parse_str(value).ok())
        }
    };
    policy.check(request.extensions().get::<CurrentUser>(), owner)?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::sessions::Claims;
    use crate::auth::users::User;
    use chrono::Utc;

    fn current(role: UserRole) -> CurrentUser {
        let user = User::new(
            "alice1".to_string(),
            "a@x.com".to_string(),
            "$2b$04$hash".to_string(),
            role,
        );
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            iat: now,
            exp: now + 60,
            iss: "game-feedback-collector".to_string(),
            aud: "game-feedback-collector-users".to_string(),
        };
        CurrentUser { user, claims }
    }

    #[test]
    fn role_policy_requires_authentication_first() {
        let policy = RolePolicy::allow(&[UserRole::Admin]);
        assert!(matches!(
            policy.check(None),
            Err(ApiError::AuthenticationRequired)
        ));
    }

    #[test]
    fn role_policy_rejects_roles_outside_the_set() {
        let policy = RolePolicy::allow(&[UserRole::Admin]);
        let gamer = current(UserRole::Gamer);
        assert!(matches!(
            policy.check(Some(&gamer)),
            Err(ApiError::RoleRequired { .. })
        ));

        let admin = current(UserRole::Admin);
        assert!(policy.check(Some(&admin)).is_ok());
    }

    #[test]
    fn elevated_roles_bypass_ownership() {
        let policy = OwnershipPolicy::path_param("id");
        let developer = current(UserRole::Developer);
        let admin = current(UserRole::Admin);
        // Owner unknown, but elevated roles pass anyway.
        assert!(policy.check(Some(&developer), None).is_ok());
        assert!(policy.check(Some(&admin), None).is_ok());
    }

    #[test]
    fn gamers_must_own_the_resource() {
        let policy = OwnershipPolicy::path_param("id");
        let gamer = current(UserRole::Gamer);

        assert!(policy.check(Some(&gamer), Some(gamer.user.id)).is_ok());
        assert!(matches!(
            policy.check(Some(&gamer), Some(Uuid::new_v4())),
            Err(ApiError::OwnershipRequired)
        ));
        assert!(matches!(
            policy.check(Some(&gamer), None),
            Err(ApiError::OwnershipUnknown)
        ));
    }
}
