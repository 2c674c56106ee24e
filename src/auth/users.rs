//! User Model
//!
//! The account record owned by the credential store, plus its public
//! projection.
//!
//! # Serialization Contract
//!
//! [`User`] intentionally does not implement `Serialize`. The only way an
//! account leaves the process is through [`PublicUser`], which has no
//! password-hash field at all — forgetting to strip it is not possible, on
//! any response path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role.
///
/// `gamer` is the default self-service tier; `developer` and `admin` form a
/// single elevated tier that bypasses ownership checks. There is no ordering
/// between developer and admin at authorization time — admin-only routes gate
/// on the exact role instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    Gamer,
    Developer,
    Admin,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Gamer => "gamer",
            UserRole::Developer => "developer",
            UserRole::Admin => "admin",
        }
    }

    /// Whether this role bypasses ownership checks.
    pub fn is_elevated(self) -> bool {
        matches!(self, UserRole::Developer | UserRole::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered account.
///
/// Mutated only through the credential store's operations; `email` is always
/// stored lowercase, `password_hash` is always populated before the record
/// is persisted.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub is_email_verified: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh account record. The email must already be lowercased
    /// and the password already hashed by the caller.
    pub fn new(username: String, email: String, password_hash: String, role: UserRole) -> Self {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            role,
            is_active: true,
            is_email_verified: false,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The outward-facing projection of an account.
///
/// Everything a client may see; notably without the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub is_email_verified: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        PublicUser {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            is_active: user.is_active,
            is_email_verified: user.is_email_verified,
            last_login: user.last_login,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accounts_default_sensibly() {
        let user = User::new(
            "alice1".to_string(),
            "a@x.com".to_string(),
            "$2b$04$hash".to_string(),
            UserRole::Gamer,
        );
        assert!(user.is_active);
        assert!(!user.is_email_verified);
        assert!(user.last_login.is_none());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn elevated_tier_is_developer_and_admin() {
        assert!(!UserRole::Gamer.is_elevated());
        assert!(UserRole::Developer.is_elevated());
        assert!(UserRole::Admin.is_elevated());
    }

    #[test]
    fn public_projection_has_no_password_hash() {
        let user = User::new(
            "alice1".to_string(),
            "a@x.com".to_string(),
            "$2b$04$hash".to_string(),
            UserRole::Gamer,
        );
        let json = serde_json::to_value(PublicUser::from(&user)).unwrap();
        let rendered = json.to_string();
        assert!(!rendered.contains("password"));
        assert!(!rendered.contains("$2b$"));
        assert_eq!(json["username"], "alice1");
        assert_eq!(json["role"], "gamer");
        assert_eq!(json["isActive"], true);
    }
}
