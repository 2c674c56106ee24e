//! Authentication Service
//!
//! Business logic for the credential store: registration, login, profile
//! management, password changes and the privileged admin operations. The
//! service owns uniqueness pre-checks, email normalization and the hashing
//! policy; it talks to storage through the injected [`UserStore`] and issues
//! tokens through the injected [`JwtService`].
//!
//! Constructed once by the composition root and shared by reference — no
//! hidden global instance.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::password::PasswordHasher;
use crate::auth::sessions::{JwtService, TokenPair};
use crate::auth::users::{PublicUser, User, UserRole};
use crate::error::ApiError;
use crate::store::{ConflictField, UserStore};

/// Result of a successful registration or login.
#[derive(Debug, Serialize)]
pub struct AuthSession {
    pub user: PublicUser,
    pub tokens: TokenPair,
}

/// One page of the admin user listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub users: Vec<PublicUser>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
}

/// The credential store's operations.
pub struct AuthService {
    store: Arc<dyn UserStore>,
    jwt: Arc<JwtService>,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, jwt: Arc<JwtService>, hasher: PasswordHasher) -> Self {
        Self { store, jwt, hasher }
    }

    /// Register a new account and log it in.
    ///
    /// Both unique fields are checked up front and the collided one is
    /// reported; the store's unique index still backs this up against
    /// racing writers. The raw password is hashed before anything is
    /// persisted and is never logged.
    pub async fn register(
        &self,
        username: String,
        email: String,
        password: &str,
        role: UserRole,
    ) -> Result<AuthSession, ApiError> {
        let email = email.to_lowercase();

        if self.store.find_by_email(&email).await?.is_some() {
            tracing::warn!(%username, "registration conflict on email");
            return Err(ApiError::UserExists {
                field: ConflictField::Email,
            });
        }
        if self.store.find_by_username(&username).await?.is_some() {
            tracing::warn!(%username, "registration conflict on username");
            return Err(ApiError::UserExists {
                field: ConflictField::Username,
            });
        }

        let password_hash = self.hasher.hash(password).await?;
        let user = self
            .store
            .insert(User::new(username, email, password_hash, role))
            .await?;

        let tokens = self.jwt.issue_pair(&user, false)?;
        let user = self.touch_last_login(user).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(AuthSession {
            user: PublicUser::from(&user),
            tokens,
        })
    }

    /// Authenticate with email or username plus password.
    ///
    /// Unknown identifier and wrong password produce the same error; a
    /// deactivated account is reported distinctly. `remember_me` extends
    /// both token lifetimes.
    pub async fn login(
        &self,
        email: Option<&str>,
        username: Option<&str>,
        password: &str,
        remember_me: bool,
    ) -> Result<AuthSession, ApiError> {
        let user = match (email, username) {
            (Some(email), _) => self.store.find_by_email(&email.to_lowercase()).await?,
            (None, Some(username)) => self.store.find_by_username(username).await?,
            (None, None) => None,
        };

        let user = user.ok_or_else(|| {
            tracing::warn!("login failed: unknown identifier");
            ApiError::InvalidCredentials
        })?;

        if !user.is_active {
            tracing::warn!(user_id = %user.id, "login failed: account deactivated");
            return Err(ApiError::AccountDeactivated);
        }

        if !self.hasher.verify(password, &user.password_hash).await? {
            tracing::warn!(user_id = %user.id, "login failed: invalid password");
            return Err(ApiError::InvalidCredentials);
        }

        let tokens = self.jwt.issue_pair(&user, remember_me)?;
        let user = self.touch_last_login(user).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "user logged in");
        Ok(AuthSession {
            user: PublicUser::from(&user),
            tokens,
        })
    }

    /// Fetch the caller's own profile.
    pub async fn get_profile(&self, user_id: Uuid) -> Result<PublicUser, ApiError> {
        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        if !user.is_active {
            return Err(ApiError::AccountDeactivated);
        }
        Ok(PublicUser::from(&user))
    }

    /// Update the caller's username and/or email.
    ///
    /// Uniqueness is checked against all *other* accounts, so re-submitting
    /// the current value is not a conflict. Role is deliberately not
    /// updatable here.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        username: Option<String>,
        email: Option<String>,
    ) -> Result<PublicUser, ApiError> {
        let mut user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        let email = email.map(|e| e.to_lowercase());

        if let Some(email) = email.as_deref().filter(|e| *e != user.email) {
            if let Some(other) = self.store.find_by_email(email).await? {
                if other.id != user.id {
                    tracing::warn!(user_id = %user.id, "profile update conflict on email");
                    return Err(ApiError::UserExists {
                        field: ConflictField::Email,
                    });
                }
            }
        }
        if let Some(username) = username.as_deref().filter(|u| *u != user.username) {
            if let Some(other) = self.store.find_by_username(username).await? {
                if other.id != user.id {
                    tracing::warn!(user_id = %user.id, "profile update conflict on username");
                    return Err(ApiError::UserExists {
                        field: ConflictField::Username,
                    });
                }
            }
        }

        if let Some(username) = username {
            user.username = username;
        }
        if let Some(email) = email {
            user.email = email;
        }

        let user = self.store.save(&user).await?;
        tracing::info!(user_id = %user.id, "profile updated");
        Ok(PublicUser::from(&user))
    }

    /// Replace the caller's password after verifying the current one.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let mut user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        if !self
            .hasher
            .verify(current_password, &user.password_hash)
            .await?
        {
            tracing::warn!(user_id = %user.id, "password change failed: wrong current password");
            return Err(ApiError::InvalidPassword);
        }

        user.password_hash = self.hasher.hash(new_password).await?;
        self.store.save(&user).await?;
        tracing::info!(user_id = %user.id, "password changed");
        Ok(())
    }

    /// Fetch any account by id (authorization handled by the caller's
    /// middleware chain).
    pub async fn get_user(&self, user_id: Uuid) -> Result<PublicUser, ApiError> {
        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        Ok(PublicUser::from(&user))
    }

    /// Paginated account listing, optionally filtered by role.
    pub async fn list_users(
        &self,
        role: Option<UserRole>,
        page: u32,
        limit: u32,
    ) -> Result<UserPage, ApiError> {
        let all = self.store.list(role).await?;
        let total = all.len();
        let start = ((page - 1) as usize).saturating_mul(limit as usize);
        let users = all
            .iter()
            .skip(start)
            .take(limit as usize)
            .map(PublicUser::from)
            .collect();
        Ok(UserPage {
            users,
            total,
            page,
            limit,
        })
    }

    /// Privileged role change. The only path that mutates a role.
    pub async fn assign_role(&self, user_id: Uuid, role: UserRole) -> Result<PublicUser, ApiError> {
        let mut user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        user.role = role;
        let user = self.store.save(&user).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "role assigned");
        Ok(PublicUser::from(&user))
    }

    /// Privileged activation toggle. Deactivating an account is the only
    /// way to invalidate its outstanding tokens early.
    pub async fn set_active(&self, user_id: Uuid, active: bool) -> Result<PublicUser, ApiError> {
        let mut user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        user.is_active = active;
        let user = self.store.save(&user).await?;
        tracing::info!(user_id = %user.id, active, "account activation changed");
        Ok(PublicUser::from(&user))
    }

    async fn touch_last_login(&self, mut user: User) -> Result<User, ApiError> {
        user.last_login = Some(Utc::now());
        Ok(self.store.save(&user).await?)
    }
}
