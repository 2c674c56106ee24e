//! PostgreSQL User Store
//!
//! sqlx-backed implementation of [`UserStore`]. Unique-index violations are
//! mapped to [`StoreError::Duplicate`] by constraint name, so racing writers
//! get the same conflict error the pre-insert check would have produced.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::users::{User, UserRole};
use crate::store::{ConflictField, StoreError, UserStore};

const SELECT_COLUMNS: &str = "id, username, email, password_hash, role, is_active, \
     is_email_verified, last_login, created_at, updated_at";

/// User store backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translate a sqlx error, recognizing unique-constraint violations on the
/// two uniqueness-bearing columns.
fn map_error(error: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &error {
        if db.is_unique_violation() {
            let field = match db.constraint() {
                Some("users_email_key") => ConflictField::Email,
                _ => ConflictField::Username,
            };
            return StoreError::Duplicate { field };
        }
    }
    StoreError::Backend(error)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: User) -> Result<User, StoreError> {
        let query = format!(
            "INSERT INTO users ({SELECT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {SELECT_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role)
            .bind(user.is_active)
            .bind(user.is_email_verified)
            .bind(user.last_login)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_error)
    }

    async fn save(&self, user: &User) -> Result<User, StoreError> {
        let query = format!(
            "UPDATE users \
             SET username = $2, email = $3, password_hash = $4, role = $5, \
                 is_active = $6, is_email_verified = $7, last_login = $8, \
                 updated_at = $9 \
             WHERE id = $1 \
             RETURNING {SELECT_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role)
            .bind(user.is_active)
            .bind(user.is_email_verified)
            .bind(user.last_login)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(map_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_error)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_error)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_error)
    }

    async fn list(&self, role: Option<UserRole>) -> Result<Vec<User>, StoreError> {
        match role {
            Some(role) => {
                let query = format!(
                    "SELECT {SELECT_COLUMNS} FROM users WHERE role = $1 ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, User>(&query)
                    .bind(role)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(map_error)
            }
            None => {
                let query =
                    format!("SELECT {SELECT_COLUMNS} FROM users ORDER BY created_at DESC");
                sqlx::query_as::<_, User>(&query)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(map_error)
            }
        }
    }
}
