//! In-Memory User Store
//!
//! A HashMap-backed [`UserStore`] used by the test suite and by
//! development runs without a `DATABASE_URL`. Enforces the same uniqueness
//! rules as the PostgreSQL schema so conflict behavior matches across
//! backends.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::users::{User, UserRole};
use crate::store::{ConflictField, StoreError, UserStore};

/// User store holding all records in process memory.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the unique fields against every record except `exclude`.
    fn conflict_in(
        users: &HashMap<Uuid, User>,
        candidate: &User,
        exclude: Option<Uuid>,
    ) -> Option<ConflictField> {
        for user in users.values() {
            if Some(user.id) == exclude {
                continue;
            }
            if user.email == candidate.email {
                return Some(ConflictField::Email);
            }
            if user.username == candidate.username {
                return Some(ConflictField::Username);
            }
        }
        None
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if let Some(field) = Self::conflict_in(&users, &user, None) {
            return Err(StoreError::Duplicate { field });
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if let Some(field) = Self::conflict_in(&users, user, Some(user.id)) {
            return Err(StoreError::Duplicate { field });
        }
        let mut updated = user.clone();
        updated.updated_at = Utc::now();
        users.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self, role: Option<UserRole>) -> Result<Vec<User>, StoreError> {
        let users = self.users.read().await;
        let mut result: Vec<User> = users
            .values()
            .filter(|u| role.is_none_or(|r| u.role == r))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }
}
