//! User Store
//!
//! The persistence collaborator for account records, kept behind a trait so
//! the composition root decides the backend: PostgreSQL in deployments, an
//! in-memory map for tests and database-less development runs.
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs      - UserStore trait and StoreError
//! ├── postgres.rs - sqlx-backed implementation
//! └── memory.rs   - in-memory implementation
//! ```
//!
//! # Uniqueness
//!
//! Usernames are unique case-sensitively; emails are stored lowercase and
//! unique. The store's unique indexes are the authority: callers may
//! pre-check for friendlier errors, but a write that races past the
//! pre-check comes back as [`StoreError::Duplicate`] naming the violated
//! field, never as a crash.
//!
//! Both implementations set `updated_at` on every mutation.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::users::{User, UserRole};

/// In-memory implementation
pub mod memory;
/// PostgreSQL implementation
pub mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// Which unique field a conflicting write collided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    Username,
    Email,
}

impl std::fmt::Display for ConflictField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictField::Username => f.write_str("username"),
            ConflictField::Email => f.write_str("email"),
        }
    }
}

/// Failures raised by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique index rejected the write.
    #[error("duplicate value for unique field `{field}`")]
    Duplicate { field: ConflictField },

    /// Anything else: connection loss, timeouts, malformed rows.
    #[error("store backend failure: {0}")]
    Backend(#[from] sqlx::Error),
}

/// Document-store style access to account records.
///
/// Lookups treat the email argument as already lowercased by the caller;
/// the credential store normalizes before it ever reaches this trait.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new record. Fails with [`StoreError::Duplicate`] if the
    /// username or email is already taken.
    async fn insert(&self, user: User) -> Result<User, StoreError>;

    /// Persist changes to an existing record, bumping `updated_at`.
    /// Uniqueness is re-enforced, so renames can also conflict.
    async fn save(&self, user: &User) -> Result<User, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// All records, optionally filtered by role, newest first.
    async fn list(&self, role: Option<UserRole>) -> Result<Vec<User>, StoreError>;
}
