//! Authentication Module
//!
//! The credential and session core: account records, password hashing
//! policy, JWT session tokens, the business service and the HTTP handlers.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs      - Module exports
//! ├── users.rs    - User model, roles, public projection
//! ├── password.rs - bcrypt hashing policy (configurable work factor)
//! ├── sessions.rs - JWT issuance and verification
//! ├── service.rs  - AuthService business logic
//! └── handlers/   - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: payload validated → uniqueness checked → password
//!    hashed → account stored → token pair returned
//! 2. **Login**: identifier resolved → active check → password verified →
//!    token pair returned (extended lifetimes with `rememberMe`)
//! 3. **Per request**: bearer token verified → account re-read from the
//!    live store → deactivated accounts rejected
//!
//! # Security
//!
//! - bcrypt with a deployment-configured work factor; raw passwords never
//!   stored or logged
//! - Tokens bind issuer and audience and are verified on every request
//! - Credential failures are indistinguishable between unknown identifier
//!   and wrong password

/// User model and public projection
pub mod users;

/// Password hashing policy
pub mod password;

/// JWT session tokens
pub mod sessions;

/// Business logic service
pub mod service;

/// HTTP handlers
pub mod handlers;

pub use password::PasswordHasher;
pub use service::{AuthService, AuthSession};
pub use sessions::{Claims, JwtService, TokenPair};
pub use users::{PublicUser, User, UserRole};
