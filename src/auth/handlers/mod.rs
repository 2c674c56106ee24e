//! Authentication Handlers Module
//!
//! HTTP handlers for every authentication and user-management endpoint.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Handler exports
//! ├── types.rs    - Request DTOs (validation schemas) and the success envelope
//! ├── register.rs - POST /api/auth/register
//! ├── login.rs    - POST /api/auth/login
//! ├── profile.rs  - GET/PUT /api/auth/profile
//! ├── password.rs - PUT /api/auth/change-password
//! ├── session.rs  - logout, validate, session, health
//! └── admin.rs    - /api/users administration
//! ```

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Profile handlers
pub mod profile;

/// Password change handler
pub mod password;

/// Session lifecycle handlers
pub mod session;

/// User administration handlers
pub mod admin;

pub use types::{ApiResponse, ChangePasswordRequest, LoginRequest, RegisterRequest};

pub use admin::{assign_role, get_user, list_users, set_status};
pub use login::login;
pub use password::change_password;
pub use profile::{get_profile, update_profile};
pub use register::register;
pub use session::{health, logout, session, validate_token};
