//! Error Module
//!
//! The single error taxonomy for the whole request pipeline and its HTTP
//! conversion.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports
//! ├── types.rs      - ApiError and per-variant status/code/details
//! └── conversion.rs - IntoResponse and collaborator-error adapters
//! ```
//!
//! Errors are classified where they originate and travel unchanged to the
//! translator middleware; see `crate::middleware::errors` for the boundary
//! rendering.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use conversion::ErrorPayload;
pub use types::{ApiError, FieldError};
