//! Middleware Module
//!
//! The per-request processing chain, in the order it runs for a gated
//! route: request-id stamping → error translation → authentication →
//! authorization → validation (as handler extractors) → handler.
//!
//! # Module Structure
//!
//! ```text
//! middleware/
//! ├── mod.rs        - Module exports
//! ├── auth.rs       - bearer-token authentication (mandatory + optional)
//! ├── authorize.rs  - role and ownership policies
//! ├── errors.rs     - error translation boundary, 404 fallback, panics
//! └── request_id.rs - per-request identifier extractor
//! ```

/// Authentication middleware and identity extractors
pub mod auth;

/// Authorization policies
pub mod authorize;

/// Error translation boundary
pub mod errors;

/// Request id extractor
pub mod request_id;

pub use auth::{authenticate, authenticate_optional, CurrentUser, MaybeUser};
pub use authorize::{authorize_ownership, authorize_role, OwnershipPolicy, RolePolicy};
pub use errors::{handle_panic, route_not_found, translate_errors};
pub use request_id::RequestId;
