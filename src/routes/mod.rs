//! Route Configuration
//!
//! ```text
//! routes/
//! ├── mod.rs        - Module exports
//! ├── router.rs     - router assembly and ambient layers
//! └── api_routes.rs - endpoint wiring and per-route middleware
//! ```

/// Endpoint wiring
pub mod api_routes;

/// Router assembly
pub mod router;

pub use router::create_router;
