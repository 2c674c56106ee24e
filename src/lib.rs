//! Game Feedback Collector - Credential & Session Backend
//!
//! The authentication and authorization service behind the Game Feedback
//! Collector community platform: it registers accounts, authenticates them,
//! issues and verifies bearer tokens, and gates protected operations by
//! role or resource ownership.
//!
//! # Overview
//!
//! Each request flows through a fixed pipeline:
//!
//! 1. **Validation** - declarative schemas on the request DTOs, all
//!    violations collected and reported together
//! 2. **Authentication** (where required) - bearer token resolved against
//!    the live user store, not just the token claims
//! 3. **Authorization** (where required) - role and ownership policies
//! 4. **Handler / business logic** - the credential store and token service
//! 5. **Error translation** - every failure, from any stage, rendered into
//!    one wire envelope at a single boundary
//!
//! # Module Structure
//!
//! - **`config`** - startup configuration from the environment
//! - **`error`** - the unified error taxonomy and its HTTP conversion
//! - **`store`** - user persistence: trait, PostgreSQL, in-memory
//! - **`auth`** - accounts, password policy, JWT sessions, service, handlers
//! - **`middleware`** - authentication, authorization, error boundary
//! - **`validation`** - validated extractors and field rules
//! - **`routes`** - router assembly
//! - **`server`** - state container and app construction
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gamefeedback::config::AppConfig;
//! use gamefeedback::server::create_app;
//! use gamefeedback::store::MemoryUserStore;
//!
//! # fn example() {
//! let config = Arc::new(AppConfig::from_env().unwrap());
//! let app = create_app(config, Arc::new(MemoryUserStore::new()));
//! // Serve `app` with axum.
//! # }
//! ```
//!
//! # Concurrency
//!
//! Requests are handled independently; the only shared state is the
//! read-mostly store and the startup configuration. Password hashing runs
//! on the blocking pool, token verification is pure, and nothing retries
//! automatically.

/// Startup configuration
pub mod config;

/// Unified error taxonomy
pub mod error;

/// User persistence
pub mod store;

/// Accounts, sessions and handlers
pub mod auth;

/// Request-processing middleware
pub mod middleware;

/// Request validation
pub mod validation;

/// Route configuration
pub mod routes;

/// Application assembly
pub mod server;

pub use error::ApiError;
pub use server::create_app;
