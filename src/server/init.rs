//! Server Initialization
//!
//! Builds the complete axum application from configuration and a store.
//! Taking the store as a parameter keeps the composition root in charge:
//! the binary passes PostgreSQL (or the in-memory fallback), tests pass an
//! in-memory store directly.

use std::sync::Arc;

use axum::Router;

use crate::config::AppConfig;
use crate::routes::router::create_router;
use crate::server::state::AppState;
use crate::store::UserStore;

/// Create the application router with all services wired up.
pub fn create_app(config: Arc<AppConfig>, store: Arc<dyn UserStore>) -> Router {
    tracing::info!("initializing application");
    let state = AppState::new(config, store);
    create_router(state)
}
