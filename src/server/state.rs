//! Application State Management
//!
//! The central state container handed to the router. All services are
//! constructed once by the composition root and shared by `Arc` — handlers
//! receive them through axum's `State` extraction, with `FromRef`
//! implementations so a handler can ask for just the service it needs.
//!
//! # Thread Safety
//!
//! Everything here is immutable after construction (the store's interior
//! mutability is its own concern), so cloning the state per request is a
//! handful of reference-count bumps.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::FromRef;

use crate::auth::password::PasswordHasher;
use crate::auth::service::AuthService;
use crate::auth::sessions::JwtService;
use crate::config::AppConfig;
use crate::store::UserStore;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Startup configuration (environment, secrets, lifetimes).
    pub config: Arc<AppConfig>,
    /// The user document store.
    pub store: Arc<dyn UserStore>,
    /// Token signing and verification.
    pub jwt: Arc<JwtService>,
    /// Credential-store business logic.
    pub auth: Arc<AuthService>,
    /// Process start, for the health endpoint's uptime.
    pub started_at: Instant,
}

impl AppState {
    /// Wire up the service graph over the given store.
    pub fn new(config: Arc<AppConfig>, store: Arc<dyn UserStore>) -> Self {
        let jwt = Arc::new(JwtService::new(&config.jwt));
        let hasher = PasswordHasher::new(config.bcrypt_cost);
        let auth = Arc::new(AuthService::new(store.clone(), jwt.clone(), hasher));
        AppState {
            config,
            store,
            jwt,
            auth,
            started_at: Instant::now(),
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl FromRef<AppState> for Arc<JwtService> {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}

impl FromRef<AppState> for Arc<dyn UserStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
