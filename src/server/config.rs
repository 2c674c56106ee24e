//! Store Loading
//!
//! Builds the user store the server runs on. With a `DATABASE_URL` the
//! store is PostgreSQL (connection pool + migrations); a configured
//! database that cannot be reached is a startup failure rather than a
//! silent downgrade. Without one, the server runs on the in-memory store —
//! useful for local development, loudly warned about because accounts do
//! not survive a restart.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::store::{MemoryUserStore, PgUserStore, UserStore};

/// Connect the configured store backend.
pub async fn load_store(config: &AppConfig) -> Result<Arc<dyn UserStore>, sqlx::Error> {
    let Some(url) = &config.database_url else {
        tracing::warn!(
            "DATABASE_URL not set - using the in-memory store; accounts will not survive a restart"
        );
        return Ok(Arc::new(MemoryUserStore::new()));
    };

    tracing::info!("connecting to database");
    let pool = PgPool::connect(url).await?;

    tracing::info!("running database migrations");
    sqlx::migrate!().run(&pool).await.map_err(|e| {
        tracing::error!("database migrations failed: {e}");
        sqlx::Error::Migrate(Box::new(e))
    })?;

    tracing::info!("database ready");
    Ok(Arc::new(PgUserStore::new(pool)))
}
