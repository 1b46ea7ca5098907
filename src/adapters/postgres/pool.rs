//! Connection pool setup.

use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Opens a pool using the configured limits and timeouts.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    config
        .pool_options()
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::store_unavailable(format!("Failed to connect to database: {}", e)))
}

/// Applies the embedded migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::store_unavailable(format!("Failed to run migrations: {}", e)))
}
