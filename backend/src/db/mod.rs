//! Database connection and pool management
//!
//! Pool creation, migrations, the readiness query, and helpers for
//! classifying PostgreSQL constraint violations.

use crate::config::DatabaseConfig;
use anyhow::Result;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// PostgreSQL SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Pool tuning that is not exposed through the application config
pub struct PoolOptions {
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            min_connections: 1,
            acquire_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// Create a PostgreSQL connection pool from the application config
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    create_pool_with_options(config, PoolOptions::default()).await
}

/// Create a PostgreSQL connection pool with explicit tuning
pub async fn create_pool_with_options(
    config: &DatabaseConfig,
    options: PoolOptions,
) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(&config.url)?.application_name("snippets-api");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(options.min_connections.min(config.max_connections))
        .acquire_timeout(options.acquire_timeout)
        .idle_timeout(options.idle_timeout)
        .max_lifetime(options.max_lifetime)
        .connect_with(connect_options)
        .await?;

    info!(
        max_connections = config.max_connections,
        "Database pool created"
    );

    Ok(pool)
}

/// Apply pending migrations from `backend/migrations`
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!("Database health check failed: {}", e);
            e.into()
        })
}

fn sqlstate(err: &anyhow::Error) -> Option<String> {
    match err.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db_err)) => db_err.code().map(|c| c.into_owned()),
        _ => None,
    }
}

/// Whether a repository error came from a unique constraint
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    sqlstate(err).as_deref() == Some(UNIQUE_VIOLATION)
}

/// Whether a repository error came from a foreign key constraint
pub fn is_foreign_key_violation(err: &anyhow::Error) -> bool {
    sqlstate(err).as_deref() == Some(FOREIGN_KEY_VIOLATION)
}

/// Name of the foreign key a repository error violated, if any
pub fn violated_foreign_key(err: &anyhow::Error) -> Option<String> {
    match err.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db_err))
            if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) =>
        {
            db_err.constraint().map(str::to_string)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool_options() {
        let options = PoolOptions::default();
        assert_eq!(options.min_connections, 1);
        assert_eq!(options.acquire_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_non_database_errors_are_not_violations() {
        let err = anyhow::anyhow!("something else");
        assert!(!is_unique_violation(&err));
        assert!(!is_foreign_key_violation(&err));

        let err: anyhow::Error = sqlx::Error::RowNotFound.into();
        assert!(!is_unique_violation(&err));
    }
}
