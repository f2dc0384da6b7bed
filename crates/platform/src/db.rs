//! Database connection pool management.

use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::Config;

/// Create a SQLite connection pool.
///
/// Connections are never recycled so an in-memory database survives for the
/// lifetime of the pool.
pub async fn create_pool(config: &Config) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(&config.database_url)
        .await
        .context("failed to connect to SQLite")?;

    Ok(pool)
}

/// Check if the database connection is healthy.
pub async fn check_health(pool: &SqlitePool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}
