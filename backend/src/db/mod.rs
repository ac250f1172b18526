//! PostgreSQL pool for the credential store

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use tracing::{info, warn};

/// Connect a pool sized by `config.max_connections`
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let options = PgConnectOptions::from_str(&config.url)
        .context("Invalid database URL")?
        .application_name("product-catalog");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    info!(max_connections = config.max_connections, "Database pool created");
    Ok(pool)
}

/// Apply the embedded `users`/`products` migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Round-trip a trivial query; backs the repositories' `ping`
pub async fn health_check(pool: &PgPool) -> Result<()> {
    if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
        warn!("Database health check failed: {}", e);
        return Err(e.into());
    }
    Ok(())
}
