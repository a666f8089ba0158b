use crate::prelude::*;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

pub async fn init_pg_pool(cfg: &Config, db_connection_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(cfg.db_max_connections)
        .connect(db_connection_url)
        .await
        .context("connecting to database")?;

    sqlx::migrate!().run(&pool).await?;
    tracing::info!("database migrations applied");

    return Ok(pool);
}
