mod db;
pub use db::init_pg_pool;

mod logging;
pub use logging::init_logging;

use crate::{
    prelude::*,
    store::{GameStore, MemoryGameStore, PgGameStore},
};

use std::sync::Arc;

use sqlx::PgPool;

/// Picks the game store for the configured backend. The pool, if any, is
/// returned too so it can be closed on shutdown.
pub async fn init_game_store(cfg: &Config) -> Result<(Arc<dyn GameStore>, Option<PgPool>)> {
    let Some(db_connection_url) = &cfg.db_connection_url else {
        tracing::warn!("DATABASE_URL is not set, games will only live in memory");

        let games: Arc<dyn GameStore> = Arc::new(MemoryGameStore::new());
        return Ok((games, None));
    };

    let pool = init_pg_pool(cfg, db_connection_url).await?;
    tracing::info!("connected to database");

    let games: Arc<dyn GameStore> = Arc::new(PgGameStore::new(pool.clone()));
    return Ok((games, Some(pool)));
}
