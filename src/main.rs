mod config;
mod controllers;
mod init;
mod models;
mod prelude;
mod result;
mod store;

pub use crate::result::Result;

use std::sync::Arc;

use axum::Router;
use store::GameStore;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<config::Config>,
    games: Arc<dyn GameStore>,
}

#[tokio::main]
async fn main() -> Result {
    dotenv::dotenv().ok();
    init::init_logging();

    if let Err(e) = run().await {
        tracing::error!(error = ?e.0, "server stopped with an error");
        return Err(e);
    }

    return Ok(());
}

async fn run() -> Result {
    let cfg = config::build(|key| std::env::var(key).ok())?;
    let addr = cfg.socket_addr()?;

    let (games, pool) = init::init_game_store(&cfg).await?;

    let state = AppState {
        cfg: Arc::new(cfg),
        games,
    };

    let router = build_router(state);

    tracing::info!(%addr, "server running");

    axum::Server::try_bind(&addr)?
        .serve(router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("database connections closed");
    }

    return Ok(());
}

fn build_router(state: AppState) -> Router {
    let router = Router::new();

    // dynamic paths
    let router = controllers::add_routes(router);

    // static assets
    let router = router.nest_service("/assets", ServeDir::new(&state.cfg.assets_dir));

    return router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutting down");
}
