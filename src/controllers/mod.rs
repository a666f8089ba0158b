mod game;
mod utils;

use crate::prelude::*;

use anyhow::Context;
use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    let router = game::add_routes(router);

    return router
        .route("/", get(index))
        .route("/health", get(|| async { StatusCode::NO_CONTENT }));
}

struct LeaderboardEntry {
    rank: usize,
    player_name: String,
    attempts: i32,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    leaderboard: Vec<LeaderboardEntry>,
}

async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let games = state
        .games
        .top_by_fewest_attempts(state.cfg.leaderboard_size)
        .await
        .context("retrieving leaderboard")?;

    let leaderboard = games
        .into_iter()
        .enumerate()
        .map(|(i, game)| LeaderboardEntry {
            rank: i + 1,
            player_name: game.player_name,
            attempts: game.attempts,
        })
        .collect();

    return Ok(IndexTemplate { leaderboard });
}
