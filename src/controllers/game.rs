use super::utils::{self, GuessInput};

use crate::{
    models::{Game, GuessOutcome},
    prelude::*,
    store::GameId,
};

use anyhow::Context;
use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    return router
        .route("/game", post(post_game))
        .route("/game/:game_id", get(game))
        .route("/game/:game_id/guess", post(post_guess));
}

#[derive(Debug, Deserialize)]
struct PostGame {
    #[serde(rename = "playerName", default)]
    player_name: String,
}

async fn post_game(State(state): State<AppState>, Form(body): Form<PostGame>) -> Result<Response> {
    let game_id = state
        .games
        .create(&body.player_name)
        .await
        .context("creating new game")?;

    tracing::info!(%game_id, player_name = %body.player_name, "game created");

    return Ok(utils::redirect_found(&format!("/game/{game_id}")));
}

#[derive(Template)]
#[template(path = "game.html")]
struct GameTemplate {
    player_name: String,
    attempts: i32,
    attempts_left: i32,
    guesses: Vec<i32>,
    is_over: bool,
}

impl GameTemplate {
    fn from_game(game: Game) -> Self {
        return Self {
            attempts_left: game.attempts_left(),
            is_over: game.is_over(),
            player_name: game.player_name,
            attempts: game.attempts,
            guesses: game.guesses,
        };
    }
}

async fn game(Path(game_id): Path<String>, State(state): State<AppState>) -> Result<Response> {
    let game_id = GameId::parse(&game_id)?;

    let game = state
        .games
        .get(&game_id)
        .await
        .context("retrieving game")?;

    return Ok(GameTemplate::from_game(game).into_response());
}

#[derive(Debug, Serialize)]
struct GuessResponse {
    result: GuessOutcome,
}

async fn post_guess(
    Path(game_id): Path<String>,
    State(state): State<AppState>,
    GuessInput(guess): GuessInput,
) -> JsonResult<Json<GuessResponse>> {
    let game_id = GameId::parse(&game_id)?;

    let result = state
        .games
        .apply_guess(&game_id, guess)
        .await
        .context("making guess")?;

    tracing::info!(%game_id, guess, ?result, "guess recorded");

    return Ok(Json(GuessResponse { result }));
}
