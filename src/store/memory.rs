use super::{GameId, GameStore, StoreError};

use crate::models::{Game, GuessOutcome};

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Keeps games in process memory. Used when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryGameStore {
    games: RwLock<HashMap<GameId, Game>>,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        return Self::default();
    }

    #[cfg(test)]
    pub async fn insert(&self, game: Game) -> GameId {
        let id = GameId::parse(&game.game_id).expect("test game id must be well formed");

        self.games.write().await.insert(id.clone(), game);

        return id;
    }
}

#[async_trait]
impl GameStore for MemoryGameStore {
    async fn create(&self, player_name: &str) -> Result<GameId, StoreError> {
        let mut games = self.games.write().await;

        let mut id = GameId::generate();
        while games.contains_key(&id) {
            id = GameId::generate();
        }

        games.insert(
            id.clone(),
            Game::new(id.to_string(), player_name.to_string()),
        );

        return Ok(id);
    }

    async fn get(&self, id: &GameId) -> Result<Game, StoreError> {
        let games = self.games.read().await;

        return games
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()));
    }

    async fn apply_guess(&self, id: &GameId, guess: i32) -> Result<GuessOutcome, StoreError> {
        let mut games = self.games.write().await;

        let Some(game) = games.get_mut(id) else {
            return Err(StoreError::NotFound(id.clone()));
        };

        return Ok(game.record_guess(guess));
    }

    async fn top_by_fewest_attempts(&self, limit: i64) -> Result<Vec<Game>, StoreError> {
        let games = self.games.read().await;

        let mut top: Vec<Game> = games.values().cloned().collect();
        top.sort_by(|a, b| {
            a.attempts
                .cmp(&b.attempts)
                .then_with(|| a.game_id.cmp(&b.game_id))
        });
        top.truncate(usize::try_from(limit).unwrap_or(0));

        return Ok(top);
    }
}
