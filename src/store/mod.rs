mod memory;
pub use memory::MemoryGameStore;

mod postgres;
pub use postgres::PgGameStore;

use crate::models::{Game, GuessOutcome};

use std::fmt::Display;

use async_trait::async_trait;
use nanoid::nanoid;

pub const GAME_ID_LEN: usize = 24;

const GAME_ID_CHARS: [char; 16] = [
    '1', '2', '3', '4', '5', '6', '7', '8', '9', '0', 'a', 'b', 'c', 'd', 'e', 'f',
];

/// Key of a game record: 24 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameId(String);

impl GameId {
    pub fn generate() -> Self {
        return Self(nanoid!(GAME_ID_LEN, &GAME_ID_CHARS));
    }

    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let id = raw.trim().to_lowercase();

        if id.len() != GAME_ID_LEN || !id.chars().all(|c| GAME_ID_CHARS.contains(&c)) {
            return Err(StoreError::InvalidIdentifier(raw.to_string()));
        }

        return Ok(Self(id));
    }

    pub fn as_str(&self) -> &str {
        return &self.0;
    }
}

impl Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("game {0} not found")]
    NotFound(GameId),

    #[error("invalid game identifier {0:?}")]
    InvalidIdentifier(String),

    #[error("game store unavailable")]
    Unavailable(#[from] sqlx::Error),
}

/// Durable home of game records.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Starts a game with a fresh random target and no guesses.
    async fn create(&self, player_name: &str) -> Result<GameId, StoreError>;

    async fn get(&self, id: &GameId) -> Result<Game, StoreError>;

    /// Records one guess and classifies it. The increment and the append
    /// happen as one update, so concurrent guesses on a game are all kept.
    async fn apply_guess(&self, id: &GameId, guess: i32) -> Result<GuessOutcome, StoreError>;

    /// At most `limit` games, fewest attempts first.
    async fn top_by_fewest_attempts(&self, limit: i64) -> Result<Vec<Game>, StoreError>;
}
