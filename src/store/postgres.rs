use super::{GameId, GameStore, StoreError};

use crate::models::{roll_target, Game, GuessOutcome};

use async_trait::async_trait;
use sqlx::PgPool;

/// Game records in the `games` table.
#[derive(Clone, Debug)]
pub struct PgGameStore {
    pub pool: PgPool,
}

impl PgGameStore {
    pub fn new(pool: PgPool) -> Self {
        return Self { pool };
    }
}

#[async_trait]
impl GameStore for PgGameStore {
    async fn create(&self, player_name: &str) -> Result<GameId, StoreError> {
        let game_id = GameId::generate();

        sqlx::query(
            "INSERT INTO games (game_id, player_name, target_number, attempts, guesses) VALUES ($1, $2, $3, 0, '{}')",
        )
        .bind(game_id.as_str())
        .bind(player_name)
        .bind(roll_target())
        .execute(&self.pool)
        .await?;

        return Ok(game_id);
    }

    async fn get(&self, id: &GameId) -> Result<Game, StoreError> {
        let game: Option<Game> = sqlx::query_as(
            "SELECT game_id, player_name, target_number, attempts, guesses FROM games WHERE game_id = $1 LIMIT 1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        return game.ok_or_else(|| StoreError::NotFound(id.clone()));
    }

    async fn apply_guess(&self, id: &GameId, guess: i32) -> Result<GuessOutcome, StoreError> {
        let updated: Option<(i32, i32)> = sqlx::query_as(
            r#"
UPDATE games
SET attempts = attempts + 1, guesses = array_append(guesses, $2)
WHERE game_id = $1
RETURNING target_number, attempts
            "#,
        )
        .bind(id.as_str())
        .bind(guess)
        .fetch_optional(&self.pool)
        .await?;

        let Some((target_number, attempts)) = updated else {
            return Err(StoreError::NotFound(id.clone()));
        };

        return Ok(GuessOutcome::classify(target_number, guess, attempts));
    }

    async fn top_by_fewest_attempts(&self, limit: i64) -> Result<Vec<Game>, StoreError> {
        let games: Vec<Game> = sqlx::query_as(
            "SELECT game_id, player_name, target_number, attempts, guesses FROM games ORDER BY attempts ASC, created_at ASC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        return Ok(games);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    async fn test_store() -> PgGameStore {
        let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
        let pool = PgPool::connect(&url).await.unwrap();

        sqlx::migrate!().run(&pool).await.unwrap();

        return PgGameStore::new(pool);
    }

    #[tokio::test]
    #[ignore = "needs a Postgres database in TEST_DATABASE_URL"]
    async fn game_lifecycle() {
        let store = test_store().await;

        let id = store.create("Ada").await.unwrap();
        let game = store.get(&id).await.unwrap();
        assert_eq!(game.attempts, 0);
        assert!(game.guesses.is_empty());
        assert!((1..=100).contains(&game.target_number));

        store.apply_guess(&id, 1).await.unwrap();
        store.apply_guess(&id, 100).await.unwrap();
        let last = store.apply_guess(&id, 50).await.unwrap();
        assert_eq!(last, GuessOutcome::GameOver);

        let game = store.get(&id).await.unwrap();
        assert_eq!(game.attempts, 3);
        assert_eq!(game.guesses, vec![1, 100, 50]);

        let missing = store.get(&GameId::generate()).await.unwrap_err();
        assert!(matches!(missing, StoreError::NotFound(_)));
    }

    #[tokio::test]
    #[ignore = "needs a Postgres database in TEST_DATABASE_URL"]
    async fn concurrent_guesses_are_not_lost() {
        let store = Arc::new(test_store().await);
        let id = store.create("Ada").await.unwrap();

        let tasks: Vec<_> = (1..=16)
            .map(|guess| {
                let store = store.clone();
                let id = id.clone();
                tokio::spawn(async move { store.apply_guess(&id, guess).await })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let game = store.get(&id).await.unwrap();
        assert_eq!(game.attempts, 16);
        assert_eq!(game.guesses.len(), 16);
    }

    #[tokio::test]
    #[ignore = "needs a Postgres database in TEST_DATABASE_URL"]
    async fn leaderboard_is_ordered() {
        let store = test_store().await;
        store.create("Ada").await.unwrap();

        let top = store.top_by_fewest_attempts(10).await.unwrap();

        assert!(top.len() <= 10);
        assert!(top.windows(2).all(|pair| pair[0].attempts <= pair[1].attempts));
    }
}
