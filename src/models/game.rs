use super::GuessOutcome;

use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx;

pub const MIN_TARGET: i32 = 1;
pub const MAX_TARGET: i32 = 100;

/// Guesses a player gets before the game is over.
pub const MAX_ATTEMPTS: i32 = 3;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Game {
    pub game_id: String,
    pub player_name: String,

    #[serde(skip_serializing)]
    pub target_number: i32,

    pub attempts: i32,
    pub guesses: Vec<i32>,
}

impl Game {
    pub fn new(game_id: String, player_name: String) -> Self {
        return Self::with_target(game_id, player_name, roll_target());
    }

    pub fn with_target(game_id: String, player_name: String, target_number: i32) -> Self {
        return Self {
            game_id,
            player_name,
            target_number,
            attempts: 0,
            guesses: vec![],
        };
    }

    pub fn is_over(&self) -> bool {
        return self.attempts >= MAX_ATTEMPTS;
    }

    pub fn attempts_left(&self) -> i32 {
        return (MAX_ATTEMPTS - self.attempts).max(0);
    }

    /// Records a guess, even once the game is over, and classifies it.
    pub fn record_guess(&mut self, guess: i32) -> GuessOutcome {
        self.attempts += 1;
        self.guesses.push(guess);

        return GuessOutcome::classify(self.target_number, guess, self.attempts);
    }
}

pub fn roll_target() -> i32 {
    return rand::thread_rng().gen_range(MIN_TARGET..=MAX_TARGET);
}
