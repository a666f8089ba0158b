use super::MAX_ATTEMPTS;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GuessOutcome {
    Correct,
    Low,
    High,
    GameOver,
}

impl GuessOutcome {
    /// `attempts` counts the guess being classified. Once the budget is spent
    /// the result is `GameOver`, a matching final guess included.
    pub fn classify(target: i32, guess: i32, attempts: i32) -> Self {
        if attempts >= MAX_ATTEMPTS {
            return Self::GameOver;
        }

        return match guess.cmp(&target) {
            Ordering::Equal => Self::Correct,
            Ordering::Less => Self::Low,
            Ordering::Greater => Self::High,
        };
    }
}
