mod game;
pub use game::*;

mod guess_outcome;
pub use guess_outcome::*;
