use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod opponent;
pub mod rules;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::GameConfig;
pub use error::GameError;
pub use game::{Game, GameState};
pub use opponent::{FirstLegalOpponent, Opponent, RandomOpponent};
pub use types::{Cell, MoveOutcome, Phase, Position, Side};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
