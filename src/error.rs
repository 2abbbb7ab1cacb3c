//! Engine error types.
//!
//! Expected game flow (illegal clicks, passes, the special rule) never
//! produces an error; these cover only inputs a correct host cannot send.

use derive_more::{Display, Error};

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GameError {
    #[display("coordinate ({x}, {y}) is off the board")]
    CoordinateOutOfRange { x: u8, y: u8 },
    #[display("opponent chose an illegal square ({x}, {y})")]
    IllegalOpponentChoice { x: u8, y: u8 },
    #[display("opponent declined to choose although candidates exist")]
    OpponentDeclined,
    #[display("invalid game config: {message}")]
    InvalidConfig { message: String },
}
