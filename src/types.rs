use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Width and height of the board.
pub const BOARD_SIZE: u8 = 8;
pub const NUM_SQUARES: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// One of the two players. Black is the human, White the computer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Side::Black => Cell::Black,
            Side::White => Cell::White,
        }
    }
}

/// Contents of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Side::Black),
            Cell::White => Some(Side::White),
        }
    }

    /// Wire encoding used by `Board::to_array`: 0=empty, 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Black => 1,
            Cell::White => 2,
        }
    }
}

/// A board coordinate. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    /// Validates a coordinate coming from outside the engine.
    pub fn new(x: u8, y: u8) -> Result<Self, GameError> {
        if x >= BOARD_SIZE || y >= BOARD_SIZE {
            return Err(GameError::CoordinateOutOfRange { x, y });
        }
        Ok(Self { x, y })
    }

    /// Square index in row-major order (`y * 8 + x`).
    pub fn index(self) -> usize {
        (self.y as usize) * (BOARD_SIZE as usize) + self.x as usize
    }

    /// Caller contract: `index < 64`.
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < NUM_SQUARES, "square index out of range: {index}");
        Self {
            x: (index % BOARD_SIZE as usize) as u8,
            y: (index / BOARD_SIZE as usize) as u8,
        }
    }
}

/// Turn-controller phase.
///
/// `AwaitingSpecialFlip` carries the side that just moved and earned the
/// bonus flip; the turn has not advanced yet while it is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "side", rename_all = "snake_case")]
pub enum Phase {
    Normal,
    AwaitingSpecialFlip(Side),
    GameOver,
}

/// Move-affordance tier derived from a flip count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    None,
    Faint,
    Medium,
    Strong,
}

impl Highlight {
    pub fn code(self) -> u8 {
        match self {
            Highlight::None => 0,
            Highlight::Faint => 1,
            Highlight::Medium => 2,
            Highlight::Strong => 3,
        }
    }
}

/// Disc totals per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CellCounts {
    pub black: u8,
    pub white: u8,
}

impl CellCounts {
    pub fn total(self) -> u8 {
        self.black + self.white
    }
}

/// What a command did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// Wrong phase, wrong owner, or a zero-flip cell. Nothing changed.
    Ignored,
    Placed {
        position: Position,
        flips: u32,
        /// `true` when the capture earned a bonus flip.
        special: bool,
    },
    SpecialFlipped { position: Position },
}

impl MoveOutcome {
    pub fn board_changed(&self) -> bool {
        !matches!(self, MoveOutcome::Ignored)
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Row-major cells, 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub current_side: Side,
    pub phase: Phase,
    pub special_count: u32,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    pub opponent_pending: bool,
    /// Highlight tier per square for the side to move (see `Highlight::code`).
    pub highlights: Vec<u8>,
    /// Squares changed by the most recent command, row-major indices.
    pub flipped: Vec<u8>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// `None` on a draw.
    pub winner: Option<Side>,
    pub black_count: u8,
    pub white_count: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        assert_eq!(Side::Black.opposite(), Side::White);
        assert_eq!(Side::White.opposite().opposite(), Side::White);
    }

    #[test]
    fn position_rejects_out_of_range_coordinates() {
        assert_eq!(
            Position::new(8, 0),
            Err(GameError::CoordinateOutOfRange { x: 8, y: 0 })
        );
        assert!(Position::new(0, 8).is_err());
        assert_eq!(Position::new(7, 7).map(Position::index), Ok(63));
    }

    #[test]
    fn index_round_trips_through_from_index() {
        let pos = Position::new(2, 5).unwrap();
        assert_eq!(pos.index(), 42);
        assert_eq!(Position::from_index(42), pos);
    }

    #[test]
    fn phase_serializes_with_pending_side() {
        let json = serde_json::to_string(&Phase::AwaitingSpecialFlip(Side::Black)).unwrap();
        assert_eq!(json, r#"{"kind":"awaiting_special_flip","side":"black"}"#);

        let json = serde_json::to_string(&Phase::GameOver).unwrap();
        assert_eq!(json, r#"{"kind":"game_over"}"#);
    }
}
