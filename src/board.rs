use crate::types::{Cell, CellCounts, NUM_SQUARES, Position, Side};

/// 8x8 board state represented by two bitboards.
///
/// Bit `y * 8 + x` is set in `black` or `white` when that side owns the
/// square; a square is never set in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the opening position:
    /// white at (3,3) and (4,4), black at (3,4) and (4,3).
    pub fn new() -> Self {
        Self {
            black: bit(28) | bit(35),
            white: bit(27) | bit(36),
        }
    }

    pub fn empty() -> Self {
        Self { black: 0, white: 0 }
    }

    pub fn from_bitboards(black: u64, white: u64) -> Self {
        debug_assert_eq!(black & white, 0, "a square cannot hold both colors");
        Self { black, white }
    }

    pub fn get(&self, pos: Position) -> Cell {
        let square = bit(pos.index());
        if (self.black & square) != 0 {
            Cell::Black
        } else if (self.white & square) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    /// Overwrites one square. No legality checks.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        let square = bit(pos.index());
        self.black &= !square;
        self.white &= !square;
        match cell {
            Cell::Black => self.black |= square,
            Cell::White => self.white |= square,
            Cell::Empty => {}
        }
    }

    pub fn count_cells(&self) -> CellCounts {
        CellCounts {
            black: self.black.count_ones() as u8,
            white: self.white.count_ones() as u8,
        }
    }

    pub fn empty_count(&self) -> u8 {
        NUM_SQUARES as u8 - self.count_cells().total()
    }

    /// Squares owned by `side`, row-major.
    pub fn discs_of(&self, side: Side) -> Vec<Position> {
        mask_to_positions(self.mask(side))
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (index, cell) in board.iter_mut().enumerate() {
            *cell = self.get(Position::from_index(index)).code();
        }
        board
    }

    /// Mask of squares whose contents differ from `before`.
    pub fn changed_since(&self, before: &Board) -> u64 {
        (self.black ^ before.black) | (self.white ^ before.white)
    }

    pub(crate) fn mask(&self, side: Side) -> u64 {
        match side {
            Side::Black => self.black,
            Side::White => self.white,
        }
    }

    pub(crate) fn occupied(&self) -> u64 {
        self.black | self.white
    }

    /// Moves every square in `mask` to `side`.
    pub(crate) fn claim(&mut self, mask: u64, side: Side) {
        match side {
            Side::Black => {
                self.black |= mask;
                self.white &= !mask;
            }
            Side::White => {
                self.white |= mask;
                self.black &= !mask;
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn bit(index: usize) -> u64 {
    if index < NUM_SQUARES { 1u64 << index } else { 0 }
}

/// Expands a square mask into positions, lowest index first.
pub(crate) fn mask_to_positions(mut mask: u64) -> Vec<Position> {
    let mut out = Vec::with_capacity(mask.count_ones() as usize);
    while mask != 0 {
        out.push(Position::from_index(mask.trailing_zeros() as usize));
        mask &= mask - 1;
    }
    out
}
