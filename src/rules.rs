//! Move legality and capture rules.
//!
//! Every query and the mutation go through `flip_mask`, so the count used to
//! highlight or validate a move is always the count `apply_move` produces.

use crate::board::{Board, bit, mask_to_positions};
use crate::types::{BOARD_SIZE, Cell, Highlight, NUM_SQUARES, Position, Side};

const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Combined capture size at which the mover earns a bonus flip.
pub const SPECIAL_FLIP_THRESHOLD: u32 = 2;

/// Returns the mask of discs `side` would capture by playing at `pos`.
/// Returns 0 when the square is occupied or no run closes.
pub fn flip_mask(board: &Board, pos: Position, side: Side) -> u64 {
    if (board.occupied() & bit(pos.index())) != 0 {
        return 0;
    }

    let me = board.mask(side);
    let opp = board.mask(side.opposite());
    let mut flips = 0u64;

    for (dx, dy) in DIRECTIONS {
        let mut x = pos.x as i32 + dx;
        let mut y = pos.y as i32 + dy;
        let mut run = 0u64;

        while in_bounds(x, y) {
            let square = bit((y as usize) * BOARD_SIZE as usize + x as usize);
            if (opp & square) != 0 {
                run |= square;
            } else {
                // A run closes only on our own disc; an empty run never does.
                if (me & square) != 0 {
                    flips |= run;
                }
                break;
            }

            x += dx;
            y += dy;
        }
    }

    flips
}

pub fn flip_count(board: &Board, pos: Position, side: Side) -> u32 {
    flip_mask(board, pos, side).count_ones()
}

pub fn has_legal_move(board: &Board, side: Side) -> bool {
    (0..NUM_SQUARES).any(|index| flip_mask(board, Position::from_index(index), side) != 0)
}

/// All legal squares for `side`, row-major (y outer, x inner).
pub fn legal_moves(board: &Board, side: Side) -> Vec<Position> {
    mask_to_positions(legal_mask(board, side))
}

pub fn legal_mask(board: &Board, side: Side) -> u64 {
    let mut legal = 0u64;
    for index in 0..NUM_SQUARES {
        if flip_mask(board, Position::from_index(index), side) != 0 {
            legal |= bit(index);
        }
    }
    legal
}

/// Places a disc for `side` and flips every closing run.
/// Returns the flipped mask; its popcount equals `flip_count` for the same
/// inputs before mutation.
///
/// Caller contract: the square is empty and the move captures at least one
/// disc.
pub fn apply_move(board: &mut Board, pos: Position, side: Side) -> u64 {
    debug_assert_eq!(board.get(pos), Cell::Empty, "apply_move on occupied square");
    let flips = flip_mask(board, pos, side);
    debug_assert_ne!(flips, 0, "apply_move on a square with no captures");

    board.claim(flips | bit(pos.index()), side);
    flips
}

/// Maps a flip count to its affordance tier.
pub fn highlight(flips: u32) -> Highlight {
    match flips {
        0 => Highlight::None,
        1..=2 => Highlight::Faint,
        3..=4 => Highlight::Medium,
        _ => Highlight::Strong,
    }
}

pub fn triggers_special(flips: u32) -> bool {
    flips >= SPECIAL_FLIP_THRESHOLD
}

fn in_bounds(x: i32, y: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&x) && (0..BOARD_SIZE as i32).contains(&y)
}
