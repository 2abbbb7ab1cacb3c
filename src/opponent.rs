//! Move selection for the computer-controlled side.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use web_time::{SystemTime, UNIX_EPOCH};

use crate::board::Board;
use crate::types::{Position, Side};

/// Policy that picks the computer's move and its bonus flip.
///
/// `legal` and `own` are supplied by the controller in row-major order; an
/// implementation must return one of their elements, or `None` when empty.
pub trait Opponent: Send {
    fn choose_move(&mut self, board: &Board, side: Side, legal: &[Position]) -> Option<Position>;

    fn choose_special_flip(
        &mut self,
        board: &Board,
        side: Side,
        own: &[Position],
    ) -> Option<Position>;
}

/// Uniformly random choice over the candidates.
#[derive(Debug, Clone)]
pub struct RandomOpponent<R = ChaCha8Rng> {
    rng: R,
}

impl RandomOpponent<ChaCha8Rng> {
    /// Deterministic opponent: the same seed replays the same game.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Seeds from the wall clock; works on native and wasm hosts alike.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        Self::seeded(nanos)
    }
}

impl<R: Rng> RandomOpponent<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> Opponent for RandomOpponent<R> {
    fn choose_move(&mut self, _board: &Board, _side: Side, legal: &[Position]) -> Option<Position> {
        legal.choose(&mut self.rng).copied()
    }

    fn choose_special_flip(
        &mut self,
        _board: &Board,
        _side: Side,
        own: &[Position],
    ) -> Option<Position> {
        own.choose(&mut self.rng).copied()
    }
}

/// Always takes the first candidate in row-major order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalOpponent;

impl Opponent for FirstLegalOpponent {
    fn choose_move(&mut self, _board: &Board, _side: Side, legal: &[Position]) -> Option<Position> {
        legal.first().copied()
    }

    fn choose_special_flip(
        &mut self,
        _board: &Board,
        _side: Side,
        own: &[Position],
    ) -> Option<Position> {
        own.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::rules::legal_moves;

    #[test]
    fn random_opponent_returns_none_without_candidates() {
        let mut opponent = RandomOpponent::seeded(7);
        let board = Board::empty();

        assert_eq!(opponent.choose_move(&board, Side::White, &[]), None);
        assert_eq!(opponent.choose_special_flip(&board, Side::White, &[]), None);
    }

    #[test]
    fn single_candidate_is_always_chosen() {
        let mut opponent = RandomOpponent::seeded(3);
        let board = Board::new();
        let only = Position::new(5, 2).unwrap();

        for _ in 0..20 {
            assert_eq!(opponent.choose_move(&board, Side::White, &[only]), Some(only));
        }
    }

    #[test]
    fn same_seed_replays_same_choices() {
        let board = Board::new();
        let legal = legal_moves(&board, Side::White);
        let mut left = RandomOpponent::seeded(42);
        let mut right = RandomOpponent::seeded(42);

        for _ in 0..32 {
            assert_eq!(
                left.choose_move(&board, Side::White, &legal),
                right.choose_move(&board, Side::White, &legal)
            );
        }
    }

    #[test]
    fn choices_cover_every_legal_move_roughly_evenly() {
        let board = Board::new();
        let legal = legal_moves(&board, Side::White);
        let mut opponent = RandomOpponent::seeded(2024);
        let mut hits: HashMap<Position, u32> = HashMap::new();

        for _ in 0..4000 {
            let mv = opponent.choose_move(&board, Side::White, &legal).unwrap();
            assert!(legal.contains(&mv));
            *hits.entry(mv).or_default() += 1;
        }

        assert_eq!(hits.len(), legal.len());
        // Expected 1000 each; the bounds are many standard deviations wide.
        for count in hits.values() {
            assert!((800..1200).contains(count), "skewed count {count}");
        }
    }

    #[test]
    fn special_flip_choices_cover_every_own_disc_roughly_evenly() {
        let board = Board::from_bitboards(0, 0b1111_1000);
        let own = board.discs_of(Side::White);
        let mut opponent = RandomOpponent::seeded(99);
        let mut hits: HashMap<Position, u32> = HashMap::new();

        for _ in 0..5000 {
            let target = opponent.choose_special_flip(&board, Side::White, &own).unwrap();
            assert!(own.contains(&target));
            *hits.entry(target).or_default() += 1;
        }

        assert_eq!(hits.len(), 5);
        for count in hits.values() {
            assert!((800..1200).contains(count), "skewed count {count}");
        }
    }

    #[test]
    fn first_legal_opponent_is_deterministic() {
        let board = Board::new();
        let legal = legal_moves(&board, Side::White);
        let mut opponent = FirstLegalOpponent;

        assert_eq!(opponent.choose_move(&board, Side::White, &legal), legal.first().copied());
        assert_eq!(
            opponent.choose_special_flip(&board, Side::White, &board.discs_of(Side::White)),
            Position::new(3, 3).ok()
        );
    }
}
