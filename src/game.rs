use tracing::{debug, info, instrument, warn};
use web_time::{Duration, Instant};

use crate::board::{Board, mask_to_positions};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::opponent::Opponent;
use crate::rules;
use crate::types::{
    Cell, CellCounts, GameResult, GameSnapshot, Highlight, MoveOutcome, NUM_SQUARES, Phase,
    Position, Side,
};

/// Side driven by `attempt_move`.
pub const HUMAN: Side = Side::Black;
/// Side driven by the injected `Opponent`.
pub const COMPUTER: Side = Side::White;

/// Everything that defines a position in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub side_to_move: Side,
    pub phase: Phase,
    /// Number of captures that earned a bonus flip, both sides combined.
    pub special_count: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            side_to_move: HUMAN,
            phase: Phase::Normal,
            special_count: 0,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn controller. All mutation of the game goes through its commands.
pub struct Game {
    state: GameState,
    opponent: Box<dyn Opponent>,
    opponent_delay: Duration,
    opponent_due: Option<Instant>,
    /// Squares whose contents differ from before the last board-changing command.
    changed: u64,
}

impl Game {
    pub fn new(config: &GameConfig, opponent: Box<dyn Opponent>) -> Self {
        Self {
            state: GameState::new(),
            opponent,
            opponent_delay: config.opponent_delay(),
            opponent_due: None,
            changed: 0,
        }
    }

    /// Game against the uniformly random computer described by `config`.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config, Box::new(config.build_opponent()))
    }

    /// Human input at `(x, y)`, routed by phase.
    ///
    /// Input the current phase cannot use is ignored. When the command hands
    /// the turn to the computer it either plays right away (zero delay) or is
    /// scheduled for `tick`.
    ///
    /// An accepted move is always reported as accepted. If the computer's
    /// reply fails, its turn stays pending and the error surfaces from the
    /// next `tick` or `play_opponent_now`.
    #[instrument(skip(self))]
    pub fn attempt_move(&mut self, x: u8, y: u8) -> Result<MoveOutcome, GameError> {
        let pos = Position::new(x, y)?;
        let before = self.state.board;

        let outcome = match self.state.phase {
            Phase::GameOver => MoveOutcome::Ignored,
            Phase::AwaitingSpecialFlip(side) => self.human_special_flip(pos, side),
            Phase::Normal if self.state.side_to_move == HUMAN => self.human_move(pos),
            Phase::Normal => {
                debug!("input ignored while the computer is to move");
                MoveOutcome::Ignored
            }
        };

        if !outcome.board_changed() {
            return Ok(outcome);
        }

        let now = Instant::now();
        if let Err(err) = self.hand_over(now) {
            warn!(error = %err, "computer reply failed, left pending");
            self.opponent_due = Some(now);
        }
        self.changed = self.state.board.changed_since(&before);
        Ok(outcome)
    }

    /// Plays the computer's pending turn once its due time has passed.
    /// Returns whether a turn was played.
    #[instrument(skip(self))]
    pub fn tick(&mut self, now: Instant) -> Result<bool, GameError> {
        match self.opponent_due {
            Some(due) if now >= due => self.play_pending(now),
            _ => Ok(false),
        }
    }

    /// Plays the computer's turn immediately, ignoring the pacing delay.
    #[instrument(skip(self))]
    pub fn play_opponent_now(&mut self) -> Result<bool, GameError> {
        if !self.opponent_to_move() {
            return Ok(false);
        }
        self.play_pending(Instant::now())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn cell_at(&self, x: u8, y: u8) -> Result<Cell, GameError> {
        Ok(self.state.board.get(Position::new(x, y)?))
    }

    pub fn count_cells(&self) -> CellCounts {
        self.state.board.count_cells()
    }

    pub fn current_side(&self) -> Side {
        self.state.side_to_move
    }

    pub fn current_phase(&self) -> Phase {
        self.state.phase
    }

    pub fn special_count(&self) -> u32 {
        self.state.special_count
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == Phase::GameOver
    }

    pub fn flip_count(&self, x: u8, y: u8, side: Side) -> Result<u32, GameError> {
        Ok(rules::flip_count(&self.state.board, Position::new(x, y)?, side))
    }

    /// Legal squares for the side to move; empty outside the normal phase.
    pub fn legal_moves(&self) -> Vec<Position> {
        match self.state.phase {
            Phase::Normal => rules::legal_moves(&self.state.board, self.state.side_to_move),
            _ => Vec::new(),
        }
    }

    /// Affordance tier of every square for the side to move, row-major.
    /// All `None` outside the normal phase.
    pub fn highlights(&self) -> Vec<Highlight> {
        if self.state.phase != Phase::Normal {
            return vec![Highlight::None; NUM_SQUARES];
        }
        (0..NUM_SQUARES)
            .map(|index| {
                let flips = rules::flip_count(
                    &self.state.board,
                    Position::from_index(index),
                    self.state.side_to_move,
                );
                rules::highlight(flips)
            })
            .collect()
    }

    pub fn opponent_pending(&self) -> bool {
        self.opponent_due.is_some()
    }

    pub fn opponent_due_at(&self) -> Option<Instant> {
        self.opponent_due
    }

    /// Squares whose contents differ from before the most recent
    /// board-changing command, as row-major indices. Each square appears at
    /// most once; a square turned over and back within the command is left out.
    pub fn last_flipped(&self) -> Vec<u8> {
        mask_to_positions(self.changed)
            .into_iter()
            .map(|pos| pos.index() as u8)
            .collect()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let counts = self.count_cells();
        GameSnapshot {
            board: self.state.board.to_array().to_vec(),
            current_side: self.state.side_to_move,
            phase: self.state.phase,
            special_count: self.state.special_count,
            black_count: counts.black,
            white_count: counts.white,
            is_game_over: self.is_game_over(),
            opponent_pending: self.opponent_pending(),
            highlights: self.highlights().into_iter().map(Highlight::code).collect(),
            flipped: self.last_flipped(),
        }
    }

    pub fn result(&self) -> GameResult {
        let counts = self.count_cells();
        GameResult {
            winner: if counts.black > counts.white {
                Some(Side::Black)
            } else if counts.white > counts.black {
                Some(Side::White)
            } else {
                None
            },
            black_count: counts.black,
            white_count: counts.white,
        }
    }

    fn human_move(&mut self, pos: Position) -> MoveOutcome {
        let flips = rules::flip_count(&self.state.board, pos, HUMAN);
        if flips == 0 {
            return MoveOutcome::Ignored;
        }

        let special = self.place(pos, HUMAN);
        if !special {
            self.advance_turn(HUMAN.opposite());
        }

        MoveOutcome::Placed {
            position: pos,
            flips,
            special,
        }
    }

    fn human_special_flip(&mut self, pos: Position, side: Side) -> MoveOutcome {
        if self.state.board.get(pos) != side.cell() {
            return MoveOutcome::Ignored;
        }

        self.resolve_special_flip(Some(pos), side);
        MoveOutcome::SpecialFlipped { position: pos }
    }

    /// Places a disc and enters the special phase when the capture earns it.
    /// Returns whether the special phase was entered.
    fn place(&mut self, pos: Position, side: Side) -> bool {
        let flips = rules::apply_move(&mut self.state.board, pos, side);
        let count = flips.count_ones();
        debug!(?side, x = pos.x, y = pos.y, flips = count, "move applied");

        if !rules::triggers_special(count) {
            return false;
        }

        self.state.special_count += 1;
        self.state.phase = Phase::AwaitingSpecialFlip(side);
        info!(
            ?side,
            flips = count,
            special_count = self.state.special_count,
            "special rule activated"
        );
        true
    }

    /// Turns `pos` (one of `side`'s discs) over, leaves the special phase and
    /// advances to the other side. `None` skips the flip.
    fn resolve_special_flip(&mut self, pos: Option<Position>, side: Side) {
        debug_assert_eq!(self.state.phase, Phase::AwaitingSpecialFlip(side));

        if let Some(pos) = pos {
            self.state.board.set(pos, side.opposite().cell());
            debug!(?side, x = pos.x, y = pos.y, "special flip applied");
        }

        self.state.phase = Phase::Normal;
        self.advance_turn(side.opposite());
    }

    /// Gives the turn to `next` if it can move, otherwise back to the other
    /// side, otherwise ends the game.
    fn advance_turn(&mut self, next: Side) {
        let board = &self.state.board;

        if rules::has_legal_move(board, next) {
            self.state.side_to_move = next;
            self.state.phase = Phase::Normal;
        } else if rules::has_legal_move(board, next.opposite()) {
            info!(passed = ?next, "no legal move, turn passes back");
            self.state.side_to_move = next.opposite();
            self.state.phase = Phase::Normal;
        } else {
            self.state.side_to_move = next.opposite();
            self.state.phase = Phase::GameOver;
            self.opponent_due = None;
            let counts = board.count_cells();
            info!(black = counts.black, white = counts.white, "game over");
        }
    }

    fn opponent_to_move(&self) -> bool {
        self.state.phase == Phase::Normal && self.state.side_to_move == COMPUTER
    }

    /// Runs or schedules the computer while it holds the turn.
    fn hand_over(&mut self, now: Instant) -> Result<(), GameError> {
        while self.opponent_to_move() {
            if !self.opponent_delay.is_zero() {
                self.opponent_due.get_or_insert(now + self.opponent_delay);
                return Ok(());
            }
            self.opponent_turn()?;
        }
        Ok(())
    }

    fn play_pending(&mut self, now: Instant) -> Result<bool, GameError> {
        self.opponent_due = None;
        let before = self.state.board;

        let played = self.opponent_turn().and_then(|()| self.hand_over(now));
        let changed = self.state.board.changed_since(&before);
        if played.is_ok() || changed != 0 {
            self.changed = changed;
        }
        if let Err(err) = played {
            self.opponent_due = Some(now);
            return Err(err);
        }
        Ok(true)
    }

    fn opponent_turn(&mut self) -> Result<(), GameError> {
        let side = COMPUTER;
        let legal = rules::legal_moves(&self.state.board, side);
        if legal.is_empty() {
            info!(?side, "computer has no legal move, passing");
            self.advance_turn(side.opposite());
            return Ok(());
        }

        let pos = self
            .opponent
            .choose_move(&self.state.board, side, &legal)
            .ok_or(GameError::OpponentDeclined)?;
        if !legal.contains(&pos) {
            warn!(x = pos.x, y = pos.y, "computer chose an illegal square");
            return Err(GameError::IllegalOpponentChoice { x: pos.x, y: pos.y });
        }

        // Pick the bonus flip on a copy so a bad choice leaves the game untouched.
        let mut preview = self.state.board;
        let captured = rules::apply_move(&mut preview, pos, side);
        let bonus = if rules::triggers_special(captured.count_ones()) {
            let own = preview.discs_of(side);
            match self.opponent.choose_special_flip(&preview, side, &own) {
                Some(target) if own.contains(&target) => Some(target),
                Some(target) => {
                    warn!(x = target.x, y = target.y, "computer chose a bonus flip it does not own");
                    return Err(GameError::IllegalOpponentChoice {
                        x: target.x,
                        y: target.y,
                    });
                }
                None if own.is_empty() => None,
                None => return Err(GameError::OpponentDeclined),
            }
        } else {
            None
        };

        if self.place(pos, side) {
            self.resolve_special_flip(bonus, side);
        } else {
            self.advance_turn(side.opposite());
        }
        Ok(())
    }

    #[cfg(test)]
    fn set_position_for_test(&mut self, board: Board, side_to_move: Side) {
        self.state = GameState {
            board,
            side_to_move,
            phase: Phase::Normal,
            special_count: 0,
        };
        self.opponent_due = None;
        self.changed = 0;
    }
}
