use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::opponent::RandomOpponent;

const DEFAULT_OPPONENT_DELAY_MS: u32 = 500;

/// Host-supplied game settings. Every field is optional on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Pause before the computer plays. Zero plays it inside the command
    /// that handed over the turn.
    pub opponent_delay_ms: u32,
    /// Fixes the computer's random choices; `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// No pacing delay; the computer replies synchronously.
    pub fn immediate() -> Self {
        Self {
            opponent_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.opponent_delay_ms))
    }

    pub fn build_opponent(&self) -> RandomOpponent {
        match self.seed {
            Some(seed) => RandomOpponent::seeded(seed),
            None => RandomOpponent::from_clock(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            opponent_delay_ms: DEFAULT_OPPONENT_DELAY_MS,
            seed: None,
        }
    }
}
