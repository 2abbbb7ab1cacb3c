//! JavaScript bindings. The page owns drawing and pointer translation; it
//! calls `attempt_move` with grid coordinates, repaints from `state()`, and
//! drives the computer's paced reply through `tick()`.

use wasm_bindgen::prelude::*;
use web_time::Instant;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::Game;

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[wasm_bindgen]
pub struct ReversiGame {
    inner: Game,
}

#[wasm_bindgen]
impl ReversiGame {
    /// `config` may be `undefined` or an object such as
    /// `{ opponent_delay_ms: 500, seed: 42 }`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ReversiGame, JsValue> {
        let config = parse_config(config)?;
        Ok(Self {
            inner: Game::from_config(&config),
        })
    }

    /// Returns the `MoveOutcome` as a plain object.
    pub fn attempt_move(&mut self, x: u8, y: u8) -> Result<JsValue, JsValue> {
        let outcome = self.inner.attempt_move(x, y)?;
        Ok(serde_wasm_bindgen::to_value(&outcome)?)
    }

    pub fn tick(&mut self) -> Result<bool, JsValue> {
        Ok(self.inner.tick(Instant::now())?)
    }

    pub fn play_opponent_now(&mut self) -> Result<bool, JsValue> {
        Ok(self.inner.play_opponent_now()?)
    }

    /// Milliseconds until the computer's pending turn is due, if one is.
    pub fn opponent_due_in_ms(&self) -> Option<u32> {
        self.inner.opponent_due_at().map(|due| {
            due.saturating_duration_since(Instant::now())
                .as_millis()
                .min(u128::from(u32::MAX)) as u32
        })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.snapshot())?)
    }

    /// Flip count for the side to move.
    pub fn flip_count(&self, x: u8, y: u8) -> Result<u32, JsValue> {
        Ok(self.inner.flip_count(x, y, self.inner.current_side())?)
    }

    pub fn highlights(&self) -> Vec<u8> {
        self.inner.highlights().into_iter().map(|h| h.code()).collect()
    }

    pub fn special_count(&self) -> u32 {
        self.inner.special_count()
    }

    pub fn is_game_over(&self) -> bool {
        self.inner.is_game_over()
    }

    pub fn result(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.result())?)
    }
}

fn parse_config(value: JsValue) -> Result<GameConfig, GameError> {
    if value.is_undefined() || value.is_null() {
        return Ok(GameConfig::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|err| GameError::InvalidConfig {
        message: err.to_string(),
    })
}
