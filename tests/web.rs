#![cfg(target_arch = "wasm32")]

use js_sys::{Object, Reflect};
use special_reversi::wasm::ReversiGame;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn field(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).unwrap()
}

fn paced_config() -> JsValue {
    let config = Object::new();
    Reflect::set(&config, &"opponent_delay_ms".into(), &JsValue::from_f64(500.0)).unwrap();
    Reflect::set(&config, &"seed".into(), &JsValue::from_f64(7.0)).unwrap();
    config.into()
}

#[wasm_bindgen_test]
fn default_config_starts_from_opening_position() {
    let game = ReversiGame::new(JsValue::UNDEFINED).unwrap();
    let state = game.state().unwrap();

    assert_eq!(field(&state, "black_count").as_f64(), Some(2.0));
    assert_eq!(field(&state, "white_count").as_f64(), Some(2.0));
    assert_eq!(field(&state, "current_side").as_string().as_deref(), Some("black"));
    assert_eq!(game.highlights().iter().filter(|&&h| h > 0).count(), 4);
    assert!(!game.is_game_over());
}

#[wasm_bindgen_test]
fn move_outcome_and_pending_reply_are_exposed() {
    let mut game = ReversiGame::new(paced_config()).unwrap();

    let outcome = game.attempt_move(2, 3).unwrap();

    assert_eq!(field(&outcome, "kind").as_string().as_deref(), Some("placed"));
    assert_eq!(field(&outcome, "flips").as_f64(), Some(1.0));
    assert!(game.opponent_due_in_ms().is_some());

    assert!(game.play_opponent_now().unwrap());
    let state = game.state().unwrap();
    assert_eq!(field(&state, "current_side").as_string().as_deref(), Some("black"));
    assert!(game.opponent_due_in_ms().is_none());
}

#[wasm_bindgen_test]
fn ignored_click_reports_ignored() {
    let mut game = ReversiGame::new(paced_config()).unwrap();

    let outcome = game.attempt_move(0, 0).unwrap();

    assert_eq!(field(&outcome, "kind").as_string().as_deref(), Some("ignored"));
    assert_eq!(game.special_count(), 0);
}

#[wasm_bindgen_test]
fn out_of_range_and_bad_config_are_errors() {
    let mut game = ReversiGame::new(JsValue::UNDEFINED).unwrap();
    assert!(game.attempt_move(8, 0).is_err());
    assert!(game.flip_count(0, 8).is_err());

    let bad = Object::new();
    Reflect::set(&bad, &"opponent_delay_ms".into(), &"soon".into()).unwrap();
    assert!(ReversiGame::new(bad.into()).is_err());
}
