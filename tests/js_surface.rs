#![cfg(target_arch = "wasm32")]

use blackjack_table::BlackjackTable;
use js_sys::{Array, Function, Object, Reflect, JSON};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

/// One array of argument lists per page callback.
struct Calls {
    hands: Array,
    scores: Array,
    messages: Array,
    advice: Array,
    controls: Array,
}

fn recorder(calls: &Array) -> Function {
    let make = Function::new_with_args(
        "calls",
        "return function() { calls.push(Array.from(arguments)); };",
    );
    make.call1(&JsValue::NULL, calls)
        .unwrap()
        .dyn_into()
        .unwrap()
}

impl Calls {
    fn new() -> Self {
        Calls {
            hands: Array::new(),
            scores: Array::new(),
            messages: Array::new(),
            advice: Array::new(),
            controls: Array::new(),
        }
    }

    fn callbacks(&self) -> JsValue {
        let callbacks = Object::new();
        for (name, calls) in [
            ("renderHand", &self.hands),
            ("renderScore", &self.scores),
            ("renderMessage", &self.messages),
            ("renderAdvice", &self.advice),
            ("setControls", &self.controls),
        ] {
            Reflect::set(&callbacks, &JsValue::from_str(name), &recorder(calls)).unwrap();
        }
        callbacks.into()
    }
}

fn nth_from_end(calls: &Array, back: u32) -> Array {
    calls.get(calls.length() - 1 - back).dyn_into().unwrap()
}

fn last(calls: &Array) -> Array {
    nth_from_end(calls, 0)
}

fn bools(args: &Array) -> Vec<Option<bool>> {
    args.iter().map(|arg| arg.as_bool()).collect()
}

fn config(json: &str) -> JsValue {
    JSON::parse(json).unwrap()
}

fn snapshot(table: &BlackjackTable) -> serde_json::Value {
    serde_json::from_str(&table.snapshot_json().unwrap()).unwrap()
}

/// Seeded table whose first round waits on the player.
fn table_in_player_turn() -> (BlackjackTable, Calls) {
    for seed in 0..64 {
        let calls = Calls::new();
        let json = format!(r#"{{"seed": {seed}, "paceMs": 10}}"#);
        let mut table = BlackjackTable::new(&config(&json), &calls.callbacks()).unwrap();
        table.new_round().unwrap();
        if snapshot(&table)["phase"] == "playerTurn" {
            return (table, calls);
        }
    }
    panic!("no seed left the opening deal undecided");
}

#[wasm_bindgen_test]
fn out_of_range_dealer_threshold_is_rejected() {
    let calls = Calls::new();
    let err = match BlackjackTable::new(&config(r#"{"dealerStandsOn": 40}"#), &calls.callbacks()) {
        Ok(_) => panic!("threshold 40 accepted"),
        Err(err) => err.as_string().unwrap(),
    };
    assert!(err.starts_with("Invalid config:"), "{err}");
    assert_eq!(calls.controls.length(), 0);
}

#[wasm_bindgen_test]
fn missing_config_and_callbacks_fall_back() {
    let mut table = BlackjackTable::new(&JsValue::UNDEFINED, &Object::new().into()).unwrap();
    assert_eq!(table.pace_ms(), 1_000);
    table.hit().unwrap();
    assert_eq!(snapshot(&table)["player"].as_array().map(Vec::len), Some(0));

    table.new_round().unwrap();
    assert_eq!(snapshot(&table)["player"].as_array().map(Vec::len), Some(2));
}

#[wasm_bindgen_test]
fn constructor_publishes_the_idle_table() {
    let calls = Calls::new();
    let _table = BlackjackTable::new(&JsValue::NULL, &calls.callbacks()).unwrap();

    assert_eq!(bools(&last(&calls.controls)), vec![Some(false), Some(false), Some(true)]);
    assert_eq!(
        last(&calls.messages).get(0).as_string().as_deref(),
        Some("Click 'New Game' to begin.")
    );
    let advice = last(&calls.advice).get(0);
    assert_eq!(
        Reflect::get(&advice, &JsValue::from_str("kind")).unwrap().as_string().as_deref(),
        Some("paused")
    );
    assert_eq!(last(&calls.scores).get(1), JsValue::NULL);
}

#[wasm_bindgen_test]
fn render_callbacks_receive_seat_cards_and_hide_count() {
    let (table, calls) = table_in_player_turn();
    let state = snapshot(&table);

    let player = nth_from_end(&calls.hands, 1);
    assert_eq!(player.get(0).as_string().as_deref(), Some("player"));
    let cards: Array = player.get(1).dyn_into().unwrap();
    assert_eq!(cards.length(), 2);
    let rank = Reflect::get(&cards.get(0), &JsValue::from_str("rank")).unwrap();
    assert!(rank.as_string().is_some());
    assert_eq!(player.get(2).as_f64(), Some(0.0));

    let dealer = last(&calls.hands);
    assert_eq!(dealer.get(0).as_string().as_deref(), Some("dealer"));
    assert_eq!(dealer.get(1).dyn_into::<Array>().unwrap().length(), 2);
    assert_eq!(dealer.get(2).as_f64(), Some(1.0));

    let dealer_score = last(&calls.scores);
    assert_eq!(dealer_score.get(0).as_string().as_deref(), Some("dealer"));
    assert_eq!(dealer_score.get(1).as_f64(), state["dealerScore"].as_f64());

    assert_eq!(bools(&last(&calls.controls)), vec![Some(true), Some(true), Some(false)]);
}

#[wasm_bindgen_test]
fn step_dealer_reports_true_until_the_round_resolves() {
    let (mut table, calls) = table_in_player_turn();
    assert_eq!(table.pace_ms(), 10);

    table.stand().unwrap();
    assert!(table.is_dealer_turn());
    assert_eq!(bools(&last(&calls.controls)), vec![Some(false), Some(false), Some(false)]);
    assert_eq!(last(&calls.hands).get(2).as_f64(), Some(0.0));

    let mut steps = Vec::new();
    loop {
        let more = table.step_dealer().unwrap();
        steps.push(more);
        if !more || steps.len() > 20 {
            break;
        }
    }

    assert_eq!(steps.last(), Some(&false));
    assert!(steps[..steps.len() - 1].iter().all(|&more| more));
    let state = snapshot(&table);
    let dealer_cards = state["dealer"].as_array().map(Vec::len).unwrap();
    assert_eq!(dealer_cards - 2, steps.len() - 1);

    assert!(!table.is_dealer_turn());
    assert_eq!(state["phase"], "resolved");
    assert_eq!(bools(&last(&calls.controls)), vec![Some(false), Some(false), Some(true)]);
    assert!(!table.step_dealer().unwrap());
}
