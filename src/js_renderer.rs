use js_sys::{Function, Reflect};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

use crate::{
    card::Card,
    render::{Controls, Renderer, Seat},
    strategy::Advice,
};

/// Forwards render calls to page callbacks. Missing callbacks are skipped.
pub struct JsRenderer {
    render_hand: Option<Function>,
    render_score: Option<Function>,
    render_message: Option<Function>,
    render_advice: Option<Function>,
    set_controls: Option<Function>,
}

impl JsRenderer {
    pub fn from_callbacks(callbacks: &JsValue) -> Self {
        JsRenderer {
            render_hand: callback(callbacks, "renderHand"),
            render_score: callback(callbacks, "renderScore"),
            render_message: callback(callbacks, "renderMessage"),
            render_advice: callback(callbacks, "renderAdvice"),
            set_controls: callback(callbacks, "setControls"),
        }
    }
}

fn callback(callbacks: &JsValue, name: &str) -> Option<Function> {
    if !callbacks.is_object() {
        return None;
    }
    Reflect::get(callbacks, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or_else(|err| {
        log::warn!("could not serialize render payload: {err}");
        JsValue::NULL
    })
}

fn report(name: &str, result: Result<JsValue, JsValue>) {
    if let Err(err) = result {
        log::warn!("{name} callback threw: {err:?}");
    }
}

impl Renderer for JsRenderer {
    fn render_hand(&mut self, seat: Seat, cards: &[Card], hide_count: usize) {
        if let Some(f) = &self.render_hand {
            let hide = JsValue::from(hide_count as u32);
            report("renderHand", f.call3(&JsValue::NULL, &to_js(&seat), &to_js(cards), &hide));
        }
    }

    fn render_score(&mut self, seat: Seat, score: Option<u8>) {
        if let Some(f) = &self.render_score {
            let score = score.map(JsValue::from).unwrap_or(JsValue::NULL);
            report("renderScore", f.call2(&JsValue::NULL, &to_js(&seat), &score));
        }
    }

    fn render_message(&mut self, text: &str) {
        if let Some(f) = &self.render_message {
            report("renderMessage", f.call1(&JsValue::NULL, &JsValue::from_str(text)));
        }
    }

    fn render_advice(&mut self, advice: &Advice) {
        if let Some(f) = &self.render_advice {
            report("renderAdvice", f.call1(&JsValue::NULL, &to_js(advice)));
        }
    }

    fn set_controls_enabled(&mut self, controls: Controls) {
        if let Some(f) = &self.set_controls {
            report(
                "setControls",
                f.call3(
                    &JsValue::NULL,
                    &JsValue::from_bool(controls.hit),
                    &JsValue::from_bool(controls.stand),
                    &JsValue::from_bool(controls.new_round),
                ),
            );
        }
    }
}
