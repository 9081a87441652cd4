use wasm_bindgen::prelude::*;

pub mod card;
pub mod config;
pub mod deck;
pub mod game;
pub mod hand;
mod js_renderer;
mod logger;
pub mod render;
pub mod strategy;

use config::TableConfig;
use game::{BlackjackGame, DealerStep, Phase};
use js_renderer::JsRenderer;

#[wasm_bindgen]
pub struct BlackjackTable {
    game: BlackjackGame<JsRenderer>,
}

#[wasm_bindgen]
impl BlackjackTable {
    /// `callbacks` may carry `renderHand`, `renderScore`, `renderMessage`,
    /// `renderAdvice` and `setControls`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: &JsValue, callbacks: &JsValue) -> Result<BlackjackTable, JsValue> {
        console_error_panic_hook::set_once();
        let config: TableConfig = if config.is_undefined() || config.is_null() {
            TableConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config.clone())
                .map_err(|err| JsValue::from_str(&format!("Invalid config: {err}")))?
        };
        config
            .validate()
            .map_err(|err| JsValue::from_str(&format!("Invalid config: {err}")))?;
        logger::init(config.level_filter());

        let renderer = JsRenderer::from_callbacks(callbacks);
        Ok(BlackjackTable {
            game: BlackjackGame::new(config, renderer),
        })
    }

    #[wasm_bindgen(js_name = newRound)]
    pub fn new_round(&mut self) -> Result<(), JsValue> {
        self.game
            .start_round()
            .map_err(|err| JsValue::from_str(&format!("Deal failed: {err}")))
    }

    pub fn hit(&mut self) -> Result<(), JsValue> {
        self.game
            .hit()
            .map_err(|err| JsValue::from_str(&format!("Hit failed: {err}")))
    }

    pub fn stand(&mut self) -> Result<(), JsValue> {
        self.game
            .stand()
            .map_err(|err| JsValue::from_str(&format!("Stand failed: {err}")))
    }

    /// Returns `true` while the dealer still has a decision to make.
    /// The page waits `paceMs` between calls.
    #[wasm_bindgen(js_name = stepDealer)]
    pub fn step_dealer(&mut self) -> Result<bool, JsValue> {
        let step = self
            .game
            .dealer_step()
            .map_err(|err| JsValue::from_str(&format!("Dealer turn failed: {err}")))?;
        Ok(matches!(step, DealerStep::Drew(_)))
    }

    #[wasm_bindgen(getter, js_name = paceMs)]
    pub fn pace_ms(&self) -> u32 {
        self.game.config().pace_ms
    }

    #[wasm_bindgen(getter, js_name = isDealerTurn)]
    pub fn is_dealer_turn(&self) -> bool {
        self.game.phase() == Phase::DealerTurn
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.game.snapshot())
            .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.snapshot())
            .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
    }
}
