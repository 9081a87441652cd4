use serde::Serialize;

use crate::{card::Card, strategy::Advice};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Seat {
    Player,
    Dealer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Controls {
    pub hit: bool,
    pub stand: bool,
    pub new_round: bool,
}

impl Controls {
    pub const IDLE: Controls = Controls { hit: false, stand: false, new_round: true };
    pub const PLAYER_TURN: Controls = Controls { hit: true, stand: true, new_round: false };
    pub const LOCKED: Controls = Controls { hit: false, stand: false, new_round: false };
}

/// Presentation side of the table. Called after every state change;
/// nothing flows back into the round.
pub trait Renderer {
    /// `hide_count` trailing cards are shown face down.
    fn render_hand(&mut self, seat: Seat, cards: &[Card], hide_count: usize);
    fn render_score(&mut self, seat: Seat, score: Option<u8>);
    fn render_message(&mut self, text: &str);
    fn render_advice(&mut self, advice: &Advice);
    fn set_controls_enabled(&mut self, controls: Controls);
}

/// Renderer for headless use.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render_hand(&mut self, _seat: Seat, _cards: &[Card], _hide_count: usize) {}
    fn render_score(&mut self, _seat: Seat, _score: Option<u8>) {}
    fn render_message(&mut self, _text: &str) {}
    fn render_advice(&mut self, _advice: &Advice) {}
    fn set_controls_enabled(&mut self, _controls: Controls) {}
}
