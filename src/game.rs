use std::fmt;

use rand::{rngs::SmallRng, SeedableRng};
use serde::Serialize;

use crate::{
    card::Card,
    config::TableConfig,
    deck::Deck,
    hand::{is_blackjack, is_bust, score, BLACKJACK},
    render::{Controls, Renderer, Seat},
    strategy::Advice,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    NotStarted,
    PlayerTurn,
    DealerTurn,
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    Win,
    Loss,
    Push,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    BothBlackjack,
    PlayerBlackjack,
    DealerBlackjack,
    PlayerBust,
    DealerBust,
    PlayerHigher,
    DealerHigher,
    Push,
    /// The deck ran dry mid-round.
    Abandoned,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::BothBlackjack => "It's a tie! Both have Blackjack.",
            Outcome::PlayerBlackjack => "Blackjack! You win!",
            Outcome::DealerBlackjack => "Dealer has Blackjack. You lose.",
            Outcome::PlayerBust => "Bust! Your score is over 21. You lose.",
            Outcome::DealerBust => "Dealer busts! You win!",
            Outcome::PlayerHigher => "You beat the Dealer! You win!",
            Outcome::DealerHigher => "Dealer's hand is higher. You lose.",
            Outcome::Push => "It's a Push (Tie)! You keep your money.",
            Outcome::Abandoned => "The deck ran out. Start a new round.",
        }
    }

    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            Outcome::PlayerBlackjack | Outcome::DealerBust | Outcome::PlayerHigher => {
                Some(Verdict::Win)
            }
            Outcome::DealerBlackjack | Outcome::PlayerBust | Outcome::DealerHigher => {
                Some(Verdict::Loss)
            }
            Outcome::BothBlackjack | Outcome::Push => Some(Verdict::Push),
            Outcome::Abandoned => None,
        }
    }
}

/// Natural check on the opening deal.
pub fn check_naturals(player: &[Card], dealer: &[Card]) -> Option<Outcome> {
    match (is_blackjack(player), is_blackjack(dealer)) {
        (true, true) => Some(Outcome::BothBlackjack),
        (true, false) => Some(Outcome::PlayerBlackjack),
        (false, true) => Some(Outcome::DealerBlackjack),
        (false, false) => None,
    }
}

/// Final comparison once both hands are complete. Equal totals push.
pub fn settle(player: u8, dealer: u8) -> Outcome {
    if player > BLACKJACK {
        Outcome::PlayerBust
    } else if dealer > BLACKJACK {
        Outcome::DealerBust
    } else if player > dealer {
        Outcome::PlayerHigher
    } else if player < dealer {
        Outcome::DealerHigher
    } else {
        Outcome::Push
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    DeckExhausted,
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::DeckExhausted => f.write_str("deck exhausted mid-round"),
        }
    }
}

impl std::error::Error for TableError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealerStep {
    /// Not the dealer's turn.
    Idle,
    Drew(Card),
    Finished(Outcome),
}

#[derive(Debug, Clone)]
pub struct RoundState {
    pub deck: Deck,
    pub player: Vec<Card>,
    pub dealer: Vec<Card>,
    pub hole_hidden: bool,
}

impl RoundState {
    fn new(deck: Deck) -> Self {
        RoundState {
            deck,
            player: Vec::new(),
            dealer: Vec::new(),
            hole_hidden: true,
        }
    }

    fn visible_dealer(&self) -> &[Card] {
        if self.hole_hidden && !self.dealer.is_empty() {
            &self.dealer[..1]
        } else {
            &self.dealer
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub phase: Phase,
    pub player: Vec<Card>,
    /// Hidden hole card serializes as `null`.
    pub dealer: Vec<Option<Card>>,
    pub player_score: Option<u8>,
    pub dealer_score: Option<u8>,
    pub message: String,
    pub advice: Advice,
    pub controls: Controls,
    pub outcome: Option<Outcome>,
    pub verdict: Option<Verdict>,
    pub remaining: usize,
}

const WELCOME: &str = "Click 'New Game' to begin.";
const FIRST_DECISION: &str = "Time to play! Do you Hit or Stand?";
const NEXT_DECISION: &str = "Hit or Stand?";
const DEALER_HITS: &str = "Dealer is hitting...";

pub struct BlackjackGame<R: Renderer> {
    config: TableConfig,
    rng: SmallRng,
    renderer: R,
    phase: Phase,
    round: RoundState,
    message: &'static str,
    outcome: Option<Outcome>,
}

impl<R: Renderer> BlackjackGame<R> {
    pub fn new(config: TableConfig, renderer: R) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut game = BlackjackGame {
            config,
            rng,
            renderer,
            phase: Phase::NotStarted,
            round: RoundState::new(Deck::from_cards(Vec::new())),
            message: WELCOME,
            outcome: None,
        };
        game.publish();
        game
    }

    pub fn start_round(&mut self) -> Result<(), TableError> {
        if !self.accepts_new_round() {
            return Ok(());
        }
        let deck = Deck::shuffled(&mut self.rng);
        self.deal_round(deck)
    }

    /// Starts a round from a prepared deck instead of a fresh shuffle.
    pub fn start_round_with(&mut self, deck: Deck) -> Result<(), TableError> {
        if !self.accepts_new_round() {
            return Ok(());
        }
        self.deal_round(deck)
    }

    pub fn hit(&mut self) -> Result<(), TableError> {
        if self.phase != Phase::PlayerTurn {
            log::debug!("hit ignored during {:?}", self.phase);
            return Ok(());
        }

        let card = self.draw()?;
        self.round.player.push(card);
        let total = score(&self.round.player);
        log::debug!("player draws {card}, total {total}");

        if is_bust(&self.round.player) {
            self.resolve(Outcome::PlayerBust);
        } else if total == BLACKJACK {
            return self.stand();
        } else {
            self.message = NEXT_DECISION;
        }
        self.publish();
        Ok(())
    }

    pub fn stand(&mut self) -> Result<(), TableError> {
        if self.phase != Phase::PlayerTurn {
            log::debug!("stand ignored during {:?}", self.phase);
            return Ok(());
        }

        self.phase = Phase::DealerTurn;
        self.round.hole_hidden = false;
        log::debug!(
            "player stands on {}, dealer shows {}",
            score(&self.round.player),
            score(&self.round.dealer)
        );
        self.publish();
        Ok(())
    }

    /// One dealer decision. The caller paces successive calls.
    pub fn dealer_step(&mut self) -> Result<DealerStep, TableError> {
        if self.phase != Phase::DealerTurn {
            return Ok(DealerStep::Idle);
        }

        if score(&self.round.dealer) < self.config.dealer_stands_on {
            let card = self.draw()?;
            self.round.dealer.push(card);
            self.message = DEALER_HITS;
            log::debug!("dealer draws {card}, total {}", score(&self.round.dealer));
            self.publish();
            return Ok(DealerStep::Drew(card));
        }

        let outcome = settle(score(&self.round.player), score(&self.round.dealer));
        self.resolve(outcome);
        self.publish();
        Ok(DealerStep::Finished(outcome))
    }

    /// Plays the dealer's turn out without pauses.
    pub fn run_dealer(&mut self) -> Result<Option<Outcome>, TableError> {
        loop {
            match self.dealer_step()? {
                DealerStep::Drew(_) => continue,
                DealerStep::Finished(outcome) => return Ok(Some(outcome)),
                DealerStep::Idle => return Ok(None),
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn player_hand(&self) -> &[Card] {
        &self.round.player
    }

    pub fn dealer_hand(&self) -> &[Card] {
        &self.round.dealer
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn message(&self) -> &str {
        self.message
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn advice(&self) -> Advice {
        Advice::for_round(
            &self.round.player,
            &self.round.dealer,
            self.phase == Phase::PlayerTurn && self.round.hole_hidden,
        )
    }

    pub fn controls(&self) -> Controls {
        match self.phase {
            Phase::NotStarted | Phase::Resolved => Controls::IDLE,
            Phase::PlayerTurn => Controls::PLAYER_TURN,
            Phase::DealerTurn => Controls::LOCKED,
        }
    }

    pub fn player_score(&self) -> Option<u8> {
        (!self.round.player.is_empty()).then(|| score(&self.round.player))
    }

    /// Only the upcard counts while the hole card is down.
    pub fn visible_dealer_score(&self) -> Option<u8> {
        let visible = self.round.visible_dealer();
        (!visible.is_empty()).then(|| score(visible))
    }

    pub fn snapshot(&self) -> Snapshot {
        let hidden = self.hidden_dealer_cards();
        let shown = self.round.dealer.len() - hidden;
        let dealer = self
            .round
            .dealer
            .iter()
            .enumerate()
            .map(|(i, card)| (i < shown).then_some(*card))
            .collect();

        Snapshot {
            phase: self.phase,
            player: self.round.player.clone(),
            dealer,
            player_score: self.player_score(),
            dealer_score: self.visible_dealer_score(),
            message: self.message.to_string(),
            advice: self.advice(),
            controls: self.controls(),
            outcome: self.outcome,
            verdict: self.outcome.and_then(|outcome| outcome.verdict()),
            remaining: self.round.deck.remaining(),
        }
    }

    /// Pushes the whole visible state to the renderer.
    pub fn publish(&mut self) {
        let hidden = self.hidden_dealer_cards();
        let player_score = self.player_score();
        let dealer_score = self.visible_dealer_score();
        let advice = self.advice();
        let controls = self.controls();

        let renderer = &mut self.renderer;
        renderer.render_hand(Seat::Player, &self.round.player, 0);
        renderer.render_hand(Seat::Dealer, &self.round.dealer, hidden);
        renderer.render_score(Seat::Player, player_score);
        renderer.render_score(Seat::Dealer, dealer_score);
        renderer.render_message(self.message);
        renderer.render_advice(&advice);
        renderer.set_controls_enabled(controls);
    }

    fn accepts_new_round(&self) -> bool {
        match self.phase {
            Phase::NotStarted | Phase::Resolved => true,
            Phase::PlayerTurn | Phase::DealerTurn => {
                log::debug!("new round ignored during {:?}", self.phase);
                false
            }
        }
    }

    fn hidden_dealer_cards(&self) -> usize {
        if self.round.hole_hidden && self.round.dealer.len() > 1 {
            1
        } else {
            0
        }
    }

    fn deal_round(&mut self, deck: Deck) -> Result<(), TableError> {
        self.round = RoundState::new(deck);
        self.outcome = None;
        self.phase = Phase::PlayerTurn;

        for _ in 0..2 {
            let card = self.draw()?;
            self.round.player.push(card);
        }
        for _ in 0..2 {
            let card = self.draw()?;
            self.round.dealer.push(card);
        }
        log::debug!(
            "new round dealt, {} cards left in the deck",
            self.round.deck.remaining()
        );

        match check_naturals(&self.round.player, &self.round.dealer) {
            Some(outcome) => self.resolve(outcome),
            None => self.message = FIRST_DECISION,
        }
        self.publish();
        Ok(())
    }

    fn draw(&mut self) -> Result<Card, TableError> {
        match self.round.deck.deal() {
            Some(card) => Ok(card),
            None => {
                let err = TableError::DeckExhausted;
                log::error!("{err}, abandoning the round");
                self.resolve(Outcome::Abandoned);
                self.publish();
                Err(err)
            }
        }
    }

    fn resolve(&mut self, outcome: Outcome) {
        self.phase = Phase::Resolved;
        self.round.hole_hidden = false;
        self.outcome = Some(outcome);
        self.message = outcome.message();
        log::info!(
            "round over: {:?} (player {}, dealer {})",
            outcome,
            score(&self.round.player),
            score(&self.round.dealer)
        );
    }
}
