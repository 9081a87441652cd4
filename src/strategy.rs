use serde::Serialize;

use crate::{
    card::{Card, Rank},
    hand::{hand_value, BLACKJACK},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum Action {
    Hit,
    Stand,
}

/// Upcard strength for the tables. The Ace always counts 11 here.
pub fn dealer_upcard_value(rank: Rank) -> u8 {
    rank.value()
}

/// Basic strategy for a hit/stand-only game.
pub fn advise(player_total: u8, dealer_upcard: Rank, soft: bool) -> Action {
    let dealer = dealer_upcard_value(dealer_upcard);

    if soft {
        return match player_total {
            19.. => Action::Stand,
            18 if dealer >= 9 => Action::Hit,
            18 => Action::Stand,
            _ => Action::Hit,
        };
    }

    match player_total {
        17.. => Action::Stand,
        ..=11 => Action::Hit,
        12 if (4..=6).contains(&dealer) => Action::Stand,
        12 => Action::Hit,
        _ if dealer >= 7 => Action::Hit,
        _ => Action::Stand,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Advice {
    /// No round in progress, or the dealer is already playing.
    Paused,
    Bust {
        total: u8,
    },
    Recommend {
        action: Action,
        total: u8,
        soft: bool,
        upcard: Rank,
    },
}

impl Advice {
    /// Advice is only offered while the player acts against a hidden hole card.
    pub fn for_round(player: &[Card], dealer: &[Card], player_turn: bool) -> Advice {
        if !player_turn || player.is_empty() {
            return Advice::Paused;
        }
        let Some(upcard) = dealer.first() else {
            return Advice::Paused;
        };

        let value = hand_value(player);
        if value.total > BLACKJACK {
            return Advice::Bust { total: value.total };
        }

        Advice::Recommend {
            action: advise(value.total, upcard.rank, value.soft),
            total: value.total,
            soft: value.soft,
            upcard: upcard.rank,
        }
    }

    pub fn action(&self) -> Option<Action> {
        match self {
            Advice::Recommend { action, .. } => Some(*action),
            _ => None,
        }
    }
}
