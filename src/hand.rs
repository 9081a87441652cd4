use serde::Serialize;

use crate::card::Card;

pub const BLACKJACK: u8 = 21;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HandValue {
    pub total: u8,
    /// An Ace is still counted as 11.
    pub soft: bool,
}

/// Best total for a hand: Aces start at 11 and drop to 1 one at a time
/// while the hand would otherwise bust.
pub fn hand_value(hand: &[Card]) -> HandValue {
    let mut total: u32 = 0;
    let mut aces = 0u32;

    for card in hand {
        total += u32::from(card.value());
        if card.rank.is_ace() {
            aces += 1;
        }
    }

    while total > u32::from(BLACKJACK) && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    HandValue {
        total: u8::try_from(total).unwrap_or(u8::MAX),
        soft: aces > 0 && total <= u32::from(BLACKJACK),
    }
}

pub fn score(hand: &[Card]) -> u8 {
    hand_value(hand).total
}

pub fn is_bust(hand: &[Card]) -> bool {
    score(hand) > BLACKJACK
}

pub fn is_blackjack(hand: &[Card]) -> bool {
    hand.len() == 2 && score(hand) == BLACKJACK
}
