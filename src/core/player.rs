//! Player state: identity, card collection, coin balance

use crate::core::Card;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coins each player starts the match with
pub const STARTING_COINS: i64 = 10;

/// Identifies one of the two players in a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    pub fn new(id: u32) -> Self {
        PlayerId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// A player in the match
///
/// Each card in `cards` is exclusively owned by this player; purchases and
/// starting deals append value copies of catalog templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Ordered collection of owned cards
    pub cards: Vec<Card>,
    /// Coin balance; the market checks for a positive balance rather than
    /// the full price, so this can go negative
    pub coins: i64,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Player {
            id,
            name: name.into(),
            cards: Vec::new(),
            coins: STARTING_COINS,
        }
    }

    /// Add a card to the player's collection
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Drop cards whose health has reached zero or below
    ///
    /// Returns the names of the removed cards, for status reporting.
    pub fn prune_dead_cards(&mut self) -> Vec<String> {
        let mut removed = Vec::new();
        self.cards.retain(|card| {
            if card.is_alive() {
                true
            } else {
                removed.push(card.name.clone());
                false
            }
        });
        removed
    }

    /// The match is over for a player once their collection is empty
    pub fn is_defeated(&self) -> bool {
        self.cards.is_empty()
    }
}
