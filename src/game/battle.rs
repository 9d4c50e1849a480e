//! Battle resolver
//!
//! Alternates special-ability attacks between two cards until one dies.
//! Turn order is strict alternation, never simultaneous: the first card
//! strikes first each exchange, and a kill ends the battle immediately,
//! skipping the victim's pending attack.

use crate::core::Card;
use crate::game::logger::GameLogger;
use crate::{GameError, Result};
use rand::Rng;

/// Default cap on exchanges before a battle is called off
///
/// Guards the non-terminating case: once a card's defense reaches 1.0 or
/// above, `1 - defense` makes incoming damage zero or negative and the
/// loop would never end.
pub const MAX_EXCHANGES: u32 = 1000;

/// The two sides of a battle, in attack order
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BattleSide {
    First,
    Second,
}

impl BattleSide {
    pub fn opponent(&self) -> BattleSide {
        match self {
            BattleSide::First => BattleSide::Second,
            BattleSide::Second => BattleSide::First,
        }
    }
}

/// Battle progress after an exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleStatus {
    /// Both cards still alive
    InProgress,
    /// The first card killed the second
    FirstWon,
    /// The second card killed the first
    SecondWon,
}

/// Why the battle ended
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BattleEndReason {
    /// A card's health reached zero or below
    CardDefeated(BattleSide),
    /// Exchange cap reached without a kill
    ExchangeLimit,
}

/// Result of running a battle to completion
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BattleResult {
    /// Winning side (None only on ExchangeLimit)
    pub winner: Option<BattleSide>,
    /// Number of completed or partial exchanges
    pub exchanges: u32,
    /// Reason the battle ended
    pub end_reason: BattleEndReason,
}

/// Battle resolver with a configurable exchange cap
#[derive(Debug, Clone, Copy)]
pub struct BattleResolver {
    max_exchanges: u32,
}

impl Default for BattleResolver {
    fn default() -> Self {
        BattleResolver {
            max_exchanges: MAX_EXCHANGES,
        }
    }
}

impl BattleResolver {
    pub fn new() -> Self {
        BattleResolver::default()
    }

    /// Set the exchange cap
    pub fn with_max_exchanges(mut self, max_exchanges: u32) -> Self {
        self.max_exchanges = max_exchanges;
        self
    }

    /// Run one exchange: the first card attacks, then (if still alive)
    /// the second card answers
    ///
    /// Self-damage is never applied; each attack can kill at most the
    /// opponent.
    pub fn run_exchange<R: Rng + ?Sized>(
        card1: &mut Card,
        card2: &mut Card,
        rng: &mut R,
        logger: &mut GameLogger,
    ) -> BattleStatus {
        let damage = card1.special_ability(rng);
        let actual = card2.take_damage(damage);
        logger.verbose(format!(
            "{} received {:.2} damage, remaining health: {:.2}",
            card2.name, actual, card2.health
        ));
        if !card2.is_alive() {
            logger.normal(format!("{} has been defeated!", card2.name));
            return BattleStatus::FirstWon;
        }

        let damage = card2.special_ability(rng);
        let actual = card1.take_damage(damage);
        logger.verbose(format!(
            "{} received {:.2} damage, remaining health: {:.2}",
            card1.name, actual, card1.health
        ));
        if !card1.is_alive() {
            logger.normal(format!("{} has been defeated!", card1.name));
            return BattleStatus::SecondWon;
        }

        BattleStatus::InProgress
    }

    /// Run the battle until one card dies or the exchange cap is hit
    ///
    /// Both cards must be alive on entry. Cards are mutated in place, so
    /// the damage they took persists into the owners' collections.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        card1: &mut Card,
        card2: &mut Card,
        rng: &mut R,
        logger: &mut GameLogger,
    ) -> Result<BattleResult> {
        if !card1.is_alive() || !card2.is_alive() {
            return Err(GameError::InvalidAction(
                "both cards must be alive to battle".to_string(),
            ));
        }

        logger.normal(format!("Battle: {} vs {}", card1.name, card2.name));

        let mut exchanges = 0;
        while exchanges < self.max_exchanges {
            exchanges += 1;
            match Self::run_exchange(card1, card2, rng, logger) {
                BattleStatus::InProgress => {}
                BattleStatus::FirstWon => {
                    return Ok(BattleResult {
                        winner: Some(BattleSide::First),
                        exchanges,
                        end_reason: BattleEndReason::CardDefeated(BattleSide::Second),
                    });
                }
                BattleStatus::SecondWon => {
                    return Ok(BattleResult {
                        winner: Some(BattleSide::Second),
                        exchanges,
                        end_reason: BattleEndReason::CardDefeated(BattleSide::First),
                    });
                }
            }
        }

        logger.normal(format!(
            "Battle between {} and {} called off after {} exchanges",
            card1.name, card2.name, exchanges
        ));
        Ok(BattleResult {
            winner: None,
            exchanges,
            end_reason: BattleEndReason::ExchangeLimit,
        })
    }
}
