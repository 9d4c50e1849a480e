//! Upgrade/merge engine
//!
//! Combines two identical-archetype, identical-level cards into one
//! higher-level card. Merges are all-or-nothing: on any failure both
//! cards are left untouched.

use crate::core::{Card, Player};
use crate::{GameError, Result};

/// Merge the cards at `first` and `second` in the player's collection
///
/// The card at `first` is upgraded in place and the card at `second` is
/// removed from the collection. Fails with `InvalidSelection` for
/// out-of-range or equal indices, and with `TypeMismatch` unless both
/// cards share archetype (variant identity, not name) and level.
///
/// Returns a copy of the upgraded card for status reporting.
pub fn merge(player: &mut Player, first: usize, second: usize) -> Result<Card> {
    let len = player.cards.len();
    if first >= len || second >= len {
        return Err(GameError::InvalidSelection(format!(
            "card index out of range (collection holds {len} cards)"
        )));
    }
    if first == second {
        return Err(GameError::InvalidSelection(
            "cannot merge a card with itself".to_string(),
        ));
    }

    let (a, b) = (&player.cards[first], &player.cards[second]);
    if a.archetype != b.archetype || a.level != b.level {
        return Err(GameError::TypeMismatch(format!(
            "{} (level {} {}) and {} (level {} {}) must share archetype and level",
            a.name, a.level, a.archetype, b.name, b.level, b.archetype
        )));
    }

    player.cards[first].upgrade();
    let merged = player.cards[first].clone();
    player.cards.remove(second);
    Ok(merged)
}
