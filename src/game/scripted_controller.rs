//! Scripted controller for deterministic testing
//!
//! Follows a predetermined sequence of choice indices. Once the script is
//! exhausted the controller proceeds to battle / cancels / picks card 0,
//! so a short script can never wedge a match.

use crate::core::{Card, PlayerId};
use crate::game::controller::{GameStateView, PlayerController, TurnAction};
use serde::{Deserialize, Serialize};

/// A controller that follows a fixed script of choices
///
/// Script entries are consumed one per decision, in the order decisions
/// are asked for:
/// - turn action: index into the available-actions list
/// - offer: `0` cancels, `n` buys offer `n-1` (the menu numbering)
/// - merge pair: two entries, `0` in either cancels, otherwise 1-based
///   collection indices
/// - battle card: 0-based collection index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedController {
    player_id: PlayerId,
    /// The predetermined sequence of choice indices
    script: Vec<usize>,
    /// Current position in the script
    pub current_index: usize,
}

impl ScriptedController {
    pub fn new(player_id: PlayerId, script: Vec<usize>) -> Self {
        ScriptedController {
            player_id,
            script,
            current_index: 0,
        }
    }

    /// Next script entry, or None when exhausted
    fn next_choice(&mut self) -> Option<usize> {
        let choice = self.script.get(self.current_index).copied();
        if choice.is_some() {
            self.current_index += 1;
        }
        choice
    }
}

impl PlayerController for ScriptedController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_turn_action(
        &mut self,
        _view: &GameStateView,
        available: &[TurnAction],
    ) -> TurnAction {
        match self.next_choice() {
            Some(index) if index < available.len() => available[index],
            // Exhausted or out of bounds: make progress
            _ => TurnAction::ProceedToBattle,
        }
    }

    fn choose_offer(&mut self, _view: &GameStateView, _offers: &[Card]) -> Option<usize> {
        match self.next_choice() {
            Some(0) | None => None,
            Some(n) => Some(n - 1),
        }
    }

    fn choose_merge_pair(&mut self, _view: &GameStateView) -> Option<(usize, usize)> {
        let first = self.next_choice();
        let second = self.next_choice();
        match (first, second) {
            (Some(a), Some(b)) if a > 0 && b > 0 => Some((a - 1, b - 1)),
            _ => None,
        }
    }

    fn choose_battle_card(&mut self, _view: &GameStateView) -> usize {
        self.next_choice().unwrap_or(0)
    }
}
