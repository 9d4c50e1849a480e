//! Random baseline controller
//!
//! Makes random choices from whatever is available. Serves as a smoke-test
//! opponent and as the `sim` mode player.

use crate::core::{Card, PlayerId};
use crate::game::controller::{GameStateView, PlayerController, TurnAction};
use rand::Rng;

/// A controller that makes random choices
pub struct RandomController {
    player_id: PlayerId,
    rng: Box<dyn rand::RngCore>,
}

impl RandomController {
    /// Create a new random controller with default RNG
    pub fn new(player_id: PlayerId) -> Self {
        RandomController {
            player_id,
            rng: Box::new(rand::thread_rng()),
        }
    }

    /// Create a random controller with a seeded RNG (for deterministic runs)
    pub fn with_seed(player_id: PlayerId, seed: u64) -> Self {
        use rand::SeedableRng;
        RandomController {
            player_id,
            rng: Box::new(rand::rngs::StdRng::seed_from_u64(seed)),
        }
    }
}

impl PlayerController for RandomController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_turn_action(
        &mut self,
        _view: &GameStateView,
        available: &[TurnAction],
    ) -> TurnAction {
        if available.is_empty() {
            return TurnAction::ProceedToBattle;
        }
        available[self.rng.gen_range(0..available.len())]
    }

    fn choose_offer(&mut self, _view: &GameStateView, offers: &[Card]) -> Option<usize> {
        if offers.is_empty() {
            return None;
        }
        // One extra slot for "cancel"
        let pick = self.rng.gen_range(0..=offers.len());
        if pick == offers.len() {
            None
        } else {
            Some(pick)
        }
    }

    fn choose_merge_pair(&mut self, view: &GameStateView) -> Option<(usize, usize)> {
        let count = view.cards().len();
        if count < 2 {
            return None;
        }
        let first = self.rng.gen_range(0..count);
        let mut second = self.rng.gen_range(0..count - 1);
        if second >= first {
            second += 1;
        }
        // The pair may still mismatch on archetype/level; that failure is
        // recoverable and simply ends the sub-action.
        Some((first, second))
    }

    fn choose_battle_card(&mut self, view: &GameStateView) -> usize {
        let count = view.cards().len();
        if count == 0 {
            0
        } else {
            self.rng.gen_range(0..count)
        }
    }
}
