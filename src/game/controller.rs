//! Player controller trait and game state view
//!
//! This is the presentation boundary: the engine asks the controller for
//! decisions and the controller inspects a read-only view of the game
//! state to make them. Console menus, scripted tests, and baselines all
//! implement the same trait.

use crate::core::{Card, Player, PlayerId};
use crate::game::state::GameState;
use serde::{Deserialize, Serialize};

/// Actions available during a player's turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAction {
    /// Inspect the collection
    ViewCollection,
    /// Open the market and maybe buy a card
    OpenMarket,
    /// Merge two same-archetype, same-level cards
    MergeCards,
    /// End the turn and proceed to the battle phase
    ProceedToBattle,
}

impl TurnAction {
    /// Menu label for front-ends
    pub fn label(&self) -> &'static str {
        match self {
            TurnAction::ViewCollection => "Decks",
            TurnAction::OpenMarket => "Market",
            TurnAction::MergeCards => "Merge",
            TurnAction::ProceedToBattle => "Battle",
        }
    }
}

/// The actions currently available to a player, preconditions applied
///
/// Merging requires at least two cards; everything else is always open.
pub fn available_turn_actions(player: &Player) -> Vec<TurnAction> {
    let mut actions = vec![TurnAction::ViewCollection, TurnAction::OpenMarket];
    if player.cards.len() >= 2 {
        actions.push(TurnAction::MergeCards);
    }
    actions.push(TurnAction::ProceedToBattle);
    actions
}

/// Read-only view of game state for controllers
///
/// Controllers only inspect this view; all mutation goes through the
/// orchestrator.
pub struct GameStateView<'a> {
    game: &'a GameState,
    player_id: PlayerId,
}

impl<'a> GameStateView<'a> {
    /// Create a view from a player's perspective
    pub fn new(game: &'a GameState, player_id: PlayerId) -> Self {
        GameStateView { game, player_id }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn player_name(&self) -> &str {
        self.player().map(|p| p.name.as_str()).unwrap_or("?")
    }

    /// This player's coin balance
    pub fn coins(&self) -> i64 {
        self.player().map(|p| p.coins).unwrap_or(0)
    }

    /// This player's collection
    pub fn cards(&self) -> &[Card] {
        self.player().map(|p| p.cards.as_slice()).unwrap_or(&[])
    }

    /// How many cards the opponent holds
    pub fn opponent_card_count(&self) -> usize {
        self.game
            .players
            .iter()
            .find(|p| p.id != self.player_id)
            .map(|p| p.cards.len())
            .unwrap_or(0)
    }

    /// Rounds completed so far
    pub fn round(&self) -> u32 {
        self.game.round
    }

    fn player(&self) -> Option<&Player> {
        self.game.players.iter().find(|p| p.id == self.player_id)
    }
}

/// Player controller trait
///
/// Implement this to connect a UI or scripted/baseline player. The
/// orchestrator calls these methods when decisions are needed; invalid
/// returns are reported and re-prompted, never fatal.
pub trait PlayerController {
    /// The player this controller is responsible for
    fn player_id(&self) -> PlayerId;

    /// Pick one of the available turn actions
    fn choose_turn_action(&mut self, view: &GameStateView, available: &[TurnAction])
        -> TurnAction;

    /// Pick an offer to buy, or None to cancel the purchase
    fn choose_offer(&mut self, view: &GameStateView, offers: &[Card]) -> Option<usize>;

    /// Pick two collection indices to merge, or None to cancel
    fn choose_merge_pair(&mut self, view: &GameStateView) -> Option<(usize, usize)>;

    /// Pick the collection index of the card to commit to battle
    fn choose_battle_card(&mut self, view: &GameStateView) -> usize;

    /// Called when the match ends (for cleanup/logging)
    fn on_match_end(&mut self, _view: &GameStateView, _won: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Archetype;
    use crate::loader::CardCatalog;

    #[test]
    fn test_merge_requires_two_cards() {
        let mut player = Player::new(PlayerId::new(0), "Alice");
        assert!(!available_turn_actions(&player).contains(&TurnAction::MergeCards));

        player.add_card(Card::new(Archetype::Warrior, "A", 10.0, 0.0, 50.0));
        assert!(!available_turn_actions(&player).contains(&TurnAction::MergeCards));

        player.add_card(Card::new(Archetype::Warrior, "B", 10.0, 0.0, 50.0));
        assert!(available_turn_actions(&player).contains(&TurnAction::MergeCards));
    }

    #[test]
    fn test_battle_is_always_available() {
        let player = Player::new(PlayerId::new(0), "Alice");
        let actions = available_turn_actions(&player);
        assert_eq!(actions.last(), Some(&TurnAction::ProceedToBattle));
    }

    #[test]
    fn test_view_reports_player_state() {
        let mut game = GameState::new_two_player("Alice", "Bob", CardCatalog::new(), 1);
        game.players[1]
            .cards
            .push(Card::new(Archetype::Archer, "X", 10.0, 0.0, 50.0));

        let view = GameStateView::new(&game, game.players[0].id);
        assert_eq!(view.coins(), 10);
        assert_eq!(view.cards().len(), 0);
        assert_eq!(view.opponent_card_count(), 1);
        assert_eq!(view.player_name(), "Alice");
    }
}
