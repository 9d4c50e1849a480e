//! Round orchestrator
//!
//! Drives the match: each round both players take a menu-driven turn under
//! a wall-clock budget, then commit one card each to a battle. Rewards are
//! paid out, dead cards are pruned, and rounds repeat until a collection
//! is empty.

use crate::core::PlayerId;
use crate::game::battle::{BattleResolver, BattleSide};
use crate::game::controller::{
    available_turn_actions, GameStateView, PlayerController, TurnAction,
};
use crate::game::logger::VerbosityLevel;
use crate::game::state::GameState;
use crate::game::{market, merge};
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Default wall-clock budget for one player's turn
pub const DEFAULT_TURN_BUDGET: Duration = Duration::from_secs(60);

/// Retries granted for an invalid battle-card pick before defaulting
const MAX_PROMPT_RETRIES: u32 = 3;

/// Safety cap on menu actions in a single turn
const MAX_ACTIONS_PER_TURN: u32 = 1000;

/// Result of running a match to completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Winner of the match (None on a tie or round limit)
    pub winner: Option<PlayerId>,
    /// Number of rounds played
    pub rounds: u32,
    /// Reason the match ended
    pub end_reason: MatchEndReason,
}

/// Reason the match ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEndReason {
    /// One player's collection emptied; the other player wins
    CollectionEmpty { winner: PlayerId },
    /// Both collections emptied in the same round
    Tie,
    /// Configured round limit reached
    RoundLimit,
}

/// Match orchestrator
///
/// Borrows the game state for the duration of the match and sequences
/// turns, battles, and rewards. All controller-facing errors are
/// recoverable: they are logged and the sub-action is re-prompted or
/// aborted without corrupting state.
pub struct GameLoop<'a> {
    /// The match state
    pub game: &'a mut GameState,
    turn_budget: Duration,
    max_rounds: Option<u32>,
    resolver: BattleResolver,
}

impl<'a> GameLoop<'a> {
    /// Create a game loop over the given match state
    pub fn new(game: &'a mut GameState) -> Self {
        GameLoop {
            game,
            turn_budget: DEFAULT_TURN_BUDGET,
            max_rounds: None,
            resolver: BattleResolver::new(),
        }
    }

    /// Set the wall-clock budget for each player's turn
    ///
    /// The budget is advisory pacing: it gates how many menu actions a
    /// player may take before forced progression, nothing else.
    pub fn with_turn_budget(mut self, budget: Duration) -> Self {
        self.turn_budget = budget;
        self
    }

    /// Stop the match after this many rounds (default: unlimited)
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    /// Set the battle exchange cap
    pub fn with_max_exchanges(mut self, max_exchanges: u32) -> Self {
        self.resolver = self.resolver.with_max_exchanges(max_exchanges);
        self
    }

    /// Set verbosity on the game's logger
    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.game.logger.set_verbosity(verbosity);
        self
    }

    /// Run the match with the given player controllers
    ///
    /// Returns when one player's collection empties (or the round limit
    /// hits, if configured).
    pub fn run_match(
        &mut self,
        controller1: &mut dyn PlayerController,
        controller2: &mut dyn PlayerController,
    ) -> Result<MatchResult> {
        self.verify_controllers(controller1, controller2)?;
        self.game.logger.minimal("=== Game Start ===");

        loop {
            if let Some(result) = self.run_round_once(controller1, controller2)? {
                self.report_match_end(&result);
                let won1 = result.winner == Some(controller1.player_id());
                let won2 = result.winner == Some(controller2.player_id());
                controller1.on_match_end(
                    &GameStateView::new(self.game, controller1.player_id()),
                    won1,
                );
                controller2.on_match_end(
                    &GameStateView::new(self.game, controller2.player_id()),
                    won2,
                );
                return Ok(result);
            }
        }
    }

    /// Run one round: both turns plus the battle phase
    ///
    /// Returns `Ok(Some(result))` when the match is over, `Ok(None)` when
    /// another round should follow.
    pub fn run_round_once(
        &mut self,
        controller1: &mut dyn PlayerController,
        controller2: &mut dyn PlayerController,
    ) -> Result<Option<MatchResult>> {
        if let Some(result) = self.check_match_end() {
            return Ok(Some(result));
        }
        if let Some(max) = self.max_rounds {
            if self.game.round >= max {
                return Ok(Some(MatchResult {
                    winner: None,
                    rounds: self.game.round,
                    end_reason: MatchEndReason::RoundLimit,
                }));
            }
        }

        self.game.round += 1;
        self.game
            .logger
            .normal(format!("=== Round {} ===", self.game.round));

        self.player_turn(controller1)?;
        self.player_turn(controller2)?;
        self.battle_phase(controller1, controller2)?;
        self.prune_collections();

        Ok(None)
    }

    /// Check whether either collection has emptied
    fn check_match_end(&self) -> Option<MatchResult> {
        let p1 = &self.game.players[0];
        let p2 = &self.game.players[1];

        match (p1.is_defeated(), p2.is_defeated()) {
            (false, false) => None,
            (true, true) => Some(MatchResult {
                winner: None,
                rounds: self.game.round,
                end_reason: MatchEndReason::Tie,
            }),
            (false, true) => Some(MatchResult {
                winner: Some(p1.id),
                rounds: self.game.round,
                end_reason: MatchEndReason::CollectionEmpty { winner: p1.id },
            }),
            (true, false) => Some(MatchResult {
                winner: Some(p2.id),
                rounds: self.game.round,
                end_reason: MatchEndReason::CollectionEmpty { winner: p2.id },
            }),
        }
    }

    /// One player's menu-driven turn under the wall-clock budget
    fn player_turn(&mut self, controller: &mut dyn PlayerController) -> Result<()> {
        let player_id = controller.player_id();
        let started = Instant::now();
        let mut actions_taken: u32 = 0;

        {
            let player = self.game.get_player(player_id)?;
            let header = format!("{}'s turn (Coins: {})", player.name, player.coins);
            self.game.logger.normal(header);
        }

        loop {
            if started.elapsed() >= self.turn_budget {
                self.game
                    .logger
                    .normal("Time's up! Moving to the next phase.");
                return Ok(());
            }

            actions_taken += 1;
            if actions_taken > MAX_ACTIONS_PER_TURN {
                return Err(GameError::InvalidAction(format!(
                    "turn exceeded {MAX_ACTIONS_PER_TURN} actions, possible runaway controller"
                )));
            }

            let available = available_turn_actions(self.game.get_player(player_id)?);
            let action = {
                let view = GameStateView::new(self.game, player_id);
                controller.choose_turn_action(&view, &available)
            };

            if !available.contains(&action) {
                self.game
                    .logger
                    .normal("Invalid choice. Please try again.");
                continue;
            }

            match action {
                TurnAction::ViewCollection => self.view_collection(player_id)?,
                TurnAction::OpenMarket => self.market_phase(controller, player_id)?,
                TurnAction::MergeCards => self.merge_phase(controller, player_id)?,
                TurnAction::ProceedToBattle => {
                    self.game.logger.normal("Proceeding to battle...");
                    return Ok(());
                }
            }
        }
    }

    /// Report the collection, pruning dead cards first so the listing
    /// matches what can actually fight
    fn view_collection(&mut self, player_id: PlayerId) -> Result<()> {
        let removed = self.game.get_player_mut(player_id)?.prune_dead_cards();
        for name in removed {
            self.game
                .logger
                .verbose(format!("{name} was removed (no health left)"));
        }

        let lines = {
            let player = self.game.get_player(player_id)?;
            let mut lines = vec![format!("{}'s Cards:", player.name)];
            if player.cards.is_empty() {
                lines.push("No cards available.".to_string());
            }
            for (i, card) in player.cards.iter().enumerate() {
                lines.push(format!("{}. {} (Level {})", i + 1, card.name, card.level));
                lines.push(format!(
                    "   Attack: {}, Defense: {:.2}, Health: {:.2}",
                    card.attack, card.defense, card.health
                ));
            }
            lines
        };
        for line in lines {
            self.game.logger.normal(line);
        }
        Ok(())
    }

    /// Roll offers and let the controller buy one (or cancel)
    fn market_phase(
        &mut self,
        controller: &mut dyn PlayerController,
        player_id: PlayerId,
    ) -> Result<()> {
        let offers = {
            let game = &mut *self.game;
            market::roll_offers(
                &game.catalog,
                &mut game.rng,
                market::OFFER_COUNT,
                market::MAX_REPEATS,
            )
        };
        if offers.is_empty() {
            self.game.logger.normal("The market has nothing to offer.");
            return Ok(());
        }

        let choice = {
            let view = GameStateView::new(self.game, player_id);
            controller.choose_offer(&view, &offers)
        };
        let Some(index) = choice else {
            return Ok(());
        };

        let outcome = market::purchase(self.game.get_player_mut(player_id)?, &offers, index);
        match outcome {
            Ok(card) => {
                let name = self.game.get_player(player_id)?.name.clone();
                self.game
                    .logger
                    .normal(format!("{name} bought a new card: {}", card.name));
            }
            Err(e) => self.game.logger.normal(e.to_string()),
        }
        Ok(())
    }

    /// Let the controller merge two cards (or cancel)
    fn merge_phase(
        &mut self,
        controller: &mut dyn PlayerController,
        player_id: PlayerId,
    ) -> Result<()> {
        let pair = {
            let view = GameStateView::new(self.game, player_id);
            controller.choose_merge_pair(&view)
        };
        let Some((first, second)) = pair else {
            return Ok(());
        };

        let outcome = merge::merge(self.game.get_player_mut(player_id)?, first, second);
        match outcome {
            Ok(card) => {
                self.game.logger.normal(format!(
                    "{} has been merged and upgraded to level {}!",
                    card.name, card.level
                ));
                self.game.logger.normal(format!(
                    "New stats - Attack: {}, Defense: {:.2}, Health: {:.2}",
                    card.attack, card.defense, card.health
                ));
            }
            Err(e) => self.game.logger.normal(e.to_string()),
        }
        Ok(())
    }

    /// Both players commit a card; the battle runs and rewards are paid
    fn battle_phase(
        &mut self,
        controller1: &mut dyn PlayerController,
        controller2: &mut dyn PlayerController,
    ) -> Result<()> {
        let index1 = self.pick_battle_card(controller1)?;
        let index2 = self.pick_battle_card(controller2)?;

        let resolver = self.resolver;
        let result = {
            let game = &mut *self.game;
            let (left, right) = game.players.split_at_mut(1);
            let card1 = left[0].cards.get_mut(index1).ok_or_else(|| {
                GameError::InvalidSelection("battle card index out of range".to_string())
            })?;
            let card2 = right[0].cards.get_mut(index2).ok_or_else(|| {
                GameError::InvalidSelection("battle card index out of range".to_string())
            })?;
            resolver.resolve(card1, card2, &mut game.rng, &mut game.logger)?
        };

        match result.winner {
            Some(side) => {
                let winner_id = match side {
                    BattleSide::First => self.game.players[0].id,
                    BattleSide::Second => self.game.players[1].id,
                };
                let winner_name = self.game.get_player(winner_id)?.name.clone();
                self.game
                    .logger
                    .normal(format!("{winner_name} wins this round!"));
                self.game.award_battle_rewards(winner_id)?;
            }
            None => {
                self.game
                    .logger
                    .normal("Neither card could finish the other - no rewards this round.");
            }
        }
        Ok(())
    }

    /// Ask for a battle card index, re-prompting on invalid picks
    fn pick_battle_card(&mut self, controller: &mut dyn PlayerController) -> Result<usize> {
        let player_id = controller.player_id();
        let count = self.game.get_player(player_id)?.cards.len();
        if count == 0 {
            return Err(GameError::InvalidAction(format!(
                "{player_id} has no cards to battle with"
            )));
        }

        for _ in 0..MAX_PROMPT_RETRIES {
            let index = {
                let view = GameStateView::new(self.game, player_id);
                controller.choose_battle_card(&view)
            };
            if index < count {
                return Ok(index);
            }
            self.game.logger.normal("Invalid card number.");
        }
        // A misbehaving controller cannot wedge the match
        Ok(0)
    }

    /// Drop dead cards from both collections, reporting removals
    fn prune_collections(&mut self) {
        for seat in 0..self.game.players.len() {
            let (name, removed) = {
                let player = &mut self.game.players[seat];
                (player.name.clone(), player.prune_dead_cards())
            };
            for card_name in removed {
                self.game
                    .logger
                    .normal(format!("{card_name} was removed from {name}'s collection"));
            }
        }
    }

    /// Verify the controllers match the two seated players
    fn verify_controllers(
        &self,
        controller1: &dyn PlayerController,
        controller2: &dyn PlayerController,
    ) -> Result<()> {
        if self.game.players.len() != 2 {
            return Err(GameError::InvalidAction(
                "game loop requires exactly 2 players".to_string(),
            ));
        }
        if controller1.player_id() != self.game.players[0].id
            || controller2.player_id() != self.game.players[1].id
        {
            return Err(GameError::InvalidAction(
                "controller player IDs don't match game players".to_string(),
            ));
        }
        Ok(())
    }

    fn report_match_end(&mut self, result: &MatchResult) {
        self.game.logger.minimal("=== Game Over ===");
        match result.winner {
            Some(winner_id) => {
                let name = self
                    .game
                    .players
                    .iter()
                    .find(|p| p.id == winner_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| winner_id.to_string());
                self.game.logger.minimal(format!("{name} wins the game!"));
            }
            None => match result.end_reason {
                MatchEndReason::Tie => self.game.logger.minimal("The game ends in a tie!"),
                _ => self.game.logger.minimal("The game ends with no winner."),
            },
        }
    }
}
