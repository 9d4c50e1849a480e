//! Match state: players, shared catalog, RNG, rewards
//!
//! All mutable match state lives here and is mutated synchronously by the
//! action that triggers it; there is no concurrent access.

use crate::core::{Player, PlayerId};
use crate::game::logger::GameLogger;
use crate::loader::CardCatalog;
use crate::{GameError, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Coin rewards paid out after each battle
///
/// Configurable because front-ends disagree on the right economy: the
/// console default is a 10/3 split, GUI-style play uses a flat 3 to the
/// winner only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSchedule {
    /// Coins for the player whose card won the battle
    pub winner: i64,
    /// Consolation coins for the other player
    pub loser: i64,
}

impl RewardSchedule {
    pub fn new(winner: i64, loser: i64) -> Self {
        RewardSchedule { winner, loser }
    }

    /// Winner-only schedule, no consolation
    pub fn flat(amount: i64) -> Self {
        RewardSchedule {
            winner: amount,
            loser: 0,
        }
    }
}

impl Default for RewardSchedule {
    /// The console 10/3 split
    fn default() -> Self {
        RewardSchedule {
            winner: 10,
            loser: 3,
        }
    }
}

/// Complete state of one match
pub struct GameState {
    /// The two players, in seat order
    pub players: Vec<Player>,
    /// Shared catalog of purchasable templates (never mutated during play)
    pub catalog: CardCatalog,
    /// Match RNG; every random draw flows through this for replayability
    pub rng: ChaCha8Rng,
    /// Seed the RNG was created from
    pub rng_seed: u64,
    /// Rounds completed so far
    pub round: u32,
    /// Post-battle coin rewards
    pub rewards: RewardSchedule,
    /// Status message sink
    pub logger: GameLogger,
}

impl GameState {
    /// Create a two-player match over a shared catalog
    ///
    /// The seed drives offer generation, starting cards, and probabilistic
    /// special abilities, so a seeded match replays deterministically.
    pub fn new_two_player(
        name1: impl Into<String>,
        name2: impl Into<String>,
        catalog: CardCatalog,
        seed: u64,
    ) -> Self {
        GameState {
            players: vec![
                Player::new(PlayerId::new(0), name1),
                Player::new(PlayerId::new(1), name2),
            ],
            catalog,
            rng: ChaCha8Rng::seed_from_u64(seed),
            rng_seed: seed,
            round: 0,
            rewards: RewardSchedule::default(),
            logger: GameLogger::new(),
        }
    }

    /// Set the reward schedule
    pub fn with_reward_schedule(mut self, rewards: RewardSchedule) -> Self {
        self.rewards = rewards;
        self
    }

    /// Deal each player `per_player` random starting cards from the catalog
    pub fn deal_starting_cards(&mut self, per_player: usize) -> Result<()> {
        if self.catalog.is_empty() {
            return Err(GameError::InvalidAction(
                "cannot deal starting cards from an empty catalog".to_string(),
            ));
        }

        for player in &mut self.players {
            for _ in 0..per_player {
                let index = self.rng.gen_range(0..self.catalog.templates().len());
                player.add_card(self.catalog.templates()[index].instantiate());
            }
        }
        Ok(())
    }

    pub fn get_player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| GameError::InvalidAction(format!("unknown player {id}")))
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| GameError::InvalidAction(format!("unknown player {id}")))
    }

    /// The opponent of the given player
    pub fn other_player_id(&self, id: PlayerId) -> Result<PlayerId> {
        self.players
            .iter()
            .map(|p| p.id)
            .find(|&p| p != id)
            .ok_or_else(|| GameError::InvalidAction(format!("no opponent for {id}")))
    }

    /// Apply the reward schedule after a battle
    pub fn award_battle_rewards(&mut self, winner: PlayerId) -> Result<()> {
        let loser = self.other_player_id(winner)?;
        let rewards = self.rewards;

        self.get_player_mut(winner)?.coins += rewards.winner;
        self.get_player_mut(loser)?.coins += rewards.loser;

        let winner_name = self.get_player(winner)?.name.clone();
        let loser_name = self.get_player(loser)?.name.clone();
        self.logger
            .normal(format!("{winner_name} earned {} coins!", rewards.winner));
        if rewards.loser > 0 {
            self.logger
                .normal(format!("{loser_name} earned {} coins!", rewards.loser));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::CatalogLoader;

    fn small_catalog() -> CardCatalog {
        CatalogLoader::parse(
            "Warrior,Iron Blade,20,0.1,90\n\
             Archer,Longshot,15,0.05,60\n\
             Guardian,Stone Sentinel,8,0.4,120\n\
             Assassin,Night Fang,18,0.02,40",
        )
        .unwrap()
    }

    #[test]
    fn test_new_two_player() {
        let game = GameState::new_two_player("Alice", "Bob", small_catalog(), 7);
        assert_eq!(game.players.len(), 2);
        assert_eq!(game.players[0].name, "Alice");
        assert_eq!(game.rng_seed, 7);
        assert_eq!(game.round, 0);

        let other = game.other_player_id(game.players[0].id).unwrap();
        assert_eq!(other, game.players[1].id);
    }

    #[test]
    fn test_starting_cards_are_seed_deterministic() {
        let mut a = GameState::new_two_player("Alice", "Bob", small_catalog(), 99);
        let mut b = GameState::new_two_player("Alice", "Bob", small_catalog(), 99);
        a.deal_starting_cards(2).unwrap();
        b.deal_starting_cards(2).unwrap();

        for (pa, pb) in a.players.iter().zip(&b.players) {
            assert_eq!(pa.cards.len(), 2);
            let names_a: Vec<_> = pa.cards.iter().map(|c| &c.name).collect();
            let names_b: Vec<_> = pb.cards.iter().map(|c| &c.name).collect();
            assert_eq!(names_a, names_b);
        }
    }

    #[test]
    fn test_deal_from_empty_catalog_fails() {
        let mut game = GameState::new_two_player("Alice", "Bob", CardCatalog::new(), 1);
        assert!(game.deal_starting_cards(2).is_err());
    }

    #[test]
    fn test_reward_schedules() {
        assert_eq!(RewardSchedule::default(), RewardSchedule::new(10, 3));
        assert_eq!(RewardSchedule::flat(3), RewardSchedule::new(3, 0));
    }

    #[test]
    fn test_award_battle_rewards() {
        let mut game = GameState::new_two_player("Alice", "Bob", small_catalog(), 1);
        let winner = game.players[1].id;
        game.award_battle_rewards(winner).unwrap();
        assert_eq!(game.players[0].coins, 13);
        assert_eq!(game.players[1].coins, 20);
    }
}
