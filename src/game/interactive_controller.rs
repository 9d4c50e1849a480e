//! Interactive stdin controller for human play
//!
//! A numbered four-item menu (Decks / Market / Merge / Battle), offer
//! lists with `0` to cancel, and re-prompting on bad input. All prompts
//! go straight to stdout; game status flows separately through the
//! `GameLogger`.

use crate::core::{Card, PlayerId};
use crate::game::controller::{GameStateView, PlayerController, TurnAction};
use std::io::{self, BufRead, Write};

/// Controller that prompts a human on stdin/stdout
pub struct InteractiveController {
    player_id: PlayerId,
}

impl InteractiveController {
    pub fn new(player_id: PlayerId) -> Self {
        InteractiveController { player_id }
    }

    /// Prompt and read one number; None on EOF or non-numeric input
    fn read_number(prompt: &str) -> Option<usize> {
        print!("{prompt}");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None, // EOF: caller falls back to a safe default
            Ok(_) => line.trim().parse().ok(),
        }
    }

    fn print_card_line(index: usize, card: &Card) {
        println!("{}. {} (Level {})", index, card.name, card.level);
        println!(
            "   Attack: {}, Defense: {:.2}, Health: {:.2}",
            card.attack, card.defense, card.health
        );
    }
}

impl PlayerController for InteractiveController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_turn_action(
        &mut self,
        view: &GameStateView,
        available: &[TurnAction],
    ) -> TurnAction {
        println!(
            "\n{}'s turn (Coins: {})",
            view.player_name(),
            view.coins()
        );
        for (i, action) in available.iter().enumerate() {
            println!("{}. {}", i + 1, action.label());
        }

        loop {
            match Self::read_number(&format!("Choose your action (1-{}): ", available.len())) {
                Some(n) if n >= 1 && n <= available.len() => return available[n - 1],
                Some(_) => println!("Invalid choice. Please try again."),
                None => return TurnAction::ProceedToBattle,
            }
        }
    }

    fn choose_offer(&mut self, _view: &GameStateView, offers: &[Card]) -> Option<usize> {
        println!("\nAvailable cards to buy:");
        for (i, card) in offers.iter().enumerate() {
            println!(
                "{}. {} - Attack: {}, Defense: {:.2}, Health: {:.2}",
                i + 1,
                card.name,
                card.attack,
                card.defense,
                card.health
            );
        }
        println!("0. Cancel purchase");

        loop {
            match Self::read_number(&format!("Choose a card to buy (0-{}): ", offers.len())) {
                Some(0) | None => return None,
                Some(n) if n <= offers.len() => return Some(n - 1),
                Some(_) => println!("Invalid choice."),
            }
        }
    }

    fn choose_merge_pair(&mut self, view: &GameStateView) -> Option<(usize, usize)> {
        let cards = view.cards();
        println!("\nChoose two cards to merge (or 0 to cancel):");
        for (i, card) in cards.iter().enumerate() {
            println!("{}. {} - Level: {}", i + 1, card.name, card.level);
        }

        let first = match Self::read_number("Choose first card (0 to cancel): ") {
            Some(0) | None => return None,
            Some(n) => n,
        };
        let second = match Self::read_number("Choose second card (0 to cancel): ") {
            Some(0) | None => return None,
            Some(n) => n,
        };

        // 1-based menu to 0-based indices; range errors are reported by
        // the merge engine and the sub-action simply ends.
        Some((first - 1, second - 1))
    }

    fn choose_battle_card(&mut self, view: &GameStateView) -> usize {
        let cards = view.cards();
        println!("\n{}, choose your card for battle:", view.player_name());
        for (i, card) in cards.iter().enumerate() {
            Self::print_card_line(i + 1, card);
        }

        loop {
            match Self::read_number("Choose card number: ") {
                Some(n) if n >= 1 && n <= cards.len() => return n - 1,
                Some(_) => println!("Invalid card number."),
                None => return 0,
            }
        }
    }

    fn on_match_end(&mut self, view: &GameStateView, won: bool) {
        if won {
            println!("\n{} wins the game!", view.player_name());
        }
    }
}
