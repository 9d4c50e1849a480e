//! Game engine: match state, turn phases, battles, and controllers

pub mod battle;
pub mod controller;
pub mod game_loop;
pub mod interactive_controller;
pub mod logger;
pub mod market;
pub mod merge;
pub mod random_controller;
pub mod scripted_controller;
pub mod state;

pub use battle::{BattleEndReason, BattleResolver, BattleResult, BattleSide};
pub use controller::{available_turn_actions, GameStateView, PlayerController, TurnAction};
pub use game_loop::{GameLoop, MatchEndReason, MatchResult};
pub use interactive_controller::InteractiveController;
pub use logger::{GameLogger, LogEntry, OutputMode, VerbosityLevel};
pub use random_controller::RandomController;
pub use scripted_controller::ScriptedController;
pub use state::{GameState, RewardSchedule};
