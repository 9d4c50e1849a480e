//! Card Clash - a two-player card battle rules engine
//!
//! Players buy, merge, and battle collectible cards of four archetypes.
//! The engine owns the rules (stat growth, damage resolution, special
//! abilities, market, merging, round orchestration); presentation is
//! decoupled behind the `PlayerController` trait.

pub mod core;
pub mod error;
pub mod game;
pub mod loader;

pub use error::{GameError, Result};
