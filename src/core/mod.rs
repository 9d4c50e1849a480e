//! Core game types: archetypes, cards, and players

pub mod archetype;
pub mod card;
pub mod player;

pub use archetype::{Archetype, GrowthProfile};
pub use card::{Card, DEFENSE_SOFT_CAP};
pub use player::{Player, PlayerId, STARTING_COINS};
