//! Card archetypes and their per-variant constant profiles
//!
//! Each archetype carries a fixed set of growth constants and multipliers.
//! The profiles are immutable statics built before any card state, so a
//! card can never observe a half-initialized profile.

use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four fixed card kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Warrior,
    Archer,
    Guardian,
    Assassin,
}

/// Per-archetype growth constants and power-score multipliers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthProfile {
    /// Attack gained per upgrade
    pub attack_growth: f64,
    /// Defense gained per upgrade (while under the soft cap)
    pub defense_growth: f64,
    /// Health gained per upgrade
    pub health_growth: f64,
    /// Attack weight in the power score
    pub attack_multiplier: f64,
    /// Defense weight in the power score
    pub defense_multiplier: f64,
}

const WARRIOR_PROFILE: GrowthProfile = GrowthProfile {
    attack_growth: 6.0,
    defense_growth: 0.05,
    health_growth: 25.0,
    attack_multiplier: 1.2,
    defense_multiplier: 0.8,
};

const ARCHER_PROFILE: GrowthProfile = GrowthProfile {
    attack_growth: 8.0,
    defense_growth: 0.03,
    health_growth: 15.0,
    attack_multiplier: 1.5,
    defense_multiplier: 0.5,
};

const GUARDIAN_PROFILE: GrowthProfile = GrowthProfile {
    attack_growth: 4.0,
    defense_growth: 0.07,
    health_growth: 35.0,
    attack_multiplier: 0.8,
    defense_multiplier: 1.2,
};

const ASSASSIN_PROFILE: GrowthProfile = GrowthProfile {
    attack_growth: 9.0,
    defense_growth: 0.02,
    health_growth: 12.0,
    attack_multiplier: 1.7,
    defense_multiplier: 0.3,
};

impl Archetype {
    /// All archetypes, in catalog order
    pub const ALL: [Archetype; 4] = [
        Archetype::Warrior,
        Archetype::Archer,
        Archetype::Guardian,
        Archetype::Assassin,
    ];

    /// Get the constant profile for this archetype
    pub fn profile(&self) -> &'static GrowthProfile {
        match self {
            Archetype::Warrior => &WARRIOR_PROFILE,
            Archetype::Archer => &ARCHER_PROFILE,
            Archetype::Guardian => &GUARDIAN_PROFILE,
            Archetype::Assassin => &ASSASSIN_PROFILE,
        }
    }

    /// Display name, matching the catalog tag
    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Warrior => "Warrior",
            Archetype::Archer => "Archer",
            Archetype::Guardian => "Guardian",
            Archetype::Assassin => "Assassin",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Archetype {
    type Err = GameError;

    /// Parse a catalog archetype tag
    ///
    /// Unknown tags are rejected explicitly rather than silently skipped.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Warrior" => Ok(Archetype::Warrior),
            "Archer" => Ok(Archetype::Archer),
            "Guardian" => Ok(Archetype::Guardian),
            "Assassin" => Ok(Archetype::Assassin),
            other => Err(GameError::MalformedRecord(format!(
                "unknown archetype tag '{other}'"
            ))),
        }
    }
}
