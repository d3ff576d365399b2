//! Effect magnitudes and the arithmetic of landing on a tile.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TileType;

const DEFAULT_INITIAL_MOVES: u32 = 450;
const DEFAULT_INITIAL_HEALTH: u32 = 200;
const DEFAULT_TRAP_DAMAGE: u32 = 10;
const DEFAULT_HAZARD_COST: u32 = 5;
const DEFAULT_BONUS_MOVES: u32 = 5;
const DEFAULT_BONUS_HEALTH: u32 = 10;

/// Move budget and health carried by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resources {
    moves: u32,
    health: u32,
}

impl Resources {
    /// Creates a new resource pair.
    #[must_use]
    pub const fn new(moves: u32, health: u32) -> Self {
        Self { moves, health }
    }

    /// Moves remaining.
    #[must_use]
    pub const fn moves(&self) -> u32 {
        self.moves
    }

    /// Health remaining.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Reports whether either resource has run out.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.moves == 0 || self.health == 0
    }

    /// Reports whether `self` holds at least as much of both resources as `other`.
    #[must_use]
    pub const fn dominates(&self, other: &Resources) -> bool {
        self.moves >= other.moves && self.health >= other.health
    }
}

/// Configuration parameters that govern move costs and tile effects.
///
/// The initial values double as caps: bonus tiles never restore past them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Starting and maximum move budget.
    pub initial_moves: u32,
    /// Starting and maximum health.
    pub initial_health: u32,
    /// Health removed by a trap tile.
    pub trap_damage: u32,
    /// Moves removed by a hazard tile on top of the base move cost.
    pub hazard_cost: u32,
    /// Moves restored by a bonus tile.
    pub bonus_moves: u32,
    /// Health restored by a bonus tile.
    pub bonus_health: u32,
}

impl RulesConfig {
    /// Creates a configuration with explicit starting resources and default
    /// effect magnitudes.
    #[must_use]
    pub const fn new(initial_moves: u32, initial_health: u32) -> Self {
        Self {
            initial_moves,
            initial_health,
            trap_damage: DEFAULT_TRAP_DAMAGE,
            hazard_cost: DEFAULT_HAZARD_COST,
            bonus_moves: DEFAULT_BONUS_MOVES,
            bonus_health: DEFAULT_BONUS_HEALTH,
        }
    }

    /// Overrides the health removed by traps.
    #[must_use]
    pub const fn with_trap_damage(mut self, trap_damage: u32) -> Self {
        self.trap_damage = trap_damage;
        self
    }

    /// Overrides the extra moves removed by hazards.
    #[must_use]
    pub const fn with_hazard_cost(mut self, hazard_cost: u32) -> Self {
        self.hazard_cost = hazard_cost;
        self
    }

    /// Overrides the resources restored by bonus tiles.
    #[must_use]
    pub const fn with_bonus(mut self, bonus_moves: u32, bonus_health: u32) -> Self {
        self.bonus_moves = bonus_moves;
        self.bonus_health = bonus_health;
        self
    }

    /// Rejects configurations that would start a game already lost.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.initial_moves == 0 {
            return Err(RulesError::InvalidRules("initial_moves must be positive"));
        }
        if self.initial_health == 0 {
            return Err(RulesError::InvalidRules("initial_health must be positive"));
        }
        Ok(())
    }

    /// Resources a fresh game starts with.
    #[must_use]
    pub const fn initial_resources(&self) -> Resources {
        Resources::new(self.initial_moves, self.initial_health)
    }

    /// Charges the base cost every submitted move pays, blocked or not.
    #[must_use]
    pub const fn spend_move(&self, resources: Resources) -> Resources {
        Resources::new(resources.moves.saturating_sub(1), resources.health)
    }

    /// Applies the effect of landing on `tile`.
    ///
    /// Losses saturate at zero and gains clamp to the initial caps. Walls
    /// carry no effect because they are never landed on.
    #[must_use]
    pub fn land_on(&self, tile: TileType, resources: Resources) -> Resources {
        match tile {
            TileType::Trap => Resources::new(
                resources.moves,
                resources.health.saturating_sub(self.trap_damage),
            ),
            TileType::Hazard => Resources::new(
                resources.moves.saturating_sub(self.hazard_cost),
                resources.health,
            ),
            TileType::Bonus => Resources::new(
                resources
                    .moves
                    .saturating_add(self.bonus_moves)
                    .min(self.initial_moves.max(resources.moves)),
                resources
                    .health
                    .saturating_add(self.bonus_health)
                    .min(self.initial_health.max(resources.health)),
            ),
            TileType::Empty | TileType::Start | TileType::End | TileType::Wall => resources,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_MOVES, DEFAULT_INITIAL_HEALTH)
    }
}

/// Rejected rules configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    /// A configuration value is out of range.
    #[error("invalid rules: {0}")]
    InvalidRules(&'static str),
}
