#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic board generation for new games.
//!
//! Boards place the start on the first column and the end on the last column,
//! each at a random row, then scatter walls and effect tiles over the
//! remaining cells. The same configuration and seed always yield the same
//! board.

use gridwalk_core::{BoardDefect, BoardError, CellCoord, RulesConfig, TileType};
use gridwalk_system_pathfinding::winning_path_exists;
use gridwalk_world::Board;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default board width in cells.
pub const DEFAULT_WIDTH: u32 = 50;
/// Default board height in cells.
pub const DEFAULT_HEIGHT: u32 = 50;
/// Default number of re-rolls `generate_solvable` performs.
pub const DEFAULT_SOLVABLE_ATTEMPTS: u32 = 16;

const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Inclusive range a tile count is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    min: u32,
    max: u32,
}

impl CountRange {
    /// Creates a range covering `min..=max`; reversed bounds are swapped.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Range that always yields `count`.
    #[must_use]
    pub const fn exactly(count: u32) -> Self {
        Self::new(count, count)
    }

    /// Smallest count drawn.
    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    /// Largest count drawn.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    fn sample(self, rng: &mut ChaCha8Rng) -> usize {
        let low = self.min.min(self.max);
        let high = self.min.max(self.max);
        usize::try_from(rng.gen_range(low..=high)).unwrap_or(usize::MAX)
    }
}

/// Parameters controlling the shape and density of generated boards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    width: u32,
    height: u32,
    walls: CountRange,
    traps: CountRange,
    bonuses: CountRange,
    hazards: CountRange,
}

impl GenerationConfig {
    /// Creates a configuration for `width × height` boards with default densities.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            walls: CountRange::new(100, 200),
            traps: CountRange::new(200, 400),
            bonuses: CountRange::new(200, 400),
            hazards: CountRange::new(200, 400),
        }
    }

    /// Overrides the board dimensions.
    #[must_use]
    pub const fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Overrides how many walls are scattered.
    #[must_use]
    pub const fn with_walls(mut self, walls: CountRange) -> Self {
        self.walls = walls;
        self
    }

    /// Overrides how many trap tiles are scattered.
    #[must_use]
    pub const fn with_traps(mut self, traps: CountRange) -> Self {
        self.traps = traps;
        self
    }

    /// Overrides how many bonus tiles are scattered.
    #[must_use]
    pub const fn with_bonuses(mut self, bonuses: CountRange) -> Self {
        self.bonuses = bonuses;
        self
    }

    /// Overrides how many hazard tiles are scattered.
    #[must_use]
    pub const fn with_hazards(mut self, hazards: CountRange) -> Self {
        self.hazards = hazards;
        self
    }

    /// Board width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Board height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Count range for the given tile kind, if it is scattered at all.
    #[must_use]
    pub const fn count_range(&self, tile: TileType) -> Option<CountRange> {
        match tile {
            TileType::Wall => Some(self.walls),
            TileType::Trap => Some(self.traps),
            TileType::Bonus => Some(self.bonuses),
            TileType::Hazard => Some(self.hazards),
            TileType::Empty | TileType::Start | TileType::End => None,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

/// Pure system that turns seeds into boards.
#[derive(Clone, Debug, Default)]
pub struct Generator {
    config: GenerationConfig,
}

impl Generator {
    /// Creates a generator using the supplied configuration.
    #[must_use]
    pub const fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    /// Configuration the generator was built with.
    #[must_use]
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generates the board for `seed`.
    ///
    /// Tile counts larger than the free cells are truncated. Boards too narrow
    /// to hold distinct start and end columns are rejected.
    pub fn generate(&self, seed: u64) -> Result<Board, BoardError> {
        let GenerationConfig { width, height, .. } = self.config;
        if width == 0 || height == 0 {
            return Err(BoardError::InvalidBoard(BoardDefect::ZeroDimension));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let start = CellCoord::new(rng.gen_range(0..height), 0);
        let end = CellCoord::new(rng.gen_range(0..height), width - 1);
        if width < 2 {
            return Err(BoardError::InvalidBoard(BoardDefect::StartEqualsEnd(start)));
        }

        let mut free: Vec<CellCoord> = (0..height)
            .flat_map(|row| (0..width).map(move |column| CellCoord::new(row, column)))
            .filter(|cell| *cell != start && *cell != end)
            .collect();
        free.shuffle(&mut rng);

        let mut cells = free.into_iter();
        let mut assignments = Vec::new();
        for tile in [
            TileType::Trap,
            TileType::Bonus,
            TileType::Hazard,
            TileType::Wall,
        ] {
            let Some(range) = self.config.count_range(tile) else {
                continue;
            };
            let count = range.sample(&mut rng);
            assignments.extend(cells.by_ref().take(count).map(|cell| (cell, tile)));
        }

        let board = Board::new(width, height, assignments, start, end)?;
        debug!(seed, width, height, %start, %end, "board generated");
        Ok(board)
    }

    /// Generates a board the player can win with the rules' initial resources.
    ///
    /// Re-rolls with derived seeds up to `attempts` times and falls back to the
    /// last board generated when none of them is solvable.
    pub fn generate_solvable(
        &self,
        seed: u64,
        rules: &RulesConfig,
        attempts: u32,
    ) -> Result<Board, BoardError> {
        let attempts = attempts.max(1);
        let mut attempt = 0;
        loop {
            let derived = seed.wrapping_add(u64::from(attempt).wrapping_mul(SEED_STRIDE));
            let board = self.generate(derived)?;
            if winning_path_exists(&board, rules, board.start(), rules.initial_resources()) {
                debug!(seed, attempt, "solvable board found");
                return Ok(board);
            }

            attempt += 1;
            if attempt == attempts {
                warn!(seed, attempts, "no solvable board found, keeping last attempt");
                return Ok(board);
            }
        }
    }
}
