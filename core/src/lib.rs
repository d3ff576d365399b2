#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Gridwalk engine.
//!
//! This crate defines the vocabulary that connects adapters, the game store,
//! the authoritative world, and pure systems. Adapters submit [`Direction`]
//! values, the world resolves them against its board and answers with a
//! [`MoveResolution`], and read-only [`GameSnapshot`] values describe a game
//! to anyone who asks. Effect magnitudes live in [`RulesConfig`] so that every
//! consumer agrees on what landing on a tile costs.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod rules;

pub use rules::{Resources, RulesConfig, RulesError};

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in the order searches expand them.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Wire token naming the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = DirectionError;

    /// Parses one of the case-sensitive tokens `up`, `down`, `left`, `right`.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(DirectionError::new(other)),
        }
    }
}

/// Location of a single board cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new board cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Adjacent coordinate one unit step away, or `None` when the step would
    /// leave the unsigned coordinate space.
    ///
    /// No board bounds are consulted; callers check the upper edge.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::Up => self.row.checked_sub(1).map(|row| Self::new(row, self.column)),
            Direction::Down => self.row.checked_add(1).map(|row| Self::new(row, self.column)),
            Direction::Left => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(self.row, column)),
            Direction::Right => self
                .column
                .checked_add(1)
                .map(|column| Self::new(self.row, column)),
        }
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Type of a single board tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    /// Plain floor without any effect.
    #[default]
    Empty,
    /// Impassable cell.
    Wall,
    /// Cell the player starts on.
    Start,
    /// Cell the player must reach.
    End,
    /// Removes health when landed on.
    Trap,
    /// Restores moves and health when landed on.
    Bonus,
    /// Removes additional moves when landed on.
    Hazard,
}

impl TileType {
    /// Every tile type in declaration order.
    pub const ALL: [TileType; 7] = [
        Self::Empty,
        Self::Wall,
        Self::Start,
        Self::End,
        Self::Trap,
        Self::Bonus,
        Self::Hazard,
    ];

    /// Reports whether the player may enter the tile.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Single character used by the ASCII layout format.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Wall => '#',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Trap => 'T',
            Self::Bonus => 'B',
            Self::Hazard => 'H',
        }
    }

    /// Tile represented by an ASCII layout glyph.
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(Self::Empty),
            '#' => Some(Self::Wall),
            'S' => Some(Self::Start),
            'E' => Some(Self::End),
            'T' => Some(Self::Trap),
            'B' => Some(Self::Bonus),
            'H' => Some(Self::Hazard),
            _ => None,
        }
    }

    /// Lowercase name of the tile, matching its wire representation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Wall => "wall",
            Self::Start => "start",
            Self::End => "end",
            Self::Trap => "trap",
            Self::Bonus => "bonus",
            Self::Hazard => "hazard",
        }
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle status of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Moves are still accepted.
    #[default]
    InProgress,
    /// The player reached the end cell.
    Won,
    /// The move budget ran out before reaching the end.
    LostNoMoves,
    /// Health ran out before reaching the end.
    LostNoHealth,
}

impl GameStatus {
    /// Reports whether the status accepts no further moves.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// Derives the status after a resolved move.
    ///
    /// Reaching the end wins even when resources hit zero on the same move;
    /// health exhaustion outranks move exhaustion.
    #[must_use]
    pub const fn evaluate(at_end: bool, resources: Resources) -> Self {
        if at_end {
            Self::Won
        } else if resources.health() == 0 {
            Self::LostNoHealth
        } else if resources.moves() == 0 {
            Self::LostNoMoves
        } else {
            Self::InProgress
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InProgress => "in_progress",
            Self::Won => "won",
            Self::LostNoMoves => "lost_no_moves",
            Self::LostNoHealth => "lost_no_health",
        };
        f.write_str(label)
    }
}

/// Unique identifier assigned to a game by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(u64);

impl GameId {
    /// Creates a new game identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GameId {
    type Err = std::num::ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().parse::<u64>().map(Self)
    }
}

/// Read-only snapshot describing a single game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Cell currently occupied by the player.
    pub position: CellCoord,
    /// Health remaining.
    pub health: u32,
    /// Moves remaining.
    pub moves_remaining: u32,
    /// Board layout in row-major order.
    pub board: Vec<Vec<TileType>>,
    /// Cell the player started on.
    pub start: CellCoord,
    /// Cell the player must reach.
    pub end: CellCoord,
    /// Current lifecycle status.
    pub status: GameStatus,
}

/// Outcome of resolving a single submitted move.
///
/// Losses and gains are magnitudes; a bonus tile reports what it restored in
/// the `*_gained` fields rather than as a negative loss.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResolution {
    /// Tile landed on, or the tile that blocked the move. The board edge
    /// reports [`TileType::Wall`].
    pub tile_type: TileType,
    /// Cell occupied after the move.
    pub position: CellCoord,
    /// Moves remaining after the move.
    pub moves_remaining: u32,
    /// Health remaining after the move.
    pub health: u32,
    /// Health removed by this move.
    pub health_lost: u32,
    /// Moves removed by this move, including the base cost.
    pub moves_lost: u32,
    /// Health restored by this move.
    pub health_gained: u32,
    /// Moves restored by this move.
    pub moves_gained: u32,
    /// Indicates whether a wall or the board edge prevented relocation.
    pub blocked: bool,
    /// End cell of the board.
    pub end_position: CellCoord,
    /// Status after the move.
    pub status: GameStatus,
    /// Terminal status reached by this move, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_status: Option<GameStatus>,
}

impl MoveResolution {
    /// Reports whether this move ended the game.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.terminal_status.is_some()
    }

    /// Human-readable summary of the move.
    #[must_use]
    pub fn message(&self) -> String {
        match self.terminal_status {
            Some(GameStatus::Won) => "You won!".to_owned(),
            Some(_) => "Game over, you lost!".to_owned(),
            None if self.blocked => format!(
                "Move blocked by {}. You lost {} moves.",
                self.tile_type, self.moves_lost
            ),
            None => {
                let mut message = format!(
                    "Move successful. You landed in {} and lost {} health and {} moves.",
                    self.tile_type, self.health_lost, self.moves_lost
                );
                if self.health_gained > 0 || self.moves_gained > 0 {
                    message.push_str(&format!(
                        " Restored {} health and {} moves.",
                        self.health_gained, self.moves_gained
                    ));
                }
                message
            }
        }
    }
}

impl fmt::Display for MoveResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Rejected direction token.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid direction '{token}': expected one of up, down, left, right")]
pub struct DirectionError {
    token: String,
}

impl DirectionError {
    /// Creates an error for the provided token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Token that failed to parse.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Reasons a move submission may be rejected by a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The game already reached a terminal status.
    #[error("game is already over ({status})")]
    GameAlreadyOver {
        /// Terminal status the game holds.
        status: GameStatus,
    },
}

/// Specific invariant a rejected board violates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum BoardDefect {
    /// Width or height is zero.
    #[error("board dimensions must be positive")]
    ZeroDimension,
    /// Start lies outside the grid.
    #[error("start {0} lies outside the board")]
    StartOutOfBounds(CellCoord),
    /// End lies outside the grid.
    #[error("end {0} lies outside the board")]
    EndOutOfBounds(CellCoord),
    /// Start and end share a cell.
    #[error("start and end both occupy {0}")]
    StartEqualsEnd(CellCoord),
    /// Start sits on a wall.
    #[error("start {0} is a wall")]
    StartIsWall(CellCoord),
    /// End sits on a wall.
    #[error("end {0} is a wall")]
    EndIsWall(CellCoord),
    /// An explicit tile assignment lies outside the grid.
    #[error("tile assignment {0} lies outside the board")]
    TileOutOfBounds(CellCoord),
    /// A start or end tile sits somewhere other than the designated cell.
    #[error("start or end tile at {0} does not match the designated cells")]
    MisplacedMarker(CellCoord),
}

/// Board construction and lookup failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The board violates a layout invariant.
    #[error("invalid board: {0}")]
    InvalidBoard(BoardDefect),
    /// A coordinate lies outside the board.
    #[error("coordinate {coord} is outside the {width}x{height} board")]
    OutOfBounds {
        /// Rejected coordinate.
        coord: CellCoord,
        /// Width of the board.
        width: u32,
        /// Height of the board.
        height: u32,
    },
}
