#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Keyed storage for concurrently played games.
//!
//! Games are identified by sequential [`GameId`]s. Each game sits behind its
//! own mutex so moves against one ID are serialised while different IDs are
//! played in parallel.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError, RwLock,
    },
};

use gridwalk_core::{
    BoardError, Direction, DirectionError, GameId, GameSnapshot, MoveError, MoveResolution,
    RulesConfig, RulesError,
};
use gridwalk_system_generation::Generator;
use gridwalk_system_pathfinding::winning_path;
use gridwalk_world::{apply_move, query, Board, Game};
use thiserror::Error;
use tracing::{debug, info};

/// Failures surfaced by store operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No game is stored under the identifier.
    #[error("game {0} not found")]
    GameNotFound(GameId),
    /// The submitted direction token was not recognised.
    #[error(transparent)]
    InvalidDirection(#[from] DirectionError),
    /// The game refused the move.
    #[error(transparent)]
    Move(#[from] MoveError),
    /// The store's rules cannot start a game.
    #[error(transparent)]
    Rules(#[from] RulesError),
    /// A generated board was rejected.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Owns every live game keyed by identifier.
#[derive(Debug)]
pub struct GameStore {
    rules: RulesConfig,
    next_id: AtomicU64,
    games: RwLock<HashMap<GameId, Arc<Mutex<Game>>>>,
}

impl GameStore {
    /// Creates an empty store whose games follow `rules`.
    #[must_use]
    pub fn new(rules: RulesConfig) -> Self {
        Self {
            rules,
            next_id: AtomicU64::new(0),
            games: RwLock::new(HashMap::new()),
        }
    }

    /// Rules every game in the store is created with.
    #[must_use]
    pub const fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Stores a new game on `board` and returns its identifier.
    pub fn create_game(&self, board: Board) -> Result<GameId, StoreError> {
        let (width, height) = (board.width(), board.height());
        let game = Game::new(board, self.rules)?;
        let id = GameId::new(self.next_id.fetch_add(1, Ordering::Relaxed));

        let previous = self
            .games
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(Mutex::new(game)));
        debug_assert!(previous.is_none(), "game identifiers are never reused");

        info!(%id, width, height, "game created");
        Ok(id)
    }

    /// Generates a board for `seed` and stores a new game on it.
    pub fn create_generated(&self, generator: &Generator, seed: u64) -> Result<GameId, StoreError> {
        let board = generator.generate(seed)?;
        self.create_game(board)
    }

    /// Captures the current state of a game.
    pub fn snapshot(&self, id: GameId) -> Result<GameSnapshot, StoreError> {
        let game = self.game(id)?;
        let snapshot = query::snapshot(&lock(&game));
        Ok(snapshot)
    }

    /// Parses `token` as a direction and applies it to the game.
    ///
    /// Unknown identifiers are reported before malformed tokens, which are
    /// reported before moves against finished games.
    pub fn submit_move(&self, id: GameId, token: &str) -> Result<MoveResolution, StoreError> {
        let game = self.game(id)?;
        let direction: Direction = token.parse()?;
        let resolution = apply_move(&mut lock(&game), direction)?;
        debug!(%id, %direction, status = %resolution.status, "move submitted");
        Ok(resolution)
    }

    /// Searches for a winning route from the game's current state.
    ///
    /// Returns `None` when the game is lost or no route exists.
    pub fn winning_path(&self, id: GameId) -> Result<Option<Vec<Direction>>, StoreError> {
        let game = self.game(id)?;
        let route = winning_path(&lock(&game));
        Ok(route.map(|route| route.into_directions()))
    }

    /// Drops a game, reporting whether it existed.
    pub fn remove(&self, id: GameId) -> bool {
        let removed = self
            .games
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some();
        if removed {
            debug!(%id, "game removed");
        }
        removed
    }

    /// Number of stored games.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Reports whether the store holds no games.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn game(&self, id: GameId) -> Result<Arc<Mutex<Game>>, StoreError> {
        self.games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(StoreError::GameNotFound(id))
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new(RulesConfig::default())
    }
}

fn lock(game: &Mutex<Game>) -> MutexGuard<'_, Game> {
    game.lock().unwrap_or_else(PoisonError::into_inner)
}
