#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Gridwalk.
//!
//! A [`Game`] exclusively owns its [`Board`] and the player's mutable state.
//! The only state transition is [`apply_move`]; everything else reads the
//! game through the [`query`] module.

mod board;

use gridwalk_core::{
    CellCoord, Direction, GameStatus, MoveError, MoveResolution, Resources, RulesConfig,
    RulesError, TileType,
};
use tracing::{debug, info};

pub use board::{Board, BoardBuilder, LayoutError};

/// Represents one game instance: its board, the player, and the outcome.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    rules: RulesConfig,
    position: CellCoord,
    resources: Resources,
    status: GameStatus,
}

impl Game {
    /// Creates a new game positioned on the board's start cell.
    ///
    /// Fails when the rules would start the game with no moves or health.
    pub fn new(board: Board, rules: RulesConfig) -> Result<Self, RulesError> {
        rules.validate()?;
        debug!(board = %crate::board::describe(&board), "game initialised");
        Ok(Self {
            position: board.start(),
            resources: rules.initial_resources(),
            status: GameStatus::InProgress,
            board,
            rules,
        })
    }
}

/// Resolves a single submitted move against the game's board.
///
/// Every accepted move costs one move, even when a wall or the board edge
/// blocks it. Blocked moves never apply the blocking tile's effect. Terminal
/// games reject the move and stay untouched.
pub fn apply_move(game: &mut Game, direction: Direction) -> Result<MoveResolution, MoveError> {
    if game.status.is_terminal() {
        return Err(MoveError::GameAlreadyOver {
            status: game.status,
        });
    }

    let before = game.resources;
    let spent = game.rules.spend_move(before);

    let target = game
        .board
        .neighbor(game.position, direction)
        .and_then(|cell| game.board.get(cell).map(|tile| (cell, tile)));

    let (tile_type, blocked, after) = match target {
        Some((cell, tile)) if tile.is_passable() => {
            game.position = cell;
            (tile, false, game.rules.land_on(tile, spent))
        }
        Some((_, tile)) => (tile, true, spent),
        None => (TileType::Wall, true, spent),
    };

    game.resources = after;
    game.status = GameStatus::evaluate(game.position == game.board.end(), after);
    debug_assert!(
        game.status.is_terminal() || !after.is_exhausted(),
        "in-progress game holds exhausted resources"
    );

    let terminal_status = game.status.is_terminal().then_some(game.status);
    let resolution = MoveResolution {
        tile_type,
        position: game.position,
        moves_remaining: after.moves(),
        health: after.health(),
        health_lost: before.health().saturating_sub(after.health()),
        moves_lost: before.moves().saturating_sub(after.moves()),
        health_gained: after.health().saturating_sub(before.health()),
        moves_gained: after.moves().saturating_sub(before.moves()),
        blocked,
        end_position: game.board.end(),
        status: game.status,
        terminal_status,
    };

    debug!(
        %direction,
        tile = %tile_type,
        position = %resolution.position,
        moves = resolution.moves_remaining,
        health = resolution.health,
        blocked,
        "move resolved"
    );
    if let Some(status) = terminal_status {
        info!(%status, position = %game.position, "game finished");
    }

    Ok(resolution)
}

/// Query functions that provide read-only access to a game.
pub mod query {
    use gridwalk_core::{CellCoord, GameSnapshot, GameStatus, Resources, RulesConfig};

    use super::{Board, Game};

    /// Captures a read-only snapshot of the game.
    #[must_use]
    pub fn snapshot(game: &Game) -> GameSnapshot {
        GameSnapshot {
            position: game.position,
            health: game.resources.health(),
            moves_remaining: game.resources.moves(),
            board: game.board.rows().map(<[_]>::to_vec).collect(),
            start: game.board.start(),
            end: game.board.end(),
            status: game.status,
        }
    }

    /// Provides read-only access to the game's board.
    #[must_use]
    pub fn board(game: &Game) -> &Board {
        &game.board
    }

    /// Rules the game was created with.
    #[must_use]
    pub fn rules(game: &Game) -> &RulesConfig {
        &game.rules
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn position(game: &Game) -> CellCoord {
        game.position
    }

    /// Moves and health the player holds.
    #[must_use]
    pub fn resources(game: &Game) -> Resources {
        game.resources
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(game: &Game) -> GameStatus {
        game.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_board() -> Board {
        BoardBuilder::new(3, 3, CellCoord::new(0, 0), CellCoord::new(2, 2))
            .build()
            .expect("valid board")
    }

    fn game_on(board: Board, rules: RulesConfig) -> Game {
        Game::new(board, rules).expect("valid rules")
    }

    #[test]
    fn new_game_starts_on_start_cell_with_full_resources() {
        let game = game_on(open_board(), RulesConfig::new(10, 10));

        assert_eq!(query::position(&game), CellCoord::new(0, 0));
        assert_eq!(query::resources(&game), Resources::new(10, 10));
        assert_eq!(query::status(&game), GameStatus::InProgress);
    }

    #[test]
    fn new_game_rejects_invalid_rules() {
        assert!(Game::new(open_board(), RulesConfig::new(0, 10)).is_err());
    }

    #[test]
    fn edge_blocks_like_a_wall() {
        let mut game = game_on(open_board(), RulesConfig::new(10, 10));

        let resolution = apply_move(&mut game, Direction::Up).expect("move accepted");

        assert!(resolution.blocked);
        assert_eq!(resolution.tile_type, TileType::Wall);
        assert_eq!(resolution.position, CellCoord::new(0, 0));
        assert_eq!(resolution.moves_remaining, 9);
        assert_eq!(resolution.moves_lost, 1);
        assert_eq!(resolution.terminal_status, None);
    }

    #[test]
    fn hazard_costs_base_and_extra_moves() {
        let board = BoardBuilder::new(3, 1, CellCoord::new(0, 0), CellCoord::new(0, 2))
            .with_tile(CellCoord::new(0, 1), TileType::Hazard)
            .build()
            .expect("valid board");
        let mut game = game_on(board, RulesConfig::new(20, 10).with_hazard_cost(5));

        let resolution = apply_move(&mut game, Direction::Right).expect("move accepted");

        assert_eq!(resolution.tile_type, TileType::Hazard);
        assert_eq!(resolution.moves_remaining, 14);
        assert_eq!(resolution.moves_lost, 6);
        assert_eq!(resolution.health_lost, 0);
    }

    #[test]
    fn bonus_restores_up_to_caps() {
        let board = BoardBuilder::new(3, 1, CellCoord::new(0, 0), CellCoord::new(0, 2))
            .with_tile(CellCoord::new(0, 1), TileType::Bonus)
            .build()
            .expect("valid board");
        let mut game = game_on(board, RulesConfig::new(10, 10).with_bonus(5, 5));

        let resolution = apply_move(&mut game, Direction::Right).expect("move accepted");

        assert_eq!(resolution.moves_remaining, 10);
        assert_eq!(resolution.health, 10);
        assert_eq!(resolution.moves_lost, 0);
        assert_eq!(resolution.moves_gained, 0);
        assert_eq!(resolution.health_gained, 0);
    }

    #[test]
    fn snapshot_reports_layout_and_markers() {
        let game = game_on(open_board(), RulesConfig::new(10, 10));
        let snapshot = query::snapshot(&game);

        assert_eq!(snapshot.board.len(), 3);
        assert!(snapshot.board.iter().all(|row| row.len() == 3));
        assert_eq!(snapshot.board[0][0], TileType::Start);
        assert_eq!(snapshot.board[2][2], TileType::End);
        assert_eq!(snapshot.start, CellCoord::new(0, 0));
        assert_eq!(snapshot.end, CellCoord::new(2, 2));
        assert_eq!(snapshot.moves_remaining, 10);
        assert_eq!(snapshot.health, 10);
    }
}
