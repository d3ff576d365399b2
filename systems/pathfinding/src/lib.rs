#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Winning-path search over a game's board.
//!
//! The search is a breadth-first walk over `(cell, moves, health)` states that
//! charges exactly what the world charges for each step. States that another
//! visited state at the same cell dominates are pruned, which keeps the
//! frontier finite because resources never exceed their caps.

use std::collections::VecDeque;

use gridwalk_core::{CellCoord, Direction, GameStatus, Resources, RulesConfig};
use gridwalk_world::{query, Board, Game};
use tracing::trace;

/// Sequence of moves that wins the game from the searched state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    directions: Vec<Direction>,
    arrival: Resources,
}

impl Route {
    /// Directions to submit, in order.
    #[must_use]
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Number of moves on the route.
    #[must_use]
    pub fn len(&self) -> usize {
        self.directions.len()
    }

    /// Reports whether the searched state already sits on the end cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// Resources left on arrival at the end cell.
    #[must_use]
    pub const fn arrival(&self) -> Resources {
        self.arrival
    }

    /// Consumes the route, yielding its directions.
    #[must_use]
    pub fn into_directions(self) -> Vec<Direction> {
        self.directions
    }
}

/// Searches for the shortest winning route from the game's current state.
///
/// Won games yield an empty route; lost games yield `None`.
#[must_use]
pub fn winning_path(game: &Game) -> Option<Route> {
    match query::status(game) {
        GameStatus::Won => Some(Route {
            directions: Vec::new(),
            arrival: query::resources(game),
        }),
        GameStatus::LostNoMoves | GameStatus::LostNoHealth => None,
        GameStatus::InProgress => find_winning_path(
            query::board(game),
            query::rules(game),
            query::position(game),
            query::resources(game),
        ),
    }
}

/// Reports whether any route wins from `from` holding `resources`.
#[must_use]
pub fn winning_path_exists(
    board: &Board,
    rules: &RulesConfig,
    from: CellCoord,
    resources: Resources,
) -> bool {
    find_winning_path(board, rules, from, resources).is_some()
}

/// Searches for the shortest winning route from `from` holding `resources`.
#[must_use]
pub fn find_winning_path(
    board: &Board,
    rules: &RulesConfig,
    from: CellCoord,
    resources: Resources,
) -> Option<Route> {
    let end = board.end();
    if from == end {
        return Some(Route {
            directions: Vec::new(),
            arrival: resources,
        });
    }
    if resources.is_exhausted() || !board.contains(from) {
        return None;
    }

    let width = usize::try_from(board.width()).ok()?;
    let height = usize::try_from(board.height()).ok()?;
    let mut labels: Vec<Vec<Resources>> = vec![Vec::new(); width.checked_mul(height)?];
    let mut nodes: Vec<SearchNode> = Vec::new();
    let mut queue = VecDeque::new();

    labels[index(width, from)?].push(resources);
    nodes.push(SearchNode {
        cell: from,
        resources,
        parent: None,
    });
    queue.push_back(0);

    while let Some(current) = queue.pop_front() {
        let SearchNode {
            cell, resources, ..
        } = nodes[current];

        for direction in Direction::ALL {
            let Some(next) = board.neighbor(cell, direction) else {
                continue;
            };
            let Some(tile) = board.get(next).filter(|tile| tile.is_passable()) else {
                continue;
            };

            let landed = rules.land_on(tile, rules.spend_move(resources));

            if next == end {
                nodes.push(SearchNode {
                    cell: next,
                    resources: landed,
                    parent: Some((current, direction)),
                });
                trace!(explored = nodes.len(), "winning path found");
                return Some(reconstruct(&nodes, nodes.len() - 1));
            }

            if landed.is_exhausted() {
                continue;
            }

            let Some(slot) = index(width, next) else {
                continue;
            };
            let visited = &mut labels[slot];
            if visited.iter().any(|seen| seen.dominates(&landed)) {
                continue;
            }
            visited.retain(|seen| !landed.dominates(seen));
            visited.push(landed);

            nodes.push(SearchNode {
                cell: next,
                resources: landed,
                parent: Some((current, direction)),
            });
            queue.push_back(nodes.len() - 1);
        }
    }

    trace!(explored = nodes.len(), "no winning path");
    None
}

#[derive(Clone, Copy, Debug)]
struct SearchNode {
    cell: CellCoord,
    resources: Resources,
    parent: Option<(usize, Direction)>,
}

fn reconstruct(nodes: &[SearchNode], goal: usize) -> Route {
    let arrival = nodes[goal].resources;
    let mut directions = Vec::new();
    let mut cursor = goal;
    while let Some((parent, direction)) = nodes[cursor].parent {
        directions.push(direction);
        cursor = parent;
    }
    directions.reverse();
    Route {
        directions,
        arrival,
    }
}

fn index(width: usize, cell: CellCoord) -> Option<usize> {
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    row.checked_mul(width)?.checked_add(column)
}
