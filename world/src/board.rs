//! Immutable board layout owned by a single game.

use gridwalk_core::{BoardDefect, BoardError, CellCoord, Direction, TileType};
use thiserror::Error;

/// Describes the discrete tile layout of one game.
///
/// Tiles are stored densely in row-major order. The start cell always holds
/// [`TileType::Start`] and the end cell [`TileType::End`]; no other cell may
/// carry either marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: u32,
    height: u32,
    tiles: Vec<TileType>,
    start: CellCoord,
    end: CellCoord,
}

impl Board {
    /// Creates a board from explicit tile assignments.
    ///
    /// Cells absent from `tiles` default to [`TileType::Empty`]. Later
    /// assignments to the same cell win.
    pub fn new<I>(
        width: u32,
        height: u32,
        tiles: I,
        start: CellCoord,
        end: CellCoord,
    ) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = (CellCoord, TileType)>,
    {
        let invalid = |defect| Err(BoardError::InvalidBoard(defect));

        if width == 0 || height == 0 {
            return invalid(BoardDefect::ZeroDimension);
        }
        if !contains(width, height, start) {
            return invalid(BoardDefect::StartOutOfBounds(start));
        }
        if !contains(width, height, end) {
            return invalid(BoardDefect::EndOutOfBounds(end));
        }
        if start == end {
            return invalid(BoardDefect::StartEqualsEnd(start));
        }

        let cell_count = u64::from(width) * u64::from(height);
        let cell_count = match usize::try_from(cell_count) {
            Ok(count) => count,
            Err(_) => return invalid(BoardDefect::ZeroDimension),
        };

        let mut board = Self {
            width,
            height,
            tiles: vec![TileType::Empty; cell_count],
            start,
            end,
        };

        for (cell, tile) in tiles {
            let Some(index) = board.index(cell) else {
                return invalid(BoardDefect::TileOutOfBounds(cell));
            };
            board.tiles[index] = tile;
        }

        if board.get(start) == Some(TileType::Wall) {
            return invalid(BoardDefect::StartIsWall(start));
        }
        if board.get(end) == Some(TileType::Wall) {
            return invalid(BoardDefect::EndIsWall(end));
        }

        for (cell, tile) in board.cells() {
            let misplaced = (tile == TileType::Start && cell != start)
                || (tile == TileType::End && cell != end);
            if misplaced {
                return invalid(BoardDefect::MisplacedMarker(cell));
            }
        }

        board.set(start, TileType::Start);
        board.set(end, TileType::End);
        Ok(board)
    }

    /// Parses the ASCII layout format.
    ///
    /// Each non-blank line is one row; each character one tile (`.` empty,
    /// `#` wall, `S` start, `E` end, `T` trap, `B` bonus, `H` hazard).
    pub fn from_ascii(layout: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();

        let Some(first) = rows.first() else {
            return Err(LayoutError::Empty);
        };
        let width = first.chars().count();

        let mut tiles = Vec::new();
        let mut start = None;
        let mut end = None;

        for (row_index, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LayoutError::RaggedRow {
                    row: row_index,
                    expected: width,
                    found,
                });
            }

            let row = u32::try_from(row_index).map_err(|_| LayoutError::TooLarge)?;
            for (column_index, glyph) in line.chars().enumerate() {
                let column = u32::try_from(column_index).map_err(|_| LayoutError::TooLarge)?;
                let cell = CellCoord::new(row, column);
                let tile = TileType::from_glyph(glyph).ok_or(LayoutError::UnknownGlyph {
                    glyph,
                    row: row_index,
                    column: column_index,
                })?;

                match tile {
                    TileType::Start => {
                        if start.is_some() {
                            return Err(LayoutError::DuplicateStart(cell));
                        }
                        start = Some(cell);
                    }
                    TileType::End => {
                        if end.is_some() {
                            return Err(LayoutError::DuplicateEnd(cell));
                        }
                        end = Some(cell);
                    }
                    _ => {}
                }

                if tile != TileType::Empty {
                    tiles.push((cell, tile));
                }
            }
        }

        let start = start.ok_or(LayoutError::MissingStart)?;
        let end = end.ok_or(LayoutError::MissingEnd)?;
        let width = u32::try_from(width).map_err(|_| LayoutError::TooLarge)?;
        let height = u32::try_from(rows.len()).map_err(|_| LayoutError::TooLarge)?;

        Ok(Self::new(width, height, tiles, start, end)?)
    }

    /// Renders the board in the ASCII layout format, one row per line.
    #[must_use]
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.tiles.len() + self.height as usize);
        for row in self.rows() {
            for tile in row {
                out.push(tile.glyph());
            }
            out.push('\n');
        }
        out
    }

    /// Number of columns contained in the board.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows contained in the board.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Cell the player starts on.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        self.start
    }

    /// Cell the player must reach.
    #[must_use]
    pub const fn end(&self) -> CellCoord {
        self.end
    }

    /// Reports whether `coord` lies on the board.
    #[must_use]
    pub fn contains(&self, coord: CellCoord) -> bool {
        contains(self.width, self.height, coord)
    }

    /// Tile at `coord`, failing with [`BoardError::OutOfBounds`] off the board.
    pub fn tile_at(&self, coord: CellCoord) -> Result<TileType, BoardError> {
        self.get(coord).ok_or(BoardError::OutOfBounds {
            coord,
            width: self.width,
            height: self.height,
        })
    }

    /// Tile at `coord`, or `None` off the board.
    #[must_use]
    pub fn get(&self, coord: CellCoord) -> Option<TileType> {
        self.index(coord).map(|index| self.tiles[index])
    }

    /// Reports whether the player may enter `coord`. Only walls are impassable.
    pub fn is_passable(&self, coord: CellCoord) -> Result<bool, BoardError> {
        self.tile_at(coord).map(TileType::is_passable)
    }

    /// In-bounds neighbour of `coord` in `direction`, or `None` at the edge.
    #[must_use]
    pub fn neighbor(&self, coord: CellCoord, direction: Direction) -> Option<CellCoord> {
        coord.step(direction).filter(|cell| self.contains(*cell))
    }

    /// Iterator over the rows of the board, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[TileType]> {
        self.tiles.chunks(self.width as usize)
    }

    /// Iterator over every cell and its tile in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, TileType)> + '_ {
        let width = self.width as usize;
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let row = (index / width) as u32;
            let column = (index % width) as u32;
            (CellCoord::new(row, column), *tile)
        })
    }

    /// Number of cells holding `tile`.
    #[must_use]
    pub fn count(&self, tile: TileType) -> usize {
        self.tiles.iter().filter(|candidate| **candidate == tile).count()
    }

    fn set(&mut self, coord: CellCoord, tile: TileType) {
        if let Some(index) = self.index(coord) {
            self.tiles[index] = tile;
        }
    }

    fn index(&self, coord: CellCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        let row = usize::try_from(coord.row()).ok()?;
        let column = usize::try_from(coord.column()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

/// Incremental builder for explicit board layouts.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    width: u32,
    height: u32,
    start: CellCoord,
    end: CellCoord,
    tiles: Vec<(CellCoord, TileType)>,
}

impl BoardBuilder {
    /// Starts an all-empty layout with the provided dimensions and markers.
    #[must_use]
    pub fn new(width: u32, height: u32, start: CellCoord, end: CellCoord) -> Self {
        Self {
            width,
            height,
            start,
            end,
            tiles: Vec::new(),
        }
    }

    /// Assigns `tile` to `cell`.
    #[must_use]
    pub fn with_tile(mut self, cell: CellCoord, tile: TileType) -> Self {
        self.tiles.push((cell, tile));
        self
    }

    /// Assigns `tile` to every cell in `cells`.
    #[must_use]
    pub fn with_tiles<I>(mut self, cells: I, tile: TileType) -> Self
    where
        I: IntoIterator<Item = CellCoord>,
    {
        self.tiles.extend(cells.into_iter().map(|cell| (cell, tile)));
        self
    }

    /// Validates and constructs the board.
    pub fn build(self) -> Result<Board, BoardError> {
        Board::new(self.width, self.height, self.tiles, self.start, self.end)
    }
}

/// Errors that can occur while parsing an ASCII layout.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The layout contained no rows.
    #[error("layout is empty")]
    Empty,
    /// A row's length differs from the first row.
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A character does not name a tile.
    #[error("unknown tile '{glyph}' at row {row}, column {column}")]
    UnknownGlyph {
        /// Offending character.
        glyph: char,
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        column: usize,
    },
    /// No `S` marker was found.
    #[error("layout has no start tile")]
    MissingStart,
    /// No `E` marker was found.
    #[error("layout has no end tile")]
    MissingEnd,
    /// A second `S` marker was found.
    #[error("second start tile at {0}")]
    DuplicateStart(CellCoord),
    /// A second `E` marker was found.
    #[error("second end tile at {0}")]
    DuplicateEnd(CellCoord),
    /// The layout exceeds the addressable coordinate range.
    #[error("layout is too large")]
    TooLarge,
    /// The parsed layout violates a board invariant.
    #[error(transparent)]
    Board(#[from] BoardError),
}

fn contains(width: u32, height: u32, coord: CellCoord) -> bool {
    coord.row() < height && coord.column() < width
}

/// One-line summary of a board used in log output.
pub(crate) fn describe(board: &Board) -> String {
    format!(
        "{}x{} board, start {}, end {}",
        board.width, board.height, board.start, board.end
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Board {
        BoardBuilder::new(3, 1, CellCoord::new(0, 0), CellCoord::new(0, 2))
            .build()
            .expect("valid corridor")
    }

    #[test]
    fn unspecified_cells_default_to_empty() {
        let board = corridor();
        assert_eq!(board.tile_at(CellCoord::new(0, 1)), Ok(TileType::Empty));
        assert_eq!(board.tile_at(CellCoord::new(0, 0)), Ok(TileType::Start));
        assert_eq!(board.tile_at(CellCoord::new(0, 2)), Ok(TileType::End));
    }

    #[test]
    fn tile_at_rejects_out_of_bounds() {
        let board = corridor();
        let error = board
            .tile_at(CellCoord::new(1, 0))
            .expect_err("row 1 lies outside a single-row board");
        assert_eq!(
            error,
            BoardError::OutOfBounds {
                coord: CellCoord::new(1, 0),
                width: 3,
                height: 1,
            }
        );
        assert!(board.is_passable(CellCoord::new(0, 3)).is_err());
    }

    #[test]
    fn only_walls_are_impassable() {
        let board = BoardBuilder::new(3, 2, CellCoord::new(0, 0), CellCoord::new(1, 2))
            .with_tile(CellCoord::new(0, 1), TileType::Wall)
            .with_tile(CellCoord::new(0, 2), TileType::Trap)
            .with_tile(CellCoord::new(1, 0), TileType::Hazard)
            .with_tile(CellCoord::new(1, 1), TileType::Bonus)
            .build()
            .expect("valid board");

        assert_eq!(board.is_passable(CellCoord::new(0, 1)), Ok(false));
        for cell in [
            CellCoord::new(0, 0),
            CellCoord::new(0, 2),
            CellCoord::new(1, 0),
            CellCoord::new(1, 1),
            CellCoord::new(1, 2),
        ] {
            assert_eq!(board.is_passable(cell), Ok(true), "{cell} should be passable");
        }
    }

    #[test]
    fn construction_rejects_broken_invariants() {
        let origin = CellCoord::new(0, 0);
        let cases = [
            (
                BoardBuilder::new(0, 3, origin, CellCoord::new(0, 1)),
                BoardDefect::ZeroDimension,
            ),
            (
                BoardBuilder::new(2, 2, CellCoord::new(2, 0), CellCoord::new(0, 1)),
                BoardDefect::StartOutOfBounds(CellCoord::new(2, 0)),
            ),
            (
                BoardBuilder::new(2, 2, origin, CellCoord::new(0, 2)),
                BoardDefect::EndOutOfBounds(CellCoord::new(0, 2)),
            ),
            (
                BoardBuilder::new(2, 2, origin, origin),
                BoardDefect::StartEqualsEnd(origin),
            ),
            (
                BoardBuilder::new(2, 2, origin, CellCoord::new(1, 1))
                    .with_tile(origin, TileType::Wall),
                BoardDefect::StartIsWall(origin),
            ),
            (
                BoardBuilder::new(2, 2, origin, CellCoord::new(1, 1))
                    .with_tile(CellCoord::new(1, 1), TileType::Wall),
                BoardDefect::EndIsWall(CellCoord::new(1, 1)),
            ),
            (
                BoardBuilder::new(2, 2, origin, CellCoord::new(1, 1))
                    .with_tile(CellCoord::new(5, 5), TileType::Trap),
                BoardDefect::TileOutOfBounds(CellCoord::new(5, 5)),
            ),
            (
                BoardBuilder::new(2, 2, origin, CellCoord::new(1, 1))
                    .with_tile(CellCoord::new(0, 1), TileType::End),
                BoardDefect::MisplacedMarker(CellCoord::new(0, 1)),
            ),
        ];

        for (builder, defect) in cases {
            assert_eq!(builder.build(), Err(BoardError::InvalidBoard(defect)));
        }
    }

    #[test]
    fn ascii_layout_round_trips() {
        let layout = "S.#\n.TH\nB.E\n";
        let board = Board::from_ascii(layout).expect("layout parses");

        assert_eq!(board.width(), 3);
        assert_eq!(board.height(), 3);
        assert_eq!(board.start(), CellCoord::new(0, 0));
        assert_eq!(board.end(), CellCoord::new(2, 2));
        assert_eq!(board.get(CellCoord::new(1, 2)), Some(TileType::Hazard));
        assert_eq!(board.to_ascii(), layout);
    }

    #[test]
    fn ascii_layout_reports_parse_failures() {
        assert_eq!(Board::from_ascii("\n  \n"), Err(LayoutError::Empty));
        assert_eq!(
            Board::from_ascii("S..\n.E"),
            Err(LayoutError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2,
            })
        );
        assert_eq!(
            Board::from_ascii("S?E"),
            Err(LayoutError::UnknownGlyph {
                glyph: '?',
                row: 0,
                column: 1,
            })
        );
        assert_eq!(Board::from_ascii("..E"), Err(LayoutError::MissingStart));
        assert_eq!(Board::from_ascii("S.."), Err(LayoutError::MissingEnd));
        assert_eq!(
            Board::from_ascii("S.S\n..E"),
            Err(LayoutError::DuplicateStart(CellCoord::new(0, 2)))
        );
    }

    #[test]
    fn neighbor_stops_at_edges() {
        let board = corridor();
        let origin = board.start();
        assert_eq!(board.neighbor(origin, Direction::Up), None);
        assert_eq!(board.neighbor(origin, Direction::Down), None);
        assert_eq!(board.neighbor(origin, Direction::Left), None);
        assert_eq!(
            board.neighbor(origin, Direction::Right),
            Some(CellCoord::new(0, 1))
        );
        assert_eq!(board.neighbor(board.end(), Direction::Right), None);
    }

    #[test]
    fn rows_follow_row_major_order() {
        let board = Board::from_ascii("S#\n.E").expect("layout parses");
        let rows: Vec<Vec<TileType>> = board.rows().map(<[TileType]>::to_vec).collect();
        assert_eq!(
            rows,
            vec![
                vec![TileType::Start, TileType::Wall],
                vec![TileType::Empty, TileType::End],
            ]
        );
        assert_eq!(board.count(TileType::Wall), 1);
        assert_eq!(
            describe(&board),
            "2x2 board, start (0, 0), end (1, 1)"
        );
    }
}
