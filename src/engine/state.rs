use std::fmt;

use serde::{Deserialize, Serialize};

use super::ops;
use super::spawn::TileSource;

/// Side length of the square grid.
pub const SIZE: usize = 4;

/// A single cell value: 0 for empty, otherwise a power of two >= 2.
pub type Tile = u64;
pub type Score = u64;
/// One row (or column, after a transpose) of the grid.
pub type Line = [Tile; SIZE];
/// `(row, col)` coordinate, both in `0..SIZE`.
pub type Cell = (usize, usize);

/// Largest tile accepted from external input.
///
/// Moves conserve the tile sum, so merges starting from tiles this size stay
/// far below `Tile::MAX`.
pub const MAX_TILE: Tile = 1 << 48;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions, in the order policies break ties.
    pub const ALL: [Move; 4] = [Move::Up, Move::Left, Move::Right, Move::Down];
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(name)
    }
}

/// Rejections raised when building a [`Grid`] from its external row-major form.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("expected {size} rows, found {0}", size = SIZE)]
    RowCount(usize),
    #[error("row {row}: expected {size} cells, found {found}", size = SIZE)]
    RowLength { row: usize, found: usize },
    #[error("cell ({row}, {col}) holds {value}, which is not 0 or a power of two >= 2")]
    InvalidTile { row: usize, col: usize, value: Tile },
    #[error("cell ({row}, {col}) holds {value}, above the largest tile {max}", max = MAX_TILE)]
    TileTooLarge { row: usize, col: usize, value: Tile },
}

/// Outcome of sliding a single line toward index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapsedLine {
    pub line: Line,
    /// Sum of every value created by a merge in this line.
    pub gained: Score,
}

/// Outcome of one directional move. No tile is spawned here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub grid: Grid,
    pub gained: Score,
    /// True iff `grid` differs from the input in at least one cell.
    pub moved: bool,
}

/// A 4x4 2048 grid stored row-major as actual tile values.
///
/// `Grid` is `Copy`; every operation returns a new grid and leaves its input
/// untouched. Its serde form is the external representation: a sequence of
/// four rows of four integers, validated on the way in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Tile>>", into = "Vec<Vec<Tile>>")]
pub struct Grid(pub(crate) [Line; SIZE]);

impl Grid {
    /// A constant empty grid (all zeros).
    pub const EMPTY: Grid = Grid([[0; SIZE]; SIZE]);

    /// Construct a grid from literal rows.
    ///
    /// Rows are trusted; use `Grid::try_from` for untrusted input.
    ///
    /// ```
    /// use tiles_2048::engine::Grid;
    /// let g = Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    /// assert_eq!(g.get(0, 1), 2);
    /// ```
    #[inline]
    pub fn from_rows(rows: [Line; SIZE]) -> Self {
        debug_assert!(
            rows.iter().flatten().all(|&v| is_valid_tile(v)),
            "grid holds a non-tile value: {rows:?}"
        );
        Grid(rows)
    }

    /// Borrow the rows of this grid.
    #[inline]
    pub fn rows(&self) -> &[Line; SIZE] {
        &self.0
    }

    /// Consume this grid, returning its rows.
    #[inline]
    pub fn into_rows(self) -> [Line; SIZE] {
        self.0
    }

    /// Value at `(row, col)`; 0 when empty.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile {
        self.0[row][col]
    }

    /// Slide/merge tiles in `dir`. No random insert.
    ///
    /// ```
    /// use tiles_2048::engine::{Grid, Move};
    /// let g = Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    /// let res = g.shift(Move::Left);
    /// assert_eq!(res.grid.rows()[0], [4, 0, 0, 0]);
    /// assert_eq!(res.gained, 4);
    /// assert!(res.moved);
    /// ```
    #[inline]
    pub fn shift(self, dir: Move) -> MoveResult {
        ops::apply_move(self, dir)
    }

    /// Place a 2 (90%) or 4 (10%) into a uniformly chosen empty cell.
    /// A full grid comes back unchanged.
    ///
    /// ```
    /// use tiles_2048::engine::Grid;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let g = Grid::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(g.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<S: TileSource + ?Sized>(self, source: &mut S) -> Self {
        ops::spawn_random_tile(self, source)
    }

    /// False exactly when the grid is full and no two neighbours are equal.
    #[inline]
    pub fn has_any_move(&self) -> bool {
        ops::has_any_move(self)
    }

    /// Empty cells in row-major order.
    #[inline]
    pub fn empty_cells(&self) -> Vec<Cell> {
        ops::empty_cells(self)
    }

    /// Count the number of empty cells on the grid.
    pub fn count_empty(&self) -> usize {
        self.0.iter().flatten().filter(|&&v| v == 0).count()
    }

    /// Highest tile value present, 0 for an empty grid.
    pub fn highest_tile(&self) -> Tile {
        self.0.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of every tile on the grid.
    pub fn tile_sum(&self) -> Score {
        self.0.iter().flatten().map(|&v| Score::from(v)).sum()
    }
}

#[inline]
pub(crate) fn is_valid_tile(value: Tile) -> bool {
    value == 0 || (value >= 2 && value <= MAX_TILE && value.is_power_of_two())
}

impl TryFrom<Vec<Vec<Tile>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<Tile>>) -> Result<Self, Self::Error> {
        if rows.len() != SIZE {
            return Err(GridError::RowCount(rows.len()));
        }
        let mut grid = [[0; SIZE]; SIZE];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != SIZE {
                return Err(GridError::RowLength { row: r, found: row.len() });
            }
            for (c, &value) in row.iter().enumerate() {
                if value > MAX_TILE {
                    return Err(GridError::TileTooLarge { row: r, col: c, value });
                }
                if !is_valid_tile(value) {
                    return Err(GridError::InvalidTile { row: r, col: c, value });
                }
                grid[r][c] = value;
            }
        }
        Ok(Grid(grid))
    }
}

impl From<Grid> for Vec<Vec<Tile>> {
    fn from(grid: Grid) -> Self {
        grid.0.iter().map(|row| row.to_vec()).collect()
    }
}

impl From<Grid> for [Line; SIZE] {
    fn from(grid: Grid) -> Self {
        grid.into_rows()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid({:?})", self.0)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "-".repeat(SIZE * 8);
        for (r, row) in self.0.iter().enumerate() {
            if r > 0 {
                writeln!(f, "{separator}")?;
            }
            let cells: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(val: Tile) -> String {
    match val {
        0 => " ".repeat(7),
        v => format!("{v:^7}"),
    }
}
