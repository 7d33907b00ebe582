//! Engine module: the 4x4 grid, slide/merge transforms, tile spawning and
//! game-over detection. Everything here is pure apart from the injected
//! [`TileSource`].
//!
//! - `Grid` is the board value with convenience methods.
//! - Free functions mirror the methods (e.g. `apply_move`, `spawn_random_tile`).
//! - All four directions reduce to `move_left` through `transpose`/`reverse_rows`.

mod ops;
mod spawn;
pub mod state;

pub use state::{
    Cell, CollapsedLine, Grid, GridError, Line, Move, MoveResult, Score, Tile, MAX_TILE, SIZE,
};

pub use spawn::TileSource;

pub use ops::{
    apply_move, collapse_line, empty_cells, has_any_move, initial_grid, move_down, move_left,
    move_right, move_up, reverse_rows, spawn_random_tile, transpose,
};
