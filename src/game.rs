//! Caller-side game state: the current grid, the running score and the
//! `Playing -> GameOver` state machine built on top of the engine.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::engine::{self, Grid, Move, Score, Tile, TileSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Playing,
    GameOver,
}

/// What a single [`Game::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The grid changed; a tile was spawned and `gained` added to the score.
    Moved { gained: Score, game_over: bool },
    /// Nothing slid in that direction. State is unchanged.
    Unchanged,
    /// The game had already ended. Input is ignored.
    Finished,
}

/// Snapshot of a game, suitable for printing or JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub moves: u32,
    pub score: Score,
    pub highest_tile: Tile,
    pub status: Status,
    pub grid: Grid,
}

/// A running 2048 game driven by directional input.
pub struct Game<S: TileSource> {
    grid: Grid,
    score: Score,
    moves: u32,
    status: Status,
    source: S,
}

impl<S: TileSource> Game<S> {
    /// Start a game on a fresh grid holding two random tiles.
    ///
    /// ```
    /// use tiles_2048::game::{Game, Status};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let game = Game::new(StdRng::seed_from_u64(7));
    /// assert_eq!(game.grid().count_empty(), 14);
    /// assert_eq!(game.score(), 0);
    /// assert_eq!(game.status(), Status::Playing);
    /// ```
    pub fn new(mut source: S) -> Self {
        let grid = engine::initial_grid(&mut source);
        Self::from_grid(grid, source)
    }

    /// Resume from an arbitrary grid with a zero score.
    pub fn from_grid(grid: Grid, source: S) -> Self {
        let status = if grid.has_any_move() { Status::Playing } else { Status::GameOver };
        Game { grid, score: 0, moves: 0, status, source }
    }

    /// Apply one directional input.
    ///
    /// A move that changes the grid spawns one tile, adds the merge points to
    /// the score and re-checks for game over. A move that changes nothing is a
    /// no-op, as is any input once the game has ended.
    pub fn step(&mut self, direction: Move) -> StepOutcome {
        if self.status == Status::GameOver {
            return StepOutcome::Finished;
        }
        let res = engine::apply_move(self.grid, direction);
        if !res.moved {
            return StepOutcome::Unchanged;
        }
        self.grid = engine::spawn_random_tile(res.grid, &mut self.source);
        self.score += res.gained;
        self.moves += 1;
        debug!("move {} {direction}: +{} -> score {}", self.moves, res.gained, self.score);

        let game_over = !self.grid.has_any_move();
        if game_over {
            self.status = Status::GameOver;
            info!(
                "game over after {} moves: score {}, highest tile {}",
                self.moves,
                self.score,
                self.grid.highest_tile()
            );
        }
        StepOutcome::Moved { gained: res.gained, game_over }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Number of accepted (grid-changing) moves.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.status == Status::GameOver
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            moves: self.moves,
            score: self.score,
            highest_tile: self.grid.highest_tile(),
            status: self.status,
            grid: self.grid,
        }
    }
}
