//! Move-choosing policies for headless play.
//!
//! A policy only ever returns a direction that changes the grid, and returns
//! `None` when no such direction exists.

use clap::ValueEnum;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{Grid, Move};

pub trait Policy {
    fn next_move(&mut self, grid: &Grid) -> Option<Move>;
}

/// One-ply lookahead: take the move with the biggest merge, then the one that
/// leaves the most empty cells. Ties go to the earlier entry of [`Move::ALL`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl Policy for Greedy {
    fn next_move(&mut self, grid: &Grid) -> Option<Move> {
        let mut best: Option<(Move, (u64, usize))> = None;
        for dir in Move::ALL {
            let res = grid.shift(dir);
            if !res.moved {
                continue;
            }
            let key = (res.gained, res.grid.count_empty());
            match best {
                Some((_, best_key)) if best_key >= key => {}
                _ => best = Some((dir, key)),
            }
        }
        best.map(|(dir, _)| dir)
    }
}

/// Uniformly random among the directions that change the grid.
#[derive(Debug, Clone)]
pub struct RandomMoves<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomMoves<R> {
    pub fn new(rng: R) -> Self {
        RandomMoves { rng }
    }
}

impl<R: Rng> Policy for RandomMoves<R> {
    fn next_move(&mut self, grid: &Grid) -> Option<Move> {
        let legal: Vec<Move> = Move::ALL.into_iter().filter(|&d| grid.shift(d).moved).collect();
        legal.choose(&mut self.rng).copied()
    }
}

/// Policy selector used by configuration and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    #[default]
    Greedy,
    Random,
}

impl PolicyKind {
    /// Build the policy; `rng` is only consumed by `Random`.
    pub fn build<R: Rng + 'static>(self, rng: R) -> Box<dyn Policy> {
        match self {
            PolicyKind::Greedy => Box::new(Greedy),
            PolicyKind::Random => Box::new(RandomMoves::new(rng)),
        }
    }
}
