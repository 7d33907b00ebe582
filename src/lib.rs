//! tiles-2048: a pure 2048 board engine
//!
//! This crate provides:
//! - A `Grid` value type and the slide/merge transforms (`engine` module)
//! - Tile spawning through an injected `TileSource` (any `rand::Rng` works)
//! - A `Game` state machine that keeps score and detects game over (`game` module)
//! - Simple move policies for headless play (`policy` module)
//!
//! Quick start:
//! ```
//! use tiles_2048::engine::{self, Grid, Move};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic start with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let g0 = engine::initial_grid(&mut rng);
//! let res = engine::apply_move(g0, Move::Left);
//! let g1 = if res.moved { engine::spawn_random_tile(res.grid, &mut rng) } else { g0 };
//! assert!(g1.count_empty() <= 14);
//! assert!(engine::has_any_move(&g1));
//! ```
//!
//! Full loop
//! ```
//! use tiles_2048::game::Game;
//! use tiles_2048::policy::{Greedy, Policy};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut game = Game::new(StdRng::seed_from_u64(123));
//! let mut policy = Greedy;
//! let mut moves = 0;
//! while !game.is_over() && moves < 8 {
//!     match policy.next_move(&game.grid()) {
//!         Some(dir) => {
//!             game.step(dir);
//!             moves += 1;
//!         }
//!         None => break,
//!     }
//! }
//! assert_eq!(game.moves(), moves);
//! ```
//!
pub mod config;
pub mod engine;
pub mod game;
pub mod policy;
