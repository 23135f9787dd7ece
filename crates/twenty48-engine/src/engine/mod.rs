//! Engine module: the 4x4 grid, the move/merge rules, tile spawning and the
//! `GridEngine` session that ties them to a score and a random source.
//!
//! - `Grid` is the plain 16-cell state with pure helpers (`shift`, ...).
//! - `GridEngine` owns one game: grid, score and injected RNG.
//! - Free functions mirror the grid methods when convenient.

mod game;
mod ops;
pub mod state;

pub use game::GridEngine;
pub use state::{Direction, Grid, Score, TilesIter, CELLS, MAX_EXPONENT, SIDE};

pub use ops::{count_empty, highest_tile, shift, tile_sum};
