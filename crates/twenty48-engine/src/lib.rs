//! twenty48-engine: the core of a 4x4 sliding-tile merge puzzle
//!
//! This crate provides:
//! - A `Grid` type holding the 16 cells, with pure move/merge operations
//! - A `GridEngine` that owns one game session (grid, score, random source)
//! - Input helpers mapping key names and swipe gestures to a `Direction` (`input` module)
//!
//! Quick start:
//! ```
//! use twenty48_engine::engine::{Direction, GridEngine};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic game with a seeded RNG; two tiles are already placed
//! let mut game = GridEngine::new(StdRng::seed_from_u64(42));
//!
//! // A UI calls `make_move` per key press and redraws only when it returns true
//! if game.make_move(Direction::Left) {
//!     println!("{}", game.board());
//! }
//! assert_eq!(game.grid().len(), 16);
//! ```
//!
//! Input translation, as a touch UI would use it:
//! ```
//! use twenty48_engine::engine::Direction;
//!
//! assert_eq!(Direction::from_swipe(-80.0, 12.0), Some(Direction::Left));
//! assert_eq!(Direction::from_key("ArrowDown").unwrap(), Direction::Down);
//! ```
//!
pub mod engine;
pub mod input;
