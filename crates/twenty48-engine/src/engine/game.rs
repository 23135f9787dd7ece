use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::ops;
use super::state::{Direction, Grid, Score, CELLS};

/// A single game session: the grid, the running score and the random source
/// used for spawns.
///
/// Every engine owns its own state, so independent games (and tests) never
/// interfere. Calls are synchronous and must be serialized by the caller.
#[derive(Debug, Clone)]
pub struct GridEngine<R = StdRng> {
    grid: Grid,
    score: Score,
    rng: R,
}

impl GridEngine<StdRng> {
    /// Start a game driven by a seeded `StdRng`.
    ///
    /// ```
    /// use twenty48_engine::engine::GridEngine;
    /// let a = GridEngine::from_seed(42);
    /// let b = GridEngine::from_seed(42);
    /// assert_eq!(a.grid(), b.grid());
    /// assert_eq!(a.board().count_empty(), 14);
    /// ```
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GridEngine<R> {
    /// Start a game: empty grid, score 0, two spawned tiles.
    pub fn new(rng: R) -> Self {
        let mut engine = Self::with_grid(Grid::EMPTY, rng);
        engine.reset();
        engine
    }

    /// Wrap an existing grid with score 0. Nothing is spawned.
    pub fn with_grid(grid: Grid, rng: R) -> Self {
        GridEngine {
            grid,
            score: 0,
            rng,
        }
    }

    /// Clear the grid, zero the score and spawn the two opening tiles.
    pub fn reset(&mut self) {
        self.grid = Grid::EMPTY;
        self.score = 0;
        self.spawn_tile();
        self.spawn_tile();
        debug!("reset: {:?}", self.grid);
    }

    /// Put a 2 (90%) or 4 (10%) into a uniformly chosen empty cell.
    ///
    /// Returns the filled index. On a full grid nothing changes and `None` is
    /// returned; deciding whether the game is over is up to the caller.
    pub fn spawn_tile(&mut self) -> Option<usize> {
        let spawned = ops::insert_random_tile(&mut self.grid, &mut self.rng);
        match spawned {
            Some(idx) => trace!("spawned {:?} at {idx}", self.grid.tile_value(idx)),
            None => trace!("spawn skipped: grid full"),
        }
        spawned
    }

    /// Slide and merge every line towards `direction`.
    ///
    /// Adds the value of each merged tile to the score and returns whether any
    /// cell changed. A `false` return leaves grid and score untouched.
    ///
    /// ```
    /// use twenty48_engine::engine::{Direction, Grid, GridEngine};
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let grid = Grid::from_values([2, 2, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// let mut engine = GridEngine::with_grid(grid, StdRng::seed_from_u64(1));
    /// assert!(engine.shift(Direction::Left));
    /// assert_eq!(&engine.grid()[..4], &[Some(4), Some(4), None, None]);
    /// assert_eq!(engine.score(), 8);
    /// assert!(!engine.shift(Direction::Up));
    /// ```
    pub fn shift(&mut self, direction: Direction) -> bool {
        let (next, gained) = ops::shift(self.grid, direction);
        if next == self.grid {
            trace!("shift {direction:?}: no change");
            return false;
        }
        self.grid = next;
        self.score += gained;
        trace!("shift {direction:?}: +{gained} (score {})", self.score);
        true
    }

    /// Shift, then spawn a tile only if the shift changed the grid.
    ///
    /// This is the full turn a UI performs per key press or swipe.
    pub fn make_move(&mut self, direction: Direction) -> bool {
        let moved = self.shift(direction);
        if moved {
            self.spawn_tile();
        }
        moved
    }

    /// The 16 cells as tile values, row-major; `None` for empty cells.
    #[inline]
    pub fn grid(&self) -> [Option<u32>; CELLS] {
        self.grid.values()
    }

    /// Borrow the underlying grid.
    #[inline]
    pub fn board(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ops::{assert_conserved, tile_sum};

    fn engine(values: [u32; CELLS]) -> GridEngine {
        GridEngine::with_grid(Grid::from_values(values), StdRng::seed_from_u64(99))
    }

    fn row(values: [u32; 4]) -> [u32; CELLS] {
        let mut cells = [0; CELLS];
        cells[..4].copy_from_slice(&values);
        cells
    }

    #[test]
    fn new_game_has_two_tiles() {
        for seed in 0..50 {
            let game = GridEngine::from_seed(seed);
            assert_eq!(game.score(), 0);
            let tiles: Vec<u32> = game.grid().iter().flatten().copied().collect();
            assert_eq!(tiles.len(), 2);
            assert!(tiles.iter().all(|&v| v == 2 || v == 4));
        }
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut game = engine(row([8, 8, 4, 4]));
        assert!(game.shift(Direction::Left));
        assert!(game.score() > 0);
        game.reset();
        assert_eq!(game.score(), 0);
        assert_eq!(game.board().count_empty(), 14);
    }

    #[test]
    fn left_merges_pairs_and_scores() {
        let mut game = engine(row([2, 2, 4, 4]));
        assert!(game.shift(Direction::Left));
        assert_eq!(game.grid(), Grid::from_values(row([4, 8, 0, 0])).values());
        assert_eq!(game.score(), 12);
    }

    #[test]
    fn no_chain_merging() {
        let mut game = engine(row([2, 2, 2, 2]));
        assert!(game.shift(Direction::Left));
        assert_eq!(game.grid(), Grid::from_values(row([4, 4, 0, 0])).values());
        assert_eq!(game.score(), 8);
    }

    #[test]
    fn compaction_without_merge() {
        let mut game = engine(row([0, 2, 0, 4]));
        assert!(game.shift(Direction::Left));
        assert_eq!(game.grid(), Grid::from_values(row([2, 4, 0, 0])).values());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn merge_of_eights_scores_sixteen() {
        let mut game = engine(row([0, 8, 0, 8]));
        assert!(game.shift(Direction::Right));
        assert_eq!(game.grid(), Grid::from_values(row([0, 0, 0, 16])).values());
        assert_eq!(game.score(), 16);
    }

    #[test]
    fn vertical_moves_use_columns() {
        let mut cells = [0; CELLS];
        cells[1] = 2;
        cells[9] = 2;
        cells[13] = 4;
        let mut game = engine(cells);
        assert!(game.shift(Direction::Down));
        let mut expected = [0; CELLS];
        expected[9] = 4;
        expected[13] = 4;
        assert_eq!(game.grid(), Grid::from_values(expected).values());

        assert!(game.shift(Direction::Up));
        let mut expected = [0; CELLS];
        expected[1] = 8;
        assert_eq!(game.grid(), Grid::from_values(expected).values());
        assert_eq!(game.score(), 4 + 8);
    }

    #[test]
    fn noop_move_changes_nothing() {
        let mut game = engine(row([2, 4, 8, 16]));
        let before = *game.board();
        for dir in [Direction::Left, Direction::Right, Direction::Up] {
            assert!(!game.shift(dir), "{dir:?}");
            assert_eq!(*game.board(), before);
            assert_eq!(game.score(), 0);
        }
        assert!(game.shift(Direction::Down));
    }

    #[test]
    fn moves_conserve_tile_multiset() {
        let mut game = GridEngine::from_seed(2024);
        for step in 0..500 {
            let dir = Direction::ALL[(step * 7 + step / 3) % 4];
            let before = *game.board();
            let score_before = game.score();
            if game.shift(dir) {
                assert_conserved(&before, game.board(), game.score() - score_before);
                assert_eq!(tile_sum(game.board()), tile_sum(&before));
                game.spawn_tile();
            } else if game.board().count_empty() == 0 {
                game.reset();
            }
        }
    }

    #[test]
    fn spawn_fills_exactly_one_empty_cell() {
        let mut game = engine(row([2, 4, 0, 8]));
        for _ in 0..13 {
            let before = *game.board();
            let idx = game.spawn_tile().expect("room left");
            assert_eq!(before.tile_value(idx), None);
            assert!(matches!(game.board().tile_value(idx), Some(2 | 4)));
            let changed = (0..CELLS)
                .filter(|&i| before.tile_value(i) != game.board().tile_value(i))
                .count();
            assert_eq!(changed, 1);
        }
        assert_eq!(game.board().count_empty(), 0);
    }

    #[test]
    fn spawn_on_full_grid_is_noop() {
        let full: [u32; CELLS] = std::array::from_fn(|i| if (i / 4 + i) % 2 == 0 { 2 } else { 4 });
        let mut game = engine(full);
        let before = *game.board();
        assert_eq!(game.spawn_tile(), None);
        assert_eq!(*game.board(), before);
    }

    #[test]
    fn spawn_favours_twos() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut fours = 0;
        let trials = 10_000;
        for _ in 0..trials {
            let mut game = GridEngine::with_grid(Grid::EMPTY, &mut rng);
            let idx = game.spawn_tile().expect("empty grid");
            if game.board().tile_value(idx) == Some(4) {
                fours += 1;
            }
        }
        assert!((800..1200).contains(&fours), "fours = {fours}");
    }

    #[test]
    fn make_move_spawns_only_on_change() {
        let mut game = engine(row([2, 4, 8, 16]));
        assert!(!game.make_move(Direction::Left));
        assert_eq!(game.board().count_empty(), 12);
        assert!(game.make_move(Direction::Down));
        assert_eq!(game.board().count_empty(), 11);
    }

    #[test]
    fn same_seed_same_game() {
        let mut a = GridEngine::from_seed(11);
        let mut b = GridEngine::from_seed(11);
        for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down].repeat(10) {
            assert_eq!(a.make_move(dir), b.make_move(dir));
        }
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.score(), b.score());
    }

    #[test]
    fn engines_are_independent() {
        let mut a = engine(row([2, 2, 0, 0]));
        let b = engine(row([2, 2, 0, 0]));
        a.shift(Direction::Left);
        assert_eq!(a.score(), 4);
        assert_eq!(b.score(), 0);
        assert_eq!(b.grid(), Grid::from_values(row([2, 2, 0, 0])).values());
    }
}
