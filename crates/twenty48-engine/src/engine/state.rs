use rand::Rng;
use std::fmt;

use super::ops;
use serde::{Deserialize, Serialize};

/// Tile exponent stored per cell: 0 for empty, n for a tile of value 2^n.
pub(crate) type Exponent = u8;
pub type Score = u64;

/// Number of cells on the 4x4 grid.
pub const CELLS: usize = 16;
/// Cells per row/column.
pub const SIDE: usize = 4;
/// Largest exponent a 4x4 grid can reach (tile 131072).
pub const MAX_EXPONENT: u8 = 17;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Cell indices of line `line` (0..4), leading edge first.
    ///
    /// Lines are rows for `Left`/`Right` and columns for `Up`/`Down`. The
    /// first index is the cell tiles are pushed towards, so writing a merged
    /// line back through the same indices restores spatial order.
    ///
    /// ```
    /// use twenty48_engine::engine::Direction;
    /// assert_eq!(Direction::Left.line_indices(1), [4, 5, 6, 7]);
    /// assert_eq!(Direction::Right.line_indices(1), [7, 6, 5, 4]);
    /// assert_eq!(Direction::Up.line_indices(2), [2, 6, 10, 14]);
    /// assert_eq!(Direction::Down.line_indices(2), [14, 10, 6, 2]);
    /// ```
    #[inline]
    pub fn line_indices(self, line: usize) -> [usize; SIDE] {
        debug_assert!(line < SIDE, "line index out of range: {line}");
        let line = line as isize;
        let (start, step): (isize, isize) = match self {
            Direction::Left => (4 * line, 1),
            Direction::Right => (4 * line + 3, -1),
            Direction::Up => (line, 4),
            Direction::Down => (12 + line, -4),
        };
        std::array::from_fn(|k| (start + step * k as isize) as usize)
    }
}

/// The 4x4 grid as 16 tile exponents in row-major order.
///
/// Index `row * 4 + col`. Public methods speak in tile values (2, 4, 8, ...)
/// while the exponent form stays available for compact inspection.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Grid(pub(crate) [Exponent; CELLS]);

impl Grid {
    /// A constant empty grid.
    pub const EMPTY: Grid = Grid([0; CELLS]);

    /// Construct a `Grid` from exponents (0 = empty, n = 2^n).
    ///
    /// # Panics
    ///
    /// Panics if any exponent exceeds [`MAX_EXPONENT`].
    #[inline]
    pub fn from_exponents(exponents: [u8; CELLS]) -> Self {
        if let Some(&e) = exponents.iter().find(|&&e| e > MAX_EXPONENT) {
            panic!("tile exponent must be at most {MAX_EXPONENT}, got {e}");
        }
        Grid(exponents)
    }

    /// Construct a `Grid` from tile values, 0 meaning empty.
    ///
    /// # Panics
    ///
    /// Panics if any non-zero value is not a power of two of at least 2, or
    /// exceeds `2^MAX_EXPONENT`.
    ///
    /// ```
    /// use twenty48_engine::engine::Grid;
    /// let g = Grid::from_values([2, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2048]);
    /// assert_eq!(g.tile_value(3), Some(4));
    /// assert_eq!(g.highest_tile(), 2048);
    /// ```
    pub fn from_values(values: [u32; CELLS]) -> Self {
        Grid::from_exponents(values.map(|v| {
            assert!(
                v == 0 || (v >= 2 && v.is_power_of_two()),
                "tile value must be a power of two >= 2, got {v}"
            );
            if v == 0 { 0 } else { v.trailing_zeros() as Exponent }
        }))
    }

    /// Borrow the raw exponents.
    #[inline]
    pub fn exponents(&self) -> &[u8; CELLS] {
        &self.0
    }

    /// Tile value at `idx` (row-major, 0..16), `None` if the cell is empty.
    #[inline]
    pub fn tile_value(&self, idx: usize) -> Option<u32> {
        ops::exponent_to_value(self.0[idx])
    }

    /// All 16 cells as optional tile values, row-major.
    #[inline]
    pub fn values(&self) -> [Option<u32>; CELLS] {
        self.0.map(ops::exponent_to_value)
    }

    /// Count the number of empty cells.
    #[inline]
    pub fn count_empty(&self) -> usize {
        ops::count_empty(self)
    }

    /// Indices of empty cells in ascending order.
    #[inline]
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &e)| e == 0)
            .map(|(idx, _)| idx)
    }

    /// Highest tile value on the grid, 0 when empty.
    #[inline]
    pub fn highest_tile(&self) -> u32 {
        ops::highest_tile(self)
    }

    /// Return the grid after sliding/merging in `dir`, with the points scored.
    /// No randomness.
    ///
    /// ```
    /// use twenty48_engine::engine::{Direction, Grid};
    /// let g = Grid::from_values([2, 2, 4, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// let (next, points) = g.shift(Direction::Left);
    /// assert_eq!(&next.values()[..4], &[Some(4), Some(8), None, None]);
    /// assert_eq!(points, 12);
    /// ```
    #[inline]
    pub fn shift(self, dir: Direction) -> (Self, Score) {
        ops::shift(self, dir)
    }

    /// Insert a random 2 (90%) or 4 (10%) tile into a random empty cell,
    /// using the provided RNG. A full grid is returned unchanged.
    ///
    /// ```
    /// use twenty48_engine::engine::Grid;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let g = Grid::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(g.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        ops::insert_random_tile(&mut self, rng);
        self
    }

    /// Iterate over tile exponents in row-major order.
    #[inline]
    pub fn tiles(&self) -> TilesIter<'_> {
        TilesIter {
            cells: &self.0,
            idx: 0,
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Grid").field(&self.values()).finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(4 * 7 + 3);
        for (row, cells) in self.0.chunks(SIDE).enumerate() {
            if row > 0 {
                writeln!(f, "{rule}")?;
            }
            let line: Vec<String> = cells.iter().map(ops::format_val).collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

impl From<[u8; CELLS]> for Grid {
    fn from(v: [u8; CELLS]) -> Self {
        Grid::from_exponents(v)
    }
}

/// Iterator over grid tiles (exponents) in row-major order.
pub struct TilesIter<'a> {
    cells: &'a [Exponent; CELLS],
    idx: usize,
}

impl Iterator for TilesIter<'_> {
    type Item = u8;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let n = *self.cells.get(self.idx)?;
        self.idx += 1;
        Some(n)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = CELLS.saturating_sub(self.idx);
        (left, Some(left))
    }
}

impl ExactSizeIterator for TilesIter<'_> {}

impl<'a> IntoIterator for &'a Grid {
    type Item = u8;
    type IntoIter = TilesIter<'a>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}
