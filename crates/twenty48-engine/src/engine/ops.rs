use rand::Rng;

use super::state::{Direction, Exponent, Grid, Score, CELLS, SIDE};
#[cfg(test)]
use super::state::MAX_EXPONENT;

/// Slide/merge tiles in the given direction. No randomness.
///
/// Returns the new grid and the points earned: the sum of every tile
/// produced by a merge.
pub fn shift(grid: Grid, direction: Direction) -> (Grid, Score) {
    let mut cells = grid.0;
    let mut gained = 0;
    for line in 0..SIDE {
        let indices = direction.line_indices(line);
        let (merged, points) = merge_line(indices.map(|idx| cells[idx]));
        for (idx, exp) in indices.into_iter().zip(merged) {
            cells[idx] = exp;
        }
        gained += points;
    }
    (Grid(cells), gained)
}

/// Merge one line given leading edge first.
///
/// Empty cells are dropped, then equal neighbours in the compacted sequence
/// combine pairwise from the leading edge. A tile produced by a merge is
/// never merged again in the same pass, so `[2, 2, 2, 2]` becomes
/// `[4, 4, _, _]`. The result is padded with empties at the trailing end.
pub(crate) fn merge_line(line: [Exponent; SIDE]) -> ([Exponent; SIDE], Score) {
    let mut tiles = line.into_iter().filter(|&e| e != 0).peekable();
    let mut out = [0; SIDE];
    let mut len = 0;
    let mut gained = 0;
    while let Some(tile) = tiles.next() {
        out[len] = if tiles.next_if_eq(&tile).is_some() {
            gained += tile_points(tile + 1);
            tile + 1
        } else {
            tile
        };
        len += 1;
    }
    (out, gained)
}

/// Place a random tile in a uniformly chosen empty cell.
///
/// Returns the index filled, or `None` (grid untouched) when no cell is empty.
pub(crate) fn insert_random_tile<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Option<usize> {
    let empty = count_empty(grid);
    if empty == 0 {
        return None;
    }
    let nth = rng.gen_range(0..empty);
    let idx = grid.empty_cells().nth(nth)?;
    grid.0[idx] = generate_random_tile(rng);
    Some(idx)
}

/// 2 with probability 0.9, 4 otherwise (as exponents).
pub(crate) fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Exponent {
    if rng.gen_range(0..10) < 9 { 1 } else { 2 }
}

#[inline]
pub(crate) fn tile_points(exp: Exponent) -> Score {
    1 << exp
}

#[inline]
pub(crate) fn exponent_to_value(exp: Exponent) -> Option<u32> {
    (exp != 0).then(|| 1u32 << exp)
}

/// Count the number of empty cells.
pub fn count_empty(grid: &Grid) -> usize {
    CELLS - count_non_empty(grid)
}

fn count_non_empty(grid: &Grid) -> usize {
    grid.0.iter().filter(|&&e| e != 0).count()
}

pub fn highest_tile(grid: &Grid) -> u32 {
    grid.0
        .iter()
        .copied()
        .max()
        .and_then(exponent_to_value)
        .unwrap_or(0)
}

/// Sum of all tile values on the grid.
pub fn tile_sum(grid: &Grid) -> u64 {
    grid.0.iter().map(|&e| exponent_to_value(e).map_or(0, u64::from)).sum()
}

pub(crate) fn format_val(val: &u8) -> String {
    match val {
        0 => String::from("       "),
        &x => {
            let mut x = (1u64 << x).to_string();
            while x.len() < 7 {
                match x.len() {
                    6 => x = format!(" {}", x),
                    _ => x = format!(" {} ", x),
                }
            }
            x
        }
    }
}

/// Assert that `after` is `before` with disjoint pairs of equal tiles from
/// `before` replaced by their doubled value, and that `points` is the sum of
/// those doubled values. A tile produced by a merge may not merge again.
#[cfg(test)]
pub(crate) fn assert_conserved(before: &Grid, after: &Grid, points: Score) {
    let histogram = |g: &Grid| {
        let mut h = [0i64; MAX_EXPONENT as usize + 2];
        for e in g.tiles().filter(|&e| e != 0) {
            h[e as usize] += 1;
        }
        h
    };
    let (b, a) = (histogram(before), histogram(after));
    // after[e] = before[e] - 2 * merged[e] + merged[e - 1]
    let mut produced = 0;
    let mut expected_points = 0;
    for e in 1..b.len() {
        let removed = b[e] + produced - a[e];
        assert!(
            removed >= 0 && removed % 2 == 0,
            "tiles of 2^{e} not accounted for: {before:?} -> {after:?}"
        );
        let merged = removed / 2;
        assert!(
            2 * merged <= b[e],
            "merged tile of 2^{e} merged again: {before:?} -> {after:?}"
        );
        expected_points += merged as Score * tile_points(e as Exponent + 1);
        produced = merged;
    }
    assert_eq!(produced, 0, "{before:?} -> {after:?}");
    assert_eq!(points, expected_points, "{before:?} -> {after:?}");
}
