//! The 4×4 tile grid and the row primitives every move is built from.
//!
//! A move in any direction is a left slide on a rotated grid: the grid is
//! turned clockwise until the target edge sits on the left, every row is
//! compressed and merged, and the grid is turned back. All storage is inline
//! and `Copy`, so a snapshot is always a deep copy.

use core::fmt;

use crate::common::{BoardError, Direction};
use crate::config::{FIELD_WIDTH, MAX_TILE, SPAWN_FOUR_PROBABILITY};
use rand::Rng;

/// Value of a single cell; `0` is empty.
pub type Tile = u32;

/// One row of the grid, index 0 being the left edge.
pub type Row = [Tile; FIELD_WIDTH];

/// Returns `true` for values a cell may hold: empty or a power of two in
/// `2..=MAX_TILE`. Merging two such tiles cannot overflow a `u32`.
pub fn is_valid_tile(value: Tile) -> bool {
    value == 0 || (2..=MAX_TILE).contains(&value) && value.is_power_of_two()
}

/// Outcome of merging a single row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeResult {
    /// At least one pair was combined.
    pub merged: bool,
    /// Sum of every tile produced by a merge.
    pub reward: u32,
    /// Largest tile produced by a merge, `0` if none.
    pub largest: Tile,
}

/// Outcome of sliding the whole grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlideResult {
    /// Some row was compressed or merged.
    pub changed: bool,
    pub reward: u32,
    pub largest: Tile,
}

/// Shift every non-empty tile toward index 0, keeping their order.
///
/// Runs `FIELD_WIDTH - 1` single-step passes, enough for a tile to travel the
/// whole row. Returns `true` if any cell changed.
pub fn compress(row: &mut Row) -> bool {
    let mut changed = false;
    for _ in 0..FIELD_WIDTH - 1 {
        for i in 0..FIELD_WIDTH - 1 {
            if row[i] == 0 && row[i + 1] > 0 {
                row[i] = row[i + 1];
                row[i + 1] = 0;
                changed = true;
            }
        }
    }
    changed
}

/// Combine equal neighbours left to right in a single pass, then compress.
///
/// A merged tile leaves an empty cell to its right, so it can never take part
/// in a second merge during the same call: `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`.
pub fn merge(row: &mut Row) -> MergeResult {
    let mut result = MergeResult::default();
    for i in 0..FIELD_WIDTH - 1 {
        if row[i] != 0 && row[i] == row[i + 1] {
            row[i] *= 2;
            row[i + 1] = 0;
            result.merged = true;
            result.reward += row[i];
            result.largest = result.largest.max(row[i]);
        }
    }
    compress(row);
    result
}

/// Fixed-size grid of tiles stored row-major.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    cells: [Row; FIELD_WIDTH],
}

impl Grid {
    /// Create an all-empty grid.
    pub const fn new() -> Self {
        Self {
            cells: [[0; FIELD_WIDTH]; FIELD_WIDTH],
        }
    }

    /// Build a grid from explicit rows, rejecting impossible tile values.
    pub fn from_rows(rows: [Row; FIELD_WIDTH]) -> Result<Self, BoardError> {
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(BoardError::InvalidTileValue { row: r, col: c, value });
                }
            }
        }
        Ok(Self { cells: rows })
    }

    /// Read-only view of all rows.
    pub fn rows(&self) -> &[Row; FIELD_WIDTH] {
        &self.cells
    }

    /// Value at (`row`, `col`).
    ///
    /// # Panics
    /// If either index is `>= FIELD_WIDTH`.
    pub fn get(&self, row: usize, col: usize) -> Tile {
        self.cells[row][col]
    }

    /// Coordinates of every empty cell in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &v)| v == 0)
                .map(move |(c, _)| (r, c))
        })
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v == 0).count()
    }

    /// Largest tile currently on the grid.
    pub fn highest_tile(&self) -> Tile {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Place a 2 (or, with probability [`SPAWN_FOUR_PROBABILITY`], a 4) in a
    /// uniformly chosen empty cell. Returns the placement, or `None` when the
    /// grid is full.
    pub fn spawn_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<(usize, usize, Tile)> {
        let count = self.empty_count();
        if count == 0 {
            return None;
        }
        let (r, c) = self.empty_cells().nth(rng.random_range(0..count))?;
        let value = if rng.random_bool(SPAWN_FOUR_PROBABILITY) { 4 } else { 2 };
        self.cells[r][c] = value;
        Some((r, c, value))
    }

    /// Rotate the grid 90° clockwise in place, one ring at a time.
    pub fn rotate_clockwise(&mut self) {
        const N: usize = FIELD_WIDTH;
        let a = &mut self.cells;
        for i in 0..N / 2 {
            for j in i..N - i - 1 {
                let temp = a[i][j];
                a[i][j] = a[N - 1 - j][i];
                a[N - 1 - j][i] = a[N - 1 - i][N - 1 - j];
                a[N - 1 - i][N - 1 - j] = a[j][N - 1 - i];
                a[j][N - 1 - i] = temp;
            }
        }
    }

    /// Apply [`Grid::rotate_clockwise`] `turns` times.
    pub fn rotate_clockwise_times(&mut self, turns: usize) {
        for _ in 0..turns % 4 {
            self.rotate_clockwise();
        }
    }

    /// Compress and merge every row toward the left edge. Does not spawn.
    pub fn slide_left(&mut self) -> SlideResult {
        let mut result = SlideResult::default();
        for row in self.cells.iter_mut() {
            // both primitives must run even when compress already moved tiles
            let compressed = compress(row);
            let merged = merge(row);
            if compressed || merged.merged {
                result.changed = true;
            }
            result.reward += merged.reward;
            result.largest = result.largest.max(merged.largest);
        }
        result
    }

    /// Slide toward `direction`. The grid ends in its original orientation.
    pub fn slide(&mut self, direction: Direction) -> SlideResult {
        self.rotate_clockwise_times(direction.turns());
        let result = self.slide_left();
        self.rotate_clockwise_times(direction.restoring_turns());
        result
    }

    /// `false` only when the grid is full and no scanned neighbours match.
    ///
    /// Horizontal pairs are checked in every row but the last, vertical pairs
    /// in every column but the last. A matching pair confined to the bottom
    /// row or the rightmost column is not detected.
    pub fn can_move(&self) -> bool {
        if self.empty_count() > 0 {
            return true;
        }
        let a = &self.cells;
        for i in 0..FIELD_WIDTH - 1 {
            for j in 0..FIELD_WIDTH - 1 {
                if a[i][j] == a[i][j + 1] {
                    return true;
                }
            }
        }
        for i in 0..FIELD_WIDTH - 1 {
            for j in 0..FIELD_WIDTH - 1 {
                if a[j][i] == a[j + 1][i] {
                    return true;
                }
            }
        }
        false
    }
}

impl From<Grid> for [Row; FIELD_WIDTH] {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.cells.iter()).finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            for &value in row.iter() {
                if value == 0 {
                    write!(f, "{:>6}", ".")?;
                } else {
                    write!(f, "{:>6}", value)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
