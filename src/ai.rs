// One-ply move advisor.
// Every candidate is played on a scratch copy of the grid, so evaluation never
// touches the live board, its history or its random source.

use core::cmp::Ordering;

use crate::{common::Direction, grid::Grid};

/// Quality of a single candidate move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEfficiency {
    pub direction: Direction,
    /// Empty cells left once the move and its tile spawn are done, or `None`
    /// when the move would not change the grid.
    pub empty_tiles: Option<usize>,
    /// Total score after the move; `0` for a move that changes nothing.
    pub score: u32,
}

impl MoveEfficiency {
    fn noop(direction: Direction) -> Self {
        Self {
            direction,
            empty_tiles: None,
            score: 0,
        }
    }

    /// `true` when the move would leave the grid untouched.
    pub fn is_noop(&self) -> bool {
        self.empty_tiles.is_none()
    }

    /// Compare by empty cells, then by resulting score. A no-op ranks below
    /// every real move.
    pub fn cmp_quality(&self, other: &Self) -> Ordering {
        self.empty_tiles
            .cmp(&other.empty_tiles)
            .then(self.score.cmp(&other.score))
    }
}

/// Play `direction` on a copy of `grid` and measure the result.
pub fn evaluate_move(grid: &Grid, score: u32, direction: Direction) -> MoveEfficiency {
    let mut scratch = *grid;
    let slide = scratch.slide(direction);
    if scratch == *grid {
        return MoveEfficiency::noop(direction);
    }
    // a real move always frees a cell, and the spawn that follows fills one
    MoveEfficiency {
        direction,
        empty_tiles: Some(scratch.empty_count().saturating_sub(1)),
        score: score.saturating_add(slide.reward),
    }
}

/// Evaluations for every direction, in [`Direction::ALL`] order.
pub fn evaluate_all(grid: &Grid, score: u32) -> [MoveEfficiency; 4] {
    Direction::ALL.map(|dir| evaluate_move(grid, score, dir))
}

/// Evaluations sorted best first. Equal quality keeps [`Direction::ALL`] order.
pub fn rank_moves(grid: &Grid, score: u32) -> [MoveEfficiency; 4] {
    let mut ranked = evaluate_all(grid, score);
    ranked.sort_by(|a, b| b.cmp_quality(a));
    ranked
}

/// The advisor's pick. Is a no-op only when every direction is.
pub fn best_move(grid: &Grid, score: u32) -> MoveEfficiency {
    rank_moves(grid, score)[0]
}
