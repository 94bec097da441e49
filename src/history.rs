//! Undo history: a stack of (grid, score) snapshots.

use alloc::collections::VecDeque;

use crate::grid::Grid;

/// Saved copy of the board used to roll a move back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub grid: Grid,
    pub score: u32,
}

/// Last-in first-out store of snapshots.
///
/// Unbounded unless built with [`History::with_limit`]; when a limit is set
/// the oldest snapshot is discarded to make room for a new one.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: VecDeque<Snapshot>,
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// History keeping at most `limit` snapshots. A limit of `0` keeps none.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: Some(limit),
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        match self.limit {
            Some(0) => return,
            Some(limit) if self.entries.len() >= limit => {
                self.entries.pop_front();
            }
            _ => {}
        }
        self.entries.push_back(snapshot);
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
