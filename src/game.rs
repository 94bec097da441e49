use log::{debug, trace};
use rand::{rngs::SmallRng, Rng};

use crate::{
    ai::{self, MoveEfficiency},
    common::{BoardError, Direction},
    config::{INITIAL_TILES, WINNING_TILE},
    grid::{is_valid_tile, Grid, Tile},
    history::{History, Snapshot},
};

/// Serializable board state for saving or restoring games.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub grid: Grid,
    pub score: u32,
    pub max_tile: Tile,
}

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    /// A [`WINNING_TILE`] is on the board and play can still continue.
    Won,
    /// No move is possible.
    Over,
}

/// What a single move did to the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub changed: bool,
    /// Score gained from merges.
    pub reward: u32,
    /// Tile spawned after the move as (row, col, value).
    pub spawned: Option<(usize, usize, Tile)>,
}

/// Whether the live grid has been saved since it last changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveState {
    Clean,
    Dirty,
}

/// Core game logic: the live grid, score, best merge and undo history.
///
/// The engine owns its random source so tile spawns and random moves are
/// reproducible from a seed.
pub struct GameEngine<R = SmallRng> {
    grid: Grid,
    score: u32,
    max_tile: Tile,
    history: History,
    save: SaveState,
    rng: R,
}

impl<R: Rng> GameEngine<R> {
    /// Create a fresh game with two random tiles and unbounded history.
    pub fn new(rng: R) -> Self {
        Self::with_history(rng, History::new())
    }

    /// Like [`GameEngine::new`] but keeps at most `limit` undo snapshots.
    pub fn with_history_limit(rng: R, limit: usize) -> Self {
        Self::with_history(rng, History::with_limit(limit))
    }

    fn with_history(rng: R, history: History) -> Self {
        let mut engine = Self {
            grid: Grid::new(),
            score: 0,
            max_tile: 0,
            history,
            save: SaveState::Dirty,
            rng,
        };
        engine.reset();
        engine
    }

    /// Restore an engine from a previously saved state. History starts empty.
    ///
    /// Tiles and the max tile are validated. The score is taken as given; it
    /// saturates at `u32::MAX` rather than wrapping.
    pub fn from_state(state: GameState, rng: R) -> Result<Self, BoardError> {
        let grid = Grid::from_rows(state.grid.into())?;
        if !is_valid_tile(state.max_tile) {
            return Err(BoardError::InvalidMaxTile {
                value: state.max_tile,
            });
        }
        Ok(Self {
            grid,
            score: state.score,
            max_tile: state.max_tile,
            history: History::new(),
            save: SaveState::Dirty,
            rng,
        })
    }

    /// Generate a serializable snapshot of the current state.
    pub fn state(&self) -> GameState {
        GameState {
            grid: self.grid,
            score: self.score,
            max_tile: self.max_tile,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Sum of all merge rewards since the last reset, capped at `u32::MAX`.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Largest tile produced by a merge since the last reset.
    pub fn max_tile(&self) -> Tile {
        self.max_tile
    }

    /// Number of snapshots available to [`GameEngine::rollback`].
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Clear the grid, spawn the starting tiles and zero the score.
    ///
    /// History is kept, so a rollback straight after a reset brings back the
    /// board from before it.
    pub fn reset(&mut self) {
        self.grid = Grid::new();
        for _ in 0..INITIAL_TILES {
            self.grid.spawn_tile(&mut self.rng);
        }
        self.score = 0;
        self.max_tile = 0;
        self.save = SaveState::Dirty;
        debug!("board reset:\n{}", self.grid);
    }

    fn save_state(&mut self) {
        if self.save == SaveState::Dirty {
            self.history.push(Snapshot {
                grid: self.grid,
                score: self.score,
            });
            self.save = SaveState::Clean;
            trace!("snapshot saved ({} in history)", self.history.len());
        }
    }

    /// Slide every tile toward `direction`, then spawn one tile if anything
    /// moved. Pushes exactly one snapshot per call, even for a no-op.
    pub fn apply(&mut self, direction: Direction) -> MoveOutcome {
        self.save_state();
        let slide = self.grid.slide(direction);
        let mut outcome = MoveOutcome {
            changed: slide.changed,
            reward: slide.reward,
            spawned: None,
        };
        if slide.changed {
            self.score = self.score.saturating_add(slide.reward);
            if slide.largest > self.max_tile {
                self.max_tile = slide.largest;
            }
            outcome.spawned = self.grid.spawn_tile(&mut self.rng);
            debug!(
                "moved {}: +{} (score {}), spawned {:?}",
                direction, slide.reward, self.score, outcome.spawned
            );
        } else {
            debug!("move {} changed nothing", direction);
        }
        self.save = SaveState::Dirty;
        outcome
    }

    pub fn left(&mut self) -> MoveOutcome {
        self.apply(Direction::Left)
    }

    pub fn right(&mut self) -> MoveOutcome {
        self.apply(Direction::Right)
    }

    pub fn up(&mut self) -> MoveOutcome {
        self.apply(Direction::Up)
    }

    pub fn down(&mut self) -> MoveOutcome {
        self.apply(Direction::Down)
    }

    /// Restore the grid and score saved by the most recent move.
    ///
    /// Returns `false`, leaving the board untouched, when history is empty.
    /// The max tile is not rolled back.
    pub fn rollback(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                self.grid = snapshot.grid;
                self.score = snapshot.score;
                self.save = SaveState::Dirty;
                debug!("rolled back to score {}", self.score);
                true
            }
            None => {
                debug!("rollback requested with empty history");
                false
            }
        }
    }

    /// See [`Grid::can_move`].
    pub fn can_move(&self) -> bool {
        self.grid.can_move()
    }

    /// Evaluate the current game status.
    pub fn status(&self) -> GameStatus {
        if !self.can_move() {
            GameStatus::Over
        } else if self.grid.highest_tile() >= WINNING_TILE {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        }
    }

    /// Apply a uniformly chosen direction.
    pub fn random_move(&mut self) -> (Direction, MoveOutcome) {
        let direction = Direction::ALL[self.rng.random_range(0..Direction::ALL.len())];
        (direction, self.apply(direction))
    }

    /// The move [`GameEngine::auto_move`] would play, without playing it.
    pub fn advise(&self) -> MoveEfficiency {
        ai::best_move(&self.grid, self.score)
    }

    /// Play the advisor's best move.
    ///
    /// When every direction is a no-op the chosen move changes nothing and the
    /// game should be treated as over.
    pub fn auto_move(&mut self) -> (MoveEfficiency, MoveOutcome) {
        let ranked = ai::rank_moves(&self.grid, self.score);
        for eff in ranked.iter() {
            trace!(
                "{}: empty {:?}, score {}",
                eff.direction,
                eff.empty_tiles,
                eff.score
            );
        }
        let best = ranked[0];
        debug!("advisor picked {}", best.direction);
        (best, self.apply(best.direction))
    }
}
