//! Commonly used types for ease of import.

pub use crate::{Direction, GameEngine, GameState, GameStatus, Grid, MoveEfficiency, MoveOutcome};
