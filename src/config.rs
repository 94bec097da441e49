pub const FIELD_WIDTH: usize = 4;
pub const NUM_CELLS: usize = FIELD_WIDTH * FIELD_WIDTH;

/// Tiles spawned by a fresh board or a reset.
pub const INITIAL_TILES: usize = 2;

/// Chance that a spawned tile is a 4 rather than a 2.
pub const SPAWN_FOUR_PROBABILITY: f64 = 0.1;

/// Largest tile a 4×4 game can build (`2^17`); restored boards may not exceed it.
pub const MAX_TILE: u32 = 1 << 17;

/// Tile value reported as a win by [`crate::GameStatus`].
pub const WINNING_TILE: u32 = 2048;
