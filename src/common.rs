//! Common types for the puzzle: move directions and board errors.

use core::fmt;
use core::str::FromStr;

/// Direction in which all tiles slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Every direction, in the order the advisor prefers them on a tie.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Clockwise quarter turns that bring this direction's edge to the left,
    /// so the move reduces to a left slide.
    pub const fn turns(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Down => 1,
            Direction::Right => 2,
            Direction::Up => 3,
        }
    }

    /// Quarter turns that undo [`Direction::turns`].
    pub const fn restoring_turns(self) -> usize {
        (4 - self.turns()) % 4
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Direction {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALIASES
            .iter()
            .find(|(alias, _)| s.eq_ignore_ascii_case(alias))
            .map(|&(_, dir)| dir)
            .ok_or(BoardError::UnknownDirection)
    }
}

// Full names plus single-key shortcuts (arrow initials and WASD).
const ALIASES: [(&str, Direction); 11] = [
    ("left", Direction::Left),
    ("l", Direction::Left),
    ("a", Direction::Left),
    ("right", Direction::Right),
    ("r", Direction::Right),
    ("d", Direction::Right),
    ("up", Direction::Up),
    ("u", Direction::Up),
    ("w", Direction::Up),
    ("down", Direction::Down),
    ("s", Direction::Down),
];

/// Errors returned when building board state from outside data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Cell holds a value that is neither empty nor a power of two in `2..=MAX_TILE`.
    InvalidTileValue { row: usize, col: usize, value: u32 },
    /// Restored max tile is neither `0` nor a valid tile value.
    InvalidMaxTile { value: u32 },
    /// Direction name not recognised.
    UnknownDirection,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidTileValue { row, col, value } => write!(
                f,
                "Invalid tile value {} at row {}, col {}",
                value, row, col
            ),
            BoardError::InvalidMaxTile { value } => {
                write!(f, "Invalid max tile {}", value)
            }
            BoardError::UnknownDirection => {
                write!(f, "Unknown direction (expected left, right, up or down)")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
