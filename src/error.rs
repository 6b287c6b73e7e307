//! Error type shared by board construction, parsing and search entry points.
//!
//! Running out of frontier is not an error: it is reported through
//! [`crate::solver::Outcome::Exhausted`].

use thiserror::Error;

/// Everything that can go wrong before a search starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("board has no rows")]
    EmptyBoard,

    #[error("row {row} has {len} cells, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },

    #[error("board side {size} is too large (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("tile {tile} is out of range, expected 0..={max}")]
    TileOutOfRange { tile: usize, max: usize },

    #[error("tile {tile} appears more than once")]
    DuplicateTile { tile: u16 },

    #[error("board is {board}x{board} but goal is {goal}x{goal}")]
    SizeMismatch { board: usize, goal: usize },

    #[error("unknown heuristic '{0}', expected one of: misplaced, manhattan, linear-conflict")]
    UnknownHeuristic(String),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}
