//! # N-Puzzle Solver Library
//!
//! This library solves N×N sliding-tile puzzles (8-puzzle, 15-puzzle and
//! larger) with A* search under interchangeable heuristics.
//!
//! It is used by two binaries:
//! - `ai_solver`: Reads a board from a file and solves it with a chosen heuristic.
//! - `heuristic_evaluator`: Generates seeded puzzles and runs every heuristic
//!   on each of them in parallel, logging path length and nodes expanded.
//!
//! ## Modules
//! - `engine`: The board representation (`Board`), blank moves (`Move`), the
//!   successor generator and the solvability test.
//! - `heuristics`: The `Heuristic` trait, the misplaced-tiles, Manhattan-distance
//!   and linear-conflict estimates, and the `HeuristicKind` selector.
//! - `solver`: The A* search (`solve`, `solve_with`, `solve_cancellable`).
//! - `utils`: Board parsing from text and logging setup.
//! - `error`: The `PuzzleError` type.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod solver;
pub mod utils;

pub use engine::{is_solvable, successors, Board, Move, BLANK};
pub use error::PuzzleError;
pub use heuristics::{Goal, Heuristic, HeuristicKind};
pub use solver::{solve, solve_cancellable, solve_with, Outcome, SearchResult};
