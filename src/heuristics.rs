//! Distance estimates used to order the A* frontier.
//!
//! Every heuristic maps a `Board` to a lower bound on the number of moves
//! needed to reach the goal, and changes by at most one across a single move.
//! Those two properties are what let the solver close a board the first time
//! it is expanded.
use crate::engine::{Board, Tile, BLANK};
use crate::error::PuzzleError;
use std::fmt;
use std::str::FromStr;

/// A goal board together with the goal coordinates of every tile.
///
/// Built once per search so heuristics can look positions up instead of
/// scanning the goal grid.
#[derive(Clone, Debug)]
pub struct Goal {
    board: Board,
    positions: Vec<(usize, usize)>,
}

impl Goal {
    pub fn new(board: Board) -> Self {
        let size = board.size();
        let mut positions = vec![(0, 0); size * size];
        for (idx, &tile) in board.tiles().iter().enumerate() {
            positions[tile as usize] = (idx / size, idx % size);
        }
        Goal { board, positions }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Goal `(row, col)` of `tile`.
    ///
    /// # Panics
    /// Panics if `tile` does not belong to a board of this size.
    pub fn position_of(&self, tile: Tile) -> (usize, usize) {
        self.positions[tile as usize]
    }
}

/// A pluggable distance estimate.
pub trait Heuristic {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Lower bound on the moves needed to turn `board` into `goal`.
    fn estimate(&self, board: &Board, goal: &Goal) -> u32;
}

/// Number of tiles that are not on their goal cell. The blank is not counted.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Board;
/// use npuzzle_solver::heuristics::{misplaced_tiles, Goal};
/// let goal = Goal::new(Board::goal(3).unwrap());
/// let board = Board::from_rows(&[vec![1, 2, 3], vec![4, 0, 6], vec![7, 5, 8]]).unwrap();
/// assert_eq!(misplaced_tiles(&board, &goal), 2);
/// ```
pub fn misplaced_tiles(board: &Board, goal: &Goal) -> u32 {
    board
        .tiles()
        .iter()
        .zip(goal.board().tiles())
        .filter(|&(&tile, &target)| tile != BLANK && tile != target)
        .count() as u32
}

/// Sum over all tiles of the row and column distance to the tile's goal cell.
pub fn manhattan_distance(board: &Board, goal: &Goal) -> u32 {
    let size = board.size();
    let mut distance = 0;
    for (idx, &tile) in board.tiles().iter().enumerate() {
        if tile == BLANK {
            continue;
        }
        let (goal_r, goal_c) = goal.position_of(tile);
        distance += (idx / size).abs_diff(goal_r) + (idx % size).abs_diff(goal_c);
    }
    distance as u32
}

/// Manhattan distance plus two moves for every tile that has to leave its
/// line to let the rest of the line pass.
///
/// For each row, the tiles already in their goal row are listed left to
/// right by goal column. Tiles outside the longest increasing run of that
/// list are in conflict with the others and each needs at least two extra
/// moves. Columns are handled the same way and added independently, so a
/// tile can be charged once for its row and once for its column.
///
/// When conflicts are pairwise (the usual case on 3×3 and 4×4 boards) this is
/// exactly two moves per reversed pair. For a line like `3 2 1` it charges two
/// removals instead of three pairs, which keeps the estimate admissible.
pub fn linear_conflict(board: &Board, goal: &Goal) -> u32 {
    let size = board.size();
    let mut removals = 0;
    let mut line = Vec::with_capacity(size);

    for r in 0..size {
        line.clear();
        for c in 0..size {
            let tile = board.get_tile(r, c);
            if tile == BLANK {
                continue;
            }
            let (goal_r, goal_c) = goal.position_of(tile);
            if goal_r == r {
                line.push(goal_c);
            }
        }
        removals += line.len() - longest_increasing_run(&line);
    }

    for c in 0..size {
        line.clear();
        for r in 0..size {
            let tile = board.get_tile(r, c);
            if tile == BLANK {
                continue;
            }
            let (goal_r, goal_c) = goal.position_of(tile);
            if goal_c == c {
                line.push(goal_r);
            }
        }
        removals += line.len() - longest_increasing_run(&line);
    }

    manhattan_distance(board, goal) + 2 * removals as u32
}

// Length of the longest strictly increasing subsequence (patience sorting).
fn longest_increasing_run(keys: &[usize]) -> usize {
    let mut tails: Vec<usize> = Vec::with_capacity(keys.len());
    for &key in keys {
        let pos = tails.partition_point(|&t| t < key);
        if pos == tails.len() {
            tails.push(key);
        } else {
            tails[pos] = key;
        }
    }
    tails.len()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MisplacedTiles;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ManhattanDistance;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LinearConflict;

impl Heuristic for MisplacedTiles {
    fn name(&self) -> &'static str {
        "misplaced"
    }

    fn estimate(&self, board: &Board, goal: &Goal) -> u32 {
        misplaced_tiles(board, goal)
    }
}

impl Heuristic for ManhattanDistance {
    fn name(&self) -> &'static str {
        "manhattan"
    }

    fn estimate(&self, board: &Board, goal: &Goal) -> u32 {
        manhattan_distance(board, goal)
    }
}

impl Heuristic for LinearConflict {
    fn name(&self) -> &'static str {
        "linear-conflict"
    }

    fn estimate(&self, board: &Board, goal: &Goal) -> u32 {
        linear_conflict(board, goal)
    }
}

/// Selector for the built-in heuristics.
///
/// Parsing accepts the long names (`misplaced`, `manhattan`,
/// `linear-conflict`, case-insensitive) and the short tags `h1`, `h2`, `h3`.
/// Anything else is rejected with `PuzzleError::UnknownHeuristic`.
///
/// # Examples
/// ```
/// use npuzzle_solver::heuristics::HeuristicKind;
/// let kind: HeuristicKind = "h2".parse().unwrap();
/// assert_eq!(kind, HeuristicKind::ManhattanDistance);
/// assert!("euclid".parse::<HeuristicKind>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeuristicKind {
    MisplacedTiles,
    ManhattanDistance,
    LinearConflict,
}

impl HeuristicKind {
    /// All built-in heuristics, weakest first.
    pub const ALL: [HeuristicKind; 3] = [
        HeuristicKind::MisplacedTiles,
        HeuristicKind::ManhattanDistance,
        HeuristicKind::LinearConflict,
    ];
}

impl Heuristic for HeuristicKind {
    fn name(&self) -> &'static str {
        match self {
            HeuristicKind::MisplacedTiles => MisplacedTiles.name(),
            HeuristicKind::ManhattanDistance => ManhattanDistance.name(),
            HeuristicKind::LinearConflict => LinearConflict.name(),
        }
    }

    fn estimate(&self, board: &Board, goal: &Goal) -> u32 {
        match self {
            HeuristicKind::MisplacedTiles => misplaced_tiles(board, goal),
            HeuristicKind::ManhattanDistance => manhattan_distance(board, goal),
            HeuristicKind::LinearConflict => linear_conflict(board, goal),
        }
    }
}

impl FromStr for HeuristicKind {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h1" | "misplaced" | "misplaced-tiles" => Ok(HeuristicKind::MisplacedTiles),
            "h2" | "manhattan" | "manhattan-distance" => Ok(HeuristicKind::ManhattanDistance),
            "h3" | "linear-conflict" | "linear" => Ok(HeuristicKind::LinearConflict),
            _ => Err(PuzzleError::UnknownHeuristic(s.to_string())),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
