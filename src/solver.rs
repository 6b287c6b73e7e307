//! A* search over sliding-tile boards.
//!
//! Each call builds its own frontier, closed set and node arena, so
//! independent searches share no state and may run on separate threads.
use crate::engine::{Board, Move};
use crate::error::PuzzleError;
use crate::heuristics::{Goal, Heuristic, HeuristicKind};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use tracing::debug;

/// How a search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The goal was reached in this many moves.
    Solved(usize),
    /// The frontier ran dry; the goal is unreachable from the start.
    Exhausted,
    /// The cancellation flag was raised before the search finished.
    Cancelled,
}

impl Outcome {
    pub fn path_length(&self) -> Option<usize> {
        match self {
            Outcome::Solved(len) => Some(*len),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }
}

/// Represents the result of one search.
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub outcome: Outcome,
    /// Number of successor nodes pushed onto the frontier.
    pub nodes_expanded: u64,
    /// Boards from start to goal, both included. Empty unless solved.
    pub path: Vec<Board>,
}

impl SearchResult {
    /// The blank moves that walk `path` from start to goal.
    pub fn moves(&self) -> Vec<Move> {
        self.path
            .windows(2)
            .filter_map(|pair| pair[0].move_towards(&pair[1]))
            .collect()
    }
}

/// Solves `initial` towards `goal` with one of the built-in heuristics.
///
/// # Errors
/// Returns `PuzzleError::SizeMismatch` if the boards have different sizes.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Board;
/// use npuzzle_solver::heuristics::HeuristicKind;
/// use npuzzle_solver::solver::{solve, Outcome};
///
/// let goal = Board::goal(3).unwrap();
/// let start = Board::from_rows(&[vec![1, 2, 3], vec![4, 0, 6], vec![7, 5, 8]]).unwrap();
/// let result = solve(&start, &goal, HeuristicKind::ManhattanDistance).unwrap();
/// assert_eq!(result.outcome, Outcome::Solved(2));
/// assert_eq!(result.path.len(), 3);
/// ```
pub fn solve(initial: &Board, goal: &Board, heuristic: HeuristicKind) -> Result<SearchResult, PuzzleError> {
    solve_with(initial, goal, &heuristic)
}

/// Solves `initial` towards `goal` with any `Heuristic` implementor.
pub fn solve_with<H: Heuristic + ?Sized>(
    initial: &Board,
    goal: &Board,
    heuristic: &H,
) -> Result<SearchResult, PuzzleError> {
    let never = AtomicBool::new(false);
    solve_cancellable(initial, goal, heuristic, &never)
}

/// Like `solve_with`, but checks `cancel` before every expansion and stops
/// with `Outcome::Cancelled` once it is set.
pub fn solve_cancellable<H: Heuristic + ?Sized>(
    initial: &Board,
    goal: &Board,
    heuristic: &H,
    cancel: &AtomicBool,
) -> Result<SearchResult, PuzzleError> {
    if initial.size() != goal.size() {
        return Err(PuzzleError::SizeMismatch {
            board: initial.size(),
            goal: goal.size(),
        });
    }

    let goal = Goal::new(goal.clone());
    let mut search = Search::new(initial, goal, heuristic);
    Ok(search.run(cancel))
}

struct Node {
    board: Board,
    depth: usize,
    parent: Option<usize>,
}

// Frontier entry pointing into the node arena. The max-heap pops the lowest
// priority first, then the deepest node, then the earliest insertion.
#[derive(Debug, PartialEq, Eq)]
struct FrontierEntry {
    priority: usize,
    depth: usize,
    seq: u64,
    node: usize,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| self.depth.cmp(&other.depth))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct Search<'h, H: ?Sized> {
    goal: Goal,
    heuristic: &'h H,
    nodes: Vec<Node>,
    frontier: BinaryHeap<FrontierEntry>,
    closed: HashSet<Board>,
    nodes_expanded: u64,
    next_seq: u64,
}

impl<'h, H: Heuristic + ?Sized> Search<'h, H> {
    fn new(initial: &Board, goal: Goal, heuristic: &'h H) -> Self {
        let mut search = Search {
            goal,
            heuristic,
            nodes: Vec::new(),
            frontier: BinaryHeap::new(),
            closed: HashSet::new(),
            nodes_expanded: 0,
            next_seq: 0,
        };
        search.push(initial.clone(), 0, None);
        search
    }

    fn push(&mut self, board: Board, depth: usize, parent: Option<usize>) {
        let priority = depth + self.heuristic.estimate(&board, &self.goal) as usize;
        let node = self.nodes.len();
        self.nodes.push(Node { board, depth, parent });
        self.frontier.push(FrontierEntry {
            priority,
            depth,
            seq: self.next_seq,
            node,
        });
        self.next_seq += 1;
    }

    fn run(&mut self, cancel: &AtomicBool) -> SearchResult {
        debug!(
            size = self.goal.size(),
            heuristic = self.heuristic.name(),
            estimate = self.frontier.peek().map_or(0, |e| e.priority),
            "starting A* search"
        );

        let outcome = loop {
            if cancel.load(AtomicOrdering::Relaxed) {
                break (Outcome::Cancelled, None);
            }

            let Some(entry) = self.frontier.pop() else {
                break (Outcome::Exhausted, None);
            };

            let current = &self.nodes[entry.node];
            // Stale duplicate of a board that was already expanded.
            if self.closed.contains(&current.board) {
                continue;
            }
            if current.board == *self.goal.board() {
                break (Outcome::Solved(current.depth), Some(entry.node));
            }

            let depth = current.depth + 1;
            let successors = current.board.successors();
            self.closed.insert(current.board.clone());

            for next in successors {
                if self.closed.contains(&next) {
                    continue;
                }
                self.push(next, depth, Some(entry.node));
                self.nodes_expanded += 1;
            }
        };

        let (outcome, last) = outcome;
        let path = last.map(|node| self.path_to(node)).unwrap_or_default();

        debug!(
            heuristic = self.heuristic.name(),
            ?outcome,
            nodes_expanded = self.nodes_expanded,
            closed = self.closed.len(),
            "A* search finished"
        );

        SearchResult {
            outcome,
            nodes_expanded: self.nodes_expanded,
            path,
        }
    }

    fn path_to(&self, mut node: usize) -> Vec<Board> {
        let mut path = vec![self.nodes[node].board.clone()];
        while let Some(parent) = self.nodes[node].parent {
            path.push(self.nodes[parent].board.clone());
            node = parent;
        }
        path.reverse();
        path
    }
}
