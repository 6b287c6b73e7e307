//! Board representation for N×N sliding-tile puzzles.
//!
//! This module defines the puzzle's fundamental components:
//! - `Board`: an immutable grid of tiles with a cached blank position.
//! - `Move`: the four directions the blank can travel.
//! - `successors` / `is_solvable`: the successor generator and the parity test
//!   that tells whether one board can reach another.
//!
//! Boards are value types. Every move produces a fresh `Board`; nothing in
//! this module mutates a board after construction.
use crate::error::PuzzleError;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;

/// A tile symbol. `BLANK` marks the empty cell, tiles are numbered `1..n²`.
pub type Tile = u16;

/// The blank sentinel.
pub const BLANK: Tile = 0;

/// Largest supported side length; `n² - 1` must fit in a `Tile`.
pub const MAX_SIZE: usize = 256;

/// A direction the blank travels in a single move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Every move in the order successors are generated.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Row and column delta applied to the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// A puzzle configuration: `size * size` tiles stored row-major.
///
/// Equality and hashing cover the full grid, so boards can be used directly
/// as keys in a visited set. The blank index is derived from the tiles and
/// cached for O(1) access.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    tiles: Vec<Tile>,
    blank: usize,
}

impl Board {
    /// Builds a board from a flat, row-major tile vector.
    ///
    /// The tiles must be exactly `{BLANK, 1, ..., size² - 1}` in some order.
    ///
    /// # Errors
    /// * `PuzzleError::EmptyBoard` if `size` is zero.
    /// * `PuzzleError::TooLarge` if `size` exceeds `MAX_SIZE`.
    /// * `PuzzleError::NotSquare` if `tiles.len() != size²`.
    /// * `PuzzleError::TileOutOfRange` / `PuzzleError::DuplicateTile` if the
    ///   symbol set is not exact.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    /// let board = Board::from_tiles(2, vec![1, 2, 3, 0]).unwrap();
    /// assert_eq!(board.blank_position(), (1, 1));
    /// assert!(Board::from_tiles(2, vec![1, 1, 3, 0]).is_err());
    /// ```
    pub fn from_tiles(size: usize, tiles: Vec<Tile>) -> Result<Self, PuzzleError> {
        if size == 0 {
            return Err(PuzzleError::EmptyBoard);
        }
        if size > MAX_SIZE {
            return Err(PuzzleError::TooLarge { size, max: MAX_SIZE });
        }
        if tiles.len() != size * size {
            return Err(PuzzleError::NotSquare {
                row: tiles.len() / size,
                len: tiles.len() % size,
                expected: size,
            });
        }

        let cells = size * size;
        let mut seen = vec![false; cells];
        let mut blank = 0;
        for (idx, &tile) in tiles.iter().enumerate() {
            let slot = tile as usize;
            if slot >= cells {
                return Err(PuzzleError::TileOutOfRange {
                    tile: slot,
                    max: cells - 1,
                });
            }
            if seen[slot] {
                return Err(PuzzleError::DuplicateTile { tile });
            }
            seen[slot] = true;
            if tile == BLANK {
                blank = idx;
            }
        }

        Ok(Board { size, tiles, blank })
    }

    /// Builds a board from rows. Every row must have as many cells as there are rows.
    pub fn from_rows(rows: &[Vec<Tile>]) -> Result<Self, PuzzleError> {
        let size = rows.len();
        if size == 0 {
            return Err(PuzzleError::EmptyBoard);
        }
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != size {
                return Err(PuzzleError::NotSquare {
                    row,
                    len: cells.len(),
                    expected: size,
                });
            }
        }
        Board::from_tiles(size, rows.concat())
    }

    /// The standard goal: tiles `1..size²` in row-major order, blank last.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    /// let goal = Board::goal(3).unwrap();
    /// assert_eq!(goal.get_tile(0, 0), 1);
    /// assert_eq!(goal.blank_position(), (2, 2));
    /// ```
    pub fn goal(size: usize) -> Result<Self, PuzzleError> {
        let cells = size * size;
        let tiles = (1..cells).chain(std::iter::once(0)).map(|t| t as Tile).collect();
        Board::from_tiles(size, tiles)
    }

    /// Scrambles the standard goal with a random walk of `moves` blank moves.
    ///
    /// Directions are drawn uniformly; a direction that would leave the grid
    /// is drawn and skipped, so the walk may be shorter than `moves`. The
    /// result is always reachable from the goal. The same seed always yields
    /// the same board.
    pub fn scrambled_with_seed(size: usize, moves: usize, seed: u64) -> Result<Self, PuzzleError> {
        let mut board = Board::goal(size)?;
        let mut rng = SmallRng::seed_from_u64(seed);
        for _ in 0..moves {
            let mv = Move::ALL[rng.gen_range(0..Move::ALL.len())];
            if let Some(next) = board.apply_move(mv) {
                board = next;
            }
        }
        Ok(board)
    }

    /// Creates a uniformly shuffled board that can reach the standard goal.
    ///
    /// Permutations are reshuffled until one passes `is_solvable`, which on
    /// average takes two attempts.
    pub fn new_random_with_seed(size: usize, seed: u64) -> Result<Self, PuzzleError> {
        let goal = Board::goal(size)?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut tiles = goal.tiles.clone();
        loop {
            tiles.shuffle(&mut rng);
            let candidate = Board::from_tiles(size, tiles.clone())?;
            if is_solvable(&candidate, &goal) {
                return Ok(candidate);
            }
        }
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is outside the board.
    pub fn get_tile(&self, r: usize, c: usize) -> Tile {
        assert!(r < self.size && c < self.size, "({}, {}) is outside the board", r, c);
        self.tiles[r * self.size + c]
    }

    /// All tiles, row-major.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Iterates over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.tiles.chunks(self.size)
    }

    /// `(row, col)` of the blank.
    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank / self.size, self.blank % self.size)
    }

    /// `(row, col)` of `tile`, or `None` if the tile is not on this board.
    pub fn position_of(&self, tile: Tile) -> Option<(usize, usize)> {
        self.tiles
            .iter()
            .position(|&t| t == tile)
            .map(|idx| (idx / self.size, idx % self.size))
    }

    /// Returns the board reached by moving the blank one cell in `mv`,
    /// or `None` if that cell lies outside the grid. `self` is untouched.
    pub fn apply_move(&self, mv: Move) -> Option<Board> {
        let (r, c) = self.blank_position();
        let (dr, dc) = mv.as_offset();
        let nr = r.checked_add_signed(dr)?;
        let nc = c.checked_add_signed(dc)?;
        if nr >= self.size || nc >= self.size {
            return None;
        }

        let target = nr * self.size + nc;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);
        Some(Board {
            size: self.size,
            tiles,
            blank: target,
        })
    }

    /// Every legal move together with the board it produces, in `Move::ALL` order.
    pub fn neighbors(&self) -> impl Iterator<Item = (Move, Board)> + '_ {
        Move::ALL
            .into_iter()
            .filter_map(move |mv| self.apply_move(mv).map(|board| (mv, board)))
    }

    /// Boards reachable with one blank move.
    pub fn successors(&self) -> Vec<Board> {
        self.neighbors().map(|(_, board)| board).collect()
    }

    /// The move that turns `self` into `next`, if they are one move apart.
    pub fn move_towards(&self, next: &Board) -> Option<Move> {
        self.neighbors()
            .find(|(_, board)| board == next)
            .map(|(mv, _)| mv)
    }
}

impl fmt::Display for Board {
    /// One row per line, cells right-aligned, `_` for the blank.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.size * self.size - 1).to_string().len();
        for (r, row) in self.rows().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for (c, &tile) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, " ")?;
                }
                if tile == BLANK {
                    write!(f, "{:>width$}", "_", width = width)?;
                } else {
                    write!(f, "{:>width$}", tile, width = width)?;
                }
            }
        }
        Ok(())
    }
}

/// Boards reachable from `board` with one blank move, in `Move::ALL` order.
pub fn successors(board: &Board) -> Vec<Board> {
    board.successors()
}

/// Decides whether `board` can reach `goal` through legal moves.
///
/// Inversions are counted over the non-blank tiles in row-major order, using
/// each tile's rank in `goal` as its key. On odd-width boards the inversion
/// count must be even. On even-width boards every vertical move flips the
/// inversion parity, so the blank's row distance from its goal row is added
/// before the parity test.
///
/// Boards of different sizes can never reach each other and yield `false`.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::{is_solvable, Board};
/// let goal = Board::goal(3).unwrap();
/// let swapped = Board::from_rows(&[vec![1, 2, 3], vec![4, 5, 6], vec![8, 7, 0]]).unwrap();
/// assert!(is_solvable(&goal, &goal));
/// assert!(!is_solvable(&swapped, &goal));
/// ```
pub fn is_solvable(board: &Board, goal: &Board) -> bool {
    if board.size != goal.size {
        return false;
    }

    let mut rank = vec![0usize; goal.tiles.len()];
    for (order, &tile) in goal.tiles.iter().filter(|&&t| t != BLANK).enumerate() {
        rank[tile as usize] = order;
    }
    let keys: Vec<usize> = board
        .tiles
        .iter()
        .filter(|&&t| t != BLANK)
        .map(|&t| rank[t as usize])
        .collect();
    let inversions = count_inversions(&keys);

    if board.size % 2 == 1 {
        inversions % 2 == 0
    } else {
        let blank_row = board.blank_position().0;
        let goal_blank_row = goal.blank_position().0;
        (inversions + blank_row.abs_diff(goal_blank_row)) % 2 == 0
    }
}

fn count_inversions(keys: &[usize]) -> usize {
    keys.iter()
        .enumerate()
        .map(|(i, &key)| keys[i + 1..].iter().filter(|&&later| later < key).count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&[Tile]]) -> Board {
        let rows: Vec<Vec<Tile>> = rows.iter().map(|r| r.to_vec()).collect();
        Board::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_goal_board_layout() {
        let goal = Board::goal(4).unwrap();
        assert_eq!(goal.size(), 4);
        assert_eq!(goal.get_tile(0, 0), 1);
        assert_eq!(goal.get_tile(3, 2), 15);
        assert_eq!(goal.get_tile(3, 3), BLANK);
        assert_eq!(goal.blank_position(), (3, 3));
    }

    #[test]
    fn test_from_rows_rejects_ragged_grid() {
        let err = Board::from_rows(&[vec![1, 2, 3], vec![4, 0], vec![5, 6, 7]]).unwrap_err();
        assert_eq!(err, PuzzleError::NotSquare { row: 1, len: 2, expected: 3 });
    }

    #[test]
    fn test_from_rows_rejects_empty_grid() {
        assert_eq!(Board::from_rows(&[]).unwrap_err(), PuzzleError::EmptyBoard);
    }

    #[test]
    fn test_from_tiles_rejects_duplicates_and_out_of_range() {
        let dup = Board::from_tiles(2, vec![1, 2, 2, 0]).unwrap_err();
        assert_eq!(dup, PuzzleError::DuplicateTile { tile: 2 });

        let two_blanks = Board::from_tiles(2, vec![1, 0, 2, 0]).unwrap_err();
        assert_eq!(two_blanks, PuzzleError::DuplicateTile { tile: BLANK });

        let out_of_range = Board::from_tiles(2, vec![1, 2, 4, 0]).unwrap_err();
        assert_eq!(out_of_range, PuzzleError::TileOutOfRange { tile: 4, max: 3 });

        let too_short = Board::from_tiles(3, vec![1, 2, 0]);
        assert!(matches!(too_short, Err(PuzzleError::NotSquare { .. })));
    }

    #[test]
    fn test_from_tiles_rejects_oversized_board() {
        let err = Board::from_tiles(MAX_SIZE + 1, Vec::new()).unwrap_err();
        assert_eq!(err, PuzzleError::TooLarge { size: MAX_SIZE + 1, max: MAX_SIZE });
    }

    #[test]
    fn test_position_queries() {
        let b = board(&[&[1, 2, 3], &[4, 0, 6], &[7, 5, 8]]);
        assert_eq!(b.blank_position(), (1, 1));
        assert_eq!(b.position_of(5), Some((2, 1)));
        assert_eq!(b.position_of(9), None);
        assert_eq!(b.rows().nth(2), Some(&[7, 5, 8][..]));
    }

    #[test]
    fn test_successors_from_corner_edge_and_center() {
        let corner = Board::goal(3).unwrap();
        assert_eq!(successors(&corner).len(), 2);

        let edge = board(&[&[1, 2, 3], &[4, 5, 0], &[7, 8, 6]]);
        assert_eq!(successors(&edge).len(), 3);

        let center = board(&[&[1, 2, 3], &[4, 0, 6], &[7, 5, 8]]);
        let next = successors(&center);
        assert_eq!(
            next,
            vec![
                board(&[&[1, 0, 3], &[4, 2, 6], &[7, 5, 8]]),
                board(&[&[1, 2, 3], &[4, 5, 6], &[7, 0, 8]]),
                board(&[&[1, 2, 3], &[0, 4, 6], &[7, 5, 8]]),
                board(&[&[1, 2, 3], &[4, 6, 0], &[7, 5, 8]]),
            ]
        );
    }

    #[test]
    fn test_successors_leave_parent_untouched() {
        let parent = board(&[&[1, 2, 3], &[4, 0, 6], &[7, 5, 8]]);
        let snapshot = parent.clone();
        let next = parent.successors();
        assert_eq!(parent, snapshot);
        for child in &next {
            assert_ne!(child, &parent);
            assert_eq!(child.tiles().iter().filter(|&&t| t == BLANK).count(), 1);
        }
    }

    #[test]
    fn test_apply_move_out_of_bounds() {
        let goal = Board::goal(3).unwrap();
        assert_eq!(goal.apply_move(Move::Down), None);
        assert_eq!(goal.apply_move(Move::Right), None);
        let up = goal.apply_move(Move::Up).unwrap();
        assert_eq!(up.blank_position(), (1, 2));
        assert_eq!(up.get_tile(2, 2), 6);
        assert_eq!(up.apply_move(Move::Up.opposite()), Some(goal));
    }

    #[test]
    fn test_move_towards() {
        let goal = Board::goal(3).unwrap();
        let left = goal.apply_move(Move::Left).unwrap();
        assert_eq!(goal.move_towards(&left), Some(Move::Left));
        assert_eq!(left.move_towards(&goal), Some(Move::Right));
        assert_eq!(goal.move_towards(&goal), None);
    }

    #[test]
    fn test_is_solvable_odd_width() {
        let goal = Board::goal(3).unwrap();
        let reachable = board(&[&[1, 2, 3], &[4, 0, 6], &[7, 5, 8]]);
        let swapped = board(&[&[1, 2, 3], &[4, 5, 6], &[8, 7, 0]]);
        assert!(is_solvable(&reachable, &goal));
        assert!(!is_solvable(&swapped, &goal));
    }

    #[test]
    fn test_is_solvable_even_width_uses_blank_row() {
        let goal = Board::goal(4).unwrap();
        // One vertical move: inversions change by 3, blank moves one row.
        let up = goal.apply_move(Move::Up).unwrap();
        assert!(is_solvable(&up, &goal));

        let mut tiles = goal.tiles().to_vec();
        tiles.swap(13, 14);
        let swapped = Board::from_tiles(4, tiles).unwrap();
        assert!(!is_solvable(&swapped, &goal));

        // Tiles still in order, blank one row up without a legal move.
        let jumped = Board::from_tiles(4, vec![
            1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 0, 12, 13, 14, 15,
        ])
        .unwrap();
        assert!(!is_solvable(&jumped, &goal));
    }

    #[test]
    fn test_is_solvable_against_custom_goal() {
        let goal = board(&[&[0, 1, 2], &[3, 4, 5], &[6, 7, 8]]);
        let near = goal.apply_move(Move::Right).unwrap();
        assert!(is_solvable(&near, &goal));
        let swapped = board(&[&[0, 2, 1], &[3, 4, 5], &[6, 7, 8]]);
        assert!(!is_solvable(&swapped, &goal));
        assert!(!is_solvable(&Board::goal(4).unwrap(), &goal));
    }

    #[test]
    fn test_scrambled_with_seed_is_deterministic_and_solvable() {
        for size in [3, 4, 5] {
            let goal = Board::goal(size).unwrap();
            let a = Board::scrambled_with_seed(size, 40, 7).unwrap();
            let b = Board::scrambled_with_seed(size, 40, 7).unwrap();
            assert_eq!(a, b);
            assert!(is_solvable(&a, &goal));
        }
        assert_eq!(Board::scrambled_with_seed(3, 0, 99).unwrap(), Board::goal(3).unwrap());
    }

    #[test]
    fn test_new_random_with_seed_is_solvable() {
        for seed in 0..20 {
            for size in [2, 3, 4] {
                let goal = Board::goal(size).unwrap();
                let b = Board::new_random_with_seed(size, seed).unwrap();
                assert!(is_solvable(&b, &goal), "seed {} size {}:\n{}", seed, size, b);
                assert_eq!(b, Board::new_random_with_seed(size, seed).unwrap());
            }
        }
    }

    #[test]
    fn test_display_board_formatting() {
        let b = board(&[&[1, 2, 3], &[4, 0, 6], &[7, 5, 8]]);
        assert_eq!(b.to_string(), "1 2 3\n4 _ 6\n7 5 8");

        let goal = Board::goal(4).unwrap();
        let text = goal.to_string();
        assert_eq!(text.lines().next(), Some(" 1  2  3  4"));
        assert_eq!(text.lines().last(), Some("13 14 15  _"));
    }

    #[test]
    fn test_move_display() {
        let names: Vec<String> = Move::ALL.iter().map(|m| m.to_string()).collect();
        assert_eq!(names, ["Up", "Down", "Left", "Right"]);
    }
}
