use crate::engine::{Board, Tile, BLANK};
use crate::error::PuzzleError;
use std::sync::OnceLock;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static TRACING: OnceLock<()> = OnceLock::new();

/// Installs a `tracing` fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call multiple times - only the first call has effect.
pub fn init_tracing() {
    TRACING.get_or_init(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .try_init();
    });
}

/// Parses an array of string slices into a `Board`.
///
/// Each string slice is one row, starting from row 0. Cells are separated by
/// whitespace and hold a tile number; `0` or `_` marks the blank. The number
/// of rows decides the board size, and every row must have that many cells.
///
/// # Errors
/// * `PuzzleError::Parse` if a cell is neither a number nor `_`.
/// * Any board validation error from `Board::from_rows`.
///
/// # Examples
/// ```
/// use npuzzle_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["1 2 3", "4 _ 6", "7 5 8"]).unwrap();
/// assert_eq!(board.get_tile(2, 1), 5);
/// assert_eq!(board.blank_position(), (1, 1));
///
/// assert!(board_from_str_array(&["1 2", "3 x"]).is_err());
/// assert!(board_from_str_array(&["1 2 3", "4 0"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board, PuzzleError> {
    let mut rows = Vec::with_capacity(s.len());
    for (r, row_str) in s.iter().enumerate() {
        let mut row = Vec::new();
        for (c, cell) in row_str.split_whitespace().enumerate() {
            row.push(parse_cell(cell).ok_or_else(|| PuzzleError::Parse {
                line: r + 1,
                reason: format!("unrecognized cell '{}' in column {}", cell, c),
            })?);
        }
        rows.push(row);
    }
    Board::from_rows(&rows)
}

/// Parses a whole board file.
///
/// Blank lines and anything after a `#` are ignored; the remaining lines are
/// handed to `board_from_str_array`.
pub fn board_from_text(text: &str) -> Result<Board, PuzzleError> {
    let lines: Vec<&str> = text
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|line| !line.is_empty())
        .collect();
    board_from_str_array(&lines)
}

fn parse_cell(cell: &str) -> Option<Tile> {
    if cell == "_" {
        return Some(BLANK);
    }
    cell.parse::<Tile>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_from_str_array_valid() {
        let board = board_from_str_array(&[" 1  2  3  4", " 5  6  7  8", " 9 10 11 12", "13 14 15  _"]).unwrap();
        assert_eq!(board, Board::goal(4).unwrap());
    }

    #[test]
    fn test_board_from_str_array_zero_is_blank() {
        let board = board_from_str_array(&["1 2 3", "4 0 6", "7 5 8"]).unwrap();
        assert_eq!(board.blank_position(), (1, 1));
    }

    #[test]
    fn test_board_from_str_array_invalid_cell() {
        let err = board_from_str_array(&["1 2 3", "4 X 6", "7 5 8"]).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::Parse {
                line: 2,
                reason: "unrecognized cell 'X' in column 1".to_string()
            }
        );
    }

    #[test]
    fn test_board_from_str_array_negative_number() {
        let err = board_from_str_array(&["1 -2", "3 0"]).unwrap_err();
        assert!(err.to_string().contains("'-2'"));
    }

    #[test]
    fn test_board_from_str_array_row_too_long() {
        let err = board_from_str_array(&["1 2 3 9", "4 0 6", "7 5 8"]).unwrap_err();
        assert_eq!(err, PuzzleError::NotSquare { row: 0, len: 4, expected: 3 });
    }

    #[test]
    fn test_board_from_str_array_duplicate_tile() {
        let err = board_from_str_array(&["1 2 3", "4 5 6", "7 7 0"]).unwrap_err();
        assert_eq!(err, PuzzleError::DuplicateTile { tile: 7 });
    }

    #[test]
    fn test_board_from_str_array_empty_input() {
        let board_str: [&str; 0] = [];
        assert_eq!(board_from_str_array(&board_str).unwrap_err(), PuzzleError::EmptyBoard);
    }

    #[test]
    fn test_board_from_text_skips_comments_and_blank_lines() {
        let text = "# two moves from the goal\n\n1 2 3\n4 _ 6   # blank in the middle\n7 5 8\n\n";
        let board = board_from_text(text).unwrap();
        assert_eq!(board.to_string(), "1 2 3\n4 _ 6\n7 5 8");
    }

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
