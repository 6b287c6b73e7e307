use clap::Parser;
use npuzzle_solver::engine::{is_solvable, Board};
use npuzzle_solver::heuristics::HeuristicKind;
use npuzzle_solver::solver::{solve, Outcome};
use npuzzle_solver::utils::{board_from_text, init_tracing};
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Heuristic: misplaced, manhattan, linear-conflict (or h1, h2, h3)
    #[clap(short = 'H', long, default_value = "linear-conflict")]
    heuristic: HeuristicKind,

    /// Print every move of the solution
    #[clap(long)]
    show_path: bool,

    /// Path to the board file (one row per line, `_` or `0` for the blank)
    board_file: PathBuf,
}

fn read_board_file(path: &PathBuf) -> Result<Board, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    board_from_text(&content).map_err(|e| format!("Invalid board: {}", e))
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let board = match read_board_file(&args.board_file) {
        Ok(board) => board,
        Err(e) => {
            error!("{}: {}", args.board_file.display(), e);
            process::exit(1);
        }
    };
    let goal = match Board::goal(board.size()) {
        Ok(goal) => goal,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    println!("Loaded board from {}\n", args.board_file.display());
    println!("{}\n", board);

    if !is_solvable(&board, &goal) {
        warn!("board cannot reach the goal; the search will exhaust the reachable states");
    }
    info!(heuristic = %args.heuristic, size = board.size(), "searching");

    let result = match solve(&board, &goal, args.heuristic) {
        Ok(result) => result,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    match result.outcome {
        Outcome::Solved(len) => {
            println!("Solved in {} moves ({} nodes expanded)", len, result.nodes_expanded);
            if args.show_path {
                for (i, (mv, step)) in result.moves().iter().zip(&result.path[1..]).enumerate() {
                    println!("\nMove {}: {}\n{}", i + 1, mv, step);
                }
            }
        }
        Outcome::Exhausted => {
            println!("No solution ({} nodes expanded)", result.nodes_expanded);
            process::exit(2);
        }
        Outcome::Cancelled => {
            println!("Search cancelled ({} nodes expanded)", result.nodes_expanded);
            process::exit(2);
        }
    }
}
