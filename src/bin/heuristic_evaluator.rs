use clap::Parser;
use npuzzle_solver::engine::Board;
use npuzzle_solver::heuristics::HeuristicKind;
use npuzzle_solver::solver::{solve, SearchResult};
use npuzzle_solver::utils::init_tracing;
use npuzzle_solver::PuzzleError;
use rayon::prelude::*;
use std::process;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Side length of the generated boards
    #[clap(long, default_value_t = 3)]
    size: usize,

    /// Number of boards to generate
    #[clap(long, default_value_t = 100)]
    trials: usize,

    /// Seed of the first board; board `i` uses `seed + i`
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Random-walk length from the goal; 0 draws a uniformly random solvable board
    #[clap(long, default_value_t = 0)]
    scramble: usize,

    /// Worker threads (0 lets rayon decide)
    #[clap(long, default_value_t = 0)]
    threads: usize,
}

fn generate_boards(args: &Args) -> Result<Vec<Board>, PuzzleError> {
    (0..args.trials)
        .map(|i| {
            let seed = args.seed + i as u64;
            if args.scramble > 0 {
                Board::scrambled_with_seed(args.size, args.scramble, seed)
            } else {
                Board::new_random_with_seed(args.size, seed)
            }
        })
        .collect()
}

fn run(args: &Args) -> Result<(), PuzzleError> {
    let goal = Board::goal(args.size)?;
    let boards = generate_boards(args)?;
    info!(trials = boards.len(), size = args.size, "evaluating heuristics");

    let jobs: Vec<(usize, HeuristicKind)> = (0..boards.len())
        .flat_map(|trial| HeuristicKind::ALL.into_iter().map(move |kind| (trial, kind)))
        .collect();

    let results: Vec<Result<SearchResult, PuzzleError>> = jobs
        .par_iter()
        .map(|&(trial, kind)| solve(&boards[trial], &goal, kind))
        .collect();

    for (&(trial, kind), result) in jobs.iter().zip(results) {
        let result = result?;
        info!(
            trial = trial + 1,
            heuristic = %kind,
            outcome = ?result.outcome,
            nodes_expanded = result.nodes_expanded,
            "trial finished"
        );
    }
    Ok(())
}

fn main() {
    init_tracing();
    let args = Args::parse();

    if args.threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(args.threads).build_global() {
            error!("failed to configure thread pool: {}", e);
            process::exit(1);
        }
    }

    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(1);
    }
}
