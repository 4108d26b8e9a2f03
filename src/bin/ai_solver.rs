use clap::Parser;
use npuzzle_solver::engine::Puzzle;
use npuzzle_solver::heuristics::Heuristic;
use npuzzle_solver::solver::{solve, Algorithm, SolveOptions, DEFAULT_WEIGHT};
use npuzzle_solver::utils::tiles_from_str;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Search algorithm: bfs, dfs, ucs, greedy, astar, wastar, idastar
    #[clap(short, long, default_value = "astar")]
    algorithm: String,

    /// Heuristic for informed algorithms: manhattan, misplaced, linear-conflict
    #[clap(long, default_value = "manhattan")]
    heuristic: String,

    /// Weight applied to the heuristic by wastar
    #[clap(short, long, default_value_t = DEFAULT_WEIGHT)]
    weight: f64,

    /// Depth bound for dfs (unbounded when omitted)
    #[clap(short, long)]
    depth_limit: Option<usize>,

    /// Path to the board file (nine tiles 0-8, 0 = blank)
    board_file: PathBuf,
}

fn read_board_file(path: &PathBuf) -> Result<Puzzle, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    let state = tiles_from_str(&content).map_err(|e| format!("Invalid board format: {}", e))?;
    Ok(Puzzle::new(state))
}

fn main() {
    let args = Args::parse();

    // Selection errors are reported before anything runs.
    let algorithm: Algorithm = args.algorithm.parse().unwrap_or_else(|e: String| {
        eprintln!("{}", e);
        process::exit(2);
    });
    let heuristic: Heuristic = args.heuristic.parse().unwrap_or_else(|e: String| {
        eprintln!("{}", e);
        process::exit(2);
    });

    let puzzle = read_board_file(&args.board_file).unwrap_or_else(|e| {
        eprintln!(
            "Failed to read board from {}: {}",
            args.board_file.display(),
            e
        );
        process::exit(2);
    });

    println!("Loaded board from {}\n", args.board_file.display());
    println!("Initial board state:\n{}", puzzle.start());

    if !puzzle.start().is_solvable() {
        eprintln!("This board has odd inversion parity: the goal is unreachable.");
        process::exit(1);
    }

    if algorithm.is_informed() {
        println!("Searching with {} ({})...\n", algorithm, heuristic);
    } else {
        println!("Searching with {}...\n", algorithm);
    }

    let options = SolveOptions {
        depth_limit: args.depth_limit,
        weight: args.weight,
    };
    let started = Instant::now();
    let outcome = solve(algorithm, &puzzle, |s| heuristic.evaluate(s), options);
    let elapsed = started.elapsed();

    match &outcome.path {
        Some(_) => {
            let moves = outcome.actions();
            println!("Solution found ({} moves):", moves.len());
            if moves.is_empty() {
                println!("  Already solved.");
            } else {
                for (i, movement) in moves.iter().enumerate() {
                    println!("  Move {}: {}", i + 1, movement);
                }
            }
            println!("\nNodes expanded: {}", outcome.expanded);
            println!("Time: {:.3}s", elapsed.as_secs_f64());
        }
        None => {
            println!("No solution found.");
            println!("Nodes expanded: {}", outcome.expanded);
            println!("Time: {:.3}s", elapsed.as_secs_f64());
        }
    }
}
