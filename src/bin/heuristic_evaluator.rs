use npuzzle_solver::engine::{Puzzle, PuzzleState};
use npuzzle_solver::heuristics::Heuristic;
use npuzzle_solver::solver::a_star;
use std::collections::HashMap;

const NUM_RANDOM_BOARDS_FOR_EVALUATION: usize = 20;
const START_SEED: u64 = 0;

fn main() {
    let mut all_expanded: HashMap<&'static str, Vec<usize>> = HashMap::new();
    for heuristic in Heuristic::ALL {
        all_expanded.insert(heuristic.name(), Vec::new());
    }

    println!(
        "Starting heuristic evaluation over {} random boards...",
        NUM_RANDOM_BOARDS_FOR_EVALUATION
    );

    for board_idx in 0..NUM_RANDOM_BOARDS_FOR_EVALUATION {
        let seed = START_SEED + board_idx as u64;
        let puzzle = Puzzle::new(PuzzleState::random_solvable(seed));

        println!("\nEvaluating board {} (seed {})", board_idx, seed);

        let mut optimal_steps: Option<usize> = None;
        for heuristic in Heuristic::ALL {
            let outcome = a_star(&puzzle, |s| heuristic.evaluate(s));
            let steps = outcome
                .step_count()
                .expect("seeded random boards pass the parity check");

            // A* is cost-optimal with each of these heuristics, so the step
            // counts must agree across them.
            match optimal_steps {
                None => optimal_steps = Some(steps),
                Some(previous) if previous != steps => {
                    eprintln!(
                        "Warning: {} found {} steps on board {} where another heuristic found {}",
                        heuristic.name(),
                        steps,
                        board_idx,
                        previous
                    );
                }
                Some(_) => {}
            }

            println!(
                "  Heuristic: {:<16} Steps: {:<4} Expanded: {}",
                heuristic.name(),
                steps,
                outcome.expanded
            );
            all_expanded
                .get_mut(heuristic.name())
                .expect("every heuristic was registered above")
                .push(outcome.expanded);
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Boards evaluated: {}", NUM_RANDOM_BOARDS_FOR_EVALUATION);

    let mut averages: Vec<(&str, f64)> = Vec::new();
    for heuristic in Heuristic::ALL {
        let counts = &all_expanded[heuristic.name()];
        if counts.is_empty() {
            continue;
        }
        let total: usize = counts.iter().sum();
        averages.push((heuristic.name(), total as f64 / counts.len() as f64));
    }

    // Strongest heuristic first: fewest expansions on average.
    averages.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    println!("\n--- Average Nodes Expanded ---");
    for (name, average) in averages {
        println!("Heuristic {:<16}: {:.1}", name, average);
    }
}
