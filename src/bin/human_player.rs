use npuzzle_solver::engine::{Move, Puzzle, PuzzleState, Session};
use npuzzle_solver::heuristics::manhattan;
use npuzzle_solver::solver::a_star;
use std::io::{self, Write};

fn parse_move(input: &str) -> Option<Move> {
    match input {
        "u" | "up" => Some(Move::Up),
        "d" | "down" => Some(Move::Down),
        "l" | "left" => Some(Move::Left),
        "r" | "right" => Some(Move::Right),
        _ => None,
    }
}

fn main() {
    // A mildly scrambled starting arrangement, 16 moves from the goal.
    let start = PuzzleState::new([1, 4, 2, 7, 5, 3, 0, 6, 8])
        .expect("the built-in starting arrangement is valid");
    let mut session = Session::new(start);

    println!("Welcome to the 8-puzzle! Slide the blank into place:");
    println!("goal is 1 2 3 / 4 5 6 / 7 8 _");

    loop {
        println!("---------------------");
        println!("Moves: {}", session.moves());
        println!("{}", session.state());

        if session.is_solved() {
            println!("---------------------");
            println!("Solved in {} moves!", session.moves());
            println!("---------------------");
            break;
        }

        print!("Move (u/d/l/r), 'undo', 'hint', 'shuffle [seed]', 'reset', or 'q' to quit: ");
        io::stdout().flush().expect("stdout is writable");

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("Error reading input. Please try again.");
            continue;
        }
        let trimmed = input.trim();
        let parts: Vec<&str> = trimmed.split_whitespace().collect();

        match parts.as_slice() {
            ["q"] | ["quit"] => {
                println!("Thanks for playing!");
                break;
            }
            ["undo"] => {
                if session.undo_last_move() {
                    println!("Move undone.");
                } else {
                    println!("Nothing to undo.");
                }
            }
            ["reset"] => {
                session.reset();
                println!("Back to the starting arrangement.");
            }
            ["shuffle"] => {
                let seed = rand::random::<u64>();
                session.shuffle(seed);
                println!("Shuffled (seed {}).", seed);
            }
            ["shuffle", seed] => match seed.parse::<u64>() {
                Ok(seed) => {
                    session.shuffle(seed);
                    println!("Shuffled (seed {}).", seed);
                }
                Err(_) => println!("Invalid seed '{}'. Expected a number.", seed),
            },
            ["hint"] => {
                let outcome = a_star(&Puzzle::new(*session.state()), manhattan);
                let moves = outcome.actions();
                match moves.first() {
                    Some(movement) => println!(
                        "Try {} ({} moves to go, {} nodes expanded).",
                        movement,
                        moves.len(),
                        outcome.expanded
                    ),
                    None => println!("Already solved."),
                }
            }
            [word] => match parse_move(word) {
                Some(movement) => {
                    if !session.apply_move(movement) {
                        println!("The blank cannot move {} from here.", movement);
                    }
                }
                None => println!("Unknown command '{}'.", word),
            },
            _ => println!("Unknown command. Use u/d/l/r, 'undo', 'hint', 'shuffle', 'reset', or 'q'."),
        }
    }
}
