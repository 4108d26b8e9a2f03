//! # N-Puzzle Solver Library
//!
//! This library provides a generic state-space search engine and an
//! 8-puzzle domain built on top of it: given an abstract problem (initial
//! state, goal test, action generator, transition function, step cost) the
//! engine finds a path to a goal with a chosen uninformed or informed
//! strategy, reporting the path and the number of expanded nodes.
//!
//! It is used by three binaries:
//! - `human_player`: interactive play via the command line, with undo,
//!   shuffling, and solver-computed hints.
//! - `ai_solver`: takes a board configuration, an algorithm, and a
//!   heuristic, then prints the move sequence it found.
//! - `heuristic_evaluator`: compares the heuristics' expansion counts over
//!   a batch of seeded random boards.
//!
//! ## Modules
//! - `containers`: the frontier primitives (`Stack`, `Queue`, `MinHeap`,
//!   and the stable `PriorityQueue`).
//! - `problem`: the `Problem` contract any searchable domain satisfies, and
//!   the `SearchTree` node arena with path reconstruction.
//! - `solver`: the seven search strategies (breadth-first, depth-first,
//!   uniform-cost, greedy, A*, weighted A*, IDA*) and selection by name.
//! - `engine`: the 8-puzzle domain model (`Move`, `PuzzleState`, `Puzzle`,
//!   the interactive `Session`) with solvability checking and shuffling.
//! - `heuristics`: the `misplaced`, `manhattan` and `linear_conflict`
//!   estimates and selection by name or index.
//! - `utils`: parsing board configurations from text.

pub mod containers;
pub mod engine;
pub mod heuristics;
pub mod problem;
pub mod solver;
pub mod utils;

// Re-export the main types
pub use engine::{Move, Puzzle, PuzzleState, Session};
pub use heuristics::{linear_conflict, manhattan, misplaced, Heuristic};
pub use problem::{Node, NodeId, Path, Problem, SearchTree, Step};
pub use solver::{
    a_star, breadth_first, depth_first, greedy, iterative_deepening_a_star, solve, uniform_cost,
    weighted_a_star, Algorithm, SearchOutcome, SolveOptions, DEFAULT_WEIGHT,
};
pub use utils::tiles_from_str;
