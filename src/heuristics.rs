//! Heuristic estimates for the 8-puzzle.
//!
//! Three pure functions of a [`PuzzleState`], in increasing order of
//! strength:
//! - [`misplaced`]: tiles out of place.
//! - [`manhattan`]: total grid distance of tiles from their goal cells.
//! - [`linear_conflict`]: manhattan plus a 2-move surcharge per pair of
//!   tiles blocking each other inside their shared goal row or column.
//!
//! `misplaced` and `manhattan` never overestimate the true remaining cost.
//! The pairwise conflict surcharge can, on a handful of near-maximally
//! reversed boards (all at true distance 26 or more), overcharge a fully
//! reversed line; everywhere else it is a lower bound too, and a much
//! tighter one than plain manhattan.
//!
//! [`Heuristic`] selects one of the three by name or index for callers that
//! take the choice as input.

use std::fmt;
use std::str::FromStr;

use crate::engine::{PuzzleState, GOAL_TILES, GRID_SIDE};

/// Goal cell of a non-blank tile. With the fixed goal `1 2 3 / 4 5 6 /
/// 7 8 _`, tile `v` belongs at index `v - 1`.
fn goal_index(tile: u8) -> usize {
    (tile - 1) as usize
}

/// Number of non-blank tiles not in their goal cell.
///
/// Admissible: every misplaced tile needs at least one move.
pub fn misplaced(state: &PuzzleState) -> f64 {
    let count = state
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(i, &tile)| tile != 0 && tile != GOAL_TILES[i])
        .count();
    count as f64
}

/// Sum over non-blank tiles of the grid distance to their goal cell.
///
/// Admissible, and dominates [`misplaced`]: each tile must make at least
/// its full row and column distance in moves.
pub fn manhattan(state: &PuzzleState) -> f64 {
    let mut distance = 0usize;
    for (i, &tile) in state.tiles().iter().enumerate() {
        if tile == 0 {
            continue;
        }
        let goal = goal_index(tile);
        let (row, col) = (i / GRID_SIDE, i % GRID_SIDE);
        let (goal_row, goal_col) = (goal / GRID_SIDE, goal % GRID_SIDE);
        distance += row.abs_diff(goal_row) + col.abs_diff(goal_col);
    }
    distance as f64
}

/// Manhattan distance plus 2 per linear conflict.
///
/// A linear conflict is an ordered pair of tiles sitting in their shared
/// goal row (or column) with their relative order reversed: one of them has
/// to leave the line for the other to pass, costing at least two extra
/// moves beyond both tiles' manhattan distances. Each pair is counted from
/// its left (upper) member only, scanning the cells to the right (below),
/// so no conflict is charged twice.
pub fn linear_conflict(state: &PuzzleState) -> f64 {
    let tiles = state.tiles();
    let mut conflicts = 0usize;

    // Row conflicts: both tiles at home in this row, left one belongs
    // further right.
    for row in 0..GRID_SIDE {
        for col in 0..GRID_SIDE {
            let tile = tiles[row * GRID_SIDE + col];
            if tile == 0 {
                continue;
            }
            let goal = goal_index(tile);
            if goal / GRID_SIDE != row {
                continue;
            }
            let goal_col = goal % GRID_SIDE;
            for other_col in col + 1..GRID_SIDE {
                let other = tiles[row * GRID_SIDE + other_col];
                if other == 0 {
                    continue;
                }
                let other_goal = goal_index(other);
                if other_goal / GRID_SIDE == row && other_goal % GRID_SIDE < goal_col {
                    conflicts += 1;
                }
            }
        }
    }

    // Column conflicts, symmetric.
    for col in 0..GRID_SIDE {
        for row in 0..GRID_SIDE {
            let tile = tiles[row * GRID_SIDE + col];
            if tile == 0 {
                continue;
            }
            let goal = goal_index(tile);
            if goal % GRID_SIDE != col {
                continue;
            }
            let goal_row = goal / GRID_SIDE;
            for other_row in row + 1..GRID_SIDE {
                let other = tiles[other_row * GRID_SIDE + col];
                if other == 0 {
                    continue;
                }
                let other_goal = goal_index(other);
                if other_goal % GRID_SIDE == col && other_goal / GRID_SIDE < goal_row {
                    conflicts += 1;
                }
            }
        }
    }

    manhattan(state) + 2.0 * conflicts as f64
}

/// Selector for the three puzzle heuristics.
///
/// The index order matches the selection the interactive front ends offer:
/// 0 = manhattan, 1 = misplaced, 2 = linear conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// [`manhattan`]
    Manhattan,
    /// [`misplaced`]
    Misplaced,
    /// [`linear_conflict`]
    LinearConflict,
}

impl Heuristic {
    /// Every heuristic, in selection-index order.
    pub const ALL: [Heuristic; 3] = [
        Heuristic::Manhattan,
        Heuristic::Misplaced,
        Heuristic::LinearConflict,
    ];

    /// Evaluates the selected heuristic on a state.
    pub fn evaluate(&self, state: &PuzzleState) -> f64 {
        match self {
            Heuristic::Manhattan => manhattan(state),
            Heuristic::Misplaced => misplaced(state),
            Heuristic::LinearConflict => linear_conflict(state),
        }
    }

    /// Selects a heuristic by index.
    ///
    /// # Errors
    /// Returns an error for indices outside `0..3`.
    pub fn from_index(index: usize) -> Result<Self, String> {
        Heuristic::ALL.get(index).copied().ok_or_else(|| {
            format!(
                "Heuristic index {} out of range. Expected 0 through {}",
                index,
                Heuristic::ALL.len() - 1
            )
        })
    }

    /// The canonical name used for selection and display.
    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::Misplaced => "misplaced",
            Heuristic::LinearConflict => "linear-conflict",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manhattan" => Ok(Heuristic::Manhattan),
            "misplaced" => Ok(Heuristic::Misplaced),
            "linear-conflict" | "linear_conflict" => Ok(Heuristic::LinearConflict),
            other => Err(format!(
                "Unknown heuristic '{}'. Expected one of: manhattan, misplaced, linear-conflict",
                other
            )),
        }
    }
}
