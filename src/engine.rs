//! Core domain model for the 8-puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Move`: the four blank-tile moves.
//! - `PuzzleState`: an immutable 3×3 tile arrangement, the canonical state
//!   key used for de-duplication during search.
//! - `Puzzle`: the [`Problem`](crate::problem::Problem) implementation the
//!   search algorithms consume.
//! - `Session`: a mutable play session (move history, undo, shuffle) used by
//!   the interactive binary.
//!
//! Solvability is decided by inversion parity: with the fixed goal
//! `1 2 3 / 4 5 6 / 7 8 _`, an arrangement is reachable exactly when its
//! inversion count (blank ignored) is even.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;

use crate::problem::Problem;

/// Side length of the square grid.
pub const GRID_SIDE: usize = 3;

/// Number of cells in the grid, blank included.
pub const TILE_COUNT: usize = GRID_SIDE * GRID_SIDE;

/// The goal arrangement, row-major, 0 denoting the blank.
pub const GOAL_TILES: [u8; TILE_COUNT] = [1, 2, 3, 4, 5, 6, 7, 8, 0];

/// A move of the blank tile in one of the four grid directions.
///
/// The direction names the way the *blank* travels: `Right` swaps the blank
/// with the tile to its right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Blank moves one row up.
    Up,
    /// Blank moves one row down.
    Down,
    /// Blank moves one column left.
    Left,
    /// Blank moves one column right.
    Right,
}

impl Move {
    /// Child-generation order used by `Puzzle::actions`. The order is part
    /// of the engine's observable behavior: it decides which of two equally
    /// ranked frontier nodes a search expands first.
    pub const EXPANSION_ORDER: [Move; 4] = [Move::Down, Move::Up, Move::Right, Move::Left];

    /// The `(row, column)` offset this move applies to the blank.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    /// The move that undoes this one.
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
            Move::Up => "UP",
            Move::Down => "DOWN",
            Move::Left => "LEFT",
            Move::Right => "RIGHT",
        };
        write!(f, "{}", s)
    }
}

/// An immutable 3×3 tile arrangement, row-major, 0 denoting the blank.
///
/// Two states are equal exactly when their tile arrays are equal; the array
/// is the canonical hashable key the search algorithms de-duplicate on.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::{Move, PuzzleState};
///
/// let state = PuzzleState::new([1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
/// assert_eq!(state.blank_index(), 7);
/// let next = state.apply(Move::Right).unwrap();
/// assert_eq!(next, PuzzleState::goal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    tiles: [u8; TILE_COUNT],
}

impl PuzzleState {
    /// Creates a state from a row-major tile array.
    ///
    /// # Errors
    /// Returns a descriptive error unless `tiles` is a permutation of
    /// `0..=8`.
    pub fn new(tiles: [u8; TILE_COUNT]) -> Result<Self, String> {
        let mut seen = [false; TILE_COUNT];
        for &tile in &tiles {
            let value = tile as usize;
            if value >= TILE_COUNT {
                return Err(format!(
                    "Invalid tile value {}. Expected values 0 through {}",
                    tile,
                    TILE_COUNT - 1
                ));
            }
            if seen[value] {
                return Err(format!("Duplicate tile value {}", tile));
            }
            seen[value] = true;
        }
        Ok(PuzzleState { tiles })
    }

    /// The goal arrangement `1 2 3 / 4 5 6 / 7 8 _`.
    pub fn goal() -> Self {
        PuzzleState { tiles: GOAL_TILES }
    }

    /// The row-major tile array, 0 denoting the blank.
    pub fn tiles(&self) -> &[u8; TILE_COUNT] {
        &self.tiles
    }

    /// Index of the blank cell in the row-major array.
    pub fn blank_index(&self) -> usize {
        self.tiles
            .iter()
            .position(|&tile| tile == 0)
            .expect("a valid puzzle state always contains the blank")
    }

    /// Applies a blank move, returning the resulting state, or `None` if the
    /// move would leave the grid.
    pub fn apply(&self, movement: Move) -> Option<Self> {
        let blank = self.blank_index();
        let (row, col) = (blank / GRID_SIDE, blank % GRID_SIDE);
        let (dr, dc) = movement.delta();

        let new_row = row as isize + dr;
        let new_col = col as isize + dc;
        if new_row < 0
            || new_row >= GRID_SIDE as isize
            || new_col < 0
            || new_col >= GRID_SIDE as isize
        {
            return None;
        }

        let target = new_row as usize * GRID_SIDE + new_col as usize;
        let mut tiles = self.tiles;
        tiles.swap(blank, target);
        Some(PuzzleState { tiles })
    }

    /// Counts tile pairs appearing in reverse order relative to the goal,
    /// the blank ignored.
    pub fn inversions(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != 0)
            .map(|(i, &tile)| {
                self.tiles[i + 1..]
                    .iter()
                    .filter(|&&later| later != 0 && later < tile)
                    .count()
            })
            .sum()
    }

    /// Whether the goal is reachable from this arrangement.
    ///
    /// For the odd-width grid this is exactly the inversion-parity check: an
    /// even inversion count is necessary and sufficient.
    pub fn is_solvable(&self) -> bool {
        self.inversions() % 2 == 0
    }

    /// Draws uniform random arrangements from a seeded generator until one
    /// passes the solvability check. The same seed always produces the same
    /// arrangement.
    pub fn random_solvable(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut tiles = GOAL_TILES;
        loop {
            tiles.shuffle(&mut rng);
            let state = PuzzleState { tiles };
            if state.is_solvable() {
                return state;
            }
        }
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..GRID_SIDE {
            for col in 0..GRID_SIDE {
                let tile = self.tiles[row * GRID_SIDE + col];
                if tile == 0 {
                    write!(f, " .")?;
                } else {
                    write!(f, " {}", tile)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The 8-puzzle as a search [`Problem`].
///
/// Stateless beyond its start configuration: `actions`, `result` and
/// `is_goal` are pure, so the same `Puzzle` value can back any number of
/// consecutive searches, and concurrent searches only need separate
/// invocations.
#[derive(Debug, Clone)]
pub struct Puzzle {
    start: PuzzleState,
}

impl Puzzle {
    /// Creates a puzzle starting from the given state.
    pub fn new(start: PuzzleState) -> Self {
        Puzzle { start }
    }

    /// Creates a puzzle from a raw tile array.
    ///
    /// # Errors
    /// Returns an error if the array is not a permutation of `0..=8`.
    pub fn from_tiles(tiles: [u8; TILE_COUNT]) -> Result<Self, String> {
        PuzzleState::new(tiles).map(Puzzle::new)
    }

    /// The configured start state.
    pub fn start(&self) -> &PuzzleState {
        &self.start
    }
}

impl Problem for Puzzle {
    type State = PuzzleState;
    type Action = Move;

    fn initial_state(&self) -> PuzzleState {
        self.start
    }

    fn is_goal(&self, state: &PuzzleState) -> bool {
        state.tiles == GOAL_TILES
    }

    fn actions(&self, state: &PuzzleState) -> Vec<Move> {
        let blank = state.blank_index();
        let (row, col) = (blank as isize / GRID_SIDE as isize, blank as isize % GRID_SIDE as isize);
        Move::EXPANSION_ORDER
            .iter()
            .copied()
            .filter(|movement| {
                let (dr, dc) = movement.delta();
                let (nr, nc) = (row + dr, col + dc);
                nr >= 0 && nr < GRID_SIDE as isize && nc >= 0 && nc < GRID_SIDE as isize
            })
            .collect()
    }

    fn result(&self, state: &PuzzleState, action: &Move) -> PuzzleState {
        state
            .apply(*action)
            .expect("result called with an action not produced by actions")
    }
}

/// A mutable play session over one puzzle.
///
/// Tracks the current arrangement, the number of moves made, and a history
/// of earlier positions for undo. Shuffling replaces the session with a
/// fresh solvable arrangement and clears the history.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::{Move, PuzzleState, Session};
///
/// let start = PuzzleState::new([1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
/// let mut session = Session::new(start);
/// assert!(session.apply_move(Move::Right));
/// assert!(session.is_solved());
/// assert!(session.undo_last_move());
/// assert_eq!(session.state(), &start);
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    state: PuzzleState,
    moves: u32,
    history: Vec<(PuzzleState, u32)>,
}

impl Session {
    /// Starts a session at the given arrangement.
    pub fn new(start: PuzzleState) -> Self {
        Session {
            state: start,
            moves: 0,
            history: vec![(start, 0)],
        }
    }

    /// The current arrangement.
    pub fn state(&self) -> &PuzzleState {
        &self.state
    }

    /// Number of moves made since the session started or was last shuffled
    /// or reset.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Applies a blank move if it stays on the grid, recording it in the
    /// history. Returns whether the move was applied.
    pub fn apply_move(&mut self, movement: Move) -> bool {
        match self.state.apply(movement) {
            Some(next) => {
                self.state = next;
                self.moves += 1;
                self.history.push((next, self.moves));
                true
            }
            None => false,
        }
    }

    /// Reverts the last applied move. Returns `false` if the session is
    /// already at its starting arrangement.
    pub fn undo_last_move(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            let &(state, moves) = self
                .history
                .last()
                .expect("history retains the starting arrangement");
            self.state = state;
            self.moves = moves;
            true
        } else {
            false
        }
    }

    /// Rewinds the session to its starting arrangement, dropping the move
    /// history.
    pub fn reset(&mut self) {
        self.history.truncate(1);
        let &(state, moves) = self
            .history
            .last()
            .expect("history retains the starting arrangement");
        self.state = state;
        self.moves = moves;
    }

    /// Replaces the session with a fresh seeded solvable arrangement.
    pub fn shuffle(&mut self, seed: u64) {
        self.state = PuzzleState::random_solvable(seed);
        self.moves = 0;
        self.history = vec![(self.state, 0)];
    }

    /// Whether the current arrangement is the goal.
    pub fn is_solved(&self) -> bool {
        self.state.tiles == GOAL_TILES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_rejects_bad_arrays() {
        assert!(PuzzleState::new([1, 2, 3, 4, 5, 6, 7, 8, 0]).is_ok());
        let err = PuzzleState::new([1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap_err();
        assert!(err.contains("Invalid tile value 9"));
        let err = PuzzleState::new([1, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap_err();
        assert!(err.contains("Duplicate tile value 1"));
    }

    #[test]
    fn test_apply_swaps_blank_with_target() {
        let state = PuzzleState::new([1, 2, 3, 4, 0, 6, 7, 5, 8]).unwrap();
        assert_eq!(state.blank_index(), 4);

        let down = state.apply(Move::Down).unwrap();
        assert_eq!(down.tiles(), &[1, 2, 3, 4, 5, 6, 7, 0, 8]);

        let up = state.apply(Move::Up).unwrap();
        assert_eq!(up.tiles(), &[1, 0, 3, 4, 2, 6, 7, 5, 8]);
    }

    #[test]
    fn test_apply_rejects_off_grid_moves() {
        let corner = PuzzleState::new([0, 1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert!(corner.apply(Move::Up).is_none());
        assert!(corner.apply(Move::Left).is_none());
        assert!(corner.apply(Move::Down).is_some());
        assert!(corner.apply(Move::Right).is_some());
    }

    #[test]
    fn test_opposite_moves_cancel() {
        let state = PuzzleState::new([1, 2, 3, 4, 0, 6, 7, 5, 8]).unwrap();
        for movement in Move::EXPANSION_ORDER {
            let there = state.apply(movement).unwrap();
            let back = there.apply(movement.opposite()).unwrap();
            assert_eq!(back, state);
        }
    }

    #[test]
    fn test_actions_enumerate_on_grid_moves_in_order() {
        let puzzle = Puzzle::new(PuzzleState::goal());

        // Blank at the center: all four moves, in expansion order.
        let center = PuzzleState::new([1, 2, 3, 4, 0, 6, 7, 5, 8]).unwrap();
        assert_eq!(
            puzzle.actions(&center),
            vec![Move::Down, Move::Up, Move::Right, Move::Left]
        );

        // Blank at the bottom edge (index 7): Down is off-grid.
        let edge = PuzzleState::new([1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
        assert_eq!(puzzle.actions(&edge), vec![Move::Up, Move::Right, Move::Left]);

        // Blank in the top-left corner: only Down and Right remain.
        let corner = PuzzleState::new([0, 1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(puzzle.actions(&corner), vec![Move::Down, Move::Right]);
    }

    #[test]
    fn test_result_matches_apply() {
        let puzzle = Puzzle::new(PuzzleState::goal());
        let state = PuzzleState::new([1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
        for action in puzzle.actions(&state) {
            assert_eq!(puzzle.result(&state, &action), state.apply(action).unwrap());
        }
    }

    #[test]
    fn test_goal_recognition() {
        let puzzle = Puzzle::new(PuzzleState::goal());
        assert!(puzzle.is_goal(&PuzzleState::goal()));
        let off = PuzzleState::new([1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
        assert!(!puzzle.is_goal(&off));
    }

    #[test]
    fn test_inversion_parity_decides_solvability() {
        assert!(PuzzleState::goal().is_solvable());

        // One swapped pair: a single inversion, unreachable.
        let swapped = PuzzleState::new([2, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        assert_eq!(swapped.inversions(), 1);
        assert!(!swapped.is_solvable());

        // A plausible-looking scramble with 7 inversions.
        let demo = PuzzleState::new([1, 4, 2, 7, 5, 3, 0, 8, 6]).unwrap();
        assert_eq!(demo.inversions(), 7);
        assert!(!demo.is_solvable());
    }

    #[test]
    fn test_random_solvable_is_seeded_and_solvable() {
        for seed in 0..20 {
            let state = PuzzleState::random_solvable(seed);
            assert!(state.is_solvable(), "seed {} produced odd parity", seed);
            assert_eq!(state, PuzzleState::random_solvable(seed));
        }
        // Different seeds should not all collapse to one arrangement.
        assert_ne!(
            PuzzleState::random_solvable(0),
            PuzzleState::random_solvable(1)
        );
    }

    #[test]
    fn test_session_apply_undo_reset() {
        let start = PuzzleState::new([1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
        let mut session = Session::new(start);

        assert!(!session.apply_move(Move::Down));
        assert_eq!(session.moves(), 0);

        assert!(session.apply_move(Move::Right));
        assert!(session.is_solved());
        assert_eq!(session.moves(), 1);

        assert!(session.undo_last_move());
        assert_eq!(session.state(), &start);
        assert_eq!(session.moves(), 0);
        assert!(!session.undo_last_move());

        session.apply_move(Move::Up);
        session.apply_move(Move::Left);
        session.reset();
        assert_eq!(session.state(), &start);
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn test_session_shuffle_restarts_history() {
        let mut session = Session::new(PuzzleState::goal());
        session.shuffle(7);
        assert!(session.state().is_solvable());
        assert_eq!(session.moves(), 0);
        assert!(!session.undo_last_move());
    }
}
