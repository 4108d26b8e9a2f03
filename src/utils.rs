//! Utility helpers for reading puzzle configurations.

use crate::engine::{PuzzleState, TILE_COUNT};

/// Parses a tile listing into a [`PuzzleState`].
///
/// The input holds nine whitespace-separated tokens — digits `0` through
/// `8`, each exactly once, row-major, `0` denoting the blank. Line breaks
/// count as whitespace, so both a single line and a three-line grid layout
/// parse.
///
/// # Arguments
/// * `s`: The textual tile listing.
///
/// # Returns
/// * `Ok(PuzzleState)` if the listing is a valid arrangement.
/// * `Err(String)` describing the first problem found: a non-digit token,
///   a wrong tile count, or a duplicate tile.
///
/// # Examples
/// ```
/// use npuzzle_solver::utils::tiles_from_str;
///
/// let state = tiles_from_str("1 2 3\n4 5 6\n7 0 8").unwrap();
/// assert_eq!(state.blank_index(), 7);
///
/// assert!(tiles_from_str("1 2 3").is_err());
/// assert!(tiles_from_str("1 2 3 4 5 6 7 8 9").is_err());
/// ```
pub fn tiles_from_str(s: &str) -> Result<PuzzleState, String> {
    let mut tiles = [0u8; TILE_COUNT];
    let mut count = 0usize;

    for token in s.split_whitespace() {
        if count >= TILE_COUNT {
            return Err(format!(
                "Too many tiles. Expected exactly {}, found more",
                TILE_COUNT
            ));
        }
        let value: u8 = token
            .parse()
            .map_err(|_| format!("Unrecognized tile '{}'. Expected a digit 0 through 8", token))?;
        tiles[count] = value;
        count += 1;
    }

    if count < TILE_COUNT {
        return Err(format!(
            "Not enough tiles. Expected exactly {}, found {}",
            TILE_COUNT, count
        ));
    }

    // Range and duplicate checks live in the state constructor.
    PuzzleState::new(tiles)
}
