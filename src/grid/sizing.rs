//! Grid dimension limits and the stat-derived default size.

use crate::constants::{MAX_COLS, MAX_ROWS, MIN_COLS, MIN_ROWS};
use serde::{Deserialize, Serialize};

/// Character attributes that drive the default inventory size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStats {
    pub strength: u32,
    pub intelligence: u32,
    pub determination: u32,
}

/// Clamp requested dimensions into the supported range.
///
/// Returns `(rows, cols)`.
pub fn clamp_dimensions(rows: u32, cols: u32) -> (u32, u32) {
    (rows.clamp(MIN_ROWS, MAX_ROWS), cols.clamp(MIN_COLS, MAX_COLS))
}

/// Default grid size for a character, returned as `(rows, cols)`.
///
/// Intelligence widens the grid and strength deepens it; determination adds
/// to both. Never smaller than the minimum dimensions.
pub fn calc_default_size(stats: CharacterStats) -> (u32, u32) {
    let cols = (stats.intelligence / 2).saturating_add(stats.determination).max(MIN_COLS);
    let rows = (stats.strength / 2).saturating_add(stats.determination).max(MIN_ROWS);
    (rows, cols)
}
