//! Error types for grid mutations.

use crate::types::ItemId;
use thiserror::Error;

/// Why a placement (or a mutation that implies one) was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// Footprint extends past the grid edge
    #[error("Footprint {width}x{height} at ({x}, {y}) is outside the {cols}x{rows} grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        cols: u32,
        rows: u32,
    },

    /// A footprint cell is already taken
    #[error("Cell ({x}, {y}) is occupied by {occupant}")]
    Occupied { x: u32, y: u32, occupant: ItemId },

    /// Zero-sized footprints never occupy anything
    #[error("Footprint has zero area")]
    EmptyFootprint,

    /// The id already exists in the panel or on the grid
    #[error("Item {0} already exists")]
    DuplicateId(ItemId),

    /// No item with this id
    #[error("Item {0} not found")]
    NotFound(ItemId),
}

/// Result type alias for grid operations
pub type PlacementResult<T> = Result<T, PlacementError>;
