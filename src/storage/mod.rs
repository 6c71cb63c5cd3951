//! Inventory persistence.
//!
//! The controller talks to an [`InventoryStore`]; two backends exist:
//!
//! - [`JsonFileStore`] - versioned JSON document written atomically
//! - [`MemoryStore`] - shared in-memory document for tests and embedding
//!
//! ## Error Handling
//!
//! `save` and `clear` return `StorageResult<T>`. `load` never fails: bad
//! data is discarded, defaults are returned and a [`LoadNotice`] tells the
//! host to warn the player once.

mod document;
mod error;
mod json_file;
mod memory;

pub use document::{decode, encode, fresh, is_current};
pub use error::*;
pub use json_file::*;
pub use memory::*;

use crate::grid::InventorySnapshot;

/// Why stored data was thrown away during load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadNotice {
    /// The document could not be parsed
    Corrupted { reason: String },
    /// The document was written by an incompatible version
    VersionMismatch { found: Option<u64>, expected: u32 },
}

impl LoadNotice {
    /// Player-facing text for the one-time warning.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Corrupted { .. } => "Inventory data was corrupted and has been reset.",
            Self::VersionMismatch { .. } => "Inventory data was from an older version and has been reset.",
        }
    }
}

/// Result of a load: always a usable snapshot, plus an optional notice.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedInventory {
    pub snapshot: InventorySnapshot,
    pub notice: Option<LoadNotice>,
}

/// Pluggable persistence backend.
pub trait InventoryStore {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Replace the stored inventory with `snapshot`.
    fn save(&mut self, snapshot: &InventorySnapshot) -> StorageResult<()>;

    /// Load and sanitize the stored inventory.
    ///
    /// Missing data yields the default catalogue. Unreadable data is
    /// removed, defaults are returned and a notice is attached.
    fn load(&mut self) -> LoadedInventory;

    /// Remove all stored data.
    fn clear(&mut self) -> StorageResult<()>;

    /// Whether a document of the current version is stored.
    fn has_saved_data(&self) -> bool;
}
