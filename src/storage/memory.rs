use super::document::{decode, encode, fresh, is_current};
use super::{InventoryStore, LoadedInventory, StorageError, StorageResult};
use crate::catalog::{builtin_items, load_catalog};
use crate::grid::InventorySnapshot;
use crate::types::Item;
use parking_lot::Mutex;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Default)]
struct MemoryState {
    document: Option<String>,
    saves: usize,
    fail_saves: bool,
}

/// In-memory store holding the encoded document.
///
/// Clones share the same document, so a test can keep one handle while
/// the controller owns another.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    catalog: Option<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a raw document, valid or not.
    pub fn with_document(document: impl Into<String>) -> Self {
        let store = Self::new();
        store.state.lock().document = Some(document.into());
        store
    }

    /// Store pre-populated with a snapshot.
    pub fn with_snapshot(snapshot: &InventorySnapshot) -> StorageResult<Self> {
        Ok(Self::with_document(encode(snapshot)?))
    }

    pub fn with_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog = Some(path.into());
        self
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.state.lock().saves
    }

    /// The raw stored document, if any.
    pub fn document(&self) -> Option<String> {
        self.state.lock().document.clone()
    }

    /// The stored inventory, decoded without defaults.
    pub fn stored_snapshot(&self) -> Option<InventorySnapshot> {
        let document = self.document()?;
        let loaded = decode(&document, Vec::new);
        loaded.notice.is_none().then_some(loaded.snapshot)
    }

    /// Make every following save fail, for exercising error paths.
    pub fn set_fail_saves(&self, fail: bool) {
        self.state.lock().fail_saves = fail;
    }

    fn catalog(&self) -> Vec<Item> {
        match &self.catalog {
            Some(path) => load_catalog(Some(path)),
            None => builtin_items(),
        }
    }
}

impl InventoryStore for MemoryStore {
    fn name(&self) -> &str {
        "MemoryStore"
    }

    fn save(&mut self, snapshot: &InventorySnapshot) -> StorageResult<()> {
        let document = encode(snapshot)?;
        let mut state = self.state.lock();
        if state.fail_saves {
            return Err(StorageError::Io(io::Error::other("memory store refuses saves")));
        }
        state.document = Some(document);
        state.saves += 1;
        Ok(())
    }

    fn load(&mut self) -> LoadedInventory {
        let Some(document) = self.document() else {
            return LoadedInventory {
                snapshot: fresh(self.catalog()),
                notice: None,
            };
        };
        let loaded = decode(&document, || self.catalog());
        if loaded.notice.is_some() {
            self.state.lock().document = None;
        }
        loaded
    }

    fn clear(&mut self) -> StorageResult<()> {
        self.state.lock().document = None;
        Ok(())
    }

    fn has_saved_data(&self) -> bool {
        self.state.lock().document.as_deref().is_some_and(is_current)
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MemoryStore")
            .field("stored", &state.document.is_some())
            .field("saves", &state.saves)
            .finish()
    }
}
