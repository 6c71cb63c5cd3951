use super::document::{decode, encode, fresh, is_current};
use super::{InventoryStore, LoadedInventory, StorageError, StorageResult};
use crate::catalog::load_catalog;
use crate::constants::{APP_DIR_NAME, INVENTORY_FILE_NAME};
use crate::grid::InventorySnapshot;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Default location of the inventory document.
///
/// `$XDG_DATA_HOME/satchel/inventory.json` on Linux, or the platform
/// equivalent.
pub fn default_inventory_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(APP_DIR_NAME).join(INVENTORY_FILE_NAME))
}

/// Inventory stored as a JSON document on disk.
///
/// # Atomic Writes
///
/// Saves write a temp file next to the target, flush it, then rename it
/// over the target, so a crash mid-save leaves the previous document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    catalog: Option<PathBuf>,
}

impl JsonFileStore {
    /// Store at `path`. The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            catalog: None,
        }
    }

    /// Store at the platform data directory.
    pub fn open_default() -> StorageResult<Self> {
        default_inventory_path()
            .map(Self::new)
            .ok_or(StorageError::NoDataDir)
    }

    /// Use an `items.json` catalogue for fresh inventories.
    pub fn with_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog = Some(path.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn discard(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "Could not remove unreadable inventory");
        }
    }
}

impl InventoryStore for JsonFileStore {
    fn name(&self) -> &str {
        "JsonFileStore"
    }

    fn save(&mut self, snapshot: &InventorySnapshot) -> StorageResult<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let document = encode(snapshot)?;
        let mut tmp = NamedTempFile::new_in(&parent)?;
        tmp.write_all(document.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StorageError::Persist {
            path: self.path.clone(),
            source: e.error,
        })?;

        debug!(path = %self.path.display(), bytes = document.len(), "Inventory saved");
        Ok(())
    }

    fn load(&mut self) -> LoadedInventory {
        crate::profile_scope!("inventory_load");

        let catalog = || load_catalog(self.catalog.as_deref());
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No stored inventory, loading defaults");
                return LoadedInventory {
                    snapshot: fresh(catalog()),
                    notice: None,
                };
            }
            // Unreadable bytes (bad UTF-8, permissions) count as corruption.
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Could not read stored inventory");
                String::new()
            }
        };

        let loaded = decode(&raw, catalog);
        if loaded.notice.is_some() {
            self.discard();
        }
        loaded
    }

    fn clear(&mut self) -> StorageResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn has_saved_data(&self) -> bool {
        fs::read_to_string(&self.path)
            .map(|raw| is_current(&raw))
            .unwrap_or(false)
    }
}
