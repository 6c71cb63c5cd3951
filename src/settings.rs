//! User settings, stored as JSON in the platform config directory.
//!
//! Every field has a default, so a partial or empty file is valid. A file
//! that does not parse is ignored with a warning.

use crate::constants::{APP_DIR_NAME, CELL_GAP, CELL_SIZE, DEFAULT_COLS, DEFAULT_ROWS, SETTINGS_FILE_NAME};
use crate::grid::clamp_dimensions;
use crate::input::coords::GridGeometry;
use crate::storage::{JsonFileStore, StorageResult};
use crate::types::Point;
use crate::viewport::ZoomLimits;
use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default location of the settings file.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Grid height used for a fresh inventory
    pub grid_rows: u32,
    /// Grid width used for a fresh inventory
    pub grid_cols: u32,
    pub cell_size: f32,
    pub cell_gap: f32,
    pub zoom: ZoomLimits,
    /// Inventory document; the platform data dir when unset
    pub inventory_path: Option<PathBuf>,
    /// `items.json` catalogue for fresh inventories
    pub catalog_path: Option<PathBuf>,
    /// `tracing` filter used when `SATCHEL_LOG` is not set
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_rows: DEFAULT_ROWS,
            grid_cols: DEFAULT_COLS,
            cell_size: CELL_SIZE,
            cell_gap: CELL_GAP,
            zoom: ZoomLimits::default(),
            inventory_path: None,
            catalog_path: None,
            log_filter: "satchel=info".to_string(),
        }
    }
}

impl Settings {
    /// Load from the default path, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = default_settings_path() else {
            return Self::default();
        };
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable settings");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let settings: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(settings.validated())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Bring out-of-range values back to something usable.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        (self.grid_rows, self.grid_cols) = clamp_dimensions(self.grid_rows, self.grid_cols);
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            self.cell_size = defaults.cell_size;
        }
        if !(self.cell_gap.is_finite() && self.cell_gap >= 0.0) {
            self.cell_gap = defaults.cell_gap;
        }
        if !self.zoom.is_valid() {
            self.zoom = defaults.zoom;
        }
        self
    }

    /// Grid geometry with the grid at the container origin.
    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(Point::default(), self.cell_size, self.cell_gap)
    }

    /// The inventory store these settings point at.
    pub fn open_store(&self) -> StorageResult<JsonFileStore> {
        let store = match &self.inventory_path {
            Some(path) => JsonFileStore::new(path),
            None => JsonFileStore::open_default()?,
        };
        Ok(match &self.catalog_path {
            Some(catalog) => store.with_catalog(catalog),
            None => store,
        })
    }
}
