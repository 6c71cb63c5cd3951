//! Stored document format and the sanitizing decoder.
//!
//! ```json
//! { "version": 2, "items": [...], "placed": [...], "rows": 6, "cols": 10, "timestamp": 1700000000000 }
//! ```
//!
//! Decoding never fails. A document that does not parse or carries another
//! version is discarded with a [`LoadNotice`]; entries that are individually
//! invalid are dropped with a warning and the rest is kept.

use super::{LoadNotice, LoadedInventory};
use crate::constants::{
    DATA_VERSION, DEFAULT_COLS, DEFAULT_ITEM_COLOR, DEFAULT_MAX_STRESS, DEFAULT_ROWS, MAX_COLS, MAX_ROWS,
};
use crate::grid::{GridModel, InventorySnapshot, clamp_dimensions};
use crate::types::{ImageRef, Item, ItemId, PlacedItem};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

const UNNAMED_ITEM: &str = "Unnamed item";

#[derive(Serialize)]
struct StoredInventory<'a> {
    version: u32,
    items: &'a [Item],
    placed: &'a [PlacedItem],
    rows: u32,
    cols: u32,
    timestamp: u64,
}

/// Loosely typed view of a stored document; every field may be missing.
#[derive(Deserialize)]
struct RawDocument {
    version: Option<u64>,
    #[serde(default)]
    items: Value,
    #[serde(default)]
    placed: Value,
    rows: Option<i64>,
    cols: Option<i64>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawItem {
    id: Option<String>,
    name: Option<String>,
    width: Option<i64>,
    height: Option<i64>,
    color: Option<String>,
    image: Option<String>,
    max_stress: Option<i64>,
    current_stress: Option<i64>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawPlacedItem {
    #[serde(flatten)]
    item: RawItem,
    x: Option<i64>,
    y: Option<i64>,
    rotated: bool,
    original_width: Option<i64>,
    original_height: Option<i64>,
}

/// Serialize a snapshot into the stored document.
pub fn encode(snapshot: &InventorySnapshot) -> serde_json::Result<String> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    serde_json::to_string_pretty(&StoredInventory {
        version: DATA_VERSION,
        items: &snapshot.items,
        placed: &snapshot.placed,
        rows: snapshot.rows,
        cols: snapshot.cols,
        timestamp,
    })
}

/// Whether `raw` is a parseable document of the current version.
pub fn is_current(raw: &str) -> bool {
    serde_json::from_str::<RawDocument>(raw)
        .map(|doc| doc.version == Some(u64::from(DATA_VERSION)))
        .unwrap_or(false)
}

/// A fresh inventory: the catalogue in the panel and an empty default grid.
pub fn fresh(catalog: Vec<Item>) -> InventorySnapshot {
    InventorySnapshot {
        items: catalog,
        placed: Vec::new(),
        rows: DEFAULT_ROWS,
        cols: DEFAULT_COLS,
    }
}

/// Decode a stored document, sanitizing it into a consistent snapshot.
///
/// `catalog` is only called when defaults are needed.
pub fn decode(raw: &str, catalog: impl FnOnce() -> Vec<Item>) -> LoadedInventory {
    let doc: RawDocument = match serde_json::from_str(raw) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(error = %e, "Stored inventory is corrupted, restoring defaults");
            return LoadedInventory {
                snapshot: fresh(catalog()),
                notice: Some(LoadNotice::Corrupted { reason: e.to_string() }),
            };
        }
    };

    if doc.version != Some(u64::from(DATA_VERSION)) {
        warn!(found = ?doc.version, expected = DATA_VERSION, "Stored inventory version mismatch, restoring defaults");
        return LoadedInventory {
            snapshot: fresh(catalog()),
            notice: Some(LoadNotice::VersionMismatch {
                found: doc.version,
                expected: DATA_VERSION,
            }),
        };
    }

    let (rows, cols) = clamp_dimensions(
        dimension(doc.rows, DEFAULT_ROWS),
        dimension(doc.cols, DEFAULT_COLS),
    );

    let mut items = sanitize_items(doc.items);
    let placed = sanitize_placed(doc.placed, rows, cols);
    if items.is_empty() {
        warn!("No valid panel items stored, loading the default catalogue");
        items = catalog();
    }

    let (grid, rejected) = GridModel::from_snapshot(InventorySnapshot {
        items,
        placed,
        rows,
        cols,
    });
    if !rejected.is_empty() {
        warn!(count = rejected.len(), "Dropped conflicting stored entries");
    }

    let snapshot = grid.snapshot();
    info!(
        panel = snapshot.items.len(),
        placed = snapshot.placed.len(),
        rows,
        cols,
        "Inventory loaded"
    );
    LoadedInventory {
        snapshot,
        notice: None,
    }
}

fn dimension(value: Option<i64>, default: u32) -> u32 {
    value
        .filter(|v| *v > 0)
        .map(|v| v.min(i64::from(u32::MAX)) as u32)
        .unwrap_or(default)
}

fn entries(value: Value, what: &str) -> Vec<Value> {
    match value {
        Value::Array(entries) => entries,
        Value::Null => Vec::new(),
        _ => {
            warn!(what, "Stored list is not an array, ignoring it");
            Vec::new()
        }
    }
}

fn stress(value: Option<i64>, default: u32) -> u32 {
    value
        .map(|v| v.clamp(0, i64::from(u32::MAX)) as u32)
        .unwrap_or(default)
}

/// Size within `1..=max`, or `None`.
fn extent(value: Option<i64>, max: u32) -> Option<u32> {
    value
        .filter(|v| *v >= 1 && *v <= i64::from(max))
        .map(|v| v as u32)
}

impl RawItem {
    fn into_item(self, name: String, width: u32, height: u32) -> Item {
        let max_stress = stress(self.max_stress, DEFAULT_MAX_STRESS);
        Item {
            id: self.id.filter(|id| !id.is_empty()).map(ItemId::from).unwrap_or_else(ItemId::generate),
            name,
            width,
            height,
            color: self.color.unwrap_or_else(|| DEFAULT_ITEM_COLOR.to_string()),
            image: self.image.filter(|s| !s.is_empty()).map(ImageRef::new),
            max_stress,
            current_stress: stress(self.current_stress, 0).min(max_stress),
        }
    }
}

/// Panel items are bounded by the largest grid, not the stored one: a
/// shrinking resize leaves items in the panel that no longer fit.
fn sanitize_items(value: Value) -> Vec<Item> {
    let mut items = Vec::new();
    for entry in entries(value, "items") {
        let raw: RawItem = match serde_json::from_value(entry) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Dropping malformed panel item");
                continue;
            }
        };
        let Some(name) = raw.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) else {
            warn!("Dropping panel item without a name");
            continue;
        };
        let name = name.to_string();
        let (Some(width), Some(height)) = (extent(raw.width, MAX_COLS), extent(raw.height, MAX_ROWS)) else {
            warn!(item = %name, width = ?raw.width, height = ?raw.height, "Dropping panel item with invalid size");
            continue;
        };
        items.push(raw.into_item(name, width, height));
    }
    items
}

fn sanitize_placed(value: Value, rows: u32, cols: u32) -> Vec<PlacedItem> {
    let mut placed = Vec::new();
    for entry in entries(value, "placed") {
        let raw: RawPlacedItem = match serde_json::from_value(entry) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Dropping malformed placement");
                continue;
            }
        };
        let (Some(width), Some(height)) = (extent(raw.item.width, cols), extent(raw.item.height, rows)) else {
            warn!(width = ?raw.item.width, height = ?raw.item.height, "Dropping placement with invalid size");
            continue;
        };
        let (Some(x), Some(y)) = (raw.x.filter(|x| *x >= 0), raw.y.filter(|y| *y >= 0)) else {
            warn!(x = ?raw.x, y = ?raw.y, "Dropping placement with invalid position");
            continue;
        };
        if x + i64::from(width) > i64::from(cols) || y + i64::from(height) > i64::from(rows) {
            warn!(x, y, width, height, "Dropping placement outside the grid");
            continue;
        }

        // Originals are the footprint turned back, whatever was stored.
        let originals = if raw.rotated { (height, width) } else { (width, height) };
        if (raw.original_width, raw.original_height)
            != (Some(i64::from(originals.0)), Some(i64::from(originals.1)))
        {
            debug!(x, y, "Repairing stored original size");
        }

        let name = raw
            .item
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(UNNAMED_ITEM)
            .to_string();
        let rotated = raw.rotated;
        let item = raw.item.into_item(name, originals.0, originals.1);
        placed.push(PlacedItem {
            x: x as u32,
            y: y as u32,
            width,
            height,
            rotated,
            original_width: item.width,
            original_height: item.height,
            id: item.id,
            name: item.name,
            color: item.color,
            image: item.image,
            max_stress: item.max_stress,
            current_stress: item.current_stress,
        });
    }
    placed
}
