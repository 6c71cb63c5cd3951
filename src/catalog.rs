//! Default item catalogue.
//!
//! A fresh inventory starts with the catalogue items in its panel. The
//! catalogue can be supplied as an `items.json` file; when that is missing
//! or unreadable the built-in Sword, Spear and Shield are used.
//!
//! ```json
//! [{ "name": "Sword", "width": 2, "height": 1, "img": null, "color": "#2b8a3e" }]
//! ```

use crate::constants::{CATALOG_MAX_HEIGHT, CATALOG_MAX_WIDTH, DEFAULT_ITEM_COLOR, DEFAULT_MAX_STRESS};
use crate::types::{ImageRef, Item};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

const BUILTIN: [(&str, u32, u32); 3] = [("Sword", 2, 1), ("Spear", 1, 3), ("Shield", 2, 2)];

const UNNAMED_ITEM: &str = "Unnamed item";

/// One catalogue entry. Every field is optional; gaps get defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogEntry {
    name: Option<String>,
    width: Option<i64>,
    height: Option<i64>,
    img: Option<String>,
    color: Option<String>,
    max_stress: Option<i64>,
    current_stress: Option<i64>,
}

impl CatalogEntry {
    fn into_item(self) -> Item {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| UNNAMED_ITEM.to_string());
        let width = self.width.unwrap_or(1).clamp(1, i64::from(CATALOG_MAX_WIDTH)) as u32;
        let height = self.height.unwrap_or(1).clamp(1, i64::from(CATALOG_MAX_HEIGHT)) as u32;

        let mut item = Item::new(name, width, height);
        item.image = self.img.filter(|s| !s.is_empty()).map(ImageRef::new);
        item.color = self.color.unwrap_or_else(|| DEFAULT_ITEM_COLOR.to_string());
        item.max_stress = clamp_u32(self.max_stress.unwrap_or(i64::from(DEFAULT_MAX_STRESS)));
        item.current_stress = clamp_u32(self.current_stress.unwrap_or(0));
        item
    }
}

fn clamp_u32(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

/// The built-in catalogue, each item with a fresh id.
pub fn builtin_items() -> Vec<Item> {
    BUILTIN
        .iter()
        .map(|&(name, width, height)| Item::new(name, width, height))
        .collect()
}

/// Parse a catalogue document, clamping sizes to the catalogue limits.
pub fn parse_catalog(json: &str) -> serde_json::Result<Vec<Item>> {
    let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
    Ok(entries.into_iter().map(CatalogEntry::into_item).collect())
}

/// Load the catalogue from `path`, falling back to the built-in items.
pub fn load_catalog(path: Option<&Path>) -> Vec<Item> {
    let Some(path) = path else {
        return builtin_items();
    };

    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "No catalogue file, using built-in items");
            return builtin_items();
        }
    };

    match parse_catalog(&json) {
        Ok(items) if !items.is_empty() => items,
        Ok(_) => {
            warn!(path = %path.display(), "Catalogue file is empty, using built-in items");
            builtin_items()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not parse catalogue, using built-in items");
            builtin_items()
        }
    }
}
