//! Snapshot tests using the insta crate.
//!
//! These pin the serialized shape of the inventory state and the catalogue,
//! which is what ends up in the stored document.
//!
//! To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use satchel::catalog::parse_catalog;
use satchel::grid::InventorySnapshot;
use satchel::storage::{decode, encode, is_current};
use satchel::types::{Footprint, Item};

fn sample_snapshot() -> InventorySnapshot {
    let spear = Item::new("Spear", 1, 3).with_id("spear");
    InventorySnapshot {
        items: vec![Item::new("Rope", 1, 2).with_id("rope")],
        placed: vec![spear.into_placed(0, 0, Footprint::new(3, 1), true)],
        rows: 6,
        cols: 10,
    }
}

// ============================================================================
// Inventory State
// ============================================================================

#[test]
fn snapshot_inventory_state() {
    insta::assert_json_snapshot!(sample_snapshot(), @r###"
    {
      "items": [
        {
          "id": "rope",
          "name": "Rope",
          "width": 1,
          "height": 2,
          "color": "#2b8a3e",
          "image": null,
          "max_stress": 3,
          "current_stress": 0
        }
      ],
      "placed": [
        {
          "id": "spear",
          "name": "Spear",
          "x": 0,
          "y": 0,
          "width": 3,
          "height": 1,
          "rotated": true,
          "original_width": 1,
          "original_height": 3,
          "color": "#2b8a3e",
          "image": null,
          "max_stress": 3,
          "current_stress": 0
        }
      ],
      "rows": 6,
      "cols": 10
    }
    "###);
}

#[test]
fn test_stored_document_reloads_unchanged() {
    let snapshot = sample_snapshot();
    let raw = encode(&snapshot).unwrap();

    assert!(is_current(&raw));
    let loaded = decode(&raw, Vec::new);
    assert!(loaded.notice.is_none());
    assert_eq!(loaded.snapshot, snapshot);

    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["version"], 2);
    assert!(doc["timestamp"].as_u64().is_some());
}

// ============================================================================
// Catalogue
// ============================================================================

#[test]
fn snapshot_parsed_catalogue() {
    let items = parse_catalog(
        r##"[
            {"name": " Torch ", "width": 1, "height": 2, "img": "data:image/png;base64,AAAA"},
            {"width": 99, "color": "#123456", "current_stress": -4}
        ]"##,
    )
    .unwrap();

    insta::assert_json_snapshot!(items, { "[].id" => "[id]" }, @r###"
    [
      {
        "id": "[id]",
        "name": "Torch",
        "width": 1,
        "height": 2,
        "color": "#2b8a3e",
        "image": "data:image/png;base64,AAAA",
        "max_stress": 3,
        "current_stress": 0
      },
      {
        "id": "[id]",
        "name": "Unnamed item",
        "width": 10,
        "height": 1,
        "color": "#123456",
        "image": null,
        "max_stress": 3,
        "current_stress": 0
      }
    ]
    "###);
}
