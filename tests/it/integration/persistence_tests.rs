//! Persistence Integration Tests
//!
//! Loading through the controller: defaults, corrupted data, sanitizing,
//! and a full save/reload cycle through the JSON file store.

use crate::helpers::{TestInventoryBuilder, assert_placed, cell_center, drag_from_panel, id};
use satchel::notifications::ToastVariant;
use satchel::settings::Settings;
use satchel::storage::{InventoryStore, JsonFileStore, MemoryStore};
use satchel::DragController;
use tempfile::tempdir;

#[test]
fn test_empty_store_loads_catalogue_at_configured_size() {
    let settings = Settings {
        grid_rows: 8,
        grid_cols: 12,
        ..Settings::default()
    };

    let controller = DragController::load(Box::new(MemoryStore::new()), &settings);

    assert_eq!((controller.grid().rows(), controller.grid().cols()), (8, 12));
    let names: Vec<&str> = controller.grid().panel().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Sword", "Spear", "Shield"]);
    assert_eq!(controller.toasts().count(), 0);
}

#[test]
fn test_corrupted_store_resets_with_one_warning() {
    let store = MemoryStore::with_document("{ this is not json");

    let controller = DragController::load(Box::new(store.clone()), &Settings::default());

    assert_eq!(controller.toasts().count(), 1);
    assert_eq!(controller.toasts().latest().unwrap().variant, ToastVariant::Warning);
    assert_eq!(controller.grid().panel().len(), 3);
    assert!(controller.grid().placed().is_empty());
    assert!(store.document().is_none());
}

#[test]
fn test_old_version_is_discarded() {
    let store = MemoryStore::with_document(r#"{"version": 1, "items": [], "placed": []}"#);

    let controller = DragController::load(Box::new(store), &Settings::default());

    let toast = controller.toasts().latest().unwrap();
    assert!(toast.message.contains("older version"));
}

#[test]
fn test_stored_state_survives_reload() {
    let (mut controller, store) = TestInventoryBuilder::new()
        .with_panel_item("sword", 2, 1)
        .with_panel_item("rope", 1, 1)
        .build();
    drag_from_panel(&mut controller, "sword", cell_center(4, 1));
    drop(controller);

    let reloaded = DragController::load(Box::new(store), &Settings::default());

    assert_placed(&reloaded, "sword", (4, 1), (2, 1));
    assert!(reloaded.grid().panel_item(&id("rope")).is_some());
    assert_eq!(reloaded.toasts().count(), 0);
}

#[test]
fn test_stored_grid_size_wins_over_settings() {
    let (mut controller, store) = TestInventoryBuilder::new()
        .with_size(4, 4)
        .with_panel_item("rope", 1, 1)
        .build();
    drag_from_panel(&mut controller, "rope", cell_center(0, 0));

    let settings = Settings {
        grid_rows: 10,
        grid_cols: 10,
        ..Settings::default()
    };
    let reloaded = DragController::load(Box::new(store), &settings);

    assert_eq!((reloaded.grid().rows(), reloaded.grid().cols()), (4, 4));
}

#[test]
fn test_json_file_round_trip_through_controller() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("inventory.json");
    let settings = Settings {
        inventory_path: Some(path.clone()),
        ..Settings::default()
    };

    let mut controller = DragController::open(&settings).unwrap();
    let sword = controller.grid().panel()[0].id.clone();
    assert!(controller.begin_panel_drag(&sword, Some(cell_center(0, 0))));
    controller.pointer_up(cell_center(0, 0));

    assert!(path.exists());
    assert!(JsonFileStore::new(&path).has_saved_data());

    let reloaded = DragController::open(&settings).unwrap();
    let placed = reloaded.grid().placed_item(&sword).unwrap();
    assert_eq!((placed.x, placed.y, placed.width, placed.height), (0, 0, 2, 1));
    assert_eq!(reloaded.grid().panel().len(), 2);
}

#[test]
fn test_items_evicted_by_resize_survive_reload() {
    let (mut controller, store) = TestInventoryBuilder::new()
        .with_placed_item("pike", 8, 1, (0, 0))
        .with_placed_item("rope", 1, 1, (0, 2))
        .build();

    let report = controller.resize_grid(4, 4);
    assert_eq!(report.evicted, vec![id("pike")]);
    drop(controller);

    let reloaded = DragController::load(Box::new(store), &Settings::default());

    assert_eq!((reloaded.grid().rows(), reloaded.grid().cols()), (4, 4));
    let names: Vec<&str> = reloaded.grid().panel().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["pike"]);
    let pike = reloaded.grid().panel_item(&id("pike")).unwrap();
    assert_eq!((pike.width, pike.height), (8, 1));
    assert_placed(&reloaded, "rope", (0, 2), (1, 1));
    assert_eq!(reloaded.toasts().count(), 0);
}

#[test]
fn test_panel_item_wider_than_stored_grid_is_kept() {
    let store = MemoryStore::with_document(
        r#"{"version": 2, "rows": 3, "cols": 3,
            "items": [{"id": "ladder", "name": "Ladder", "width": 5, "height": 1}],
            "placed": []}"#,
    );

    let controller = DragController::load(Box::new(store), &Settings::default());

    let names: Vec<&str> = controller.grid().panel().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Ladder"]);
    assert_eq!(controller.toasts().count(), 0);
}
