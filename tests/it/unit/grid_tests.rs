//! GridModel tests through the public API.

use crate::helpers::{TestInventoryBuilder, id};
use satchel::grid::{GridModel, InventorySnapshot, PlacementError};
use satchel::types::{Footprint, Item};

fn placed(name: &str, w: u32, h: u32, x: u32, y: u32) -> satchel::types::PlacedItem {
    Item::new(name, w, h)
        .with_id(name)
        .into_placed(x, y, Footprint::new(w, h), false)
}

#[test]
fn test_can_place_is_pure() {
    let grid = TestInventoryBuilder::new()
        .with_placed_item("a", 2, 2, (0, 0))
        .build_grid();

    assert!(!grid.can_place(1, 1, 1, 1));
    assert!(grid.can_place(2, 0, 1, 1));
    assert!(!grid.can_place(9, 0, 2, 1));
    assert!(!grid.can_place(0, 0, 0, 1));
    grid.check_invariants().unwrap();
}

#[test]
fn test_place_refuses_overlap_without_side_effects() {
    let mut grid = TestInventoryBuilder::new()
        .with_placed_item("a", 2, 2, (0, 0))
        .build_grid();

    let err = grid.place(placed("b", 2, 1, 1, 1)).unwrap_err();

    assert!(matches!(err, PlacementError::Occupied { occupant, .. } if occupant == id("a")));
    assert!(grid.placed_item(&id("b")).is_none());
    assert_eq!(grid.occupant_at(2, 1), None);
}

#[test]
fn test_place_refuses_out_of_bounds() {
    let mut grid = GridModel::new(6, 10);
    let err = grid.place(placed("b", 1, 3, 0, 4)).unwrap_err();
    assert!(matches!(err, PlacementError::OutOfBounds { .. }));
}

#[test]
fn test_place_refuses_duplicate_id() {
    let mut grid = TestInventoryBuilder::new().with_panel_item("a", 1, 1).build_grid();
    let err = grid.place(placed("a", 1, 1, 5, 5)).unwrap_err();
    assert_eq!(err, PlacementError::DuplicateId(id("a")));
}

#[test]
fn test_remove_to_panel_restores_original_footprint() {
    let mut grid = TestInventoryBuilder::new()
        .with_rotated_item("spear", 1, 3, (0, 0))
        .build_grid();

    let removed = grid.remove(&id("spear"), true).unwrap();

    assert_eq!((removed.width, removed.height), (3, 1));
    let item = grid.panel_item(&id("spear")).unwrap();
    assert_eq!((item.width, item.height), (1, 3));
    assert_eq!(grid.occupant_at(0, 0), None);
    grid.check_invariants().unwrap();
}

#[test]
fn test_remove_unknown_is_noop() {
    let mut grid = GridModel::default();
    assert!(grid.remove(&id("nope"), true).is_none());
    assert!(grid.panel().is_empty());
}

#[test]
fn test_rotation_round_trip() {
    let mut grid = TestInventoryBuilder::new()
        .with_placed_item("sword", 2, 1, (3, 3))
        .build_grid();

    grid.rotate_placed(&id("sword")).unwrap();
    grid.rotate_placed(&id("sword")).unwrap();

    let sword = grid.placed_item(&id("sword")).unwrap();
    assert_eq!((sword.x, sword.y, sword.width, sword.height, sword.rotated), (3, 3, 2, 1, false));
}

#[test]
fn test_no_cell_has_two_owners_after_moves() {
    let mut grid = TestInventoryBuilder::new()
        .with_placed_item("a", 2, 2, (0, 0))
        .with_placed_item("b", 3, 1, (4, 4))
        .build_grid();

    for (x, y) in [(2, 0), (5, 0), (0, 3), (7, 1)] {
        let mut a = grid.remove(&id("a"), false).unwrap();
        let previous = a.clone();
        a.x = x;
        a.y = y;
        if grid.place(a).is_err() {
            grid.place(previous).unwrap();
        }
        grid.check_invariants().unwrap();
    }
}

#[test]
fn test_from_snapshot_drops_overlaps() {
    let snapshot = InventorySnapshot {
        items: vec![Item::new("rope", 1, 1).with_id("rope")],
        placed: vec![placed("a", 2, 2, 0, 0), placed("b", 1, 1, 1, 1)],
        rows: 6,
        cols: 10,
    };

    let (grid, rejected) = GridModel::from_snapshot(snapshot);

    assert_eq!(rejected, vec![id("b")]);
    assert_eq!(grid.placed().len(), 1);
    assert_eq!(grid.panel().len(), 1);
    grid.check_invariants().unwrap();
}

#[test]
fn test_panel_matching_is_case_insensitive() {
    let grid = TestInventoryBuilder::new()
        .with_panel_item("Longsword", 2, 1)
        .with_panel_item("Shield", 2, 2)
        .build_grid();

    let hits = grid.panel_matching("SWORD");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Longsword");
}
