//! Drag Gesture Workflow Tests
//!
//! Full gestures from pick-up to drop: placement, rotation, rollback,
//! return to panel, and the single save per gesture.

use crate::helpers::{
    TestInventoryBuilder, UNIT, assert_consistent, assert_in_panel, assert_placed, cell_center, drag_from_panel,
    drag_placed, far_outside, id,
};
use satchel::types::point;
use satchel::{DropOutcome, Modifiers};

#[test]
fn test_panel_item_placed_on_empty_grid() {
    let (mut controller, store) = TestInventoryBuilder::new().with_panel_item("sword", 2, 1).build();

    let outcome = drag_from_panel(&mut controller, "sword", cell_center(3, 2));

    assert_eq!(
        outcome,
        DropOutcome::Placed {
            id: id("sword"),
            x: 3,
            y: 2
        }
    );
    assert_placed(&controller, "sword", (3, 2), (2, 1));
    assert!(controller.grid().panel().is_empty());
    assert_eq!(controller.grid().occupant_at(3, 2), Some(&id("sword")));
    assert_eq!(controller.grid().occupant_at(4, 2), Some(&id("sword")));
    assert_eq!(controller.grid().occupant_at(5, 2), None);
    assert_eq!(store.save_count(), 1);
    assert!(!controller.ghost().is_visible());
    assert_consistent(&controller);
}

#[test]
fn test_rotation_mid_drag_swaps_footprint() {
    let (mut controller, _store) = TestInventoryBuilder::new().with_panel_item("sword", 2, 1).build();

    assert!(controller.begin_panel_drag(&id("sword"), Some(cell_center(5, 1))));
    assert!(controller.key_down("r", Modifiers::none()));
    assert_eq!(controller.ghost().preview_size().width, 1);
    assert_eq!(controller.ghost().preview_size().height, 2);

    controller.pointer_up(cell_center(5, 1));

    let placed = controller.grid().placed_item(&id("sword")).unwrap();
    assert_eq!((placed.x, placed.y, placed.width, placed.height), (5, 1, 1, 2));
    assert!(placed.rotated);
    assert_eq!((placed.original_width, placed.original_height), (2, 1));
}

#[test]
fn test_rotate_twice_restores_preview() {
    let (mut controller, _store) = TestInventoryBuilder::new().with_panel_item("spear", 1, 3).build();

    controller.begin_panel_drag(&id("spear"), Some(cell_center(0, 0)));
    controller.rotate_drag();
    controller.rotate_drag();

    assert!(!controller.ghost().preview_rotated());
    assert_eq!(controller.ghost().preview_size().height, 3);
}

#[test]
fn test_rotation_is_noop_when_idle() {
    let (mut controller, store) = TestInventoryBuilder::new().build();
    assert!(!controller.key_down("R", Modifiers::none()));
    assert_eq!(store.save_count(), 0);
}

#[test]
fn test_drop_under_zoom_resolves_cell() {
    let (mut controller, _store) = TestInventoryBuilder::new()
        .with_panel_item("shield", 2, 2)
        .with_viewport(2.0, (0.0, 0.0))
        .build();

    // Cell (2, 1) spans container x 86..126, y 43..83; screen doubles it.
    let pointer = point((2.0 * UNIT + 20.0) * 2.0, (UNIT + 20.0) * 2.0);
    drag_from_panel(&mut controller, "shield", pointer);

    assert_placed(&controller, "shield", (2, 1), (2, 2));
}

#[test]
fn test_ghost_clamps_footprint_inside_grid() {
    let (mut controller, _store) = TestInventoryBuilder::new().with_panel_item("spear", 1, 3).build();

    controller.begin_panel_drag(&id("spear"), Some(cell_center(9, 5)));
    let cell = controller.ghost().last_position().cell().unwrap();
    assert_eq!((cell.x, cell.y), (9, 3));

    controller.pointer_up(cell_center(9, 5));
    assert_placed(&controller, "spear", (9, 3), (1, 3));
}

#[test]
fn test_invalid_grid_drop_rolls_back() {
    let (mut controller, store) = TestInventoryBuilder::new()
        .with_placed_item("a", 2, 2, (0, 0))
        .with_placed_item("b", 2, 2, (4, 0))
        .build();

    let outcome = drag_placed(&mut controller, cell_center(0, 0), cell_center(4, 0));

    assert_eq!(outcome, DropOutcome::RolledBack(id("a")));
    assert_placed(&controller, "a", (0, 0), (2, 2));
    assert_placed(&controller, "b", (4, 0), (2, 2));
    assert_eq!(store.save_count(), 1);
    assert_consistent(&controller);
}

#[test]
fn test_rollback_keeps_rotation() {
    let (mut controller, _store) = TestInventoryBuilder::new()
        .with_rotated_item("sword", 2, 1, (0, 0))
        .with_placed_item("wall", 1, 2, (5, 0))
        .build();

    drag_placed(&mut controller, cell_center(0, 0), cell_center(5, 0));

    let sword = controller.grid().placed_item(&id("sword")).unwrap();
    assert_eq!((sword.x, sword.y, sword.width, sword.height), (0, 0, 1, 2));
    assert!(sword.rotated);
}

#[test]
fn test_grid_item_moved_to_free_cells() {
    let (mut controller, _store) = TestInventoryBuilder::new()
        .with_placed_item("a", 2, 2, (0, 0))
        .build();

    let outcome = drag_placed(&mut controller, cell_center(0, 0), cell_center(6, 3));

    assert_eq!(
        outcome,
        DropOutcome::Placed {
            id: id("a"),
            x: 6,
            y: 3
        }
    );
    assert_placed(&controller, "a", (6, 3), (2, 2));
    assert_eq!(controller.grid().occupant_at(0, 0), None);
    assert_consistent(&controller);
}

#[test]
fn test_item_can_overlap_its_own_previous_cells() {
    let (mut controller, _store) = TestInventoryBuilder::new()
        .with_placed_item("a", 2, 2, (0, 0))
        .build();

    drag_placed(&mut controller, cell_center(0, 0), cell_center(1, 1));

    assert_placed(&controller, "a", (1, 1), (2, 2));
}

#[test]
fn test_grid_item_dropped_outside_returns_to_panel() {
    let (mut controller, store) = TestInventoryBuilder::new()
        .with_rotated_item("sword", 2, 1, (3, 3))
        .build();

    let outcome = drag_placed(&mut controller, cell_center(3, 3), far_outside());

    assert_eq!(outcome, DropOutcome::ReturnedToPanel(id("sword")));
    assert_in_panel(&controller, "sword");
    let sword = controller.grid().panel_item(&id("sword")).unwrap();
    assert_eq!((sword.width, sword.height), (2, 1));
    assert!(controller.grid().placed().is_empty());
    assert_eq!(store.save_count(), 1);
}

#[test]
fn test_panel_item_dropped_outside_stays_in_panel() {
    let (mut controller, store) = TestInventoryBuilder::new().with_panel_item("sword", 2, 1).build();

    assert!(controller.begin_panel_drag(&id("sword"), None));
    let outcome = controller.pointer_up(point(-50.0, -50.0));

    assert_eq!(outcome, DropOutcome::StayedInPanel(id("sword")));
    assert_in_panel(&controller, "sword");
    assert!(controller.grid().placed().is_empty());
    assert_eq!(store.save_count(), 1);
}

#[test]
fn test_panel_item_dropped_on_occupied_cells_stays_in_panel() {
    let (mut controller, _store) = TestInventoryBuilder::new()
        .with_placed_item("a", 2, 2, (0, 0))
        .with_panel_item("shield", 2, 2)
        .build();

    let outcome = drag_from_panel(&mut controller, "shield", cell_center(1, 1));

    assert_eq!(outcome, DropOutcome::StayedInPanel(id("shield")));
    assert_in_panel(&controller, "shield");
    assert_eq!(controller.grid().panel().len(), 1);
    assert_consistent(&controller);
}

#[test]
fn test_click_selects_without_moving() {
    let (mut controller, _store) = TestInventoryBuilder::new()
        .with_placed_item("a", 2, 2, (0, 0))
        .build();

    assert!(controller.pointer_down(cell_center(1, 1)));
    assert!(controller.is_dragging());
    assert_eq!(controller.grid().occupant_at(0, 0), None);

    let outcome = controller.pointer_up(cell_center(1, 1));

    assert_eq!(outcome, DropOutcome::Selected(id("a")));
    assert_placed(&controller, "a", (0, 0), (2, 2));
    assert_eq!(controller.selection(), Some(&id("a")));
}

#[test]
fn test_small_jitter_does_not_move_item() {
    let (mut controller, _store) = TestInventoryBuilder::new()
        .with_placed_item("a", 2, 2, (0, 0))
        .build();

    let press = cell_center(1, 1);
    controller.pointer_down(press);
    controller.pointer_move(point(press.x + 1.0, press.y + 1.0));
    controller.pointer_up(point(press.x + 1.0, press.y + 1.0));

    assert_placed(&controller, "a", (0, 0), (2, 2));
}

#[test]
fn test_press_on_empty_cell_clears_selection() {
    let (mut controller, _store) = TestInventoryBuilder::new()
        .with_placed_item("a", 1, 1, (0, 0))
        .build();

    controller.pointer_down(cell_center(0, 0));
    controller.pointer_up(cell_center(0, 0));
    assert!(controller.selection().is_some());

    assert!(!controller.pointer_down(cell_center(5, 5)));
    assert!(controller.selection().is_none());
    assert!(!controller.is_dragging());
}

#[test]
fn test_escape_cancels_like_invalid_drop() {
    let (mut controller, store) = TestInventoryBuilder::new()
        .with_placed_item("a", 2, 1, (2, 2))
        .build();

    controller.pointer_down(cell_center(2, 2));
    controller.pointer_move(cell_center(7, 4));
    assert!(controller.key_down("Escape", Modifiers::none()));

    assert_placed(&controller, "a", (2, 2), (2, 1));
    assert!(!controller.is_dragging());
    assert!(!controller.ghost().is_visible());
    assert_eq!(store.save_count(), 1);
}

#[test]
fn test_cancel_panel_drag_keeps_item() {
    let (mut controller, _store) = TestInventoryBuilder::new().with_panel_item("sword", 2, 1).build();

    controller.begin_panel_drag(&id("sword"), Some(cell_center(0, 0)));
    assert_eq!(controller.cancel(), DropOutcome::StayedInPanel(id("sword")));
    assert_in_panel(&controller, "sword");
}

#[test]
fn test_one_save_per_gesture() {
    let (mut controller, store) = TestInventoryBuilder::new().with_panel_item("sword", 2, 1).build();

    controller.begin_panel_drag(&id("sword"), Some(cell_center(0, 0)));
    for x in 0..8 {
        controller.pointer_move(cell_center(x, 1));
    }
    assert_eq!(store.save_count(), 0);

    controller.pointer_up(cell_center(7, 1));
    assert_eq!(store.save_count(), 1);
    assert_eq!(controller.move_stats().count(), 8);

    let stored = store.stored_snapshot().unwrap();
    assert_eq!(stored.placed.len(), 1);
    assert_eq!(stored.placed[0].x, 7);
}

#[test]
fn test_pointer_up_when_idle_is_ignored() {
    let (mut controller, store) = TestInventoryBuilder::new().build();
    assert_eq!(controller.pointer_up(cell_center(0, 0)), DropOutcome::Ignored);
    assert_eq!(controller.cancel(), DropOutcome::Ignored);
    assert_eq!(store.save_count(), 0);
}

#[test]
fn test_second_pick_refused_during_drag() {
    let (mut controller, _store) = TestInventoryBuilder::new()
        .with_panel_item("sword", 2, 1)
        .with_panel_item("spear", 1, 3)
        .build();

    assert!(controller.begin_panel_drag(&id("sword"), None));
    assert!(!controller.begin_panel_drag(&id("spear"), None));
    assert_eq!(controller.state().dragged_item_id(), Some(&id("sword")));
}

#[test]
fn test_ghost_hidden_outside_grid() {
    let (mut controller, _store) = TestInventoryBuilder::new().with_panel_item("sword", 2, 1).build();

    controller.begin_panel_drag(&id("sword"), Some(cell_center(1, 1)));
    assert!(controller.ghost().is_visible());
    assert!(controller.ghost().is_preview_cell(2, 1));

    controller.pointer_move(far_outside());
    assert!(!controller.ghost().is_visible());
    assert!(controller.ghost().preview_cells().is_empty());
    assert!(controller.ghost().last_position().cell().is_none());
}

#[test]
fn test_save_failure_surfaces_as_toast() {
    let (mut controller, store) = TestInventoryBuilder::new().with_panel_item("sword", 2, 1).build();
    store.set_fail_saves(true);

    drag_from_panel(&mut controller, "sword", cell_center(0, 0));

    assert_placed(&controller, "sword", (0, 0), (2, 1));
    let toast = controller.toasts().latest().unwrap();
    assert!(toast.message.starts_with("Save failed"));
}

#[test]
fn test_occupancy_stays_consistent_over_many_gestures() {
    let (mut controller, _store) = TestInventoryBuilder::new()
        .with_panel_item("sword", 2, 1)
        .with_panel_item("spear", 1, 3)
        .with_panel_item("shield", 2, 2)
        .build();

    drag_from_panel(&mut controller, "sword", cell_center(0, 0));
    drag_from_panel(&mut controller, "spear", cell_center(0, 2));
    drag_from_panel(&mut controller, "shield", cell_center(3, 0));
    // Refused: overlaps the sword.
    drag_placed(&mut controller, cell_center(3, 0), cell_center(0, 0));
    assert_consistent(&controller);
    assert!(controller.grid().panel().is_empty());

    drag_placed(&mut controller, cell_center(1, 0), cell_center(4, 2));
    drag_placed(&mut controller, cell_center(0, 2), cell_center(9, 0));
    drag_placed(&mut controller, cell_center(3, 0), far_outside());
    assert_consistent(&controller);
    assert_placed(&controller, "sword", (4, 2), (2, 1));
    assert_placed(&controller, "spear", (9, 0), (1, 3));
    assert_in_panel(&controller, "shield");

    let placed = controller.grid().placed().len();
    let panel = controller.grid().panel().len();
    assert_eq!(placed + panel, 3);
}
