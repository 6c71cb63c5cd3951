//! Ghost preview and per-cell view state seen through the controller.

use crate::helpers::{TestInventoryBuilder, cell_center, far_outside, id};
use satchel::render::{CellView, cell_views};
use satchel::DragController;

fn view_at(controller: &DragController, x: u32, y: u32) -> CellView {
    let cols = controller.grid().cols();
    cell_views(controller)[(y * cols + x) as usize].clone()
}

#[test]
fn test_valid_ghost_marks_preview_cells() {
    let (mut controller, _store) = TestInventoryBuilder::new().with_panel_item("sword", 2, 1).build();

    controller.begin_panel_drag(&id("sword"), Some(cell_center(2, 1)));

    assert_eq!(view_at(&controller, 2, 1), CellView::Preview);
    assert_eq!(view_at(&controller, 3, 1), CellView::Preview);
    assert_eq!(view_at(&controller, 4, 1), CellView::Empty);
    let previews = cell_views(&controller)
        .iter()
        .filter(|v| **v == CellView::Preview)
        .count();
    assert_eq!(previews, 2);
}

#[test]
fn test_invalid_ghost_leaves_cells_unmarked() {
    let (mut controller, _store) = TestInventoryBuilder::new()
        .with_panel_item("sword", 2, 1)
        .with_placed_item("rock", 1, 1, (3, 1))
        .build();

    controller.begin_panel_drag(&id("sword"), Some(cell_center(2, 1)));

    let frame = controller.ghost().frame().unwrap();
    assert!(!frame.valid);
    assert!(controller.ghost().preview_cells().is_empty());
    assert_eq!(view_at(&controller, 2, 1), CellView::Empty);
    assert!(view_at(&controller, 3, 1).is_occupied());
}

#[test]
fn test_hide_is_idempotent() {
    let (mut controller, _store) = TestInventoryBuilder::new().with_panel_item("sword", 2, 1).build();
    controller.begin_panel_drag(&id("sword"), Some(cell_center(0, 0)));

    controller.pointer_move(far_outside());
    controller.pointer_move(far_outside());

    assert!(!controller.ghost().is_visible());
    let position = controller.ghost().last_position();
    assert_eq!((position.x, position.y, position.valid), (None, None, true));
    assert!(cell_views(&controller).iter().all(|v| *v == CellView::Empty));
}

#[test]
fn test_selected_item_is_flagged() {
    let (mut controller, _store) = TestInventoryBuilder::new()
        .with_placed_item("shield", 2, 2, (0, 0))
        .build();

    controller.pointer_down(cell_center(1, 1));
    controller.pointer_up(cell_center(1, 1));

    let expected = CellView::Occupied {
        item: id("shield"),
        selected: true,
    };
    assert_eq!(view_at(&controller, 0, 0), expected);
    assert_eq!(view_at(&controller, 1, 1), expected);
    assert_eq!(view_at(&controller, 2, 0), CellView::Empty);
}

#[test]
fn test_pointer_moves_are_timed() {
    let (mut controller, _store) = TestInventoryBuilder::new().with_panel_item("sword", 2, 1).build();
    controller.begin_panel_drag(&id("sword"), Some(cell_center(0, 0)));

    for x in 0..4 {
        controller.pointer_move(cell_center(x, 2));
    }

    assert_eq!(controller.move_stats().count(), 4);
    controller.cancel();
}
