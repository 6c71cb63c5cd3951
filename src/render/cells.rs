//! Per-cell view state for the host renderer.

use crate::input::DragController;
use crate::types::ItemId;

/// How one grid cell should be drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellView {
    Empty,
    /// Empty but under a valid ghost
    Preview,
    /// Covered by a placed item
    Occupied { item: ItemId, selected: bool },
}

impl CellView {
    pub fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied { .. })
    }
}

/// Classify every cell, row-major.
///
/// Occupancy wins over the preview mark, so a stale mark can never hide an
/// item.
pub fn cell_views(controller: &DragController) -> Vec<CellView> {
    let grid = controller.grid();
    let ghost = controller.ghost();
    let selection = controller.selection();

    let mut views = Vec::with_capacity((grid.rows() * grid.cols()) as usize);
    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            let view = match grid.occupant_at(x, y) {
                Some(id) => CellView::Occupied {
                    item: id.clone(),
                    selected: selection == Some(id),
                },
                None if ghost.is_preview_cell(x, y) => CellView::Preview,
                None => CellView::Empty,
            };
            views.push(view);
        }
    }
    views
}
