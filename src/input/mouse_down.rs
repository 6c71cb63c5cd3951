//! Press handling - panel pick and grid pick.
//!
//! A press on a placed item lifts it off the grid at once and selects it.
//! The ghost starts on the item's own cells and only follows the pointer
//! after it travels past `DRAG_THRESHOLD`, so a plain click puts the item
//! back where it was.

use super::DragController;
use crate::input::coords::{CellPos, CoordinateContext, CoordinateConverter};
use crate::profile_scope;
use crate::types::{ItemId, Point};
use tracing::debug;

impl DragController {
    /// Start dragging a panel item.
    ///
    /// The item stays in the panel list until the drop commits it. The
    /// preview starts at the item's native size, unrotated. Returns false
    /// when a drag is already running or the id is not in the panel.
    pub fn begin_panel_drag(&mut self, item_id: &ItemId, pointer: Option<Point>) -> bool {
        profile_scope!("begin_panel_drag");

        if self.state.is_dragging() {
            debug!(item = %item_id, "Ignoring panel pick during a drag");
            return false;
        }
        let Some(item) = self.grid.panel_item(item_id).cloned() else {
            debug!(item = %item_id, "Panel pick of unknown item");
            return false;
        };

        self.press_origin = None;
        self.ghost.set_preview_size(item.width, item.height);
        self.ghost.set_preview_rotation(false);
        debug!(item = %item.id, w = item.width, h = item.height, "Picked from panel");
        self.state.start_panel_drag(item);

        if let Some(pointer) = pointer {
            self.last_pointer = Some(pointer);
            self.update_ghost(pointer);
        }
        true
    }

    /// Press on the grid.
    ///
    /// On an occupied cell the item is removed from the grid, remembered as
    /// the rollback target and selected. On an empty cell or off the grid
    /// the selection is cleared. Returns true when a drag started.
    pub fn pointer_down(&mut self, pointer: Point) -> bool {
        profile_scope!("pointer_down");

        if self.state.is_dragging() {
            return false;
        }

        let ctx = CoordinateContext::new(&self.viewport, &self.geometry, self.grid.rows(), self.grid.cols());
        let occupant = CoordinateConverter::screen_to_cell_exact(pointer, &ctx)
            .and_then(|cell| self.grid.occupant_at(cell.x, cell.y))
            .cloned();

        let Some(item_id) = occupant else {
            self.selection = None;
            return false;
        };
        let Some(placed) = self.grid.remove(&item_id, false) else {
            return false;
        };

        debug!(item = %placed.id, x = placed.x, y = placed.y, "Picked from grid");
        let home = CellPos {
            x: placed.x,
            y: placed.y,
        };
        self.ghost.set_preview_size(placed.width, placed.height);
        self.ghost.set_preview_rotation(placed.rotated);
        self.selection = Some(item_id);
        self.state.start_grid_drag(placed);
        self.press_origin = Some(pointer);
        self.last_pointer = Some(pointer);

        let ctx = CoordinateContext::new(&self.viewport, &self.geometry, self.grid.rows(), self.grid.cols());
        self.ghost.show(home, self.state.dragged_image(), &self.grid, &ctx);
        true
    }
}
