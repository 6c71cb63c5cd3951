//! Drop resolution - commit, roll back or return the dragged item.
//!
//! Order of precedence at drop time:
//!
//! 1. Pointer outside the grid bounds: the item ends up in the panel.
//! 2. Last ghost position valid: commit with the preview size and rotation.
//! 3. Grid-sourced and invalid: roll back to the previous placement. If that
//!    no longer fits the item goes to the panel instead of being lost.
//! 4. Panel-sourced and invalid: the item never left the panel.
//!
//! Every resolved gesture is recorded and saved exactly once.

use super::DragController;
use super::state::DragState;
use crate::input::coords::{CellPos, CoordinateContext, CoordinateConverter};
use crate::profile_scope;
use crate::types::{Item, ItemId, PlacedItem, Point};
use tracing::{debug, info, warn};

/// How a gesture ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// No drag was in progress
    Ignored,
    /// A press and release without a move; the item is back in place and selected
    Selected(ItemId),
    /// The item now sits at `(x, y)`
    Placed { id: ItemId, x: u32, y: u32 },
    /// The grid item went back to its previous placement
    RolledBack(ItemId),
    /// The item was put on the panel with its original footprint
    ReturnedToPanel(ItemId),
    /// The panel item was not placed and is still in the panel
    StayedInPanel(ItemId),
}

impl DropOutcome {
    /// Id of the item the gesture concerned.
    pub fn item_id(&self) -> Option<&ItemId> {
        match self {
            Self::Ignored => None,
            Self::Selected(id)
            | Self::RolledBack(id)
            | Self::ReturnedToPanel(id)
            | Self::StayedInPanel(id)
            | Self::Placed { id, .. } => Some(id),
        }
    }
}

impl DragController {
    /// Release the pointer at `pointer`, resolving the drop.
    pub fn pointer_up(&mut self, pointer: Point) -> DropOutcome {
        profile_scope!("pointer_up");

        if self.state.is_idle() {
            return DropOutcome::Ignored;
        }
        self.last_pointer = Some(pointer);
        if self.press_origin.is_none() {
            self.update_ghost(pointer);
        }

        let ctx = CoordinateContext::new(&self.viewport, &self.geometry, self.grid.rows(), self.grid.cols());
        let outside = !CoordinateConverter::grid_screen_bounds(&ctx).contains(pointer);
        self.resolve(outside)
    }

    /// Abort the gesture. Resolves like a drop on an invalid cell.
    pub fn cancel(&mut self) -> DropOutcome {
        if self.state.is_idle() {
            return DropOutcome::Ignored;
        }
        debug!("Drag cancelled");
        self.ghost.hide();
        self.resolve(false)
    }

    fn resolve(&mut self, outside: bool) -> DropOutcome {
        let target = match self.ghost.last_position() {
            pos if pos.valid && !outside => pos.cell(),
            _ => None,
        };
        self.press_origin = None;

        let outcome = match self.state.take() {
            DragState::Idle => return DropOutcome::Ignored,
            DragState::PickedFromPanel { item } => self.drop_panel_item(item, outside, target),
            DragState::PickedFromGrid { item, previous } => self.drop_grid_item(item, previous, outside, target),
        };

        self.ghost.hide();
        self.ghost.remove_preview_marks();
        self.prune_selection();
        info!(outcome = ?outcome, "Drag finished");
        self.record();
        outcome
    }

    fn drop_panel_item(&mut self, item: Item, outside: bool, target: Option<CellPos>) -> DropOutcome {
        let Some(cell) = target else {
            debug!(item = %item.id, outside, "Panel item not placed");
            return DropOutcome::StayedInPanel(item.id);
        };

        let size = self.ghost.preview_size();
        if !self.grid.can_place(cell.x, cell.y, size.width, size.height) {
            return DropOutcome::StayedInPanel(item.id);
        }
        // Commit the live panel entry rather than the pick-time copy.
        let Some((_, entry)) = self.grid.take_from_panel(&item.id) else {
            warn!(item = %item.id, "Dragged panel item vanished before the drop");
            return DropOutcome::Ignored;
        };

        let placed = entry.into_placed(cell.x, cell.y, size, self.ghost.preview_rotated());
        self.grid.place_unchecked(placed);
        DropOutcome::Placed {
            id: item.id,
            x: cell.x,
            y: cell.y,
        }
    }

    fn drop_grid_item(
        &mut self,
        item: PlacedItem,
        previous: PlacedItem,
        outside: bool,
        target: Option<CellPos>,
    ) -> DropOutcome {
        if outside {
            let id = item.id.clone();
            debug!(item = %id, "Dropped outside the grid");
            self.grid.return_to_panel(item.into_panel_item());
            return DropOutcome::ReturnedToPanel(id);
        }

        let Some(cell) = target else {
            return self.roll_back(previous);
        };

        let size = self.ghost.preview_size();
        let mut moved = item;
        moved.x = cell.x;
        moved.y = cell.y;
        moved.width = size.width;
        moved.height = size.height;
        moved.rotated = self.ghost.preview_rotated();

        let unchanged = moved == previous;
        let id = moved.id.clone();
        match self.grid.place(moved) {
            Ok(()) if unchanged => DropOutcome::Selected(id),
            Ok(()) => DropOutcome::Placed {
                id,
                x: cell.x,
                y: cell.y,
            },
            Err(e) => {
                debug!(item = %id, error = %e, "Drop target refused");
                self.roll_back(previous)
            }
        }
    }

    fn roll_back(&mut self, previous: PlacedItem) -> DropOutcome {
        let id = previous.id.clone();
        let fallback = previous.clone();
        match self.grid.place(previous) {
            Ok(()) => {
                debug!(item = %id, "Rolled back to previous placement");
                DropOutcome::RolledBack(id)
            }
            Err(e) => {
                warn!(item = %id, error = %e, "Previous placement no longer fits, returning to panel");
                self.grid.return_to_panel(fallback.into_panel_item());
                DropOutcome::ReturnedToPanel(id)
            }
        }
    }
}
