//! Context-menu item actions and undo/redo.
//!
//! Actions are the edits a game master makes from the item menus: create,
//! edit, rotate, image, remove, delete and stress. They are gated by the
//! session role; dragging is not. Each successful action is recorded in
//! the history and saved once.

use crate::grid::{GridModel, InventorySnapshot, PlacementError};
use crate::input::DragController;
use crate::notifications::Toast;
use crate::types::{DraftError, ImageRef, ItemDraft, ItemEdit, ItemId};
use thiserror::Error;
use tracing::{debug, info};

/// An edit requested from an item menu.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemAction {
    /// Add a new item to the panel
    Create(ItemDraft),
    /// Change name, color or stress fields
    Edit { id: ItemId, edit: ItemEdit },
    /// Turn a placed item in place, or swap a panel item's sides
    Rotate(ItemId),
    /// Attach or clear the item's image
    SetImage { id: ItemId, image: Option<ImageRef> },
    /// Take a placed item off the grid, back to the panel
    RemoveFromGrid(ItemId),
    /// Delete the item from the inventory for good
    Delete(ItemId),
    /// Shift current stress by `delta`
    AdjustStress { id: ItemId, delta: i32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("This session cannot edit items")]
    NotPermitted,

    #[error("Finish the current drag first")]
    DragInProgress,

    #[error("Item {0} not found")]
    NotFound(ItemId),

    #[error("No room to rotate item {0}")]
    NoRoom(ItemId),

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Result type alias for item actions
pub type ActionResult<T> = Result<T, ActionError>;

impl DragController {
    /// Apply a menu action.
    ///
    /// Refused outright while a drag is in progress or when the session
    /// may not edit. On success the new state is recorded and saved.
    pub fn apply_action(&mut self, action: ItemAction) -> ActionResult<()> {
        if self.state.is_dragging() {
            return Err(ActionError::DragInProgress);
        }
        if !self.session.can_edit() {
            debug!(action = ?action, "Action refused for this role");
            return Err(ActionError::NotPermitted);
        }

        match action {
            ItemAction::Create(draft) => {
                let item = draft.build(self.grid.rows(), self.grid.cols())?;
                info!(item = %item.id, name = %item.name, "Item created");
                self.grid.add_item(item)?;
            }
            ItemAction::Edit { id, edit } => {
                if !self.grid.update_item(&id, &edit) {
                    return Err(ActionError::NotFound(id));
                }
            }
            ItemAction::Rotate(id) => self.rotate_item(&id)?,
            ItemAction::SetImage { id, image } => {
                if !self.grid.set_image(&id, image) {
                    return Err(ActionError::NotFound(id));
                }
            }
            ItemAction::RemoveFromGrid(id) => return self.remove_from_grid(&id),
            ItemAction::Delete(id) => {
                if !self.grid.delete(&id) {
                    return Err(ActionError::NotFound(id));
                }
                info!(item = %id, "Item deleted");
            }
            ItemAction::AdjustStress { id, delta } => {
                if self.grid.adjust_stress(&id, delta).is_none() {
                    return Err(ActionError::NotFound(id));
                }
            }
        }

        self.prune_selection();
        self.record();
        Ok(())
    }

    fn rotate_item(&mut self, id: &ItemId) -> ActionResult<()> {
        if self.grid.rotate_panel_item(id) {
            return Ok(());
        }
        let name = match self.grid.placed_item(id) {
            Some(placed) => placed.name.clone(),
            None => return Err(ActionError::NotFound(id.clone())),
        };
        match self.grid.rotate_placed(id) {
            Ok(()) => Ok(()),
            Err(PlacementError::Occupied { .. } | PlacementError::OutOfBounds { .. }) => {
                self.toasts.push(Toast::info(format!("No room to rotate {name}")));
                Err(ActionError::NoRoom(id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Put a placed item back on the panel with its original footprint.
    ///
    /// Not role-gated; the Delete shortcut uses it directly.
    pub(crate) fn remove_from_grid(&mut self, id: &ItemId) -> ActionResult<()> {
        if self.grid.remove(id, true).is_none() {
            return Err(ActionError::NotFound(id.clone()));
        }
        self.selection = None;
        self.record();
        Ok(())
    }

    // ========================================================================
    // History
    // ========================================================================

    pub fn can_undo(&self) -> bool {
        self.state.is_idle() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.is_idle() && self.history.can_redo()
    }

    /// Step back one recorded state. Only while idle.
    pub fn undo(&mut self) -> bool {
        if self.state.is_dragging() {
            return false;
        }
        match self.history.undo().cloned() {
            Some(snapshot) => {
                debug!("Undo");
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Step forward one undone state. Only while idle.
    pub fn redo(&mut self) -> bool {
        if self.state.is_dragging() {
            return false;
        }
        match self.history.redo().cloned() {
            Some(snapshot) => {
                debug!("Redo");
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, snapshot: InventorySnapshot) {
        let (grid, _) = GridModel::from_snapshot(snapshot);
        self.grid = grid;
        self.prune_selection();
        self.persist();
    }
}
