//! Drag state machine - one explicit value for the whole drag gesture.
//!
//! The controller holds exactly one `DragState`, so an item can never be
//! picked from the panel and the grid at the same time, and "dragging with
//! nothing picked" cannot be expressed.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> PickedFromPanel     (panel item picked, item stays in the panel)
//! Idle -> PickedFromGrid      (pointer down on an occupied cell, item lifted off the grid)
//!
//! Picked* -> Idle             (pointer up or cancel - resolves the drop)
//! ```

use crate::types::{Footprint, ImageRef, Item, ItemId, PlacedItem};

/// Where a dragged item came from, with what is needed to resolve the drop.
#[derive(Debug, Clone, Default)]
pub enum DragState {
    /// No drag in progress
    #[default]
    Idle,

    /// Dragging an item out of the panel list
    PickedFromPanel {
        /// Snapshot of the panel item at pick time
        item: Item,
    },

    /// Dragging an item that was lifted off the grid
    PickedFromGrid {
        /// The item being moved; it is in neither list while held
        item: PlacedItem,
        /// Placement before the pick, used for rollback
        previous: PlacedItem,
    },
}

impl DragState {
    /// Returns true if the state is Idle
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if any item is being dragged
    pub fn is_dragging(&self) -> bool {
        !self.is_idle()
    }

    /// Returns true if the dragged item came from the panel
    pub fn is_from_panel(&self) -> bool {
        matches!(self, Self::PickedFromPanel { .. })
    }

    /// Returns true if the dragged item was lifted off the grid
    pub fn is_from_grid(&self) -> bool {
        matches!(self, Self::PickedFromGrid { .. })
    }

    /// Get the id of the dragged item, if any
    pub fn dragged_item_id(&self) -> Option<&ItemId> {
        match self {
            Self::Idle => None,
            Self::PickedFromPanel { item } => Some(&item.id),
            Self::PickedFromGrid { item, .. } => Some(&item.id),
        }
    }

    /// Image of the dragged item, for the ghost overlay
    pub fn dragged_image(&self) -> Option<&ImageRef> {
        match self {
            Self::Idle => None,
            Self::PickedFromPanel { item } => item.image.as_ref(),
            Self::PickedFromGrid { item, .. } => item.image.as_ref(),
        }
    }

    /// Unrotated footprint of the dragged item
    pub fn original_footprint(&self) -> Option<Footprint> {
        match self {
            Self::Idle => None,
            Self::PickedFromPanel { item } => Some(item.footprint()),
            Self::PickedFromGrid { item, .. } => {
                Some(Footprint::new(item.original_width, item.original_height))
            }
        }
    }

    /// Placement before the pick, if the item came from the grid
    pub fn previous_placement(&self) -> Option<&PlacedItem> {
        match self {
            Self::PickedFromGrid { previous, .. } => Some(previous),
            _ => None,
        }
    }

    /// Start dragging a panel item
    pub fn start_panel_drag(&mut self, item: Item) {
        *self = Self::PickedFromPanel { item };
    }

    /// Start dragging a placed item
    pub fn start_grid_drag(&mut self, item: PlacedItem) {
        *self = Self::PickedFromGrid {
            previous: item.clone(),
            item,
        };
    }

    /// Leave the current state, returning it
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Reset to Idle state
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
