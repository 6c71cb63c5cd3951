//! Pointer and keyboard handling for the inventory grid.
//!
//! This module implements the drag controller: picking items from the panel
//! or the grid, moving the ghost, rotating mid-drag, and resolving the drop.
//!
//! ## Architecture
//!
//! The drag uses an explicit state machine (`DragState`) owned by a single
//! [`DragController`]. The controller is the only writer of the grid during
//! a gesture, and it persists exactly once when the gesture completes.
//!
//! ## Modules
//!
//! - `coords` - Screen -> container -> cell conversion
//! - `state` - Drag state machine enum and helper methods
//! - `mouse_down` - Press handling (selection, panel and grid pick)
//! - `drag` - Pointer move handling (ghost recompute)
//! - `mouse_up` - Drop resolution and cancellation
//! - `keyboard` - Rotate, delete, cancel, undo and zoom shortcuts
//! - `transform` - Zoom, pan and grid resize

pub mod coords;
mod drag;
mod keyboard;
mod mouse_down;
mod mouse_up;
mod state;
mod transform;

pub use keyboard::Modifiers;
pub use mouse_up::DropOutcome;
pub use state::DragState;

use crate::grid::GridModel;
use crate::history::History;
use crate::input::coords::GridGeometry;
use crate::notifications::{Toast, ToastManager};
use crate::perf::MoveStats;
use crate::render::GhostPreview;
use crate::session::Session;
use crate::settings::Settings;
use crate::storage::{InventoryStore, StorageResult};
use crate::types::{ItemId, Point};
use crate::viewport::Viewport;
use tracing::{error, info};

/// Owns the grid and drives every gesture that changes it.
pub struct DragController {
    pub(crate) grid: GridModel,
    pub(crate) viewport: Viewport,
    pub(crate) geometry: GridGeometry,
    pub(crate) ghost: GhostPreview,
    pub(crate) state: DragState,
    /// Press point of a grid pick that has not travelled past the drag
    /// threshold yet. While set the ghost stays on the item's own cells.
    pub(crate) press_origin: Option<Point>,
    pub(crate) last_pointer: Option<Point>,
    pub(crate) selection: Option<ItemId>,
    pub(crate) history: History,
    pub(crate) session: Session,
    pub(crate) toasts: ToastManager,
    pub(crate) store: Box<dyn InventoryStore>,
    pub(crate) move_stats: MoveStats,
}

impl DragController {
    /// Controller over an existing grid. Nothing is loaded or saved yet.
    pub fn new(grid: GridModel, store: Box<dyn InventoryStore>) -> Self {
        let mut history = History::new();
        history.reset(grid.snapshot());
        Self {
            grid,
            viewport: Viewport::new(),
            geometry: GridGeometry::default(),
            ghost: GhostPreview::new(),
            state: DragState::Idle,
            press_origin: None,
            last_pointer: None,
            selection: None,
            history,
            session: Session::default(),
            toasts: ToastManager::new(),
            store,
            move_stats: MoveStats::new(),
        }
    }

    /// Load the inventory from `store`, configured by `settings`.
    ///
    /// A fresh inventory takes the grid size from the settings. Discarded
    /// stored data becomes a one-time warning toast. Out-of-range settings
    /// are repaired first.
    pub fn load(mut store: Box<dyn InventoryStore>, settings: &Settings) -> Self {
        let settings = settings.clone().validated();
        let had_data = store.has_saved_data();
        let loaded = store.load();
        let (mut grid, _) = GridModel::from_snapshot(loaded.snapshot);
        if !had_data || loaded.notice.is_some() {
            grid.resize(settings.grid_rows, settings.grid_cols);
        }
        info!(
            store = store.name(),
            rows = grid.rows(),
            cols = grid.cols(),
            "Inventory ready"
        );

        let mut controller = Self::new(grid, store)
            .with_geometry(settings.geometry())
            .with_viewport(Viewport::with_limits(settings.zoom));
        if let Some(notice) = loaded.notice {
            controller.toasts.push(Toast::warning(notice.message()));
        }
        controller
    }

    /// Open the configured JSON store and load from it.
    pub fn open(settings: &Settings) -> StorageResult<Self> {
        let store = settings.open_store()?;
        Ok(Self::load(Box::new(store), settings))
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn with_geometry(mut self, geometry: GridGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn ghost(&self) -> &GhostPreview {
        &self.ghost
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// The selected placed item, if any.
    pub fn selection(&self) -> Option<&ItemId> {
        self.selection.as_ref()
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn set_session(&mut self, session: Session) {
        self.session = session;
    }

    pub fn toasts(&self) -> &ToastManager {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastManager {
        &mut self.toasts
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Timing of pointer-move recomputes.
    pub fn move_stats(&self) -> &MoveStats {
        &self.move_stats
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Save the current state. Failures are logged and toasted, never returned.
    pub(crate) fn persist(&mut self) {
        crate::profile_scope!("persist");
        let snapshot = self.grid.snapshot();
        if let Err(e) = self.store.save(&snapshot) {
            error!(store = self.store.name(), error = %e, "Failed to save inventory");
            self.toasts.push(Toast::error(format!("Save failed: {e}")));
        }
    }

    /// Record the current state in the undo history, then save it.
    pub(crate) fn record(&mut self) {
        self.history.push(self.grid.snapshot());
        self.persist();
    }

    /// Drop the selection if it no longer names a placed item.
    pub(crate) fn prune_selection(&mut self) {
        if let Some(id) = &self.selection {
            if self.grid.placed_item(id).is_none() {
                self.selection = None;
            }
        }
    }
}
