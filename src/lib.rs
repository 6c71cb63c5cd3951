//! Grid inventory engine for tabletop character sheets.
//!
//! Items are packed onto a fixed grid by dragging them from a panel list,
//! rotated mid-drag, moved and taken off again. The host UI forwards pointer
//! and keyboard events to a [`DragController`] and draws from its grid and
//! ghost state.
//!
//! ```ignore
//! let settings = Settings::load();
//! satchel::init_logging(&settings);
//! let mut controller = DragController::open(&settings)?;
//!
//! controller.begin_panel_drag(&item_id, Some(pointer));
//! controller.pointer_move(pointer);
//! controller.pointer_up(pointer);
//! ```

pub mod actions;
pub mod catalog;
pub mod constants;
pub mod grid;
pub mod history;
pub mod image_loader;
pub mod input;
pub mod notifications;
pub mod perf;
pub mod render;
pub mod session;
pub mod settings;
pub mod settings_watcher;
pub mod storage;
pub mod types;
pub mod viewport;

pub use actions::{ActionError, ItemAction};
pub use grid::{GridModel, PlacementError};
pub use input::{DragController, DragState, DropOutcome, Modifiers};
pub use settings::Settings;
pub use storage::{InventoryStore, JsonFileStore, MemoryStore};

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV_VAR: &str = "SATCHEL_LOG";

/// Install the `tracing` subscriber.
///
/// `SATCHEL_LOG` wins over `settings.log_filter`. Calling this twice, or
/// after the host installed its own subscriber, is a no-op.
pub fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
