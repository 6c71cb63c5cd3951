//! Application-wide constants.
//!
//! Centralizes grid defaults, limits and layout values so the engine and
//! its tests agree on the same numbers.

// ============================================================================
// Grid Dimensions
// ============================================================================

/// Default number of grid rows
pub const DEFAULT_ROWS: u32 = 6;

/// Default number of grid columns
pub const DEFAULT_COLS: u32 = 10;

/// Smallest grid height accepted by resize
pub const MIN_ROWS: u32 = 3;

/// Largest grid height accepted by resize
pub const MAX_ROWS: u32 = 20;

/// Smallest grid width accepted by resize
pub const MIN_COLS: u32 = 3;

/// Largest grid width accepted by resize
pub const MAX_COLS: u32 = 20;

// ============================================================================
// Layout Constants
// ============================================================================

/// Cell edge length in pixels (at zoom 1.0)
pub const CELL_SIZE: f32 = 40.0;

/// Gap between adjacent cells in pixels (at zoom 1.0)
pub const CELL_GAP: f32 = 3.0;

/// Border width subtracted from the ghost box so it sits inside the cells
pub const GHOST_BORDER: f32 = 2.0;

/// Screen distance a press must travel before a placed item is lifted
pub const DRAG_THRESHOLD: f32 = 3.0;

// ============================================================================
// Item Defaults
// ============================================================================

/// Fallback color for items without one
pub const DEFAULT_ITEM_COLOR: &str = "#2b8a3e";

/// Default stress capacity of a new item
pub const DEFAULT_MAX_STRESS: u32 = 3;

/// Widest item the default catalogue accepts
pub const CATALOG_MAX_WIDTH: u32 = 10;

/// Tallest item the default catalogue accepts
pub const CATALOG_MAX_HEIGHT: u32 = 6;

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum zoom level
pub const MIN_ZOOM: f32 = 0.5;

/// Maximum zoom level
pub const MAX_ZOOM: f32 = 3.0;

/// Default zoom level
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Zoom step for keyboard and wheel zoom
pub const ZOOM_STEP: f32 = 0.1;

// ============================================================================
// Persistence
// ============================================================================

/// Version tag written into the stored inventory document
pub const DATA_VERSION: u32 = 2;

/// File name of the stored inventory document
pub const INVENTORY_FILE_NAME: &str = "inventory.json";

/// Directory name used under the platform data and config dirs
pub const APP_DIR_NAME: &str = "satchel";

/// File name of the settings document
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// File name of the optional default catalogue
pub const CATALOG_FILE_NAME: &str = "items.json";

/// Maximum undo history states to keep
pub const MAX_HISTORY_STATES: usize = 50;

// ============================================================================
// Notifications
// ============================================================================

/// Toasts kept at once; the oldest is dropped beyond this
pub const MAX_TOASTS: usize = 5;
