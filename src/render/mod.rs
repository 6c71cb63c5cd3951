//! Render-facing state.
//!
//! The engine does not draw. It exposes what a host needs to draw the grid:
//!
//! - `ghost` - The drag preview frame and its cosmetic cell marks
//! - `cells` - Per-cell classification (empty, preview, occupied, selected)

mod cells;
mod ghost;

pub use cells::*;
pub use ghost::*;
