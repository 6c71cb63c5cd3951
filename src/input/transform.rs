//! Viewport and grid transformations - zoom, pan, scroll and resize.
//!
//! Anything that moves cells under a stationary pointer recomputes the
//! ghost, so a drag in progress never shows a stale preview.

use super::{DragController, Modifiers};
use crate::grid::{CharacterStats, ResizeReport, calc_default_size};
use crate::notifications::Toast;
use crate::types::{Point, point};
use tracing::{debug, info};

impl DragController {
    pub fn zoom_in(&mut self) -> bool {
        let changed = self.viewport.zoom_in();
        self.after_viewport_change(changed)
    }

    pub fn zoom_out(&mut self) -> bool {
        let changed = self.viewport.zoom_out();
        self.after_viewport_change(changed)
    }

    pub fn reset_zoom(&mut self) -> bool {
        let changed = self.viewport.reset_zoom();
        self.after_viewport_change(changed)
    }

    pub fn set_zoom(&mut self, zoom: f32) -> bool {
        let changed = self.viewport.set_zoom(zoom);
        self.after_viewport_change(changed)
    }

    /// Zoom by `factor` keeping `anchor` (screen space) fixed.
    pub fn zoom_around(&mut self, factor: f32, anchor: Point) -> bool {
        let changed = self.viewport.zoom_around(factor, anchor);
        self.after_viewport_change(changed)
    }

    pub fn pan_by(&mut self, delta: Point) {
        self.viewport.pan_by(delta);
        self.refresh_ghost();
    }

    pub fn set_pan(&mut self, pan: Point) {
        self.viewport.set_pan(pan);
        self.refresh_ghost();
    }

    /// Wheel input: zoom around the pointer with the command modifier held,
    /// pan otherwise.
    pub fn scroll(&mut self, delta: Point, pointer: Point, modifiers: Modifiers) {
        if modifiers.is_command() {
            let step = 1.0 + self.viewport.limits().step;
            let factor = if delta.y < 0.0 { step } else { 1.0 / step };
            self.zoom_around(factor, pointer);
        } else {
            self.pan_by(point(-delta.x, -delta.y));
        }
    }

    fn after_viewport_change(&mut self, changed: bool) -> bool {
        if changed {
            debug!(zoom = self.viewport.zoom_percent(), "Viewport changed");
            self.refresh_ghost();
        }
        changed
    }

    // ========================================================================
    // Grid Resize
    // ========================================================================

    /// Change the grid dimensions, evicting items that no longer fit.
    ///
    /// During a drag the ghost is hidden and nothing is saved; the drop
    /// saves the result. While idle the resize is recorded and saved.
    pub fn resize_grid(&mut self, rows: u32, cols: u32) -> ResizeReport {
        let report = self.grid.resize(rows, cols);
        info!(
            rows = report.rows,
            cols = report.cols,
            evicted = report.evicted.len(),
            "Grid resized"
        );

        if !report.evicted.is_empty() {
            self.toasts.push(Toast::info(format!(
                "{} item(s) no longer fit and were moved to the panel",
                report.evicted.len()
            )));
        }

        if self.state.is_dragging() {
            self.ghost.hide();
            self.ghost.remove_preview_marks();
        } else {
            self.prune_selection();
            self.record();
        }
        report
    }

    /// Resize to the default size for a character's stats.
    pub fn resize_for_stats(&mut self, stats: CharacterStats) -> ResizeReport {
        let (rows, cols) = calc_default_size(stats);
        self.resize_grid(rows, cols)
    }
}
