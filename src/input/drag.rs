//! Pointer move handling - recompute the ghost for every event.
//!
//! ## Performance Notes
//!
//! Pointer move fires at display rate during a drag. Every event recomputes
//! the target cell and the ghost; nothing is coalesced. Idle moves exit
//! early, and each recompute is recorded in `move_stats`.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use super::DragController;
use crate::constants::DRAG_THRESHOLD;
use crate::input::coords::{CoordinateContext, CoordinateConverter};
use crate::perf::{report_slow_move, time};
use crate::profile_scope;
use crate::types::Point;

impl DragController {
    pub fn pointer_move(&mut self, pointer: Point) {
        profile_scope!("pointer_move");

        if self.state.is_idle() {
            return;
        }
        self.last_pointer = Some(pointer);

        if let Some(origin) = self.press_origin {
            let travelled = (pointer.x - origin.x).hypot(pointer.y - origin.y);
            if travelled < DRAG_THRESHOLD {
                return;
            }
            self.press_origin = None;
        }

        let ((), elapsed_ms) = time(|| self.update_ghost(pointer));
        if self.move_stats.record(elapsed_ms) {
            report_slow_move(elapsed_ms, &self.move_stats);
        }
    }

    /// Recompute the ghost for the pointer position.
    ///
    /// Off the grid the ghost is hidden. On the grid the cell is clamped so
    /// the whole preview footprint stays inside.
    pub(super) fn update_ghost(&mut self, pointer: Point) {
        let ctx = CoordinateContext::new(&self.viewport, &self.geometry, self.grid.rows(), self.grid.cols());

        if !CoordinateConverter::grid_screen_bounds(&ctx).contains(pointer) {
            self.ghost.hide();
            self.ghost.remove_preview_marks();
            return;
        }

        let cell = CoordinateConverter::screen_to_cell(pointer, &ctx, self.ghost.preview_size());
        self.ghost.show(cell, self.state.dragged_image(), &self.grid, &ctx);
    }

    /// Recompute the ghost at the last pointer position, if a drag is live.
    pub(super) fn refresh_ghost(&mut self) {
        if self.state.is_idle() {
            return;
        }
        match self.last_pointer {
            Some(pointer) if self.press_origin.is_none() => self.update_ghost(pointer),
            _ => {
                if let Some(cell) = self.ghost.last_position().cell() {
                    let ctx =
                        CoordinateContext::new(&self.viewport, &self.geometry, self.grid.rows(), self.grid.cols());
                    let cell = CoordinateConverter::clamp_cell(cell, &ctx, self.ghost.preview_size());
                    self.ghost.show(cell, self.state.dragged_image(), &self.grid, &ctx);
                }
            }
        }
    }
}
