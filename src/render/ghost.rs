//! Ghost preview - the non-committing placement preview shown during a drag.
//!
//! The ghost is recomputed on every pointer move. It never touches
//! occupancy: validity comes from `GridModel::can_place`, and the cells
//! under a valid ghost only get a cosmetic preview mark that lives here,
//! not in the grid.
//!
//! ## Caller contract
//!
//! `set_preview_size` and `set_preview_rotation` are independent setters.
//! Whoever toggles rotation must also swap the size; between the two calls
//! the ghost reports an inconsistent footprint.

use crate::constants::GHOST_BORDER;
use crate::grid::GridModel;
use crate::input::coords::{CellPos, CoordinateContext, CoordinateConverter};
use crate::types::{Footprint, ImageRef};
use tracing::trace;

/// Last cell the ghost was shown at.
///
/// After `hide()` both coordinates are `None` and `valid` is true, so a
/// stale read never blocks a later placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GhostPosition {
    pub x: Option<u32>,
    pub y: Option<u32>,
    pub valid: bool,
}

impl GhostPosition {
    pub const HIDDEN: Self = Self {
        x: None,
        y: None,
        valid: true,
    };

    pub fn cell(&self) -> Option<CellPos> {
        Some(CellPos {
            x: self.x?,
            y: self.y?,
        })
    }
}

impl Default for GhostPosition {
    fn default() -> Self {
        Self::HIDDEN
    }
}

/// Everything the host needs to draw the ghost box.
#[derive(Clone, Debug, PartialEq)]
pub struct GhostFrame {
    /// Anchor cell of the footprint
    pub cell: CellPos,
    /// Screen-space left edge
    pub left: f32,
    /// Screen-space top edge
    pub top: f32,
    /// Screen-space width, border excluded
    pub width: f32,
    /// Screen-space height, border excluded
    pub height: f32,
    /// Sub-division columns (footprint width)
    pub columns: u32,
    /// Sub-division rows (footprint height)
    pub rows: u32,
    /// Screen size of one sub-division cell
    pub cell_px: f32,
    /// Screen gap between sub-division cells
    pub gap_px: f32,
    /// Whether dropping here would place the item
    pub valid: bool,
    /// Image overlay of the dragged item
    pub image: Option<ImageRef>,
    /// Whether the overlay is drawn rotated
    pub rotated: bool,
}

/// Non-committing placement preview.
#[derive(Clone, Debug)]
pub struct GhostPreview {
    frame: Option<GhostFrame>,
    preview_size: Footprint,
    preview_rotated: bool,
    last_position: GhostPosition,
    preview_cells: Vec<CellPos>,
}

impl Default for GhostPreview {
    fn default() -> Self {
        Self::new()
    }
}

impl GhostPreview {
    pub fn new() -> Self {
        Self {
            frame: None,
            preview_size: Footprint::new(1, 1),
            preview_rotated: false,
            last_position: GhostPosition::HIDDEN,
            preview_cells: Vec::new(),
        }
    }

    pub fn set_preview_size(&mut self, width: u32, height: u32) {
        self.preview_size = Footprint::new(width, height);
    }

    pub fn set_preview_rotation(&mut self, rotated: bool) {
        self.preview_rotated = rotated;
    }

    pub fn preview_size(&self) -> Footprint {
        self.preview_size
    }

    pub fn preview_rotated(&self) -> bool {
        self.preview_rotated
    }

    pub fn last_position(&self) -> GhostPosition {
        self.last_position
    }

    /// The frame to draw, or `None` while hidden.
    pub fn frame(&self) -> Option<&GhostFrame> {
        self.frame.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.frame.is_some()
    }

    /// Whether cell `(x, y)` carries the cosmetic preview mark.
    pub fn is_preview_cell(&self, x: u32, y: u32) -> bool {
        self.preview_cells.iter().any(|c| c.x == x && c.y == y)
    }

    pub fn preview_cells(&self) -> &[CellPos] {
        &self.preview_cells
    }

    /// Show the ghost with its anchor at `cell`.
    ///
    /// Recomputes validity, rebuilds the frame and re-marks the preview
    /// cells (only when valid). Returns the validity.
    pub fn show(
        &mut self,
        cell: CellPos,
        source_image: Option<&ImageRef>,
        grid: &GridModel,
        ctx: &CoordinateContext<'_>,
    ) -> bool {
        let size = self.preview_size;
        let valid = grid.can_place(cell.x, cell.y, size.width, size.height);
        trace!(x = cell.x, y = cell.y, w = size.width, h = size.height, valid, "Ghost recomputed");

        let scale = ctx.viewport.scale();
        let geometry = ctx.geometry;
        let top_left = CoordinateConverter::container_to_screen(geometry.cell_origin(cell.x, cell.y), ctx.viewport);

        self.frame = Some(GhostFrame {
            cell,
            left: top_left.x,
            top: top_left.y,
            width: geometry.span(size.width) * scale - GHOST_BORDER,
            height: geometry.span(size.height) * scale - GHOST_BORDER,
            columns: size.width,
            rows: size.height,
            cell_px: geometry.cell_size * scale,
            gap_px: geometry.cell_gap * scale,
            valid,
            image: source_image.cloned(),
            rotated: self.preview_rotated,
        });

        self.remove_preview_marks();
        if valid {
            for dy in 0..size.height {
                for dx in 0..size.width {
                    self.preview_cells.push(CellPos {
                        x: cell.x + dx,
                        y: cell.y + dy,
                    });
                }
            }
        }

        self.last_position = GhostPosition {
            x: Some(cell.x),
            y: Some(cell.y),
            valid,
        };
        valid
    }

    /// Clear the frame and reset the last position sentinel.
    pub fn hide(&mut self) {
        self.frame = None;
        self.last_position = GhostPosition::HIDDEN;
    }

    /// Clear the cosmetic cell marks, leaving the frame alone.
    pub fn remove_preview_marks(&mut self) {
        self.preview_cells.clear();
    }
}
