//! Coordinate conversion utilities for grid interactions.
//!
//! This module centralizes the screen -> container -> cell formulas so the
//! ghost, the drop test and the pick test all invert zoom and pan the same
//! way.
//!
//! ```text
//! container = (screen - pan) / scale
//! rel       = container - grid origin
//! cell      = floor(rel / (cell_size + cell_gap)), clamped so the whole
//!             footprint stays on the grid
//! ```

use crate::constants::{CELL_GAP, CELL_SIZE};
use crate::types::{Footprint, Point, Rect, point};
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};

/// Where the grid sits inside the sheet container and how big its cells are.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Top-left corner of the grid, in container space
    pub origin: Point,
    /// Cell edge length in container pixels
    pub cell_size: f32,
    /// Gap between cells in container pixels
    pub cell_gap: f32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            origin: Point::default(),
            cell_size: CELL_SIZE,
            cell_gap: CELL_GAP,
        }
    }
}

impl GridGeometry {
    pub fn new(origin: Point, cell_size: f32, cell_gap: f32) -> Self {
        Self {
            origin,
            cell_size,
            cell_gap,
        }
    }

    /// Distance between the starts of adjacent cells.
    #[inline]
    pub fn cell_unit(&self) -> f32 {
        self.cell_size + self.cell_gap
    }

    /// Container-space top-left corner of cell `(x, y)`.
    pub fn cell_origin(&self, x: u32, y: u32) -> Point {
        let unit = self.cell_unit();
        point(
            self.origin.x + x as f32 * unit,
            self.origin.y + y as f32 * unit,
        )
    }

    /// Pixel size of a run of cells, without the trailing gap.
    pub fn span(&self, cells: u32) -> f32 {
        if cells == 0 {
            return 0.0;
        }
        cells as f32 * self.cell_unit() - self.cell_gap
    }
}

/// A grid cell index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub x: u32,
    pub y: u32,
}

/// Context needed for coordinate conversions
pub struct CoordinateContext<'a> {
    pub viewport: &'a Viewport,
    pub geometry: &'a GridGeometry,
    pub rows: u32,
    pub cols: u32,
}

impl<'a> CoordinateContext<'a> {
    /// Create a new coordinate context
    #[inline]
    pub fn new(viewport: &'a Viewport, geometry: &'a GridGeometry, rows: u32, cols: u32) -> Self {
        Self {
            viewport,
            geometry,
            rows,
            cols,
        }
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert screen position to container position
    #[inline]
    pub fn screen_to_container(screen_pos: Point, viewport: &Viewport) -> Point {
        let pan = viewport.pan();
        let scale = viewport.scale();
        point((screen_pos.x - pan.x) / scale, (screen_pos.y - pan.y) / scale)
    }

    /// Convert container position to screen position
    #[inline]
    pub fn container_to_screen(container_pos: Point, viewport: &Viewport) -> Point {
        let pan = viewport.pan();
        let scale = viewport.scale();
        point(container_pos.x * scale + pan.x, container_pos.y * scale + pan.y)
    }

    /// Convert a delta from screen to container (pan offset does not apply)
    #[inline]
    pub fn delta_screen_to_container(delta: Point, scale: f32) -> Point {
        point(delta.x / scale, delta.y / scale)
    }

    /// Cell under `screen_pos` for a footprint of the given size.
    ///
    /// Clamped so the whole footprint lies on the grid: a pointer above or
    /// left of the grid snaps to row/column 0, one near the far edge snaps
    /// the footprint inward. A footprint larger than the grid clamps to 0.
    pub fn screen_to_cell(screen_pos: Point, ctx: &CoordinateContext<'_>, footprint: Footprint) -> CellPos {
        let container = Self::screen_to_container(screen_pos, ctx.viewport);
        let rel = container - ctx.geometry.origin;
        let unit = ctx.geometry.cell_unit();

        let gx = (rel.x / unit).floor() as i64;
        let gy = (rel.y / unit).floor() as i64;
        Self::clamp_axes(gx, gy, ctx, footprint)
    }

    /// Pull an existing anchor back so `footprint` fits, e.g. after the
    /// preview was rotated or the grid shrank.
    pub fn clamp_cell(cell: CellPos, ctx: &CoordinateContext<'_>, footprint: Footprint) -> CellPos {
        Self::clamp_axes(i64::from(cell.x), i64::from(cell.y), ctx, footprint)
    }

    fn clamp_axes(gx: i64, gy: i64, ctx: &CoordinateContext<'_>, footprint: Footprint) -> CellPos {
        let max_x = i64::from(ctx.cols) - i64::from(footprint.width);
        let max_y = i64::from(ctx.rows) - i64::from(footprint.height);

        CellPos {
            x: gx.min(max_x).max(0) as u32,
            y: gy.min(max_y).max(0) as u32,
        }
    }

    /// Unclamped cell under `screen_pos`, or `None` if it is not on the grid.
    pub fn screen_to_cell_exact(screen_pos: Point, ctx: &CoordinateContext<'_>) -> Option<CellPos> {
        let container = Self::screen_to_container(screen_pos, ctx.viewport);
        let rel = container - ctx.geometry.origin;
        let unit = ctx.geometry.cell_unit();

        let gx = (rel.x / unit).floor();
        let gy = (rel.y / unit).floor();
        if gx < 0.0 || gy < 0.0 || gx >= ctx.cols as f32 || gy >= ctx.rows as f32 {
            return None;
        }
        Some(CellPos {
            x: gx as u32,
            y: gy as u32,
        })
    }

    /// The grid's bounding rectangle in screen space.
    pub fn grid_screen_bounds(ctx: &CoordinateContext<'_>) -> Rect {
        let geometry = ctx.geometry;
        let top_left = geometry.origin;
        let bottom_right = point(
            top_left.x + geometry.span(ctx.cols),
            top_left.y + geometry.span(ctx.rows),
        );
        Rect::from_corners(
            Self::container_to_screen(top_left, ctx.viewport),
            Self::container_to_screen(bottom_right, ctx.viewport),
        )
    }
}
