//! Grid occupancy model - the single source of truth for spatial state.
//!
//! `GridModel` owns three things that must stay consistent:
//! - the `rows x cols` cell array, each cell holding the id of the placed
//!   item covering it (a back-reference, the record lives in `placed`)
//! - the placed list
//! - the panel list of unplaced items
//!
//! An id appears in at most one of the two lists. Every public mutation
//! preserves the no-overlap and in-bounds invariants; `place_unchecked` is
//! the only way around them and is crate-private.

use super::error::{PlacementError, PlacementResult};
use super::sizing::clamp_dimensions;
use crate::types::{Footprint, ImageRef, Item, ItemEdit, ItemId, PlacedItem};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Serializable state of the whole inventory.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub items: Vec<Item>,
    pub placed: Vec<PlacedItem>,
    pub rows: u32,
    pub cols: u32,
}

/// Outcome of a grid resize.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResizeReport {
    /// Rows after clamping
    pub rows: u32,
    /// Columns after clamping
    pub cols: u32,
    /// Items that no longer fit and were moved back to the panel
    pub evicted: Vec<ItemId>,
}

/// Occupancy grid plus the panel and placed item lists.
#[derive(Clone, Debug)]
pub struct GridModel {
    rows: u32,
    cols: u32,
    cells: Vec<Option<ItemId>>,
    panel: Vec<Item>,
    placed: Vec<PlacedItem>,
}

impl GridModel {
    /// Create an empty grid. Dimensions are clamped to the supported range.
    pub fn new(rows: u32, cols: u32) -> Self {
        let (rows, cols) = clamp_dimensions(rows, cols);
        Self {
            rows,
            cols,
            cells: vec![None; (rows * cols) as usize],
            panel: Vec::new(),
            placed: Vec::new(),
        }
    }

    /// Rebuild a grid from stored state.
    ///
    /// Placed entries that are out of bounds, overlap an earlier entry or
    /// repeat an id are dropped; panel entries repeating an id are dropped.
    /// Returns the model and the ids that were rejected.
    pub fn from_snapshot(snapshot: InventorySnapshot) -> (Self, Vec<ItemId>) {
        let mut grid = Self::new(snapshot.rows, snapshot.cols);
        let mut rejected = Vec::new();

        for placed in snapshot.placed {
            let id = placed.id.clone();
            if let Err(e) = grid.place(placed) {
                warn!(item = %id, error = %e, "Dropping stored placement");
                rejected.push(id);
            }
        }

        for item in snapshot.items {
            let id = item.id.clone();
            if let Err(e) = grid.add_item(item) {
                warn!(item = %id, error = %e, "Dropping stored panel item");
                rejected.push(id);
            }
        }

        (grid, rejected)
    }

    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            items: self.panel.clone(),
            placed: self.placed.clone(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Unplaced items in panel order.
    pub fn panel(&self) -> &[Item] {
        &self.panel
    }

    /// Placed items in placement order.
    pub fn placed(&self) -> &[PlacedItem] {
        &self.placed
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y * self.cols + x) as usize
    }

    fn in_bounds(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        u64::from(x) + u64::from(w) <= u64::from(self.cols)
            && u64::from(y) + u64::from(h) <= u64::from(self.rows)
    }

    /// Check a footprint without side effects.
    ///
    /// False when the footprint is empty, leaves the grid, or touches an
    /// occupied cell.
    pub fn can_place(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        self.check_region(x, y, w, h).is_ok()
    }

    fn check_region(&self, x: u32, y: u32, w: u32, h: u32) -> PlacementResult<()> {
        if w == 0 || h == 0 {
            return Err(PlacementError::EmptyFootprint);
        }
        if !self.in_bounds(x, y, w, h) {
            return Err(PlacementError::OutOfBounds {
                x,
                y,
                width: w,
                height: h,
                cols: self.cols,
                rows: self.rows,
            });
        }
        for cy in y..y + h {
            for cx in x..x + w {
                if let Some(occupant) = &self.cells[self.index(cx, cy)] {
                    return Err(PlacementError::Occupied {
                        x: cx,
                        y: cy,
                        occupant: occupant.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Id of the item covering cell `(x, y)`, if any.
    pub fn occupant_at(&self, x: u32, y: u32) -> Option<&ItemId> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        self.cells[self.index(x, y)].as_ref()
    }

    /// The placed item covering cell `(x, y)`, if any.
    pub fn placed_at(&self, x: u32, y: u32) -> Option<&PlacedItem> {
        let id = self.occupant_at(x, y)?;
        self.placed_item(id)
    }

    pub fn placed_item(&self, id: &ItemId) -> Option<&PlacedItem> {
        self.placed.iter().find(|p| &p.id == id)
    }

    pub fn panel_item(&self, id: &ItemId) -> Option<&Item> {
        self.panel.iter().find(|i| &i.id == id)
    }

    /// Whether the id is known to either list.
    pub fn contains(&self, id: &ItemId) -> bool {
        self.placed_item(id).is_some() || self.panel_item(id).is_some()
    }

    /// Panel items whose name contains `query`, ignoring case.
    pub fn panel_matching(&self, query: &str) -> Vec<&Item> {
        let query = query.trim().to_lowercase();
        self.panel
            .iter()
            .filter(|item| query.is_empty() || item.name.to_lowercase().contains(&query))
            .collect()
    }

    // ========================================================================
    // Placement
    // ========================================================================

    /// Place an item using the footprint and position it carries.
    ///
    /// Refuses out-of-bounds or colliding footprints and ids that already
    /// exist, leaving the grid untouched.
    pub fn place(&mut self, item: PlacedItem) -> PlacementResult<()> {
        if self.contains(&item.id) {
            return Err(PlacementError::DuplicateId(item.id));
        }
        self.check_region(item.x, item.y, item.width, item.height)?;
        self.place_unchecked(item);
        Ok(())
    }

    /// Mark the footprint occupied and record the item without checking.
    ///
    /// Only for callers that ran `can_place` for this exact footprint in the
    /// same call frame.
    pub(crate) fn place_unchecked(&mut self, item: PlacedItem) {
        debug!(item = %item.id, x = item.x, y = item.y, w = item.width, h = item.height, "Placing item");
        for cy in item.y..item.y + item.height {
            for cx in item.x..item.x + item.width {
                let idx = self.index(cx, cy);
                self.cells[idx] = Some(item.id.clone());
            }
        }
        match self.placed.iter_mut().find(|p| p.id == item.id) {
            Some(existing) => *existing = item,
            None => self.placed.push(item),
        }
    }

    fn clear_footprint(&mut self, item: &PlacedItem) {
        for cy in item.y..(item.y + item.height).min(self.rows) {
            for cx in item.x..(item.x + item.width).min(self.cols) {
                let idx = self.index(cx, cy);
                if self.cells[idx].as_ref() == Some(&item.id) {
                    self.cells[idx] = None;
                }
            }
        }
    }

    /// Remove a placed item, clearing its cells.
    ///
    /// Unknown ids are a no-op. With `return_to_panel` the item is appended
    /// to the panel with its original footprint and no rotation. Returns the
    /// removed record either way.
    pub fn remove(&mut self, item_id: &ItemId, return_to_panel: bool) -> Option<PlacedItem> {
        let pos = self.placed.iter().position(|p| &p.id == item_id)?;
        let removed = self.placed.remove(pos);
        self.clear_footprint(&removed);
        debug!(item = %item_id, return_to_panel, "Removed item from grid");

        if return_to_panel {
            self.panel.push(removed.clone().into_panel_item());
        }
        Some(removed)
    }

    /// Permanently delete an item from whichever list holds it.
    pub fn delete(&mut self, item_id: &ItemId) -> bool {
        if self.remove(item_id, false).is_some() {
            return true;
        }
        self.remove_from_panel(item_id).is_some()
    }

    /// Turn a placed item by 90 degrees in place.
    ///
    /// If the rotated footprint does not fit at the same anchor the item is
    /// restored unchanged and `Occupied`/`OutOfBounds` is returned.
    pub fn rotate_placed(&mut self, item_id: &ItemId) -> PlacementResult<()> {
        let original = self
            .remove(item_id, false)
            .ok_or_else(|| PlacementError::NotFound(item_id.clone()))?;

        let mut rotated = original.clone();
        rotated.toggle_rotation();
        match self.check_region(rotated.x, rotated.y, rotated.width, rotated.height) {
            Ok(()) => {
                self.place_unchecked(rotated);
                Ok(())
            }
            Err(e) => {
                self.place_unchecked(original);
                Err(e)
            }
        }
    }

    // ========================================================================
    // Panel
    // ========================================================================

    /// Append a new item to the panel.
    pub fn add_item(&mut self, item: Item) -> PlacementResult<()> {
        if self.contains(&item.id) {
            return Err(PlacementError::DuplicateId(item.id));
        }
        self.panel.push(item);
        Ok(())
    }

    /// Put an item back on the panel; ignored when the id is already known.
    pub fn return_to_panel(&mut self, item: Item) {
        if self.contains(&item.id) {
            warn!(item = %item.id, "Item already present, not returning to panel");
            return;
        }
        self.panel.push(item);
    }

    pub fn remove_from_panel(&mut self, item_id: &ItemId) -> Option<Item> {
        self.take_from_panel(item_id).map(|(_, item)| item)
    }

    /// Remove a panel item, also returning where it was.
    pub(crate) fn take_from_panel(&mut self, item_id: &ItemId) -> Option<(usize, Item)> {
        let pos = self.panel.iter().position(|i| &i.id == item_id)?;
        Some((pos, self.panel.remove(pos)))
    }

    /// Reinsert a panel item at its previous index.
    pub(crate) fn restore_to_panel(&mut self, index: usize, item: Item) {
        let index = index.min(self.panel.len());
        self.panel.insert(index, item);
    }

    /// Swap width and height of a panel item.
    pub fn rotate_panel_item(&mut self, item_id: &ItemId) -> bool {
        match self.panel.iter_mut().find(|i| &i.id == item_id) {
            Some(item) => {
                std::mem::swap(&mut item.width, &mut item.height);
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Item Fields
    // ========================================================================

    /// Apply dialog edits to an item in either list.
    pub fn update_item(&mut self, item_id: &ItemId, edit: &ItemEdit) -> bool {
        if let Some(p) = self.placed.iter_mut().find(|p| &p.id == item_id) {
            edit.apply(&mut p.name, &mut p.color, &mut p.max_stress, &mut p.current_stress);
            return true;
        }
        if let Some(i) = self.panel.iter_mut().find(|i| &i.id == item_id) {
            edit.apply(&mut i.name, &mut i.color, &mut i.max_stress, &mut i.current_stress);
            return true;
        }
        false
    }

    pub fn set_image(&mut self, item_id: &ItemId, image: Option<ImageRef>) -> bool {
        if let Some(p) = self.placed.iter_mut().find(|p| &p.id == item_id) {
            p.image = image;
            return true;
        }
        if let Some(i) = self.panel.iter_mut().find(|i| &i.id == item_id) {
            i.image = image;
            return true;
        }
        false
    }

    /// Shift an item's stress by `delta`, clamped to `0..=max_stress`.
    ///
    /// Returns the new stress value, or `None` if the id is unknown.
    pub fn adjust_stress(&mut self, item_id: &ItemId, delta: i32) -> Option<u32> {
        fn shift(current: &mut u32, max: u32, delta: i32) -> u32 {
            let next = i64::from(*current) + i64::from(delta);
            *current = next.clamp(0, i64::from(max)) as u32;
            *current
        }

        if let Some(p) = self.placed.iter_mut().find(|p| &p.id == item_id) {
            return Some(shift(&mut p.current_stress, p.max_stress, delta));
        }
        if let Some(i) = self.panel.iter_mut().find(|i| &i.id == item_id) {
            return Some(shift(&mut i.current_stress, i.max_stress, delta));
        }
        None
    }

    // ========================================================================
    // Resize
    // ========================================================================

    /// Change the grid dimensions.
    ///
    /// Dimensions are clamped to the supported range. Placements whose
    /// footprint no longer fits are evicted to the panel; the rest keep
    /// their cells.
    pub fn resize(&mut self, rows: u32, cols: u32) -> ResizeReport {
        let (rows, cols) = clamp_dimensions(rows, cols);
        self.rows = rows;
        self.cols = cols;
        self.cells = vec![None; (rows * cols) as usize];

        let mut evicted = Vec::new();
        for item in std::mem::take(&mut self.placed) {
            if self.in_bounds(item.x, item.y, item.width, item.height) {
                self.place_unchecked(item);
            } else {
                warn!(item = %item.id, rows, cols, "Item no longer fits, returning to panel");
                evicted.push(item.id.clone());
                self.panel.push(item.into_panel_item());
            }
        }

        ResizeReport { rows, cols, evicted }
    }

    // ========================================================================
    // Consistency
    // ========================================================================

    /// Verify the occupancy invariants, describing the first violation.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut expected: Vec<Option<&ItemId>> = vec![None; self.cells.len()];

        for item in &self.placed {
            if !self.in_bounds(item.x, item.y, item.width, item.height) {
                return Err(format!("{} is out of bounds", item.id));
            }
            if item.footprint() != Footprint::new(item.original_width, item.original_height)
                && item.footprint() != Footprint::new(item.original_height, item.original_width)
            {
                return Err(format!("{} footprint does not match its original size", item.id));
            }
            for cy in item.y..item.y + item.height {
                for cx in item.x..item.x + item.width {
                    let idx = self.index(cx, cy);
                    if let Some(other) = expected[idx] {
                        return Err(format!("{} overlaps {} at ({cx}, {cy})", item.id, other));
                    }
                    expected[idx] = Some(&item.id);
                }
            }
        }

        for (idx, cell) in self.cells.iter().enumerate() {
            if cell.as_ref() != expected[idx] {
                return Err(format!("cell {idx} holds {cell:?}, expected {:?}", expected[idx]));
            }
        }

        let mut ids: Vec<&ItemId> = self
            .placed
            .iter()
            .map(|p| &p.id)
            .chain(self.panel.iter().map(|i| &i.id))
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        if ids.len() != total {
            return Err("duplicate item id across panel and grid".to_string());
        }

        Ok(())
    }
}

impl Default for GridModel {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_ROWS, crate::constants::DEFAULT_COLS)
    }
}
