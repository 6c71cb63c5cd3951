//! Core types for the satchel inventory engine.
//!
//! This module defines the fundamental data structures shared by the grid,
//! the drag controller and the store: item identifiers, panel items, placed
//! items and the small geometry primitives used for pointer math.

use crate::constants::{DEFAULT_ITEM_COLOR, DEFAULT_MAX_STRESS};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Geometry
// ============================================================================

/// A point in screen or container space, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Shorthand constructor for [`Point`].
#[inline]
pub fn point(x: f32, y: f32) -> Point {
    Point { x, y }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        point(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        point(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Axis-aligned rectangle with edges in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            right: a.x.max(b.x),
            bottom: a.y.max(b.y),
        }
    }

    /// Edge-inclusive containment test.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Width and height of an item in grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The footprint turned by 90 degrees.
    pub fn rotated(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    pub fn area(self) -> u32 {
        self.width * self.height
    }
}

// ============================================================================
// Identifiers & Opaque References
// ============================================================================

/// Stable unique identifier of an item, generated once at creation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generate a fresh UUID v4 identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque image reference (a data URL). The engine never decodes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Items
// ============================================================================

/// An unplaced item in the panel list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub color: String,
    #[serde(default)]
    pub image: Option<ImageRef>,
    pub max_stress: u32,
    pub current_stress: u32,
}

impl Item {
    /// Create an item with a fresh id and default color and stress.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: ItemId::generate(),
            name: name.into(),
            width,
            height,
            color: DEFAULT_ITEM_COLOR.to_string(),
            image: None,
            max_stress: DEFAULT_MAX_STRESS,
            current_stress: 0,
        }
    }

    pub fn with_id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image = Some(image);
        self
    }

    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.width, self.height)
    }

    pub fn is_broken(&self) -> bool {
        self.current_stress >= self.max_stress
    }

    /// Place this item at `(x, y)` with the given footprint and rotation.
    ///
    /// The item's own width/height are taken as the unrotated footprint.
    pub fn into_placed(self, x: u32, y: u32, footprint: Footprint, rotated: bool) -> PlacedItem {
        PlacedItem {
            x,
            y,
            width: footprint.width,
            height: footprint.height,
            rotated,
            original_width: self.width,
            original_height: self.height,
            id: self.id,
            name: self.name,
            color: self.color,
            image: self.image,
            max_stress: self.max_stress,
            current_stress: self.current_stress,
        }
    }
}

/// An item occupying a footprint on the grid.
///
/// `width`/`height` are the current, possibly rotated, footprint. The
/// originals keep the unrotated size so the item returns to the panel with
/// the shape it was created with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub id: ItemId,
    pub name: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub rotated: bool,
    pub original_width: u32,
    pub original_height: u32,
    pub color: String,
    #[serde(default)]
    pub image: Option<ImageRef>,
    pub max_stress: u32,
    pub current_stress: u32,
}

impl PlacedItem {
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.width, self.height)
    }

    /// Whether the footprint covers cell `(cx, cy)`.
    pub fn covers(&self, cx: u32, cy: u32) -> bool {
        cx >= self.x && cx < self.x + self.width && cy >= self.y && cy < self.y + self.height
    }

    /// Whether two footprints share at least one cell.
    pub fn overlaps(&self, other: &PlacedItem) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    pub fn is_broken(&self) -> bool {
        self.current_stress >= self.max_stress
    }

    /// Toggle rotation in place, swapping width and height.
    pub fn toggle_rotation(&mut self) {
        std::mem::swap(&mut self.width, &mut self.height);
        self.rotated = !self.rotated;
    }

    /// Convert back into a panel item with the unrotated footprint.
    pub fn into_panel_item(self) -> Item {
        Item {
            id: self.id,
            name: self.name,
            width: self.original_width,
            height: self.original_height,
            color: self.color,
            image: self.image,
            max_stress: self.max_stress,
            current_stress: self.current_stress,
        }
    }
}

// ============================================================================
// Item Creation
// ============================================================================

/// Errors from validating an [`ItemDraft`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Item name is empty")]
    EmptyName,

    #[error("Width {width} outside 1..={max}")]
    InvalidWidth { width: u32, max: u32 },

    #[error("Height {height} outside 1..={max}")]
    InvalidHeight { height: u32, max: u32 },
}

/// Form data for a new item, validated against the current grid size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub color: Option<String>,
    pub image: Option<ImageRef>,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            ..Default::default()
        }
    }

    /// Validate and turn the draft into a panel item with a fresh id.
    pub fn build(self, rows: u32, cols: u32) -> Result<Item, DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::EmptyName);
        }
        if self.width == 0 || self.width > cols {
            return Err(DraftError::InvalidWidth {
                width: self.width,
                max: cols,
            });
        }
        if self.height == 0 || self.height > rows {
            return Err(DraftError::InvalidHeight {
                height: self.height,
                max: rows,
            });
        }

        let mut item = Item::new(name, self.width, self.height);
        if let Some(color) = self.color.filter(|c| !c.is_empty()) {
            item.color = color;
        }
        item.image = self.image;
        Ok(item)
    }
}

/// Field changes from the edit dialog. `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemEdit {
    pub name: Option<String>,
    pub color: Option<String>,
    pub max_stress: Option<u32>,
    pub current_stress: Option<u32>,
}

impl ItemEdit {
    /// Apply to the shared item fields. Stress stays within `0..=max_stress`.
    pub(crate) fn apply(
        &self,
        name: &mut String,
        color: &mut String,
        max_stress: &mut u32,
        current_stress: &mut u32,
    ) {
        if let Some(n) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            *name = n.to_string();
        }
        if let Some(c) = &self.color {
            *color = c.clone();
        }
        if let Some(max) = self.max_stress {
            *max_stress = max;
        }
        if let Some(cur) = self.current_stress {
            *current_stress = cur;
        }
        *current_stress = (*current_stress).min(*max_stress);
    }
}
