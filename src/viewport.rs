//! Viewport zoom and pan.
//!
//! The sheet container is drawn with `screen = pan + scale * container`.
//! This module owns `scale` and `pan` and the zoom controls that change
//! them; the inverse mapping used for hit testing lives in
//! [`crate::input::coords`].

use crate::constants::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use crate::input::coords::CoordinateConverter;
use crate::types::{Point, point};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Allowed zoom range and the step used by zoom in/out.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: MIN_ZOOM,
            max: MAX_ZOOM,
            step: ZOOM_STEP,
        }
    }
}

impl ZoomLimits {
    /// Finite, positive, and `min <= max`.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.step.is_finite()
            && self.min > 0.0
            && self.min <= self.max
            && self.step > 0.0
    }
}

/// Zoom scale and pan offset applied to the sheet container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    scale: f32,
    pan: Point,
    limits: ZoomLimits,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::with_limits(ZoomLimits::default())
    }

    /// Viewport at the default zoom. Invalid limits fall back to the defaults.
    pub fn with_limits(limits: ZoomLimits) -> Self {
        let limits = if limits.is_valid() {
            limits
        } else {
            warn!(?limits, "Invalid zoom limits, using defaults");
            ZoomLimits::default()
        };
        Self {
            scale: DEFAULT_ZOOM.clamp(limits.min, limits.max),
            pan: Point::default(),
            limits,
        }
    }

    /// Viewport with an explicit scale and pan; the scale is not clamped.
    ///
    /// Returns `None` for non-finite or non-positive scales.
    pub fn from_parts(scale: f32, pan: Point) -> Option<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return None;
        }
        Some(Self {
            scale,
            pan,
            limits: ZoomLimits::default(),
        })
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Zoom as a whole percentage, for the zoom indicator.
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    /// Set the zoom, clamped to the limits. Returns true if it changed.
    pub fn set_zoom(&mut self, zoom: f32) -> bool {
        if !zoom.is_finite() {
            return false;
        }
        let clamped = zoom.clamp(self.limits.min, self.limits.max);
        if (clamped - self.scale).abs() < f32::EPSILON {
            return false;
        }
        debug!(from = self.scale, to = clamped, "Zoom changed");
        self.scale = clamped;
        true
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.scale + self.limits.step)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.scale - self.limits.step)
    }

    pub fn reset_zoom(&mut self) -> bool {
        self.set_zoom(DEFAULT_ZOOM)
    }

    /// Multiply the zoom by `factor`, keeping `anchor` (screen space) fixed.
    pub fn zoom_around(&mut self, factor: f32, anchor: Point) -> bool {
        let under_anchor = self.screen_to_container(anchor);
        if !self.set_zoom(self.scale * factor) {
            return false;
        }
        self.pan = point(
            anchor.x - under_anchor.x * self.scale,
            anchor.y - under_anchor.y * self.scale,
        );
        true
    }

    pub fn pan_by(&mut self, delta: Point) {
        self.pan = self.pan + delta;
    }

    pub fn set_pan(&mut self, pan: Point) {
        self.pan = pan;
    }

    #[inline]
    pub fn screen_to_container(&self, screen: Point) -> Point {
        CoordinateConverter::screen_to_container(screen, self)
    }

    #[inline]
    pub fn container_to_screen(&self, container: Point) -> Point {
        CoordinateConverter::container_to_screen(container, self)
    }
}
