//! Rectangle and point types shared by the geometry, interaction and render
//! layers.

use serde::{Deserialize, Serialize};

/// Smallest width or height a selection may have, in normalized units.
///
/// Two texels of a 4096-wide source. Keeps a tap without drag from producing
/// a zero-area rectangle.
pub const MIN_FRACTION: f64 = 2.0 / 4096.0;

/// An axis-aligned rectangle in pixel space (destination or source).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin covering `width x height`.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Width over height. Infinite or NaN for degenerate rectangles.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Check whether `other` lies inside this rectangle, within `eps`.
    pub fn contains_rect(&self, other: &Rect, eps: f64) -> bool {
        other.x >= self.x - eps
            && other.y >= self.y - eps
            && other.right() <= self.right() + eps
            && other.bottom() <= self.bottom() + eps
    }

    /// Check for zero or negative extent.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// A point in normalized [0, 1] space relative to the letterboxed draw
/// rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A crop selection in normalized [0, 1] x [0, 1] space.
///
/// Constructors in [`crate::geometry`] and [`crate::interaction`] keep it
/// inside the unit square with both extents at least [`MIN_FRACTION`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Selection {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check whether a normalized point falls inside the selection.
    ///
    /// Edges are inclusive on the top-left and exclusive on the bottom-right.
    pub fn contains(&self, point: NormalizedPoint) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Map the selection into destination space through `draw_rect`.
    pub fn to_draw_rect(&self, draw_rect: &Rect) -> Rect {
        Rect {
            x: draw_rect.x + self.x * draw_rect.width,
            y: draw_rect.y + self.y * draw_rect.height,
            width: self.width * draw_rect.width,
            height: self.height * draw_rect.height,
        }
    }

    /// Check the unit-square containment and minimum-size invariants.
    pub fn is_valid(&self) -> bool {
        const EPS: f64 = 1e-9;
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= 1.0 + EPS
            && self.bottom() <= 1.0 + EPS
            && self.width >= MIN_FRACTION - EPS
            && self.height >= MIN_FRACTION - EPS
    }
}
