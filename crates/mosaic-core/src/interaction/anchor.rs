//! Anchor-based rectangle construction shared by drag-create and resize.
//!
//! # Algorithm
//!
//! 1. Each axis extends from the anchor towards the pointer, unless the
//!    directions are fixed by the grabbed resize handle.
//! 2. The room left on each axis is the distance from the anchor to the
//!    unit-square edge in that direction.
//! 3. The raw extents are clamped to `[MIN_FRACTION, room]`.
//! 4. Under an aspect lock the shorter side grows to match the ratio; if that
//!    overflows its room it is clamped and the other side shrinks instead.
//! 5. The top-left corner is the minimum of the anchor and the far corner.

use crate::geometry::{normalized_aspect, NormalizedPoint, Selection, MIN_FRACTION};

use super::{Sign, Signs};

/// Build a selection from a fixed `anchor` and a free `point`.
///
/// `signs` pins the extension directions (resize); `None` infers them from
/// the point (create). `lock_ratio` is a width/height ratio in normalized
/// selection space, see [`lock_ratio`].
pub fn rect_from_anchor(
    anchor: NormalizedPoint,
    point: NormalizedPoint,
    signs: Option<Signs>,
    lock_ratio: Option<f64>,
) -> Selection {
    let signs = signs.unwrap_or_else(|| Signs::between(anchor, point));

    let room_x = room(anchor.x, signs.x);
    let room_y = room(anchor.y, signs.y);

    let raw_w = (signs.x.value() * (point.x - anchor.x)).max(0.0);
    let raw_h = (signs.y.value() * (point.y - anchor.y)).max(0.0);

    let mut width = raw_w.min(room_x).max(MIN_FRACTION);
    let mut height = raw_h.min(room_y).max(MIN_FRACTION);

    if let Some(ratio) = lock_ratio.filter(|r| r.is_finite() && *r > 0.0) {
        (width, height) = apply_ratio(width, height, room_x, room_y, ratio);
        width = width.max(MIN_FRACTION);
        height = height.max(MIN_FRACTION);
    }

    let x = match signs.x {
        Sign::Positive => anchor.x,
        Sign::Negative => anchor.x - width,
    };
    let y = match signs.y {
        Sign::Positive => anchor.y,
        Sign::Negative => anchor.y - height,
    };

    Selection {
        // Only differs from x/y when the anchor sits on an edge and the
        // minimum size had to spill past it.
        x: x.min(1.0 - width).max(0.0),
        y: y.min(1.0 - height).max(0.0),
        width,
        height,
    }
}

/// Normalized-space ratio an aspect lock should hold.
///
/// The explicit output ratio wins; otherwise the source's own ratio is kept,
/// which is square in normalized space.
pub fn lock_ratio(target_aspect: Option<f64>, source_w: u32, source_h: u32) -> f64 {
    let pixel_ratio = target_aspect
        .filter(|t| t.is_finite() && *t > 0.0)
        .unwrap_or(source_w as f64 / source_h as f64);
    let ratio = normalized_aspect(pixel_ratio, source_w, source_h);
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

/// Distance from `origin` to the unit-square edge in direction `sign`.
fn room(origin: f64, sign: Sign) -> f64 {
    match sign {
        Sign::Positive => 1.0 - origin,
        Sign::Negative => origin,
    }
    .clamp(0.0, 1.0)
}

/// Grow the short side to honor `ratio`, shrinking instead when the grown
/// side would not fit.
fn apply_ratio(width: f64, height: f64, room_x: f64, room_y: f64, ratio: f64) -> (f64, f64) {
    if width / height > ratio {
        let height = width / ratio;
        if height > room_y {
            (room_y * ratio, room_y)
        } else {
            (width, height)
        }
    } else {
        let width = height * ratio;
        if width > room_x {
            (room_x, room_x / ratio)
        } else {
            (width, height)
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
