//! Conversions between destination pixels, normalized selection space and
//! source pixels.

use super::{NormalizedPoint, Rect, Selection, MIN_FRACTION};

/// Clamp to [0, 1], mapping NaN to 0.
#[inline]
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Denormalize a selection into absolute source pixels.
///
/// Every component is clamped to [0, 1] first, then x/width are scaled by
/// `source_w` and y/height by `source_h`. No selection means no rectangle.
pub fn to_source_rect(selection: Option<&Selection>, source_w: u32, source_h: u32) -> Option<Rect> {
    let selection = selection?;
    let (w, h) = (source_w as f64, source_h as f64);

    Some(Rect {
        x: clamp_unit(selection.x) * w,
        y: clamp_unit(selection.y) * h,
        width: clamp_unit(selection.width) * w,
        height: clamp_unit(selection.height) * h,
    })
}

/// Build a selection spanning two normalized points.
///
/// The points may be given in any order. Both extents are floored at
/// [`MIN_FRACTION`]; a floored rectangle that would cross the right or bottom
/// edge is shifted back inside the unit square.
pub fn normalize_selection(p0: NormalizedPoint, p1: NormalizedPoint) -> Selection {
    let left = clamp_unit(p0.x.min(p1.x));
    let top = clamp_unit(p0.y.min(p1.y));
    let right = clamp_unit(p0.x.max(p1.x));
    let bottom = clamp_unit(p0.y.max(p1.y));

    let width = (right - left).max(MIN_FRACTION);
    let height = (bottom - top).max(MIN_FRACTION);

    Selection {
        x: left.min(1.0 - width),
        y: top.min(1.0 - height),
        width,
        height,
    }
}

/// Map a destination-space point into normalized space relative to
/// `draw_rect`.
///
/// Points outside the letterboxed video saturate to the nearest edge.
pub fn point_to_normalized(px: f64, py: f64, draw_rect: &Rect) -> NormalizedPoint {
    NormalizedPoint {
        x: clamp_unit((px - draw_rect.x) / draw_rect.width),
        y: clamp_unit((py - draw_rect.y) / draw_rect.height),
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for points in and slightly around the unit square.
    fn point_strategy() -> impl Strategy<Value = NormalizedPoint> {
        (-0.2f64..=1.2, -0.2f64..=1.2).prop_map(|(x, y)| NormalizedPoint::new(x, y))
    }

    proptest! {
        /// Property: the result always satisfies the selection invariants.
        #[test]
        fn prop_normalize_selection_valid(a in point_strategy(), b in point_strategy()) {
            let s = normalize_selection(a, b);
            prop_assert!(s.x >= 0.0 && s.y >= 0.0);
            prop_assert!(s.right() <= 1.0 + 1e-12);
            prop_assert!(s.bottom() <= 1.0 + 1e-12);
            prop_assert!(s.width >= MIN_FRACTION && s.height >= MIN_FRACTION);
        }

        /// Property: swapping the two points gives the identical selection.
        #[test]
        fn prop_normalize_selection_order_independent(a in point_strategy(), b in point_strategy()) {
            prop_assert_eq!(normalize_selection(a, b), normalize_selection(b, a));
        }

        /// Property: normalized points are always inside the unit square.
        #[test]
        fn prop_point_to_normalized_saturates(
            px in -1000.0f64..=1000.0,
            py in -1000.0f64..=1000.0,
            w in 1.0f64..=800.0,
            h in 1.0f64..=800.0,
        ) {
            let p = point_to_normalized(px, py, &Rect::new(10.0, 20.0, w, h));
            prop_assert!((0.0..=1.0).contains(&p.x));
            prop_assert!((0.0..=1.0).contains(&p.y));
        }

        /// Property: denormalized selections stay inside the source frame.
        #[test]
        fn prop_to_source_rect_inside_frame(
            a in point_strategy(),
            b in point_strategy(),
            src_w in 1u32..=4096,
            src_h in 1u32..=4096,
        ) {
            let s = normalize_selection(a, b);
            let r = to_source_rect(Some(&s), src_w, src_h).unwrap();
            let frame = Rect::from_size(src_w as f64, src_h as f64);
            prop_assert!(frame.contains_rect(&r, 1e-6));
        }
    }
}
