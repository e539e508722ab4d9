//! Aspect-ratio handling: ratio parsing, letterbox ("fit") and cover ("fill")
//! rectangles, and output surface sizing.
//!
//! # Fit vs Cover
//!
//! ```text
//!   fit_rect (contain)          cover_to_aspect (crop)
//!   +------------------+        +----+--------+----+
//!   |##################|        |    |        |    |
//!   |   source aspect  |        |    | target |    |
//!   |##################|        |    |        |    |
//!   +------------------+        +----+--------+----+
//! ```
//!
//! `fit_rect` shrinks the source into the destination leaving bands;
//! `cover_to_aspect` cuts the excess dimension of a rectangle away.

use super::Rect;

/// Two aspect ratios closer than this are treated as equal.
pub const ASPECT_TOLERANCE: f64 = 1e-6;

/// Default length of the longer output side, in pixels.
pub const DEFAULT_LONG_SIDE: u32 = 560;

/// Parse a `"W:H"` ratio into `W / H`.
///
/// Returns `None` for the `"original"` sentinel, empty text, and anything
/// whose first two components are not finite positive numbers. All of these
/// mean "no explicit ratio".
///
/// ```
/// use mosaic_core::geometry::parse_ratio;
///
/// assert_eq!(parse_ratio("4:2"), Some(2.0));
/// assert_eq!(parse_ratio("original"), None);
/// ```
pub fn parse_ratio(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() || text == "original" {
        return None;
    }

    let mut parts = text.split(':').map(|part| part.trim().parse::<f64>().ok());
    let w = parts.next().flatten()?;
    let h = parts.next().flatten()?;

    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return None;
    }
    Some(w / h)
}

/// Compute the largest `src_w:src_h` rectangle centered in `dst_w x dst_h`.
///
/// When the source is wider than the destination the width is pinned to
/// `dst_w`, otherwise the height is pinned to `dst_h`. The leftover space is
/// split evenly on both sides.
///
/// Degenerate (non-positive) source or destination sizes yield an empty
/// rectangle at the destination center.
pub fn fit_rect(src_w: f64, src_h: f64, dst_w: f64, dst_h: f64) -> Rect {
    if !(src_w > 0.0 && src_h > 0.0 && dst_w > 0.0 && dst_h > 0.0) {
        return Rect::new(dst_w.max(0.0) / 2.0, dst_h.max(0.0) / 2.0, 0.0, 0.0);
    }

    let src_aspect = src_w / src_h;
    let dst_aspect = dst_w / dst_h;

    let (width, height) = if src_aspect > dst_aspect {
        (dst_w, dst_w / src_aspect)
    } else {
        (dst_h * src_aspect, dst_h)
    };

    Rect {
        x: (dst_w - width) / 2.0,
        y: (dst_h - height) / 2.0,
        width,
        height,
    }
}

/// Crop `rect` to the largest centered sub-rectangle with `target_aspect`.
///
/// Returns an unmodified copy when there is no target, when the target is not
/// a positive finite ratio, when `rect` is empty, or when `rect` already
/// matches the target within [`ASPECT_TOLERANCE`].
pub fn cover_to_aspect(rect: Rect, target_aspect: Option<f64>) -> Rect {
    let Some(target) = target_aspect.filter(|t| t.is_finite() && *t > 0.0) else {
        return rect;
    };
    if rect.is_empty() {
        return rect;
    }

    let base_aspect = rect.aspect();
    if (base_aspect - target).abs() < ASPECT_TOLERANCE {
        return rect;
    }

    if base_aspect > target {
        // Too wide: trim the sides
        let width = rect.height * target;
        Rect {
            x: rect.x + (rect.width - width) / 2.0,
            y: rect.y,
            width,
            height: rect.height,
        }
    } else {
        // Too tall: trim top and bottom
        let height = rect.width / target;
        Rect {
            x: rect.x,
            y: rect.y + (rect.height - height) / 2.0,
            width: rect.width,
            height,
        }
    }
}

/// Pick output surface dimensions for a source and an optional target ratio.
///
/// The ratio is `target_aspect` when given, else `src_w / src_h`. The longer
/// side of that ratio gets `long_side` pixels and the other side is derived.
/// Both results are rounded and at least 1.
///
/// ```
/// use mosaic_core::geometry::compute_output_size;
///
/// assert_eq!(compute_output_size(1920, 1080, None, 560), (560, 315));
/// assert_eq!(compute_output_size(1920, 1080, Some(1.0), 560), (560, 560));
/// ```
pub fn compute_output_size(
    src_w: u32,
    src_h: u32,
    target_aspect: Option<f64>,
    long_side: u32,
) -> (u32, u32) {
    let native = src_w as f64 / src_h as f64;
    let ratio = target_aspect
        .filter(|t| t.is_finite() && *t > 0.0)
        .unwrap_or(native);
    let ratio = if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    };

    let long = long_side.max(1) as f64;
    let (width, height) = if ratio >= 1.0 {
        (long, long / ratio)
    } else {
        (long * ratio, long)
    };

    (
        (width.round() as u32).max(1),
        (height.round() as u32).max(1),
    )
}

/// Convert a pixel-space aspect ratio into normalized selection space.
///
/// A selection's normalized width and height are scaled independently by the
/// source dimensions, so a rectangle that is `pixel_ratio` wide in source
/// pixels is `pixel_ratio * source_h / source_w` wide in normalized units.
pub fn normalized_aspect(pixel_ratio: f64, source_w: u32, source_h: u32) -> f64 {
    if source_w == 0 || source_h == 0 {
        return pixel_ratio;
    }
    pixel_ratio * source_h as f64 / source_w as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ratio_valid() {
        assert_eq!(parse_ratio("16:9"), Some(16.0 / 9.0));
        assert_eq!(parse_ratio("1:1"), Some(1.0));
        assert_eq!(parse_ratio(" 4 : 3 "), Some(4.0 / 3.0));
        assert_eq!(parse_ratio("2.35:1"), Some(2.35));
    }

    #[test]
    fn test_parse_ratio_sentinels() {
        assert_eq!(parse_ratio("original"), None);
        assert_eq!(parse_ratio(""), None);
    }

    #[test]
    fn test_parse_ratio_malformed() {
        assert_eq!(parse_ratio("0:5"), None);
        assert_eq!(parse_ratio("abc:2"), None);
        assert_eq!(parse_ratio("16"), None);
        assert_eq!(parse_ratio("-4:3"), None);
        assert_eq!(parse_ratio("inf:1"), None);
        assert_eq!(parse_ratio("NaN:1"), None);
    }

    #[test]
    fn test_parse_ratio_ignores_extra_components() {
        assert_eq!(parse_ratio("16:9:4"), Some(16.0 / 9.0));
    }

    #[test]
    fn test_fit_rect_wide_into_square() {
        let r = fit_rect(1920.0, 1080.0, 100.0, 100.0);
        assert_eq!(r.width, 100.0);
        assert!((r.height - 56.25).abs() < 1e-9);
        assert_eq!(r.x, 0.0);
        assert!((r.y - 21.875).abs() < 1e-9);
    }

    #[test]
    fn test_fit_rect_tall_into_square() {
        let r = fit_rect(1080.0, 1920.0, 100.0, 100.0);
        assert_eq!(r.height, 100.0);
        assert!((r.width - 56.25).abs() < 1e-9);
        assert_eq!(r.y, 0.0);
    }

    #[test]
    fn test_fit_rect_equal_aspect_fills() {
        let r = fit_rect(16.0, 9.0, 560.0, 315.0);
        assert!(r.x.abs() < 1e-9 && r.y.abs() < 1e-9);
        assert!((r.width - 560.0).abs() < 1e-9);
        assert!((r.height - 315.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_rect_degenerate() {
        let r = fit_rect(0.0, 1080.0, 100.0, 50.0);
        assert!(r.is_empty());
        assert_eq!((r.x, r.y), (50.0, 25.0));
    }

    #[test]
    fn test_cover_to_aspect_trims_width() {
        let r = cover_to_aspect(Rect::new(0.0, 0.0, 1920.0, 1080.0), Some(1.0));
        assert_eq!(r, Rect::new(420.0, 0.0, 1080.0, 1080.0));
    }

    #[test]
    fn test_cover_to_aspect_trims_height() {
        let r = cover_to_aspect(Rect::new(10.0, 10.0, 100.0, 200.0), Some(1.0));
        assert_eq!(r, Rect::new(10.0, 60.0, 100.0, 100.0));
    }

    #[test]
    fn test_cover_to_aspect_without_target_is_copy() {
        let base = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(cover_to_aspect(base, None), base);
        assert_eq!(cover_to_aspect(base, Some(0.0)), base);
        assert_eq!(cover_to_aspect(base, Some(f64::NAN)), base);
    }

    #[test]
    fn test_cover_to_aspect_matching_is_copy() {
        let base = Rect::new(0.0, 0.0, 160.0, 90.0);
        assert_eq!(cover_to_aspect(base, Some(16.0 / 9.0)), base);
    }

    #[test]
    fn test_compute_output_size_landscape_and_portrait() {
        assert_eq!(compute_output_size(1920, 1080, None, 560), (560, 315));
        assert_eq!(compute_output_size(1080, 1920, None, 560), (315, 560));
    }

    #[test]
    fn test_compute_output_size_with_target() {
        assert_eq!(compute_output_size(1920, 1080, Some(1.0), 560), (560, 560));
        assert_eq!(compute_output_size(1920, 1080, Some(9.0 / 16.0), 560), (315, 560));
        assert_eq!(compute_output_size(640, 480, Some(4.0 / 3.0), DEFAULT_LONG_SIDE), (560, 420));
    }

    #[test]
    fn test_compute_output_size_extreme_ratio_stays_positive() {
        let (w, h) = compute_output_size(100_000, 1, None, 560);
        assert_eq!(w, 560);
        assert_eq!(h, 1);
    }

    #[test]
    fn test_compute_output_size_zero_source() {
        assert_eq!(compute_output_size(0, 0, None, 560), (560, 560));
    }

    #[test]
    fn test_normalized_aspect() {
        // A square in 16:9 source pixels is narrower in normalized units
        let r = normalized_aspect(1.0, 1920, 1080);
        assert!((r - 0.5625).abs() < 1e-12);
        // The source's own ratio is square in normalized space
        let native = normalized_aspect(1920.0 / 1080.0, 1920, 1080);
        assert!((native - 1.0).abs() < 1e-12);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
