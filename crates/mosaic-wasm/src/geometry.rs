//! Geometry helpers for sizing canvases from JavaScript.

use mosaic_core::geometry::{self, DEFAULT_LONG_SIDE};
use wasm_bindgen::prelude::*;

/// Parse a `"W:H"` ratio. Returns `undefined` for `"original"` or bad input.
#[wasm_bindgen]
pub fn parse_ratio(text: &str) -> Option<f64> {
    geometry::parse_ratio(text)
}

/// Canvas size `[width, height]` for a source and an optional output ratio.
///
/// # Example (TypeScript)
/// ```typescript
/// const [w, h] = compute_output_size(video.videoWidth, video.videoHeight, parse_ratio("16:9"));
/// canvas.width = w;
/// canvas.height = h;
/// ```
#[wasm_bindgen]
pub fn compute_output_size(source_width: u32, source_height: u32, target_aspect: Option<f64>) -> Vec<u32> {
    let (width, height) =
        geometry::compute_output_size(source_width, source_height, target_aspect, DEFAULT_LONG_SIDE);
    vec![width, height]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ratio_binding() {
        assert_eq!(parse_ratio("4:3"), Some(4.0 / 3.0));
        assert_eq!(parse_ratio("original"), None);
    }

    #[test]
    fn test_compute_output_size_binding() {
        assert_eq!(compute_output_size(1920, 1080, None), vec![560, 315]);
        assert_eq!(compute_output_size(1920, 1080, Some(1.0)), vec![560, 560]);
        assert_eq!(compute_output_size(1080, 1920, None), vec![315, 560]);
    }
}
