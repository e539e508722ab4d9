//! Crop geometry: aspect parsing, letterbox/cover rectangles and the mapping
//! between destination pixels, normalized selection space and source pixels.
//!
//! Every function here is pure and total. Malformed input is clamped or
//! mapped to `None` rather than rejected.
//!
//! # Coordinate Spaces
//!
//! - **Destination space**: pixels of the surface the frame is drawn into
//! - **Normalized space**: [0, 1] relative to the letterboxed draw rectangle
//! - **Source space**: pixels of the decoded video frame
//!
//! Origin is the top-left corner in all three.

mod aspect;
mod normalize;
mod rect;

pub use aspect::{
    compute_output_size, cover_to_aspect, fit_rect, normalized_aspect, parse_ratio,
    ASPECT_TOLERANCE, DEFAULT_LONG_SIDE,
};
pub use normalize::{normalize_selection, point_to_normalized, to_source_rect};
pub use rect::{NormalizedPoint, Rect, Selection, MIN_FRACTION};
