//! Drawing surfaces.
//!
//! The render pipeline and the preview overlay only talk to the [`Surface`]
//! trait: fill a rectangle, copy a region of a [`PixelSource`] into a region
//! of the surface, and stroke rectangles or lines. [`Canvas`] is the in-memory
//! RGBA implementation used headless and behind the WASM bindings, where the
//! host blits its buffer onto a real canvas.
//!
//! # Pixel Coverage
//!
//! All primitives take fractional rectangles. A destination pixel is covered
//! when its center `(px + 0.5, py + 0.5)` lies inside the rectangle, so a
//! 1-pixel line centered at `k + 0.5` covers exactly column `k`.

mod raster;

pub use image::Rgba;
pub use raster::Canvas;

use crate::geometry::Rect;

/// Background every surface is cleared to before drawing.
pub const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Build a color from RGB components and a 0.0-1.0 alpha.
pub fn rgba(r: u8, g: u8, b: u8, alpha: f64) -> Rgba<u8> {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([r, g, b, a])
}

/// Sampling used when a region is scaled into another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sampling {
    /// Nearest neighbor: no smoothing, hard block edges.
    Nearest,
    /// Bilinear interpolation between the four closest source pixels.
    #[default]
    Bilinear,
}

/// Stroke parameters for outlines and separator lines.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba<u8>,
    /// Line width in pixels, centered on the path.
    pub width: f64,
    /// Alternating on/off lengths in pixels. Empty means solid.
    pub dash: Vec<f64>,
}

impl StrokeStyle {
    /// A solid stroke.
    pub fn solid(color: Rgba<u8>, width: f64) -> Self {
        Self {
            color,
            width,
            dash: Vec::new(),
        }
    }

    /// Replace the dash pattern.
    pub fn with_dash(mut self, dash: &[f64]) -> Self {
        self.dash = dash.to_vec();
        self
    }
}

/// Anything that can be sampled as an RGBA raster.
pub trait PixelSource {
    /// Width and height in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Color at `(x, y)`. Callers keep coordinates inside `dimensions()`.
    fn pixel(&self, x: u32, y: u32) -> Rgba<u8>;
}

/// A 2D raster drawing surface.
pub trait Surface {
    /// Width and height in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Reallocate to `width x height`. Contents are unspecified afterwards.
    fn resize(&mut self, width: u32, height: u32);

    /// Fill `rect` with a solid color, blending when it is translucent.
    fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>);

    /// Copy region `src` of `source` into region `dst` of this surface.
    fn draw_region(&mut self, source: &dyn PixelSource, src: Rect, dst: Rect, sampling: Sampling);

    /// Stroke the outline of `rect`.
    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle);

    /// Stroke a straight line between two points.
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), style: &StrokeStyle);

    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Rgba<u8>) {
        let (w, h) = self.dimensions();
        self.fill_rect(Rect::from_size(w as f64, h as f64), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_alpha_conversion() {
        assert_eq!(rgba(255, 255, 255, 0.24), Rgba([255, 255, 255, 61]));
        assert_eq!(rgba(1, 2, 3, 1.0), Rgba([1, 2, 3, 255]));
        assert_eq!(rgba(1, 2, 3, 7.0), Rgba([1, 2, 3, 255]));
        assert_eq!(rgba(1, 2, 3, -1.0), Rgba([1, 2, 3, 0]));
    }

    #[test]
    fn test_stroke_style_builders() {
        let style = StrokeStyle::solid(BACKGROUND, 2.0).with_dash(&[6.0, 4.0]);
        assert_eq!(style.width, 2.0);
        assert_eq!(style.dash, vec![6.0, 4.0]);
    }

    #[test]
    fn test_default_sampling_is_smooth() {
        assert_eq!(Sampling::default(), Sampling::Bilinear);
    }
}
