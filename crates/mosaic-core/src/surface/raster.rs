//! In-memory RGBA canvas.

use std::collections::HashSet;
use std::ops::Range;

use image::{Pixel, Rgba, RgbaImage};

use super::{PixelSource, Sampling, StrokeStyle, Surface};
use crate::geometry::Rect;

/// An RGBA8 raster surface backed by [`RgbaImage`].
///
/// A new canvas is fully transparent black, like an HTML canvas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a transparent `width x height` canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Borrow the underlying image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw RGBA bytes in row-major order (4 bytes per pixel).
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Consume the canvas and return the underlying image.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Source-over compositing of `color` onto one pixel.
    fn blend(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        self.image.get_pixel_mut(x, y).blend(&color);
    }

    fn stroke_segment(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        style: &StrokeStyle,
        dash_offset: f64,
    ) -> f64 {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let length = dx.hypot(dy);
        if !(length > 0.0) || !(style.width > 0.0) {
            return 0.0;
        }

        let (ux, uy) = (dx / length, dy / length);
        let half = style.width / 2.0;

        for (a, b) in dash_intervals(&style.dash, dash_offset, length) {
            let p0 = (from.0 + ux * a, from.1 + uy * a);
            let p1 = (from.0 + ux * b, from.1 + uy * b);

            if dy == 0.0 {
                let rect = Rect::new(p0.0.min(p1.0), from.1 - half, (p1.0 - p0.0).abs(), style.width);
                self.fill_rect(rect, style.color);
            } else if dx == 0.0 {
                let rect = Rect::new(from.0 - half, p0.1.min(p1.1), style.width, (p1.1 - p0.1).abs());
                self.fill_rect(rect, style.color);
            } else {
                self.stamp_segment(p0, p1, style);
            }
        }

        length
    }

    /// Rasterize a diagonal segment by sweeping a square brush along it.
    ///
    /// Every covered pixel is blended exactly once.
    fn stamp_segment(&mut self, p0: (f64, f64), p1: (f64, f64), style: &StrokeStyle) {
        let (w, h) = self.image.dimensions();
        let half = style.width / 2.0;
        let length = (p1.0 - p0.0).hypot(p1.1 - p0.1);
        let steps = (length * 2.0).ceil().max(1.0) as u32;

        let mut covered = HashSet::new();
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let cx = p0.0 + (p1.0 - p0.0) * t;
            let cy = p0.1 + (p1.1 - p0.1) * t;
            for y in span(cy - half, cy + half, h) {
                for x in span(cx - half, cx + half, w) {
                    covered.insert((x, y));
                }
            }
        }

        for (x, y) in covered {
            self.blend(x, y, style.color);
        }
    }
}

impl PixelSource for Canvas {
    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }
}

impl Surface for Canvas {
    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.image.dimensions() != (width, height) {
            self.image = RgbaImage::new(width, height);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        let (w, h) = self.image.dimensions();
        let cols = span(rect.x, rect.right(), w);
        for y in span(rect.y, rect.bottom(), h) {
            for x in cols.clone() {
                self.blend(x, y, color);
            }
        }
    }

    fn draw_region(&mut self, source: &dyn PixelSource, src: Rect, dst: Rect, sampling: Sampling) {
        let (src_w, src_h) = source.dimensions();
        if src.is_empty() || dst.is_empty() || src_w == 0 || src_h == 0 {
            return;
        }

        let bounds = SampleBounds::new(&src, src_w, src_h);
        let (w, h) = self.image.dimensions();
        let cols = span(dst.x, dst.right(), w);
        let scale_x = src.width / dst.width;
        let scale_y = src.height / dst.height;

        for py in span(dst.y, dst.bottom(), h) {
            let v = src.y + (py as f64 + 0.5 - dst.y) * scale_y;
            for px in cols.clone() {
                let u = src.x + (px as f64 + 0.5 - dst.x) * scale_x;
                let color = match sampling {
                    Sampling::Nearest => bounds.nearest(source, u, v),
                    Sampling::Bilinear => bounds.bilinear(source, u, v),
                };
                self.blend(px, py, color);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle) {
        let half = style.width / 2.0;
        let (l, t, r, b) = (rect.x, rect.y, rect.right(), rect.bottom());

        // Horizontal edges own the corners so no pixel is blended twice.
        let mut offset = 0.0;
        offset += self.stroke_segment((l - half, t), (r + half, t), style, offset);
        offset += self.stroke_segment((r, t + half), (r, b - half), style, offset);
        offset += self.stroke_segment((r + half, b), (l - half, b), style, offset);
        self.stroke_segment((l, b - half), (l, t + half), style, offset);
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), style: &StrokeStyle) {
        self.stroke_segment(from, to, style, 0.0);
    }
}

/// Source-pixel window a draw may read from.
struct SampleBounds {
    min_x: i64,
    max_x: i64,
    min_y: i64,
    max_y: i64,
}

impl SampleBounds {
    fn new(src: &Rect, src_w: u32, src_h: u32) -> Self {
        let (last_x, last_y) = (src_w as i64 - 1, src_h as i64 - 1);
        let min_x = (src.x.floor() as i64).clamp(0, last_x);
        let min_y = (src.y.floor() as i64).clamp(0, last_y);
        let max_x = (src.right().ceil() as i64 - 1).clamp(min_x, last_x);
        let max_y = (src.bottom().ceil() as i64 - 1).clamp(min_y, last_y);
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    fn clamp_x(&self, x: i64) -> u32 {
        x.clamp(self.min_x, self.max_x) as u32
    }

    fn clamp_y(&self, y: i64) -> u32 {
        y.clamp(self.min_y, self.max_y) as u32
    }

    fn nearest(&self, source: &dyn PixelSource, u: f64, v: f64) -> Rgba<u8> {
        source.pixel(self.clamp_x(u.floor() as i64), self.clamp_y(v.floor() as i64))
    }

    fn bilinear(&self, source: &dyn PixelSource, u: f64, v: f64) -> Rgba<u8> {
        let fx = u - 0.5;
        let fy = v - 0.5;
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = (fx - x0) as f32;
        let ty = (fy - y0) as f32;

        let (x0, y0) = (x0 as i64, y0 as i64);
        let (xa, xb) = (self.clamp_x(x0), self.clamp_x(x0 + 1));
        let (ya, yb) = (self.clamp_y(y0), self.clamp_y(y0 + 1));

        let p00 = source.pixel(xa, ya);
        let p10 = source.pixel(xb, ya);
        let p01 = source.pixel(xa, yb);
        let p11 = source.pixel(xb, yb);

        let mut out = [0u8; 4];
        for (c, slot) in out.iter_mut().enumerate() {
            let top = p00[c] as f32 * (1.0 - tx) + p10[c] as f32 * tx;
            let bottom = p01[c] as f32 * (1.0 - tx) + p11[c] as f32 * tx;
            *slot = (top * (1.0 - ty) + bottom * ty).round().clamp(0.0, 255.0) as u8;
        }
        Rgba(out)
    }
}

/// Pixel indices whose centers fall in `[start, end)`, limited to `0..limit`.
fn span(start: f64, end: f64, limit: u32) -> Range<u32> {
    if !(start.is_finite() && end.is_finite()) || end <= start {
        return 0..0;
    }
    let first = (start - 0.5).ceil().max(0.0);
    let last = (end - 0.5).ceil().min(limit as f64);
    if last <= first {
        return 0..0;
    }
    first as u32..last as u32
}

/// Split `[0, length)` into the "on" intervals of a dash pattern that starts
/// `offset` pixels into its cycle.
///
/// Odd-length patterns are repeated once, as canvas implementations do.
/// Empty, negative, non-finite or all-zero patterns draw a solid line.
fn dash_intervals(pattern: &[f64], offset: f64, length: f64) -> Vec<(f64, f64)> {
    let valid = pattern.iter().all(|d| d.is_finite() && *d >= 0.0);
    let mut pattern = pattern.to_vec();
    if pattern.len() % 2 == 1 {
        pattern.extend_from_within(..);
    }
    let total: f64 = pattern.iter().sum();
    if pattern.is_empty() || !valid || total <= 0.0 {
        return vec![(0.0, length)];
    }

    let mut phase = offset.rem_euclid(total);
    let mut index = 0;
    while phase >= pattern[index] {
        phase -= pattern[index];
        index = (index + 1) % pattern.len();
    }

    let mut intervals = Vec::new();
    let mut pos = 0.0;
    let mut remaining = pattern[index] - phase;
    while pos < length {
        let end = (pos + remaining).min(length);
        if index % 2 == 0 && end > pos {
            intervals.push((pos, end));
        }
        pos = end;
        index = (index + 1) % pattern.len();
        remaining = pattern[index];
    }
    intervals
}
