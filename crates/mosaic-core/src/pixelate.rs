//! Mosaic rendering.
//!
//! A frame is reduced to one pixel per grid cell on a small intermediate
//! canvas, then blown back up to the output surface with nearest-neighbor
//! sampling so every cell becomes a flat block.
//!
//! # Pipeline
//!
//! 1. In fill mode with a target ratio, the base source rectangle is
//!    cover-cropped to that ratio.
//! 2. The intermediate canvas is sized to the grid and cleared to black.
//! 3. Fit mode letterboxes the source rectangle inside the grid; fill mode
//!    stretches it over the whole grid.
//! 4. The output surface is cleared and the intermediate canvas is scaled
//!    onto all of it.
//! 5. Optionally, translucent separator lines are drawn between cells.

use tracing::trace;

use crate::config::{AspectMode, Grid, MIN_GRID};
use crate::geometry::{cover_to_aspect, fit_rect, Rect};
use crate::surface::{rgba, Canvas, PixelSource, Rgba, Sampling, StrokeStyle, Surface, BACKGROUND};

/// Width of the cell separator lines, in output pixels.
pub const GRID_LINE_WIDTH: f64 = 1.0;

/// Color of the cell separator lines: white at 24% opacity.
pub fn grid_line_color() -> Rgba<u8> {
    rgba(255, 255, 255, 0.24)
}

/// Inputs of a single mosaic render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Mosaic resolution
    pub grid: Grid,
    /// Region of the frame to sample, in source pixels
    pub base_source_rect: Rect,
    /// Output ratio, `None` for the source ratio
    pub target_aspect: Option<f64>,
    pub aspect_mode: AspectMode,
    /// Draw separator lines between cells
    pub show_grid: bool,
}

/// Region of the frame actually sampled for `options`.
///
/// Only fill mode with a target ratio crops; everything else samples the
/// base rectangle as is.
pub fn effective_source_rect(options: &RenderOptions) -> Rect {
    match (options.aspect_mode, options.target_aspect) {
        (AspectMode::Fill, Some(target)) => cover_to_aspect(options.base_source_rect, Some(target)),
        _ => options.base_source_rect,
    }
}

/// Renders mosaics, reusing one intermediate canvas across frames.
#[derive(Debug, Clone, Default)]
pub struct Pixelator {
    low_res: Canvas,
}

impl Pixelator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The intermediate one-pixel-per-cell canvas from the last render.
    pub fn low_res(&self) -> &Canvas {
        &self.low_res
    }

    /// Render one mosaic of `frame` onto `output`.
    ///
    /// # Arguments
    ///
    /// * `frame` - Current video frame
    /// * `output` - Destination surface; its size is left untouched
    /// * `options` - Grid, source region and placement
    ///
    /// Identical inputs produce identical output pixels.
    pub fn render<O>(&mut self, frame: &dyn PixelSource, output: &mut O, options: &RenderOptions)
    where
        O: Surface + ?Sized,
    {
        let cols = options.grid.cols.max(MIN_GRID);
        let rows = options.grid.rows.max(MIN_GRID);
        let source_rect = effective_source_rect(options);

        self.low_res.resize(cols, rows);
        self.low_res.clear(BACKGROUND);

        let grid_rect = Rect::from_size(cols as f64, rows as f64);
        let target_rect = match options.aspect_mode {
            AspectMode::Fit => fit_rect(
                source_rect.width,
                source_rect.height,
                grid_rect.width,
                grid_rect.height,
            ),
            AspectMode::Fill => grid_rect,
        };
        self.low_res
            .draw_region(frame, source_rect, target_rect, Sampling::Nearest);

        let (out_w, out_h) = output.dimensions();
        output.clear(BACKGROUND);
        output.draw_region(
            &self.low_res,
            grid_rect,
            Rect::from_size(out_w as f64, out_h as f64),
            Sampling::Nearest,
        );

        if options.show_grid {
            draw_grid(output, cols, rows);
        }

        trace!(
            cols,
            rows,
            mode = options.aspect_mode.as_str(),
            output_w = out_w,
            output_h = out_h,
            "rendered mosaic"
        );
    }
}

/// Offset of the `index`-th separator along a side of `length` pixels split
/// into `cells`. Lines sit on pixel centers so a 1 px stroke stays crisp.
pub fn grid_line_offset(index: u32, length: u32, cells: u32) -> f64 {
    (index as f64 * length as f64 / cells as f64).round() + 0.5
}

fn draw_grid<O: Surface + ?Sized>(output: &mut O, cols: u32, rows: u32) {
    let (width, height) = output.dimensions();
    let style = StrokeStyle::solid(grid_line_color(), GRID_LINE_WIDTH);

    for c in 1..cols {
        let x = grid_line_offset(c, width, cols);
        output.stroke_line((x, 0.0), (x, height as f64), &style);
    }
    for r in 1..rows {
        let y = grid_line_offset(r, height, rows);
        output.stroke_line((0.0, y), (width as f64, y), &style);
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
