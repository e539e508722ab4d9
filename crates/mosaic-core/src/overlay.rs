//! Preview of the full source frame with the crop selection drawn on top.

use crate::geometry::{fit_rect, Rect, Selection};
use crate::interaction::{Handle, SelectionState};
use crate::surface::{rgba, PixelSource, Rgba, Sampling, StrokeStyle, Surface, BACKGROUND};

/// Outline color of the committed selection.
pub const SELECTION_COLOR: Rgba<u8> = Rgba([0x4d, 0xd6, 0xff, 255]);

/// Outline color of a selection being drawn.
pub const PREVIEW_COLOR: Rgba<u8> = Rgba([0xff, 0xe0, 0x66, 255]);

pub const OUTLINE_WIDTH: f64 = 2.0;

/// Dash pattern of a selection being drawn.
pub const PREVIEW_DASH: [f64; 2] = [6.0, 4.0];

/// Side of the square drawn on each corner handle, in pixels.
pub const HANDLE_MARKER_PX: f64 = 6.0;

/// Translucent tint laid over the committed selection.
pub fn selection_fill() -> Rgba<u8> {
    rgba(0x4d, 0xd6, 0xff, 0.1)
}

/// Draw the preview surface.
///
/// The frame is letterboxed into the surface. When cropping is enabled the
/// committed selection is outlined, tinted and given handle markers; a
/// selection being drawn is outlined dashed regardless.
///
/// # Returns
///
/// The rectangle the frame occupies, which pointer events are mapped through.
pub fn draw_preview<S>(
    frame: &dyn PixelSource,
    surface: &mut S,
    state: &SelectionState,
    crop_enabled: bool,
) -> Rect
where
    S: Surface + ?Sized,
{
    let (frame_w, frame_h) = frame.dimensions();
    let (dst_w, dst_h) = surface.dimensions();
    let draw_rect = fit_rect(frame_w as f64, frame_h as f64, dst_w as f64, dst_h as f64);

    surface.clear(BACKGROUND);
    surface.draw_region(
        frame,
        Rect::from_size(frame_w as f64, frame_h as f64),
        draw_rect,
        Sampling::Bilinear,
    );

    if crop_enabled {
        if let Some(selection) = state.selection() {
            draw_selection(surface, selection, &draw_rect);
        }
    }

    if let Some(preview) = state.preview() {
        let style = StrokeStyle::solid(PREVIEW_COLOR, OUTLINE_WIDTH).with_dash(&PREVIEW_DASH);
        surface.stroke_rect(preview.to_draw_rect(&draw_rect), &style);
    }

    draw_rect
}

fn draw_selection<S: Surface + ?Sized>(surface: &mut S, selection: &Selection, draw_rect: &Rect) {
    let rect = selection.to_draw_rect(draw_rect);
    surface.stroke_rect(rect, &StrokeStyle::solid(SELECTION_COLOR, OUTLINE_WIDTH));
    surface.fill_rect(rect, selection_fill());

    let half = HANDLE_MARKER_PX / 2.0;
    for handle in Handle::ALL {
        let corner = handle.corner(selection);
        let cx = draw_rect.x + corner.x * draw_rect.width;
        let cy = draw_rect.y + corner.y * draw_rect.height;
        surface.fill_rect(
            Rect::new(cx - half, cy - half, HANDLE_MARKER_PX, HANDLE_MARKER_PX),
            SELECTION_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;
    use crate::interaction::{InteractionContext, PointerEvent};
    use crate::surface::Canvas;

    fn px(canvas: &Canvas, x: u32, y: u32) -> Rgba<u8> {
        *canvas.image().get_pixel(x, y)
    }

    #[test]
    fn test_frame_is_letterboxed() {
        let frame = Frame::solid(20, 10, [200, 200, 200]);
        let mut surface = Canvas::new(40, 40);
        let draw_rect = draw_preview(&frame, &mut surface, &SelectionState::new(), true);

        assert_eq!(draw_rect, Rect::new(0.0, 10.0, 40.0, 20.0));
        assert_eq!(px(&surface, 20, 5), BACKGROUND);
        assert_eq!(px(&surface, 20, 20), Rgba([200, 200, 200, 255]));
        assert_eq!(px(&surface, 20, 35), BACKGROUND);
    }

    #[test]
    fn test_selection_outline_and_tint() {
        let frame = Frame::solid(100, 100, [0, 0, 0]);
        let mut surface = Canvas::new(100, 100);
        let state = SelectionState::with_selection(Selection::new(0.2, 0.2, 0.6, 0.6));
        draw_preview(&frame, &mut surface, &state, true);

        // Outline straddles x = 20 with a 2 px stroke: columns 19 and 20
        assert_eq!(px(&surface, 19, 50), SELECTION_COLOR);
        assert_eq!(px(&surface, 18, 50), BACKGROUND);
        // Interior is tinted but darker than the outline
        let inside = px(&surface, 50, 50);
        assert_ne!(inside, BACKGROUND);
        assert!(inside[2] < SELECTION_COLOR[2]);
    }

    #[test]
    fn test_handle_markers_on_corners() {
        let frame = Frame::solid(100, 100, [0, 0, 0]);
        let mut surface = Canvas::new(100, 100);
        let state = SelectionState::with_selection(Selection::new(0.2, 0.2, 0.6, 0.6));
        draw_preview(&frame, &mut surface, &state, true);

        // 6 px markers reach 3 px beyond the corner, past the 1 px stroke half
        assert_eq!(px(&surface, 17, 17), SELECTION_COLOR);
        assert_eq!(px(&surface, 82, 82), SELECTION_COLOR);
        assert_eq!(px(&surface, 17, 50), BACKGROUND);
    }

    #[test]
    fn test_crop_disabled_hides_selection() {
        let frame = Frame::solid(100, 100, [0, 0, 0]);
        let mut surface = Canvas::new(100, 100);
        let state = SelectionState::with_selection(Selection::new(0.2, 0.2, 0.6, 0.6));
        draw_preview(&frame, &mut surface, &state, false);
        assert!(surface.image().pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn test_creating_preview_is_dashed() {
        let frame = Frame::solid(100, 100, [0, 0, 0]);
        let mut surface = Canvas::new(100, 100);
        let ctx = InteractionContext {
            draw_rect: Rect::from_size(100.0, 100.0),
            crop_enabled: true,
            lock_ratio: None,
        };
        let mut state = SelectionState::new();
        state.handle(PointerEvent::Down { x: 10.0, y: 10.0 }, &ctx);
        state.handle(PointerEvent::Move { x: 90.0, y: 90.0 }, &ctx);
        draw_preview(&frame, &mut surface, &state, true);

        // Top edge runs from x = 9: six on, four off
        let top: Vec<bool> = (9..29).map(|x| px(&surface, x, 10) == PREVIEW_COLOR).collect();
        let expected: Vec<bool> = (0..20).map(|i| i % 10 < 6).collect();
        assert_eq!(top, expected);
    }
}
