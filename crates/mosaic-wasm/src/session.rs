//! JavaScript handle to a mosaic session.
//!
//! The page owns the `<video>` element and the two canvases. Each animation
//! frame it grabs the video's pixels, hands them over with
//! [`JsMosaicSession::set_frame`], calls `tick()` and blits
//! `output_pixels()` / `preview_pixels()` back with `putImageData`.

use mosaic_core::frame::{Frame, FrameError};
use mosaic_core::media::{LiveSource, MediaError};
use mosaic_core::{MediaSource, MosaicConfig, MosaicSession, PointerEvent, Surface, TickOutcome};
use wasm_bindgen::prelude::*;

/// A mosaic session fed with frames from a host video element.
#[wasm_bindgen(js_name = MosaicSession)]
pub struct JsMosaicSession {
    inner: MosaicSession<LiveSource>,
}

#[wasm_bindgen(js_class = MosaicSession)]
impl JsMosaicSession {
    /// Create a session with default settings and no source.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsMosaicSession {
        JsMosaicSession {
            inner: MosaicSession::new(MosaicConfig::default()),
        }
    }

    /// Hand over the current video frame.
    ///
    /// # Arguments
    /// * `width` - Frame width in pixels
    /// * `height` - Frame height in pixels
    /// * `rgba` - RGBA bytes as returned by `getImageData`
    /// * `paused` - Whether the video element is paused
    ///
    /// # Example (TypeScript)
    /// ```typescript
    /// ctx.drawImage(video, 0, 0);
    /// const data = ctx.getImageData(0, 0, video.videoWidth, video.videoHeight);
    /// session.set_frame(data.width, data.height, data.data, video.paused);
    /// ```
    pub fn set_frame(&mut self, width: u32, height: u32, rgba: &[u8], paused: bool) -> Result<(), JsValue> {
        self.push_frame(width, height, rgba, paused)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Report that the host failed to load its video.
    pub fn fail(&mut self, message: &str) {
        let error = if message.is_empty() {
            MediaError::NoSource
        } else {
            MediaError::Load(message.to_string())
        };
        web_sys::console::error_1(&JsValue::from_str(&error.to_string()));
        self.report_failure(error);
    }

    /// Replace the settings from a plain object such as
    /// `{ matrixCols: 32, matrixRows: 18, aspectMode: "fill" }`.
    ///
    /// Missing fields take their defaults.
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: MosaicConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
        self.inner.set_config(config);
        Ok(())
    }

    /// Current settings as a plain object.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.config()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Apply a `"COLSxROWS"` preset. Returns whether the grid changed.
    pub fn apply_preset(&mut self, preset: &str) -> bool {
        self.inner.apply_preset(preset)
    }

    /// Pointer pressed at preview-canvas coordinates.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.inner.pointer(PointerEvent::Down { x, y })
    }

    /// Pointer moved to preview-canvas coordinates.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.inner.pointer(PointerEvent::Move { x, y })
    }

    pub fn pointer_up(&mut self) -> bool {
        self.inner.pointer(PointerEvent::Up)
    }

    pub fn pointer_cancel(&mut self) -> bool {
        self.inner.pointer(PointerEvent::Cancel)
    }

    /// Clear the crop selection.
    pub fn reset_crop(&mut self) {
        self.inner.reset_crop();
    }

    /// Toggle the mirrored pause state. Returns whether it is now paused.
    pub fn play_pause(&mut self) -> Result<bool, JsValue> {
        self.inner
            .play_pause()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(self.is_paused())
    }

    /// Run one render-loop step.
    ///
    /// Returns `"rendered"`, `"not-ready"`, `"failed"` or `"frozen"`.
    pub fn tick(&mut self) -> String {
        outcome_name(self.inner.tick()).to_string()
    }

    /// Redraw both surfaces now, bypassing the freeze gate.
    pub fn render(&mut self) -> bool {
        self.inner.render()
    }

    #[wasm_bindgen(getter)]
    pub fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }

    #[wasm_bindgen(getter)]
    pub fn has_selection(&self) -> bool {
        self.inner.selection().selection().is_some()
    }

    #[wasm_bindgen(getter)]
    pub fn status_text(&self) -> String {
        self.inner.status().text.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn status_is_error(&self) -> bool {
        self.inner.status().is_error
    }

    #[wasm_bindgen(getter)]
    pub fn output_width(&self) -> u32 {
        Surface::dimensions(self.inner.output()).0
    }

    #[wasm_bindgen(getter)]
    pub fn output_height(&self) -> u32 {
        Surface::dimensions(self.inner.output()).1
    }

    #[wasm_bindgen(getter)]
    pub fn preview_width(&self) -> u32 {
        Surface::dimensions(self.inner.preview()).0
    }

    #[wasm_bindgen(getter)]
    pub fn preview_height(&self) -> u32 {
        Surface::dimensions(self.inner.preview()).1
    }

    /// Mosaic pixels as RGBA, ready for `new ImageData(...)`.
    ///
    /// Note: This copies the buffer out of WASM memory.
    pub fn output_pixels(&self) -> js_sys::Uint8ClampedArray {
        js_sys::Uint8ClampedArray::from(self.inner.output().as_raw())
    }

    /// Preview pixels (frame plus selection overlay) as RGBA.
    pub fn preview_pixels(&self) -> js_sys::Uint8ClampedArray {
        js_sys::Uint8ClampedArray::from(self.inner.preview().as_raw())
    }

    /// The committed selection in normalized units, or `null`.
    pub fn selection(&self) -> Result<JsValue, JsValue> {
        match self.inner.selection().selection() {
            Some(selection) => {
                serde_wasm_bindgen::to_value(selection).map_err(|e| JsValue::from_str(&e.to_string()))
            }
            None => Ok(JsValue::NULL),
        }
    }
}

impl Default for JsMosaicSession {
    fn default() -> Self {
        Self::new()
    }
}

impl JsMosaicSession {
    /// Install a live source on first use and push `rgba` into it.
    pub(crate) fn push_frame(
        &mut self,
        width: u32,
        height: u32,
        rgba: &[u8],
        paused: bool,
    ) -> Result<(), FrameError> {
        let frame = Frame::from_rgba(width, height, rgba)?;
        if self.inner.media().is_none() {
            self.inner.load(LiveSource::new());
        }
        if let Some(source) = self.inner.media_mut() {
            source.push_frame(frame);
            source.set_paused(paused);
        }
        Ok(())
    }

    pub(crate) fn report_failure(&mut self, error: MediaError) {
        match self.inner.media_mut() {
            Some(source) => source.fail(error),
            None => self.inner.fail_load(error),
        }
        // Surface the failure in the status line without waiting for a tick
        self.inner.tick();
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.inner.media().map_or(true, |m| m.is_paused())
    }
}

fn outcome_name(outcome: TickOutcome) -> &'static str {
    match outcome {
        TickOutcome::Rendered => "rendered",
        TickOutcome::NotReady => "not-ready",
        TickOutcome::Failed => "failed",
        TickOutcome::Frozen => "frozen",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_frame(width: u32, height: u32) -> Vec<u8> {
        vec![128; (width * height * 4) as usize]
    }

    #[test]
    fn test_new_session_waits_for_frames() {
        let mut session = JsMosaicSession::new();
        assert!(!session.is_ready());
        assert_eq!(session.tick(), "not-ready");
        assert_eq!(session.output_width(), 0);
    }

    #[test]
    fn test_first_frame_makes_session_ready() {
        let mut session = JsMosaicSession::new();
        session.push_frame(64, 36, &gray_frame(64, 36), true).unwrap();
        assert_eq!(session.tick(), "rendered");
        assert!(session.is_ready());
        assert_eq!((session.output_width(), session.output_height()), (560, 315));
        assert_eq!((session.preview_width(), session.preview_height()), (560, 315));
    }

    #[test]
    fn test_bad_buffer_is_rejected() {
        let mut session = JsMosaicSession::new();
        let err = session.push_frame(4, 4, &[0; 10], true).unwrap_err();
        assert_eq!(err, FrameError::BufferMismatch { expected: 64, actual: 10 });
        assert!(!session.is_ready());
    }

    #[test]
    fn test_freeze_follows_host_pause_state() {
        let mut session = JsMosaicSession::new();
        session.inner.set_config(MosaicConfig {
            freeze_frame: true,
            ..MosaicConfig::default()
        });
        session.push_frame(8, 8, &gray_frame(8, 8), false).unwrap();
        assert_eq!(session.tick(), "frozen");
        session.push_frame(8, 8, &gray_frame(8, 8), true).unwrap();
        assert_eq!(session.tick(), "rendered");
    }

    #[test]
    fn test_pointer_drag_creates_selection() {
        let mut session = JsMosaicSession::new();
        session.push_frame(100, 100, &gray_frame(100, 100), true).unwrap();
        session.tick();
        assert!(session.pointer_down(56.0, 56.0));
        assert!(session.pointer_move(280.0, 280.0));
        assert!(session.pointer_up());
        assert!(session.has_selection());

        session.reset_crop();
        assert!(!session.has_selection());
    }

    #[test]
    fn test_failure_reaches_status() {
        let mut session = JsMosaicSession::new();
        session.push_frame(8, 8, &gray_frame(8, 8), true).unwrap();
        session.report_failure(MediaError::Load("decode error".to_string()));
        assert!(session.status_is_error());
        assert_eq!(session.status_text(), "Could not load media: decode error");
        assert_eq!(session.tick(), "failed");

        // A fresh frame recovers the source
        session.push_frame(8, 8, &gray_frame(8, 8), true).unwrap();
        assert_eq!(session.tick(), "rendered");
    }

    #[test]
    fn test_failure_before_any_frame() {
        let mut session = JsMosaicSession::new();
        session.report_failure(MediaError::NoSource);
        assert_eq!(session.status_text(), "No media source selected");
        assert!(session.is_paused());
    }

    #[test]
    fn test_preset_and_outcome_names() {
        let mut session = JsMosaicSession::new();
        assert!(session.apply_preset("8x8"));
        assert!(!session.apply_preset("8x8"));
        assert_eq!(outcome_name(TickOutcome::Frozen), "frozen");
    }
}
