//! A mosaic session: one media source, its crop selection and both surfaces.
//!
//! The host forwards pointer events and calls [`MosaicSession::tick`] once
//! per display frame. Everything runs on the caller's thread; a pointer
//! event always lands before the next tick that renders.

use tracing::{debug, info, warn};

use crate::config::MosaicConfig;
use crate::geometry::{compute_output_size, fit_rect, to_source_rect, Rect, DEFAULT_LONG_SIDE};
use crate::interaction::{lock_ratio, InteractionContext, PointerEvent, SelectionState};
use crate::media::{MediaError, MediaSource, MediaStatus};
use crate::overlay::draw_preview;
use crate::pixelate::{Pixelator, RenderOptions};
use crate::surface::{Canvas, Surface};

/// User-visible status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// What a call to [`MosaicSession::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Both surfaces were redrawn.
    Rendered,
    /// No source, or the source is still loading.
    NotReady,
    /// The source failed to load.
    Failed,
    /// Freeze is on and the source is playing.
    Frozen,
}

/// Owns the state behind one mosaic view.
#[derive(Debug)]
pub struct MosaicSession<M> {
    config: MosaicConfig,
    media: Option<M>,
    source_size: Option<(u32, u32)>,
    selection: SelectionState,
    pixelator: Pixelator,
    output: Canvas,
    preview: Canvas,
    draw_rect: Rect,
    status: StatusMessage,
}

impl<M: MediaSource> MosaicSession<M> {
    pub fn new(config: MosaicConfig) -> Self {
        Self {
            config,
            media: None,
            source_size: None,
            selection: SelectionState::new(),
            pixelator: Pixelator::new(),
            output: Canvas::new(0, 0),
            preview: Canvas::new(0, 0),
            draw_rect: Rect::default(),
            status: StatusMessage::info("Waiting for media..."),
        }
    }

    /// Replace the media source.
    ///
    /// The selection is kept: it is normalized, so it carries over to a
    /// source of any size. Returns what the first readiness check found.
    pub fn load(&mut self, media: M) -> TickOutcome {
        self.media = Some(media);
        self.source_size = None;
        self.selection.abandon_drag();
        self.status = StatusMessage::info("Loading media...");
        let outcome = self.poll_media();
        if outcome == TickOutcome::Rendered {
            self.render();
        }
        outcome
    }

    /// Record a load failure reported by the host before any source exists.
    pub fn fail_load(&mut self, error: MediaError) {
        warn!(%error, "media load failed");
        self.media = None;
        self.source_size = None;
        self.selection.reset();
        self.status = StatusMessage::error(error.to_string());
    }

    pub fn media(&self) -> Option<&M> {
        self.media.as_ref()
    }

    pub fn media_mut(&mut self) -> Option<&mut M> {
        self.media.as_mut()
    }

    pub fn config(&self) -> &MosaicConfig {
        &self.config
    }

    /// Replace the settings and redraw.
    ///
    /// The output surface is resized when the target ratio changes. Config
    /// changes redraw even while frozen.
    pub fn set_config(&mut self, config: MosaicConfig) {
        let ratio_changed = config.target_aspect() != self.config.target_aspect();
        self.config = config;
        if ratio_changed {
            self.sync_sizes();
        }
        self.render();
    }

    /// Apply a `"COLSxROWS"` grid preset. Returns whether anything changed.
    pub fn apply_preset(&mut self, preset: &str) -> bool {
        let changed = self.config.apply_preset(preset);
        if changed {
            self.render();
        }
        changed
    }

    /// Toggle playback, reporting failures in the status line.
    pub fn play_pause(&mut self) -> Result<(), MediaError> {
        let media = self.media.as_mut().ok_or(MediaError::NoSource)?;
        media.play_pause().map_err(|error| {
            warn!(%error, "play/pause failed");
            self.status = StatusMessage::error(error.to_string());
            error
        })
    }

    /// Route a pointer event from the preview surface to the selection.
    ///
    /// Presses and moves are ignored until the source is ready; releases
    /// always end the drag. Returns whether the selection state changed.
    pub fn pointer(&mut self, event: PointerEvent) -> bool {
        let Some((width, height)) = self.source_size else {
            return match event {
                PointerEvent::Up | PointerEvent::Cancel => self.selection.abandon_drag(),
                PointerEvent::Down { .. } | PointerEvent::Move { .. } => false,
            };
        };
        let (preview_w, preview_h) = Surface::dimensions(&self.preview);
        let ctx = InteractionContext {
            draw_rect: fit_rect(width as f64, height as f64, preview_w as f64, preview_h as f64),
            crop_enabled: self.config.crop_enabled,
            lock_ratio: self
                .config
                .aspect_lock_enabled
                .then(|| lock_ratio(self.config.target_aspect(), width, height)),
        };

        let changed = self.selection.handle(event, &ctx);
        if changed && matches!(event, PointerEvent::Up | PointerEvent::Cancel) {
            self.render();
        }
        changed
    }

    /// Drop the crop selection and any drag in progress.
    pub fn reset_crop(&mut self) {
        debug!("crop reset");
        self.selection.reset();
        self.render();
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Advance the render loop by one display frame.
    ///
    /// Skips while there is no ready source, and while freeze is on and the
    /// source is playing.
    pub fn tick(&mut self) -> TickOutcome {
        match self.poll_media() {
            TickOutcome::Rendered => {}
            skipped => return skipped,
        }

        let playing = self.media.as_ref().is_some_and(|m| !m.is_paused());
        if self.config.freeze_frame && playing {
            return TickOutcome::Frozen;
        }

        if self.render() {
            TickOutcome::Rendered
        } else {
            TickOutcome::NotReady
        }
    }

    /// Redraw the preview and the mosaic from the current frame.
    ///
    /// Returns `false` when there is nothing to draw.
    pub fn render(&mut self) -> bool {
        if self.source_size.is_none() {
            return false;
        }
        let options = self.render_options();
        let Some(frame) = self.media.as_ref().and_then(|m| m.current_frame()) else {
            return false;
        };

        self.draw_rect = draw_preview(frame, &mut self.preview, &self.selection, self.config.crop_enabled);
        self.pixelator.render(frame, &mut self.output, &options);
        true
    }

    /// Region of the source sampled for the mosaic, in source pixels.
    ///
    /// The whole frame unless cropping is enabled and a selection exists.
    pub fn base_source_rect(&self) -> Rect {
        let (width, height) = self.source_size.unwrap_or_default();
        let full = Rect::from_size(width as f64, height as f64);
        if !self.config.crop_enabled {
            return full;
        }
        to_source_rect(self.selection.selection(), width, height).unwrap_or(full)
    }

    /// Options for a render with the current config and selection.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            grid: self.config.grid(),
            base_source_rect: self.base_source_rect(),
            target_aspect: self.config.target_aspect(),
            aspect_mode: self.config.aspect_mode,
            show_grid: self.config.show_grid,
        }
    }

    /// The pixelated output surface.
    pub fn output(&self) -> &Canvas {
        &self.output
    }

    /// The preview surface with the selection overlay.
    pub fn preview(&self) -> &Canvas {
        &self.preview
    }

    /// Where the frame sits on the preview surface after the last render.
    pub fn draw_rect(&self) -> Rect {
        self.draw_rect
    }

    pub fn status(&self) -> &StatusMessage {
        &self.status
    }

    pub fn is_ready(&self) -> bool {
        self.source_size.is_some()
    }

    /// Check the source's readiness, updating sizes and status on changes.
    ///
    /// `Rendered` here means "ready to render".
    fn poll_media(&mut self) -> TickOutcome {
        let Some(media) = self.media.as_ref() else {
            return TickOutcome::NotReady;
        };

        match media.status() {
            MediaStatus::Loading => {
                if self.source_size.take().is_some() {
                    self.selection.abandon_drag();
                }
                TickOutcome::NotReady
            }
            MediaStatus::Failed(error) => {
                let was_ready = self.source_size.take().is_some();
                if was_ready {
                    self.selection.abandon_drag();
                }
                if was_ready || !self.status.is_error {
                    warn!(%error, "media failed");
                    self.status = StatusMessage::error(error.to_string());
                }
                TickOutcome::Failed
            }
            MediaStatus::Ready { width, height } => {
                if self.source_size != Some((width, height)) {
                    info!(width, height, "media ready");
                    self.source_size = Some((width, height));
                    self.status = StatusMessage::info(format!("Media loaded ({}x{})", width, height));
                    self.sync_sizes();
                }
                TickOutcome::Rendered
            }
        }
    }

    /// Size the output surface to the target ratio and the preview surface
    /// to the source ratio.
    fn sync_sizes(&mut self) {
        let Some((width, height)) = self.source_size else {
            return;
        };
        let output = compute_output_size(width, height, self.config.target_aspect(), DEFAULT_LONG_SIDE);
        let preview = compute_output_size(width, height, None, DEFAULT_LONG_SIDE);

        if Surface::dimensions(&self.output) != output {
            debug!(width = output.0, height = output.1, "resized output surface");
            self.output.resize(output.0, output.1);
        }
        if Surface::dimensions(&self.preview) != preview {
            debug!(width = preview.0, height = preview.1, "resized preview surface");
            self.preview.resize(preview.0, preview.1);
        }
    }
}

impl<M: MediaSource> Default for MosaicSession<M> {
    fn default() -> Self {
        Self::new(MosaicConfig::default())
    }
}
