//! Media sources feeding frames to a session.
//!
//! The host owns decoding and playback. A [`MediaSource`] only reports
//! whether a source is ready, hands out its current frame and toggles
//! playback. Three implementations cover the common cases:
//!
//! - [`StillSource`] - one frame, always paused
//! - [`FrameSequence`] - in-memory frames stepped by the caller
//! - [`LiveSource`] - frames pushed by a host player, e.g. a browser video

use thiserror::Error;
use tracing::warn;

use crate::frame::{Frame, FrameError};

/// Errors reported by media sources.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MediaError {
    /// The host handed over pixels that do not form a frame.
    #[error("Invalid frame: {0}")]
    InvalidFrame(#[from] FrameError),

    /// The host failed to open or read the source.
    #[error("Could not load media: {0}")]
    Load(String),

    /// Playback could not be started.
    #[error("Could not play media: {0}")]
    Playback(String),

    /// Nothing was selected to load.
    #[error("No media source selected")]
    NoSource,
}

/// Readiness of a media source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaStatus {
    /// Metadata is not available yet.
    Loading,
    /// Frames of the given size can be drawn.
    Ready { width: u32, height: u32 },
    /// Loading failed; the source will not become ready.
    Failed(MediaError),
}

impl MediaStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// A source of video frames.
pub trait MediaSource {
    fn status(&self) -> MediaStatus;

    /// Whether playback is paused. Still images are always paused.
    fn is_paused(&self) -> bool;

    /// The frame to draw now, if any.
    fn current_frame(&self) -> Option<&Frame>;

    /// Toggle between playing and paused.
    fn play_pause(&mut self) -> Result<(), MediaError>;
}

fn status_of(frame: &Frame) -> MediaStatus {
    MediaStatus::Ready {
        width: frame.width(),
        height: frame.height(),
    }
}

/// A single still image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StillSource {
    frame: Frame,
}

impl StillSource {
    pub fn new(frame: Frame) -> Self {
        Self { frame }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }
}

impl MediaSource for StillSource {
    fn status(&self) -> MediaStatus {
        status_of(&self.frame)
    }

    fn is_paused(&self) -> bool {
        true
    }

    fn current_frame(&self) -> Option<&Frame> {
        Some(&self.frame)
    }

    fn play_pause(&mut self) -> Result<(), MediaError> {
        Ok(())
    }
}

/// Frames held in memory and stepped by the caller, looping at the end.
///
/// Starts paused, like a freshly loaded video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSequence {
    frames: Vec<Frame>,
    index: usize,
    paused: bool,
}

impl FrameSequence {
    /// Build a sequence. All frames must share the first frame's size.
    ///
    /// # Errors
    ///
    /// `MediaError::NoSource` for an empty list and `MediaError::Load` when
    /// the frame sizes differ.
    pub fn new(frames: Vec<Frame>) -> Result<Self, MediaError> {
        let first = frames.first().ok_or(MediaError::NoSource)?;
        let size = (first.width(), first.height());
        if let Some((i, odd)) = frames
            .iter()
            .enumerate()
            .find(|(_, f)| (f.width(), f.height()) != size)
        {
            return Err(MediaError::Load(format!(
                "frame {} is {}x{}, expected {}x{}",
                i,
                odd.width(),
                odd.height(),
                size.0,
                size.1
            )));
        }
        Ok(Self {
            frames,
            index: 0,
            paused: true,
        })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index of the current frame.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Step to the next frame if playing.
    ///
    /// Returns whether the current frame changed.
    pub fn advance(&mut self) -> bool {
        if self.paused || self.frames.len() < 2 {
            return false;
        }
        self.index = (self.index + 1) % self.frames.len();
        true
    }
}

impl MediaSource for FrameSequence {
    fn status(&self) -> MediaStatus {
        status_of(&self.frames[self.index])
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_frame(&self) -> Option<&Frame> {
        self.frames.get(self.index)
    }

    fn play_pause(&mut self) -> Result<(), MediaError> {
        self.paused = !self.paused;
        Ok(())
    }
}

/// Frames pushed in by a host player.
///
/// Loading until the first frame arrives. The host mirrors its player's
/// pause state with [`LiveSource::set_paused`] and reports failures with
/// [`LiveSource::fail`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveSource {
    frame: Option<Frame>,
    paused: bool,
    error: Option<MediaError>,
}

impl Default for LiveSource {
    fn default() -> Self {
        Self {
            frame: None,
            paused: true,
            error: None,
        }
    }
}

impl LiveSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current frame. Clears an earlier failure.
    pub fn push_frame(&mut self, frame: Frame) {
        self.error = None;
        self.frame = Some(frame);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Mark the source as failed and drop its frame.
    pub fn fail(&mut self, error: MediaError) {
        warn!(%error, "live source failed");
        self.frame = None;
        self.error = Some(error);
    }
}

impl MediaSource for LiveSource {
    fn status(&self) -> MediaStatus {
        match (&self.error, &self.frame) {
            (Some(error), _) => MediaStatus::Failed(error.clone()),
            (None, Some(frame)) => status_of(frame),
            (None, None) => MediaStatus::Loading,
        }
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    fn play_pause(&mut self) -> Result<(), MediaError> {
        if self.frame.is_none() {
            return Err(MediaError::Playback("no frame loaded".to_string()));
        }
        self.paused = !self.paused;
        Ok(())
    }
}
