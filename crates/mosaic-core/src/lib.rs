//! Mosaic Core - Interactive crop and pixelation engine
//!
//! This crate turns video frames into low-resolution mosaics. A user drags a
//! crop rectangle over a preview of the source; each tick the cropped region
//! is reduced to a `cols x rows` grid and scaled back up with hard block
//! edges onto an output surface.
//!
//! # Layout
//!
//! - [`geometry`] - aspect ratios, letterbox/cover rectangles, coordinate mapping
//! - [`interaction`] - the pointer-driven selection state machine
//! - [`pixelate`] - the mosaic render pipeline
//! - [`overlay`] - the preview surface with the selection drawn on it
//! - [`surface`] - the drawing trait and an in-memory RGBA canvas
//! - [`frame`] / [`media`] - frames and the sources producing them
//! - [`session`] / [`schedule`] - wiring it all to a host's frame loop

pub mod config;
pub mod frame;
pub mod geometry;
pub mod interaction;
pub mod media;
pub mod overlay;
pub mod pixelate;
pub mod schedule;
pub mod session;
pub mod surface;

pub use config::{AspectMode, Grid, MosaicConfig};
pub use frame::{Frame, FrameError};
pub use geometry::{NormalizedPoint, Rect, Selection};
pub use interaction::{PointerEvent, SelectionState};
pub use media::{FrameSequence, LiveSource, MediaError, MediaSource, MediaStatus, StillSource};
pub use pixelate::{Pixelator, RenderOptions};
pub use schedule::{ManualScheduler, RenderLoop, TickScheduler};
pub use session::{MosaicSession, StatusMessage, TickOutcome};
pub use surface::{Canvas, PixelSource, Surface};
