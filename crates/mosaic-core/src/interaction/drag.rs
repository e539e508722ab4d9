//! Pointer events and drag state.

use crate::geometry::{NormalizedPoint, Selection};

/// A pointer event in preview-surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    Cancel,
}

/// Direction a rectangle extends from its anchor on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Negative,
    Positive,
}

impl Sign {
    /// `Positive` when `delta` points past the anchor, `Negative` otherwise.
    pub fn of(delta: f64) -> Self {
        if delta > 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Self::Negative => -1.0,
            Self::Positive => 1.0,
        }
    }
}

/// Per-axis extension directions from an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signs {
    pub x: Sign,
    pub y: Sign,
}

impl Signs {
    pub fn new(x: Sign, y: Sign) -> Self {
        Self { x, y }
    }

    /// Directions from `anchor` towards `point`.
    pub fn between(anchor: NormalizedPoint, point: NormalizedPoint) -> Self {
        Self {
            x: Sign::of(point.x - anchor.x),
            y: Sign::of(point.y - anchor.y),
        }
    }
}

/// The active pointer drag, if any.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragMode {
    /// No drag in progress.
    #[default]
    Idle,

    /// Drawing a new selection.
    Creating {
        /// Where the pointer went down
        anchor: NormalizedPoint,
        /// Rectangle committed on release
        preview: Selection,
    },

    /// Dragging the whole selection.
    Moving {
        /// Pointer position relative to the selection's top-left
        offset: NormalizedPoint,
    },

    /// Dragging one corner while the opposite one stays put.
    Resizing {
        /// The fixed corner
        anchor: NormalizedPoint,
        /// Directions the rectangle extends from the anchor
        signs: Signs,
    },
}

impl DragMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_creating(&self) -> bool {
        matches!(self, Self::Creating { .. })
    }

    pub fn is_moving(&self) -> bool {
        matches!(self, Self::Moving { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::Resizing { .. })
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Creating { .. } => "creating",
            Self::Moving { .. } => "moving",
            Self::Resizing { .. } => "resizing",
        }
    }
}
