//! The selection and the drag that edits it.

use tracing::debug;

use crate::geometry::{normalize_selection, point_to_normalized, NormalizedPoint, Rect, Selection};

use super::{hit_handle, rect_from_anchor, DragMode, PointerEvent};

/// Per-event inputs owned by the session rather than the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionContext {
    /// Where the video is drawn on the preview surface
    pub draw_rect: Rect,
    /// Whether new drags may start
    pub crop_enabled: bool,
    /// Normalized-space width/height ratio, set only under an aspect lock
    pub lock_ratio: Option<f64>,
}

/// Committed crop selection plus the drag in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    selection: Option<Selection>,
    drag: DragMode,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection(selection: Selection) -> Self {
        Self {
            selection: Some(selection),
            drag: DragMode::Idle,
        }
    }

    /// The committed selection. Resizes and moves update it live.
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn drag(&self) -> &DragMode {
        &self.drag
    }

    /// The uncommitted rectangle of a drag-create, if one is running.
    pub fn preview(&self) -> Option<&Selection> {
        match &self.drag {
            DragMode::Creating { preview, .. } => Some(preview),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        !self.drag.is_idle()
    }

    /// Drop the selection and abandon any drag.
    pub fn reset(&mut self) {
        self.selection = None;
        self.drag = DragMode::Idle;
    }

    /// End any drag without committing a creating preview.
    ///
    /// Resizes and moves keep their live result, as on a cancel.
    pub fn abandon_drag(&mut self) -> bool {
        let abandoned = self.pointer_cancel();
        if abandoned {
            debug!(selection = ?self.selection, "crop drag abandoned");
        }
        abandoned
    }

    /// Feed one pointer event through the state machine.
    ///
    /// # Arguments
    ///
    /// * `event` - Pointer event in preview-surface pixels
    /// * `ctx` - Draw rect, crop toggle and lock ratio for this event
    ///
    /// # Returns
    ///
    /// `true` if the selection, the preview or the drag mode changed.
    pub fn handle(&mut self, event: PointerEvent, ctx: &InteractionContext) -> bool {
        let before = self.drag.name();
        let changed = match event {
            PointerEvent::Down { x, y } => self.pointer_down(point_to_normalized(x, y, &ctx.draw_rect), ctx),
            PointerEvent::Move { x, y } => self.pointer_move(point_to_normalized(x, y, &ctx.draw_rect), ctx),
            PointerEvent::Up => self.pointer_up(),
            PointerEvent::Cancel => self.pointer_cancel(),
        };
        let after = self.drag.name();
        if before != after {
            debug!(from = before, to = after, selection = ?self.selection, "crop drag transition");
        }
        changed
    }

    fn pointer_down(&mut self, point: NormalizedPoint, ctx: &InteractionContext) -> bool {
        if !ctx.crop_enabled || !self.drag.is_idle() {
            return false;
        }

        self.drag = match self.selection {
            Some(selection) => match hit_handle(&selection, point, &ctx.draw_rect) {
                Some(handle) => DragMode::Resizing {
                    anchor: handle.anchor(&selection),
                    signs: handle.signs(),
                },
                None if selection.contains(point) => DragMode::Moving {
                    offset: NormalizedPoint::new(point.x - selection.x, point.y - selection.y),
                },
                None => creating(point),
            },
            None => creating(point),
        };
        true
    }

    fn pointer_move(&mut self, point: NormalizedPoint, ctx: &InteractionContext) -> bool {
        match &mut self.drag {
            DragMode::Idle => false,
            DragMode::Creating { anchor, preview } => {
                *preview = match ctx.lock_ratio {
                    Some(ratio) => rect_from_anchor(*anchor, point, None, Some(ratio)),
                    None => normalize_selection(*anchor, point),
                };
                true
            }
            DragMode::Resizing { anchor, signs } => {
                self.selection = Some(rect_from_anchor(*anchor, point, Some(*signs), ctx.lock_ratio));
                true
            }
            DragMode::Moving { offset } => match self.selection.as_mut() {
                Some(selection) => {
                    selection.x = (point.x - offset.x).min(1.0 - selection.width).max(0.0);
                    selection.y = (point.y - offset.y).min(1.0 - selection.height).max(0.0);
                    true
                }
                None => false,
            },
        }
    }

    fn pointer_up(&mut self) -> bool {
        match std::mem::take(&mut self.drag) {
            DragMode::Idle => false,
            DragMode::Creating { preview, .. } => {
                self.selection = Some(preview);
                true
            }
            DragMode::Moving { .. } | DragMode::Resizing { .. } => true,
        }
    }

    fn pointer_cancel(&mut self) -> bool {
        !std::mem::take(&mut self.drag).is_idle()
    }
}

fn creating(point: NormalizedPoint) -> DragMode {
    DragMode::Creating {
        anchor: point,
        preview: normalize_selection(point, point),
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
