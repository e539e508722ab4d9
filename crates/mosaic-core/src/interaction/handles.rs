//! Corner resize handles and hit-testing.

use crate::geometry::{NormalizedPoint, Rect, Selection};

use super::{Sign, Signs};

/// Radius around a corner, in destination pixels, that grabs its handle.
///
/// Measured in pixels so the hit target keeps its on-screen size however
/// large the preview is drawn.
pub const HANDLE_TOLERANCE_PX: f64 = 10.0;

/// One of the four corner handles of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Handle {
    /// All handles in hit-test order.
    pub const ALL: [Handle; 4] = [
        Handle::NorthWest,
        Handle::NorthEast,
        Handle::SouthWest,
        Handle::SouthEast,
    ];

    /// Position of this handle's corner.
    pub fn corner(self, selection: &Selection) -> NormalizedPoint {
        let Signs { x, y } = self.signs();
        NormalizedPoint {
            x: match x {
                Sign::Negative => selection.x,
                Sign::Positive => selection.right(),
            },
            y: match y {
                Sign::Negative => selection.y,
                Sign::Positive => selection.bottom(),
            },
        }
    }

    /// The diagonally opposite handle.
    pub fn opposite(self) -> Handle {
        match self {
            Handle::NorthWest => Handle::SouthEast,
            Handle::NorthEast => Handle::SouthWest,
            Handle::SouthWest => Handle::NorthEast,
            Handle::SouthEast => Handle::NorthWest,
        }
    }

    /// The corner that stays fixed while this handle is dragged.
    pub fn anchor(self, selection: &Selection) -> NormalizedPoint {
        self.opposite().corner(selection)
    }

    /// Directions the selection extends from the anchor while dragging.
    pub fn signs(self) -> Signs {
        match self {
            Handle::NorthWest => Signs::new(Sign::Negative, Sign::Negative),
            Handle::NorthEast => Signs::new(Sign::Positive, Sign::Negative),
            Handle::SouthWest => Signs::new(Sign::Negative, Sign::Positive),
            Handle::SouthEast => Signs::new(Sign::Positive, Sign::Positive),
        }
    }
}

/// Find the handle under `point`, if any.
///
/// The tolerance is converted to normalized units per axis using the draw
/// rectangle's size. When handles overlap on a tiny selection the closest
/// corner wins, ties going to the earlier entry of [`Handle::ALL`].
pub fn hit_handle(selection: &Selection, point: NormalizedPoint, draw_rect: &Rect) -> Option<Handle> {
    if draw_rect.is_empty() {
        return None;
    }
    let tol_x = HANDLE_TOLERANCE_PX / draw_rect.width;
    let tol_y = HANDLE_TOLERANCE_PX / draw_rect.height;

    Handle::ALL
        .iter()
        .map(|&handle| {
            let corner = handle.corner(selection);
            let dx = (point.x - corner.x) / tol_x;
            let dy = (point.y - corner.y) / tol_y;
            (handle, dx.hypot(dy))
        })
        .filter(|&(_, dist)| dist <= 1.0)
        .fold(None, |best: Option<(Handle, f64)>, candidate| match best {
            Some((_, best_dist)) if best_dist <= candidate.1 => best,
            _ => Some(candidate),
        })
        .map(|(handle, _)| handle)
}
