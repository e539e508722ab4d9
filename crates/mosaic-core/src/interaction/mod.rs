//! Crop selection state machine.
//!
//! Pointer events are fed one at a time into [`SelectionState::handle`],
//! which owns the committed selection and the transient drag.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Resizing     (down on a corner handle of the selection)
//! Idle -> Moving       (down inside the selection)
//! Idle -> Creating     (down anywhere else)
//!
//! Creating --move--> Creating   (preview follows the pointer)
//! Resizing --move--> Resizing   (selection follows the pointer)
//! Moving   --move--> Moving     (selection translates, size fixed)
//!
//! Creating --up-->     Idle     (preview committed)
//! Creating --cancel--> Idle     (preview discarded)
//! Resizing/Moving --up/cancel--> Idle (no rollback)
//! ```
//!
//! Events that make no sense in the current state are ignored.

mod anchor;
mod drag;
mod handles;
mod state;

pub use anchor::{lock_ratio, rect_from_anchor};
pub use drag::{DragMode, PointerEvent, Sign, Signs};
pub use handles::{hit_handle, Handle, HANDLE_TOLERANCE_PX};
pub use state::{InteractionContext, SelectionState};
