//! Mosaic WASM - WebAssembly bindings for Mosaic
//!
//! This crate exposes the mosaic-core session to JavaScript. The page keeps
//! its `<video>` element and canvases; the session does the crop interaction
//! and the pixelation.
//!
//! # Module Structure
//!
//! - `session` - `MosaicSession` class: frames in, pointer events in, pixels out
//! - `geometry` - canvas sizing helpers
//!
//! # Usage
//!
//! ```typescript
//! import init, { MosaicSession } from '@mosaic/wasm';
//!
//! await init();
//! const session = new MosaicSession();
//! session.set_config({ matrixCols: 32, matrixRows: 18, targetRatio: "16:9" });
//!
//! function loop() {
//!   session.set_frame(w, h, grabFrame(video), video.paused);
//!   if (session.tick() === "rendered") {
//!     pixelCtx.putImageData(new ImageData(session.output_pixels(), session.output_width), 0, 0);
//!   }
//!   requestAnimationFrame(loop);
//! }
//! ```

use wasm_bindgen::prelude::*;

mod geometry;
mod session;

pub use geometry::{compute_output_size, parse_ratio};
pub use session::JsMosaicSession;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Core logs through `tracing`; the page installs a subscriber if it wants one
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
