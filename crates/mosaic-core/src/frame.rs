//! Video frames handed to the render pipeline.
//!
//! A [`Frame`] is the "current frame handle" of a media source: an RGB8
//! raster the pipeline samples from. Hosts decode their media themselves and
//! push the pixels they captured, usually RGBA from a canvas
//! ([`Frame::from_rgba`]).
//!
//! The fields are private so the buffer length always matches the
//! dimensions; [`PixelSource::pixel`] indexes without further checks.

use image::Rgba;
use thiserror::Error;

use crate::surface::PixelSource;

/// Errors produced while building a frame.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameError {
    /// A raw pixel buffer does not match the stated dimensions.
    #[error("Pixel buffer mismatch: expected {expected} bytes, got {actual}")]
    BufferMismatch { expected: usize, actual: usize },

    /// The dimensions describe a buffer larger than memory can address.
    #[error("Frame too large: {width}x{height}")]
    TooLarge { width: u32, height: u32 },
}

/// A video frame with RGB pixel data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    /// Row-major, 3 bytes per pixel.
    pixels: Vec<u8>,
}

/// Byte length of a `width x height` buffer with `channels` bytes per pixel.
fn buffer_len(width: u32, height: u32, channels: usize) -> Result<usize, FrameError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or(FrameError::TooLarge { width, height })
}

impl Frame {
    /// Wrap an RGB buffer, checking its length against the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, FrameError> {
        let expected = buffer_len(width, height, 3)?;
        if pixels.len() != expected {
            return Err(FrameError::BufferMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a frame from RGBA bytes, dropping the alpha channel.
    ///
    /// This is the layout browsers return from `getImageData`.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, FrameError> {
        let expected = buffer_len(width, height, 4)?;
        if rgba.len() != expected {
            return Err(FrameError::BufferMismatch {
                expected,
                actual: rgba.len(),
            });
        }
        let pixels = rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A frame filled with a single color.
    ///
    /// Dimensions too large to address give an empty frame.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let Ok(len) = buffer_len(width, height, 3) else {
            return Self::default();
        };
        Self {
            width,
            height,
            pixels: rgb.iter().copied().cycle().take(len).collect(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGB bytes in row-major order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Check for a zero-area frame.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl PixelSource for Frame {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        Rgba([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2], 255])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_new_checks_length() {
        assert!(Frame::new(2, 2, vec![0; 12]).is_ok());
        assert_eq!(
            Frame::new(2, 2, vec![0; 10]),
            Err(FrameError::BufferMismatch {
                expected: 12,
                actual: 10
            })
        );
    }

    #[test]
    fn test_frame_from_rgba_drops_alpha() {
        let rgba = [10, 20, 30, 255, 40, 50, 60, 0];
        let frame = Frame::from_rgba(2, 1, &rgba).unwrap();
        assert_eq!(frame.pixels(), &[10, 20, 30, 40, 50, 60]);
        assert!(Frame::from_rgba(2, 2, &rgba).is_err());
    }

    #[test]
    fn test_frame_solid() {
        let frame = Frame::solid(3, 2, [1, 2, 3]);
        assert_eq!(frame.pixel_count(), 6);
        assert_eq!(frame.pixels().len(), 18);
        assert_eq!(frame.pixel(2, 1), Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn test_frame_pixel_is_opaque() {
        let frame = Frame::new(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(frame.pixel(0, 0), Rgba([1, 2, 3, 255]));
        assert_eq!(frame.pixel(1, 0), Rgba([4, 5, 6, 255]));
    }

    #[test]
    fn test_frame_empty() {
        assert!(Frame::solid(0, 10, [0, 0, 0]).is_empty());
        assert!(!Frame::solid(1, 1, [0, 0, 0]).is_empty());
    }

    #[test]
    fn test_pixel_count_does_not_wrap() {
        let frame = Frame::new(0, u32::MAX, Vec::new()).unwrap();
        assert_eq!(frame.pixel_count(), 0);
        assert_eq!(
            Frame {
                width: 70_000,
                height: 70_000,
                pixels: Vec::new(),
            }
            .pixel_count(),
            4_900_000_000
        );
    }

    #[test]
    fn test_mismatched_buffers_never_build_a_frame() {
        assert!(matches!(
            Frame::new(1000, 1000, vec![0; 3]),
            Err(FrameError::BufferMismatch { expected: 3_000_000, actual: 3 })
        ));
        assert!(matches!(
            Frame::from_rgba(100, 100, &[0; 16]),
            Err(FrameError::BufferMismatch { expected: 40_000, actual: 16 })
        ));
    }

    #[test]
    fn test_frame_error_display() {
        let err = FrameError::BufferMismatch {
            expected: 12,
            actual: 3,
        };
        assert_eq!(err.to_string(), "Pixel buffer mismatch: expected 12 bytes, got 3");
        assert_eq!(
            FrameError::TooLarge {
                width: 9,
                height: 8
            }
            .to_string(),
            "Frame too large: 9x8"
        );
    }
}
