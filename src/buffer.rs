use thiserror::Error;

use crate::color::{ColorError, PixelColor};
use crate::geometry::Point;

/// Errors from constructing or reading a pixel buffer view.
#[derive(Debug, Error)]
pub enum BufferError {
    #[error("buffer length {len} does not match {width}x{height} RGBA ({expected} bytes)")]
    SizeMismatch {
        len: usize,
        width: usize,
        height: usize,
        expected: usize,
    },

    #[error(transparent)]
    Color(#[from] ColorError),
}

/// A mutable view over a host-owned, row-major RGBA byte array.
///
/// The host surface owns the backing storage; the engine borrows a view
/// for the duration of one operation and never retains it. The length
/// invariant (`width * height * 4`) is checked once at construction.
#[derive(Debug)]
pub struct PixelBuffer<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> PixelBuffer<'a> {
    pub fn new(data: &'a mut [u8], width: usize, height: usize) -> Result<Self, BufferError> {
        let expected = width * height * 4;
        if data.len() != expected {
            return Err(BufferError::SizeMismatch {
                len: data.len(),
                width,
                height,
                expected,
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }

    /// Byte offset of a cell known to be in bounds.
    fn offset(&self, point: Point) -> usize {
        (point.y as usize * self.width + point.x as usize) * 4
    }

    /// Read the color of one cell; `None` outside the canvas.
    pub fn color_at(&self, point: Point) -> Option<PixelColor> {
        if !self.contains(point) {
            return None;
        }
        let at = self.offset(point);
        PixelColor::from_pixel(&self.data[at..at + 4]).ok()
    }

    /// Write one cell. Out-of-bounds writes are skipped; tools clip to the
    /// canvas explicitly rather than relying on the buffer to clamp.
    pub fn set(&mut self, point: Point, color: PixelColor) {
        if !self.contains(point) {
            return;
        }
        let at = self.offset(point);
        self.data[at..at + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
    }

    /// Clear one cell to fully transparent.
    pub fn clear(&mut self, point: Point) {
        self.set(point, PixelColor::TRANSPARENT);
    }

    /// Clear the whole canvas to fully transparent.
    pub fn clear_all(&mut self) {
        self.data.fill(0);
    }

    pub fn bytes(&self) -> &[u8] {
        self.data
    }

    /// Detached copy of the pixel data, used for move overlays and
    /// snapshot capture.
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.to_vec()
    }
}
