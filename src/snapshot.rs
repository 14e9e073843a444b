use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::buffer::PixelBuffer;
use crate::color::PixelColor;
use crate::geometry::Point;

/// Errors from encoding or applying snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] image::ImageError),

    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] image::ImageError),

    #[error("snapshot pixel data is not {width}x{height} RGBA")]
    SizeMismatch { width: usize, height: usize },
}

/// An opaque serialized pixel buffer, as stored in undo history and handed
/// to the host for persistence. The wire format is PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(Vec<u8>);

impl Snapshot {
    /// Serialize the current buffer contents.
    pub fn capture(buffer: &PixelBuffer<'_>) -> Result<Snapshot, SnapshotError> {
        let mut bytes = Vec::new();
        let encoder = PngEncoder::new(Cursor::new(&mut bytes));
        encoder
            .write_image(
                buffer.bytes(),
                buffer.width() as u32,
                buffer.height() as u32,
                ExtendedColorType::Rgba8,
            )
            .map_err(SnapshotError::Encode)?;
        Ok(Snapshot(bytes))
    }

    /// Clear the buffer and blit the snapshot's pixels at `at`, clipping
    /// anything that lands outside the canvas.
    pub fn restore_at(
        &self,
        buffer: &mut PixelBuffer<'_>,
        at: Point,
    ) -> Result<(), SnapshotError> {
        let decoded = image::load_from_memory(&self.0)
            .map_err(SnapshotError::Decode)?
            .to_rgba8();

        buffer.clear_all();
        for (x, y, pixel) in decoded.enumerate_pixels() {
            let [r, g, b, a] = pixel.0;
            let target = Point::new(x as i32 + at.x, y as i32 + at.y);
            buffer.set(target, PixelColor::new(r, g, b, a));
        }
        Ok(())
    }

    /// Restore without an offset.
    pub fn restore(&self, buffer: &mut PixelBuffer<'_>) -> Result<(), SnapshotError> {
        self.restore_at(buffer, Point::ZERO)
    }

    /// The encoded bytes, for host persistence.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Wrap previously captured bytes (e.g. loaded from host storage).
    pub fn from_bytes(bytes: Vec<u8>) -> Snapshot {
        Snapshot(bytes)
    }
}
