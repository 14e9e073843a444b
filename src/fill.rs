use log::debug;

use crate::buffer::PixelBuffer;
use crate::color::PixelColor;
use crate::geometry::{Point, PointSet};

/// How a flood fill finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// The region was recolored.
    Filled,
    /// The target already had the fill color; the buffer is untouched.
    AlreadyFilled,
    /// The target point lies outside the canvas; the buffer is untouched.
    OutOfBounds,
}

/// Scan-line flood fill of the 4-connected region containing `target`.
///
/// Iterative with an explicit [`PointSet`] frontier so large regions cost
/// heap, not call stack. Each popped seed is expanded into the full
/// contiguous vertical run through it: walk to the top of the run, then
/// color downward, queueing at most one left and one right seed per run.
///
/// "Same color" is full-RGBA equality, for both the no-op short circuit
/// and the per-pixel match during scanning.
pub fn flood_fill(buffer: &mut PixelBuffer<'_>, target: Point, fill: PixelColor) -> FillOutcome {
    let Some(color) = buffer.color_at(target) else {
        return FillOutcome::OutOfBounds;
    };
    if color == fill {
        debug!(
            "fill: short circuit, {} already matches {}",
            color.hex_with_alpha(),
            fill.hex_with_alpha()
        );
        return FillOutcome::AlreadyFilled;
    }

    let width = buffer.width() as i32;
    let height = buffer.height() as i32;
    let matches = |buffer: &PixelBuffer<'_>, p: Point| buffer.color_at(p) == Some(color);

    let mut frontier = PointSet::from_points(&[target]);
    while let Some(seed) = frontier.pop() {
        // The frontier dedupes and only ever holds in-bounds points, so it
        // can never outgrow the pixel count.
        debug_assert!(frontier.len() <= buffer.width() * buffer.height());
        let x = seed.x;
        let mut y = seed.y;

        // Walk to the top of the contiguous vertical run through the seed.
        while y >= 0 && matches(buffer, Point::new(x, y)) {
            y -= 1;
        }
        y += 1;

        let mut reach_left = false;
        let mut reach_right = false;

        // Color downward through the run, queueing new seeds where the
        // neighboring columns match. The reach flags keep each side to one
        // seed per run.
        while y < height && matches(buffer, Point::new(x, y)) {
            buffer.set(Point::new(x, y), fill);
            if x > 0 {
                if matches(buffer, Point::new(x - 1, y)) {
                    if !reach_left {
                        frontier.add(Point::new(x - 1, y));
                        reach_left = true;
                    }
                } else {
                    reach_left = false;
                }
            }
            if x < width - 1 {
                if matches(buffer, Point::new(x + 1, y)) {
                    if !reach_right {
                        frontier.add(Point::new(x + 1, y));
                        reach_right = true;
                    }
                } else {
                    reach_right = false;
                }
            }
            y += 1;
        }
    }

    FillOutcome::Filled
}
