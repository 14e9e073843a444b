#![warn(clippy::all, rust_2018_idioms)]

pub mod buffer;
pub mod color;
pub mod engine;
pub mod fill;
pub mod geometry;
pub mod input;
pub mod snapshot;
pub mod tools;
pub mod undo;

pub use buffer::{BufferError, PixelBuffer};
pub use color::{ColorError, Palette, PixelColor};
pub use engine::{CanvasContext, CanvasEngine, CanvasResponse, GestureState};
pub use fill::{FillOutcome, flood_fill};
pub use geometry::{GestureConfig, PanSpread, Point, PointSet};
pub use input::InputEvent;
pub use snapshot::{Snapshot, SnapshotError};
pub use tools::Tool;
pub use undo::UndoHistory;
