use egui::{Pos2, Vec2};
use log::debug;

use crate::buffer::PixelBuffer;
use crate::color::PixelColor;
use crate::fill::{FillOutcome, flood_fill};
use crate::geometry::{self, GestureConfig, Point};
use crate::input::InputEvent;
use crate::tools::Tool;

/// Externally-owned editing parameters, read fresh on every call and never
/// cached by the engine.
#[derive(Debug, Clone, Copy)]
pub struct CanvasContext {
    pub tool: Tool,
    pub color: PixelColor,
    /// Device pixels per grid cell.
    pub zoom: f32,
    pub config: GestureConfig,
}

/// Ephemeral per-interaction state. One of these exists per active canvas;
/// it is mutated through the engine's documented transitions and reset on
/// gesture end or tool switch.
#[derive(Debug, Clone)]
pub struct GestureState {
    pub mousedown: bool,
    /// Live pinch multiplier relative to gesture start.
    pub scale: f32,
    /// Touch set captured on the first multi-touch frame.
    pub initial_touches: Option<Vec<Pos2>>,
    pub last_touches: Option<Vec<Pos2>>,
    /// Grid cell where the current move drag started.
    pub move_origin: Option<Point>,
    /// Accumulated move-tool offset, in device units.
    pub translate: Option<Vec2>,
}

impl Default for GestureState {
    fn default() -> Self {
        Self {
            mousedown: false,
            scale: 1.0,
            initial_touches: None,
            last_touches: None,
            move_origin: None,
            translate: None,
        }
    }
}

/// What the host must do after an engine call.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasResponse {
    /// The pixel buffer was mutated in place; re-render it.
    Edited,
    /// The dropper read a color.
    ColorPicked(PixelColor),
    /// Mid-gesture pan/zoom update for live preview. The logical zoom is
    /// unchanged; apply `scale` visually only.
    PanZoomPreview { pan: Vec2, scale: f32 },
    /// The pan/zoom gesture ended; commit the scroll delta and the new
    /// logical zoom atomically.
    PanZoomCommitted { pan: Vec2, zoom: f32 },
    /// A paint gesture completed; capture a snapshot and tick the undo
    /// history.
    GestureEnded,
}

/// Base-buffer copy held while the move tool is active, so intermediate
/// drag frames never corrupt the real pixels.
#[derive(Debug, Clone)]
struct MoveOverlay {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

/// The canvas interaction engine: turns pointer/touch events into pixel
/// mutations, gestures into pan/zoom deltas, and move drags into a
/// two-phase buffer translation.
///
/// Exactly one of Painting, PanZooming, or Moving is active at a time;
/// the selected tool and the touch count decide which path a new gesture
/// enters. All operations run synchronously on the host's event loop.
#[derive(Debug, Default)]
pub struct CanvasEngine {
    gesture: GestureState,
    overlay: Option<MoveOverlay>,
    last_tool: Tool,
}

impl CanvasEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    /// Switch the active tool, handling the move tool's two-phase commit:
    /// entering `Move` snapshots the buffer into an overlay; leaving it
    /// composites the overlay at the final translate offset.
    ///
    /// Returns true when the buffer was mutated (the host should
    /// re-render and tick its undo history).
    pub fn select_tool(&mut self, ctx: &CanvasContext, buffer: &mut PixelBuffer<'_>) -> bool {
        let tool = ctx.tool;
        let mut edited = false;
        if tool == Tool::Move && self.last_tool != Tool::Move {
            debug!("canvas: start moving");
            self.overlay = Some(MoveOverlay {
                pixels: buffer.to_vec(),
                width: buffer.width(),
                height: buffer.height(),
            });
            self.gesture.move_origin = Some(Point::ZERO);
            self.gesture.translate = Some(Vec2::ZERO);
        } else if tool != Tool::Move && self.last_tool == Tool::Move {
            edited = self.apply_move(ctx, buffer);
            self.gesture.move_origin = None;
            self.gesture.translate = None;
        }
        // Any in-flight gesture dies with the old tool.
        self.gesture.mousedown = false;
        self.gesture.scale = 1.0;
        self.gesture.initial_touches = None;
        self.gesture.last_touches = None;
        self.last_tool = tool;
        edited
    }

    /// Feed one host input event through the gesture state machine.
    pub fn handle_event(
        &mut self,
        ctx: &CanvasContext,
        buffer: &mut PixelBuffer<'_>,
        event: &InputEvent,
    ) -> Vec<CanvasResponse> {
        match event {
            InputEvent::PointerDown { pos } => self.on_start(ctx, buffer, *pos),
            InputEvent::PointerMove { pos } => self.on_move(ctx, buffer, *pos),
            InputEvent::PointerUp { pos } => self.on_end(ctx, buffer, Some(*pos)),
            InputEvent::TouchStart { touches } => match touches.len() {
                0 => Vec::new(),
                1 => self.on_start(ctx, buffer, touches[0]),
                2 => vec![self.pan_zoom(&ctx.config, touches)],
                // More than two fingers is not a gesture we recognize.
                _ => Vec::new(),
            },
            InputEvent::TouchMove { touches } => {
                self.gesture.last_touches = Some(touches.clone());
                if self.gesture.initial_touches.is_some() {
                    vec![self.pan_zoom(&ctx.config, touches)]
                } else if let Some(&last) = touches.last() {
                    self.on_move(ctx, buffer, last)
                } else {
                    Vec::new()
                }
            }
            InputEvent::TouchEnd => {
                let last = self
                    .gesture
                    .last_touches
                    .as_ref()
                    .and_then(|touches| touches.last().copied());
                self.on_end(ctx, buffer, last)
            }
        }
    }

    fn on_start(
        &mut self,
        ctx: &CanvasContext,
        buffer: &mut PixelBuffer<'_>,
        pos: Pos2,
    ) -> Vec<CanvasResponse> {
        self.gesture.mousedown = true;
        if ctx.tool == Tool::Move {
            self.resume_move(ctx, pos);
            return Vec::new();
        }
        if self.paint(ctx, buffer, pos) {
            vec![CanvasResponse::Edited]
        } else {
            Vec::new()
        }
    }

    fn on_move(
        &mut self,
        ctx: &CanvasContext,
        buffer: &mut PixelBuffer<'_>,
        pos: Pos2,
    ) -> Vec<CanvasResponse> {
        if !self.gesture.mousedown {
            return Vec::new();
        }
        if ctx.tool == Tool::Move {
            self.continue_move(ctx, pos);
            return Vec::new();
        }
        if self.paint(ctx, buffer, pos) {
            vec![CanvasResponse::Edited]
        } else {
            Vec::new()
        }
    }

    fn on_end(
        &mut self,
        ctx: &CanvasContext,
        buffer: &PixelBuffer<'_>,
        pos: Option<Pos2>,
    ) -> Vec<CanvasResponse> {
        self.gesture.mousedown = false;
        let mut responses = Vec::new();
        if let Some(commit) = self.stop_pan_zoom(ctx) {
            responses.push(commit);
        }
        if ctx.tool == Tool::Move {
            // The move commits on tool switch, not on release; there is
            // nothing to snapshot yet.
            self.gesture.last_touches = None;
            return responses;
        }
        if ctx.tool == Tool::Dropper {
            if let Some(pos) = pos {
                if let Some(color) = pick_clamped(buffer, pos, ctx.zoom) {
                    responses.push(CanvasResponse::ColorPicked(color));
                }
            }
        }
        self.gesture.last_touches = None;
        responses.push(CanvasResponse::GestureEnded);
        responses
    }

    /// Apply one tool application at a device-space position. Returns true
    /// when the buffer changed.
    fn paint(&mut self, ctx: &CanvasContext, buffer: &mut PixelBuffer<'_>, device: Pos2) -> bool {
        let cell = Point::from_device(device, ctx.zoom);
        match ctx.tool {
            Tool::Pen => {
                if buffer.contains(cell) {
                    buffer.set(cell, ctx.color);
                    true
                } else {
                    false
                }
            }
            Tool::Eraser => {
                if buffer.contains(cell) {
                    buffer.clear(cell);
                    true
                } else {
                    false
                }
            }
            Tool::Pencil => {
                // Only the central 60% of the cell registers, which makes
                // single-pixel strokes land sketchily by sub-cell position.
                let remain_x = device.x / ctx.zoom - cell.x as f32;
                let remain_y = device.y / ctx.zoom - cell.y as f32;
                let inside = remain_x > 0.2 && remain_x < 0.8 && remain_y > 0.2 && remain_y < 0.8;
                if inside && buffer.contains(cell) {
                    buffer.set(cell, ctx.color);
                    true
                } else {
                    false
                }
            }
            Tool::Bucket => flood_fill(buffer, cell, ctx.color) == FillOutcome::Filled,
            // The dropper reads on release; move drags go through the
            // Moving path.
            Tool::Dropper | Tool::Move => false,
        }
    }

    /// Read the color under a device-space position. Out-of-canvas
    /// positions return `None`; the event layer clamps to the edges
    /// before calling.
    pub fn pick_color(
        &self,
        buffer: &PixelBuffer<'_>,
        device: Pos2,
        zoom: f32,
    ) -> Option<PixelColor> {
        buffer.color_at(Point::from_device(device, zoom))
    }

    /// Track a multi-touch frame; captures the initial touch set on the
    /// first frame of the gesture. The returned preview is visual only.
    fn pan_zoom(&mut self, config: &GestureConfig, touches: &[Pos2]) -> CanvasResponse {
        let initial = self
            .gesture
            .initial_touches
            .get_or_insert_with(|| touches.to_vec())
            .clone();
        let delta = geometry::pan_and_spread(config, &initial, touches);
        self.gesture.last_touches = Some(touches.to_vec());
        self.gesture.scale = delta.spread;
        CanvasResponse::PanZoomPreview {
            pan: delta.pan,
            scale: delta.spread,
        }
    }

    /// Commit a pan/zoom gesture: the provisional spread folds into the
    /// logical zoom exactly once, at release.
    fn stop_pan_zoom(&mut self, ctx: &CanvasContext) -> Option<CanvasResponse> {
        let initial = self.gesture.initial_touches.take()?;
        let last = self.gesture.last_touches.take()?;
        let delta = geometry::pan_and_spread(&ctx.config, &initial, &last);
        debug!(
            "canvas: stop pan/zoom, pan {:?} spread {}",
            delta.pan, delta.spread
        );
        self.gesture.scale = 1.0;
        Some(CanvasResponse::PanZoomCommitted {
            pan: delta.pan,
            zoom: ctx.zoom * delta.spread,
        })
    }

    fn resume_move(&mut self, ctx: &CanvasContext, pos: Pos2) {
        let cell = Point::from_device(pos, ctx.zoom);
        debug!("canvas: resume moving at {},{}", cell.x, cell.y);
        self.gesture.move_origin = Some(cell);
    }

    fn continue_move(&mut self, ctx: &CanvasContext, pos: Pos2) {
        let point = pos.to_vec2() / ctx.zoom;
        let origin = self
            .gesture
            .move_origin
            .map(|cell| Vec2::new(cell.x as f32, cell.y as f32))
            .unwrap_or(Vec2::ZERO);
        let delta = (point - origin) * ctx.zoom;
        let translated = match self.gesture.translate {
            // Later drags compose additively with the offset so far.
            Some(prev) if prev != Vec2::ZERO => (delta + prev).floor(),
            _ => delta.floor(),
        };
        if self.gesture.translate != Some(translated) {
            self.gesture.translate = Some(translated);
        }
    }

    /// Composite the overlay onto the base buffer at the final translate
    /// offset. The base was untouched during the drag, so this is the
    /// only write of the whole move interaction.
    fn apply_move(&mut self, ctx: &CanvasContext, buffer: &mut PixelBuffer<'_>) -> bool {
        let Some(overlay) = self.overlay.take() else {
            return false;
        };
        let translate = self.gesture.translate.unwrap_or(Vec2::ZERO);
        let offset = Point::new(
            (translate.x / ctx.zoom).round() as i32,
            (translate.y / ctx.zoom).round() as i32,
        );
        debug!("canvas: finish and apply move at {},{}", offset.x, offset.y);
        buffer.clear_all();
        for y in 0..overlay.height {
            for x in 0..overlay.width {
                let at = (y * overlay.width + x) * 4;
                if let Ok(color) = PixelColor::from_pixel(&overlay.pixels[at..at + 4]) {
                    buffer.set(Point::new(x as i32 + offset.x, y as i32 + offset.y), color);
                }
            }
        }
        true
    }
}

/// Dropper read with the cell clamped to the canvas edges, per the
/// caller-clips contract of `pick_color`.
fn pick_clamped(buffer: &PixelBuffer<'_>, device: Pos2, zoom: f32) -> Option<PixelColor> {
    if buffer.width() == 0 || buffer.height() == 0 {
        return None;
    }
    let cell = Point::from_device(device, zoom);
    buffer.color_at(Point::new(
        cell.x.clamp(0, buffer.width() as i32 - 1),
        cell.y.clamp(0, buffer.height() as i32 - 1),
    ))
}
