use egui::Pos2;

/// Raw pointer and touch input forwarded by the host surface.
///
/// Positions are device-space coordinates relative to the canvas origin;
/// the engine converts them to grid cells through the current zoom. Touch
/// events carry every simultaneous touch position; touch-end carries none
/// because the engine works from the last observed set.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: Pos2 },
    PointerMove { pos: Pos2 },
    PointerUp { pos: Pos2 },
    TouchStart { touches: Vec<Pos2> },
    TouchMove { touches: Vec<Pos2> },
    TouchEnd,
}
