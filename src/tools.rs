use serde::{Deserialize, Serialize};

/// The discrete editing tools a host can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Pen,
    Pencil,
    Bucket,
    Eraser,
    Dropper,
    Move,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Pen => "pen",
            Tool::Pencil => "pencil",
            Tool::Bucket => "bucket",
            Tool::Eraser => "eraser",
            Tool::Dropper => "dropper",
            Tool::Move => "move",
        }
    }

    /// Suggested keyboard shortcut for host UI wiring.
    pub fn hotkey(&self) -> char {
        match self {
            Tool::Pen => 'p',
            Tool::Pencil => 'b',
            Tool::Bucket => 'g',
            Tool::Eraser => 'e',
            Tool::Dropper => 'i',
            Tool::Move => 'm',
        }
    }
}
