use serde::{Deserialize, Serialize};

/// What a pointer drag on the canvas does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolMode {
    /// Plain strokes
    #[default]
    Pencil,
    /// Soft strokes with a blur halo
    Brush,
    /// Cuts strokes along the drag path
    Eraser,
    /// Places procedural shapes
    Shape,
}

impl ToolMode {
    pub fn draws_strokes(&self) -> bool {
        matches!(self, ToolMode::Pencil | ToolMode::Brush)
    }
}
