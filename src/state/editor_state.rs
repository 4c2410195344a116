//! The pointer-interaction state machine.
//!
//! Every gesture starts from `Idle` and ends back there:
//! ```text
//!            ┌──────────────┐
//!      ┌─────►   Drawing    ├─────┐
//!      │     └──────────────┘     │
//! ┌────┴─┐   ┌──────────────┐   ┌─▼────┐
//! │ Idle ├───►   Erasing    ├───► Idle │
//! └────┬─┘   └──────────────┘   └─▲────┘
//!      │     ┌──────────────┐     │
//!      └─────► PlacingShape ├─────┘
//!            └──────────────┘
//! ```
use crate::geometry::Point2D;
use crate::shape::ShapeDraft;
use crate::stroke::StrokeBuilder;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    /// No gesture in progress
    #[default]
    Idle,
    /// A pencil or brush stroke is being drawn
    Drawing { stroke: StrokeBuilder },
    /// An eraser path is being traced
    Erasing { path: Vec<Point2D>, width: f64 },
    /// A shape is being positioned
    PlacingShape { draft: ShapeDraft },
}

impl EditorState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &EditorState) -> bool {
        match (self, new_state) {
            (EditorState::Idle, _) => true,
            (_, EditorState::Idle) => true,
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "Idle",
            EditorState::Drawing { .. } => "Drawing",
            EditorState::Erasing { .. } => "Erasing",
            EditorState::PlacingShape { .. } => "PlacingShape",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, EditorState::Drawing { .. })
    }

    pub fn is_erasing(&self) -> bool {
        matches!(self, EditorState::Erasing { .. })
    }

    pub fn is_placing_shape(&self) -> bool {
        matches!(self, EditorState::PlacingShape { .. })
    }

    /// The stroke in progress, if drawing
    pub fn stroke(&self) -> Option<&StrokeBuilder> {
        match self {
            EditorState::Drawing { stroke } => Some(stroke),
            _ => None,
        }
    }

    /// The eraser path traced so far, if erasing
    pub fn eraser_path(&self) -> Option<&[Point2D]> {
        match self {
            EditorState::Erasing { path, .. } => Some(path),
            _ => None,
        }
    }

    /// The shape being positioned, if any
    pub fn shape_draft(&self) -> Option<&ShapeDraft> {
        match self {
            EditorState::PlacingShape { draft } => Some(draft),
            _ => None,
        }
    }
}
