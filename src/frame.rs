use crate::stroke::Stroke;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One animation frame: strokes in z-order, later strokes on top.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    strokes: Vec<Stroke>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_strokes(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Adds a stroke on top. Strokes without points are ignored.
    pub fn add_stroke(&mut self, stroke: Stroke) {
        if !stroke.points().is_empty() {
            self.strokes.push(stroke);
        }
    }

    /// Removes every stroke whose id is in `ids`.
    pub fn remove_strokes(&mut self, ids: &[Uuid]) {
        self.strokes.retain(|stroke| !ids.contains(&stroke.id()));
    }

    /// Replaces the stroke list wholesale, dropping empty strokes.
    pub fn set_strokes(&mut self, strokes: Vec<Stroke>) {
        self.strokes = strokes;
        self.strokes.retain(|stroke| !stroke.points().is_empty());
    }
}
