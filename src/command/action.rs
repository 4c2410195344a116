use crate::frame::Frame;
use crate::session::Session;
use crate::stroke::Stroke;
use uuid::Uuid;

/// One reversible change to a [`Session`].
///
/// Each variant carries exactly what it needs to run forwards again
/// ([`Action::execute`]) and to put the session back ([`Action::undo`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A stroke was drawn on a frame
    AddStroke { stroke: Stroke, frame_index: usize },
    /// An eraser pass rewrote a frame's stroke list
    RemoveStrokes {
        frame_index: usize,
        /// The full stroke list before erasing
        previous: Vec<Stroke>,
        /// The full stroke list after erasing
        remaining: Vec<Stroke>,
    },
    /// The strokes making up one shape
    AddShape { strokes: Vec<Stroke>, frame_index: usize },
    /// An empty frame was inserted after the current one
    InsertFrame { at_index: usize },
    /// An empty frame was appended at the end
    AppendFrame { previous_index: usize },
    RemoveFrame {
        index: usize,
        removed: Frame,
        previous_index: usize,
    },
    SwitchFrame { from: usize, to: usize },
    DuplicateFrame { original_index: usize, new_index: usize },
    ClearAllFrames {
        previous_frames: Vec<Frame>,
        previous_index: usize,
    },
    /// Every frame was replaced by a generated sequence
    ReplaceFrames {
        previous_frames: Vec<Frame>,
        previous_index: usize,
        frames: Vec<Frame>,
    },
}

fn stroke_ids(strokes: &[Stroke]) -> Vec<Uuid> {
    strokes.iter().map(Stroke::id).collect()
}

impl Action {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddStroke { .. } => "AddStroke",
            Action::RemoveStrokes { .. } => "RemoveStrokes",
            Action::AddShape { .. } => "AddShape",
            Action::InsertFrame { .. } => "InsertFrame",
            Action::AppendFrame { .. } => "AppendFrame",
            Action::RemoveFrame { .. } => "RemoveFrame",
            Action::SwitchFrame { .. } => "SwitchFrame",
            Action::DuplicateFrame { .. } => "DuplicateFrame",
            Action::ClearAllFrames { .. } => "ClearAllFrames",
            Action::ReplaceFrames { .. } => "ReplaceFrames",
        }
    }

    /// Apply the forward effect.
    pub fn execute(&self, session: &mut Session) {
        match self {
            Action::AddStroke { stroke, frame_index } => {
                if let Some(frame) = session.frame_mut(*frame_index) {
                    frame.add_stroke(stroke.clone());
                }
            }
            Action::RemoveStrokes {
                frame_index,
                remaining,
                ..
            } => {
                if let Some(frame) = session.frame_mut(*frame_index) {
                    frame.set_strokes(remaining.clone());
                }
            }
            Action::AddShape {
                strokes,
                frame_index,
            } => {
                if let Some(frame) = session.frame_mut(*frame_index) {
                    for stroke in strokes {
                        frame.add_stroke(stroke.clone());
                    }
                }
            }
            Action::InsertFrame { at_index } => {
                let index = session.insert_frame(*at_index, Frame::new());
                session.set_current_index(index);
            }
            Action::AppendFrame { .. } => {
                let index = session.push_frame(Frame::new());
                session.set_current_index(index);
            }
            Action::RemoveFrame {
                index,
                previous_index,
                ..
            } => {
                if session.remove_frame(*index).is_some() {
                    let cursor = if *index < *previous_index {
                        previous_index - 1
                    } else {
                        *previous_index
                    };
                    session.set_current_index(cursor);
                }
            }
            Action::SwitchFrame { to, .. } => session.set_current_index(*to),
            Action::DuplicateFrame {
                original_index,
                new_index,
            } => {
                if let Some(copy) = session.frame(*original_index).cloned() {
                    let index = session.insert_frame(*new_index, copy);
                    session.set_current_index(index);
                }
            }
            Action::ClearAllFrames { .. } => session.replace_frames(Vec::new(), 0),
            Action::ReplaceFrames { frames, .. } => {
                let last = frames.len().saturating_sub(1);
                session.replace_frames(frames.clone(), last);
            }
        }
    }

    /// Apply the inverse effect.
    pub fn undo(&self, session: &mut Session) {
        match self {
            Action::AddStroke { stroke, frame_index } => {
                if let Some(frame) = session.frame_mut(*frame_index) {
                    frame.remove_strokes(&[stroke.id()]);
                }
            }
            Action::RemoveStrokes {
                frame_index,
                previous,
                ..
            } => {
                if let Some(frame) = session.frame_mut(*frame_index) {
                    frame.set_strokes(previous.clone());
                }
            }
            Action::AddShape {
                strokes,
                frame_index,
            } => {
                if let Some(frame) = session.frame_mut(*frame_index) {
                    frame.remove_strokes(&stroke_ids(strokes));
                }
            }
            Action::InsertFrame { at_index } => {
                if session.remove_frame(*at_index).is_some() {
                    session.set_current_index(at_index.saturating_sub(1));
                }
            }
            Action::AppendFrame { previous_index } => {
                let last = session.last_index();
                if session.remove_frame(last).is_some() {
                    session.set_current_index(*previous_index);
                }
            }
            Action::RemoveFrame {
                index,
                removed,
                previous_index,
            } => {
                session.insert_frame(*index, removed.clone());
                session.set_current_index(*previous_index);
            }
            Action::SwitchFrame { from, .. } => session.set_current_index(*from),
            Action::DuplicateFrame {
                original_index,
                new_index,
            } => {
                if session.remove_frame(*new_index).is_some() {
                    session.set_current_index(*original_index);
                }
            }
            Action::ClearAllFrames {
                previous_frames,
                previous_index,
            }
            | Action::ReplaceFrames {
                previous_frames,
                previous_index,
                ..
            } => session.replace_frames(previous_frames.clone(), *previous_index),
        }
    }

    /// The frame whose strokes this action touches, if any.
    pub fn frame_index(&self) -> Option<usize> {
        match self {
            Action::AddStroke { frame_index, .. }
            | Action::RemoveStrokes { frame_index, .. }
            | Action::AddShape { frame_index, .. } => Some(*frame_index),
            _ => None,
        }
    }
}
