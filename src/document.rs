use crate::command::{Action, ActionHistory};
use crate::eraser::{self, EraseOutcome};
use crate::frame::Frame;
use crate::geometry::Point2D;
use crate::session::Session;
use crate::stroke::Stroke;

/// Frame cursor position after a frame operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCursor {
    pub current: usize,
    pub count: usize,
}

/// The session together with its undo log.
///
/// Every mutation is turned into an [`Action`], applied, and recorded; there
/// is no way to change the session without leaving an undo step.
#[derive(Debug, Default, Clone)]
pub struct Document {
    session: Session,
    history: ActionHistory,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    pub fn current_frame(&self) -> &Frame {
        self.session.current_frame()
    }

    pub fn cursor(&self) -> FrameCursor {
        FrameCursor {
            current: self.session.current_index(),
            count: self.session.frame_count(),
        }
    }

    fn apply(&mut self, action: Action) -> FrameCursor {
        self.history.execute(action, &mut self.session);
        self.cursor()
    }

    /// Adds a stroke to the current frame. Empty strokes are refused.
    pub fn add_stroke(&mut self, stroke: Stroke) -> bool {
        if stroke.points().is_empty() {
            return false;
        }
        let frame_index = self.session.current_index();
        self.apply(Action::AddStroke { stroke, frame_index });
        true
    }

    /// Adds all strokes of one shape to the current frame as a single step.
    pub fn add_shape(&mut self, strokes: Vec<Stroke>) -> bool {
        let strokes: Vec<Stroke> = strokes
            .into_iter()
            .filter(|stroke| !stroke.points().is_empty())
            .collect();
        if strokes.is_empty() {
            return false;
        }
        let frame_index = self.session.current_index();
        self.apply(Action::AddShape { strokes, frame_index });
        true
    }

    /// Erases along `path` on the current frame. Nothing is recorded when
    /// no stroke was touched.
    pub fn erase(&mut self, path: &[Point2D], eraser_width: f64) -> EraseOutcome {
        let frame_index = self.session.current_index();
        let previous = self.session.current_frame().strokes().to_vec();
        let outcome = eraser::erase(&previous, path, eraser_width);
        if outcome.changed() {
            self.apply(Action::RemoveStrokes {
                frame_index,
                previous,
                remaining: outcome.strokes.clone(),
            });
        }
        outcome
    }

    /// Overwrites the current frame's strokes, recorded like an eraser pass.
    pub fn set_current_strokes(&mut self, strokes: Vec<Stroke>) {
        let frame_index = self.session.current_index();
        let previous = self.session.current_frame().strokes().to_vec();
        if previous == strokes {
            return;
        }
        self.apply(Action::RemoveStrokes {
            frame_index,
            previous,
            remaining: strokes,
        });
    }

    pub fn insert_frame_after_current(&mut self) -> FrameCursor {
        let at_index = self.session.current_index() + 1;
        self.apply(Action::InsertFrame { at_index })
    }

    pub fn append_frame(&mut self) -> FrameCursor {
        let previous_index = self.session.current_index();
        self.apply(Action::AppendFrame { previous_index })
    }

    /// Copies the current frame's strokes into a new frame right after it.
    pub fn duplicate_current_frame(&mut self) -> FrameCursor {
        let original_index = self.session.current_index();
        self.apply(Action::DuplicateFrame {
            original_index,
            new_index: original_index + 1,
        })
    }

    pub fn delete_current_frame(&mut self) -> FrameCursor {
        self.delete_frame(self.session.current_index())
    }

    /// Removes the frame at `index`. The last remaining frame is never removed.
    pub fn delete_frame(&mut self, index: usize) -> FrameCursor {
        if self.session.frame_count() <= 1 {
            log::debug!("refusing to delete the only frame");
            return self.cursor();
        }
        let Some(removed) = self.session.frame(index).cloned() else {
            log::debug!("no frame at index {index}");
            return self.cursor();
        };
        let previous_index = self.session.current_index();
        self.apply(Action::RemoveFrame {
            index,
            removed,
            previous_index,
        })
    }

    /// Resets to exactly one empty frame.
    pub fn clear_all_frames(&mut self) -> FrameCursor {
        let previous_frames = self.session.frames().to_vec();
        let previous_index = self.session.current_index();
        self.apply(Action::ClearAllFrames {
            previous_frames,
            previous_index,
        })
    }

    /// Makes `index` the current frame. Out-of-range and same-frame switches
    /// are ignored.
    pub fn switch_to_frame(&mut self, index: usize) -> FrameCursor {
        let from = self.session.current_index();
        if index >= self.session.frame_count() || index == from {
            return self.cursor();
        }
        self.apply(Action::SwitchFrame { from, to: index })
    }

    /// Replaces every frame in one undo step.
    pub fn replace_frames(&mut self, frames: Vec<Frame>) -> FrameCursor {
        if frames.is_empty() {
            return self.cursor();
        }
        let previous_frames = self.session.frames().to_vec();
        let previous_index = self.session.current_index();
        self.apply(Action::ReplaceFrames {
            previous_frames,
            previous_index,
            frames,
        })
    }

    /// Moves the cursor without recording anything. Used by playback, which
    /// is not part of the edit history.
    pub(crate) fn set_playback_cursor(&mut self, index: usize) {
        self.session.set_current_index(index);
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.session)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.session)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
