use crate::frame::Frame;
use std::sync::Arc;

/// The editable state: ordered frames plus the current-frame cursor.
///
/// There is always at least one frame and `current_index` always points at one
/// of them. Mutation is crate-private: everything outside goes through
/// [`crate::Document`], which records each change in the undo log.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    frames: Vec<Frame>,
    current_index: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new()],
            current_index: 0,
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_frame(&self) -> &Frame {
        &self.frames[self.current_index]
    }

    pub fn last_index(&self) -> usize {
        self.frames.len() - 1
    }

    /// Immutable copy of every frame, for readers on other threads.
    pub fn snapshot(&self) -> Arc<[Frame]> {
        self.frames.clone().into()
    }

    pub(crate) fn frame_mut(&mut self, index: usize) -> Option<&mut Frame> {
        self.frames.get_mut(index)
    }

    /// Moves the cursor, clamped to the last frame.
    pub(crate) fn set_current_index(&mut self, index: usize) {
        self.current_index = index.min(self.last_index());
    }

    /// Inserts at `index` (clamped to the end) and returns where it landed.
    pub(crate) fn insert_frame(&mut self, index: usize, frame: Frame) -> usize {
        let index = index.min(self.frames.len());
        self.frames.insert(index, frame);
        index
    }

    pub(crate) fn push_frame(&mut self, frame: Frame) -> usize {
        self.frames.push(frame);
        self.last_index()
    }

    /// Removes the frame at `index` unless it is the only one.
    pub(crate) fn remove_frame(&mut self, index: usize) -> Option<Frame> {
        if self.frames.len() <= 1 || index >= self.frames.len() {
            return None;
        }
        let removed = self.frames.remove(index);
        if self.current_index >= self.frames.len() {
            self.current_index = self.last_index();
        }
        Some(removed)
    }

    /// Replaces every frame. An empty list becomes a single empty frame.
    pub(crate) fn replace_frames(&mut self, frames: Vec<Frame>, current_index: usize) {
        self.frames = if frames.is_empty() { vec![Frame::new()] } else { frames };
        self.set_current_index(current_index);
    }
}
