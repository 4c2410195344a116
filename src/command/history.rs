use super::Action;
use crate::session::Session;

/// Undo and redo stacks of [`Action`]s.
#[derive(Debug, Default, Clone)]
pub struct ActionHistory {
    /// Actions that can be undone, most recent last
    undo_stack: Vec<Action>,
    /// Actions that can be redone, most recently undone last
    redo_stack: Vec<Action>,
}

impl ActionHistory {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an action that has already been applied. Any redoable actions
    /// are discarded.
    pub fn record(&mut self, action: Action) {
        log::debug!("recording {}", action.name());
        self.undo_stack.push(action);
        self.redo_stack.clear();
    }

    /// Apply `action` to `session` and record it.
    pub fn execute(&mut self, action: Action, session: &mut Session) {
        action.execute(session);
        self.record(action);
    }

    /// Revert the most recent action. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self, session: &mut Session) -> bool {
        let Some(action) = self.undo_stack.pop() else {
            return false;
        };
        action.undo(session);
        self.redo_stack.push(action);
        true
    }

    /// Re-apply the most recently undone action. Returns `false` when there is
    /// nothing to redo.
    pub fn redo(&mut self, session: &mut Session) -> bool {
        let Some(action) = self.redo_stack.pop() else {
            return false;
        };
        action.execute(session);
        self.undo_stack.push(action);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// The action `undo` would revert next.
    pub fn last_action(&self) -> Option<&Action> {
        self.undo_stack.last()
    }

    /// The action `redo` would re-apply next.
    pub fn next_redo(&self) -> Option<&Action> {
        self.redo_stack.last()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear both stacks
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
