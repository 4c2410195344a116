use crate::shape::ShapeKind;

/// Notifications emitted by the editor after its state changed.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    StrokeCommitted {
        frame_index: usize,
    },
    StrokesErased {
        frame_index: usize,
        /// Number of strokes that lost at least one segment
        erased: usize,
    },
    /// Undo or redo rewrote a frame's strokes
    StrokesChanged {
        frame_index: usize,
    },
    ShapeCommitted {
        frame_index: usize,
        kind: ShapeKind,
    },
    FramesChanged {
        current: usize,
        count: usize,
    },
    HistoryChanged {
        can_undo: bool,
        can_redo: bool,
    },
    PlaybackStarted {
        from: usize,
    },
    FrameAdvanced {
        index: usize,
    },
    PlaybackStopped {
        index: usize,
    },
    ExportStarted {
        frame_count: usize,
    },
}
