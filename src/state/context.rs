//! The entry point for the UI collaborator.
//!
//! `EditorContext` owns the document, the gesture state machine, playback and
//! export, and broadcasts an [`EditorEvent`] after every change. All calls are
//! expected from one thread; only export work leaves it.
//!
//! While playback runs, drawing, shape placement, frame operations, undo and
//! redo are refused and leave everything unchanged.
//!
//! # Example
//!
//! ```rust,no_run
//! use frameflow_core::{EditorContext, Point2D};
//!
//! let mut editor = EditorContext::default();
//! editor.begin_stroke(Point2D::new(10.0, 10.0));
//! editor.append_stroke_point(Point2D::new(40.0, 40.0));
//! editor.commit_stroke();
//! editor.undo();
//! ```
use super::EditorState;
use crate::animation::Playback;
use crate::command::Action;
use crate::document::{Document, FrameCursor};
use crate::error::{ExportError, TransitionError};
use crate::event::{EditorEvent, EventBus, EventHandler, SubscriptionId};
use crate::export::{ExportHandle, ExportOptions, ExportRequest, Exporter};
use crate::frame::Frame;
use crate::geometry::{Point2D, Size};
use crate::sequence::{self, SequenceStyle, WaypointSource};
use crate::session::Session;
use crate::settings::EditorSettings;
use crate::shape::{Edge, ShapeDraft, ShapeKind};
use crate::stroke::{Stroke, StrokeBuilder, StrokeStyle};
use crate::tool::ToolMode;
use egui::Color32;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug)]
pub struct EditorContext {
    settings: EditorSettings,
    document: Document,
    state: EditorState,
    tool: ToolMode,
    color: Color32,
    line_width: f64,
    playback: Playback,
    exporter: Exporter,
    event_bus: EventBus,
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl EditorContext {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            color: settings.color(),
            line_width: settings.line_width,
            playback: Playback::new(settings.frame_interval_secs),
            settings,
            document: Document::new(),
            state: EditorState::Idle,
            tool: ToolMode::default(),
            exporter: Exporter::new(),
            event_bus: EventBus::new(),
        }
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn session(&self) -> &Session {
        self.document.session()
    }

    pub fn cursor(&self) -> FrameCursor {
        self.document.cursor()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn canvas_size(&self) -> Size {
        self.settings.canvas_size
    }

    /// Subscribe a handler to editor events
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) -> SubscriptionId {
        self.event_bus.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.event_bus.unsubscribe(id)
    }

    /// Switches tools, dropping any unfinished gesture.
    pub fn set_tool(&mut self, tool: ToolMode) {
        if self.tool != tool {
            self.cancel_gesture();
            self.tool = tool;
        }
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    /// Width for subsequent strokes, shapes and eraser passes.
    pub fn set_line_width(&mut self, width: f64) {
        if width > 0.0 {
            self.line_width = width;
        }
    }

    pub fn set_canvas_size(&mut self, size: Size) {
        if size.width > 0.0 && size.height > 0.0 {
            self.settings.canvas_size = size;
        }
    }

    /// Playback and export frame interval, clamped to the allowed range.
    pub fn set_frame_interval(&mut self, secs: f64) {
        self.playback.set_interval(secs);
        self.settings.frame_interval_secs = self.playback.interval().as_secs_f64();
    }

    fn transition_to(&mut self, new_state: EditorState) -> Result<(), TransitionError> {
        if !self.state.can_transition_to(&new_state) {
            return Err(TransitionError::InvalidStateTransition {
                from: self.state.name(),
                to: new_state.name(),
            });
        }
        self.state = new_state;
        Ok(())
    }

    /// Drops the gesture in progress without committing anything.
    pub fn cancel_gesture(&mut self) {
        if !self.state.is_idle() {
            log::debug!("discarding unfinished {}", self.state.name());
            self.state = EditorState::Idle;
        }
    }

    fn refuse_while_playing(&self, operation: &str) -> bool {
        if self.playback.is_playing() {
            log::debug!("{operation} refused during playback");
            return true;
        }
        false
    }

    fn notify_frames(&self) {
        let cursor = self.document.cursor();
        self.event_bus.emit(EditorEvent::FramesChanged {
            current: cursor.current,
            count: cursor.count,
        });
    }

    fn notify_history(&self) {
        self.event_bus.emit(EditorEvent::HistoryChanged {
            can_undo: self.document.can_undo(),
            can_redo: self.document.can_redo(),
        });
    }

    fn gesture_for_tool(&self) -> Option<EditorState> {
        if self.tool.draws_strokes() {
            let style = if self.tool == ToolMode::Brush {
                StrokeStyle::Soft
            } else {
                StrokeStyle::Plain
            };
            return Some(EditorState::Drawing {
                stroke: StrokeBuilder::new(self.color, self.line_width, style),
            });
        }
        (self.tool == ToolMode::Eraser).then(|| EditorState::Erasing {
            path: Vec::new(),
            width: self.line_width,
        })
    }

    fn start_gesture(&mut self) -> bool {
        let Some(gesture) = self.gesture_for_tool() else {
            log::debug!("{:?} tool does not draw strokes", self.tool);
            return false;
        };
        self.cancel_gesture();
        match self.transition_to(gesture) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("{err}");
                false
            }
        }
    }

    // Draw lifecycle

    /// Starts a stroke (or eraser path, in eraser mode) at `point`.
    pub fn begin_stroke(&mut self, point: Point2D) -> bool {
        if self.refuse_while_playing("drawing") || !self.start_gesture() {
            return false;
        }
        self.append_stroke_point(point);
        true
    }

    /// Extends the stroke in progress, starting one if needed. Points that
    /// would put the stroke over the canvas edge are dropped.
    pub fn append_stroke_point(&mut self, point: Point2D) -> bool {
        if self.refuse_while_playing("drawing") {
            return false;
        }
        if self.state.is_placing_shape() {
            return false;
        }
        let in_gesture = self.state.is_drawing() || self.state.is_erasing();
        if !in_gesture && !self.start_gesture() {
            return false;
        }

        let bounds = self.settings.canvas_size;
        match &mut self.state {
            EditorState::Drawing { stroke } => stroke.append_point(point, bounds),
            EditorState::Erasing { path, width } => {
                let margin = *width / 2.0;
                let inside = point.x >= margin
                    && point.x <= bounds.width - margin
                    && point.y >= margin
                    && point.y <= bounds.height - margin;
                if inside {
                    path.push(point);
                }
                inside
            }
            _ => false,
        }
    }

    /// Finishes the stroke in progress as one undo step. In eraser mode this
    /// runs the eraser over the current frame.
    pub fn commit_stroke(&mut self) -> bool {
        if self.refuse_while_playing("drawing") {
            return false;
        }
        let frame_index = self.document.cursor().current;
        match std::mem::take(&mut self.state) {
            EditorState::Drawing { stroke } => {
                let Some(stroke) = stroke.finish() else {
                    return false;
                };
                if !self.document.add_stroke(stroke) {
                    return false;
                }
                self.event_bus.emit(EditorEvent::StrokeCommitted { frame_index });
                self.notify_history();
                true
            }
            EditorState::Erasing { path, width } => {
                let outcome = self.document.erase(&path, width);
                if !outcome.changed() {
                    return false;
                }
                self.event_bus.emit(EditorEvent::StrokesErased {
                    frame_index,
                    erased: outcome.erased.len(),
                });
                self.notify_history();
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// A display copy of the stroke being drawn.
    pub fn stroke_preview(&self) -> Option<Stroke> {
        self.state.stroke().map(StrokeBuilder::preview)
    }

    pub fn eraser_path(&self) -> Option<&[Point2D]> {
        self.state.eraser_path()
    }

    // Shape lifecycle

    /// Starts placing `kind` centered on `anchor` at the configured size.
    pub fn begin_shape(&mut self, kind: ShapeKind, anchor: Point2D) -> bool {
        if self.refuse_while_playing("shape placement") {
            return false;
        }
        self.cancel_gesture();
        let mut draft = ShapeDraft::new(
            kind,
            anchor,
            Size::square(self.settings.shape_size),
            self.color,
            self.line_width,
        );
        draft.segment_length = self.settings.segment_length;
        match self.transition_to(EditorState::PlacingShape { draft }) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("{err}");
                false
            }
        }
    }

    /// Resizes and turns the shape being placed towards `point`.
    pub fn update_shape_preview(&mut self, point: Point2D) -> bool {
        match &mut self.state {
            EditorState::PlacingShape { draft } => {
                draft.update_towards(point);
                true
            }
            _ => false,
        }
    }

    /// Outline of the shape being placed.
    pub fn shape_preview(&self) -> Option<Vec<Edge>> {
        self.state.shape_draft().map(ShapeDraft::outline)
    }

    /// Adds the shape being placed to the current frame as one undo step.
    pub fn commit_shape(&mut self) -> bool {
        if self.refuse_while_playing("shape placement") {
            return false;
        }
        let EditorState::PlacingShape { draft } = std::mem::take(&mut self.state) else {
            return false;
        };
        let frame_index = self.document.cursor().current;
        if !self.document.add_shape(draft.strokes()) {
            return false;
        }
        self.event_bus.emit(EditorEvent::ShapeCommitted {
            frame_index,
            kind: draft.kind,
        });
        self.notify_history();
        true
    }

    /// Places `kind` at `point` in one step, at the configured size.
    pub fn place_shape(&mut self, kind: ShapeKind, point: Point2D) -> bool {
        self.begin_shape(kind, point) && self.commit_shape()
    }

    // Frame operations

    fn frame_op(
        &mut self,
        operation: &str,
        op: impl FnOnce(&mut Document) -> FrameCursor,
    ) -> FrameCursor {
        if self.refuse_while_playing(operation) {
            return self.document.cursor();
        }
        let undo_len = self.document.history().undo_len();
        let cursor = op(&mut self.document);
        if self.document.history().undo_len() != undo_len {
            self.notify_frames();
            self.notify_history();
        }
        cursor
    }

    pub fn insert_frame_after_current(&mut self) -> FrameCursor {
        self.frame_op("insert frame", Document::insert_frame_after_current)
    }

    pub fn append_frame(&mut self) -> FrameCursor {
        self.frame_op("append frame", Document::append_frame)
    }

    pub fn duplicate_current_frame(&mut self) -> FrameCursor {
        self.frame_op("duplicate frame", Document::duplicate_current_frame)
    }

    pub fn delete_current_frame(&mut self) -> FrameCursor {
        self.frame_op("delete frame", Document::delete_current_frame)
    }

    pub fn delete_frame(&mut self, index: usize) -> FrameCursor {
        self.frame_op("delete frame", |document| document.delete_frame(index))
    }

    pub fn clear_all_frames(&mut self) -> FrameCursor {
        self.frame_op("clear frames", Document::clear_all_frames)
    }

    pub fn switch_to_frame(&mut self, index: usize) -> FrameCursor {
        self.frame_op("switch frame", |document| document.switch_to_frame(index))
    }

    /// Replaces every frame with a generated animation of `kind`.
    pub fn generate_sequence(
        &mut self,
        kind: ShapeKind,
        frame_count: usize,
        waypoints: &mut dyn WaypointSource,
    ) -> FrameCursor {
        let style = SequenceStyle {
            color: self.color,
            line_width: self.line_width,
            segment_length: self.settings.segment_length,
        };
        self.frame_op("generate sequence", |document| {
            let frames = sequence::generate_sequence(kind, frame_count, style, waypoints);
            document.replace_frames(frames)
        })
    }

    // Undo / redo

    pub fn undo(&mut self) -> bool {
        if self.refuse_while_playing("undo") {
            return false;
        }
        let touched = self.document.history().last_action().and_then(Action::frame_index);
        if !self.document.undo() {
            return false;
        }
        self.notify_replayed(touched);
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.refuse_while_playing("redo") {
            return false;
        }
        let touched = self.document.history().next_redo().and_then(Action::frame_index);
        if !self.document.redo() {
            return false;
        }
        self.notify_replayed(touched);
        true
    }

    fn notify_replayed(&self, touched: Option<usize>) {
        if let Some(frame_index) = touched {
            self.event_bus.emit(EditorEvent::StrokesChanged { frame_index });
        }
        self.notify_frames();
        self.notify_history();
    }

    pub fn can_undo(&self) -> bool {
        self.document.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.document.can_redo()
    }

    // Playback

    /// Starts looping through the frames. Needs at least two frames.
    pub fn play(&mut self) -> bool {
        let cursor = self.document.cursor();
        if !self.playback.start(cursor.count, cursor.current) {
            log::debug!("playback not started with {} frame(s)", cursor.count);
            return false;
        }
        self.cancel_gesture();
        self.event_bus.emit(EditorEvent::PlaybackStarted {
            from: cursor.current,
        });
        true
    }

    /// Advances playback by `elapsed`. Returns the number of frames stepped.
    pub fn tick(&mut self, elapsed: Duration) -> usize {
        let cursor = self.document.cursor();
        let mut index = cursor.current;
        let advanced = self.playback.tick(elapsed, cursor.count, &mut index);
        if advanced > 0 {
            self.document.set_playback_cursor(index);
            self.event_bus.emit(EditorEvent::FrameAdvanced { index });
        }
        advanced
    }

    /// Stops playback, leaving the last frame current.
    pub fn stop(&mut self) -> bool {
        let Some(index) = self.playback.stop(self.document.cursor().count) else {
            return false;
        };
        self.document.set_playback_cursor(index);
        self.event_bus.emit(EditorEvent::PlaybackStopped { index });
        true
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    // Export

    /// Exports every frame at canvas resolution to `destination`.
    pub fn export(&self, destination: impl Into<PathBuf>) -> Result<ExportHandle, ExportError> {
        let canvas = self.settings.canvas_size;
        let width = canvas.width.round().max(0.0) as u32;
        let height = canvas.height.round().max(0.0) as u32;
        self.export_with_size(destination, width, height)
    }

    /// Exports a snapshot of every frame as a looping GIF of `width` x
    /// `height` pixels, one frame per playback interval. Any export already
    /// running is cancelled first.
    pub fn export_with_size(
        &self,
        destination: impl Into<PathBuf>,
        width: u32,
        height: u32,
    ) -> Result<ExportHandle, ExportError> {
        let frames = self.document.session().snapshot();
        self.export_frames(frames, self.playback.interval(), width, height, destination)
    }

    /// Exports `frames` with `delay` per frame. The frames are read in canvas
    /// coordinates and scaled to `width` x `height`.
    pub fn export_frames(
        &self,
        frames: Arc<[Frame]>,
        delay: Duration,
        width: u32,
        height: u32,
        destination: impl Into<PathBuf>,
    ) -> Result<ExportHandle, ExportError> {
        let frame_count = frames.len();
        let options = ExportOptions::new(delay, self.settings.canvas_size)
            .with_target_size(width, height)
            .with_max_frames(self.settings.max_export_frames);
        let handle = self.exporter.start(ExportRequest {
            frames,
            options,
            destination: destination.into(),
        })?;
        self.event_bus.emit(EditorEvent::ExportStarted { frame_count });
        Ok(handle)
    }

    /// Cancels the running export. Returns whether one was running.
    pub fn cancel_export(&self) -> bool {
        self.exporter.cancel()
    }

    pub fn is_exporting(&self) -> bool {
        self.exporter.is_busy()
    }
}
