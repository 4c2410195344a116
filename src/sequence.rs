//! Generated animations: one shape moving, turning and scaling between
//! waypoints, one frame per step.

use crate::frame::Frame;
use crate::geometry::{Point2D, Size};
use crate::shape::{ShapeDraft, ShapeKind};
use egui::Color32;

/// Frames spent travelling between two waypoints.
pub const FRAMES_PER_SERIES: usize = 50;

/// Base size of the generated shape before scaling.
pub const BASE_SHAPE_SIZE: f64 = 100.0;

/// Where the shape is, how it is turned and how it is scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub position: Point2D,
    /// Radians
    pub angle: f64,
    /// Per-axis scale of the base shape size
    pub scale: (f64, f64),
}

impl Keyframe {
    pub fn new(position: Point2D, angle: f64, scale: (f64, f64)) -> Self {
        Self {
            position,
            angle,
            scale,
        }
    }

    fn lerp(&self, to: &Keyframe, t: f64) -> Keyframe {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Keyframe {
            position: self.position.lerp(to.position, t),
            angle: mix(self.angle, to.angle),
            scale: (mix(self.scale.0, to.scale.0), mix(self.scale.1, to.scale.1)),
        }
    }
}

/// Supplies the next waypoint. Any `FnMut() -> Keyframe` works, so callers
/// pick their own randomness.
pub trait WaypointSource {
    fn next_waypoint(&mut self) -> Keyframe;
}

impl<F: FnMut() -> Keyframe> WaypointSource for F {
    fn next_waypoint(&mut self) -> Keyframe {
        self()
    }
}

/// Stroke appearance of generated shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceStyle {
    pub color: Color32,
    pub line_width: f64,
    pub segment_length: f64,
}

/// Builds `frame_count` frames of `kind`. The first waypoint is the
/// starting pose and each series of [`FRAMES_PER_SERIES`] frames moves towards
/// the next one.
pub fn generate_sequence(
    kind: ShapeKind,
    frame_count: usize,
    style: SequenceStyle,
    waypoints: &mut dyn WaypointSource,
) -> Vec<Frame> {
    let mut frames = Vec::with_capacity(frame_count);
    if frame_count == 0 {
        return frames;
    }

    let mut start = waypoints.next_waypoint();
    while frames.len() < frame_count {
        let end = waypoints.next_waypoint();
        let in_series = FRAMES_PER_SERIES.min(frame_count - frames.len());

        for step in 0..in_series {
            let pose = start.lerp(&end, step as f64 / in_series as f64);
            let size = Size::new(BASE_SHAPE_SIZE * pose.scale.0, BASE_SHAPE_SIZE * pose.scale.1);
            let mut draft =
                ShapeDraft::new(kind, pose.position, size, style.color, style.line_width);
            draft.rotation = pose.angle;
            draft.segment_length = style.segment_length;
            frames.push(Frame::from_strokes(draft.strokes()));
        }
        start = end;
    }
    frames
}
