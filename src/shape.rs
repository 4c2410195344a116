//! Procedural shapes.
//!
//! A shape is committed as many short independent strokes rather than one
//! outline, so the eraser can cut away part of an edge.

use crate::geometry::{Point2D, Size};
use crate::stroke::{Stroke, StrokeStyle};
use egui::Color32;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Shapes narrower than this on either axis are grown to it.
pub const MIN_SHAPE_SIZE: f64 = 30.0;

/// Length of each stroke an edge is cut into.
pub const DEFAULT_SEGMENT_LENGTH: f64 = 5.0;

const MIN_CIRCLE_SEGMENTS: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Square,
    Circle,
    Triangle,
    Arrow,
}

/// An outline edge, start to end.
pub type Edge = (Point2D, Point2D);

fn clamp_size(size: Size) -> Size {
    Size::new(size.width.max(MIN_SHAPE_SIZE), size.height.max(MIN_SHAPE_SIZE))
}

fn closed_edges(vertices: &[Point2D]) -> Vec<Edge> {
    (0..vertices.len())
        .map(|i| (vertices[i], vertices[(i + 1) % vertices.len()]))
        .collect()
}

/// Edges of `kind` centered on `center`, rotated by `rotation` radians.
pub fn generate_shape_outline(
    kind: ShapeKind,
    center: Point2D,
    size: Size,
    rotation: f64,
) -> Vec<Edge> {
    let size = clamp_size(size);
    let half_w = size.width / 2.0;
    let half_h = size.height / 2.0;
    let at = |dx: f64, dy: f64| Point2D::new(center.x + dx, center.y + dy);

    let edges = match kind {
        ShapeKind::Square => closed_edges(&[
            at(-half_w, -half_h),
            at(half_w, -half_h),
            at(half_w, half_h),
            at(-half_w, half_h),
        ]),
        ShapeKind::Triangle => closed_edges(&[
            at(0.0, -half_h),
            at(-half_w, half_h),
            at(half_w, half_h),
        ]),
        ShapeKind::Arrow => {
            let top = at(0.0, -half_h);
            vec![
                (top, at(0.0, half_h)),
                (at(-size.width / 4.0, -size.height / 4.0), top),
                (at(size.width / 4.0, -size.height / 4.0), top),
            ]
        }
        ShapeKind::Circle => {
            let segments = ((size.radius() / 2.0) as usize).max(MIN_CIRCLE_SEGMENTS);
            let vertices: Vec<Point2D> = (0..=segments)
                .map(|i| {
                    let angle = TAU * i as f64 / segments as f64;
                    at(half_w * angle.cos(), half_h * angle.sin())
                })
                .collect();
            vertices.windows(2).map(|w| (w[0], w[1])).collect()
        }
    };

    if rotation == 0.0 {
        return edges;
    }
    edges
        .into_iter()
        .map(|(a, b)| (a.rotate_about(center, rotation), b.rotate_about(center, rotation)))
        .collect()
}

/// Cut one edge into two-point strokes of roughly `segment_length`.
pub fn segmentize_edge(
    a: Point2D,
    b: Point2D,
    color: Color32,
    width: f64,
    segment_length: f64,
) -> Vec<Stroke> {
    let length = a.distance(b);
    if length == 0.0 || segment_length <= 0.0 {
        return Vec::new();
    }

    let count = ((length / segment_length) as usize).max(1);
    (0..count)
        .map(|i| {
            let start = a.lerp(b, i as f64 / count as f64);
            let end = a.lerp(b, (i + 1) as f64 / count as f64);
            Stroke::new(vec![start, end], color, width, StrokeStyle::Plain)
        })
        .collect()
}

/// Everything needed to turn a shape into strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeDraft {
    pub kind: ShapeKind,
    pub center: Point2D,
    pub size: Size,
    pub rotation: f64,
    pub color: Color32,
    pub line_width: f64,
    pub segment_length: f64,
}

impl ShapeDraft {
    pub fn new(
        kind: ShapeKind,
        center: Point2D,
        size: Size,
        color: Color32,
        line_width: f64,
    ) -> Self {
        Self {
            kind,
            center,
            size: clamp_size(size),
            rotation: 0.0,
            color,
            line_width,
            segment_length: DEFAULT_SEGMENT_LENGTH,
        }
    }

    /// Resize and rotate so the shape's top points at `point`.
    pub fn update_towards(&mut self, point: Point2D) {
        let delta = point - self.center;
        let reach = 2.0 * point.distance(self.center);
        self.size = clamp_size(Size::square(reach));
        if delta != Point2D::ZERO {
            self.rotation = delta.y.atan2(delta.x) + FRAC_PI_2;
        }
    }

    pub fn outline(&self) -> Vec<Edge> {
        generate_shape_outline(self.kind, self.center, self.size, self.rotation)
    }

    pub fn strokes(&self) -> Vec<Stroke> {
        self.outline()
            .into_iter()
            .flat_map(|(a, b)| {
                segmentize_edge(a, b, self.color, self.line_width, self.segment_length)
            })
            .collect()
    }
}
