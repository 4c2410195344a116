use crate::geometry::{Point2D, Size};
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a stroke is drawn. Soft strokes carry a blur halo that counts
/// towards their hit radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeStyle {
    #[default]
    Plain,
    Soft,
}

/// One committed, continuous path on a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    id: Uuid,
    points: Vec<Point2D>,
    color: Color32,
    width: f64,
    style: StrokeStyle,
}

impl Stroke {
    /// Create a stroke with a fresh id.
    pub fn new(points: Vec<Point2D>, color: Color32, width: f64, style: StrokeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            color,
            width,
            style,
        }
    }

    /// A new stroke that keeps this stroke's color, width and style.
    pub fn fragment(&self, points: Vec<Point2D>) -> Self {
        Self::new(points, self.color, self.width, self.style)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Visual half-width, including the soft halo.
    pub fn hit_radius(&self) -> f64 {
        match self.style {
            StrokeStyle::Plain => self.width / 2.0,
            StrokeStyle::Soft => self.width / 2.0 + self.width / 2.0,
        }
    }
}

/// The stroke currently being drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeBuilder {
    points: Vec<Point2D>,
    color: Color32,
    width: f64,
    style: StrokeStyle,
}

impl StrokeBuilder {
    pub fn new(color: Color32, width: f64, style: StrokeStyle) -> Self {
        Self {
            points: Vec::new(),
            color,
            width,
            style,
        }
    }

    /// Adds `point` if it keeps the stroke inside the canvas. Points closer than
    /// half the width to an edge are dropped. Returns whether it was kept.
    pub fn append_point(&mut self, point: Point2D, bounds: Size) -> bool {
        let margin = self.width / 2.0;
        let inside = point.x >= margin
            && point.x <= bounds.width - margin
            && point.y >= margin
            && point.y <= bounds.height - margin;
        if inside {
            self.points.push(point);
        }
        inside
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// A display copy of the stroke so far.
    pub fn preview(&self) -> Stroke {
        Stroke::new(self.points.clone(), self.color, self.width, self.style)
    }

    /// Convert to a committed stroke; `None` when no point was kept.
    pub fn finish(self) -> Option<Stroke> {
        if self.points.is_empty() {
            return None;
        }
        Some(Stroke::new(self.points, self.color, self.width, self.style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_keeps_style_with_new_id() {
        let stroke = Stroke::new(
            vec![Point2D::new(1.0, 1.0), Point2D::new(2.0, 2.0)],
            Color32::RED,
            6.0,
            StrokeStyle::Soft,
        );
        let fragment = stroke.fragment(vec![Point2D::new(1.0, 1.0)]);
        assert_ne!(fragment.id(), stroke.id());
        assert_eq!(fragment.color(), stroke.color());
        assert_eq!(fragment.width(), stroke.width());
        assert_eq!(fragment.style(), StrokeStyle::Soft);
    }

    #[test]
    fn test_hit_radius_includes_halo() {
        let plain = Stroke::new(vec![Point2D::ZERO], Color32::BLACK, 6.0, StrokeStyle::Plain);
        let soft = Stroke::new(vec![Point2D::ZERO], Color32::BLACK, 6.0, StrokeStyle::Soft);
        assert_eq!(plain.hit_radius(), 3.0);
        assert_eq!(soft.hit_radius(), 6.0);
    }

    #[test]
    fn test_builder_respects_canvas_margin() {
        let bounds = Size::new(100.0, 100.0);
        let mut builder = StrokeBuilder::new(Color32::BLACK, 10.0, StrokeStyle::Plain);
        assert!(!builder.append_point(Point2D::new(4.0, 50.0), bounds));
        assert!(builder.append_point(Point2D::new(5.0, 50.0), bounds));
        assert!(builder.append_point(Point2D::new(95.0, 95.0), bounds));
        assert!(!builder.append_point(Point2D::new(96.0, 50.0), bounds));
        assert_eq!(builder.points().len(), 2);

        let empty = StrokeBuilder::new(Color32::BLACK, 10.0, StrokeStyle::Plain);
        assert!(empty.finish().is_none());
    }
}
