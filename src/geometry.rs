use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point on the canvas, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Rotates this point around `center` by `radians`.
    pub fn rotate_about(self, center: Point2D, radians: f64) -> Point2D {
        let (sin, cos) = radians.sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point2D::new(
            center.x + dx * cos - dy * sin,
            center.y + dx * sin + dy * cos,
        )
    }

    /// Linear interpolation, `t = 0` is `self` and `t = 1` is `other`.
    pub fn lerp(self, other: Point2D, t: f64) -> Point2D {
        Point2D::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

impl Add for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height of a canvas or a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub const fn square(side: f64) -> Self {
        Self::new(side, side)
    }

    /// Half of the shorter side.
    pub fn radius(&self) -> f64 {
        self.width.min(self.height) / 2.0
    }
}

/// Axis-aligned bounds, used for quick rejection before per-segment tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point2D,
    pub max: Point2D,
}

impl Bounds {
    pub fn expand(self, amount: f64) -> Bounds {
        Bounds {
            min: Point2D::new(self.min.x - amount, self.min.y - amount),
            max: Point2D::new(self.max.x + amount, self.max.y + amount),
        }
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

/// Calculate the bounding box for a set of points, `None` when empty.
pub fn bounds_of(points: &[Point2D]) -> Option<Bounds> {
    let first = points.first()?;
    let mut bounds = Bounds {
        min: *first,
        max: *first,
    };
    for point in &points[1..] {
        bounds.min.x = bounds.min.x.min(point.x);
        bounds.min.y = bounds.min.y.min(point.y);
        bounds.max.x = bounds.max.x.max(point.x);
        bounds.max.y = bounds.max.y.max(point.y);
    }
    Some(bounds)
}

/// Distance from `point` to the segment `a..b`. A degenerate segment
/// (`a == b`) falls back to the point-to-point distance.
pub fn distance_point_to_segment(point: Point2D, a: Point2D, b: Point2D) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    if dx == 0.0 && dy == 0.0 {
        return point.distance(a);
    }

    let t = ((point.x - a.x) * dx + (point.y - a.y) * dy) / (dx * dx + dy * dy);
    let closest = if t < 0.0 {
        a
    } else if t > 1.0 {
        b
    } else {
        Point2D::new(a.x + t * dx, a.y + t * dy)
    };
    point.distance(closest)
}

fn ccw(a: Point2D, b: Point2D, c: Point2D) -> bool {
    (c.y - a.y) * (b.x - a.x) > (b.y - a.y) * (c.x - a.x)
}

/// Orientation test for a proper crossing of `p1..p2` and `q1..q2`.
pub fn segments_intersect(p1: Point2D, p2: Point2D, q1: Point2D, q2: Point2D) -> bool {
    ccw(p1, q1, q2) != ccw(p2, q1, q2) && ccw(p1, p2, q1) != ccw(p1, p2, q2)
}

/// Zero when the segments cross, otherwise the smallest endpoint-to-segment distance.
pub fn min_distance_between_segments(p1: Point2D, p2: Point2D, q1: Point2D, q2: Point2D) -> f64 {
    if segments_intersect(p1, p2, q1, q2) {
        return 0.0;
    }
    distance_point_to_segment(p1, q1, q2)
        .min(distance_point_to_segment(p2, q1, q2))
        .min(distance_point_to_segment(q1, p1, p2))
        .min(distance_point_to_segment(q2, p1, p2))
}

/// Whether `line` passes within `radius` of `eraser`.
pub fn within_eraser_radius(
    line: (Point2D, Point2D),
    eraser: (Point2D, Point2D),
    radius: f64,
) -> bool {
    min_distance_between_segments(line.0, line.1, eraser.0, eraser.1) <= radius
}
