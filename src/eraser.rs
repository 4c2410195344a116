//! Segment-level eraser.
//!
//! Every stroke segment that passes within reach of any eraser segment is
//! removed, and what is left of the stroke survives as separate fragments.

use crate::geometry::{bounds_of, within_eraser_radius, Point2D};
use crate::stroke::Stroke;

/// Result of one eraser pass over a frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EraseOutcome {
    /// The frame's new stroke list
    pub strokes: Vec<Stroke>,
    /// Pre-erase copies of every stroke that lost at least one segment
    pub erased: Vec<Stroke>,
}

impl EraseOutcome {
    pub fn changed(&self) -> bool {
        !self.erased.is_empty()
    }
}

/// Segments of the eraser path, empty when the path has no length at all.
fn eraser_segments(path: &[Point2D]) -> Vec<(Point2D, Point2D)> {
    if path.windows(2).all(|w| w[0] == w[1]) {
        return Vec::new();
    }
    path.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Point pairs of a stroke. A single point is tested as a zero-length segment.
fn stroke_segments(points: &[Point2D]) -> Vec<(Point2D, Point2D)> {
    match points {
        [] => Vec::new(),
        [only] => vec![(*only, *only)],
        _ => points.windows(2).map(|w| (w[0], w[1])).collect(),
    }
}

/// Splits `stroke` around the erased segments. `None` means the stroke was
/// not touched at all.
fn split_stroke(
    stroke: &Stroke,
    segments: &[(Point2D, Point2D)],
    eraser_width: f64,
) -> Option<Vec<Stroke>> {
    let radius = eraser_width / 2.0 + stroke.hit_radius();
    let mut fragments: Vec<Vec<Point2D>> = Vec::new();
    let mut current: Vec<Point2D> = Vec::new();
    let mut touched = false;

    for (start, end) in stroke_segments(stroke.points()) {
        let hit = segments
            .iter()
            .any(|eraser| within_eraser_radius((start, end), *eraser, radius));

        if hit {
            touched = true;
            if !current.is_empty() {
                fragments.push(std::mem::take(&mut current));
            }
        } else {
            if current.is_empty() {
                current.push(start);
            }
            current.push(end);
        }
    }
    if !current.is_empty() {
        fragments.push(current);
    }

    if !touched {
        return None;
    }
    Some(
        fragments
            .into_iter()
            .filter(|points| points.len() > 1)
            .map(|points| stroke.fragment(points))
            .collect(),
    )
}

/// Run the eraser `path` of `eraser_width` over `strokes`.
///
/// Untouched strokes are carried over as they are; touched strokes are
/// replaced, in place, by their surviving fragments. Paths with fewer than two
/// points, or whose points all coincide, erase nothing.
pub fn erase(strokes: &[Stroke], path: &[Point2D], eraser_width: f64) -> EraseOutcome {
    let segments = eraser_segments(path);
    let Some(path_bounds) = bounds_of(path).filter(|_| !segments.is_empty()) else {
        return EraseOutcome {
            strokes: strokes.to_vec(),
            erased: Vec::new(),
        };
    };

    let mut outcome = EraseOutcome::default();
    for stroke in strokes {
        let reach = eraser_width / 2.0 + stroke.hit_radius();
        let near = bounds_of(stroke.points())
            .is_some_and(|bounds| bounds.expand(reach).intersects(&path_bounds));

        match near.then(|| split_stroke(stroke, &segments, eraser_width)).flatten() {
            Some(fragments) => {
                outcome.erased.push(stroke.clone());
                outcome.strokes.extend(fragments);
            }
            None => outcome.strokes.push(stroke.clone()),
        }
    }

    log::debug!(
        "eraser pass: {} of {} strokes touched",
        outcome.erased.len(),
        strokes.len()
    );
    outcome
}
