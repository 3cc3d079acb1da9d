//! General 2D polygon boolean engine.
//!
//! Thin wrapper around the `i_overlay` sweep clipper. Coordinates are snapped
//! to a fixed-precision grid at the wrapper boundary so the boolean
//! arithmetic only ever sees exactly representable values, and degenerate
//! output contours are filtered before they reach callers.

use i_overlay::core::fill_rule::FillRule as OverlayFillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;

use crate::math::polygon_2d::signed_area_2d;
use crate::math::Point2;

/// A closed 2D contour; the last vertex implicitly connects to the first.
pub type Contour = Vec<Point2>;

/// Grid resolution for boolean arithmetic. Input coordinates are rounded to
/// multiples of `1 / SCALE` on entry and results are rounded back on exit.
pub const SCALE: f64 = 1e6;

/// Output contours with less area than this are degenerate and dropped.
const MIN_AREA: f64 = 1e-10;

/// Boolean operation to apply between subject and clip polygon sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Difference,
    Intersection,
}

/// Rule resolving overlapping or self-intersecting contours into a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// Combines two polygon sets with a boolean operation.
///
/// Both sides may hold several disjoint or nested contours; contour winding
/// encodes outer boundary vs hole under the chosen fill rule. Zero, one, or
/// many contours may come back — an empty result is a valid outcome (e.g. a
/// difference with no remainder), never an error. Self-intersecting or
/// zero-area input degrades to whatever the fill-rule arithmetic produces.
///
/// An empty clip set short-circuits: `Union` and `Difference` return the
/// snapped subject, `Intersection` returns nothing.
#[must_use]
pub fn combine(
    subject: &[Contour],
    clip: &[Contour],
    op: BooleanOp,
    fill_rule: FillRule,
) -> Vec<Contour> {
    let subject_paths = to_paths(subject);
    let clip_paths = to_paths(clip);

    if subject_paths.is_empty() {
        return match op {
            BooleanOp::Union => union_all(clip),
            BooleanOp::Difference | BooleanOp::Intersection => Vec::new(),
        };
    }
    if clip_paths.is_empty() {
        return match op {
            BooleanOp::Union => union_all(subject),
            BooleanOp::Difference => shapes_to_contours(vec![subject_paths]),
            BooleanOp::Intersection => Vec::new(),
        };
    }

    let shapes = subject_paths.overlay(&clip_paths, overlay_rule(op), overlay_fill(fill_rule));
    shapes_to_contours(shapes)
}

/// Unions a set of polygons into a minimal set of merged contours.
///
/// Every input contour participates; the merged edge set is resolved with the
/// non-zero fill rule. Contours with fewer than 3 vertices are ignored.
#[must_use]
pub fn union_all(contours: &[Contour]) -> Vec<Contour> {
    let paths = to_paths(contours);
    if paths.is_empty() {
        return Vec::new();
    }
    if paths.len() == 1 {
        return shapes_to_contours(vec![paths]);
    }

    let subject = vec![paths[0].clone()];
    let clip = paths[1..].to_vec();
    let shapes = subject.overlay(&clip, OverlayRule::Union, OverlayFillRule::NonZero);
    shapes_to_contours(shapes)
}

fn overlay_rule(op: BooleanOp) -> OverlayRule {
    match op {
        BooleanOp::Union => OverlayRule::Union,
        BooleanOp::Difference => OverlayRule::Difference,
        BooleanOp::Intersection => OverlayRule::Intersect,
    }
}

fn overlay_fill(fill_rule: FillRule) -> OverlayFillRule {
    match fill_rule {
        FillRule::NonZero => OverlayFillRule::NonZero,
        FillRule::EvenOdd => OverlayFillRule::EvenOdd,
    }
}

/// Snaps a coordinate to the fixed-precision grid.
fn snap(value: f64) -> f64 {
    (value * SCALE).round() / SCALE
}

/// Converts contours to snapped clipper paths, dropping those that cannot
/// bound any area.
fn to_paths(contours: &[Contour]) -> Vec<Vec<[f64; 2]>> {
    contours
        .iter()
        .filter(|c| c.len() >= 3)
        .map(|c| c.iter().map(|p| [snap(p.x), snap(p.y)]).collect())
        .collect()
}

/// Converts clipper result shapes back to contours, filtering degenerates.
///
/// The clipper returns a list of shapes, each a list of contours where the
/// first is the outer boundary and the rest are holes. Hole/outer structure
/// is flattened here; winding carries the distinction.
fn shapes_to_contours(shapes: Vec<Vec<Vec<[f64; 2]>>>) -> Vec<Contour> {
    let mut contours = Vec::new();
    for shape in shapes {
        for path in shape {
            let contour: Contour = path
                .into_iter()
                .map(|[x, y]| Point2::new(snap(x), snap(y)))
                .collect();
            if contour.len() >= 3 && signed_area_2d(&contour).abs() > MIN_AREA {
                contours.push(contour);
            }
        }
    }
    contours
}
