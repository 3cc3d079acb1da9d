use tracing::debug;

use crate::math::polygon_2d::Winding;
use crate::math::polygon_3d::signed_area_3d;
use crate::math::{Point3, Vector3, TOLERANCE};

/// Consecutive vertices closer than this are treated as one point.
pub const DEDUPE_TOLERANCE: f64 = 1e-6;

/// A vertex is dropped when the dot product of its incoming and outgoing
/// unit edge directions exceeds this in magnitude: near `+1` the vertex does
/// not change direction, near `-1` it is a hairpin spike.
pub const COLLINEAR_DOT: f64 = 0.9999;

/// A closed, planar 3D boundary loop of straight segments.
///
/// The last vertex implicitly connects back to the first.
#[derive(Debug, Clone)]
pub struct BoundaryLoop {
    points: Vec<Point3>,
}

impl BoundaryLoop {
    /// Returns the loop vertices in order.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Iterates the loop as directed segments, wrapping around at the end.
    pub fn segments(&self) -> impl Iterator<Item = (Point3, Point3)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

/// Rebuilds a cleaned, consistently wound boundary loop from raw vertices.
///
/// Cleaning removes consecutive duplicates and vertices that do not
/// meaningfully change direction, then fixes the winding against a reference
/// normal. A loop that collapses below 3 vertices yields no result — the
/// expected outcome for sliver regions, not an error.
#[derive(Debug)]
pub struct LoopClean {
    points: Vec<Point3>,
    normal: Vector3,
    winding: Winding,
}

impl LoopClean {
    /// Creates a new loop cleaning operation.
    ///
    /// `normal` is the plane normal the winding check is evaluated against;
    /// `winding` is the orientation the destination expects.
    #[must_use]
    pub fn new(points: Vec<Point3>, normal: Vector3, winding: Winding) -> Self {
        Self {
            points,
            normal,
            winding,
        }
    }

    /// Executes the cleaning, returning `None` for degenerate loops.
    #[must_use]
    pub fn execute(&self) -> Option<BoundaryLoop> {
        let deduped = dedupe_closed(&self.points);
        if deduped.len() < 3 {
            debug!(survivors = deduped.len(), "loop collapsed during dedupe");
            return None;
        }

        let kept = drop_straight_vertices(&deduped);
        if kept.len() < 3 {
            debug!(survivors = kept.len(), "loop collapsed to a sliver");
            return None;
        }

        let area = signed_area_3d(&kept, &self.normal);
        let needs_reverse = match self.winding {
            Winding::CounterClockwise => area < 0.0,
            Winding::Clockwise => area > 0.0,
        };

        let mut points = kept;
        if needs_reverse {
            // Reverse orientation but keep the starting vertex in place.
            points[1..].reverse();
        }

        Some(BoundaryLoop { points })
    }
}

/// Removes consecutive duplicate vertices, including the wrap-around pair.
fn dedupe_closed(points: &[Point3]) -> Vec<Point3> {
    let mut result: Vec<Point3> = Vec::with_capacity(points.len());
    for pt in points {
        if let Some(last) = result.last() {
            if (pt - last).norm() < DEDUPE_TOLERANCE {
                continue;
            }
        }
        result.push(*pt);
    }
    while result.len() > 1 {
        let first = result[0];
        let Some(last) = result.last() else { break };
        if (first - last).norm() < DEDUPE_TOLERANCE {
            result.pop();
        } else {
            break;
        }
    }
    result
}

/// Drops vertices whose incoming and outgoing directions are near-parallel.
fn drop_straight_vertices(points: &[Point3]) -> Vec<Point3> {
    let n = points.len();
    let mut kept = Vec::with_capacity(n);
    for i in 0..n {
        let prev = &points[(i + n - 1) % n];
        let curr = &points[i];
        let next = &points[(i + 1) % n];

        let Some(incoming) = unit(&(curr - prev)) else {
            continue;
        };
        let Some(outgoing) = unit(&(next - curr)) else {
            continue;
        };

        if incoming.dot(&outgoing).abs() <= COLLINEAR_DOT {
            kept.push(*curr);
        }
    }
    kept
}

fn unit(v: &Vector3) -> Option<Vector3> {
    let len = v.norm();
    if len < TOLERANCE {
        return None;
    }
    Some(v / len)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_3d::polygon_area_3d;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn z_up() -> Vector3 {
        Vector3::new(0.0, 0.0, 1.0)
    }

    fn square() -> Vec<Point3> {
        vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn clean_square_is_unchanged() {
        let result = LoopClean::new(square(), z_up(), Winding::CounterClockwise)
            .execute()
            .unwrap();
        assert_eq!(result.points().len(), 4);
        assert!((polygon_area_3d(result.points(), &z_up()) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn duplicate_vertex_is_removed() {
        let mut pts = square();
        pts.insert(1, p(1.0, 0.0, 0.0));
        let result = LoopClean::new(pts, z_up(), Winding::CounterClockwise)
            .execute()
            .unwrap();
        assert_eq!(result.points().len(), 4);
    }

    #[test]
    fn wraparound_duplicate_is_removed() {
        let mut pts = square();
        pts.push(p(0.0, 0.0, 0.0));
        let result = LoopClean::new(pts, z_up(), Winding::CounterClockwise)
            .execute()
            .unwrap();
        assert_eq!(result.points().len(), 4);
    }

    #[test]
    fn collinear_vertex_is_removed() {
        let pts = vec![
            p(0.0, 0.0, 0.0),
            p(0.5, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ];
        let result = LoopClean::new(pts, z_up(), Winding::CounterClockwise)
            .execute()
            .unwrap();
        assert_eq!(result.points().len(), 4);
    }

    #[test]
    fn hairpin_spike_is_removed() {
        let pts = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ];
        let result = LoopClean::new(pts, z_up(), Winding::CounterClockwise)
            .execute()
            .unwrap();
        // The excursion to (2, 0) and back collapses.
        assert!((polygon_area_3d(result.points(), &z_up()) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn sliver_collapses_to_none() {
        let pts = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)];
        assert!(LoopClean::new(pts, z_up(), Winding::CounterClockwise)
            .execute()
            .is_none());
    }

    #[test]
    fn tiny_loop_collapses_to_none() {
        let pts = vec![
            p(0.0, 0.0, 0.0),
            p(1e-8, 0.0, 0.0),
            p(1e-8, 1e-8, 0.0),
        ];
        assert!(LoopClean::new(pts, z_up(), Winding::CounterClockwise)
            .execute()
            .is_none());
    }

    #[test]
    fn winding_is_fixed_without_moving_the_start() {
        let cw: Vec<Point3> = square().into_iter().rev().collect();
        let start = cw[0];
        let result = LoopClean::new(cw, z_up(), Winding::CounterClockwise)
            .execute()
            .unwrap();
        assert!(signed_area_3d(result.points(), &z_up()) > 0.0);
        assert!((result.points()[0] - start).norm() < TOLERANCE);
    }

    #[test]
    fn clockwise_target_reverses_ccw_input() {
        let result = LoopClean::new(square(), z_up(), Winding::Clockwise)
            .execute()
            .unwrap();
        assert!(signed_area_3d(result.points(), &z_up()) < 0.0);
    }

    #[test]
    fn segments_wrap_around() {
        let result = LoopClean::new(square(), z_up(), Winding::CounterClockwise)
            .execute()
            .unwrap();
        let segments: Vec<_> = result.segments().collect();
        assert_eq!(segments.len(), 4);
        let (last_start, last_end) = segments[3];
        assert!((last_end - result.points()[0]).norm() < TOLERANCE);
        assert!((last_start - result.points()[3]).norm() < TOLERANCE);
    }
}
