use crate::error::{OperationError, Result};
use crate::math::intersect_2d::{line_line_intersect_2d, point_at};
use crate::math::polygon_2d::{left_normal, right_normal, segment_direction, signed_area_2d};
use crate::math::{Point2, TOLERANCE};

/// Offsets a closed 2D polygon by a signed distance with miter joins.
///
/// # Algorithm
///
/// Each edge is translated outward along its own perpendicular; every vertex
/// moves to the intersection of its two adjacent offset edge lines. Where
/// adjacent edges are parallel the intersection degenerates and the midpoint
/// of the two offset anchor points is used instead.
///
/// The miter construction is exact for right-angle corners but overshoots at
/// sharp concave corners; it is a per-vertex offset, not a true buffer.
///
/// # Sign Convention
///
/// Positive distance grows the polygon, negative shrinks it, relative to the
/// polygon's own orientation (see [`signed_area_2d`]).
#[derive(Debug)]
pub struct PolygonOffset2D {
    points: Vec<Point2>,
    distance: f64,
}

impl PolygonOffset2D {
    /// Creates a new polygon offset operation.
    #[must_use]
    pub fn new(points: Vec<Point2>, distance: f64) -> Self {
        Self { points, distance }
    }

    /// Executes the offset operation.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if fewer than 3 distinct
    /// vertices remain after removing consecutive duplicates.
    pub fn execute(&self) -> Result<Vec<Point2>> {
        let pts = dedupe_closed(&self.points);
        let n = pts.len();
        if n < 3 {
            return Err(OperationError::InvalidInput(
                "at least 3 distinct points are required for polygon offset".to_owned(),
            )
            .into());
        }

        if self.distance.abs() < TOLERANCE {
            return Ok(pts);
        }

        let counter_clockwise = signed_area_2d(&pts) > 0.0;

        // Unit direction of each edge i: pts[i] -> pts[i + 1].
        let mut directions = Vec::with_capacity(n);
        for i in 0..n {
            directions.push(segment_direction(&pts[i], &pts[(i + 1) % n])?);
        }

        let mut offset = Vec::with_capacity(n);
        for i in 0..n {
            let prev = (i + n - 1) % n;
            let d0 = directions[prev];
            let d1 = directions[i];

            // Outward side of each edge; a negative distance flips inward.
            let n0 = if counter_clockwise {
                right_normal(d0)
            } else {
                left_normal(d0)
            };
            let n1 = if counter_clockwise {
                right_normal(d1)
            } else {
                left_normal(d1)
            };

            let a0 = pts[i] + n0 * self.distance;
            let a1 = pts[i] + n1 * self.distance;

            let vertex = match line_line_intersect_2d(&a0, &d0, &a1, &d1) {
                Some((t, _)) => point_at(&a0, &d0, t),
                // Parallel edges: both anchors lie on the same offset line.
                None => Point2::new((a0.x + a1.x) * 0.5, (a0.y + a1.y) * 0.5),
            };
            offset.push(vertex);
        }

        Ok(offset)
    }
}

/// Removes consecutive duplicate vertices, including the wrap-around pair.
fn dedupe_closed(points: &[Point2]) -> Vec<Point2> {
    let mut result: Vec<Point2> = Vec::with_capacity(points.len());
    for pt in points {
        if let Some(last) = result.last() {
            if (pt - last).norm() < TOLERANCE {
                continue;
            }
        }
        result.push(*pt);
    }
    while result.len() > 1 {
        let first = result[0];
        let Some(last) = result.last() else { break };
        if (first - last).norm() < TOLERANCE {
            result.pop();
        } else {
            break;
        }
    }
    result
}
