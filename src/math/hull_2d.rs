use super::{Point2, TOLERANCE};

/// 2D cross product of `(a - o)` and `(b - o)`.
#[inline]
fn cross(o: &Point2, a: &Point2, b: &Point2) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Computes the convex hull of a 2D point set (monotone chain).
///
/// Points are sorted lexicographically by (x, y); the lower and upper chains
/// discard the second-to-last point while the last three do not make a
/// strictly counter-clockwise turn. The hull is returned counter-clockwise
/// with no repeated endpoint.
///
/// Fewer than 3 distinct input points, or an all-collinear set, yield a hull
/// of fewer than 3 vertices — callers must treat that as "no usable region".
#[must_use]
pub fn convex_hull(points: &[Point2]) -> Vec<Point2> {
    let mut sorted: Vec<Point2> = points.to_vec();
    sorted.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
    });
    sorted.dedup_by(|a, b| (a.x - b.x).abs() < TOLERANCE && (a.y - b.y).abs() < TOLERANCE);

    let n = sorted.len();
    if n < 3 {
        return sorted;
    }

    let mut hull: Vec<Point2> = Vec::with_capacity(n * 2);

    // Lower chain.
    for pt in &sorted {
        while hull.len() >= 2 && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], pt) <= 0.0 {
            hull.pop();
        }
        hull.push(*pt);
    }

    // Upper chain. Pops must not consume the lower chain.
    let lower_len = hull.len() + 1;
    for pt in sorted.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], pt) <= 0.0
        {
            hull.pop();
        }
        hull.push(*pt);
    }

    // The upper chain re-appends the starting vertex.
    hull.pop();
    hull
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::{signed_area_2d, winding_of, Winding};

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn contains(hull: &[Point2], pt: &Point2) -> bool {
        hull.iter()
            .any(|h| (h.x - pt.x).abs() < TOLERANCE && (h.y - pt.y).abs() < TOLERANCE)
    }

    #[test]
    fn square_with_interior_point() {
        let pts = vec![
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 2.0),
            p(0.0, 2.0),
            p(1.0, 1.0),
        ];
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 4);
        assert!(!contains(&hull, &p(1.0, 1.0)));
        assert_eq!(winding_of(&hull), Winding::CounterClockwise);
        assert!((signed_area_2d(&hull) - 4.0).abs() < TOLERANCE);
    }

    #[test]
    fn hull_vertices_are_input_subset() {
        let pts = vec![
            p(0.0, 0.0),
            p(3.0, 1.0),
            p(1.0, 2.0),
            p(2.0, 4.0),
            p(-1.0, 2.0),
            p(1.0, 1.0),
        ];
        let hull = convex_hull(&pts);
        for h in &hull {
            assert!(contains(&pts, h));
        }
    }

    #[test]
    fn convex_input_is_unchanged_up_to_rotation() {
        let pts = vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 3.0), p(0.0, 3.0)];
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 4);
        for pt in &pts {
            assert!(contains(&hull, pt));
        }
    }

    #[test]
    fn duplicate_points_collapse() {
        let pts = vec![
            p(0.0, 0.0),
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(1.0, 0.0),
            p(0.5, 1.0),
        ];
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 3);
    }

    #[test]
    fn collinear_points_are_degenerate() {
        let pts = vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0)];
        let hull = convex_hull(&pts);
        assert!(hull.len() < 3);
    }

    #[test]
    fn fewer_than_three_points() {
        assert!(convex_hull(&[]).is_empty());
        assert_eq!(convex_hull(&[p(1.0, 1.0)]).len(), 1);
        assert_eq!(convex_hull(&[p(0.0, 0.0), p(1.0, 1.0)]).len(), 2);
    }

    #[test]
    fn starts_at_lexicographic_minimum() {
        let pts = vec![p(2.0, 2.0), p(0.0, 1.0), p(1.0, 0.0), p(2.0, 0.0)];
        let hull = convex_hull(&pts);
        assert!((hull[0].x).abs() < TOLERANCE);
        assert!((hull[0].y - 1.0).abs() < TOLERANCE);
    }
}
