use super::{Point3, Vector3};

/// Computes the signed area of a planar 3D polygon with respect to a normal.
///
/// Uses the cross-product summation method projected along `normal`.
/// Positive when the polygon winds counter-clockwise as seen from the side
/// the normal points toward.
#[must_use]
pub fn signed_area_3d(points: &[Point3], normal: &Vector3) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let n = points.len();
    let mut cross_sum = Vector3::new(0.0, 0.0, 0.0);
    let o = &points[0];
    for i in 1..n {
        let a = points[i] - o;
        let b = points[(i + 1) % n] - o;
        cross_sum += a.cross(&b);
    }
    0.5 * cross_sum.dot(normal)
}

/// Computes the (unsigned) area of a planar 3D polygon.
#[must_use]
pub fn polygon_area_3d(points: &[Point3], normal: &Vector3) -> f64 {
    signed_area_3d(points, normal).abs()
}
