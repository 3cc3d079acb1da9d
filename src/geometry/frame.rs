use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3, Vector3, TOLERANCE};

/// An orthonormal 2D coordinate frame embedded in 3D space.
///
/// Defined by an origin point and two orthogonal unit direction vectors
/// (`right`, `up`). The normal is `right × up`. The frame defines the plane
/// a view projects onto and the mapping between world and view-local
/// coordinates.
#[derive(Debug, Clone)]
pub struct ViewFrame {
    origin: Point3,
    right: Vector3,
    up: Vector3,
    normal: Vector3,
}

impl ViewFrame {
    /// Creates a new frame from an origin and two direction vectors.
    ///
    /// The directions are normalized; `up` is re-orthogonalized against
    /// `right` so the basis is orthonormal even for slightly skewed input.
    ///
    /// # Errors
    ///
    /// Returns an error if either direction is zero-length or the two are
    /// parallel (degenerate frame).
    pub fn new(origin: Point3, right: Vector3, up: Vector3) -> Result<Self> {
        let right_len = right.norm();
        if right_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let up_len = up.norm();
        if up_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }

        let right = right / right_len;
        let up = up / up_len;

        let normal = right.cross(&up);
        let normal_len = normal.norm();
        if normal_len < TOLERANCE {
            return Err(GeometryError::Degenerate("frame directions are parallel".into()).into());
        }
        let normal = normal / normal_len;

        // Re-derive up so right/up/normal are exactly orthonormal.
        let up = normal.cross(&right);

        Ok(Self {
            origin,
            right,
            up,
            normal,
        })
    }

    /// Creates a frame from an origin and a normal vector.
    ///
    /// The right and up directions are computed automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal vector is zero-length.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Result<Self> {
        let len = normal.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = normal / len;

        // Choose a reference vector not parallel to the normal
        let reference = if normal.x.abs() < 0.9 {
            Vector3::new(1.0, 0.0, 0.0)
        } else {
            Vector3::new(0.0, 1.0, 0.0)
        };

        let right = normal.cross(&reference).normalize();
        let up = normal.cross(&right);

        Ok(Self {
            origin,
            right,
            up,
            normal,
        })
    }

    /// Returns the origin point of the frame.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the right (local X) unit vector.
    #[must_use]
    pub fn right(&self) -> &Vector3 {
        &self.right
    }

    /// Returns the up (local Y) unit vector.
    #[must_use]
    pub fn up(&self) -> &Vector3 {
        &self.up
    }

    /// Returns the plane normal unit vector.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Orthogonally projects a world point onto the frame plane.
    #[must_use]
    pub fn project(&self, point: &Point3) -> Point3 {
        let diff = point - self.origin;
        point - self.normal * diff.dot(&self.normal)
    }

    /// Maps a world point to frame-local 2D coordinates.
    ///
    /// Assumes the point lies on the frame plane; any out-of-plane component
    /// is silently discarded.
    #[must_use]
    pub fn to_local(&self, point: &Point3) -> Point2 {
        let diff = point - self.origin;
        Point2::new(diff.dot(&self.right), diff.dot(&self.up))
    }

    /// Maps frame-local 2D coordinates back to a world point on the plane.
    #[must_use]
    pub fn to_world(&self, point: &Point2) -> Point3 {
        self.origin + self.right * point.x + self.up * point.y
    }
}
