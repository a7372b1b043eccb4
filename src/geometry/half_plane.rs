use crate::error::{GeometryError, Result};
use crate::math::{cross, perp, Point2, Vector2, TOLERANCE};

/// One side of an offset boundary.
///
/// The boundary line is `{ p : normal · p = offset }`, running along the
/// unit direction `w`. `normal` is `w` rotated +90 degrees, so the
/// half-plane interior lies to the left of travel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfPlane {
    /// Unit direction of the boundary line.
    pub w: Vector2,
    /// Unit normal, pointing into the half-plane.
    pub normal: Vector2,
    /// Signed distance of the boundary line from the origin along `normal`.
    pub offset: f64,
}

impl HalfPlane {
    /// Creates the half-plane whose boundary passes through `p` along `w`.
    ///
    /// # Errors
    ///
    /// Returns an error if `w` is a zero vector.
    pub fn from_point_dir(p: &Point2, w: &Vector2) -> Result<Self> {
        let len = w.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let w = w / len;
        let normal = perp(&w);
        Ok(Self {
            w,
            normal,
            offset: normal.dot(&p.coords),
        })
    }

    /// Returns whether the two boundaries are parallel within `tol`
    /// (sine of the angle between them).
    #[must_use]
    pub fn parallel(&self, other: &Self, tol: f64) -> bool {
        cross(&self.normal, &other.normal).abs() <= tol
    }

    /// Returns the half-plane shifted a further `distance` along its normal.
    #[must_use]
    pub fn offset(&self, distance: f64) -> Self {
        Self {
            offset: self.offset + distance,
            ..*self
        }
    }

    /// Intersects the two boundary lines.
    ///
    /// Returns `None` when the determinant falls below `tol`.
    #[must_use]
    pub fn intersect(&self, other: &Self, tol: f64) -> Option<Point2> {
        let (n1, n2) = (&self.normal, &other.normal);
        let det = cross(n1, n2);
        if det.abs() < tol {
            return None;
        }
        Some(Point2::new(
            (self.offset * n2.y - other.offset * n1.y) / det,
            (n1.x * other.offset - n2.x * self.offset) / det,
        ))
    }

    /// Signed distance from the boundary to `p`, positive inside.
    #[must_use]
    pub fn distance(&self, p: &Point2) -> f64 {
        self.normal.dot(&p.coords) - self.offset
    }

    /// Returns whether `p` lies inside or within `tol` of the boundary.
    #[must_use]
    pub fn contains(&self, p: &Point2, tol: f64) -> bool {
        self.distance(p) >= -tol
    }

    /// A point on the boundary line.
    #[must_use]
    pub fn origin(&self) -> Point2 {
        Point2::from(self.normal * self.offset)
    }

    /// Returns whether both boundaries are the same line (either direction).
    #[must_use]
    pub fn coincident(&self, other: &Self, tol: f64) -> bool {
        self.parallel(other, tol) && self.distance(&other.origin()).abs() <= tol
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn offset_intersection_of_right_angle() {
        // Two center lines meeting at the origin, offset by 0.1 each.
        let h = HalfPlane::from_point_dir(&Point2::origin(), &Vector2::new(1.0, 0.0)).unwrap();
        let v = HalfPlane::from_point_dir(&Point2::origin(), &Vector2::new(0.0, 1.0)).unwrap();
        let p = h.offset(0.1).intersect(&v.offset(0.1), 1e-9).unwrap();
        assert_relative_eq!(p, Point2::new(-0.1, 0.1), epsilon = 1e-12);
        assert_relative_eq!(h.distance(&p), 0.1, epsilon = 1e-12);
        assert_relative_eq!(v.distance(&p), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn parallel_planes_do_not_intersect() {
        let a = HalfPlane::from_point_dir(&Point2::origin(), &Vector2::new(1.0, 0.0)).unwrap();
        let b = a.offset(0.3);
        assert!(a.parallel(&b, 1e-9));
        assert!(a.intersect(&b, 1e-9).is_none());
        assert!(!a.coincident(&b, 1e-9));
    }

    #[test]
    fn reversed_boundary_is_coincident() {
        let a = HalfPlane::from_point_dir(&Point2::new(0.0, 1.0), &Vector2::new(1.0, 0.0)).unwrap();
        let b =
            HalfPlane::from_point_dir(&Point2::new(5.0, 1.0), &Vector2::new(-2.0, 0.0)).unwrap();
        assert!(a.coincident(&b, 1e-9));
    }

    #[test]
    fn contains_left_side() {
        let a = HalfPlane::from_point_dir(&Point2::origin(), &Vector2::new(1.0, 0.0)).unwrap();
        assert!(a.contains(&Point2::new(3.0, 0.5), 0.0));
        assert!(!a.contains(&Point2::new(3.0, -0.5), 1e-9));
    }

    #[test]
    fn zero_direction_rejected() {
        assert!(HalfPlane::from_point_dir(&Point2::origin(), &Vector2::zeros()).is_err());
    }
}
