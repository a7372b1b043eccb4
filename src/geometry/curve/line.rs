use crate::error::{GeometryError, Result};
use crate::math::{cross, perp, Point2, Vector2, TOLERANCE};

use super::{Curve, CurveDomain};

/// A 2D line segment parameterized by arc length.
///
/// The parametric form is `P(t) = start + t * direction` for `t` in
/// `[0, length]`. Evaluation outside that range extrapolates along the
/// supporting line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2d {
    start: Point2,
    end: Point2,
}

impl Line2d {
    /// Creates a new segment between two points.
    ///
    /// # Errors
    ///
    /// Returns an error if the two points coincide.
    pub fn new(start: Point2, end: Point2) -> Result<Self> {
        if (end - start).norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self { start, end })
    }

    /// Returns the unit direction of the segment.
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        let d = self.end - self.start;
        let len = d.norm();
        if len < TOLERANCE {
            Vector2::new(1.0, 0.0)
        } else {
            d / len
        }
    }

    /// Returns the segment with start and end swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    /// Returns the parallel segment shifted `distance` to the left of travel.
    #[must_use]
    pub fn offset(&self, distance: f64) -> Self {
        let shift = perp(&self.direction()) * distance;
        Self {
            start: self.start + shift,
            end: self.end + shift,
        }
    }

    /// Returns the piece of the supporting line between parameters `t0 < t1`.
    ///
    /// The parameters may lie outside `[0, length]`. Returns `None` when the
    /// piece would be shorter than [`TOLERANCE`].
    #[must_use]
    pub fn sub_curve(&self, t0: f64, t1: f64) -> Option<Self> {
        if t1 - t0 < TOLERANCE {
            return None;
        }
        Some(Self {
            start: self.point_at(t0),
            end: self.point_at(t1),
        })
    }

    /// Signed distance of `p` from the supporting line, positive on the left.
    #[must_use]
    pub fn side_distance(&self, p: &Point2) -> f64 {
        cross(&self.direction(), &(p - self.start))
    }
}

impl Curve for Line2d {
    fn start_point(&self) -> Point2 {
        self.start
    }

    fn end_point(&self) -> Point2 {
        self.end
    }

    fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    fn point_at(&self, t: f64) -> Point2 {
        self.start + self.direction() * t
    }

    fn tangent_at(&self, _t: f64) -> Vector2 {
        self.direction()
    }

    fn param_at(&self, p: &Point2) -> f64 {
        (p - self.start).dot(&self.direction())
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.length())
    }
}
