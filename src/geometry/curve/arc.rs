use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::arc_2d::{
    arc_from_bulge, circle_point, circle_tangent, normalize_angle, sweep_offset,
};
use crate::math::{cross, Point2, Vector2, TOLERANCE};

use super::{Curve, CurveDomain};

/// Largest sweep an arc may have; a full turn is not a valid wall curve.
const MAX_SWEEP: f64 = TAU - 1e-9;

/// A circular arc in the plane, parameterized by arc length.
///
/// Defined by a center, radius, start angle and signed sweep. A positive
/// sweep runs counter-clockwise. Parameter `t` maps to the angle
/// `start_angle + sign(sweep) * t / radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc2d {
    center: Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
}

impl Arc2d {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive or the sweep is zero
    /// or a full turn.
    pub fn new(center: Point2, radius: f64, start_angle: f64, sweep: f64) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        if sweep.abs() < TOLERANCE || sweep.abs() > MAX_SWEEP {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "sweep",
                value: sweep,
                min: -MAX_SWEEP,
                max: MAX_SWEEP,
            }
            .into());
        }
        Ok(Self {
            center,
            radius,
            start_angle,
            sweep,
        })
    }

    /// Creates the arc through three points, running from `start` via `mid`
    /// to `end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are collinear.
    pub fn from_three_points(start: Point2, mid: Point2, end: Point2) -> Result<Self> {
        let a = mid - start;
        let b = end - start;
        let d = 2.0 * cross(&a, &b);
        if d.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate("arc points are collinear".into()).into());
        }
        let a2 = a.norm_squared();
        let b2 = b.norm_squared();
        let center = start + Vector2::new(b.y * a2 - a.y * b2, a.x * b2 - b.x * a2) / d;
        let radius = (start - center).norm();

        let a0 = (start.y - center.y).atan2(start.x - center.x);
        let a1 = (end.y - center.y).atan2(end.x - center.x);
        let sweep = if cross(&(mid - start), &(end - mid)) > 0.0 {
            normalize_angle(a1 - a0)
        } else {
            -normalize_angle(a0 - a1)
        };
        Self::new(center, radius, a0, sweep)
    }

    /// Creates an arc from its endpoints and bulge (`tan(sweep / 4)`).
    ///
    /// # Errors
    ///
    /// Returns an error for a zero chord or a zero bulge.
    pub fn from_bulge(start: Point2, end: Point2, bulge: f64) -> Result<Self> {
        let (center, radius, start_angle, sweep) = arc_from_bulge(&start, &end, bulge)
            .ok_or_else(|| GeometryError::Degenerate("bulge arc has no extent".into()))?;
        Self::new(center, radius, start_angle, sweep)
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> Point2 {
        self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the start angle in radians.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Returns the signed sweep in radians.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    /// Returns whether the arc runs counter-clockwise.
    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.sweep > 0.0
    }

    fn angle_at(&self, t: f64) -> f64 {
        self.start_angle + self.sweep.signum() * t / self.radius
    }

    /// Returns the same arc traversed the other way.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            center: self.center,
            radius: self.radius,
            start_angle: self.start_angle + self.sweep,
            sweep: -self.sweep,
        }
    }

    /// Returns the concentric arc shifted `distance` to the left of travel.
    ///
    /// The left of a counter-clockwise arc faces its center. Returns `None`
    /// when the offset radius would collapse.
    #[must_use]
    pub fn offset(&self, distance: f64) -> Option<Self> {
        let radius = self.radius - self.sweep.signum() * distance;
        if radius <= TOLERANCE {
            return None;
        }
        Some(Self { radius, ..*self })
    }

    /// Returns the piece of the supporting circle between parameters
    /// `t0 < t1`, which may lie outside `[0, length]`.
    ///
    /// Returns `None` for a piece shorter than [`TOLERANCE`] or one that
    /// would wrap the full circle.
    #[must_use]
    pub fn sub_curve(&self, t0: f64, t1: f64) -> Option<Self> {
        if t1 - t0 < TOLERANCE {
            return None;
        }
        let sweep = self.sweep.signum() * (t1 - t0) / self.radius;
        if sweep.abs() > MAX_SWEEP {
            return None;
        }
        Some(Self {
            start_angle: self.angle_at(t0),
            sweep,
            ..*self
        })
    }

    /// Extends the arc by the given lengths before its start and after its
    /// end, shrinking both proportionally so the result stays below a full
    /// turn.
    #[must_use]
    pub fn extended(&self, before: f64, after: f64) -> Self {
        let available = (MAX_SWEEP - self.sweep.abs() - 1e-6).max(0.0) * self.radius;
        let total = before + after;
        let scale = if total > available && total > TOLERANCE {
            available / total
        } else {
            1.0
        };
        self.sub_curve(-before * scale, self.length() + after * scale)
            .unwrap_or(*self)
    }

    /// Signed distance of `p` from the supporting circle, positive on the
    /// left of travel.
    #[must_use]
    pub fn side_distance(&self, p: &Point2) -> f64 {
        self.sweep.signum() * (self.radius - (p - self.center).norm())
    }
}

impl Curve for Arc2d {
    fn start_point(&self) -> Point2 {
        circle_point(&self.center, self.radius, self.start_angle)
    }

    fn end_point(&self) -> Point2 {
        circle_point(&self.center, self.radius, self.start_angle + self.sweep)
    }

    fn length(&self) -> f64 {
        self.radius * self.sweep.abs()
    }

    fn point_at(&self, t: f64) -> Point2 {
        circle_point(&self.center, self.radius, self.angle_at(t))
    }

    fn tangent_at(&self, t: f64) -> Vector2 {
        circle_tangent(self.angle_at(t), self.sweep)
    }

    fn param_at(&self, p: &Point2) -> f64 {
        let v = p - self.center;
        if v.norm() < TOLERANCE {
            return 0.0;
        }
        let angle = v.y.atan2(v.x);
        sweep_offset(angle, self.start_angle, self.sweep) * self.radius
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.length())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn quarter() -> Arc2d {
        // CCW quarter circle from (1,0) to (0,1).
        Arc2d::new(Point2::origin(), 1.0, 0.0, FRAC_PI_2).unwrap()
    }

    #[test]
    fn endpoints_and_length() {
        let arc = quarter();
        assert_relative_eq!(arc.start_point(), Point2::new(1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(arc.end_point(), Point2::new(0.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(arc.length(), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn tangent_follows_sweep() {
        let arc = quarter();
        assert_relative_eq!(arc.start_tangent(), Vector2::new(0.0, 1.0), epsilon = 1e-12);
        let rev = arc.reversed();
        assert_relative_eq!(rev.start_tangent(), Vector2::new(1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(rev.start_point(), Point2::new(0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn offset_left_of_ccw_shrinks() {
        let arc = quarter();
        assert_relative_eq!(arc.offset(0.25).unwrap().radius(), 0.75, epsilon = 1e-12);
        assert_relative_eq!(arc.offset(-0.25).unwrap().radius(), 1.25, epsilon = 1e-12);
        assert!(arc.offset(1.0).is_none());
        // Clockwise arcs grow when offset to the left.
        assert_relative_eq!(arc.reversed().offset(0.25).unwrap().radius(), 1.25, epsilon = 1e-12);
    }

    #[test]
    fn param_at_round_trips() {
        let arc = quarter();
        let p = arc.point_at(0.3);
        assert_relative_eq!(arc.param_at(&p), 0.3, epsilon = 1e-12);
        // Just before the start maps to a negative parameter.
        let before = Point2::new((-0.1_f64).cos(), (-0.1_f64).sin());
        assert_relative_eq!(arc.param_at(&before), -0.1, epsilon = 1e-12);
    }

    #[test]
    fn three_point_arc_orientation() {
        let ccw = Arc2d::from_three_points(
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.0),
        )
        .unwrap();
        assert!(ccw.is_ccw());
        assert_relative_eq!(ccw.sweep(), PI, epsilon = 1e-12);
        assert_relative_eq!(ccw.center(), Point2::origin(), epsilon = 1e-12);

        let cw = Arc2d::from_three_points(
            Point2::new(-1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 0.0),
        )
        .unwrap();
        assert!(!cw.is_ccw());
        assert_relative_eq!(cw.sweep(), -PI, epsilon = 1e-12);
    }

    #[test]
    fn collinear_points_rejected() {
        let r = Arc2d::from_three_points(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        );
        assert!(r.is_err());
    }

    #[test]
    fn extended_stays_below_full_turn() {
        let arc = Arc2d::new(Point2::origin(), 1.0, 0.0, 3.0 * FRAC_PI_2).unwrap();
        let ext = arc.extended(10.0, 10.0);
        assert!(ext.sweep().abs() < TAU);
        assert!(ext.sweep().abs() > arc.sweep().abs());
    }

    #[test]
    fn side_distance_sign() {
        let arc = quarter();
        // Inside the circle is left of a CCW arc.
        assert!(arc.side_distance(&Point2::new(0.5, 0.5)) > 0.0);
        assert!(arc.reversed().side_distance(&Point2::new(0.5, 0.5)) < 0.0);
    }
}
