mod arc;
mod line;

pub use arc::Arc2d;
pub use line::Line2d;

use crate::error::Result;
use crate::math::{Point2, Vector2};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Returns whether `t` lies in the domain widened by `eps` at both ends.
    #[must_use]
    pub fn contains(&self, t: f64, eps: f64) -> bool {
        t >= self.t_min - eps && t <= self.t_max + eps
    }

    /// Clamps `t` into the domain.
    #[must_use]
    pub fn clamp(&self, t: f64) -> f64 {
        t.clamp(self.t_min, self.t_max)
    }
}

/// Trait for arc-length parameterized curves in the plane.
///
/// Evaluation is total: parameters outside the domain extrapolate along
/// the supporting line or circle.
pub trait Curve {
    /// Returns the first point of the curve.
    fn start_point(&self) -> Point2;

    /// Returns the last point of the curve.
    fn end_point(&self) -> Point2;

    /// Returns the arc length of the curve.
    fn length(&self) -> f64;

    /// Evaluates the curve at arc length `t` from the start.
    fn point_at(&self, t: f64) -> Point2;

    /// Returns the unit tangent at `t`, pointing in the direction of travel.
    fn tangent_at(&self, t: f64) -> Vector2;

    /// Projects `p` onto the supporting line or circle and returns its
    /// parameter. The result is not clamped to the domain.
    fn param_at(&self, p: &Point2) -> f64;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Unit tangent at the start point.
    fn start_tangent(&self) -> Vector2 {
        self.tangent_at(0.0)
    }

    /// Unit tangent at the end point.
    fn end_tangent(&self) -> Vector2 {
        self.tangent_at(self.length())
    }
}

/// The center curve of a wall, or any piece derived from one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve2d {
    /// A straight segment.
    Line(Line2d),
    /// A circular arc.
    Arc(Arc2d),
}

impl Curve2d {
    /// Creates a straight curve between two points.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn line(start: Point2, end: Point2) -> Result<Self> {
        Line2d::new(start, end).map(Self::Line)
    }

    /// Creates an arc from its center, radius, start angle and signed sweep.
    ///
    /// # Errors
    ///
    /// Returns an error for a degenerate radius or sweep.
    pub fn arc(center: Point2, radius: f64, start_angle: f64, sweep: f64) -> Result<Self> {
        Arc2d::new(center, radius, start_angle, sweep).map(Self::Arc)
    }

    /// Returns whether this is an arc.
    #[must_use]
    pub fn is_arc(&self) -> bool {
        matches!(self, Self::Arc(_))
    }

    /// Returns the arc, if this is one.
    #[must_use]
    pub fn as_arc(&self) -> Option<&Arc2d> {
        match self {
            Self::Arc(a) => Some(a),
            Self::Line(_) => None,
        }
    }

    /// Returns the same curve traversed the other way.
    #[must_use]
    pub fn reversed(&self) -> Self {
        match self {
            Self::Line(l) => Self::Line(l.reversed()),
            Self::Arc(a) => Self::Arc(a.reversed()),
        }
    }

    /// Returns the curve shifted `distance` to the left of travel
    /// (negative shifts right), or `None` if an arc collapses.
    #[must_use]
    pub fn offset(&self, distance: f64) -> Option<Self> {
        match self {
            Self::Line(l) => Some(Self::Line(l.offset(distance))),
            Self::Arc(a) => a.offset(distance).map(Self::Arc),
        }
    }

    /// Returns the piece between parameters `t0 < t1` of the supporting
    /// line or circle.
    #[must_use]
    pub fn sub_curve(&self, t0: f64, t1: f64) -> Option<Self> {
        match self {
            Self::Line(l) => l.sub_curve(t0, t1).map(Self::Line),
            Self::Arc(a) => a.sub_curve(t0, t1).map(Self::Arc),
        }
    }

    /// Returns the curve lengthened by `before` at its start and `after` at
    /// its end. Arcs never wrap a full turn.
    #[must_use]
    pub fn extended(&self, before: f64, after: f64) -> Self {
        match self {
            Self::Line(l) => l
                .sub_curve(-before, l.length() + after)
                .map_or(*self, Self::Line),
            Self::Arc(a) => Self::Arc(a.extended(before, after)),
        }
    }

    /// Signed distance of `p` from the supporting line or circle, positive
    /// on the left of travel.
    #[must_use]
    pub fn side_distance(&self, p: &Point2) -> f64 {
        match self {
            Self::Line(l) => l.side_distance(p),
            Self::Arc(a) => a.side_distance(p),
        }
    }

    /// Parameter of the closest point of the bounded curve to `p`.
    #[must_use]
    pub fn nearest_param(&self, p: &Point2) -> f64 {
        self.domain().clamp(self.param_at(p))
    }

    /// Distance from `p` to the bounded curve.
    #[must_use]
    pub fn distance_to(&self, p: &Point2) -> f64 {
        (self.point_at(self.nearest_param(p)) - p).norm()
    }
}

impl Curve for Curve2d {
    fn start_point(&self) -> Point2 {
        match self {
            Self::Line(l) => l.start_point(),
            Self::Arc(a) => a.start_point(),
        }
    }

    fn end_point(&self) -> Point2 {
        match self {
            Self::Line(l) => l.end_point(),
            Self::Arc(a) => a.end_point(),
        }
    }

    fn length(&self) -> f64 {
        match self {
            Self::Line(l) => l.length(),
            Self::Arc(a) => a.length(),
        }
    }

    fn point_at(&self, t: f64) -> Point2 {
        match self {
            Self::Line(l) => l.point_at(t),
            Self::Arc(a) => a.point_at(t),
        }
    }

    fn tangent_at(&self, t: f64) -> Vector2 {
        match self {
            Self::Line(l) => l.tangent_at(t),
            Self::Arc(a) => a.tangent_at(t),
        }
    }

    fn param_at(&self, p: &Point2) -> f64 {
        match self {
            Self::Line(l) => l.param_at(p),
            Self::Arc(a) => a.param_at(p),
        }
    }

    fn domain(&self) -> CurveDomain {
        match self {
            Self::Line(l) => l.domain(),
            Self::Arc(a) => a.domain(),
        }
    }
}

impl From<Line2d> for Curve2d {
    fn from(line: Line2d) -> Self {
        Self::Line(line)
    }
}

impl From<Arc2d> for Curve2d {
    fn from(arc: Arc2d) -> Self {
        Self::Arc(arc)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn extended_line_keeps_direction() {
        let c = Curve2d::line(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)).unwrap();
        let ext = c.extended(0.5, 0.25);
        assert_relative_eq!(ext.start_point(), Point2::new(-0.5, 0.0), epsilon = 1e-12);
        assert_relative_eq!(ext.end_point(), Point2::new(1.25, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn reversed_swaps_endpoints_and_tangents() {
        let c = Curve2d::arc(Point2::origin(), 2.0, 0.0, FRAC_PI_2).unwrap();
        let r = c.reversed();
        assert_relative_eq!(r.start_point(), c.end_point(), epsilon = 1e-12);
        assert_relative_eq!(r.end_point(), c.start_point(), epsilon = 1e-12);
        assert_relative_eq!(r.start_tangent(), -c.end_tangent(), epsilon = 1e-12);
    }

    #[test]
    fn nearest_param_clamps() {
        let c = Curve2d::line(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)).unwrap();
        assert_relative_eq!(c.nearest_param(&Point2::new(2.0, 1.0)), 1.0);
        assert_relative_eq!(c.distance_to(&Point2::new(2.0, 0.0)), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn collapsed_arc_offset_is_none() {
        let c = Curve2d::arc(Point2::origin(), 0.1, 0.0, FRAC_PI_2).unwrap();
        assert!(c.offset(0.2).is_none());
        assert!(c.offset(-0.2).is_some());
    }
}
