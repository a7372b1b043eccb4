use crate::geometry::curve::{Curve, Curve2d};
use crate::math::{perp, signed_angle, Vector2};

use super::joint_type::AngleType;

/// Classifies the turn from `from` into `to` at their shared point.
///
/// The turn is measured between the end tangent of `from` and the start
/// tangent of `to`, so arcs are judged by their derivative rather than their
/// chord. A left turn is `Convex`, a right turn `NonConvex`, and a turn
/// within `tol` radians of straight is `Tangent`.
#[must_use]
pub fn is_convex(from: &Curve2d, to: &Curve2d, tol: f64) -> AngleType {
    let turn = signed_angle(&from.end_tangent(), &to.start_tangent());
    if turn.abs() <= tol {
        AngleType::Tangent
    } else if turn > 0.0 {
        AngleType::Convex
    } else {
        AngleType::NonConvex
    }
}

/// Returns the upright (normal) direction at one end of `curve`.
///
/// The outward travel direction at the endpoint, `-start_tangent` at the
/// start or `end_tangent` at the end, rotated +90 degrees. It depends only
/// on the endpoint, so `(c, true)` and `(c.reversed(), false)` agree.
#[must_use]
pub fn get_endpoint_der_upright(curve: &Curve2d, is_start: bool) -> Vector2 {
    let outward = if is_start {
        -curve.start_tangent()
    } else {
        curve.end_tangent()
    };
    perp(&outward)
}
