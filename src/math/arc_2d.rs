//! 2D arc angle math.
//!
//! Arcs are described by `(center, radius, start_angle, sweep)` where a
//! positive `sweep` runs counter-clockwise.

use std::f64::consts::{PI, TAU};

use super::{Point2, Vector2, TOLERANCE};

/// Normalizes an angle to `[0, 2pi)`.
#[must_use]
pub fn normalize_angle(a: f64) -> f64 {
    let r = a % TAU;
    if r < 0.0 {
        r + TAU
    } else {
        r
    }
}

/// Normalizes an angle to `(-pi, pi]`.
#[must_use]
pub fn normalize_angle_pi(a: f64) -> f64 {
    let r = normalize_angle(a);
    if r > PI {
        r - TAU
    } else {
        r
    }
}

/// Angular offset of `angle` from `start_angle`, measured in the sweep
/// direction.
///
/// The result is not clamped: it lies in `(|sweep|/2 - pi, |sweep|/2 + pi]`,
/// i.e. angles outside the arc map to negative values (before the start) or
/// values beyond `|sweep|` (past the end), whichever side is closer.
#[must_use]
pub fn sweep_offset(angle: f64, start_angle: f64, sweep: f64) -> f64 {
    let sign = sweep.signum();
    let half = sweep.abs() * 0.5;
    let mid = start_angle + sweep * 0.5;
    half + sign * normalize_angle_pi(angle - mid)
}

/// Converts an absolute angle to an arc parameter in `[0, 1]`.
///
/// Returns `None` if the angle is not within the arc's angular range
/// (widened by `eps` radians at both ends).
#[must_use]
pub fn angle_to_arc_param(angle: f64, start_angle: f64, sweep: f64, eps: f64) -> Option<f64> {
    if sweep.abs() < TOLERANCE {
        return None;
    }
    let delta = sweep_offset(angle, start_angle, sweep);
    if delta >= -eps && delta <= sweep.abs() + eps {
        Some((delta / sweep.abs()).clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Evaluates a point on a circle at the given absolute angle.
#[must_use]
pub fn circle_point(center: &Point2, radius: f64, angle: f64) -> Point2 {
    Point2::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Unit tangent at the given absolute angle, pointing in the sweep direction.
#[must_use]
pub fn circle_tangent(angle: f64, sweep: f64) -> Vector2 {
    let sign = if sweep >= 0.0 { 1.0 } else { -1.0 };
    Vector2::new(-sign * angle.sin(), sign * angle.cos())
}

/// Converts a bulge-defined arc segment to center-radius-angle form.
///
/// Bulge convention: `bulge = tan(sweep / 4)`, positive is counter-clockwise.
/// Returns `None` for a zero-length chord or a zero bulge.
#[must_use]
pub fn arc_from_bulge(p0: &Point2, p1: &Point2, bulge: f64) -> Option<(Point2, f64, f64, f64)> {
    let chord = p1 - p0;
    let chord_len = chord.norm();
    if chord_len < TOLERANCE || bulge.abs() < TOLERANCE {
        return None;
    }

    // Signed distance from the chord midpoint to the center, along the
    // chord's left normal.
    let sagitta_ratio = (1.0 - bulge * bulge) / (2.0 * bulge);
    let mid = p0 + chord * 0.5;
    let normal = Vector2::new(-chord.y, chord.x) / chord_len;
    let center = mid + normal * (sagitta_ratio * chord_len * 0.5);

    let radius = (chord_len * 0.5) * (1.0 + bulge * bulge) / (2.0 * bulge.abs());
    let start_angle = (p0.y - center.y).atan2(p0.x - center.x);
    let sweep = 4.0 * bulge.atan();

    Some((center, radius, start_angle, sweep))
}
