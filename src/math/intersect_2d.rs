use super::{cross, Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if the
/// directions are not parallel. `tol` bounds the sine of the angle between
/// the (normalized) directions below which they count as parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
    tol: f64,
) -> Option<(f64, f64)> {
    let len = d1.norm() * d2.norm();
    if len < TOLERANCE {
        return None;
    }
    let c = cross(d1, d2);
    if (c / len).abs() < tol {
        return None;
    }
    let dp = p2 - p1;
    let t = cross(&dp, d2) / c;
    let u = cross(&dp, d1) / c;
    Some((t, u))
}

/// Intersection of the infinite line `p + t * d` with a full circle.
///
/// Returns `(point, t)` pairs ordered by increasing `t`. A tangent line
/// (within `tol` of the radius) yields a single point.
#[must_use]
pub fn line_circle_intersect_2d(
    p: &Point2,
    d: &Vector2,
    center: &Point2,
    radius: f64,
    tol: f64,
) -> Vec<(Point2, f64)> {
    let mut results = Vec::new();
    let a = d.norm_squared();
    if a < TOLERANCE * TOLERANCE || radius < TOLERANCE {
        return results;
    }

    // Foot of the perpendicular from the center onto the line.
    let f = p - center;
    let t_foot = -f.dot(d) / a;
    let foot = p + d * t_foot;
    let dist = (foot - center).norm();

    if dist > radius + tol {
        return results;
    }
    if dist >= radius - tol {
        // Tangent case: single root.
        results.push((foot, t_foot));
        return results;
    }

    let half_chord = (radius * radius - dist * dist).max(0.0).sqrt();
    let dt = half_chord / a.sqrt();
    for t in [t_foot - dt, t_foot + dt] {
        results.push((p + d * t, t));
    }
    results
}

/// Intersection of two full circles.
///
/// Returns zero, one (tangent within `tol`) or two points. Concentric
/// circles yield no points.
#[must_use]
pub fn circle_circle_intersect_2d(
    c1: &Point2,
    r1: f64,
    c2: &Point2,
    r2: f64,
    tol: f64,
) -> Vec<Point2> {
    let mut results = Vec::new();
    if r1 < TOLERANCE || r2 < TOLERANCE {
        return results;
    }

    let delta = c2 - c1;
    let dist_sq = delta.norm_squared();
    let dist = dist_sq.sqrt();
    if dist < TOLERANCE {
        return results;
    }

    let sum = r1 + r2;
    let diff = (r1 - r2).abs();
    if dist > sum + tol || dist < diff - tol {
        return results;
    }

    // Distance from c1 along c1->c2 to the radical line.
    let a = (r1 * r1 - r2 * r2 + dist_sq) / (2.0 * dist);
    let h_sq = r1 * r1 - a * a;
    let axis = delta / dist;
    let mid = c1 + axis * a;

    if h_sq <= tol * tol || dist >= sum - tol || dist <= diff + tol {
        results.push(mid);
        return results;
    }

    let h = h_sq.sqrt();
    let side = Vector2::new(-axis.y, axis.x);
    results.push(mid + side * h);
    results.push(mid - side * h);
    results
}
