pub mod arc_2d;
pub mod intersect_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global numeric tolerance for guarding divisions and square roots.
///
/// Geometric decisions use the builder's `angtol`/`lengthtol` instead.
pub const TOLERANCE: f64 = 1e-10;

/// 2D cross product (z component of the 3D cross product).
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Rotates a vector by +90 degrees (counter-clockwise).
#[must_use]
pub fn perp(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// Signed angle from `a` to `b` in `(-pi, pi]`.
#[must_use]
pub fn signed_angle(a: &Vector2, b: &Vector2) -> f64 {
    cross(a, b).atan2(a.dot(b))
}

/// Polar angle of a vector in `(-pi, pi]`.
#[must_use]
pub fn polar_angle(v: &Vector2) -> f64 {
    v.y.atan2(v.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn perp_is_ccw_rotation() {
        let v = perp(&Vector2::new(1.0, 0.0));
        assert!((v.x).abs() < TOLERANCE);
        assert!((v.y - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_angle_left_turn_is_positive() {
        let a = Vector2::new(1.0, 0.0);
        let b = Vector2::new(0.0, 1.0);
        assert!((signed_angle(&a, &b) - FRAC_PI_2).abs() < TOLERANCE);
        assert!((signed_angle(&b, &a) + FRAC_PI_2).abs() < TOLERANCE);
    }

    #[test]
    fn cross_of_parallel_is_zero() {
        let a = Vector2::new(2.0, 1.0);
        assert!(cross(&a, &(a * 3.0)).abs() < TOLERANCE);
    }
}
