//! Free-standing curve queries used by the joint builder.

use crate::geometry::curve::{Curve, Curve2d};
use crate::math::intersect_2d::{
    circle_circle_intersect_2d, line_circle_intersect_2d, line_line_intersect_2d,
};
use crate::math::Point2;
use crate::topology::EdgeInfo;

use super::joint_type::PositionType;

/// Tolerance used by [`curve_inter2`], which takes none.
const INTER_TOL: f64 = 1e-9;

/// Membership of a point in an edge's offset band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetRegionHit {
    /// Between both sides and within the edge's length.
    pub inside: bool,
    /// Signed distance from the center curve, positive on the left.
    pub offset: f64,
    /// Which side of the band the point falls on.
    pub position: PositionType,
}

/// Tolerance in arc length for a projection onto `curve`.
fn param_tolerance(curve: &Curve2d, ang_tol: f64, len_tol: f64) -> f64 {
    match curve {
        Curve2d::Line(_) => len_tol,
        Curve2d::Arc(a) => len_tol.max(ang_tol * a.radius()),
    }
}

/// Returns whether `p` projects onto `curve` within its parameter range.
///
/// The projection may overshoot either end by the tolerance; on arcs the
/// angular tolerance is scaled by the radius.
#[must_use]
pub fn reg_check(curve: &Curve2d, p: &Point2, ang_tol: f64, len_tol: f64) -> bool {
    let tol = param_tolerance(curve, ang_tol, len_tol);
    curve.domain().contains(curve.param_at(p), tol)
}

/// Locates `p` relative to the band between `edge`'s two sides.
#[must_use]
pub fn point_inside_offset_region(
    edge: &EdgeInfo,
    p: &Point2,
    ang_tol: f64,
    len_tol: f64,
) -> OffsetRegionHit {
    let offset = edge.curve.side_distance(p);
    let beyond_left = edge
        .left_side()
        .map_or(offset - edge.loffset, |c| c.side_distance(p));
    let beyond_right = edge
        .right_side()
        .map_or(offset + edge.roffset, |c| c.side_distance(p));
    let position = if beyond_left > len_tol {
        PositionType::Left
    } else if beyond_right < -len_tol {
        PositionType::Right
    } else {
        PositionType::In
    };
    OffsetRegionHit {
        inside: position == PositionType::In && reg_check(&edge.curve, p, ang_tol, len_tol),
        offset,
        position,
    }
}

/// Intersects the unbounded carriers (lines and full circles) of two curves.
pub(crate) fn carrier_inter(c1: &Curve2d, c2: &Curve2d, tol: f64) -> Vec<Point2> {
    match (c1, c2) {
        (Curve2d::Line(l1), Curve2d::Line(l2)) => line_line_intersect_2d(
            &l1.start_point(),
            &l1.direction(),
            &l2.start_point(),
            &l2.direction(),
            tol,
        )
        .map(|(t, _)| l1.point_at(t))
        .into_iter()
        .collect(),
        (Curve2d::Line(l), Curve2d::Arc(a)) | (Curve2d::Arc(a), Curve2d::Line(l)) => {
            line_circle_intersect_2d(
                &l.start_point(),
                &l.direction(),
                &a.center(),
                a.radius(),
                tol,
            )
            .into_iter()
            .map(|(p, _)| p)
            .collect()
        }
        (Curve2d::Arc(a1), Curve2d::Arc(a2)) => {
            circle_circle_intersect_2d(&a1.center(), a1.radius(), &a2.center(), a2.radius(), tol)
        }
    }
}

/// Intersects two bounded curves.
///
/// Returns up to two points; a point counts when it projects onto both
/// curves within `tol` of their ranges. Overlapping collinear or concentric
/// curves have no isolated intersection and yield nothing.
#[must_use]
pub fn curve_inter(c1: &Curve2d, c2: &Curve2d, tol: f64) -> Vec<Point2> {
    carrier_inter(c1, c2, tol)
        .into_iter()
        .filter(|p| {
            c1.domain().contains(c1.param_at(p), tol) && c2.domain().contains(c2.param_at(p), tol)
        })
        .collect()
}

/// Intersects two curves and returns the points ordered along each.
///
/// Both vectors hold the same points; the first is sorted by parameter on
/// `c1`, the second by parameter on `c2`.
#[must_use]
pub fn curve_inter2(c1: &Curve2d, c2: &Curve2d) -> (Vec<Point2>, Vec<Point2>) {
    let mut on_first = curve_inter(c1, c2, INTER_TOL);
    let mut on_second = on_first.clone();
    points_sort_by_curve(c1, &mut on_first, INTER_TOL);
    points_sort_by_curve(c2, &mut on_second, INTER_TOL);
    (on_first, on_second)
}

/// Sorts `points` in place by their projected parameter on `curve`.
///
/// Points whose parameters chain together within `tol` count as
/// coincident and keep their input order.
pub fn points_sort_by_curve(curve: &Curve2d, points: &mut [Point2], tol: f64) {
    let mut keyed: Vec<(usize, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, curve.param_at(p)))
        .collect();
    keyed.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut run_start = 0;
    for i in 1..=keyed.len() {
        if i == keyed.len() || keyed[i].1 - keyed[i - 1].1 > tol {
            keyed[run_start..i].sort_by_key(|(idx, _)| *idx);
            run_start = i;
        }
    }

    let original = points.to_vec();
    for (slot, (idx, _)) in points.iter_mut().zip(&keyed) {
        *slot = original[*idx];
    }
}
