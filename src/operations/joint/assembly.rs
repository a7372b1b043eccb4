//! Closed outline assembly for single walls.

use crate::geometry::curve::{Curve, Curve2d};
use crate::math::Point2;
use crate::topology::{EdgeEnd, EdgeInfo, EndJoint};

use super::builder::DEFAULT_LENGTHTOL;
use super::curve_util::points_sort_by_curve;

/// Closed outline of one wall.
///
/// `curves` run counter-clockwise: the from cap, the right side, the to
/// cap, then the left side traversed backwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryInfo {
    /// The outline pieces in loop order.
    pub curves: Vec<Curve2d>,
    /// Index of the first left side piece.
    pub lcurve: usize,
    /// Index of the first right side piece.
    pub rcurve: usize,
}

impl GeometryInfo {
    /// Returns whether every curve ends where the next one starts.
    #[must_use]
    pub fn is_closed(&self, tol: f64) -> bool {
        let n = self.curves.len();
        n > 0
            && (0..n).all(|i| {
                let next = &self.curves[(i + 1) % n];
                (self.curves[i].end_point() - next.start_point()).norm() <= tol
            })
    }
}

/// Square cap across one end of the wall.
fn square_end(end: EdgeEnd, left: &Curve2d, right: &Curve2d) -> EndJoint {
    let (l, r) = match end {
        EdgeEnd::From => (left.start_point(), right.start_point()),
        EdgeEnd::To => (left.end_point(), right.end_point()),
    };
    let (a, b) = match end {
        EdgeEnd::From => (l, r),
        EdgeEnd::To => (r, l),
    };
    EndJoint {
        left: l,
        right: r,
        path: Curve2d::line(a, b).ok().into_iter().collect(),
        left_split: None,
        right_split: None,
    }
}

/// Cuts `side` from `start` to `end`, breaking it at every split strictly
/// inside that range.
///
/// Returns `None` when the range is no longer than `lengthtol`.
fn side_pieces(
    side: &Curve2d,
    start: &Point2,
    end: &Point2,
    splits: &[Point2],
    lengthtol: f64,
) -> Option<Vec<Curve2d>> {
    let t0 = side.param_at(start);
    let t1 = side.param_at(end);
    if t1 - t0 <= lengthtol {
        return None;
    }
    let mut inner: Vec<Point2> = splits
        .iter()
        .filter(|p| {
            let t = side.param_at(p);
            t > t0 + lengthtol && t < t1 - lengthtol
        })
        .copied()
        .collect();
    points_sort_by_curve(side, &mut inner, lengthtol);

    let mut params = vec![t0];
    for p in &inner {
        let t = side.param_at(p);
        if params.last().is_some_and(|last| t - last > lengthtol) {
            params.push(t);
        }
    }
    if params.last().is_some_and(|last| t1 - last <= lengthtol) {
        params.pop();
    }
    params.push(t1);
    params.windows(2).map(|w| side.sub_curve(w[0], w[1])).collect()
}

fn assemble(
    edge: &EdgeInfo,
    from: &EndJoint,
    to: &EndJoint,
    lengthtol: f64,
) -> Option<GeometryInfo> {
    let left = edge.left_side()?;
    let right = edge.right_side()?;
    let splits = |a: Option<Point2>, b: Option<Point2>| a.into_iter().chain(b).collect::<Vec<_>>();

    let right_pieces = side_pieces(
        &right,
        &from.right,
        &to.right,
        &splits(from.right_split, to.right_split),
        lengthtol,
    )?;
    let left_pieces = side_pieces(
        &left,
        &from.left,
        &to.left,
        &splits(from.left_split, to.left_split),
        lengthtol,
    )?;

    let mut curves = from.path.clone();
    let rcurve = curves.len();
    curves.extend(right_pieces);
    curves.extend(to.path.iter().copied());
    let lcurve = curves.len();
    curves.extend(left_pieces.iter().rev().map(Curve2d::reversed));
    Some(GeometryInfo {
        curves,
        lcurve,
        rcurve,
    })
}

/// Assembles the outline of `edge` from its cached joints, using a square
/// cap at any end without one.
pub(crate) fn edge_loop(edge: &EdgeInfo, lengthtol: f64) -> Option<GeometryInfo> {
    let left = edge.left_side()?;
    let right = edge.right_side()?;
    let from = edge
        .from_joint
        .clone()
        .unwrap_or_else(|| square_end(EdgeEnd::From, &left, &right));
    let to = edge
        .to_joint
        .clone()
        .unwrap_or_else(|| square_end(EdgeEnd::To, &left, &right));
    assemble(edge, &from, &to, lengthtol)
}

/// The unjoined outline of `edge`: both sides capped square, cached joints
/// ignored.
///
/// Returns `None` if a side collapses.
#[must_use]
pub fn make_geometry_info(edge: &EdgeInfo) -> Option<GeometryInfo> {
    let left = edge.left_side()?;
    let right = edge.right_side()?;
    let from = square_end(EdgeEnd::From, &left, &right);
    let to = square_end(EdgeEnd::To, &left, &right);
    assemble(edge, &from, &to, DEFAULT_LENGTHTOL)
}

/// The outline around one end of `edge`, following the loop direction: up
/// to `length` of side leading into the cap, the cap itself, and up to
/// `length` of the other side leading away.
///
/// Uses the cached joint at that end, or a square cap. Returns `None` if a
/// side collapses.
#[must_use]
pub fn gen_joint_path(edge: &EdgeInfo, is_from_end: bool, length: f64) -> Option<Vec<Curve2d>> {
    let left = edge.left_side()?;
    let right = edge.right_side()?;
    let end = if is_from_end { EdgeEnd::From } else { EdgeEnd::To };
    let joint = edge
        .joint(end)
        .cloned()
        .unwrap_or_else(|| square_end(end, &left, &right));
    let other = edge
        .joint(end.opposite())
        .cloned()
        .unwrap_or_else(|| square_end(end.opposite(), &left, &right));
    let length = length.max(0.0);

    let (lead_side, lead_at, lead_limit, trail_side, trail_at, trail_limit) = match end {
        EdgeEnd::From => (&left, joint.left, other.left, &right, joint.right, other.right),
        EdgeEnd::To => (&right, joint.right, other.right, &left, joint.left, other.left),
    };

    let mut path = Vec::new();
    // The piece leading into the cap, clamped to what the side offers.
    let t = lead_side.param_at(&lead_at);
    let limit = lead_side.param_at(&lead_limit);
    let lead = match end {
        EdgeEnd::From => lead_side
            .sub_curve(t, (t + length).min(limit))
            .map(|c| c.reversed()),
        EdgeEnd::To => lead_side.sub_curve((t - length).max(limit), t),
    };
    path.extend(lead);
    path.extend(joint.path.iter().copied());

    let t = trail_side.param_at(&trail_at);
    let limit = trail_side.param_at(&trail_limit);
    let trail = match end {
        EdgeEnd::From => trail_side.sub_curve(t, (t + length).min(limit)),
        EdgeEnd::To => trail_side
            .sub_curve((t - length).max(limit), t)
            .map(|c| c.reversed()),
    };
    path.extend(trail);
    Some(path)
}

/// Outline of a free-standing wall of `width` centered on `curve`.
///
/// Returns `None` for a negative width or a collapsed side.
#[must_use]
pub fn gen_wall_geometry_path(curve: Curve2d, width: f64) -> Option<GeometryInfo> {
    EdgeInfo::with_width(curve, width)
        .ok()
        .and_then(|edge| make_geometry_info(&edge))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    /// Twice the signed area of the polygon through the curve starts.
    fn chord_area2(info: &GeometryInfo) -> f64 {
        let n = info.curves.len();
        (0..n)
            .map(|i| {
                let a = info.curves[i].start_point();
                let b = info.curves[(i + 1) % n].start_point();
                a.x * b.y - b.x * a.y
            })
            .sum()
    }

    fn straight() -> EdgeInfo {
        EdgeInfo::with_width(Curve2d::line(p(0.0, 0.0), p(2.0, 0.0)).unwrap(), 0.2).unwrap()
    }

    #[test]
    fn unjoined_wall_is_ccw_rectangle() {
        let info = make_geometry_info(&straight()).unwrap();
        assert_eq!(info.curves.len(), 4);
        assert_eq!(info.rcurve, 1);
        assert_eq!(info.lcurve, 3);
        assert!(info.is_closed(1e-12));
        assert!(chord_area2(&info) > 0.0);
        assert_relative_eq!(info.curves[0].start_point(), p(0.0, 0.1), epsilon = 1e-12);
        assert_relative_eq!(info.curves[1].end_point(), p(2.0, -0.1), epsilon = 1e-12);
    }

    #[test]
    fn splits_break_sides() {
        let mut edge = straight();
        edge.from_joint = Some(EndJoint {
            left: p(-0.1, 0.1),
            right: p(-0.1, -0.1),
            path: vec![Curve2d::line(p(-0.1, 0.1), p(-0.1, -0.1)).unwrap()],
            left_split: Some(p(0.1, 0.1)),
            right_split: None,
        });
        let info = edge_loop(&edge, 1e-6).unwrap();
        assert!(info.is_closed(1e-9));
        // cap, right, cap, two left pieces
        assert_eq!(info.curves.len(), 5);
        assert_relative_eq!(info.curves[3].end_point(), p(0.1, 0.1), epsilon = 1e-12);
        assert_relative_eq!(info.curves[4].end_point(), p(-0.1, 0.1), epsilon = 1e-12);
    }

    #[test]
    fn split_at_end_point_is_ignored() {
        let mut edge = straight();
        edge.to_joint = Some(EndJoint {
            left: p(2.0, 0.1),
            right: p(2.0, -0.1),
            path: vec![Curve2d::line(p(2.0, -0.1), p(2.0, 0.1)).unwrap()],
            left_split: None,
            right_split: Some(p(2.0, -0.1)),
        });
        assert_eq!(edge_loop(&edge, 1e-6).unwrap().curves.len(), 4);
    }

    #[test]
    fn crossed_ends_collapse() {
        let mut edge = straight();
        edge.from_joint = Some(EndJoint {
            left: p(2.5, 0.1),
            right: p(0.0, -0.1),
            path: Vec::new(),
            left_split: None,
            right_split: None,
        });
        assert!(edge_loop(&edge, 1e-6).is_none());
    }

    #[test]
    fn joint_path_at_from_end() {
        let path = gen_joint_path(&straight(), true, 0.24).unwrap();
        assert_eq!(path.len(), 3);
        assert_relative_eq!(path[0].start_point(), p(0.24, 0.1), epsilon = 1e-12);
        assert_relative_eq!(path[0].end_point(), p(0.0, 0.1), epsilon = 1e-12);
        assert_relative_eq!(path[1].end_point(), p(0.0, -0.1), epsilon = 1e-12);
        assert_relative_eq!(path[2].end_point(), p(0.24, -0.1), epsilon = 1e-12);
    }

    #[test]
    fn joint_path_at_to_end_is_clamped() {
        let path = gen_joint_path(&straight(), false, 5.0).unwrap();
        assert_eq!(path.len(), 3);
        assert_relative_eq!(path[0].start_point(), p(0.0, -0.1), epsilon = 1e-12);
        assert_relative_eq!(path[0].end_point(), p(2.0, -0.1), epsilon = 1e-12);
        assert_relative_eq!(path[2].end_point(), p(0.0, 0.1), epsilon = 1e-12);
    }

    #[test]
    fn arc_wall_outline() {
        let arc = Curve2d::arc(p(0.0, 0.0), 1.0, 0.0, FRAC_PI_2).unwrap();
        let info = gen_wall_geometry_path(arc, 0.2).unwrap();
        assert_eq!(info.curves.len(), 4);
        assert!(info.is_closed(1e-9));
        assert!(chord_area2(&info) > 0.0);
        assert!(info.curves[info.rcurve].is_arc());

        let tight = Curve2d::arc(p(0.0, 0.0), 0.05, 0.0, FRAC_PI_2).unwrap();
        assert!(gen_wall_geometry_path(tight, 0.2).is_none());
        assert!(gen_wall_geometry_path(arc, -1.0).is_none());
    }
}
