use std::f64::consts::PI;

use crate::error::{OperationError, Result};
use crate::geometry::curve::{Curve, Curve2d};
use crate::geometry::HalfPlane;
use crate::math::{signed_angle, Point2, Vector2};
use crate::topology::{EdgeLink, WallGraph};

use super::arm::Arm;
use super::builder::DdBuilder;
use super::curve_util::{carrier_inter, point_inside_offset_region};
use super::joint_type::{JointKind, PositionType};

/// Outcome of intersecting one arm's left side with another arm's right
/// side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointGenerationResult {
    /// The corner point, absent when the sides never meet within reach.
    pub point: Option<Point2>,
    /// `LMiter` for a regular corner, `Tangent` for a crossing and `Null`
    /// when there is no point.
    pub joint: JointKind,
    /// Vector from the vertex to `point`.
    pub offset: Option<Vector2>,
    /// No usable intersection was found.
    pub is_null: bool,
    /// The arms leave in opposite directions and their facing sides are
    /// one line: one wall passes straight through the vertex.
    pub is_cross: bool,
    /// Where `point` lies relative to the first edge's band.
    pub position: PositionType,
}

impl JointGenerationResult {
    fn null() -> Self {
        Self {
            point: None,
            joint: JointKind::Null,
            offset: None,
            is_null: true,
            is_cross: false,
            position: PositionType::In,
        }
    }
}

/// Intersects the offsets of two curves meeting at a joint.
///
/// `from_curve` ends at the joint and `to_curve` starts there; offsets are
/// signed, positive to the left of travel. Two lines are solved as
/// half-planes: parallel and coincident offsets return the shared offset
/// point, parallel distinct offsets return `None`. When an arc is involved
/// the offset carriers (full circles or infinite lines) are intersected and
/// the point nearest the joint is returned.
#[must_use]
pub fn get_move_point(
    from_curve: &Curve2d,
    from_offset: f64,
    to_curve: &Curve2d,
    to_offset: f64,
    tol: f64,
) -> Option<Point2> {
    let joint = from_curve.end_point();
    if let (Curve2d::Line(f), Curve2d::Line(t)) = (from_curve, to_curve) {
        let hf = HalfPlane::from_point_dir(&f.start_point(), &f.direction())
            .ok()?
            .offset(from_offset);
        let ht = HalfPlane::from_point_dir(&t.start_point(), &t.direction())
            .ok()?
            .offset(to_offset);
        if hf.parallel(&ht, tol) {
            return hf
                .coincident(&ht, tol)
                .then(|| joint + hf.normal * from_offset);
        }
        return hf.intersect(&ht, tol);
    }

    let from_side = from_curve.offset(from_offset)?;
    let to_side = to_curve.offset(to_offset)?;
    nearest_to(carrier_inter(&from_side, &to_side, tol).into_iter(), &joint)
}

fn nearest_to(points: impl Iterator<Item = Point2>, target: &Point2) -> Option<Point2> {
    points.min_by(|p, q| (p - target).norm().total_cmp(&(q - target).norm()))
}

/// Whether `p` projects onto `curve` within `reach` beyond its ends.
fn within_reach(curve: &Curve2d, p: &Point2, reach: f64) -> bool {
    curve.domain().contains(curve.param_at(p), reach)
}

impl DdBuilder {
    /// Intersects two curves leaving the same vertex.
    ///
    /// Intersections within both curves' own ranges are preferred; failing
    /// that, both curves are extended by `search_radius` at each end and the
    /// search is repeated. The candidate nearest `vertex` wins.
    #[must_use]
    pub fn sub_gen_joint_info(
        &self,
        curve1: &Curve2d,
        curve2: &Curve2d,
        vertex: &Point2,
        search_radius: f64,
    ) -> Option<Point2> {
        let candidates = carrier_inter(curve1, curve2, self.lengthtol());
        let search = |reach: f64| {
            nearest_to(
                candidates
                    .iter()
                    .copied()
                    .filter(|p| within_reach(curve1, p, reach) && within_reach(curve2, p, reach)),
                vertex,
            )
        };
        search(self.lengthtol()).or_else(|| search(search_radius.max(self.lengthtol())))
    }

    /// Corner between `a`'s left side and `b`'s right side.
    pub(crate) fn arm_corner(
        &self,
        a: &Arm<'_>,
        b: &Arm<'_>,
        search_radius: f64,
    ) -> JointGenerationResult {
        let vertex = a.vertex();
        let opposite = signed_angle(&a.direction(), &b.direction()).abs() >= PI - self.angtol();
        let facing_gap = (a.left.start_point() - b.right.start_point()).norm();

        let (point, is_cross) = if opposite && facing_gap <= self.lengthtol() {
            (Some(a.left.start_point()), true)
        } else {
            (
                self.sub_gen_joint_info(&a.left, &b.right, &vertex, search_radius),
                false,
            )
        };
        let Some(point) = point else {
            return JointGenerationResult::null();
        };

        let hit = point_inside_offset_region(a.edge, &point, self.angtol(), self.lengthtol());
        JointGenerationResult {
            point: Some(point),
            joint: if is_cross {
                JointKind::Tangent
            } else {
                JointKind::LMiter
            },
            offset: Some(point - vertex),
            is_null: false,
            is_cross,
            position: hit.position,
        }
    }

    /// Solves the joint between two edge ends meeting at a vertex.
    ///
    /// The corner is where `link1`'s left side meets `link2`'s right side,
    /// both seen leaving the vertex. See [`JointGenerationResult`] for the
    /// flags.
    ///
    /// # Errors
    ///
    /// Returns an error if either edge is unknown or the two ends do not
    /// share a point.
    pub fn gen_joint_info(
        &self,
        graph: &WallGraph,
        link1: EdgeLink,
        link2: EdgeLink,
        search_radius: f64,
    ) -> Result<JointGenerationResult> {
        let (e1, e2) = (graph.edge(link1.edge)?, graph.edge(link2.edge)?);
        if (e1.end_point(link1.end) - e2.end_point(link2.end)).norm() > self.lengthtol() {
            return Err(OperationError::InvalidInput(
                "edge ends do not meet at a common vertex".to_owned(),
            )
            .into());
        }
        let (Some(a), Some(b)) = (Arm::new(link1, e1), Arm::new(link2, e2)) else {
            return Ok(JointGenerationResult::null());
        };
        Ok(self.arm_corner(&a, &b, search_radius))
    }

    /// Returns only the corner point of [`Self::gen_joint_info`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::gen_joint_info`].
    pub fn gen_joint_point(
        &self,
        graph: &WallGraph,
        link1: EdgeLink,
        link2: EdgeLink,
        search_radius: f64,
    ) -> Result<Option<Point2>> {
        Ok(self.gen_joint_info(graph, link1, link2, search_radius)?.point)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::joint::{JointSet, DEFAULT_SEARCH_RADIUS};
    use crate::topology::{EdgeEnd, EdgeInfo, VertexInfo};
    use approx::assert_relative_eq;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Curve2d {
        Curve2d::line(Point2::new(x0, y0), Point2::new(x1, y1)).unwrap()
    }

    #[test]
    fn move_point_of_right_angle() {
        let from = line(-1.0, 0.0, 0.0, 0.0);
        let to = line(0.0, 0.0, 0.0, 1.0);
        // Right sides of both walls: the outer corner of a left turn.
        let p = get_move_point(&from, -0.1, &to, -0.1, 1e-9).unwrap();
        assert_relative_eq!(p, Point2::new(0.1, -0.1), epsilon = 1e-12);
        // Left sides: the inner corner.
        let q = get_move_point(&from, 0.1, &to, 0.1, 1e-9).unwrap();
        assert_relative_eq!(q, Point2::new(-0.1, 0.1), epsilon = 1e-12);
    }

    #[test]
    fn move_point_of_parallel_lines() {
        let from = line(-1.0, 0.0, 0.0, 0.0);
        let to = line(0.0, 0.0, 1.0, 0.0);
        assert!(get_move_point(&from, 0.1, &to, 0.2, 1e-9).is_none());
        let shared = get_move_point(&from, 0.1, &to, 0.1, 1e-9).unwrap();
        assert_relative_eq!(shared, Point2::new(0.0, 0.1), epsilon = 1e-12);
    }

    #[test]
    fn move_point_with_arc_picks_nearest() {
        // Line ending at (1,0) into a CCW arc of radius 1 about the origin.
        let from = line(1.0, -1.0, 1.0, 0.0);
        let to = Curve2d::arc(Point2::origin(), 1.0, 0.0, 1.0).unwrap();
        let p = get_move_point(&from, 0.1, &to, 0.1, 1e-9).unwrap();
        assert!((p - Point2::new(1.0, 0.0)).norm() < 0.5, "p={p:?}");
        // Both offsets are satisfied.
        assert_relative_eq!(p.x, 0.9, epsilon = 1e-9);
        assert_relative_eq!(p.coords.norm(), 0.9, epsilon = 1e-9);
    }

    fn corner_graph(dirs: &[(f64, f64)]) -> (WallGraph, Vec<EdgeLink>) {
        let mut graph = WallGraph::new();
        let v = graph.add_vertex(VertexInfo::new(JointSet::EMPTY));
        for (x, y) in dirs {
            let c = line(0.0, 0.0, *x, *y);
            let e = graph.add_edge(EdgeInfo::with_width(c, 0.2).unwrap());
            graph.connect(v, e, EdgeEnd::From).unwrap();
        }
        let links = graph.vertex(v).unwrap().links.clone();
        (graph, links)
    }

    #[test]
    fn joint_info_regular_corner() {
        let (graph, links) = corner_graph(&[(1.0, 0.0), (0.0, 1.0)]);
        let b = DdBuilder::default();
        // +x arm's left (y = 0.1) meets +y arm's right (x = 0.1).
        let r = b
            .gen_joint_info(&graph, links[0], links[1], DEFAULT_SEARCH_RADIUS)
            .unwrap();
        assert!(!r.is_null);
        assert!(!r.is_cross);
        assert_eq!(r.joint, JointKind::LMiter);
        assert_relative_eq!(r.point.unwrap(), Point2::new(0.1, 0.1), epsilon = 1e-12);
        assert_relative_eq!(r.offset.unwrap(), Vector2::new(0.1, 0.1), epsilon = 1e-12);
        assert_eq!(r.position, PositionType::In);

        // The reflex side: +y arm's left (x = -0.1) meets +x arm's right
        // (y = -0.1) behind the vertex, found by extension.
        let outer = b
            .gen_joint_point(&graph, links[1], links[0], DEFAULT_SEARCH_RADIUS)
            .unwrap()
            .unwrap();
        assert_relative_eq!(outer, Point2::new(-0.1, -0.1), epsilon = 1e-12);
    }

    #[test]
    fn joint_info_through_wall_is_cross() {
        let (graph, links) = corner_graph(&[(1.0, 0.0), (-1.0, 0.0)]);
        let r = DdBuilder::default()
            .gen_joint_info(&graph, links[0], links[1], DEFAULT_SEARCH_RADIUS)
            .unwrap();
        assert!(r.is_cross);
        assert_eq!(r.joint, JointKind::Tangent);
        assert_relative_eq!(r.point.unwrap(), Point2::new(0.0, 0.1), epsilon = 1e-12);
    }

    #[test]
    fn joint_info_out_of_reach_is_null() {
        // A sliver between two walls: the sides meet about 20 units out.
        let (graph, links) = corner_graph(&[(1.0, 0.0), (1.0, 0.01)]);
        let r = DdBuilder::default()
            .gen_joint_info(&graph, links[0], links[1], 0.5)
            .unwrap();
        assert!(r.is_null);
        assert_eq!(r.joint, JointKind::Null);
        assert!(r.point.is_none());
    }

    #[test]
    fn joint_info_rejects_disjoint_ends() {
        let mut graph = WallGraph::new();
        let a = graph.add_edge(EdgeInfo::with_width(line(0.0, 0.0, 1.0, 0.0), 0.2).unwrap());
        let b = graph.add_edge(EdgeInfo::with_width(line(5.0, 0.0, 6.0, 0.0), 0.2).unwrap());
        let r = DdBuilder::default().gen_joint_info(
            &graph,
            EdgeLink {
                edge: a,
                end: EdgeEnd::From,
            },
            EdgeLink {
                edge: b,
                end: EdgeEnd::From,
            },
            DEFAULT_SEARCH_RADIUS,
        );
        assert!(r.is_err());
    }
}
