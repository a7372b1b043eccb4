use crate::error::Result;
use crate::geometry::curve::{Curve, Curve2d};
use crate::math::arc_2d::normalize_angle;
use crate::math::{polar_angle, Point2, Vector2};
use crate::topology::{EdgeEnd, EdgeInfo, EdgeLink, VertexId, WallGraph};

/// One edge end at a vertex, seen from the vertex.
///
/// `curve` is the edge's center curve oriented to leave the vertex, and
/// `left`/`right` are its sides in that frame. At a to end the edge's
/// right side becomes the arm's left side.
#[derive(Debug, Clone)]
pub(crate) struct Arm<'a> {
    pub link: EdgeLink,
    pub edge: &'a EdgeInfo,
    pub curve: Curve2d,
    pub left: Curve2d,
    pub right: Curve2d,
    /// Polar angle of the outgoing tangent.
    pub angle: f64,
}

impl<'a> Arm<'a> {
    /// Returns `None` when one of the edge's sides collapses.
    pub fn new(link: EdgeLink, edge: &'a EdgeInfo) -> Option<Self> {
        let (left, right) = (edge.left_side()?, edge.right_side()?);
        let (curve, left, right) = match link.end {
            EdgeEnd::From => (edge.curve, left, right),
            EdgeEnd::To => (edge.curve.reversed(), right.reversed(), left.reversed()),
        };
        Some(Self {
            link,
            edge,
            curve,
            left,
            right,
            angle: polar_angle(&curve.start_tangent()),
        })
    }

    pub fn vertex(&self) -> Point2 {
        self.curve.start_point()
    }

    pub fn direction(&self) -> Vector2 {
        self.curve.start_tangent()
    }
}

/// Collects the arms of `vertex` in counter-clockwise order, starting with
/// link 0.
///
/// Returns `Ok(None)` if any incident edge has a collapsed side.
pub(crate) fn collect_arms(graph: &WallGraph, vertex: VertexId) -> Result<Option<Vec<Arm<'_>>>> {
    let info = graph.vertex(vertex)?;
    let mut arms = Vec::with_capacity(info.links.len());
    for link in &info.links {
        let edge = graph.edge(link.edge)?;
        match Arm::new(*link, edge) {
            Some(arm) => arms.push(arm),
            None => return Ok(None),
        }
    }
    if let Some(first) = arms.first().map(|a| a.angle) {
        // Stable sort keeps link 0 in front of any arm sharing its angle.
        arms.sort_by(|a, b| {
            normalize_angle(a.angle - first).total_cmp(&normalize_angle(b.angle - first))
        });
    }
    Ok(Some(arms))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::joint::JointSet;
    use crate::topology::{EdgeId, VertexInfo};
    use approx::assert_relative_eq;

    #[test]
    fn to_end_swaps_sides() {
        let curve = Curve2d::line(Point2::new(-1.0, 0.0), Point2::new(0.0, 0.0)).unwrap();
        let edge = EdgeInfo::new(curve, 0.1, 0.3).unwrap();
        let arm = Arm::new(
            EdgeLink {
                edge: EdgeId::default(),
                end: EdgeEnd::To,
            },
            &edge,
        )
        .unwrap();
        assert_relative_eq!(arm.vertex(), Point2::origin(), epsilon = 1e-12);
        assert_relative_eq!(arm.direction(), Vector2::new(-1.0, 0.0), epsilon = 1e-12);
        // Travelling -x, the left is -y: the edge's right side.
        assert_relative_eq!(arm.left.start_point(), Point2::new(0.0, -0.3), epsilon = 1e-12);
        assert_relative_eq!(arm.right.start_point(), Point2::new(0.0, 0.1), epsilon = 1e-12);
    }

    #[test]
    fn arms_sorted_ccw_from_first_link() {
        let mut graph = WallGraph::new();
        let v = graph.add_vertex(VertexInfo::new(JointSet::EMPTY));
        for (x, y) in [(0.0, -1.0), (1.0, 0.0), (-1.0, 0.0)] {
            let c = Curve2d::line(Point2::origin(), Point2::new(x, y)).unwrap();
            let e = graph.add_edge(EdgeInfo::with_width(c, 0.2).unwrap());
            graph.connect(v, e, EdgeEnd::From).unwrap();
        }
        let arms = collect_arms(&graph, v).unwrap().unwrap();
        let dirs: Vec<_> = arms.iter().map(Arm::direction).collect();
        assert_relative_eq!(dirs[0], Vector2::new(0.0, -1.0), epsilon = 1e-12);
        assert_relative_eq!(dirs[1], Vector2::new(1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(dirs[2], Vector2::new(-1.0, 0.0), epsilon = 1e-12);
    }
}
