use std::f64::consts::{PI, TAU};

use tracing::{debug, warn};

use crate::error::Result;
use crate::geometry::curve::Curve2d;
use crate::math::arc_2d::normalize_angle;
use crate::topology::{EdgeEnd, EdgeInfo, EdgeLink, EndJoint, VertexId, WallGraph};

use super::arm::{collect_arms, Arm};
use super::builder::{DdBuilder, DEFAULT_SEARCH_RADIUS};
use super::constructions::{
    find_through_pair, is_valid, l_butt, l_miter, square, t_joint, x_pointed, x_through,
    ArmJoint, Corners,
};
use super::convexity::is_convex;
use super::joint_point::JointGenerationResult;
use super::joint_type::{AngleType, JointKind, JointSet};

/// One pairwise corner computed while resolving a vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmPair {
    /// Edge end whose left side was intersected.
    pub first: EdgeLink,
    /// Edge end whose right side was intersected.
    pub second: EdgeLink,
    /// The corner found between the two sides.
    pub result: JointGenerationResult,
}

/// The joint a vertex would get, without touching the graph.
#[derive(Debug, Clone)]
pub struct JointResolution {
    /// The realized joint kind.
    pub kind: JointKind,
    /// New cached joint per incident edge end, in the edge frame. `None`
    /// clears the cache (unjoined end). Empty for `DIYJoint`.
    pub ends: Vec<(EdgeLink, Option<EndJoint>)>,
    /// Every pairwise corner computation, in order.
    pub pairs: Vec<ArmPair>,
}

/// Returns whether an edge's geometry can carry a joint.
///
/// An arc fails when its radius is at most half the wall width or when
/// either side would collapse onto the center; lines always pass.
#[must_use]
pub fn validity_check(edge: &EdgeInfo) -> bool {
    match &edge.curve {
        Curve2d::Line(_) => true,
        Curve2d::Arc(arc) => {
            arc.radius() > edge.width * 0.5
                && arc.offset(edge.loffset).is_some()
                && arc.offset(-edge.roffset).is_some()
        }
    }
}

/// Sector swept counter-clockwise from arm `a` to arm `b`.
fn sector(a: &Arm<'_>, b: &Arm<'_>) -> f64 {
    let s = normalize_angle(b.angle - a.angle);
    if s <= 0.0 {
        TAU
    } else {
        s
    }
}

/// Converts an arm-frame joint to the edge frame, turning the cap
/// polyline into line curves.
fn to_end_joint(end: EdgeEnd, joint: ArmJoint, lengthtol: f64) -> EndJoint {
    let path = joint
        .cap
        .windows(2)
        .filter_map(|w| {
            if (w[1] - w[0]).norm() <= lengthtol {
                None
            } else {
                Curve2d::line(w[0], w[1]).ok()
            }
        })
        .collect();
    match end {
        EdgeEnd::From => EndJoint {
            left: joint.left,
            right: joint.right,
            path,
            left_split: joint.left_split,
            right_split: joint.right_split,
        },
        EdgeEnd::To => EndJoint {
            left: joint.right,
            right: joint.left,
            path,
            left_split: joint.right_split,
            right_split: joint.left_split,
        },
    }
}

impl DdBuilder {
    /// Works out which joint `vertex` gets and the per-end geometry,
    /// without mutating anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex or one of its edges is not in the
    /// graph.
    pub fn resolve(&self, graph: &WallGraph, vertex: VertexId) -> Result<JointResolution> {
        let info = graph.vertex(vertex)?;
        let requested = info.joint_type;
        let links = info.links.clone();

        let unjoined = |kind: JointKind| JointResolution {
            kind,
            ends: links.iter().map(|l| (*l, None)).collect(),
            pairs: Vec::new(),
        };

        if requested.contains(JointKind::DIYJoint) {
            return Ok(JointResolution {
                kind: JointKind::DIYJoint,
                ends: Vec::new(),
                pairs: Vec::new(),
            });
        }
        if links.len() < 2 || requested == JointSet::from(JointKind::Null) {
            return Ok(unjoined(JointKind::Null));
        }
        if links.len() > 4 {
            warn!(?vertex, edges = links.len(), "no joint for more than four walls");
            return Ok(unjoined(JointKind::Null));
        }
        for link in &links {
            if !validity_check(graph.edge(link.edge)?) {
                warn!(?vertex, edge = ?link.edge, "arc too tight for its width, joint dropped");
                return Ok(unjoined(JointKind::Null));
            }
        }
        let Some(arms) = collect_arms(graph, vertex)? else {
            return Ok(unjoined(JointKind::Null));
        };

        let mut corners = Corners::new(self, &arms, DEFAULT_SEARCH_RADIUS);
        let solved = match arms.len() {
            2 => self.resolve_l(&mut corners, &arms, requested),
            3 => self.resolve_t(&mut corners, &arms, requested),
            4 => self.resolve_x(&mut corners, &arms),
            _ => None,
        };

        let pairs = corners
            .into_computed()
            .into_iter()
            .map(|(i, j, result)| ArmPair {
                first: arms[i].link,
                second: arms[j].link,
                result,
            })
            .collect();

        let Some((kind, joints)) = solved else {
            warn!(?vertex, arms = arms.len(), "no joint construction fits, joint dropped");
            return Ok(JointResolution {
                pairs,
                ..unjoined(JointKind::Null)
            });
        };
        let ends = arms
            .iter()
            .zip(joints)
            .map(|(arm, joint)| {
                (
                    arm.link,
                    Some(to_end_joint(arm.link.end, joint, self.lengthtol())),
                )
            })
            .collect();
        Ok(JointResolution { kind, ends, pairs })
    }

    fn resolve_l(
        &self,
        c: &mut Corners<'_, '_>,
        arms: &[Arm<'_>],
        requested: JointSet,
    ) -> Option<(JointKind, Vec<ArmJoint>)> {
        let incoming = arms[0].curve.reversed();
        let turn = is_convex(&incoming, &arms[1].curve, self.angtol());
        if turn == AngleType::Tangent {
            return Some((JointKind::Tangent, arms.iter().map(square).collect()));
        }
        // The inner sector runs counter-clockwise from `inner_first`.
        let inner_first = usize::from(turn == AngleType::Convex);
        let inner = sector(&arms[inner_first], &arms[1 - inner_first]).min(PI);
        let miter_ok = 1.0 / (inner * 0.5).sin() <= self.limit_ratio();

        let mut candidates = requested.intersection(JointSet::ALL_L);
        if candidates.is_empty() {
            candidates = JointSet::NORMAL_L;
        }
        let fallback = [JointKind::LUncross, JointKind::LCross]
            .into_iter()
            .filter(|k| !candidates.contains(*k));

        for kind in candidates.iter().chain(fallback) {
            let joints = match kind {
                JointKind::LMiter if miter_ok => l_miter(c),
                JointKind::LUncross => l_butt(c, 1, inner_first),
                JointKind::LCross => l_butt(c, 0, inner_first),
                _ => None,
            };
            if let Some(joints) = joints.filter(|j| is_valid(arms, j, self.lengthtol())) {
                return Some((kind, joints));
            }
        }
        None
    }

    fn resolve_t(
        &self,
        c: &mut Corners<'_, '_>,
        arms: &[Arm<'_>],
        requested: JointSet,
    ) -> Option<(JointKind, Vec<ArmJoint>)> {
        // The through wall spans the widest sector.
        let k = (0..3)
            .max_by(|&i, &j| {
                let si = sector(&arms[i], &arms[(i + 1) % 3]);
                si.total_cmp(&sector(&arms[j], &arms[(j + 1) % 3]))
            })
            .unwrap_or(0);

        let mut candidates = requested.intersection(JointSet::ALL_T);
        if candidates.is_empty() {
            candidates = JointSet::ALL_T;
        }
        for kind in candidates.iter() {
            let joints = t_joint(c, k, kind == JointKind::TCross);
            if let Some(joints) = joints.filter(|j| is_valid(arms, j, self.lengthtol())) {
                return Some((kind, joints));
            }
        }
        x_pointed(c)
            .filter(|j| is_valid(arms, j, self.lengthtol()))
            .map(|j| (JointKind::XMiter, j))
    }

    fn resolve_x(
        &self,
        c: &mut Corners<'_, '_>,
        arms: &[Arm<'_>],
    ) -> Option<(JointKind, Vec<ArmJoint>)> {
        let through = find_through_pair(c)
            .and_then(|(t1, t2)| x_through(c, t1, t2))
            .filter(|j| is_valid(arms, j, self.lengthtol()));
        through
            .or_else(|| x_pointed(c).filter(|j| is_valid(arms, j, self.lengthtol())))
            .map(|j| (JointKind::XMiter, j))
    }

    /// Resolves `vertex` and writes the result onto its edges.
    ///
    /// The realized kind is recorded in the vertex's `realized` field and
    /// returned. The requested `joint_type` is left as the caller set it, so
    /// a joint dropped for transient geometry comes back once the geometry
    /// allows it.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex or one of its edges is not in the
    /// graph.
    pub fn update_geometry_info(
        &self,
        graph: &mut WallGraph,
        vertex: VertexId,
    ) -> Result<JointKind> {
        let resolution = self.resolve(graph, vertex)?;
        for (link, joint) in resolution.ends {
            graph.edge_mut(link.edge)?.set_joint(link.end, joint);
        }
        let info = graph.vertex_mut(vertex)?;
        if !info.joint_type.is_empty() && !info.joint_type.contains(resolution.kind) {
            debug!(
                ?vertex,
                requested = %info.joint_type,
                realized = %resolution.kind,
                "requested joint degraded"
            );
        }
        info.realized = Some(resolution.kind);
        debug!(?vertex, kind = %resolution.kind, "joint resolved");
        Ok(resolution.kind)
    }

    /// Returns whether the joint stored on `vertex` still matches what its
    /// requested set resolves to on the current geometry.
    ///
    /// Compares against the last realized kind when there is one, otherwise
    /// against the requested set.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex or one of its edges is not in the
    /// graph.
    pub fn check(&self, graph: &WallGraph, vertex: VertexId) -> Result<bool> {
        let kind = self.resolve(graph, vertex)?.kind;
        let info = graph.vertex(vertex)?;
        Ok(info
            .realized
            .map_or_else(|| info.joint_type.contains(kind), |realized| realized == kind))
    }
}
