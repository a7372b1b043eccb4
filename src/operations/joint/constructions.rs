//! Per-arm joint constructions.
//!
//! Every construction works in the arm frame: an arm's left and right end
//! points lie on its own left and right sides, and its cap polyline runs
//! from the left end point to the right end point.

use crate::geometry::curve::{Curve, Curve2d};
use crate::math::Point2;

use super::arm::Arm;
use super::builder::DdBuilder;
use super::joint_point::JointGenerationResult;

/// The resolved end of one arm, in the arm frame.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ArmJoint {
    pub left: Point2,
    pub right: Point2,
    pub cap: Vec<Point2>,
    pub left_split: Option<Point2>,
    pub right_split: Option<Point2>,
}

impl ArmJoint {
    fn capped(left: Point2, right: Point2) -> Self {
        Self::through(left, right, vec![left, right])
    }

    fn through(left: Point2, right: Point2, cap: Vec<Point2>) -> Self {
        Self {
            left,
            right,
            cap,
            left_split: None,
            right_split: None,
        }
    }

    fn split_left(mut self, p: Point2) -> Self {
        self.left_split = Some(p);
        self
    }

    fn split_right(mut self, p: Point2) -> Self {
        self.right_split = Some(p);
        self
    }
}

/// Pairwise corner solver for one vertex, remembering every result.
pub(crate) struct Corners<'s, 'a> {
    builder: &'s DdBuilder,
    arms: &'s [Arm<'a>],
    search_radius: f64,
    computed: Vec<(usize, usize, JointGenerationResult)>,
}

impl<'s, 'a> Corners<'s, 'a> {
    pub fn new(builder: &'s DdBuilder, arms: &'s [Arm<'a>], search_radius: f64) -> Self {
        Self {
            builder,
            arms,
            search_radius,
            computed: Vec::new(),
        }
    }

    /// Corner `c(i, j)`: arm `i`'s left side against arm `j`'s right side.
    pub fn get(&mut self, i: usize, j: usize) -> JointGenerationResult {
        if let Some((_, _, r)) = self.computed.iter().find(|(a, b, _)| *a == i && *b == j) {
            return *r;
        }
        let r = self
            .builder
            .arm_corner(&self.arms[i], &self.arms[j], self.search_radius);
        self.computed.push((i, j, r));
        r
    }

    fn point(&mut self, i: usize, j: usize) -> Option<Point2> {
        self.get(i, j).point
    }

    /// Intersection of two arbitrary sides near the vertex.
    fn meet(&self, c1: &Curve2d, c2: &Curve2d) -> Option<Point2> {
        let vertex = self.arms.first()?.vertex();
        self.builder
            .sub_gen_joint_info(c1, c2, &vertex, self.search_radius)
    }

    /// Every pairwise result computed so far, in computation order.
    pub fn into_computed(self) -> Vec<(usize, usize, JointGenerationResult)> {
        self.computed
    }
}

/// Square cap across the arm's own end.
pub(crate) fn square(arm: &Arm<'_>) -> ArmJoint {
    ArmJoint::capped(arm.left.start_point(), arm.right.start_point())
}

/// Both arms cut along the line through their two corners.
pub(crate) fn l_miter(c: &mut Corners<'_, '_>) -> Option<Vec<ArmJoint>> {
    let ab = c.point(0, 1)?;
    let ba = c.point(1, 0)?;
    Some(vec![ArmJoint::capped(ab, ba), ArmJoint::capped(ba, ab)])
}

/// Arm `through` runs past the vertex; the other arm stops against its
/// inner side. `inner_first` is the arm the inner (smaller) sector starts
/// from, counter-clockwise.
pub(crate) fn l_butt(
    c: &mut Corners<'_, '_>,
    through: usize,
    inner_first: usize,
) -> Option<Vec<ArmJoint>> {
    let (t, u) = (through, 1 - through);
    let (t_joint, u_joint) = if inner_first == t {
        let inner = c.point(t, u)?;
        let outer = c.point(u, t)?;
        let p = c.meet(&c.arms[t].left, &c.arms[u].left)?;
        (
            ArmJoint::capped(p, outer).split_left(inner),
            ArmJoint::capped(p, inner),
        )
    } else {
        let inner = c.point(u, t)?;
        let outer = c.point(t, u)?;
        let p = c.meet(&c.arms[t].right, &c.arms[u].right)?;
        (
            ArmJoint::capped(outer, p).split_right(inner),
            ArmJoint::capped(inner, p),
        )
    };
    Some(if t == 0 {
        vec![t_joint, u_joint]
    } else {
        vec![u_joint, t_joint]
    })
}

/// Three arms: `k` and `k + 1` form the through wall, `k + 2` is the stem.
///
/// Uncrossed, the through arms meet at a seam across the vertex and the
/// stem stops at their near side. Crossed, the stem runs to the far side
/// and the through arms stop against it.
pub(crate) fn t_joint(c: &mut Corners<'_, '_>, k: usize, cross: bool) -> Option<Vec<ArmJoint>> {
    let (a, b, s) = (k % 3, (k + 1) % 3, (k + 2) % 3);
    let far = c.point(a, b)?;
    let c1 = c.point(b, s)?;
    let c2 = c.point(s, a)?;

    let mut joints = vec![None, None, None];
    if cross {
        let e1 = c.meet(&c.arms[s].right, &c.arms[b].right)?;
        let e2 = c.meet(&c.arms[s].left, &c.arms[a].left)?;
        joints[b] = Some(ArmJoint::capped(c1, e1));
        joints[a] = Some(ArmJoint::capped(e2, c2));
        joints[s] = Some(
            ArmJoint::through(e2, e1, vec![e2, far, e1])
                .split_left(c2)
                .split_right(c1),
        );
    } else {
        let near = c.point(b, a)?;
        joints[b] = Some(ArmJoint::capped(near, far).split_left(c1));
        joints[a] = Some(ArmJoint::capped(far, near).split_right(c2));
        joints[s] = Some(ArmJoint::through(c2, c1, vec![c2, near, c1]));
    }
    joints.into_iter().collect()
}

/// Looks for two opposite arms forming one straight wall through the
/// vertex, trying the pair containing arm 0 first.
pub(crate) fn find_through_pair(c: &mut Corners<'_, '_>) -> Option<(usize, usize)> {
    if c.arms.len() != 4 {
        return None;
    }
    let tol = c.builder.lengthtol();
    for (i, j) in [(0, 2), (1, 3)] {
        let r = c.get(i, j);
        let other_gap = (c.arms[j].left.start_point() - c.arms[i].right.start_point()).norm();
        if r.is_cross && other_gap <= tol {
            return Some((i, j));
        }
    }
    None
}

/// Four arms where `t1`/`t2` pass straight through and the other two arms
/// stop against their sides.
pub(crate) fn x_through(c: &mut Corners<'_, '_>, t1: usize, t2: usize) -> Option<Vec<ArmJoint>> {
    let (u1, u2) = ((t1 + 1) % 4, (t2 + 1) % 4);
    let n1 = c.point(t1, t2)?;
    let n2 = c.arms[t1].right.start_point();
    let t1_u1 = c.point(t1, u1)?;
    let u1_t2 = c.point(u1, t2)?;
    let t2_u2 = c.point(t2, u2)?;
    let u2_t1 = c.point(u2, t1)?;

    let mut joints = vec![None, None, None, None];
    joints[t1] = Some(
        ArmJoint::capped(n1, n2)
            .split_left(t1_u1)
            .split_right(u2_t1),
    );
    joints[t2] = Some(
        ArmJoint::capped(n2, n1)
            .split_left(t2_u2)
            .split_right(u1_t2),
    );
    joints[u1] = Some(ArmJoint::through(u1_t2, t1_u1, vec![u1_t2, n1, t1_u1]));
    joints[u2] = Some(ArmJoint::through(u2_t1, t2_u2, vec![u2_t1, n2, t2_u2]));
    joints.into_iter().collect()
}

/// Every arm ends in a point at the vertex between its two corners.
pub(crate) fn x_pointed(c: &mut Corners<'_, '_>) -> Option<Vec<ArmJoint>> {
    let n = c.arms.len();
    let vertex = c.arms.first()?.vertex();
    (0..n)
        .map(|i| {
            let left = c.point(i, (i + 1) % n)?;
            let right = c.point((i + n - 1) % n, i)?;
            Some(ArmJoint::through(left, right, vec![left, vertex, right]))
        })
        .collect()
}

/// Whether every end point leaves its side with positive length, and every
/// split point lies between that end point and the far end.
pub(crate) fn is_valid(arms: &[Arm<'_>], joints: &[ArmJoint], lengthtol: f64) -> bool {
    let side_ok = |side: &Curve2d, end: &Point2, split: Option<&Point2>| {
        let len = side.length();
        let t_end = side.param_at(end);
        if t_end >= len - lengthtol {
            return false;
        }
        split.is_none_or(|p| {
            let t = side.param_at(p);
            t >= t_end - lengthtol && t < len - lengthtol
        })
    };
    arms.len() == joints.len()
        && arms.iter().zip(joints).all(|(arm, j)| {
            side_ok(&arm.left, &j.left, j.left_split.as_ref())
                && side_ok(&arm.right, &j.right, j.right_split.as_ref())
        })
}
