use crate::operations::joint::{JointKind, JointSet};

use super::edge::EdgeId;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in the wall graph.
    pub struct VertexId;
}

/// Which end of an edge touches a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeEnd {
    /// The start of the edge curve.
    From,
    /// The end of the edge curve.
    To,
}

impl EdgeEnd {
    /// Returns the other end.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::From => Self::To,
            Self::To => Self::From,
        }
    }
}

/// One incident edge of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeLink {
    /// The incident edge.
    pub edge: EdgeId,
    /// The end of `edge` that sits on the vertex.
    pub end: EdgeEnd,
}

/// A point where wall edges meet.
///
/// `joint_type` is the set of constructions the caller accepts. The
/// resolver records the kind it actually built in `realized`; an explicit
/// `{Null}` request is the only way to switch joining off.
/// Link order matters: link 0 anchors the counter-clockwise arm order.
#[derive(Debug, Clone)]
pub struct VertexInfo {
    /// Requested joint kinds.
    pub joint_type: JointSet,
    /// Kind realized by the last resolution, if any.
    pub realized: Option<JointKind>,
    /// Incident edge ends.
    pub links: Vec<EdgeLink>,
}

impl VertexInfo {
    /// Creates a vertex with no links.
    ///
    /// Every `JointSet` value is a valid request: sets are only built from
    /// single kinds, the named unions or the checked constructors.
    #[must_use]
    pub fn new(joint_type: JointSet) -> Self {
        Self {
            joint_type,
            realized: None,
            links: Vec::new(),
        }
    }
}
