use crate::error::{OperationError, Result};
use crate::geometry::curve::{Curve, Curve2d};
use crate::math::Point2;

use super::vertex::{EdgeEnd, VertexId};

slotmap::new_key_type! {
    /// Unique identifier for an edge in the wall graph.
    pub struct EdgeId;
}

/// The resolved joint at one end of an edge, in the edge's own frame.
///
/// `path` runs from the left side to the right side at the from end and
/// from the right side to the left side at the to end, so that it always
/// continues the counter-clockwise outline.
#[derive(Debug, Clone, PartialEq)]
pub struct EndJoint {
    /// Where the left side ends.
    pub left: Point2,
    /// Where the right side ends.
    pub right: Point2,
    /// Cap curves closing this end.
    pub path: Vec<Curve2d>,
    /// Extra vertex inserted into the left side.
    pub left_split: Option<Point2>,
    /// Extra vertex inserted into the right side.
    pub right_split: Option<Point2>,
}

/// One wall segment: a center curve with left and right offsets.
///
/// `width == loffset + roffset`. Joint results are cached per end and
/// refreshed by the resolver.
#[derive(Debug, Clone)]
pub struct EdgeInfo {
    /// Center curve.
    pub curve: Curve2d,
    /// Distance from the center curve to the left side.
    pub loffset: f64,
    /// Distance from the center curve to the right side.
    pub roffset: f64,
    /// Total wall width.
    pub width: f64,
    /// Vertex at the start of `curve`.
    pub from: Option<VertexId>,
    /// Vertex at the end of `curve`.
    pub to: Option<VertexId>,
    /// Left side override, used when the sides are not parallel offsets.
    pub left_curve: Option<Curve2d>,
    /// Right side override.
    pub right_curve: Option<Curve2d>,
    /// Cached joint at the from end.
    pub from_joint: Option<EndJoint>,
    /// Cached joint at the to end.
    pub to_joint: Option<EndJoint>,
}

impl EdgeInfo {
    /// Creates an edge with explicit side offsets.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if an offset is negative or
    /// not finite.
    pub fn new(curve: Curve2d, loffset: f64, roffset: f64) -> Result<Self> {
        if !(loffset.is_finite() && roffset.is_finite()) || loffset < 0.0 || roffset < 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "wall offsets must be non-negative, got {loffset} / {roffset}"
            ))
            .into());
        }
        Ok(Self {
            curve,
            loffset,
            roffset,
            width: loffset + roffset,
            from: None,
            to: None,
            left_curve: None,
            right_curve: None,
            from_joint: None,
            to_joint: None,
        })
    }

    /// Creates an edge centered on `curve`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for a negative width.
    pub fn with_width(curve: Curve2d, width: f64) -> Result<Self> {
        Self::new(curve, width * 0.5, width * 0.5)
    }

    /// The left side curve, or `None` if it collapses.
    #[must_use]
    pub fn left_side(&self) -> Option<Curve2d> {
        self.left_curve.or_else(|| self.curve.offset(self.loffset))
    }

    /// The right side curve, or `None` if it collapses.
    #[must_use]
    pub fn right_side(&self) -> Option<Curve2d> {
        self.right_curve.or_else(|| self.curve.offset(-self.roffset))
    }

    /// The vertex attached at `end`.
    #[must_use]
    pub fn vertex(&self, end: EdgeEnd) -> Option<VertexId> {
        match end {
            EdgeEnd::From => self.from,
            EdgeEnd::To => self.to,
        }
    }

    /// The center curve point at `end`.
    #[must_use]
    pub fn end_point(&self, end: EdgeEnd) -> Point2 {
        match end {
            EdgeEnd::From => self.curve.start_point(),
            EdgeEnd::To => self.curve.end_point(),
        }
    }

    /// The cached joint at `end`.
    #[must_use]
    pub fn joint(&self, end: EdgeEnd) -> Option<&EndJoint> {
        match end {
            EdgeEnd::From => self.from_joint.as_ref(),
            EdgeEnd::To => self.to_joint.as_ref(),
        }
    }

    /// Replaces the cached joint at `end`.
    pub fn set_joint(&mut self, end: EdgeEnd, joint: Option<EndJoint>) {
        match end {
            EdgeEnd::From => self.from_joint = joint,
            EdgeEnd::To => self.to_joint = joint,
        }
    }

    /// From-left corner.
    #[must_use]
    pub fn fl(&self) -> Option<Point2> {
        self.from_joint.as_ref().map(|j| j.left)
    }

    /// From-right corner.
    #[must_use]
    pub fn fr(&self) -> Option<Point2> {
        self.from_joint.as_ref().map(|j| j.right)
    }

    /// To-left corner.
    #[must_use]
    pub fn tl(&self) -> Option<Point2> {
        self.to_joint.as_ref().map(|j| j.left)
    }

    /// To-right corner.
    #[must_use]
    pub fn tr(&self) -> Option<Point2> {
        self.to_joint.as_ref().map(|j| j.right)
    }

    /// Cap path at the from end, running `fl -> fr`.
    #[must_use]
    pub fn from_path(&self) -> Option<&[Curve2d]> {
        self.from_joint.as_ref().map(|j| j.path.as_slice())
    }

    /// Cap path at the to end, running `tr -> tl`.
    #[must_use]
    pub fn to_path(&self) -> Option<&[Curve2d]> {
        self.to_joint.as_ref().map(|j| j.path.as_slice())
    }
}
