use std::fmt;

use crate::error::{OperationError, Result};

/// A single joint construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointKind {
    /// No joint; each edge end keeps a square cap.
    Null,
    /// Two edges continue smoothly; square caps meet edge to edge.
    Tangent,
    /// Two edges mitred along the bisector.
    LMiter,
    /// Two edges butted; the second link runs through.
    LUncross,
    /// Two edges butted; the first link runs through.
    LCross,
    /// The stem stops at the near side of the through wall.
    TUncross,
    /// The stem cuts the through wall and stops at its far side.
    TCross,
    /// Four or more edges around a shared point.
    XMiter,
    /// Caller-supplied geometry; never computed.
    DIYJoint,
}

/// Broad joint family, used to reject meaningless combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Null,
    Tangent,
    L,
    T,
    X,
    Diy,
}

impl JointKind {
    /// Every kind, in preference order.
    pub const ALL: [Self; 9] = [
        Self::LMiter,
        Self::LUncross,
        Self::LCross,
        Self::TUncross,
        Self::TCross,
        Self::XMiter,
        Self::Tangent,
        Self::DIYJoint,
        Self::Null,
    ];

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }

    fn family(self) -> Family {
        match self {
            Self::Null => Family::Null,
            Self::Tangent => Family::Tangent,
            Self::LMiter | Self::LUncross | Self::LCross => Family::L,
            Self::TUncross | Self::TCross => Family::T,
            Self::XMiter => Family::X,
            Self::DIYJoint => Family::Diy,
        }
    }
}

impl fmt::Display for JointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "Null",
            Self::Tangent => "Tangent",
            Self::LMiter => "LMiter",
            Self::LUncross => "LUncross",
            Self::LCross => "LCross",
            Self::TUncross => "TUncross",
            Self::TCross => "TCross",
            Self::XMiter => "XMiter",
            Self::DIYJoint => "DIYJoint",
        };
        f.write_str(name)
    }
}

/// A set of acceptable joint kinds.
///
/// A vertex stores the set of constructions its caller accepts; the
/// resolver realizes one member of it when the geometry allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct JointSet(u16);

impl JointSet {
    /// The empty set; lets the resolver pick freely.
    pub const EMPTY: Self = Self(0);
    /// `{LUncross, LMiter}`.
    pub const NORMAL_L: Self = Self::of(&[JointKind::LUncross, JointKind::LMiter]);
    /// `{LMiter, LUncross, LCross}`.
    pub const ALL_L: Self =
        Self::of(&[JointKind::LMiter, JointKind::LUncross, JointKind::LCross]);
    /// `{TUncross, TCross}`.
    pub const ALL_T: Self = Self::of(&[JointKind::TUncross, JointKind::TCross]);

    const fn of(kinds: &[JointKind]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < kinds.len() {
            bits |= kinds[i].bit();
            i += 1;
        }
        Self(bits)
    }

    /// Builds a set, rejecting combinations no vertex can request.
    ///
    /// `Null` and `DIYJoint` stand alone. L, T and X kinds may not be mixed;
    /// `Tangent` may accompany L kinds.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidJointSet` for a rejected combination.
    pub fn try_from_kinds(kinds: &[JointKind]) -> Result<Self> {
        let set = Self::of(kinds);
        let families: Vec<Family> = set.iter().map(JointKind::family).collect();
        let exclusive = families
            .iter()
            .any(|f| matches!(f, Family::Null | Family::Diy));
        if exclusive && families.len() > 1 {
            return Err(OperationError::InvalidJointSet(format!(
                "Null and DIYJoint cannot be combined: {set}"
            ))
            .into());
        }
        let shaped = |f: Family| families.contains(&f);
        let shape_count = [Family::L, Family::T, Family::X]
            .into_iter()
            .filter(|f| shaped(*f))
            .count();
        if shape_count > 1 || (shaped(Family::Tangent) && (shaped(Family::T) || shaped(Family::X)))
        {
            return Err(OperationError::InvalidJointSet(format!(
                "joint families cannot be mixed: {set}"
            ))
            .into());
        }
        Ok(set)
    }

    /// Returns whether `kind` is a member.
    #[must_use]
    pub fn contains(self, kind: JointKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Set union, checked like [`Self::try_from_kinds`].
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidJointSet` when the combined set mixes
    /// kinds that cannot be requested together.
    pub fn try_union(self, other: Self) -> Result<Self> {
        let kinds: Vec<JointKind> = self.iter().chain(other.iter()).collect();
        Self::try_from_kinds(&kinds)
    }

    /// Set intersection. A subset of a valid set is always valid.
    #[must_use]
    pub fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Returns whether no kind is a member.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in preference order.
    pub fn iter(self) -> impl Iterator<Item = JointKind> {
        JointKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl From<JointKind> for JointSet {
    fn from(kind: JointKind) -> Self {
        Self(kind.bit())
    }
}

impl fmt::Display for JointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, kind) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{kind}")?;
        }
        f.write_str("}")
    }
}

/// Classification of the turn between two consecutive curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleType {
    /// The path turns left.
    Convex,
    /// The path turns right.
    NonConvex,
    /// The path continues straight within tolerance.
    Tangent,
}

/// Where a point lies relative to an edge's offset band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionType {
    /// Left of the left side.
    Left,
    /// Right of the right side.
    Right,
    /// Between the two sides.
    In,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn named_unions() {
        assert!(JointSet::NORMAL_L.contains(JointKind::LMiter));
        assert!(JointSet::NORMAL_L.contains(JointKind::LUncross));
        assert!(!JointSet::NORMAL_L.contains(JointKind::LCross));
        assert_eq!(
            JointSet::NORMAL_L.try_union(JointKind::LCross.into()).unwrap(),
            JointSet::ALL_L
        );
        assert!(JointSet::ALL_L.intersection(JointSet::ALL_T).is_empty());
    }

    #[test]
    fn iteration_follows_preference() {
        let kinds: Vec<_> = JointSet::ALL_L.iter().collect();
        assert_eq!(
            kinds,
            vec![JointKind::LMiter, JointKind::LUncross, JointKind::LCross]
        );
    }

    #[test]
    fn invalid_combinations_rejected() {
        assert!(JointSet::try_from_kinds(&[JointKind::Null, JointKind::LMiter]).is_err());
        assert!(JointSet::try_from_kinds(&[JointKind::DIYJoint, JointKind::TCross]).is_err());
        assert!(JointSet::try_from_kinds(&[JointKind::LMiter, JointKind::TCross]).is_err());
        assert!(JointSet::try_from_kinds(&[JointKind::Tangent, JointKind::XMiter]).is_err());
        assert!(JointSet::from(JointKind::Null)
            .try_union(JointKind::LMiter.into())
            .is_err());
        assert!(JointSet::ALL_L.try_union(JointSet::ALL_T).is_err());
    }

    #[test]
    fn valid_combinations_accepted() {
        let set = JointSet::try_from_kinds(&[JointKind::Tangent, JointKind::LMiter]).unwrap();
        assert!(set.contains(JointKind::Tangent));
        let single = JointSet::try_from_kinds(&[JointKind::DIYJoint]).unwrap();
        assert_eq!(single, JointKind::DIYJoint.into());
        assert_eq!(
            JointSet::try_from_kinds(&[JointKind::TUncross, JointKind::TCross]).unwrap(),
            JointSet::ALL_T
        );
    }

    #[test]
    fn display_lists_members() {
        assert_eq!(JointSet::NORMAL_L.to_string(), "{LMiter, LUncross}");
    }
}
