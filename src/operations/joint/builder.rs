use slotmap::SecondaryMap;
use tracing::{debug, warn};

use crate::error::{OperationError, Result};
use crate::topology::{EdgeId, VertexId, WallGraph};

use super::assembly::{edge_loop, make_geometry_info, GeometryInfo};
use super::joint_type::JointKind;

/// Default reach, in model units, when extending sides to find a corner.
pub const DEFAULT_SEARCH_RADIUS: f64 = 1.0;

/// Default length of side kept on each side of a joint path.
pub const DEFAULT_JOINT_PATH_LENGTH: f64 = 0.24;

/// Default angular tolerance in radians.
pub const DEFAULT_ANGTOL: f64 = 1e-4;

/// Default length tolerance in model units.
pub const DEFAULT_LENGTHTOL: f64 = 1e-6;

/// Default (and largest) miter limit ratio.
pub const DEFAULT_LIMIT_RATIO: f64 = 5.0;

const MIN_LIMIT_RATIO: f64 = 1.0;

/// Builds joined wall outlines for a wall graph.
///
/// Holds only the tolerances, fixed for the life of the instance:
/// `angtol` decides tangency and opposition, `lengthtol` decides
/// coincidence, and `limit_ratio` bounds how far a miter tip may reach
/// relative to the half width (clamped to `[1, 5]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DdBuilder {
    angtol: f64,
    lengthtol: f64,
    limit_ratio: f64,
}

impl Default for DdBuilder {
    fn default() -> Self {
        Self {
            angtol: DEFAULT_ANGTOL,
            lengthtol: DEFAULT_LENGTHTOL,
            limit_ratio: DEFAULT_LIMIT_RATIO,
        }
    }
}

impl DdBuilder {
    /// Creates a builder with explicit tolerances.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if a tolerance is not a
    /// positive finite number or the limit ratio is not finite.
    pub fn new(angtol: f64, lengthtol: f64, limit_ratio: f64) -> Result<Self> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(angtol) || !positive(lengthtol) || !limit_ratio.is_finite() {
            return Err(OperationError::InvalidInput(format!(
                "invalid tolerances: angtol={angtol}, lengthtol={lengthtol}, \
                 limit_ratio={limit_ratio}"
            ))
            .into());
        }
        Ok(Self {
            angtol,
            lengthtol,
            limit_ratio: limit_ratio.clamp(MIN_LIMIT_RATIO, DEFAULT_LIMIT_RATIO),
        })
    }

    /// Angular tolerance in radians.
    #[must_use]
    pub fn angtol(&self) -> f64 {
        self.angtol
    }

    /// Length tolerance in model units.
    #[must_use]
    pub fn lengthtol(&self) -> f64 {
        self.lengthtol
    }

    /// Miter limit ratio, already clamped.
    #[must_use]
    pub fn limit_ratio(&self) -> f64 {
        self.limit_ratio
    }

    /// Resolves every vertex in `vertices`, then assembles one closed
    /// outline per edge in `edges`.
    ///
    /// Resolved joints are written onto the incident edges and the realized
    /// kind onto each vertex's `realized` field. When
    /// `update_results` is given, the realized kind per vertex is also
    /// recorded there. An edge whose outline collapses even without joints
    /// is left out of the result.
    ///
    /// # Errors
    ///
    /// Returns an error if an ID is not in the graph.
    pub fn build(
        &self,
        graph: &mut WallGraph,
        vertices: &[VertexId],
        edges: &[EdgeId],
        mut update_results: Option<&mut SecondaryMap<VertexId, JointKind>>,
    ) -> Result<SecondaryMap<EdgeId, GeometryInfo>> {
        for &vertex in vertices {
            let kind = self.update_geometry_info(graph, vertex)?;
            if let Some(results) = update_results.as_deref_mut() {
                results.insert(vertex, kind);
            }
        }

        let mut outlines = SecondaryMap::new();
        for &id in edges {
            let edge = graph.edge(id)?;
            let info = edge_loop(edge, self.lengthtol).or_else(|| {
                warn!(?id, "joined outline degenerate, using unjoined outline");
                make_geometry_info(edge)
            });
            match info {
                Some(info) => {
                    outlines.insert(id, info);
                }
                None => warn!(?id, "wall outline collapsed, skipped"),
            }
        }
        debug!(
            vertices = vertices.len(),
            edges = outlines.len(),
            "wall outlines built"
        );
        Ok(outlines)
    }
}
