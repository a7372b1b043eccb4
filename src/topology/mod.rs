pub mod edge;
pub mod vertex;

pub use edge::{EdgeId, EdgeInfo, EndJoint};
pub use vertex::{EdgeEnd, EdgeLink, VertexId, VertexInfo};

use crate::error::TopologyError;
use crate::math::Point2;
use slotmap::SlotMap;

/// Arena owning the walls and the vertices that join them.
///
/// Vertices and edges reference each other through typed IDs
/// (generational indices), so the cyclic wall graph needs no shared
/// mutable aliasing.
#[derive(Debug, Default)]
pub struct WallGraph {
    vertices: SlotMap<VertexId, VertexInfo>,
    edges: SlotMap<EdgeId, EdgeInfo>,
}

impl WallGraph {
    /// Creates a new, empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, data: VertexInfo) -> VertexId {
        self.vertices.insert(data)
    }

    /// Returns a reference to the vertex, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexInfo, TopologyError> {
        self.vertices
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Returns a mutable reference to the vertex, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn vertex_mut(&mut self, id: VertexId) -> Result<&mut VertexInfo, TopologyError> {
        self.vertices
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Returns the position of a vertex, taken from its first link.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex is unknown or has no links.
    pub fn vertex_point(&self, id: VertexId) -> Result<Point2, TopologyError> {
        let link = self
            .vertex(id)?
            .links
            .first()
            .ok_or_else(|| TopologyError::InvalidTopology("vertex has no links".into()))?;
        Ok(self.edge(link.edge)?.end_point(link.end))
    }

    /// Iterates over all vertices.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &VertexInfo)> {
        self.vertices.iter()
    }

    // --- Edge operations ---

    /// Inserts an edge and returns its ID.
    pub fn add_edge(&mut self, data: EdgeInfo) -> EdgeId {
        self.edges.insert(data)
    }

    /// Returns a reference to the edge, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeInfo, TopologyError> {
        self.edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    /// Returns a mutable reference to the edge, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn edge_mut(&mut self, id: EdgeId) -> Result<&mut EdgeInfo, TopologyError> {
        self.edges
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    /// Iterates over all edges.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeInfo)> {
        self.edges.iter()
    }

    // --- Wiring ---

    /// Attaches `end` of `edge` to `vertex`, recording both directions of
    /// the reference.
    ///
    /// # Errors
    ///
    /// Returns an error if either entity is unknown or that edge end is
    /// already attached to a vertex.
    pub fn connect(
        &mut self,
        vertex: VertexId,
        edge: EdgeId,
        end: EdgeEnd,
    ) -> Result<(), TopologyError> {
        self.vertex(vertex)?;
        let info = self.edge_mut(edge)?;
        let slot = match end {
            EdgeEnd::From => &mut info.from,
            EdgeEnd::To => &mut info.to,
        };
        if slot.is_some() {
            return Err(TopologyError::InvalidTopology(
                "edge end already attached to a vertex".into(),
            ));
        }
        *slot = Some(vertex);
        self.vertex_mut(vertex)?.links.push(EdgeLink { edge, end });
        Ok(())
    }
}
