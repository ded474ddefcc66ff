#![warn(missing_docs)]

//! Polygon-mesh topology for the foldmesh kernel.
//!
//! A [`Topology`] is an arena of vertices, half-edges, edges, faces and
//! splines addressed by generational handles. Adjacency runs both ways
//! (faces list half-edges, vertices list the edges and faces touching them)
//! and every link is a handle, so the cyclic graph needs no shared
//! ownership.
//!
//! On top of the connectivity it derives what a flat-pattern pipeline needs:
//! a local [`Frame`](foldmesh_geom::Frame) per face, interior angles per
//! corner, and the signed dihedral angle across each interior edge.
//!
//! ```
//! use foldmesh_math::Point3;
//! use foldmesh_topo::Topology;
//!
//! let mut topo = Topology::new();
//! let a = topo.add_vertex(Point3::new(0.0, 0.0, 0.0));
//! let b = topo.add_vertex(Point3::new(1.0, 0.0, 0.0));
//! let c = topo.add_vertex(Point3::new(0.0, 1.0, 0.0));
//! let face = topo.add_triangle(&[a, b, c], None).unwrap();
//! assert_eq!(topo.face_angles(face).unwrap().len(), 3);
//! ```

pub mod builder;
pub mod corner;
pub mod dihedral;
pub mod edge;
pub mod error;
pub mod face;
pub mod half_edge;
pub mod quad;
pub mod spline;
pub mod triangle;
pub mod validate;
pub mod vertex;

pub use corner::VertexVectors;
pub use edge::{Edge, Fold};
pub use error::{Result, TopoError};
pub use face::{Diagonal, Face, FaceKind};
pub use half_edge::HalfEdge;
pub use spline::Spline;
pub use vertex::{Vertex, VertexKey};

use foldmesh_math::Tolerance;
use slotmap::SlotMap;
use std::collections::HashMap;

slotmap::new_key_type! {
    /// Handle to a [`Vertex`].
    pub struct VertexId;
    /// Handle to a [`HalfEdge`].
    pub struct HalfEdgeId;
    /// Handle to an [`Edge`].
    pub struct EdgeId;
    /// Handle to a [`Face`].
    pub struct FaceId;
    /// Handle to a [`Spline`].
    pub struct SplineId;
}

/// Arena holding every topological entity of one mesh.
#[derive(Debug, Clone)]
pub struct Topology {
    pub(crate) vertices: SlotMap<VertexId, Vertex>,
    pub(crate) half_edges: SlotMap<HalfEdgeId, HalfEdge>,
    pub(crate) edges: SlotMap<EdgeId, Edge>,
    pub(crate) faces: SlotMap<FaceId, Face>,
    pub(crate) splines: SlotMap<SplineId, Spline>,
    /// First vertex created at each coordinate key.
    pub(crate) vertex_index: HashMap<VertexKey, VertexId>,
    pub(crate) tolerance: Tolerance,
}

impl Topology {
    /// Empty topology with default tolerances.
    pub fn new() -> Self {
        Self::with_tolerance(Tolerance::DEFAULT)
    }

    /// Empty topology comparing coordinates with `tolerance`.
    pub fn with_tolerance(tolerance: Tolerance) -> Self {
        Self {
            vertices: SlotMap::with_key(),
            half_edges: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            faces: SlotMap::with_key(),
            splines: SlotMap::with_key(),
            vertex_index: HashMap::new(),
            tolerance,
        }
    }

    /// Tolerances used by this topology.
    pub fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }

    /// All vertices.
    pub fn vertices(&self) -> &SlotMap<VertexId, Vertex> {
        &self.vertices
    }

    /// All half-edges.
    pub fn half_edges(&self) -> &SlotMap<HalfEdgeId, HalfEdge> {
        &self.half_edges
    }

    /// All edges.
    pub fn edges(&self) -> &SlotMap<EdgeId, Edge> {
        &self.edges
    }

    /// All faces.
    pub fn faces(&self) -> &SlotMap<FaceId, Face> {
        &self.faces
    }

    /// All splines.
    pub fn splines(&self) -> &SlotMap<SplineId, Spline> {
        &self.splines
    }

    /// Look up a vertex.
    pub fn vertex(&self, id: VertexId) -> Result<&Vertex> {
        self.vertices.get(id).ok_or(TopoError::MissingVertex(id))
    }

    /// Look up a half-edge.
    pub fn half_edge(&self, id: HalfEdgeId) -> Result<&HalfEdge> {
        self.half_edges.get(id).ok_or(TopoError::MissingHalfEdge(id))
    }

    /// Look up an edge.
    pub fn edge(&self, id: EdgeId) -> Result<&Edge> {
        self.edges.get(id).ok_or(TopoError::MissingEdge(id))
    }

    /// Look up a face.
    pub fn face(&self, id: FaceId) -> Result<&Face> {
        self.faces.get(id).ok_or(TopoError::MissingFace(id))
    }

    /// Look up a spline.
    pub fn spline(&self, id: SplineId) -> Result<&Spline> {
        self.splines.get(id).ok_or(TopoError::MissingSpline(id))
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}
