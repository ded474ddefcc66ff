//! Error types for topology construction and queries.

use crate::{EdgeId, FaceId, HalfEdgeId, SplineId, VertexId};
use foldmesh_geom::GeomError;
use foldmesh_math::MathError;
use thiserror::Error;

/// Errors that can occur while building or querying a [`Topology`](crate::Topology).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopoError {
    /// Vertex handle is not in the arena.
    #[error("vertex {0:?} does not exist")]
    MissingVertex(VertexId),

    /// Half-edge handle is not in the arena.
    #[error("half-edge {0:?} does not exist")]
    MissingHalfEdge(HalfEdgeId),

    /// Edge handle is not in the arena.
    #[error("edge {0:?} does not exist")]
    MissingEdge(EdgeId),

    /// Face handle is not in the arena.
    #[error("face {0:?} does not exist")]
    MissingFace(FaceId),

    /// Spline handle is not in the arena.
    #[error("spline {0:?} does not exist")]
    MissingSpline(SplineId),

    /// A face needs at least three vertices.
    #[error("face needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// A triangle or quad was built from the wrong number of vertices.
    #[error("expected {expected} vertices, got {got}")]
    WrongVertexCount {
        /// Required vertex count.
        expected: usize,
        /// Supplied vertex count.
        got: usize,
    },

    /// The operation only applies to another face variant.
    #[error("face {face:?} is not a {expected}")]
    WrongFaceKind {
        /// Face the operation was applied to.
        face: FaceId,
        /// Variant the operation needs.
        expected: &'static str,
    },

    /// A vertex appears twice in one loop, or a half-edge starts and ends at it.
    #[error("vertex {0:?} is repeated")]
    DuplicateVertex(VertexId),

    /// An explicit face normal points against the loop winding.
    #[error("normal opposes the winding of the loop")]
    NormalAgainstWinding,

    /// Two faces meeting at an edge run it in the same direction.
    #[error("faces on vertices {a:?} and {b:?} are wound inconsistently")]
    InconsistentWinding {
        /// First vertex of the pair.
        a: VertexId,
        /// Second vertex of the pair.
        b: VertexId,
    },

    /// An edge needs at least one half-edge.
    #[error("edge needs at least one half-edge")]
    EmptyEdge,

    /// An edge holds at most two half-edges.
    #[error("edge holds at most 2 half-edges, got {0}")]
    TooManyHalfEdges(usize),

    /// The half-edges of one edge must join the same two vertices.
    #[error("half-edges {0:?} and {1:?} do not share a vertex pair")]
    MismatchedHalfEdges(HalfEdgeId, HalfEdgeId),

    /// Both half-edges of an edge belong to the same face.
    #[error("half-edges of one edge must belong to different faces, both are on {0:?}")]
    DuplicateFaceOnEdge(FaceId),

    /// The half-edge is already linked to an edge.
    #[error("half-edge {0:?} already belongs to edge {1:?}")]
    AlreadyLinked(HalfEdgeId, EdgeId),

    /// An edge between these vertices already exists.
    #[error("vertices {0:?} and {1:?} are already joined by edge {2:?}")]
    EdgeExists(VertexId, VertexId, EdgeId),

    /// The half-edge belongs to a face loop and cannot be changed on its own.
    #[error("half-edge {0:?} belongs to face {1:?}")]
    HalfEdgeInFace(HalfEdgeId, FaceId),

    /// The half-edge is not a member of the edge or face it was used with.
    #[error("half-edge {0:?} is not a member of {1}")]
    NotMember(HalfEdgeId, String),

    /// The edge is not on the boundary of the face.
    #[error("edge {0:?} is not on face {1:?}")]
    EdgeNotOnFace(EdgeId, FaceId),

    /// A half-edge used for a fold has no face.
    #[error("half-edge {0:?} has no face")]
    FreeHalfEdge(HalfEdgeId),

    /// More than two faces meet at one vertex pair.
    #[error("{count} half-edges share vertices {a:?} and {b:?}")]
    NonManifoldEdge {
        /// First vertex of the pair.
        a: VertexId,
        /// Second vertex of the pair.
        b: VertexId,
        /// Number of half-edges found.
        count: usize,
    },

    /// The face already has a parameter under this key.
    #[error("face {0:?} already has parameter {1:?}")]
    DuplicateParameter(FaceId, String),

    /// Spline edges do not form a connected chain.
    #[error("spline edges are not a connected chain: {0}")]
    InvalidSpline(String),

    /// Degenerate geometry (collinear or coincident points).
    #[error("degenerate geometry: {0}")]
    Degenerate(#[from] GeomError),

    /// Degenerate vector input.
    #[error("degenerate vectors: {0}")]
    Math(#[from] MathError),

    /// Topology invariant violated.
    #[error("invalid topology: {0}")]
    Invalid(String),
}

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, TopoError>;
