//! Undirected edges grouping the half-edges of up to two faces.

use crate::{EdgeId, FaceId, HalfEdgeId, Result, TopoError, Topology, VertexId};
use foldmesh_geom::{Curve3d, Line3d};
use foldmesh_math::{Dir3, Point3};
use tracing::debug;

/// Fold between the two faces of an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fold {
    /// Dihedral angle in radians, in `[0, 2π)`. A flat fold is `π`.
    pub angle: f64,
    /// Unit vector halfway between the two face normals.
    pub axis: Dir3,
}

impl Fold {
    /// Dihedral angle in degrees.
    pub fn degrees(&self) -> f64 {
        self.angle.to_degrees()
    }
}

/// An undirected edge.
///
/// Holds one half-edge on the mesh boundary and two on an interior edge.
#[derive(Debug, Clone)]
pub struct Edge {
    pub(crate) vertices: [VertexId; 2],
    pub(crate) half_edges: Vec<HalfEdgeId>,
    pub(crate) fold: Option<Fold>,
}

impl Edge {
    /// Endpoints, ordered as the first half-edge runs.
    pub fn vertices(&self) -> [VertexId; 2] {
        self.vertices
    }

    /// Member half-edges.
    pub fn half_edges(&self) -> &[HalfEdgeId] {
        &self.half_edges
    }

    /// Cached fold, if computed.
    pub fn fold(&self) -> Option<Fold> {
        self.fold
    }

    /// Whether only one face uses this edge.
    pub fn is_boundary(&self) -> bool {
        self.half_edges.len() < 2
    }

    /// The endpoint that is not `v`.
    pub fn other_vertex(&self, v: VertexId) -> Option<VertexId> {
        match self.vertices {
            [a, b] if a == v => Some(b),
            [a, b] if b == v => Some(a),
            _ => None,
        }
    }
}

impl Topology {
    /// Group one or two half-edges into an edge.
    ///
    /// The half-edges must join the same pair of vertices, must not already
    /// belong to an edge, and must come from different faces. Both endpoint
    /// vertices register the new edge.
    pub fn add_edge(&mut self, half_edges: &[HalfEdgeId]) -> Result<EdgeId> {
        let (&first, rest) = half_edges.split_first().ok_or(TopoError::EmptyEdge)?;
        if half_edges.len() > 2 {
            return Err(TopoError::TooManyHalfEdges(half_edges.len()));
        }

        let lead = self.half_edge(first)?;
        let (a, b) = (lead.tail, lead.head);
        let lead_face = lead.face;
        for &id in half_edges {
            let he = self.half_edge(id)?;
            if let Some(edge) = he.edge {
                return Err(TopoError::AlreadyLinked(id, edge));
            }
        }
        if let Some(&second) = rest.first() {
            if second == first {
                return Err(TopoError::MismatchedHalfEdges(first, second));
            }
            let other = self.half_edge(second)?;
            if !other.joins(a, b) {
                return Err(TopoError::MismatchedHalfEdges(first, second));
            }
            if let (Some(fa), Some(fb)) = (lead_face, other.face) {
                if fa == fb {
                    return Err(TopoError::DuplicateFaceOnEdge(fa));
                }
            }
        }
        if let Some(existing) = self.edge_between(a, b) {
            return Err(TopoError::EdgeExists(a, b, existing));
        }

        let id = self.edges.insert(Edge {
            vertices: [a, b],
            half_edges: half_edges.to_vec(),
            fold: None,
        });
        for &he in half_edges {
            self.attach_half_edge_to_edge(he, id);
        }
        debug!(edge = ?id, half_edges = half_edges.len(), "added edge");
        Ok(id)
    }

    /// The endpoint of `edge` that is not `v`.
    pub fn other_vertex(&self, edge: EdgeId, v: VertexId) -> Option<VertexId> {
        self.edges.get(edge)?.other_vertex(v)
    }

    /// Edge joining two vertices, if any.
    pub fn edge_between(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        let v = self.vertices.get(a)?;
        v.edges
            .iter()
            .copied()
            .find(|&e| self.edges.get(e).is_some_and(|edge| edge.other_vertex(a) == Some(b)))
    }

    /// Edge shared by two faces, if any.
    pub fn shared_edge(&self, f1: FaceId, f2: FaceId) -> Option<EdgeId> {
        let face = self.faces.get(f1)?;
        face.half_edges().iter().find_map(|&he| {
            let edge = self.half_edges.get(he)?.edge?;
            self.edge_faces(edge).contains(&f2).then_some(edge)
        })
    }

    /// Faces using an edge.
    pub fn edge_faces(&self, edge: EdgeId) -> Vec<FaceId> {
        self.edges
            .get(edge)
            .map(|e| {
                e.half_edges
                    .iter()
                    .filter_map(|&he| self.half_edges.get(he)?.face)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Segment from the first to the second endpoint.
    pub fn edge_line(&self, edge: EdgeId) -> Result<Line3d> {
        let [a, b] = self.edge(edge)?.vertices;
        Ok(Line3d::from_points(
            self.vertex(a)?.point,
            self.vertex(b)?.point,
        ))
    }

    /// Edge length.
    pub fn edge_length(&self, edge: EdgeId) -> Result<f64> {
        Ok(self.edge_line(edge)?.length())
    }

    /// Edge midpoint.
    pub fn edge_midpoint(&self, edge: EdgeId) -> Result<Point3> {
        Ok(self.edge_line(edge)?.midpoint())
    }

    /// Whether the edge endpoints coincide with the curve endpoints, in
    /// either order, within the linear tolerance.
    pub fn is_at_curve(&self, edge: EdgeId, curve: &dyn Curve3d) -> bool {
        let Ok(line) = self.edge_line(edge) else {
            return false;
        };
        let tol = &self.tolerance;
        let (p, q) = (line.start_point(), line.end_point());
        let (s, e) = (curve.start_point(), curve.end_point());
        (tol.points_equal(&p, &s) && tol.points_equal(&q, &e))
            || (tol.points_equal(&p, &e) && tol.points_equal(&q, &s))
    }

    /// Drop the cached fold of an edge and of its half-edges.
    pub(crate) fn clear_fold(&mut self, edge: EdgeId) {
        let Some(e) = self.edges.get_mut(edge) else {
            return;
        };
        e.fold = None;
        for &he in &e.half_edges {
            if let Some(h) = self.half_edges.get_mut(he) {
                h.angle = None;
            }
        }
    }

    /// Remove an edge, unlinking its half-edges, vertices and splines.
    pub(crate) fn remove_edge(&mut self, edge: EdgeId) {
        let Some(e) = self.edges.remove(edge) else {
            return;
        };
        for he in e.half_edges {
            if let Some(h) = self.half_edges.get_mut(he) {
                h.edge = None;
                h.angle = None;
            }
        }
        for v in e.vertices {
            if let Some(vertex) = self.vertices.get_mut(v) {
                vertex.edges.remove(&edge);
            }
        }
        self.detach_edge_from_splines(edge);
        debug!(?edge, "removed edge");
    }
}
