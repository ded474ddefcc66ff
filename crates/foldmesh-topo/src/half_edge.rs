//! Directed half-edges.

use crate::{EdgeId, FaceId, HalfEdgeId, Result, TopoError, Topology, VertexId};
use foldmesh_math::Vec3;
use tracing::trace;

/// A directed edge from `tail` to `head`, used by at most one face.
#[derive(Debug, Clone)]
pub struct HalfEdge {
    pub(crate) tail: VertexId,
    pub(crate) head: VertexId,
    pub(crate) edge: Option<EdgeId>,
    pub(crate) face: Option<FaceId>,
    /// Dihedral angle across the owning edge, in radians.
    pub(crate) angle: Option<f64>,
}

impl HalfEdge {
    pub(crate) fn new(tail: VertexId, head: VertexId) -> Self {
        Self {
            tail,
            head,
            edge: None,
            face: None,
            angle: None,
        }
    }

    /// Start vertex.
    pub fn tail(&self) -> VertexId {
        self.tail
    }

    /// End vertex.
    pub fn head(&self) -> VertexId {
        self.head
    }

    /// Owning edge.
    pub fn edge(&self) -> Option<EdgeId> {
        self.edge
    }

    /// Owning face.
    pub fn face(&self) -> Option<FaceId> {
        self.face
    }

    /// Cached dihedral angle in radians, if computed.
    pub fn angle(&self) -> Option<f64> {
        self.angle
    }

    /// Whether this half-edge joins `a` and `b` in either direction.
    pub fn joins(&self, a: VertexId, b: VertexId) -> bool {
        (self.tail == a && self.head == b) || (self.tail == b && self.head == a)
    }
}

impl Topology {
    /// Add a half-edge from `tail` to `head`, not yet linked to anything.
    pub fn add_half_edge(&mut self, tail: VertexId, head: VertexId) -> Result<HalfEdgeId> {
        self.vertex(tail)?;
        self.vertex(head)?;
        if tail == head {
            return Err(TopoError::DuplicateVertex(tail));
        }
        Ok(self.half_edges.insert(HalfEdge::new(tail, head)))
    }

    /// Add a half-edge and link it to an existing edge.
    ///
    /// Fails if the edge exists but cannot take the half-edge.
    pub fn add_half_edge_on(
        &mut self,
        tail: VertexId,
        head: VertexId,
        edge: EdgeId,
    ) -> Result<HalfEdgeId> {
        let e = self.edge(edge)?;
        let count = e.half_edges().len() + 1;
        if count > 2 {
            return Err(TopoError::TooManyHalfEdges(count));
        }
        let [a, b] = e.vertices();
        let first = e.half_edges().first().copied();
        let id = self.add_half_edge(tail, head)?;
        if !((tail == a && head == b) || (tail == b && head == a)) {
            self.half_edges.remove(id);
            return Err(match first {
                Some(first) => TopoError::MismatchedHalfEdges(first, id),
                None => TopoError::Invalid(format!("edge {edge:?} has no half-edges")),
            });
        }
        if let Some(e) = self.edges.get_mut(edge) {
            e.half_edges.push(id);
            e.fold = None;
        }
        self.attach_half_edge_to_edge(id, edge);
        Ok(id)
    }

    /// Vector from tail to head.
    pub fn half_edge_direction(&self, id: HalfEdgeId) -> Result<Vec3> {
        let he = self.half_edge(id)?;
        Ok(self.vertex(he.head)?.point - self.vertex(he.tail)?.point)
    }

    /// Distance from tail to head.
    pub fn half_edge_length(&self, id: HalfEdgeId) -> Result<f64> {
        Ok(self.half_edge_direction(id)?.norm())
    }

    /// Swap tail and head of a half-edge that is not on a face loop.
    ///
    /// Face loops are reversed as a whole by [`Topology::flip_face`].
    pub fn flip_half_edge(&mut self, id: HalfEdgeId) -> Result<()> {
        let he = self.half_edge(id)?;
        if let Some(face) = he.face {
            return Err(TopoError::HalfEdgeInFace(id, face));
        }
        self.reverse_half_edge(id);
        Ok(())
    }

    pub(crate) fn reverse_half_edge(&mut self, id: HalfEdgeId) {
        let Some(he) = self.half_edges.get_mut(id) else {
            return;
        };
        std::mem::swap(&mut he.tail, &mut he.head);
        he.angle = None;
        let (tail, head, edge) = (he.tail, he.head, he.edge);
        let Some(edge) = edge else {
            return;
        };
        if let Some(e) = self.edges.get_mut(edge) {
            if e.half_edges.first() == Some(&id) {
                e.vertices = [tail, head];
            }
        }
        self.clear_fold(edge);
    }

    /// Link a half-edge to an edge that lists it as a member.
    ///
    /// On success both endpoints register the edge. Returns `false` if a
    /// handle is stale or the edge does not contain the half-edge.
    pub fn attach_half_edge_to_edge(&mut self, id: HalfEdgeId, edge: EdgeId) -> bool {
        let member = self
            .edges
            .get(edge)
            .is_some_and(|e| e.half_edges().contains(&id));
        let Some(he) = self.half_edges.get_mut(id).filter(|_| member) else {
            return false;
        };
        he.edge = Some(edge);
        let (tail, head) = (he.tail, he.head);
        self.register_vertex_edge(tail, edge);
        self.register_vertex_edge(head, edge);
        trace!(half_edge = ?id, ?edge, "attached half-edge to edge");
        true
    }

    /// Link a half-edge to a face whose loop contains it.
    ///
    /// On success both endpoints register the face. Returns `false` if a
    /// handle is stale or the loop does not contain the half-edge.
    pub fn attach_half_edge_to_face(&mut self, id: HalfEdgeId, face: FaceId) -> bool {
        let member = self
            .faces
            .get(face)
            .is_some_and(|f| f.half_edges().contains(&id));
        let Some(he) = self.half_edges.get_mut(id).filter(|_| member) else {
            return false;
        };
        he.face = Some(face);
        let (tail, head) = (he.tail, he.head);
        self.register_vertex_face(tail, face);
        self.register_vertex_face(head, face);
        trace!(half_edge = ?id, ?face, "attached half-edge to face");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{add_points, two_squares};
    use approx::assert_relative_eq;

    #[test]
    fn test_direction_and_length() {
        let mut topo = Topology::new();
        let v = add_points(&mut topo, &[[1.0, 1.0, 0.0], [4.0, 5.0, 0.0]]);
        let he = topo.add_half_edge(v[0], v[1]).unwrap();
        assert_relative_eq!(topo.half_edge_direction(he).unwrap(), Vec3::new(3.0, 4.0, 0.0));
        assert_relative_eq!(topo.half_edge_length(he).unwrap(), 5.0);

        topo.flip_half_edge(he).unwrap();
        assert_eq!(topo.half_edge(he).unwrap().tail(), v[1]);
        assert_relative_eq!(topo.half_edge_direction(he).unwrap(), Vec3::new(-3.0, -4.0, 0.0));
    }

    #[test]
    fn test_rejects_degenerate_and_unknown_vertices() {
        let (mut topo, left, _) = two_squares();
        let v = topo.face_vertices(left).unwrap();
        assert_eq!(
            topo.add_half_edge(v[0], v[0]).unwrap_err(),
            TopoError::DuplicateVertex(v[0])
        );

        let stale = topo.add_vertex(foldmesh_math::Point3::new(9.0, 9.0, 9.0));
        topo.vertices.remove(stale);
        assert_eq!(
            topo.add_half_edge(v[0], stale).unwrap_err(),
            TopoError::MissingVertex(stale)
        );
    }

    #[test]
    fn test_face_half_edges_cannot_flip_alone() {
        let (mut topo, left, _) = two_squares();
        let he = topo.face(left).unwrap().half_edges()[0];
        assert_eq!(
            topo.flip_half_edge(he).unwrap_err(),
            TopoError::HalfEdgeInFace(he, left)
        );
    }

    #[test]
    fn test_attach_requires_membership() {
        let (mut topo, left, right) = two_squares();
        let he = topo.face(left).unwrap().half_edges()[0];
        let foreign_edge = topo.face(right).unwrap().half_edges()[1];
        let foreign_edge = topo.half_edge(foreign_edge).unwrap().edge().unwrap();

        assert!(!topo.attach_half_edge_to_face(he, right));
        assert!(!topo.attach_half_edge_to_edge(he, foreign_edge));
        assert_eq!(topo.half_edge(he).unwrap().face(), Some(left));

        // Re-attaching to the owning face is accepted
        assert!(topo.attach_half_edge_to_face(he, left));
    }

    #[test]
    fn test_add_half_edge_on_boundary_edge() {
        let (mut topo, left, _) = two_squares();
        let he = topo.face(left).unwrap().half_edges()[0];
        let edge = topo.half_edge(he).unwrap().edge().unwrap();
        let (tail, head) = {
            let h = topo.half_edge(he).unwrap();
            (h.tail(), h.head())
        };

        let twin = topo.add_half_edge_on(head, tail, edge).unwrap();
        assert_eq!(topo.edge(edge).unwrap().half_edges().len(), 2);
        assert_eq!(topo.half_edge(twin).unwrap().edge(), Some(edge));

        // Full now
        assert_eq!(
            topo.add_half_edge_on(tail, head, edge).unwrap_err(),
            TopoError::TooManyHalfEdges(3)
        );
    }
}
