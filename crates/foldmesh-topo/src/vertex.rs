//! Vertices and their adjacency sets.

use crate::{EdgeId, FaceId, Topology, VertexId};
use foldmesh_math::{Point3, Tolerance};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use tracing::trace;

/// Coordinates snapped to the linear tolerance grid.
///
/// Two points with the same key are the same vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexKey([i64; 3]);

impl VertexKey {
    /// Key of `p` on a grid of spacing `tol.linear`.
    pub fn new(p: &Point3, tol: &Tolerance) -> Self {
        let step = if tol.linear > 0.0 { tol.linear } else { f64::EPSILON };
        let q = |c: f64| (c / step).round() as i64;
        Self([q(p.x), q(p.y), q(p.z)])
    }

    /// The 26 grid cells around this one.
    pub fn neighbours(self) -> impl Iterator<Item = Self> {
        let [x, y, z] = self.0;
        (-1..=1)
            .flat_map(move |dx| {
                (-1..=1).flat_map(move |dy| (-1..=1).map(move |dz| Self([x + dx, y + dy, z + dz])))
            })
            .filter(move |&k| k != self)
    }
}

/// A mesh vertex.
///
/// Equality and hashing use only the coordinate key, so two vertices built
/// from the same coordinates are interchangeable as map keys whatever their
/// adjacency.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub(crate) point: Point3,
    key: VertexKey,
    pub(crate) edges: BTreeSet<EdgeId>,
    pub(crate) faces: BTreeSet<FaceId>,
}

impl Vertex {
    /// Vertex at `point` with no adjacency.
    pub fn new(point: Point3, tol: &Tolerance) -> Self {
        Self::with_adjacency(point, [], [], tol)
    }

    /// Vertex at `point` with the given incident edges and faces.
    pub fn with_adjacency(
        point: Point3,
        edges: impl IntoIterator<Item = EdgeId>,
        faces: impl IntoIterator<Item = FaceId>,
        tol: &Tolerance,
    ) -> Self {
        Self {
            point,
            key: VertexKey::new(&point, tol),
            edges: edges.into_iter().collect(),
            faces: faces.into_iter().collect(),
        }
    }

    /// Position.
    pub fn point(&self) -> Point3 {
        self.point
    }

    /// Coordinate key used for equality.
    pub fn key(&self) -> VertexKey {
        self.key
    }

    /// Incident edges.
    pub fn edges(&self) -> &BTreeSet<EdgeId> {
        &self.edges
    }

    /// Incident faces.
    pub fn faces(&self) -> &BTreeSet<FaceId> {
        &self.faces
    }

    /// Euclidean distance to another vertex.
    pub fn distance_to(&self, other: &Vertex) -> f64 {
        (self.point - other.point).norm()
    }

    /// Euclidean distance to a point.
    pub fn distance_to_point(&self, p: &Point3) -> f64 {
        (self.point - p).norm()
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Topology {
    /// Add a vertex at `point`.
    ///
    /// Always creates a new vertex, even when one already sits at the same
    /// coordinates; see [`Topology::add_vertex_dedup`].
    pub fn add_vertex(&mut self, point: Point3) -> VertexId {
        let vertex = Vertex::new(point, &self.tolerance);
        let key = vertex.key();
        let id = self.vertices.insert(vertex);
        self.vertex_index.entry(key).or_insert(id);
        id
    }

    /// Return the vertex at `point`, creating it if needed.
    ///
    /// Reuses whatever [`find_vertex`](Self::find_vertex) finds.
    pub fn add_vertex_dedup(&mut self, point: Point3) -> VertexId {
        if let Some(id) = self.find_vertex(&point) {
            return id;
        }
        let key = VertexKey::new(&point, &self.tolerance);
        let id = self.vertices.insert(Vertex::new(point, &self.tolerance));
        self.vertex_index.insert(key, id);
        trace!(vertex = ?id, "added welded vertex");
        id
    }

    /// Existing vertex at `point`, if any.
    ///
    /// A vertex with the same coordinate key wins; otherwise the neighbouring
    /// grid cells are searched for one within the linear tolerance, so points
    /// on either side of a cell boundary still match.
    pub fn find_vertex(&self, point: &Point3) -> Option<VertexId> {
        let key = VertexKey::new(point, &self.tolerance);
        if let Some(id) = self.indexed_vertex(&key) {
            return Some(id);
        }
        key.neighbours()
            .filter_map(|k| self.indexed_vertex(&k))
            .find(|&id| self.tolerance.points_equal(&self.vertices[id].point, point))
    }

    fn indexed_vertex(&self, key: &VertexKey) -> Option<VertexId> {
        self.vertex_index
            .get(key)
            .copied()
            .filter(|&id| self.vertices.contains_key(id))
    }

    /// Record that `edge` touches `vertex`.
    ///
    /// Returns `false` if either handle is stale, the edge does not end at
    /// the vertex, or the edge is already listed.
    pub fn register_vertex_edge(&mut self, vertex: VertexId, edge: EdgeId) -> bool {
        let touches = self
            .edges
            .get(edge)
            .is_some_and(|e| e.vertices().contains(&vertex));
        if !touches {
            return false;
        }
        match self.vertices.get_mut(vertex) {
            Some(v) => {
                let added = v.edges.insert(edge);
                if added {
                    trace!(?vertex, ?edge, "registered vertex edge");
                }
                added
            }
            None => false,
        }
    }

    /// Record that `face` touches `vertex`.
    ///
    /// Returns `false` if either handle is stale, the vertex is not on the
    /// face loop, or the face is already listed.
    pub fn register_vertex_face(&mut self, vertex: VertexId, face: FaceId) -> bool {
        let on_loop = self.faces.get(face).is_some_and(|f| {
            f.half_edges()
                .iter()
                .any(|&he| self.half_edges.get(he).is_some_and(|h| h.tail() == vertex))
        });
        if !on_loop {
            return false;
        }
        match self.vertices.get_mut(vertex) {
            Some(v) => {
                let added = v.faces.insert(face);
                if added {
                    trace!(?vertex, ?face, "registered vertex face");
                }
                added
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{add_points, two_squares};
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    #[test]
    fn test_equality_ignores_adjacency() {
        let tol = Tolerance::DEFAULT;
        let (_, left, _) = two_squares();
        let a = Vertex::new(Point3::new(1.0, 2.0, 3.0), &tol);
        let b = Vertex::with_adjacency(Point3::new(1.0, 2.0, 3.0), [], [left], &tol);
        assert_eq!(a, b);

        let mut map = HashMap::new();
        map.insert(a.clone(), "first");
        assert_eq!(map.get(&b), Some(&"first"));

        let c = Vertex::new(Point3::new(1.0, 2.0, 3.1), &tol);
        assert_ne!(a, c);
    }

    #[test]
    fn test_equality_within_tolerance() {
        let tol = Tolerance::DEFAULT;
        let a = Vertex::new(Point3::new(0.5, 0.0, 0.0), &tol);
        let b = Vertex::new(Point3::new(0.5 + 1e-9, 0.0, 0.0), &tol);
        assert_eq!(a, b);
    }

    #[test]
    fn test_distances() {
        let tol = Tolerance::DEFAULT;
        let a = Vertex::new(Point3::origin(), &tol);
        let b = Vertex::new(Point3::new(3.0, 4.0, 0.0), &tol);
        assert_relative_eq!(a.distance_to(&b), 5.0);
        assert_relative_eq!(b.distance_to_point(&Point3::new(3.0, 4.0, 2.0)), 2.0);
    }

    #[test]
    fn test_dedup_reuses_vertex() {
        let mut topo = Topology::new();
        let a = topo.add_vertex_dedup(Point3::new(1.0, 1.0, 0.0));
        let b = topo.add_vertex_dedup(Point3::new(1.0, 1.0 + 1e-9, 0.0));
        let c = topo.add_vertex_dedup(Point3::new(1.0, 2.0, 0.0));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(topo.vertices().len(), 2);
        assert_eq!(topo.find_vertex(&Point3::new(1.0, 2.0, 0.0)), Some(c));

        // Plain add always creates
        let d = topo.add_vertex(Point3::new(1.0, 1.0, 0.0));
        assert_ne!(a, d);
        assert_eq!(topo.vertex(a).unwrap(), topo.vertex(d).unwrap());
    }

    #[test]
    fn test_dedup_across_cell_boundary() {
        let mut topo = Topology::new();
        // Grid cells of 1e-6 split at 5e-7
        let a = topo.add_vertex_dedup(Point3::new(4.9999999e-7, 0.0, 0.0));
        let b = topo.add_vertex_dedup(Point3::new(5.0000001e-7, 0.0, 0.0));
        assert_ne!(
            VertexKey::new(&Point3::new(4.9999999e-7, 0.0, 0.0), topo.tolerance()),
            VertexKey::new(&Point3::new(5.0000001e-7, 0.0, 0.0), topo.tolerance())
        );
        assert_eq!(a, b);
        assert_eq!(topo.find_vertex(&Point3::new(5.0000001e-7, 0.0, 0.0)), Some(a));

        // Neighbouring cell, but farther than the tolerance
        let c = topo.add_vertex_dedup(Point3::new(4.9999999e-7, 1.4e-6, 0.0));
        assert_ne!(a, c);
        assert_eq!(topo.vertices().len(), 2);
    }

    #[test]
    fn test_register_is_guarded_and_idempotent() {
        let (mut topo, left, right) = two_squares();
        let far = add_points(&mut topo, &[[5.0, 5.0, 5.0]])[0];
        let v0 = topo.face_vertices(left).unwrap()[0];

        // Already registered by face construction
        assert!(!topo.register_vertex_face(v0, left));
        // v0 is not on the right square
        assert!(!topo.register_vertex_face(v0, right));
        assert!(!topo.register_vertex_face(far, left));

        let shared = topo.shared_edge(left, right).unwrap();
        assert!(!topo.register_vertex_edge(v0, shared));
        assert!(!topo.register_vertex_edge(far, shared));

        // Drop and re-add a legitimate registration
        let [a, _] = topo.edge(shared).unwrap().vertices();
        topo.vertices[a].edges.remove(&shared);
        assert!(topo.register_vertex_edge(a, shared));
        assert!(!topo.register_vertex_edge(a, shared));
    }
}
