//! Faces: closed loops of half-edges with a local frame and metadata.

use crate::{EdgeId, FaceId, HalfEdge, HalfEdgeId, Result, TopoError, Topology, VertexId};
use foldmesh_geom::Frame;
use foldmesh_math::{vector, Point2, Point3, Vec3};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

/// Which diagonal of a quad is preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagonal {
    /// Loop vertices 0 and 2.
    First,
    /// Loop vertices 1 and 3.
    Second,
}

impl Diagonal {
    /// The other diagonal.
    pub fn flipped(self) -> Self {
        match self {
            Diagonal::First => Diagonal::Second,
            Diagonal::Second => Diagonal::First,
        }
    }

    /// Loop indices of the diagonal endpoints.
    pub fn indices(self) -> (usize, usize) {
        match self {
            Diagonal::First => (0, 2),
            Diagonal::Second => (1, 3),
        }
    }
}

/// Face variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceKind {
    /// General polygon.
    Polygon,
    /// Exactly three vertices.
    Triangle,
    /// Exactly four vertices, with a preferred diagonal.
    Quad {
        /// Selected diagonal.
        diagonal: Diagonal,
    },
}

/// A face bounded by a closed loop of half-edges.
///
/// The head of half-edge `i` is the tail of half-edge `(i + 1) % n`. The
/// frame origin is the vertex centroid, its Z axis the face normal and its X
/// axis the first half-edge projected off the normal.
#[derive(Debug, Clone)]
pub struct Face {
    pub(crate) half_edges: Vec<HalfEdgeId>,
    pub(crate) frame: Frame,
    pub(crate) kind: FaceKind,
    pub(crate) params: BTreeMap<String, Value>,
}

impl Face {
    /// Loop half-edges in order.
    pub fn half_edges(&self) -> &[HalfEdgeId] {
        &self.half_edges
    }

    /// Number of vertices (and half-edges).
    pub fn len(&self) -> usize {
        self.half_edges.len()
    }

    /// Always `false`: a face has at least three half-edges.
    pub fn is_empty(&self) -> bool {
        self.half_edges.is_empty()
    }

    /// Local coordinate frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Unit normal.
    pub fn normal(&self) -> Vec3 {
        self.frame.z_dir.into_inner()
    }

    /// Vertex centroid.
    pub fn centroid(&self) -> Point3 {
        self.frame.origin
    }

    /// Face variant.
    pub fn kind(&self) -> FaceKind {
        self.kind
    }

    /// All metadata parameters.
    pub fn parameters(&self) -> &BTreeMap<String, Value> {
        &self.params
    }
}

/// Newell's method: twice the area vector of a (possibly non-planar) polygon.
pub(crate) fn newell_normal(points: &[Point3]) -> Vec3 {
    let n = points.len();
    let mut normal = Vec3::zeros();
    for i in 0..n {
        let curr = points[i];
        let next = points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    normal
}

fn centroid(points: &[Point3]) -> Point3 {
    let sum = points.iter().fold(Vec3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / points.len() as f64)
}

impl Topology {
    /// Add a face from an ordered vertex loop and an explicit normal.
    ///
    /// The normal must not point against the loop's winding; reverse the
    /// loop to get the opposite side.
    ///
    /// Loops of three and four vertices become [`FaceKind::Triangle`] and
    /// [`FaceKind::Quad`]; anything longer is a [`FaceKind::Polygon`].
    pub fn add_face(&mut self, vertices: &[VertexId], normal: Vec3) -> Result<FaceId> {
        self.create_face(vertices, Some(normal))
    }

    /// Add a triangle. Without a normal, it follows the winding.
    pub fn add_triangle(&mut self, vertices: &[VertexId], normal: Option<Vec3>) -> Result<FaceId> {
        if vertices.len() != 3 {
            return Err(TopoError::WrongVertexCount {
                expected: 3,
                got: vertices.len(),
            });
        }
        self.create_face(vertices, normal)
    }

    /// Add a quad. Without a normal, it follows the winding.
    ///
    /// The shorter diagonal is selected; on a tie within tolerance, 0-2.
    pub fn add_quad(&mut self, vertices: &[VertexId], normal: Option<Vec3>) -> Result<FaceId> {
        if vertices.len() != 4 {
            return Err(TopoError::WrongVertexCount {
                expected: 4,
                got: vertices.len(),
            });
        }
        self.create_face(vertices, normal)
    }

    /// Add a polygon whose normal follows the winding.
    pub fn add_polygon(&mut self, vertices: &[VertexId]) -> Result<FaceId> {
        self.create_face(vertices, None)
    }

    fn create_face(&mut self, vertices: &[VertexId], normal: Option<Vec3>) -> Result<FaceId> {
        let n = vertices.len();
        if n < 3 {
            return Err(TopoError::TooFewVertices(n));
        }
        let mut seen = HashSet::with_capacity(n);
        for &v in vertices {
            self.vertex(v)?;
            if !seen.insert(v) {
                return Err(TopoError::DuplicateVertex(v));
            }
        }

        let points: Vec<Point3> = vertices.iter().map(|&v| self.vertices[v].point).collect();
        let winding = newell_normal(&points);
        let normal = match normal {
            Some(n) if n.dot(&winding) < 0.0 => return Err(TopoError::NormalAgainstWinding),
            Some(n) => n,
            None => winding,
        };
        let frame = Frame::new(centroid(&points), normal, points[1] - points[0])?;

        let kind = match n {
            3 => FaceKind::Triangle,
            4 => {
                let d0 = (points[2] - points[0]).norm();
                let d1 = (points[3] - points[1]).norm();
                let diagonal = if d1 < d0 - self.tolerance.linear {
                    Diagonal::Second
                } else {
                    Diagonal::First
                };
                FaceKind::Quad { diagonal }
            }
            _ => FaceKind::Polygon,
        };

        let half_edges: Vec<HalfEdgeId> = (0..n)
            .map(|i| {
                self.half_edges
                    .insert(HalfEdge::new(vertices[i], vertices[(i + 1) % n]))
            })
            .collect();
        let id = self.faces.insert(Face {
            half_edges: half_edges.clone(),
            frame,
            kind,
            params: BTreeMap::new(),
        });
        for he in half_edges {
            self.attach_half_edge_to_face(he, id);
        }
        debug!(face = ?id, vertices = n, ?kind, "added face");
        Ok(id)
    }

    /// Loop half-edges in order.
    pub fn face_half_edges(&self, face: FaceId) -> Result<&[HalfEdgeId]> {
        Ok(&self.face(face)?.half_edges)
    }

    /// Loop vertices in order (the tail of each half-edge).
    pub fn face_vertices(&self, face: FaceId) -> Result<Vec<VertexId>> {
        self.face(face)?
            .half_edges
            .iter()
            .map(|&he| -> Result<VertexId> { Ok(self.half_edge(he)?.tail) })
            .collect()
    }

    /// Loop vertex positions in order.
    pub fn face_points(&self, face: FaceId) -> Result<Vec<Point3>> {
        self.face_vertices(face)?
            .into_iter()
            .map(|v| -> Result<Point3> { Ok(self.vertex(v)?.point) })
            .collect()
    }

    /// Edges of the loop, in loop order, skipping unlinked half-edges.
    pub fn face_edges(&self, face: FaceId) -> Result<Vec<EdgeId>> {
        let f = self.face(face)?;
        Ok(f.half_edges
            .iter()
            .filter_map(|&he| self.half_edges.get(he)?.edge)
            .collect())
    }

    /// Face area from Newell's method.
    pub fn face_area(&self, face: FaceId) -> Result<f64> {
        Ok(newell_normal(&self.face_points(face)?).norm() / 2.0)
    }

    /// Vertex positions in the face's local XY coordinates.
    pub fn flatten_face(&self, face: FaceId) -> Result<Vec<Point2>> {
        let frame = &self.face(face)?.frame;
        Ok(self
            .face_points(face)?
            .iter()
            .map(|p| frame.project(p))
            .collect())
    }

    /// Rotate the loop so `start` comes first, keeping the normal.
    ///
    /// The frame X axis follows the new first half-edge. A quad keeps the
    /// same diagonal segment. Returns `false` if `start` is not on the loop,
    /// is already first, or the new first half-edge is parallel to the
    /// normal.
    pub fn reorder_vertices(&mut self, face: FaceId, start: VertexId) -> bool {
        let Ok(verts) = self.face_vertices(face) else {
            return false;
        };
        let Some(shift) = verts.iter().position(|&v| v == start) else {
            return false;
        };
        if shift == 0 {
            return false;
        }
        let Ok(points) = self.face_points(face) else {
            return false;
        };
        let f = &self.faces[face];
        let n = points.len();
        let x_hint = points[(shift + 1) % n] - points[shift];
        let frame = match Frame::new(f.frame.origin, f.normal(), x_hint) {
            Ok(frame) => frame,
            Err(err) => {
                warn!(?face, %err, "cannot reorder face loop");
                return false;
            }
        };

        let f = &mut self.faces[face];
        f.half_edges.rotate_left(shift);
        f.frame = frame;
        if let FaceKind::Quad { diagonal } = f.kind {
            if shift % 2 == 1 {
                f.kind = FaceKind::Quad {
                    diagonal: diagonal.flipped(),
                };
            }
        }
        true
    }

    /// Reverse the loop orientation and negate the normal.
    ///
    /// Each half-edge is reversed in place; the first vertex stays first.
    /// Cached folds on the face's edges are cleared.
    pub fn flip_face(&mut self, face: FaceId) -> Result<()> {
        let points = self.face_points(face)?;
        let f = self.face(face)?;
        let normal = -f.normal();
        let last = points[points.len() - 1];
        let frame = Frame::new(f.frame.origin, normal, last - points[0])?;

        let mut loop_ = f.half_edges.clone();
        loop_.reverse();
        for &he in &loop_ {
            self.reverse_half_edge(he);
        }
        let f = &mut self.faces[face];
        f.half_edges = loop_;
        f.frame = frame;
        debug!(?face, "flipped face");
        Ok(())
    }

    /// Remove a face and every link to it.
    ///
    /// Its half-edges leave their edges; an edge left empty is removed,
    /// while an edge still holding a neighbour's half-edge stays as a
    /// boundary edge. Vertices are kept. Returns `false` if the face does not
    /// exist (so removing twice is harmless).
    pub fn remove_face(&mut self, face: FaceId) -> bool {
        let Some(f) = self.faces.remove(face) else {
            return false;
        };

        for &he in &f.half_edges {
            let Some(h) = self.half_edges.remove(he) else {
                continue;
            };
            if let Some(v) = self.vertices.get_mut(h.tail) {
                v.faces.remove(&face);
            }
            let Some(edge) = h.edge else {
                continue;
            };
            let remaining = match self.edges.get_mut(edge) {
                Some(e) => {
                    e.half_edges.retain(|&x| x != he);
                    e.half_edges.len()
                }
                None => continue,
            };
            if remaining == 0 {
                self.remove_edge(edge);
            } else {
                self.clear_fold(edge);
                if let Some(e) = self.edges.get_mut(edge) {
                    let first = e.half_edges[0];
                    if let Some(h) = self.half_edges.get(first) {
                        e.vertices = [h.tail, h.head];
                    }
                }
            }
        }
        debug!(?face, half_edges = f.half_edges.len(), "removed face");
        true
    }

    /// Attach a metadata value to a face.
    ///
    /// Fails if the face already has a value under `key`.
    pub fn add_parameter(
        &mut self,
        face: FaceId,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<()> {
        let f = self.faces.get_mut(face).ok_or(TopoError::MissingFace(face))?;
        let key = key.into();
        if f.params.contains_key(&key) {
            return Err(TopoError::DuplicateParameter(face, key));
        }
        f.params.insert(key, value.into());
        Ok(())
    }

    /// Metadata value of a face.
    pub fn parameter(&self, face: FaceId, key: &str) -> Option<&Value> {
        self.faces.get(face)?.params.get(key)
    }

    /// Unit normal of a face.
    pub fn face_normal(&self, face: FaceId) -> Result<Vec3> {
        Ok(self.face(face)?.normal())
    }

    /// Normal recomputed from the vertex winding.
    pub fn winding_normal(&self, face: FaceId) -> Result<Vec3> {
        Ok(vector::normalize(&newell_normal(&self.face_points(face)?))?)
    }
}
