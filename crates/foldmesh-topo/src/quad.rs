//! Quad diagonal selection.

use crate::{Diagonal, FaceId, FaceKind, Result, TopoError, Topology, VertexId};
use foldmesh_geom::Line3d;

impl Topology {
    fn quad_diagonal_kind(&self, face: FaceId) -> Result<Diagonal> {
        match self.face(face)?.kind {
            FaceKind::Quad { diagonal } => Ok(diagonal),
            _ => Err(TopoError::WrongFaceKind {
                face,
                expected: "quad",
            }),
        }
    }

    /// Endpoints of the selected diagonal.
    pub fn quad_diagonal(&self, face: FaceId) -> Result<(VertexId, VertexId)> {
        let (i, j) = self.quad_diagonal_kind(face)?.indices();
        let v = self.face_vertices(face)?;
        Ok((v[i], v[j]))
    }

    /// Selected diagonal as a segment.
    pub fn quad_diagonal_line(&self, face: FaceId) -> Result<Line3d> {
        let (a, b) = self.quad_diagonal(face)?;
        Ok(Line3d::from_points(self.vertex(a)?.point, self.vertex(b)?.point))
    }

    /// Switch to the other diagonal and return it.
    pub fn flip_diagonal(&mut self, face: FaceId) -> Result<Diagonal> {
        let flipped = self.quad_diagonal_kind(face)?.flipped();
        if let Some(f) = self.faces.get_mut(face) {
            f.kind = FaceKind::Quad { diagonal: flipped };
        }
        Ok(flipped)
    }
}
