//! Triangle-only queries.

use crate::{EdgeId, FaceId, FaceKind, Result, TopoError, Topology, VertexId};
use foldmesh_geom::Circle3d;
use foldmesh_math::Point3;

impl Topology {
    fn triangle_points(&self, face: FaceId) -> Result<[Point3; 3]> {
        if self.face(face)?.kind != FaceKind::Triangle {
            return Err(TopoError::WrongFaceKind {
                face,
                expected: "triangle",
            });
        }
        let p = self.face_points(face)?;
        Ok([p[0], p[1], p[2]])
    }

    /// Circle through the three corners.
    pub fn circumcircle(&self, face: FaceId) -> Result<Circle3d> {
        let [a, b, c] = self.triangle_points(face)?;
        Ok(Circle3d::through_points(a, b, c)?)
    }

    /// Center of the circumcircle.
    pub fn circumcenter(&self, face: FaceId) -> Result<Point3> {
        Ok(self.circumcircle(face)?.center)
    }

    /// Center of the inscribed circle.
    ///
    /// Each corner is weighted by the length of the side opposite it.
    pub fn incenter(&self, face: FaceId) -> Result<Point3> {
        let [v0, v1, v2] = self.triangle_points(face)?;
        let e0 = (v1 - v0).norm();
        let e1 = (v2 - v1).norm();
        let e2 = (v0 - v2).norm();
        let perimeter = e0 + e1 + e2;
        if self.tolerance.is_zero(perimeter) {
            return Err(TopoError::Degenerate(foldmesh_geom::GeomError::CoincidentPoints));
        }
        let weighted = v0.coords * e1 + v1.coords * e2 + v2.coords * e0;
        Ok(Point3::from(weighted / perimeter))
    }

    /// The corner of a triangle not on `edge`.
    pub fn triangle_other_vertex(&self, face: FaceId, edge: EdgeId) -> Result<VertexId> {
        self.triangle_points(face)?;
        if !self.face_edges(face)?.contains(&edge) {
            return Err(TopoError::EdgeNotOnFace(edge, face));
        }
        let ends = self.edge(edge)?.vertices();
        self.face_vertices(face)?
            .into_iter()
            .find(|v| !ends.contains(v))
            .ok_or_else(|| TopoError::Invalid(format!("triangle {face:?} has no free corner")))
    }
}
