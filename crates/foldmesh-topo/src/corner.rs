//! Per-corner direction vectors and interior angles.

use crate::{FaceId, Result, Topology, VertexId};
use foldmesh_geom::Arc3d;
use foldmesh_math::{vector, Vec3};

/// Unit vectors describing one corner of a face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexVectors {
    /// Corner vertex.
    pub vertex: VertexId,
    /// Toward the previous vertex on the loop.
    pub incoming: Vec3,
    /// Toward the next vertex on the loop.
    pub outgoing: Vec3,
    /// Into the face, halving the interior angle (reflex corners included).
    pub bisector: Vec3,
    /// In-plane, orthogonal to the bisector: `normalize(outgoing - incoming)`.
    pub perpendicular: Vec3,
    /// Out of the face: `-bisector`.
    pub exterior: Vec3,
}

impl Topology {
    /// Corner vectors for every vertex of a face, in loop order.
    ///
    /// Fails on a corner whose two edges point the same way.
    pub fn vertex_vectors(&self, face: FaceId) -> Result<Vec<VertexVectors>> {
        let normal = self.face_normal(face)?;
        let verts = self.face_vertices(face)?;
        let points = self.face_points(face)?;
        let n = points.len();

        (0..n)
            .map(|i| -> Result<VertexVectors> {
                let p = points[i];
                let incoming = vector::normalize(&(points[(i + n - 1) % n] - p))?;
                let outgoing = vector::normalize(&(points[(i + 1) % n] - p))?;
                let spread = outgoing - incoming;
                let bisector = vector::normalize(&normal.cross(&spread))?;
                let perpendicular = vector::normalize(&spread)?;
                Ok(VertexVectors {
                    vertex: verts[i],
                    incoming,
                    outgoing,
                    bisector,
                    perpendicular,
                    exterior: -bisector,
                })
            })
            .collect()
    }

    /// Interior angle at every vertex of a face, in radians, in loop order.
    ///
    /// Each angle is the sweep of the arc from the outgoing direction through
    /// the bisector to the incoming direction, so reflex corners measure
    /// above `π`.
    pub fn face_angles(&self, face: FaceId) -> Result<Vec<f64>> {
        let points = self.face_points(face)?;
        self.vertex_vectors(face)?
            .iter()
            .zip(points)
            .map(|(c, p)| -> Result<f64> {
                let arc = Arc3d::through_points(p + c.outgoing, p + c.bisector, p + c.incoming)?;
                Ok(arc.sweep())
            })
            .collect()
    }
}
