//! Signed dihedral angles across edges.
//!
//! For a half-edge `e` on face `F`, the vector `normalize(n_F × dir(e))`
//! lies in `F` and points from the edge into the face. Placing the two
//! such vectors of an edge at its midpoint, together with the negated mean
//! normal, gives three points on a unit circle around the edge. The sweep of
//! the arc through them, in order, is the dihedral angle over the full
//! `[0, 2π)` range:
//!
//! - coplanar faces measure `π`;
//! - a convex fold (outward normals, box corner seen from outside)
//!   measures below `π`, a right-angle corner exactly `π/2`;
//! - a concave fold measures above `π`;
//! - faces folded flat onto each other (opposite normals) measure `0`.

use crate::{EdgeId, FaceId, Fold, HalfEdgeId, Result, TopoError, Topology};
use foldmesh_geom::Arc3d;
use foldmesh_math::{vector, Dir3};
use tracing::{trace, warn};

impl Topology {
    /// Dihedral angle between the faces of two half-edges of `edge`.
    ///
    /// The result is cached on the edge and on both half-edges.
    pub fn compute_dihedral(
        &mut self,
        edge: EdgeId,
        he_a: HalfEdgeId,
        he_b: HalfEdgeId,
    ) -> Result<Fold> {
        let e = self.edge(edge)?;
        for he in [he_a, he_b] {
            if !e.half_edges().contains(&he) {
                return Err(TopoError::NotMember(he, format!("edge {edge:?}")));
            }
        }
        if he_a == he_b {
            return Err(TopoError::MismatchedHalfEdges(he_a, he_b));
        }

        let face_a = self.half_edge(he_a)?.face.ok_or(TopoError::FreeHalfEdge(he_a))?;
        let face_b = self.half_edge(he_b)?.face.ok_or(TopoError::FreeHalfEdge(he_b))?;
        let n_a = self.face_normal(face_a)?;
        let n_b = self.face_normal(face_b)?;
        let a_y = vector::cross_normalized(&n_a, &self.half_edge_direction(he_a)?)?;
        let b_y = vector::cross_normalized(&n_b, &self.half_edge_direction(he_b)?)?;

        let sum = n_a + n_b;
        // |n_a + n_b| is 2 sin(d / 2) for a deviation d from opposite normals
        let fold = if sum.norm() < self.tolerance.angular {
            // Closed flat: the arc collapses, and the mean normal tends to -a_y
            Fold {
                angle: 0.0,
                axis: Dir3::new_unchecked(-a_y),
            }
        } else {
            let e_n = vector::normalize(&sum)?;
            let mid = self.edge_midpoint(edge)?;
            let arc = Arc3d::through_points(mid + a_y, mid - e_n, mid + b_y)?;
            Fold {
                angle: arc.sweep(),
                axis: Dir3::new_unchecked(e_n),
            }
        };

        if let Some(e) = self.edges.get_mut(edge) {
            e.fold = Some(fold);
        }
        for he in [he_a, he_b] {
            if let Some(h) = self.half_edges.get_mut(he) {
                h.angle = Some(fold.angle);
            }
        }
        trace!(?edge, degrees = fold.degrees(), "computed dihedral");
        Ok(fold)
    }

    /// Dihedral angle of an edge's two faces; `None` on a boundary edge.
    pub fn compute_edge_dihedral(&mut self, edge: EdgeId) -> Result<Option<Fold>> {
        let pair = match *self.edge(edge)?.half_edges() {
            [a, b] => Some((a, b)),
            _ => None,
        };
        match pair {
            Some((a, b)) => self.compute_dihedral(edge, a, b).map(Some),
            None => Ok(None),
        }
    }

    /// Compute every interior edge's dihedral angle.
    ///
    /// Edges with degenerate geometry are logged and skipped.
    pub fn compute_all_dihedrals(&mut self) -> Vec<(EdgeId, Fold)> {
        let ids: Vec<EdgeId> = self.edges.keys().collect();
        let mut folds = Vec::with_capacity(ids.len());
        for edge in ids {
            match self.compute_edge_dihedral(edge) {
                Ok(Some(fold)) => folds.push((edge, fold)),
                Ok(None) => {}
                Err(err) => warn!(?edge, %err, "skipping dihedral"),
            }
        }
        folds
    }

    /// Smallest cached dihedral angle across a face's edges.
    ///
    /// `None` if no edge of the face has a computed fold.
    pub fn min_edge_angle(&self, face: FaceId) -> Option<f64> {
        self.face_edges(face)
            .ok()?
            .into_iter()
            .filter_map(|e| self.edges.get(e)?.fold)
            .map(|f| f.angle)
            .reduce(f64::min)
    }
}
