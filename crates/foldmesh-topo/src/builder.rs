//! Building a topology from indexed polygons.

use crate::{EdgeId, HalfEdgeId, Result, TopoError, Topology, VertexId};
use foldmesh_math::{Point3, Tolerance};
use std::collections::BTreeMap;
use tracing::debug;

impl Topology {
    /// Build a topology from a point list and polygons indexing into it.
    ///
    /// Points closer than the linear tolerance are welded into one vertex.
    /// Each polygon becomes a face whose normal follows its winding, and
    /// half-edges over the same vertex pair are paired into edges.
    pub fn from_polygons(
        points: &[Point3],
        polygons: &[Vec<usize>],
        tolerance: Tolerance,
    ) -> Result<Self> {
        let mut topo = Self::with_tolerance(tolerance);
        let ids: Vec<VertexId> = points.iter().map(|&p| topo.add_vertex_dedup(p)).collect();
        let welded = points.len() - topo.vertices.len();
        if welded > 0 {
            debug!(welded, unique = topo.vertices.len(), "welded duplicate points");
        }

        for (i, polygon) in polygons.iter().enumerate() {
            let verts = polygon
                .iter()
                .map(|&k| {
                    ids.get(k).copied().ok_or_else(|| {
                        TopoError::Invalid(format!("polygon {i} indexes missing point {k}"))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            topo.add_polygon(&verts)?;
        }

        let edges = topo.stitch_edges()?;
        debug!(
            vertices = topo.vertices.len(),
            faces = topo.faces.len(),
            edges = edges.len(),
            "built topology from polygons"
        );
        Ok(topo)
    }

    /// Group every face half-edge that has no edge yet into edges.
    ///
    /// Half-edges over the same unordered vertex pair share an edge; a
    /// lone half-edge gets a boundary edge, or joins an existing boundary
    /// edge over its pair. Fails before creating anything if a pair would end
    /// up with more than two half-edges, or with two running the same way.
    pub fn stitch_edges(&mut self) -> Result<Vec<EdgeId>> {
        let mut groups: BTreeMap<(VertexId, VertexId), Vec<HalfEdgeId>> = BTreeMap::new();
        for (id, he) in &self.half_edges {
            if he.edge.is_some() || he.face.is_none() {
                continue;
            }
            let key = if he.tail < he.head {
                (he.tail, he.head)
            } else {
                (he.head, he.tail)
            };
            groups.entry(key).or_default().push(id);
        }
        let mut joins = Vec::new();
        for (&(a, b), group) in &groups {
            let existing = self.edge_between(a, b);
            let held = existing.map_or(0, |e| self.edges[e].half_edges.len());
            if group.len() + held > 2 {
                return Err(TopoError::NonManifoldEdge {
                    a,
                    b,
                    count: group.len() + held,
                });
            }
            let mut tails: Vec<VertexId> = group.iter().map(|&he| self.half_edges[he].tail).collect();
            if let Some(e) = existing {
                tails.extend(self.edges[e].half_edges.iter().map(|&he| self.half_edges[he].tail));
            }
            if let [t0, t1] = tails[..] {
                if t0 == t1 {
                    return Err(TopoError::InconsistentWinding { a, b });
                }
            }
            if let Some(existing) = existing {
                joins.push((existing, group[0]));
            }
        }

        let mut created = Vec::with_capacity(groups.len());
        for ((a, b), group) in groups {
            if self.edge_between(a, b).is_none() {
                created.push(self.add_edge(&group)?);
            }
        }
        for (edge, he) in joins {
            // Second face on an existing boundary edge
            self.join_boundary_edge(edge, he)?;
        }
        Ok(created)
    }

    fn join_boundary_edge(&mut self, edge: EdgeId, he: HalfEdgeId) -> Result<()> {
        let other = self.edges[edge].half_edges[0];
        let other_face = self.half_edge(other)?.face;
        let face = self.half_edge(he)?.face;
        if let (Some(a), Some(b)) = (other_face, face) {
            if a == b {
                return Err(TopoError::DuplicateFaceOnEdge(a));
            }
        }
        if let Some(e) = self.edges.get_mut(edge) {
            e.half_edges.push(he);
            e.fold = None;
        }
        self.attach_half_edge_to_edge(he, edge);
        Ok(())
    }
}
