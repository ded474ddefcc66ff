//! Ordered chains of edges.

use crate::{EdgeId, Result, SplineId, TopoError, Topology, VertexId};
use tracing::debug;

/// A connected chain of edges.
///
/// `vertices` has one more entry than `edges`; edge `i` joins vertices `i`
/// and `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spline {
    pub(crate) edges: Vec<EdgeId>,
    pub(crate) vertices: Vec<VertexId>,
}

impl Spline {
    /// Edges in chain order.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Vertices in chain order.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Whether the chain ends where it starts.
    pub fn is_closed(&self) -> bool {
        self.edges.len() > 2 && self.vertices.first() == self.vertices.last()
    }
}

impl Topology {
    /// Add a spline through a chain of existing edges.
    ///
    /// Consecutive edges must share a vertex.
    pub fn add_spline(&mut self, edges: &[EdgeId]) -> Result<SplineId> {
        let (&first, rest) = edges
            .split_first()
            .ok_or_else(|| TopoError::InvalidSpline("no edges".into()))?;
        let [a, b] = self.edge(first)?.vertices();

        // Start from the end the second edge does not touch
        let start = match rest.first() {
            Some(&next) => {
                let [c, d] = self.edge(next)?.vertices();
                if a == c || a == d {
                    b
                } else {
                    a
                }
            }
            None => a,
        };

        let mut vertices = vec![start];
        let mut current = start;
        for &edge in edges {
            let next = self.other_vertex(edge, current).ok_or_else(|| {
                TopoError::InvalidSpline(format!("edge {edge:?} does not touch vertex {current:?}"))
            })?;
            vertices.push(next);
            current = next;
        }

        let id = self.splines.insert(Spline {
            edges: edges.to_vec(),
            vertices,
        });
        debug!(spline = ?id, edges = edges.len(), "added spline");
        Ok(id)
    }

    /// Total length of a spline's edges.
    pub fn spline_length(&self, spline: SplineId) -> Result<f64> {
        self.spline(spline)?
            .edges
            .iter()
            .map(|&e| self.edge_length(e))
            .sum()
    }

    /// Remove a spline. Its edges are untouched.
    pub fn remove_spline(&mut self, spline: SplineId) -> bool {
        self.splines.remove(spline).is_some()
    }

    /// Cut a removed edge out of every spline holding it.
    ///
    /// The chain breaks at the edge; the longer side survives (the leading
    /// side on a tie) and a spline left with no edges is removed.
    pub(crate) fn detach_edge_from_splines(&mut self, edge: EdgeId) {
        let mut emptied = Vec::new();
        for (id, spline) in self.splines.iter_mut() {
            let Some(i) = spline.edges.iter().position(|&e| e == edge) else {
                continue;
            };
            let trailing = spline.edges.len() - i - 1;
            if i >= trailing {
                spline.edges.truncate(i);
                spline.vertices.truncate(i + 1);
            } else {
                spline.edges.drain(..=i);
                spline.vertices.drain(..=i);
            }
            if spline.edges.is_empty() {
                emptied.push(id);
            }
        }
        for id in emptied {
            self.splines.remove(id);
            debug!(spline = ?id, "removed empty spline");
        }
    }
}
