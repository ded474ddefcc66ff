//! Consistency checks over the whole arena.

use crate::{Result, TopoError, Topology};

fn invalid(msg: String) -> TopoError {
    TopoError::Invalid(msg)
}

impl Topology {
    /// Check that every cross-reference in the arena agrees with its
    /// counterpart.
    ///
    /// Orphan vertices and half-edges with no face or edge are allowed.
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<()> {
        self.validate_faces()?;
        self.validate_half_edges()?;
        self.validate_edges()?;
        self.validate_vertices()
    }

    fn validate_faces(&self) -> Result<()> {
        for (id, face) in &self.faces {
            let n = face.half_edges.len();
            if n < 3 {
                return Err(invalid(format!("face {id:?} has {n} half-edges")));
            }
            for (i, &he) in face.half_edges.iter().enumerate() {
                let h = self
                    .half_edges
                    .get(he)
                    .ok_or_else(|| invalid(format!("face {id:?} holds missing half-edge {he:?}")))?;
                if h.face != Some(id) {
                    return Err(invalid(format!(
                        "half-edge {he:?} on face {id:?} points to {:?}",
                        h.face
                    )));
                }
                let next = face.half_edges[(i + 1) % n];
                let next_tail = self.half_edge(next)?.tail;
                if h.head != next_tail {
                    return Err(invalid(format!(
                        "loop of face {id:?} breaks between {he:?} and {next:?}"
                    )));
                }
                let touches = self
                    .vertices
                    .get(h.tail)
                    .is_some_and(|v| v.faces.contains(&id));
                if !touches {
                    return Err(invalid(format!(
                        "vertex {:?} does not list face {id:?}",
                        h.tail
                    )));
                }
            }
            if !face.frame.is_orthonormal(&self.tolerance) {
                return Err(invalid(format!("face {id:?} frame is not orthonormal")));
            }
        }
        Ok(())
    }

    fn validate_half_edges(&self) -> Result<()> {
        for (id, he) in &self.half_edges {
            for v in [he.tail, he.head] {
                if !self.vertices.contains_key(v) {
                    return Err(invalid(format!("half-edge {id:?} uses missing vertex {v:?}")));
                }
            }
            if let Some(face) = he.face {
                let held = self
                    .faces
                    .get(face)
                    .is_some_and(|f| f.half_edges.contains(&id));
                if !held {
                    return Err(invalid(format!("face {face:?} does not hold half-edge {id:?}")));
                }
            }
            if let Some(edge) = he.edge {
                let held = self
                    .edges
                    .get(edge)
                    .is_some_and(|e| e.half_edges.contains(&id));
                if !held {
                    return Err(invalid(format!("edge {edge:?} does not hold half-edge {id:?}")));
                }
            }
        }
        Ok(())
    }

    fn validate_edges(&self) -> Result<()> {
        for (id, edge) in &self.edges {
            let n = edge.half_edges.len();
            if n == 0 || n > 2 {
                return Err(invalid(format!("edge {id:?} has {n} half-edges")));
            }
            let [a, b] = edge.vertices;
            let mut faces = Vec::with_capacity(n);
            for &he in &edge.half_edges {
                let h = self.half_edge(he)?;
                if h.edge != Some(id) {
                    return Err(invalid(format!(
                        "half-edge {he:?} on edge {id:?} points to {:?}",
                        h.edge
                    )));
                }
                if !h.joins(a, b) {
                    return Err(invalid(format!(
                        "half-edge {he:?} does not join the ends of edge {id:?}"
                    )));
                }
                if let Some(face) = h.face {
                    if faces.contains(&face) {
                        return Err(invalid(format!("edge {id:?} meets face {face:?} twice")));
                    }
                    faces.push(face);
                }
            }
            for v in [a, b] {
                let lists = self.vertices.get(v).is_some_and(|vx| vx.edges.contains(&id));
                if !lists {
                    return Err(invalid(format!("vertex {v:?} does not list edge {id:?}")));
                }
            }
        }
        Ok(())
    }

    fn validate_vertices(&self) -> Result<()> {
        for (id, vertex) in &self.vertices {
            for &edge in &vertex.edges {
                let ends = self.edge(edge)?.vertices;
                if !ends.contains(&id) {
                    return Err(invalid(format!("vertex {id:?} lists foreign edge {edge:?}")));
                }
            }
            for &face in &vertex.faces {
                let on_loop = self
                    .face(face)?
                    .half_edges
                    .iter()
                    .any(|&he| self.half_edges.get(he).is_some_and(|h| h.tail == id));
                if !on_loop {
                    return Err(invalid(format!("vertex {id:?} lists foreign face {face:?}")));
                }
            }
        }
        Ok(())
    }
}
