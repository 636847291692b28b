use crate::error::{GraphError, Result};
use crate::geometry::Vertex;
use crate::graph::Graph;
use crate::visibility::{visible_vertices, SweepParams};

/// Lists the base vertices visible from an arbitrary point.
#[derive(Debug)]
pub struct VisibleVertices {
    origin: Vertex,
}

impl VisibleVertices {
    /// Creates a new `VisibleVertices` query.
    #[must_use]
    pub fn new(origin: Vertex) -> Self {
        Self { origin }
    }

    /// Executes the query, returning the visible vertices in
    /// counter-clockwise order from the positive x direction.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyInput`] if `base` has no vertices.
    pub fn execute(&self, base: &Graph) -> Result<Vec<Vertex>> {
        if base.vertex_count() == 0 {
            return Err(GraphError::EmptyInput("base graph").into());
        }
        let params = SweepParams {
            half_scan: false,
            reduced: false,
            max_visibility: false,
        };
        Ok(visible_vertices(&self.origin, base, &[], params))
    }
}
