use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::{Polygon, Vertex};
use crate::graph::Graph;
use crate::visibility::{visible_vertices, SweepParams};

/// Computes the region visible from a point as a boundary polygon.
///
/// Rays grazing an obstacle corner are continued to the first edge behind
/// it, so the polygon outlines the shadow each obstacle casts.
#[derive(Debug)]
pub struct Isovist {
    origin: Vertex,
}

impl Isovist {
    /// Creates a new `Isovist` query.
    #[must_use]
    pub fn new(origin: Vertex) -> Self {
        Self { origin }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the origin is not inside a
    /// boundary polygon or lies strictly inside an obstacle, and
    /// `GeometryError::DegeneratePolygon` if fewer than 3 points are visible.
    pub fn execute(&self, base: &Graph) -> Result<Polygon> {
        let in_boundary = base
            .polygons()
            .filter(|p| p.is_boundary())
            .any(|p| p.contains_vertex(&self.origin));
        let in_obstacle = base
            .polygons()
            .filter(|p| !p.is_boundary())
            .any(|p| p.strictly_contains(&self.origin));
        if !in_boundary || in_obstacle {
            return Err(OperationError::InvalidInput(format!(
                "isovist origin {} is not in free space",
                self.origin
            ))
            .into());
        }

        let params = SweepParams {
            half_scan: false,
            reduced: false,
            max_visibility: true,
        };
        let mut outline = visible_vertices(&self.origin, base, &[], params);
        if let Some(corner) = base.vertex(&self.origin) {
            close_at_corner(&mut outline, corner, base);
        }
        debug!(origin = %self.origin, vertices = outline.len(), "isovist traced");
        Polygon::new(outline, true)
    }
}

/// Puts an origin sitting on a ring vertex back into its outline, between
/// the two ring neighbours the sweep emitted side by side.
fn close_at_corner(outline: &mut Vec<Vertex>, corner: &Vertex, base: &Graph) {
    let ring = base.adjacent_vertices(corner);
    let n = outline.len();
    if let Some(i) =
        (0..n).find(|&i| ring.contains(&outline[i]) && ring.contains(&outline[(i + 1) % n]))
    {
        outline.insert(i + 1, *corner);
    }
}
