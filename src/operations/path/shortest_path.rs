use tracing::debug;

use crate::error::Result;
use crate::geometry::{Edge, Vertex};
use crate::visibility::{visible_vertices, SweepParams, VisibilityGraph};

use super::dijkstra::dijkstra;

/// A route through a visibility graph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    edges: Vec<Edge>,
    length: f64,
}

impl Path {
    fn through(route: &[Vertex]) -> Self {
        let edges: Vec<Edge> = route.windows(2).map(|w| Edge::new(w[0], w[1])).collect();
        let length = edges.iter().map(Edge::length).sum();
        Self { edges, length }
    }

    /// Edges from origin to destination, each oriented along the route.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Sum of the edge lengths.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// `true` for the path from a point to itself.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Vertices along the route, origin first.
    #[must_use]
    pub fn vertices(&self) -> Vec<Vertex> {
        let mut vertices: Vec<Vertex> = self.edges.iter().map(|e| *e.start()).collect();
        vertices.extend(self.edges.last().map(|e| *e.end()));
        vertices
    }
}

/// Finds the shortest obstacle-avoiding route between two points.
///
/// Endpoints that are not vertices of the visibility graph are swept
/// against its base and connected to everything they see before the
/// search; the visibility graph itself is left untouched.
#[derive(Debug)]
pub struct ShortestPath {
    origin: Vertex,
    destination: Vertex,
}

impl ShortestPath {
    /// Creates a new shortest path query.
    #[must_use]
    pub fn new(origin: Vertex, destination: Vertex) -> Self {
        Self {
            origin,
            destination,
        }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Unreachable`](crate::error::PathError::Unreachable)
    /// if no route connects the endpoints.
    pub fn execute(&self, vis: &VisibilityGraph) -> Result<Path> {
        if self.origin == self.destination {
            return Ok(Path::default());
        }

        let missing: Vec<Vertex> = [self.origin, self.destination]
            .into_iter()
            .filter(|v| !vis.graph().contains_vertex(v))
            .collect();

        let route = if missing.is_empty() {
            dijkstra(vis.graph(), &self.origin, &self.destination)?
        } else {
            let mut graph = vis.graph().clone();
            let params = SweepParams {
                half_scan: false,
                reduced: false,
                max_visibility: false,
            };
            for (i, point) in missing.iter().enumerate() {
                let others: Vec<Vertex> = missing
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, v)| *v)
                    .collect();
                graph.add_vertex(*point);
                for seen in visible_vertices(point, vis.base(), &others, params) {
                    graph.add_edge(Edge::new(*point, seen));
                }
            }
            dijkstra(&graph, &self.origin, &self.destination)?
        };

        let path = Path::through(&route);
        debug!(
            origin = %self.origin,
            destination = %self.destination,
            hops = path.edges().len(),
            length = path.length(),
            injected = missing.len(),
            "shortest path found"
        );
        Ok(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{PathError, VisigraphError};
    use crate::geometry::Polygon;
    use crate::graph::Graph;
    use crate::visibility::VisibilityOptions;
    use approx::assert_relative_eq;

    fn v(x: f64, y: f64) -> Vertex {
        Vertex::xy(x, y)
    }

    fn centred_square(half: f64, is_boundary: bool) -> Polygon {
        Polygon::new(
            vec![v(-half, -half), v(half, -half), v(half, half), v(-half, half)],
            is_boundary,
        )
        .unwrap()
    }

    fn courtyard() -> VisibilityGraph {
        let base =
            Graph::from_polygons([centred_square(25.0, true), centred_square(7.5, false)]).unwrap();
        VisibilityGraph::build(&base, VisibilityOptions::default()).unwrap()
    }

    #[test]
    fn route_bends_around_the_obstacle() {
        let vis = courtyard();
        let origin = v(-20.0, -2.0);
        let destination = v(20.0, 2.0);
        let path = ShortestPath::new(origin, destination).execute(&vis).unwrap();

        let vertices = path.vertices();
        assert_eq!(vertices.first(), Some(&origin));
        assert_eq!(vertices.last(), Some(&destination));
        assert_eq!(vertices.len(), 4);
        assert!(path.length() > origin.distance_to(&destination));
        assert_relative_eq!(path.length(), 246.5f64.sqrt() + 15.0 + 186.5f64.sqrt(), epsilon = 1e-6);

        let hole = centred_square(7.5, false);
        assert!(vertices[1..3].iter().all(|c| hole.vertices().contains(c)));
        for pair in path.edges().windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
        // Injected endpoints stay out of the shared graph.
        assert!(!vis.graph().contains_vertex(&origin));
    }

    #[test]
    fn route_between_graph_vertices() {
        let vis = courtyard();
        let path = ShortestPath::new(v(-25.0, -25.0), v(25.0, 25.0))
            .execute(&vis)
            .unwrap();
        assert_eq!(path.edges().len(), 2);
        let expected = 2.0 * (17.5f64.powi(2) + 32.5f64.powi(2)).sqrt();
        assert_relative_eq!(path.length(), expected, epsilon = 1e-6);
    }

    #[test]
    fn open_line_of_sight_is_a_single_edge() {
        let vis = courtyard();
        let path = ShortestPath::new(v(-20.0, 20.0), v(20.0, 20.0))
            .execute(&vis)
            .unwrap();
        assert_eq!(path.edges(), &[Edge::new(v(-20.0, 20.0), v(20.0, 20.0))]);
        assert_relative_eq!(path.length(), 40.0);
    }

    #[test]
    fn same_endpoints_give_an_empty_path() {
        let path = ShortestPath::new(v(1.0, 1.0), v(1.0, 1.0))
            .execute(&courtyard())
            .unwrap();
        assert!(path.is_empty());
        assert_relative_eq!(path.length(), 0.0);
        assert!(path.vertices().is_empty());
    }

    #[test]
    fn point_outside_the_boundary_is_unreachable() {
        let err = ShortestPath::new(v(-20.0, 0.0), v(40.0, 40.0))
            .execute(&courtyard())
            .unwrap_err();
        assert!(matches!(err, VisigraphError::Path(PathError::Unreachable { .. })));
    }
}
