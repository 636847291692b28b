//! Visibility graph construction by rotational sweep.

mod open_edges;
mod sweep;

pub(crate) use sweep::{visible_vertices, SweepParams};

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::geometry::{Edge, Vertex};
use crate::graph::Graph;

/// Options controlling how a [`VisibilityGraph`] is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityOptions {
    /// Keep only sight lines that can be part of a shortest path.
    pub reduced: bool,
    /// Sweep each centre over half a turn only; visibility is symmetric, so
    /// the full graph is still covered.
    pub half_scan: bool,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            reduced: true,
            half_scan: true,
        }
    }
}

impl VisibilityOptions {
    #[must_use]
    pub fn with_reduced(mut self, reduced: bool) -> Self {
        self.reduced = reduced;
        self
    }

    #[must_use]
    pub fn with_half_scan(mut self, half_scan: bool) -> Self {
        self.half_scan = half_scan;
        self
    }
}

/// Graph of mutually visible vertex pairs over a base arrangement of
/// boundary and obstacle polygons.
///
/// Immutable once built; [`add_vertices`](Self::add_vertices) and
/// [`add_edges`](Self::add_edges) return new, independent graphs.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityGraph {
    graph: Graph,
    base: Graph,
    options: VisibilityOptions,
}

impl VisibilityGraph {
    /// Sweeps every vertex of `base` and collects the visible pairs.
    ///
    /// Every base vertex is present in the result, isolated or not.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyInput`] if `base` has no vertices and
    /// [`GraphError::UnsupportedBranch`] if a base vertex joins 3 or more
    /// than 4 edges.
    pub fn build(base: &Graph, options: VisibilityOptions) -> Result<Self> {
        if base.vertex_count() == 0 {
            return Err(GraphError::EmptyInput("base graph").into());
        }
        check_branches(base)?;
        let params = SweepParams {
            half_scan: options.half_scan,
            reduced: options.reduced,
            max_visibility: false,
        };

        let mut graph = Graph::new();
        for v in base.vertices() {
            graph.add_vertex(*v);
        }
        for centre in base.vertices() {
            for seen in visible_vertices(centre, base, &[], params) {
                graph.add_edge(Edge::new(*centre, seen));
            }
        }

        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            reduced = options.reduced,
            half_scan = options.half_scan,
            "built visibility graph"
        );
        Ok(Self {
            graph,
            base: base.clone(),
            options,
        })
    }

    /// The visibility edges.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The arrangement the graph was built over.
    #[must_use]
    pub fn base(&self) -> &Graph {
        &self.base
    }

    #[must_use]
    pub fn options(&self) -> VisibilityOptions {
        self.options
    }

    /// Returns a copy extended with free `vertices`, each connected to
    /// everything it sees.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyInput`] if `vertices` is empty.
    pub fn add_vertices(&self, vertices: &[Vertex]) -> Result<Self> {
        if vertices.is_empty() {
            return Err(GraphError::EmptyInput("vertex list").into());
        }
        let mut base = self.base.clone();
        let mut graph = self.graph.clone();
        for v in vertices {
            base.add_vertex(v.with_polygon(None));
        }

        let params = SweepParams {
            half_scan: false,
            reduced: self.options.reduced,
            max_visibility: false,
        };
        for v in vertices {
            let centre = base.vertex(v).copied().unwrap_or(*v);
            graph.add_vertex(centre);
            for seen in visible_vertices(&centre, &base, &[], params) {
                graph.add_edge(Edge::new(centre, seen));
            }
        }

        debug!(
            added = vertices.len(),
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "extended visibility graph with vertices"
        );
        Ok(Self {
            graph,
            base,
            options: self.options,
        })
    }

    /// Returns a graph rebuilt over a copy of the base extended with free
    /// segments `edges`, using the stored options.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyInput`] if `edges` is empty.
    pub fn add_edges(&self, edges: &[Edge]) -> Result<Self> {
        if edges.is_empty() {
            return Err(GraphError::EmptyInput("edge list").into());
        }
        let mut base = self.base.clone();
        for edge in edges {
            base.add_edge(Edge::new(
                edge.start().with_polygon(None),
                edge.end().with_polygon(None),
            ));
        }
        debug!(added = edges.len(), "rebuilding visibility graph with new edges");
        Self::build(&base, self.options)
    }

    /// Degree of every vertex scaled by the highest degree, in vertex
    /// insertion order. All zeros if the graph has no edges.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn connectivity(&self) -> Vec<(Vertex, f64)> {
        let degrees: Vec<(Vertex, usize)> = self
            .graph
            .vertices()
            .iter()
            .map(|v| (*v, self.graph.edges_at(v).len()))
            .collect();
        let max = degrees.iter().map(|(_, d)| *d).max().unwrap_or(0);
        degrees
            .into_iter()
            .map(|(v, d)| {
                let share = if max == 0 { 0.0 } else { d as f64 / max as f64 };
                (v, share)
            })
            .collect()
    }
}

/// Rejects base vertices whose edge count the sweep cannot order: free
/// points, segment ends, ring corners and 4-edge crossings are accepted.
fn check_branches(base: &Graph) -> Result<()> {
    for v in base.vertices() {
        let degree = base.edges_at(v).len();
        if !matches!(degree, 0..=2 | 4) {
            return Err(GraphError::UnsupportedBranch {
                x: v.x(),
                y: v.y(),
                degree,
            }
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::VisigraphError;
    use crate::geometry::Polygon;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn v(x: f64, y: f64) -> Vertex {
        Vertex::xy(x, y)
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64, is_boundary: bool) -> Polygon {
        Polygon::new(vec![v(x0, y0), v(x1, y0), v(x1, y1), v(x0, y1)], is_boundary).unwrap()
    }

    fn room() -> Graph {
        Graph::from_polygons([rect(0.0, 0.0, 10.0, 10.0, true)]).unwrap()
    }

    #[test]
    fn default_options() {
        let options = VisibilityOptions::default();
        assert!(options.reduced);
        assert!(options.half_scan);
        let options = options.with_reduced(false).with_half_scan(false);
        assert!(!options.reduced);
        assert!(!options.half_scan);
    }

    #[test]
    fn square_room_is_fully_connected() {
        let vis = VisibilityGraph::build(&room(), VisibilityOptions::default()).unwrap();
        assert_eq!(vis.graph().vertex_count(), 4);
        assert_eq!(vis.graph().edge_count(), 6);
        assert!(vis.graph().contains_edge(&Edge::new(v(0.0, 0.0), v(10.0, 10.0))));
        assert!(vis.graph().contains_edge(&Edge::new(v(10.0, 0.0), v(0.0, 10.0))));
    }

    #[test]
    fn convex_hexagon_is_complete() {
        let ring: Vec<Vertex> = (0..6)
            .map(|i| {
                let a = std::f64::consts::FRAC_PI_3 * f64::from(i);
                v(10.0 * a.cos(), 10.0 * a.sin())
            })
            .collect();
        let base = Graph::from_polygons([Polygon::new(ring, true).unwrap()]).unwrap();
        for half_scan in [true, false] {
            let options = VisibilityOptions::default()
                .with_reduced(false)
                .with_half_scan(half_scan);
            let vis = VisibilityGraph::build(&base, options).unwrap();
            assert_eq!(vis.graph().edge_count(), 15);
        }
    }

    #[test]
    fn obstacle_blocks_the_diagonal() {
        let base = Graph::from_polygons([
            rect(0.0, 0.0, 10.0, 10.0, true),
            rect(4.0, 4.0, 6.0, 6.0, false),
        ])
        .unwrap();
        let vis = VisibilityGraph::build(&base, VisibilityOptions::default()).unwrap();
        let g = vis.graph();
        assert_eq!(g.vertex_count(), 8);
        assert!(!g.contains_edge(&Edge::new(v(0.0, 0.0), v(10.0, 10.0))));
        assert!(!g.contains_edge(&Edge::new(v(4.0, 4.0), v(6.0, 6.0))));
        assert!(g.contains_edge(&Edge::new(v(0.0, 0.0), v(10.0, 0.0))));
        assert!(g.contains_edge(&Edge::new(v(4.0, 4.0), v(6.0, 4.0))));
        assert!(g.contains_edge(&Edge::new(v(0.0, 0.0), v(4.0, 4.0))));
    }

    #[test]
    fn empty_base_is_rejected() {
        assert!(matches!(
            VisibilityGraph::build(&Graph::new(), VisibilityOptions::default()).unwrap_err(),
            VisigraphError::Graph(GraphError::EmptyInput(_))
        ));
    }

    #[test]
    fn three_way_branches_are_rejected() {
        let vis = VisibilityGraph::build(&room(), VisibilityOptions::default()).unwrap();
        let spur = Edge::new(v(10.0, 10.0), v(5.0, 5.0));
        assert!(matches!(
            vis.add_edges(&[spur]).unwrap_err(),
            VisigraphError::Graph(GraphError::UnsupportedBranch { degree: 3, .. })
        ));

        let bend = [Edge::new(v(2.0, 2.0), v(8.0, 8.0)), Edge::new(v(8.0, 8.0), v(8.0, 2.0))];
        assert!(vis.add_edges(&bend).is_ok());
    }

    #[test]
    fn added_vertex_connects_without_touching_the_original() {
        let vis = VisibilityGraph::build(&room(), VisibilityOptions::default()).unwrap();
        let snapshot = vis.clone();
        let extended = vis.add_vertices(&[v(5.0, 5.0)]).unwrap();
        assert_eq!(vis, snapshot);
        assert_eq!(extended.graph().vertex_count(), 5);
        assert_eq!(extended.graph().edges_at(&v(5.0, 5.0)).len(), 4);
        assert!(extended.base().contains_vertex(&v(5.0, 5.0)));
        assert!(!vis.base().contains_vertex(&v(5.0, 5.0)));
    }

    #[test]
    fn added_wall_blocks_both_diagonals() {
        let vis = VisibilityGraph::build(&room(), VisibilityOptions::default()).unwrap();
        let wall = Edge::new(v(2.0, 5.0), v(8.0, 5.0));
        let walled = vis.add_edges(&[wall]).unwrap();
        assert!(vis.graph().contains_edge(&Edge::new(v(0.0, 0.0), v(10.0, 10.0))));
        assert!(!walled.graph().contains_edge(&Edge::new(v(0.0, 0.0), v(10.0, 10.0))));
        assert!(!walled.graph().contains_edge(&Edge::new(v(10.0, 0.0), v(0.0, 10.0))));
        assert!(walled.graph().contains_edge(&wall));
        assert_eq!(walled.graph().vertex_count(), 6);
        assert_eq!(walled.options(), vis.options());
    }

    #[test]
    fn empty_extensions_are_rejected() {
        let vis = VisibilityGraph::build(&room(), VisibilityOptions::default()).unwrap();
        assert!(vis.add_vertices(&[]).is_err());
        assert!(vis.add_edges(&[]).is_err());
    }

    #[test]
    fn connectivity_is_normalized() {
        let vis = VisibilityGraph::build(&room(), VisibilityOptions::default())
            .unwrap()
            .add_vertices(&[v(5.0, 5.0)])
            .unwrap();
        for (vertex, share) in vis.connectivity() {
            assert_relative_eq!(share, 1.0);
            assert!(vis.graph().contains_vertex(&vertex));
        }

        let lonely = VisibilityGraph::build(&room(), VisibilityOptions::default())
            .unwrap()
            .add_vertices(&[v(20.0, 20.0)])
            .unwrap();
        let shares = lonely.connectivity();
        let outside = shares.iter().find(|(vertex, _)| *vertex == v(20.0, 20.0)).unwrap();
        assert_relative_eq!(outside.1, 0.0);
    }

    proptest! {
        #[test]
        fn extension_leaves_the_original_unchanged(x in 0.5..9.5f64, y in 0.5..9.5f64) {
            let vis = VisibilityGraph::build(&room(), VisibilityOptions::default()).unwrap();
            let snapshot = vis.clone();
            let extended = vis.add_vertices(&[v(x, y)]).unwrap();
            prop_assert_eq!(&vis, &snapshot);
            prop_assert!(extended.graph().vertex_count() >= vis.graph().vertex_count());
            let walled = vis.add_edges(&[Edge::new(v(x, y), v(x, 0.0))]).unwrap();
            prop_assert_eq!(&vis, &snapshot);
            prop_assert!(walled.base().edge_count() > vis.base().edge_count());
        }
    }
}
