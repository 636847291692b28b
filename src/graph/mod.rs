mod rings;

pub use rings::BranchDecision;

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{GraphError, Result};
use crate::geometry::{Edge, Polygon, Vertex};

/// Undirected adjacency-list graph over vertices, edges and polygons.
///
/// Vertices are keyed by their rounded coordinates. The first registration
/// of a location decides which polygon the stored vertex belongs to.
/// Insertion order of vertices and edges is preserved so that every
/// traversal is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    adjacency: HashMap<Vertex, Vec<Edge>>,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    edge_set: HashSet<Edge>,
    polygons: BTreeMap<usize, Polygon>,
}

impl Graph {
    /// Creates a new, empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from boundary and obstacle polygons, assigning them
    /// sequential ids in input order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyInput`] if `polygons` is empty.
    pub fn from_polygons(polygons: impl IntoIterator<Item = Polygon>) -> Result<Self> {
        let mut graph = Self::new();
        for polygon in polygons {
            graph.add_polygon(polygon);
        }
        if graph.polygons.is_empty() {
            return Err(GraphError::EmptyInput("polygon list").into());
        }
        Ok(graph)
    }

    /// Builds a graph from free line segments.
    ///
    /// Closed rings found among the segments become obstacle polygons; the
    /// remaining segments stay free-floating.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyInput`] for an empty list and propagates
    /// polygon reconstruction errors.
    pub fn from_lines(lines: &[Edge]) -> Result<Self> {
        if lines.is_empty() {
            return Err(GraphError::EmptyInput("line list").into());
        }
        let mut raw = Self::new();
        for line in lines {
            raw.add_edge(Edge::new(
                line.start().with_polygon(None),
                line.end().with_polygon(None),
            ));
        }

        let rings = raw.build_polygons()?;
        let mut graph = Self::new();
        let mut in_ring: HashSet<Edge> = HashSet::new();
        for ring in rings {
            in_ring.extend(ring.edges().iter().copied());
            graph.add_polygon(ring);
        }
        for edge in raw.edges.iter().filter(|e| !in_ring.contains(e)) {
            graph.add_edge(*edge);
        }
        Ok(graph)
    }

    /// Adds a polygon under the next sequential id and registers its edges.
    /// Returns the assigned id.
    pub fn add_polygon(&mut self, polygon: Polygon) -> usize {
        let id = self
            .polygons
            .last_key_value()
            .map_or(0, |(last, _)| last + 1);
        let polygon = polygon.with_id(id);
        for edge in polygon.edges() {
            self.add_edge(*edge);
        }
        self.polygons.insert(id, polygon);
        id
    }

    /// Registers an isolated vertex. Returns `false` if it was already present.
    pub fn add_vertex(&mut self, vertex: Vertex) -> bool {
        if self.adjacency.contains_key(&vertex) {
            return false;
        }
        self.adjacency.insert(vertex, Vec::new());
        self.vertices.push(vertex);
        true
    }

    /// Registers `edge` under both endpoints and in the edge list.
    ///
    /// Idempotent under undirected equality; zero-length edges are ignored.
    /// Returns `false` if nothing changed.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if edge.start() == edge.end() || self.edge_set.contains(&edge) {
            return false;
        }
        for v in [*edge.start(), *edge.end()] {
            self.add_vertex(v);
            if let Some(incident) = self.adjacency.get_mut(&v) {
                incident.push(edge);
            }
        }
        self.edge_set.insert(edge);
        self.edges.push(edge);
        true
    }

    /// Returns the stored vertex at the location of `vertex`, carrying its
    /// polygon id.
    #[must_use]
    pub fn vertex(&self, vertex: &Vertex) -> Option<&Vertex> {
        self.adjacency.get_key_value(vertex).map(|(stored, _)| stored)
    }

    #[must_use]
    pub fn contains_vertex(&self, vertex: &Vertex) -> bool {
        self.adjacency.contains_key(vertex)
    }

    #[must_use]
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.edge_set.contains(edge)
    }

    /// Edges incident to `vertex`; empty if the vertex is unknown.
    #[must_use]
    pub fn edges_at(&self, vertex: &Vertex) -> &[Edge] {
        self.adjacency.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Vertices sharing an edge with `vertex`.
    #[must_use]
    pub fn adjacent_vertices(&self, vertex: &Vertex) -> Vec<Vertex> {
        self.edges_at(vertex)
            .iter()
            .filter_map(|e| e.other(vertex))
            .collect()
    }

    /// All vertices, in insertion order.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All unique edges, in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Polygons ordered by id.
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        self.polygons.values()
    }

    /// Returns the polygon with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::PolygonNotFound`] if no polygon has that id.
    pub fn polygon(&self, id: usize) -> Result<&Polygon> {
        self.polygons
            .get(&id)
            .ok_or_else(|| GraphError::PolygonNotFound(id).into())
    }

    /// Polygon owning the stored vertex at `vertex`'s location, if any.
    #[must_use]
    pub fn polygon_of(&self, vertex: &Vertex) -> Option<&Polygon> {
        let id = self.vertex(vertex)?.polygon_id?;
        self.polygons.get(&id)
    }

    /// Returns `true` if `vertex` belongs to a boundary polygon.
    #[must_use]
    pub fn is_boundary_vertex(&self, vertex: &Vertex) -> bool {
        self.polygon_of(vertex).is_some_and(Polygon::is_boundary)
    }

    /// Reconstructs closed rings from the graph's raw edges.
    ///
    /// The returned polygons are obstacles with unassigned ids; open chains
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnsupportedBranch`] when a walked vertex has an
    /// incident-edge count other than 1, 2 or 4.
    pub fn build_polygons(&self) -> Result<Vec<Polygon>> {
        rings::build_polygons(self)
    }
}
