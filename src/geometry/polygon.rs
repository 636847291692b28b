use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::on_segment_2d;
use crate::math::polygon_2d::{centroid_2d, is_convex_2d, signed_area_2d};
use crate::math::{orientation_xy, Orientation, Point3};

use super::bounding_box::BoundingBox;
use super::edge::Edge;
use super::vertex::Vertex;

/// A closed polygonal ring.
///
/// A boundary polygon encloses free space (the walkable area); an obstacle
/// polygon is a solid hole inside it. The id is assigned by the
/// [`Graph`](crate::graph::Graph) the polygon is added to and is stamped on
/// every vertex and edge of the ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    id: usize,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    bounds: BoundingBox,
    is_boundary: bool,
}

impl Polygon {
    /// Creates a polygon from an ordered ring of vertices.
    ///
    /// Consecutive duplicates and a closing vertex equal to the first one are
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyPoints`] for an empty list and
    /// [`GeometryError::DegeneratePolygon`] if fewer than 3 distinct vertices
    /// remain.
    pub fn new(vertices: Vec<Vertex>, is_boundary: bool) -> Result<Self> {
        if vertices.is_empty() {
            return Err(GeometryError::EmptyPoints.into());
        }
        let mut ring: Vec<Vertex> = Vec::with_capacity(vertices.len());
        for v in vertices {
            if ring.last() != Some(&v) {
                ring.push(v);
            }
        }
        while ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(GeometryError::DegeneratePolygon(ring.len()).into());
        }
        let points: Vec<Point3> = ring.iter().map(Vertex::point).collect();
        let bounds = BoundingBox::from_points(&points).ok_or(GeometryError::EmptyPoints)?;
        Ok(Self::stamped(ring, 0, bounds, is_boundary))
    }

    /// Creates a polygon from points.
    ///
    /// # Errors
    ///
    /// See [`Polygon::new`].
    pub fn from_points(points: &[Point3], is_boundary: bool) -> Result<Self> {
        Self::new(points.iter().map(Vertex::from_point).collect(), is_boundary)
    }

    fn stamped(ring: Vec<Vertex>, id: usize, bounds: BoundingBox, is_boundary: bool) -> Self {
        let vertices: Vec<Vertex> = ring
            .into_iter()
            .map(|v| v.with_polygon(Some(id)))
            .collect();
        let n = vertices.len();
        let edges = (0..n)
            .map(|i| Edge::new(vertices[i], vertices[(i + 1) % n]))
            .collect();
        Self {
            id,
            vertices,
            edges,
            bounds,
            is_boundary,
        }
    }

    /// Returns the same ring re-stamped with a new id.
    #[must_use]
    pub(crate) fn with_id(self, id: usize) -> Self {
        Self::stamped(self.vertices, id, self.bounds, self.is_boundary)
    }

    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// `true` for an outer boundary, `false` for an interior obstacle.
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.is_boundary
    }

    #[must_use]
    pub fn points(&self) -> Vec<Point3> {
        self.vertices.iter().map(Vertex::point).collect()
    }

    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    /// Unsigned area of the XY projection.
    #[must_use]
    pub fn area(&self) -> f64 {
        signed_area_2d(&self.points()).abs()
    }

    /// Area-weighted centroid; collinear rings fall back to the vertex mean.
    #[must_use]
    pub fn centroid(&self) -> Vertex {
        centroid_2d(&self.points())
            .map_or(self.vertices[0], |p| Vertex::from_point(&p))
    }

    #[must_use]
    pub fn is_convex(&self) -> bool {
        is_convex_2d(&self.points())
    }

    /// Returns `true` if `vertex` lies on one of the ring's edges (XY plane).
    #[must_use]
    pub fn on_boundary(&self, vertex: &Vertex) -> bool {
        let p = vertex.point();
        self.edges
            .iter()
            .any(|e| on_segment_2d(&e.start().point(), &p, &e.end().point()))
    }

    /// Point-in-polygon test in the XY plane, boundary inclusive.
    ///
    /// Points on an edge short-circuit to `true`; otherwise the winding
    /// number of the ring around `vertex` is counted from the crossings of a
    /// horizontal ray 1.5 times as long as the farthest ring vertex is away.
    #[must_use]
    pub fn contains_vertex(&self, vertex: &Vertex) -> bool {
        if !self.bounds.contains_2d(&vertex.point()) {
            return false;
        }
        self.on_boundary(vertex) || self.winding_number(vertex) != 0
    }

    /// Point-in-polygon test that excludes the ring itself.
    #[must_use]
    pub fn strictly_contains(&self, vertex: &Vertex) -> bool {
        self.bounds.contains_2d(&vertex.point())
            && !self.on_boundary(vertex)
            && self.winding_number(vertex) != 0
    }

    fn winding_number(&self, vertex: &Vertex) -> i32 {
        let p = vertex.point();
        let reach = 1.5
            * self
                .vertices
                .iter()
                .map(|v| vertex.distance_2d(v))
                .fold(0.0, f64::max);
        let ray_end = Point3::new(p.x + reach, p.y, p.z);

        let mut winding = 0;
        for edge in &self.edges {
            let a = edge.start().point();
            let b = edge.end().point();
            if a.x.max(b.x) < p.x || a.x.min(b.x) > ray_end.x {
                continue;
            }
            if a.y <= p.y {
                if b.y > p.y && orientation_xy(&a, &b, &p) == Orientation::CounterClockwise {
                    winding += 1;
                }
            } else if b.y <= p.y && orientation_xy(&a, &b, &p) == Orientation::Clockwise {
                winding -= 1;
            }
        }
        winding
    }
}
