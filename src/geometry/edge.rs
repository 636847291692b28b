use std::hash::{Hash, Hasher};

use crate::math::distance_2d::point_to_segment_dist;
use crate::math::intersect_2d::segments_intersect_2d;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::bounding_box::BoundingBox;
use super::vertex::Vertex;

/// Outcome of intersecting two edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    /// The edges do not meet.
    None,
    /// The edges meet in a single point.
    Point(Vertex),
    /// The edges are collinear and share a segment of positive length.
    Overlap(Edge),
}

/// An undirected line segment between two vertices.
///
/// `Edge::new(a, b) == Edge::new(b, a)`, and both hash identically.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    start: Vertex,
    end: Vertex,
}

impl Edge {
    /// Creates an edge from `start` to `end`.
    #[must_use]
    pub fn new(start: Vertex, end: Vertex) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn start(&self) -> &Vertex {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> &Vertex {
        &self.end
    }

    /// Returns the same segment traversed the other way.
    #[must_use]
    pub fn reversed(&self) -> Edge {
        Edge::new(self.end, self.start)
    }

    /// Euclidean length of the edge.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Direction vector `end − start` (not normalized).
    #[must_use]
    pub fn direction(&self) -> Vector3 {
        self.end.point() - self.start.point()
    }

    /// Polygon the edge belongs to, taken from its start vertex.
    #[must_use]
    pub fn polygon_id(&self) -> Option<usize> {
        self.start.polygon_id
    }

    /// Returns `true` if `vertex` is one of the endpoints.
    #[must_use]
    pub fn contains(&self, vertex: &Vertex) -> bool {
        self.start == *vertex || self.end == *vertex
    }

    /// Returns the endpoint opposite to `vertex`, or `None` if `vertex` is not
    /// an endpoint.
    #[must_use]
    pub fn other(&self, vertex: &Vertex) -> Option<Vertex> {
        if self.start == *vertex {
            Some(self.end)
        } else if self.end == *vertex {
            Some(self.start)
        } else {
            None
        }
    }

    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        let a = self.start.point();
        let b = self.end.point();
        BoundingBox {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Returns `true` if `vertex` lies on the segment.
    ///
    /// The offset from `start` must be parallel to the edge direction and its
    /// projection must fall within the edge length.
    #[must_use]
    pub fn on_edge(&self, vertex: &Vertex) -> bool {
        if self.contains(vertex) {
            return true;
        }
        let dir = self.direction();
        let len = dir.norm();
        if len < TOLERANCE {
            return false;
        }
        let offset = vertex.point() - self.start.point();
        if offset.cross(&dir).norm() / len > TOLERANCE {
            return false;
        }
        let along = offset.dot(&dir) / len;
        along >= -TOLERANCE && along <= len + TOLERANCE
    }

    /// Returns `true` if both edges point along the same line direction.
    #[must_use]
    pub fn is_parallel_to(&self, other: &Edge) -> bool {
        let a = self.direction();
        let b = other.direction();
        let scale = a.norm() * b.norm();
        if scale < TOLERANCE * TOLERANCE {
            return true;
        }
        a.cross(&b).norm() / scale <= TOLERANCE
    }

    /// Returns `true` if both edges lie in a common plane.
    #[must_use]
    pub fn is_coplanar(&self, other: &Edge) -> bool {
        let normal = self.direction().cross(&other.direction());
        let n = normal.norm();
        if n < TOLERANCE * TOLERANCE {
            // Parallel edges always share a plane.
            return true;
        }
        let offset = other.start.point() - self.start.point();
        (offset.dot(&normal) / n).abs() <= TOLERANCE
    }

    /// Intersects two edges in 3D.
    ///
    /// Bounding boxes and coplanarity are checked first. Collinear edges
    /// resolve to their shared sub-segment (or a single touching point),
    /// edges sharing an endpoint resolve to that endpoint, everything else
    /// goes through the parametric solution.
    #[must_use]
    pub fn intersection(&self, other: &Edge) -> Intersection {
        if !self.bounding_box().intersects(&other.bounding_box()) || !self.is_coplanar(other) {
            return Intersection::None;
        }

        let a0 = self.start.point();
        let da = self.direction();
        let db = other.direction();
        let w = other.start.point() - a0;
        let normal = da.cross(&db);
        let len_a = da.norm();
        let len_b = db.norm();

        if self.is_parallel_to(other) {
            return self.collinear_overlap(other, len_a);
        }

        for v in [other.start, other.end] {
            if self.contains(&v) {
                return Intersection::Point(v);
            }
        }

        let n2 = normal.norm_squared();
        let t = w.cross(&db).dot(&normal) / n2;
        let u = w.cross(&da).dot(&normal) / n2;
        let tol_t = TOLERANCE / len_a;
        let tol_u = TOLERANCE / len_b;
        if t < -tol_t || t > 1.0 + tol_t || u < -tol_u || u > 1.0 + tol_u {
            return Intersection::None;
        }
        Intersection::Point(Vertex::from_point(&(a0 + da * t.clamp(0.0, 1.0))))
    }

    fn collinear_overlap(&self, other: &Edge, len_a: f64) -> Intersection {
        let a0 = self.start.point();
        let da = self.direction();
        if len_a < TOLERANCE {
            return if other.on_edge(&self.start) {
                Intersection::Point(self.start)
            } else {
                Intersection::None
            };
        }
        let offset = other.start.point() - a0;
        if offset.cross(&da).norm() / len_a > TOLERANCE {
            // Parallel but on distinct lines.
            return Intersection::None;
        }

        let len2 = len_a * len_a;
        let t0 = offset.dot(&da) / len2;
        let t1 = (other.end.point() - a0).dot(&da) / len2;
        let lo = t0.min(t1).max(0.0);
        let hi = t0.max(t1).min(1.0);
        let tol = TOLERANCE / len_a;
        if hi < lo - tol {
            return Intersection::None;
        }

        let p = self.snap_to_endpoint(other, a0 + da * lo);
        let q = self.snap_to_endpoint(other, a0 + da * hi.max(lo));
        if p == q || p.distance_to(&q) <= TOLERANCE {
            Intersection::Point(p)
        } else {
            Intersection::Overlap(Edge::new(p, q))
        }
    }

    /// Reuses an existing endpoint of either edge when `point` falls on it.
    fn snap_to_endpoint(&self, other: &Edge, point: Point3) -> Vertex {
        [self.start, self.end, other.start, other.end]
            .into_iter()
            .find(|v| (v.point() - point).norm() <= TOLERANCE)
            .unwrap_or_else(|| Vertex::from_point(&point))
    }

    /// Returns `true` if the XY projection of this edge meets segment `a`–`b`,
    /// including touching endpoints and collinear overlap.
    #[must_use]
    pub fn crosses_2d(&self, a: &Vertex, b: &Vertex) -> bool {
        segments_intersect_2d(&a.point(), &b.point(), &self.start.point(), &self.end.point())
    }

    /// XY projection test against another edge.
    #[must_use]
    pub fn intersects_2d(&self, other: &Edge) -> bool {
        self.crosses_2d(&other.start, &other.end)
    }

    /// Minimum XY distance from `vertex` to this edge.
    #[must_use]
    pub fn distance_to(&self, vertex: &Vertex) -> f64 {
        point_to_segment_dist(&vertex.point(), &self.start.point(), &self.end.point())
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (self.start == other.start && self.end == other.end)
            || (self.start == other.end && self.end == other.start)
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (lo, hi) = if self.start <= self.end {
            (&self.start, &self.end)
        } else {
            (&self.end, &self.start)
        };
        lo.hash(state);
        hi.hash(state);
    }
}
