use std::fmt;
use std::hash::{Hash, Hasher};

use crate::math::intersect_2d::polar_angle;
use crate::math::polygon_2d::mean_point;
use crate::math::{coordinate_key, round_coordinate, Point3, Vector3};

/// A polygon or free-floating vertex.
///
/// Coordinates are rounded to [`crate::math::PRECISION`] decimal places on
/// construction. Equality and hashing only look at the rounded coordinates,
/// so two vertices at the same location are the same container key
/// regardless of the polygon they belong to.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    x: f64,
    y: f64,
    z: f64,
    /// Owning polygon, or `None` for free-floating vertices.
    pub polygon_id: Option<usize>,
}

impl Vertex {
    /// Creates a free-floating vertex.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: round_coordinate(x),
            y: round_coordinate(y),
            z: round_coordinate(z),
            polygon_id: None,
        }
    }

    /// Creates a free-floating vertex on the `z = 0` plane.
    #[must_use]
    pub fn xy(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    /// Creates a vertex from a point.
    #[must_use]
    pub fn from_point(point: &Point3) -> Self {
        Self::new(point.x, point.y, point.z)
    }

    /// Returns a copy of this vertex owned by the given polygon.
    #[must_use]
    pub fn with_polygon(mut self, polygon_id: Option<usize>) -> Self {
        self.polygon_id = polygon_id;
        self
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Returns the position as a point.
    #[must_use]
    pub fn point(&self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }

    /// Euclidean distance to another vertex.
    #[must_use]
    pub fn distance_to(&self, other: &Vertex) -> f64 {
        (other.point() - self.point()).norm()
    }

    /// Distance to another vertex in the XY projection.
    #[must_use]
    pub fn distance_2d(&self, other: &Vertex) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Polar angle, in `[0, 2π)`, of the XY direction towards `other`.
    #[must_use]
    pub fn polar_angle(&self, other: &Vertex) -> f64 {
        polar_angle(&self.point(), &other.point())
    }

    /// Returns this vertex moved by `offset`. The polygon id is dropped.
    #[must_use]
    pub fn translate(&self, offset: &Vector3) -> Vertex {
        Vertex::from_point(&(self.point() + offset))
    }

    /// Midpoint between two vertices, as a free vertex.
    #[must_use]
    pub fn mid_vertex(a: &Vertex, b: &Vertex) -> Vertex {
        Vertex::from_point(&nalgebra::center(&a.point(), &b.point()))
    }

    /// Mean position of a set of vertices, or `None` if the set is empty.
    #[must_use]
    pub fn centroid(vertices: &[Vertex]) -> Option<Vertex> {
        let points: Vec<Point3> = vertices.iter().map(Vertex::point).collect();
        mean_point(&points).map(|p| Vertex::from_point(&p))
    }

    fn key(&self) -> (i64, i64, i64) {
        (
            coordinate_key(self.x),
            coordinate_key(self.y),
            coordinate_key(self.z),
        )
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Vertex {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Lexicographic order on rounded `(x, y, z)`.
impl Ord for Vertex {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

impl From<Point3> for Vertex {
    fn from(point: Point3) -> Self {
        Vertex::from_point(&point)
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of(v: &Vertex) -> u64 {
        let mut h = DefaultHasher::new();
        v.hash(&mut h);
        h.finish()
    }

    #[test]
    fn equality_ignores_polygon_id() {
        let a = Vertex::xy(1.0, 2.0).with_polygon(Some(3));
        let b = Vertex::xy(1.0, 2.0);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn nearby_vertices_collapse_in_sets() {
        let mut set = HashSet::new();
        set.insert(Vertex::xy(0.1 + 0.2, 1.0));
        set.insert(Vertex::xy(0.3, 1.000_000_000_1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn distinct_vertices_differ() {
        assert_ne!(Vertex::xy(0.0, 0.0), Vertex::xy(0.0, 0.001));
    }

    #[test]
    fn mid_vertex_and_distance() {
        let a = Vertex::new(0.0, 0.0, 0.0);
        let b = Vertex::new(4.0, 2.0, 6.0);
        let m = Vertex::mid_vertex(&a, &b);
        assert_eq!(m, Vertex::new(2.0, 1.0, 3.0));
        assert_relative_eq!(a.distance_to(&b), 56f64.sqrt());
        assert_relative_eq!(a.distance_2d(&b), 20f64.sqrt());
    }

    #[test]
    fn centroid_of_vertices() {
        let c = Vertex::centroid(&[Vertex::xy(0.0, 0.0), Vertex::xy(2.0, 0.0), Vertex::xy(1.0, 3.0)])
            .unwrap();
        assert_eq!(c, Vertex::xy(1.0, 1.0));
        assert!(Vertex::centroid(&[]).is_none());
    }

    #[test]
    fn translate_drops_polygon() {
        let v = Vertex::xy(1.0, 1.0).with_polygon(Some(0));
        let t = v.translate(&Vector3::new(1.0, -1.0, 2.0));
        assert_eq!(t, Vertex::new(2.0, 0.0, 2.0));
        assert!(t.polygon_id.is_none());
    }

    proptest! {
        #[test]
        fn sub_resolution_noise_is_equal_and_hashes_equal(
            x in -1000i64..1000, y in -1000i64..1000, noise in -4e-7..4e-7f64,
        ) {
            #[allow(clippy::cast_precision_loss)]
            let (x, y) = (x as f64 * 0.25, y as f64 * 0.25);
            let a = Vertex::xy(x, y);
            let b = Vertex::xy(x + noise, y - noise);
            prop_assert_eq!(a, b);
            prop_assert_eq!(hash_of(&a), hash_of(&b));
        }
    }
}
