use crate::geometry::{Edge, Vertex};
use crate::math::approx_eq;
use crate::math::intersect_2d::{angle_at, line_line_intersect_2d};

/// An edge as seen from the sweep centre along the current ray.
///
/// Only used for ordering inside [`OpenEdges`]: an edge sorts first when the
/// ray hits it closer to the centre. Two edges hit at the same distance meet
/// in a shared vertex on the ray; the one making the smaller angle with the
/// way back to the centre sorts first.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgeKey<'a> {
    centre: &'a Vertex,
    ray_to: &'a Vertex,
    edge: Edge,
}

impl<'a> EdgeKey<'a> {
    pub(crate) fn new(centre: &'a Vertex, ray_to: &'a Vertex, edge: Edge) -> Self {
        Self {
            centre,
            ray_to,
            edge,
        }
    }

    /// Returns `true` if this edge is nearer the centre than `other` along
    /// the ray.
    pub(crate) fn is_nearer_than(&self, other: &Edge) -> bool {
        if self.edge == *other {
            return false;
        }
        if !other.crosses_2d(self.centre, self.ray_to) {
            return true;
        }
        let own = self.distance_along_ray(&self.edge);
        let theirs = self.distance_along_ray(other);
        if !approx_eq(own, theirs) {
            return own < theirs;
        }

        let shared = if other.contains(self.edge.start()) {
            *self.edge.start()
        } else {
            *self.edge.end()
        };
        let (Some(own_far), Some(their_far)) = (self.edge.other(&shared), other.other(&shared))
        else {
            return false;
        };
        let c = self.centre.point();
        let s = shared.point();
        angle_at(&c, &s, &own_far.point()) < angle_at(&c, &s, &their_far.point())
    }

    /// Distance from the centre to where the ray's line meets `edge`'s line;
    /// zero when they are parallel.
    fn distance_along_ray(&self, edge: &Edge) -> f64 {
        let origin = self.centre.point();
        let ray = self.ray_to.point() - origin;
        let ray_len = ray.xy().norm();
        line_line_intersect_2d(&origin, &ray, &edge.start().point(), &edge.direction())
            .map_or(0.0, |(t, _)| t * ray_len)
    }
}

/// Sweep status structure: the edges currently crossed by the sweep ray,
/// nearest first.
#[derive(Debug, Clone, Default)]
pub(crate) struct OpenEdges {
    edges: Vec<Edge>,
}

impl OpenEdges {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts `edge` at its place along the ray from `centre` through
    /// `ray_to`.
    pub(crate) fn insert(&mut self, centre: &Vertex, ray_to: &Vertex, edge: Edge) {
        let key = EdgeKey::new(centre, ray_to, edge);
        let (mut lo, mut hi) = (0, self.edges.len());
        while lo < hi {
            let mid = (lo + hi) / 2;
            if key.is_nearer_than(&self.edges[mid]) {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        self.edges.insert(lo, edge);
    }

    /// Removes `edge` if present.
    pub(crate) fn delete(&mut self, edge: &Edge) {
        if let Some(i) = self.edges.iter().position(|e| e == edge) {
            self.edges.remove(i);
        }
    }

    /// Edge nearest to the centre along the current ray.
    pub(crate) fn smallest(&self) -> Option<&Edge> {
        self.edges.first()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
