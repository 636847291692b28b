use std::collections::HashSet;
use std::f64::consts::PI;

use tracing::trace;

use crate::collections::BinaryHeap;
use crate::geometry::{Edge, Vertex};
use crate::graph::Graph;
use crate::math::intersect_2d::{line_line_intersect_2d, on_segment_2d, point_at};
use crate::math::{orientation_xy, Orientation, TOLERANCE};

use super::open_edges::OpenEdges;

/// Knobs of a single rotational sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SweepParams {
    /// Stop once the sweep angle passes π.
    pub(crate) half_scan: bool,
    /// Keep only pairs where at least one end is extreme.
    pub(crate) reduced: bool,
    /// Emit projections of grazing rays onto the obstacle behind them.
    pub(crate) max_visibility: bool,
}

/// A vertex waiting to be swept, ordered by angle then distance.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
struct Candidate {
    angle: f64,
    distance: f64,
    vertex: Vertex,
}

/// A visible vertex met while tracing an outline, with the side its
/// obstacle lies on when the ray grazes it and where the ray lands next.
#[derive(Debug, Clone, Copy)]
struct Sighting {
    vertex: Vertex,
    side: Option<Orientation>,
    beyond: Option<Vertex>,
}

/// Vertices visible from `centre` among the vertices of `base` and `extras`,
/// in counter-clockwise order starting from the positive x direction.
///
/// `centre` does not have to be part of `base`. `extras` are free points
/// that are candidates for visibility but do not block sight.
pub(crate) fn visible_vertices(
    centre: &Vertex,
    base: &Graph,
    extras: &[Vertex],
    params: SweepParams,
) -> Vec<Vertex> {
    let centre = base.vertex(centre).copied().unwrap_or(*centre);

    let mut seen: HashSet<Vertex> = HashSet::from([centre]);
    let mut candidates = BinaryHeap::min();
    let mut reach: f64 = 0.0;
    for v in base.vertices().iter().chain(extras) {
        let distance = centre.distance_2d(v);
        if distance < TOLERANCE || !seen.insert(*v) {
            continue;
        }
        reach = reach.max(distance);
        candidates.push(Candidate {
            angle: centre.polar_angle(v),
            distance,
            vertex: *v,
        });
    }
    let candidate_count = candidates.len();

    let ray_end = Vertex::new(centre.x() + 2.0 * reach + 1.0, centre.y(), centre.z());
    let mut open = initial_open_edges(&centre, &ray_end, base);

    let mut visible = Vec::new();
    let mut run: Vec<Sighting> = Vec::new();
    let mut prev: Option<(Vertex, bool)> = None;
    while let Ok(Candidate { angle, vertex: p, .. }) = candidates.take() {
        if params.half_scan && angle > PI {
            break;
        }
        if run.last().is_some_and(|last| !lies_between(&centre, &last.vertex, &p)) {
            flush_run(&mut run, &mut visible);
        }

        let incident = base.edges_at(&p);
        for edge in incident {
            if turn_towards(&centre, &p, edge) == Some(Orientation::Clockwise) {
                open.delete(edge);
            }
        }

        let mut is_visible = match prev {
            Some((prev_v, prev_visible)) if lies_between(&centre, &prev_v, &p) => {
                prev_visible
                    && !open
                        .iter()
                        .any(|e| !e.contains(&prev_v) && e.crosses_2d(&prev_v, &p))
                    && !cuts_through_interior(&prev_v, &p, base)
            }
            _ => open
                .smallest()
                .is_none_or(|nearest| !nearest.crosses_2d(&centre, &p)),
        };
        if is_visible && !base.contains_edge(&Edge::new(centre, p)) {
            is_visible = !cuts_through_interior(&centre, &p, base);
        }

        let keep = !params.reduced || is_extreme(&p, &centre, base) || is_extreme(&centre, &p, base);
        if is_visible && keep {
            if params.max_visibility {
                let side = grazing_side(&centre, &p, base);
                run.push(Sighting {
                    vertex: p,
                    side,
                    beyond: side.and_then(|_| project_past(&centre, &p, &open)),
                });
            } else {
                visible.push(p);
            }
        }

        for edge in incident {
            if !edge.contains(&centre)
                && turn_towards(&centre, &p, edge) == Some(Orientation::CounterClockwise)
            {
                open.insert(&centre, &p, *edge);
            }
        }
        prev = Some((p, is_visible));
    }
    flush_run(&mut run, &mut visible);

    trace!(
        centre = %centre,
        candidates = candidate_count,
        visible = visible.len(),
        open = open.len(),
        "swept centre"
    );
    visible
}

/// Edges crossed by the initial ray from `centre` towards `ray_end`.
///
/// Edges touching the ray with an endpoint are left out; the sweep inserts
/// them when it reaches that endpoint.
fn initial_open_edges(centre: &Vertex, ray_end: &Vertex, base: &Graph) -> OpenEdges {
    let c = centre.point();
    let r = ray_end.point();
    let mut open = OpenEdges::new();
    for edge in base.edges() {
        if edge.contains(centre) || !edge.crosses_2d(centre, ray_end) {
            continue;
        }
        if on_segment_2d(&c, &edge.start().point(), &r) || on_segment_2d(&c, &edge.end().point(), &r) {
            continue;
        }
        open.insert(centre, ray_end, *edge);
    }
    open
}

/// Side of the ray `centre → p` on which `edge`'s far end lies.
fn turn_towards(centre: &Vertex, p: &Vertex, edge: &Edge) -> Option<Orientation> {
    let far = edge.other(p)?;
    Some(orientation_xy(&centre.point(), &p.point(), &far.point()))
}

/// `true` if `prev` sits on the segment `centre → p`.
fn lies_between(centre: &Vertex, prev: &Vertex, p: &Vertex) -> bool {
    on_segment_2d(&centre.point(), &prev.point(), &p.point())
}

/// `true` if the midpoint of `a → b` is in the solid part of a polygon owning
/// either end: strictly inside an obstacle or outside a boundary.
fn cuts_through_interior(a: &Vertex, b: &Vertex, base: &Graph) -> bool {
    let mid = Vertex::mid_vertex(a, b);
    [a, b]
        .into_iter()
        .filter_map(|v| base.polygon_of(v))
        .any(|polygon| {
            if polygon.is_boundary() {
                !polygon.contains_vertex(&mid)
            } else {
                polygon.strictly_contains(&mid)
            }
        })
}

/// Sides, relative to the line `from → v`, of `v`'s neighbours in `base`.
fn neighbour_sides(v: &Vertex, from: &Vertex, base: &Graph) -> Vec<Orientation> {
    let f = from.point();
    let q = v.point();
    base.adjacent_vertices(v)
        .iter()
        .map(|n| orientation_xy(&f, &q, &n.point()))
        .filter(|o| *o != Orientation::Collinear)
        .collect()
}

/// `true` if the sight line `from → v` does not enter the obstacle at `v`.
///
/// Free and boundary vertices are always extreme.
fn is_extreme(v: &Vertex, from: &Vertex, base: &Graph) -> bool {
    match base.polygon_of(v) {
        Some(polygon) if !polygon.is_boundary() => {
            let sides = neighbour_sides(v, from, base);
            sides.windows(2).all(|w| w[0] == w[1])
        }
        _ => true,
    }
}

/// If every neighbour of `p` is on one side of the ray `centre → p`, the ray
/// grazes `p` and continues; returns that side.
fn grazing_side(centre: &Vertex, p: &Vertex, base: &Graph) -> Option<Orientation> {
    let sides = neighbour_sides(p, centre, base);
    let first = *sides.first()?;
    sides.iter().all(|s| *s == first).then_some(first)
}

/// Emits a run of visible vertices sharing one ray, in outline order.
///
/// The nearest grazed obstacle decides the direction: clockwise of the ray
/// the outline walks outwards, counter-clockwise it walks back in. The ray
/// only continues past the farthest vertex when every grazed obstacle on it
/// lies on the same side.
fn flush_run(run: &mut Vec<Sighting>, out: &mut Vec<Vertex>) {
    let Some(side) = run.iter().find_map(|s| s.side) else {
        out.extend(run.drain(..).map(|s| s.vertex));
        return;
    };
    let mut points: Vec<Vertex> = run.iter().map(|s| s.vertex).collect();
    let passes = run.iter().filter_map(|s| s.side).all(|s| s == side);
    if let Some(beyond) = run.last().and_then(|s| s.beyond) {
        if passes && !points.contains(&beyond) {
            points.push(beyond);
        }
    }
    run.clear();
    if side == Orientation::CounterClockwise {
        points.reverse();
    }
    out.extend(points);
}

/// Nearest point beyond `p` where the ray `centre → p` meets an open edge.
fn project_past(centre: &Vertex, p: &Vertex, open: &OpenEdges) -> Option<Vertex> {
    let origin = centre.point();
    let ray = p.point() - origin;
    open.iter()
        .filter(|e| !e.contains(p))
        .filter_map(|e| {
            let start = e.start().point();
            let dir = e.direction();
            let (t, u) = line_line_intersect_2d(&origin, &ray, &start, &dir)?;
            let on_edge = (-TOLERANCE..=1.0 + TOLERANCE).contains(&u);
            (t > 1.0 + TOLERANCE && on_edge).then(|| (t, point_at(&start, &dir, u.clamp(0.0, 1.0)), e))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, point, e)| Vertex::from_point(&point).with_polygon(e.polygon_id()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;

    fn v(x: f64, y: f64) -> Vertex {
        Vertex::xy(x, y)
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64, is_boundary: bool) -> Polygon {
        Polygon::new(vec![v(x0, y0), v(x1, y0), v(x1, y1), v(x0, y1)], is_boundary).unwrap()
    }

    fn room_with_pillar() -> Graph {
        Graph::from_polygons([
            rect(0.0, 0.0, 10.0, 10.0, true),
            rect(6.0, 4.0, 8.0, 6.0, false),
        ])
        .unwrap()
    }

    const FULL: SweepParams = SweepParams {
        half_scan: false,
        reduced: false,
        max_visibility: false,
    };

    #[test]
    fn empty_room_sees_every_corner_in_angular_order() {
        let base = Graph::from_polygons([rect(0.0, 0.0, 10.0, 10.0, true)]).unwrap();
        let seen = visible_vertices(&v(5.0, 5.0), &base, &[], FULL);
        assert_eq!(seen, vec![v(10.0, 10.0), v(0.0, 10.0), v(0.0, 0.0), v(10.0, 0.0)]);
    }

    #[test]
    fn pillar_hides_its_far_corners() {
        let seen = visible_vertices(&v(2.0, 5.0), &room_with_pillar(), &[], FULL);
        assert_eq!(
            seen,
            vec![
                v(6.0, 6.0),
                v(10.0, 10.0),
                v(0.0, 10.0),
                v(0.0, 0.0),
                v(10.0, 0.0),
                v(6.0, 4.0),
            ]
        );
    }

    #[test]
    fn half_scan_stops_at_pi() {
        let base = Graph::from_polygons([rect(0.0, 0.0, 10.0, 10.0, true)]).unwrap();
        let params = SweepParams {
            half_scan: true,
            ..FULL
        };
        let seen = visible_vertices(&v(5.0, 5.0), &base, &[], params);
        assert_eq!(seen, vec![v(10.0, 10.0), v(0.0, 10.0)]);
    }

    #[test]
    fn diagonal_through_an_obstacle_is_rejected() {
        let base = Graph::from_polygons([
            rect(0.0, 0.0, 10.0, 10.0, true),
            rect(4.0, 4.0, 6.0, 6.0, false),
        ])
        .unwrap();
        let seen = visible_vertices(&v(0.0, 0.0), &base, &[], FULL);
        assert!(seen.contains(&v(4.0, 4.0)));
        assert!(!seen.contains(&v(6.0, 6.0)));
        assert!(!seen.contains(&v(10.0, 10.0)));
        assert!(seen.contains(&v(10.0, 0.0)));
    }

    #[test]
    fn extras_are_candidates_but_not_obstacles() {
        let base = Graph::from_polygons([rect(0.0, 0.0, 10.0, 10.0, true)]).unwrap();
        let extra = v(7.0, 5.0);
        let seen = visible_vertices(&v(2.0, 5.0), &base, &[extra], FULL);
        assert_eq!(seen.first(), Some(&extra));
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn grazing_rays_project_onto_the_wall_behind() {
        let params = SweepParams {
            max_visibility: true,
            ..FULL
        };
        let seen = visible_vertices(&v(2.0, 5.0), &room_with_pillar(), &[], params);
        assert_eq!(
            seen,
            vec![
                v(6.0, 6.0),
                v(10.0, 7.0),
                v(10.0, 10.0),
                v(0.0, 10.0),
                v(0.0, 0.0),
                v(10.0, 0.0),
                v(10.0, 3.0),
                v(6.0, 4.0),
            ]
        );
        assert_eq!(seen[1].polygon_id, Some(0));
    }

    #[test]
    fn reduction_drops_pairs_entering_both_obstacles() {
        // Two pillars facing each other corner to corner along y = x.
        let base = Graph::from_polygons([
            rect(0.0, 0.0, 10.0, 10.0, true),
            rect(2.0, 2.0, 4.0, 4.0, false),
            rect(6.0, 6.0, 8.0, 8.0, false),
        ])
        .unwrap();
        let reduced = SweepParams {
            reduced: true,
            ..FULL
        };
        let from = v(4.0, 4.0);
        assert!(visible_vertices(&from, &base, &[], FULL).contains(&v(6.0, 6.0)));
        let kept = visible_vertices(&from, &base, &[], reduced);
        assert!(!kept.contains(&v(6.0, 6.0)));
        assert!(kept.contains(&v(6.0, 8.0)));
    }
}
