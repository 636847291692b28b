use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::collections::IndexedPriorityQueue;
use crate::error::{PathError, Result};
use crate::geometry::Vertex;
use crate::graph::Graph;

/// Single-source shortest path over `graph` with edge length as weight.
///
/// Stops as soon as `destination` is settled and returns the vertices from
/// `origin` to `destination`, both included.
pub(super) fn dijkstra(graph: &Graph, origin: &Vertex, destination: &Vertex) -> Result<Vec<Vertex>> {
    let unreachable = || PathError::Unreachable {
        from_x: origin.x(),
        from_y: origin.y(),
        to_x: destination.x(),
        to_y: destination.y(),
    };

    let mut queue = IndexedPriorityQueue::min();
    let mut distances: HashMap<Vertex, f64> = HashMap::from([(*origin, 0.0)]);
    let mut predecessors: HashMap<Vertex, Vertex> = HashMap::new();
    let mut settled: HashSet<Vertex> = HashSet::new();
    queue.push_or_improve(*origin, 0.0);

    while let Ok((v, dist)) = queue.take() {
        settled.insert(v);
        trace!(vertex = %v, distance = dist, "settled");
        if v == *destination {
            break;
        }
        for edge in graph.edges_at(&v) {
            let Some(w) = edge.other(&v) else {
                continue;
            };
            if settled.contains(&w) {
                continue;
            }
            let candidate = dist + edge.length();
            if distances.get(&w).is_none_or(|known| candidate < *known) {
                distances.insert(w, candidate);
                predecessors.insert(w, v);
                queue.push_or_improve(w, candidate);
            }
        }
    }

    if !settled.contains(destination) {
        return Err(unreachable().into());
    }
    let mut route = vec![graph.vertex(destination).copied().unwrap_or(*destination)];
    let mut current = *destination;
    while current != *origin {
        current = *predecessors.get(&current).ok_or_else(unreachable)?;
        route.push(current);
    }
    route.reverse();
    Ok(route)
}
