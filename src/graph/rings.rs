use std::collections::HashSet;

use tracing::warn;

use crate::error::{GraphError, Result};
use crate::geometry::{Edge, Polygon, Vertex};

use super::Graph;

/// How the ring walk leaves a vertex with four incident edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BranchDecision {
    /// Continue along this edge.
    Take(Edge),
    /// Reverse the partial ring and resume from its other end.
    Reverse,
    /// No unused edge left; the walk ends here.
    Stop,
}

impl BranchDecision {
    /// Resolves a branch vertex `at`, reached along `incoming`.
    ///
    /// `candidates` are the unused edges at `at`. An edge "closes" when its
    /// far end is already on the partial `ring`. Exactly one closing edge is
    /// taken directly; with none or two, the unique remaining option or the
    /// one not parallel to `incoming` is taken; with three the ring is
    /// reversed.
    #[must_use]
    pub fn resolve(
        ring: &[Vertex],
        at: &Vertex,
        incoming: Option<&Edge>,
        candidates: &[Edge],
    ) -> Self {
        let closing: Vec<Edge> = candidates
            .iter()
            .filter(|e| e.other(at).is_some_and(|far| ring.contains(&far)))
            .copied()
            .collect();

        let pool = match closing.len() {
            1 => return BranchDecision::Take(closing[0]),
            0 => candidates.to_vec(),
            2 => closing,
            _ => return BranchDecision::Reverse,
        };

        match pool.as_slice() {
            [] => BranchDecision::Stop,
            [only] => BranchDecision::Take(*only),
            [first, ..] => {
                let turning: Vec<&Edge> = pool
                    .iter()
                    .filter(|e| incoming.is_none_or(|inc| !inc.is_parallel_to(e)))
                    .collect();
                match turning.as_slice() {
                    [single] => BranchDecision::Take(**single),
                    _ => BranchDecision::Take(*first),
                }
            }
        }
    }
}

/// Walks every closed ring of `graph`, starting each walk from the unvisited
/// vertex of lowest degree.
pub(super) fn build_polygons(graph: &Graph) -> Result<Vec<Polygon>> {
    let mut used: HashSet<Edge> = HashSet::new();
    let mut rings: Vec<Vec<Vertex>> = Vec::new();

    loop {
        let start = graph
            .vertices()
            .iter()
            .filter(|v| graph.edges_at(v).iter().any(|e| !used.contains(e)))
            .min_by_key(|v| graph.edges_at(v).len());
        let Some(&start) = start else {
            break;
        };
        walk(graph, start, &mut used, &mut rings)?;
    }

    rings
        .into_iter()
        .map(|ring| Polygon::new(ring, false))
        .collect()
}

/// Follows unused edges from `start`, pushing every loop it closes onto
/// `rings`. Open chains are dropped.
fn walk(
    graph: &Graph,
    start: Vertex,
    used: &mut HashSet<Edge>,
    rings: &mut Vec<Vec<Vertex>>,
) -> Result<()> {
    let mut ring = vec![start];
    let mut current = start;
    let mut incoming: Option<Edge> = None;
    let mut reversed = false;

    loop {
        let incident = graph.edges_at(&current);
        let candidates: Vec<Edge> = incident
            .iter()
            .filter(|e| !used.contains(e))
            .copied()
            .collect();

        let decision = match incident.len() {
            1 | 2 => candidates
                .first()
                .map_or(BranchDecision::Stop, |e| BranchDecision::Take(*e)),
            4 => BranchDecision::resolve(&ring, &current, incoming.as_ref(), &candidates),
            degree => {
                return Err(GraphError::UnsupportedBranch {
                    x: current.x(),
                    y: current.y(),
                    degree,
                }
                .into())
            }
        };

        let edge = match decision {
            BranchDecision::Take(edge) => edge,
            BranchDecision::Stop => return Ok(()),
            BranchDecision::Reverse if !reversed && ring.len() > 1 => {
                warn!(at = %current, len = ring.len(), "reversing partial ring at branch vertex");
                reversed = true;
                ring.reverse();
                current = ring[ring.len() - 1];
                incoming = Some(Edge::new(ring[ring.len() - 2], current));
                continue;
            }
            BranchDecision::Reverse => match candidates.first() {
                Some(edge) => *edge,
                None => return Ok(()),
            },
        };

        used.insert(edge);
        let Some(next) = edge.other(&current) else {
            return Ok(());
        };

        if let Some(pos) = ring.iter().position(|v| *v == next) {
            // Closed a loop; anything before `pos` is a tail leading into it.
            rings.push(ring.split_off(pos));
            if ring.is_empty() {
                return Ok(());
            }
            ring.push(next);
        } else {
            ring.push(next);
        }
        incoming = Some(edge);
        current = next;
    }
}
