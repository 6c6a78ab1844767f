//! Single-source and multi-source shortest-path distances
//!
//! Dijkstra relaxation over a caller-chosen edge length. Heap ties are
//! broken by distance, then vertex id, then origin id, so a fixed input
//! graph always settles vertices in the same order.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::graph::{CapacityGraph, Edge, VertexId};

/// Min-heap entry; `origin` tracks the search source in multi-source runs.
struct HeapEntry {
    dist: f64,
    vertex: VertexId,
    origin: VertexId,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.vertex.cmp(&self.vertex))
            .then_with(|| other.origin.cmp(&self.origin))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

/// Single-source shortest-path distances with an optional cutoff.
///
/// Distances use `edge_len` per edge; vertices farther than `cutoff`
/// (inclusive) are not reported. An unknown source yields an empty map.
pub fn dijkstra<F>(
    graph: &CapacityGraph,
    source: VertexId,
    cutoff: Option<f64>,
    edge_len: F,
) -> HashMap<VertexId, f64>
where
    F: Fn(&Edge) -> f64,
{
    let mut dist: HashMap<VertexId, f64> = HashMap::new();
    if !graph.has_vertex(source) {
        return dist;
    }

    let mut heap = BinaryHeap::new();
    dist.insert(source, 0.0);
    heap.push(HeapEntry {
        dist: 0.0,
        vertex: source,
        origin: source,
    });

    while let Some(HeapEntry { dist: d, vertex: u, .. }) = heap.pop() {
        if d > dist[&u] {
            continue; // stale entry
        }
        for &(v, edge_idx) in graph.neighbors(u) {
            let edge = &graph.edges()[edge_idx];
            let nd = d + edge_len(edge);
            if let Some(limit) = cutoff {
                if nd > limit {
                    continue;
                }
            }
            if dist.get(&v).map_or(true, |&cur| nd < cur) {
                dist.insert(v, nd);
                heap.push(HeapEntry {
                    dist: nd,
                    vertex: v,
                    origin: source,
                });
            }
        }
    }

    dist
}

/// Result of a multi-source relaxation: for every reached vertex, the
/// owning source and the distance to it.
#[derive(Debug, Clone, Default)]
pub struct NearestSource {
    /// Vertex -> owning source
    pub owner: HashMap<VertexId, VertexId>,
    /// Vertex -> distance to its owner
    pub dist: HashMap<VertexId, f64>,
}

/// Multi-source Dijkstra restricted to edges accepted by `edge_filter`.
///
/// Every reached vertex is owned by the source it was settled from; the
/// first settle wins, with heap ties resolved by vertex id then origin id.
/// Vertices in components containing no source are absent from the result.
pub fn nearest_source<F, P>(
    graph: &CapacityGraph,
    sources: &[VertexId],
    edge_len: F,
    edge_filter: P,
) -> NearestSource
where
    F: Fn(&Edge) -> f64,
    P: Fn(&Edge) -> bool,
{
    let mut result = NearestSource::default();
    let mut settled: HashSet<VertexId> = HashSet::new();
    let mut heap = BinaryHeap::new();

    for &s in sources {
        if !graph.has_vertex(s) {
            continue;
        }
        result.dist.insert(s, 0.0);
        heap.push(HeapEntry {
            dist: 0.0,
            vertex: s,
            origin: s,
        });
    }

    while let Some(HeapEntry {
        dist: d,
        vertex: u,
        origin,
    }) = heap.pop()
    {
        if !settled.insert(u) {
            continue;
        }
        result.owner.insert(u, origin);
        result.dist.insert(u, d);

        for &(v, edge_idx) in graph.neighbors(u) {
            if settled.contains(&v) {
                continue;
            }
            let edge = &graph.edges()[edge_idx];
            if !edge_filter(edge) {
                continue;
            }
            let nd = d + edge_len(edge);
            if result.dist.get(&v).map_or(true, |&cur| nd < cur) {
                result.dist.insert(v, nd);
                heap.push(HeapEntry {
                    dist: nd,
                    vertex: v,
                    origin,
                });
            }
        }
    }

    result
}
