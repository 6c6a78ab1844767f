//! Randomized ball partitioner (one CKR-style padded-decomposition sample)
//!
//! Each terminal grows a ball of an independent random radius drawn
//! uniformly from `[delta/2, delta]`; terminals are processed in a
//! uniformly shuffled order and vertices are claimed first come, first
//! served. Repeated calls at increasing scales drive the connected
//! zero-extension builder.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use crate::algo::shortest_path::dijkstra;
use crate::graph::{CapacityGraph, VertexId};

/// One random partition of the graph at scale `delta`.
///
/// Returns a mapping terminal -> claimed vertex set with three guarantees:
/// every terminal owns itself, clusters are pairwise disjoint, and every
/// claimed vertex is within graph distance `delta` of its owner. Terminals
/// are claimed by themselves before any ball grows, so the self-ownership
/// and disjointness guarantees hold even when another ball reaches a
/// terminal first.
///
/// The random draw order is fixed (shuffle, then one radius per terminal
/// in input order), so a seeded generator yields identical partitions.
pub fn sample_partition(
    graph: &CapacityGraph,
    terminals: &[VertexId],
    delta: f64,
    rng: &mut StdRng,
) -> HashMap<VertexId, HashSet<VertexId>> {
    let mut order = terminals.to_vec();
    order.shuffle(rng);

    let mut radii: HashMap<VertexId, f64> = HashMap::with_capacity(terminals.len());
    for &t in terminals {
        radii.insert(t, delta / 2.0 + rng.gen::<f64>() * delta / 2.0);
    }

    // terminals own themselves unconditionally
    let mut owner: HashMap<VertexId, VertexId> = HashMap::new();
    for &t in terminals {
        owner.insert(t, t);
    }

    for &t in &order {
        let radius = radii[&t];
        let ball = dijkstra(graph, t, Some(radius), |e| e.capacity);
        trace!(terminal = t, radius, reached = ball.len(), "ball grown");
        for v in ball.keys() {
            owner.entry(*v).or_insert(t);
        }
    }

    let mut clusters: HashMap<VertexId, HashSet<VertexId>> =
        terminals.iter().map(|&t| (t, HashSet::new())).collect();
    for (v, t) in owner {
        if let Some(cluster) = clusters.get_mut(&t) {
            cluster.insert(v);
        }
    }
    clusters
}
