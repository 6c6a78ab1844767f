//! Connected zero-extension cut sparsifier
//!
//! Maps every vertex to a terminal by resolving random ball partitions at
//! geometrically increasing scales, then aggregates edge capacities between
//! terminal classes into a cut sparsifier. Each resolved vertex keeps its
//! terminal forever; the unmapped set only shrinks.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use tracing::debug;

use crate::algo::components::induced_components;
use crate::algo::shortest_path::dijkstra;
use crate::error::{Result, SparsifierError};
use crate::graph::{CapacityGraph, VertexId};
use crate::partition::sample_partition;
use crate::sparsifier::{NodeLabel, Sparsifier};

/// Total vertex -> terminal assignment produced by zero-extension
pub type Assignment = HashMap<VertexId, VertexId>;

/// Configuration for the zero-extension builder
#[derive(Debug, Clone)]
pub struct ZeroExtensionConfig {
    /// Upper bound on scale iterations. The scale loop only fails to
    /// terminate when some vertex lives in a component with no terminal;
    /// hitting the bound with vertices still unmapped reports exactly that
    /// as [`SparsifierError::TerminalUnreachable`].
    pub max_scales: u32,
}

impl Default for ZeroExtensionConfig {
    fn default() -> Self {
        Self { max_scales: 64 }
    }
}

/// Build a connected zero-extension of the graph onto its terminals.
///
/// Returns the assignment `f: V -> K` (with `f(t) = t` for every terminal)
/// and the cut sparsifier H on K. Each H edge carries the summed capacity
/// of original edges crossing between the two terminal classes, plus a
/// diagnostic `distance` equal to the true graph distance between the two
/// terminals.
///
/// At each scale `2^i` one partition is sampled; for every cluster mixing
/// mapped and unmapped vertices, each connected component of the cluster's
/// unmapped remainder is assigned to the terminal of the first mapped
/// neighbor found (an implementation-defined but deterministic witness
/// choice). Components with no mapped neighbor are left for a later scale.
pub fn connected_zero_extension(
    graph: &CapacityGraph,
    terminals: &[VertexId],
    config: &ZeroExtensionConfig,
    rng: &mut StdRng,
) -> Result<(Assignment, Sparsifier)> {
    graph.validate()?;
    graph.validate_terminals(terminals)?;

    let terminal_set: HashSet<VertexId> = terminals.iter().copied().collect();
    let mut assignment: Assignment = terminals.iter().map(|&t| (t, t)).collect();
    let mut unmapped: HashSet<VertexId> = graph
        .vertices()
        .iter()
        .copied()
        .filter(|v| !terminal_set.contains(v))
        .collect();

    let mut scale = 0u32;
    while !unmapped.is_empty() {
        if scale >= config.max_scales {
            // some component contains no terminal; report its first vertex
            let stuck = graph
                .vertices()
                .iter()
                .copied()
                .find(|v| unmapped.contains(v))
                .unwrap_or_default();
            return Err(SparsifierError::TerminalUnreachable(stuck));
        }

        let delta = 2f64.powi(scale as i32);
        let clusters = sample_partition(graph, terminals, delta, rng);

        for &t in terminals {
            let cluster = match clusters.get(&t) {
                Some(c) => c,
                None => continue,
            };

            let deleted: HashSet<VertexId> = cluster
                .iter()
                .copied()
                .filter(|v| !unmapped.contains(v))
                .collect();
            if deleted.is_empty() || deleted.len() == cluster.len() {
                continue; // fully unmapped or fully mapped
            }
            let residual: HashSet<VertexId> = cluster.difference(&deleted).copied().collect();

            for component in induced_components(graph, &residual) {
                // boundary witness: first component vertex with a deleted
                // neighbor, in deterministic traversal order
                let witness = component.iter().find_map(|&v| {
                    graph
                        .neighbors(v)
                        .iter()
                        .find(|(u, _)| deleted.contains(u))
                        .map(|&(u, _)| assignment[&u])
                });
                if let Some(owner) = witness {
                    for &v in &component {
                        assignment.insert(v, owner);
                        unmapped.remove(&v);
                    }
                }
            }
        }

        debug!(scale, delta, remaining = unmapped.len(), "scale resolved");
        scale += 1;
    }

    let sparsifier = build_sparsifier(graph, terminals, &assignment);
    Ok((assignment, sparsifier))
}

/// Aggregate crossing capacities into H and attach terminal distances.
fn build_sparsifier(
    graph: &CapacityGraph,
    terminals: &[VertexId],
    assignment: &Assignment,
) -> Sparsifier {
    let mut h = Sparsifier::new();
    for &t in terminals {
        h.add_node(NodeLabel::Terminal(t));
    }

    for e in graph.edges() {
        let (t1, t2) = (assignment[&e.source], assignment[&e.target]);
        if t1 != t2 {
            h.accumulate(NodeLabel::Terminal(t1), NodeLabel::Terminal(t2), e.capacity);
        }
    }

    // diagnostic distances between the terminals of each H edge
    let pairs: Vec<(NodeLabel, NodeLabel)> = h.edges().iter().map(|e| (e.a, e.b)).collect();
    let mut dist_from: HashMap<VertexId, HashMap<VertexId, f64>> = HashMap::new();
    for (a, b) in pairs {
        if let (NodeLabel::Terminal(t1), NodeLabel::Terminal(t2)) = (a, b) {
            let dist = dist_from
                .entry(t1)
                .or_insert_with(|| dijkstra(graph, t1, None, |e| e.capacity));
            if let Some(&d) = dist.get(&t2) {
                h.set_distance(a, b, d);
            }
        }
    }

    h
}
