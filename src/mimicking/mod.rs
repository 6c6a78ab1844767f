//! Exact mimicking-network builder
//!
//! Preserves every terminal-bipartition minimum cut value exactly (up to
//! the tiny uniqueness perturbation) at the price of `2^(k-1) - 1` minimum
//! cut computations. Capacities are first perturbed so every minimum cut is
//! unique; all non-trivial bipartitions of the terminal set are enumerated
//! and their unique min-cut edges unioned into the crossing set; vertices
//! never separated by any of those cuts are contracted together; finally
//! the contracted graph is rebuilt from the un-perturbed capacities.
//!
//! The cost is exponential in the terminal count, so the builder rejects
//! terminal sets above a configured bound instead of silently running for
//! hours; callers needing more terminals must raise the bound explicitly.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use tracing::debug;

use crate::algo::components::filtered_components;
use crate::algo::maxflow::FlowNetwork;
use crate::error::{Result, SparsifierError};
use crate::graph::{CapacityGraph, VertexId};
use crate::sparsifier::{NodeLabel, Sparsifier};

/// Configuration for the mimicking-network builder
#[derive(Debug, Clone)]
pub struct MimickingConfig {
    /// Reject terminal sets larger than this (enumeration is 2^(k-1) cuts).
    /// The effective bound is capped at 64, the width of the subset masks.
    pub max_terminals: usize,
    /// Total uniqueness perturbation spread over the edges
    pub epsilon: f64,
    /// Run the independent bipartition cuts under rayon; crossing-edge
    /// sets are unioned afterwards, which is order-insensitive
    pub parallel: bool,
}

impl Default for MimickingConfig {
    fn default() -> Self {
        Self {
            max_terminals: 16,
            epsilon: 1e-6,
            parallel: false,
        }
    }
}

/// Lazy, restartable enumeration of the non-trivial bipartitions (S, T)
/// of a terminal list.
///
/// Yields each unordered bipartition exactly once (`2^(k-1) - 1` items for
/// k terminals) by never placing the last terminal in S. Callers may stop,
/// resume, or checkpoint the iterator at any point.
#[derive(Debug, Clone)]
pub struct Bipartitions {
    terminals: Vec<VertexId>,
    mask: u64,
    limit: u64,
}

impl Bipartitions {
    /// Enumerate bipartitions of `terminals`.
    ///
    /// Subset masks are 64-bit, so terminal lists longer than 64 are
    /// rejected rather than enumerated with truncated masks.
    pub fn new(terminals: &[VertexId]) -> Result<Self> {
        let k = terminals.len();
        if k > 64 {
            return Err(SparsifierError::InvalidParameter(format!(
                "bipartition enumeration supports at most 64 terminals, got {k}"
            )));
        }
        let limit = if k >= 2 { 1u64 << (k - 1) } else { 1 };
        Ok(Self {
            terminals: terminals.to_vec(),
            mask: 1,
            limit,
        })
    }

    /// Number of bipartitions remaining
    pub fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.mask)
    }
}

impl Iterator for Bipartitions {
    type Item = (Vec<VertexId>, Vec<VertexId>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.mask >= self.limit {
            return None;
        }
        let mask = self.mask;
        self.mask += 1;

        let mut s = Vec::new();
        let mut t = Vec::new();
        for (i, &term) in self.terminals.iter().enumerate() {
            if i + 1 < self.terminals.len() && mask & (1u64 << i) != 0 {
                s.push(term);
            } else {
                t.push(term);
            }
        }
        Some((s, t))
    }
}

/// Build the exact mimicking network of a graph on a terminal set.
///
/// Returns the sparsifier H and the contraction map from every original
/// vertex to its component label. Component labels prefer the smallest
/// terminal id contained in the component (an implementation-defined but
/// deterministic tie-break); terminal-free components get synthetic labels.
///
/// Fewer than two terminals makes the enumeration empty; the builder then
/// returns the trivial single-node sparsifier with every vertex contracted
/// into it.
pub fn mimicking_network(
    graph: &CapacityGraph,
    terminals: &[VertexId],
    config: &MimickingConfig,
) -> Result<(Sparsifier, HashMap<VertexId, NodeLabel>)> {
    graph.validate()?;
    graph.validate_terminals(terminals)?;
    if !config.epsilon.is_finite() || config.epsilon <= 0.0 {
        return Err(SparsifierError::InvalidParameter(format!(
            "epsilon must be positive, got {}",
            config.epsilon
        )));
    }
    // subset masks are 64-bit, so the configured bound cannot exceed 64
    let limit = config.max_terminals.min(64);
    if terminals.len() > limit {
        return Err(SparsifierError::TooManyTerminals {
            count: terminals.len(),
            limit,
        });
    }

    if terminals.len() <= 1 {
        let label = NodeLabel::Terminal(terminals[0]);
        let mut h = Sparsifier::new();
        h.add_node(label);
        let map = graph.vertices().iter().map(|&v| (v, label)).collect();
        return Ok((h, map));
    }

    // private perturbed copy makes every minimum cut unique
    let perturbed = graph.perturbed(config.epsilon);
    let crossing = collect_crossing_edges(&perturbed, terminals, config.parallel)?;
    debug!(
        bipartitions = Bipartitions::new(terminals)?.remaining(),
        crossing = crossing.len(),
        "cut enumeration complete"
    );

    // contract the components never separated by any enumerated cut
    let components = filtered_components(graph, |e| !crossing.contains(&e.index));
    let terminal_set: HashSet<VertexId> = terminals.iter().copied().collect();

    let mut map: HashMap<VertexId, NodeLabel> = HashMap::with_capacity(graph.num_vertices());
    let mut h = Sparsifier::new();
    for (idx, component) in components.iter().enumerate() {
        let label = component
            .iter()
            .copied()
            .filter(|v| terminal_set.contains(v))
            .min()
            .map_or(NodeLabel::Component(idx), NodeLabel::Terminal);
        h.add_node(label);
        for &v in component {
            map.insert(v, label);
        }
    }

    // rebuild with the original, un-perturbed capacities
    for e in graph.edges() {
        let (a, b) = (map[&e.source], map[&e.target]);
        if a != b {
            h.accumulate(a, b, e.capacity);
        }
    }

    Ok((h, map))
}

/// Union of the unique min-cut edge sets over every bipartition.
fn collect_crossing_edges(
    perturbed: &CapacityGraph,
    terminals: &[VertexId],
    parallel: bool,
) -> Result<HashSet<usize>> {
    if perturbed.num_edges() == 0 {
        return Ok(HashSet::new());
    }

    // auxiliary node ids above every real vertex id
    let max_id = perturbed.vertices().iter().copied().max().unwrap_or(0);
    let (source, sink) = (max_id + 1, max_id + 2);
    let big = perturbed.total_capacity() + 1.0;

    let one_cut = |s_side: &[VertexId], t_side: &[VertexId]| -> Result<HashSet<usize>> {
        let mut net = FlowNetwork::from_graph(perturbed);
        for &v in s_side {
            net.add_edge(source, v, big);
        }
        for &v in t_side {
            net.add_edge(sink, v, big);
        }
        let (_, mut side) = net.min_cut(source, sink)?;
        side.remove(&source);
        side.remove(&sink);

        Ok(perturbed
            .edges()
            .iter()
            .filter(|e| side.contains(&e.source) != side.contains(&e.target))
            .map(|e| e.index)
            .collect())
    };

    if parallel {
        let bipartitions: Vec<_> = Bipartitions::new(terminals)?.collect();
        let sets: Vec<HashSet<usize>> = bipartitions
            .par_iter()
            .map(|(s, t)| one_cut(s, t))
            .collect::<Result<_>>()?;
        Ok(sets.into_iter().flatten().collect())
    } else {
        let mut crossing = HashSet::new();
        for (s, t) in Bipartitions::new(terminals)? {
            crossing.extend(one_cut(&s, &t)?);
        }
        Ok(crossing)
    }
}
