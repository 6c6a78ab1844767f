//! Randomized decomposition-tree flow/cut sparsifier
//!
//! Averages independent random spanning-tree decompositions: each sample
//! builds a spanning forest biased toward high-capacity edges (length
//! `1/capacity` with small multiplicative jitter), assigns every vertex to
//! its nearest terminal under tree distance, and contributes the crossing
//! capacities, divided by the sample count, to the sparsifier. More samples
//! means lower variance and proportionally more work.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use crate::algo::mst::minimum_spanning_forest;
use crate::algo::shortest_path::nearest_source;
use crate::error::{Result, SparsifierError};
use crate::graph::{CapacityGraph, VertexId};
use crate::sparsifier::{NodeLabel, Sparsifier};

/// Configuration for the decomposition-tree sparsifier
#[derive(Debug, Clone)]
pub struct DecompositionConfig {
    /// Number of independent tree samples; defaults to
    /// `8 * ceil(log2(max(k, 2)))` for k terminals
    pub samples: Option<usize>,
    /// Multiplicative noise on tree-building edge lengths
    pub jitter: f64,
    /// Run samples under rayon; the result is identical to a sequential
    /// run because per-sample seeds are drawn up front and accumulators
    /// are folded in sample order
    pub parallel: bool,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            samples: None,
            jitter: 0.01,
            parallel: false,
        }
    }
}

impl DecompositionConfig {
    /// Set an explicit sample count
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Enable or disable parallel sampling
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Capacity contributions of one tree sample, keyed by canonical
/// terminal pair.
type PairSums = HashMap<(VertexId, VertexId), f64>;

/// Build an approximate flow/cut sparsifier by decomposition-tree
/// averaging.
///
/// H has exactly the terminals as nodes; each H edge capacity is the
/// average over samples of the total original capacity crossing between
/// the two terminal classes of that sample's nearest-terminal assignment.
pub fn decomposition_sparsifier(
    graph: &CapacityGraph,
    terminals: &[VertexId],
    config: &DecompositionConfig,
    rng: &mut StdRng,
) -> Result<Sparsifier> {
    graph.validate()?;
    graph.validate_terminals(terminals)?;
    if !config.jitter.is_finite() || config.jitter < 0.0 {
        return Err(SparsifierError::InvalidParameter(format!(
            "jitter must be non-negative, got {}",
            config.jitter
        )));
    }

    let k = terminals.len();
    let samples = config
        .samples
        .unwrap_or_else(|| ((k.max(2) as f64).log2().ceil() * 8.0) as usize)
        .max(1);
    debug!(terminals = k, samples, "sampling decomposition trees");

    // per-sample seeds drawn up front keep parallel runs reproducible
    let seeds: Vec<u64> = (0..samples).map(|_| rng.gen()).collect();

    let passes: Vec<PairSums> = if config.parallel {
        seeds
            .par_iter()
            .map(|&seed| sample_pass(graph, terminals, config.jitter, seed))
            .collect()
    } else {
        seeds
            .iter()
            .map(|&seed| sample_pass(graph, terminals, config.jitter, seed))
            .collect()
    };

    let mut h = Sparsifier::new();
    for &t in terminals {
        h.add_node(NodeLabel::Terminal(t));
    }
    for pass in passes {
        let mut pairs: Vec<((VertexId, VertexId), f64)> = pass.into_iter().collect();
        pairs.sort_by_key(|&(key, _)| key); // deterministic H edge order
        for ((t1, t2), total) in pairs {
            h.accumulate(
                NodeLabel::Terminal(t1),
                NodeLabel::Terminal(t2),
                total / samples as f64,
            );
        }
    }

    Ok(h)
}

/// One independent sample: jittered spanning forest, nearest-terminal
/// assignment by tree distance, crossing-capacity sums per terminal pair.
fn sample_pass(
    graph: &CapacityGraph,
    terminals: &[VertexId],
    jitter: f64,
    seed: u64,
) -> PairSums {
    let mut rng = StdRng::seed_from_u64(seed);

    // length = 1/capacity, perturbed so samples differ
    let lengths: Vec<f64> = graph
        .edges()
        .iter()
        .map(|e| (1.0 / e.capacity) * (1.0 + rng.gen::<f64>() * jitter))
        .collect();
    let tree = minimum_spanning_forest(graph, &lengths);

    // nearest terminal under unjittered tree distance
    let assignment = nearest_source(
        graph,
        terminals,
        |e| 1.0 / e.capacity,
        |e| tree.contains(&e.index),
    );

    let mut sums = PairSums::new();
    for e in graph.edges() {
        let (a, b) = match (
            assignment.owner.get(&e.source),
            assignment.owner.get(&e.target),
        ) {
            (Some(&a), Some(&b)) => (a, b),
            // endpoint in a component with no terminal: no contribution
            _ => continue,
        };
        if a == b {
            continue;
        }
        let key = if a <= b { (a, b) } else { (b, a) };
        *sums.entry(key).or_insert(0.0) += e.capacity;
    }
    sums
}
