//! End-to-end tests for the sparsifier constructions

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use sparsecut::algo::FlowNetwork;
use sparsecut::{
    connected_zero_extension, decomposition_sparsifier, mimicking_network, Bipartitions,
    CapacityGraph, DecompositionConfig, MimickingConfig, NodeLabel, VertexId,
    ZeroExtensionConfig,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Minimum cut separating two vertex sets, via auxiliary source/sink nodes
/// wired with capacities no cut can afford to cross.
fn set_min_cut(graph: &CapacityGraph, s_side: &[VertexId], t_side: &[VertexId]) -> f64 {
    let max_id = graph.vertices().iter().copied().max().unwrap_or(0);
    let (source, sink) = (max_id + 1, max_id + 2);
    let big = graph.total_capacity() + 1.0;

    let mut net = FlowNetwork::from_graph(graph);
    for &v in s_side {
        net.add_edge(source, v, big);
    }
    for &v in t_side {
        net.add_edge(sink, v, big);
    }
    let (value, _) = net.min_cut(source, sink).unwrap();
    value
}

#[test]
fn test_mimicking_preserves_every_bipartition_cut_on_grid() {
    init_tracing();

    // 4x4 unit grid, five terminals: H must reproduce all 15 bipartition
    // min cuts up to the uniqueness perturbation
    let g = CapacityGraph::grid(4, 4, 1.0);
    let terminals = [0u64, 3, 5, 6, 12];

    let (h, map) = mimicking_network(&g, &terminals, &MimickingConfig::default()).unwrap();
    let (hg, ids) = h.to_capacity_graph();

    for (s, t) in Bipartitions::new(&terminals).unwrap() {
        let original = set_min_cut(&g, &s, &t);

        let s_h: Vec<VertexId> = s.iter().map(|v| ids[&map[v]]).collect();
        let t_h: Vec<VertexId> = t.iter().map(|v| ids[&map[v]]).collect();
        let sparsified = set_min_cut(&hg, &s_h, &t_h);

        assert!(
            (original - sparsified).abs() < 1e-3,
            "bipartition ({s:?}, {t:?}): original {original}, sparsified {sparsified}"
        );
    }
}

#[test]
fn test_mimicking_two_terminals_is_a_single_edge() {
    let mut g = CapacityGraph::new();
    g.insert_edge(0, 1, 3.0).unwrap();
    g.insert_edge(1, 2, 1.0).unwrap();
    g.insert_edge(2, 3, 2.0).unwrap();

    let (h, _) = mimicking_network(&g, &[0, 3], &MimickingConfig::default()).unwrap();

    assert_eq!(h.num_nodes(), 2);
    assert_eq!(h.num_edges(), 1);
    let cap = h
        .capacity(NodeLabel::Terminal(0), NodeLabel::Terminal(3))
        .unwrap();
    let direct = set_min_cut(&g, &[0], &[3]);
    assert!((cap - direct).abs() < 1e-9);
    assert!((cap - 1.0).abs() < 1e-9);
}

#[test]
fn test_mimicking_is_no_larger_than_the_original() {
    let g = CapacityGraph::grid(5, 5, 1.0);
    let terminals = [0u64, 4, 20, 24];
    let (h, map) = mimicking_network(&g, &terminals, &MimickingConfig::default()).unwrap();

    assert!(h.num_nodes() <= g.num_vertices());
    assert!(h.num_edges() <= g.num_edges());
    assert_eq!(map.len(), g.num_vertices());
}

#[test]
fn test_zero_extension_covers_and_respects_terminals() {
    init_tracing();

    let g = CapacityGraph::grid(4, 4, 2.5);
    let terminals = [0u64, 3, 5, 6, 12];
    let mut rng = StdRng::seed_from_u64(21);

    let (assignment, h) =
        connected_zero_extension(&g, &terminals, &ZeroExtensionConfig::default(), &mut rng)
            .unwrap();

    let k: HashSet<VertexId> = terminals.iter().copied().collect();
    assert_eq!(assignment.len(), g.num_vertices());
    for (&v, &t) in &assignment {
        assert!(k.contains(&t), "vertex {v} assigned outside the terminals");
    }
    for &t in &terminals {
        assert_eq!(assignment[&t], t);
        assert!(h.has_node(NodeLabel::Terminal(t)));
    }

    // aggregated capacity never exceeds what the graph has to offer
    assert!(h.total_capacity() <= g.total_capacity() + 1e-9);
}

#[test]
fn test_zero_extension_is_reproducible() {
    let g = CapacityGraph::grid(6, 6, 1.0);
    let terminals = [0u64, 5, 30, 35];

    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        connected_zero_extension(&g, &terminals, &ZeroExtensionConfig::default(), &mut rng)
            .unwrap()
    };

    let (f1, h1) = run(4242);
    let (f2, h2) = run(4242);
    assert_eq!(f1, f2);
    assert_eq!(h1.edges(), h2.edges());

    // a different seed is allowed to differ, the contract is per seed
    let (_, h3) = run(4243);
    assert_eq!(h3.num_nodes(), h1.num_nodes());
}

#[test]
fn test_decomposition_parallel_equals_sequential() {
    let g = CapacityGraph::grid(5, 5, 1.0);
    let terminals = [0u64, 4, 12, 20, 24];

    let sequential = decomposition_sparsifier(
        &g,
        &terminals,
        &DecompositionConfig::default().with_samples(10),
        &mut StdRng::seed_from_u64(9),
    )
    .unwrap();
    let parallel = decomposition_sparsifier(
        &g,
        &terminals,
        &DecompositionConfig::default()
            .with_samples(10)
            .with_parallel(true),
        &mut StdRng::seed_from_u64(9),
    )
    .unwrap();

    assert_eq!(sequential.edges(), parallel.edges());
}

#[test]
fn test_decomposition_estimates_tighten_with_samples() {
    // the per-pair cut estimate is an average of independent samples, so
    // its seed-to-seed spread shrinks as the sample count grows; the mean
    // converges to the expected tree decomposition, not to the original
    // cut, so spread is the right quantity to characterize
    let g = CapacityGraph::grid(5, 5, 1.0);
    let terminals = [0u64, 4, 20, 24];

    let summed_spread = |samples: usize| -> f64 {
        let mut per_seed: Vec<Vec<f64>> = Vec::new();
        for seed in 0..8u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let h = decomposition_sparsifier(
                &g,
                &terminals,
                &DecompositionConfig::default().with_samples(samples),
                &mut rng,
            )
            .unwrap();
            let (hg, ids) = h.to_capacity_graph();

            let mut cuts = Vec::new();
            for i in 0..terminals.len() {
                for j in (i + 1)..terminals.len() {
                    let s = ids[&NodeLabel::Terminal(terminals[i])];
                    let t = ids[&NodeLabel::Terminal(terminals[j])];
                    cuts.push(set_min_cut(&hg, &[s], &[t]));
                }
            }
            per_seed.push(cuts);
        }

        (0..per_seed[0].len())
            .map(|pair| {
                let max = per_seed.iter().map(|c| c[pair]).fold(f64::MIN, f64::max);
                let min = per_seed.iter().map(|c| c[pair]).fold(f64::MAX, f64::min);
                max - min
            })
            .sum()
    };

    let few = summed_spread(2);
    let many = summed_spread(64);
    assert!(
        many < few,
        "spread over seeds should tighten with more samples: S=64 gave {many}, S=2 gave {few}"
    );
}

#[test]
fn test_decomposition_stays_on_terminals() {
    let g = CapacityGraph::grid(4, 4, 1.0);
    let terminals = [0u64, 3, 5, 6, 12];
    let mut rng = StdRng::seed_from_u64(3);

    let h = decomposition_sparsifier(&g, &terminals, &DecompositionConfig::default(), &mut rng)
        .unwrap();

    assert_eq!(h.num_nodes(), terminals.len());
    for e in h.edges() {
        assert!(matches!(e.a, NodeLabel::Terminal(_)));
        assert!(matches!(e.b, NodeLabel::Terminal(_)));
        assert!(e.capacity > 0.0);
    }
}

#[test]
fn test_constructions_compose() {
    // zero-extension output is a valid input graph for mimicking
    let g = CapacityGraph::grid(4, 4, 1.0);
    let terminals = [0u64, 3, 12, 15];
    let mut rng = StdRng::seed_from_u64(8);

    let (_, h) =
        connected_zero_extension(&g, &terminals, &ZeroExtensionConfig::default(), &mut rng)
            .unwrap();
    let (hg, ids) = h.to_capacity_graph();

    let h_terminals: Vec<VertexId> = terminals
        .iter()
        .map(|&t| ids[&NodeLabel::Terminal(t)])
        .collect();
    let (hh, _) = mimicking_network(&hg, &h_terminals, &MimickingConfig::default()).unwrap();
    assert!(hh.num_nodes() >= 2);
}
