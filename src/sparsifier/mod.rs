//! Sparsifier output graph
//!
//! Every construction returns a [`Sparsifier`]: a small graph whose nodes
//! are terminals (or, for mimicking networks, contracted-component labels
//! preferring a terminal name) and whose edges carry capacities aggregated
//! from the original graph. Self-loops are dropped by construction and
//! capacities are non-negative.

use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Serialize};

use crate::graph::{CapacityGraph, VertexId};

/// Node label in a sparsifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeLabel {
    /// A terminal of the original graph
    Terminal(VertexId),
    /// A contracted component containing no terminal
    Component(usize),
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeLabel::Terminal(t) => write!(f, "t{t}"),
            NodeLabel::Component(c) => write!(f, "c{c}"),
        }
    }
}

/// An aggregated sparsifier edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparsifierEdge {
    /// First endpoint (canonical order)
    pub a: NodeLabel,
    /// Second endpoint (canonical order)
    pub b: NodeLabel,
    /// Aggregated capacity between the two endpoints
    pub capacity: f64,
    /// Optional diagnostic: original graph distance between the endpoints
    pub distance: Option<f64>,
}

/// A sparsifier graph on terminal/component labels
#[derive(Debug, Clone, Default)]
pub struct Sparsifier {
    nodes: Vec<NodeLabel>,
    node_slots: HashMap<NodeLabel, usize>,
    edges: Vec<SparsifierEdge>,
    edge_slots: HashMap<(NodeLabel, NodeLabel), usize>,
}

impl Sparsifier {
    /// Create an empty sparsifier
    pub fn new() -> Self {
        Self::default()
    }

    fn canonical_key(a: NodeLabel, b: NodeLabel) -> (NodeLabel, NodeLabel) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Add a node (returns true if new)
    pub fn add_node(&mut self, label: NodeLabel) -> bool {
        if self.node_slots.contains_key(&label) {
            false
        } else {
            self.node_slots.insert(label, self.nodes.len());
            self.nodes.push(label);
            true
        }
    }

    /// Check if a node exists
    pub fn has_node(&self, label: NodeLabel) -> bool {
        self.node_slots.contains_key(&label)
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> &[NodeLabel] {
        &self.nodes
    }

    /// Edges in creation order
    pub fn edges(&self) -> &[SparsifierEdge] {
        &self.edges
    }

    /// Number of nodes
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Add `capacity` to the aggregate between two labels, creating the
    /// edge (and missing endpoints) on first contribution. Contributions
    /// between identical labels are self-loops and are dropped.
    pub fn accumulate(&mut self, a: NodeLabel, b: NodeLabel, capacity: f64) {
        if a == b {
            return;
        }
        self.add_node(a);
        self.add_node(b);
        let (a, b) = Self::canonical_key(a, b);
        match self.edge_slots.get(&(a, b)) {
            Some(&i) => self.edges[i].capacity += capacity,
            None => {
                self.edge_slots.insert((a, b), self.edges.len());
                self.edges.push(SparsifierEdge {
                    a,
                    b,
                    capacity,
                    distance: None,
                });
            }
        }
    }

    /// Aggregated capacity between two labels
    pub fn capacity(&self, a: NodeLabel, b: NodeLabel) -> Option<f64> {
        let key = Self::canonical_key(a, b);
        self.edge_slots.get(&key).map(|&i| self.edges[i].capacity)
    }

    /// Attach a diagnostic distance to an existing edge (returns false if
    /// the edge does not exist)
    pub fn set_distance(&mut self, a: NodeLabel, b: NodeLabel, distance: f64) -> bool {
        let key = Self::canonical_key(a, b);
        match self.edge_slots.get(&key) {
            Some(&i) => {
                self.edges[i].distance = Some(distance);
                true
            }
            None => false,
        }
    }

    /// Diagnostic distance of an edge, if attached
    pub fn distance(&self, a: NodeLabel, b: NodeLabel) -> Option<f64> {
        let key = Self::canonical_key(a, b);
        self.edge_slots
            .get(&key)
            .and_then(|&i| self.edges[i].distance)
    }

    /// Sum of all aggregated capacities
    pub fn total_capacity(&self) -> f64 {
        self.edges.iter().map(|e| e.capacity).sum()
    }

    /// Re-index the sparsifier as a [`CapacityGraph`] for downstream
    /// min-cut queries. Labels are assigned dense ids in node insertion
    /// order; the mapping is returned alongside the graph.
    pub fn to_capacity_graph(&self) -> (CapacityGraph, HashMap<NodeLabel, VertexId>) {
        let mut ids = HashMap::with_capacity(self.nodes.len());
        let mut g = CapacityGraph::with_capacity(self.nodes.len(), self.edges.len());
        for (i, &label) in self.nodes.iter().enumerate() {
            ids.insert(label, i as VertexId);
            g.add_vertex(i as VertexId);
        }
        for e in &self.edges {
            let _ = g.insert_edge(ids[&e.a], ids[&e.b], e.capacity);
        }
        (g, ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_creates_and_sums() {
        let mut h = Sparsifier::new();
        h.accumulate(NodeLabel::Terminal(1), NodeLabel::Terminal(2), 1.5);
        h.accumulate(NodeLabel::Terminal(2), NodeLabel::Terminal(1), 2.5);

        assert_eq!(h.num_nodes(), 2);
        assert_eq!(h.num_edges(), 1);
        assert_eq!(
            h.capacity(NodeLabel::Terminal(1), NodeLabel::Terminal(2)),
            Some(4.0)
        );
    }

    #[test]
    fn test_self_loops_are_dropped() {
        let mut h = Sparsifier::new();
        h.accumulate(NodeLabel::Terminal(1), NodeLabel::Terminal(1), 3.0);
        assert_eq!(h.num_edges(), 0);
    }

    #[test]
    fn test_distance_diagnostic() {
        let mut h = Sparsifier::new();
        h.accumulate(NodeLabel::Terminal(1), NodeLabel::Terminal(2), 1.0);
        assert!(h.set_distance(NodeLabel::Terminal(2), NodeLabel::Terminal(1), 7.0));
        assert_eq!(
            h.distance(NodeLabel::Terminal(1), NodeLabel::Terminal(2)),
            Some(7.0)
        );
        assert!(!h.set_distance(NodeLabel::Terminal(1), NodeLabel::Component(0), 1.0));
    }

    #[test]
    fn test_node_label_display() {
        assert_eq!(NodeLabel::Terminal(4).to_string(), "t4");
        assert_eq!(NodeLabel::Component(2).to_string(), "c2");
    }

    #[test]
    fn test_to_capacity_graph() {
        let mut h = Sparsifier::new();
        h.add_node(NodeLabel::Terminal(10));
        h.accumulate(NodeLabel::Terminal(10), NodeLabel::Component(0), 2.0);
        h.accumulate(NodeLabel::Component(0), NodeLabel::Terminal(20), 3.0);

        let (g, ids) = h.to_capacity_graph();
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_edges(), 2);
        let a = ids[&NodeLabel::Terminal(10)];
        let c = ids[&NodeLabel::Component(0)];
        assert_eq!(g.capacity(a, c), Some(2.0));
    }

    #[test]
    fn test_serde_round_trip_edge() {
        let e = SparsifierEdge {
            a: NodeLabel::Terminal(1),
            b: NodeLabel::Component(3),
            capacity: 2.5,
            distance: Some(1.0),
        };
        let json = serde_json::to_string(&e).unwrap();
        let back: SparsifierEdge = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }
}
