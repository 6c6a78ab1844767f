//! Capacitated graph representation shared by all sparsifier constructions
//!
//! The graph is an explicit structured record rather than an attribute bag:
//! every edge carries exactly one positive `f64` capacity. Vertex and edge
//! enumeration follow insertion order, which the constructions rely on for
//! deterministic tie-breaking and for the index-based uniqueness
//! perturbation of the mimicking network.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::error::{Result, SparsifierError};

/// Unique vertex identifier
pub type VertexId = u64;

/// Edge capacity type
pub type Capacity = f64;

/// An undirected capacitated edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Position of this edge in insertion order
    pub index: usize,
    /// First endpoint
    pub source: VertexId,
    /// Second endpoint
    pub target: VertexId,
    /// Positive capacity
    pub capacity: Capacity,
}

impl Edge {
    /// Get the canonical (ordered) endpoints
    pub fn canonical_endpoints(&self) -> (VertexId, VertexId) {
        if self.source <= self.target {
            (self.source, self.target)
        } else {
            (self.target, self.source)
        }
    }

    /// Get the other endpoint of the edge given one endpoint
    pub fn other(&self, v: VertexId) -> Option<VertexId> {
        if self.source == v {
            Some(self.target)
        } else if self.target == v {
            Some(self.source)
        } else {
            None
        }
    }
}

/// Summary statistics about a graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphStats {
    /// Number of vertices
    pub num_vertices: usize,
    /// Number of edges
    pub num_edges: usize,
    /// Sum of all edge capacities
    pub total_capacity: f64,
    /// Minimum vertex degree
    pub min_degree: usize,
    /// Maximum vertex degree
    pub max_degree: usize,
    /// Average vertex degree
    pub avg_degree: f64,
}

/// Undirected capacitated graph with insertion-ordered enumeration
#[derive(Debug, Clone, Default)]
pub struct CapacityGraph {
    /// Vertices in insertion order
    vertices: Vec<VertexId>,
    /// Vertex id -> slot in `vertices` / `adjacency`
    vertex_slots: HashMap<VertexId, usize>,
    /// Per-vertex adjacency: (neighbor, edge index), insertion-ordered
    adjacency: Vec<Vec<(VertexId, usize)>>,
    /// Edges in insertion order
    edges: Vec<Edge>,
    /// Canonical endpoint pair -> edge index
    edge_slots: HashMap<(VertexId, VertexId), usize>,
}

impl CapacityGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with capacity hints
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            vertex_slots: HashMap::with_capacity(vertices),
            adjacency: Vec::with_capacity(vertices),
            edges: Vec::with_capacity(edges),
            edge_slots: HashMap::with_capacity(edges),
        }
    }

    /// Build a rows x cols grid with uniform capacities, row-major vertex ids
    pub fn grid(rows: usize, cols: usize, capacity: Capacity) -> Self {
        let mut g = Self::with_capacity(rows * cols, 2 * rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                let v = (r * cols + c) as VertexId;
                g.add_vertex(v);
                if c + 1 < cols {
                    let _ = g.insert_edge(v, v + 1, capacity);
                }
                if r + 1 < rows {
                    let _ = g.insert_edge(v, v + cols as VertexId, capacity);
                }
            }
        }
        g
    }

    fn canonical_key(u: VertexId, v: VertexId) -> (VertexId, VertexId) {
        if u <= v {
            (u, v)
        } else {
            (v, u)
        }
    }

    /// Add a vertex (returns true if new)
    pub fn add_vertex(&mut self, v: VertexId) -> bool {
        if self.vertex_slots.contains_key(&v) {
            false
        } else {
            self.vertex_slots.insert(v, self.vertices.len());
            self.vertices.push(v);
            self.adjacency.push(Vec::new());
            true
        }
    }

    /// Check if vertex exists
    pub fn has_vertex(&self, v: VertexId) -> bool {
        self.vertex_slots.contains_key(&v)
    }

    /// Insert an undirected edge (returns its insertion index)
    ///
    /// Self-loops and parallel edges are rejected. Capacity values are
    /// checked later by [`validate`](Self::validate) at construction entry.
    pub fn insert_edge(&mut self, u: VertexId, v: VertexId, capacity: Capacity) -> Result<usize> {
        if u == v {
            return Err(SparsifierError::InvalidEdge(u, v));
        }

        let key = Self::canonical_key(u, v);
        if self.edge_slots.contains_key(&key) {
            return Err(SparsifierError::EdgeExists(u, v));
        }

        self.add_vertex(u);
        self.add_vertex(v);

        let index = self.edges.len();
        self.edges.push(Edge {
            index,
            source: u,
            target: v,
            capacity,
        });
        self.edge_slots.insert(key, index);

        let u_slot = self.vertex_slots[&u];
        let v_slot = self.vertex_slots[&v];
        self.adjacency[u_slot].push((v, index));
        self.adjacency[v_slot].push((u, index));

        Ok(index)
    }

    /// Check if edge exists
    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.edge_slots.contains_key(&Self::canonical_key(u, v))
    }

    /// Get edge by endpoints
    pub fn edge(&self, u: VertexId, v: VertexId) -> Option<&Edge> {
        self.edge_slots
            .get(&Self::canonical_key(u, v))
            .map(|&i| &self.edges[i])
    }

    /// Get the capacity of an edge
    pub fn capacity(&self, u: VertexId, v: VertexId) -> Option<Capacity> {
        self.edge(u, v).map(|e| e.capacity)
    }

    /// Neighbors of a vertex as (neighbor, edge index), insertion-ordered
    pub fn neighbors(&self, v: VertexId) -> &[(VertexId, usize)] {
        match self.vertex_slots.get(&v) {
            Some(&slot) => &self.adjacency[slot],
            None => &[],
        }
    }

    /// Degree of a vertex
    pub fn degree(&self, v: VertexId) -> usize {
        self.neighbors(v).len()
    }

    /// Vertices in insertion order
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of vertices
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Slot of a vertex in insertion order
    pub fn vertex_slot(&self, v: VertexId) -> Option<usize> {
        self.vertex_slots.get(&v).copied()
    }

    /// Sum of all edge capacities
    pub fn total_capacity(&self) -> f64 {
        self.edges.iter().map(|e| e.capacity).sum()
    }

    /// Graph statistics
    pub fn stats(&self) -> GraphStats {
        let num_vertices = self.num_vertices();
        let num_edges = self.num_edges();

        if num_vertices == 0 {
            return GraphStats::default();
        }

        let mut min_degree = usize::MAX;
        let mut max_degree = 0usize;
        let mut total_degree = 0usize;
        for adj in &self.adjacency {
            min_degree = min_degree.min(adj.len());
            max_degree = max_degree.max(adj.len());
            total_degree += adj.len();
        }

        GraphStats {
            num_vertices,
            num_edges,
            total_capacity: self.total_capacity(),
            min_degree,
            max_degree,
            avg_degree: total_degree as f64 / num_vertices as f64,
        }
    }

    /// Reject malformed capacities before any construction begins
    pub fn validate(&self) -> Result<()> {
        for e in &self.edges {
            if !e.capacity.is_finite() || e.capacity <= 0.0 {
                return Err(SparsifierError::InvalidCapacity {
                    u: e.source,
                    v: e.target,
                    capacity: e.capacity,
                });
            }
        }
        Ok(())
    }

    /// Validate a terminal list: non-empty, no duplicates, all present
    pub fn validate_terminals(&self, terminals: &[VertexId]) -> Result<()> {
        if terminals.is_empty() {
            return Err(SparsifierError::EmptyTerminalSet);
        }
        let mut seen = HashMap::with_capacity(terminals.len());
        for &t in terminals {
            if !self.has_vertex(t) {
                return Err(SparsifierError::UnknownTerminal(t));
            }
            if seen.insert(t, ()).is_some() {
                return Err(SparsifierError::InvalidParameter(format!(
                    "duplicate terminal {t}"
                )));
            }
        }
        Ok(())
    }

    /// Derived view with a strictly increasing tiny offset per edge,
    /// making every minimum cut unique. The base graph is left untouched;
    /// the offset for edge i is `(i + 1) * epsilon / |E|` in insertion
    /// order. An edgeless graph is returned unchanged.
    pub fn perturbed(&self, epsilon: f64) -> Self {
        let mut g = self.clone();
        let m = g.edges.len();
        if m == 0 {
            return g;
        }
        let delta = epsilon / m as f64;
        for (i, e) in g.edges.iter_mut().enumerate() {
            e.capacity += (i as f64 + 1.0) * delta;
        }
        g
    }
}
