//! Minimum s-t cuts via max-flow on a residual network
//!
//! Edmonds-Karp (BFS augmenting paths) over an undirected flow network.
//! Each undirected edge becomes a pair of arcs with the full capacity on
//! both sides; arc `i ^ 1` is the residual partner of arc `i`. Auxiliary
//! vertices (supersource/supersink reductions) are added with `add_edge`.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{Result, SparsifierError};
use crate::graph::{CapacityGraph, VertexId};

/// Residual capacities below this are treated as saturated.
const RESIDUAL_EPS: f64 = 1e-12;

/// Undirected flow network with residual bookkeeping
#[derive(Debug, Clone, Default)]
pub struct FlowNetwork {
    slots: HashMap<VertexId, usize>,
    ids: Vec<VertexId>,
    adj: Vec<Vec<usize>>,
    to: Vec<usize>,
    cap: Vec<f64>,
}

impl FlowNetwork {
    /// Create an empty network
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a network mirroring a capacitated graph
    pub fn from_graph(graph: &CapacityGraph) -> Self {
        let mut net = Self::default();
        for &v in graph.vertices() {
            net.slot(v);
        }
        for e in graph.edges() {
            net.add_edge(e.source, e.target, e.capacity);
        }
        net
    }

    fn slot(&mut self, v: VertexId) -> usize {
        if let Some(&s) = self.slots.get(&v) {
            return s;
        }
        let s = self.ids.len();
        self.slots.insert(v, s);
        self.ids.push(v);
        self.adj.push(Vec::new());
        s
    }

    /// Add an undirected edge; new vertices are created on demand.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, capacity: f64) {
        let (a, b) = (self.slot(u), self.slot(v));
        let arc = self.to.len();
        self.to.push(b);
        self.cap.push(capacity);
        self.to.push(a);
        self.cap.push(capacity);
        self.adj[a].push(arc);
        self.adj[b].push(arc + 1);
    }

    /// Minimum cut separating `s` from `t`.
    ///
    /// Returns the cut value and the set of original vertex ids on the
    /// source side of the cut (vertices reachable from `s` in the final
    /// residual network). The network is consumed as scratch space:
    /// residual capacities are mutated.
    pub fn min_cut(&mut self, s: VertexId, t: VertexId) -> Result<(f64, HashSet<VertexId>)> {
        if s == t {
            return Err(SparsifierError::InvalidParameter(
                "min cut endpoints must differ".into(),
            ));
        }
        let s_slot = *self
            .slots
            .get(&s)
            .ok_or_else(|| SparsifierError::InvalidParameter(format!("unknown vertex {s}")))?;
        let t_slot = *self
            .slots
            .get(&t)
            .ok_or_else(|| SparsifierError::InvalidParameter(format!("unknown vertex {t}")))?;

        let n = self.ids.len();
        let mut total = 0.0;
        let mut visited = vec![false; n];

        loop {
            // BFS for a shortest augmenting path
            let mut parent_arc: Vec<Option<usize>> = vec![None; n];
            visited.iter_mut().for_each(|v| *v = false);
            visited[s_slot] = true;
            let mut queue = VecDeque::new();
            queue.push_back(s_slot);

            while let Some(u) = queue.pop_front() {
                for &arc in &self.adj[u] {
                    let w = self.to[arc];
                    if !visited[w] && self.cap[arc] > RESIDUAL_EPS {
                        visited[w] = true;
                        parent_arc[w] = Some(arc);
                        queue.push_back(w);
                    }
                }
            }

            if !visited[t_slot] {
                break;
            }

            // bottleneck along the path
            let mut bottleneck = f64::INFINITY;
            let mut v = t_slot;
            while v != s_slot {
                let arc = parent_arc[v].expect("augmenting path parent missing");
                bottleneck = bottleneck.min(self.cap[arc]);
                v = self.to[arc ^ 1];
            }

            // augment
            let mut v = t_slot;
            while v != s_slot {
                let arc = parent_arc[v].expect("augmenting path parent missing");
                self.cap[arc] -= bottleneck;
                self.cap[arc ^ 1] += bottleneck;
                v = self.to[arc ^ 1];
            }
            total += bottleneck;
        }

        let side: HashSet<VertexId> = self
            .ids
            .iter()
            .zip(visited.iter())
            .filter(|&(_, &r)| r)
            .map(|(&id, _)| id)
            .collect();

        Ok((total, side))
    }
}
