//! Minimum spanning forest by caller-supplied edge lengths
//!
//! Kruskal over insertion-ordered edges with a union-find; ties between
//! equal lengths fall back to edge index, so results are deterministic.

use std::collections::HashSet;

use crate::graph::CapacityGraph;

/// Union-find over dense vertex slots with path halving and union by rank.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Returns false if the two elements were already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

/// Edge indices of a minimum-weight spanning forest under `lengths`.
///
/// `lengths[i]` is the length of the edge with insertion index `i`; the
/// slice must cover every edge. Disconnected graphs yield one tree per
/// component.
pub fn minimum_spanning_forest(graph: &CapacityGraph, lengths: &[f64]) -> HashSet<usize> {
    debug_assert_eq!(lengths.len(), graph.num_edges());

    let mut order: Vec<usize> = (0..graph.num_edges()).collect();
    order.sort_by(|&a, &b| lengths[a].total_cmp(&lengths[b]).then_with(|| a.cmp(&b)));

    let mut uf = UnionFind::new(graph.num_vertices());
    let mut chosen = HashSet::with_capacity(graph.num_vertices().saturating_sub(1));

    for idx in order {
        let e = &graph.edges()[idx];
        let (a, b) = match (graph.vertex_slot(e.source), graph.vertex_slot(e.target)) {
            (Some(a), Some(b)) => (a, b),
            _ => continue,
        };
        if uf.union(a, b) {
            chosen.insert(idx);
        }
    }

    chosen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_find() {
        let mut uf = UnionFind::new(4);
        assert!(uf.union(0, 1));
        assert!(!uf.union(1, 0));
        assert!(uf.union(2, 3));
        assert_ne!(uf.find(0), uf.find(2));
        assert!(uf.union(0, 3));
        assert_eq!(uf.find(1), uf.find(2));
    }

    #[test]
    fn test_forest_on_triangle_drops_longest() {
        let mut g = CapacityGraph::new();
        g.insert_edge(0, 1, 1.0).unwrap(); // idx 0
        g.insert_edge(1, 2, 1.0).unwrap(); // idx 1
        g.insert_edge(2, 0, 1.0).unwrap(); // idx 2

        let forest = minimum_spanning_forest(&g, &[1.0, 2.0, 3.0]);
        assert_eq!(forest.len(), 2);
        assert!(forest.contains(&0));
        assert!(forest.contains(&1));
    }

    #[test]
    fn test_forest_ties_break_by_index() {
        let mut g = CapacityGraph::new();
        g.insert_edge(0, 1, 1.0).unwrap();
        g.insert_edge(1, 2, 1.0).unwrap();
        g.insert_edge(2, 0, 1.0).unwrap();

        let forest = minimum_spanning_forest(&g, &[5.0, 5.0, 5.0]);
        assert_eq!(forest.len(), 2);
        assert!(forest.contains(&0));
        assert!(forest.contains(&1));
        assert!(!forest.contains(&2));
    }

    #[test]
    fn test_forest_spans_each_component() {
        let mut g = CapacityGraph::new();
        g.insert_edge(0, 1, 1.0).unwrap();
        g.insert_edge(1, 2, 1.0).unwrap();
        g.insert_edge(10, 11, 1.0).unwrap();

        let forest = minimum_spanning_forest(&g, &[1.0, 1.0, 1.0]);
        assert_eq!(forest.len(), 3);
    }
}
