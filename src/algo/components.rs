//! Connected components of the graph, of induced vertex subsets, and of
//! edge-filtered subgraphs
//!
//! Components are reported in order of their first vertex in graph
//! insertion order; vertices within a component come out in BFS order.

use std::collections::{HashSet, VecDeque};

use crate::graph::{CapacityGraph, Edge, VertexId};

/// Connected components of the whole graph.
pub fn connected_components(graph: &CapacityGraph) -> Vec<Vec<VertexId>> {
    filtered_components(graph, |_| true)
}

/// Connected components of the subgraph keeping only edges accepted by
/// `keep`. Every graph vertex appears in exactly one component; vertices
/// with no kept incident edge are singletons.
pub fn filtered_components<P>(graph: &CapacityGraph, keep: P) -> Vec<Vec<VertexId>>
where
    P: Fn(&Edge) -> bool,
{
    let mut visited: HashSet<VertexId> = HashSet::with_capacity(graph.num_vertices());
    let mut components = Vec::new();

    for &start in graph.vertices() {
        if visited.contains(&start) {
            continue;
        }
        let mut component = Vec::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(u) = queue.pop_front() {
            component.push(u);
            for &(v, edge_idx) in graph.neighbors(u) {
                if visited.contains(&v) || !keep(&graph.edges()[edge_idx]) {
                    continue;
                }
                visited.insert(v);
                queue.push_back(v);
            }
        }
        components.push(component);
    }

    components
}

/// Connected components of the subgraph induced on `subset`.
pub fn induced_components(
    graph: &CapacityGraph,
    subset: &HashSet<VertexId>,
) -> Vec<Vec<VertexId>> {
    let mut visited: HashSet<VertexId> = HashSet::with_capacity(subset.len());
    let mut components = Vec::new();

    for &start in graph.vertices() {
        if !subset.contains(&start) || visited.contains(&start) {
            continue;
        }
        let mut component = Vec::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(u) = queue.pop_front() {
            component.push(u);
            for &(v, _) in graph.neighbors(u) {
                if !subset.contains(&v) || visited.contains(&v) {
                    continue;
                }
                visited.insert(v);
                queue.push_back(v);
            }
        }
        components.push(component);
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_components() {
        let mut g = CapacityGraph::new();
        g.insert_edge(1, 2, 1.0).unwrap();
        g.insert_edge(2, 3, 1.0).unwrap();
        g.insert_edge(4, 5, 1.0).unwrap();
        g.add_vertex(9);

        let comps = connected_components(&g);
        assert_eq!(comps.len(), 3);
        assert_eq!(comps[0], vec![1, 2, 3]);
        assert_eq!(comps[1], vec![4, 5]);
        assert_eq!(comps[2], vec![9]);
    }

    #[test]
    fn test_filtered_components_cut_edge() {
        let mut g = CapacityGraph::new();
        g.insert_edge(0, 1, 1.0).unwrap(); // idx 0
        g.insert_edge(1, 2, 1.0).unwrap(); // idx 1
        g.insert_edge(2, 3, 1.0).unwrap(); // idx 2

        let comps = filtered_components(&g, |e| e.index != 1);
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[0], vec![0, 1]);
        assert_eq!(comps[1], vec![2, 3]);
    }

    #[test]
    fn test_filtered_components_drop_all_edges() {
        let g = CapacityGraph::grid(2, 2, 1.0);
        let comps = filtered_components(&g, |_| false);
        assert_eq!(comps.len(), 4);
        assert!(comps.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn test_induced_components() {
        let g = CapacityGraph::grid(3, 3, 1.0);
        // a corner pair and an opposite corner singleton
        let subset: HashSet<VertexId> = [0, 1, 8].into_iter().collect();
        let comps = induced_components(&g, &subset);
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[0], vec![0, 1]);
        assert_eq!(comps[1], vec![8]);
    }

    #[test]
    fn test_induced_components_empty_subset() {
        let g = CapacityGraph::grid(2, 2, 1.0);
        let comps = induced_components(&g, &HashSet::new());
        assert!(comps.is_empty());
    }
}
