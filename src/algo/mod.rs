//! Graph-algorithm primitives consumed by the sparsifier constructions
//!
//! Shortest paths, spanning forests, minimum cuts and connected components
//! live here, behind a small deterministic API. The builders in
//! [`partition`](crate::partition), [`zero_extension`](crate::zero_extension),
//! [`decomposition`](crate::decomposition) and [`mimicking`](crate::mimicking)
//! never walk the graph themselves beyond neighbor lookups; everything that
//! looks like an algorithm is routed through this module.

pub mod components;
pub mod maxflow;
pub mod mst;
pub mod shortest_path;

pub use components::{connected_components, filtered_components, induced_components};
pub use maxflow::FlowNetwork;
pub use mst::minimum_spanning_forest;
pub use shortest_path::{dijkstra, nearest_source, NearestSource};
