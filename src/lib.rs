//! # SparseCut
//!
//! Vertex sparsifiers for capacitated undirected graphs.
//!
//! Given a graph G and a terminal subset K, this crate builds small graphs H
//! on (roughly) K that preserve the cut or flow structure of G between the
//! terminals, exactly or approximately depending on the construction.
//!
//! ## Constructions
//!
//! - **Randomized ball partition**: one CKR-style padded-decomposition
//!   sample at a given scale
//! - **Connected zero-extension**: maps every vertex to a terminal across
//!   geometrically increasing scales and aggregates crossing capacities
//! - **Decomposition-tree sparsifier**: averages nearest-terminal
//!   assignments over independent random spanning-tree samples
//! - **Mimicking network**: exact terminal-cut preservation via exhaustive
//!   bipartition min cuts and component contraction
//!
//! ## Quick Start
//!
//! ```rust
//! use sparsecut::{connected_zero_extension, CapacityGraph, ZeroExtensionConfig};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut g = CapacityGraph::new();
//! g.insert_edge(0, 1, 2.0)?;
//! g.insert_edge(1, 2, 3.0)?;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let (assignment, h) =
//!     connected_zero_extension(&g, &[0, 2], &ZeroExtensionConfig::default(), &mut rng)?;
//!
//! // every vertex is mapped to a terminal; H lives on the terminals
//! assert_eq!(assignment.len(), 3);
//! assert_eq!(h.num_nodes(), 2);
//! # Ok::<(), sparsecut::SparsifierError>(())
//! ```
//!
//! ## Exact mimicking networks
//!
//! ```rust
//! use sparsecut::{mimicking_network, CapacityGraph, MimickingConfig, NodeLabel};
//!
//! let mut g = CapacityGraph::new();
//! g.insert_edge(0, 1, 3.0)?;
//! g.insert_edge(1, 2, 1.0)?;
//! g.insert_edge(2, 3, 2.0)?;
//!
//! let (h, _map) = mimicking_network(&g, &[0, 3], &MimickingConfig::default())?;
//!
//! // two terminals: H collapses to a single edge carrying the min cut
//! assert_eq!(h.num_nodes(), 2);
//! let cut = h.capacity(NodeLabel::Terminal(0), NodeLabel::Terminal(3)).unwrap();
//! assert!((cut - 1.0).abs() < 1e-9);
//! # Ok::<(), sparsecut::SparsifierError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`graph`]: capacitated undirected graph with insertion-ordered,
//!   deterministic enumeration
//! - [`sparsifier`]: the output graph shared by all constructions
//! - [`algo`]: shortest paths, spanning forests, min cuts, components
//! - [`partition`]: randomized ball partitioner
//! - [`zero_extension`]: connected zero-extension builder
//! - [`decomposition`]: decomposition-tree sparsifier
//! - [`mimicking`]: exact mimicking-network builder
//!
//! ## Determinism
//!
//! Every randomized construction takes a caller-seeded [`rand::rngs::StdRng`]
//! and produces bit-identical output for identical inputs and seeds,
//! including under the `parallel` config options.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod algo;
pub mod decomposition;
pub mod error;
pub mod graph;
pub mod mimicking;
pub mod partition;
pub mod sparsifier;
pub mod zero_extension;

pub use decomposition::{decomposition_sparsifier, DecompositionConfig};
pub use error::{Result, SparsifierError};
pub use graph::{CapacityGraph, Capacity, Edge, GraphStats, VertexId};
pub use mimicking::{mimicking_network, Bipartitions, MimickingConfig};
pub use partition::sample_partition;
pub use sparsifier::{NodeLabel, Sparsifier, SparsifierEdge};
pub use zero_extension::{connected_zero_extension, Assignment, ZeroExtensionConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Prelude module for convenient imports
///
/// ```rust
/// use sparsecut::prelude::*;
///
/// let g = CapacityGraph::grid(3, 3, 1.0);
/// assert_eq!(g.num_vertices(), 9);
/// ```
pub mod prelude {
    //! Prelude module with commonly used types

    pub use crate::{
        connected_zero_extension, decomposition_sparsifier, mimicking_network, sample_partition,
        Assignment, Bipartitions, Capacity, CapacityGraph, DecompositionConfig, Edge, GraphStats,
        MimickingConfig, NodeLabel, Result, Sparsifier, SparsifierEdge, SparsifierError, VertexId,
        ZeroExtensionConfig,
    };
}
