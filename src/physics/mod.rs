// src/physics/mod.rs

pub mod connectivity;
pub mod eigen;
pub mod operations;
pub mod substitution;

// Re-export commonly used items
pub use connectivity::{bond_graph, neighbor_lists, t_site_graph, NeighborLists, TSiteGraph, Topology, BOND_CUTOFF};
pub use substitution::{substitute, Algorithm, AlgorithmConfig, MerwParams};
