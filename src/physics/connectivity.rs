// src/physics/connectivity.rs

use crate::model::Framework;
use crate::utils::geometry::periodic_distance;
use crate::utils::matrix::AdjacencyMatrix;
use log::{debug, warn};
use rayon::prelude::*;

/// Two atoms closer than this are bonded (Angstroms). Fixed for Si/Al-O frameworks.
pub const BOND_CUTOFF: f64 = 2.56;

/// Per-site adjacency lists, ascending
pub type NeighborLists = Vec<Vec<usize>>;

/// The T-site graph together with its neighbor lists.
///
/// This is the canonical, read-only graph the substitution algorithms start
/// from. Algorithms that consume sites clone `matrix` into a private working
/// copy.
#[derive(Clone, Debug)]
pub struct TSiteGraph {
    pub matrix: AdjacencyMatrix,
    pub neighbors: NeighborLists,
}

impl TSiteGraph {
    pub fn new(matrix: AdjacencyMatrix) -> Self {
        let neighbors = neighbor_lists(&matrix);
        Self { matrix, neighbors }
    }

    /// Number of T-sites
    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }
}

/// Full connectivity of one framework: all-atom bonds and the derived T-site graph
#[derive(Clone, Debug)]
pub struct Topology {
    pub bonds: AdjacencyMatrix,
    pub t_graph: TSiteGraph,
}

impl Topology {
    /// Builds the bond graph and then the T-site graph for `framework`
    pub fn build(framework: &Framework) -> Self {
        if !framework.cell().is_orthogonal() {
            warn!(
                "Cell angles {:?} are not all 90 degrees; bond distances use the orthogonal per-axis approximation",
                framework.cell().angles
            );
        }

        let bonds = bond_graph(framework);
        let t_matrix = t_site_graph(framework, &bonds);
        debug!(
            "Connectivity: {} bonds over {} atoms, {} T-T links over {} T-sites",
            bonds.edge_count(),
            bonds.len(),
            t_matrix.edge_count(),
            t_matrix.len()
        );

        Self {
            bonds,
            t_graph: TSiteGraph::new(t_matrix),
        }
    }
}

/// Bonding graph over all atoms (`M_all`).
///
/// `i` and `j` are bonded iff their periodic distance is below [`BOND_CUTOFF`].
/// Rows are computed in parallel; the result does not depend on scheduling.
pub fn bond_graph(framework: &Framework) -> AdjacencyMatrix {
    let atoms = framework.atoms();
    let lengths = framework.cell().lengths;
    let n = atoms.len();

    let partners: Vec<Vec<usize>> = (0..n)
        .into_par_iter()
        .map(|i| {
            ((i + 1)..n)
                .filter(|&j| periodic_distance(atoms[i].position, atoms[j].position, lengths) < BOND_CUTOFF)
                .collect()
        })
        .collect();

    let mut bonds = AdjacencyMatrix::new(n);
    for (i, row) in partners.iter().enumerate() {
        for &j in row {
            bonds.connect(i, j);
        }
    }
    bonds
}

/// T-site adjacency (`M_T`) derived from the bond graph.
///
/// T-sites `i` and `j` are linked iff some atom is bonded to both of them.
/// Instead of scanning every atom for every T pair, each atom's bond list is
/// walked once and every pair of T-sites in it gets linked.
pub fn t_site_graph(framework: &Framework, bonds: &AdjacencyMatrix) -> AdjacencyMatrix {
    let t_ids = framework.t_ids();

    // Global atom index -> T-site index
    let mut t_index: Vec<Option<usize>> = vec![None; framework.n_atoms()];
    for (t, &atom) in t_ids.iter().enumerate() {
        t_index[atom] = Some(t);
    }

    let mut graph = AdjacencyMatrix::new(t_ids.len());
    for bridge in 0..bonds.len() {
        let bonded_t: Vec<usize> = bonds
            .neighbors(bridge)
            .into_iter()
            .filter_map(|atom| t_index[atom])
            .collect();

        for (k, &ti) in bonded_t.iter().enumerate() {
            for &tj in &bonded_t[k + 1..] {
                graph.connect(ti, tj);
            }
        }
    }
    graph
}

/// Neighbor list of every T-site, in ascending index order
pub fn neighbor_lists(graph: &AdjacencyMatrix) -> NeighborLists {
    (0..graph.len()).map(|i| graph.neighbors(i)).collect()
}
