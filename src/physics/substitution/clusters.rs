// src/physics/substitution/clusters.rs

use super::Algorithm;
use crate::error::{Result, ZeoranError};
use crate::physics::connectivity::NeighborLists;
use log::debug;
use rand::Rng;

/// Grows one connected cluster of `n_subst` T-sites from a random seed site.
///
/// # Algorithm
/// Walks the accepted sites in acceptance order ("anchors"). For each anchor,
/// its neighbor list is scanned and every neighbor not yet accepted is appended.
/// The frontier therefore expands breadth-first from the seed.
///
/// # Returns
/// - `Err(Infeasible)` if every anchor is exhausted before reaching `n_subst`,
///   i.e. the seed's connected component is too small
pub fn clusters_substitutions<R: Rng + ?Sized>(
    neighbors: &NeighborLists,
    n_subst: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    let t_atoms = neighbors.len();
    if n_subst > t_atoms {
        return Err(ZeoranError::config(
            "substitutions",
            format!(
                "{}: requested {} substitutions but only {} T-sites exist",
                Algorithm::Clusters,
                n_subst,
                t_atoms
            ),
        ));
    }
    if n_subst == 0 {
        return Ok(Vec::new());
    }

    let seed = rng.gen_range(0..t_atoms);
    debug!("Cluster seed: T-site {}", seed);

    let mut als = Vec::with_capacity(n_subst);
    let mut accepted = vec![false; t_atoms];
    als.push(seed);
    accepted[seed] = true;

    let mut anchor = 0;
    let mut offset = 0;
    while als.len() < n_subst {
        let Some(&current) = als.get(anchor) else {
            return Err(ZeoranError::infeasible(
                Algorithm::Clusters,
                format!(
                    "connected region around T-site {} holds only {} sites, {} requested",
                    seed,
                    als.len(),
                    n_subst
                ),
            ));
        };

        let candidates = &neighbors[current];
        if offset >= candidates.len() {
            anchor += 1;
            offset = 0;
            continue;
        }

        let candidate = candidates[offset];
        if !accepted[candidate] {
            accepted[candidate] = true;
            als.push(candidate);
        }
        offset += 1;
    }

    Ok(als)
}
