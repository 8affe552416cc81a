// src/physics/substitution/chains.rs

use super::Algorithm;
use crate::error::{Result, ZeoranError};
use crate::physics::connectivity::TSiteGraph;
use crate::utils::matrix::AdjacencyMatrix;
use log::debug;
use rand::Rng;

/// Builds disjoint Al chains, one per entry of `chains`, on a private working
/// copy of the T-site graph.
///
/// # Algorithm
/// For each requested length:
/// 1. Draw a root from the pool of free sites; drop it and its neighbors from the pool
/// 2. Extend link by link to a uniformly chosen neighbor of the current end in the
///    working graph; drop the new site and its neighbors from the pool
/// 3. Every neighbor of the end being left (except the successor) is isolated in the
///    working graph, as is every neighbor of the final site and the final site itself
///
/// The result is the concatenation of the chains, each in path order. There is
/// no backtracking: a chain end with no free neighbor fails the structure.
pub fn generate_chains<R: Rng + ?Sized>(graph: &TSiteGraph, chains: &[usize], rng: &mut R) -> Result<Vec<usize>> {
    let t_atoms = graph.len();
    if let Some(i) = chains.iter().position(|&len| len == 0) {
        return Err(ZeoranError::config(
            format!("chains[{}]", i),
            "chain lengths must be at least 1",
        ));
    }
    let total: usize = chains.iter().sum();
    if total > t_atoms {
        return Err(ZeoranError::config(
            "chains",
            format!("chains need {} sites but only {} T-sites exist", total, t_atoms),
        ));
    }

    let canonical = &graph.neighbors;
    let mut working = graph.matrix.clone();
    let mut pool: Vec<usize> = (0..t_atoms).collect();
    let mut als = Vec::with_capacity(total);

    for (chain_index, &length) in chains.iter().enumerate() {
        if pool.is_empty() {
            return Err(ZeoranError::infeasible(
                Algorithm::Chains,
                format!("no root sites left for chain {}", chain_index),
            ));
        }

        let root = pool.remove(rng.gen_range(0..pool.len()));
        remove_from_pool(&mut pool, &canonical[root]);
        als.push(root);
        debug!("Chain {}: root T-site {}", chain_index, root);

        let mut last = root;
        for link in 1..length {
            let next = find_neighbor_random(&working, last, rng).ok_or_else(|| {
                ZeoranError::infeasible(
                    Algorithm::Chains,
                    format!(
                        "chain {} stopped at {} of {} sites: T-site {} has no free neighbors",
                        chain_index, link, length, last
                    ),
                )
            })?;

            remove_from_pool(&mut pool, &[next]);
            remove_from_pool(&mut pool, &canonical[next]);

            for &other in &canonical[last] {
                if other != next {
                    working.isolate(other);
                }
            }
            working.remove_edge(last, next);

            als.push(next);
            last = next;
        }

        // Close the chain off from everything that follows
        for &other in &canonical[last] {
            working.isolate(other);
        }
        working.isolate(last);
    }

    Ok(als)
}

/// Uniformly random neighbor of `site` in the working graph
fn find_neighbor_random<R: Rng + ?Sized>(working: &AdjacencyMatrix, site: usize, rng: &mut R) -> Option<usize> {
    let candidates = working.neighbors(site);
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.gen_range(0..candidates.len())])
}

fn remove_from_pool(pool: &mut Vec<usize>, sites: &[usize]) {
    pool.retain(|t| !sites.contains(t));
}
