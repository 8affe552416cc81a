// src/physics/substitution/merw.rs

use super::Algorithm;
use crate::error::{Result, ZeoranError};
use crate::physics::connectivity::{neighbor_lists, NeighborLists};
use crate::physics::eigen::{dominant_eigenpair, EigenPair};
use crate::utils::matrix::AdjacencyMatrix;
use log::debug;
use nalgebra::DMatrix;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Scale of the uniform noise added to the adjacency matrix before diagonalising
pub const PERTURBATION: f64 = 0.01;

/// Fresh perturbations tried per selection step before giving up
pub const MAX_EIGEN_ATTEMPTS: usize = 5;

/// Random draws looking for a start site that still has a neighbor
pub const MAX_START_ATTEMPTS: usize = 20;

/// Walk lengths for the maximal-entropy random walk
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerwParams {
    /// Steps discarded before visits are counted
    pub eq_steps: usize,
    /// Visits a site needs to become the next selection
    pub visits: usize,
}

impl Default for MerwParams {
    fn default() -> Self {
        Self {
            eq_steps: 100,
            visits: 20,
        }
    }
}

/// Selects `n_subst` T-sites with a maximal-entropy random walk.
///
/// # Algorithm
/// When more than half the sites are requested, the complement is walked for
/// instead and inverted at the end (returned in ascending order).
///
/// The first site is drawn uniformly. For every further site:
/// 1. Perturb the working adjacency matrix, take its dominant eigenpair
///    `(lambda, v)` and form `S[i][j] = M[i][j] / lambda * v[j] / v[i]`
/// 2. Draw a start site that still has a neighbor
/// 3. Walk `eq_steps` steps (discarded), then keep walking and counting visits;
///    the first site reaching `visits` visits is selected
/// 4. Isolate the selected site in the working graph
///
/// The caller's graph is never modified.
pub fn merw_substitutions<R: Rng + ?Sized>(
    graph: &AdjacencyMatrix,
    n_subst: usize,
    params: &MerwParams,
    rng: &mut R,
) -> Result<Vec<usize>> {
    let t_atoms = graph.len();
    if n_subst > t_atoms {
        return Err(ZeoranError::config(
            "substitutions",
            format!(
                "{}: requested {} substitutions but only {} T-sites exist",
                Algorithm::Merw,
                n_subst,
                t_atoms
            ),
        ));
    }
    if params.visits == 0 {
        return Err(ZeoranError::config("visits", "MERW needs at least one visit per selection"));
    }

    let permute = n_subst > t_atoms / 2;
    let target = if permute { t_atoms - n_subst } else { n_subst };
    if permute {
        debug!(
            "MERW: {} of {} sites requested, walking for the {} complementary sites",
            n_subst, t_atoms, target
        );
    }

    let selected = walk_selections(graph, target, params, rng)?;

    if permute {
        let mut taken = vec![false; t_atoms];
        for &t in &selected {
            taken[t] = true;
        }
        Ok((0..t_atoms).filter(|&t| !taken[t]).collect())
    } else {
        Ok(selected)
    }
}

fn walk_selections<R: Rng + ?Sized>(
    graph: &AdjacencyMatrix,
    target: usize,
    params: &MerwParams,
    rng: &mut R,
) -> Result<Vec<usize>> {
    let mut als = Vec::with_capacity(target);
    if target == 0 {
        return Ok(als);
    }

    let mut working = graph.clone();
    let mut pool: Vec<usize> = (0..graph.len()).collect();

    // First substitution, no walk
    let first = pool.remove(rng.gen_range(0..pool.len()));
    working.isolate(first);
    als.push(first);

    while als.len() < target {
        if pool.is_empty() {
            return Err(ZeoranError::infeasible(
                Algorithm::Merw,
                format!("no candidate sites left after {} of {} selections", als.len(), target),
            ));
        }

        let transition = compute_transition(&working, rng)?;
        let neighbors = neighbor_lists(&working);

        let pool_index = match draw_start(&pool, &neighbors, rng) {
            Start::Walk(start) => {
                let next = merw(&transition, &neighbors, start, params, rng)?;
                pool.iter().position(|&t| t == next).ok_or_else(|| {
                    ZeoranError::infeasible(
                        Algorithm::Merw,
                        format!("walk settled on T-site {} which is no longer a candidate", next),
                    )
                })?
            }
            Start::Isolated(index) => {
                debug!("MERW: no connected start available, taking isolated T-site {}", pool[index]);
                index
            }
        };

        let next = pool.remove(pool_index);
        working.isolate(next);
        als.push(next);
        debug!("MERW: selection {}/{} -> T-site {}", als.len(), target, next);
    }

    Ok(als)
}

#[derive(Debug, PartialEq, Eq)]
enum Start {
    /// Pool site with at least one neighbor; the walk begins here
    Walk(usize),
    /// Pool position of an isolated site to select directly
    Isolated(usize),
}

/// Draws the walk's starting site from the pool.
///
/// Up to [`MAX_START_ATTEMPTS`] uniform draws look for a site that still has a
/// neighbor. If all of them land on isolated sites, the connected candidates
/// are drawn from directly; when there are none, the last isolated draw is
/// returned for direct selection.
fn draw_start<R: Rng + ?Sized>(pool: &[usize], neighbors: &NeighborLists, rng: &mut R) -> Start {
    let mut last = 0;
    for _ in 0..MAX_START_ATTEMPTS {
        last = rng.gen_range(0..pool.len());
        if !neighbors[pool[last]].is_empty() {
            return Start::Walk(pool[last]);
        }
    }

    let connected: Vec<usize> = pool
        .iter()
        .copied()
        .filter(|&t| !neighbors[t].is_empty())
        .collect();
    if connected.is_empty() {
        Start::Isolated(last)
    } else {
        Start::Walk(connected[rng.gen_range(0..connected.len())])
    }
}

/// Builds the MERW transition matrix of the working graph.
///
/// A fresh perturbation is drawn on every attempt; an eigen-decomposition that
/// fails, or yields a non-positive eigenvector, is retried up to
/// [`MAX_EIGEN_ATTEMPTS`] times.
pub fn compute_transition<R: Rng + ?Sized>(working: &AdjacencyMatrix, rng: &mut R) -> Result<DMatrix<f64>> {
    transition_with(working, rng, dominant_eigenpair)
}

/// [`compute_transition`] with the eigen-solver supplied by the caller
pub(crate) fn transition_with<R, F>(working: &AdjacencyMatrix, rng: &mut R, mut solve: F) -> Result<DMatrix<f64>>
where
    R: Rng + ?Sized,
    F: FnMut(&DMatrix<f64>) -> Result<EigenPair>,
{
    let n = working.len();
    let mut last_error = ZeoranError::numerical("no attempt made");

    for attempt in 1..=MAX_EIGEN_ATTEMPTS {
        let perturbed = perturb(working, rng);

        let pair = match solve(&perturbed) {
            Ok(pair) => pair,
            Err(e) => {
                debug!("MERW: eigen attempt {}/{} failed: {}", attempt, MAX_EIGEN_ATTEMPTS, e);
                last_error = e;
                continue;
            }
        };

        let v = &pair.vector;
        if pair.value <= 0.0 || v.iter().any(|&x| !x.is_finite() || x <= 0.0) {
            debug!("MERW: eigen attempt {}/{} gave a non-positive Perron pair", attempt, MAX_EIGEN_ATTEMPTS);
            last_error = ZeoranError::numerical("dominant eigenpair is not positive");
            continue;
        }

        let mut s = DMatrix::<f64>::zeros(n, n);
        for i in 0..n {
            for j in working.neighbors(i) {
                s[(i, j)] = (1.0 / pair.value) * (v[j] / v[i]);
            }
        }
        return Ok(s);
    }

    Err(last_error)
}

// A[i][j] = M[i][j] + eps * p, drawn row-major
fn perturb<R: Rng + ?Sized>(working: &AdjacencyMatrix, rng: &mut R) -> DMatrix<f64> {
    let n = working.len();
    let mut a = DMatrix::<f64>::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            let p: f64 = rng.gen();
            let edge = if working.get(i, j) { 1.0 } else { 0.0 };
            a[(i, j)] = edge + PERTURBATION * p;
        }
    }
    a
}

/// Runs one walk from `start` and returns the first site to collect
/// `params.visits` visits after the equilibration phase
pub fn merw<R: Rng + ?Sized>(
    transition: &DMatrix<f64>,
    neighbors: &NeighborLists,
    start: usize,
    params: &MerwParams,
    rng: &mut R,
) -> Result<usize> {
    let stuck = |site: usize| {
        ZeoranError::infeasible(Algorithm::Merw, format!("walker stranded on isolated T-site {}", site))
    };

    let mut site = start;
    for _ in 0..params.eq_steps {
        site = merw_step(transition, neighbors, site, rng).ok_or_else(|| stuck(site))?;
    }

    let mut visits = vec![0usize; neighbors.len()];
    loop {
        site = merw_step(transition, neighbors, site, rng).ok_or_else(|| stuck(site))?;
        visits[site] += 1;
        if visits[site] >= params.visits {
            return Ok(site);
        }
    }
}

/// One hop from `site`, weighted by its transition row over current neighbors
fn merw_step<R: Rng + ?Sized>(
    transition: &DMatrix<f64>,
    neighbors: &NeighborLists,
    site: usize,
    rng: &mut R,
) -> Option<usize> {
    let options = &neighbors[site];
    let (&last, rest) = options.split_last()?;

    let total: f64 = options.iter().map(|&j| transition[(site, j)]).sum();
    let p = rng.gen::<f64>() * total;

    let mut acc = 0.0;
    for &j in rest {
        acc += transition[(site, j)];
        if p <= acc {
            return Some(j);
        }
    }
    Some(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn ring(n: usize) -> AdjacencyMatrix {
        let edges: Vec<_> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        AdjacencyMatrix::from_edges(n, &edges)
    }

    fn short_walk() -> MerwParams {
        MerwParams { eq_steps: 20, visits: 4 }
    }

    #[test]
    fn test_defaults() {
        let p = MerwParams::default();
        assert_eq!(p.eq_steps, 100);
        assert_eq!(p.visits, 20);
    }

    #[test]
    fn test_count_and_uniqueness() {
        let graph = ring(12);
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let als = merw_substitutions(&graph, 4, &short_walk(), &mut rng).unwrap();
            assert_eq!(als.len(), 4);
            assert_eq!(als.iter().collect::<HashSet<_>>().len(), 4);
            assert!(als.iter().all(|&t| t < 12));
        }
    }

    #[test]
    fn test_complement_is_consistent() {
        let graph = ring(12);
        let direct = merw_substitutions(&graph, 3, &short_walk(), &mut StdRng::seed_from_u64(77)).unwrap();
        let inverted = merw_substitutions(&graph, 9, &short_walk(), &mut StdRng::seed_from_u64(77)).unwrap();

        assert_eq!(inverted.len(), 9);
        let direct: HashSet<_> = direct.into_iter().collect();
        let inverted: HashSet<_> = inverted.into_iter().collect();
        assert!(direct.is_disjoint(&inverted));
        assert_eq!(direct.union(&inverted).count(), 12);
    }

    #[test]
    fn test_boundaries() {
        let graph = ring(8);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(merw_substitutions(&graph, 0, &short_walk(), &mut rng).unwrap().is_empty());
        let all = merw_substitutions(&graph, 8, &short_walk(), &mut rng).unwrap();
        assert_eq!(all, (0..8).collect::<Vec<_>>());
        assert!(merw_substitutions(&graph, 9, &short_walk(), &mut rng).unwrap_err().is_config());
    }

    #[test]
    fn test_edgeless_graph_selects_isolated_sites() {
        let graph = AdjacencyMatrix::new(8);
        let mut rng = StdRng::seed_from_u64(13);
        let als = merw_substitutions(&graph, 3, &short_walk(), &mut rng).unwrap();
        assert_eq!(als.iter().collect::<HashSet<_>>().len(), 3);
    }

    #[test]
    fn test_working_copy_only() {
        let graph = ring(10);
        let before = graph.clone();
        let mut rng = StdRng::seed_from_u64(2);
        merw_substitutions(&graph, 4, &short_walk(), &mut rng).unwrap();
        assert_eq!(graph, before);
    }

    #[test]
    fn test_transition_rows_follow_edges() {
        let graph = ring(6);
        let mut rng = StdRng::seed_from_u64(5);
        let s = compute_transition(&graph, &mut rng).unwrap();
        for i in 0..6 {
            for j in 0..6 {
                if graph.get(i, j) {
                    assert!(s[(i, j)] > 0.0);
                } else {
                    assert_eq!(s[(i, j)], 0.0);
                }
            }
            // Row sums are close to one: (M v)_i / (lambda v_i) with a small perturbation
            let row: f64 = (0..6).map(|j| s[(i, j)]).sum();
            assert!((row - 1.0).abs() < 0.1, "row {} sums to {}", i, row);
        }
    }

    #[test]
    fn test_step_stays_on_neighbors() {
        let graph = ring(6);
        let neighbors = neighbor_lists(&graph);
        let mut rng = StdRng::seed_from_u64(21);
        let s = compute_transition(&graph, &mut rng).unwrap();
        for _ in 0..100 {
            let next = merw_step(&s, &neighbors, 2, &mut rng).unwrap();
            assert!(next == 1 || next == 3);
        }
        let isolated = neighbor_lists(&AdjacencyMatrix::new(2));
        assert!(merw_step(&DMatrix::zeros(2, 2), &isolated, 0, &mut rng).is_none());
    }

    #[test]
    fn test_transition_retries_failed_solves() {
        let graph = ring(6);
        let n = graph.len();
        let mut rng = StdRng::seed_from_u64(8);
        let mut calls = 0;
        let s = transition_with(&graph, &mut rng, |m| {
            calls += 1;
            match calls {
                1 => Err(ZeoranError::numerical("Schur decomposition did not converge")),
                2 => Ok(EigenPair {
                    value: -1.0,
                    vector: nalgebra::DVector::from_element(m.nrows(), 1.0),
                }),
                _ => dominant_eigenpair(m),
            }
        })
        .unwrap();
        assert_eq!(calls, 3);
        assert!(s[(0, 1)] > 0.0 && s[(0, 2)] == 0.0);

        // Three perturbations of n^2 draws each were consumed
        let mut reference = StdRng::seed_from_u64(8);
        for _ in 0..3 * n * n {
            let _: f64 = reference.gen();
        }
        assert_eq!(rng.gen::<u64>(), reference.gen::<u64>());
    }

    #[test]
    fn test_transition_gives_up_after_bounded_attempts() {
        let graph = ring(6);
        let n = graph.len();
        let mut rng = StdRng::seed_from_u64(8);
        let mut calls = 0;
        let err = transition_with(&graph, &mut rng, |_| {
            calls += 1;
            Err(ZeoranError::numerical("shifted matrix is singular"))
        })
        .unwrap_err();

        assert_eq!(calls, MAX_EIGEN_ATTEMPTS);
        assert!(matches!(err, ZeoranError::Numerical { .. }));
        assert!(err.is_structure_local());
        assert!(err.in_structure(3).is_structure_local());

        let mut reference = StdRng::seed_from_u64(8);
        for _ in 0..MAX_EIGEN_ATTEMPTS * n * n {
            let _: f64 = reference.gen();
        }
        assert_eq!(rng.gen::<u64>(), reference.gen::<u64>());
    }

    #[test]
    fn test_start_falls_back_to_connected_sites() {
        // 200 candidates, only 42 and 137 still have an edge
        let graph = AdjacencyMatrix::from_edges(200, &[(42, 137)]);
        let neighbors = neighbor_lists(&graph);
        let pool: Vec<usize> = (0..200).collect();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            match draw_start(&pool, &neighbors, &mut rng) {
                Start::Walk(site) => assert!(site == 42 || site == 137, "seed {} gave {}", seed, site),
                other => panic!("seed {} gave {:?}", seed, other),
            }
        }
    }

    #[test]
    fn test_start_without_connected_sites() {
        let neighbors = neighbor_lists(&AdjacencyMatrix::new(30));
        let pool: Vec<usize> = (5..25).collect();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            match draw_start(&pool, &neighbors, &mut rng) {
                Start::Isolated(index) => assert!(index < pool.len()),
                other => panic!("seed {} gave {:?}", seed, other),
            }
        }
    }
}
