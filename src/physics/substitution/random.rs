// src/physics/substitution/random.rs

use super::Algorithm;
use crate::error::{Result, ZeoranError};
use rand::Rng;

/// Picks `n_subst` distinct T-sites uniformly at random, without replacement.
///
/// Draws one pool position per selection; the pool keeps its order as it
/// shrinks, so a fixed seed replays the same sequence.
pub fn generate_random<R: Rng + ?Sized>(t_atoms: usize, n_subst: usize, rng: &mut R) -> Result<Vec<usize>> {
    if n_subst > t_atoms {
        return Err(ZeoranError::config(
            "substitutions",
            format!(
                "{}: requested {} substitutions but only {} T-sites exist",
                Algorithm::Random,
                n_subst,
                t_atoms
            ),
        ));
    }

    let mut pool: Vec<usize> = (0..t_atoms).collect();
    let mut als = Vec::with_capacity(n_subst);

    for _ in 0..n_subst {
        let index = rng.gen_range(0..pool.len());
        als.push(pool.remove(index));
    }

    Ok(als)
}
