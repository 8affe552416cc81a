// src/physics/substitution/validate.rs

use super::Algorithm;
use crate::error::{Result, ZeoranError};

/// Checks a produced substitution set before it is handed on.
///
/// The set must hold exactly `expected` entries, all distinct and inside
/// `0..t_atoms`. Nothing is truncated or padded.
pub fn check_substitutions(algorithm: Algorithm, als: &[usize], expected: usize, t_atoms: usize) -> Result<()> {
    if als.len() != expected {
        return Err(ZeoranError::invalid_substitution(
            algorithm,
            format!("expected {} sites, got {}", expected, als.len()),
        ));
    }

    let mut seen = vec![false; t_atoms];
    for &t in als {
        if t >= t_atoms {
            return Err(ZeoranError::invalid_substitution(
                algorithm,
                format!("T-site {} out of range (0..{})", t, t_atoms),
            ));
        }
        if seen[t] {
            return Err(ZeoranError::invalid_substitution(
                algorithm,
                format!("T-site {} selected twice", t),
            ));
        }
        seen[t] = true;
    }

    Ok(())
}
