// src/physics/substitution/mod.rs

pub mod chains;
pub mod clusters;
pub mod merw;
pub mod random;
pub mod validate;

pub use chains::generate_chains;
pub use clusters::clusters_substitutions;
pub use merw::{merw_substitutions, MerwParams};
pub use random::generate_random;
pub use validate::check_substitutions;

use crate::error::{Result, ZeoranError};
use crate::physics::connectivity::TSiteGraph;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spatial distribution policy for the Al sites
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Random,
    Clusters,
    Chains,
    Merw,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Random => "random",
            Algorithm::Clusters => "clusters",
            Algorithm::Chains => "chains",
            Algorithm::Merw => "merw",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_eq_steps() -> usize {
    MerwParams::default().eq_steps
}

fn default_visits() -> usize {
    MerwParams::default().visits
}

/// Selected algorithm together with its parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum AlgorithmConfig {
    Random {
        substitutions: usize,
    },
    Clusters {
        substitutions: usize,
    },
    Chains {
        chains: Vec<usize>,
    },
    Merw {
        substitutions: usize,
        #[serde(default = "default_eq_steps")]
        eq_steps: usize,
        #[serde(default = "default_visits")]
        visits: usize,
    },
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        AlgorithmConfig::Random { substitutions: 0 }
    }
}

impl AlgorithmConfig {
    pub fn merw(substitutions: usize) -> Self {
        let params = MerwParams::default();
        AlgorithmConfig::Merw {
            substitutions,
            eq_steps: params.eq_steps,
            visits: params.visits,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            AlgorithmConfig::Random { .. } => Algorithm::Random,
            AlgorithmConfig::Clusters { .. } => Algorithm::Clusters,
            AlgorithmConfig::Chains { .. } => Algorithm::Chains,
            AlgorithmConfig::Merw { .. } => Algorithm::Merw,
        }
    }

    /// Size of the substitution set this request produces
    pub fn expected_count(&self) -> usize {
        match self {
            AlgorithmConfig::Random { substitutions }
            | AlgorithmConfig::Clusters { substitutions }
            | AlgorithmConfig::Merw { substitutions, .. } => *substitutions,
            AlgorithmConfig::Chains { chains } => chains.iter().sum(),
        }
    }

    /// Checks the request against a framework with `t_atoms` T-sites.
    /// Consumes no randomness.
    pub fn validate(&self, t_atoms: usize) -> Result<()> {
        match self {
            AlgorithmConfig::Chains { chains } => {
                if let Some(i) = chains.iter().position(|&len| len == 0) {
                    return Err(ZeoranError::config(
                        format!("chains[{}]", i),
                        "chain lengths must be at least 1",
                    ));
                }
            }
            AlgorithmConfig::Merw { visits, .. } if *visits == 0 => {
                return Err(ZeoranError::config("visits", "MERW needs at least one visit per selection"));
            }
            _ => {}
        }

        let requested = self.expected_count();
        if requested > t_atoms {
            return Err(ZeoranError::config(
                if matches!(self, AlgorithmConfig::Chains { .. }) { "chains" } else { "substitutions" },
                format!(
                    "{}: requested {} substituted sites but only {} T-sites exist",
                    self.algorithm(),
                    requested,
                    t_atoms
                ),
            ));
        }
        Ok(())
    }
}

/// Runs the configured algorithm on `graph` and validates its output.
///
/// `graph` is the canonical T-site graph; algorithms that consume sites work
/// on their own copy, so the same graph serves every structure of a batch.
pub fn substitute<R: Rng + ?Sized>(graph: &TSiteGraph, request: &AlgorithmConfig, rng: &mut R) -> Result<Vec<usize>> {
    let t_atoms = graph.len();
    request.validate(t_atoms)?;

    let als = match request {
        AlgorithmConfig::Random { substitutions } => generate_random(t_atoms, *substitutions, rng)?,
        AlgorithmConfig::Clusters { substitutions } => {
            clusters_substitutions(&graph.neighbors, *substitutions, rng)?
        }
        AlgorithmConfig::Chains { chains } => generate_chains(graph, chains, rng)?,
        AlgorithmConfig::Merw {
            substitutions,
            eq_steps,
            visits,
        } => {
            let params = MerwParams {
                eq_steps: *eq_steps,
                visits: *visits,
            };
            merw_substitutions(&graph.matrix, *substitutions, &params, rng)?
        }
    };

    check_substitutions(request.algorithm(), &als, request.expected_count(), t_atoms)?;
    Ok(als)
}
