// src/physics/operations/batch.rs

use crate::config::{FailurePolicy, GenerationConfig, SeedSource};
use crate::error::{Result, ZeoranError};
use crate::model::Framework;
use crate::physics::connectivity::Topology;
use crate::physics::substitution::substitute;
use crate::utils::report::{framework_summary, substitution_summary};
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Outcome of one requested structure
#[derive(Debug)]
pub struct StructureOutcome {
    pub index: usize,
    pub result: Result<Vec<usize>>,
}

/// Everything a batch produced, in request order
#[derive(Debug)]
pub struct BatchReport {
    pub seed: SeedSource,
    pub outcomes: Vec<StructureOutcome>,
}

impl BatchReport {
    /// Substitution sets of the structures that succeeded
    pub fn successes(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|als| (o.index, als.as_slice())))
    }

    pub fn failures(&self) -> impl Iterator<Item = (usize, &ZeoranError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.index, e)))
    }

    pub fn success_count(&self) -> usize {
        self.successes().count()
    }
}

/// Generates `config.structures` substitution sets for `framework`.
///
/// # Algorithm
/// 1. Validate the whole request (no randomness consumed on failure)
/// 2. Seed one generator for the run
/// 3. Build the topology once; every structure starts from the same canonical graph
/// 4. Generate structures in order, applying `config.on_failure` to structure-local errors
///
/// # Returns
/// - `Err(Config)` for an invalid request
/// - `Err(Structure { index, .. })` when a structure fails under [`FailurePolicy::Abort`]
pub fn generate_batch(framework: &Framework, config: &GenerationConfig) -> Result<BatchReport> {
    config.validate(framework)?;

    let seed = config.resolve_seed();
    match seed {
        SeedSource::Config(s) | SeedSource::Environment(s) => info!("Using fixed random seed: {}", s),
        SeedSource::Time(s) => info!("Using current time as random seed: {}", s),
    }
    let mut rng = StdRng::seed_from_u64(seed.value());

    let topology = Topology::build(framework);
    for line in framework_summary(framework, &topology).lines() {
        info!("{}", line);
    }

    let mut outcomes = Vec::with_capacity(config.structures);
    for index in 0..config.structures {
        info!("Progress: {}/{}", index + 1, config.structures);

        match substitute(&topology.t_graph, &config.algorithm, &mut rng) {
            Ok(als) => {
                debug!("Structure {}: {}", index, substitution_summary(framework, &als));
                outcomes.push(StructureOutcome {
                    index,
                    result: Ok(als),
                });
            }
            Err(e) if config.on_failure == FailurePolicy::Skip && e.is_structure_local() => {
                warn!("Structure {} could not be generated, skipping: {}", index, e);
                outcomes.push(StructureOutcome {
                    index,
                    result: Err(e),
                });
            }
            Err(e) => {
                error!("Structure {} could not be generated: {}", index, e);
                return Err(e.in_structure(index));
            }
        }
    }

    info!(
        "Generated {} of {} structures with {}",
        outcomes.iter().filter(|o| o.result.is_ok()).count(),
        config.structures,
        config.algorithm.algorithm()
    );

    Ok(BatchReport { seed, outcomes })
}
