// src/config.rs

use crate::error::{Result, ZeoranError};
use crate::model::Framework;
use crate::physics::substitution::AlgorithmConfig;
use directories::ProjectDirs;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Environment variable holding a fixed seed when the config has none
pub const SEED_ENV_VAR: &str = "RANDOM_SEED";

// --- Enums ---

/// What a batch does when one structure cannot be generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
  /// Stop the batch and return the error
  #[default]
  Abort,
  /// Record the failure and continue with the next structure
  Skip,
}

/// Where the run's seed came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSource {
  Config(u64),
  Environment(u64),
  Time(u64),
}

impl SeedSource {
  pub fn value(&self) -> u64 {
    match *self {
      SeedSource::Config(s) | SeedSource::Environment(s) | SeedSource::Time(s) => s,
    }
  }
}

// --- Main Config Struct ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GenerationConfig {
  pub algorithm: AlgorithmConfig,

  /// Number of structures to generate
  #[serde(default = "default_structures")]
  pub structures: usize,

  /// Fixed seed; when absent `RANDOM_SEED` or the clock is used
  #[serde(default)]
  pub seed: Option<u64>,

  #[serde(default)]
  pub on_failure: FailurePolicy,
}

fn default_structures() -> usize {
  1
}

impl Default for GenerationConfig {
  fn default() -> Self {
    Self {
      algorithm: AlgorithmConfig::default(),
      structures: default_structures(),
      seed: None,
      on_failure: FailurePolicy::Abort,
    }
  }
}

impl GenerationConfig {
  pub fn new(algorithm: AlgorithmConfig, structures: usize) -> Self {
    Self {
      algorithm,
      structures,
      ..Default::default()
    }
  }

  pub fn with_seed(mut self, seed: u64) -> Self {
    self.seed = Some(seed);
    self
  }

  pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
    self.on_failure = policy;
    self
  }

  /// Every configuration check that can be made before a random number is drawn
  pub fn validate(&self, framework: &Framework) -> Result<()> {
    if self.structures == 0 {
      return Err(ZeoranError::config("structures", "at least one structure must be requested"));
    }
    self.algorithm.validate(framework.n_t_sites())
  }

  /// Picks the run's seed: config value, then `RANDOM_SEED`, then the clock
  pub fn resolve_seed(&self) -> SeedSource {
    if let Some(seed) = self.seed {
      return SeedSource::Config(seed);
    }
    if let Some(seed) = std::env::var(SEED_ENV_VAR).ok().and_then(|v| v.trim().parse::<u64>().ok()) {
      return SeedSource::Environment(seed);
    }
    let nanos = SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .map(|d| d.as_nanos() as u64)
      .unwrap_or(0);
    SeedSource::Time(nanos)
  }

  pub fn from_json_str(json: &str) -> Result<Self> {
    Ok(serde_json::from_str(json)?)
  }

  pub fn load_from(path: &Path) -> Result<Self> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
  }

  pub fn save_to(&self, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, self)?;
    Ok(())
  }

  /// Loads config from standard OS location (e.g., ~/.config/zeoran/generate.json),
  /// falling back to defaults when there is none
  pub fn load() -> Result<Self> {
    let path = Self::default_path();
    if path.exists() {
      let cfg = Self::load_from(&path)?;
      info!("Config loaded from {:?}", path);
      Ok(cfg)
    } else {
      info!("No config found at {:?}. Using defaults.", path);
      Ok(Self::default())
    }
  }

  /// Saves config to standard OS location
  pub fn save(&self) -> Result<PathBuf> {
    let path = Self::default_path();
    self.save_to(&path)?;
    info!("Config saved to {:?}", path);
    Ok(path)
  }

  pub fn default_path() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("org", "zeoran", "zeoran") {
      proj.config_dir().join("generate.json")
    } else {
      PathBuf::from("generate.json")
    }
  }
}
