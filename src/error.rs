// src/error.rs

use crate::physics::substitution::Algorithm;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ZeoranError>;

#[derive(Debug, Error)]
pub enum ZeoranError {
    /// Bad counts, impossible requests, malformed cells. Raised before any
    /// random number is drawn.
    #[error("invalid configuration for {parameter}: {reason}")]
    Config { parameter: String, reason: String },

    /// The topology (or the random draws so far) cannot satisfy the request
    /// for the current structure.
    #[error("{algorithm}: structure could not be generated: {reason}")]
    Infeasible { algorithm: Algorithm, reason: String },

    #[error("eigen-decomposition failed: {reason}")]
    Numerical { reason: String },

    /// A produced substitution set broke the count/uniqueness/range contract
    #[error("{algorithm}: rejected substitution set: {reason}")]
    InvalidSubstitution { algorithm: Algorithm, reason: String },

    #[error("structure {index}: {source}")]
    Structure {
        index: usize,
        #[source]
        source: Box<ZeoranError>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ZeoranError {
    pub fn config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Config {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    pub fn infeasible(algorithm: Algorithm, reason: impl Into<String>) -> Self {
        Self::Infeasible {
            algorithm,
            reason: reason.into(),
        }
    }

    pub fn numerical(reason: impl Into<String>) -> Self {
        Self::Numerical {
            reason: reason.into(),
        }
    }

    pub fn invalid_substitution(algorithm: Algorithm, reason: impl Into<String>) -> Self {
        Self::InvalidSubstitution {
            algorithm,
            reason: reason.into(),
        }
    }

    pub fn in_structure(self, index: usize) -> Self {
        Self::Structure {
            index,
            source: Box::new(self),
        }
    }

    pub fn is_config(&self) -> bool {
        match self {
            Self::Config { .. } => true,
            Self::Structure { source, .. } => source.is_config(),
            _ => false,
        }
    }

    /// True for failures scoped to a single structure (infeasible topology,
    /// numerical breakdown, rejected set)
    pub fn is_structure_local(&self) -> bool {
        match self {
            Self::Infeasible { .. } | Self::Numerical { .. } | Self::InvalidSubstitution { .. } => true,
            Self::Structure { source, .. } => source.is_structure_local(),
            _ => false,
        }
    }

    pub fn is_infeasible(&self) -> bool {
        match self {
            Self::Infeasible { .. } => true,
            Self::Structure { source, .. } => source.is_infeasible(),
            _ => false,
        }
    }
}
