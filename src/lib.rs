// src/lib.rs

//! Zeolite random generation.
//!
//! Builds the T-site connectivity graph of a periodic zeolite framework and
//! picks the T-sites that become Al under one of four policies: `random`,
//! `clusters`, `chains` and `merw` (maximal-entropy random walk).
//!
//! Parsing framework files and writing the substituted structures are left to
//! the caller: the crate takes an atom list plus unit cell and returns T-site
//! indices.

pub mod config;
pub mod error;
pub mod model;
pub mod physics;
pub mod utils;

pub use config::{FailurePolicy, GenerationConfig, SeedSource};
pub use error::{Result, ZeoranError};
pub use model::{Atom, Framework, UnitCell};
pub use physics::operations::{generate_batch, BatchReport, StructureOutcome};
pub use physics::{substitute, Algorithm, AlgorithmConfig, MerwParams, TSiteGraph, Topology};
