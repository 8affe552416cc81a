// src/physics/operations/mod.rs

pub mod batch;

pub use batch::{generate_batch, BatchReport, StructureOutcome};
