// src/utils/mod.rs
pub mod geometry;
pub mod linalg;
pub mod matrix;
pub mod report;

pub use matrix::AdjacencyMatrix;
