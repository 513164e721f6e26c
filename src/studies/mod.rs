// src/studies/mod.rs

// Batch analyses that coordinate many independent game runs.

pub mod sdk;
pub use sdk::*;

pub mod lambda_sweep;
pub mod style_matrix;

pub use lambda_sweep::*;
pub use style_matrix::*;
