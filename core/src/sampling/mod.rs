//! Sampling

mod cdf;
mod common;

// Re-export
pub use cdf::*;
pub use common::*;
