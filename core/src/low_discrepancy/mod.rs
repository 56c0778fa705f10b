//! Low Discrepancy Sequences

mod halton;
mod radical_inverse;

// Re-export
pub use halton::*;
pub use radical_inverse::*;
