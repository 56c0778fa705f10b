//! Core
//!
//! Numeric helpers, geometry, low discrepancy sequences, sampling patterns,
//! CDF utilities and parameter sets shared by the samplers.

#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

#[macro_use]
pub mod geometry;
pub mod low_discrepancy;
pub mod paramset;
pub mod pbrt;
pub mod sampling;
