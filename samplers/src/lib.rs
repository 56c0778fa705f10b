//! Samplers

#[macro_use]
extern crate log;

mod dimension;
mod dof_web;
mod planner;
mod progressive;
mod sequence_groups;
mod settings;

// Re-export.
pub use dimension::*;
pub use dof_web::*;
pub use planner::*;
pub use progressive::*;
pub use sequence_groups::*;
pub use settings::*;
