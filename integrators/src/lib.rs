//! Integrators

#[macro_use]
extern crate log;

mod direct_lighting;
mod direct_lighting_lte;
mod error;
mod lte_integrator;
mod render;

// Re-export.
pub use direct_lighting::*;
pub use direct_lighting_lte::*;
pub use error::*;
pub use lte_integrator::*;
pub use render::*;
