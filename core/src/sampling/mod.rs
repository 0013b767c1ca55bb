//! Sampling

mod cdf;
mod common;
mod low_discrepancy;
mod solid_angle;

// Re-export
pub use cdf::*;
pub use common::*;
pub use low_discrepancy::*;
pub use solid_angle::*;
