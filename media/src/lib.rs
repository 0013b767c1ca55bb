//! Participating Media

#[macro_use]
extern crate log;

mod aggregate;
mod grid;
mod homogeneous;

// Re-export
pub use aggregate::*;
pub use grid::*;
pub use homogeneous::*;
