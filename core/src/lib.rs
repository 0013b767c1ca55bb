//! Core

#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

// Re-export.
pub mod error;
pub mod geometry;
pub mod light;
pub mod light_distrib;
pub mod material;
pub mod medium;
pub mod memory;
pub mod mesh;
pub mod microfacet;
pub mod pbrt;
pub mod primitives;
pub mod reflection;
pub mod rng;
pub mod sampler;
pub mod sampling;
pub mod scene;
pub mod spectrum;
