//! Light Transport Integrator

use bumpalo::Bump;
use core::geometry::*;
use core::rng::*;
use core::sampler::*;
use core::spectrum::*;

/// Solves the light transport equation for single rays.
pub trait LTEIntegrator {
    /// Registers the sample sequences the integrator consumes for every
    /// camera ray. Must be called before rendering with samples from
    /// `sampler`.
    ///
    /// * `sampler` - The sampler.
    fn request_samples(&mut self, sampler: &mut dyn Sampler);

    /// Returns the radiance arriving at the ray origin from the ray
    /// direction.
    ///
    /// * `ray`    - The ray. Its direction must be normalized.
    /// * `sample` - Samples for a camera ray, if any. Secondary rays without
    ///              samples draw from `rng`.
    /// * `arena`  - Arena for BSDF allocations.
    /// * `rng`    - Random number generator of the calling thread.
    fn radiance(&self, ray: &Ray, sample: Option<&Sample>, arena: &Bump, rng: &mut RNG) -> Spectrum;
}
