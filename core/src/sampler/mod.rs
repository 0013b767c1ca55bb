//! Sampler

use crate::geometry::*;
use crate::pbrt::*;
use crate::rng::*;
use crate::sampling::*;
use std::sync::Arc;

mod common;
mod random_sampler;
mod stratified_sampler;

// Re-export
pub use common::*;
pub use random_sampler::*;
pub use stratified_sampler::*;

/// Sampler interface. Integrators register the sample sequences they need
/// once before rendering. Each rendering thread then fills its own `Sample`
/// with fresh values for every camera ray.
pub trait Sampler {
    /// Returns a shared reference underlying `SamplerData`.
    fn get_data(&self) -> &SamplerData;

    /// Returns a mutable reference to underlying `SamplerData`.
    fn get_data_mut(&mut self) -> &mut SamplerData;

    /// Returns the nearest sequence length the sampler can produce that is
    /// not smaller than `n`. The default implementation returns `n`.
    ///
    /// * `n` - The requested length.
    fn round_count(&self, n: usize) -> usize {
        n
    }

    /// Registers a sequence of 1D samples and returns its id.
    ///
    /// * `n` - The number of samples.
    fn add_samples_sequence_1d(&mut self, n: usize) -> usize {
        let n = self.round_count(n);
        self.get_data_mut().add_samples_sequence_1d(n)
    }

    /// Registers a sequence of 2D samples and returns its id.
    ///
    /// * `n` - The number of samples.
    fn add_samples_sequence_2d(&mut self, n: usize) -> usize {
        let n = self.round_count(n);
        self.get_data_mut().add_samples_sequence_2d(n)
    }

    /// Returns a `Sample` sized for the registered sequences.
    fn create_sample(&self) -> Sample {
        self.get_data().create_sample()
    }

    /// Fills every sequence of the sample with new values.
    ///
    /// * `sample` - The sample created by `create_sample()`.
    /// * `rng`    - Random number generator of the calling thread.
    fn fill_sample(&self, sample: &mut Sample, rng: &mut RNG);
}

/// Atomic reference counted `Sampler`.
pub type ArcSampler = Arc<dyn Sampler + Send + Sync>;
