//! Random Sampler

use super::*;

/// Fills every sequence with independent uniform values.
#[derive(Clone, Debug, Default)]
pub struct RandomSampler {
    /// The registered sequences.
    data: SamplerData,
}

impl RandomSampler {
    /// Create a new `RandomSampler` with no registered sequences.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sampler for RandomSampler {
    fn get_data(&self) -> &SamplerData {
        &self.data
    }

    fn get_data_mut(&mut self) -> &mut SamplerData {
        &mut self.data
    }

    fn fill_sample(&self, sample: &mut Sample, rng: &mut RNG) {
        for seq in sample.sequences_1d_mut() {
            seq.iter_mut().for_each(|v| *v = rng.uniform_float());
        }
        for seq in sample.sequences_2d_mut() {
            seq.iter_mut()
                .for_each(|v| *v = Point2f::new(rng.uniform_float(), rng.uniform_float()));
        }
    }
}
