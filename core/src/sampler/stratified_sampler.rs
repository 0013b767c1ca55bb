//! Stratified Sampler

use super::*;

/// Stratifies each sequence within itself. 1D sequences are jittered strata
/// in random order and 2D sequences are Latin hypercube samples. Sequences
/// are not stratified with respect to each other.
#[derive(Clone, Debug)]
pub struct StratifiedSampler {
    /// The registered sequences.
    data: SamplerData,

    /// Jitter the samples inside each stratum.
    jitter_samples: bool,
}

impl StratifiedSampler {
    /// Create a new `StratifiedSampler` with no registered sequences.
    ///
    /// * `jitter_samples` - Jitter the samples inside each stratum.
    pub fn new(jitter_samples: bool) -> Self {
        Self {
            data: SamplerData::default(),
            jitter_samples,
        }
    }
}

impl Sampler for StratifiedSampler {
    fn get_data(&self) -> &SamplerData {
        &self.data
    }

    fn get_data_mut(&mut self) -> &mut SamplerData {
        &mut self.data
    }

    fn fill_sample(&self, sample: &mut Sample, rng: &mut RNG) {
        for seq in sample.sequences_1d_mut() {
            let n = seq.len();
            let mut values = stratified_sample_1d(rng, n, self.jitter_samples);
            rng.shuffle(&mut values, n, 1);
            *seq = values;
        }
        for seq in sample.sequences_2d_mut() {
            *seq = latin_hypercube_2d(rng, seq.len());
        }
    }
}
