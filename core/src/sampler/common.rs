//! Common

use super::*;

/// Stores the sequence lengths registered with a sampler.
#[derive(Clone, Debug, Default)]
pub struct SamplerData {
    /// Lengths of the registered 1D sequences.
    pub sequences_1d_sizes: Vec<usize>,

    /// Lengths of the registered 2D sequences.
    pub sequences_2d_sizes: Vec<usize>,
}

impl SamplerData {
    /// Registers a 1D sequence and returns its id.
    ///
    /// * `n` - The number of samples.
    pub fn add_samples_sequence_1d(&mut self, n: usize) -> usize {
        self.sequences_1d_sizes.push(n);
        self.sequences_1d_sizes.len() - 1
    }

    /// Registers a 2D sequence and returns its id.
    ///
    /// * `n` - The number of samples.
    pub fn add_samples_sequence_2d(&mut self, n: usize) -> usize {
        self.sequences_2d_sizes.push(n);
        self.sequences_2d_sizes.len() - 1
    }

    /// Removes all registered sequences.
    pub fn clear(&mut self) {
        self.sequences_1d_sizes.clear();
        self.sequences_2d_sizes.clear();
    }

    /// Returns a zeroed `Sample` sized for the registered sequences.
    pub fn create_sample(&self) -> Sample {
        Sample {
            sequences_1d: self.sequences_1d_sizes.iter().map(|&n| vec![0.0; n]).collect(),
            sequences_2d: self
                .sequences_2d_sizes
                .iter()
                .map(|&n| vec![Point2f::default(); n])
                .collect(),
        }
    }
}

/// Sample values for one camera ray.
#[derive(Clone, Debug, Default)]
pub struct Sample {
    /// 1D sequences indexed by id.
    sequences_1d: Vec<Vec<Float>>,

    /// 2D sequences indexed by id.
    sequences_2d: Vec<Vec<Point2f>>,
}

impl Sample {
    /// Returns a 1D sequence.
    ///
    /// * `id` - Id returned by `Sampler::add_samples_sequence_1d()`.
    pub fn samples_sequence_1d(&self, id: usize) -> &[Float] {
        &self.sequences_1d[id]
    }

    /// Returns a 2D sequence.
    ///
    /// * `id` - Id returned by `Sampler::add_samples_sequence_2d()`.
    pub fn samples_sequence_2d(&self, id: usize) -> &[Point2f] {
        &self.sequences_2d[id]
    }

    /// Returns all 1D sequences for writing.
    pub fn sequences_1d_mut(&mut self) -> impl Iterator<Item = &mut Vec<Float>> {
        self.sequences_1d.iter_mut()
    }

    /// Returns all 2D sequences for writing.
    pub fn sequences_2d_mut(&mut self) -> impl Iterator<Item = &mut Vec<Point2f>> {
        self.sequences_2d.iter_mut()
    }
}
