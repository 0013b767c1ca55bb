//! Power Light Distribution.

use super::*;

/// Returns a distribution with sampling probability proportional to the
/// luminance of the total emitted power of each light. The lit point is
/// ignored, so the CDF is computed once.
pub struct PowerLightsSamplingStrategy {
    cdf: Vec<Float>,
}

impl PowerLightsSamplingStrategy {
    /// Create a new instance of `PowerLightsSamplingStrategy`.
    ///
    /// * `light_sources` - The scene lights.
    pub fn new(light_sources: &LightSources) -> Self {
        let mut cdf: Vec<Float> = light_sources
            .infinite
            .iter()
            .chain(light_sources.area.iter())
            .map(|light| max(0.0, light.power().y()))
            .collect();
        weights_to_cdf(&mut cdf);
        Self { cdf }
    }
}

impl LightsSamplingStrategy for PowerLightsSamplingStrategy {
    fn get_lights_cdf(&self, _p: &Point3f, _n: Option<&Normal3f>, cdf: &mut [Float]) {
        debug_assert!(cdf.len() == self.cdf.len());
        cdf.copy_from_slice(&self.cdf);
    }
}
