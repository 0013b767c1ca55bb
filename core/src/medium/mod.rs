//! Medium

use crate::geometry::*;
use crate::pbrt::*;
use crate::sampling::*;
use crate::spectrum::*;
use std::sync::Arc;

mod density;
mod henyey_greenstein;
mod phase_function;

// Re-exports
pub use density::*;
pub use henyey_greenstein::*;
pub use phase_function::*;

/// Result of `VolumeRegion::sample_scattering()`.
#[derive(Copy, Clone, Debug)]
pub struct ScatteringSample {
    /// Ray parameter of the scattering event, if one happened.
    pub t: Option<Float>,

    /// Density of the sampled distance when a scattering event happened,
    /// otherwise the probability of passing through the region.
    pub pdf: Float,

    /// Transmittance from the start of the region to the event, or through
    /// the whole region.
    pub transmittance: Spectrum,
}

/// Volume region describes a participating medium by its coefficient fields,
/// phase function and optical thickness. Regions are built once at scene load
/// time and shared read-only across rendering threads.
pub trait VolumeRegion {
    /// Returns the bounds of the region.
    fn bounds(&self) -> Bounds3f;

    /// Returns the parametric range of the ray that overlaps the region.
    ///
    /// * `ray` - The ray.
    fn intersect(&self, ray: &Ray) -> Option<(Float, Float)> {
        self.bounds().intersect_p(ray)
    }

    /// Returns the emitted radiance at a point.
    ///
    /// * `p` - The point.
    fn emission(&self, p: &Point3f) -> Spectrum;

    /// Returns the absorption coefficient at a point.
    ///
    /// * `p` - The point.
    fn absorption(&self, p: &Point3f) -> Spectrum;

    /// Returns the scattering coefficient at a point.
    ///
    /// * `p` - The point.
    fn scattering(&self, p: &Point3f) -> Spectrum;

    /// Returns the attenuation (absorption plus scattering) coefficient at a
    /// point.
    ///
    /// * `p` - The point.
    fn attenuation(&self, p: &Point3f) -> Spectrum {
        self.absorption(p) + self.scattering(p)
    }

    /// Returns the phase function at a point for a pair of propagation
    /// directions.
    ///
    /// * `p`        - The point.
    /// * `incoming` - Direction the light travels before scattering.
    /// * `outgoing` - Direction the light travels after scattering.
    fn phase(&self, p: &Point3f, incoming: &Vector3f, outgoing: &Vector3f) -> Float;

    /// Returns the optical thickness along the part of the ray inside the
    /// region.
    ///
    /// * `ray`    - The ray.
    /// * `step`   - Step size for regions that integrate numerically.
    /// * `offset` - Sample in [0, 1) that positions evaluation points inside
    ///              each step.
    fn optical_thickness(&self, ray: &Ray, step: Float, offset: Float) -> Spectrum;

    /// Samples the distance to the next scattering event along the ray with
    /// probability proportional to the luminance of the transmittance.
    ///
    /// * `ray`    - The ray.
    /// * `u`      - Sample in (0, 1) for the distance.
    /// * `step`   - Marching step size.
    /// * `offset` - Sample in [0, 1) that positions evaluation points inside
    ///              each step.
    fn sample_scattering(&self, ray: &Ray, u: Float, step: Float, offset: Float) -> ScatteringSample {
        debug_assert!(step > 0.0);
        debug_assert!((0.0..1.0).contains(&offset));

        let (t_begin, t_end) = match self.intersect(ray) {
            Some(range) => range,
            None => {
                return ScatteringSample {
                    t: None,
                    pdf: 1.0,
                    transmittance: Spectrum::ONE,
                }
            }
        };

        let sampled_thickness = -u.ln();
        let mut thickness = Spectrum::ZERO;
        let mut thickness_y = 0.0;
        let mut t = t_begin;
        let mut step = step;
        while t < t_end - MACHINE_EPSILON {
            step = min(step, t_end - t);
            let attenuation = self.attenuation(&ray.at(t + offset * step));
            let attenuation_y = attenuation.y();
            if thickness_y + attenuation_y * step > sampled_thickness {
                // Refine the step while the attenuation at the sampled point
                // differs from the one used to find it by more than 10%.
                let rescaled_step = (sampled_thickness - thickness_y) / attenuation_y;
                let attenuation_at_t = self.attenuation(&ray.at(t + rescaled_step)).y();
                if abs(attenuation_at_t - attenuation_y) > 0.1 * attenuation_y {
                    step *= 0.5;
                    continue;
                }

                thickness += attenuation * rescaled_step;
                return ScatteringSample {
                    t: Some(t + rescaled_step),
                    pdf: attenuation_at_t * u,
                    transmittance: (-thickness).exp(),
                };
            }

            thickness += attenuation * step;
            thickness_y += attenuation_y * step;
            t += step;
        }

        ScatteringSample {
            t: None,
            pdf: (-thickness_y).exp(),
            transmittance: (-thickness).exp(),
        }
    }
}

/// Atomic reference counted `VolumeRegion`.
pub type ArcVolumeRegion = Arc<dyn VolumeRegion + Send + Sync>;
