//! Homogeneous Volume Region

use core::geometry::*;
use core::medium::*;
use core::pbrt::*;
use core::spectrum::*;

/// Implements a homogeneous region of space with constant absorption,
/// scattering and emission throughout an axis-aligned box.
#[derive(Clone, Debug)]
pub struct HomogeneousVolumeRegion {
    /// Region bounds.
    bounds: Bounds3f,

    /// Emitted radiance per unit distance.
    emission: Spectrum,

    /// Absorption coefficient `σa` is the probability density that light is
    /// absorbed per unit distance traveled in the medium.
    absorption: Spectrum,

    /// Scattering coefficient `σs` is the probability of an out-scattering
    /// event occurring per unit distance.
    scattering: Spectrum,

    /// Total reduction in radiance due to absorption and out-scattering
    /// `σt = σs + σa`.
    attenuation: Spectrum,

    /// Phase function.
    phase_function: PhaseFunction,
}

impl HomogeneousVolumeRegion {
    /// Create a new `HomogeneousVolumeRegion`.
    ///
    /// * `bounds`         - Region bounds.
    /// * `emission`       - Emitted radiance per unit distance.
    /// * `absorption`     - Absorption coefficient `σa`.
    /// * `scattering`     - Scattering coefficient `σs`.
    /// * `phase_function` - Phase function.
    pub fn new(
        bounds: Bounds3f,
        emission: Spectrum,
        absorption: Spectrum,
        scattering: Spectrum,
        phase_function: PhaseFunction,
    ) -> Self {
        debug_assert!(absorption.min_component_value() >= 0.0);
        debug_assert!(scattering.min_component_value() >= 0.0);
        Self {
            bounds,
            emission,
            absorption,
            scattering,
            attenuation: absorption + scattering,
            phase_function,
        }
    }

    /// Returns `value` inside the bounds and zero outside.
    #[inline]
    fn inside(&self, p: &Point3f, value: Spectrum) -> Spectrum {
        if self.bounds.contains(p) {
            value
        } else {
            Spectrum::ZERO
        }
    }
}

impl VolumeRegion for HomogeneousVolumeRegion {
    fn bounds(&self) -> Bounds3f {
        self.bounds
    }

    fn emission(&self, p: &Point3f) -> Spectrum {
        self.inside(p, self.emission)
    }

    fn absorption(&self, p: &Point3f) -> Spectrum {
        self.inside(p, self.absorption)
    }

    fn scattering(&self, p: &Point3f) -> Spectrum {
        self.inside(p, self.scattering)
    }

    fn attenuation(&self, p: &Point3f) -> Spectrum {
        self.inside(p, self.attenuation)
    }

    fn phase(&self, p: &Point3f, incoming: &Vector3f, outgoing: &Vector3f) -> Float {
        if self.bounds.contains(p) {
            self.phase_function.p(incoming, outgoing)
        } else {
            0.0
        }
    }

    /// Closed form. `step` and `offset` are ignored.
    fn optical_thickness(&self, ray: &Ray, _step: Float, _offset: Float) -> Spectrum {
        match self.intersect(ray) {
            Some((t0, t1)) => self.attenuation * abs(t1 - t0),
            None => Spectrum::ZERO,
        }
    }
}
