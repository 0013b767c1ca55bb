//! Phase Function

use super::*;
use std::fmt;

/// Models scattering properties in volumetric media.
#[derive(Copy, Clone, Debug)]
pub enum PhaseFunction {
    /// Scatters equally in all directions.
    Isotropic,

    /// Henyey-Greenstein lobe.
    HenyeyGreenstein(HenyeyGreenstein),
}

impl PhaseFunction {
    /// Returns the value of the phase function for the given pair of
    /// propagation directions. It integrates to 1 over the sphere of
    /// `outgoing` directions.
    ///
    /// * `incoming` - Direction the light travels before scattering.
    /// * `outgoing` - Direction the light travels after scattering.
    pub fn p(&self, incoming: &Vector3f, outgoing: &Vector3f) -> Float {
        match self {
            PhaseFunction::Isotropic => INV_FOUR_PI,
            PhaseFunction::HenyeyGreenstein(f) => f.p(incoming, outgoing),
        }
    }

    /// Samples an outgoing direction given the incoming direction and a sample
    /// value in [0, 1)^2. Returns the direction and its PDF, which equals the
    /// phase function value.
    ///
    /// * `incoming` - Direction the light travels before scattering.
    /// * `u`        - Sample value in [0, 1)^2.
    pub fn sample_p(&self, incoming: &Vector3f, u: &Point2f) -> (Vector3f, Float) {
        match self {
            PhaseFunction::Isotropic => (uniform_sample_sphere(u), INV_FOUR_PI),
            PhaseFunction::HenyeyGreenstein(f) => f.sample_p(incoming, u),
        }
    }
}

impl fmt::Display for PhaseFunction {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[PhaseFunction ")?;
        match self {
            Self::Isotropic => write!(f, "Isotropic")?,
            Self::HenyeyGreenstein(h) => write!(f, "{}", h)?,
        }
        write!(f, "]")
    }
}
