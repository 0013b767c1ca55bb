//! Henyey-Greenstein

use super::*;
use std::fmt;

/// Henyey-Greenstein phase function.
#[derive(Copy, Clone, Debug)]
pub struct HenyeyGreenstein {
    /// The asymmetry parameter. It is the average value of the product of the
    /// phase function being approximated and the cosine of the angle between two
    /// directions. Isotropic phase functions use g = 0.
    pub g: Float,
}

impl HenyeyGreenstein {
    /// Returns a new `HenyeyGreenstein`.
    ///
    /// * `g` - The asymmetry parameter in (-1, 1).
    pub fn new(g: Float) -> Self {
        debug_assert!(g > -1.0 && g < 1.0);
        Self { g }
    }

    /// Returns the value of the phase function for the given pair of
    /// propagation directions.
    ///
    /// * `incoming` - Direction the light travels before scattering.
    /// * `outgoing` - Direction the light travels after scattering.
    pub fn p(&self, incoming: &Vector3f, outgoing: &Vector3f) -> Float {
        phase_hg(incoming.dot(outgoing), self.g)
    }

    /// Samples an outgoing direction proportionally to the phase function and
    /// returns it together with its PDF.
    ///
    /// * `incoming` - Direction the light travels before scattering.
    /// * `u`        - Sample value in [0, 1)^2.
    pub fn sample_p(&self, incoming: &Vector3f, u: &Point2f) -> (Vector3f, Float) {
        // Compute $\cos \theta$ for Henyey--Greenstein sample
        let g = self.g;
        let cos_theta = if abs(g) < 1e-3 {
            1.0 - 2.0 * u[0]
        } else {
            let sqr_term = (1.0 - g * g) / (1.0 - g + 2.0 * g * u[0]);
            clamp((1.0 + g * g - sqr_term * sqr_term) / (2.0 * g), -1.0, 1.0)
        };

        // Compute direction _outgoing_ for Henyey--Greenstein sample
        let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
        let phi = TWO_PI * u[1];
        let (v1, v2) = coordinate_system(incoming);
        let outgoing = v1 * (sin_theta * phi.cos()) + v2 * (sin_theta * phi.sin()) + *incoming * cos_theta;

        (outgoing, phase_hg(cos_theta, g))
    }
}

impl fmt::Display for HenyeyGreenstein {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HenyeyGreenstein g={}", self.g)
    }
}

/// Computes the Henyey-Greenstein phase function for the cosine of the angle
/// between the incoming and outgoing propagation directions. Positive `g`
/// favours forward scattering.
///
/// * `cos_theta` - Cosine of the scattering angle.
/// * `g`         - Asymmetry parameter.
#[inline]
pub fn phase_hg(cos_theta: Float, g: Float) -> Float {
    let denom = 1.0 + g * g - 2.0 * g * cos_theta;
    INV_FOUR_PI * (1.0 - g * g) / (denom * denom.sqrt())
}
