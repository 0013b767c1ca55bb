//! Fresnel Dielectrics and Conductors

use super::*;
use std::mem::swap;

/// Computes Fresnel reflection coefficients.
#[derive(Copy, Clone, Debug)]
pub enum Fresnel {
    /// Reflects 100% of all incoming light.
    NoOp,

    /// Boundary between two dielectrics.
    Dielectric {
        /// Index of refraction for exterior side of the surface.
        eta_i: Float,

        /// Index of refraction for interior side of the surface.
        eta_t: Float,
    },

    /// Boundary between a dielectric and a conductor.
    Conductor {
        /// Relative index of refraction of the conductor.
        eta: Spectrum,

        /// Absorption coefficient.
        k: Spectrum,
    },
}

impl Fresnel {
    /// Returns the amount of light reflected by the surface.
    ///
    /// * `cos_theta_i` - Cosine of the angle made by incident direction and
    ///                   surface normal.
    pub fn evaluate(&self, cos_theta_i: Float) -> Spectrum {
        match self {
            Self::NoOp => Spectrum::ONE,
            Self::Dielectric { eta_i, eta_t } => {
                Spectrum::new(fr_dielectric(cos_theta_i, *eta_i, *eta_t))
            }
            Self::Conductor { eta, k } => fr_conductor(abs(cos_theta_i), *eta, *k),
        }
    }
}

/// Returns the fresnel reflection for dielectric materials and unpolarized light.
///
/// * `cos_theta_i` - cos(θi) for angle between incident direction and geometric
///                   surface normal. Negative values mean the direction lies
///                   on the interior side.
/// * `eta_i`       - index of refraction for the exterior side.
/// * `eta_t`       - index of refraction for the interior side.
pub fn fr_dielectric(cos_theta_i: Float, eta_i: Float, eta_t: Float) -> Float {
    let mut cos_theta_i = clamp(cos_theta_i, -1.0, 1.0);
    let mut eta_i = eta_i;
    let mut eta_t = eta_t;

    // Potentially swap indices of refraction.
    if cos_theta_i < 0.0 {
        swap(&mut eta_i, &mut eta_t);
        cos_theta_i = abs(cos_theta_i);
    }

    // Compute cos_theta_t using Snell's law.
    let sin_theta_i = max(0.0, 1.0 - cos_theta_i * cos_theta_i).sqrt();
    let sin_theta_t = eta_i / eta_t * sin_theta_i;

    // Handle total internal reflection.
    if sin_theta_t >= 1.0 {
        return 1.0;
    }

    let cos_theta_t = max(0.0, 1.0 - sin_theta_t * sin_theta_t).sqrt();
    let r_parl = ((eta_t * cos_theta_i) - (eta_i * cos_theta_t))
        / ((eta_t * cos_theta_i) + (eta_i * cos_theta_t));
    let r_perp = ((eta_i * cos_theta_i) - (eta_t * cos_theta_t))
        / ((eta_i * cos_theta_i) + (eta_t * cos_theta_t));
    (r_parl * r_parl + r_perp * r_perp) / 2.0
}

/// Returns the approximate Fresnel reflection at the boundary between a
/// conductor and a dielectric for unpolarized light.
///
/// * `cos_theta_i` - cos(θi), non-negative.
/// * `eta`         - Relative index of refraction.
/// * `k`           - The absorption coefficient.
pub fn fr_conductor(cos_theta_i: Float, eta: Spectrum, k: Spectrum) -> Spectrum {
    let cos2 = cos_theta_i * cos_theta_i;
    let one = Spectrum::ONE;
    let tmp_f = eta * eta + k * k;
    let two_eta_cos = 2.0 * cos_theta_i * eta;

    let tmp = tmp_f * cos2;
    let r_parl2 = (tmp - two_eta_cos + one) / (tmp + two_eta_cos + one);
    let r_perp2 =
        (tmp_f - two_eta_cos + Spectrum::new(cos2)) / (tmp_f + two_eta_cos + Spectrum::new(cos2));
    (r_parl2 + r_perp2) * 0.5
}
