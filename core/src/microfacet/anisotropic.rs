//! Anisotropic Distribution

use super::MicrofacetDistribution;
use crate::geometry::*;
use crate::pbrt::*;
use crate::reflection::*;

/// Ashikhmin-Shirley anisotropic microfacet distribution with separate
/// exponents along the tangent and bitangent.
#[derive(Copy, Clone, Debug)]
pub struct AnisotropicDistribution {
    /// Exponent along the x-axis of the shading frame.
    ex: Float,

    /// Exponent along the y-axis of the shading frame.
    ey: Float,
}

impl AnisotropicDistribution {
    /// Create a new `AnisotropicDistribution`.
    ///
    /// * `ex` - Exponent along the x-axis, clamped to [0, 1000].
    /// * `ey` - Exponent along the y-axis, clamped to [0, 1000].
    pub fn new(ex: Float, ey: Float) -> Self {
        Self {
            ex: clamp(ex, 0.0, 1000.0),
            ey: clamp(ey, 0.0, 1000.0),
        }
    }

    /// Samples (Φ, cos θ) in the first quadrant.
    ///
    /// * `u0` - Uniform sample for Φ.
    /// * `u1` - Uniform sample for θ.
    fn sample_first_quadrant(&self, u0: Float, u1: Float) -> (Float, Float) {
        let phi = if self.ex == self.ey {
            PI * u0 * 0.5
        } else {
            (((self.ex + 1.0) / (self.ey + 1.0)).sqrt() * (PI * u0 * 0.5).tan()).atan()
        };
        let cos_phi = phi.cos();
        let sin_phi = phi.sin();
        let cos_theta =
            u1.powf(1.0 / (self.ex * cos_phi * cos_phi + self.ey * sin_phi * sin_phi + 1.0));
        (phi, cos_theta)
    }

    /// Returns the exponent `ex cos²Φ + ey sin²Φ` for the half vector, or
    /// `None` when it is aligned with the normal.
    ///
    /// * `wh` - The half vector.
    fn exponent(&self, wh: &Vector3f) -> Option<Float> {
        let d = 1.0 - wh.z * wh.z;
        if d <= 0.0 {
            None
        } else {
            Some((self.ex * wh.x * wh.x + self.ey * wh.y * wh.y) / d)
        }
    }
}

impl MicrofacetDistribution for AnisotropicDistribution {
    fn d(&self, wh: &Vector3f) -> Float {
        match self.exponent(wh) {
            Some(e) => {
                ((self.ex + 2.0) * (self.ey + 2.0)).sqrt()
                    * INV_TWO_PI
                    * abs_cos_theta(wh).powf(e)
            }
            None => 0.0,
        }
    }

    fn sample_wh(&self, wo: &Vector3f, u: &Point2f) -> Vector3f {
        // Sample from the first quadrant and remap to the hemisphere.
        let (phi, cos_theta) = if u[0] < 0.25 {
            self.sample_first_quadrant(4.0 * u[0], u[1])
        } else if u[0] < 0.5 {
            let (phi, cos_theta) = self.sample_first_quadrant(4.0 * (0.5 - u[0]), u[1]);
            (PI - phi, cos_theta)
        } else if u[0] < 0.75 {
            let (phi, cos_theta) = self.sample_first_quadrant(4.0 * (u[0] - 0.5), u[1]);
            (phi + PI, cos_theta)
        } else {
            let (phi, cos_theta) = self.sample_first_quadrant(4.0 * (1.0 - u[0]), u[1]);
            (TWO_PI - phi, cos_theta)
        };

        let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
        let wh = spherical_direction(sin_theta, cos_theta, phi);
        if same_hemisphere(wo, &wh) {
            wh
        } else {
            -wh
        }
    }

    fn pdf_wh(&self, wh: &Vector3f) -> Float {
        match self.exponent(wh) {
            Some(e) => {
                ((self.ex + 1.0) * (self.ey + 1.0)).sqrt()
                    * INV_TWO_PI
                    * abs_cos_theta(wh).powf(e)
            }
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::microfacet::tests::*;

    #[test]
    fn distribution_is_normalized() {
        let d = AnisotropicDistribution::new(10.0, 40.0);
        let integral = integrate_projected_d(&d, 400_000);
        assert!((integral - 1.0).abs() < 0.03, "integral = {}", integral);
    }

    #[test]
    fn sampled_pdf_matches_pdf() {
        let d = AnisotropicDistribution::new(5.0, 50.0);
        check_sampled_pdf(&d, &Vector3f::new(0.3, -0.2, 0.5).normalize());
        check_sampled_pdf(&d, &Vector3f::new(-0.1, 0.4, -0.6).normalize());
    }

    #[test]
    fn pdf_integrates_below_one() {
        let d = AnisotropicDistribution::new(10.0, 30.0);
        let wo = Vector3f::new(0.0, 0.6, 0.8);
        let integral = integrate_pdf(&d, &wo, 400_000);
        assert!(integral > 0.85 && integral < 1.01, "integral = {}", integral);
    }
}
