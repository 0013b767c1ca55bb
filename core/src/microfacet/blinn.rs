//! Blinn Distribution

use super::MicrofacetDistribution;
use crate::geometry::*;
use crate::pbrt::*;
use crate::reflection::*;

/// Isotropic microfacet distribution with normals falling off exponentially
/// away from the surface normal.
#[derive(Copy, Clone, Debug)]
pub struct BlinnDistribution {
    /// Exponent, larger values give a smoother surface.
    exponent: Float,
}

impl BlinnDistribution {
    /// Create a new `BlinnDistribution`.
    ///
    /// * `exponent` - Exponent, clamped to [0, 1000].
    pub fn new(exponent: Float) -> Self {
        Self {
            exponent: clamp(exponent, 0.0, 1000.0),
        }
    }
}

impl MicrofacetDistribution for BlinnDistribution {
    fn d(&self, wh: &Vector3f) -> Float {
        (self.exponent + 2.0) * INV_TWO_PI * abs_cos_theta(wh).powf(self.exponent)
    }

    fn sample_wh(&self, wo: &Vector3f, u: &Point2f) -> Vector3f {
        let cos_theta = u[0].powf(1.0 / (self.exponent + 1.0));
        let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
        let phi = u[1] * TWO_PI;
        let wh = spherical_direction(sin_theta, cos_theta, phi);
        if same_hemisphere(wo, &wh) {
            wh
        } else {
            -wh
        }
    }

    fn pdf_wh(&self, wh: &Vector3f) -> Float {
        (self.exponent + 1.0) * INV_TWO_PI * abs_cos_theta(wh).powf(self.exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::microfacet::tests::*;

    #[test]
    fn distribution_is_normalized() {
        let d = BlinnDistribution::new(20.0);
        let integral = integrate_projected_d(&d, 200_000);
        assert!((integral - 1.0).abs() < 0.02, "integral = {}", integral);
    }

    #[test]
    fn sampled_pdf_matches_pdf() {
        let d = BlinnDistribution::new(15.0);
        check_sampled_pdf(&d, &Vector3f::new(0.3, -0.2, 0.5).normalize());
        check_sampled_pdf(&d, &Vector3f::new(0.3, -0.2, -0.5).normalize());
    }

    #[test]
    fn pdf_integrates_below_one() {
        // Incident directions that fall below the horizon are lost.
        let d = BlinnDistribution::new(10.0);
        let wo = Vector3f::new(0.6, 0.0, 0.8);
        let integral = integrate_pdf(&d, &wo, 400_000);
        assert!(integral > 0.85 && integral < 1.01, "integral = {}", integral);
    }

    #[test]
    fn exponent_is_clamped() {
        let d = BlinnDistribution::new(1.0e6);
        assert_eq!(d.exponent, 1000.0);
    }
}
