//! Trowbridge-Reitz Distribution

use super::MicrofacetDistribution;
use crate::geometry::*;
use crate::pbrt::*;
use crate::reflection::*;

/// Implements the anisotropic variant of the Trowbridge-Reitz (GGX)
/// distribution. Half vectors are sampled from `D(ωh) cos θh`.
#[derive(Copy, Clone, Debug)]
pub struct TrowbridgeReitzDistribution {
    /// For microfacets oriented perpendicular to the x-axis and where
    /// α = sqrt(2) * σ and σ is the RMS slope of microfacets.
    alpha_x: Float,

    /// For microfacets oriented perpendicular to the y-axis and where
    /// α = sqrt(2) * σ and σ is the RMS slope of microfacets.
    alpha_y: Float,
}

impl TrowbridgeReitzDistribution {
    /// Create a new `TrowbridgeReitzDistribution`.
    ///
    /// * `alpha_x` - Roughness along the x-axis.
    /// * `alpha_y` - Roughness along the y-axis.
    pub fn new(alpha_x: Float, alpha_y: Float) -> Self {
        Self {
            alpha_x: max(0.001, alpha_x),
            alpha_y: max(0.001, alpha_y),
        }
    }

    /// Maps scalar roughness parameter in [0, 1] to alpha values where
    /// values close to 0 are near-perfect specular reflection.
    ///
    /// * `roughness` - Roughness parameter value.
    pub fn roughness_to_alpha(roughness: Float) -> Float {
        let roughness = max(roughness, 1e-3);
        let x = roughness.ln();
        1.62142
            + 0.819955 * x
            + 0.1734 * x * x
            + 0.0171201 * x * x * x
            + 0.000640711 * x * x * x * x
    }
}

impl MicrofacetDistribution for TrowbridgeReitzDistribution {
    #[rustfmt::skip]
    fn d(&self, wh: &Vector3f) -> Float {
        let tan2_theta = tan_2_theta(wh);
        if tan2_theta.is_infinite() || tan2_theta.is_nan() {
            return 0.0;
        }
        let cos4_theta = cos_2_theta(wh) * cos_2_theta(wh);
        let cos_phi = cos_phi(wh);
        let sin_phi = sin_phi(wh);
        let e =
            (cos_phi * cos_phi / (self.alpha_x * self.alpha_x) +
             sin_phi * sin_phi / (self.alpha_y * self.alpha_y)) *
            tan2_theta;
        1.0 / (PI * self.alpha_x * self.alpha_y * cos4_theta * (1.0 + e) * (1.0 + e))
    }

    fn sample_wh(&self, wo: &Vector3f, u: &Point2f) -> Vector3f {
        let mut phi = TWO_PI * u[1];
        let u0 = min(u[0], 1.0 - EPSILON);
        let cos_theta = if self.alpha_x == self.alpha_y {
            let tan_theta2 = self.alpha_x * self.alpha_x * u0 / (1.0 - u0);
            1.0 / (1.0 + tan_theta2).sqrt()
        } else {
            phi = (self.alpha_y / self.alpha_x * (TWO_PI * u[1] + 0.5 * PI).tan()).atan();
            if u[1] > 0.5 {
                phi += PI;
            }
            let sin_phi = phi.sin();
            let cos_phi = phi.cos();
            let alphax2 = self.alpha_x * self.alpha_x;
            let alphay2 = self.alpha_y * self.alpha_y;
            let alpha2 = 1.0 / (cos_phi * cos_phi / alphax2 + sin_phi * sin_phi / alphay2);
            let tan_theta2 = alpha2 * u0 / (1.0 - u0);
            1.0 / (1.0 + tan_theta2).sqrt()
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
        self.d(wh) * abs_cos_theta(wh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::microfacet::tests::*;

    #[test]
    fn distribution_is_normalized() {
        let d = TrowbridgeReitzDistribution::new(0.5, 0.5);
        let integral = integrate_projected_d(&d, 400_000);
        assert!((integral - 1.0).abs() < 0.03, "integral = {}", integral);
    }

    #[test]
    fn sampled_pdf_matches_pdf() {
        let d = TrowbridgeReitzDistribution::new(0.3, 0.6);
        check_sampled_pdf(&d, &Vector3f::new(0.3, -0.2, 0.5).normalize());
    }
}
