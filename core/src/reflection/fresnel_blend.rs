//! Fresnel Blend

use super::*;
use crate::microfacet::*;
use bumpalo::Bump;

/// BRDF for modeling a glossy specular coating over a diffuse base. The
/// specular layer follows a microfacet distribution with Schlick's Fresnel
/// approximation.
pub struct FresnelBlend {
    /// Diffuse reflectance of the base.
    rd: Spectrum,

    /// Specular reflectance of the coating at normal incidence.
    rs: Spectrum,

    /// The microfacet distribution model.
    distribution: Distribution,

    /// Probability of sampling the diffuse lobe.
    diffuse_prob: Float,
}

impl FresnelBlend {
    /// Allocate a new instance of `FresnelBlend`.
    ///
    /// * `arena`        - The arena for memory allocations.
    /// * `rd`           - Diffuse reflectance.
    /// * `rs`           - Specular reflectance.
    /// * `distribution` - Microfacet distribution.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc<'arena>(
        arena: &'arena Bump,
        rd: Spectrum,
        rs: Spectrum,
        distribution: Distribution,
    ) -> &'arena mut BxDF<'arena> {
        let model = arena.alloc(Self {
            rd,
            rs,
            distribution,
            diffuse_prob: diffuse_probability(&rd, &rs),
        });
        arena.alloc(BxDF::FresnelBlend(model))
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_REFLECTION | BxDFType::BSDF_GLOSSY
    }

    /// Schlick's approximation of the Fresnel reflectance.
    ///
    /// * `cos_theta` - Cosine of the angle to the microfacet normal.
    pub fn schlick_fresnel(&self, cos_theta: Float) -> Spectrum {
        self.rs + (Spectrum::ONE - self.rs) * pow5(1.0 - cos_theta)
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        let cos_theta_o = abs_cos_theta(wo);
        let cos_theta_i = abs_cos_theta(wi);

        let diffuse = (28.0 / (23.0 * PI))
            * self.rd
            * (Spectrum::ONE - self.rs)
            * (1.0 - pow5(1.0 - 0.5 * cos_theta_i))
            * (1.0 - pow5(1.0 - 0.5 * cos_theta_o));

        let wh = *wi + *wo;
        if wh.length_squared() < EPSILON {
            return diffuse;
        }
        let wh = wh.normalize();

        let wi_dot_wh = wi.dot(&wh).abs();
        let denom = 4.0 * wi_dot_wh * max(cos_theta_i, cos_theta_o);
        if denom < EPSILON {
            return diffuse;
        }
        let specular = self.schlick_fresnel(wi_dot_wh) * (self.distribution.d(&wh) / denom);

        diffuse + specular
    }

    /// Samples either the diffuse lobe or the microfacet lobe.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        let wi = if u[0] < self.diffuse_prob {
            // Cosine-sample the hemisphere, flipping the direction if necessary.
            let u = Point2f::new(min(u[0] / self.diffuse_prob, ONE_MINUS_EPSILON), u[1]);
            let mut wi = cosine_sample_hemisphere(&u);
            if wo.z < 0.0 {
                wi.z *= -1.0;
            }
            wi
        } else {
            let u = Point2f::new(
                min(
                    (u[0] - self.diffuse_prob) / (1.0 - self.diffuse_prob),
                    ONE_MINUS_EPSILON,
                ),
                u[1],
            );
            match self.distribution.sample_wi(wo, &u) {
                Some((wi, _)) if same_hemisphere(wo, &wi) => wi,
                _ => return BxDFSample::from(self.get_type()),
            }
        };

        BxDFSample::new(self.f(wo, &wi), self.pdf(wo, &wi), wi, self.get_type())
    }

    /// Evaluates the PDF for the sampling method.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        if !same_hemisphere(wo, wi) {
            return 0.0;
        }
        self.diffuse_prob * abs_cos_theta(wi) * INV_PI
            + (1.0 - self.diffuse_prob) * self.distribution.pdf(wo, wi)
    }
}

/// Probability of sampling the diffuse lobe from the luminances of the two
/// reflectances. Kept away from 0 and 1 so both lobes can be sampled.
///
/// * `rd` - Diffuse reflectance.
/// * `rs` - Specular reflectance.
fn diffuse_probability(rd: &Spectrum, rs: &Spectrum) -> Float {
    let diffuse = max(rd.y(), 0.0) * (1.0 - clamp(rs.y(), 0.0, 1.0));
    let specular = max(rs.y(), 0.0);
    if diffuse + specular <= 0.0 {
        0.5
    } else {
        clamp(diffuse / (diffuse + specular), 0.1, 0.9)
    }
}
