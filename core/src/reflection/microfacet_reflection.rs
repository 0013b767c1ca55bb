//! Torrance-Sparrow Microfacet Reflection Model

use super::*;
use crate::microfacet::*;
use bumpalo::Bump;

/// BRDF for modeling glossy surfaces using a microfacet distribution.
pub struct MicrofacetReflection {
    /// Reflectance spectrum which gives the fraction of incident light that
    /// is scattered.
    r: Spectrum,

    /// The microfacet distribution model.
    distribution: Distribution,

    /// Fresnel interface for dielectrics and conductors.
    fresnel: Fresnel,
}

impl MicrofacetReflection {
    /// Allocate a new instance of `MicrofacetReflection`.
    ///
    /// * `arena`        - The arena for memory allocations.
    /// * `r`            - Reflectance spectrum which gives the fraction of
    ///                    incident light that is scattered.
    /// * `distribution` - Microfacet distribution.
    /// * `fresnel`      - Fresnel interface for dielectrics and conductors.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc<'arena>(
        arena: &'arena Bump,
        r: Spectrum,
        distribution: Distribution,
        fresnel: Fresnel,
    ) -> &'arena mut BxDF<'arena> {
        let model = arena.alloc(Self {
            r,
            distribution,
            fresnel,
        });
        arena.alloc(BxDF::MicrofacetReflection(model))
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_REFLECTION | BxDFType::BSDF_GLOSSY
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        let cos_theta_o = abs_cos_theta(wo);
        let cos_theta_i = abs_cos_theta(wi);
        if cos_theta_i < EPSILON || cos_theta_o < EPSILON {
            return Spectrum::ZERO;
        }

        // Handle degenerate cases for microfacet reflection.
        let wh = *wi + *wo;
        if wh.length_squared() < EPSILON {
            return Spectrum::ZERO;
        }
        let wh = wh.normalize();

        let cos_theta_h = wi.dot(&wh);
        let fresnel = self.fresnel.evaluate(cos_theta_h);
        self.r * self.distribution.d(&wh) * self.g(wo, wi, &wh) * fresnel
            / (4.0 * cos_theta_i * cos_theta_o)
    }

    /// Samples the microfacet distribution for an incident direction.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        match self.distribution.sample_wi(wo, u) {
            Some((wi, pdf)) if same_hemisphere(wo, &wi) => {
                BxDFSample::new(self.f(wo, &wi), pdf, wi, self.get_type())
            }
            _ => BxDFSample::from(self.get_type()),
        }
    }

    /// Evaluates the PDF for the sampling method.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        if !same_hemisphere(wo, wi) {
            0.0
        } else {
            self.distribution.pdf(wo, wi)
        }
    }

    /// Torrance-Sparrow V-cavity geometric attenuation term.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    /// * `wh` - Half vector.
    fn g(&self, wo: &Vector3f, wi: &Vector3f, wh: &Vector3f) -> Float {
        let n_dot_wh = abs_cos_theta(wh);
        let n_dot_wo = abs_cos_theta(wo);
        let n_dot_wi = abs_cos_theta(wi);
        let wo_dot_wh = wo.dot(wh).abs();
        if wo_dot_wh < EPSILON {
            return 0.0;
        }
        min(
            1.0,
            min(
                2.0 * n_dot_wh * n_dot_wo / wo_dot_wh,
                2.0 * n_dot_wh * n_dot_wi / wo_dot_wh,
            ),
        )
    }
}
