//! Specular Reflection

use super::*;
use bumpalo::Bump;

/// BRDF for physically plausible specular reflection using a Fresnel
/// interface.
pub struct SpecularReflection {
    /// Scales the reflected color.
    r: Spectrum,

    /// Fresnel interface for dielectrics and conductors.
    fresnel: Fresnel,
}

impl SpecularReflection {
    /// Allocate a new instance of `SpecularReflection`.
    ///
    /// * `arena`   - The arena for memory allocations.
    /// * `r`       - Scales the reflected color.
    /// * `fresnel` - Fresnel interface for dielectrics and conductors.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc<'arena>(arena: &'arena Bump, r: Spectrum, fresnel: Fresnel) -> &'arena mut BxDF<'arena> {
        let model = arena.alloc(Self { r, fresnel });
        arena.alloc(BxDF::SpecularReflection(model))
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_REFLECTION | BxDFType::BSDF_SPECULAR
    }

    /// No scattering is returned from `f()` since the delta distribution has
    /// no pointwise value.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, _wo: &Vector3f, _wi: &Vector3f) -> Spectrum {
        Spectrum::ZERO
    }

    /// Returns the mirror direction of `wo` with PDF 1.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, _u: &Point2f) -> BxDFSample {
        let wi = Vector3f::new(-wo.x, -wo.y, wo.z);
        let cos_theta_i = abs_cos_theta(&wi);
        let f = if cos_theta_i < EPSILON {
            Spectrum::ZERO
        } else {
            self.fresnel.evaluate(cos_theta(&wi)) * self.r / cos_theta_i
        };
        BxDFSample::new(f, 1.0, wi, self.get_type())
    }

    /// Returns 0 since the mirror direction has zero measure.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, _wo: &Vector3f, _wi: &Vector3f) -> Float {
        0.0
    }
}
