//! Lambertian Reflection

use super::*;
use bumpalo::Bump;

/// BRDF for the Lambertian model for perfect diffuse surfaces that scatters
/// incident illumination equally in all directions.
pub struct LambertianReflection {
    /// Reflectance spectrum which gives the fraction of incident light that
    /// is scattered.
    r: Spectrum,
}

impl LambertianReflection {
    /// Allocate a new instance of `LambertianReflection`.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `r`     - Reflectance spectrum which gives the fraction of incident
    ///             light that is scattered.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc<'arena>(arena: &'arena Bump, r: Spectrum) -> &'arena mut BxDF<'arena> {
        let model = arena.alloc(Self { r });
        arena.alloc(BxDF::LambertianReflection(model))
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_REFLECTION | BxDFType::BSDF_DIFFUSE
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, _wo: &Vector3f, _wi: &Vector3f) -> Spectrum {
        self.r * INV_PI
    }

    /// Computes the hemispherical-directional reflectance function ρ.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - Samples used by Monte Carlo algorithm.
    pub fn rho_hd(&self, _wo: &Vector3f, _u: &[Point2f]) -> Spectrum {
        self.r
    }

    /// Computes the hemispherical-hemispherical reflectance function ρ.
    ///
    /// * `u1` - Samples used by Monte Carlo algorithm.
    /// * `u2` - Samples used by Monte Carlo algorithm.
    pub fn rho_hh(&self, u1: &[Point2f], u2: &[Point2f]) -> Spectrum {
        debug_assert!(u1.len() == u2.len());
        self.r
    }
}
