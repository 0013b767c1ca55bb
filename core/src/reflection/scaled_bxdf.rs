//! Scaled BxDF

use super::*;
use bumpalo::Bump;

/// Wraps a `BxDF` and scales its contribution by a `Spectrum` value.
pub struct ScaledBxDF<'arena> {
    /// The wrapped `BxDF`.
    bxdf: &'arena BxDF<'arena>,

    /// Scale factor.
    scale: Spectrum,
}

impl<'arena> ScaledBxDF<'arena> {
    /// Allocate a new instance of `ScaledBxDF`.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `bxdf`  - The wrapped `BxDF`.
    /// * `scale` - Scale factor.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc(
        arena: &'arena Bump,
        bxdf: &'arena BxDF<'arena>,
        scale: Spectrum,
    ) -> &'arena mut BxDF<'arena> {
        let model = arena.alloc(Self { bxdf, scale });
        arena.alloc(BxDF::ScaledBxDF(model))
    }

    /// Returns the BxDF type of the wrapped `BxDF`.
    pub fn get_type(&self) -> BxDFType {
        self.bxdf.get_type()
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        self.scale * self.bxdf.f(wo, wi)
    }

    /// Samples the wrapped `BxDF` and scales the result.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        let mut sample = self.bxdf.sample_f(wo, u);
        sample.f *= self.scale;
        sample
    }

    /// Evaluates the PDF of the wrapped `BxDF`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        self.bxdf.pdf(wo, wi)
    }

    /// Computes the hemispherical-directional reflectance function ρ.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - Samples used by Monte Carlo algorithm.
    pub fn rho_hd(&self, wo: &Vector3f, u: &[Point2f]) -> Spectrum {
        self.scale * self.bxdf.rho_hd(wo, u)
    }

    /// Computes the hemispherical-hemispherical reflectance function ρ.
    ///
    /// * `u1` - Samples used by Monte Carlo algorithm.
    /// * `u2` - Samples used by Monte Carlo algorithm.
    pub fn rho_hh(&self, u1: &[Point2f], u2: &[Point2f]) -> Spectrum {
        self.scale * self.bxdf.rho_hh(u1, u2)
    }
}
