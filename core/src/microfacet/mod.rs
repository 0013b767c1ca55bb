//! Microfacet Distribution Models

use crate::geometry::*;
use crate::pbrt::*;
use crate::reflection::*;

mod anisotropic;
mod blinn;
mod trowbridge_reitz;

// Re-exports
pub use anisotropic::*;
pub use blinn::*;
pub use trowbridge_reitz::*;

/// Interface for microfacet distribution models.
///
/// Half vectors are sampled in the hemisphere of `wo`. The incident
/// direction is the reflection of `wo` about the half vector, so it may land
/// in the opposite hemisphere. Such samples are reported to callers as-is
/// and have to be discarded by them.
pub trait MicrofacetDistribution {
    /// Return the differential area of microfacets oriented with the surface
    /// normal `wh`.
    ///
    /// * `wh` - A sample normal from the distrubition of normal vectors.
    fn d(&self, wh: &Vector3f) -> Float;

    /// Returns a sample from the distribution of normal vectors.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    fn sample_wh(&self, wo: &Vector3f, u: &Point2f) -> Vector3f;

    /// Evaluates the PDF of `sample_wh()` for the given half vector.
    ///
    /// * `wh` - A sample normal from the distrubition of normal vectors.
    fn pdf_wh(&self, wh: &Vector3f) -> Float;

    /// Samples an incident direction by reflecting `wo` about a sampled half
    /// vector. Returns the direction and its PDF or `None` if `wo` lies on
    /// the back side of the sampled microfacet.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    fn sample_wi(&self, wo: &Vector3f, u: &Point2f) -> Option<(Vector3f, Float)> {
        let wh = self.sample_wh(wo, u);
        let wo_dot_wh = wo.dot(&wh);
        if wo_dot_wh <= 0.0 {
            return None;
        }
        let wi = reflect(wo, &wh);
        Some((wi, self.pdf_wh(&wh) / (4.0 * wo_dot_wh)))
    }

    /// Evaluates the PDF of `sample_wi()` for the given pair of directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        let wh = *wo + *wi;
        if wh.length_squared() < EPSILON {
            return 0.0;
        }
        let wh = wh.normalize();
        let wo_dot_wh = wo.dot(&wh);
        if wo_dot_wh <= 0.0 {
            0.0
        } else {
            self.pdf_wh(&wh) / (4.0 * wo_dot_wh)
        }
    }
}

/// The microfacet distributions available to microfacet BxDFs.
#[derive(Copy, Clone, Debug)]
pub enum Distribution {
    Anisotropic(AnisotropicDistribution),
    Blinn(BlinnDistribution),
    TrowbridgeReitz(TrowbridgeReitzDistribution),
}

impl MicrofacetDistribution for Distribution {
    fn d(&self, wh: &Vector3f) -> Float {
        match self {
            Self::Anisotropic(d) => d.d(wh),
            Self::Blinn(d) => d.d(wh),
            Self::TrowbridgeReitz(d) => d.d(wh),
        }
    }

    fn sample_wh(&self, wo: &Vector3f, u: &Point2f) -> Vector3f {
        match self {
            Self::Anisotropic(d) => d.sample_wh(wo, u),
            Self::Blinn(d) => d.sample_wh(wo, u),
            Self::TrowbridgeReitz(d) => d.sample_wh(wo, u),
        }
    }

    fn pdf_wh(&self, wh: &Vector3f) -> Float {
        match self {
            Self::Anisotropic(d) => d.pdf_wh(wh),
            Self::Blinn(d) => d.pdf_wh(wh),
            Self::TrowbridgeReitz(d) => d.pdf_wh(wh),
        }
    }
}

impl From<BlinnDistribution> for Distribution {
    fn from(d: BlinnDistribution) -> Self {
        Self::Blinn(d)
    }
}

impl From<AnisotropicDistribution> for Distribution {
    fn from(d: AnisotropicDistribution) -> Self {
        Self::Anisotropic(d)
    }
}

impl From<TrowbridgeReitzDistribution> for Distribution {
    fn from(d: TrowbridgeReitzDistribution) -> Self {
        Self::TrowbridgeReitz(d)
    }
}
