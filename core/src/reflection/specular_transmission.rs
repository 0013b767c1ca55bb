//! Specular Transmission

use super::*;
use bumpalo::Bump;
use std::mem::swap;

/// BTDF for specular transmission through a dielectric interface.
pub struct SpecularTransmission {
    /// Transmission scale factor.
    t: Spectrum,

    /// Index of refraction above the surface (same side as surface normal).
    eta_a: Float,

    /// Index of refraction below the surface (opposite side as surface normal).
    eta_b: Float,
}

impl SpecularTransmission {
    /// Allocate a new instance of `SpecularTransmission`.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `t`     - Transmission scale factor.
    /// * `eta_a` - Index of refraction above the surface.
    /// * `eta_b` - Index of refraction below the surface.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc<'arena>(
        arena: &'arena Bump,
        t: Spectrum,
        eta_a: Float,
        eta_b: Float,
    ) -> &'arena mut BxDF<'arena> {
        debug_assert!(eta_a > 0.0 && eta_b > 0.0);
        let model = arena.alloc(Self { t, eta_a, eta_b });
        arena.alloc(BxDF::SpecularTransmission(model))
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_TRANSMISSION | BxDFType::BSDF_SPECULAR
    }

    /// No scattering is returned from `f()` since the delta distribution has
    /// no pointwise value.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, _wo: &Vector3f, _wi: &Vector3f) -> Spectrum {
        Spectrum::ZERO
    }

    /// Returns the refracted direction of `wo` with PDF 1. Beyond the
    /// critical angle the mirror direction is returned with a zero value.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, _u: &Point2f) -> BxDFSample {
        // Figure out which η is incident and which is transmitted.
        let entering = cos_theta(wo) > 0.0;
        let (mut eta_i, mut eta_t) = (self.eta_a, self.eta_b);
        if !entering {
            swap(&mut eta_i, &mut eta_t);
        }

        // Compute transmitted ray direction.
        let eta = eta_i / eta_t;
        let sin2_theta_t = eta * eta * sin_2_theta(wo);
        if sin2_theta_t >= 1.0 {
            // Total internal reflection.
            let wi = Vector3f::new(-wo.x, -wo.y, wo.z);
            return BxDFSample::new(Spectrum::ZERO, 1.0, wi, self.get_type());
        }

        let cos_theta_t = (1.0 - sin2_theta_t).sqrt();
        let wi = Vector3f::new(
            -eta * wo.x,
            -eta * wo.y,
            if entering { -cos_theta_t } else { cos_theta_t },
        );
        if cos_theta_t < EPSILON {
            return BxDFSample::new(Spectrum::ZERO, 1.0, wi, self.get_type());
        }

        let fresnel = fr_dielectric(cos_theta(wo), self.eta_a, self.eta_b);
        let f = self.t * (eta * eta) * (1.0 - fresnel) / cos_theta_t;
        BxDFSample::new(f, 1.0, wi, self.get_type())
    }

    /// Returns 0 since the refracted direction has zero measure.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, _wo: &Vector3f, _wi: &Vector3f) -> Float {
        0.0
    }
}
