//! Reflection and surface scattering models

use crate::geometry::*;
use crate::pbrt::*;
use crate::rng::*;
use crate::sampling::*;
use crate::spectrum::*;

mod bsdf;
mod bxdf_sample;
mod bxdf_type;
mod common;
mod fresnel;
mod fresnel_blend;
mod lambertian_reflection;
mod microfacet_reflection;
mod oren_nayar;
mod scaled_bxdf;
mod specular_reflection;
mod specular_transmission;

// Re-export
pub use bsdf::*;
pub use bxdf_sample::*;
pub use bxdf_type::*;
pub use common::*;
pub use fresnel::*;
pub use fresnel_blend::*;
pub use lambertian_reflection::*;
pub use microfacet_reflection::*;
pub use oren_nayar::*;
pub use scaled_bxdf::*;
pub use specular_reflection::*;
pub use specular_transmission::*;

/// BxDF for BRDFs and BTDFs.
///
/// All models are allocated in a per-thread arena and live as long as the
/// evaluation of the ray that created them.
pub enum BxDF<'arena> {
    FresnelBlend(&'arena mut FresnelBlend),
    LambertianReflection(&'arena mut LambertianReflection),
    MicrofacetReflection(&'arena mut MicrofacetReflection),
    OrenNayar(&'arena mut OrenNayar),
    ScaledBxDF(&'arena mut ScaledBxDF<'arena>),
    SpecularReflection(&'arena mut SpecularReflection),
    SpecularTransmission(&'arena mut SpecularTransmission),
}

impl<'arena> BxDF<'arena> {
    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        match self {
            BxDF::FresnelBlend(bxdf) => bxdf.get_type(),
            BxDF::LambertianReflection(bxdf) => bxdf.get_type(),
            BxDF::MicrofacetReflection(bxdf) => bxdf.get_type(),
            BxDF::OrenNayar(bxdf) => bxdf.get_type(),
            BxDF::ScaledBxDF(bxdf) => bxdf.get_type(),
            BxDF::SpecularReflection(bxdf) => bxdf.get_type(),
            BxDF::SpecularTransmission(bxdf) => bxdf.get_type(),
        }
    }

    /// Returns true if every flag of this model is contained in `t`.
    ///
    /// * `t` - The reflection model to compare.
    pub fn matches_flags(&self, t: BxDFType) -> bool {
        t.contains(self.get_type())
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        match self {
            BxDF::FresnelBlend(bxdf) => bxdf.f(wo, wi),
            BxDF::LambertianReflection(bxdf) => bxdf.f(wo, wi),
            BxDF::MicrofacetReflection(bxdf) => bxdf.f(wo, wi),
            BxDF::OrenNayar(bxdf) => bxdf.f(wo, wi),
            BxDF::ScaledBxDF(bxdf) => bxdf.f(wo, wi),
            BxDF::SpecularReflection(bxdf) => bxdf.f(wo, wi),
            BxDF::SpecularTransmission(bxdf) => bxdf.f(wo, wi),
        }
    }

    /// Samples an incident direction for the given outgoing direction.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        debug_assert!(u[0] >= 0.0 && u[0] < 1.0 && u[1] >= 0.0 && u[1] < 1.0);
        match self {
            BxDF::FresnelBlend(bxdf) => bxdf.sample_f(wo, u),
            BxDF::MicrofacetReflection(bxdf) => bxdf.sample_f(wo, u),
            BxDF::ScaledBxDF(bxdf) => bxdf.sample_f(wo, u),
            BxDF::SpecularReflection(bxdf) => bxdf.sample_f(wo, u),
            BxDF::SpecularTransmission(bxdf) => bxdf.sample_f(wo, u),
            _ => {
                // Cosine-sample the hemisphere, flipping the direction if necessary.
                let mut wi = cosine_sample_hemisphere(u);
                if wo.z < 0.0 {
                    wi.z *= -1.0;
                }
                let pdf = self.pdf(wo, &wi);
                BxDFSample::new(self.f(wo, &wi), pdf, wi, self.get_type())
            }
        }
    }

    /// Evaluates the PDF for the sampling method. Default is based on the
    /// cosine-weighted sampling in `BxDF::sample_f()` default implementation.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        match self {
            BxDF::FresnelBlend(bxdf) => bxdf.pdf(wo, wi),
            BxDF::MicrofacetReflection(bxdf) => bxdf.pdf(wo, wi),
            BxDF::ScaledBxDF(bxdf) => bxdf.pdf(wo, wi),
            BxDF::SpecularReflection(bxdf) => bxdf.pdf(wo, wi),
            BxDF::SpecularTransmission(bxdf) => bxdf.pdf(wo, wi),
            _ => {
                if same_hemisphere(wo, wi) {
                    abs_cos_theta(wi) * INV_PI
                } else {
                    0.0
                }
            }
        }
    }

    /// Computes the hemispherical-directional reflectance function ρ, clamped
    /// to [0, 1].
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - Samples used by Monte Carlo algorithm.
    pub fn rho_hd(&self, wo: &Vector3f, u: &[Point2f]) -> Spectrum {
        let r = match self {
            BxDF::LambertianReflection(bxdf) => bxdf.rho_hd(wo, u),
            BxDF::ScaledBxDF(bxdf) => bxdf.rho_hd(wo, u),
            _ => {
                if u.is_empty() {
                    return Spectrum::ZERO;
                }

                let mut r = Spectrum::ZERO;
                for s in u {
                    // Estimate one term of `rho_hd`.
                    let sample = self.sample_f(wo, s);
                    if sample.pdf > 0.0 {
                        r += sample.f * abs_cos_theta(&sample.wi) / sample.pdf;
                    }
                }
                r / u.len() as Float
            }
        };
        r.clamp(0.0, 1.0)
    }

    /// Computes the hemispherical-hemispherical reflectance function ρ,
    /// clamped to [0, 1].
    ///
    /// * `u1` - Samples used to pick outgoing directions.
    /// * `u2` - Samples used to pick incident directions.
    pub fn rho_hh(&self, u1: &[Point2f], u2: &[Point2f]) -> Spectrum {
        debug_assert!(u1.len() == u2.len());
        let r = match self {
            BxDF::LambertianReflection(bxdf) => bxdf.rho_hh(u1, u2),
            BxDF::ScaledBxDF(bxdf) => bxdf.rho_hh(u1, u2),
            _ => {
                if u1.is_empty() {
                    return Spectrum::ZERO;
                }

                let mut r = Spectrum::ZERO;
                for (s1, s2) in u1.iter().zip(u2.iter()) {
                    // Estimate one term of `rho_hh`.
                    let wo = uniform_sample_hemisphere(s1);
                    let pdfo = uniform_hemisphere_pdf();
                    let sample = self.sample_f(&wo, s2);
                    let pdfi = sample.pdf;
                    if pdfi > 0.0 {
                        r += sample.f * abs_cos_theta(&sample.wi) * abs_cos_theta(&wo)
                            / (pdfo * pdfi);
                    }
                }
                r / (PI * u1.len() as Float)
            }
        };
        r.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::microfacet::*;
    use bumpalo::Bump;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    fn upper_hemisphere(u: &Point2f) -> Vector3f {
        let mut w = uniform_sample_hemisphere(u);
        // Stay away from the horizon.
        w.z = max(w.z, 0.05);
        w.normalize()
    }

    fn all_bxdfs(arena: &Bump) -> Vec<&mut BxDF<'_>> {
        let r = Spectrum::rgb(0.8, 0.5, 0.2);
        vec![
            LambertianReflection::alloc(arena, r),
            OrenNayar::alloc(arena, r, 20.0),
            MicrofacetReflection::alloc(
                arena,
                r,
                BlinnDistribution::new(25.0).into(),
                Fresnel::Dielectric {
                    eta_i: 1.0,
                    eta_t: 1.5,
                },
            ),
            MicrofacetReflection::alloc(
                arena,
                r,
                AnisotropicDistribution::new(10.0, 40.0).into(),
                Fresnel::Conductor {
                    eta: Spectrum::rgb(0.2, 0.9, 1.1),
                    k: Spectrum::rgb(3.9, 2.4, 2.2),
                },
            ),
            FresnelBlend::alloc(
                arena,
                r,
                Spectrum::new(0.04),
                BlinnDistribution::new(30.0).into(),
            ),
        ]
    }

    /// Integrates the PDF over the sphere with uniform sampling.
    fn integrate_pdf(bxdf: &BxDF, wo: &Vector3f, n: usize) -> Float {
        let mut rng = RNG::new(101);
        let mut sum = 0.0;
        for _ in 0..n {
            let u = Point2f::new(rng.uniform_float(), rng.uniform_float());
            let wi = uniform_sample_sphere(&u);
            sum += bxdf.pdf(wo, &wi) / uniform_sphere_pdf();
        }
        sum / n as Float
    }

    proptest! {
        #[test]
        fn non_specular_bxdfs_are_reciprocal(
            u1 in (0.0..1.0, 0.0..1.0),
            u2 in (0.0..1.0, 0.0..1.0),
        ) {
            let arena = Bump::new();
            let wo = upper_hemisphere(&Point2f::new(u1.0, u1.1));
            let wi = upper_hemisphere(&Point2f::new(u2.0, u2.1));
            for bxdf in all_bxdfs(&arena) {
                let a = bxdf.f(&wo, &wi);
                let b = bxdf.f(&wi, &wo);
                for c in 0..3 {
                    prop_assert!(
                        (a[c] - b[c]).abs() <= 1e-9 * max(1.0, a[c].abs()),
                        "f(wo, wi) = {} != f(wi, wo) = {}", a, b
                    );
                }
            }
        }

        #[test]
        fn sampled_pdf_matches_pdf(
            u1 in (0.0..1.0, 0.0..1.0),
            u2 in (0.0..1.0, 0.0..1.0),
        ) {
            let arena = Bump::new();
            let wo = upper_hemisphere(&Point2f::new(u1.0, u1.1));
            let u = Point2f::new(u2.0, u2.1);
            for bxdf in all_bxdfs(&arena) {
                let sample = bxdf.sample_f(&wo, &u);
                if sample.pdf > 0.0 {
                    let pdf = bxdf.pdf(&wo, &sample.wi);
                    prop_assert!(
                        (sample.pdf - pdf).abs() <= 1e-5 * max(sample.pdf, pdf),
                        "sampled pdf {} != pdf {}", sample.pdf, pdf
                    );
                }
            }
        }

        #[test]
        fn total_scattering_is_bounded(
            rd in (0.0..1.0, 0.0..1.0, 0.0..1.0),
            rs in 0.0..1.0,
            exponent in 1.0..200.0,
            u in (0.0..1.0, 0.0..1.0),
        ) {
            let arena = Bump::new();
            let bxdf = FresnelBlend::alloc(
                &arena,
                Spectrum::rgb(rd.0, rd.1, rd.2),
                Spectrum::new(rs),
                BlinnDistribution::new(exponent).into(),
            );
            let mut rng = RNG::new(3);
            let samples = latin_hypercube_2d(&mut rng, 64);
            let wo = upper_hemisphere(&Point2f::new(u.0, u.1));
            let rho = bxdf.rho_hd(&wo, &samples);
            for c in 0..3 {
                prop_assert!(rho[c] >= 0.0 && rho[c] <= 1.0);
            }
        }
    }

    #[test]
    fn lambertian_pdf_is_normalized() {
        let arena = Bump::new();
        let bxdf = LambertianReflection::alloc(&arena, Spectrum::new(0.5));
        let integral = integrate_pdf(bxdf, &Vector3f::new(0.0, 0.6, 0.8), 200_000);
        assert!((integral - 1.0).abs() < 0.01, "integral = {}", integral);
    }

    #[test]
    fn microfacet_pdf_integrates_close_to_one() {
        let arena = Bump::new();
        let bxdf = MicrofacetReflection::alloc(
            &arena,
            Spectrum::ONE,
            BlinnDistribution::new(10.0).into(),
            Fresnel::NoOp,
        );
        // Half vectors that reflect wo below the horizon are discarded, which
        // loses about 9% of the mass for this lobe.
        let integral = integrate_pdf(bxdf, &Vector3f::new(0.6, 0.0, 0.8), 400_000);
        assert!((integral - 0.914).abs() < 0.02, "integral = {}", integral);
    }

    #[test]
    fn fresnel_blend_pdf_integrates_close_to_one() {
        let arena = Bump::new();
        let bxdf = FresnelBlend::alloc(
            &arena,
            Spectrum::new(0.5),
            Spectrum::new(0.3),
            BlinnDistribution::new(10.0).into(),
        );
        // Only the glossy lobe loses mass, weighted by its selection
        // probability of 0.46.
        let integral = integrate_pdf(bxdf, &Vector3f::new(0.6, 0.0, 0.8), 400_000);
        assert!((integral - 0.961).abs() < 0.02, "integral = {}", integral);
    }

    #[test]
    fn lambertian_reflectance_is_exact() {
        let arena = Bump::new();
        let r = Spectrum::rgb(0.1, 0.2, 0.3);
        let bxdf = LambertianReflection::alloc(&arena, r);
        let u = [Point2f::new(0.5, 0.5)];
        assert_eq!(bxdf.rho_hd(&Vector3f::new(0.0, 0.0, 1.0), &u), r);
        assert_eq!(bxdf.rho_hh(&u, &u), r);
        assert_eq!(bxdf.f(&Vector3f::new(0.0, 0.0, 1.0), &Vector3f::new(0.0, 0.0, 1.0)), r * INV_PI);
    }

    #[test]
    fn oren_nayar_without_roughness_is_lambertian() {
        let arena = Bump::new();
        let r = Spectrum::new(0.7);
        let bxdf = OrenNayar::alloc(&arena, r, 0.0);
        let wo = Vector3f::new(0.3, 0.4, 0.866).normalize();
        let wi = Vector3f::new(-0.5, 0.1, 0.7).normalize();
        let f = bxdf.f(&wo, &wi);
        assert!(approx_eq!(Float, f[0], 0.7 * INV_PI, epsilon = 1e-12));
    }

    #[test]
    fn specular_reflection_mirrors_with_unit_pdf() {
        let arena = Bump::new();
        let bxdf = SpecularReflection::alloc(&arena, Spectrum::ONE, Fresnel::NoOp);
        let wo = Vector3f::new(0.3, -0.4, 0.5).normalize();
        let sample = bxdf.sample_f(&wo, &Point2f::new(0.5, 0.5));
        assert_eq!(sample.wi, Vector3f::new(-wo.x, -wo.y, wo.z));
        assert_eq!(sample.pdf, 1.0);
        assert!(approx_eq!(Float, sample.f[0], 1.0 / wo.z, ulps = 4));
        assert_eq!(bxdf.pdf(&wo, &sample.wi), 0.0);
        assert!(bxdf.f(&wo, &sample.wi).is_black());
        assert!(sample.bxdf_type.is_specular());
    }

    #[test]
    fn specular_transmission_refracts_at_normal_incidence() {
        let arena = Bump::new();
        let bxdf = SpecularTransmission::alloc(&arena, Spectrum::ONE, 1.0, 1.5);
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let sample = bxdf.sample_f(&wo, &Point2f::new(0.5, 0.5));
        assert_eq!(sample.pdf, 1.0);
        assert!(approx_eq!(Float, sample.wi.z, -1.0, ulps = 4));
        // Reflectance at normal incidence from air into glass is 0.04.
        let expected = (1.0 / 1.5) * (1.0 / 1.5) * (1.0 - 0.04);
        assert!(approx_eq!(Float, sample.f[1], expected, epsilon = 1e-12));
        assert_eq!(bxdf.pdf(&wo, &sample.wi), 0.0);
    }

    #[test]
    fn specular_transmission_beyond_critical_angle_is_black() {
        let arena = Bump::new();
        let bxdf = SpecularTransmission::alloc(&arena, Spectrum::ONE, 1.0, 1.5);
        // Leaving glass at a grazing angle.
        let wo = Vector3f::new(0.9, 0.0, -(1.0 - 0.81 as Float).sqrt());
        let sample = bxdf.sample_f(&wo, &Point2f::new(0.25, 0.75));
        assert!(sample.f.is_black());
        assert_eq!(sample.pdf, 1.0);
        assert_eq!(sample.wi, Vector3f::new(-wo.x, -wo.y, wo.z));
    }

    #[test]
    fn microfacet_degenerate_half_vector_is_black() {
        let arena = Bump::new();
        let bxdf = MicrofacetReflection::alloc(
            &arena,
            Spectrum::ONE,
            BlinnDistribution::new(10.0).into(),
            Fresnel::NoOp,
        );
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let wi = Vector3f::new(1.0, 0.0, 0.0);
        assert!(bxdf.f(&wo, &wi).is_black());
        assert!(bxdf.f(&wo, &-wo).is_black());
    }

    #[test]
    fn fresnel_blend_sampling_agrees_with_total_scattering() {
        let arena = Bump::new();
        let bxdf = FresnelBlend::alloc(
            &arena,
            Spectrum::rgb(0.6, 0.4, 0.2),
            Spectrum::new(0.05),
            BlinnDistribution::new(20.0).into(),
        );
        let wo = Vector3f::new(0.3, 0.2, 0.9).normalize();
        let n = 1_000_000;

        let mut rng = RNG::new(7);
        let mut sum = Spectrum::ZERO;
        for _ in 0..n {
            let u = Point2f::new(rng.uniform_float(), rng.uniform_float());
            let sample = bxdf.sample_f(&wo, &u);
            if sample.pdf > 0.0 {
                sum += bxdf.f(&wo, &sample.wi) * abs_cos_theta(&sample.wi) / sample.pdf;
            }
        }
        let mean = sum / n as Float;

        let mut rng = RNG::new(11);
        let samples = latin_hypercube_2d(&mut rng, n);
        let rho = bxdf.rho_hd(&wo, &samples);

        for c in 0..3 {
            assert!(
                (mean[c] - rho[c]).abs() <= 0.03 * rho[c],
                "mean {} vs rho {}",
                mean,
                rho
            );
            assert!(mean[c] <= 1.0);
        }
    }
}
