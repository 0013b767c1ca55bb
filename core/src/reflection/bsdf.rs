//! BSDF

use super::*;
use bumpalo::Bump;

/// Maximum number of BxDFs that can be stored in `BSDF`.
pub const MAX_BXDFS: usize = 8;

/// BSDF interface represents a collection of BRDFs and BTDFs.
pub struct BSDF<'arena> {
    /// The shading normal given by per-vertex normals and/or bump mapping.
    /// It is the first axis in the orthonormal coordinate system and also
    /// used to define hemispheres for integrating incident illumincation for
    /// surface reflection.
    pub ns: Normal3f,

    /// The geometric normal defined by surface geometry.
    pub ng: Normal3f,

    /// Second axis for the orthonormal coordinate system.
    pub ss: Vector3f,

    /// Third axis for the orthonormal coordinate system.
    pub ts: Vector3f,

    /// The `BxDFs`.
    bxdfs: [Option<&'arena BxDF<'arena>>; MAX_BXDFS],

    /// Number of `BxDFs` added.
    n_bxdfs: usize,
}

impl<'arena> BSDF<'arena> {
    /// Creates a new `BSDF`.
    ///
    /// * `dg` - The differential geometry at the point on a surface.
    pub fn new(dg: &DifferentialGeometry) -> Self {
        let ns = dg.shading_normal;
        let ss = dg.tangent;
        Self {
            ns,
            ng: dg.geometric_normal,
            ss,
            ts: Vector3f::from(ns).cross(&ss),
            bxdfs: [None; MAX_BXDFS],
            n_bxdfs: 0,
        }
    }

    /// Allocate a new `BSDF` in the arena.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `dg`    - The differential geometry at the point on a surface.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc(arena: &'arena Bump, dg: &DifferentialGeometry) -> &'arena mut BSDF<'arena> {
        arena.alloc(Self::new(dg))
    }

    /// Builds a BSDF that weights the components of `a` by `scale` and the
    /// components of `b` by `1 - scale`. The result uses the shading frame of
    /// `a`.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `a`     - First BSDF.
    /// * `b`     - Second BSDF.
    /// * `scale` - Weight of the first BSDF.
    #[allow(clippy::mut_from_ref)]
    pub fn mix(
        arena: &'arena Bump,
        a: &BSDF<'arena>,
        b: &BSDF<'arena>,
        scale: Spectrum,
    ) -> &'arena mut BSDF<'arena> {
        let bsdf = arena.alloc(Self {
            ns: a.ns,
            ng: a.ng,
            ss: a.ss,
            ts: a.ts,
            bxdfs: [None; MAX_BXDFS],
            n_bxdfs: 0,
        });
        for bxdf in a.components() {
            bsdf.add(ScaledBxDF::alloc(arena, bxdf, scale));
        }
        let inv_scale = Spectrum::ONE - scale;
        for bxdf in b.components() {
            bsdf.add(ScaledBxDF::alloc(arena, bxdf, inv_scale));
        }
        bsdf
    }

    /// Add a `BxDF`.
    ///
    /// * `bxdf` - The `BxDF`.
    pub fn add(&mut self, bxdf: &'arena BxDF<'arena>) {
        debug_assert!(
            self.n_bxdfs < MAX_BXDFS,
            "Cannot add BxDFs. BSDF maximum limit {} reached.",
            MAX_BXDFS
        );
        if self.n_bxdfs < MAX_BXDFS {
            self.bxdfs[self.n_bxdfs] = Some(bxdf);
            self.n_bxdfs += 1;
        }
    }

    /// Returns an iterator over the stored `BxDF`s.
    pub fn components(&self) -> impl Iterator<Item = &'arena BxDF<'arena>> + '_ {
        self.bxdfs[..self.n_bxdfs].iter().flatten().copied()
    }

    /// Returns the number of `BxDF`s that match the given type.
    ///
    /// * `bxdf_type` - The `BxdFType` to match.
    pub fn num_components(&self, bxdf_type: BxDFType) -> usize {
        self.components()
            .filter(|b| b.matches_flags(bxdf_type))
            .count()
    }

    /// Transforms a vector from world space to local space.
    ///
    /// * `v` - The vector to transform.
    pub fn world_to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.ss), v.dot(&self.ts), v.dot(&self.ns))
    }

    /// Transforms a vector from local space to world space.
    ///
    /// * `v` - The vector to transform.
    pub fn local_to_world(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(
            self.ss.x * v.x + self.ts.x * v.y + self.ns.x * v.z,
            self.ss.y * v.x + self.ts.y * v.y + self.ns.y * v.z,
            self.ss.z * v.x + self.ts.z * v.y + self.ns.z * v.z,
        )
    }

    /// Returns the flags that restrict evaluation to reflection or
    /// transmission depending on which sides of the geometric surface the
    /// two directions lie.
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `wi_w`      - Incident direction in world-space.
    /// * `bxdf_type` - The `BxdFType` to evaluate.
    fn side_flags(&self, wo_w: &Vector3f, wi_w: &Vector3f, bxdf_type: BxDFType) -> BxDFType {
        if wi_w.dot(&self.ng) * wo_w.dot(&self.ng) > 0.0 {
            // Ignore BTDFs.
            bxdf_type - BxDFType::BSDF_TRANSMISSION
        } else {
            // Ignore BRDFs.
            bxdf_type - BxDFType::BSDF_REFLECTION
        }
    }

    /// Returns the BSDF evaluated for a pair of directions.
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `wi_w`      - Incident direction in world-space.
    /// * `bxdf_type` - The `BxdFType` to evaluate.
    pub fn f(&self, wo_w: &Vector3f, wi_w: &Vector3f, bxdf_type: BxDFType) -> Spectrum {
        let wo = self.world_to_local(wo_w);
        let wi = self.world_to_local(wi_w);
        if wo.z == 0.0 {
            return Spectrum::ZERO;
        }

        let flags = self.side_flags(wo_w, wi_w, bxdf_type);
        self.components()
            .filter(|b| b.matches_flags(flags))
            .fold(Spectrum::ZERO, |f, b| f + b.f(&wo, &wi))
    }

    /// Samples an incident direction for the given outgoing direction. One
    /// matching component is chosen uniformly with `u_component`.
    ///
    /// * `wo_w`        - Outgoing direction in world-space.
    /// * `u`           - The 2D uniform random values for the component.
    /// * `u_component` - The uniform random value used to pick a component.
    /// * `bxdf_type`   - The `BxdFType` to sample.
    pub fn sample_f(
        &self,
        wo_w: &Vector3f,
        u: &Point2f,
        u_component: Float,
        bxdf_type: BxDFType,
    ) -> BxDFSample {
        debug_assert!((0.0..1.0).contains(&u_component));

        // Choose which BxDF to sample.
        let matching_comps = self.num_components(bxdf_type);
        if matching_comps == 0 {
            return BxDFSample::default();
        }
        let comp = min(
            (u_component * matching_comps as Float).floor() as usize,
            matching_comps - 1,
        );
        let bxdf = match self
            .components()
            .filter(|b| b.matches_flags(bxdf_type))
            .nth(comp)
        {
            Some(bxdf) => bxdf,
            None => return BxDFSample::default(),
        };

        // Sample chosen `BxDF`.
        let wo = self.world_to_local(wo_w);
        if wo.z == 0.0 {
            return BxDFSample::default();
        }

        let sampled_type = bxdf.get_type();
        let sample = bxdf.sample_f(&wo, u);
        if sample.pdf == 0.0 {
            return BxDFSample::from(sampled_type);
        }
        let wi_w = self.local_to_world(&sample.wi);

        // Specular components are returned as they are.
        if sampled_type.is_specular() {
            let pdf = sample.pdf / matching_comps as Float;
            return BxDFSample::new(sample.f, pdf, wi_w, sampled_type);
        }

        // Compute overall PDF with all matching BxDFs.
        let mut pdf = sample.pdf;
        if matching_comps > 1 {
            pdf += self
                .components()
                .filter(|b| !std::ptr::eq(*b, bxdf) && b.matches_flags(bxdf_type))
                .map(|b| b.pdf(&wo, &sample.wi))
                .sum::<Float>();
            pdf /= matching_comps as Float;
        }

        // Compute value of BSDF for sampled direction.
        let flags = self.side_flags(wo_w, &wi_w, bxdf_type);
        let f = self
            .components()
            .filter(|b| b.matches_flags(flags))
            .fold(Spectrum::ZERO, |f, b| f + b.f(&wo, &sample.wi));

        BxDFSample::new(f, pdf, wi_w, sampled_type)
    }

    /// Evaluates the PDF of `sample_f()` averaged over the matching
    /// components.
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `wi_w`      - Incident direction in world-space.
    /// * `bxdf_type` - The `BxdFType` to evaluate.
    pub fn pdf(&self, wo_w: &Vector3f, wi_w: &Vector3f, bxdf_type: BxDFType) -> Float {
        let wo = self.world_to_local(wo_w);
        let wi = self.world_to_local(wi_w);
        if wo.z == 0.0 {
            return 0.0;
        }

        let (matching_comps, pdf) = self
            .components()
            .filter(|b| b.matches_flags(bxdf_type))
            .fold((0, 0.0), |(n, pdf), b| (n + 1, pdf + b.pdf(&wo, &wi)));
        if matching_comps > 0 {
            pdf / matching_comps as Float
        } else {
            0.0
        }
    }

    /// Computes the hemispherical-directional reflectance function ρ using
    /// Latin hypercube samples, clamped to [0, 1].
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `n_samples` - Number of samples.
    /// * `bxdf_type` - The `BxdFType` to evaluate.
    /// * `rng`       - Random number generator.
    pub fn rho_hd(
        &self,
        wo_w: &Vector3f,
        n_samples: usize,
        bxdf_type: BxDFType,
        rng: &mut RNG,
    ) -> Spectrum {
        let wo = self.world_to_local(wo_w);
        let samples = latin_hypercube_2d(rng, n_samples);
        self.components()
            .filter(|b| b.matches_flags(bxdf_type))
            .fold(Spectrum::ZERO, |r, b| r + b.rho_hd(&wo, &samples))
            .clamp(0.0, 1.0)
    }

    /// Computes the hemispherical-hemispherical reflectance function ρ using
    /// Latin hypercube samples, clamped to [0, 1].
    ///
    /// * `n_samples` - Number of samples.
    /// * `bxdf_type` - The `BxdFType` to evaluate.
    /// * `rng`       - Random number generator.
    pub fn rho_hh(&self, n_samples: usize, bxdf_type: BxDFType, rng: &mut RNG) -> Spectrum {
        let u1 = latin_hypercube_2d(rng, n_samples);
        let u2 = latin_hypercube_2d(rng, n_samples);
        self.components()
            .filter(|b| b.matches_flags(bxdf_type))
            .fold(Spectrum::ZERO, |r, b| r + b.rho_hh(&u1, &u2))
            .clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::microfacet::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    fn tilted_geometry() -> DifferentialGeometry {
        let n = Normal3f::new(0.2, 0.3, 0.9).normalize();
        DifferentialGeometry::from_normal(Point3f::zero(), n)
    }

    fn glossy_bsdf<'a>(arena: &'a Bump, dg: &DifferentialGeometry) -> &'a mut BSDF<'a> {
        let bsdf = BSDF::alloc(arena, dg);
        bsdf.add(LambertianReflection::alloc(arena, Spectrum::new(0.3)));
        bsdf.add(MicrofacetReflection::alloc(
            arena,
            Spectrum::new(0.5),
            BlinnDistribution::new(20.0).into(),
            Fresnel::NoOp,
        ));
        bsdf
    }

    #[test]
    fn frame_is_orthonormal() {
        let bsdf = BSDF::new(&tilted_geometry());
        let n = Vector3f::from(bsdf.ns);
        assert!(approx_eq!(Float, bsdf.ss.dot(&bsdf.ts), 0.0, epsilon = 1e-12));
        assert!(approx_eq!(Float, bsdf.ss.dot(&n), 0.0, epsilon = 1e-12));
        assert!(approx_eq!(Float, bsdf.ts.length(), 1.0, epsilon = 1e-12));
        let v = Vector3f::new(0.1, -0.7, 0.4);
        let back = bsdf.local_to_world(&bsdf.world_to_local(&v));
        assert!(approx_eq!(Float, (back - v).length(), 0.0, epsilon = 1e-12));
    }

    #[test]
    fn component_counts_follow_flags() {
        let arena = Bump::new();
        let bsdf = glossy_bsdf(&arena, &tilted_geometry());
        bsdf.add(SpecularReflection::alloc(&arena, Spectrum::ONE, Fresnel::NoOp));
        assert_eq!(bsdf.num_components(BxDFType::BSDF_ALL), 3);
        assert_eq!(
            bsdf.num_components(BxDFType::BSDF_ALL - BxDFType::BSDF_SPECULAR),
            2
        );
        assert_eq!(
            bsdf.num_components(BxDFType::BSDF_REFLECTION | BxDFType::BSDF_SPECULAR),
            1
        );
        assert_eq!(bsdf.num_components(BxDFType::BSDF_TRANSMISSION), 0);
    }

    #[test]
    fn transmission_is_ignored_on_the_same_side() {
        let arena = Bump::new();
        let dg = DifferentialGeometry::from_normal(Point3f::zero(), Normal3f::new(0.0, 0.0, 1.0));
        let bsdf = BSDF::alloc(&arena, &dg);
        bsdf.add(LambertianReflection::alloc(&arena, Spectrum::new(0.5)));
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let above = Vector3f::new(0.0, 0.6, 0.8);
        let below = Vector3f::new(0.0, 0.6, -0.8);
        assert!(!bsdf.f(&wo, &above, BxDFType::BSDF_ALL).is_black());
        assert!(bsdf.f(&wo, &below, BxDFType::BSDF_ALL).is_black());
    }

    proptest! {
        #[test]
        fn sampled_pdf_matches_pdf(
            u in (0.0..1.0, 0.0..1.0),
            uc in 0.0..1.0,
            w in (-1.0..1.0, -1.0..1.0),
        ) {
            let arena = Bump::new();
            let dg = tilted_geometry();
            let bsdf = glossy_bsdf(&arena, &dg);
            let n = Vector3f::from(dg.shading_normal);
            let wo = (n + Vector3f::new(w.0, w.1, 0.0) * 0.5).normalize();
            let sample = bsdf.sample_f(&wo, &Point2f::new(u.0, u.1), uc, BxDFType::BSDF_ALL);
            if sample.pdf > 0.0 {
                let pdf = bsdf.pdf(&wo, &sample.wi, BxDFType::BSDF_ALL);
                prop_assert!(
                    (sample.pdf - pdf).abs() <= 1e-5 * max(sample.pdf, pdf),
                    "sampled pdf {} != pdf {}", sample.pdf, pdf
                );
                let f = bsdf.f(&wo, &sample.wi, BxDFType::BSDF_ALL);
                for c in 0..3 {
                    prop_assert!((sample.f[c] - f[c]).abs() <= 1e-9 * max(1.0, f[c]));
                }
            }
        }
    }

    #[test]
    fn specular_sample_keeps_its_value() {
        let arena = Bump::new();
        let dg = DifferentialGeometry::from_normal(Point3f::zero(), Normal3f::new(0.0, 0.0, 1.0));
        let bsdf = BSDF::alloc(&arena, &dg);
        bsdf.add(SpecularReflection::alloc(&arena, Spectrum::new(0.9), Fresnel::NoOp));
        let wo = Vector3f::new(0.6, 0.0, 0.8);
        let sample = bsdf.sample_f(&wo, &Point2f::new(0.5, 0.5), 0.5, BxDFType::BSDF_ALL);
        assert_eq!(sample.pdf, 1.0);
        assert!(sample.bxdf_type.is_specular());
        assert!(approx_eq!(Float, sample.wi.x, -0.6, epsilon = 1e-12));
        assert!(approx_eq!(Float, sample.f[0], 0.9 / 0.8, epsilon = 1e-12));
    }

    #[test]
    fn mix_weights_both_bsdfs() {
        let arena = Bump::new();
        let dg = tilted_geometry();
        let a = BSDF::alloc(&arena, &dg);
        a.add(LambertianReflection::alloc(&arena, Spectrum::rgb(0.1, 0.2, 0.3)));
        let b = BSDF::alloc(&arena, &dg);
        b.add(LambertianReflection::alloc(&arena, Spectrum::rgb(0.4, 0.8, 0.1)));
        let scale = Spectrum::rgb(0.3, 0.5, 0.7);

        let wo = Vector3f::from(dg.shading_normal);
        let (fa, fb) = (
            a.f(&wo, &wo, BxDFType::BSDF_ALL),
            b.f(&wo, &wo, BxDFType::BSDF_ALL),
        );
        let mixed = BSDF::mix(&arena, a, b, scale);
        let f = mixed.f(&wo, &wo, BxDFType::BSDF_ALL);
        let expected = fa * scale + fb * (Spectrum::ONE - scale);
        for c in 0..3 {
            assert!(approx_eq!(Float, f[c], expected[c], epsilon = 1e-9));
        }
        assert_eq!(mixed.num_components(BxDFType::BSDF_ALL), 2);
    }

    #[test]
    fn total_scattering_is_clamped() {
        let arena = Bump::new();
        let dg = tilted_geometry();
        let bsdf = BSDF::alloc(&arena, &dg);
        bsdf.add(LambertianReflection::alloc(&arena, Spectrum::new(0.8)));
        bsdf.add(LambertianReflection::alloc(&arena, Spectrum::new(0.7)));
        let mut rng = RNG::new(5);
        let wo = Vector3f::from(dg.shading_normal);
        assert_eq!(bsdf.rho_hd(&wo, 16, BxDFType::BSDF_ALL, &mut rng), Spectrum::ONE);
        assert_eq!(bsdf.rho_hh(16, BxDFType::BSDF_ALL, &mut rng), Spectrum::ONE);
        let glossy = glossy_bsdf(&arena, &dg);
        let rho = glossy.rho_hd(&wo, 256, BxDFType::BSDF_ALL, &mut rng);
        for c in 0..3 {
            assert!(rho[c] > 0.3 && rho[c] <= 1.0);
        }
    }
}
