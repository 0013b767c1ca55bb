//! Direct Lighting LTE Integrator

use crate::direct_lighting::*;
use crate::lte_integrator::*;
use bumpalo::Bump;
use core::error::*;
use core::geometry::*;
use core::light::*;
use core::light_distrib::*;
use core::pbrt::*;
use core::primitives::*;
use core::reflection::*;
use core::rng::*;
use core::sampler::*;
use core::sampling::*;
use core::scene::*;
use core::spectrum::*;

/// Upper limit for the specular recursion depth.
pub const MAX_SPECULAR_DEPTH: usize = 50;

/// Parameters of the `DirectLightingLTEIntegrator`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DirectLightingLTEIntegratorParams {
    /// Number of light samples and BSDF samples for direct lighting.
    pub direct_light_samples_num: usize,

    /// Maximum number of specular bounces followed.
    pub max_specular_depth: usize,

    /// Base ray marching step for camera rays.
    pub media_step_size: Float,

    /// Strategy for picking lights.
    pub strategy: LightSampleStategy,
}

impl Default for DirectLightingLTEIntegratorParams {
    fn default() -> Self {
        Self {
            direct_light_samples_num: 8,
            max_specular_depth: 6,
            media_step_size: 0.01,
            strategy: LightSampleStategy::Irradiance,
        }
    }
}

impl DirectLightingLTEIntegratorParams {
    /// Checks the parameters.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.media_step_size > 0.0 && self.media_step_size.is_finite()) {
            return Err(ConfigError::InvalidStepSize(self.media_step_size));
        }
        if self.direct_light_samples_num == 0 {
            return Err(ConfigError::ZeroSamples("direct light"));
        }
        Ok(())
    }
}

/// Computes radiance from direct lighting at surfaces, perfect specular
/// reflection and transmission, and single scattering in the scene's
/// participating medium.
pub struct DirectLightingLTEIntegrator {
    /// The scene.
    scene: ArcScene,

    /// Validated parameters.
    params: DirectLightingLTEIntegratorParams,

    /// Estimates direct lighting at surfaces.
    direct_lighting: DirectLightingIntegrator,

    /// Sample ids for the two marching offsets of camera rays.
    media_offset_ids: Option<(usize, usize)>,
}

impl DirectLightingLTEIntegrator {
    /// Create a new `DirectLightingLTEIntegrator`.
    ///
    /// * `scene`  - The scene.
    /// * `params` - Parameters. The specular depth is clamped to
    ///              `MAX_SPECULAR_DEPTH`.
    pub fn new(scene: ArcScene, params: DirectLightingLTEIntegratorParams) -> ConfigResult<Self> {
        params.validate()?;

        let mut params = params;
        if params.max_specular_depth > MAX_SPECULAR_DEPTH {
            warn!(
                "Maximum specular depth {} clamped to {}",
                params.max_specular_depth, MAX_SPECULAR_DEPTH
            );
            params.max_specular_depth = MAX_SPECULAR_DEPTH;
        }

        // Secondary rays march with twice the step.
        let direct_lighting = DirectLightingIntegrator::new(
            ArcScene::clone(&scene),
            params.direct_light_samples_num,
            params.direct_light_samples_num,
            2.0 * params.media_step_size,
            params.strategy,
        );

        info!(
            "Direct lighting: {} samples, specular depth {}, media step {}, {} strategy",
            params.direct_light_samples_num, params.max_specular_depth, params.media_step_size, params.strategy
        );

        Ok(Self {
            scene,
            params,
            direct_lighting,
            media_offset_ids: None,
        })
    }

    /// Returns the parameters after clamping.
    pub fn params(&self) -> &DirectLightingLTEIntegratorParams {
        &self.params
    }

    /// Returns emitted, directly lit and specularly carried radiance at a
    /// surface hit.
    ///
    /// * `ray`    - The ray that hit the surface.
    /// * `isect`  - The intersection.
    /// * `sample` - Samples for a camera ray, if any.
    /// * `arena`  - Arena for BSDF allocations.
    /// * `rng`    - Random number generator.
    fn surface_radiance(
        &self,
        ray: &Ray,
        isect: &Intersection,
        sample: Option<&Sample>,
        arena: &Bump,
        rng: &mut RNG,
    ) -> Spectrum {
        let wo = -ray.d;
        let mut l = isect.le(&wo);

        let bsdf = match isect.get_bsdf(arena) {
            Some(bsdf) => bsdf,
            None => return l,
        };

        if bsdf.num_components(BxDFType::BSDF_ALL - BxDFType::BSDF_SPECULAR) > 0 {
            l += self
                .direct_lighting
                .compute_direct_lighting(isect, &wo, bsdf, sample, arena, rng);
        }

        if ray.depth as usize <= self.params.max_specular_depth {
            l += self.specular(ray, isect, bsdf, BxDFType::BSDF_REFLECTION, sample, arena, rng);
            l += self.specular(ray, isect, bsdf, BxDFType::BSDF_TRANSMISSION, sample, arena, rng);
        }
        l
    }

    /// Follows the perfect specular reflection or transmission direction.
    ///
    /// * `ray`    - The ray that hit the surface.
    /// * `isect`  - The intersection.
    /// * `bsdf`   - The BSDF at the intersection.
    /// * `side`   - `BSDF_REFLECTION` or `BSDF_TRANSMISSION`.
    /// * `sample` - Samples for a camera ray, if any.
    /// * `arena`  - Arena for BSDF allocations.
    /// * `rng`    - Random number generator.
    #[allow(clippy::too_many_arguments)]
    fn specular(
        &self,
        ray: &Ray,
        isect: &Intersection,
        bsdf: &BSDF,
        side: BxDFType,
        sample: Option<&Sample>,
        arena: &Bump,
        rng: &mut RNG,
    ) -> Spectrum {
        let wo = -ray.d;
        let ns = isect.dg.shading_normal;

        // Grazing rays are numerically unstable under refraction.
        if side == BxDFType::BSDF_TRANSMISSION && wo.abs_dot(&ns) < EPSILON {
            return Spectrum::ZERO;
        }

        let bxdf_type = side | BxDFType::BSDF_SPECULAR;
        let u_component = rng.uniform_float();
        let BxDFSample { f, pdf, wi, .. } = bsdf.sample_f(&wo, &Point2f::new(0.5, 0.5), u_component, bxdf_type);
        let cos = wi.abs_dot(&ns);
        if f.is_black() || pdf <= 0.0 || cos <= EPSILON {
            return Spectrum::ZERO;
        }

        let next = ray.spawn(isect.dg.point, wi);
        self.radiance(&next, sample, arena, rng) * f * (cos / pdf)
    }

    /// Marches the ray through the participating medium. Returns the single
    /// scattered and emitted radiance along the ray and the transmittance
    /// through it.
    ///
    /// * `ray`    - The ray. Its extent ends at the nearest surface.
    /// * `sample` - Samples for a camera ray, if any.
    /// * `rng`    - Random number generator.
    fn media_radiance_and_transmittance(
        &self,
        ray: &Ray,
        sample: Option<&Sample>,
        rng: &mut RNG,
    ) -> (Spectrum, Spectrum) {
        let scene = &*self.scene;
        let region = match scene.get_volume_region() {
            Some(region) => region,
            None => return (Spectrum::ZERO, Spectrum::ONE),
        };
        let (mut t0, t1) = match region.intersect(ray) {
            Some((t0, t1)) if t0 != t1 => (t0, t1),
            _ => return (Spectrum::ZERO, Spectrum::ONE),
        };

        // `offset1` positions points along the ray within each step and
        // `offset2` the evaluation points of the optical thickness.
        let sampled_offsets = sample.zip(self.media_offset_ids).and_then(|(sample, (id1, id2))| {
            let offset1 = *sample.samples_sequence_1d(id1).first()?;
            let offset2 = *sample.samples_sequence_1d(id2).first()?;
            Some((offset1, offset2))
        });
        let (offset1, offset2, base_step) = match sampled_offsets {
            Some((offset1, offset2)) => (offset1, offset2, self.params.media_step_size),
            None => (rng.uniform_float(), rng.uniform_float(), 2.0 * self.params.media_step_size),
        };

        let light_sources = scene.get_light_sources();
        let n_delta = light_sources.delta.len();
        let n_infinite = light_sources.infinite.len();
        let n_lights = light_sources.len();

        // Optical thickness of the ray between two parameters.
        let thickness = |t_begin: Float, t_end: Float| {
            let segment = Ray::new(ray.at(t_begin), ray.d, 0.0, t_end - t_begin);
            region.optical_thickness(&segment, base_step, offset2)
        };

        let mut l = Spectrum::ZERO;
        let mut tr = Spectrum::ONE;
        let mut step = base_step;
        let mut i: u64 = 0;
        while t0 < t1 - MACHINE_EPSILON {
            i += 1;
            step = min(step, t1 - t0);

            // Low discrepancy samples stay stratified for any number of steps.
            let u_light = radical_inverse(2, i);
            let u_position = Point2f::new(radical_inverse(3, i), radical_inverse(5, i));

            // Transmittance up to the sample point inside the step.
            let t_point = t0 + offset1 * step;
            let point = ray.at(t_point);
            tr *= (-thickness(t0, t_point)).exp();

            l += tr * region.emission(&point);

            let scattering = region.scattering(&point);
            if !scattering.is_black() && n_lights > 0 {
                // Lights are picked uniformly.
                let index = min((u_light * n_lights as Float) as usize, n_lights - 1);
                let li = match light_sources.get(index) {
                    Some(light) if index < n_delta + n_infinite => light.sample_li(&point, None, &u_position, 0.0),
                    Some(light) => {
                        let mut li = light.sample_li(&point, None, &u_position, rng.uniform_float());
                        li.ray.t_max -= AREA_LIGHT_SHADOW_OFFSET;
                        li
                    }
                    None => Li::none(&point),
                };

                if !li.value.is_black() && li.pdf > 0.0 && !scene.intersect_p(&li.ray) {
                    let wi = li.wi();
                    let phase = region.phase(&point, &-wi, &-ray.d);
                    let light_tr = media_transmittance(scene, &li.ray, 2.0 * self.params.media_step_size, rng);
                    l += tr * scattering * li.value * light_tr * (phase * step * n_lights as Float / li.pdf);
                }
            }

            // Transmittance through the rest of the step.
            tr *= (-thickness(t_point, t0 + step)).exp();
            t0 += step;

            // Steps grow as the transmittance drops.
            let luminance = tr.y();
            if luminance < MACHINE_EPSILON {
                break;
            }
            step = base_step / luminance;
        }

        (l, tr)
    }
}

impl LTEIntegrator for DirectLightingLTEIntegrator {
    fn request_samples(&mut self, sampler: &mut dyn Sampler) {
        self.direct_lighting.request_samples(sampler);
        self.media_offset_ids = Some((sampler.add_samples_sequence_1d(1), sampler.add_samples_sequence_1d(1)));
    }

    fn radiance(&self, ray: &Ray, sample: Option<&Sample>, arena: &Bump, rng: &mut RNG) -> Spectrum {
        debug_assert!(abs(ray.d.length_squared() - 1.0) < 1e-6);

        let scene = &*self.scene;
        let mut ray = *ray;
        let l = match scene.intersect(&mut ray) {
            Some(isect) => self.surface_radiance(&ray, &isect, sample, arena, rng),
            None if ray.t_max.is_infinite() => scene.infinite_radiance(&ray),
            None => Spectrum::ZERO,
        };

        let (media_l, tr) = self.media_radiance_and_transmittance(&ray, sample, rng);
        l * tr + media_l
    }
}
