//! Direct Lighting Integrator

use bumpalo::Bump;
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
use itertools::izip;

/// Distance by which shadow rays towards a sampled area light point stop
/// short of it so they do not hit the emitter itself.
pub const AREA_LIGHT_SHADOW_OFFSET: Float = 1e-4;

/// Returns the transmittance of the scene's participating medium along a ray.
///
/// * `scene` - The scene.
/// * `ray`   - The ray.
/// * `step`  - Marching step size.
/// * `rng`   - Random number generator for the marching offset.
pub fn media_transmittance(scene: &Scene, ray: &Ray, step: Float, rng: &mut RNG) -> Spectrum {
    match scene.get_volume_region() {
        Some(region) => (-region.optical_thickness(ray, step, rng.uniform_float())).exp(),
        None => Spectrum::ONE,
    }
}

/// Sample sequence ids registered with the sampler.
#[derive(Copy, Clone, Debug)]
struct SampleIds {
    light_1d: usize,
    light_2d: usize,
    bsdf_1d: usize,
    bsdf_2d: usize,
}

/// Samples for one direct lighting evaluation.
struct DirectLightingSamples<'a> {
    light_1d: &'a [Float],
    light_2d: &'a [Point2f],
    bsdf_1d: &'a [Float],
    bsdf_2d: &'a [Point2f],
}

/// Shared state of one direct lighting evaluation.
struct ShadingPoint<'a, 'arena> {
    /// Surface geometry.
    dg: &'a DifferentialGeometry,

    /// Direction towards the viewer.
    view: &'a Vector3f,

    /// The BSDF.
    bsdf: &'a BSDF<'arena>,

    /// Normal of the hemisphere the BSDF scatters into, if only one.
    normal: Option<Normal3f>,

    /// CDF over the infinite lights followed by the area lights.
    cdf: &'a [Float],
}

/// Computes the radiance reflected or transmitted at a surface point due to
/// light arriving directly from the light sources. Delta lights are visited
/// one by one. Infinite and area lights are picked through the lights CDF
/// and combined with BSDF sampling by multiple importance sampling.
pub struct DirectLightingIntegrator {
    /// The scene.
    scene: ArcScene,

    /// Number of light samples.
    n_light_samples: usize,

    /// Number of BSDF samples.
    n_bsdf_samples: usize,

    /// Marching step size for the transmittance of shadow rays.
    media_step_size: Float,

    /// Builds the CDF for picking lights.
    lights_sampling: ArcLightsSamplingStrategy,

    /// Ids of the sample sequences once they are requested.
    sample_ids: Option<SampleIds>,
}

impl DirectLightingIntegrator {
    /// Create a new `DirectLightingIntegrator`.
    ///
    /// * `scene`           - The scene.
    /// * `n_light_samples` - Number of light samples.
    /// * `n_bsdf_samples`  - Number of BSDF samples.
    /// * `media_step_size` - Marching step size for shadow ray transmittance.
    /// * `strategy`        - Light sampling strategy.
    pub fn new(
        scene: ArcScene,
        n_light_samples: usize,
        n_bsdf_samples: usize,
        media_step_size: Float,
        strategy: LightSampleStategy,
    ) -> Self {
        debug_assert!(media_step_size > 0.0);
        let lights_sampling = create_lights_sampling_strategy(strategy, scene.get_light_sources());
        Self {
            scene,
            n_light_samples,
            n_bsdf_samples,
            media_step_size,
            lights_sampling,
            sample_ids: None,
        }
    }

    /// Returns the number of light samples.
    pub fn light_samples(&self) -> usize {
        self.n_light_samples
    }

    /// Returns the number of BSDF samples.
    pub fn bsdf_samples(&self) -> usize {
        self.n_bsdf_samples
    }

    /// Registers the light and BSDF sample sequences. The sample counts are
    /// rounded to what the sampler can produce.
    ///
    /// * `sampler` - The sampler.
    pub fn request_samples(&mut self, sampler: &mut dyn Sampler) {
        self.n_light_samples = sampler.round_count(self.n_light_samples);
        self.n_bsdf_samples = sampler.round_count(self.n_bsdf_samples);
        self.sample_ids = Some(SampleIds {
            light_1d: sampler.add_samples_sequence_1d(self.n_light_samples),
            light_2d: sampler.add_samples_sequence_2d(self.n_light_samples),
            bsdf_1d: sampler.add_samples_sequence_1d(self.n_bsdf_samples),
            bsdf_2d: sampler.add_samples_sequence_2d(self.n_bsdf_samples),
        });
    }

    /// Returns the direct lighting at an intersection towards the viewer.
    ///
    /// * `isect`  - The intersection.
    /// * `view`   - Normalized direction towards the viewer.
    /// * `bsdf`   - The BSDF at the intersection.
    /// * `sample` - Samples for a camera ray. Without it stratified samples
    ///              are drawn from `rng`.
    /// * `arena`  - Arena for temporary buffers.
    /// * `rng`    - Random number generator.
    pub fn compute_direct_lighting(
        &self,
        isect: &Intersection,
        view: &Vector3f,
        bsdf: &BSDF,
        sample: Option<&Sample>,
        arena: &Bump,
        rng: &mut RNG,
    ) -> Spectrum {
        debug_assert!(abs(view.length_squared() - 1.0) < 1e-6);
        debug_assert!(
            sample.is_none() || self.sample_ids.is_some(),
            "samples have not been requested"
        );

        let n_reflection =
            bsdf.num_components(BxDFType::BSDF_DIFFUSE | BxDFType::BSDF_GLOSSY | BxDFType::BSDF_REFLECTION);
        let n_transmission =
            bsdf.num_components(BxDFType::BSDF_DIFFUSE | BxDFType::BSDF_GLOSSY | BxDFType::BSDF_TRANSMISSION);
        if n_reflection + n_transmission == 0 {
            return Spectrum::ZERO;
        }

        let scene = &*self.scene;
        let dg = &isect.dg;
        let ns = dg.shading_normal;
        let mut l = Spectrum::ZERO;

        for light in scene.get_light_sources().delta.iter() {
            let li = light.sample_li(&dg.point, None, &Point2f::new(0.5, 0.5), 0.5);
            if li.value.is_black() || li.pdf <= 0.0 {
                continue;
            }

            let wi = li.wi();
            let f = bsdf.f(view, &wi, BxDFType::BSDF_ALL);
            let mut shadow_ray = li.ray;
            shadow_ray.t_min = SHADOW_EPSILON;
            if !f.is_black() && !scene.intersect_p(&shadow_ray) {
                let tr = media_transmittance(scene, &shadow_ray, self.media_step_size, rng);
                l += f * li.value * tr * (wi.abs_dot(&ns) / li.pdf);
            }
        }

        // Restrict the CDF to the side of the surface the BSDF scatters into.
        let normal = if n_reflection == 0 {
            Some(if view.dot(&ns) <= 0.0 { ns } else { -ns })
        } else if n_transmission == 0 {
            Some(if view.dot(&ns) >= 0.0 { ns } else { -ns })
        } else {
            None
        };
        let cdf = arena.alloc_slice_fill_copy(scene.get_light_sources().num_sampled(), 0.0);
        self.lights_sampling.get_lights_cdf(&dg.point, normal.as_ref(), cdf);

        let samples = match (sample, self.sample_ids) {
            (Some(sample), Some(ids)) => DirectLightingSamples {
                light_1d: sample.samples_sequence_1d(ids.light_1d),
                light_2d: sample.samples_sequence_2d(ids.light_2d),
                bsdf_1d: sample.samples_sequence_1d(ids.bsdf_1d),
                bsdf_2d: sample.samples_sequence_2d(ids.bsdf_2d),
            },
            _ => DirectLightingSamples {
                light_1d: arena.alloc_slice_copy(&stratified_sample_1d(rng, self.n_light_samples, true)),
                light_2d: arena.alloc_slice_copy(&latin_hypercube_2d(rng, self.n_light_samples)),
                bsdf_1d: arena.alloc_slice_copy(&stratified_sample_1d(rng, self.n_bsdf_samples, true)),
                bsdf_2d: arena.alloc_slice_copy(&latin_hypercube_2d(rng, self.n_bsdf_samples)),
            },
        };

        let sp = ShadingPoint {
            dg,
            view,
            bsdf,
            normal,
            cdf,
        };
        l += self.sample_lights(&sp, samples.light_1d, samples.light_2d, rng);
        l += self.sample_bsdf(&sp, samples.bsdf_1d, samples.bsdf_2d, rng);
        l
    }

    /// Estimates direct lighting by sampling points on the infinite and area
    /// lights.
    ///
    /// * `sp`         - The shading point.
    /// * `u_light`    - Samples for picking a light.
    /// * `u_position` - Samples for a direction or point on the light.
    /// * `rng`        - Random number generator.
    fn sample_lights(&self, sp: &ShadingPoint, u_light: &[Float], u_position: &[Point2f], rng: &mut RNG) -> Spectrum {
        let scene = &*self.scene;
        let light_sources = scene.get_light_sources();
        let n_infinite = light_sources.infinite.len();
        let n_light_samples = u_light.len();
        if n_light_samples == 0 || light_sources.num_sampled() == 0 {
            return Spectrum::ZERO;
        }

        let p = sp.dg.point;
        let ns = sp.dg.shading_normal;
        let inv_infinite_probability = if n_infinite > 0 && sp.cdf[n_infinite - 1] > 0.0 {
            1.0 / sp.cdf[n_infinite - 1]
        } else {
            0.0
        };

        let mut l = Spectrum::ZERO;
        for (u, u2) in izip!(u_light, u_position) {
            let (index, component_pdf) = sample_discrete_cdf(sp.cdf, *u);
            let is_infinite = index < n_infinite;
            let (li, light_pdf) = match light_sources.get_sampled(index) {
                Some(light) if is_infinite => {
                    let li = light.sample_li(&p, sp.normal.as_ref(), u2, 0.0);
                    let pdf = li.pdf;
                    (li, pdf)
                }
                Some(light) => {
                    // Reuse the remainder of the light sample to pick a
                    // triangle on the area light.
                    let cdf_begin = if index == 0 { 0.0 } else { sp.cdf[index - 1] };
                    let u_triangle = clamp((u - cdf_begin) / component_pdf, 0.0, ONE_MINUS_EPSILON);
                    let mut li = light.sample_li(&p, sp.normal.as_ref(), u2, u_triangle);
                    li.ray.t_max -= AREA_LIGHT_SHADOW_OFFSET;
                    let pdf = li.pdf;
                    (li, pdf)
                }
                None => continue,
            };
            if light_pdf <= 0.0 || li.value.is_black() {
                continue;
            }

            let wi = li.wi();
            let f = sp.bsdf.f(sp.view, &wi, BxDFType::BSDF_ALL);
            if f.is_black() {
                continue;
            }

            // A BSDF sample can reach an area light only through the nearest
            // surface along its direction, so its pdf is not scaled by the
            // light selection probability.
            let bsdf_pdf = sp.bsdf.pdf(sp.view, &wi, BxDFType::BSDF_ALL);
            let bsdf_pdf = if is_infinite {
                bsdf_pdf * component_pdf * inv_infinite_probability
            } else {
                bsdf_pdf
            };
            let light_pdf = light_pdf * component_pdf;
            let weight = power_heuristic(n_light_samples, light_pdf, self.n_bsdf_samples, bsdf_pdf)
                * wi.abs_dot(&ns)
                / light_pdf;

            let mut shadow_ray = li.ray;
            shadow_ray.t_min = SHADOW_EPSILON;
            if weight > 0.0 && !scene.intersect_p(&shadow_ray) {
                let tr = media_transmittance(scene, &shadow_ray, self.media_step_size, rng);
                l += f * li.value * tr * weight;
            }
        }
        l / n_light_samples as Float
    }

    /// Estimates direct lighting by sampling the BSDF and looking for lights
    /// along the sampled directions.
    ///
    /// * `sp`          - The shading point.
    /// * `u_component` - Samples for picking a BxDF.
    /// * `u_direction` - Samples for the direction.
    /// * `rng`         - Random number generator.
    fn sample_bsdf(&self, sp: &ShadingPoint, u_component: &[Float], u_direction: &[Point2f], rng: &mut RNG) -> Spectrum {
        let scene = &*self.scene;
        let light_sources = scene.get_light_sources();
        let n_infinite = light_sources.infinite.len();
        let n_bsdf_samples = u_component.len();
        if n_bsdf_samples == 0 || light_sources.num_sampled() == 0 {
            return Spectrum::ZERO;
        }

        let p = sp.dg.point;
        let ns = sp.dg.shading_normal;
        let infinite_probability = if n_infinite > 0 { sp.cdf[n_infinite - 1] } else { 0.0 };

        let mut l = Spectrum::ZERO;
        for (u, u2) in izip!(u_component, u_direction) {
            let BxDFSample { f, pdf, wi, .. } =
                sp.bsdf
                    .sample_f(sp.view, u2, *u, BxDFType::BSDF_ALL - BxDFType::BSDF_SPECULAR);
            if pdf <= 0.0 || f.is_black() {
                continue;
            }

            let mut ray = Ray::new(p, wi, SHADOW_EPSILON, INFINITY);
            match scene.intersect(&mut ray) {
                Some(hit) => {
                    let light = match hit.primitive.get_area_light() {
                        Some(light) => light,
                        None => continue,
                    };
                    let index = match light_sources.area_light_cdf_index(light) {
                        Some(index) => index,
                        None => continue,
                    };
                    let light_pdf = light.pdf_li(&p, sp.normal.as_ref(), &wi);
                    let le = light.l(&hit.dg, &-wi);
                    if light_pdf > 0.0 && !le.is_black() {
                        let component_pdf = cdf_pdf(sp.cdf, index);
                        let weight = power_heuristic(n_bsdf_samples, pdf, self.n_light_samples, light_pdf * component_pdf)
                            * wi.abs_dot(&ns)
                            / pdf;
                        let tr = media_transmittance(scene, &ray, self.media_step_size, rng);
                        l += f * le * tr * weight;
                    }
                }
                None if infinite_probability > 0.0 => {
                    // Pick the infinite light this direction is accounted to.
                    let (index, component_pdf) =
                        sample_discrete_cdf(&sp.cdf[..n_infinite], rng.uniform_float() * infinite_probability);
                    let bsdf_pdf = pdf * component_pdf / infinite_probability;
                    let light = &light_sources.infinite[index];
                    let light_pdf = light.pdf_li(&p, sp.normal.as_ref(), &wi);
                    let le = light.le(&ray);
                    if light_pdf > 0.0 && !le.is_black() {
                        let weight =
                            power_heuristic(n_bsdf_samples, bsdf_pdf, self.n_light_samples, component_pdf * light_pdf)
                                * wi.abs_dot(&ns)
                                / bsdf_pdf;
                        let tr = media_transmittance(scene, &ray, self.media_step_size, rng);
                        l += f * le * tr * weight;
                    }
                }
                None => {}
            }
        }
        l / n_bsdf_samples as Float
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::material::*;
    use core::mesh::*;
    use float_cmp::approx_eq;
    use lights::*;
    use std::sync::Arc;

    /// Square `[-s, s]^2` in the plane z = `z`. The normal faces +z when
    /// `up` is set.
    fn square(s: Float, z: Float, up: bool) -> Arc<TriangleMesh> {
        let vertices = vec![
            Point3f::new(-s, -s, z),
            Point3f::new(s, -s, z),
            Point3f::new(s, s, z),
            Point3f::new(-s, s, z),
        ];
        let triangles = if up {
            vec![[0, 1, 2], [0, 2, 3]]
        } else {
            vec![[0, 2, 1], [0, 3, 2]]
        };
        Arc::new(TriangleMesh::new(vertices, triangles))
    }

    fn floor(kd: Float) -> ArcPrimitive {
        let matte: ArcMaterial = Arc::new(MatteMaterial::new(Spectrum::new(kd), 0.0));
        Arc::new(GeometricPrimitive::new(square(10.0, 0.0, true), Some(matte), None))
    }

    /// Evaluates direct lighting on the floor seen from straight above.
    fn shade(integrator: &DirectLightingIntegrator, rng: &mut RNG) -> Spectrum {
        let arena = Bump::new();
        let mut ray = Ray::infinite(Point3f::new(0.2, -0.1, 3.0), Vector3f::new(0.0, 0.0, -1.0));
        let isect = integrator.scene.intersect(&mut ray).unwrap();
        let bsdf = isect.get_bsdf(&arena).unwrap();
        integrator.compute_direct_lighting(&isect, &-ray.d, bsdf, None, &arena, rng)
    }

    #[test]
    fn point_light_is_exact() {
        let light: ArcLight = Arc::new(PointLight::new(Point3f::new(1.2, -0.1, 2.0), Spectrum::new(10.0)));
        let scene = Arc::new(Scene::new(floor(0.5), vec![light], None));
        let integrator = DirectLightingIntegrator::new(scene, 4, 4, 0.02, LightSampleStategy::Irradiance);

        let l = shade(&integrator, &mut RNG::new(1));
        // Distance squared 5 and cosine 2 / sqrt(5).
        let expected = 0.5 * INV_PI * 10.0 / 5.0 * (2.0 / (5.0 as Float).sqrt());
        for i in 0..3 {
            assert!(approx_eq!(Float, l[i], expected, epsilon = 1e-12));
        }
    }

    #[test]
    fn occluded_point_light_gives_nothing() {
        let light: ArcLight = Arc::new(PointLight::new(Point3f::new(0.2, -0.1, 2.0), Spectrum::new(10.0)));
        let blocker: ArcPrimitive = Arc::new(GeometricPrimitive::new(square(1.0, 1.0, false), None, None));
        let aggregate: ArcPrimitive = Arc::new(PrimitiveList::new(vec![floor(0.5), blocker]));
        let scene = Arc::new(Scene::new(aggregate, vec![light], None));
        let integrator = DirectLightingIntegrator::new(scene, 4, 4, 0.02, LightSampleStategy::Power);
        assert!(shade(&integrator, &mut RNG::new(1)).is_black());
    }

    #[test]
    fn uniform_sky_over_lambertian_floor() {
        // Light and BSDF sampling both draw cosine distributed directions,
        // so every sample contributes kd * L.
        let bounds = Bounds3f::new(Point3f::new(-10.0, -10.0, 0.0), Point3f::new(10.0, 10.0, 1.0));
        let sky: ArcLight = Arc::new(UniformInfiniteLight::new(Spectrum::new(2.0), &bounds));
        let scene = Arc::new(Scene::new(floor(0.25), vec![sky], None));
        let integrator = DirectLightingIntegrator::new(scene, 8, 8, 0.02, LightSampleStategy::Irradiance);

        let l = shade(&integrator, &mut RNG::new(7));
        assert!(approx_eq!(Float, l[0], 0.5, epsilon = 1e-6), "got {}", l);
    }

    #[test]
    fn light_and_bsdf_sampling_agree_for_area_light() {
        let emitter = square(0.5, 1.0, false);
        let light: ArcLight = Arc::new(DiffuseAreaLight::new(Arc::clone(&emitter), Spectrum::new(4.0)));
        let lamp: ArcPrimitive = Arc::new(GeometricPrimitive::new(emitter, None, Some(Arc::clone(&light))));
        let aggregate: ArcPrimitive = Arc::new(PrimitiveList::new(vec![floor(0.5), lamp]));
        let scene = Arc::new(Scene::new(aggregate, vec![light], None));

        let estimate = |n_light, n_bsdf| {
            let integrator =
                DirectLightingIntegrator::new(Arc::clone(&scene), n_light, n_bsdf, 0.02, LightSampleStategy::Irradiance);
            let mut rng = RNG::new(3);
            let n = 200;
            (0..n).map(|_| shade(&integrator, &mut rng)[0]).sum::<Float>() / n as Float
        };

        let lights_only = estimate(64, 0);
        let bsdf_only = estimate(0, 64);
        let mis = estimate(16, 16);
        assert!(lights_only > 0.0);
        assert!(((bsdf_only - lights_only) / lights_only).abs() < 0.05, "{} vs {}", bsdf_only, lights_only);
        assert!(((mis - lights_only) / lights_only).abs() < 0.05, "{} vs {}", mis, lights_only);
    }

    #[test]
    fn requested_samples_are_used() {
        let light: ArcLight = Arc::new(PointLight::new(Point3f::new(0.2, -0.1, 2.0), Spectrum::new(1.0)));
        let scene = Arc::new(Scene::new(floor(0.5), vec![light], None));
        let mut integrator = DirectLightingIntegrator::new(scene, 3, 5, 0.02, LightSampleStategy::Power);
        let mut sampler = StratifiedSampler::new(true);
        integrator.request_samples(&mut sampler);

        let mut rng = RNG::new(0);
        let mut sample = sampler.create_sample();
        sampler.fill_sample(&mut sample, &mut rng);
        assert_eq!(sample.samples_sequence_1d(0).len(), integrator.light_samples());
        assert_eq!(sample.samples_sequence_2d(1).len(), integrator.bsdf_samples());

        let arena = Bump::new();
        let mut ray = Ray::infinite(Point3f::new(0.2, -0.1, 3.0), Vector3f::new(0.0, 0.0, -1.0));
        let isect = integrator.scene.intersect(&mut ray).unwrap();
        let bsdf = isect.get_bsdf(&arena).unwrap();
        let l = integrator.compute_direct_lighting(&isect, &-ray.d, bsdf, Some(&sample), &arena, &mut rng);
        assert!(approx_eq!(Float, l[1], 0.5 * INV_PI / 4.0, epsilon = 1e-12));
    }
}
