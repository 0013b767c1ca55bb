//! Uniform Infinite Light Source

use core::geometry::*;
use core::light::*;
use core::pbrt::*;
use core::sampling::*;
use core::spectrum::*;

/// Implements an environment light with the same radiance from every
/// direction.
#[derive(Clone, Debug)]
pub struct UniformInfiniteLight {
    /// Radiance arriving from every direction.
    pub l_emit: Spectrum,

    /// Surface area of the world bounds. Only used for the power.
    world_area: Float,
}

impl UniformInfiniteLight {
    /// Returns a new `UniformInfiniteLight`.
    ///
    /// * `l_emit`      - Radiance arriving from every direction.
    /// * `world_bound` - Bounds of the scene.
    pub fn new(l_emit: Spectrum, world_bound: &Bounds3f) -> Self {
        debug_assert!(l_emit.min_component_value() >= 0.0);
        let world_area = if world_bound.is_empty() {
            0.0
        } else {
            world_bound.surface_area()
        };
        Self { l_emit, world_area }
    }
}

impl Light for UniformInfiniteLight {
    fn get_type(&self) -> LightType {
        LightType::INFINITE_LIGHT
    }

    /// Returns the power the world bounds receive.
    fn power(&self) -> Spectrum {
        self.l_emit * (PI * self.world_area)
    }

    /// Samples the cosine-weighted hemisphere around `n` when it is given and
    /// the whole sphere otherwise.
    fn sample_li(&self, p: &Point3f, n: Option<&Normal3f>, u: &Point2f, _u_component: Float) -> Li {
        let (wi, pdf) = match n {
            Some(n) => {
                let n = Vector3f::from(*n);
                let (s, t) = coordinate_system(&n);
                let w = cosine_sample_hemisphere(u);
                (s * w.x + t * w.y + n * w.z, cosine_hemisphere_pdf(w.z))
            }
            None => (uniform_sample_sphere(u), uniform_sphere_pdf()),
        };
        if pdf == 0.0 {
            return Li::none(p);
        }
        Li::new(Ray::infinite(*p, wi), pdf, self.l_emit)
    }

    fn pdf_li(&self, _p: &Point3f, n: Option<&Normal3f>, wi: &Vector3f) -> Float {
        match n {
            Some(n) => cosine_hemisphere_pdf(max(0.0, wi.dot(n))),
            None => uniform_sphere_pdf(),
        }
    }

    fn le(&self, _ray: &Ray) -> Spectrum {
        self.l_emit
    }

    fn irradiance(&self, _n: &Normal3f) -> Spectrum {
        self.l_emit * PI
    }

    fn fluence(&self) -> Spectrum {
        self.l_emit * FOUR_PI
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::rng::*;
    use float_cmp::approx_eq;

    #[test]
    fn constant_radiance() {
        let bounds = Bounds3f::new(Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 1.0));
        let light = UniformInfiniteLight::new(Spectrum::new(0.5), &bounds);
        assert!(approx_eq!(Float, light.power()[0], 3.0 * PI, ulps = 4));
        assert_eq!(light.le(&Ray::infinite(Point3f::default(), Vector3f::new(1.0, 0.0, 0.0))), Spectrum::new(0.5));
        assert!(approx_eq!(Float, light.irradiance(&Normal3f::new(0.0, 0.0, 1.0))[0], 0.5 * PI, ulps = 2));
        assert!(approx_eq!(Float, light.fluence()[0], 2.0 * PI, ulps = 2));
        assert!(!light.is_delta_light());
    }

    #[test]
    fn cosine_estimate_of_irradiance() {
        let light = UniformInfiniteLight::new(Spectrum::ONE, &Bounds3f::empty());
        let n = Normal3f::new(0.0, 1.0, 0.0);
        let p = Point3f::default();
        let mut rng = RNG::new(6);
        let count = 10_000;
        let mut sum = 0.0;
        for _ in 0..count {
            let u = Point2f::new(rng.uniform_float(), rng.uniform_float());
            let li = light.sample_li(&p, Some(&n), &u, 0.0);
            if !li.is_empty() {
                sum += li.value[0] * li.wi().dot(&n) / li.pdf;
            }
        }
        // Cosine sampling makes every sample equal to pi.
        assert!(approx_eq!(Float, sum / count as Float, PI, epsilon = 1e-3));
    }

    #[test]
    fn sampled_pdf_matches_pdf_li() {
        let light = UniformInfiniteLight::new(Spectrum::ONE, &Bounds3f::empty());
        let n = Normal3f::new(0.0, 0.6, 0.8);
        let p = Point3f::default();
        let mut rng = RNG::new(13);
        for _ in 0..1000 {
            let u = Point2f::new(rng.uniform_float(), rng.uniform_float());

            let li = light.sample_li(&p, Some(&n), &u, 0.0);
            if !li.is_empty() {
                assert!(li.wi().dot(&n) >= -1e-12);
                let pdf = light.pdf_li(&p, Some(&n), &li.wi());
                assert!((pdf - li.pdf).abs() < 1e-9, "sampled {} evaluated {}", li.pdf, pdf);
            }

            let li = light.sample_li(&p, None, &u, 0.0);
            assert_eq!(light.pdf_li(&p, None, &li.wi()), li.pdf);
        }
    }
}
