//! Density Volume Region

use super::*;

/// A scalar density field. Densities are non-negative.
pub trait Density {
    /// Returns the density at a point inside the region bounds.
    ///
    /// * `p` - The point.
    fn density(&self, p: &Point3f) -> Float;
}

/// Volume region whose coefficients are base values scaled by a density field
/// inside an axis-aligned box and zero outside it.
pub struct DensityVolumeRegion<D> {
    /// Region bounds.
    bounds: Bounds3f,

    /// Emission at unit density.
    base_emission: Spectrum,

    /// Absorption at unit density.
    base_absorption: Spectrum,

    /// Scattering at unit density.
    base_scattering: Spectrum,

    /// Absorption plus scattering at unit density.
    base_attenuation: Spectrum,

    /// Phase function.
    phase_function: PhaseFunction,

    /// The density field.
    density: D,
}

impl<D: Density> DensityVolumeRegion<D> {
    /// Create a new `DensityVolumeRegion`.
    ///
    /// * `bounds`          - Region bounds.
    /// * `base_emission`   - Emission at unit density.
    /// * `base_absorption` - Absorption at unit density.
    /// * `base_scattering` - Scattering at unit density.
    /// * `phase_function`  - Phase function.
    /// * `density`         - The density field.
    pub fn new(
        bounds: Bounds3f,
        base_emission: Spectrum,
        base_absorption: Spectrum,
        base_scattering: Spectrum,
        phase_function: PhaseFunction,
        density: D,
    ) -> Self {
        debug_assert!(base_absorption.min_component_value() >= 0.0);
        debug_assert!(base_scattering.min_component_value() >= 0.0);
        Self {
            bounds,
            base_emission,
            base_absorption,
            base_scattering,
            base_attenuation: base_absorption + base_scattering,
            phase_function,
            density,
        }
    }

    /// Returns the density field.
    pub fn density_field(&self) -> &D {
        &self.density
    }

    /// Returns the density at a point or 0 outside the bounds.
    ///
    /// * `p` - The point.
    #[inline]
    fn density_at(&self, p: &Point3f) -> Float {
        if self.bounds.contains(p) {
            self.density.density(p)
        } else {
            0.0
        }
    }
}

impl<D: Density> VolumeRegion for DensityVolumeRegion<D> {
    fn bounds(&self) -> Bounds3f {
        self.bounds
    }

    fn emission(&self, p: &Point3f) -> Spectrum {
        self.base_emission * self.density_at(p)
    }

    fn absorption(&self, p: &Point3f) -> Spectrum {
        self.base_absorption * self.density_at(p)
    }

    fn scattering(&self, p: &Point3f) -> Spectrum {
        self.base_scattering * self.density_at(p)
    }

    fn attenuation(&self, p: &Point3f) -> Spectrum {
        self.base_attenuation * self.density_at(p)
    }

    fn phase(&self, p: &Point3f, incoming: &Vector3f, outgoing: &Vector3f) -> Float {
        if self.bounds.contains(p) {
            self.phase_function.p(incoming, outgoing)
        } else {
            0.0
        }
    }

    /// Integrates the density with fixed steps. Each step evaluates the
    /// density once at `offset` within the step.
    fn optical_thickness(&self, ray: &Ray, step: Float, offset: Float) -> Spectrum {
        debug_assert!(step > 0.0);
        debug_assert!((0.0..1.0).contains(&offset));

        let (t_begin, t_end) = match self.intersect(ray) {
            Some(range) => range,
            None => return Spectrum::ZERO,
        };

        let mut density = 0.0;
        let mut t = t_begin;
        while t < t_end - MACHINE_EPSILON {
            let dt = min(step, t_end - t);
            density += self.density_at(&ray.at(t + offset * dt)) * dt;
            t += dt;
        }
        self.base_attenuation * density
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::*;
    use float_cmp::approx_eq;

    struct Constant(Float);

    impl Density for Constant {
        fn density(&self, _p: &Point3f) -> Float {
            self.0
        }
    }

    /// Density that grows linearly along x from 0 at x = 0.
    struct RampX;

    impl Density for RampX {
        fn density(&self, p: &Point3f) -> Float {
            p.x
        }
    }

    fn unit_box() -> Bounds3f {
        Bounds3f::new(Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 1.0))
    }

    fn region<D: Density>(density: D) -> DensityVolumeRegion<D> {
        DensityVolumeRegion::new(
            unit_box(),
            Spectrum::new(0.5),
            Spectrum::rgb(0.1, 0.2, 0.3),
            Spectrum::rgb(0.4, 0.2, 0.1),
            PhaseFunction::Isotropic,
            density,
        )
    }

    fn x_ray() -> Ray {
        Ray::infinite(Point3f::new(-1.0, 0.5, 0.5), Vector3f::new(1.0, 0.0, 0.0))
    }

    #[test]
    fn coefficients_vanish_outside() {
        let r = region(Constant(2.0));
        let inside = Point3f::new(0.5, 0.5, 0.5);
        let outside = Point3f::new(1.5, 0.5, 0.5);
        assert_eq!(r.attenuation(&inside), Spectrum::new(1.0));
        assert_eq!(r.emission(&inside), Spectrum::new(1.0));
        assert!(r.attenuation(&outside).is_black());
        assert!(r.scattering(&outside).is_black());
        assert!(r.emission(&outside).is_black());

        let d = Vector3f::new(0.0, 0.0, 1.0);
        assert_eq!(r.phase(&inside, &d, &d), INV_FOUR_PI);
        assert_eq!(r.phase(&outside, &d, &d), 0.0);
    }

    #[test]
    fn marched_thickness_of_linear_density() {
        // Midpoint evaluation integrates a linear density exactly.
        let r = region(RampX);
        let tau = r.optical_thickness(&x_ray(), 0.01, 0.5);
        let expected = Spectrum::new(0.5) * 0.5;
        for i in 0..3 {
            assert!(approx_eq!(Float, tau[i], expected[i], epsilon = 1e-9));
        }
    }

    #[test]
    fn missing_ray_has_no_thickness() {
        let r = region(Constant(1.0));
        let ray = Ray::infinite(Point3f::new(-1.0, 2.0, 0.5), Vector3f::new(1.0, 0.0, 0.0));
        assert!(r.intersect(&ray).is_none());
        assert!(r.optical_thickness(&ray, 0.1, 0.5).is_black());

        let s = r.sample_scattering(&ray, 0.5, 0.1, 0.5);
        assert!(s.t.is_none());
        assert_eq!(s.pdf, 1.0);
        assert_eq!(s.transmittance, Spectrum::ONE);
    }

    #[test]
    fn distance_sampling_in_constant_density() {
        // Attenuation luminance is 1 per unit length.
        let r = region(Constant(2.0));
        let ray = x_ray();

        // -ln(0.5) < 1, so the event is inside the box.
        let s = r.sample_scattering(&ray, 0.5, 0.1, 0.5);
        let t = s.t.unwrap();
        assert!(approx_eq!(Float, t, 1.0 + 2.0_f64.ln(), epsilon = 1e-9));
        assert!(approx_eq!(Float, s.pdf, 0.5, epsilon = 1e-9));
        assert!(approx_eq!(Float, s.transmittance[0], 0.5, epsilon = 1e-9));

        // -ln(0.2) > 1 so the ray passes through.
        let s = r.sample_scattering(&ray, 0.2, 0.1, 0.5);
        assert!(s.t.is_none());
        assert!(approx_eq!(Float, s.pdf, (-1.0 as Float).exp(), epsilon = 1e-9));
    }

    #[test]
    fn sampled_distances_follow_transmittance() {
        let r = region(Constant(2.0));
        let ray = x_ray();
        let mut rng = RNG::new(5);
        let n = 100_000;
        let mut scattered = 0;
        for _ in 0..n {
            let u = 1.0 - rng.uniform_float();
            if r.sample_scattering(&ray, u, 0.1, rng.uniform_float()).t.is_some() {
                scattered += 1;
            }
        }
        // Probability of an event inside the box is 1 - e^-1.
        let fraction = scattered as Float / n as Float;
        assert!((fraction - (1.0 - (-1.0 as Float).exp())).abs() < 0.01);
    }
}
