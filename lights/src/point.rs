//! Point Light Source

use core::geometry::*;
use core::light::*;
use core::pbrt::*;
use core::spectrum::*;

/// Implements an isotropic point light source that emits the same amount of
/// light in all directions.
#[derive(Clone, Debug)]
pub struct PointLight {
    /// Position.
    pub p_light: Point3f,

    /// Intensity.
    pub intensity: Spectrum,
}

impl PointLight {
    /// Returns a new `PointLight`.
    ///
    /// * `p_light`   - Position.
    /// * `intensity` - Intensity.
    pub fn new(p_light: Point3f, intensity: Spectrum) -> Self {
        debug_assert!(intensity.min_component_value() >= 0.0);
        Self { p_light, intensity }
    }
}

impl Light for PointLight {
    fn get_type(&self) -> LightType {
        LightType::DELTA_POSITION_LIGHT
    }

    fn power(&self) -> Spectrum {
        FOUR_PI * self.intensity
    }

    /// Returns the intensity divided by the squared distance. The ray ends at
    /// the light.
    fn sample_li(&self, p: &Point3f, _n: Option<&Normal3f>, _u: &Point2f, _u_component: Float) -> Li {
        let v = self.p_light - *p;
        let distance = v.length();
        if distance == 0.0 {
            return Li::none(p);
        }

        let wi = v / distance;
        let value = self.intensity / (distance * distance);
        Li::new(Ray::new(*p, wi, 0.0, distance), 1.0, value)
    }

    fn pdf_li(&self, _p: &Point3f, _n: Option<&Normal3f>, _wi: &Vector3f) -> Float {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn inverse_square_falloff() {
        let light = PointLight::new(Point3f::new(0.0, 0.0, 2.0), Spectrum::new(8.0));
        let p = Point3f::new(0.0, 0.0, 0.0);
        let li = light.sample_li(&p, None, &Point2f::new(0.5, 0.5), 0.5);
        assert_eq!(li.pdf, 1.0);
        assert_eq!(li.value, Spectrum::new(2.0));
        assert_eq!(li.wi(), Vector3f::new(0.0, 0.0, 1.0));
        assert!(approx_eq!(Float, li.ray.t_max, 2.0, ulps = 2));
        assert!(light.is_delta_light());
        assert!(approx_eq!(Float, light.power()[1], 32.0 * PI, ulps = 2));
    }

    #[test]
    fn coincident_point_receives_nothing() {
        let light = PointLight::new(Point3f::new(1.0, 1.0, 1.0), Spectrum::ONE);
        assert!(light
            .sample_li(&Point3f::new(1.0, 1.0, 1.0), None, &Point2f::default(), 0.0)
            .is_empty());
    }
}
