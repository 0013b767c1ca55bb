//! Spot Light Source

use core::geometry::*;
use core::light::*;
use core::pbrt::*;
use core::spectrum::*;

/// Implements a spot light source that emits light in a cone of directions
/// from its position. Intensity is constant inside the inner cone and falls
/// off smoothly to zero at the outer cone.
#[derive(Clone, Debug)]
pub struct SpotLight {
    /// Position.
    pub p_light: Point3f,

    /// Normalized cone axis.
    pub direction: Vector3f,

    /// Intensity along the axis.
    pub intensity: Spectrum,

    /// Cosine of the inner cone angle.
    cos_inner: Float,

    /// Cosine of the outer cone angle.
    cos_outer: Float,
}

impl SpotLight {
    /// Returns a new `SpotLight`. The angles are swapped if the inner one is
    /// the larger.
    ///
    /// * `p_light`     - Position.
    /// * `direction`   - Cone axis.
    /// * `intensity`   - Intensity along the axis.
    /// * `inner_angle` - Angle in degrees where the falloff starts.
    /// * `outer_angle` - Angle in degrees where the intensity reaches zero.
    pub fn new(
        p_light: Point3f,
        direction: Vector3f,
        intensity: Spectrum,
        inner_angle: Float,
        outer_angle: Float,
    ) -> Self {
        let (inner_angle, outer_angle) = if inner_angle > outer_angle {
            warn!(
                "Spot light inner angle {} exceeds outer angle {}. Swapping.",
                inner_angle, outer_angle
            );
            (outer_angle, inner_angle)
        } else {
            (inner_angle, outer_angle)
        };

        Self {
            p_light,
            direction: direction.normalize(),
            intensity,
            cos_inner: inner_angle.to_radians().cos(),
            cos_outer: outer_angle.to_radians().cos(),
        }
    }

    /// Returns the fraction of the axial intensity emitted in a direction.
    ///
    /// * `cos_theta` - Cosine of the angle between the direction and the axis.
    fn falloff(&self, cos_theta: Float) -> Float {
        if cos_theta < self.cos_outer {
            return 0.0;
        }
        if cos_theta > self.cos_inner {
            return 1.0;
        }

        // The power in `power()` integrates this curve analytically.
        let delta = (cos_theta - self.cos_outer) / (self.cos_inner - self.cos_outer);
        (delta * delta) * (delta * delta)
    }
}

impl Light for SpotLight {
    fn get_type(&self) -> LightType {
        LightType::DELTA_POSITION_LIGHT
    }

    fn power(&self) -> Spectrum {
        let inner_cone = TWO_PI * (1.0 - self.cos_inner);
        let falloff = TWO_PI * 0.2 * abs(self.cos_inner - self.cos_outer);
        self.intensity * (inner_cone + falloff)
    }

    fn sample_li(&self, p: &Point3f, _n: Option<&Normal3f>, _u: &Point2f, _u_component: Float) -> Li {
        let v = self.p_light - *p;
        let distance = v.length();
        if distance == 0.0 {
            return Li::none(p);
        }

        let wi = v / distance;
        let value = self.intensity * (self.falloff(-wi.dot(&self.direction)) / (distance * distance));
        Li::new(Ray::new(*p, wi, 0.0, distance), 1.0, value)
    }

    fn pdf_li(&self, _p: &Point3f, _n: Option<&Normal3f>, _wi: &Vector3f) -> Float {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::rng::*;
    use core::sampling::*;
    use float_cmp::approx_eq;

    fn spot() -> SpotLight {
        SpotLight::new(
            Point3f::new(0.0, 0.0, 0.0),
            Vector3f::new(0.0, 0.0, -1.0),
            Spectrum::new(3.0),
            20.0,
            40.0,
        )
    }

    #[test]
    fn cone_regions() {
        let light = spot();
        let u = Point2f::new(0.5, 0.5);

        // On the axis one unit below.
        let li = light.sample_li(&Point3f::new(0.0, 0.0, -1.0), None, &u, 0.0);
        assert_eq!(li.value, Spectrum::new(3.0));

        // Outside the outer cone.
        let li = light.sample_li(&Point3f::new(1.0, 0.0, -1.0), None, &u, 0.0);
        assert!(li.value.is_black());

        // Inside the falloff band.
        let li = light.sample_li(&Point3f::new(0.5, 0.0, -1.0), None, &u, 0.0);
        assert!(li.value[0] > 0.0 && li.value[0] < 3.0 / 1.25);
    }

    #[test]
    fn power_matches_integrated_intensity() {
        let light = spot();
        let mut rng = RNG::new(2);
        let n = 400_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let w = uniform_sample_sphere(&Point2f::new(rng.uniform_float(), rng.uniform_float()));
            // Place a point one unit from the light in direction `w`.
            let li = light.sample_li(&Point3f::from(w), None, &Point2f::default(), 0.0);
            sum += li.value[0] / uniform_sphere_pdf();
        }
        let estimate = sum / n as Float;
        assert!(approx_eq!(Float, estimate, light.power()[0], epsilon = 0.02 * light.power()[0]));
    }
}
