//! Distant Light Source

use core::geometry::*;
use core::light::*;
use core::pbrt::*;
use core::spectrum::*;

/// Implements a directional light source that deposits illumination from the
/// same direction at every point in space.
#[derive(Clone, Debug)]
pub struct DistantLight {
    /// Normalized direction the light travels in.
    pub w_light: Vector3f,

    /// The emitted radiance `L`.
    pub emitted_radiance: Spectrum,

    /// Area of the world bounds projected onto a plane perpendicular to the
    /// light direction.
    projected_area: Float,
}

impl DistantLight {
    /// Returns a new `DistantLight`.
    ///
    /// * `w_light`          - Direction the light travels in.
    /// * `emitted_radiance` - The emitted radiance.
    /// * `world_bound`      - Bounds of the scene. Only used for the power.
    pub fn new(w_light: Vector3f, emitted_radiance: Spectrum, world_bound: &Bounds3f) -> Self {
        let w_light = w_light.normalize();
        let projected_area = if world_bound.is_empty() {
            0.0
        } else {
            let d = world_bound.diagonal();
            d.x * d.y * abs(w_light.z) + d.x * d.z * abs(w_light.y) + d.y * d.z * abs(w_light.x)
        };
        if projected_area == 0.0 {
            debug!("Distant light has zero power for world bounds {:?}", world_bound);
        }

        Self {
            w_light,
            emitted_radiance,
            projected_area,
        }
    }
}

impl Light for DistantLight {
    fn get_type(&self) -> LightType {
        LightType::DELTA_DIRECTION_LIGHT
    }

    /// Returns the radiance that crosses the world bounds.
    fn power(&self) -> Spectrum {
        self.emitted_radiance * self.projected_area
    }

    fn sample_li(&self, p: &Point3f, _n: Option<&Normal3f>, _u: &Point2f, _u_component: Float) -> Li {
        Li::new(Ray::infinite(*p, -self.w_light), 1.0, self.emitted_radiance)
    }

    fn pdf_li(&self, _p: &Point3f, _n: Option<&Normal3f>, _wi: &Vector3f) -> Float {
        0.0
    }
}
