//! Light

use crate::geometry::*;
use crate::pbrt::*;
use crate::spectrum::*;
use std::sync::Arc;

mod light_sources;
mod light_type;

// Re-export
pub use light_sources::*;
pub use light_type::*;

/// Return value for `Light::sample_li()`.
#[derive(Copy, Clone, Debug)]
pub struct Li {
    /// Ray from the lit point toward the light. Its extent ends at the light
    /// for lights at a finite distance.
    pub ray: Ray,

    /// PDF with respect to solid angle. Delta lights report 1.
    pub pdf: Float,

    /// Radiance arriving at the lit point.
    pub value: Spectrum,
}

impl Li {
    /// Return a new `Li`.
    ///
    /// * `ray`   - Ray from the lit point toward the light.
    /// * `pdf`   - PDF with respect to solid angle.
    /// * `value` - Radiance arriving at the lit point.
    pub fn new(ray: Ray, pdf: Float, value: Spectrum) -> Self {
        Self { ray, pdf, value }
    }

    /// Returns the sample of a light that contributes nothing to `p`.
    ///
    /// * `p` - The lit point.
    pub fn none(p: &Point3f) -> Self {
        Self::new(Ray::new(*p, Vector3f::zero(), 0.0, 0.0), 0.0, Spectrum::ZERO)
    }

    /// Returns the incident direction.
    pub fn wi(&self) -> Vector3f {
        self.ray.d
    }

    /// Returns true if the sample carries no energy.
    pub fn is_empty(&self) -> bool {
        self.pdf == 0.0 || self.value.is_black()
    }
}

/// Light trait provides common behavior.
pub trait Light {
    /// Returns the type of light.
    fn get_type(&self) -> LightType;

    /// Return the total emitted power. Only used to weight lights against each
    /// other.
    fn power(&self) -> Spectrum;

    /// Samples the radiance arriving at a point.
    ///
    /// * `p`           - The lit point.
    /// * `n`           - If given, infinite lights only sample the hemisphere
    ///                   around this normal.
    /// * `u`           - Sample value in [0, 1)^2.
    /// * `u_component` - Sample value in [0, 1) used by lights that first pick
    ///                   one of their parts, e.g. a mesh triangle.
    fn sample_li(&self, p: &Point3f, n: Option<&Normal3f>, u: &Point2f, u_component: Float) -> Li;

    /// Returns the probability density with respect to solid angle for the
    /// light’s `sample_li()` to produce the given direction.
    ///
    /// * `p`  - The lit point.
    /// * `n`  - The normal passed to `sample_li()`.
    /// * `wi` - The incident direction.
    fn pdf_li(&self, p: &Point3f, n: Option<&Normal3f>, wi: &Vector3f) -> Float;

    /// Returns emitted radiance along a ray that escapes the scene.
    ///
    /// * `ray` - The ray.
    fn le(&self, _ray: &Ray) -> Spectrum {
        Spectrum::ZERO
    }

    /// Returns the radiance an area light emits from a point on its surface.
    ///
    /// * `dg` - The point on the light surface.
    /// * `w`  - Outgoing direction.
    fn l(&self, _dg: &DifferentialGeometry, _w: &Vector3f) -> Spectrum {
        Spectrum::ZERO
    }

    /// Returns the irradiance an infinite light delivers to a surface with the
    /// given normal.
    ///
    /// * `n` - Surface normal.
    fn irradiance(&self, _n: &Normal3f) -> Spectrum {
        Spectrum::ZERO
    }

    /// Returns the irradiance an infinite light delivers to a point from the
    /// whole sphere.
    fn fluence(&self) -> Spectrum {
        Spectrum::ZERO
    }

    /// Returns the bounds of the emitting surface of an area light.
    fn bounds(&self) -> Bounds3f {
        Bounds3f::empty()
    }

    /// Returns whether light source is a delta light.
    fn is_delta_light(&self) -> bool {
        self.get_type().is_delta_light()
    }
}

/// Atomic reference counted `Light`.
pub type ArcLight = Arc<dyn Light + Send + Sync>;

/// Returns true if both handles point to the same light.
///
/// * `a` - First light.
/// * `b` - Second light.
#[inline]
pub fn same_light(a: &ArcLight, b: &ArcLight) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}
