//! Primitive

use crate::geometry::*;
use crate::light::*;
use crate::pbrt::*;
use crate::reflection::*;
use crate::spectrum::*;
use bumpalo::Bump;
use std::sync::Arc;

mod geometric_primitive;
mod primitive_list;

// Re-export
pub use geometric_primitive::*;
pub use primitive_list::*;

/// Result of a ray-primitive intersection.
#[derive(Copy, Clone)]
pub struct Intersection<'scene> {
    /// Ray parameter at the hit point.
    pub t: Float,

    /// Local geometry at the hit point.
    pub dg: DifferentialGeometry,

    /// Index of the triangle that was hit.
    pub triangle_index: usize,

    /// The primitive that was hit.
    pub primitive: &'scene dyn Primitive,
}

impl<'scene> Intersection<'scene> {
    /// Returns the radiance emitted from the hit point in direction `w` if
    /// the primitive is an area light.
    ///
    /// * `w` - Outgoing direction.
    pub fn le(&self, w: &Vector3f) -> Spectrum {
        self.primitive
            .get_area_light()
            .map_or(Spectrum::ZERO, |light| light.l(&self.dg, w))
    }

    /// Returns the BSDF at the hit point.
    ///
    /// * `arena` - The arena for memory allocations.
    pub fn get_bsdf<'arena>(&self, arena: &'arena Bump) -> Option<&'arena BSDF<'arena>> {
        self.primitive.get_bsdf(&self.dg, self.triangle_index, arena)
    }
}

/// Primitive trait connects geometry and shading.
pub trait Primitive {
    /// Returns a bounding box in the world space.
    fn world_bound(&self) -> Bounds3f;

    /// Returns the nearest intersection along the ray and shortens the
    /// ray's `t_max` to it.
    ///
    /// * `ray` - The ray.
    fn intersect(&self, ray: &mut Ray) -> Option<Intersection<'_>>;

    /// Returns `true` if the ray hits the primitive within its extent.
    ///
    /// * `ray` - The ray.
    fn intersect_p(&self, ray: &Ray) -> bool;

    /// Returns the area light attached to the primitive if it is emissive.
    fn get_area_light(&self) -> Option<&ArcLight>;

    /// Returns the BSDF at a point on the primitive or `None` when the
    /// primitive has no material.
    ///
    /// * `dg`             - The differential geometry at the point.
    /// * `triangle_index` - Index of the triangle containing the point.
    /// * `arena`          - The arena for memory allocations.
    fn get_bsdf<'arena>(
        &self,
        dg: &DifferentialGeometry,
        triangle_index: usize,
        arena: &'arena Bump,
    ) -> Option<&'arena BSDF<'arena>>;
}

/// Atomic reference counted `Primitive`.
pub type ArcPrimitive = Arc<dyn Primitive + Send + Sync>;
