//! Scene

use crate::geometry::*;
use crate::light::*;
use crate::medium::*;
use crate::primitives::*;
use crate::spectrum::*;
use std::sync::Arc;

/// Scene. Built once before rendering and shared read-only by all rendering
/// threads.
#[derive(Clone)]
pub struct Scene {
    /// An aggregate of all primitives in the scene.
    pub aggregate: ArcPrimitive,

    /// All light sources in the scene grouped by how they are sampled.
    pub light_sources: LightSources,

    /// Optional participating medium.
    pub volume_region: Option<ArcVolumeRegion>,

    /// The bounding box of the scene geometry and medium.
    pub world_bound: Bounds3f,
}

impl Scene {
    /// Creates a new `Scene`.
    ///
    /// * `aggregate`     - An aggregate of all primitives in the scene.
    /// * `lights`        - All light sources in the scene.
    /// * `volume_region` - Optional participating medium.
    pub fn new(aggregate: ArcPrimitive, lights: Vec<ArcLight>, volume_region: Option<ArcVolumeRegion>) -> Self {
        let mut world_bound = aggregate.world_bound();
        if let Some(region) = volume_region.as_ref() {
            world_bound = world_bound.union(&region.bounds());
        }

        Self {
            aggregate,
            light_sources: LightSources::new(lights),
            volume_region,
            world_bound,
        }
    }

    /// Traces the ray into the scene and returns the nearest intersection.
    /// The ray's `t_max` is shortened to the hit.
    ///
    /// * `ray` - The ray to trace.
    pub fn intersect(&self, ray: &mut Ray) -> Option<Intersection<'_>> {
        self.aggregate.intersect(ray)
    }

    /// Traces the ray into the scene and returns whether or not an
    /// intersection occurred.
    ///
    /// * `ray` - The ray to trace.
    pub fn intersect_p(&self, ray: &Ray) -> bool {
        self.aggregate.intersect_p(ray)
    }

    /// Returns the light sources.
    pub fn get_light_sources(&self) -> &LightSources {
        &self.light_sources
    }

    /// Returns the participating medium if there is one.
    pub fn get_volume_region(&self) -> Option<&ArcVolumeRegion> {
        self.volume_region.as_ref()
    }

    /// Returns the radiance infinite lights send along a ray that escapes
    /// the scene.
    ///
    /// * `ray` - The ray.
    pub fn infinite_radiance(&self, ray: &Ray) -> Spectrum {
        self.light_sources
            .infinite
            .iter()
            .fold(Spectrum::ZERO, |l, light| l + light.le(ray))
    }
}

/// Atomic reference counted `Scene`.
pub type ArcScene = Arc<Scene>;
