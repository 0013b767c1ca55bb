//! Geometric Primitives

use super::*;
use crate::material::*;
use crate::mesh::*;

/// GeometricPrimitive represents a single triangle mesh in a scene.
#[derive(Clone)]
pub struct GeometricPrimitive {
    /// The mesh.
    pub mesh: Arc<TriangleMesh>,

    /// The material. Primitives without one only block light.
    pub material: Option<ArcMaterial>,

    /// Optional area light that describes emission characteristics if it
    /// emits light.
    pub area_light: Option<ArcLight>,
}

impl GeometricPrimitive {
    /// Create a new geometric primitive.
    ///
    /// * `mesh`       - The mesh.
    /// * `material`   - The material.
    /// * `area_light` - Optional area light built on the same mesh.
    pub fn new(mesh: Arc<TriangleMesh>, material: Option<ArcMaterial>, area_light: Option<ArcLight>) -> Self {
        Self {
            mesh,
            material,
            area_light,
        }
    }
}

impl Primitive for GeometricPrimitive {
    fn world_bound(&self) -> Bounds3f {
        self.mesh.bounds()
    }

    fn intersect(&self, ray: &mut Ray) -> Option<Intersection<'_>> {
        let hit = self.mesh.intersect(ray)?;
        ray.t_max = hit.t;
        Some(Intersection {
            t: hit.t,
            dg: hit.dg,
            triangle_index: hit.triangle_index,
            primitive: self,
        })
    }

    fn intersect_p(&self, ray: &Ray) -> bool {
        self.mesh.intersect_p(ray)
    }

    fn get_area_light(&self) -> Option<&ArcLight> {
        self.area_light.as_ref()
    }

    fn get_bsdf<'arena>(
        &self,
        dg: &DifferentialGeometry,
        _triangle_index: usize,
        arena: &'arena Bump,
    ) -> Option<&'arena BSDF<'arena>> {
        self.material.as_ref().map(|material| material.compute_bsdf(dg, arena))
    }
}
