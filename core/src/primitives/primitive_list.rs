//! Primitive List

use super::*;

/// Aggregate that tests every child primitive in turn.
#[derive(Clone, Default)]
pub struct PrimitiveList {
    /// The child primitives.
    primitives: Vec<ArcPrimitive>,

    /// Union of the child bounds.
    bounds: Bounds3f,
}

impl PrimitiveList {
    /// Create a new `PrimitiveList`.
    ///
    /// * `primitives` - The child primitives.
    pub fn new(primitives: Vec<ArcPrimitive>) -> Self {
        let bounds = primitives
            .iter()
            .fold(Bounds3f::empty(), |b, p| b.union(&p.world_bound()));
        debug!("Primitive list with {} primitives", primitives.len());
        Self { primitives, bounds }
    }

    /// Returns the number of child primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Returns true if there are no child primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl Primitive for PrimitiveList {
    fn world_bound(&self) -> Bounds3f {
        self.bounds
    }

    fn intersect(&self, ray: &mut Ray) -> Option<Intersection<'_>> {
        // Each hit shortens the ray so later children only report nearer hits.
        let mut nearest = None;
        for primitive in self.primitives.iter() {
            if let Some(hit) = primitive.intersect(ray) {
                nearest = Some(hit);
            }
        }
        nearest
    }

    fn intersect_p(&self, ray: &Ray) -> bool {
        self.primitives.iter().any(|p| p.intersect_p(ray))
    }

    /// Aggregates are never hit directly, so they carry no light.
    fn get_area_light(&self) -> Option<&ArcLight> {
        None
    }

    fn get_bsdf<'arena>(
        &self,
        _dg: &DifferentialGeometry,
        _triangle_index: usize,
        _arena: &'arena Bump,
    ) -> Option<&'arena BSDF<'arena>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::*;
    use crate::mesh::*;
    use crate::spectrum::*;

    /// Unit square in the plane z = `z` with the normal facing -z.
    fn square(z: Float) -> Arc<TriangleMesh> {
        Arc::new(TriangleMesh::new(
            vec![
                Point3f::new(0.0, 0.0, z),
                Point3f::new(0.0, 1.0, z),
                Point3f::new(1.0, 1.0, z),
                Point3f::new(1.0, 0.0, z),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        ))
    }

    fn list() -> PrimitiveList {
        let matte: ArcMaterial = Arc::new(MatteMaterial::new(Spectrum::new(0.5), 0.0));
        PrimitiveList::new(vec![
            Arc::new(GeometricPrimitive::new(square(2.0), Some(Arc::clone(&matte)), None)),
            Arc::new(GeometricPrimitive::new(square(1.0), None, None)),
        ])
    }

    #[test]
    fn nearest_hit_wins() {
        let list = list();
        assert_eq!(list.len(), 2);
        let b = list.world_bound();
        assert_eq!(b.p_min, Point3f::new(0.0, 0.0, 1.0));
        assert_eq!(b.p_max, Point3f::new(1.0, 1.0, 2.0));

        let mut ray = Ray::infinite(Point3f::new(0.5, 0.25, 0.0), Vector3f::new(0.0, 0.0, 1.0));
        let hit = list.intersect(&mut ray).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-12);
        assert!((ray.t_max - 1.0).abs() < 1e-12);
        assert!(hit.primitive.get_area_light().is_none());

        // The nearer square has no material.
        let arena = Bump::new();
        assert!(hit.get_bsdf(&arena).is_none());
        assert!(hit.le(&-ray.d).is_black());
    }

    #[test]
    fn shadow_queries_respect_extent() {
        let list = list();
        let o = Point3f::new(0.5, 0.5, 0.0);
        let d = Vector3f::new(0.0, 0.0, 1.0);
        assert!(list.intersect_p(&Ray::new(o, d, 0.0, 1.5)));
        assert!(!list.intersect_p(&Ray::new(o, d, 0.0, 0.5)));
        assert!(!list.intersect_p(&Ray::infinite(o, -d)));
    }

    #[test]
    fn hit_with_material_gives_bsdf() {
        let matte: ArcMaterial = Arc::new(MatteMaterial::new(Spectrum::new(0.5), 0.0));
        let prim = GeometricPrimitive::new(square(2.0), Some(matte), None);
        let mut ray = Ray::infinite(Point3f::new(0.5, 0.5, 0.0), Vector3f::new(0.0, 0.0, 1.0));
        let hit = prim.intersect(&mut ray).unwrap();
        let arena = Bump::new();
        let bsdf = hit.get_bsdf(&arena).unwrap();
        assert_eq!(bsdf.num_components(BxDFType::BSDF_ALL), 1);
    }
}
