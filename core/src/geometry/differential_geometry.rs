//! Differential Geometry

use super::*;

/// Local geometry at a surface hit point.
#[derive(Copy, Clone, Debug, Default)]
pub struct DifferentialGeometry {
    /// The hit point.
    pub point: Point3f,

    /// Normal defined by the surface geometry.
    pub geometric_normal: Normal3f,

    /// Possibly perturbed normal used for shading.
    pub shading_normal: Normal3f,

    /// Unit tangent perpendicular to the shading normal.
    pub tangent: Vector3f,
}

impl DifferentialGeometry {
    /// Create a new `DifferentialGeometry`.
    ///
    /// * `point`            - The hit point.
    /// * `geometric_normal` - Normal defined by the surface geometry.
    /// * `shading_normal`   - Normal used for shading.
    /// * `tangent`          - Unit tangent perpendicular to `shading_normal`.
    pub fn new(
        point: Point3f,
        geometric_normal: Normal3f,
        shading_normal: Normal3f,
        tangent: Vector3f,
    ) -> Self {
        Self {
            point,
            geometric_normal,
            shading_normal,
            tangent,
        }
    }

    /// Create a new `DifferentialGeometry` where the shading and geometric
    /// normals coincide. An arbitrary tangent is chosen.
    ///
    /// * `point`  - The hit point.
    /// * `normal` - Unit surface normal.
    pub fn from_normal(point: Point3f, normal: Normal3f) -> Self {
        let (tangent, _) = coordinate_system(&Vector3f::from(normal));
        Self::new(point, normal, normal, tangent)
    }
}
