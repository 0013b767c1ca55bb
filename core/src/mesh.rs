//! Triangle Mesh

use crate::geometry::*;
use crate::pbrt::*;
use crate::sampling::*;

/// Result of a ray-mesh intersection.
#[derive(Copy, Clone, Debug)]
pub struct MeshHit {
    /// Ray parameter at the hit point.
    pub t: Float,

    /// Index of the triangle that was hit.
    pub triangle_index: usize,

    /// Local geometry at the hit point.
    pub dg: DifferentialGeometry,
}

/// An indexed triangle mesh with a flat normal per triangle.
#[derive(Clone, Debug)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3f>,

    /// Vertex indices for each triangle.
    pub triangles: Vec<[usize; 3]>,

    /// Unit geometric normal for each triangle, following the winding order.
    normals: Vec<Normal3f>,

    /// Area-proportional CDF used to pick a triangle.
    area_cdf: Vec<Float>,

    /// Total surface area.
    area: Float,

    /// Bounding box of all vertices.
    bounds: Bounds3f,
}

impl TriangleMesh {
    /// Create a new `TriangleMesh`.
    ///
    /// * `vertices`  - Vertex positions.
    /// * `triangles` - Vertex indices for each triangle.
    pub fn new(vertices: Vec<Point3f>, triangles: Vec<[usize; 3]>) -> Self {
        debug_assert!(triangles.iter().flatten().all(|&i| i < vertices.len()));

        let bounds = vertices
            .iter()
            .fold(Bounds3f::empty(), |b, p| b.union_point(p));

        let mut normals = Vec::with_capacity(triangles.len());
        let mut area_cdf = Vec::with_capacity(triangles.len());
        for tri in triangles.iter() {
            let e1 = vertices[tri[1]] - vertices[tri[0]];
            let e2 = vertices[tri[2]] - vertices[tri[0]];
            let c = e1.cross(&e2);
            let len = c.length();
            normals.push(if len > 0.0 {
                Normal3f::from(c / len)
            } else {
                Normal3f::zero()
            });
            area_cdf.push(0.5 * len);
        }
        let area = area_cdf.iter().sum();
        weights_to_cdf(&mut area_cdf);

        Self {
            vertices,
            triangles,
            normals,
            area_cdf,
            area,
            bounds,
        }
    }

    /// Returns the number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Returns the total surface area.
    pub fn area(&self) -> Float {
        self.area
    }

    /// Returns the bounding box of the mesh.
    pub fn bounds(&self) -> Bounds3f {
        self.bounds
    }

    /// Returns the vertices of a triangle.
    ///
    /// * `i` - Triangle index.
    pub fn triangle(&self, i: usize) -> [Point3f; 3] {
        let tri = self.triangles[i];
        [self.vertices[tri[0]], self.vertices[tri[1]], self.vertices[tri[2]]]
    }

    /// Returns the geometric normal of a triangle.
    ///
    /// * `i` - Triangle index.
    pub fn triangle_normal(&self, i: usize) -> Normal3f {
        self.normals[i]
    }

    /// Samples a point uniformly with respect to surface area. Returns the
    /// point, the normal of the triangle it lies on and the triangle index,
    /// or `None` for an empty mesh.
    ///
    /// * `u_triangle` - Sample in [0, 1) used to pick the triangle.
    /// * `u`          - Sample in [0, 1)^2 used to pick a point on it.
    pub fn sample_point(&self, u_triangle: Float, u: &Point2f) -> Option<(Point3f, Normal3f, usize)> {
        if self.area_cdf.is_empty() {
            return None;
        }

        let (i, _) = sample_discrete_cdf(&self.area_cdf, u_triangle);
        let [p0, p1, p2] = self.triangle(i);
        let b = uniform_sample_triangle(u);
        let p = b[0] * p0 + b[1] * p1 + (1.0 - b[0] - b[1]) * p2;
        Some((p, self.normals[i], i))
    }

    /// Returns the nearest intersection of the ray with the mesh within the
    /// ray's extent.
    ///
    /// * `ray` - The ray.
    pub fn intersect(&self, ray: &Ray) -> Option<MeshHit> {
        let mut nearest: Option<(Float, usize)> = None;
        let mut t_max = ray.t_max;
        for i in 0..self.triangles.len() {
            if let Some(t) = self.intersect_triangle(i, ray, t_max) {
                t_max = t;
                nearest = Some((t, i));
            }
        }

        nearest.map(|(t, i)| {
            let n = self.normals[i];
            let [p0, p1, _] = self.triangle(i);
            let e1 = p1 - p0;
            let tangent = if e1.length_squared() > 0.0 {
                e1.normalize()
            } else {
                coordinate_system(&Vector3f::from(n)).0
            };
            MeshHit {
                t,
                triangle_index: i,
                dg: DifferentialGeometry::new(ray.at(t), n, n, tangent),
            }
        })
    }

    /// Returns true if the ray hits any triangle within its extent.
    ///
    /// * `ray` - The ray.
    pub fn intersect_p(&self, ray: &Ray) -> bool {
        (0..self.triangles.len()).any(|i| self.intersect_triangle(i, ray, ray.t_max).is_some())
    }

    /// Möller-Trumbore test of a single triangle. Returns the ray parameter
    /// of the hit if it lies in `(ray.t_min, t_max)`.
    fn intersect_triangle(&self, i: usize, ray: &Ray, t_max: Float) -> Option<Float> {
        let [p0, p1, p2] = self.triangle(i);
        let e1 = p1 - p0;
        let e2 = p2 - p0;

        let h = ray.d.cross(&e2);
        let a = e1.dot(&h);
        if abs(a) < EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.o - p0;
        let u = f * s.dot(&h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&e1);
        let v = f * ray.d.dot(&q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * e2.dot(&q);
        if t > ray.t_min && t < t_max {
            Some(t)
        } else {
            None
        }
    }
}
