//! Diffuse Area Light Source

use core::geometry::*;
use core::light::*;
use core::mesh::*;
use core::pbrt::*;
use core::spectrum::*;
use std::sync::Arc;

/// Implements a one-sided area light source with uniform radiance over a
/// triangle mesh. Light leaves each triangle on the side its normal points
/// to.
#[derive(Clone)]
pub struct DiffuseAreaLight {
    /// Emitted radiance.
    pub l_emit: Spectrum,

    /// Mesh describing the surface of the light source.
    pub mesh: Arc<TriangleMesh>,
}

impl DiffuseAreaLight {
    /// Returns a new `DiffuseAreaLight`.
    ///
    /// * `mesh`   - Mesh describing the surface of the light source.
    /// * `l_emit` - Emitted radiance.
    pub fn new(mesh: Arc<TriangleMesh>, l_emit: Spectrum) -> Self {
        debug_assert!(l_emit.min_component_value() >= 0.0);
        if mesh.num_triangles() == 0 {
            warn!("Diffuse area light with an empty mesh emits nothing");
        }
        Self { l_emit, mesh }
    }

    /// Converts an area density at a light point to a solid angle density.
    ///
    /// * `distance` - Distance from the lit point to the light point.
    /// * `cos`      - Cosine between the direction and the light normal.
    fn solid_angle_pdf(&self, distance: Float, cos: Float) -> Float {
        let denom = self.mesh.area() * abs(cos);
        if denom > 0.0 {
            distance * distance / denom
        } else {
            0.0
        }
    }
}

impl Light for DiffuseAreaLight {
    fn get_type(&self) -> LightType {
        LightType::AREA_LIGHT
    }

    fn power(&self) -> Spectrum {
        self.l_emit * (PI * self.mesh.area())
    }

    /// Samples a point on the mesh uniformly by area. `u_component` picks the
    /// triangle. The ray ends at the sampled point.
    fn sample_li(&self, p: &Point3f, _n: Option<&Normal3f>, u: &Point2f, u_component: Float) -> Li {
        let (p_light, n_light, _) = match self.mesh.sample_point(u_component, u) {
            Some(s) => s,
            None => return Li::none(p),
        };

        let v = p_light - *p;
        let distance = v.length();
        if distance == 0.0 {
            return Li::none(p);
        }

        let wi = v / distance;
        let pdf = self.solid_angle_pdf(distance, wi.dot(&n_light));
        let value = if n_light.dot(&-wi) > 0.0 {
            self.l_emit
        } else {
            Spectrum::ZERO
        };
        Li::new(Ray::new(*p, wi, 0.0, distance), pdf, value)
    }

    /// Traces the direction against the mesh and converts the area density
    /// of the hit point. Directions that miss have zero density.
    fn pdf_li(&self, p: &Point3f, _n: Option<&Normal3f>, wi: &Vector3f) -> Float {
        match self.mesh.intersect(&Ray::infinite(*p, *wi)) {
            Some(hit) => self.solid_angle_pdf(hit.t, wi.dot(&hit.dg.geometric_normal)),
            None => 0.0,
        }
    }

    fn l(&self, dg: &DifferentialGeometry, w: &Vector3f) -> Spectrum {
        if w.dot(&dg.geometric_normal) > 0.0 {
            self.l_emit
        } else {
            Spectrum::ZERO
        }
    }

    fn bounds(&self) -> Bounds3f {
        self.mesh.bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::rng::*;
    use core::sampling::*;
    use float_cmp::approx_eq;

    /// Unit square at z = 1 facing down.
    fn panel(l: Float) -> DiffuseAreaLight {
        let mesh = TriangleMesh::new(
            vec![
                Point3f::new(0.0, 0.0, 1.0),
                Point3f::new(0.0, 1.0, 1.0),
                Point3f::new(1.0, 1.0, 1.0),
                Point3f::new(1.0, 0.0, 1.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        );
        DiffuseAreaLight::new(Arc::new(mesh), Spectrum::new(l))
    }

    #[test]
    fn one_sided_emission() {
        let light = panel(2.0);
        assert!(approx_eq!(Float, light.power()[0], 2.0 * PI, ulps = 4));
        assert_eq!(light.get_type(), LightType::AREA_LIGHT);

        let below = Point3f::new(0.5, 0.5, 0.0);
        let li = light.sample_li(&below, None, &Point2f::new(0.3, 0.6), 0.25);
        assert_eq!(li.value, Spectrum::new(2.0));
        assert!(li.pdf > 0.0);
        assert!(li.wi().z > 0.0);

        let above = Point3f::new(0.5, 0.5, 2.0);
        let li = light.sample_li(&above, None, &Point2f::new(0.3, 0.6), 0.25);
        assert!(li.value.is_black());

        let dg = DifferentialGeometry::from_normal(below, Normal3f::new(0.0, 0.0, -1.0));
        assert_eq!(light.l(&dg, &Vector3f::new(0.0, 0.0, -1.0)), Spectrum::new(2.0));
        assert!(light.l(&dg, &Vector3f::new(0.0, 0.0, 1.0)).is_black());
    }

    #[test]
    fn pdf_agrees_with_sampling() {
        let light = panel(1.0);
        let p = Point3f::new(0.2, 0.7, 0.0);
        let mut rng = RNG::new(4);
        for _ in 0..100 {
            let u = Point2f::new(rng.uniform_float(), rng.uniform_float());
            let li = light.sample_li(&p, None, &u, rng.uniform_float());
            let pdf = light.pdf_li(&p, None, &li.wi());
            assert!(approx_eq!(Float, pdf, li.pdf, epsilon = 1e-6 * li.pdf));
        }
        assert_eq!(light.pdf_li(&p, None, &Vector3f::new(0.0, 0.0, -1.0)), 0.0);
    }

    #[test]
    fn pdf_integrates_to_one_over_visible_directions() {
        let light = panel(1.0);
        let p = Point3f::new(0.5, 0.5, 0.0);
        let mut rng = RNG::new(8);
        let n = 200_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let u = Point2f::new(rng.uniform_float(), rng.uniform_float());
            let w = uniform_sample_hemisphere(&u);
            sum += light.pdf_li(&p, None, &w) / uniform_hemisphere_pdf();
        }
        assert!(approx_eq!(Float, sum / n as Float, 1.0, epsilon = 0.02));
    }
}
