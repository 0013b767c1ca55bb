//! Aggregate Volume Region

use core::geometry::*;
use core::medium::*;
use core::pbrt::*;
use core::spectrum::*;
use std::sync::Arc;

/// Composes several volume regions. Coefficients and optical thickness are
/// the sums of the children's.
pub struct AggregateVolumeRegion {
    /// The child regions.
    regions: Vec<ArcVolumeRegion>,

    /// Union of the child bounds.
    bounds: Bounds3f,
}

impl AggregateVolumeRegion {
    /// Create a new `AggregateVolumeRegion`.
    ///
    /// * `regions` - The child regions.
    pub fn new(regions: Vec<ArcVolumeRegion>) -> Self {
        if regions.is_empty() {
            warn!("AggregateVolumeRegion has no child regions");
        }
        let bounds = regions
            .iter()
            .fold(Bounds3f::empty(), |b, region| b.union(&region.bounds()));
        Self { regions, bounds }
    }

    /// Returns the child regions.
    pub fn regions(&self) -> Vec<ArcVolumeRegion> {
        self.regions.iter().map(Arc::clone).collect()
    }

    /// Sums a coefficient over the children.
    #[inline]
    fn sum<F>(&self, f: F) -> Spectrum
    where
        F: Fn(&ArcVolumeRegion) -> Spectrum,
    {
        self.regions.iter().fold(Spectrum::ZERO, |acc, r| acc + f(r))
    }
}

impl VolumeRegion for AggregateVolumeRegion {
    fn bounds(&self) -> Bounds3f {
        self.bounds
    }

    /// Returns the range from the nearest child entry to the farthest child
    /// exit.
    fn intersect(&self, ray: &Ray) -> Option<(Float, Float)> {
        self.regions
            .iter()
            .filter_map(|r| r.intersect(ray))
            .fold(None, |range, (t0, t1)| match range {
                Some((b, e)) => Some((min(b, t0), max(e, t1))),
                None => Some((t0, t1)),
            })
    }

    fn emission(&self, p: &Point3f) -> Spectrum {
        self.sum(|r| r.emission(p))
    }

    fn absorption(&self, p: &Point3f) -> Spectrum {
        self.sum(|r| r.absorption(p))
    }

    fn scattering(&self, p: &Point3f) -> Spectrum {
        self.sum(|r| r.scattering(p))
    }

    fn attenuation(&self, p: &Point3f) -> Spectrum {
        self.sum(|r| r.attenuation(p))
    }

    /// Mixes the children's phase functions weighted by their local
    /// scattering luminance.
    fn phase(&self, p: &Point3f, incoming: &Vector3f, outgoing: &Vector3f) -> Float {
        let (value, total_weight) = self.regions.iter().fold((0.0, 0.0), |(value, total), r| {
            let w = r.scattering(p).y();
            if w > 0.0 {
                (value + w * r.phase(p, incoming, outgoing), total + w)
            } else {
                (value, total)
            }
        });
        if total_weight > 0.0 {
            value / total_weight
        } else {
            0.0
        }
    }

    fn optical_thickness(&self, ray: &Ray, step: Float, offset: Float) -> Spectrum {
        self.sum(|r| r.optical_thickness(ray, step, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HomogeneousVolumeRegion;
    use float_cmp::approx_eq;

    fn slab(x0: Float, x1: Float, scattering: Spectrum, g: Float) -> ArcVolumeRegion {
        Arc::new(HomogeneousVolumeRegion::new(
            Bounds3f::new(Point3f::new(x0, 0.0, 0.0), Point3f::new(x1, 1.0, 1.0)),
            Spectrum::new(0.1),
            Spectrum::new(0.5),
            scattering,
            PhaseFunction::HenyeyGreenstein(HenyeyGreenstein::new(g)),
        ))
    }

    fn pair() -> AggregateVolumeRegion {
        AggregateVolumeRegion::new(vec![
            slab(0.0, 2.0, Spectrum::new(1.0), 0.5),
            slab(1.0, 4.0, Spectrum::new(3.0), -0.5),
        ])
    }

    #[test]
    fn bounds_and_range_cover_children() {
        let a = pair();
        assert_eq!(a.bounds(), Bounds3f::new(Point3f::new(0.0, 0.0, 0.0), Point3f::new(4.0, 1.0, 1.0)));

        let ray = Ray::infinite(Point3f::new(-1.0, 0.5, 0.5), Vector3f::new(1.0, 0.0, 0.0));
        let (t0, t1) = a.intersect(&ray).unwrap();
        assert!(approx_eq!(Float, t0, 1.0, ulps = 2));
        assert!(approx_eq!(Float, t1, 5.0, ulps = 2));

        let miss = Ray::infinite(Point3f::new(-1.0, 5.0, 0.5), Vector3f::new(1.0, 0.0, 0.0));
        assert!(a.intersect(&miss).is_none());
        assert!(AggregateVolumeRegion::new(vec![]).intersect(&ray).is_none());
    }

    #[test]
    fn coefficients_sum() {
        let a = pair();
        let overlap = Point3f::new(1.5, 0.5, 0.5);
        let single = Point3f::new(3.0, 0.5, 0.5);
        assert_eq!(a.scattering(&overlap), Spectrum::new(4.0));
        assert_eq!(a.absorption(&overlap), Spectrum::new(1.0));
        assert_eq!(a.emission(&single), Spectrum::new(0.1));
        assert_eq!(a.attenuation(&single), Spectrum::new(3.5));

        let ray = Ray::infinite(Point3f::new(-1.0, 0.5, 0.5), Vector3f::new(1.0, 0.0, 0.0));
        // 2 * 1.5 + 3 * 3.5
        assert!(approx_eq!(Float, a.optical_thickness(&ray, 0.1, 0.5)[1], 13.5, epsilon = 1e-12));
    }

    #[test]
    fn phase_is_scattering_weighted() {
        let a = pair();
        let d = Vector3f::new(1.0, 0.0, 0.0);
        let e = Vector3f::new(0.0, 1.0, 0.0);
        let overlap = Point3f::new(1.5, 0.5, 0.5);
        let expected = (1.0 * phase_hg(0.0, 0.5) + 3.0 * phase_hg(0.0, -0.5)) / 4.0;
        assert!(approx_eq!(Float, a.phase(&overlap, &d, &e), expected, ulps = 4));

        // Only the first child scatters here.
        let first = Point3f::new(0.5, 0.5, 0.5);
        assert!(approx_eq!(Float, a.phase(&first, &d, &d), phase_hg(1.0, 0.5), ulps = 4));
        assert_eq!(a.phase(&Point3f::new(9.0, 0.5, 0.5), &d, &d), 0.0);
    }
}
