//! Grid Density Volume Region

use core::error::*;
use core::geometry::*;
use core::medium::*;
use core::pbrt::*;
use itertools::{Itertools, MinMaxResult};

/// Volume region whose coefficients are scaled by a `GridDensity`.
pub type GridDensityVolumeRegion = DensityVolumeRegion<GridDensity>;

/// Implements densities at a regular 3D grid of positions spanning a box.
/// Samples sit at voxel centres and are trilinearly interpolated between
/// them. Points outside the outermost centres take the nearest edge values.
#[derive(Clone, Debug)]
pub struct GridDensity {
    /// Grid size in x-direction.
    nx: usize,

    /// Grid size in y-direction.
    ny: usize,

    /// Grid size in z-direction.
    nz: usize,

    /// Bounds the grid spans.
    bounds: Bounds3f,

    /// Density values with x varying fastest.
    density: Vec<Float>,
}

impl GridDensity {
    /// Create a new `GridDensity`.
    ///
    /// * `bounds`  - Bounds the grid spans.
    /// * `nx`      - Grid size in x-direction.
    /// * `ny`      - Grid size in y-direction.
    /// * `nz`      - Grid size in z-direction.
    /// * `density` - `nx * ny * nz` non-negative values with x varying fastest
    ///               and z slowest.
    pub fn new(bounds: Bounds3f, nx: usize, ny: usize, nz: usize, density: Vec<Float>) -> ConfigResult<Self> {
        let expected = nx * ny * nz;
        if expected == 0 || density.len() != expected {
            return Err(ConfigError::GridSize {
                nx,
                ny,
                nz,
                expected,
                actual: density.len(),
            });
        }
        debug_assert!(!bounds.is_empty());
        debug_assert!(density.iter().all(|d| *d >= 0.0));

        if let MinMaxResult::MinMax(lo, hi) = density.iter().minmax() {
            debug!("GridDensity {}x{}x{} densities in [{}, {}]", nx, ny, nz, lo, hi);
        }

        Ok(Self {
            nx,
            ny,
            nz,
            bounds,
            density,
        })
    }

    /// Returns the bounds the grid spans.
    pub fn bounds(&self) -> Bounds3f {
        self.bounds
    }

    /// Returns the grid dimensions.
    pub fn size(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }

    /// Returns the stored density of a voxel. Indices are clamped to the grid.
    ///
    /// * `x` - Voxel index in x-direction.
    /// * `y` - Voxel index in y-direction.
    /// * `z` - Voxel index in z-direction.
    pub fn voxel(&self, x: i64, y: i64, z: i64) -> Float {
        let x = clamp(x, 0, self.nx as i64 - 1) as usize;
        let y = clamp(y, 0, self.ny as i64 - 1) as usize;
        let z = clamp(z, 0, self.nz as i64 - 1) as usize;
        self.density[(z * self.ny + y) * self.nx + x]
    }

    /// Returns the world space position of a voxel centre.
    ///
    /// * `x` - Voxel index in x-direction.
    /// * `y` - Voxel index in y-direction.
    /// * `z` - Voxel index in z-direction.
    pub fn voxel_centre(&self, x: usize, y: usize, z: usize) -> Point3f {
        let d = self.bounds.diagonal();
        Point3f::new(
            self.bounds.p_min.x + d.x * (x as Float + 0.5) / self.nx as Float,
            self.bounds.p_min.y + d.y * (y as Float + 0.5) / self.ny as Float,
            self.bounds.p_min.z + d.z * (z as Float + 0.5) / self.nz as Float,
        )
    }
}

impl Density for GridDensity {
    fn density(&self, p: &Point3f) -> Float {
        // Continuous voxel coordinates with samples at integer positions.
        let d = self.bounds.diagonal();
        let gx = (p.x - self.bounds.p_min.x) / d.x * self.nx as Float - 0.5;
        let gy = (p.y - self.bounds.p_min.y) / d.y * self.ny as Float - 0.5;
        let gz = (p.z - self.bounds.p_min.z) / d.z * self.nz as Float - 0.5;

        let (x0, y0, z0) = (gx.floor(), gy.floor(), gz.floor());
        let (dx, dy, dz) = (gx - x0, gy - y0, gz - z0);
        let (x, y, z) = (x0 as i64, y0 as i64, z0 as i64);

        let d00 = lerp(dx, self.voxel(x, y, z), self.voxel(x + 1, y, z));
        let d10 = lerp(dx, self.voxel(x, y + 1, z), self.voxel(x + 1, y + 1, z));
        let d01 = lerp(dx, self.voxel(x, y, z + 1), self.voxel(x + 1, y, z + 1));
        let d11 = lerp(dx, self.voxel(x, y + 1, z + 1), self.voxel(x + 1, y + 1, z + 1));
        let d0 = lerp(dy, d00, d10);
        let d1 = lerp(dy, d01, d11);
        lerp(dz, d0, d1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::rng::*;
    use core::spectrum::*;
    use float_cmp::approx_eq;
    use itertools::iproduct;

    const N: (usize, usize, usize) = (4, 3, 5);

    fn bounds() -> Bounds3f {
        Bounds3f::new(Point3f::new(-1.0, 0.0, 2.0), Point3f::new(3.0, 3.0, 7.0))
    }

    fn linear(p: &Point3f) -> Float {
        1.0 + 0.5 * p.x + 0.25 * p.y + 0.1 * p.z
    }

    /// A grid sampling `linear()` at the voxel centres.
    fn linear_grid() -> GridDensity {
        let (nx, ny, nz) = N;
        let probe = GridDensity::new(bounds(), nx, ny, nz, vec![0.0; nx * ny * nz]).unwrap();
        let density = iproduct!(0..nz, 0..ny, 0..nx)
            .map(|(z, y, x)| linear(&probe.voxel_centre(x, y, z)))
            .collect();
        GridDensity::new(bounds(), nx, ny, nz, density).unwrap()
    }

    #[test]
    fn wrong_density_count_is_rejected() {
        let err = GridDensity::new(bounds(), 2, 2, 2, vec![1.0; 7]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::GridSize {
                nx: 2,
                ny: 2,
                nz: 2,
                expected: 8,
                actual: 7
            }
        );
        assert!(GridDensity::new(bounds(), 0, 2, 2, vec![]).is_err());
    }

    #[test]
    fn reproduces_values_at_voxel_centres() {
        let grid = linear_grid();
        let (nx, ny, nz) = N;
        for (z, y, x) in iproduct!(0..nz, 0..ny, 0..nx) {
            let p = grid.voxel_centre(x, y, z);
            let stored = grid.voxel(x as i64, y as i64, z as i64);
            assert!(approx_eq!(Float, grid.density(&p), stored, epsilon = 1e-12));
        }
    }

    #[test]
    fn clamps_to_edge_values() {
        let grid = GridDensity::new(bounds(), 2, 1, 1, vec![1.0, 3.0]).unwrap();
        // x voxel centres are at 0 and 2.
        assert_eq!(grid.density(&Point3f::new(-1.0, 1.0, 3.0)), 1.0);
        assert_eq!(grid.density(&Point3f::new(3.0, 1.0, 3.0)), 3.0);
        assert!(approx_eq!(Float, grid.density(&Point3f::new(1.0, 1.0, 3.0)), 2.0, ulps = 4));
    }

    #[test]
    fn region_coefficients_follow_linear_density() {
        let grid = linear_grid();
        let base = Spectrum::rgb(0.2, 0.4, 0.8);
        let region = GridDensityVolumeRegion::new(
            grid.bounds(),
            Spectrum::ZERO,
            base,
            Spectrum::ZERO,
            PhaseFunction::Isotropic,
            grid,
        );

        // Stay between the outermost voxel centres where interpolation is
        // exact for a linear field.
        let (lo, hi) = (region.density_field().voxel_centre(0, 0, 0), region.density_field().voxel_centre(3, 2, 4));
        let mut rng = RNG::new(3);
        for _ in 0..1000 {
            let p = Point3f::new(
                lerp(rng.uniform_float(), lo.x, hi.x),
                lerp(rng.uniform_float(), lo.y, hi.y),
                lerp(rng.uniform_float(), lo.z, hi.z),
            );
            let a = region.absorption(&p);
            let expected = base * linear(&p);
            for i in 0..3 {
                assert!((a[i] - expected[i]).abs() <= 0.01 * expected[i]);
            }
        }
        assert!(region.absorption(&Point3f::new(0.0, 0.0, 0.0)).is_black());
    }

    #[test]
    fn marched_thickness_matches_integral() {
        let grid = GridDensity::new(bounds(), 2, 1, 1, vec![1.0, 3.0]).unwrap();
        let region =
            GridDensityVolumeRegion::new(grid.bounds(), Spectrum::ZERO, Spectrum::ONE, Spectrum::ZERO, PhaseFunction::Isotropic, grid);
        // Density along x: 1 on [-1, 0], 1 + (x - 0) on [0, 2], 3 on [2, 3].
        let ray = Ray::infinite(Point3f::new(-2.0, 1.0, 3.0), Vector3f::new(1.0, 0.0, 0.0));
        let tau = region.optical_thickness(&ray, 0.01, 0.5);
        assert!(approx_eq!(Float, tau[0], 1.0 + 4.0 + 3.0, epsilon = 1e-9));
    }
}
