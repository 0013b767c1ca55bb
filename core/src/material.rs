//! Material

use crate::geometry::*;
use crate::pbrt::*;
use crate::reflection::*;
use crate::spectrum::*;
use bumpalo::Bump;
use std::sync::Arc;

/// Material trait provides common behavior.
pub trait Material {
    /// Initializes the light-scattering properties of the material at a point
    /// on a surface. The BSDF and its components are allocated in the arena
    /// and live until the arena is reset.
    ///
    /// * `dg`    - The differential geometry at the point.
    /// * `arena` - The arena for memory allocations.
    fn compute_bsdf<'arena>(&self, dg: &DifferentialGeometry, arena: &'arena Bump) -> &'arena BSDF<'arena>;
}

/// Atomic reference counted `Material`.
pub type ArcMaterial = Arc<dyn Material + Send + Sync>;

/// Purely diffuse surface. Uses Oren-Nayar when `sigma` is non-zero.
#[derive(Copy, Clone, Debug)]
pub struct MatteMaterial {
    /// Diffuse reflectance.
    pub kd: Spectrum,

    /// Roughness as the standard deviation of the facet angle in degrees.
    pub sigma: Float,
}

impl MatteMaterial {
    /// Create a new `MatteMaterial`.
    ///
    /// * `kd`    - Diffuse reflectance, clamped to [0, 1].
    /// * `sigma` - Roughness in degrees, clamped to [0, 90].
    pub fn new(kd: Spectrum, sigma: Float) -> Self {
        Self {
            kd: kd.clamp(0.0, 1.0),
            sigma: clamp(sigma, 0.0, 90.0),
        }
    }
}

impl Material for MatteMaterial {
    fn compute_bsdf<'arena>(&self, dg: &DifferentialGeometry, arena: &'arena Bump) -> &'arena BSDF<'arena> {
        let bsdf = BSDF::alloc(arena, dg);
        if !self.kd.is_black() {
            if self.sigma == 0.0 {
                bsdf.add(LambertianReflection::alloc(arena, self.kd));
            } else {
                bsdf.add(OrenNayar::alloc(arena, self.kd, self.sigma));
            }
        }
        bsdf
    }
}

/// Perfect mirror.
#[derive(Copy, Clone, Debug)]
pub struct MirrorMaterial {
    /// Reflectance.
    pub kr: Spectrum,
}

impl MirrorMaterial {
    /// Create a new `MirrorMaterial`.
    ///
    /// * `kr` - Reflectance, clamped to [0, 1].
    pub fn new(kr: Spectrum) -> Self {
        Self { kr: kr.clamp(0.0, 1.0) }
    }
}

impl Material for MirrorMaterial {
    fn compute_bsdf<'arena>(&self, dg: &DifferentialGeometry, arena: &'arena Bump) -> &'arena BSDF<'arena> {
        let bsdf = BSDF::alloc(arena, dg);
        if !self.kr.is_black() {
            bsdf.add(SpecularReflection::alloc(arena, self.kr, Fresnel::NoOp));
        }
        bsdf
    }
}

/// Smooth dielectric with Fresnel-weighted specular reflection and
/// transmission.
#[derive(Copy, Clone, Debug)]
pub struct GlassMaterial {
    /// Reflectance.
    pub kr: Spectrum,

    /// Transmittance.
    pub kt: Spectrum,

    /// Index of refraction of the interior. The exterior is vacuum.
    pub eta: Float,
}

impl GlassMaterial {
    /// Create a new `GlassMaterial`.
    ///
    /// * `kr`  - Reflectance, clamped to [0, 1].
    /// * `kt`  - Transmittance, clamped to [0, 1].
    /// * `eta` - Index of refraction of the interior.
    pub fn new(kr: Spectrum, kt: Spectrum, eta: Float) -> Self {
        debug_assert!(eta > 0.0);
        Self {
            kr: kr.clamp(0.0, 1.0),
            kt: kt.clamp(0.0, 1.0),
            eta,
        }
    }
}

impl Material for GlassMaterial {
    fn compute_bsdf<'arena>(&self, dg: &DifferentialGeometry, arena: &'arena Bump) -> &'arena BSDF<'arena> {
        let bsdf = BSDF::alloc(arena, dg);
        if !self.kr.is_black() {
            let fresnel = Fresnel::Dielectric {
                eta_i: 1.0,
                eta_t: self.eta,
            };
            bsdf.add(SpecularReflection::alloc(arena, self.kr, fresnel));
        }
        if !self.kt.is_black() {
            bsdf.add(SpecularTransmission::alloc(arena, self.kt, 1.0, self.eta));
        }
        bsdf
    }
}
