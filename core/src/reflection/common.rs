//! Common

use crate::geometry::*;
use crate::pbrt::*;

/// Returns the cosine of the angle θ measured from the given direction to the
/// z-axis.
///
/// * `w` - The direction vector.
#[inline]
pub fn cos_theta(w: &Vector3f) -> Float {
    w.z
}

/// Returns the square of the cosine of the angle θ measured from the given
/// direction to the z-axis.
///
/// * `w` - The direction vector.
#[inline]
pub fn cos_2_theta(w: &Vector3f) -> Float {
    w.z * w.z
}

/// Returns the absolute value of the cosine of the angle θ measured from the
/// given direction to the z-axis.
///
/// * `w` - The direction vector.
#[inline]
pub fn abs_cos_theta(w: &Vector3f) -> Float {
    abs(w.z)
}

/// Returns the square of the sine of the angle θ measured from the given
/// direction to the z-axis.
///
/// * `w` - The direction vector.
#[inline]
pub fn sin_2_theta(w: &Vector3f) -> Float {
    max(0.0, 1.0 - cos_2_theta(w))
}

/// Returns the sine of the angle θ measured from the given direction to the
/// z-axis.
///
/// * `w` - The direction vector.
#[inline]
pub fn sin_theta(w: &Vector3f) -> Float {
    sin_2_theta(w).sqrt()
}

/// Returns the square of the tangent of the angle θ measured from the given
/// direction to the z-axis.
///
/// * `w` - The direction vector.
#[inline]
pub fn tan_2_theta(w: &Vector3f) -> Float {
    sin_2_theta(w) / cos_2_theta(w)
}

/// Returns the cosine of the angle Φ measured from the given direction to the
/// x-axis after projection to the xy plane.
///
/// * `w` - The direction vector.
#[inline]
pub fn cos_phi(w: &Vector3f) -> Float {
    let s = sin_theta(w);
    if s == 0.0 {
        1.0
    } else {
        clamp(w.x / s, -1.0, 1.0)
    }
}

/// Returns the sine of the angle Φ measured from the given direction to the
/// x-axis after projection to the xy plane.
///
/// * `w` - The direction vector.
#[inline]
pub fn sin_phi(w: &Vector3f) -> Float {
    let s = sin_theta(w);
    if s == 0.0 {
        0.0
    } else {
        clamp(w.y / s, -1.0, 1.0)
    }
}

/// Returns `true` if two vectors are in the same hemisphere.
///
/// * `w`  - First vector.
/// * `wp` - Second vector.
#[inline]
pub fn same_hemisphere(w: &Vector3f, wp: &Vector3f) -> bool {
    w.z * wp.z > 0.0
}

/// Returns the direction for given spherical coordinates in the local frame.
///
/// * `sin_theta` - sin(θ).
/// * `cos_theta` - cos(θ).
/// * `phi`       - Φ.
#[inline]
pub fn spherical_direction(sin_theta: Float, cos_theta: Float, phi: Float) -> Vector3f {
    Vector3f::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}

/// Mirrors `wo` about `n`.
///
/// * `wo` - The direction to reflect.
/// * `n`  - The mirror normal.
#[inline]
pub fn reflect(wo: &Vector3f, n: &Vector3f) -> Vector3f {
    -(*wo) + *n * (2.0 * wo.dot(n))
}
