//! 3-D Coordinate System

use super::Vector3;
use crate::pbrt::abs;
use num_traits::Float;

/// Create a new coordinate system from a single unit vector and return
/// the two new vectors.
///
/// The second vector is constructed from the first by zeroing one of the
/// coordinates, swapping the remaining two and negating one of them. The
/// third vector is the cross product of the first two.
///
/// * `v1` - The first unit vector to form part of the coordinate system.
pub fn coordinate_system<T: Float>(v1: &Vector3<T>) -> (Vector3<T>, Vector3<T>) {
    let v2 = if abs(v1.x) > abs(v1.y) {
        Vector3::new(-v1.z, T::zero(), v1.x) / (v1.x * v1.x + v1.z * v1.z).sqrt()
    } else {
        Vector3::new(T::zero(), v1.z, -v1.y) / (v1.y * v1.y + v1.z * v1.z).sqrt()
    };

    let v3 = v1.cross(&v2);

    (v2, v3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dot;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn vectors_are_orthonormal(
            x in -1.0..1.0f64,
            y in -1.0..1.0f64,
            z in -1.0..1.0f64,
        ) {
            let v = Vector3::new(x, y, z);
            prop_assume!(v.length() > 1e-3);
            let v1 = v.normalize();
            let (v2, v3) = coordinate_system(&v1);
            prop_assert!(abs(v1.dot(&v2)) < 1e-9);
            prop_assert!(abs(v1.dot(&v3)) < 1e-9);
            prop_assert!(abs(v2.dot(&v3)) < 1e-9);
            prop_assert!(abs(v2.length() - 1.0) < 1e-9);
            prop_assert!(abs(v3.length() - 1.0) < 1e-9);
        }
    }
}
