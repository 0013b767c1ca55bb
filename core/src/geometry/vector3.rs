//! 3-D Vectors

#![allow(dead_code)]
use super::common::*;
use super::{Normal3, Point3};
use crate::pbrt::{abs, max, min, Float};
use num_traits::{Num, Zero};
use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 3-D vector containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector3<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,

    /// Z-coordinate.
    pub z: T,
}

/// 3-D vector containing `Float` values.
pub type Vector3f = Vector3<Float>;

impl<T: Num> Vector3<T> {
    /// Creates a new 3-D vector.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a new 3-D zero vector.
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool
    where
        T: num_traits::Float,
    {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns the square of the vector's length.
    pub fn length_squared(&self) -> T
    where
        T: Copy,
    {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the vector's length.
    pub fn length(&self) -> T
    where
        T: num_traits::Float,
    {
        self.length_squared().sqrt()
    }

    /// Returns the unit vector.
    pub fn normalize(&self) -> Self
    where
        T: num_traits::Float,
    {
        *self / self.length()
    }

    /// Returns a new vector containing absolute values of the components.
    pub fn abs(&self) -> Self
    where
        T: Neg<Output = T> + PartialOrd + Copy,
    {
        Self::new(abs(self.x), abs(self.y), abs(self.z))
    }

    /// Returns the cross product with another vector.
    ///
    /// * `other` - The other vector.
    pub fn cross(&self, other: &Self) -> Self
    where
        T: Copy,
    {
        Self::new(
            (self.y * other.z) - (self.z * other.y),
            (self.z * other.x) - (self.x * other.z),
            (self.x * other.y) - (self.y * other.x),
        )
    }

    /// Returns the largest coordinate value.
    pub fn max_component(&self) -> T
    where
        T: PartialOrd + Copy,
    {
        max(self.x, max(self.y, self.z))
    }

    /// Return the component-wise minimum coordinate values with another vector.
    ///
    /// * `other` - The other vector.
    pub fn min(&self, other: &Self) -> Self
    where
        T: PartialOrd + Copy,
    {
        Self::new(
            min(self.x, other.x),
            min(self.y, other.y),
            min(self.z, other.z),
        )
    }

    /// Return the component-wise maximum coordinate values with another vector.
    ///
    /// * `other` - The other vector.
    pub fn max(&self, other: &Self) -> Self
    where
        T: PartialOrd + Copy,
    {
        Self::new(
            max(self.x, other.x),
            max(self.y, other.y),
            max(self.z, other.z),
        )
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> Dot<Vector3<T>> for Vector3<T> {
    type Output = T;

    /// Returns the dot product with another vector.
    ///
    /// * `other` - The other vector.
    fn dot(&self, other: &Vector3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> Dot<Normal3<T>> for Vector3<T> {
    type Output = T;

    /// Returns the dot product with a normal.
    ///
    /// * `n` - The normal.
    fn dot(&self, n: &Normal3<T>) -> T {
        self.x * n.x + self.y * n.y + self.z * n.z
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> FaceForward<T, Vector3<T>> for Vector3<T> {}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> FaceForward<T, Normal3<T>> for Vector3<T> {}

impl<T: Num> Add for Vector3<T> {
    type Output = Self;

    /// Adds the given vector and returns the result.
    ///
    /// * `other` - The vector to add.
    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl<T: Num + Copy> AddAssign for Vector3<T> {
    /// Performs the `+=` operation.
    ///
    /// * `other` - The vector to add.
    fn add_assign(&mut self, other: Self) {
        *self = Self::new(self.x + other.x, self.y + other.y, self.z + other.z);
    }
}

impl<T: Num> Sub for Vector3<T> {
    type Output = Self;

    /// Subtracts the given vector and returns the result.
    ///
    /// * `other` - The vector to subtract.
    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<T: Num + Copy> SubAssign for Vector3<T> {
    /// Performs the `-=` operation.
    ///
    /// * `other` - The vector to subtract.
    fn sub_assign(&mut self, other: Self) {
        *self = Self::new(self.x - other.x, self.y - other.y, self.z - other.z);
    }
}

impl<T: Num + Copy> Mul<T> for Vector3<T> {
    type Output = Self;

    /// Scale the vector.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: T) -> Self::Output {
        Self::new(f * self.x, f * self.y, f * self.z)
    }
}

impl<T: Num + Copy> MulAssign<T> for Vector3<T> {
    /// Scale the vector.
    ///
    /// * `f` - The scaling factor.
    fn mul_assign(&mut self, f: T) {
        *self = Self::new(f * self.x, f * self.y, f * self.z);
    }
}

impl Mul<Vector3<Float>> for Float {
    type Output = Vector3<Float>;

    /// Scale the vector.
    ///
    /// * `v` - The vector.
    fn mul(self, v: Vector3<Float>) -> Self::Output {
        Vector3::new(self * v.x, self * v.y, self * v.z)
    }
}

impl<T: Num + Copy> Div<T> for Vector3<T> {
    type Output = Self;

    /// Scale the vector by 1/f.
    ///
    /// * `f` - The scaling factor.
    fn div(self, f: T) -> Self::Output {
        debug_assert!(!f.is_zero());
        Self::new(self.x / f, self.y / f, self.z / f)
    }
}

impl<T: Num + Copy> DivAssign<T> for Vector3<T> {
    /// Scale the vector by 1/f.
    ///
    /// * `f` - The scaling factor.
    fn div_assign(&mut self, f: T) {
        debug_assert!(!f.is_zero());
        *self = Self::new(self.x / f, self.y / f, self.z / f);
    }
}

impl<T: Num + Neg<Output = T>> Neg for Vector3<T> {
    type Output = Self;

    /// Flip the vector's direction (scale by -1).
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl<T> Index<usize> for Vector3<T> {
    type Output = T;

    /// Index the vector by an axis to get the immutable coordinate value.
    ///
    /// * `axis` - A 3-D coordinate axis.
    fn index(&self, axis: usize) -> &Self::Output {
        match axis {
            0 => &self.x,
            1 => &self.y,
            _ => &self.z,
        }
    }
}

impl<T> From<Normal3<T>> for Vector3<T> {
    /// Convert a 3-D normal to a 3-D vector.
    ///
    /// * `n` - 3-D normal.
    fn from(n: Normal3<T>) -> Self {
        Self {
            x: n.x,
            y: n.y,
            z: n.z,
        }
    }
}

impl<T> From<Point3<T>> for Vector3<T> {
    /// Convert a 3-D point to a 3-D vector.
    ///
    /// * `p` - 3-D point.
    fn from(p: Point3<T>) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    prop_range!(range_f64, f64, -100.0..100.0f64);
    prop_vector3!(vector3_f64, f64, range_f64(), range_f64(), range_f64());

    proptest! {
        #[test]
        fn cross_is_orthogonal(v1 in vector3_f64(), v2 in vector3_f64()) {
            let c = v1.cross(&v2);
            let scale = 1.0 + v1.length_squared() * v2.length_squared();
            prop_assert!(abs(c.dot(&v1)) / scale < 1e-9);
            prop_assert!(abs(c.dot(&v2)) / scale < 1e-9);
        }

        #[test]
        fn normalize_gives_unit_length(v in vector3_f64().prop_filter("non-zero", |v| v.length() > 1e-3)) {
            prop_assert!(approx_eq!(f64, v.normalize().length(), 1.0, epsilon = 1e-12));
        }

        #[test]
        fn neg_flips_dot(v1 in vector3_f64(), v2 in vector3_f64()) {
            prop_assert_eq!((-v1).dot(&v2), -(v1.dot(&v2)));
        }
    }
}
