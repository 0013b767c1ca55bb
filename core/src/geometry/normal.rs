//! Normals

#![allow(dead_code)]
use super::common::*;
use super::Vector3;
use crate::pbrt::Float;
use num_traits::{Num, Zero};
use std::ops::{Mul, Neg};

/// A 3-D normal containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Normal3<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,

    /// Z-coordinate.
    pub z: T,
}

/// 3-D normal containing `Float` values.
pub type Normal3f = Normal3<Float>;

impl<T: Num> Normal3<T> {
    /// Creates a new 3-D normal.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a new 3-D zero normal.
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    /// Returns the square of the normal's length.
    pub fn length_squared(&self) -> T
    where
        T: Copy,
    {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the unit normal.
    pub fn normalize(&self) -> Self
    where
        T: num_traits::Float,
    {
        let len = self.length_squared().sqrt();
        debug_assert!(!len.is_zero());
        Self::new(self.x / len, self.y / len, self.z / len)
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> Dot<Normal3<T>> for Normal3<T> {
    type Output = T;

    /// Returns the dot product with another normal.
    ///
    /// * `other` - The other normal.
    fn dot(&self, other: &Normal3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> Dot<Vector3<T>> for Normal3<T> {
    type Output = T;

    /// Returns the dot product with a vector.
    ///
    /// * `v` - The vector.
    fn dot(&self, v: &Vector3<T>) -> T {
        self.x * v.x + self.y * v.y + self.z * v.z
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> FaceForward<T, Vector3<T>> for Normal3<T> {}

impl<T: Num + Neg<Output = T>> Neg for Normal3<T> {
    type Output = Self;

    /// Flip the normal's direction (scale by -1).
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl<T: Num + Copy> Mul<T> for Normal3<T> {
    type Output = Self;

    /// Scale the normal.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: T) -> Self::Output {
        Self::new(f * self.x, f * self.y, f * self.z)
    }
}

impl<T> From<Vector3<T>> for Normal3<T> {
    /// Convert a 3-D vector to a 3-D normal.
    ///
    /// * `v` - 3-D vector.
    fn from(v: Vector3<T>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}
