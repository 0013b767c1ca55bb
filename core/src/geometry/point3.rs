//! 3-D Points

#![allow(dead_code)]
use super::Vector3;
use crate::pbrt::{max, min, Float};
use num_traits::{Num, Zero};
use std::ops::{Add, AddAssign, Index, Mul, Sub};

/// A 3-D point containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,

    /// Z-coordinate.
    pub z: T,
}

/// 3-D point containing `Float` values.
pub type Point3f = Point3<Float>;

impl<T: Num> Point3<T> {
    /// Creates a new 3-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a new 3-D point at the origin.
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    /// Returns the distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance(&self, other: &Self) -> T
    where
        T: num_traits::Float,
    {
        (*self - *other).length()
    }

    /// Returns the square of the distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance_squared(&self, other: &Self) -> T
    where
        T: Copy,
    {
        (*self - *other).length_squared()
    }

    /// Return the component-wise minimum coordinate values with another point.
    ///
    /// * `other` - The other point.
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

    /// Return the component-wise maximum coordinate values with another point.
    ///
    /// * `other` - The other point.
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

impl<T: Num> Add<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;

    /// Offset the point by a vector.
    ///
    /// * `v` - The vector.
    fn add(self, v: Vector3<T>) -> Self::Output {
        Point3::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl<T: Num + Copy> AddAssign<Vector3<T>> for Point3<T> {
    /// Offset the point by a vector.
    ///
    /// * `v` - The vector.
    fn add_assign(&mut self, v: Vector3<T>) {
        *self = Point3::new(self.x + v.x, self.y + v.y, self.z + v.z);
    }
}

impl<T: Num> Add for Point3<T> {
    type Output = Point3<T>;

    /// Adds two points. Only meaningful for weighted sums.
    ///
    /// * `other` - The other point.
    fn add(self, other: Self) -> Self::Output {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl<T: Num> Sub for Point3<T> {
    type Output = Vector3<T>;

    /// Returns the vector from another point to this one.
    ///
    /// * `other` - The other point.
    fn sub(self, other: Self) -> Self::Output {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<T: Num> Sub<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;

    /// Offset the point by the negated vector.
    ///
    /// * `v` - The vector.
    fn sub(self, v: Vector3<T>) -> Self::Output {
        Point3::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl<T: Num + Copy> Mul<T> for Point3<T> {
    type Output = Self;

    /// Scale the point.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: T) -> Self::Output {
        Self::new(f * self.x, f * self.y, f * self.z)
    }
}

impl Mul<Point3<Float>> for Float {
    type Output = Point3<Float>;

    /// Scale the point.
    ///
    /// * `p` - The point.
    fn mul(self, p: Point3<Float>) -> Self::Output {
        Point3::new(self * p.x, self * p.y, self * p.z)
    }
}

impl<T> Index<usize> for Point3<T> {
    type Output = T;

    /// Index the point by an axis to get the immutable coordinate value.
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

impl<T> From<Vector3<T>> for Point3<T> {
    /// Convert a 3-D vector to a 3-D point.
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
