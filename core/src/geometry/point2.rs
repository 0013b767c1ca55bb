//! 2-D Points

#![allow(dead_code)]
use crate::pbrt::Float;
use num_traits::Num;
use std::ops::Index;

/// A 2-D point containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point2<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,
}

/// 2-D point containing `Float` values.
pub type Point2f = Point2<Float>;

impl<T: Num> Point2<T> {
    /// Creates a new 2-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> Index<usize> for Point2<T> {
    type Output = T;

    /// Index the point by an axis to get the immutable coordinate value.
    ///
    /// * `axis` - A 2-D coordinate axis.
    fn index(&self, axis: usize) -> &Self::Output {
        match axis {
            0 => &self.x,
            _ => &self.y,
        }
    }
}
