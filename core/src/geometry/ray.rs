//! Rays

#![allow(dead_code)]
use super::{Point3f, Vector3f};
use crate::pbrt::{Float, INFINITY};
use std::fmt;

/// Offset applied to the start of secondary rays to avoid self intersection.
pub const RAY_EPSILON: Float = 1e-7;

/// A Ray
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    /// Origin.
    pub o: Point3f,

    /// Direction.
    pub d: Vector3f,

    /// Minimum extent of the ray.
    pub t_min: Float,

    /// Maximum extent of the ray.
    pub t_max: Float,

    /// Number of specular bounces that produced this ray.
    pub depth: u32,
}

impl Ray {
    /// Returns a new ray.
    ///
    /// * `o`     - Origin.
    /// * `d`     - Normalized direction.
    /// * `t_min` - Minimum extent of the ray.
    /// * `t_max` - Maximum extent of the ray.
    pub fn new(o: Point3f, d: Vector3f, t_min: Float, t_max: Float) -> Self {
        Self {
            o,
            d,
            t_min,
            t_max,
            depth: 0,
        }
    }

    /// Returns a new ray that extends to infinity.
    ///
    /// * `o` - Origin.
    /// * `d` - Normalized direction.
    pub fn infinite(o: Point3f, d: Vector3f) -> Self {
        Self::new(o, d, 0.0, INFINITY)
    }

    /// Returns a ray spawned from a surface point one specular bounce deeper
    /// than this one.
    ///
    /// * `o` - Origin on the surface.
    /// * `d` - Normalized direction.
    pub fn spawn(&self, o: Point3f, d: Vector3f) -> Self {
        Self {
            o,
            d,
            t_min: RAY_EPSILON,
            t_max: INFINITY,
            depth: self.depth + 1,
        }
    }

    /// Returns the position along the ray at given parameter.
    ///
    /// * `t` - The parameter.
    pub fn at(&self, t: Float) -> Point3f {
        self.o + self.d * t
    }
}

impl fmt::Display for Ray {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[o={:?}, d={:?}, t=({}, {}), depth={}]",
            self.o, self.d, self.t_min, self.t_max, self.depth
        )
    }
}
