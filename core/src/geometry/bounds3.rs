//! 3-D Axis Aligned Bounding Boxes.

#![allow(dead_code)]
use super::{Point3f, Ray, Vector3f};
use crate::pbrt::{max, min, Float, INFINITY};

/// A 3-D axis aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3f {
    /// Minimum bounds.
    pub p_min: Point3f,

    /// Maximum bounds.
    pub p_max: Point3f,
}

impl Default for Bounds3f {
    /// Returns an empty box.
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds3f {
    /// Creates a new box from two opposite corners.
    ///
    /// * `p1` - First corner.
    /// * `p2` - Second corner.
    pub fn new(p1: Point3f, p2: Point3f) -> Self {
        Self {
            p_min: p1.min(&p2),
            p_max: p1.max(&p2),
        }
    }

    /// Returns a box that contains nothing. Any union with it gives the
    /// other operand.
    pub fn empty() -> Self {
        Self {
            p_min: Point3f::new(INFINITY, INFINITY, INFINITY),
            p_max: Point3f::new(-INFINITY, -INFINITY, -INFINITY),
        }
    }

    /// Returns true if the box contains nothing.
    pub fn is_empty(&self) -> bool {
        self.p_min.x > self.p_max.x || self.p_min.y > self.p_max.y || self.p_min.z > self.p_max.z
    }

    /// Returns one of the 8 corners. Bit 0, 1 and 2 of `i` select the
    /// maximum x, y and z coordinate respectively.
    ///
    /// * `i` - Corner index in [0, 7].
    pub fn corner(&self, i: usize) -> Point3f {
        debug_assert!(i < 8);
        Point3f::new(
            if i & 1 == 0 { self.p_min.x } else { self.p_max.x },
            if i & 2 == 0 { self.p_min.y } else { self.p_max.y },
            if i & 4 == 0 { self.p_min.z } else { self.p_max.z },
        )
    }

    /// Returns the vector from minimum to maximum corner.
    pub fn diagonal(&self) -> Vector3f {
        self.p_max - self.p_min
    }

    /// Returns the total area of the 6 faces.
    pub fn surface_area(&self) -> Float {
        let d = self.diagonal();
        2.0 * (d.x * d.y + d.x * d.z + d.y * d.z)
    }

    /// Returns the centre of the box.
    pub fn centroid(&self) -> Point3f {
        0.5 * (self.p_min + self.p_max)
    }

    /// Returns true if the point lies inside or on the boundary of the box.
    ///
    /// * `p` - The point.
    pub fn contains(&self, p: &Point3f) -> bool {
        p.x >= self.p_min.x
            && p.x <= self.p_max.x
            && p.y >= self.p_min.y
            && p.y <= self.p_max.y
            && p.z >= self.p_min.z
            && p.z <= self.p_max.z
    }

    /// Returns a box that also encloses the given point.
    ///
    /// * `p` - The point.
    pub fn union_point(&self, p: &Point3f) -> Self {
        Self {
            p_min: self.p_min.min(p),
            p_max: self.p_max.max(p),
        }
    }

    /// Returns a box that encloses both boxes.
    ///
    /// * `other` - The other box.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            p_min: self.p_min.min(&other.p_min),
            p_max: self.p_max.max(&other.p_max),
        }
    }

    /// Returns the parametric range in which the ray overlaps the box,
    /// clipped to the ray's own extent. Returns `None` on a miss.
    ///
    /// * `ray` - The ray.
    pub fn intersect_p(&self, ray: &Ray) -> Option<(Float, Float)> {
        let mut t0 = ray.t_min;
        let mut t1 = ray.t_max;
        for i in 0..3 {
            // Update interval for _i_th bounding box slab.
            let inv_ray_dir = 1.0 / ray.d[i];
            let mut t_near = (self.p_min[i] - ray.o[i]) * inv_ray_dir;
            let mut t_far = (self.p_max[i] - ray.o[i]) * inv_ray_dir;
            if t_near > t_far {
                std::mem::swap(&mut t_near, &mut t_far);
            }

            // A ray parallel to the slab gives infinite bounds, or NaN (0 * inf)
            // when it starts on one of the slab planes. The latter is a miss.
            if t_near.is_nan() || t_far.is_nan() {
                return None;
            }

            t0 = max(t_near, t0);
            t1 = min(t_far, t1);
            if t0 > t1 {
                return None;
            }
        }
        Some((t0, t1))
    }
}
