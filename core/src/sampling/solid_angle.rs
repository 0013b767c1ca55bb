//! Solid angle subtended by bounding boxes.

use crate::geometry::*;
use crate::pbrt::*;

/// Returns the solid angle subtended by the triangle `(a, b, c)` as seen from
/// the origin, using the Van Oosterom-Strackee formula.
///
/// * `a` - First vertex relative to the viewer.
/// * `b` - Second vertex relative to the viewer.
/// * `c` - Third vertex relative to the viewer.
pub fn triangle_solid_angle(a: &Vector3f, b: &Vector3f, c: &Vector3f) -> Float {
    let la = a.length();
    let lb = b.length();
    let lc = c.length();

    let numerator = abs(a.dot(&b.cross(c)));
    let denominator = la * lb * lc + a.dot(b) * lc + a.dot(c) * lb + b.dot(c) * la;

    let half_angle = numerator.atan2(denominator);
    abs(2.0 * half_angle)
}

/// Returns the solid angle the box subtends from a point. A point inside the
/// box sees the full sphere.
///
/// * `p`      - The point.
/// * `bounds` - The box.
pub fn subtended_solid_angle(p: &Point3f, bounds: &Bounds3f) -> Float {
    if bounds.contains(p) {
        return FOUR_PI;
    }

    let mut solid_angle = 0.0;
    for axis in 0..3 {
        // Only the face whose outer side contains `p` is visible along each axis.
        let plane = if p[axis] < bounds.p_min[axis] {
            bounds.p_min[axis]
        } else if p[axis] > bounds.p_max[axis] {
            bounds.p_max[axis]
        } else {
            continue;
        };

        let u = (axis + 1) % 3;
        let v = (axis + 2) % 3;
        let corner = |cu: Float, cv: Float| -> Vector3f {
            let mut c = [0.0; 3];
            c[axis] = plane;
            c[u] = cu;
            c[v] = cv;
            Point3f::new(c[0], c[1], c[2]) - *p
        };

        let c0 = corner(bounds.p_min[u], bounds.p_min[v]);
        let c1 = corner(bounds.p_max[u], bounds.p_min[v]);
        let c2 = corner(bounds.p_max[u], bounds.p_max[v]);
        let c3 = corner(bounds.p_min[u], bounds.p_max[v]);

        solid_angle += triangle_solid_angle(&c0, &c1, &c2) + triangle_solid_angle(&c0, &c2, &c3);
    }

    min(solid_angle, FOUR_PI)
}
