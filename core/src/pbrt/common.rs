//! Common

#![allow(dead_code)]

use num_traits::Num;
use std::ops::{Add, Mul, Neg};

/// Use 64-bit precision for floating point numbers.
pub type Float = f64;

/// Default signed integer to 32-bit.
pub type Int = i32;

/// Infinty (∞)
pub const INFINITY: Float = Float::INFINITY;

/// PI (π)
pub const PI: Float = std::f64::consts::PI;

/// 1/PI (1/π)
pub const INV_PI: Float = 1.0 / PI;

/// PI/2 (π/2)
pub const PI_OVER_TWO: Float = PI * 0.5;

/// PI/4 (π/4)
pub const PI_OVER_FOUR: Float = PI * 0.25;

/// 2*PI (2π)
pub const TWO_PI: Float = PI * 2.0;

/// 1/2*PI (1/2π)
pub const INV_TWO_PI: Float = 1.0 / TWO_PI;

/// 4*PI (4π)
pub const FOUR_PI: Float = PI * 4.0;

/// 1/4*PI (1/4π)
pub const INV_FOUR_PI: Float = 1.0 / FOUR_PI;

/// Machine Epsilon
pub const MACHINE_EPSILON: Float = std::f64::EPSILON * 0.5;

/// Threshold below which lengths, cosines and denominators are treated as zero.
pub const EPSILON: Float = 1e-12;

/// Shadow Epsilon
pub const SHADOW_EPSILON: Float = 0.0001;

/// Returns the absolute value of a number.
///
/// * `n` - The number.
#[inline(always)]
pub fn abs<T>(n: T) -> T
where
    T: Num + Neg<Output = T> + PartialOrd + Copy,
{
    if n < T::zero() {
        -n
    } else {
        n
    }
}

/// Returns the minimum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn min<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a < b {
        a
    } else {
        b
    }
}

/// Returns the maximum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn max<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a > b {
        a
    } else {
        b
    }
}

/// Clamps a value to the closed interval [low, high].
///
/// * `val`  - The value.
/// * `low`  - Lower bound.
/// * `high` - Upper bound.
#[inline(always)]
pub fn clamp<T>(val: T, low: T, high: T) -> T
where
    T: PartialOrd,
{
    if val < low {
        low
    } else if val > high {
        high
    } else {
        val
    }
}

/// Linearly interpolate between two points for parameters in [0, 1] and
/// extrapolate for parameters outside that interval.
///
/// * `t` - Parameter.
/// * `p0` - Point at t=0.
/// * `p1` - Point at t=1.
#[inline(always)]
pub fn lerp<P>(t: Float, p0: P, p1: P) -> P
where
    Float: Mul<P, Output = P>,
    P: Add<P, Output = P>,
{
    (1.0 - t) * p0 + t * p1
}

/// Returns `v^5`.
///
/// * `v` - The value.
#[inline(always)]
pub fn pow5<T: Mul<T, Output = T> + Copy>(v: T) -> T {
    (v * v) * (v * v) * v
}

/// Emulates the behavior of `upper_bound` but uses a function object to get
/// values at various indices instead of requiring access to an actual array.
/// Returns the largest index `i` in `[0, size - 2]` for which `pred(i)` holds.
///
/// * `size` - Size of array (at least 2).
/// * `pred` - Function that returns a value at a given index.
pub fn find_interval<Predicate>(size: usize, pred: Predicate) -> usize
where
    Predicate: Fn(usize) -> bool,
{
    let (mut first, mut len) = (0, size);

    while len > 0 {
        let half = len >> 1;
        let middle = first + half;

        // Bisect range based on value of `pred` at `middle`.
        if pred(middle) {
            first = middle + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }

    clamp(first as isize - 1, 0, size as isize - 2) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limits_to_interval() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
    }

    #[test]
    fn find_interval_brackets_value() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(find_interval(xs.len(), |i| xs[i] <= 1.5), 1);
        assert_eq!(find_interval(xs.len(), |i| xs[i] <= -1.0), 0);
        assert_eq!(find_interval(xs.len(), |i| xs[i] <= 10.0), 2);
    }
}
