//! Low discrepancy sequences.

use crate::pbrt::*;
use crate::rng::ONE_MINUS_EPSILON;

/// Returns the radical inverse of `a` in the given base. The digits of `a`
/// are mirrored around the decimal point.
///
/// * `base` - The prime base.
/// * `a`    - The value to invert.
pub fn radical_inverse(base: u64, a: u64) -> Float {
    debug_assert!(base >= 2);
    let inv_base = 1.0 / base as Float;
    let mut reversed_digits = 0_u64;
    let mut inv_base_n = 1.0;
    let mut a = a;
    while a > 0 {
        let next = a / base;
        let digit = a - next * base;
        reversed_digits = reversed_digits * base + digit;
        inv_base_n *= inv_base;
        a = next;
    }
    min(reversed_digits as Float * inv_base_n, ONE_MINUS_EPSILON)
}

/// Returns the `index`th element of a Cranley-Patterson rotated radical
/// inverse sequence. The rotation decorrelates sequences that share a base.
///
/// * `base`   - The prime base.
/// * `index`  - Index into the sequence.
/// * `offset` - Rotation in [0, 1).
pub fn rotated_radical_inverse(base: u64, index: u64, offset: Float) -> Float {
    let v = radical_inverse(base, index) + offset;
    if v >= 1.0 {
        v - 1.0
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_two_sequence() {
        let expected = [0.0, 0.5, 0.25, 0.75, 0.125, 0.625];
        for (i, &e) in expected.iter().enumerate() {
            assert_eq!(radical_inverse(2, i as u64), e);
        }
    }

    #[test]
    fn base_three_sequence() {
        assert_eq!(radical_inverse(3, 1), 1.0 / 3.0);
        assert!((radical_inverse(3, 3) - 1.0 / 9.0).abs() < 1e-15);
    }

    #[test]
    fn rotation_wraps_around() {
        let v = rotated_radical_inverse(2, 1, 0.75);
        assert!((v - 0.25).abs() < 1e-12);
    }
}
