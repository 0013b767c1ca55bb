//! Discrete cumulative distribution functions.

use crate::pbrt::*;

/// Turns the per-item importance weights stored in `cdf` into a
/// cumulative distribution in place. The last entry becomes exactly 1.
///
/// When the weights do not sum to a positive finite value every item gets
/// equal probability, i.e. `cdf[i] = (i + 1) / N`. An empty buffer is left
/// untouched.
///
/// * `cdf` - On input the non-negative weights, on output the CDF.
pub fn weights_to_cdf(cdf: &mut [Float]) {
    let n = cdf.len();
    if n == 0 {
        return;
    }

    let mut sum = 0.0;
    for w in cdf.iter_mut() {
        debug_assert!(*w >= 0.0);
        sum += *w;
        *w = sum;
    }

    if sum > 0.0 && sum.is_finite() {
        let inv_sum = 1.0 / sum;
        for c in cdf.iter_mut() {
            *c *= inv_sum;
        }
    } else {
        let inv_n = 1.0 / n as Float;
        for (i, c) in cdf.iter_mut().enumerate() {
            *c = (i + 1) as Float * inv_n;
        }
    }
    cdf[n - 1] = 1.0;
}

/// Returns the probability of picking item `i` from a CDF.
///
/// * `cdf` - The CDF.
/// * `i`   - Item index.
#[inline]
pub fn cdf_pdf(cdf: &[Float], i: usize) -> Float {
    if i == 0 {
        cdf[0]
    } else {
        cdf[i] - cdf[i - 1]
    }
}

/// Picks an item from a CDF with a uniform sample and returns its index
/// along with the probability it had of being picked. Items with zero
/// probability are never returned.
///
/// * `cdf` - A non-empty CDF.
/// * `u`   - Uniform sample in [0, 1).
pub fn sample_discrete_cdf(cdf: &[Float], u: Float) -> (usize, Float) {
    debug_assert!(!cdf.is_empty());
    debug_assert!((0.0..=1.0).contains(&u));

    let i = min(cdf.partition_point(|&c| c <= u), cdf.len() - 1);
    (i, cdf_pdf(cdf, i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn zero_weights_give_uniform_cdf() {
        let mut cdf = [0.0; 4];
        weights_to_cdf(&mut cdf);
        assert_eq!(cdf, [0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn empty_cdf_is_untouched() {
        let mut cdf: [Float; 0] = [];
        weights_to_cdf(&mut cdf);
        assert!(cdf.is_empty());
    }

    #[test]
    fn sampling_skips_zero_probability_items() {
        let mut cdf = [1.0, 0.0, 3.0];
        weights_to_cdf(&mut cdf);
        assert_eq!(sample_discrete_cdf(&cdf, 0.0), (0, 0.25));
        assert_eq!(sample_discrete_cdf(&cdf, 0.25).0, 2);
        let (i, pdf) = sample_discrete_cdf(&cdf, 0.999);
        assert_eq!(i, 2);
        assert!(approx_eq!(f64, pdf, 0.75, ulps = 2));
    }

    proptest! {
        #[test]
        fn cdf_is_monotonic_and_normalized(weights in prop::collection::vec(0.0..10.0f64, 1..32)) {
            let mut cdf = weights.clone();
            weights_to_cdf(&mut cdf);
            prop_assert!(cdf.windows(2).all(|w| w[0] <= w[1]));
            prop_assert!(cdf.iter().all(|&c| (0.0..=1.0).contains(&c)));
            prop_assert_eq!(cdf[cdf.len() - 1], 1.0);
        }

        #[test]
        fn sampled_pdf_matches_weight(weights in prop::collection::vec(0.1..10.0f64, 1..32), u in 0.0..1.0f64) {
            let total: Float = weights.iter().sum();
            let mut cdf = weights.clone();
            weights_to_cdf(&mut cdf);
            let (i, pdf) = sample_discrete_cdf(&cdf, u);
            prop_assert!((pdf - weights[i] / total).abs() < 1e-9);
        }
    }
}
