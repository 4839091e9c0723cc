//! Numeric helpers shared by the bandit and the rating updater.

/// Relative threshold below which a standard deviation counts as zero.
///
/// Identical inputs can produce a std-dev of ~1e-17 through summation error;
/// dividing by that would turn noise into full-size z-scores.
const STD_DEV_EPS: f64 = 1e-12;

/// Map non-finite rates to `0.0`; finite values pass through unclamped.
#[inline]
pub(crate) fn sanitize_rate(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// Arithmetic mean, or `0.0` for an empty slice.
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Population standard deviation (divides by `n`, not `n - 1`).
///
/// Returns `0.0` for an empty slice.
pub fn population_std_dev(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let m = mean(xs);
    let var = xs.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / xs.len() as f64;
    var.max(0.0).sqrt()
}

/// Standardize `xs` against its own population mean and std-dev.
///
/// When the std-dev is zero (all values identical, or a single value) every
/// z-score is `0.0`. Output is aligned with the input.
///
/// Z-scores do not change under scaling, so inputs larger than `1.0` in
/// magnitude are divided by the largest one first. Finite inputs near
/// `f64::MAX` then cannot overflow the mean.
///
/// # Example
///
/// ```rust
/// use sketchslate::z_scores;
///
/// let z = z_scores(&[1.0, 2.0, 3.0]);
/// assert!(z[0] < 0.0 && z[1].abs() < 1e-12 && z[2] > 0.0);
/// assert_eq!(z_scores(&[0.4, 0.4, 0.4]), vec![0.0, 0.0, 0.0]);
/// ```
pub fn z_scores(xs: &[f64]) -> Vec<f64> {
    let scale = xs.iter().fold(0.0f64, |acc, x| acc.max(x.abs()));
    let scaled: Vec<f64> = if scale.is_finite() && scale > 1.0 {
        xs.iter().map(|x| x / scale).collect()
    } else {
        xs.to_vec()
    };
    let m = mean(&scaled);
    let sd = population_std_dev(&scaled);
    if !(sd > STD_DEV_EPS * m.abs().max(1.0)) {
        return vec![0.0; xs.len()];
    }
    scaled.iter().map(|x| (x - m) / sd).collect()
}

/// Clamp `z` to `[-bound, bound]` for a positive `bound`.
///
/// Unlike [`f64::clamp`] this never panics on a bad bound.
#[inline]
pub fn clamp_symmetric(z: f64, bound: f64) -> f64 {
    z.max(-bound).min(bound)
}

/// Round to the nearest integer, with halves going toward positive infinity.
///
/// `2.5 -> 3`, `-2.5 -> -2`. This differs from [`f64::round`], which rounds
/// halves away from zero.
#[inline]
pub fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn mean_and_std_dev_of_known_values() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&xs), 5.0);
        assert_eq!(population_std_dev(&xs), 2.0);
    }

    #[test]
    fn empty_inputs_are_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(population_std_dev(&[]), 0.0);
        assert!(z_scores(&[]).is_empty());
    }

    #[test]
    fn identical_values_standardize_to_zero() {
        // 0.1 does not survive summation exactly; the result must still be zero.
        let xs = [0.1; 7];
        assert!(z_scores(&xs).iter().all(|&z| z == 0.0));
        assert_eq!(z_scores(&[3.0]), vec![0.0]);
    }

    #[test]
    fn huge_values_do_not_overflow_standardization() {
        let z = z_scores(&[f64::MAX, f64::MAX, 0.0]);
        let half = std::f64::consts::FRAC_1_SQRT_2;
        assert!((z[0] - half).abs() < 1e-9, "{z:?}");
        assert!((z[1] - half).abs() < 1e-9, "{z:?}");
        assert!((z[2] + 2.0 * half).abs() < 1e-9, "{z:?}");
    }

    #[test]
    fn scaling_does_not_change_z_scores() {
        let small = z_scores(&[0.1, 0.4, 0.9]);
        let large = z_scores(&[10.0, 40.0, 90.0]);
        for (a, b) in small.iter().zip(&large) {
            assert!((a - b).abs() < 1e-9, "{small:?} vs {large:?}");
        }
    }

    #[test]
    fn round_half_up_matches_expected_ties() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(0.49), 0);
        assert_eq!(round_half_up(-0.5), 0);
    }

    #[test]
    fn sanitize_rate_drops_non_finite() {
        assert_eq!(sanitize_rate(f64::NAN), 0.0);
        assert_eq!(sanitize_rate(f64::INFINITY), 0.0);
        assert_eq!(sanitize_rate(1.7), 1.7);
    }

    proptest! {
        #[test]
        fn z_scores_have_zero_mean_and_are_finite(
            xs in proptest::collection::vec(0.0f64..1.0e3, 0..50),
        ) {
            let z = z_scores(&xs);
            prop_assert_eq!(z.len(), xs.len());
            for v in &z {
                prop_assert!(v.is_finite());
            }
            if !z.is_empty() {
                prop_assert!(mean(&z).abs() < 1e-6, "mean={}", mean(&z));
            }
        }

        #[test]
        fn clamp_symmetric_stays_in_bounds(z in -1.0e6f64..1.0e6, bound in 1.0e-3f64..10.0) {
            let c = clamp_symmetric(z, bound);
            prop_assert!(c >= -bound && c <= bound);
        }
    }
}
