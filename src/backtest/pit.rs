//! Probability integral transform and Kolmogorov-Smirnov uniformity test.
//!
//! Under a correctly specified innovation distribution, the PIT values
//! `u_t = F(e_t)` of the standardized residuals are i.i.d. Uniform(0,1).
//! Failure to reject uniformity (large KS p-value) supports the model
//! specification.

use serde::{Deserialize, Serialize};

use crate::core::{InnovationDistribution, RiskError};
use crate::math::{clip_probability, kolmogorov_survival};

/// Two-sided Kolmogorov-Smirnov test output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KsTest {
    /// Supremum distance between the empirical and Uniform(0,1) CDFs.
    pub statistic: f64,
    /// Asymptotic two-sided p-value.
    pub p_value: f64,
}

/// Probability integral transform `u_t = F(e_t)` of a residual series.
///
/// The supplied `cdf` is a pure function, typically the CDF of the fitted
/// innovation distribution; this transform does not fit or own the
/// distribution. Outputs are clipped to `[PROB_FLOOR, 1 - PROB_FLOOR]` to
/// guard downstream log-based statistics against exact 0/1 values.
///
/// # Examples
/// ```rust
/// use tailrisk::backtest::pit_values;
/// use tailrisk::core::InnovationDistribution;
///
/// let normal = InnovationDistribution::Normal;
/// let u = pit_values(&[-1.0, 0.0, 1.0], |x| normal.cdf(x));
/// assert!((u[1] - 0.5).abs() < 1e-12);
/// assert!(u.iter().all(|&v| v > 0.0 && v < 1.0));
/// ```
pub fn pit_values<F>(residuals: &[f64], cdf: F) -> Vec<f64>
where
    F: Fn(f64) -> f64,
{
    residuals
        .iter()
        .map(|&e| clip_probability(cdf(e)))
        .collect()
}

/// Two-sided KS goodness-of-fit test of a PIT sequence against Uniform(0,1).
///
/// # Errors
/// `DegenerateInput` on empty input, `InvalidInput` when any value lies
/// outside `[0, 1]` or is non-finite.
pub fn ks_uniform_test(pit_sequence: &[f64]) -> Result<KsTest, RiskError> {
    if pit_sequence.is_empty() {
        return Err(RiskError::DegenerateInput(
            "ks test requires at least one observation",
        ));
    }
    if pit_sequence
        .iter()
        .any(|u| !u.is_finite() || *u < 0.0 || *u > 1.0)
    {
        return Err(RiskError::InvalidInput(
            "pit values must lie in [0, 1]",
        ));
    }

    let mut sorted = pit_sequence.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len() as f64;
    let mut statistic: f64 = 0.0;
    for (i, &u) in sorted.iter().enumerate() {
        let ecdf_above = (i + 1) as f64 / n - u;
        let ecdf_below = u - i as f64 / n;
        statistic = statistic.max(ecdf_above).max(ecdf_below);
    }

    Ok(KsTest {
        statistic,
        p_value: kolmogorov_survival(statistic, sorted.len()),
    })
}

/// PIT-uniformity test of residuals against a fitted innovation distribution.
///
/// Transforms `residuals` through the distribution's own CDF and runs
/// [`ks_uniform_test`] on the result.
///
/// # Errors
/// `DegenerateInput` on empty input.
pub fn pit_uniformity(
    residuals: &[f64],
    distribution: &InnovationDistribution,
) -> Result<KsTest, RiskError> {
    ks_uniform_test(&pit_values(residuals, |x| distribution.cdf(x)))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::math::PROB_FLOOR;

    use super::*;

    #[test]
    fn pit_matches_the_cdf_away_from_the_boundary() {
        let normal = InnovationDistribution::Normal;
        let residuals = [-2.0, -0.5, 0.0, 0.5, 2.0];
        let u = pit_values(&residuals, |x| normal.cdf(x));

        for (&e, &v) in residuals.iter().zip(u.iter()) {
            assert_relative_eq!(v, normal.cdf(e), epsilon = 1e-14);
        }
    }

    #[test]
    fn pit_clips_extreme_residuals_off_the_boundary() {
        let normal = InnovationDistribution::Normal;
        let u = pit_values(&[-40.0, 40.0], |x| normal.cdf(x));
        assert_relative_eq!(u[0], PROB_FLOOR);
        assert_relative_eq!(u[1], 1.0 - PROB_FLOOR);
    }

    #[test]
    fn ks_statistic_matches_manual_computation() {
        // ECDF distances for {0.1, 0.4, 0.7}: max at 0.7 -> |0.7 - 1/3| = 0.3666...
        let test = ks_uniform_test(&[0.1, 0.4, 0.7]).unwrap();
        assert_relative_eq!(test.statistic, 0.7 - 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn ks_accepts_an_evenly_spread_sample() {
        let u: Vec<f64> = (0..1000).map(|i| (i as f64 + 0.5) / 1000.0).collect();
        let test = ks_uniform_test(&u).unwrap();
        assert!(test.statistic < 0.01);
        assert!(test.p_value > 0.99);
    }

    #[test]
    fn ks_rejects_a_collapsed_sample() {
        let u = vec![0.5; 200];
        let test = ks_uniform_test(&u).unwrap();
        assert!(test.statistic >= 0.5);
        assert!(test.p_value < 1e-6);
    }

    #[test]
    fn ks_validates_its_input() {
        assert!(matches!(
            ks_uniform_test(&[]),
            Err(RiskError::DegenerateInput(_))
        ));
        assert!(ks_uniform_test(&[0.5, 1.5]).is_err());
        assert!(ks_uniform_test(&[f64::NAN]).is_err());
    }
}
