//! Numeric utilities shared by the risk and backtest modules.
//!
//! This module includes:
//! - return transforms (simple and log),
//! - sample moments (mean, unbiased variance, standard deviation),
//! - probability clipping used to keep log-likelihood statistics finite,
//! - chi-square survival function for likelihood-ratio p-values,
//! - the asymptotic Kolmogorov distribution for KS p-values.
//!
//! References:
//! - Kolmogorov (1933), limiting distribution of the KS statistic.
//! - Stephens (1970), small-sample effective-n correction for the KS test.

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::core::RiskError;

/// Lower clipping bound for probability estimates entering a logarithm.
///
/// Every probability fed into a log-likelihood is clamped to
/// `[PROB_FLOOR, 1 - PROB_FLOOR]` so zero-count cells yield large-but-finite
/// statistics instead of infinities.
pub const PROB_FLOOR: f64 = 1.0e-12;

/// Clamps a probability estimate to `[PROB_FLOOR, 1 - PROB_FLOOR]`.
pub fn clip_probability(p: f64) -> f64 {
    p.clamp(PROB_FLOOR, 1.0 - PROB_FLOOR)
}

/// Natural log of a clipped probability; finite for any input in `[0, 1]`.
pub fn safe_ln(p: f64) -> f64 {
    clip_probability(p).ln()
}

/// Computes simple returns from a price series.
///
/// `r_t = P_t / P_{t-1} - 1`
///
/// # Errors
/// Fails if fewer than 2 prices are supplied, or if any price is non-finite
/// or `<= 0`.
pub fn simple_returns(prices: &[f64]) -> Result<Vec<f64>, RiskError> {
    validate_prices(prices)?;
    Ok(prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect())
}

/// Computes log returns from a price series.
///
/// `r_t = ln(P_t / P_{t-1})`
///
/// # Errors
/// Fails if fewer than 2 prices are supplied, or if any price is non-finite
/// or `<= 0`.
pub fn log_returns(prices: &[f64]) -> Result<Vec<f64>, RiskError> {
    validate_prices(prices)?;
    Ok(prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}

/// Sample mean.
///
/// Returns 0 for an empty slice.
pub fn sample_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased sample variance (denominator `n - 1`).
///
/// # Errors
/// `DegenerateInput` when fewer than 2 observations are supplied.
pub fn sample_variance(values: &[f64]) -> Result<f64, RiskError> {
    if values.len() < 2 {
        return Err(RiskError::DegenerateInput(
            "variance requires at least 2 observations",
        ));
    }
    let mean = sample_mean(values);
    let mut sum = 0.0;
    for &x in values {
        let d = x - mean;
        sum += d * d;
    }
    Ok(sum / (values.len() as f64 - 1.0))
}

/// Unbiased sample standard deviation.
///
/// # Errors
/// `DegenerateInput` when fewer than 2 observations are supplied.
pub fn sample_std_dev(values: &[f64]) -> Result<f64, RiskError> {
    Ok(sample_variance(values)?.max(0.0).sqrt())
}

/// Mean absolute relative difference `mean(|(x - y) / y|)` between two
/// aligned series, e.g. VaR vs. ES forecast paths.
///
/// # Errors
/// `Alignment` on length mismatch, `DegenerateInput` on empty input.
pub fn mean_absolute_relative_difference(x: &[f64], y: &[f64]) -> Result<f64, RiskError> {
    if x.len() != y.len() {
        return Err(RiskError::Alignment {
            left: x.len(),
            right: y.len(),
        });
    }
    if x.is_empty() {
        return Err(RiskError::DegenerateInput(
            "relative difference requires at least one observation",
        ));
    }
    let sum = x
        .iter()
        .zip(y.iter())
        .map(|(a, b)| ((a - b) / b).abs())
        .sum::<f64>();
    Ok(sum / x.len() as f64)
}

/// Survival function `P(X > stat)` of a chi-square distribution.
///
/// Used to attach p-values to likelihood-ratio statistics.
pub fn chi_square_survival(statistic: f64, dof: f64) -> f64 {
    let chi = ChiSquared::new(dof).expect("valid chi-square dof");
    (1.0 - chi.cdf(statistic.max(0.0))).clamp(0.0, 1.0)
}

/// Asymptotic two-sided KS p-value for statistic `d` on a sample of size `n`.
///
/// Applies Stephens' effective-sample-size correction
/// `lambda = (sqrt(n) + 0.12 + 0.11 / sqrt(n)) * d` and evaluates the
/// Kolmogorov series `Q(lambda) = 2 * sum_{k>=1} (-1)^{k-1} exp(-2 k^2 lambda^2)`.
pub fn kolmogorov_survival(d: f64, n: usize) -> f64 {
    if n == 0 || d <= 0.0 {
        return 1.0;
    }
    if d >= 1.0 {
        return 0.0;
    }

    let sqrt_n = (n as f64).sqrt();
    let lambda = (sqrt_n + 0.12 + 0.11 / sqrt_n) * d;

    let mut sum = 0.0;
    let mut sign = 1.0;
    for k in 1..=100 {
        let kf = k as f64;
        let term = (-2.0 * kf * kf * lambda * lambda).exp();
        sum += sign * term;
        sign = -sign;
        if term < 1.0e-16 {
            break;
        }
    }

    (2.0 * sum).clamp(0.0, 1.0)
}

fn validate_prices(prices: &[f64]) -> Result<(), RiskError> {
    if prices.len() < 2 {
        return Err(RiskError::DegenerateInput(
            "prices must contain at least two values",
        ));
    }
    if prices.iter().any(|x| !x.is_finite() || *x <= 0.0) {
        return Err(RiskError::InvalidInput(
            "prices must be finite and strictly positive",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn return_transforms_match_known_values() {
        let prices = vec![100.0, 102.0, 101.0, 103.0];
        let simple = simple_returns(&prices).unwrap();
        let log = log_returns(&prices).unwrap();

        assert_relative_eq!(simple[0], 0.02, epsilon = 1e-12);
        assert_relative_eq!(log[0], (1.02_f64).ln(), epsilon = 1e-12);
        assert_relative_eq!(log[1], (101.0_f64 / 102.0).ln(), epsilon = 1e-12);
        assert_relative_eq!(log[2], (103.0_f64 / 101.0).ln(), epsilon = 1e-12);
    }

    #[test]
    fn return_transforms_reject_bad_prices() {
        assert!(log_returns(&[100.0]).is_err());
        assert!(log_returns(&[100.0, -1.0]).is_err());
        assert!(simple_returns(&[100.0, f64::NAN]).is_err());
    }

    #[test]
    fn clipping_keeps_probabilities_off_the_boundary() {
        assert_relative_eq!(clip_probability(0.0), PROB_FLOOR);
        assert_relative_eq!(clip_probability(1.0), 1.0 - PROB_FLOOR);
        assert_relative_eq!(clip_probability(0.3), 0.3, epsilon = 1e-15);
        assert!(safe_ln(0.0).is_finite());
        assert!(safe_ln(1.0).is_finite());
    }

    #[test]
    fn sample_moments_match_manual_computation() {
        let v = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(sample_mean(&v), 3.0, epsilon = 1e-12);
        assert_relative_eq!(sample_variance(&v).unwrap(), 2.5, epsilon = 1e-12);
        assert_relative_eq!(sample_std_dev(&v).unwrap(), 2.5_f64.sqrt(), epsilon = 1e-12);
        assert!(sample_variance(&[1.0]).is_err());
    }

    #[test]
    fn relative_difference_matches_manual_computation() {
        let x = vec![1.1, 2.2];
        let y = vec![1.0, 2.0];
        let d = mean_absolute_relative_difference(&x, &y).unwrap();
        assert_relative_eq!(d, 0.1, epsilon = 1e-12);

        assert!(mean_absolute_relative_difference(&x, &y[..1]).is_err());
        assert!(mean_absolute_relative_difference(&[], &[]).is_err());
    }

    #[test]
    fn chi_square_survival_matches_tabulated_critical_values() {
        // 95th percentile of chi2(1) is 3.841, of chi2(2) is 5.991.
        assert_relative_eq!(chi_square_survival(3.841, 1.0), 0.05, epsilon = 1e-3);
        assert_relative_eq!(chi_square_survival(5.991, 2.0), 0.05, epsilon = 1e-3);
        assert_relative_eq!(chi_square_survival(0.0, 1.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn kolmogorov_survival_behaves_at_the_extremes() {
        assert_relative_eq!(kolmogorov_survival(0.0, 100), 1.0);
        assert_relative_eq!(kolmogorov_survival(1.0, 100), 0.0);
        // Large samples with small deviations should not reject.
        assert!(kolmogorov_survival(0.02, 1000) > 0.5);
        // Large deviations should reject decisively.
        assert!(kolmogorov_survival(0.2, 1000) < 1.0e-6);
    }
}
