//! Closed-form one-step VaR and Expected Shortfall under Normal and
//! Student-t innovations.
//!
//! Both metrics are expressed as *signed return thresholds*: for a left-tail
//! probability `alpha` they are typically negative, with ES below VaR. This
//! matches the convention of GARCH-style forecast pipelines, where the
//! realized return is compared directly against the threshold.
//!
//! Formulas:
//! - Normal: `VaR = mu + sigma * Phi^{-1}(alpha)`,
//!   `ES = mu + sigma * (-phi(q) / alpha)`.
//! - Student-t (unit scale, `q = F_nu^{-1}(alpha)`):
//!   `VaR = mu + sigma * q`,
//!   `ES = mu + sigma * (-(f_nu(q) * (nu + q^2)) / ((nu - 1) * alpha))`.
//!
//! The Student-t branch takes `sigma` as the scale multiplying the unit-scale
//! t quantile; callers fitting standardized-t innovations must rescale first
//! (see [`InnovationDistribution`]).
//!
//! References:
//! - McNeil, Frey, Embrechts, *Quantitative Risk Management* (2005/2015),
//!   Example 2.14 (normal ES) and the Student-t analogue.

use crate::core::{Forecast, InnovationDistribution, RiskError, validate_tail_probability};

/// One-step parametric Value-at-Risk for a return.
///
/// Returns `mu + sigma * F^{-1}(alpha)`; negative for loss-tail `alpha`.
///
/// # Errors
/// `InvalidInput` for non-finite `mean`, non-positive or non-finite
/// `volatility`, or `alpha` outside `(0, 1)`.
///
/// # Examples
/// ```rust
/// use tailrisk::core::InnovationDistribution;
/// use tailrisk::risk::value_at_risk;
///
/// let var = value_at_risk(0.0, 1.0, 0.05, &InnovationDistribution::Normal).unwrap();
/// assert!((var + 1.6449).abs() < 1e-3);
/// ```
pub fn value_at_risk(
    mean: f64,
    volatility: f64,
    alpha: f64,
    distribution: &InnovationDistribution,
) -> Result<f64, RiskError> {
    validate_scale(mean, volatility)?;
    Ok(mean + volatility * distribution.quantile(alpha)?)
}

/// One-step parametric Expected Shortfall (AVaR) for a return.
///
/// Returns `mu + sigma * E[X | X < F^{-1}(alpha)]`; lies below the VaR at the
/// same level.
///
/// # Errors
/// `InvalidInput` for non-finite `mean`, non-positive or non-finite
/// `volatility`, or `alpha` outside `(0, 1)`.
///
/// # Examples
/// ```rust
/// use tailrisk::core::InnovationDistribution;
/// use tailrisk::risk::expected_shortfall;
///
/// let es = expected_shortfall(0.0, 1.0, 0.05, &InnovationDistribution::Normal).unwrap();
/// assert!((es + 2.0627).abs() < 1e-3);
/// ```
pub fn expected_shortfall(
    mean: f64,
    volatility: f64,
    alpha: f64,
    distribution: &InnovationDistribution,
) -> Result<f64, RiskError> {
    validate_scale(mean, volatility)?;
    Ok(mean + volatility * distribution.tail_mean(alpha)?)
}

impl Forecast {
    /// VaR implied by this forecast at tail probability `alpha`.
    ///
    /// # Errors
    /// `InvalidInput` when `alpha` is outside `(0, 1)`.
    pub fn value_at_risk(&self, alpha: f64) -> Result<f64, RiskError> {
        value_at_risk(self.mean, self.volatility, alpha, &self.distribution)
    }

    /// Expected Shortfall implied by this forecast at tail probability `alpha`.
    ///
    /// # Errors
    /// `InvalidInput` when `alpha` is outside `(0, 1)`.
    pub fn expected_shortfall(&self, alpha: f64) -> Result<f64, RiskError> {
        expected_shortfall(self.mean, self.volatility, alpha, &self.distribution)
    }
}

/// VaR series over an out-of-sample window of per-period forecasts.
///
/// # Errors
/// `InvalidInput` when `alpha` is outside `(0, 1)` or any forecast violates
/// the scale invariants.
pub fn var_forecast_series(forecasts: &[Forecast], alpha: f64) -> Result<Vec<f64>, RiskError> {
    validate_tail_probability(alpha)?;
    forecasts.iter().map(|f| f.value_at_risk(alpha)).collect()
}

/// Expected Shortfall series over an out-of-sample window of forecasts.
///
/// # Errors
/// `InvalidInput` when `alpha` is outside `(0, 1)` or any forecast violates
/// the scale invariants.
pub fn es_forecast_series(forecasts: &[Forecast], alpha: f64) -> Result<Vec<f64>, RiskError> {
    validate_tail_probability(alpha)?;
    forecasts
        .iter()
        .map(|f| f.expected_shortfall(alpha))
        .collect()
}

fn validate_scale(mean: f64, volatility: f64) -> Result<(), RiskError> {
    if !mean.is_finite() {
        return Err(RiskError::InvalidInput("mean must be finite"));
    }
    if !volatility.is_finite() || volatility <= 0.0 {
        return Err(RiskError::InvalidInput("volatility must be finite and > 0"));
    }
    Ok(())
}
