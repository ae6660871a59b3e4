//! Backtest namespace: breach classification, coverage tests, and PIT
//! diagnostics.
//!
//! This module wires and re-exports:
//! - `violations`: breach classification of realized returns vs. VaR,
//! - `christoffersen`: unconditional-coverage, independence, and
//!   conditional-coverage likelihood-ratio tests,
//! - `pit`: probability integral transform and KS uniformity test,
//!
//! and defines [`backtest_forecasts`], the one-call pipeline from forecast
//! tuples and realized returns to a combined report.

pub mod christoffersen;
pub mod pit;
pub mod violations;

pub use christoffersen::{ChristoffersenTest, TransitionCounts, christoffersen_test};
pub use pit::{KsTest, ks_uniform_test, pit_uniformity, pit_values};
pub use violations::{breach_rate, violation_indicators};

use serde::{Deserialize, Serialize};

use crate::core::{Forecast, RiskError};
use crate::risk::{es_forecast_series, var_forecast_series};

/// Combined VaR backtest over an out-of-sample window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarBacktest {
    /// Nominal tail probability of the forecasts.
    pub alpha: f64,
    /// Per-period VaR forecasts.
    pub var_forecasts: Vec<f64>,
    /// Per-period Expected-Shortfall forecasts.
    pub es_forecasts: Vec<f64>,
    /// Breach indicators, `realized_t < var_t`.
    pub violations: Vec<bool>,
    /// Observed breach fraction.
    pub breach_rate: f64,
    /// Expected breach count under correct calibration, `alpha * T`.
    pub expected_breaches: f64,
    /// Christoffersen likelihood-ratio suite on the breach sequence.
    pub christoffersen: ChristoffersenTest,
}

/// Runs the full VaR backtest pipeline: quantile forecasts, breach
/// classification, and the Christoffersen LR suite.
///
/// # Errors
/// `Alignment` when `realized_returns` and `forecasts` differ in length;
/// `DegenerateInput` for empty inputs; `InvalidInput` for bad `alpha` or
/// forecast parameters.
///
/// # Examples
/// ```rust
/// use tailrisk::backtest::backtest_forecasts;
/// use tailrisk::core::{Forecast, InnovationDistribution};
///
/// let normal = InnovationDistribution::Normal;
/// let forecasts: Vec<Forecast> = (0..50)
///     .map(|_| Forecast::new(0.0, 0.01, normal).unwrap())
///     .collect();
/// let realized = vec![0.0005; 50];
///
/// let report = backtest_forecasts(&realized, &forecasts, 0.05).unwrap();
/// assert_eq!(report.violations.len(), 50);
/// assert!(report.christoffersen.lr_conditional.is_finite());
/// ```
pub fn backtest_forecasts(
    realized_returns: &[f64],
    forecasts: &[Forecast],
    alpha: f64,
) -> Result<VarBacktest, RiskError> {
    if realized_returns.len() != forecasts.len() {
        return Err(RiskError::Alignment {
            left: realized_returns.len(),
            right: forecasts.len(),
        });
    }

    let var_forecasts = var_forecast_series(forecasts, alpha)?;
    let es_forecasts = es_forecast_series(forecasts, alpha)?;
    let violations = violation_indicators(realized_returns, &var_forecasts)?;
    let christoffersen = christoffersen_test(&violations, alpha)?;

    Ok(VarBacktest {
        alpha,
        breach_rate: breach_rate(&violations),
        expected_breaches: alpha * realized_returns.len() as f64,
        var_forecasts,
        es_forecasts,
        violations,
        christoffersen,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::core::InnovationDistribution;

    use super::*;

    fn flat_forecasts(n: usize, sigma: f64) -> Vec<Forecast> {
        (0..n)
            .map(|_| Forecast::new(0.0, sigma, InnovationDistribution::Normal).unwrap())
            .collect()
    }

    #[test]
    fn report_fields_are_mutually_consistent() {
        let n = 250;
        let forecasts = flat_forecasts(n, 0.01);
        // Engineer breaches at known positions by dropping realized returns
        // below the flat 5% VaR (about -0.01645).
        let mut realized = vec![0.0; n];
        for i in [30usize, 90, 151, 200] {
            realized[i] = -0.05;
        }

        let report = backtest_forecasts(&realized, &forecasts, 0.05).unwrap();

        assert_eq!(report.var_forecasts.len(), n);
        assert_eq!(report.es_forecasts.len(), n);
        assert_eq!(report.violations.len(), n);
        assert_eq!(report.christoffersen.counts.breaches, 4);
        assert_relative_eq!(report.breach_rate, 4.0 / 250.0, epsilon = 1e-12);
        assert_relative_eq!(report.expected_breaches, 12.5, epsilon = 1e-12);

        // ES path sits strictly below the VaR path.
        for (es, var) in report.es_forecasts.iter().zip(report.var_forecasts.iter()) {
            assert!(es < var);
        }
    }

    #[test]
    fn misaligned_inputs_are_rejected() {
        let forecasts = flat_forecasts(10, 0.01);
        let realized = vec![0.0; 9];
        let err = backtest_forecasts(&realized, &forecasts, 0.05).unwrap_err();
        assert_eq!(
            err,
            RiskError::Alignment {
                left: 9,
                right: 10
            }
        );
    }

    #[test]
    fn empty_window_is_degenerate() {
        let err = backtest_forecasts(&[], &[], 0.05).unwrap_err();
        assert!(matches!(err, RiskError::DegenerateInput(_)));
    }
}
