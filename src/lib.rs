//! Tailrisk is a backtesting library for Value-at-Risk and Expected-Shortfall
//! forecasts produced by volatility models (constant-volatility, GARCH,
//! AR-GARCH) fitted to asset log-returns.
//!
//! The crate covers the statistically load-bearing pieces of a risk-model
//! validation pipeline:
//! - closed-form one-step VaR/ES under Normal and Student-t innovations,
//! - breach classification of realized returns against VaR forecasts,
//! - the Christoffersen likelihood-ratio suite (unconditional coverage,
//!   independence, conditional coverage),
//! - probability-integral-transform diagnostics with a KS uniformity test.
//!
//! Model estimation, data acquisition, and plotting are deliberately out of
//! scope: the crate consumes per-period forecast tuples
//! `(mean, volatility, innovation distribution)` and standardized residuals
//! supplied by an external econometric fitter, and every operation is a
//! deterministic pure function over in-memory series.
//!
//! References used across modules:
//! - Christoffersen (1998), *Evaluating Interval Forecasts*.
//! - Kupiec (1995), proportion-of-failures coverage test.
//! - McNeil, Frey, Embrechts, *Quantitative Risk Management* (2005/2015),
//!   parametric VaR/ES closed forms.
//! - Diebold, Gunther, Tay (1998), density forecast evaluation via the PIT.
//!
//! Numerical considerations:
//! - every probability entering a log-likelihood is clipped to
//!   `[PROB_FLOOR, 1 - PROB_FLOOR]`, so zero-count cells yield finite
//!   statistics rather than infinities;
//! - Student-t ES requires degrees of freedom `> 1` algebraically and `> 2`
//!   for finite innovation variance; the latter is a caller guarantee.
//!
//! # Quick Start
//! Compute a one-step parametric VaR and ES:
//! ```rust
//! use tailrisk::core::InnovationDistribution;
//! use tailrisk::risk::{expected_shortfall, value_at_risk};
//!
//! let t6 = InnovationDistribution::student_t(6.0).unwrap();
//! let var = value_at_risk(0.0002, 0.012, 0.05, &t6).unwrap();
//! let es = expected_shortfall(0.0002, 0.012, 0.05, &t6).unwrap();
//! assert!(es < var && var < 0.0);
//! ```
//!
//! Backtest a forecast window end to end:
//! ```rust
//! use tailrisk::backtest::backtest_forecasts;
//! use tailrisk::core::{Forecast, InnovationDistribution};
//!
//! let normal = InnovationDistribution::Normal;
//! let forecasts: Vec<Forecast> = (0..100)
//!     .map(|_| Forecast::new(0.0, 0.01, normal).unwrap())
//!     .collect();
//! let realized = vec![0.001; 100];
//!
//! let report = backtest_forecasts(&realized, &forecasts, 0.05).unwrap();
//! assert!(report.christoffersen.p_value_conditional() <= 1.0);
//! ```
//!
//! Check residual uniformity through the PIT:
//! ```rust
//! use tailrisk::backtest::{ks_uniform_test, pit_values};
//! use tailrisk::core::InnovationDistribution;
//!
//! let normal = InnovationDistribution::Normal;
//! let residuals = [-1.2, -0.3, 0.1, 0.8, 1.5];
//! let u = pit_values(&residuals, |x| normal.cdf(x));
//! let ks = ks_uniform_test(&u).unwrap();
//! assert!(ks.statistic >= 0.0 && ks.p_value <= 1.0);
//! ```

pub mod backtest;
pub mod core;
pub mod math;
pub mod risk;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::backtest::{
        ChristoffersenTest, KsTest, TransitionCounts, VarBacktest, backtest_forecasts,
        breach_rate, christoffersen_test, ks_uniform_test, pit_uniformity, pit_values,
        violation_indicators,
    };
    pub use crate::core::{DistributionFamily, Forecast, InnovationDistribution, RiskError};
    pub use crate::risk::{
        es_forecast_series, expected_shortfall, value_at_risk, var_forecast_series,
    };
}
