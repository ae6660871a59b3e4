//! Breach classification of realized returns against VaR forecasts.

use crate::core::RiskError;

/// Builds a breach-indicator sequence from realized returns and VaR forecasts.
///
/// Convention: both series are *signed returns*, and a breach at time `t` is
/// `realized_t < var_t` (the realized return fell through the loss
/// threshold). This differs from loss-positive P&L conventions where a breach
/// is `loss > var`.
///
/// # Errors
/// `Alignment` on length mismatch, `InvalidInput` on non-finite values.
///
/// # Examples
/// ```rust
/// use tailrisk::backtest::violation_indicators;
///
/// let hits = violation_indicators(&[-0.03, 0.01], &[-0.02, -0.02]).unwrap();
/// assert_eq!(hits, vec![true, false]);
/// ```
pub fn violation_indicators(
    realized_returns: &[f64],
    var_forecasts: &[f64],
) -> Result<Vec<bool>, RiskError> {
    if realized_returns.len() != var_forecasts.len() {
        return Err(RiskError::Alignment {
            left: realized_returns.len(),
            right: var_forecasts.len(),
        });
    }
    if realized_returns.iter().any(|x| !x.is_finite()) {
        return Err(RiskError::InvalidInput("realized returns must be finite"));
    }
    if var_forecasts.iter().any(|x| !x.is_finite()) {
        return Err(RiskError::InvalidInput("var forecasts must be finite"));
    }

    Ok(realized_returns
        .iter()
        .zip(var_forecasts.iter())
        .map(|(r, v)| r < v)
        .collect())
}

/// Fraction of periods that breached VaR; 0 for an empty sequence.
pub fn breach_rate(violations: &[bool]) -> f64 {
    if violations.is_empty() {
        return 0.0;
    }
    let breaches = violations.iter().filter(|&&v| v).count();
    breaches as f64 / violations.len() as f64
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn breach_requires_strict_undershoot() {
        let hits = violation_indicators(&[-0.02, -0.019, -0.021], &[-0.02, -0.02, -0.02]).unwrap();
        assert_eq!(hits, vec![false, false, true]);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let realized = vec![0.0; 50];
        let vars = vec![-0.02; 49];
        let err = violation_indicators(&realized, &vars).unwrap_err();
        assert_eq!(
            err,
            RiskError::Alignment {
                left: 50,
                right: 49
            }
        );
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        assert!(violation_indicators(&[f64::NAN], &[-0.02]).is_err());
        assert!(violation_indicators(&[0.01], &[f64::INFINITY]).is_err());
    }

    #[test]
    fn breach_rate_counts_hits() {
        assert_relative_eq!(breach_rate(&[]), 0.0);
        assert_relative_eq!(breach_rate(&[true, false, false, true]), 0.5);
        assert_relative_eq!(breach_rate(&[false; 10]), 0.0);
    }
}
