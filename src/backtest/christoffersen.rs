//! Christoffersen likelihood-ratio tests for VaR breach sequences.
//!
//! The suite decomposes VaR-forecast validity into:
//! - unconditional coverage (`LR_uc`, chi-square 1 df): is the breach rate
//!   equal to the nominal tail probability?
//! - independence (`LR_ind`, chi-square 1 df): are breaches free of
//!   first-order clustering?
//! - conditional coverage (`LR_cc = LR_uc + LR_ind`, chi-square 2 df): both
//!   jointly.
//!
//! Every probability entering a logarithm is clipped to
//! `[PROB_FLOOR, 1 - PROB_FLOOR]`, so degenerate sequences (no breaches, all
//! breaches, empty transition cells) produce large-but-finite statistics
//! instead of infinities. Zero-denominator transition probabilities default
//! to 0 before clipping.
//!
//! The raw result carries statistics and counts only; chi-square p-values are
//! available as methods for callers that want them attached.
//!
//! References:
//! - Christoffersen (1998), *Evaluating Interval Forecasts*.
//! - Kupiec (1995), unconditional coverage test.

use serde::{Deserialize, Serialize};

use crate::core::{RiskError, validate_tail_probability};
use crate::math::{chi_square_survival, safe_ln};

/// Marginal and first-order transition counts of a breach sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionCounts {
    /// Number of observations `T`.
    pub observations: usize,
    /// Number of breaches `T1`.
    pub breaches: usize,
    /// Number of `0 -> 0` transitions.
    pub n00: usize,
    /// Number of `0 -> 1` transitions.
    pub n01: usize,
    /// Number of `1 -> 0` transitions.
    pub n10: usize,
    /// Number of `1 -> 1` transitions.
    pub n11: usize,
}

impl TransitionCounts {
    /// Tallies marginal and consecutive-pair counts from a breach sequence.
    ///
    /// For `T <= 1` the pair series is empty and all transition counts are 0;
    /// otherwise `n00 + n01 + n10 + n11 == T - 1`.
    pub fn from_indicators(violations: &[bool]) -> Self {
        let mut counts = Self {
            observations: violations.len(),
            breaches: violations.iter().filter(|&&v| v).count(),
            n00: 0,
            n01: 0,
            n10: 0,
            n11: 0,
        };

        for pair in violations.windows(2) {
            match (pair[0], pair[1]) {
                (false, false) => counts.n00 += 1,
                (false, true) => counts.n01 += 1,
                (true, false) => counts.n10 += 1,
                (true, true) => counts.n11 += 1,
            }
        }

        counts
    }

    /// Number of non-breach observations `T0`.
    pub fn non_breaches(&self) -> usize {
        self.observations - self.breaches
    }
}

/// Christoffersen likelihood-ratio statistics with their count breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChristoffersenTest {
    /// Count breakdown behind the statistics, kept for auditability.
    pub counts: TransitionCounts,
    /// Unconditional-coverage statistic (chi-square, 1 df under H0).
    pub lr_unconditional: f64,
    /// Independence statistic (chi-square, 1 df under H0).
    pub lr_independence: f64,
    /// Conditional-coverage statistic, `lr_uc + lr_ind` (chi-square, 2 df).
    pub lr_conditional: f64,
}

impl ChristoffersenTest {
    /// Chi-square(1) p-value of the unconditional-coverage statistic.
    pub fn p_value_unconditional(&self) -> f64 {
        chi_square_survival(self.lr_unconditional, 1.0)
    }

    /// Chi-square(1) p-value of the independence statistic.
    pub fn p_value_independence(&self) -> f64 {
        chi_square_survival(self.lr_independence, 1.0)
    }

    /// Chi-square(2) p-value of the conditional-coverage statistic.
    pub fn p_value_conditional(&self) -> f64 {
        chi_square_survival(self.lr_conditional, 2.0)
    }
}

/// Runs the Christoffersen LR suite on a breach sequence at nominal tail
/// probability `alpha`.
///
/// # Errors
/// `DegenerateInput` for an empty sequence, `InvalidInput` for `alpha`
/// outside `(0, 1)`.
///
/// # Examples
/// ```rust
/// use tailrisk::backtest::christoffersen_test;
///
/// let mut hits = vec![false; 100];
/// hits[10] = true;
/// hits[55] = true;
/// let test = christoffersen_test(&hits, 0.05).unwrap();
/// assert!(test.lr_conditional.is_finite());
/// assert_eq!(test.counts.breaches, 2);
/// ```
pub fn christoffersen_test(
    violations: &[bool],
    alpha: f64,
) -> Result<ChristoffersenTest, RiskError> {
    validate_tail_probability(alpha)?;
    if violations.is_empty() {
        return Err(RiskError::DegenerateInput(
            "christoffersen test requires at least one observation",
        ));
    }

    let counts = TransitionCounts::from_indicators(violations);
    let t0 = counts.non_breaches() as f64;
    let t1 = counts.breaches as f64;
    let t = counts.observations as f64;

    // Unconditional coverage: H0 breach probability alpha vs. MLE pi_hat.
    let pi_hat = t1 / t;
    let lr_uc = -2.0
        * (t0 * safe_ln(1.0 - alpha) + t1 * safe_ln(alpha)
            - (t0 * safe_ln(1.0 - pi_hat) + t1 * safe_ln(pi_hat)));

    // Independence: first-order Markov alternative over the transition table.
    let n00 = counts.n00 as f64;
    let n01 = counts.n01 as f64;
    let n10 = counts.n10 as f64;
    let n11 = counts.n11 as f64;

    let pi01 = conditional_prob(n01, n00 + n01);
    let pi11 = conditional_prob(n11, n10 + n11);
    let pi = conditional_prob(n01 + n11, n00 + n01 + n10 + n11);

    let lr_ind = -2.0
        * ((n00 + n10) * safe_ln(1.0 - pi) + (n01 + n11) * safe_ln(pi)
            - (n00 * safe_ln(1.0 - pi01)
                + n01 * safe_ln(pi01)
                + n10 * safe_ln(1.0 - pi11)
                + n11 * safe_ln(pi11)));

    // Clipping can leave tiny negative residuals on degenerate tables.
    let lr_uc = lr_uc.max(0.0);
    let lr_ind = lr_ind.max(0.0);

    Ok(ChristoffersenTest {
        counts,
        lr_unconditional: lr_uc,
        lr_independence: lr_ind,
        lr_conditional: lr_uc + lr_ind,
    })
}

fn conditional_prob(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
