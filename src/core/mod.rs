//! Domain types and library-wide error structures.
//!
//! The innovation distribution is a closed enum rather than a string-keyed
//! dispatch: adding a family means adding a variant and implementing the
//! `quantile`/`tail_mean` pair, not extending a match on names. String keys
//! are still accepted at the boundary via [`DistributionFamily::from_str`]
//! because fitted-model configs commonly carry the family as text.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, ContinuousCDF, Normal, StudentsT};

/// Errors surfaced by the backtesting API.
#[derive(Debug, Clone, PartialEq)]
pub enum RiskError {
    /// A distribution parameter required by the requested family is absent.
    MissingParameter(&'static str),
    /// Distribution family outside the supported set.
    UnsupportedDistribution(String),
    /// Two series that must be index-aligned have different lengths.
    Alignment { left: usize, right: usize },
    /// Input too short or empty for the statistic to be informative.
    DegenerateInput(&'static str),
    /// Parameter outside its valid domain (non-finite, wrong sign, ...).
    InvalidInput(&'static str),
}

impl std::fmt::Display for RiskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingParameter(name) => write!(f, "missing parameter: {name}"),
            Self::UnsupportedDistribution(name) => {
                write!(f, "unsupported distribution family: {name}")
            }
            Self::Alignment { left, right } => {
                write!(f, "misaligned series: lengths {left} and {right}")
            }
            Self::DegenerateInput(msg) => write!(f, "degenerate input: {msg}"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl std::error::Error for RiskError {}

/// Supported innovation-distribution families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistributionFamily {
    /// Gaussian innovations.
    Normal,
    /// Student-t innovations (heavier tails, finite variance for `nu > 2`).
    StudentT,
}

impl FromStr for DistributionFamily {
    type Err = RiskError;

    /// Parses the family names used by common econometric fitters.
    ///
    /// Accepted: `"normal"`, `"t"`, `"student-t"`, `"student_t"`
    /// (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "t" | "student-t" | "student_t" => Ok(Self::StudentT),
            other => Err(RiskError::UnsupportedDistribution(other.to_string())),
        }
    }
}

impl std::fmt::Display for DistributionFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::StudentT => write!(f, "student-t"),
        }
    }
}

/// Standardized innovation distribution with its shape parameters.
///
/// Student-t here is the *unit-scale* (non-standardized) t distribution: the
/// conditional volatility supplied alongside it multiplies `F_nu^{-1}(alpha)`
/// directly. Fitters that report standardized-t innovations (unit variance)
/// must rescale their volatility by `sqrt(nu / (nu - 2))` before building
/// forecasts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InnovationDistribution {
    /// Standard normal innovations.
    Normal,
    /// Unit-scale Student-t innovations.
    StudentT {
        /// Degrees of freedom; `> 1` required, `> 2` for finite variance.
        degrees_of_freedom: f64,
    },
}

impl InnovationDistribution {
    /// Builds a distribution from a family tag and an optional degrees-of-freedom.
    ///
    /// # Errors
    /// `MissingParameter` when `StudentT` is requested without `nu`;
    /// `InvalidInput` when `nu` is non-finite or `<= 1`.
    pub fn from_family(family: DistributionFamily, nu: Option<f64>) -> Result<Self, RiskError> {
        match family {
            DistributionFamily::Normal => Ok(Self::Normal),
            DistributionFamily::StudentT => match nu {
                None => Err(RiskError::MissingParameter(
                    "degrees_of_freedom is required for Student-t",
                )),
                Some(nu) => Self::student_t(nu),
            },
        }
    }

    /// Builds a unit-scale Student-t distribution.
    ///
    /// # Errors
    /// `InvalidInput` when `nu` is non-finite or `<= 1` (the expected-shortfall
    /// closed form divides by `nu - 1`).
    pub fn student_t(nu: f64) -> Result<Self, RiskError> {
        if !nu.is_finite() || nu <= 1.0 {
            return Err(RiskError::InvalidInput(
                "degrees_of_freedom must be finite and > 1",
            ));
        }
        Ok(Self::StudentT {
            degrees_of_freedom: nu,
        })
    }

    /// Family tag of this distribution.
    pub fn family(&self) -> DistributionFamily {
        match self {
            Self::Normal => DistributionFamily::Normal,
            Self::StudentT { .. } => DistributionFamily::StudentT,
        }
    }

    /// Quantile `F^{-1}(alpha)` of the standardized innovation.
    ///
    /// # Errors
    /// `InvalidInput` when `alpha` is outside `(0, 1)`.
    pub fn quantile(&self, alpha: f64) -> Result<f64, RiskError> {
        validate_tail_probability(alpha)?;
        match self {
            Self::Normal => Ok(standard_normal().inverse_cdf(alpha)),
            Self::StudentT { degrees_of_freedom } => {
                Ok(unit_student_t(*degrees_of_freedom).inverse_cdf(alpha))
            }
        }
    }

    /// Cumulative distribution function `F(x)` of the standardized innovation.
    pub fn cdf(&self, x: f64) -> f64 {
        match self {
            Self::Normal => standard_normal().cdf(x),
            Self::StudentT { degrees_of_freedom } => unit_student_t(*degrees_of_freedom).cdf(x),
        }
    }

    /// Density `f(x)` of the standardized innovation.
    pub fn pdf(&self, x: f64) -> f64 {
        match self {
            Self::Normal => standard_normal().pdf(x),
            Self::StudentT { degrees_of_freedom } => unit_student_t(*degrees_of_freedom).pdf(x),
        }
    }

    /// Left-tail mean `E[X | X < F^{-1}(alpha)]` of the standardized innovation.
    ///
    /// Normal: `-phi(q) / alpha` with `q = Phi^{-1}(alpha)`.
    /// Student-t: `-(f_nu(q) * (nu + q^2)) / ((nu - 1) * alpha)` with
    /// `q = F_nu^{-1}(alpha)`.
    ///
    /// # Errors
    /// `InvalidInput` when `alpha` is outside `(0, 1)`.
    pub fn tail_mean(&self, alpha: f64) -> Result<f64, RiskError> {
        let q = self.quantile(alpha)?;
        match self {
            Self::Normal => Ok(-standard_normal().pdf(q) / alpha),
            Self::StudentT { degrees_of_freedom } => {
                let nu = *degrees_of_freedom;
                let pdf = unit_student_t(nu).pdf(q);
                Ok(-(pdf * (nu + q * q)) / ((nu - 1.0) * alpha))
            }
        }
    }
}

/// One-step-ahead conditional forecast from the fitted volatility model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Conditional mean of the next-period return.
    pub mean: f64,
    /// Conditional volatility; must be finite and strictly positive.
    pub volatility: f64,
    /// Fitted innovation distribution.
    pub distribution: InnovationDistribution,
}

impl Forecast {
    /// Builds a forecast tuple, validating the volatility invariant.
    ///
    /// # Errors
    /// `InvalidInput` when `mean` is non-finite or `volatility` is not
    /// finite and strictly positive.
    pub fn new(
        mean: f64,
        volatility: f64,
        distribution: InnovationDistribution,
    ) -> Result<Self, RiskError> {
        if !mean.is_finite() {
            return Err(RiskError::InvalidInput("mean must be finite"));
        }
        if !volatility.is_finite() || volatility <= 0.0 {
            return Err(RiskError::InvalidInput("volatility must be finite and > 0"));
        }
        Ok(Self {
            mean,
            volatility,
            distribution,
        })
    }
}

pub(crate) fn validate_tail_probability(alpha: f64) -> Result<(), RiskError> {
    if !alpha.is_finite() || alpha <= 0.0 || alpha >= 1.0 {
        return Err(RiskError::InvalidInput("alpha must be in (0, 1)"));
    }
    Ok(())
}

fn standard_normal() -> Normal {
    Normal::new(0.0, 1.0).expect("valid standard normal parameters")
}

fn unit_student_t(nu: f64) -> StudentsT {
    // nu > 1 is enforced at construction of the enclosing variant.
    StudentsT::new(0.0, 1.0, nu).expect("valid unit-scale student-t parameters")
}
