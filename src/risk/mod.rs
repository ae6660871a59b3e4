//! Risk namespace: parametric tail-risk quantiles.
//!
//! This module wires and re-exports:
//! - `quantile`: closed-form one-step VaR/ES under Normal and Student-t
//!   innovations, scalar and series forms.
//!
//! It is intentionally a facade: domain logic lives in submodules, while this
//! file defines the public import surface (`tailrisk::risk::*`) for
//! downstream code.

pub mod quantile;

pub use quantile::{es_forecast_series, expected_shortfall, value_at_risk, var_forecast_series};
