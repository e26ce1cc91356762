//! # Climate Model Stage
//!
//! Closed-form environmental and economic response to a carbon tax rate.
//!
//! | Output | Formula | Reported as |
//! |--------|---------|-------------|
//! | CO2 reduction | `0.05 + r / 1000` | percent, 2 decimals |
//! | GDP impact | `-(r^1.1) * 0.00005` | percent, 3 decimals |
//! | Sector shift | `r > 60`, `r > 30`, else | [`SectorShift`] |
//!
//! Negative rates use the signed-magnitude power `sign(r) * |r|^1.1`. Rates
//! so large that `|r|^1.1` overflows are outside the model's range; see
//! [`SimplifiedClimateModel::is_modelable`].

use crate::primitives::{
    BASELINE_CO2_REDUCTION, CO2_DECIMALS, CO2_RATE_DIVISOR, GDP_COEFFICIENT, GDP_DECIMALS,
    GDP_EXPONENT,
};
use crate::system::StageKind;
use crate::{MarketSnapshot, SectorShift, SimulationResult};

/// Model capability (stage 2). Pure; cannot fail.
pub trait ClimateModel {
    fn run(&self, snapshot: &MarketSnapshot) -> SimulationResult;
}

/// `sign(base) * |base|^exponent`.
#[must_use]
pub fn signed_pow(base: f64, exponent: f64) -> f64 {
    if base < 0.0 {
        -(-base).powf(exponent)
    } else {
        base.powf(exponent)
    }
}

/// Round to `places` decimals.
///
/// Rounds the exact binary value of `value`, ties to the even digit, and
/// returns the double nearest to the rounded decimal. Scaling by a power of
/// ten first would round the scaled product instead (`5.045` -> `5.05`).
#[must_use]
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

/// The simplified integrated climate/economy model.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplifiedClimateModel;

impl SimplifiedClimateModel {
    /// CO2 reduction as a fraction.
    #[must_use]
    pub fn co2_reduction_fraction(rate: f64) -> f64 {
        BASELINE_CO2_REDUCTION + rate / CO2_RATE_DIVISOR
    }

    /// GDP change as a fraction (negative for positive rates).
    #[must_use]
    pub fn gdp_impact_fraction(rate: f64) -> f64 {
        -signed_pow(rate, GDP_EXPONENT) * GDP_COEFFICIENT
    }

    /// Whether `rate` yields finite outputs.
    #[must_use]
    pub fn is_modelable(rate: f64) -> bool {
        rate.is_finite()
            && (Self::co2_reduction_fraction(rate) * 100.0).is_finite()
            && (Self::gdp_impact_fraction(rate) * 100.0).is_finite()
    }

    /// Run the model for a bare rate.
    #[must_use]
    pub fn simulate(rate: f64) -> SimulationResult {
        SimulationResult {
            predicted_co2_reduction_percentage: round_to(
                Self::co2_reduction_fraction(rate) * 100.0,
                CO2_DECIMALS,
            ),
            economic_cost_gdp_impact: round_to(
                Self::gdp_impact_fraction(rate) * 100.0,
                GDP_DECIMALS,
            ),
            energy_sector_shift: SectorShift::from_rate(rate),
        }
    }
}

impl ClimateModel for SimplifiedClimateModel {
    fn run(&self, snapshot: &MarketSnapshot) -> SimulationResult {
        let rate = snapshot.proposed_tax_rate;
        tracing::debug!(
            tool = StageKind::Modeling.tool_name(),
            rate,
            "running climate model"
        );
        Self::simulate(rate)
    }
}
