//! # Data Lookup Stage
//!
//! Turns free policy text into a [`MarketSnapshot`].
//!
//! The rate extractor is a fixed heuristic:
//! - The text must contain `"carbon tax"`
//! - The first word after the first `$` is parsed as the rate
//! - Anything else falls back to the default rate, never an error

use crate::config::LookupConfig;
use crate::model::SimplifiedClimateModel;
use crate::primitives::{CARBON_TAX_MARKER, RATE_DELIMITER};
use crate::system::StageKind;
use crate::{EchoError, EnergyMix, MarketSnapshot};

/// Data lookup capability (stage 1).
pub trait DataLookup {
    /// Build the market snapshot for a policy text.
    fn lookup(&self, policy_text: &str) -> Result<MarketSnapshot, EchoError>;
}

/// Find the proposed tax rate stated in `text`.
///
/// Returns `None` when the text states no usable rate. Literals the model
/// cannot evaluate (`inf`, `NaN`, `1e300`) count as unusable.
#[must_use]
pub fn find_tax_rate(text: &str) -> Option<f64> {
    if !text.contains(CARBON_TAX_MARKER) {
        return None;
    }
    let (_, after) = text.split_once(RATE_DELIMITER)?;
    let segment = after
        .split_once(RATE_DELIMITER)
        .map_or(after, |(head, _)| head);
    let token = segment.split_whitespace().next()?;

    match token.parse::<f64>() {
        Ok(rate) if SimplifiedClimateModel::is_modelable(rate) => Some(rate),
        _ => {
            tracing::debug!(token, "unparsable rate");
            None
        }
    }
}

/// Extract the proposed tax rate from `text`, or return `default_rate`.
#[must_use]
pub fn extract_tax_rate(text: &str, default_rate: f64) -> f64 {
    find_tax_rate(text).unwrap_or(default_rate)
}

/// Mocked market data search.
///
/// Reports the extracted rate next to fixed "current" indicators.
#[derive(Debug, Clone, Default)]
pub struct MockMarketLookup {
    config: LookupConfig,
}

impl MockMarketLookup {
    #[must_use]
    pub fn new(config: LookupConfig) -> Self {
        Self { config }
    }
}

impl DataLookup for MockMarketLookup {
    fn lookup(&self, policy_text: &str) -> Result<MarketSnapshot, EchoError> {
        tracing::debug!(
            tool = StageKind::DataRetrieval.tool_name(),
            "performing mock search for current market data"
        );
        let proposed_tax_rate = extract_tax_rate(policy_text, self.config.default_tax_rate);

        Ok(MarketSnapshot {
            policy_text: policy_text.to_string(),
            proposed_tax_rate,
            real_time_carbon_price: self.config.carbon_price,
            current_energy_mix: EnergyMix {
                fossil: self.config.fossil_share,
                renewable: self.config.renewable_share,
            },
            economic_forecast_stability: self.config.forecast_stability.clone(),
        })
    }
}
