//! # Configuration
//!
//! Serde model of the ECHO configuration file.
//!
//! Every section and field is optional; absent values take the constants in
//! [`crate::primitives`]. Parsing the file format is the app's job; the CORE
//! only defines the shape and validates ranges.

use crate::EchoError;
use crate::primitives::{
    DEFAULT_POLICY_TEXT, DEFAULT_RECIPIENT, DEFAULT_TAX_RATE, FALLBACK_RECIPIENT,
    FORECAST_STABILITY, FOSSIL_SHARE, MAX_POLICY_RECORDS, NOTIFICATION_PREVIEW_CHARS,
    REAL_TIME_CARBON_PRICE, RENEWABLE_SHARE,
};
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EchoConfig {
    pub pipeline: PipelineConfig,
    pub lookup: LookupConfig,
    pub notifier: NotifierConfig,
    pub store: StoreConfig,
}

/// The request analysed when the CLI is given no policy or recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub policy_text: String,
    pub recipient: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            policy_text: DEFAULT_POLICY_TEXT.to_string(),
            recipient: DEFAULT_RECIPIENT.to_string(),
        }
    }
}

/// Values reported by the mocked market data search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LookupConfig {
    pub default_tax_rate: f64,
    pub carbon_price: f64,
    pub fossil_share: f64,
    pub renewable_share: f64,
    pub forecast_stability: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            default_tax_rate: DEFAULT_TAX_RATE,
            carbon_price: REAL_TIME_CARBON_PRICE,
            fossil_share: FOSSIL_SHARE,
            renewable_share: RENEWABLE_SHARE,
            forecast_stability: FORECAST_STABILITY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifierConfig {
    /// Characters of policy text quoted in notifications.
    pub preview_chars: usize,
    /// Used when the request's recipient is blank.
    pub fallback_recipient: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            preview_chars: NOTIFICATION_PREVIEW_CHARS,
            fallback_recipient: FALLBACK_RECIPIENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub max_records: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_records: MAX_POLICY_RECORDS,
        }
    }
}

impl EchoConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<(), EchoError> {
        if !self.lookup.default_tax_rate.is_finite() {
            return Err(EchoError::Config(
                "lookup.default_tax_rate must be finite".to_string(),
            ));
        }
        for (name, share) in [
            ("lookup.fossil_share", self.lookup.fossil_share),
            ("lookup.renewable_share", self.lookup.renewable_share),
        ] {
            if !(0.0..=1.0).contains(&share) {
                return Err(EchoError::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, share
                )));
            }
        }
        if self.notifier.preview_chars == 0 {
            return Err(EchoError::Config(
                "notifier.preview_chars must be positive".to_string(),
            ));
        }
        if self.store.max_records == 0 {
            return Err(EchoError::Config(
                "store.max_records must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
