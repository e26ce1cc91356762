//! # Pipeline Primitives
//!
//! Hardcoded constants for the ECHO pipeline.
//!
//! These values are compiled into the binary. Most of the market and
//! notification values can be overridden through `EchoConfig`; the model
//! coefficients and thresholds cannot.

// =============================================================================
// RATE EXTRACTION
// =============================================================================

/// Marker that must appear in the policy text before a rate is searched for.
pub const CARBON_TAX_MARKER: &str = "carbon tax";

/// Delimiter preceding the numeric rate (`$120 per ton`).
pub const RATE_DELIMITER: char = '$';

/// Tax rate used when no rate can be extracted from the policy text.
pub const DEFAULT_TAX_RATE: f64 = 50.0;

// =============================================================================
// MOCK MARKET DATA
// =============================================================================

/// Real-time carbon price reported by the mocked search (USD per ton).
pub const REAL_TIME_CARBON_PRICE: f64 = 82.35;

/// Current fossil share of the energy mix.
pub const FOSSIL_SHARE: f64 = 0.62;

/// Current renewable share of the energy mix.
pub const RENEWABLE_SHARE: f64 = 0.38;

/// Economic forecast stability label.
pub const FORECAST_STABILITY: &str = "high";

// =============================================================================
// CLIMATE MODEL
// =============================================================================

/// CO2 reduction achieved at a zero tax rate (fraction).
pub const BASELINE_CO2_REDUCTION: f64 = 0.05;

/// Each unit of tax adds `1 / CO2_RATE_DIVISOR` to the CO2 reduction fraction.
pub const CO2_RATE_DIVISOR: f64 = 1000.0;

/// Exponent applied to the rate in the GDP cost term.
pub const GDP_EXPONENT: f64 = 1.1;

/// Coefficient of the GDP cost term.
pub const GDP_COEFFICIENT: f64 = 0.000_05;

/// Rates strictly above this produce a significant sector shift.
pub const SIGNIFICANT_SHIFT_THRESHOLD: f64 = 60.0;

/// Rates strictly above this (and not above the significant threshold)
/// produce a moderate sector shift.
pub const MODERATE_SHIFT_THRESHOLD: f64 = 30.0;

/// Decimal places kept for the CO2 reduction percentage.
pub const CO2_DECIMALS: usize = 2;

/// Decimal places kept for the GDP impact percentage.
pub const GDP_DECIMALS: usize = 3;

/// GDP impact percentages at or above this floor are rated `Low` risk.
pub const LOW_RISK_GDP_FLOOR: f64 = -0.01;

// =============================================================================
// NOTIFICATION & DIAGNOSTICS
// =============================================================================

/// Characters of policy text quoted in notification lines.
pub const NOTIFICATION_PREVIEW_CHARS: usize = 30;

/// Characters of stage input quoted in diagnostic log lines.
pub const AGENT_INPUT_PREVIEW_CHARS: usize = 75;

/// Recipient used when a notification is addressed to a blank recipient.
pub const FALLBACK_RECIPIENT: &str = "analyst@globalclimate.org";

// =============================================================================
// DEFAULT REQUEST
// =============================================================================

/// Policy proposal analysed when none is supplied.
pub const DEFAULT_POLICY_TEXT: &str = "Analyze the effect of a $120 per ton carbon tax on all non-renewable energy sectors for the next 5 years.";

/// Analyst notified when no recipient is supplied.
pub const DEFAULT_RECIPIENT: &str = "jane.doe@thinktank.com";

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length of a policy text in bytes.
///
/// Longer proposals are rejected by `PolicyRequest::new`.
pub const MAX_POLICY_TEXT_LENGTH: usize = 65536;

/// Default capacity of a `PolicyStore`.
///
/// CREATE beyond this many live records fails with `CapacityExceeded`.
pub const MAX_POLICY_RECORDS: usize = 10_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_thresholds_are_ordered() {
        assert!(MODERATE_SHIFT_THRESHOLD < SIGNIFICANT_SHIFT_THRESHOLD);
    }

    #[test]
    fn default_energy_mix_is_complete() {
        assert!((FOSSIL_SHARE + RENEWABLE_SHARE - 1.0).abs() < 1e-9);
    }

    #[test]
    fn default_policy_names_a_carbon_tax() {
        assert!(DEFAULT_POLICY_TEXT.contains(CARBON_TAX_MARKER));
        assert!(DEFAULT_POLICY_TEXT.contains(RATE_DELIMITER));
    }
}
