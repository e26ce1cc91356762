//! # Property-Based Tests
//!
//! Invariants of the model, the extractor and the store, checked with proptest.

use echo_core::{
    PolicyStore, PolicySummary, RiskRating, SectorShift, SimplifiedClimateModel,
    extract_tax_rate,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn summary(text: &str) -> PolicySummary {
    PolicySummary {
        policy_text: text.to_string(),
        co2_reduction: "5.0%".to_string(),
        economic_impact: "-0.0% GDP change".to_string(),
        sector_shift: SectorShift::Minimal.description().to_string(),
        risk_rating: RiskRating::Low,
    }
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Higher rates never reduce CO2 less.
    #[test]
    fn co2_reduction_monotone(a in 0.0f64..1000.0, b in 0.0f64..1000.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low_result = SimplifiedClimateModel::simulate(low);
        let high_result = SimplifiedClimateModel::simulate(high);

        prop_assert!(
            low_result.predicted_co2_reduction_percentage
                <= high_result.predicted_co2_reduction_percentage
        );
        prop_assert!(
            low_result.economic_cost_gdp_impact >= high_result.economic_cost_gdp_impact
        );
    }

    /// Non-negative rates never grow GDP.
    #[test]
    fn gdp_impact_non_positive(rate in 0.0f64..10_000.0) {
        let result = SimplifiedClimateModel::simulate(rate);
        prop_assert!(result.economic_cost_gdp_impact <= 0.0);
        prop_assert!(result.predicted_co2_reduction_percentage >= 5.0);
    }

    /// Rates of any realistic size give finite outputs.
    #[test]
    fn model_total_over_realistic_rates(rate in -1.0e6f64..1.0e6) {
        let result = SimplifiedClimateModel::simulate(rate);
        prop_assert!(result.predicted_co2_reduction_percentage.is_finite());
        prop_assert!(result.economic_cost_gdp_impact.is_finite());
    }

    /// Sector shift partitions the rate line at 30 and 60.
    #[test]
    fn sector_shift_partition(rate in -100.0f64..200.0) {
        let expected = if rate > 60.0 {
            SectorShift::Significant
        } else if rate > 30.0 {
            SectorShift::Moderate
        } else {
            SectorShift::Minimal
        };
        prop_assert_eq!(SimplifiedClimateModel::simulate(rate).energy_sector_shift, expected);
    }

    /// An embedded integer rate is recovered exactly.
    #[test]
    fn extractor_recovers_rate(rate in 0u32..100_000, prefix in "[a-z ]{0,20}") {
        let text = format!("{}carbon tax of ${} per ton", prefix, rate);
        prop_assert_eq!(extract_tax_rate(&text, 50.0), f64::from(rate));
    }

    /// Whatever number the text states, the extracted rate is modelable.
    #[test]
    fn extracted_rate_always_modelable(stated in any::<f64>()) {
        let text = format!("carbon tax of ${:e} per ton", stated);
        let rate = extract_tax_rate(&text, 50.0);
        let result = SimplifiedClimateModel::simulate(rate);

        prop_assert!(result.predicted_co2_reduction_percentage.is_finite());
        prop_assert!(result.economic_cost_gdp_impact.is_finite());
    }

        /// Text without the marker always yields the default.
    #[test]
    fn extractor_defaults_without_marker(text in "[A-Za-z0-9 $.]{0,60}", default in 0.0f64..500.0) {
        prop_assume!(!text.contains("carbon tax"));
        prop_assert_eq!(extract_tax_rate(&text, default), default);
    }

    /// Every CREATE yields a fresh id.
    #[test]
    fn store_ids_unique(count in 1usize..200) {
        let mut store = PolicyStore::new();
        let mut ids = BTreeSet::new();
        for n in 0..count {
            let id = store.create(summary(&n.to_string())).expect("create");
            prop_assert!(ids.insert(id));
        }
        prop_assert_eq!(store.len(), count);
    }
}
