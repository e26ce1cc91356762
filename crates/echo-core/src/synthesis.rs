//! # Synthesis Stage
//!
//! Reshapes model output into a [`PolicySummary`] ready for persistence.

use crate::system::StageKind;
use crate::{EchoError, PolicySummary, RiskRating, SimulationResult};
use serde::{Deserialize, Serialize};

/// Policy text used when the synthesis input carries none.
pub const UNKNOWN_POLICY_TEXT: &str = "N/A";

/// Input of the synthesis stage.
///
/// Both fields are optional on the wire; only the simulation results are
/// required by [`Summarizer::summarize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisInput {
    pub policy_text: Option<String>,
    pub simulation_results: Option<SimulationResult>,
}

impl SynthesisInput {
    #[must_use]
    pub fn new(policy_text: impl Into<String>, results: SimulationResult) -> Self {
        Self {
            policy_text: Some(policy_text.into()),
            simulation_results: Some(results),
        }
    }
}

/// Status of a synthesised report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    ReadyToSave,
}

/// Output of the synthesis stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisReport {
    pub status: ReportStatus,
    pub summary: PolicySummary,
}

/// Summary capability (stage 3).
pub trait Summarizer {
    fn summarize(&self, input: &SynthesisInput) -> Result<SynthesisReport, EchoError>;
}

/// Render a percentage the way reports show it: `17.0`, `-0.968`.
///
/// Integral values keep one decimal so every figure reads as a float.
/// Magnitudes from `1e16` up (or below `1e-4`) switch to exponent form with
/// a signed, two-digit exponent: `1e+301`, `-2.5e+17`.
#[must_use]
pub fn format_percentage(value: f64) -> String {
    let magnitude = value.abs();
    if value.is_finite() && magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let scientific = format!("{:e}", value);
        return match scientific.find('e') {
            Some(pos) => match scientific[pos + 1..].parse::<i32>() {
                Ok(exponent) => format!(
                    "{}e{}{:02}",
                    &scientific[..pos],
                    if exponent < 0 { '-' } else { '+' },
                    exponent.unsigned_abs()
                ),
                Err(_) => scientific.clone(),
            },
            None => scientific,
        };
    }

    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Deterministic report formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportSynthesizer;

impl Summarizer for ReportSynthesizer {
    fn summarize(&self, input: &SynthesisInput) -> Result<SynthesisReport, EchoError> {
        tracing::debug!(
            agent = StageKind::Synthesis.agent_name(),
            "synthesizing policy report"
        );
        let results = input
            .simulation_results
            .as_ref()
            .ok_or(EchoError::MissingField("simulation_results"))?;

        let gdp = results.economic_cost_gdp_impact;
        let summary = PolicySummary {
            policy_text: input
                .policy_text
                .clone()
                .unwrap_or_else(|| UNKNOWN_POLICY_TEXT.to_string()),
            co2_reduction: format!(
                "{}%",
                format_percentage(results.predicted_co2_reduction_percentage)
            ),
            economic_impact: format!("{}% GDP change", format_percentage(gdp)),
            sector_shift: results.energy_sector_shift.description().to_string(),
            risk_rating: RiskRating::from_gdp_impact(gdp),
        };

        Ok(SynthesisReport {
            status: ReportStatus::ReadyToSave,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SectorShift;

    fn results(co2: f64, gdp: f64, shift: SectorShift) -> SimulationResult {
        SimulationResult {
            predicted_co2_reduction_percentage: co2,
            economic_cost_gdp_impact: gdp,
            energy_sector_shift: shift,
        }
    }

    #[test]
    fn formats_summary_strings() {
        let input = SynthesisInput::new(
            "carbon tax $120",
            results(17.0, -0.968, SectorShift::Significant),
        );
        let report = ReportSynthesizer.summarize(&input).expect("summarize");

        assert_eq!(report.status, ReportStatus::ReadyToSave);
        assert_eq!(report.summary.policy_text, "carbon tax $120");
        assert_eq!(report.summary.co2_reduction, "17.0%");
        assert_eq!(report.summary.economic_impact, "-0.968% GDP change");
        assert_eq!(
            report.summary.sector_shift,
            SectorShift::Significant.description()
        );
        assert_eq!(report.summary.risk_rating, RiskRating::Moderate);
    }

    #[test]
    fn small_cost_is_low_risk() {
        let input = SynthesisInput::new("x", results(5.1, -0.005, SectorShift::Minimal));
        let report = ReportSynthesizer.summarize(&input).expect("summarize");
        assert_eq!(report.summary.risk_rating, RiskRating::Low);
    }

    #[test]
    fn risk_floor_is_inclusive() {
        let at_floor = SynthesisInput::new("x", results(5.0, -0.01, SectorShift::Minimal));
        let below = SynthesisInput::new("x", results(5.0, -0.02, SectorShift::Minimal));

        let at_floor = ReportSynthesizer.summarize(&at_floor).expect("summarize");
        let below = ReportSynthesizer.summarize(&below).expect("summarize");

        assert_eq!(at_floor.summary.risk_rating, RiskRating::Low);
        assert_eq!(below.summary.risk_rating, RiskRating::Moderate);
    }

    #[test]
    fn missing_results_is_an_error() {
        let input = SynthesisInput {
            policy_text: Some("x".to_string()),
            simulation_results: None,
        };
        let err = ReportSynthesizer.summarize(&input).expect_err("missing");
        assert!(matches!(err, EchoError::MissingField("simulation_results")));
    }

    #[test]
    fn missing_policy_text_defaults() {
        let input = SynthesisInput {
            policy_text: None,
            simulation_results: Some(results(10.0, -0.37, SectorShift::Moderate)),
        };
        let report = ReportSynthesizer.summarize(&input).expect("summarize");
        assert_eq!(report.summary.policy_text, UNKNOWN_POLICY_TEXT);
    }

    #[test]
    fn input_deserializes_without_results() {
        let input: SynthesisInput =
            serde_json::from_str(r#"{"policy_text":"x"}"#).expect("parse");
        assert!(ReportSynthesizer.summarize(&input).is_err());
    }

    #[test]
    fn percentage_rendering() {
        assert_eq!(format_percentage(17.0), "17.0");
        assert_eq!(format_percentage(-0.968), "-0.968");
        assert_eq!(format_percentage(12.5), "12.5");
    }

    #[test]
    fn huge_percentages_use_exponent_form() {
        assert_eq!(format_percentage(1e301), "1e+301");
        assert_eq!(format_percentage(-2.5e17), "-2.5e+17");
        assert_eq!(format_percentage(1e16), "1e+16");
        assert_eq!(format_percentage(9_999_999_999_999_998.0), "9999999999999998.0");
        assert_eq!(format_percentage(5e-5), "5e-05");
        assert_eq!(format_percentage(0.0), "0.0");
    }
}
