//! # Core Type Definitions
//!
//! This module contains the records exchanged between pipeline stages:
//! - Identifiers (`PolicyId`)
//! - Pipeline entry (`PolicyRequest`)
//! - Stage records (`MarketSnapshot`, `SimulationResult`, `PolicySummary`)
//! - Persisted entity (`PolicyRecord`) and partial updates (`SummaryPatch`)
//! - CRUD action tags (`CrudAction`)
//! - Error types (`EchoError`)

use crate::primitives::{
    LOW_RISK_GDP_FLOOR, MODERATE_SHIFT_THRESHOLD, MAX_POLICY_TEXT_LENGTH,
    SIGNIFICANT_SHIFT_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique identifier of a persisted policy record.
///
/// Generated by the store on CREATE and never reused while the store lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyId(Uuid);

impl PolicyId {
    /// Creates a new random policy ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a policy ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

}

impl Default for PolicyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PolicyId {
    type Err = EchoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| EchoError::InvalidRequest(format!("bad policy id '{}': {}", s, e)))
    }
}

// =============================================================================
// POLICY REQUEST
// =============================================================================

/// Pipeline entry: the proposal to analyse and who to notify.
///
/// Built once per run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyRequest {
    policy_text: String,
    recipient: String,
}

impl PolicyRequest {
    /// Create a validated request.
    ///
    /// Rejects an empty (or whitespace-only) policy text and any text longer
    /// than `MAX_POLICY_TEXT_LENGTH` bytes.
    pub fn new(
        policy_text: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Result<Self, EchoError> {
        let policy_text = policy_text.into();
        if policy_text.trim().is_empty() {
            return Err(EchoError::InvalidRequest(
                "policy text is empty".to_string(),
            ));
        }
        if policy_text.len() > MAX_POLICY_TEXT_LENGTH {
            return Err(EchoError::InvalidRequest(format!(
                "policy text is {} bytes, maximum is {}",
                policy_text.len(),
                MAX_POLICY_TEXT_LENGTH
            )));
        }
        Ok(Self {
            policy_text,
            recipient: recipient.into(),
        })
    }

    #[must_use]
    pub fn policy_text(&self) -> &str {
        &self.policy_text
    }

    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.recipient
    }
}

// =============================================================================
// MARKET SNAPSHOT (Data stage output)
// =============================================================================

/// Share of fossil and renewable sources in the current energy mix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyMix {
    pub fossil: f64,
    pub renewable: f64,
}

/// Output of the data stage: the extracted rate plus current indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub policy_text: String,
    pub proposed_tax_rate: f64,
    pub real_time_carbon_price: f64,
    pub current_energy_mix: EnergyMix,
    pub economic_forecast_stability: String,
}

// =============================================================================
// SIMULATION RESULT (Model stage output)
// =============================================================================

/// Categorical description of how the energy sector responds to the tax.
///
/// Serialized as its description text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectorShift {
    /// Rate at or below the moderate threshold.
    #[serde(rename = "Minimal shift, requires higher tax.")]
    Minimal,
    /// Rate above the moderate threshold, at or below the significant one.
    #[serde(rename = "Moderate shift to solar and battery storage investments.")]
    Moderate,
    /// Rate above the significant threshold.
    #[serde(
        rename = "Significant divestment from fossil fuels and strong investment in green hydrogen."
    )]
    Significant,
}

impl SectorShift {
    /// Classify a tax rate.
    ///
    /// `> 60` is significant, `> 30` is moderate, everything else
    /// (including NaN) is minimal.
    #[must_use]
    pub fn from_rate(rate: f64) -> Self {
        if rate > SIGNIFICANT_SHIFT_THRESHOLD {
            Self::Significant
        } else if rate > MODERATE_SHIFT_THRESHOLD {
            Self::Moderate
        } else {
            Self::Minimal
        }
    }

    /// Human-readable description used in summaries.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Minimal => "Minimal shift, requires higher tax.",
            Self::Moderate => "Moderate shift to solar and battery storage investments.",
            Self::Significant => {
                "Significant divestment from fossil fuels and strong investment in green hydrogen."
            }
        }
    }
}

impl fmt::Display for SectorShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Output of the model stage, percentages already rounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// CO2 reduction in percent, 2 decimal places.
    pub predicted_co2_reduction_percentage: f64,
    /// GDP change in percent (negative is a cost), 3 decimal places.
    pub economic_cost_gdp_impact: f64,
    pub energy_sector_shift: SectorShift,
}

// =============================================================================
// POLICY SUMMARY (Summary stage output)
// =============================================================================

/// Derived risk label of a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskRating {
    Low,
    Moderate,
}

impl RiskRating {
    /// Rate a GDP impact percentage. The floor itself counts as `Low`.
    #[must_use]
    pub fn from_gdp_impact(gdp_impact_percentage: f64) -> Self {
        if gdp_impact_percentage >= LOW_RISK_GDP_FLOOR {
            Self::Low
        } else {
            Self::Moderate
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
        }
    }
}

impl fmt::Display for RiskRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable summary of a policy analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySummary {
    pub policy_text: String,
    /// e.g. `"17.0%"`
    pub co2_reduction: String,
    /// e.g. `"-0.968% GDP change"`
    pub economic_impact: String,
    pub sector_shift: String,
    pub risk_rating: RiskRating,
}

/// Partial summary used by CREATE and UPDATE.
///
/// Absent fields are left untouched by [`SummaryPatch::apply_to`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co2_reduction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub economic_impact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector_shift: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_rating: Option<RiskRating>,
}

impl SummaryPatch {
    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policy_text.is_none()
            && self.co2_reduction.is_none()
            && self.economic_impact.is_none()
            && self.sector_shift.is_none()
            && self.risk_rating.is_none()
    }

    /// Overwrite the fields of `summary` that are set in this patch.
    pub fn apply_to(&self, summary: &mut PolicySummary) {
        if let Some(text) = &self.policy_text {
            summary.policy_text.clone_from(text);
        }
        if let Some(co2) = &self.co2_reduction {
            summary.co2_reduction.clone_from(co2);
        }
        if let Some(impact) = &self.economic_impact {
            summary.economic_impact.clone_from(impact);
        }
        if let Some(shift) = &self.sector_shift {
            summary.sector_shift.clone_from(shift);
        }
        if let Some(rating) = self.risk_rating {
            summary.risk_rating = rating;
        }
    }

    /// Convert into a complete summary.
    ///
    /// Fails with `MissingField` naming the first absent field.
    pub fn into_summary(self) -> Result<PolicySummary, EchoError> {
        Ok(PolicySummary {
            policy_text: self.policy_text.ok_or(EchoError::MissingField("policy_text"))?,
            co2_reduction: self
                .co2_reduction
                .ok_or(EchoError::MissingField("co2_reduction"))?,
            economic_impact: self
                .economic_impact
                .ok_or(EchoError::MissingField("economic_impact"))?,
            sector_shift: self
                .sector_shift
                .ok_or(EchoError::MissingField("sector_shift"))?,
            risk_rating: self
                .risk_rating
                .ok_or(EchoError::MissingField("risk_rating"))?,
        })
    }
}

impl From<PolicySummary> for SummaryPatch {
    fn from(summary: PolicySummary) -> Self {
        Self {
            policy_text: Some(summary.policy_text),
            co2_reduction: Some(summary.co2_reduction),
            economic_impact: Some(summary.economic_impact),
            sector_shift: Some(summary.sector_shift),
            risk_rating: Some(summary.risk_rating),
        }
    }
}

// =============================================================================
// POLICY RECORD (Persisted entity)
// =============================================================================

/// A stored summary together with its generated identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRecord {
    pub id: PolicyId,
    pub summary: PolicySummary,
}

// =============================================================================
// CRUD ACTIONS
// =============================================================================

/// Action tag accepted by the persistence entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CrudAction {
    Create,
    Read,
    Update,
    Delete,
}

impl CrudAction {
    /// Parse an optional action tag. A missing tag means CREATE.
    pub fn from_tag(tag: Option<&str>) -> Result<Self, EchoError> {
        tag.map_or(Ok(Self::Create), str::parse)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Read => "READ",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }

    /// Noun used in not-found messages.
    #[must_use]
    pub fn purpose(&self) -> &'static str {
        match self {
            Self::Create => "creation",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "deletion",
        }
    }

    /// Whether the action addresses an existing record.
    #[must_use]
    pub fn requires_id(&self) -> bool {
        !matches!(self, Self::Create)
    }
}

impl fmt::Display for CrudAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrudAction {
    type Err = EchoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(Self::Create),
            "READ" => Ok(Self::Read),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            other => Err(EchoError::InvalidAction(other.to_string())),
        }
    }
}

// =============================================================================
// TEXT HELPERS
// =============================================================================

/// Borrow at most `max_chars` characters from the start of `text`.
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the ECHO pipeline.
///
/// - Stages return `Result<T, EchoError>`; the orchestrator stops at the
///   first failure
/// - `code()` gives a stable reason code for machine consumers
/// - The CORE never panics
#[derive(Debug, Error)]
pub enum EchoError {
    /// CREATE was called without any report data.
    #[error("No data provided for creation.")]
    NoReportData,

    /// The addressed record does not exist.
    #[error("Policy {id} not found for {purpose}.", purpose = .action.purpose())]
    PolicyNotFound { id: PolicyId, action: CrudAction },

    /// READ/UPDATE/DELETE was called without an id.
    #[error("Invalid action or missing ID for action: {0}")]
    MissingPolicyId(CrudAction),

    /// The action tag is not one of CREATE/READ/UPDATE/DELETE.
    #[error("Invalid action or missing ID for action: {0}")]
    InvalidAction(String),

    /// A stage input lacks a required field.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The pipeline request is malformed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The store holds its maximum number of records.
    #[error("Policy store is full ({0} records)")]
    CapacityExceeded(usize),

    /// Configuration could not be loaded or is out of range.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

impl EchoError {
    /// Stable reason code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoReportData => "no_data",
            Self::PolicyNotFound { .. } => "not_found",
            Self::MissingPolicyId(_) => "missing_id",
            Self::InvalidAction(_) => "invalid_action",
            Self::MissingField(_) => "missing_field",
            Self::InvalidRequest(_) => "invalid_request",
            Self::CapacityExceeded(_) => "capacity_exceeded",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
