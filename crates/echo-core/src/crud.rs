//! # Persistence Stage
//!
//! Single CRUD entry point over a [`PolicyStore`].
//!
//! Requests carry an action tag, an optional id and optional report data.
//! Results are typed ([`CrudOutcome`] / [`EchoError`]); [`render`] turns
//! either into the tagged status line shown to operators:
//!
//! ```text
//! CRUD SUCCESS: Policy '<text>' created with ID: <id>.
//! CRUD READ: Record for <id>: ...
//! CRUD ERROR: Policy <id> not found for update.
//! ```

use crate::store::PolicyStore;
use crate::system::StageKind;
use crate::{CrudAction, EchoError, PolicyId, PolicyRecord, PolicySummary, SummaryPatch};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A request to the persistence entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrudRequest {
    pub action: CrudAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<PolicyId>,
    #[serde(default)]
    pub report_data: SummaryPatch,
}

impl CrudRequest {
    #[must_use]
    pub fn create(summary: PolicySummary) -> Self {
        Self {
            action: CrudAction::Create,
            policy_id: None,
            report_data: summary.into(),
        }
    }

    #[must_use]
    pub fn read(id: PolicyId) -> Self {
        Self::addressed(CrudAction::Read, id, SummaryPatch::default())
    }

    #[must_use]
    pub fn update(id: PolicyId, changes: SummaryPatch) -> Self {
        Self::addressed(CrudAction::Update, id, changes)
    }

    #[must_use]
    pub fn delete(id: PolicyId) -> Self {
        Self::addressed(CrudAction::Delete, id, SummaryPatch::default())
    }

    /// Build a request from a raw action tag. A missing tag means CREATE.
    pub fn from_tag(
        tag: Option<&str>,
        policy_id: Option<PolicyId>,
        report_data: SummaryPatch,
    ) -> Result<Self, EchoError> {
        Ok(Self {
            action: CrudAction::from_tag(tag)?,
            policy_id,
            report_data,
        })
    }

    fn addressed(action: CrudAction, id: PolicyId, report_data: SummaryPatch) -> Self {
        Self {
            action,
            policy_id: Some(id),
            report_data,
        }
    }
}

/// Successful result of a CRUD request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CrudOutcome {
    Created { id: PolicyId, policy_text: String },
    Read { record: PolicyRecord },
    Updated { id: PolicyId },
    Deleted { id: PolicyId },
}

impl CrudOutcome {
    /// The id the outcome refers to.
    #[must_use]
    pub fn policy_id(&self) -> PolicyId {
        match self {
            Self::Created { id, .. } | Self::Updated { id } | Self::Deleted { id } => *id,
            Self::Read { record } => record.id,
        }
    }
}

impl fmt::Display for CrudOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created { id, policy_text } => write!(
                f,
                "CRUD SUCCESS: Policy '{}' created with ID: {}.",
                policy_text, id
            ),
            Self::Read { record } => {
                let s = &record.summary;
                write!(
                    f,
                    "CRUD READ: Record for {}: {{summary: {{policy_text: '{}', co2_reduction: '{}', \
                     economic_impact: '{}', sector_shift: '{}', risk_rating: '{}'}}}}",
                    record.id,
                    s.policy_text,
                    s.co2_reduction,
                    s.economic_impact,
                    s.sector_shift,
                    s.risk_rating
                )
            }
            Self::Updated { id } => write!(f, "CRUD SUCCESS: Policy {} updated.", id),
            Self::Deleted { id } => write!(f, "CRUD SUCCESS: Policy {} deleted.", id),
        }
    }
}

/// Render a CRUD result as a tagged status line.
#[must_use]
pub fn render(result: &Result<CrudOutcome, EchoError>) -> String {
    match result {
        Ok(outcome) => outcome.to_string(),
        Err(err) => format!("CRUD ERROR: {}", err),
    }
}

/// Persistence capability (stage 4, first half).
pub trait Persistence {
    fn execute(
        &self,
        store: &mut PolicyStore,
        request: CrudRequest,
    ) -> Result<CrudOutcome, EchoError>;
}

/// Dispatches CRUD requests onto a [`PolicyStore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyDbManager;

impl Persistence for PolicyDbManager {
    fn execute(
        &self,
        store: &mut PolicyStore,
        request: CrudRequest,
    ) -> Result<CrudOutcome, EchoError> {
        let CrudRequest {
            action,
            policy_id,
            report_data,
        } = request;

        tracing::debug!(
            tool = StageKind::Persistence.tool_name(),
            action = action.as_str(),
            "policy database request"
        );

        let result = match (action, policy_id) {
            (CrudAction::Create, _) => {
                if report_data.is_empty() {
                    Err(EchoError::NoReportData)
                } else {
                    report_data.into_summary().and_then(|summary| {
                        let policy_text = summary.policy_text.clone();
                        store
                            .create(summary)
                            .map(|id| CrudOutcome::Created { id, policy_text })
                    })
                }
            }
            (action, None) => Err(EchoError::MissingPolicyId(action)),
            (CrudAction::Read, Some(id)) => {
                store
                    .read(&id)
                    .map(|record| CrudOutcome::Read { record })
                    .ok_or(EchoError::PolicyNotFound {
                        id,
                        action: CrudAction::Read,
                    })
            }
            (CrudAction::Update, Some(id)) => store
                .update(&id, &report_data)
                .map(|()| CrudOutcome::Updated { id }),
            (CrudAction::Delete, Some(id)) => {
                store.delete(&id).map(|_| CrudOutcome::Deleted { id })
            }
        };

        match &result {
            Ok(outcome) => tracing::info!(id = %outcome.policy_id(), "{}", outcome),
            Err(err) => tracing::warn!(code = err.code(), "CRUD ERROR: {}", err),
        }
        result
    }
}
