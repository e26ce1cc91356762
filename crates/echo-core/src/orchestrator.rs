//! # Orchestrator
//!
//! Runs the four stages strictly in order:
//!
//! ```text
//! PolicyRequest ─▶ DataLookup ─▶ ClimateModel ─▶ Summarizer ─▶ Persistence + Notifier
//!                  MarketSnapshot SimulationResult SynthesisReport  PolicyRecord
//! ```
//!
//! The orchestrator owns one instance of each capability and the
//! [`PolicyStore`]. The first stage error ends the run; nothing is retried.

use crate::config::EchoConfig;
use crate::crud::{CrudOutcome, CrudRequest, Persistence, PolicyDbManager};
use crate::lookup::{DataLookup, MockMarketLookup};
use crate::model::{ClimateModel, SimplifiedClimateModel};
use crate::notify::{AlertNotifier, NotificationReceipt, Notifier};
use crate::primitives::AGENT_INPUT_PREVIEW_CHARS;
use crate::store::PolicyStore;
use crate::synthesis::{ReportSynthesizer, Summarizer, SynthesisInput};
use crate::system::{ROOT_AGENT_NAME, StageKind};
use crate::types::preview;
use crate::{EchoError, MarketSnapshot, PolicyId, PolicyRequest, PolicySummary, SimulationResult};
use serde::Serialize;

/// Everything one pipeline run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub policy_id: PolicyId,
    pub snapshot: MarketSnapshot,
    pub simulation: SimulationResult,
    pub summary: PolicySummary,
    /// Tagged CRUD line, e.g. `CRUD SUCCESS: Policy '...' created with ID: ...`
    pub persistence_message: String,
    pub notification: NotificationReceipt,
}

/// Sequential four-stage pipeline.
pub struct Orchestrator {
    lookup: Box<dyn DataLookup>,
    model: Box<dyn ClimateModel>,
    summarizer: Box<dyn Summarizer>,
    persistence: Box<dyn Persistence>,
    notifier: Box<dyn Notifier>,
    store: PolicyStore,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(&EchoConfig::default())
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Build the standard pipeline from configuration.
    #[must_use]
    pub fn new(config: &EchoConfig) -> Self {
        Self {
            lookup: Box::new(MockMarketLookup::new(config.lookup.clone())),
            model: Box::new(SimplifiedClimateModel),
            summarizer: Box::new(ReportSynthesizer),
            persistence: Box::new(PolicyDbManager),
            notifier: Box::new(AlertNotifier::new(config.notifier.clone())),
            store: PolicyStore::with_limit(config.store.max_records),
        }
    }

    /// Replace the data lookup capability.
    #[must_use]
    pub fn with_lookup(mut self, lookup: impl DataLookup + 'static) -> Self {
        self.lookup = Box::new(lookup);
        self
    }

    /// Replace the model capability.
    #[must_use]
    pub fn with_model(mut self, model: impl ClimateModel + 'static) -> Self {
        self.model = Box::new(model);
        self
    }

    /// Replace the summary capability.
    #[must_use]
    pub fn with_summarizer(mut self, summarizer: impl Summarizer + 'static) -> Self {
        self.summarizer = Box::new(summarizer);
        self
    }

    /// Replace the persistence capability.
    #[must_use]
    pub fn with_persistence(mut self, persistence: impl Persistence + 'static) -> Self {
        self.persistence = Box::new(persistence);
        self
    }

    /// Replace the notification capability.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Run all four stages for one request.
    pub fn run(&mut self, request: &PolicyRequest) -> Result<PipelineReport, EchoError> {
        tracing::info!(
            root = ROOT_AGENT_NAME,
            recipient = request.recipient(),
            "pipeline start"
        );

        // 1. Data retrieval
        enter(StageKind::DataRetrieval, request.policy_text());
        let snapshot = self.lookup.lookup(request.policy_text())?;

        // 2. Modeling
        enter(
            StageKind::Modeling,
            &format!("rate={}", snapshot.proposed_tax_rate),
        );
        let simulation = self.model.run(&snapshot);

        // 3. Synthesis
        enter(StageKind::Synthesis, &format!("{:?}", simulation));
        let report = self
            .summarizer
            .summarize(&SynthesisInput::new(request.policy_text(), simulation))?;

        // 4. Persistence, then notification
        enter(StageKind::Persistence, &report.summary.policy_text);
        let outcome = self
            .persistence
            .execute(&mut self.store, CrudRequest::create(report.summary.clone()))?;
        let notification = self
            .notifier
            .notify(request.recipient(), request.policy_text());

        tracing::info!(
            root = ROOT_AGENT_NAME,
            policy_id = %outcome.policy_id(),
            "pipeline end"
        );

        Ok(PipelineReport {
            policy_id: outcome.policy_id(),
            snapshot,
            simulation,
            summary: report.summary,
            persistence_message: outcome.to_string(),
            notification,
        })
    }

    /// Send a CRUD request to the persistence capability.
    pub fn execute(&mut self, request: CrudRequest) -> Result<CrudOutcome, EchoError> {
        self.persistence.execute(&mut self.store, request)
    }

    /// Read-only view of the store.
    #[must_use]
    pub fn store(&self) -> &PolicyStore {
        &self.store
    }
}

/// Log a stage handoff with a bounded preview of its input.
fn enter(stage: StageKind, input: &str) {
    tracing::info!(
        agent = stage.agent_name(),
        stage = stage.number(),
        "received input: {}...",
        preview(input, AGENT_INPUT_PREVIEW_CHARS)
    );
    if let Some(tool) = stage.tool_name() {
        tracing::debug!(agent = stage.agent_name(), tool, "deciding to use tool");
    }
}
