//! # echo-core
//!
//! The policy analysis pipeline for ECHO - THE LOGIC.
//!
//! A policy proposal flows through four stages, each consuming the record
//! produced by the previous one:
//!
//! 1. **Data retrieval** (`lookup`) - extract the tax rate, attach mock
//!    market indicators
//! 2. **Modeling** (`model`) - closed-form CO2 and GDP response
//! 3. **Synthesis** (`synthesis`) - human-readable summary and risk label
//! 4. **Persistence** (`crud`, `notify`) - store the summary, format alerts
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Is synchronous and single-threaded; no async, no network, no files
//! - Keeps state only in an explicit `PolicyStore` owned by the orchestrator
//! - Reports failures as `EchoError`, never as tagged strings or panics
//! - Reaches each stage through a capability trait, never by name

// =============================================================================
// MODULES
// =============================================================================

pub mod config;
pub mod crud;
pub mod lookup;
pub mod model;
pub mod notify;
pub mod orchestrator;
pub mod primitives;
pub mod store;
pub mod synthesis;
pub mod system;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    CrudAction, EchoError, EnergyMix, MarketSnapshot, PolicyId, PolicyRecord, PolicyRequest,
    PolicySummary, RiskRating, SectorShift, SimulationResult, SummaryPatch,
};

// =============================================================================
// RE-EXPORTS: Pipeline
// =============================================================================

pub use config::EchoConfig;
pub use crud::{CrudOutcome, CrudRequest, Persistence, PolicyDbManager};
pub use lookup::{DataLookup, MockMarketLookup, extract_tax_rate, find_tax_rate};
pub use model::{ClimateModel, SimplifiedClimateModel};
pub use notify::{AlertNotifier, NotificationReceipt, Notifier};
pub use orchestrator::{Orchestrator, PipelineReport};
pub use store::PolicyStore;
pub use synthesis::{
    ReportStatus, ReportSynthesizer, Summarizer, SynthesisInput, SynthesisReport, format_percentage,
};

// =============================================================================
// RE-EXPORTS: System (from system module)
// =============================================================================

pub use system::{ROOT_AGENT_INSTRUCTION, ROOT_AGENT_NAME, StageKind};
