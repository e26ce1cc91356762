//! # Stage Descriptors
//!
//! The four pipeline stages and the agent that owns each one.
//!
//! | # | Stage | Agent | Capability |
//! |---|-------|-------|------------|
//! | 1 | Data Retrieval | `Data_Retrieval_Agent` | `GoogleSearchTool_Mock` |
//! | 2 | Modeling | `Modeling_Agent` | `run_simplified_climate_model` |
//! | 3 | Synthesis | `Synthesis_Agent` | (none) |
//! | 4 | Persistence | `Persistence_Agent` | `PolicyDBTool`, `NotificationTool` |
//!
//! Descriptors are informational: they label log lines and reports. The
//! orchestrator calls stages through their capability traits, never by name.

use serde::{Deserialize, Serialize};

// =============================================================================
// ROOT AGENT
// =============================================================================

/// Name of the orchestrating agent.
pub const ROOT_AGENT_NAME: &str = "ECHO_Root_Agent";

/// Instruction of the orchestrating agent.
pub const ROOT_AGENT_INSTRUCTION: &str = "Analyze a climate policy by gathering data, modeling impacts, generating a report summary, and persisting the result with a notification.";

/// Model label shared by every agent except synthesis.
pub const DEFAULT_AGENT_MODEL: &str = "gemini-2.5-flash";

// =============================================================================
// STAGE ENUM
// =============================================================================

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Stage 1: mock market data lookup
    DataRetrieval,
    /// Stage 2: closed-form climate model
    Modeling,
    /// Stage 3: summary formatting
    Synthesis,
    /// Stage 4: CRUD create plus notification
    Persistence,
}

impl StageKind {
    /// All stages in execution order.
    pub const ALL: [StageKind; 4] = [
        StageKind::DataRetrieval,
        StageKind::Modeling,
        StageKind::Synthesis,
        StageKind::Persistence,
    ];

    /// Get the stage name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            StageKind::DataRetrieval => "Data Retrieval",
            StageKind::Modeling => "Modeling",
            StageKind::Synthesis => "Synthesis",
            StageKind::Persistence => "Persistence",
        }
    }

    /// 1-based position in the pipeline.
    #[must_use]
    pub fn number(&self) -> usize {
        match self {
            StageKind::DataRetrieval => 1,
            StageKind::Modeling => 2,
            StageKind::Synthesis => 3,
            StageKind::Persistence => 4,
        }
    }

    #[must_use]
    pub fn agent_name(&self) -> &'static str {
        match self {
            StageKind::DataRetrieval => "Data_Retrieval_Agent",
            StageKind::Modeling => "Modeling_Agent",
            StageKind::Synthesis => "Synthesis_Agent",
            StageKind::Persistence => "Persistence_Agent",
        }
    }

    /// Primary capability used by the stage, if any.
    #[must_use]
    pub fn tool_name(&self) -> Option<&'static str> {
        match self {
            StageKind::DataRetrieval => Some("GoogleSearchTool_Mock"),
            StageKind::Modeling => Some("run_simplified_climate_model"),
            StageKind::Synthesis => None,
            StageKind::Persistence => Some("PolicyDBTool"),
        }
    }

    /// Follow-up capability (only persistence has one).
    #[must_use]
    pub fn secondary_tool_name(&self) -> Option<&'static str> {
        match self {
            StageKind::Persistence => Some("NotificationTool"),
            _ => None,
        }
    }

    #[must_use]
    pub fn instruction(&self) -> &'static str {
        match self {
            StageKind::DataRetrieval => {
                "Use Google Search Tool to find current market data required for modeling. Format output as JSON."
            }
            StageKind::Modeling => {
                "Execute the 'run_simplified_climate_model' tool using inputs from the Data Retrieval Agent. Pass raw simulation results."
            }
            StageKind::Synthesis => {
                "Analyze the raw simulation output and policy proposal to create a structured JSON summary ready for persistence."
            }
            StageKind::Persistence => {
                "Receive the final structured report. First, use PolicyDBTool to CREATE a new record. Second, use NotificationTool to send an alert to the recipient."
            }
        }
    }

    /// Model label of the stage's agent.
    #[must_use]
    pub fn model(&self) -> &'static str {
        match self {
            StageKind::Synthesis => "gemini-2.5-pro-preview-09-2025",
            _ => DEFAULT_AGENT_MODEL,
        }
    }

    /// Get the next stage, if any.
    #[must_use]
    pub fn next(&self) -> Option<StageKind> {
        match self {
            StageKind::DataRetrieval => Some(StageKind::Modeling),
            StageKind::Modeling => Some(StageKind::Synthesis),
            StageKind::Synthesis => Some(StageKind::Persistence),
            StageKind::Persistence => None,
        }
    }

    /// Get the previous stage, if any.
    #[must_use]
    pub fn previous(&self) -> Option<StageKind> {
        match self {
            StageKind::DataRetrieval => None,
            StageKind::Modeling => Some(StageKind::DataRetrieval),
            StageKind::Synthesis => Some(StageKind::Modeling),
            StageKind::Persistence => Some(StageKind::Synthesis),
        }
    }

    /// Check if this stage is the last one.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, StageKind::Persistence)
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stage {}: {} ({})", self.number(), self.name(), self.agent_name())
    }
}

// =============================================================================
// TESTS
// =============================================================================
