//! Core types for Karabatch

use serde::{Deserialize, Serialize};

/// Fallback diagnostic when a failed run produced no output at all
pub const UNKNOWN_EXECUTION_ERROR: &str = "unknown execution error";

/// Attached to a scenario whose process was killed by a stop request
pub const EXECUTION_INTERRUPTED: &str = "execution interrupted by user";

/// Attached to a scenario that never started because a stop request was in effect
pub const EXECUTION_CANCELLED: &str = "execution cancelled by user";

/// One discovered test scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioEntry {
    /// Feature file path relative to the resource base, forward-slash normalized
    pub feature: String,

    /// Base name of the scenario directory
    pub scenario_name: String,

    /// Top-level directory under the resource base, or the default label
    pub category: String,

    /// CSV/JSON fixtures found under `data` directories, resource-base relative
    #[serde(default)]
    pub data_files: Vec<String>,

    /// CSV/JSON fixtures found under `description` directories, resource-base relative
    #[serde(default)]
    pub description_files: Vec<String>,
}

/// Scenarios grouped under one top-level category, in discovery order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: String,
    pub scenarios: Vec<ScenarioEntry>,
}

/// Outcome of one scenario in a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Position in the submitted batch
    pub original_index: usize,

    /// Echo of the submitted feature path
    pub feature: String,

    pub success: bool,

    /// file:// URI of the conventional HTML report, set whenever a process ran
    pub report: Option<String>,

    /// Captured stdout, set on success
    pub output: Option<String>,

    /// Diagnostic text, set on any non-success outcome
    pub error: Option<String>,

    pub duration_ms: u64,
}

impl ExecutionRecord {
    /// Synthesized record for a scenario skipped because a stop request was in effect
    pub fn cancelled(original_index: usize, feature: &str) -> Self {
        Self {
            original_index,
            feature: feature.to_string(),
            success: false,
            report: None,
            output: None,
            error: Some(EXECUTION_CANCELLED.to_string()),
            duration_ms: 0,
        }
    }

    /// True if this scenario never started due to a stop request
    pub fn was_cancelled(&self) -> bool {
        self.error.as_deref() == Some(EXECUTION_CANCELLED)
    }

    /// True if this scenario's process was killed by a stop request
    pub fn was_interrupted(&self) -> bool {
        self.error.as_deref() == Some(EXECUTION_INTERRUPTED)
    }
}

/// Aggregate result of one batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub started_at: i64,
    pub duration_ms: u64,
    pub records: Vec<ExecutionRecord>,
}

impl RunSummary {
    pub fn from_records(records: Vec<ExecutionRecord>, started_at: i64, duration_ms: u64) -> Self {
        let passed = records.iter().filter(|r| r.success).count();
        let cancelled = records.iter().filter(|r| r.was_cancelled()).count();
        let failed = records.len() - passed - cancelled;

        Self {
            total: records.len(),
            passed,
            failed,
            cancelled,
            started_at,
            duration_ms,
            records,
        }
    }
}
