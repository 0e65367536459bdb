//! Run and step state models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Overall status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Run has not started
    Pending,
    /// Run is currently executing steps
    Running,
    /// Every step passed
    Passed,
    /// At least one step failed
    Failed,
}

/// State of a single verification step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StepState {
    /// Step has not executed yet
    Pending,
    /// Step is currently executing
    Running { started_at: DateTime<Utc> },
    /// Step passed (tool exited zero)
    Passed {
        output: String,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    },
    /// Step failed (non-zero exit, spawn error, or timeout)
    Failed {
        reason: String,
        output: String,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    },
    /// Step was not executed (fail-fast after an earlier failure)
    Skipped { reason: String },
}

impl StepState {
    /// Check if the step is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StepState::Passed { .. } | StepState::Failed { .. } | StepState::Skipped { .. }
        )
    }

    /// Check if the step failed
    pub fn is_failure(&self) -> bool {
        matches!(self, StepState::Failed { .. })
    }
}

/// Overall state of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Unique run ID
    pub run_id: Uuid,

    /// Current status
    pub status: RunStatus,

    /// When the run started
    pub started_at: Option<DateTime<Utc>>,

    /// When the run finished
    pub completed_at: Option<DateTime<Utc>>,

    /// Total number of steps
    pub total_steps: usize,

    /// Number of steps that passed
    pub passed_steps: usize,

    /// Number of steps that failed
    pub failed_steps: usize,

    /// Number of steps that were skipped
    pub skipped_steps: usize,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            status: RunStatus::Pending,
            started_at: None,
            completed_at: None,
            total_steps: 0,
            passed_steps: 0,
            failed_steps: 0,
            skipped_steps: 0,
        }
    }

    /// Mark the run as started
    pub fn start(&mut self, total_steps: usize) {
        self.status = RunStatus::Running;
        self.started_at = Some(Utc::now());
        self.total_steps = total_steps;
    }

    /// Mark the run as finished with the given aggregate status
    pub fn finish(&mut self, status: RunStatus) {
        self.status = status;
        self.completed_at = Some(Utc::now());
    }

    /// Update step counts
    pub fn update_counts(&mut self, passed: usize, failed: usize, skipped: usize) {
        self.passed_steps = passed;
        self.failed_steps = failed;
        self.skipped_steps = skipped;
    }

    /// Fraction of steps that have reached a terminal state (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        if self.total_steps == 0 {
            return 0.0;
        }
        (self.passed_steps + self.failed_steps + self.skipped_steps) as f64
            / self.total_steps as f64
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
