//! Serializable run reports for machine-readable output

use crate::core::{EventKind, Run, RunStatus, StepState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-step status in a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Passed,
    Failed,
    Skipped,
}

/// One step's recorded result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    /// Step name
    pub name: String,

    /// Command the step executed
    pub command: String,

    /// Directory the step ran in
    pub working_dir: String,

    /// Recorded status
    pub status: StepStatus,

    /// Failure or skip reason, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// When the step started
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    /// When the step finished
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Full report of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Run ID
    pub run_id: Uuid,

    /// Workflow name
    pub workflow: String,

    /// Event kind that scheduled the run
    pub event: EventKind,

    /// Branch the event targeted
    pub branch: String,

    /// Aggregate status
    pub status: RunStatus,

    /// When the run started
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    /// When the run finished
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Per-step results, in declaration order
    pub steps: Vec<StepReport>,
}

/// Create a report from a run
pub fn create_report(run: &Run) -> RunReport {
    let steps = run
        .steps
        .iter()
        .map(|step| {
            let (status, reason, started_at, completed_at) = match &step.state {
                StepState::Pending | StepState::Running { .. } => {
                    (StepStatus::Pending, None, None, None)
                }
                StepState::Passed {
                    started_at,
                    completed_at,
                    ..
                } => (StepStatus::Passed, None, Some(*started_at), Some(*completed_at)),
                StepState::Failed {
                    reason,
                    started_at,
                    completed_at,
                    ..
                } => (
                    StepStatus::Failed,
                    Some(reason.clone()),
                    Some(*started_at),
                    Some(*completed_at),
                ),
                StepState::Skipped { reason } => {
                    (StepStatus::Skipped, Some(reason.clone()), None, None)
                }
            };

            StepReport {
                name: step.name.clone(),
                command: step.command.clone(),
                working_dir: step.working_dir.clone(),
                status,
                reason,
                started_at,
                completed_at,
            }
        })
        .collect();

    RunReport {
        run_id: run.state.run_id,
        workflow: run.workflow_name.clone(),
        event: run.trigger.event,
        branch: run.trigger.branch.clone(),
        status: run.state.status,
        started_at: run.state.started_at,
        completed_at: run.state.completed_at,
        steps,
    }
}
