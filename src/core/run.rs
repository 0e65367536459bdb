//! Workflow and run domain models

use crate::core::{
    config::WorkflowConfig,
    state::{RunState, RunStatus, StepState},
    step::{Step, StepDefaults},
    trigger::{Trigger, TriggerFilters},
};
use anyhow::Result;

/// Pinned toolchain for a workflow
#[derive(Debug, Clone)]
pub struct Toolchain {
    /// Release channel (e.g. "stable")
    pub channel: String,

    /// Installation profile (e.g. "minimal")
    pub profile: Option<String>,

    /// Whether the pin overrides any locally configured toolchain
    pub force: bool,
}

/// A verification workflow: triggers, toolchain pin, and ordered steps
#[derive(Debug, Clone)]
pub struct Workflow {
    /// Workflow name
    pub name: String,

    /// Which triggers schedule a run
    pub filters: TriggerFilters,

    /// Pinned toolchain, if any
    pub toolchain: Option<Toolchain>,

    /// Step templates, in declaration order
    pub steps: Vec<Step>,
}

impl Workflow {
    /// Build a workflow from its configuration
    pub fn from_config(config: &WorkflowConfig) -> Result<Self> {
        let filters = config.trigger_filters()?;

        let defaults = StepDefaults {
            working_dir: config.defaults.as_ref().map(|d| d.working_directory.clone()),
            timeout_secs: None,
        };

        let steps = config
            .steps
            .iter()
            .map(|step_config| Step::from_config(step_config, &defaults))
            .collect::<Result<Vec<_>>>()?;

        let toolchain = config.toolchain.as_ref().map(|t| Toolchain {
            channel: t.channel.clone(),
            profile: t.profile.clone(),
            force: t.force,
        });

        Ok(Workflow {
            name: config.name.clone(),
            filters,
            toolchain,
            steps,
        })
    }

    /// Check whether a trigger should schedule a run of this workflow
    pub fn accepts(&self, trigger: &Trigger) -> bool {
        self.filters.accepts(trigger)
    }
}

/// One execution of a workflow for a given trigger
///
/// Created when a trigger matches the workflow's filters, discarded after
/// its outcome is reported. No state survives across runs.
#[derive(Debug, Clone)]
pub struct Run {
    /// Name of the workflow this run executes
    pub workflow_name: String,

    /// The trigger that scheduled this run
    pub trigger: Trigger,

    /// Toolchain pin inherited from the workflow
    pub toolchain: Option<Toolchain>,

    /// Steps in declaration order
    pub steps: Vec<Step>,

    /// Execution state
    pub state: RunState,
}

impl Run {
    /// Create a run for a trigger, or `None` when the trigger does not
    /// match the workflow's filters
    pub fn from_workflow(workflow: &Workflow, trigger: Trigger) -> Option<Self> {
        if !workflow.accepts(&trigger) {
            return None;
        }

        Some(Run {
            workflow_name: workflow.name.clone(),
            trigger,
            toolchain: workflow.toolchain.clone(),
            steps: workflow.steps.clone(),
            state: RunState::new(),
        })
    }

    /// Get a step by name
    pub fn step(&self, name: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// Check if every step has reached a terminal state
    pub fn is_complete(&self) -> bool {
        self.steps.iter().all(|s| s.state.is_terminal())
    }

    /// Check if any step has failed
    pub fn has_failures(&self) -> bool {
        self.steps.iter().any(|s| s.state.is_failure())
    }

    /// Steps that failed, in declaration order
    pub fn failed_steps(&self) -> Vec<&Step> {
        self.steps.iter().filter(|s| s.state.is_failure()).collect()
    }

    /// Aggregate outcome: success iff every step passed
    pub fn outcome(&self) -> RunStatus {
        if !self.is_complete() {
            return self.state.status;
        }
        if self.has_failures() {
            RunStatus::Failed
        } else {
            RunStatus::Passed
        }
    }
}
