//! Step domain model

use crate::core::{config::StepConfig, state::StepState};
use anyhow::{bail, Result};

/// A single verification gate in a run
#[derive(Debug, Clone)]
pub struct Step {
    /// Step name as reported in output
    pub name: String,

    /// Shell command line executed by this step
    pub command: String,

    /// Directory the command runs in, relative to the checkout root
    pub working_dir: String,

    /// Timeout in seconds (hosting default applies when unset)
    pub timeout_secs: Option<u64>,

    /// Runtime state (not part of the workflow definition)
    pub state: StepState,
}

/// Defaults inherited from the workflow definition
#[derive(Debug, Clone, Default)]
pub struct StepDefaults {
    pub working_dir: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Step {
    /// Create a step from a step config, resolving inherited defaults
    pub fn from_config(config: &StepConfig, defaults: &StepDefaults) -> Result<Self> {
        let working_dir = config
            .working_directory
            .clone()
            .or_else(|| defaults.working_dir.clone());

        let Some(working_dir) = working_dir else {
            bail!(
                "Step '{}' has no working directory and the workflow declares no default",
                config.name
            );
        };

        Ok(Step {
            name: config.name.clone(),
            command: config.run.clone(),
            working_dir,
            timeout_secs: config.timeout_secs.or(defaults.timeout_secs),
            state: StepState::Pending,
        })
    }
}
