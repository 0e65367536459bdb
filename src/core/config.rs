//! Workflow configuration from YAML

use crate::core::{
    trigger::{BranchFilter, TriggerFilters},
    Workflow,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The built-in verification workflow for the keeper subproject:
/// four gates, fixed working directory, pinned stable toolchain.
const KEEPER_WORKFLOW: &str = r#"
name: keeper CI

on:
  push:
    branches: [main]
  pull_request:
    branches: [main]

toolchain:
  channel: stable
  profile: minimal
  override: true

defaults:
  working-directory: keeper

steps:
  - name: Format code
    run: cargo fmt --all -- --check
  - name: Check code
    run: cargo check
  - name: Clippy
    run: cargo clippy -- -D warnings
  - name: Build
    run: cargo build
"#;

/// Top-level workflow configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Workflow name
    pub name: String,

    /// Trigger filters, keyed by event kind
    #[serde(rename = "on", default)]
    pub triggers: TriggerConfig,

    /// Toolchain pin (optional)
    #[serde(default)]
    pub toolchain: Option<ToolchainConfig>,

    /// Defaults inherited by every step
    #[serde(default)]
    pub defaults: Option<DefaultsConfig>,

    /// Ordered verification steps
    pub steps: Vec<StepConfig>,
}

/// Trigger section of the workflow file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Push trigger with its branch filters
    #[serde(default)]
    pub push: Option<BranchesConfig>,

    /// Pull request trigger with its branch filters
    #[serde(default)]
    pub pull_request: Option<BranchesConfig>,
}

/// Branch filters for one event kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchesConfig {
    #[serde(default)]
    pub branches: Vec<String>,
}

/// Toolchain pin section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Release channel (e.g. "stable")
    pub channel: String,

    /// Installation profile (e.g. "minimal")
    #[serde(default)]
    pub profile: Option<String>,

    /// Whether the pin overrides any locally configured toolchain
    #[serde(rename = "override", default = "default_override")]
    pub force: bool,
}

fn default_override() -> bool {
    true
}

/// Workflow-level step defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory every step runs in unless it declares its own
    #[serde(rename = "working-directory")]
    pub working_directory: String,
}

/// Step configuration as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepConfig {
    /// Step name as reported in output
    pub name: String,

    /// Shell command line to execute
    pub run: String,

    /// Working directory override for this step
    #[serde(rename = "working-directory", default)]
    pub working_directory: Option<String>,

    /// Timeout override for this step, in seconds
    #[serde(rename = "timeout-secs", default)]
    pub timeout_secs: Option<u64>,
}

impl WorkflowConfig {
    /// Load a workflow configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a workflow configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: WorkflowConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// The built-in keeper verification workflow
    pub fn keeper_default() -> Result<Self> {
        Self::from_yaml(KEEPER_WORKFLOW)
    }

    /// Validate the workflow configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("Workflow name must not be empty");
        }

        // At least one event kind must declare a branch filter, otherwise
        // nothing can ever schedule a run.
        if self.trigger_filters()?.is_empty() {
            anyhow::bail!("Workflow declares no trigger branches");
        }

        if self.steps.is_empty() {
            anyhow::bail!("Workflow declares no steps");
        }

        let mut seen_names = std::collections::HashSet::new();
        for step in &self.steps {
            if step.name.trim().is_empty() {
                anyhow::bail!("Step names must not be empty");
            }
            if !seen_names.insert(&step.name) {
                anyhow::bail!("Duplicate step name: {}", step.name);
            }
            if step.run.trim().is_empty() {
                anyhow::bail!("Step '{}' has an empty command", step.name);
            }

            // Every step must resolve to exactly one working directory.
            let resolved = step
                .working_directory
                .as_deref()
                .or_else(|| self.defaults.as_ref().map(|d| d.working_directory.as_str()));
            match resolved {
                None => anyhow::bail!(
                    "Step '{}' has no working directory and the workflow declares no default",
                    step.name
                ),
                Some(dir) if dir.trim().is_empty() => {
                    anyhow::bail!("Step '{}' has an empty working directory", step.name)
                }
                Some(_) => {}
            }
        }

        if let Some(toolchain) = &self.toolchain {
            if toolchain.channel.trim().is_empty() {
                anyhow::bail!("Toolchain channel must not be empty");
            }
        }

        Ok(())
    }

    /// Compile the trigger section into branch filters
    pub fn trigger_filters(&self) -> Result<TriggerFilters> {
        let compile = |branches: Option<&BranchesConfig>| -> Result<Vec<BranchFilter>> {
            branches
                .map(|b| b.branches.iter().map(|raw| BranchFilter::parse(raw)))
                .into_iter()
                .flatten()
                .collect()
        };

        Ok(TriggerFilters {
            push: compile(self.triggers.push.as_ref())?,
            pull_request: compile(self.triggers.pull_request.as_ref())?,
        })
    }

    /// Convert the config to a Workflow domain model
    pub fn to_workflow(&self) -> Result<Workflow> {
        Workflow::from_config(self)
    }
}
