//! CLI command definitions

use crate::core::EventKind;
use clap::Args;

/// Run the verification pipeline for a trigger
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to a workflow YAML file (built-in keeper workflow when omitted)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Event kind that triggered this run
    #[arg(short, long, value_enum, default_value_t = EventArg::Push)]
    pub event: EventArg,

    /// Branch the event targets
    #[arg(short, long, default_value = "main")]
    pub branch: String,

    /// Stop at the first failing step instead of running all steps
    #[arg(long)]
    pub fail_fast: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Validate a workflow configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to a workflow YAML file
    #[arg(short, long)]
    pub file: String,

    /// Output the parsed configuration as JSON
    #[arg(long)]
    pub json: bool,
}

/// Show the resolved step list without executing
#[derive(Debug, Args, Clone)]
pub struct StepsCommand {
    /// Path to a workflow YAML file (built-in keeper workflow when omitted)
    #[arg(short, long)]
    pub file: Option<String>,
}

/// Event kind argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EventArg {
    Push,
    #[clap(name = "pull-request")]
    PullRequest,
}

impl From<EventArg> for EventKind {
    fn from(arg: EventArg) -> Self {
        match arg {
            EventArg::Push => EventKind::Push,
            EventArg::PullRequest => EventKind::PullRequest,
        }
    }
}
