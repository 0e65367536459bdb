//! keeper-ci - build-verification pipeline runner for the keeper subproject

pub mod cli;
pub mod core;
pub mod exec;

// Re-export commonly used types
pub use core::{
    EventKind, Run, RunState, RunStatus, Step, StepState, Toolchain, Trigger, Workflow,
};
pub use exec::{
    create_report, CommandError, CommandOutput, CommandRequest, CommandRunner, PipelineRunner,
    RunEvent, RunReport, ShellCommandRunner, StepStatus,
};
