//! Pipeline execution

pub mod command;
pub mod report;
pub mod runner;

pub use command::{CommandError, CommandOutput, CommandRequest, CommandRunner, ShellCommandRunner};
pub use report::{create_report, RunReport, StepReport, StepStatus};
pub use runner::{PipelineRunner, RunEvent};
