//! Command execution - spawns the external verification tools

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Error types for command execution
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("timeout after {0} seconds")]
    Timeout(u64),

    #[error("command output was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Everything needed to execute one step's command
#[derive(Debug, Clone)]
pub struct CommandRequest {
    /// Shell command line
    pub command: String,

    /// Directory the command runs in
    pub working_dir: String,

    /// Extra environment variables (toolchain override lands here)
    pub env: Vec<(String, String)>,

    /// Timeout in seconds, if any
    pub timeout_secs: Option<u64>,
}

/// Captured result of an executed command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Process exit code (-1 when terminated by a signal)
    pub exit_code: i32,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,
}

impl CommandOutput {
    /// True when the command exited zero
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout and stderr concatenated, for verbatim diagnostics display
    pub fn combined(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// Trait for command execution - allows mocking in tests
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Execute a command and capture its output
    async fn run(&self, request: &CommandRequest) -> Result<CommandOutput, CommandError>;
}

/// Command runner that executes through the system shell
#[derive(Debug, Clone)]
pub struct ShellCommandRunner {
    /// Shell binary used to interpret command lines
    shell: String,
}

impl ShellCommandRunner {
    pub fn new() -> Self {
        Self {
            shell: "sh".to_string(),
        }
    }

    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for ShellCommandRunner {
    async fn run(&self, request: &CommandRequest) -> Result<CommandOutput, CommandError> {
        debug!(
            "Spawning `{}` in {} via {}",
            request.command, request.working_dir, self.shell
        );

        let mut command = Command::new(&self.shell);
        command
            .arg("-c")
            .arg(&request.command)
            .current_dir(&request.working_dir)
            .envs(request.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .kill_on_drop(true);

        let output = match request.timeout_secs {
            Some(secs) => timeout(Duration::from_secs(secs), command.output())
                .await
                .map_err(|_| CommandError::Timeout(secs))?,
            None => command.output().await,
        };

        let output = output.map_err(|source| CommandError::Spawn {
            command: request.command.clone(),
            source,
        })?;

        let exit_code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8(output.stdout)?;
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if exit_code != 0 {
            warn!(
                "`{}` exited with code {}: {}",
                request.command,
                exit_code,
                stderr.trim()
            );
        }

        debug!(
            "`{}` finished: code {}, {} bytes stdout",
            request.command,
            exit_code,
            stdout.len()
        );

        Ok(CommandOutput {
            exit_code,
            stdout,
            stderr,
        })
    }
}
