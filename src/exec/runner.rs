//! Pipeline runner - drives a run through its steps in declaration order

use crate::{
    core::{Run, RunStatus, StepState, Trigger},
    exec::command::{CommandRequest, CommandRunner},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Events emitted during a run
#[derive(Debug, Clone)]
pub enum RunEvent {
    RunStarted {
        run_id: Uuid,
        workflow_name: String,
        trigger: Trigger,
    },
    StepStarted {
        name: String,
        index: usize,
    },
    StepOutput {
        name: String,
        output: String,
    },
    StepPassed {
        name: String,
    },
    StepFailed {
        name: String,
        reason: String,
        output: String,
    },
    StepSkipped {
        name: String,
        reason: String,
    },
    RunCompleted {
        run_id: Uuid,
        status: RunStatus,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(RunEvent) + Send + Sync>;

/// Drives a run: strictly sequential, one step at a time, aggregate outcome
///
/// Every step is executed regardless of earlier failures unless fail-fast
/// is enabled, in which case the remaining steps are marked Skipped.
pub struct PipelineRunner<C> {
    runner: C,
    fail_fast: bool,
    event_handlers: Vec<EventHandler>,
}

impl<C: CommandRunner> PipelineRunner<C> {
    pub fn new(runner: C, fail_fast: bool) -> Self {
        Self {
            runner,
            fail_fast,
            event_handlers: Vec::new(),
        }
    }

    /// Consume the runner and return the underlying command runner
    pub fn into_inner(self) -> C {
        self.runner
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(RunEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    /// Emit an event to all handlers
    fn emit(&self, event: RunEvent) {
        for handler in &self.event_handlers {
            handler(event.clone());
        }
    }

    /// Execute the run to completion and return its aggregate status
    pub async fn execute(&self, run: &mut Run) -> RunStatus {
        let run_id = run.state.run_id;

        info!(
            "Starting run {} of '{}' for {}",
            run_id, run.workflow_name, run.trigger
        );
        self.emit(RunEvent::RunStarted {
            run_id,
            workflow_name: run.workflow_name.clone(),
            trigger: run.trigger.clone(),
        });

        run.state.start(run.steps.len());
        let env = toolchain_env(run);

        for index in 0..run.steps.len() {
            if self.fail_fast && run.has_failures() {
                let name = run.steps[index].name.clone();
                let reason = "skipped after earlier failure".to_string();
                warn!("Skipping step '{}' ({})", name, reason);
                run.steps[index].state = StepState::Skipped {
                    reason: reason.clone(),
                };
                self.emit(RunEvent::StepSkipped { name, reason });
                continue;
            }

            self.execute_step(run, index, &env).await;
        }

        let passed = run
            .steps
            .iter()
            .filter(|s| matches!(s.state, StepState::Passed { .. }))
            .count();
        let failed = run.failed_steps().len();
        let skipped = run
            .steps
            .iter()
            .filter(|s| matches!(s.state, StepState::Skipped { .. }))
            .count();
        run.state.update_counts(passed, failed, skipped);

        let status = run.outcome();
        run.state.finish(status);

        info!(
            "Run {} finished: {:?} ({} passed, {} failed, {} skipped)",
            run_id, status, passed, failed, skipped
        );
        self.emit(RunEvent::RunCompleted { run_id, status });

        status
    }

    /// Execute a single step and record its outcome
    async fn execute_step(&self, run: &mut Run, index: usize, env: &[(String, String)]) {
        let (name, request) = {
            let step = &run.steps[index];
            (
                step.name.clone(),
                CommandRequest {
                    command: step.command.clone(),
                    working_dir: step.working_dir.clone(),
                    env: env.to_vec(),
                    timeout_secs: step.timeout_secs,
                },
            )
        };

        let started_at = Utc::now();
        run.steps[index].state = StepState::Running { started_at };

        info!("Executing step '{}': {}", name, request.command);
        self.emit(RunEvent::StepStarted {
            name: name.clone(),
            index,
        });

        match self.runner.run(&request).await {
            Ok(output) if output.success() => {
                let combined = output.combined();
                run.steps[index].state = StepState::Passed {
                    output: combined.clone(),
                    started_at,
                    completed_at: Utc::now(),
                };

                info!("Step '{}' passed", name);
                if !combined.is_empty() {
                    self.emit(RunEvent::StepOutput {
                        name: name.clone(),
                        output: combined,
                    });
                }
                self.emit(RunEvent::StepPassed { name });
            }
            Ok(output) => {
                let reason = format!("exited with code {}", output.exit_code);
                let combined = output.combined();
                run.steps[index].state = StepState::Failed {
                    reason: reason.clone(),
                    output: combined.clone(),
                    started_at,
                    completed_at: Utc::now(),
                };

                error!("Step '{}' failed: {}", name, reason);
                self.emit(RunEvent::StepFailed {
                    name,
                    reason,
                    output: combined,
                });
            }
            Err(e) => {
                let reason = e.to_string();
                run.steps[index].state = StepState::Failed {
                    reason: reason.clone(),
                    output: String::new(),
                    started_at,
                    completed_at: Utc::now(),
                };

                error!("Step '{}' failed: {}", name, reason);
                self.emit(RunEvent::StepFailed {
                    name,
                    reason,
                    output: String::new(),
                });
            }
        }
    }
}

/// Environment for every step in a run
///
/// A forced toolchain pin is applied by exporting `RUSTUP_TOOLCHAIN`, which
/// takes precedence over any directory-local toolchain configuration.
fn toolchain_env(run: &Run) -> Vec<(String, String)> {
    match &run.toolchain {
        Some(toolchain) if toolchain.force => vec![(
            "RUSTUP_TOOLCHAIN".to_string(),
            toolchain.channel.clone(),
        )],
        _ => Vec::new(),
    }
}
