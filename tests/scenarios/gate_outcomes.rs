//! Test: gate outcomes - aggregate pass/fail over the four gates

use crate::helpers::*;
use keeper_ci::core::{RunStatus, StepState};
use keeper_ci::exec::{create_report, StepStatus};

/// All four gates pass, so the run passes
#[tokio::test]
async fn test_all_gates_pass() {
    let mut run = keeper_run();
    let (status, _) = run_with_script(&mut run, Vec::new(), false).await;

    assert_run_passed(&run, status);
    assert_eq!(run.state.passed_steps, 4);
    assert_eq!(run.state.total_steps, 4);
}

/// A single lint failure fails the run, and the failing step is the one
/// individually identifiable in the recorded states
#[tokio::test]
async fn test_single_lint_failure_fails_the_run() {
    let mut run = keeper_run();
    let script = vec![
        ScriptedResult::Exit(0, "", ""),
        ScriptedResult::Exit(0, "", ""),
        ScriptedResult::Exit(1, "", "error: unused variable `x`"),
        ScriptedResult::Exit(0, "", ""),
    ];

    let (status, _) = run_with_script(&mut run, script, false).await;

    assert_eq!(status, RunStatus::Failed);
    assert_failed_steps(&run, &["Clippy"]);

    // The other three gates passed independently.
    assert_eq!(run.state.passed_steps, 3);
    assert_eq!(run.state.failed_steps, 1);

    // The failing step carries the tool's own diagnostics verbatim.
    match &run.step("Clippy").unwrap().state {
        StepState::Failed { reason, output, .. } => {
            assert_eq!(reason, "exited with code 1");
            assert!(output.contains("unused variable"));
        }
        other => panic!("Expected Clippy to fail, got {:?}", other),
    }
}

/// A formatting violation is just as fatal as a build error
#[tokio::test]
async fn test_format_failure_fails_the_run() {
    let mut run = keeper_run();
    let script = vec![ScriptedResult::Exit(1, "Diff in src/main.rs", "")];

    let (status, _) = run_with_script(&mut run, script, false).await;

    assert_eq!(status, RunStatus::Failed);
    assert_failed_steps(&run, &["Format code"]);
}

/// A timeout marks the step failed without touching later steps
#[tokio::test]
async fn test_timeout_fails_the_step() {
    let mut run = keeper_run();
    let script = vec![
        ScriptedResult::Exit(0, "", ""),
        ScriptedResult::Timeout(600),
    ];

    let (status, _) = run_with_script(&mut run, script, false).await;

    assert_eq!(status, RunStatus::Failed);
    assert_failed_steps(&run, &["Check code"]);
    match &run.step("Check code").unwrap().state {
        StepState::Failed { reason, .. } => {
            assert_eq!(reason, "timeout after 600 seconds");
        }
        other => panic!("Expected Check code to fail, got {:?}", other),
    }

    // Remaining steps still ran to completion.
    assert_eq!(run.state.passed_steps, 3);
}

/// Re-running against the same inputs yields the same aggregate outcome
#[tokio::test]
async fn test_runs_are_repeatable() {
    let script = || {
        vec![
            ScriptedResult::Exit(0, "", ""),
            ScriptedResult::Exit(0, "", ""),
            ScriptedResult::Exit(1, "", "error: lint"),
            ScriptedResult::Exit(0, "", ""),
        ]
    };

    let mut first = keeper_run();
    let (first_status, _) = run_with_script(&mut first, script(), false).await;

    let mut second = keeper_run();
    let (second_status, _) = run_with_script(&mut second, script(), false).await;

    assert_eq!(first_status, second_status);
    assert_eq!(
        first.failed_steps().len(),
        second.failed_steps().len()
    );
    // Distinct runs share no state.
    assert_ne!(first.state.run_id, second.state.run_id);
}

/// The JSON report names each step's individual status
#[tokio::test]
async fn test_report_reflects_step_statuses() {
    let mut run = keeper_run();
    let script = vec![
        ScriptedResult::Exit(0, "", ""),
        ScriptedResult::Exit(101, "", "error[E0308]: mismatched types"),
    ];

    run_with_script(&mut run, script, false).await;

    let report = create_report(&run);
    assert_eq!(report.status, RunStatus::Failed);
    assert_eq!(report.steps[0].status, StepStatus::Passed);
    assert_eq!(report.steps[1].status, StepStatus::Failed);
    assert_eq!(
        report.steps[1].reason.as_deref(),
        Some("exited with code 101")
    );
    assert_eq!(report.steps[2].status, StepStatus::Passed);
    assert_eq!(report.steps[3].status, StepStatus::Passed);
}
