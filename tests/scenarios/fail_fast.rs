//! Test: fail-fast - opt-in early exit versus run-to-completion default

use crate::helpers::*;
use keeper_ci::core::{RunStatus, StepState};

/// By default every gate runs even after a failure
#[tokio::test]
async fn test_default_runs_all_steps_after_failure() {
    let mut run = keeper_run();
    let script = vec![ScriptedResult::Exit(1, "", "Diff in src/lib.rs")];

    let (status, runner) = run_with_script(&mut run, script, false).await;

    assert_eq!(status, RunStatus::Failed);
    assert_eq!(runner.recorded().len(), 4, "all four gates should execute");
    assert_eq!(run.state.failed_steps, 1);
    assert_eq!(run.state.passed_steps, 3);
    assert_eq!(run.state.skipped_steps, 0);
}

/// With fail-fast, the remaining gates are skipped, not failed
#[tokio::test]
async fn test_fail_fast_skips_remaining_steps() {
    let mut run = keeper_run();
    let script = vec![ScriptedResult::Exit(1, "", "Diff in src/lib.rs")];

    let (status, runner) = run_with_script(&mut run, script, true).await;

    assert_eq!(status, RunStatus::Failed);
    assert_eq!(runner.recorded().len(), 1, "only the first gate should execute");
    assert_eq!(run.state.failed_steps, 1);
    assert_eq!(run.state.skipped_steps, 3);

    for name in ["Check code", "Clippy", "Build"] {
        assert!(
            matches!(run.step(name).unwrap().state, StepState::Skipped { .. }),
            "step '{}' should be skipped",
            name
        );
    }
}

/// Fail-fast with no failure behaves exactly like the default
#[tokio::test]
async fn test_fail_fast_with_all_passing() {
    let mut run = keeper_run();
    let (status, runner) = run_with_script(&mut run, Vec::new(), true).await;

    assert_run_passed(&run, status);
    assert_eq!(runner.recorded().len(), 4);
}
