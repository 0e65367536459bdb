//! Test: working directory - every gate runs in the fixed subproject path

use crate::helpers::*;
use keeper_ci::core::{config::WorkflowConfig, EventKind, Run, Trigger};

/// Every executed command is scoped to the keeper subdirectory
#[tokio::test]
async fn test_every_step_runs_in_the_subproject() {
    let mut run = keeper_run();
    let (_, runner) = run_with_script(&mut run, Vec::new(), false).await;

    let recorded = runner.recorded();
    assert_eq!(recorded.len(), 4);
    for request in &recorded {
        assert_eq!(
            request.working_dir, "keeper",
            "`{}` must run in the subproject, never the repository root",
            request.command
        );
    }
}

/// Commands execute in declaration order
#[tokio::test]
async fn test_steps_execute_in_declaration_order() {
    let mut run = keeper_run();
    let (_, runner) = run_with_script(&mut run, Vec::new(), false).await;

    let commands: Vec<_> = runner
        .recorded()
        .iter()
        .map(|r| r.command.clone())
        .collect();
    assert_eq!(
        commands,
        vec![
            "cargo fmt --all -- --check",
            "cargo check",
            "cargo clippy -- -D warnings",
            "cargo build",
        ]
    );
}

/// The pinned toolchain is exported into every step's environment
#[tokio::test]
async fn test_toolchain_override_applies_to_every_step() {
    let mut run = keeper_run();
    let (_, runner) = run_with_script(&mut run, Vec::new(), false).await;

    for request in &runner.recorded() {
        assert!(
            request
                .env
                .iter()
                .any(|(k, v)| k == "RUSTUP_TOOLCHAIN" && v == "stable"),
            "`{}` must run under the pinned toolchain",
            request.command
        );
    }
}

/// A per-step working-directory override is honored for that step only
#[tokio::test]
async fn test_per_step_working_directory_override() {
    let yaml = r#"
name: CI
on:
  push:
    branches: [main]
defaults:
  working-directory: keeper
steps:
  - name: Check keeper
    run: cargo check
  - name: Check indexer
    run: cargo check
    working-directory: indexer
"#;

    let workflow = WorkflowConfig::from_yaml(yaml)
        .unwrap()
        .to_workflow()
        .unwrap();
    let mut run =
        Run::from_workflow(&workflow, Trigger::new(EventKind::Push, "main")).unwrap();

    let (_, runner) = run_with_script(&mut run, Vec::new(), false).await;

    let dirs: Vec<_> = runner
        .recorded()
        .iter()
        .map(|r| r.working_dir.clone())
        .collect();
    assert_eq!(dirs, vec!["keeper", "indexer"]);
}
