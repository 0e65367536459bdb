//! Test: trigger filtering - only matching events schedule a run

use crate::helpers::*;
use keeper_ci::core::{config::WorkflowConfig, EventKind, Run, Trigger};

/// A push to a branch other than main schedules nothing
#[test]
fn test_push_to_other_branch_does_not_trigger() {
    let workflow = keeper_workflow();
    assert!(Run::from_workflow(&workflow, Trigger::new(EventKind::Push, "develop")).is_none());
    assert!(Run::from_workflow(&workflow, Trigger::new(EventKind::Push, "feature/keeper")).is_none());
}

/// A pull request targeting a branch other than main schedules nothing
#[test]
fn test_pr_to_other_branch_does_not_trigger() {
    let workflow = keeper_workflow();
    assert!(
        Run::from_workflow(&workflow, Trigger::new(EventKind::PullRequest, "release")).is_none()
    );
}

/// Both event kinds targeting main schedule a run
#[test]
fn test_main_triggers_for_both_events() {
    let workflow = keeper_workflow();
    assert!(Run::from_workflow(&workflow, Trigger::new(EventKind::Push, "main")).is_some());
    assert!(Run::from_workflow(&workflow, Trigger::new(EventKind::PullRequest, "main")).is_some());
}

/// Branch names that merely contain "main" are not accepted
#[test]
fn test_branch_match_is_exact() {
    let workflow = keeper_workflow();
    assert!(Run::from_workflow(&workflow, Trigger::new(EventKind::Push, "main-old")).is_none());
    assert!(Run::from_workflow(&workflow, Trigger::new(EventKind::Push, "not-main")).is_none());
}

/// Regex branch filters are supported per event kind
#[test]
fn test_pattern_filters() {
    let yaml = r#"
name: CI
on:
  push:
    branches: [main, "/release-.*/"]
defaults:
  working-directory: keeper
steps:
  - name: Build
    run: cargo build
"#;

    let workflow = WorkflowConfig::from_yaml(yaml)
        .unwrap()
        .to_workflow()
        .unwrap();

    assert!(Run::from_workflow(&workflow, Trigger::new(EventKind::Push, "main")).is_some());
    assert!(Run::from_workflow(&workflow, Trigger::new(EventKind::Push, "release-1.2")).is_some());
    assert!(Run::from_workflow(&workflow, Trigger::new(EventKind::Push, "develop")).is_none());

    // The workflow declares no pull_request trigger at all.
    assert!(
        Run::from_workflow(&workflow, Trigger::new(EventKind::PullRequest, "main")).is_none()
    );
}
