//! Trigger domain model - the events that schedule a run

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of hosting-system event that can schedule a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A push to a branch
    Push,
    /// A pull request targeting a branch
    PullRequest,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Push => write!(f, "push"),
            EventKind::PullRequest => write!(f, "pull_request"),
        }
    }
}

/// A trigger: the event kind plus the branch it targets
///
/// Immutable once created; consumed by exactly one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    /// The event kind
    pub event: EventKind,

    /// The branch the event targets
    pub branch: String,
}

impl Trigger {
    pub fn new(event: EventKind, branch: impl Into<String>) -> Self {
        Self {
            event,
            branch: branch.into(),
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.event, self.branch)
    }
}

/// Branch filter for a trigger (not serializable due to Regex)
#[derive(Debug, Clone)]
pub enum BranchFilter {
    /// Exact branch name match
    Exact(String),
    /// Anchored regular expression match
    Pattern(Regex),
}

impl BranchFilter {
    /// Parse a filter from its workflow-file form
    ///
    /// `/pattern/` becomes an anchored regex; anything else is an exact
    /// branch name.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.len() >= 2 && raw.starts_with('/') && raw.ends_with('/') {
            let inner = &raw[1..raw.len() - 1];
            let regex = Regex::new(&format!("^(?:{})$", inner))
                .with_context(|| format!("Invalid branch pattern: {}", raw))?;
            Ok(BranchFilter::Pattern(regex))
        } else {
            Ok(BranchFilter::Exact(raw.to_string()))
        }
    }

    /// Check whether the filter accepts the given branch
    pub fn matches(&self, branch: &str) -> bool {
        match self {
            BranchFilter::Exact(name) => name == branch,
            BranchFilter::Pattern(regex) => regex.is_match(branch),
        }
    }
}

/// Trigger filters for one workflow: per event kind, the accepted branches
#[derive(Debug, Clone, Default)]
pub struct TriggerFilters {
    /// Branch filters for push events
    pub push: Vec<BranchFilter>,

    /// Branch filters for pull request events
    pub pull_request: Vec<BranchFilter>,
}

impl TriggerFilters {
    /// Check whether a trigger should schedule a run
    pub fn accepts(&self, trigger: &Trigger) -> bool {
        let filters = match trigger.event {
            EventKind::Push => &self.push,
            EventKind::PullRequest => &self.pull_request,
        };

        filters.iter().any(|f| f.matches(&trigger.branch))
    }

    /// True when no event kind has any branch filter
    pub fn is_empty(&self) -> bool {
        self.push.is_empty() && self.pull_request.is_empty()
    }
}
