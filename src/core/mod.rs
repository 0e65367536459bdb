//! Core domain models for the verification pipeline
//!
//! This module defines the data structures that represent workflows,
//! triggers, runs, and their steps.

pub mod config;
pub mod run;
pub mod state;
pub mod step;
pub mod trigger;

pub use run::*;
pub use state::*;
pub use step::*;
pub use trigger::*;
