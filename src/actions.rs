//! User actions
//!
//! Everything a user can ask the dashboard to do, as explicit types instead of
//! stringly-typed identifiers.

use crate::patch::NewPatch;
use crate::runtime_api::error::RequestError;
use std::fmt::Display;
use thiserror::Error;

/// Loop-level operations exposed under `/control/{action}`.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
    clap::ValueEnum,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ControlAction {
    /// Stop the runtime loop after the current iteration.
    Pause,
    /// Let a paused runtime loop continue.
    Resume,
}

impl ControlAction {
    /// Path of the endpoint, relative to the API base URL.
    pub fn endpoint(&self) -> String {
        format!("control/{}", self.as_ref())
    }
}

/// A request made from the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Re-fetch status and the three patch lists.
    Refresh,
    Control(ControlAction),
    Apply(String),
    Rollback(String),
    CreatePatch(NewPatch),
}

impl Action {
    /// Prefix shown to the user when this action fails.
    pub fn failure_label(&self) -> String {
        match self {
            Action::Refresh => "refresh failed".to_string(),
            Action::Control(action) => format!("{} failed", action),
            Action::Apply(_) => "apply failed".to_string(),
            Action::Rollback(_) => "rollback failed".to_string(),
            Action::CreatePatch(_) => "patch submission failed".to_string(),
        }
    }

    pub fn is_refresh(&self) -> bool {
        matches!(self, Action::Refresh)
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Refresh => write!(f, "refresh"),
            Action::Control(action) => write!(f, "{}", action),
            Action::Apply(id) => write!(f, "apply {}", id),
            Action::Rollback(id) => write!(f, "rollback {}", id),
            Action::CreatePatch(patch) => write!(f, "create {}", patch),
        }
    }
}

/// A failed action, labelled for display.
#[derive(Debug, Error)]
#[error("{label}\n{error}")]
pub struct ActionFailure {
    /// The action that failed.
    pub action: Action,
    pub label: String,
    #[source]
    pub error: RequestError,
}

impl ActionFailure {
    pub fn new(action: &Action, error: RequestError) -> Self {
        Self {
            action: action.clone(),
            label: action.failure_label(),
            error,
        }
    }
}
