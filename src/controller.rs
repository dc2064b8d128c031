//! Dashboard controller
//!
//! Runs user actions against the runtime API: submit, then refresh everything.

use crate::actions::{Action, ActionFailure};
use crate::patch::{AppliedPatch, AuditEntry, PendingPatch};
use crate::runtime_api::RuntimeApi;
use crate::runtime_api::error::RequestError;
use crate::status::StatusSnapshot;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Everything one refresh fetches, taken at (roughly) the same moment.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub status: StatusSnapshot,
    pub pending: Vec<PendingPatch>,
    pub applied: Vec<AppliedPatch>,
    pub audit: Vec<AuditEntry>,
}

/// What running an action produced, in order.
#[derive(Debug)]
pub enum Outcome {
    /// The server accepted the action; a refresh follows.
    Submitted(Action),
    /// A refresh completed.
    Refreshed(Box<Snapshot>),
    /// The action or its follow-up refresh failed.
    Failed(ActionFailure),
}

impl Outcome {
    /// Whether this is the last outcome of its run.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Submitted(_))
    }
}

#[derive(Clone)]
pub struct Controller {
    api: Arc<dyn RuntimeApi>,
}

impl Controller {
    pub fn new(api: Arc<dyn RuntimeApi>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &dyn RuntimeApi {
        self.api.as_ref()
    }

    /// Fetches the four views concurrently. The first failure aborts the whole refresh.
    pub async fn refresh(&self) -> Result<Snapshot, ActionFailure> {
        let api = self.api.as_ref();
        let (status, pending, applied, audit) = futures::try_join!(
            api.status(),
            api.pending_patches(),
            api.applied_patches(),
            api.audit_log(),
        )
        .map_err(|e| ActionFailure::new(&Action::Refresh, e))?;

        log::debug!(
            "refreshed: loop {} / {} pending / {} applied / {} audit entries",
            status.loop_count,
            pending.len(),
            applied.len(),
            audit.len()
        );
        Ok(Snapshot {
            status,
            pending,
            applied,
            audit,
        })
    }

    /// Sends the action's request. `Action::Refresh` has nothing to submit.
    pub async fn submit(&self, action: &Action) -> Result<(), ActionFailure> {
        let result: Result<(), RequestError> = match action {
            Action::Refresh => Ok(()),
            Action::Control(control) => self.api.control(*control).await,
            Action::Apply(patch_id) => self.api.apply_patch(patch_id).await,
            Action::Rollback(patch_id) => self.api.rollback_patch(patch_id).await,
            Action::CreatePatch(patch) => self.api.create_patch(patch).await,
        };
        result.map_err(|e| {
            log::warn!("{} rejected: {}", action, e);
            ActionFailure::new(action, e)
        })
    }

    /// Submits the action, then refreshes on success. A rejected action is not followed by a refresh.
    pub async fn run(&self, action: Action, outcomes: &mpsc::Sender<Outcome>) {
        if !action.is_refresh() {
            if let Err(failure) = self.submit(&action).await {
                let _ = outcomes.send(Outcome::Failed(failure)).await;
                return;
            }
            log::info!("{} accepted", action);
            let _ = outcomes.send(Outcome::Submitted(action)).await;
        }

        let outcome = match self.refresh().await {
            Ok(snapshot) => Outcome::Refreshed(Box::new(snapshot)),
            Err(failure) => {
                log::warn!("{}", failure);
                Outcome::Failed(failure)
            }
        };
        let _ = outcomes.send(outcome).await;
    }
}
