//! Patch staging
//!
//! Pushes one patch through the runtime in a single step: pause the loop,
//! register the patch, apply it, and optionally let the loop continue.

use crate::actions::{Action, ActionFailure, ControlAction};
use crate::controller::{Controller, Snapshot};
use crate::patch::NewPatch;
use chrono::{DateTime, Utc};

/// Result of a staging run that got the patch applied.
#[derive(Debug)]
pub struct StageReport {
    pub patch_id: String,
    /// Whether the loop was paused when the patch went in.
    pub paused: bool,
    /// Whether the loop was resumed afterwards.
    pub resumed: bool,
    pub snapshot: Snapshot,
}

/// Patch id used when the caller leaves it out.
pub fn default_patch_id(now: DateTime<Utc>) -> String {
    format!("auto-{}", now.timestamp())
}

/// Builds the patch to stage, filling in a generated id when none was given.
pub fn staged_patch<I, K, V>(fields: I, now: DateTime<Utc>) -> NewPatch
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut patch = NewPatch::from_fields(fields, now);
    if patch.patch_id().is_none_or(str::is_empty) {
        patch
            .fields
            .insert("patch_id".to_string(), default_patch_id(now));
    }
    patch
}

/// Runs the staging sequence. Pause and resume are best effort; a failed
/// create or apply stops the run with that step's failure.
pub async fn stage(
    controller: &Controller,
    patch: NewPatch,
    resume: bool,
) -> Result<StageReport, ActionFailure> {
    let patch_id = patch.patch_id().unwrap_or_default().to_string();

    let paused = try_control(controller, ControlAction::Pause).await;

    controller.submit(&Action::CreatePatch(patch)).await?;
    log::info!("patch {} registered", patch_id);

    controller.submit(&Action::Apply(patch_id.clone())).await?;
    log::info!("patch {} applied", patch_id);

    let resumed = resume && try_control(controller, ControlAction::Resume).await;

    let snapshot = controller.refresh().await?;
    Ok(StageReport {
        patch_id,
        paused,
        resumed,
        snapshot,
    })
}

async fn try_control(controller: &Controller, action: ControlAction) -> bool {
    match controller.submit(&Action::Control(action)).await {
        Ok(()) => true,
        Err(failure) => {
            log::warn!("continuing without {}: {}", action, failure.error);
            false
        }
    }
}
