use crate::actions::ControlAction;
use crate::environment::Environment;
use crate::patch::{AppliedPatch, AuditEntry, NewPatch, PendingPatch};
use crate::runtime_api::error::RequestError;
use crate::status::{HealthStatus, StatusSnapshot};

pub(crate) mod client;
pub use client::RuntimeClient;
pub mod error;
#[cfg(test)]
pub(crate) mod test_server;

#[cfg(test)]
use mockall::automock;

/// The HTTP surface of the patch runtime.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait RuntimeApi: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Liveness probe.
    async fn health(&self) -> Result<HealthStatus, RequestError>;

    /// Current state of the runtime loop.
    async fn status(&self) -> Result<StatusSnapshot, RequestError>;

    /// Patches waiting to be applied, in server order.
    async fn pending_patches(&self) -> Result<Vec<PendingPatch>, RequestError>;

    /// Patches already applied.
    async fn applied_patches(&self) -> Result<Vec<AppliedPatch>, RequestError>;

    /// Audit log, oldest entry first.
    async fn audit_log(&self) -> Result<Vec<AuditEntry>, RequestError>;

    /// Sends a loop control action.
    async fn control(&self, action: ControlAction) -> Result<(), RequestError>;

    async fn apply_patch(&self, patch_id: &str) -> Result<(), RequestError>;

    async fn rollback_patch(&self, patch_id: &str) -> Result<(), RequestError>;

    /// Submits a new patch.
    async fn create_patch(&self, patch: &NewPatch) -> Result<(), RequestError>;
}
