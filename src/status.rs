//! Runtime loop status
//!
//! Snapshot of the orchestration loop as reported by `GET /status`.

use serde::{Deserialize, Serialize};

/// Summary of the most recent plan produced by the runtime loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastPlan {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The state of the runtime loop at the time of the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Number of loop iterations completed so far.
    pub loop_count: i64,

    /// Whether the loop is currently paused.
    pub paused: bool,

    /// Delay between loop iterations, in seconds.
    pub loop_interval_seconds: f64,

    /// The last plan, if the loop has produced one yet.
    #[serde(default)]
    pub last_plan: Option<LastPlan>,

    /// Patches waiting to be applied. Only the count is shown, so the entries stay opaque.
    #[serde(default)]
    pub pending_patches: Vec<serde_json::Value>,
}

impl StatusSnapshot {
    pub fn pending_count(&self) -> usize {
        self.pending_patches.len()
    }

    pub fn last_plan_summary(&self) -> Option<&str> {
        self.last_plan.as_ref().map(|plan| plan.summary.as_str())
    }
}

/// Response of `GET /healthz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_status_without_plan() {
        let payload = r#"{"loop_count":5,"paused":false,"loop_interval_seconds":30,"last_plan":null,"pending_patches":[]}"#;
        let status: StatusSnapshot = serde_json::from_str(payload).unwrap();
        assert_eq!(status.loop_count, 5);
        assert!(!status.paused);
        assert_eq!(status.loop_interval_seconds, 30.0);
        assert_eq!(status.last_plan_summary(), None);
        assert_eq!(status.pending_count(), 0);
    }

    #[test]
    fn decodes_status_with_plan_and_pending_entries() {
        let payload = r#"{
            "loop_count": 12,
            "paused": true,
            "loop_interval_seconds": 0.5,
            "last_plan": {"created_at": "2024-05-01T10:00:00", "summary": "keep monitoring"},
            "pending_patches": [{"patch_id": "a"}, {"patch_id": "b"}]
        }"#;
        let status: StatusSnapshot = serde_json::from_str(payload).unwrap();
        assert_eq!(status.last_plan_summary(), Some("keep monitoring"));
        assert_eq!(status.pending_count(), 2);
    }

    #[test]
    fn missing_optional_fields_default() {
        let payload = r#"{"loop_count":0,"paused":false,"loop_interval_seconds":10}"#;
        let status: StatusSnapshot = serde_json::from_str(payload).unwrap();
        assert!(status.last_plan.is_none());
        assert!(status.pending_patches.is_empty());
    }

    #[test]
    fn health_status_is_case_insensitive() {
        let health: HealthStatus = serde_json::from_str(r#"{"status":"OK"}"#).unwrap();
        assert!(health.is_ok());
        let health: HealthStatus = serde_json::from_str(r#"{"status":"degraded"}"#).unwrap();
        assert!(!health.is_ok());
    }
}
