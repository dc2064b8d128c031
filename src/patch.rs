//! Patch records
//!
//! The three patch views served by the runtime API (pending, applied, audit)
//! and the payload used to submit a new patch.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// A patch waiting to be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPatch {
    pub patch_id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub author: String,
    /// ISO-8601 timestamp, shown exactly as the server sent it.
    #[serde(default)]
    pub created_at: String,
}

/// A patch the runtime has applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedPatch {
    pub patch_id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub artifact_local_path: Option<String>,
}

impl AppliedPatch {
    /// Notes when present, otherwise the local artifact path, otherwise nothing.
    pub fn display_detail(&self) -> &str {
        [self.notes.as_deref(), self.artifact_local_path.as_deref()]
            .into_iter()
            .flatten()
            .find(|value| !value.is_empty())
            .unwrap_or("")
    }
}

/// One record of the patch audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    #[serde(default)]
    pub timestamp: String,
    pub patch_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub detail: Option<String>,
}

impl AuditEntry {
    pub fn detail_or_empty(&self) -> &str {
        self.detail.as_deref().unwrap_or("")
    }
}

/// Body of `POST /patches`: the submitted form fields plus a creation stamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPatch {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    pub created_at: String,
}

impl NewPatch {
    /// Builds the payload from form fields, stamping `now` as `created_at`.
    ///
    /// A `created_at` among the fields is overwritten by the stamp.
    pub fn from_fields<I, K, V>(fields: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields: BTreeMap<String, String> = fields
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        fields.remove("created_at");
        Self {
            fields,
            created_at: iso_timestamp(now),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn patch_id(&self) -> Option<&str> {
        self.field("patch_id").filter(|id| !id.is_empty())
    }
}

impl Display for NewPatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.patch_id(), self.field("summary")) {
            (Some(id), _) => write!(f, "patch {}", id),
            (None, Some(summary)) if !summary.is_empty() => write!(f, "patch \"{}\"", summary),
            _ => write!(f, "patch"),
        }
    }
}

/// Formats a UTC time the way browsers' `Date.toISOString` does.
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}
