//! Create-patch form
//!
//! Text fields edited in place inside the dashboard. Their contents survive a
//! failed submission and are only cleared once the runtime accepts the patch.

use crate::patch::NewPatch;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Key used in the submitted JSON.
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchForm {
    fields: Vec<FormField>,
    focus: usize,
    /// Set while a submission is in flight.
    submitting: bool,
}

const FIELDS: [(&str, &str); 5] = [
    ("patch_id", "Patch ID"),
    ("summary", "Summary"),
    ("author", "Author"),
    ("notes", "Notes"),
    ("artifact_uri", "Artifact URI"),
];

impl Default for PatchForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PatchForm {
    pub fn new() -> Self {
        Self {
            fields: FIELDS
                .iter()
                .map(|&(name, label)| FormField {
                    name,
                    label,
                    value: String::new(),
                })
                .collect(),
            focus: 0,
            submitting: false,
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_previous(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    pub fn insert_char(&mut self, c: char) {
        self.fields[self.focus].value.push(c);
    }

    pub fn delete_char(&mut self) {
        self.fields[self.focus].value.pop();
    }

    #[cfg(test)]
    pub fn set_value(&mut self, name: &str, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.value = value.to_string();
        }
    }

    /// Every field is submitted, empty ones included.
    pub fn to_patch(&self, now: DateTime<Utc>) -> NewPatch {
        NewPatch::from_fields(
            self.fields
                .iter()
                .map(|field| (field.name, field.value.clone())),
            now,
        )
    }
}
