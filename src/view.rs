//! Dashboard view tree
//!
//! Pure mappings from a fetched [`Snapshot`] to what the user sees. Every
//! render builds the whole tree again from the latest snapshot; nothing is
//! carried over between renders.

use crate::actions::Action;
use crate::controller::Snapshot;
use crate::patch::{AppliedPatch, AuditEntry, PendingPatch};
use crate::status::StatusSnapshot;
use std::fmt::Write;

/// A per-row button bound to one patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchControl {
    Apply(String),
    Rollback(String),
}

impl PatchControl {
    pub fn label(&self) -> &'static str {
        match self {
            PatchControl::Apply(_) => "apply",
            PatchControl::Rollback(_) => "rollback",
        }
    }

    pub fn action(&self) -> Action {
        match self {
            PatchControl::Apply(id) => Action::Apply(id.clone()),
            PatchControl::Rollback(id) => Action::Rollback(id.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub cells: Vec<String>,
    pub controls: Vec<PatchControl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub title: &'static str,
    pub headers: &'static [&'static str],
    pub rows: Vec<RowView>,
}

impl TableView {
    /// Patch id of the given row, when the row carries patch controls.
    pub fn patch_id(&self, row: usize) -> Option<&str> {
        self.rows
            .get(row)?
            .controls
            .iter()
            .map(|control| match control {
                PatchControl::Apply(id) | PatchControl::Rollback(id) => id.as_str(),
            })
            .next()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub status: Vec<String>,
    pub pending: TableView,
    pub applied: TableView,
    pub audit: TableView,
}

impl DashboardView {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            status: render_status(&snapshot.status),
            pending: render_pending(&snapshot.pending),
            applied: render_applied(&snapshot.applied),
            audit: render_audit(&snapshot.audit),
        }
    }
}

pub fn render_status(status: &StatusSnapshot) -> Vec<String> {
    vec![
        format!("Loop count: {}", status.loop_count),
        format!("Paused: {}", status.paused),
        format!("Interval: {}s", status.loop_interval_seconds),
        format!("Last plan: {}", status.last_plan_summary().unwrap_or("-")),
        format!("Pending patches: {}", status.pending_count()),
    ]
}

pub fn render_pending(patches: &[PendingPatch]) -> TableView {
    TableView {
        title: "PENDING PATCHES",
        headers: &["ID", "Summary", "Author", "Created", "Actions"],
        rows: patches
            .iter()
            .map(|patch| {
                let controls = vec![
                    PatchControl::Apply(patch.patch_id.clone()),
                    PatchControl::Rollback(patch.patch_id.clone()),
                ];
                let buttons = controls
                    .iter()
                    .map(|control| format!("[{}]", control.label()))
                    .collect::<Vec<_>>()
                    .join(" ");
                RowView {
                    cells: vec![
                        patch.patch_id.clone(),
                        patch.summary.clone(),
                        patch.author.clone(),
                        patch.created_at.clone(),
                        buttons,
                    ],
                    controls,
                }
            })
            .collect(),
    }
}

pub fn render_applied(patches: &[AppliedPatch]) -> TableView {
    TableView {
        title: "APPLIED PATCHES",
        headers: &["ID", "Summary", "Notes / Artifact"],
        rows: patches
            .iter()
            .map(|patch| RowView {
                cells: vec![
                    patch.patch_id.clone(),
                    patch.summary.clone(),
                    patch.display_detail().to_string(),
                ],
                controls: Vec::new(),
            })
            .collect(),
    }
}

/// Most recent entry first. The server's order is trusted; timestamps are not parsed.
pub fn render_audit(entries: &[AuditEntry]) -> TableView {
    TableView {
        title: "AUDIT LOG",
        headers: &["Timestamp", "Patch", "Status", "Detail"],
        rows: entries
            .iter()
            .rev()
            .map(|entry| RowView {
                cells: vec![
                    entry.timestamp.clone(),
                    entry.patch_id.clone(),
                    entry.status.clone(),
                    entry.detail_or_empty().to_string(),
                ],
                controls: Vec::new(),
            })
            .collect(),
    }
}

/// Plain-text rendering used by headless mode and one-shot commands.
pub fn render_text(view: &DashboardView) -> String {
    let mut out = String::from("STATUS\n");
    for line in &view.status {
        let _ = writeln!(out, "  {}", line);
    }
    for table in [&view.pending, &view.applied, &view.audit] {
        out.push('\n');
        out.push_str(&render_table_text(table));
    }
    out
}

fn render_table_text(table: &TableView) -> String {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = format!("{} ({})\n", table.title, table.rows.len());
    out.push_str(&format_row(table.headers.iter().copied(), &widths));
    if table.rows.is_empty() {
        out.push_str("  (none)\n");
    }
    for row in &table.rows {
        out.push_str(&format_row(row.cells.iter().map(String::as_str), &widths));
    }
    out
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    format!("  {}\n", line.trim_end())
}
