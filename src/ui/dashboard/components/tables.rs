//! Dashboard patch tables
//!
//! Renders the pending, applied and audit tables from the view tree

use super::super::state::DashboardState;
use super::super::utils::audit_status_color;
use crate::view::TableView;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Padding, Paragraph, Row, Table, TableState,
};

/// Column of the audit table holding the status word.
const AUDIT_STATUS_COLUMN: usize = 2;

fn table_block(title: String, focused: bool) -> Block<'static> {
    let border_color = if focused { Color::LightCyan } else { Color::Cyan };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .padding(Padding::horizontal(1))
}

fn column_widths(table: &TableView) -> Vec<Constraint> {
    table
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let widest = table
                .rows
                .iter()
                .filter_map(|row| row.cells.get(i))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len());
            Constraint::Min(widest.min(u16::MAX as usize) as u16)
        })
        .collect()
}

fn build_table(table: &TableView, focused: bool, color_cell: impl Fn(usize, &str) -> Color) -> Table<'_> {
    let header = Row::new(table.headers.iter().map(|h| Cell::from(*h))).style(
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD),
    );
    let rows = table.rows.iter().map(|row| {
        Row::new(row.cells.iter().enumerate().map(|(i, cell)| {
            Cell::from(cell.as_str()).style(Style::default().fg(color_cell(i, cell)))
        }))
    });
    Table::new(rows, column_widths(table))
        .header(header)
        .block(table_block(
            format!("{} ({})", table.title, table.rows.len()),
            focused,
        ))
        .column_spacing(2)
}

fn render_empty(f: &mut Frame, area: Rect, title: &str) {
    let empty = Paragraph::new(Line::from("(none)"))
        .style(Style::default().fg(Color::DarkGray))
        .block(table_block(format!("{} (0)", title), false));
    f.render_widget(empty, area);
}

/// Pending patches, with the row cursor used by the apply/rollback keys.
pub fn render_pending_table(f: &mut Frame, area: Rect, state: &DashboardState) {
    let Some(view) = &state.view else {
        render_empty(f, area, "PENDING PATCHES");
        return;
    };
    if view.pending.rows.is_empty() {
        render_empty(f, area, view.pending.title);
        return;
    }

    let mut table = build_table(&view.pending, true, |column, _| {
        if column + 1 == view.pending.headers.len() {
            Color::LightBlue
        } else {
            Color::White
        }
    })
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");
    if let Some(patch_id) = state.selected_patch_id() {
        table = table.block(table_block(
            format!(
                "{} ({}) | selected: {}",
                view.pending.title,
                view.pending.rows.len(),
                patch_id
            ),
            true,
        ));
    }

    // Rendering needs a mutable cursor; the state itself stays untouched
    let mut selection = TableState::default().with_selected(state.pending_selection.selected());
    f.render_stateful_widget(table, area, &mut selection);
}

pub fn render_applied_table(f: &mut Frame, area: Rect, state: &DashboardState) {
    match &state.view {
        Some(view) if !view.applied.rows.is_empty() => {
            f.render_widget(build_table(&view.applied, false, |_, _| Color::White), area);
        }
        Some(view) => render_empty(f, area, view.applied.title),
        None => render_empty(f, area, "APPLIED PATCHES"),
    }
}

pub fn render_audit_table(f: &mut Frame, area: Rect, state: &DashboardState) {
    match &state.view {
        Some(view) if !view.audit.rows.is_empty() => {
            let table = build_table(&view.audit, false, |column, cell| {
                if column == AUDIT_STATUS_COLUMN {
                    audit_status_color(cell)
                } else {
                    Color::White
                }
            });
            f.render_widget(table, area);
        }
        Some(view) => render_empty(f, area, view.audit.title),
        None => render_empty(f, area, "AUDIT LOG"),
    }
}
