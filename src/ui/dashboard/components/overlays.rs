//! Modal overlays drawn on top of the dashboard
//!
//! The error notice and the create-patch form

use super::super::state::{DashboardState, Notice};
use super::super::utils::centered_rect;
use crate::ui::form::PatchForm;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

const NOTICE_WIDTH: u16 = 70;
const FORM_WIDTH: u16 = 72;

/// Draws whichever overlay is active. The notice sits above the form.
pub fn render_overlays(f: &mut Frame, state: &DashboardState) {
    let area = f.area();
    if let Some(form) = &state.form {
        render_form(f, area, form);
    }
    if let Some(notice) = &state.notice {
        render_notice(f, area, notice);
    }
}

/// Rows needed for `lines` of text plus `chrome`, saturating at `u16::MAX`.
fn popup_height(lines: usize, chrome: u16) -> u16 {
    u16::try_from(lines)
        .unwrap_or(u16::MAX)
        .saturating_add(chrome)
}

fn render_notice(f: &mut Frame, area: Rect, notice: &Notice) {
    let mut lines: Vec<Line> = notice
        .body
        .lines()
        .map(|line| Line::from(line.to_string()))
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "[Enter] OK",
        Style::default().fg(Color::Gray),
    )));

    // Two border rows, two padding rows, plus a little slack for wrapping
    let height = popup_height(lines.len(), 6);
    let popup = centered_rect(NOTICE_WIDTH, height, area);

    let block = Block::default()
        .title(format!(" {} ", notice.title))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::LightRed))
        .padding(Padding::uniform(1));

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}

fn render_form(f: &mut Frame, area: Rect, form: &PatchForm) {
    let mut lines = Vec::with_capacity(form.fields().len() + 2);
    for (i, field) in form.fields().iter().enumerate() {
        let focused = i == form.focus();
        let label_style = if focused {
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let cursor = if focused && !form.is_submitting() { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<14}", field.label), label_style),
            Span::styled(
                format!("{}{}", field.value, cursor),
                Style::default().fg(Color::White),
            ),
        ]));
    }
    lines.push(Line::default());
    let hint = if form.is_submitting() {
        "Submitting..."
    } else {
        "[Tab] Next field | [Enter] Submit | [Esc] Cancel"
    };
    lines.push(Line::from(Span::styled(
        hint,
        Style::default().fg(Color::Gray),
    )));

    let height = popup_height(lines.len(), 4);
    let popup = centered_rect(FORM_WIDTH, height, area);

    let block = Block::default()
        .title(" NEW PATCH ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    f.render_widget(Clear, popup);
    f.render_widget(Paragraph::new(lines).block(block), popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn popup_height_saturates_on_huge_bodies() {
        assert_eq!(popup_height(3, 6), 9);
        assert_eq!(popup_height(65_530, 6), u16::MAX);
        assert_eq!(popup_height(usize::MAX, 4), u16::MAX);
    }

    #[test]
    fn notice_with_a_very_long_body_still_draws() {
        let notice = Notice {
            title: "refresh failed".to_string(),
            body: "line\n".repeat(70_000),
        };
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render_notice(f, area, &notice)
            })
            .unwrap();
    }
}
