//! Dashboard status panel component
//!
//! Renders the runtime loop status lines

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub fn render_status_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let lines: Vec<Line> = match &state.view {
        Some(view) => view
            .status
            .iter()
            .map(|line| match line.split_once(": ") {
                Some((label, value)) => Line::from(vec![
                    Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
                    Span::styled(
                        value.to_string(),
                        Style::default()
                            .fg(value_color(label, value))
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
                None => Line::from(line.clone()),
            })
            .collect(),
        None => vec![Line::from(Span::styled(
            "Waiting for first refresh...",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let block = Block::default()
        .title("RUNTIME STATUS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn value_color(label: &str, value: &str) -> Color {
    match (label, value) {
        ("Paused", "true") => Color::LightYellow,
        ("Paused", _) => Color::LightGreen,
        ("Last plan", "-") => Color::DarkGray,
        _ => Color::White,
    }
}
