//! Dashboard header component
//!
//! Renders the title and refresh indicator

use super::super::state::DashboardState;
use super::super::utils::format_uptime;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Render header with title and refresh state.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(1)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let title = Paragraph::new(format!("PATCHDASH v{}", version))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let (activity_text, activity_color) = if state.in_flight > 0 {
        let spinner = SPINNER[state.tick / 2 % SPINNER.len()];
        (
            format!("{} {} request(s) in flight", spinner, state.in_flight),
            Color::LightYellow,
        )
    } else {
        ("idle".to_string(), Color::DarkGray)
    };
    let refreshed = state
        .last_refreshed
        .as_deref()
        .map_or("never".to_string(), str::to_string);

    let line = Line::from(vec![
        Span::styled("Runtime: ", Style::default().fg(Color::Gray)),
        Span::styled(
            state.environment.base_url(),
            Style::default().fg(Color::LightBlue),
        ),
        Span::styled("  |  Uptime: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format_uptime(state.start_time.elapsed()),
            Style::default().fg(Color::White),
        ),
        Span::styled("  |  Last refresh: ", Style::default().fg(Color::Gray)),
        Span::styled(refreshed, Style::default().fg(Color::LightGreen)),
        Span::styled("  |  ", Style::default().fg(Color::Gray)),
        Span::styled(activity_text, Style::default().fg(activity_color)),
    ]);
    f.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        header_chunks[1],
    );
}
