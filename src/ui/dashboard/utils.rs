//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::{EventType, Source};
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::prelude::Color;
use std::time::Duration;

/// Get a ratatui color for an activity log entry based on where it came from
pub fn get_source_color(source: &Source, event_type: EventType) -> Color {
    if event_type == EventType::Error {
        return Color::LightRed;
    }
    match source {
        Source::Refresh => Color::Cyan,
        Source::Control => Color::Yellow,
        Source::Patch => Color::Green,
    }
}

/// Color for an audit status string as reported by the runtime
pub fn audit_status_color(status: &str) -> Color {
    let status = status.to_ascii_lowercase();
    if status.contains("fail") || status.contains("error") {
        Color::LightRed
    } else if status.contains("rollback") || status.contains("rolled") {
        Color::Yellow
    } else if status.contains("applied") || status.contains("success") || status == "ok" {
        Color::Green
    } else {
        Color::Gray
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // "YYYY-MM-DD HH:MM:SS" -> "MM-DD HH:MM"
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

/// Format a duration as "1h 02m 03s", dropping leading zero units
pub fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// A rectangle of the given size centered in `area`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_timestamp_keeps_month_day_hour_minute() {
        assert_eq!(format_compact_timestamp("2024-05-06 07:08:09"), "05-06 07:08");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn uptime_drops_leading_zero_units() {
        assert_eq!(format_uptime(Duration::from_secs(7)), "7s");
        assert_eq!(format_uptime(Duration::from_secs(65)), "1m 05s");
        assert_eq!(format_uptime(Duration::from_secs(3723)), "1h 02m 03s");
    }

    #[test]
    fn audit_colors_follow_status_words() {
        assert_eq!(audit_status_color("applied"), Color::Green);
        assert_eq!(audit_status_color("APPLY_FAILED"), Color::LightRed);
        assert_eq!(audit_status_color("rolled_back"), Color::Yellow);
        assert_eq!(audit_status_color("queued"), Color::Gray);
    }

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 10, area);
        assert_eq!((rect.width, rect.height), (60, 10));
        assert_eq!((rect.x, rect.y), (20, 15));

        let small = centered_rect(200, 200, area);
        assert_eq!(small, area);
    }
}
