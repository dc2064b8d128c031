//! Activity log events
//!
//! What the dashboard did and how it went, as shown in the activity panel and
//! printed by headless mode.

use crate::actions::{Action, ActionFailure};
use crate::error_classifier::ErrorClassifier;
use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;

/// Which part of the dashboard an event concerns.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Source {
    Refresh,
    Control,
    Patch,
}

impl From<&Action> for Source {
    fn from(action: &Action) -> Self {
        match action {
            Action::Refresh => Source::Refresh,
            Action::Control(_) => Source::Control,
            Action::Apply(_) | Action::Rollback(_) | Action::CreatePatch(_) => Source::Patch,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    /// A request was sent.
    Dispatched,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn dispatched(action: &Action) -> Self {
        // Refreshes are frequent enough to be noise at info level
        let level = if action.is_refresh() {
            LogLevel::Debug
        } else {
            LogLevel::Info
        };
        Self::new(
            action.into(),
            format!("{}...", action),
            EventType::Dispatched,
            level,
        )
    }

    pub fn success(source: Source, msg: String) -> Self {
        Self::new(source, msg, EventType::Success, LogLevel::Info)
    }

    pub fn failure(source: Source, failure: &ActionFailure) -> Self {
        let level = ErrorClassifier::new().classify_request_error(&failure.error);
        // Keep the log on one line; the full body is in the notice
        let msg = failure.to_string().replace('\n', " | ");
        Self::new(source, msg, EventType::Error, level)
    }

    pub fn should_display(&self) -> bool {
        if self.event_type == EventType::Success || self.event_type == EventType::Error {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.source, self.msg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ControlAction;
    use crate::runtime_api::error::RequestError;

    #[test]
    fn failure_events_are_single_line_and_classified() {
        let failure = ActionFailure::new(
            &Action::Apply("42".into()),
            RequestError::Http {
                status: 500,
                status_text: "Internal Server Error".into(),
                body: "db locked".into(),
            },
        );
        let event = Event::failure(Source::Patch, &failure);
        assert_eq!(event.msg, "apply failed | 500 Internal Server Error | db locked");
        assert_eq!(event.log_level, LogLevel::Warn);
        assert!(event.should_display());
    }

    #[test]
    fn sources_follow_the_action() {
        assert_eq!(Source::from(&Action::Refresh), Source::Refresh);
        assert_eq!(
            Source::from(&Action::Control(ControlAction::Pause)),
            Source::Control
        );
        assert_eq!(Source::from(&Action::Rollback("1".into())), Source::Patch);
    }

    #[test]
    fn display_includes_type_source_and_message() {
        let event = Event::success(Source::Control, "pause accepted".into());
        let text = event.to_string();
        assert!(text.starts_with("Success ["));
        assert!(text.ends_with("Control: pause accepted"));
    }
}
