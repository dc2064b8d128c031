//! Dashboard state management
//!
//! Contains the dashboard state struct and the modal overlays it can show

use crate::actions::ActionFailure;
use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::Event;
use crate::ui::app::UIConfig;
use crate::ui::form::PatchForm;
use crate::view::{DashboardView, PatchControl};

use ratatui::widgets::TableState;
use std::collections::VecDeque;
use std::time::Instant;

/// A blocking error popup. Input goes nowhere else until it is dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

impl From<&ActionFailure> for Notice {
    fn from(failure: &ActionFailure) -> Self {
        Self {
            title: failure.label.clone(),
            body: failure.error.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct DashboardState {
    /// The runtime being watched.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Last successfully rendered view. `None` until the first refresh lands.
    pub view: Option<DashboardView>,
    /// Local time of the last successful refresh.
    pub last_refreshed: Option<String>,
    /// Actions dispatched but not finished yet.
    pub in_flight: usize,
    /// Cursor in the pending patches table.
    pub pending_selection: TableState,
    /// Error waiting to be acknowledged.
    pub notice: Option<Notice>,
    /// Create-patch form, when open.
    pub form: Option<PatchForm>,
    /// Activity logs for display
    pub activity_logs: VecDeque<Event>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,
}

impl DashboardState {
    pub fn new(environment: Environment, start_time: Instant, ui_config: &UIConfig) -> Self {
        Self {
            environment,
            start_time,
            view: None,
            last_refreshed: None,
            in_flight: 0,
            pending_selection: TableState::default(),
            notice: None,
            form: None,
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            tick: 0,
        }
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: Event) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    pub fn pending_len(&self) -> usize {
        self.view.as_ref().map_or(0, |view| view.pending.rows.len())
    }

    /// Patch id under the cursor in the pending table.
    pub fn selected_patch_id(&self) -> Option<&str> {
        let row = self.pending_selection.selected()?;
        self.view.as_ref()?.pending.patch_id(row)
    }

    /// Control of the selected pending row with the given label.
    pub fn selected_control(&self, label: &str) -> Option<&PatchControl> {
        let row = self.pending_selection.selected()?;
        self.view
            .as_ref()?
            .pending
            .rows
            .get(row)?
            .controls
            .iter()
            .find(|control| control.label() == label)
    }

    pub fn select_next(&mut self) {
        let len = self.pending_len();
        if len == 0 {
            self.pending_selection.select(None);
            return;
        }
        let next = self
            .pending_selection
            .selected()
            .map_or(0, |row| (row + 1).min(len - 1));
        self.pending_selection.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        let len = self.pending_len();
        if len == 0 {
            self.pending_selection.select(None);
            return;
        }
        let previous = self
            .pending_selection
            .selected()
            .map_or(0, |row| row.saturating_sub(1));
        self.pending_selection.select(Some(previous));
    }

    /// Keeps the cursor on a valid row after the table was replaced.
    pub(super) fn clamp_selection(&mut self) {
        let len = self.pending_len();
        let selected = match (self.pending_selection.selected(), len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(row), len) => Some(row.min(len - 1)),
        };
        self.pending_selection.select(selected);
    }
}
