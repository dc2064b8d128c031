//! Dashboard state update logic
//!
//! Folds action outcomes and dispatches into the dashboard state

use super::state::{DashboardState, Notice};

use crate::actions::Action;
use crate::controller::Outcome;
use crate::events::{Event, Source};
use crate::ui::form::PatchForm;
use crate::view::DashboardView;
use chrono::Local;

impl DashboardState {
    /// Update the dashboard animation tick.
    pub fn update(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Record that an action was sent off.
    pub fn record_dispatch(&mut self, action: &Action) {
        self.in_flight += 1;
        if let (Action::CreatePatch(_), Some(form)) = (action, self.form.as_mut()) {
            form.set_submitting(true);
        }
        self.add_to_activity_log(Event::dispatched(action));
    }

    /// Apply one outcome produced by the controller.
    pub fn apply_outcome(&mut self, outcome: Outcome) {
        if outcome.is_terminal() {
            self.in_flight = self.in_flight.saturating_sub(1);
        }

        match outcome {
            Outcome::Submitted(action) => {
                // Only the form that was sent closes; a newer draft stays open
                if matches!(action, Action::CreatePatch(_))
                    && self.form.as_ref().is_some_and(PatchForm::is_submitting)
                {
                    self.form = None;
                }
                self.add_to_activity_log(Event::success(
                    Source::from(&action),
                    format!("{} accepted", action),
                ));
            }
            Outcome::Refreshed(snapshot) => {
                let view = DashboardView::from_snapshot(&snapshot);
                self.add_to_activity_log(Event::success(
                    Source::Refresh,
                    format!(
                        "Refreshed: loop {}, {} pending, {} applied",
                        snapshot.status.loop_count,
                        view.pending.rows.len(),
                        view.applied.rows.len()
                    ),
                ));
                self.view = Some(view);
                self.last_refreshed = Some(Local::now().format("%H:%M:%S").to_string());
                self.clamp_selection();
            }
            Outcome::Failed(failure) => {
                // A rejected submission leaves the form open with its contents
                if let (Action::CreatePatch(_), Some(form)) = (&failure.action, self.form.as_mut()) {
                    form.set_submitting(false);
                }
                let source = Source::from(&failure.action);
                self.add_to_activity_log(Event::failure(source, &failure));
                self.notice = Some(Notice::from(&failure));
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use crate::actions::{Action, ActionFailure, ControlAction};
    use crate::controller::tests::{pending, status};
    use crate::controller::{Outcome, Snapshot};
    use crate::environment::Environment;
    use crate::runtime_api::error::RequestError;
    use crate::ui::app::UIConfig;
    use crate::ui::dashboard::state::DashboardState;
    use crate::ui::form::PatchForm;
    use chrono::Utc;
    use std::time::Instant;

    fn state() -> DashboardState {
        DashboardState::new(
            Environment::Local,
            Instant::now(),
            &UIConfig::new(false, None),
        )
    }

    fn snapshot(ids: &[&str]) -> Box<Snapshot> {
        Box::new(Snapshot {
            status: status(1),
            pending: ids.iter().map(|id| pending(id)).collect(),
            applied: Vec::new(),
            audit: Vec::new(),
        })
    }

    fn failure(action: &Action, body: &str) -> ActionFailure {
        ActionFailure::new(
            action,
            RequestError::Http {
                status: 500,
                status_text: "Internal Server Error".to_string(),
                body: body.to_string(),
            },
        )
    }

    #[test]
    fn refresh_replaces_the_whole_view() {
        let mut state = state();
        state.record_dispatch(&Action::Refresh);
        state.apply_outcome(Outcome::Refreshed(snapshot(&["1", "2"])));
        state.apply_outcome(Outcome::Refreshed(snapshot(&["3"])));

        let view = state.view.as_ref().unwrap();
        assert_eq!(view.pending.rows.len(), 1);
        assert_eq!(view.pending.rows[0].cells[0], "3");
        assert_eq!(state.in_flight, 0);
        assert!(state.last_refreshed.is_some());
    }

    #[test]
    fn failed_refresh_keeps_previous_view_and_raises_notice() {
        let mut state = state();
        state.apply_outcome(Outcome::Refreshed(snapshot(&["1"])));
        let before = state.view.clone();

        state.apply_outcome(Outcome::Failed(failure(&Action::Refresh, "audit down")));

        assert_eq!(state.view, before);
        let notice = state.notice.as_ref().unwrap();
        assert_eq!(notice.title, "refresh failed");
        assert!(notice.body.contains("audit down"));
        state.dismiss_notice();
        assert!(state.notice.is_none());
    }

    #[test]
    fn accepted_patch_closes_the_form() {
        let mut state = state();
        let mut form = PatchForm::new();
        form.set_value("summary", "fix X");
        let action = Action::CreatePatch(form.to_patch(Utc::now()));
        state.form = Some(form);

        state.record_dispatch(&action);
        assert!(state.form.as_ref().unwrap().is_submitting());
        state.apply_outcome(Outcome::Submitted(action));
        assert!(state.form.is_none());
        assert_eq!(state.in_flight, 1);
    }

    #[test]
    fn rejected_patch_keeps_form_contents() {
        let mut state = state();
        let mut form = PatchForm::new();
        form.set_value("summary", "fix X");
        let action = Action::CreatePatch(form.to_patch(Utc::now()));
        state.form = Some(form);

        state.record_dispatch(&action);
        state.apply_outcome(Outcome::Failed(failure(&action, "duplicate id")));

        let form = state.form.as_ref().unwrap();
        assert!(!form.is_submitting());
        assert_eq!(form.fields()[1].value, "fix X");
        assert_eq!(state.notice.as_ref().unwrap().title, "patch submission failed");
    }

    #[test]
    fn unrelated_failure_keeps_submission_locked() {
        let mut state = state();
        let mut form = PatchForm::new();
        form.set_value("summary", "fix X");
        let action = Action::CreatePatch(form.to_patch(Utc::now()));
        state.form = Some(form);
        state.record_dispatch(&action);

        let refresh_failure = ActionFailure::new(
            &Action::Refresh,
            RequestError::Http {
                status: 503,
                status_text: "Service Unavailable".to_string(),
                body: "restarting".to_string(),
            },
        );
        state.apply_outcome(Outcome::Failed(refresh_failure));
        assert!(state.form.as_ref().unwrap().is_submitting());

        state.apply_outcome(Outcome::Failed(failure(&Action::Apply("7".into()), "busy")));
        assert!(state.form.as_ref().unwrap().is_submitting());
    }

    #[test]
    fn accepted_patch_leaves_a_newer_draft_open() {
        let mut state = state();
        let mut form = PatchForm::new();
        form.set_value("summary", "first");
        let action = Action::CreatePatch(form.to_patch(Utc::now()));
        state.form = Some(form);
        state.record_dispatch(&action);

        // Esc during the slow submit, then a fresh draft
        let mut draft = PatchForm::new();
        draft.set_value("summary", "second draft");
        state.form = Some(draft);

        state.apply_outcome(Outcome::Submitted(action));

        let form = state.form.as_ref().unwrap();
        assert_eq!(form.fields()[1].value, "second draft");
        assert!(!form.is_submitting());
    }

    #[test]
    fn selection_follows_table_changes() {
        let mut state = state();
        state.apply_outcome(Outcome::Refreshed(snapshot(&["1", "2", "3"])));
        assert_eq!(state.selected_patch_id(), Some("1"));
        state.select_next();
        state.select_next();
        state.select_next();
        assert_eq!(state.selected_patch_id(), Some("3"));

        state.apply_outcome(Outcome::Refreshed(snapshot(&["9"])));
        assert_eq!(state.selected_patch_id(), Some("9"));

        state.apply_outcome(Outcome::Refreshed(snapshot(&[])));
        assert_eq!(state.selected_patch_id(), None);
    }

    #[test]
    fn control_failures_are_logged_under_control() {
        let mut state = state();
        let action = Action::Control(ControlAction::Pause);
        state.apply_outcome(Outcome::Failed(failure(&action, "nope")));
        let event = state.activity_logs.back().unwrap();
        assert_eq!(event.source, crate::events::Source::Control);
        assert_eq!(state.notice.as_ref().unwrap().title, "pause failed");
    }
}
